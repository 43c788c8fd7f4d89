use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use reachplan_engine::{EfficiencyRating, PlanRun, ScenarioComparison, StaticTaxonomy};

pub fn generate_json_report<W, T>(out: &mut W, value: &T) -> Result<()>
where
    W: Write + ?Sized,
    T: Serialize + ?Sized,
{
    let json_output = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_run_console_report<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    run: &PlanRun,
) -> Result<()> {
    let kpis = &run.kpis;
    writeln!(out)?;
    writeln!(out, "{}", format!("📺 Plan: {name}").bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(30).cyan())?;
    writeln!(out, "Channels: {}", run.config.channels.join(", "))?;
    writeln!(
        out,
        "Audience: {} ({})",
        run.config.audience, run.config.market
    )?;
    writeln!(out, "Booked slots: {}", run.config.total_slots())?;
    writeln!(out)?;

    writeln!(out, "{}", "📊 Headline KPIs".bright_yellow().bold())?;
    writeln!(out, "{}", "-".repeat(30).yellow())?;
    writeln!(out, "Universe: {}", kpis.universe)?;
    writeln!(
        out,
        "Reach: {} ({}%)",
        kpis.reach,
        kpis.reach_pct.to_string().green()
    )?;
    writeln!(out, "Avg frequency: {}", kpis.avg_frequency)?;
    writeln!(out, "GRPs: {}", kpis.grp)?;
    writeln!(out, "Effective reach (3+): {}%", kpis.effective_reach_pct)?;
    writeln!(out, "Estimated spend: £{}", kpis.estimated_spend)?;
    writeln!(out, "CPM: £{:.2}", kpis.cpm)?;
    writeln!(out)?;

    writeln!(out, "{}", "📈 Reach Curve".bright_yellow().bold())?;
    for point in &run.reach_curve {
        writeln!(
            out,
            "   {:>2}+  {:>5.1}%  {}",
            point.frequency, point.reach_pct, point.cumulative_reach
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "📡 Channel Contribution".bright_yellow().bold())?;
    for contribution in &run.contributions {
        writeln!(
            out,
            "   {:<20} incremental {:>5.1}%  overlap {:>5.1}%  exclusive {:>5.1}%  £{}/pt",
            contribution.channel,
            contribution.incremental_reach_pct,
            contribution.overlap_pct,
            contribution.exclusive_reach_pct,
            contribution.cost_per_reach_point
        )?;
    }
    writeln!(out)?;

    writeln!(out, "{}", "🕒 Daypart Efficiency".bright_yellow().bold())?;
    for entry in &run.dayparts {
        let rating = match entry.rating {
            EfficiencyRating::High => entry.rating.to_string().green(),
            EfficiencyRating::Medium => entry.rating.to_string().yellow(),
            EfficiencyRating::Low => entry.rating.to_string().red(),
        };
        writeln!(
            out,
            "   {:<14} {:<12} reach {:>5.1}%  GRPs {:>6.1}  CPM £{:>6.2}  attention {:>4.1}  {}",
            entry.daypart_name,
            entry.time_window,
            entry.reach_pct,
            entry.grp,
            entry.cpm,
            entry.attention_score,
            rating
        )?;
    }
    if !run.recommended_dayparts.is_empty() {
        let names: Vec<&str> = run.recommended_dayparts.iter().map(|d| d.name()).collect();
        writeln!(out, "   Recommended: {}", names.join(", ").green())?;
    }
    writeln!(out)?;

    if let Some(ctv) = &run.ctv {
        writeln!(out, "{}", "📱 Linear + CTV".bright_blue().bold())?;
        writeln!(out, "   Linear only: {}%", ctv.linear_only_pct)?;
        writeln!(out, "   CTV only: {}%", ctv.ctv_only_pct)?;
        writeln!(out, "   Overlap: {}%", ctv.overlap_pct)?;
        writeln!(out, "   Combined reach: {}%", ctv.combined_reach_pct)?;
        writeln!(out, "   Dedup savings: {}%", ctv.dedup_savings_pct)?;
        for platform in &ctv.platform_breakdown {
            writeln!(
                out,
                "     • {} reach {}% (+{}%)",
                platform.platform, platform.reach_pct, platform.incremental_reach_pct
            )?;
        }
        writeln!(out)?;
    }

    if !run.competitors.is_empty() {
        writeln!(out, "{}", "🏁 Competitors".bright_magenta().bold())?;
        for profile in &run.competitors {
            writeln!(
                out,
                "   {:<14} £{:<9} SOV {:>4.1}%  GRPs {:>5.1}  on {}",
                profile.brand.bold(),
                profile.spend,
                profile.share_of_voice_pct,
                profile.grp,
                profile.channels.join(", ")
            )?;
        }
    }
    Ok(())
}

pub fn generate_run_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    run: &PlanRun,
) -> Result<()> {
    let kpis = &run.kpis;
    writeln!(out, "# Reach Plan: {name}\n")?;
    writeln!(out, "- **Channels**: {}", run.config.channels.join(", "))?;
    writeln!(out, "- **Audience**: {}", run.config.audience)?;
    writeln!(out, "- **Market**: {}\n", run.config.market)?;

    writeln!(out, "## KPIs\n")?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "| --- | --- |")?;
    writeln!(out, "| Universe | {} |", kpis.universe)?;
    writeln!(out, "| Reach | {} |", kpis.reach)?;
    writeln!(out, "| Reach % | {} |", kpis.reach_pct)?;
    writeln!(out, "| Avg Frequency | {} |", kpis.avg_frequency)?;
    writeln!(out, "| GRPs | {} |", kpis.grp)?;
    writeln!(out, "| Effective Reach % | {} |", kpis.effective_reach_pct)?;
    writeln!(out, "| Estimated Spend | {} |", kpis.estimated_spend)?;
    writeln!(out, "| CPM | {:.2} |\n", kpis.cpm)?;

    writeln!(out, "## Reach Curve\n")?;
    writeln!(out, "| Frequency | Reach % | Cumulative Reach |")?;
    writeln!(out, "| --- | --- | --- |")?;
    for point in &run.reach_curve {
        writeln!(
            out,
            "| {}+ | {} | {} |",
            point.frequency, point.reach_pct, point.cumulative_reach
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Dayparts\n")?;
    writeln!(out, "| Daypart | Window | Reach % | GRPs | CPM | Attention | Rating |")?;
    writeln!(out, "| --- | --- | --- | --- | --- | --- | --- |")?;
    for entry in &run.dayparts {
        writeln!(
            out,
            "| {} | {} | {} | {} | {:.2} | {} | {} |",
            entry.daypart_name,
            entry.time_window,
            entry.reach_pct,
            entry.grp,
            entry.cpm,
            entry.attention_score,
            entry.rating
        )?;
    }
    writeln!(out)?;

    if let Some(ctv) = &run.ctv {
        writeln!(out, "## Linear + CTV\n")?;
        writeln!(out, "- **Linear only**: {}%", ctv.linear_only_pct)?;
        writeln!(out, "- **CTV only**: {}%", ctv.ctv_only_pct)?;
        writeln!(out, "- **Overlap**: {}%", ctv.overlap_pct)?;
        writeln!(out, "- **Combined reach**: {}%", ctv.combined_reach_pct)?;
        writeln!(out, "- **Dedup savings**: {}%\n", ctv.dedup_savings_pct)?;
    }

    if !run.competitors.is_empty() {
        writeln!(out, "## Competitors\n")?;
        for profile in &run.competitors {
            writeln!(
                out,
                "- **{}**: spend {}, SOV {}%, {} GRPs",
                profile.brand, profile.spend, profile.share_of_voice_pct, profile.grp
            )?;
        }
    }
    Ok(())
}

pub fn generate_comparison_console_report<W: Write + ?Sized>(
    out: &mut W,
    comparison: &ScenarioComparison,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "⚖️  Scenario Comparison".bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(30).cyan())?;
    write!(out, "{:<20}", "")?;
    for (id, name) in comparison.scenario_ids.iter().zip(&comparison.scenario_names) {
        write!(out, " {:>24}", format!("{id} {name}"))?;
    }
    writeln!(out)?;
    for row in &comparison.rows {
        write!(out, "{:<20}", row.label.bold())?;
        for value in &row.values {
            write!(out, " {:>24}", value.to_string())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_comparison_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    comparison: &ScenarioComparison,
) -> Result<()> {
    writeln!(out, "# Scenario Comparison\n")?;
    write!(out, "| Metric |")?;
    for name in &comparison.scenario_names {
        write!(out, " {name} |")?;
    }
    writeln!(out)?;
    write!(out, "| --- |")?;
    for _ in &comparison.scenario_names {
        write!(out, " --- |")?;
    }
    writeln!(out)?;
    for row in &comparison.rows {
        write!(out, "| {} |", row.label)?;
        for value in &row.values {
            write!(out, " {value} |")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_taxonomy_report<W: Write + ?Sized>(
    out: &mut W,
    taxonomy: &StaticTaxonomy,
) -> Result<()> {
    let sections: [(&str, &[String]); 5] = [
        ("Channels", taxonomy.channels.as_slice()),
        ("Streaming platforms", taxonomy.streaming_platforms.as_slice()),
        ("Audiences", taxonomy.audiences.as_slice()),
        ("Markets", taxonomy.markets.as_slice()),
        ("Competitors", taxonomy.competitors.as_slice()),
    ];
    for (title, values) in sections {
        writeln!(out, "{title}:")?;
        for value in values {
            writeln!(out, "  {value}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reachplan_engine::{DaypartSchedule, MediaPlanConfig, PlanEngine, ScenarioStore};

    fn sample_run() -> PlanRun {
        let plan = MediaPlanConfig::new(["BBC One", "ITV"], "Adults 16-64", "United Kingdom")
            .with_dayparts(DaypartSchedule::uniform(1, 1))
            .with_ctv(["Netflix"]);
        PlanEngine::new(StaticTaxonomy::default()).run(&plan).unwrap()
    }

    #[test]
    fn markdown_report_lists_kpis_and_dayparts() {
        let mut buffer = Vec::new();
        generate_run_markdown_report(&mut buffer, "Launch", &sample_run()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Reach Plan: Launch"));
        assert!(text.contains("| Reach % |"));
        assert!(text.contains("| Peak | 19:00-21:00 |"));
        assert!(text.contains("## Linear + CTV"));
    }

    #[test]
    fn json_report_parses_back() {
        let run = sample_run();
        let mut buffer = Vec::new();
        generate_json_report(&mut buffer, &run).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["kpis"]["universe"], run.kpis.universe);
        assert_eq!(parsed["reach_curve"].as_array().map(Vec::len), Some(12));
    }

    #[test]
    fn comparison_markdown_has_one_column_per_scenario() {
        let run = sample_run();
        let mut store = ScenarioStore::new();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let a = store.save_run("A", &run, at).unwrap();
        let b = store.save_run("B", &run, at).unwrap();
        let comparison = store.compare(&[a, b]).unwrap();

        let mut buffer = Vec::new();
        generate_comparison_markdown_report(&mut buffer, &comparison).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("| Metric | A | B |"));
        assert!(text.contains("| CTV Included | yes | yes |"));
    }

    #[test]
    fn taxonomy_report_lists_sections() {
        let mut buffer = Vec::new();
        generate_taxonomy_report(&mut buffer, &StaticTaxonomy::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Channels:\n  BBC One"));
        assert!(text.contains("Competitors:"));
    }
}
