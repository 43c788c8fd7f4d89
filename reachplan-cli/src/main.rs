mod reports;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use reachplan_engine::{
    MediaPlanConfig, PlanEngine, PlanGuards, PlanRun, ScenarioStore, StaticTaxonomy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored human-readable summary
    Console,
    /// Markdown tables
    Markdown,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a plan file and report every estimate
    Run {
        /// Plan JSON file
        plan: PathBuf,
    },
    /// Run several plan files, save each as a scenario and compare them
    Compare {
        /// Plan JSON files (at least two)
        #[arg(required = true, num_args = 2..)]
        plans: Vec<PathBuf>,
    },
    /// Print the channel, platform, audience, market and competitor lists
    Taxonomy,
}

#[derive(Debug, Parser)]
#[command(name = "reachplan", version)]
#[command(about = "Deterministic reach and frequency planning for TV and streaming media plans")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console, global = true)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Taxonomy JSON file replacing the built-in UK lists
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    /// Minimum number of channels a plan must select
    #[arg(long, global = true)]
    min_channels: Option<usize>,

    /// Minimum number of waves a plan must select
    #[arg(long, global = true)]
    min_waves: Option<usize>,

    /// Enforce planning-screen minimums (one channel, four waves)
    #[arg(long, global = true)]
    strict: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let taxonomy = load_taxonomy(args.taxonomy.as_deref())?;
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match &args.command {
        Command::Run { plan } => {
            let engine = PlanEngine::with_guards(taxonomy, build_guards(&args));
            let run = run_plan_file(&engine, plan)?;
            write_run_report(&mut output_target, args.report, &plan_label(plan), &run)?;
        }
        Command::Compare { plans } => {
            let engine = PlanEngine::with_guards(taxonomy, build_guards(&args));
            compare_plan_files(&mut output_target, args.report, &engine, plans)?;
        }
        Command::Taxonomy => match args.report {
            ReportFormat::Json => reports::generate_json_report(&mut output_target, &taxonomy)?,
            ReportFormat::Console | ReportFormat::Markdown => {
                reports::generate_taxonomy_report(&mut output_target, &taxonomy)?;
            }
        },
    }

    output_target.flush_inner()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn load_taxonomy(path: Option<&Path>) -> Result<StaticTaxonomy> {
    let Some(path) = path else {
        return Ok(StaticTaxonomy::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read taxonomy {}", path.display()))?;
    StaticTaxonomy::from_json(&json)
        .with_context(|| format!("failed to parse taxonomy {}", path.display()))
}

fn build_guards(args: &Args) -> PlanGuards {
    let mut guards = if args.strict {
        PlanGuards::strict()
    } else {
        PlanGuards::default()
    };
    if let Some(min_channels) = args.min_channels {
        guards.min_channels = min_channels;
    }
    if let Some(min_waves) = args.min_waves {
        guards.min_waves = min_waves;
    }
    guards
}

fn load_plan(path: &Path) -> Result<MediaPlanConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read plan {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse plan {}", path.display()))
}

fn plan_label(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned())
}

fn run_plan_file(engine: &PlanEngine<StaticTaxonomy>, path: &Path) -> Result<PlanRun> {
    let config = load_plan(path)?;
    log::debug!("loaded plan {} with {} channels", path.display(), config.channels.len());
    engine
        .run(&config)
        .with_context(|| format!("plan {} could not be run", path.display()))
}

fn write_run_report(
    out: &mut OutputTarget,
    format: ReportFormat,
    name: &str,
    run: &PlanRun,
) -> Result<()> {
    match format {
        ReportFormat::Json => reports::generate_json_report(out, run),
        ReportFormat::Markdown => reports::generate_run_markdown_report(out, name, run),
        ReportFormat::Console => reports::generate_run_console_report(out, name, run),
    }
}

fn compare_plan_files(
    out: &mut OutputTarget,
    format: ReportFormat,
    engine: &PlanEngine<StaticTaxonomy>,
    plans: &[PathBuf],
) -> Result<()> {
    let mut store = ScenarioStore::new();
    let mut ids = Vec::with_capacity(plans.len());
    for path in plans {
        let run = run_plan_file(engine, path)?;
        let id = store.save_run(&plan_label(path), &run, Utc::now())?;
        ids.push(id);
    }
    let comparison = store.compare(&ids)?;

    match format {
        ReportFormat::Json => reports::generate_json_report(out, &comparison),
        ReportFormat::Markdown => reports::generate_comparison_markdown_report(out, &comparison),
        ReportFormat::Console => {
            reports::generate_comparison_console_report(out, &comparison)?;
            writeln!(
                out,
                "\n{} {} scenarios compared",
                "✅".green(),
                comparison.scenario_ids.len()
            )?;
            Ok(())
        }
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
