//! Pairwise channel audience-overlap matrix.
use serde::{Deserialize, Serialize};

use crate::constants::{PAIR_OVERLAP_BASE, PAIR_OVERLAP_SPREAD, SELF_OVERLAP_PCT};
use crate::numbers::round1;
use crate::seed::SeededStream;

/// Share of `channel_a`'s audience also reached by `channel_b`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapEntry {
    pub channel_a: String,
    pub channel_b: String,
    pub overlap_pct: f64,
}

/// Build the full `n x n` matrix in row-major order, diagonal included.
///
/// Off-diagonal cells are drawn independently per ordered pair, so
/// `overlap(a, b)` and `overlap(b, a)` are directional and may differ.
#[must_use]
pub fn overlap_matrix(channels: &[String], stream: &mut SeededStream) -> Vec<OverlapEntry> {
    let mut entries = Vec::with_capacity(channels.len() * channels.len());
    for channel_a in channels {
        for channel_b in channels {
            let overlap_pct = if channel_a == channel_b {
                SELF_OVERLAP_PCT
            } else {
                round1(stream.spread(PAIR_OVERLAP_BASE, PAIR_OVERLAP_SPREAD))
            };
            entries.push(OverlapEntry {
                channel_a: channel_a.clone(),
                channel_b: channel_b.clone(),
                overlap_pct,
            });
        }
    }
    entries
}

/// Look up the directional overlap from `a` to `b`.
#[must_use]
pub fn overlap_between(entries: &[OverlapEntry], a: &str, b: &str) -> Option<f64> {
    entries
        .iter()
        .find(|entry| entry.channel_a == a && entry.channel_b == b)
        .map(|entry| entry.overlap_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channels() -> Vec<String> {
        ["BBC One", "ITV", "Channel 4"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn matrix_is_square_with_full_diagonal() {
        let matrix = overlap_matrix(&channels(), &mut SeededStream::from_key("square"));
        assert_eq!(matrix.len(), 9);
        for channel in channels() {
            assert_eq!(overlap_between(&matrix, &channel, &channel), Some(100.0));
        }
    }

    #[test]
    fn off_diagonal_cells_stay_in_range() {
        let mut stream = SeededStream::from_key("range");
        let matrix = overlap_matrix(&channels(), &mut stream);
        assert_eq!(stream.draws(), 6);
        for entry in matrix.iter().filter(|e| e.channel_a != e.channel_b) {
            assert!((8.0..=38.0).contains(&entry.overlap_pct), "{entry:?}");
        }
    }

    #[test]
    fn unknown_pair_is_none() {
        let matrix = overlap_matrix(&channels(), &mut SeededStream::from_key("none"));
        assert_eq!(overlap_between(&matrix, "BBC One", "Dave"), None);
    }
}
