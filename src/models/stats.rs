//! Accuracy aggregates over analyzed areas for the progress dashboard.

use serde::{Deserialize, Serialize};

use crate::models::AnalyzedArea;

/// Aggregate decision accuracy, overall and inside the special zone.
///
/// Computed on demand from the registry's current entries; holds no state
/// of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RegistryStats {
    /// Total analyzed areas
    pub total: u32,
    /// Areas with a correct decision
    pub correct: u32,
    /// Percent correct over all areas (0 when empty)
    pub accuracy_percent: f64,
    /// Areas inside the special mission zone
    pub special_zone_total: u32,
    /// Special-zone areas with a correct decision
    pub special_zone_correct: u32,
    /// Percent correct over special-zone areas (0 when none)
    pub special_zone_accuracy_percent: f64,
}

impl RegistryStats {
    /// Aggregate over the given areas.
    pub fn from_areas<'a, I>(areas: I) -> Self
    where
        I: IntoIterator<Item = &'a AnalyzedArea>,
    {
        let mut stats = Self::default();

        for area in areas {
            stats.total += 1;
            if area.correct_decision {
                stats.correct += 1;
            }
            if area.special_zone {
                stats.special_zone_total += 1;
                if area.correct_decision {
                    stats.special_zone_correct += 1;
                }
            }
        }

        stats.accuracy_percent = percent(stats.correct, stats.total);
        stats.special_zone_accuracy_percent =
            percent(stats.special_zone_correct, stats.special_zone_total);
        stats
    }
}

/// Percentage with a defined zero for an empty denominator (never NaN).
fn percent(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        f64::from(numerator) / f64::from(denominator) * 100.0
    }
}
