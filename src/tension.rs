//! Value tension detection over check-in history
//!
//! Two signals, both pure functions of the supplied history:
//! - conflicts: both values of an antagonistic pair score high at once
//! - rapid swings: one value moves sharply between consecutive check-ins
//!
//! Only values present in the first snapshot of a history are followed for
//! swings. A value that first appears in a later check-in is not tracked.

use crate::taxonomy::Taxonomy;
use crate::types::{sort_history, ValueCheckin, ValueSnapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Conflicts in the latest check-in and swings across the whole history
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TensionReport {
    pub conflicts: Vec<String>,
    pub swings: Vec<String>,
}

impl TensionReport {
    /// True when nothing was flagged
    pub fn is_calm(&self) -> bool {
        self.conflicts.is_empty() && self.swings.is_empty()
    }
}

/// Stateless detector parameterized by the taxonomy's pairs and thresholds
#[derive(Debug, Clone)]
pub struct TensionDetector {
    taxonomy: Arc<Taxonomy>,
}

impl Default for TensionDetector {
    fn default() -> Self {
        Self::new(Arc::new(Taxonomy::default()))
    }
}

impl TensionDetector {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Pairs whose two values both reach the conflict threshold, in configured order.
    ///
    /// A value missing from the snapshot scores 0.
    pub fn detect_conflicts(&self, snapshot: &ValueSnapshot) -> Vec<String> {
        let threshold = self.taxonomy.conflict_threshold;
        self.taxonomy
            .conflict_pairs
            .iter()
            .filter(|pair| {
                snapshot.score_or_zero(&pair.first) >= threshold
                    && snapshot.score_or_zero(&pair.second) >= threshold
            })
            .map(|pair| format!("High tension between {} and {}", pair.first, pair.second))
            .collect()
    }

    /// Consecutive changes of at least the rapid-change threshold.
    ///
    /// `history` must be ordered oldest first. A check-in lacking a tracked
    /// value breaks the chain; comparison resumes at its next recorded score.
    pub fn detect_rapid_swings(&self, history: &[ValueSnapshot]) -> Vec<String> {
        let mut swings = Vec::new();
        let Some((first, rest)) = history.split_first() else {
            return swings;
        };
        if rest.is_empty() {
            return swings;
        }

        let threshold = self.taxonomy.rapid_change_threshold.unsigned_abs();
        for value in first.names() {
            let mut prev = first.get(value);
            for snapshot in rest {
                let curr = snapshot.get(value);
                if let (Some(p), Some(c)) = (prev, curr) {
                    if c.abs_diff(p) >= threshold {
                        swings.push(format!("Rapid swing in {}: {} -> {}", value, p, c));
                    }
                }
                prev = curr;
            }
        }

        swings
    }

    /// Conflicts against the most recent snapshot, swings against all of them
    pub fn detect_tension(&self, history: &[ValueSnapshot]) -> TensionReport {
        let Some(latest) = history.last() else {
            return TensionReport::default();
        };

        let report = TensionReport {
            conflicts: self.detect_conflicts(latest),
            swings: self.detect_rapid_swings(history),
        };

        debug!(
            "Tension over {} check-ins: {} conflicts, {} swings",
            history.len(),
            report.conflicts.len(),
            report.swings.len()
        );

        report
    }

    /// Sort check-ins oldest first, then run `detect_tension`
    pub fn analyze_checkins(&self, checkins: &mut [ValueCheckin]) -> TensionReport {
        sort_history(checkins);
        let snapshots: Vec<ValueSnapshot> =
            checkins.iter().map(|c| c.value_snapshot.clone()).collect();
        self.detect_tension(&snapshots)
    }
}
