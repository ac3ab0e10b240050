//! Bout segmentation of co-occurrence timelines.
//!
//! # Algorithm
//!
//! 1. Group records by unordered entity pair
//! 2. Per pair, sort records by time and split them into bouts: a record
//!    whose gap to its predecessor reaches the minimum gap starts a new bout
//! 3. Retain only pairs whose records span at least two bouts; a pair seen
//!    in a single bout is a one-off encounter, however many records it has
//!
//! Pairs are independent, so the per-pair stage runs on rayon; groups are
//! sorted before and after so the output never depends on scheduling.

use std::collections::HashMap;

use rayon::prelude::*;
use thiserror::Error;

use crate::record::{Cooccurrence, EntityPair};

/// Configuration for bout segmentation.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Minimum idle gap between two records, in milliseconds, for them to
    /// fall into separate bouts. Zero puts every record in its own bout,
    /// which retains every pair with more than one record.
    pub min_gap_ms: i64,
}

impl SegmentConfig {
    #[must_use]
    pub const fn new(min_gap_ms: i64) -> Self {
        Self { min_gap_ms }
    }
}

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("minimum gap must be non-negative, got {0} ms")]
    NegativeMinGap(i64),
}

/// Records split by the bout-recurrence filter.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Records of pairs that co-occurred across two or more bouts.
    pub recurring: Vec<Cooccurrence>,
    /// Records of pairs whose co-occurrences all fall into a single bout.
    pub incidental: Vec<Cooccurrence>,
}

/// Split co-occurrences into recurring and incidental records.
///
/// A pair is recurring when its records span at least two bouts separated by
/// `config.min_gap_ms` or more of idle time. Everything else is incidental,
/// including any pair with a single record. Both halves are ordered by
/// entity pair, then record time, then event IDs, regardless of input order.
pub fn partition_cooccurrences(
    records: Vec<Cooccurrence>,
    config: &SegmentConfig,
) -> Result<Partition, SegmentError> {
    if config.min_gap_ms < 0 {
        return Err(SegmentError::NegativeMinGap(config.min_gap_ms));
    }

    let mut groups: HashMap<EntityPair, Vec<Cooccurrence>> = HashMap::new();
    for record in records {
        groups.entry(record.entity_pair()).or_default().push(record);
    }

    // Sort groups by pair for deterministic output (HashMap iteration order
    // is non-deterministic)
    let mut sorted_groups: Vec<_> = groups.into_iter().collect();
    sorted_groups.sort_by(|(a, _), (b, _)| a.cmp(b));

    let split: Vec<(bool, Vec<Cooccurrence>)> = sorted_groups
        .into_par_iter()
        .map(|(pair, mut group)| {
            group.sort_by(|a, b| {
                a.time()
                    .cmp(&b.time())
                    .then_with(|| a.event.id.cmp(&b.event.id))
                    .then_with(|| a.other_event.id.cmp(&b.other_event.id))
            });
            let bouts = count_bouts(&group, config.min_gap_ms);
            tracing::trace!(%pair, records = group.len(), bouts, "segmented pair");
            (bouts >= 2, group)
        })
        .collect();

    let mut partition = Partition::default();
    for (recurring, group) in split {
        if recurring {
            partition.recurring.extend(group);
        } else {
            partition.incidental.extend(group);
        }
    }

    tracing::debug!(
        recurring = partition.recurring.len(),
        incidental = partition.incidental.len(),
        min_gap_ms = config.min_gap_ms,
        "partitioned co-occurrences"
    );
    Ok(partition)
}

/// Retain only the co-occurrences of pairs recurring across separate bouts.
///
/// The retained half of [`partition_cooccurrences`]; see there for the exact
/// semantics and output ordering.
pub fn divide_cooccurrences(
    records: Vec<Cooccurrence>,
    config: &SegmentConfig,
) -> Result<Vec<Cooccurrence>, SegmentError> {
    Ok(partition_cooccurrences(records, config)?.recurring)
}

/// Number of bouts in one pair's time-sorted records.
///
/// The first record opens a bout; each later record starts a new one iff its
/// gap to the previous record is at least `min_gap_ms`.
fn count_bouts(records: &[Cooccurrence], min_gap_ms: i64) -> usize {
    let mut bouts = 0;
    let mut last_time: Option<chrono::DateTime<chrono::Utc>> = None;
    for record in records {
        let starts_new_bout = last_time
            .is_none_or(|last| (record.time() - last).num_milliseconds() >= min_gap_ms);
        if starts_new_bout {
            bouts += 1;
        }
        last_time = Some(record.time());
    }
    bouts
}
