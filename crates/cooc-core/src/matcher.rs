//! Pairwise co-occurrence matching.
//!
//! # Algorithm
//!
//! 1. Validate the gap tolerance and event ID uniqueness
//! 2. Sort events by `(timestamp, id)` for a deterministic scan order
//! 3. Sweep a sliding window: each event is compared only against the later
//!    events still within the gap tolerance
//!
//! Sorting makes the window monotone: once a later event falls outside the
//! tolerance, every event after it does too, so the sweep stops there. Total
//! cost is O(n log n) for the sort plus O(n·k) pair emission, where k is the
//! window occupancy.

use std::collections::HashSet;

use thiserror::Error;

use crate::event::Event;
use crate::record::Cooccurrence;
use crate::types::{EventId, LocationId};

/// Configuration for co-occurrence matching.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Maximum gap between two events, in milliseconds. The boundary is
    /// inclusive: a pair separated by exactly this gap still matches. Zero
    /// matches only exactly simultaneous events.
    pub max_gap_ms: i64,

    /// Require both events of a pair to carry the same known location.
    /// Pairs where either event lacks a location are excluded under this
    /// mode, not rejected.
    pub same_location: bool,
}

impl MatchConfig {
    /// Creates a config with the given gap tolerance and no location
    /// constraint.
    #[must_use]
    pub const fn new(max_gap_ms: i64) -> Self {
        Self {
            max_gap_ms,
            same_location: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("maximum gap must be non-negative, got {0} ms")]
    NegativeMaxGap(i64),
    #[error("duplicate event ID: {0}")]
    DuplicateEventId(EventId),
}

/// Find every co-occurrence between events of different entities.
///
/// Two events co-occur when their timestamps are within `config.max_gap_ms`
/// of each other and, if `config.same_location` is set, both carry the same
/// known location. Each qualifying pair yields exactly one record with the
/// earlier event first; output follows the time-sorted scan order, with ties
/// broken by event ID so identical inputs always produce identical output.
pub fn find_cooccurrences(
    events: &[Event],
    config: &MatchConfig,
) -> Result<Vec<Cooccurrence>, MatchError> {
    if config.max_gap_ms < 0 {
        return Err(MatchError::NegativeMaxGap(config.max_gap_ms));
    }

    let mut seen_ids: HashSet<&EventId> = HashSet::with_capacity(events.len());
    for event in events {
        if !seen_ids.insert(&event.id) {
            return Err(MatchError::DuplicateEventId(event.id.clone()));
        }
    }

    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut cooccurrences = Vec::new();
    for (i, &event) in ordered.iter().enumerate() {
        for &other in &ordered[i + 1..] {
            let gap_ms = (other.timestamp - event.timestamp).num_milliseconds();
            if gap_ms > config.max_gap_ms {
                // Monotone window: no later event can be closer.
                break;
            }
            if other.entity == event.entity {
                continue;
            }

            let location = if config.same_location {
                match shared_location(event, other) {
                    Some(location) => Some(location.clone()),
                    None => continue,
                }
            } else {
                None
            };

            cooccurrences.push(Cooccurrence {
                event: event.clone(),
                other_event: other.clone(),
                gap_ms,
                location,
            });
        }
    }

    tracing::debug!(
        events = events.len(),
        cooccurrences = cooccurrences.len(),
        max_gap_ms = config.max_gap_ms,
        same_location = config.same_location,
        "matched co-occurrences"
    );
    Ok(cooccurrences)
}

/// The location both events share, if both carry one and they are equal.
fn shared_location<'a>(a: &'a Event, b: &Event) -> Option<&'a LocationId> {
    match (&a.location, &b.location) {
        (Some(la), Some(lb)) if la == lb => Some(la),
        _ => None,
    }
}
