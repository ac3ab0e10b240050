//! Co-occurrence records and entity pairs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::types::{EntityId, LocationId, ValidationError};

/// An unordered pair of distinct entities, stored in canonical order.
///
/// `(a, b)` and `(b, a)` construct the same pair, so records group and sort
/// identically no matter which entity's event came first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityPair {
    first: EntityId,
    second: EntityId,
}

impl EntityPair {
    /// Creates a pair from two distinct entities, normalizing their order.
    pub fn new(a: EntityId, b: EntityId) -> Result<Self, ValidationError> {
        if a == b {
            return Err(ValidationError::SameEntity { entity: a });
        }
        Ok(Self::ordered(a, b))
    }

    /// Normalizing constructor for pairs already known to be distinct.
    pub(crate) fn ordered(a: EntityId, b: EntityId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    /// The lexicographically smaller entity.
    pub const fn first(&self) -> &EntityId {
        &self.first
    }

    /// The lexicographically larger entity.
    pub const fn second(&self) -> &EntityId {
        &self.second
    }
}

impl fmt::Display for EntityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.first, self.second)
    }
}

/// A single co-occurrence between two events of different entities.
///
/// Produced only by the matcher and never mutated. Both events are embedded
/// so downstream consumers keep their attributes without a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooccurrence {
    /// The earlier of the two events (ties broken by event ID).
    pub event: Event,
    /// The later of the two events.
    pub other_event: Event,
    /// Gap between the two events in milliseconds. Never negative.
    pub gap_ms: i64,
    /// Shared location, recorded only when the match was
    /// location-constrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationId>,
}

impl Cooccurrence {
    /// The unordered pair of entities involved.
    pub fn entity_pair(&self) -> EntityPair {
        EntityPair::ordered(self.event.entity.clone(), self.other_event.entity.clone())
    }

    /// Representative time of this record: the moment the co-occurrence
    /// completed, i.e. the later event's timestamp.
    #[must_use]
    pub const fn time(&self) -> DateTime<Utc> {
        self.other_event.timestamp
    }
}
