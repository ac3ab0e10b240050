//! Timestamped entity events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{EntityId, EventId, LocationId};

/// A discrete timestamped event performed by a single entity.
///
/// Events are immutable value objects; no component mutates them. The
/// `attributes` side table is an open key-value map, opaque to the matching
/// algorithms and carried through unchanged for downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier within the collection being matched.
    pub id: EventId,
    /// The entity acting in this event.
    pub entity: EntityId,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Where the event occurred, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationId>,
    /// Additional metadata, opaque to matching.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl Event {
    /// Creates an event with no location and no attributes.
    pub fn new(id: EventId, entity: EntityId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            entity,
            timestamp,
            location: None,
            attributes: Map::new(),
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn at_location(mut self, location: LocationId) -> Self {
        self.location = Some(location);
        self
    }
}
