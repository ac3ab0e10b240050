//! Core logic for detecting co-occurring entities in event data.
//!
//! This crate contains the fundamental types and logic for:
//! - Matching: finding pairs of events from different entities whose
//!   timestamps fall within a configured gap, optionally at the same location
//! - Segmentation: splitting each entity pair's co-occurrence timeline into
//!   bouts and retaining only pairs that recur across separate bouts
//!
//! Reading raw event logs into [`Event`] values and building a network from
//! the retained [`Cooccurrence`] records are left to the consumers on either
//! side of this crate.

pub mod event;
pub mod matcher;
pub mod record;
pub mod segmenter;
pub mod types;

pub use event::Event;
pub use matcher::{MatchConfig, MatchError, find_cooccurrences};
pub use record::{Cooccurrence, EntityPair};
pub use segmenter::{
    Partition, SegmentConfig, SegmentError, divide_cooccurrences, partition_cooccurrences,
};
pub use types::{EntityId, EventId, LocationId, ValidationError};
