pub mod aggregator;
pub mod decoder;
pub mod resolver;

pub use aggregator::{DayOverlap, Dominant, HourOverlap, intensity_tier, overlaps_for_day};
pub use decoder::{DecodedSchedule, TaskHours, decode_blocks, decode_by_user};
pub use resolver::{NameResolver, resolve_assignments};
