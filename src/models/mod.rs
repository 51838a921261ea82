pub mod schedule;
pub mod task;
pub mod user;

pub use schedule::{
    BlockType, DaySchedule, DayOfWeek, SlotType, TaskInfo, TimeBlock, WeeklySchedule, monday_of,
};
pub use task::{Assignment, TimeRange};
pub use user::{IdentitySource, Room, User};
