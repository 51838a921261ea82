pub mod assign;
pub mod dashboard;
pub mod result;

pub use assign::{
    MemberPreferenceSummary, PreferenceForm, group_room_preferences, submit_preferences,
};
pub use dashboard::{DashboardService, DashboardView};
pub use result::{AssignedTaskRow, UserTaskGroup, group_by_user};
