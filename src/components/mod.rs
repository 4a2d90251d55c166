pub mod recent_workouts;

pub use recent_workouts::{RecentWorkouts, RecentWorkoutsProps, YewListSurface};
