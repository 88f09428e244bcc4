#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod study;
pub mod time;

pub use error::Error;
pub use study::{
    CardSide, NavigationTarget, Outcome, StudyAction, StudyInput, StudyKey, StudyState, StudySummary,
};
pub use time::Clock;
