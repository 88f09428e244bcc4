mod progress;
mod service;
mod session;

// Public API of the session subsystem.
pub use crate::error::StudyError;
pub use progress::StudyProgress;
pub use service::{StudyLaunch, StudyService};
pub use session::StudySession;
