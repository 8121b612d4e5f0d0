#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress;
pub mod registry;
pub mod view_tracker;

pub use app_services::AppServices;
pub use error::AppServicesError;
pub use progress::{CategoryProgress, ProgressService, StudyProgress};
pub use registry::StudiedPatternRegistry;
pub use view_tracker::{MarkOutcome, ViewCompletionTracker};
