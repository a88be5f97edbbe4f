// Re-export modules
pub mod accessor;
pub mod collector;
pub mod config;
pub mod error;
pub mod listing;
pub mod report;
pub mod session;
pub mod videos;

// Re-export commonly used types for convenience
pub use accessor::{ItemField, ItemHandle, PageAccessor};
pub use collector::{CollectedRecord, CollectionResult, collect};
pub use config::CollectorConfig;
pub use error::{Error, Result};
pub use report::ReportWriter;
pub use session::StoreSession;
pub use videos::VideoSurvey;
