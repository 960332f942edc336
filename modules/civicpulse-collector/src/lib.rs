pub mod anonymize;
pub mod collector;
pub mod config;
pub mod scheduler;
pub mod store;

pub use collector::{Collector, CommentSink, CommentSource, CycleStats};
pub use config::CollectorConfig;
pub use store::{CommentStore, NewComment};
