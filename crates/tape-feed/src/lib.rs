//! Live feed side of tickertape.
//!
//! Follows a growing feed file and turns each appended line into a labeled
//! record:
//! - `FileFollower`: tail -f over a local file, cancellable poll-wait
//! - `RecordSpec` / `RecordPipeline`: split, project, convert, label
//! - `filter_symbols`: portfolio membership filter

pub mod error;
pub mod filter;
pub mod follower;
pub mod stages;

pub use error::{FeedError, FeedResult};
pub use filter::filter_symbols;
pub use follower::{FileFollower, DEFAULT_POLL_INTERVAL};
pub use stages::{ConvertErrorPolicy, RecordPipeline, RecordSpec};
