//! Voicebox Tracker Core Library
//!
//! Client-side coordination for local voice recording and background
//! processing: a guarded recording lifecycle, input-device resolution, and a
//! unified view over download, generation and recording-processing tasks
//! kept consistent across polling races.
//!
//! # Example
//!
//! ```no_run
//! use voicebox_tracker_core::{
//!     CoreResult,
//!     poll::{DEFAULT_TASK_LIST_INTERVAL, TaskListPoller},
//!     tasks::HttpTaskSource,
//! };
//!
//! use std::{sync::Arc, time::Duration};
//!
//! use jiff::SignedDuration;
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let source = Arc::new(HttpTaskSource::new("http://127.0.0.1:17493", Duration::from_secs(5))?);
//!     let (handle, mut view) =
//!         TaskListPoller::start(source, DEFAULT_TASK_LIST_INTERVAL, SignedDuration::from_secs(5));
//!
//!     while view.changed().await.is_ok() {
//!         for task in view.borrow().values() {
//!             println!("{} {:?} {}", task.id, task.status, task.subtitle);
//!         }
//!     }
//!
//!     handle.join().await;
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod device;
mod error;
pub mod lifecycle;
pub mod poll;
pub mod tasks;

pub use {error::Result as CoreResult, error::TrackerError};
