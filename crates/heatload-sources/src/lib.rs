//! # heatload-sources
//!
//! File-backed implementations of the `heatload-core` source traits.
//!
//! The upstream host keeps the building model and the simulation results in
//! its own proprietary stores; this crate consumes JSON exports of both:
//!
//! - [`ModelSnapshot`]: spatial entities with their classification and room
//!   attributes (`ModelSource`)
//! - [`ResultsFile`]: per-room, per-series sample vectors keyed by
//!   aggregation level (`ResultsSource`)
//! - [`PromptFilePicker`]: terminal prompt for selecting the results file
//!   (`FilePicker`)

pub mod picker;
pub mod results;
pub mod snapshot;

pub use picker::PromptFilePicker;
pub use results::ResultsFile;
pub use snapshot::ModelSnapshot;
