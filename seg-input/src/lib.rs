//! The input pipeline of image segmentation training.
//!
//! It pairs images with annotation masks, writes the pairs to CSV manifests
//! and reads them back into standardized, fixed-size batches.

mod common;
pub mod config;
pub mod dataset;
pub mod pipeline;
pub mod processor;
pub mod profiling;

pub use config::InputConfig;
pub use dataset::{generate_manifest, Batch, Split};
pub use pipeline::InputPipeline;
