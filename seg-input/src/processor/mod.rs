//! Data preprocessing building blocks.

pub mod decode;
pub mod normalize;

pub use decode::*;
pub use normalize::*;
