//! Dataset discovery, manifests and manifest reading.

mod manifest;
mod pair;
mod reader;
mod record;
mod split;

pub use manifest::*;
pub use pair::*;
pub use reader::*;
pub use record::*;
pub use split::*;
