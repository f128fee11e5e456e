pub use anyhow::{bail, ensure, format_err, Context as _, Error, Result};
pub use futures::stream::{self, Stream, StreamExt as _};
pub use image::{DynamicImage, ImageBuffer, ImageFormat, Pixel};
pub use lazy_static::lazy_static;
pub use ndarray::{Array3, Array4, Axis};
pub use noisy_float::prelude::*;
pub use rand::{prelude::*, rngs::StdRng, seq::SliceRandom};
pub use serde::{Deserialize, Serialize};
pub use std::{
    collections::HashSet,
    fmt,
    fs,
    io::{self, BufRead, BufReader},
    mem,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
    time::{Duration, Instant},
};
pub use tracing::{debug, info, info_span, instrument, trace, warn, Instrument};
