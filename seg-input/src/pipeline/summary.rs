use crate::{common::*, dataset::Batch};

/// Shape and pixel statistics of a batch, for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub image_shape: Vec<usize>,
    pub label_shape: Vec<usize>,
    pub image_min: f32,
    pub image_max: f32,
    pub image_mean: f32,
    /// The fraction of label samples that are non-zero.
    pub foreground_ratio: f32,
}

impl BatchSummary {
    pub fn new(batch: &Batch) -> Self {
        let images = &batch.images;
        let labels = &batch.labels;

        let (image_min, image_max) = images
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &value| {
                (min.min(value), max.max(value))
            });
        let image_mean = images.mean().unwrap_or(0.0);
        let foreground_ratio = if labels.is_empty() {
            0.0
        } else {
            labels.iter().filter(|&&value| value != 0).count() as f32 / labels.len() as f32
        };

        Self {
            image_shape: images.shape().to_vec(),
            label_shape: labels.shape().to_vec(),
            image_min,
            image_max,
            image_mean,
            foreground_ratio,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "images {:?} in [{:.3}, {:.3}] mean {:.3}, labels {:?} foreground {:.2}%",
            self.image_shape,
            self.image_min,
            self.image_max,
            self.image_mean,
            self.label_shape,
            self.foreground_ratio * 100.0
        )
    }
}
