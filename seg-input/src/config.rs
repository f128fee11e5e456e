//! Input pipeline configuration format.

use crate::{common::*, dataset::TrainSampling};

/// The input pipeline configuration.
///
/// Every field has a default, so an empty json5 object `{}` is a valid
/// configuration describing 400x600 RGB images with single-channel masks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// The dataset directory containing `images_<split>` and `segments_<split>`.
    pub data_dir: PathBuf,
    /// The directory where manifest files are written to and read from.
    pub manifest_dir: PathBuf,
    /// The file name suffix of listed image files.
    pub image_extension: String,
    pub image_height: usize,
    pub image_width: usize,
    pub image_channels: usize,
    pub label_channels: usize,
    /// The number of examples per training epoch. It determines the queue depth.
    pub num_examples_per_epoch_for_train: usize,
    pub num_examples_per_epoch_for_eval: usize,
    /// The fraction of an epoch retained in the example queue.
    pub min_fraction_of_examples_in_queue: R64,
    /// The batch size.
    pub batch_size: NonZeroUsize,
    /// The number of decoding workers.
    pub num_workers: NonZeroUsize,
    /// If set, batches are drawn at random from a shuffle buffer.
    pub shuffle: bool,
    /// The divisor applied to annotation pixel values.
    pub label_scale: i32,
    /// The number of passes over the manifest. It cycles forever if unset.
    pub num_epochs: Option<NonZeroUsize>,
    /// The row sampling method for train manifests.
    pub train_sampling: TrainSampling,
    /// The random seed. It is drawn from entropy if unset.
    pub seed: Option<u64>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            manifest_dir: PathBuf::from("."),
            image_extension: ".png".into(),
            image_height: 400,
            image_width: 600,
            image_channels: 3,
            label_channels: 1,
            num_examples_per_epoch_for_train: 320,
            num_examples_per_epoch_for_eval: 20,
            min_fraction_of_examples_in_queue: r64(0.4),
            batch_size: NonZeroUsize::new(5).unwrap(),
            num_workers: NonZeroUsize::new(16).unwrap(),
            shuffle: false,
            label_scale: 255,
            num_epochs: None,
            train_sampling: TrainSampling::Permutation,
            seed: None,
        }
    }
}

impl InputConfig {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config: Self = json5::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.image_height > 0 && self.image_width > 0,
            "image_height and image_width must be positive"
        );
        ensure!(self.image_channels > 0, "image_channels must be positive");
        ensure!(self.label_channels > 0, "label_channels must be positive");
        ensure!(self.label_scale > 0, "label_scale must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.min_fraction_of_examples_in_queue.raw()),
            "min_fraction_of_examples_in_queue must be within [0, 1]"
        );
        ensure!(
            !self.image_extension.is_empty(),
            "image_extension must not be empty"
        );
        Ok(())
    }

    /// The minimum number of examples kept in the example queue.
    pub fn min_queue_examples(&self) -> usize {
        (self.num_examples_per_epoch_for_train as f64 * self.min_fraction_of_examples_in_queue.raw())
            as usize
    }

    /// The capacity of the example queue.
    pub fn queue_capacity(&self) -> usize {
        self.min_queue_examples() + self.batch_size.get()
    }

    /// Build the random generator from the configured seed.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
