use super::*;
use crate::{common::*, processor::load_png};

/// The decoded image and annotation of a manifest line, before processing.
///
/// Pixel arrays are laid out as `[height, width, channels]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleRecord {
    pub image: Array3<u16>,
    pub label: Array3<u16>,
    pub image_path: PathBuf,
    pub annotation_path: PathBuf,
    /// The manifest line this record is read from.
    pub csv_line: String,
}

impl ExampleRecord {
    /// Read and decode both files referenced by a manifest line.
    pub fn load(line: ManifestLine) -> Result<Self> {
        let ManifestLine {
            line: csv_line,
            pair:
                FilePair {
                    image_path,
                    annotation_path,
                },
            ..
        } = line;

        let image = load_png(&image_path)?;
        let label = load_png(&annotation_path)?;

        Ok(Self {
            image,
            label,
            image_path,
            annotation_path,
            csv_line,
        })
    }
}

/// The standardized image and scaled label ready for batching.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// `[height, width, image_channels]`
    pub image: Array3<f32>,
    /// `[height, width, label_channels]`
    pub label: Array3<i32>,
    pub image_path: PathBuf,
}

/// A fixed-size group of examples.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// `[batch_size, height, width, image_channels]`
    pub images: Array4<f32>,
    /// `[batch_size, height, width, label_channels]`
    pub labels: Array4<i32>,
    pub image_paths: Vec<PathBuf>,
}

impl Batch {
    /// Stack examples of identical shapes along a new leading axis.
    pub fn from_examples(examples: Vec<Example>) -> Result<Self> {
        ensure!(!examples.is_empty(), "cannot build a batch from no examples");

        let images: Vec<_> = examples.iter().map(|example| example.image.view()).collect();
        let labels: Vec<_> = examples.iter().map(|example| example.label.view()).collect();
        let images = ndarray::stack(Axis(0), &images)
            .context("images in a batch must have the same shape")?;
        let labels = ndarray::stack(Axis(0), &labels)
            .context("labels in a batch must have the same shape")?;
        let image_paths = examples
            .into_iter()
            .map(|example| example.image_path)
            .collect();

        Ok(Self {
            images,
            labels,
            image_paths,
        })
    }

    pub fn len(&self) -> usize {
        self.image_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_paths.is_empty()
    }
}
