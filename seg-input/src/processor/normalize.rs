//! Casting, standardization and label scaling.

use crate::{
    common::*,
    config::InputConfig,
    dataset::{Example, ExampleRecord},
};

/// Cast the raw image samples to `f32`.
pub fn read_input(record: &ExampleRecord) -> Array3<f32> {
    record.image.mapv(f32::from)
}

/// Per-image standardization.
///
/// It computes `(x - mean) / max(stddev, 1 / sqrt(N))` over all `N`
/// elements, where `stddev` is the population standard deviation. The lower
/// bound keeps uniform images finite.
pub fn standardize(image: &Array3<f32>) -> Array3<f32> {
    if image.is_empty() {
        return image.clone();
    }

    let num_elements = image.len() as f64;
    let mean = image.iter().map(|&value| value as f64).sum::<f64>() / num_elements;
    let variance = image
        .iter()
        .map(|&value| {
            let diff = value as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / num_elements;
    let stddev = variance.sqrt().max(num_elements.sqrt().recip());

    image.mapv(|value| ((value as f64 - mean) / stddev) as f32)
}

/// Divide label samples by `scale`, truncating towards zero.
pub fn scale_label(label: &Array3<u16>, scale: i32) -> Array3<i32> {
    label.mapv(|value| i32::from(value) / scale)
}

/// Turn a decoded record into an example with the configured shapes.
pub fn process_example(config: &InputConfig, record: ExampleRecord) -> Result<Example> {
    let InputConfig {
        image_height,
        image_width,
        image_channels,
        label_channels,
        label_scale,
        ..
    } = *config;

    let image = standardize(&read_input(&record));
    ensure!(
        image.shape() == [image_height, image_width, image_channels],
        "expect image shape {:?}, but get {:?} in '{}'",
        [image_height, image_width, image_channels],
        image.shape(),
        record.image_path.display()
    );
    ensure!(
        record.label.shape() == [image_height, image_width, label_channels],
        "expect label shape {:?}, but get {:?} in '{}'",
        [image_height, image_width, label_channels],
        record.label.shape(),
        record.annotation_path.display()
    );
    let label = scale_label(&record.label, label_scale);

    Ok(Example {
        image,
        label,
        image_path: record.image_path,
    })
}
