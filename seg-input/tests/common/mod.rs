#![allow(dead_code)]

use image::{GrayImage, Luma, Rgb, RgbImage};
use seg_input::{InputConfig, Split};
use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

pub const HEIGHT: u32 = 400;
pub const WIDTH: u32 = 600;

/// Write `count` image/annotation pairs under `data_dir` for a split.
///
/// Image `i` has a horizontal gradient offset by `i`. Its mask is 255 on the
/// left `i + 1` columns and 0 elsewhere.
pub fn write_pairs(data_dir: &Path, split: Split, count: usize) -> Vec<PathBuf> {
    let image_dir = data_dir.join(split.image_dir_name());
    let annotation_dir = data_dir.join(split.annotation_dir_name());
    fs::create_dir_all(&image_dir).unwrap();
    fs::create_dir_all(&annotation_dir).unwrap();

    (0..count)
        .map(|index| {
            let image = RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, index as u8])
            });
            let mask = GrayImage::from_fn(WIDTH, HEIGHT, |x, _| {
                Luma([if (x as usize) <= index { 255 } else { 0 }])
            });

            let image_path = image_dir.join(format!("frame_{:03}.png", index));
            let mask_path = annotation_dir.join(format!("frame_{:03}_anno.png", index));
            image.save(&image_path).unwrap();
            mask.save(&mask_path).unwrap();
            image_path
        })
        .collect()
}

/// Create `count` empty PNG files in the image directory of a split.
pub fn touch_images(data_dir: &Path, split: Split, count: usize) -> Vec<PathBuf> {
    let image_dir = data_dir.join(split.image_dir_name());
    fs::create_dir_all(&image_dir).unwrap();
    (0..count)
        .map(|index| {
            let path = image_dir.join(format!("{:04}.png", index));
            fs::write(&path, b"").unwrap();
            path
        })
        .collect()
}

pub fn config(dir: &Path, batch_size: usize, num_workers: usize) -> InputConfig {
    InputConfig {
        data_dir: dir.to_owned(),
        manifest_dir: dir.to_owned(),
        batch_size: NonZeroUsize::new(batch_size).unwrap(),
        num_workers: NonZeroUsize::new(num_workers).unwrap(),
        num_epochs: NonZeroUsize::new(1),
        seed: Some(42),
        ..Default::default()
    }
}
