mod common;

use seg_input::{
    dataset::{
        annotation_path_for, build_manifest, generate_manifest, Manifest, TrainSampling,
    },
    Split,
};
use std::{collections::HashSet, fs, path::Path};

#[test]
fn annotation_path_example() {
    assert_eq!(
        annotation_path_for("/d/images_train/a.png").unwrap(),
        Path::new("/d/segments_train/a_anno.png")
    );
}

#[test]
fn one_row_per_png_file() {
    let dir = tempfile::tempdir().unwrap();
    common::touch_images(dir.path(), Split::Test, 9);
    fs::write(
        dir.path().join(Split::Test.image_dir_name()).join("README.md"),
        b"",
    )
    .unwrap();
    let config = common::config(dir.path(), 5, 1);

    let path = generate_manifest(&config, Split::Test, None).unwrap();
    assert_eq!(path, dir.path().join("test.csv"));

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 9);
    assert!(text.lines().all(|line| line.split(',').count() == 2));
}

#[test]
fn test_manifest_preserves_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::touch_images(dir.path(), Split::Test, 12);
    let config = common::config(dir.path(), 5, 1);

    let path = generate_manifest(&config, Split::Test, Some("ignored")).unwrap();
    let manifest = Manifest::open(path).unwrap();
    let rows: Vec<_> = manifest.rows.iter().map(|row| row.image_path.clone()).collect();
    assert_eq!(rows, images);
}

#[test]
fn train_manifest_is_permutation() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::touch_images(dir.path(), Split::Train, 30);
    let config = common::config(dir.path(), 5, 1);

    let path = generate_manifest(&config, Split::Train, Some("7")).unwrap();
    assert_eq!(path, dir.path().join("train7.csv"));

    let manifest = Manifest::open(path).unwrap();
    let mut rows: Vec<_> = manifest.rows.iter().map(|row| row.image_path.clone()).collect();
    assert_ne!(rows, images, "rows are expected to be reordered");
    rows.sort();
    assert_eq!(rows, images);

    manifest.rows.iter().for_each(|row| {
        assert_eq!(
            row.annotation_path,
            annotation_path_for(&row.image_path).unwrap()
        );
    });
}

#[test]
fn bootstrap_resamples_listing() {
    let dir = tempfile::tempdir().unwrap();
    let images: HashSet<_> = common::touch_images(dir.path(), Split::Train, 30)
        .into_iter()
        .collect();
    let mut config = common::config(dir.path(), 5, 1);
    config.train_sampling = TrainSampling::Bootstrap;

    let manifest = build_manifest(&config, Split::Train, &mut config.rng()).unwrap();
    assert_eq!(manifest.len(), 30);
    assert!(manifest
        .rows
        .iter()
        .all(|row| images.contains(&row.image_path)));
}

#[test]
fn seeded_manifests_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    common::touch_images(dir.path(), Split::Train, 16);
    let config = common::config(dir.path(), 5, 1);

    let first = build_manifest(&config, Split::Train, &mut config.rng()).unwrap();
    let second = build_manifest(&config, Split::Train, &mut config.rng()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_image_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::config(dir.path(), 5, 1);
    assert!(generate_manifest(&config, Split::Train, None).is_err());
}
