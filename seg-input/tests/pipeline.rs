mod common;

use futures::TryStreamExt as _;
use seg_input::{generate_manifest, InputPipeline, Split};
use std::{fs, sync::Arc};

#[tokio::test(flavor = "multi_thread")]
async fn five_pairs_make_one_batch() {
    let dir = tempfile::tempdir().unwrap();
    common::write_pairs(dir.path(), Split::Test, 5);
    let config = Arc::new(common::config(dir.path(), 5, 16));
    generate_manifest(&config, Split::Test, None).unwrap();

    let mut pipeline = InputPipeline::new(config, Split::Test, None).await.unwrap();
    let batch = pipeline.next_batch().await.unwrap().unwrap();

    assert_eq!(batch.images.shape(), &[5, 400, 600, 3]);
    assert_eq!(batch.labels.shape(), &[5, 400, 600, 1]);
    assert_eq!(batch.image_paths.len(), 5);
    assert!(batch.labels.iter().all(|&value| value == 0 || value == 1));
    assert!(batch.images.iter().all(|value| value.is_finite()));

    assert!(pipeline.next_batch().await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn single_worker_keeps_manifest_order() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::write_pairs(dir.path(), Split::Test, 4);
    let config = Arc::new(common::config(dir.path(), 2, 1));
    generate_manifest(&config, Split::Test, None).unwrap();

    let batches: Vec<_> = InputPipeline::new(config, Split::Test, None)
        .await
        .unwrap()
        .into_stream()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(batches.len(), 2);
    let paths: Vec<_> = batches
        .iter()
        .flat_map(|batch| batch.image_paths.clone())
        .collect();
    assert_eq!(paths, images);

    // the mask of frame i covers its left i + 1 columns
    let labels = &batches[1].labels;
    assert_eq!(labels[[1, 0, 3, 0]], 1);
    assert_eq!(labels[[1, 0, 4, 0]], 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn shuffled_epochs_cover_every_pair() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::write_pairs(dir.path(), Split::Train, 6);
    let mut config = common::config(dir.path(), 3, 4);
    config.shuffle = true;
    config.num_epochs = std::num::NonZeroUsize::new(2);
    let config = Arc::new(config);
    generate_manifest(&config, Split::Train, Some("0")).unwrap();

    let batches: Vec<_> = InputPipeline::new(config, Split::Train, Some("0"))
        .await
        .unwrap()
        .into_stream()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(batches.len(), 4);

    let mut paths: Vec<_> = batches
        .iter()
        .flat_map(|batch| batch.image_paths.clone())
        .collect();
    paths.sort();
    let mut expected = [images.clone(), images].concat();
    expected.sort();
    assert_eq!(paths, expected);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_annotation_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let images = common::write_pairs(dir.path(), Split::Test, 3);
    let config = Arc::new(common::config(dir.path(), 3, 2));
    generate_manifest(&config, Split::Test, None).unwrap();

    let annotation = seg_input::dataset::annotation_path_for(&images[1]).unwrap();
    fs::remove_file(&annotation).unwrap();

    let mut pipeline = InputPipeline::new(config, Split::Test, None).await.unwrap();
    let err = pipeline.next_batch().await.unwrap_err();
    assert!(format!("{:#}", err).contains("frame_001_anno.png"));
    assert!(pipeline.next_batch().await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn mismatched_image_size_aborts() {
    let dir = tempfile::tempdir().unwrap();
    common::write_pairs(dir.path(), Split::Test, 2);
    let mut config = common::config(dir.path(), 2, 2);
    config.image_width = 300;
    let config = Arc::new(config);
    generate_manifest(&config, Split::Test, None).unwrap();

    let mut pipeline = InputPipeline::new(config, Split::Test, None).await.unwrap();
    assert!(pipeline.next_batch().await.is_err());
}

#[tokio::test]
async fn missing_manifest_fails_early() {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(common::config(dir.path(), 5, 1));
    assert!(InputPipeline::new(config, Split::Train, Some("3"))
        .await
        .is_err());
}
