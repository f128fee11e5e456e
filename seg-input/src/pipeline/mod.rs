//! The queue-based example reader and batch assembly.

mod batcher;
mod summary;
mod worker;

pub use batcher::*;
pub use summary::*;
pub use worker::load_example;

use crate::{
    common::*,
    config::InputConfig,
    dataset::{manifest_path, Batch, ManifestReader, Split},
};
use tokio::task::JoinHandle;

/// Reads a manifest and yields batches of processed examples.
///
/// A producer streams manifest lines into a bounded job queue. A fixed pool
/// of `num_workers` workers decodes and processes jobs into a bounded
/// example queue of `queue_capacity()` slots, from which the batcher takes
/// `batch_size` examples at a time. Dropping the pipeline closes the queues
/// and stops the workers.
#[derive(Debug)]
pub struct InputPipeline {
    config: Arc<InputConfig>,
    manifest_path: PathBuf,
    batcher: Batcher,
    workers: Vec<JoinHandle<()>>,
}

impl InputPipeline {
    /// Start reading the manifest of a split from the manifest directory.
    ///
    /// The session id selects `train<sessid>.csv` for the train split.
    pub async fn new(
        config: Arc<InputConfig>,
        split: Split,
        session_id: Option<&str>,
    ) -> Result<Self> {
        let path = manifest_path(&config, split, session_id);
        Self::from_manifest(config, path).await
    }

    /// Start reading the manifest file at `path`.
    pub async fn from_manifest(config: Arc<InputConfig>, path: impl AsRef<Path>) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref().to_owned();
        let reader = ManifestReader::open(&path, config.num_epochs)?;

        let num_workers = config.num_workers.get();
        let capacity = config.queue_capacity();
        let (job_tx, job_rx) = flume::bounded(num_workers);
        let (example_tx, example_rx) = flume::bounded(capacity);

        info!(
            "reading '{}' with {} workers, queue capacity {}",
            path.display(),
            num_workers,
            capacity
        );

        // the producer exits on its own once the job queue closes
        worker::spawn_producer(reader, job_tx);
        let workers = worker::spawn_workers(config.clone(), job_rx, example_tx);

        let batcher = {
            let batcher = Batcher::new(example_rx, config.batch_size);
            if config.shuffle {
                batcher.with_shuffle(config.min_queue_examples(), config.rng())
            } else {
                batcher
            }
        };

        Ok(Self {
            config,
            manifest_path: path,
            batcher,
            workers,
        })
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Wait for the next batch.
    ///
    /// It returns `Ok(None)` when a finite number of epochs is exhausted.
    /// The first decoding or processing error ends the pipeline.
    pub async fn next_batch(&mut self) -> Result<Option<Batch>> {
        self.batcher.next_batch().await
    }

    /// Turn the pipeline into a stream of batches.
    pub fn into_stream(self) -> impl Stream<Item = Result<Batch>> + Send {
        stream::unfold(self, |mut pipeline| async move {
            let item = pipeline.next_batch().await.transpose()?;
            Some((item, pipeline))
        })
    }
}

impl Drop for InputPipeline {
    fn drop(&mut self) {
        self.workers.iter().for_each(|worker| worker.abort());
    }
}
