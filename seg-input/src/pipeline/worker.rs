use crate::{
    common::*,
    config::InputConfig,
    dataset::{Example, ExampleRecord, ManifestLine, ManifestReader},
    processor::process_example,
    profiling::Timing,
};
use tokio::task::JoinHandle;

/// Decode and process the files referenced by a manifest line.
pub fn load_example(config: &InputConfig, line: ManifestLine) -> Result<Example> {
    let mut timing = Timing::new("decode worker");

    let record = ExampleRecord::load(line)?;
    timing.set_record("decode");

    let example = process_example(config, record)?;
    timing.set_record("normalize");

    timing.report();
    Ok(example)
}

/// Feed manifest lines into the job queue.
///
/// It stops after forwarding the first reader error, or once every worker
/// has dropped its end of the queue.
pub(crate) fn spawn_producer(
    mut reader: ManifestReader,
    job_tx: flume::Sender<Result<ManifestLine>>,
) {
    tokio::task::spawn_blocking(move || {
        for item in &mut reader {
            let is_err = item.is_err();
            if job_tx.send(item).is_err() || is_err {
                break;
            }
        }
        debug!("manifest producer for '{}' exits", reader.path().display());
    });
}

/// Start a fixed pool of workers that move jobs to the example queue.
pub(crate) fn spawn_workers(
    config: Arc<InputConfig>,
    job_rx: flume::Receiver<Result<ManifestLine>>,
    example_tx: flume::Sender<Result<Example>>,
) -> Vec<JoinHandle<()>> {
    (0..config.num_workers.get())
        .map(|worker_id| {
            let config = config.clone();
            let job_rx = job_rx.clone();
            let example_tx = example_tx.clone();

            let future = async move {
                while let Ok(job) = job_rx.recv_async().await {
                    let result = match job {
                        Ok(line) => {
                            let config = config.clone();
                            tokio::task::spawn_blocking(move || load_example(&config, line))
                                .await
                                .map_err(Error::from)
                                .and_then(|result| result)
                        }
                        Err(err) => Err(err),
                    };

                    let is_err = result.is_err();
                    if example_tx.send_async(result).await.is_err() || is_err {
                        break;
                    }
                }
                trace!("worker exits");
            };

            tokio::spawn(future.instrument(info_span!("decode_worker", worker_id)))
        })
        .collect()
}
