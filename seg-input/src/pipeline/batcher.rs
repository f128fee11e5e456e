use super::BatchSummary;
use crate::{
    common::*,
    dataset::{Batch, Example},
};

/// Groups examples from the example queue into fixed-size batches.
///
/// Without shuffling, examples leave in the order they arrive. With
/// shuffling, examples are drawn at random from a buffer that holds at least
/// `min_after_dequeue` examples for as long as the queue is open.
#[derive(Debug)]
pub struct Batcher {
    queue: ExampleQueue,
    batch_size: usize,
    shuffle: Option<ShuffleBuffer>,
    finished: bool,
}

#[derive(Debug)]
struct ExampleQueue {
    rx: flume::Receiver<Result<Example>>,
    closed: bool,
}

impl ExampleQueue {
    /// Receive the next example, or `None` once all senders are gone.
    async fn recv(&mut self) -> Result<Option<Example>> {
        if self.closed {
            return Ok(None);
        }

        match self.rx.recv_async().await {
            Ok(result) => result.map(Some),
            Err(flume::RecvError::Disconnected) => {
                self.closed = true;
                Ok(None)
            }
        }
    }
}

#[derive(Debug)]
struct ShuffleBuffer {
    examples: Vec<Example>,
    min_after_dequeue: usize,
    rng: StdRng,
}

impl Batcher {
    pub fn new(example_rx: flume::Receiver<Result<Example>>, batch_size: NonZeroUsize) -> Self {
        Self {
            queue: ExampleQueue {
                rx: example_rx,
                closed: false,
            },
            batch_size: batch_size.get(),
            shuffle: None,
            finished: false,
        }
    }

    pub fn with_shuffle(mut self, min_after_dequeue: usize, rng: StdRng) -> Self {
        self.shuffle = Some(ShuffleBuffer {
            examples: Vec::with_capacity(min_after_dequeue + self.batch_size),
            min_after_dequeue,
            rng,
        });
        self
    }

    /// Produce the next batch.
    ///
    /// It returns `Ok(None)` once the queue is drained. A trailing partial
    /// batch is dropped. After an error, no more batches are produced.
    pub async fn next_batch(&mut self) -> Result<Option<Batch>> {
        if self.finished {
            return Ok(None);
        }

        let examples = match self.next_examples().await {
            Ok(Some(examples)) => examples,
            Ok(None) => {
                self.finished = true;
                return Ok(None);
            }
            Err(err) => {
                self.finished = true;
                return Err(err);
            }
        };

        let batch = Batch::from_examples(examples)?;
        debug!("{}", BatchSummary::new(&batch));
        Ok(Some(batch))
    }

    async fn next_examples(&mut self) -> Result<Option<Vec<Example>>> {
        let Self {
            queue,
            batch_size,
            shuffle,
            ..
        } = self;
        let batch_size = *batch_size;

        let examples = match shuffle {
            None => {
                let mut examples = Vec::with_capacity(batch_size);
                while examples.len() < batch_size {
                    match queue.recv().await? {
                        Some(example) => examples.push(example),
                        None => break,
                    }
                }
                examples
            }
            Some(ShuffleBuffer {
                examples,
                min_after_dequeue,
                rng,
            }) => {
                // keep min_after_dequeue examples after taking a batch
                while examples.len() < *min_after_dequeue + batch_size {
                    match queue.recv().await? {
                        Some(example) => examples.push(example),
                        None => break,
                    }
                }
                trace!("shuffle buffer holds {} examples", examples.len());

                if examples.len() < batch_size {
                    mem::take(examples)
                } else {
                    (0..batch_size)
                        .map(|_| {
                            let index = rng.gen_range(0..examples.len());
                            examples.swap_remove(index)
                        })
                        .collect()
                }
            }
        };

        if examples.len() < batch_size {
            if !examples.is_empty() {
                debug!("drop the trailing {} examples", examples.len());
            }
            return Ok(None);
        }

        Ok(Some(examples))
    }
}
