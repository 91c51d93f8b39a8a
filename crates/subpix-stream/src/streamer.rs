//! Mono- and multi-threaded streaming of a raster through a translator.
//!
//! The multi-threaded mode is a three-stage pipeline: one reader task drains
//! the input stream into a bounded queue, `max_workers` worker tasks
//! translate blocks, one writer task places results. Teardown joins the
//! workers first, then deactivates both queues (the output queue drains its
//! remaining successful blocks, the input queue releases a reader blocked on
//! a full pipeline), then joins writer and reader.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Mutex;
use std::thread;

use subpix_core::{Size, StreamBlock};
use subpix_io::{BlockInputStream, ShiftedOutputStream};
use subpix_ops::ShiftTranslator;
use tracing::{debug, error, info};

use crate::{ConcurrentQueue, StreamError, StreamResult};

/// Streams a source raster through a translator into a destination raster.
pub struct ShiftStreamer {
    max_workers: usize,
    block_size: Size,
    input_stream: BlockInputStream,
    output_stream: ShiftedOutputStream,
}

fn record_failure(slot: &Mutex<Option<StreamError>>, err: StreamError) {
    let mut slot = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_none() {
        *slot = Some(err);
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl ShiftStreamer {
    /// Opens the source, creates the pre-sized destination and prepares the
    /// block schedule.
    pub fn new(
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        block_size: Size,
        row_shift: f64,
        col_shift: f64,
        max_workers: usize,
    ) -> StreamResult<Self> {
        let input_stream =
            BlockInputStream::new(input_path.as_ref(), block_size, row_shift, col_shift)?;
        let output_stream = ShiftedOutputStream::create(
            input_path.as_ref(),
            output_path.as_ref(),
            row_shift,
            col_shift,
        )?;
        Ok(Self {
            max_workers: max_workers.max(1),
            block_size,
            input_stream,
            output_stream,
        })
    }

    /// Streams every block through `translator`.
    ///
    /// Mid-stream failures abort the run cleanly (partial output is left in
    /// place) and the first error observed is returned after teardown.
    pub fn stream(&mut self, translator: &ShiftTranslator) -> StreamResult<()> {
        info!(block_size = %self.block_size, "stream block size");
        if self.max_workers == 1 {
            self.run_monothread(translator)
        } else {
            self.run_multithread(translator)
        }
    }

    fn run_monothread(&mut self, translator: &ShiftTranslator) -> StreamResult<()> {
        info!("start monothreaded streaming");
        let mut failure = None;
        while !self.input_stream.is_at_end() {
            let block = match self.input_stream.read() {
                Ok(block) => block,
                Err(err) => {
                    error!(%err, "error while reading block");
                    failure = Some(err.into());
                    break;
                }
            };

            let image = match translator.compute(&block.image) {
                Ok(image) => image,
                Err(err) => {
                    error!(%err, "error while translating block");
                    failure = Some(err.into());
                    break;
                }
            };

            if let Err(err) = self.output_stream.write(StreamBlock { image, ..block }) {
                error!(%err, "error while writing block");
                failure = Some(err.into());
                break;
            }
        }
        info!("end monothreaded streaming");
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn run_multithread(&mut self, translator: &ShiftTranslator) -> StreamResult<()> {
        info!("start multithreaded streaming");

        let input_queue = ConcurrentQueue::<StreamBlock>::new(self.max_workers);
        let output_queue = ConcurrentQueue::<StreamBlock>::new(self.max_workers);
        let failure = Mutex::new(None::<StreamError>);

        let max_workers = self.max_workers;
        let input_stream = &mut self.input_stream;
        let output_stream = &mut self.output_stream;
        let input_queue = &input_queue;
        let output_queue = &output_queue;
        let failure = &failure;

        thread::scope(|scope| {
            let writer = scope.spawn(move || {
                info!("start writing blocks");
                while output_queue.can_pop() {
                    let Ok(block) = output_queue.pop() else {
                        break;
                    };
                    if let Err(err) = output_stream.write(block) {
                        error!(%err, "error while writing block");
                        record_failure(failure, err.into());
                        // pending blocks are discarded so workers never
                        // block on a dead sink
                        output_queue.deactivate_and_clear();
                    }
                }
                output_queue.deactivate();
                info!("end writing blocks");
            });

            let reader = scope.spawn(move || {
                info!("start reading blocks");
                while !input_stream.is_at_end() && input_queue.is_active() {
                    match input_stream.read() {
                        Ok(block) => {
                            if input_queue.push(block).is_err() {
                                debug!("cannot push block into deactivated input queue");
                                break;
                            }
                        }
                        Err(err) => {
                            error!(%err, "error while reading block");
                            record_failure(failure, err.into());
                            break;
                        }
                    }
                }
                input_queue.deactivate();
                info!("end reading blocks");
            });

            info!(workers = max_workers, "start shift processing");
            let workers: Vec<_> = (0..max_workers)
                .map(|_| {
                    scope.spawn(move || {
                        while input_queue.can_pop() {
                            let Ok(block) = input_queue.pop() else {
                                debug!("no more blocks to process");
                                break;
                            };

                            let computed = panic::catch_unwind(AssertUnwindSafe(|| {
                                translator.compute(&block.image)
                            }));
                            match computed {
                                Ok(Ok(image)) => {
                                    let shifted = StreamBlock { image, ..block };
                                    if output_queue.push(shifted).is_err() {
                                        debug!(
                                            "cannot push block into deactivated output queue"
                                        );
                                        break;
                                    }
                                }
                                Ok(Err(err)) => {
                                    error!(%err, "error while translating block");
                                    record_failure(failure, err.into());
                                    input_queue.deactivate();
                                    output_queue.deactivate();
                                    break;
                                }
                                Err(payload) => {
                                    let reason = panic_reason(payload.as_ref());
                                    error!(%reason, "panic while translating block");
                                    record_failure(failure, StreamError::WorkerPanic(reason));
                                    input_queue.deactivate();
                                    output_queue.deactivate();
                                    break;
                                }
                            }
                        }
                    })
                })
                .collect();

            for worker in workers {
                if worker.join().is_err() {
                    record_failure(
                        failure,
                        StreamError::WorkerPanic("worker task aborted".into()),
                    );
                    input_queue.deactivate();
                    output_queue.deactivate();
                }
            }
            info!("end translation processing");

            // Nothing consumes the input queue anymore; releasing it lets a
            // reader blocked on a full pipeline observe the shutdown.
            output_queue.deactivate();
            input_queue.deactivate();
            let _ = writer.join();
            let _ = reader.join();
        });
        info!("end multithreaded streaming");

        match failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
