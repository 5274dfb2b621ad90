use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use atomic_counter::{AtomicCounter, RelaxedCounter};
use log::debug;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::dataset::MandelbrotDataset;
use crate::error::Error;
use crate::math::{escape_time, IterationResult};
use crate::rasterize::{rasterize, FitPolicy};
use crate::rect::ComplexRect;
use crate::util::{PixelCoordinate, PixelSize, Progress, ProgressSender};

// Every run gets the next number, so overlapping runs can be told apart in
// the logs when a new computation supersedes an unfinished one.
static NEXT_JOB_NUMBER: Lazy<RelaxedCounter> = Lazy::new(|| RelaxedCounter::new(0));

/// Cooperative cancellation flag shared between a compute run and whoever
/// owns it. Cloning is cheap; all clones observe the same flag.
///
/// Cancelling stops new units from being dispatched promptly and makes the
/// run discard its partial results and return [`Error::Cancelled`]. Starting
/// a replacement run before the old one is cancelled is a caller bug: "last
/// writer wins" must mean last started and not cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Everything about a computation request except the crop itself.
#[derive(Clone, Debug)]
pub struct ComputeOptions {
    pub resolution: PixelSize,
    pub iteration_limit: u32,
    pub fit_policy: FitPolicy,
    /// Worker pool size. Defaults to every available execution unit.
    pub threads: usize,
}

impl ComputeOptions {
    pub fn new(resolution: PixelSize, iteration_limit: u32) -> Self {
        ComputeOptions {
            resolution,
            iteration_limit,
            fit_policy: FitPolicy::default(),
            threads: num_cpus::get(),
        }
    }
}

// The single writer lane into the in-progress result map. Workers funnel
// every completed unit through one mutex around this state, so the map never
// sees concurrent writes and progress never moves backwards.
struct Accumulator<'feed> {
    values: HashMap<PixelCoordinate, IterationResult>,
    progress: Progress,
    update_feed: Option<&'feed ProgressSender>,
}

impl<'feed> Accumulator<'feed> {
    fn new(capacity: usize, update_feed: Option<&'feed ProgressSender>) -> Self {
        Accumulator {
            values: HashMap::with_capacity(capacity),
            progress: Progress::discrete(capacity as u64),
            update_feed,
        }
    }

    fn save(&mut self, coordinate: PixelCoordinate, iterations: IterationResult) {
        self.values.insert(coordinate, iterations);
        self.progress.set_completed(self.values.len() as u64);
        self.publish();
    }

    fn publish(&self) {
        if let Some(feed) = self.update_feed {
            // A subscriber that went away is not an error for the run.
            let _ = feed.send(self.progress);
        }
    }
}

/// Computes a full dataset for `crop`: rasterizes it at the requested
/// resolution, fans one unit of work per pixel out across a worker pool, and
/// accumulates the results.
///
/// The progress feed receives an initial `0 / N` value before any unit runs,
/// a value after every completed unit (monotonically non-decreasing, reaching
/// `N / N` exactly once on normal completion), and is closed when the run
/// ends for any reason: the sender is dropped here, so a receiver observes
/// disconnection as the completion signal.
///
/// Cancellation is polled at each dispatch boundary. A cancelled run discards
/// whatever it had accumulated and returns [`Error::Cancelled`]; no partial
/// dataset is ever published.
pub fn compute_dataset(
    crop: ComplexRect,
    options: &ComputeOptions,
    update_feed: Option<ProgressSender>,
    cancel: &CancellationToken,
) -> Result<MandelbrotDataset, Error> {
    let job = NEXT_JOB_NUMBER.inc();
    let result = run_job(job, crop, options, update_feed.as_ref(), cancel);

    match &result {
        Ok(dataset) => debug!("job #{job}: complete, {} entries", dataset.len()),
        Err(error) => debug!("job #{job}: {error}"),
    }

    // update_feed drops here, on success and on failure alike: the one
    // completion signal subscribers wait for.
    result
}

fn run_job(
    job: usize,
    crop: ComplexRect,
    options: &ComputeOptions,
    update_feed: Option<&ProgressSender>,
    cancel: &CancellationToken,
) -> Result<MandelbrotDataset, Error> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let raster = rasterize(&crop, options.resolution, options.fit_policy)?;
    let total = raster.len();
    debug!(
        "job #{job}: {} at {}x{}, limit {}, {} workers",
        crop, options.resolution.width, options.resolution.height, options.iteration_limit,
        options.threads
    );

    let accumulator = Mutex::new(Accumulator::new(total, update_feed));
    accumulator.lock().publish();

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .expect("failed to build the worker pool");

    let limit = options.iteration_limit;
    pool.install(|| {
        raster.iter().par_bridge().for_each(|coordinate| {
            if cancel.is_cancelled() {
                return;
            }
            let iterations = escape_time(coordinate.complex, limit);
            accumulator.lock().save(coordinate.screen, iterations);
        });
    });

    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    let values = accumulator.into_inner().values;
    Ok(MandelbrotDataset::from_values(crop, values))
}
