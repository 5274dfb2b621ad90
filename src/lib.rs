//! Concurrent tiled Mandelbrot set computation.
//!
//! The pipeline: a [`ComplexRect`] crop is rasterized onto a pixel grid, the
//! escape-time engine iterates every coordinate across a worker pool, and the
//! results accumulate into a [`MandelbrotDataset`] while progress streams to
//! an optional subscriber. Colouring and image output are presentation glue
//! on top of the dataset.

pub mod colouring;
pub mod complex;
pub mod dataset;
pub mod error;
pub mod math;
pub mod rasterize;
pub mod rect;
pub mod renderer;
pub mod util;

pub use colouring::ColourMethod;
pub use complex::ComplexNumber;
pub use dataset::MandelbrotDataset;
pub use error::Error;
pub use math::{escape_time, IterationResult};
pub use rasterize::{rasterize, FitPolicy, MandelbrotCoordinate, Rasterization};
pub use rect::{ComplexRect, ComplexSize};
pub use renderer::{compute_dataset, CancellationToken, ComputeOptions};
pub use util::{PixelCoordinate, PixelSize, Progress, ProgressSender};
