pub mod iteration;

pub use iteration::{escape_time, IterationResult};
