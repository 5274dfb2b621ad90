use crossbeam::channel::Sender;

/// Push-style progress stream handle. The orchestrator owns the sender for
/// the duration of one run and drops it on every exit path, so a receiver
/// observes disconnection exactly once per run, success or cancellation.
pub type ProgressSender = Sender<Progress>;

/// How far along a unit of work is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// No total is known.
    Indeterminate,
    /// `completed` out of `total` units are done.
    Discrete { total: u64, completed: u64 },
}

impl Progress {
    /// A discrete progress with nothing completed yet.
    pub fn discrete(total: u64) -> Self {
        Progress::Discrete {
            total,
            completed: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Progress::Indeterminate => false,
            Progress::Discrete { total, completed } => completed >= total,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Progress::Indeterminate)
    }

    /// Forces the progress to a finished state. Indeterminate progress
    /// becomes a finished one-unit progress.
    pub fn finish(&mut self) {
        match *self {
            Progress::Indeterminate => {
                *self = Progress::Discrete {
                    total: 1,
                    completed: 1,
                }
            }
            Progress::Discrete { total, .. } => {
                *self = Progress::Discrete {
                    total,
                    completed: total,
                }
            }
        }
    }

    /// Fraction of units completed, NaN when indeterminate.
    pub fn fraction_completed(&self) -> f64 {
        match self {
            Progress::Indeterminate => f64::NAN,
            Progress::Discrete { total, completed } => *completed as f64 / *total as f64,
        }
    }

    pub fn completed(&self) -> u64 {
        match self {
            Progress::Indeterminate => 0,
            Progress::Discrete { completed, .. } => *completed,
        }
    }

    /// Updates the completed unit count. No-op on indeterminate progress.
    pub fn set_completed(&mut self, count: u64) {
        if let Progress::Discrete { total, .. } = *self {
            *self = Progress::Discrete {
                total,
                completed: count,
            };
        }
    }
}
