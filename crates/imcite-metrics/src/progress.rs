//! Observational progress reporting for batch engines
//!
//! Engines that walk large inputs accept an optional callback and invoke it
//! at coarse checkpoints (per accumulation batch, per year partition, every
//! few thousand focus publications). Reporting never affects control flow or
//! results; passing `None` is always equivalent.

/// A coarse progress checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Work units finished so far.
    pub completed: usize,
    /// Total work units, when known up front.
    pub total: Option<usize>,
}

/// The callback type batch engines accept.
pub type ProgressSink<'a> = &'a dyn Fn(Progress);

pub(crate) fn report(sink: Option<ProgressSink<'_>>, completed: usize, total: Option<usize>) {
    if let Some(sink) = sink {
        sink(Progress { completed, total });
    }
}
