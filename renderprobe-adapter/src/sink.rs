use alloc::sync::Arc;

use renderprobe::{Alert, ClassificationRecord};

/// One instrumentation event pushed out of a [`Monitor`][crate::Monitor].
///
/// Events borrow the monitor's own records; a sink that wants to keep one
/// clones it.
#[derive(Clone, Copy, Debug)]
pub enum ProbeEvent<'a> {
    /// An alert was appended to the monitor's log (after rotation).
    Alert(&'a Alert),
    /// A render was classified.
    Classification(&'a ClassificationRecord),
    /// A profiled operation finished.
    Operation {
        operation_id: &'a str,
        duration_ms: u64,
    },
}

/// Receives every [`ProbeEvent`] a monitor produces, in order.
///
/// The sink is called synchronously from monitor methods; it should hand the
/// event off cheaply (push to a channel, append to a buffer) rather than do
/// work inline.
pub type InstrumentationSink = Arc<dyn Fn(&ProbeEvent<'_>) + Send + Sync>;
