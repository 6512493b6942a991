//! profiles::observer — structured logging of kernel dispatches (`obs_slog`).
//!
//! Purpose
//! -------
//! Provide [`ObservedKernel`], a [`PhysicsKernel`] decorator that records one
//! structured log line per kernel call: the entry-point name, the input
//! length, and the elapsed wall time. Failures are logged at `warn` with the
//! kernel's reason and then returned unchanged.
//!
//! Conventions
//! -----------
//! - The model layer itself never logs. Observation is opt-in by wrapping
//!   the kernel: `HaloProfiles::new(ObservedKernel::term_noblock(kernel))`.
//! - [`ObservedKernel::term_noblock`] writes to the terminal through an
//!   asynchronous drain, so logging does not block the evaluating thread.
use crate::profiles::{
    errors::ProfileResult,
    kernel::{KernelCall, PhysicsKernel},
};
use slog::{debug, o, warn, Drain, Logger};
use std::time::Instant;

/// Kernel decorator that logs every dispatch through `slog`.
#[derive(Debug, Clone)]
pub struct ObservedKernel<K> {
    inner: K,
    logger: Logger,
}

impl<K: PhysicsKernel> ObservedKernel<K> {
    pub fn new(inner: K, logger: Logger) -> Self {
        ObservedKernel { inner, logger }
    }

    /// Wrap `inner` with a non-blocking terminal logger.
    pub fn term_noblock(inner: K) -> Self {
        let decorator = slog_term::TermDecorator::new().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        let logger = Logger::root(drain, o!("component" => "physics_kernel"));
        ObservedKernel { inner, logger }
    }

    pub fn inner(&self) -> &K {
        &self.inner
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}

impl<K: PhysicsKernel> PhysicsKernel for ObservedKernel<K> {
    fn evaluate(
        &self, call: &KernelCall<'_>, input: &[f64], out: &mut [f64],
    ) -> ProfileResult<()> {
        let start = Instant::now();
        let result = self.inner.evaluate(call, input, out);
        let elapsed_us = start.elapsed().as_micros() as u64;
        match &result {
            Ok(()) => debug!(
                self.logger, "kernel call";
                "entry" => call.name(), "len" => input.len(), "elapsed_us" => elapsed_us
            ),
            Err(err) => warn!(
                self.logger, "kernel call failed";
                "entry" => call.name(), "len" => input.len(), "error" => %err
            ),
        }
        result
    }
}
