//! Side channel for reporting failed effects

#[cfg(test)]
use mockall::automock;

use log::*;

use crate::error::LoopError;

/// Receives failures raised while resolving effects. Each failure is
/// reported exactly once, where the failing effect was resolved, before it
/// is returned to the caller of the outermost dispatch.
#[cfg_attr(test, automock)]
pub trait DiagnosticSink {
    /// Reports a failure
    fn report(&self, error: &LoopError);
}

/// Default sink writing failures to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, err: &LoopError) {
        match err {
            LoopError::Effect { chain, source } => error!(
                "loop effect failed when returned from action of type {chain}: {source}\nloop effects must not fail!"
            ),
            other => error!("{other}"),
        }
    }
}
