//! Custom Error and Result types for this library

use thiserror::Error;

use crate::{action::CallChain, install::InstallOptionsBuilderError};

/// Boxed error produced by a failing effect factory
pub type BoxError = Box<dyn std::error::Error + 'static>;

/// Custom Error type for this library
#[derive(Error, Debug)]
pub enum LoopError {
    /// An effect computation failed while resolving. The chain lists the
    /// action types that led to the failing resolution.
    #[error("effect failed when returned from action of type {chain}: {source}")]
    Effect {
        /// Causal chain of action types leading to the failed resolution
        chain: CallChain,
        /// The error produced by the effect computation
        #[source]
        source: BoxError,
    },

    /// Error resulting from failure to build install options
    #[error("failed to build install options: {_0}")]
    InstallOptions(#[from] InstallOptionsBuilderError),
}

impl LoopError {
    /// Returns the call chain for effect failures
    pub fn chain(&self) -> Option<&CallChain> {
        match self {
            Self::Effect { chain, .. } => Some(chain),
            Self::InstallOptions(_) => None,
        }
    }
}

/// Custom Result type for this library. All Errors exposed by this library
/// will be returned as [`LoopError`]
pub type Result<T> = std::result::Result<T, LoopError>;
