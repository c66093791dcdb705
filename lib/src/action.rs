//! Provides the action contract used by the effect loop and the causal call
//! chain recorded for diagnostics

use itertools::Itertools;
use std::{
    fmt::{Debug, Display},
    rc::Rc,
};

/// Rendered name of the synthetic action used to resolve initial effects
pub const BOOTSTRAP_ACTION_TYPE: &str = "@@r-loop/INIT";

/// Actions carry a type string used when reporting failed effects.
///
/// Enums typically derive [`strum::AsRefStr`] and forward to it.
pub trait Action: Debug + 'static {
    /// The type name of this action, i.e. "INCREMENT"
    fn action_type(&self) -> &str;
}

/// A single link in a [`CallChain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Reserved origin for effects attached to the initial state. Never
    /// delivered to a reducer and cannot collide with application actions.
    Bootstrap,
    /// An application action, recorded by its type
    Action(String),
}

impl Origin {
    /// Records the type of the given action
    pub fn from_action<A: Action>(action: &A) -> Self {
        Self::Action(action.action_type().to_string())
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bootstrap => write!(f, "{BOOTSTRAP_ACTION_TYPE}"),
            Self::Action(action_type) => write!(f, "{action_type}"),
        }
    }
}

/// Ordered sequence of actions that led to the current dispatch. Used only
/// for diagnostics when an effect fails.
///
/// Chains share their ancestors, so extending one is constant time no matter
/// how deep the dispatch recursion goes.
#[derive(Clone, Default)]
pub struct CallChain {
    last: Option<Rc<Link>>,
}

struct Link {
    origin: Origin,
    len: usize,
    parent: Option<Rc<Link>>,
}

impl CallChain {
    /// Returns an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chain used when resolving initial state effects
    pub fn bootstrap() -> Self {
        Self::new().push(Origin::Bootstrap)
    }

    /// Returns a new chain with the given action appended
    pub fn extend<A: Action>(&self, action: &A) -> Self {
        self.push(Origin::from_action(action))
    }

    fn push(&self, origin: Origin) -> Self {
        Self {
            last: Some(Rc::new(Link {
                origin,
                len: self.len() + 1,
                parent: self.last.clone(),
            })),
        }
    }

    /// Returns the links of this chain, oldest first
    pub fn origins(&self) -> Vec<Origin> {
        let mut origins: Vec<Origin> = self.newest_first().cloned().collect();
        origins.reverse();
        origins
    }

    /// Returns true if no action has been recorded
    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Returns the number of recorded actions
    pub fn len(&self) -> usize {
        self.last.as_ref().map_or(0, |link| link.len)
    }

    fn newest_first(&self) -> impl Iterator<Item = &Origin> {
        let mut next = self.last.as_deref();
        std::iter::from_fn(move || {
            let link = next?;
            next = link.parent.as_deref();
            Some(&link.origin)
        })
    }
}

impl PartialEq for CallChain {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.newest_first().eq(other.newest_first())
    }
}

impl Eq for CallChain {}

impl Drop for CallChain {
    // unlinks iteratively so dropping a long chain cannot overflow the stack
    fn drop(&mut self) {
        let mut next = self.last.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut link) => next = link.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl Debug for CallChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CallChain").field(&self.origins()).finish()
    }
}

impl Display for CallChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.origins().iter().join(" > "))
    }
}

#[cfg(test)]
#[path = "./action_tests.rs"]
mod tests;
