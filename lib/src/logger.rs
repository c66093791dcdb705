//! Pluggable instrumentation around the store's dispatch

use log::*;
use std::{cell::Cell, rc::Rc};

use crate::{
    action::Action,
    store::{Reducer, Store},
};

/// Wraps the underlying store before the effect loop sees it, so every
/// dispatch, including those triggered by effects, goes through the wrapper.
pub trait DispatchHook<S: 'static, A: 'static> {
    /// Returns a store forwarding to `next`
    fn wrap(&self, next: Rc<dyn Store<S, A>>) -> Rc<dyn Store<S, A>>;
}

/// Hook logging every dispatched action at the configured level
#[derive(Debug, Clone, Copy)]
pub struct ActionLogger {
    level: Level,
}

impl ActionLogger {
    /// Returns a logger writing at `level`
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// The level dispatches are logged at
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for ActionLogger {
    fn default() -> Self {
        Self::new(Level::Debug)
    }
}

impl<S: 'static, A: Action> DispatchHook<S, A> for ActionLogger {
    fn wrap(&self, next: Rc<dyn Store<S, A>>) -> Rc<dyn Store<S, A>> {
        Rc::new(LoggedStore {
            next,
            level: self.level,
            dispatched: Cell::new(0),
        })
    }
}

struct LoggedStore<S: 'static, A: 'static> {
    next: Rc<dyn Store<S, A>>,
    level: Level,
    dispatched: Cell<u64>,
}

impl<S: 'static, A: Action> Store<S, A> for LoggedStore<S, A> {
    fn dispatch(&self, action: A) {
        let count = self.dispatched.get() + 1;
        self.dispatched.set(count);

        log!(
            self.level,
            "dispatch #{count}: {}({:?})",
            action.action_type(),
            action
        );

        self.next.dispatch(action);

        log!(self.level, "dispatch #{count}: reduced");
    }

    fn get_state(&self) -> Rc<S> {
        self.next.get_state()
    }

    fn replace_reducer(&self, reducer: Box<dyn Reducer<S, A>>) {
        log!(self.level, "replacing reducer");
        self.next.replace_reducer(reducer)
    }
}

#[cfg(test)]
#[path = "./logger_tests.rs"]
mod tests;
