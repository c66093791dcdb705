//! Redux-like state container contracts and a minimal synchronous store
//!
//! The effect loop only relies on the [`Store`] trait. [`BasicStore`] is a
//! small implementation of that contract with subscriber notification.

#[cfg(test)]
use mockall::automock;

use log::*;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::looped::Reduced;

/// Computes the next state of a store from the current state and an action
pub trait Reducer<S, A> {
    /// Returns the state that results from applying `action` to `state`
    fn reduce(&self, state: &S, action: A) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&S, A) -> S,
{
    fn reduce(&self, state: &S, action: A) -> S {
        self(state, action)
    }
}

/// Application reducer that may attach an effect to the model it returns
pub trait LoopReducer<M, A> {
    /// Returns the next model, optionally paired with an effect
    fn reduce(&self, model: &M, action: A) -> Reduced<M, A>;
}

impl<M, A, F> LoopReducer<M, A> for F
where
    F: Fn(&M, A) -> Reduced<M, A>,
{
    fn reduce(&self, model: &M, action: A) -> Reduced<M, A> {
        self(model, action)
    }
}

/// Minimal contract of a synchronous state container
#[cfg_attr(test, automock)]
pub trait Store<S: 'static, A: 'static> {
    /// Reduces the action and notifies subscribers before returning
    fn dispatch(&self, action: A);
    /// Returns a snapshot of the current state
    fn get_state(&self) -> Rc<S>;
    /// Swaps the reducer used for subsequent dispatches
    fn replace_reducer(&self, reducer: Box<dyn Reducer<S, A>>);
}

impl<S: 'static, A: 'static, T: Store<S, A> + ?Sized> Store<S, A> for Rc<T> {
    fn dispatch(&self, action: A) {
        self.as_ref().dispatch(action)
    }

    fn get_state(&self) -> Rc<S> {
        self.as_ref().get_state()
    }

    fn replace_reducer(&self, reducer: Box<dyn Reducer<S, A>>) {
        self.as_ref().replace_reducer(reducer)
    }
}

/// Callback invoked with the new state after every dispatch
pub type Listener<S> = Rc<dyn Fn(&S)>;

/// Handle returned by [`BasicStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

/// Centralized state container
pub struct BasicStore<S, A> {
    state: RefCell<Rc<S>>,
    reducer: RefCell<Box<dyn Reducer<S, A>>>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<S>)>>,
    next_id: Cell<usize>,
}

impl<S: 'static, A: 'static> BasicStore<S, A> {
    /// Creates a new store with the given initial state and reducer
    pub fn new(initial_state: S, reducer: Box<dyn Reducer<S, A>>) -> Self {
        Self {
            state: RefCell::new(Rc::new(initial_state)),
            reducer: RefCell::new(reducer),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Registers a listener called synchronously after every dispatch
    pub fn subscribe<F: Fn(&S) + 'static>(&self, listener: F) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    fn notify(&self) {
        // listeners may subscribe or dispatch while being notified
        let listeners: Vec<Listener<S>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        let state = self.get_state();

        for listener in listeners {
            listener(&state);
        }
    }
}

impl<S: 'static, A: 'static> Store<S, A> for BasicStore<S, A> {
    fn dispatch(&self, action: A) {
        let current = self.get_state();
        let next = self.reducer.borrow().reduce(&current, action);
        *self.state.borrow_mut() = Rc::new(next);
        self.notify();
    }

    fn get_state(&self) -> Rc<S> {
        self.state.borrow().clone()
    }

    fn replace_reducer(&self, reducer: Box<dyn Reducer<S, A>>) {
        debug!("replacing store reducer");
        *self.reducer.borrow_mut() = reducer;
    }
}

#[cfg(test)]
#[path = "./store_tests.rs"]
mod tests;
