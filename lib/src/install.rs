//! Installs the effect loop on top of a store
//!
//! Reducers handed to [`Installer::create_store`] return a model, optionally
//! paired with an [`Effect`]. Every dispatch reduces synchronously through
//! the underlying store, then resolves the effect attached to the new state
//! and dispatches the actions it yields, recursively, until nothing is left.
//!
//! ```
//! use r_looplib::{
//!     action::Action,
//!     effect::Effect,
//!     install::{InstallOptions, install},
//!     looped::{Reduced, looped},
//!     store::BasicStore,
//! };
//!
//! #[derive(Debug, Clone)]
//! enum Msg {
//!     Fetch,
//!     Done(i32),
//! }
//!
//! impl Action for Msg {
//!     fn action_type(&self) -> &str {
//!         match self {
//!             Msg::Fetch => "FETCH",
//!             Msg::Done(_) => "DONE",
//!         }
//!     }
//! }
//!
//! async fn fetch(value: i32) -> Result<Msg, std::io::Error> {
//!     Ok(Msg::Done(value))
//! }
//!
//! let reducer = |model: &i32, action: Msg| match action {
//!     Msg::Fetch => looped(*model, Effect::call(fetch, 42)),
//!     Msg::Done(value) => Reduced::Model(value),
//! };
//!
//! let (store, init) = install(InstallOptions::default()).create_store(
//!     BasicStore::new,
//!     reducer,
//!     Reduced::Model(0),
//! );
//!
//! futures::executor::block_on(async {
//!     init.await.unwrap();
//!     store.dispatch(Msg::Fetch).await.unwrap();
//! });
//!
//! assert_eq!(*store.get_state(), 42);
//! ```

use derive_builder::Builder;
use futures::{
    FutureExt,
    future::{self, LocalBoxFuture},
    stream::{FuturesUnordered, StreamExt},
};
use log::*;
use std::{fmt::Debug, future::Future, ops::Deref, rc::Rc};

use crate::{
    action::{Action, CallChain},
    diagnostics::{DiagnosticSink, LogSink},
    effect::{Effect, Resolution},
    error::{LoopError, Result},
    logger::DispatchHook,
    looped::{Looped, Reduced, lift_state},
    settlement::{Detached, Settlement},
    store::{LoopReducer, Reducer, Store},
};

fn default_diagnostics() -> Rc<dyn DiagnosticSink> {
    Rc::new(LogSink)
}

/// Options recognized by [`install`]
#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct InstallOptions<M: 'static, A: 'static> {
    /// Wraps the underlying store so instrumentation observes every
    /// dispatch, including those triggered by effects. Absent by default.
    #[builder(default, setter(strip_option))]
    logger: Option<Rc<dyn DispatchHook<Looped<M, A>, A>>>,
    /// Receives failed effects. Defaults to [`LogSink`].
    #[builder(default = "default_diagnostics()")]
    diagnostics: Rc<dyn DiagnosticSink>,
}

impl<M: 'static, A: 'static> InstallOptions<M, A> {
    /// Returns a builder for install options
    pub fn builder() -> InstallOptionsBuilder<M, A> {
        InstallOptionsBuilder::default()
    }
}

impl<M: 'static, A: 'static> Default for InstallOptions<M, A> {
    fn default() -> Self {
        Self {
            logger: None,
            diagnostics: default_diagnostics(),
        }
    }
}

/// Returns an installer configured with the given options
pub fn install<M: 'static, A: Action + Clone>(
    options: InstallOptions<M, A>,
) -> Installer<M, A> {
    Installer { options }
}

/// Wraps store construction so the created store runs effects
pub struct Installer<M: 'static, A: 'static> {
    options: InstallOptions<M, A>,
}

impl<M: 'static, A: Action + Clone> Installer<M, A> {
    /// Creates the underlying store with `next`, handing it a lifted reducer
    /// and lifted initial state, and returns the effect-running store.
    ///
    /// Effects attached to the initial state start resolving before this
    /// returns. The returned [`Settlement`] completes once they and every
    /// action they yield have settled. Dropping it leaves that work to the
    /// store's later settlements and [`LoopStore::idle`].
    pub fn create_store<F, S, R>(
        self,
        next: F,
        reducer: R,
        initial_state: Reduced<M, A>,
    ) -> (LoopStore<M, A>, Settlement)
    where
        F: FnOnce(Looped<M, A>, Box<dyn Reducer<Looped<M, A>, A>>) -> S,
        S: Store<Looped<M, A>, A> + 'static,
        R: LoopReducer<M, A> + 'static,
    {
        let lifted_initial_state = lift_state(initial_state);
        let initial_effect = lifted_initial_state.effect.clone();

        let store: Rc<dyn Store<Looped<M, A>, A>> =
            Rc::new(next(lifted_initial_state, lift_reducer(reducer)));

        let store = match self.options.logger.as_ref() {
            Some(hook) => hook.wrap(store),
            None => store,
        };

        let core = Rc::new(Core {
            store,
            diagnostics: self.options.diagnostics,
        });

        let store = LoopStore {
            core,
            detached: Rc::default(),
        };

        debug!("resolving initial state effect");

        let init =
            store.settle(resolving(initial_effect, CallChain::bootstrap()));

        (store, init)
    }
}

/// Lifts an application reducer so it always returns [`Looped`] state
pub fn lift_reducer<M, A, R>(reducer: R) -> Box<dyn Reducer<Looped<M, A>, A>>
where
    M: 'static,
    A: 'static,
    R: LoopReducer<M, A> + 'static,
{
    Box::new(LiftedReducer {
        reducer: Box::new(reducer),
    })
}

struct LiftedReducer<M, A> {
    reducer: Box<dyn LoopReducer<M, A>>,
}

impl<M, A: 'static> Reducer<Looped<M, A>, A> for LiftedReducer<M, A> {
    fn reduce(&self, state: &Looped<M, A>, action: A) -> Looped<M, A> {
        lift_state(self.reducer.reduce(&state.model, action))
    }
}

struct Core<M: 'static, A: 'static> {
    store: Rc<dyn Store<Looped<M, A>, A>>,
    diagnostics: Rc<dyn DiagnosticSink>,
}

impl<M: 'static, A: Action + Clone> Core<M, A> {
    /// Reduces `action` synchronously and starts resolving the effect left
    /// on the new state
    fn step(&self, action: A, chain: &CallChain) -> Step<A> {
        let chain = chain.extend(&action);
        self.store.dispatch(action);
        let effect = self.store.get_state().effect.clone();
        resolving(effect, chain)
    }
}

/// Resolution of one effect, tagged with the chain that produced it
type Step<A> = LocalBoxFuture<'static, (CallChain, Resolution<A>)>;

fn resolving<A: 'static>(effect: Effect<A>, chain: CallChain) -> Step<A> {
    effect
        .resolve()
        .map(move |resolved| (chain, resolved))
        .boxed_local()
}

/// Drives a dispatch tree to completion. Every resolution lands in one flat
/// set, so the depth of the recursion never shows up on the stack.
async fn drive<M: 'static, A: Action + Clone>(
    core: Rc<Core<M, A>>,
    first: Step<A>,
) -> Result<()> {
    let mut pending: FuturesUnordered<Step<A>> = FuturesUnordered::new();
    pending.push(first);

    let mut failure = None;

    while let Some((chain, resolved)) = pending.next().await {
        match resolved {
            Ok(actions) if actions.is_empty() => trace!("settled: {chain}"),
            Ok(actions) => {
                trace!("{chain} yielded {} action(s)", actions.len());

                for action in actions {
                    pending.push(core.step(action, &chain));
                }
            }
            Err(source) => {
                let err = LoopError::Effect { chain, source };
                core.diagnostics.report(&err);

                if failure.is_none() {
                    failure = Some(err);
                }
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Store returned by [`Installer::create_store`]. Consumers only ever see the
/// model; pending effects stay internal to the loop.
pub struct LoopStore<M: 'static, A: 'static> {
    core: Rc<Core<M, A>>,
    detached: Rc<Detached>,
}

impl<M: 'static, A: Action + Clone> LoopStore<M, A> {
    /// Reduces `action` synchronously, then resolves the resulting effect
    /// and recursively dispatches what it yields.
    pub fn dispatch(&self, action: A) -> Settlement {
        let first = self.core.step(action, &CallChain::new());
        self.settle(first)
    }

    fn settle(&self, first: Step<A>) -> Settlement {
        Settlement::new(
            drive(Rc::clone(&self.core), first).boxed_local(),
            Rc::clone(&self.detached),
        )
    }

    /// Completes once all work from dropped settlements has settled
    pub fn idle(&self) -> impl Future<Output = ()> + use<M, A> {
        let detached = Rc::clone(&self.detached);
        future::poll_fn(move |cx| detached.poll_drain(cx))
    }

    /// Returns the current model
    pub fn get_state(&self) -> Snapshot<M, A> {
        Snapshot(self.core.store.get_state())
    }

    /// Lifts and installs a new reducer
    pub fn replace_reducer<R: LoopReducer<M, A> + 'static>(&self, reducer: R) {
        self.core.store.replace_reducer(lift_reducer(reducer))
    }
}

impl<M: 'static, A: 'static> Clone for LoopStore<M, A> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            detached: Rc::clone(&self.detached),
        }
    }
}

/// Read-only view of the model half of the current state
pub struct Snapshot<M: 'static, A: 'static>(Rc<Looped<M, A>>);

impl<M: 'static, A: 'static> Snapshot<M, A> {
    /// Returns the model
    pub fn model(&self) -> &M {
        &self.0.model
    }
}

impl<M: 'static, A: 'static> Deref for Snapshot<M, A> {
    type Target = M;

    fn deref(&self) -> &Self::Target {
        &self.0.model
    }
}

impl<M: Debug + 'static, A: 'static> Debug for Snapshot<M, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Snapshot").field(&self.0.model).finish()
    }
}

#[cfg(test)]
#[path = "./install_tests.rs"]
mod tests;
