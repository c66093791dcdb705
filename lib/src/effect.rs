//! Provides the effect algebra: inert descriptions of side effects that can
//! be composed, mapped, and inspected before being resolved into follow-up
//! actions
//!
//! ```
//! use r_looplib::effect::{Effect, EffectKind};
//!
//! #[derive(Debug, PartialEq)]
//! enum Parent {
//!     Child(u8),
//! }
//!
//! let effect: Effect<Parent> = Effect::batch([
//!     Effect::constant(1),
//!     Effect::none(),
//!     Effect::constant(2),
//! ])
//! .map(|n| n * 10)
//! .map(Parent::Child);
//!
//! assert_eq!(effect.kind(), EffectKind::Batch);
//!
//! let actions = futures::executor::block_on(effect.resolve()).unwrap();
//! assert_eq!(actions, vec![Parent::Child(10), Parent::Child(20)]);
//! ```

use futures::{
    FutureExt,
    future::{self, LocalBoxFuture, join_all},
};
use std::{fmt::Debug, future::Future, rc::Rc};

use crate::error::BoxError;

/// Post-processes every action an effect yields, possibly into another
/// action type
pub type Mapper<A, B> = Rc<dyn Fn(A) -> B>;

/// Outcome of resolving an effect: the follow-up actions in declared order
pub type Resolution<A> = std::result::Result<Vec<A>, BoxError>;

/// Produces the asynchronous computation behind a [`Effect::Call`]. Every
/// invocation starts a fresh computation.
pub type Factory<A> = Rc<dyn Fn() -> LocalBoxFuture<'static, Resolution<A>>>;

/// Tag of an [`Effect`] used for shape checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// See [`Effect::None`]
    None,
    /// See [`Effect::Constant`]
    Constant,
    /// See [`Effect::Call`]
    Call,
    /// See [`Effect::Batch`]
    Batch,
}

/// Description of a side effect. Building, mapping, or batching an effect
/// never runs anything; work only starts in [`Effect::resolve`].
pub enum Effect<A> {
    /// No side effect
    None,
    /// An action that is already known
    Constant {
        /// The action to yield
        action: A,
    },
    /// An asynchronous computation yielding follow-up actions
    Call {
        /// Name of the factory the effect was created from
        label: &'static str,
        /// Starts the computation with the captured arguments. Mappers are
        /// folded into the factory.
        factory: Factory<A>,
    },
    /// Children resolved concurrently, flattened in declared order
    Batch(Vec<Effect<A>>),
}

impl<A: 'static> Effect<A> {
    /// Creates a noop effect
    pub fn none() -> Self {
        Self::None
    }

    /// Creates an effect for an already-available action
    pub fn constant(action: A) -> Self {
        Self::Constant { action }
    }

    /// Creates an effect invoking `factory(args)` when resolved. The output of
    /// the returned future becomes a single follow-up action.
    pub fn call<F, Args, Fut, E>(factory: F, args: Args) -> Self
    where
        F: Fn(Args) -> Fut + 'static,
        Args: Clone + 'static,
        Fut: Future<Output = std::result::Result<A, E>> + 'static,
        E: Into<BoxError>,
    {
        let thunk: Factory<A> = Rc::new(move || {
            let pending = factory(args.clone());
            async move {
                let resolved: Resolution<A> =
                    pending.await.map(|action| vec![action]).map_err(Into::into);
                resolved
            }
            .boxed_local()
        });

        Self::Call {
            label: std::any::type_name::<F>(),
            factory: thunk,
        }
    }

    /// Same as [`Effect::call`] for factories yielding any number of
    /// follow-up actions, including none.
    pub fn call_many<F, Args, Fut, E>(factory: F, args: Args) -> Self
    where
        F: Fn(Args) -> Fut + 'static,
        Args: Clone + 'static,
        Fut: Future<Output = std::result::Result<Vec<A>, E>> + 'static,
        E: Into<BoxError>,
    {
        let thunk: Factory<A> = Rc::new(move || {
            let pending = factory(args.clone());
            async move {
                let resolved: Resolution<A> = pending.await.map_err(Into::into);
                resolved
            }
            .boxed_local()
        });

        Self::Call {
            label: std::any::type_name::<F>(),
            factory: thunk,
        }
    }

    /// Composes effects together
    pub fn batch(effects: impl IntoIterator<Item = Effect<A>>) -> Self {
        Self::Batch(effects.into_iter().collect())
    }

    /// Returns a new effect whose resolved actions are additionally passed
    /// through `f`, typically to wrap a child's actions in a parent action.
    /// Mappers applied earlier run first. Batches distribute `f` to every
    /// child.
    ///
    /// Constant actions are mapped right away. Call results are mapped once
    /// the computation completes, every time the effect is resolved.
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        B: 'static,
        F: Fn(A) -> B + 'static,
    {
        self.map_with(Rc::new(f))
    }

    fn map_with<B: 'static>(self, f: Mapper<A, B>) -> Effect<B> {
        match self {
            Self::None => Effect::None,
            Self::Constant { action } => Effect::Constant { action: f(action) },
            Self::Call { label, factory } => Effect::Call {
                label,
                factory: Rc::new(move || {
                    let pending = factory();
                    let f = Rc::clone(&f);
                    async move {
                        let actions = pending.await?;
                        Ok::<_, BoxError>(
                            actions
                                .into_iter()
                                .map(|action| f(action))
                                .collect::<Vec<_>>(),
                        )
                    }
                    .boxed_local()
                }),
            },
            Self::Batch(children) => Effect::Batch(
                children
                    .into_iter()
                    .map(|child| child.map_with(Rc::clone(&f)))
                    .collect(),
            ),
        }
    }

    /// Turns this description into a computation producing the follow-up
    /// actions. Call factories are invoked immediately; batch children are
    /// awaited together and a failing child does not stop its siblings.
    pub fn resolve(self) -> LocalBoxFuture<'static, Resolution<A>> {
        match self {
            Self::None => future::ready(Ok(Vec::new())).boxed_local(),
            Self::Constant { action } => future::ready(Ok(vec![action])).boxed_local(),
            Self::Call { factory, .. } => factory(),
            Self::Batch(children) => {
                let pending: Vec<_> =
                    children.into_iter().map(Effect::resolve).collect();
                async move {
                    let mut actions = Vec::new();
                    for resolved in join_all(pending).await {
                        actions.extend(resolved?);
                    }
                    Ok::<_, BoxError>(actions)
                }
                .boxed_local()
            }
        }
    }
}

impl<A> Effect<A> {
    /// Returns the tag of this effect
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::None => EffectKind::None,
            Self::Constant { .. } => EffectKind::Constant,
            Self::Call { .. } => EffectKind::Call,
            Self::Batch(_) => EffectKind::Batch,
        }
    }

    /// Returns true for [`Effect::None`]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the literal action of a constant effect
    pub fn as_constant(&self) -> Option<&A> {
        match self {
            Self::Constant { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Returns the children of a batch, empty for every other variant
    pub fn children(&self) -> &[Effect<A>] {
        match self {
            Self::Batch(children) => children,
            _ => &[],
        }
    }
}

impl<A> Default for Effect<A> {
    fn default() -> Self {
        Self::None
    }
}

impl<A: Clone> Clone for Effect<A> {
    fn clone(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Constant { action } => Self::Constant {
                action: action.clone(),
            },
            Self::Call { label, factory } => Self::Call {
                label: *label,
                factory: Rc::clone(factory),
            },
            Self::Batch(children) => Self::Batch(children.clone()),
        }
    }
}

impl<A: Debug> Debug for Effect<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Constant { action } => {
                f.debug_struct("Constant").field("action", action).finish()
            }
            Self::Call { label, .. } => {
                f.debug_struct("Call").field("factory", label).finish()
            }
            Self::Batch(children) => f.debug_tuple("Batch").field(children).finish(),
        }
    }
}

#[cfg(test)]
#[path = "./effect_tests.rs"]
mod tests;
