//! Pairs a model with the effect it is waiting on

use std::fmt::Debug;

use crate::effect::Effect;

/// A model paired with its pending effect
pub struct Looped<M, A> {
    /// The application model exposed to consumers
    pub model: M,
    /// The effect to resolve once the model has been stored
    pub effect: Effect<A>,
}

impl<M, A: 'static> Looped<M, A> {
    /// Pairs the model with the given effect
    pub fn new(model: M, effect: Effect<A>) -> Self {
        Self { model, effect }
    }

    /// Pairs the model with [`Effect::None`]
    pub fn pure(model: M) -> Self {
        Self::new(model, Effect::none())
    }
}

/// Value returned by application reducers: either a bare model, which has
/// no effect, or an explicit model / effect pair.
pub enum Reduced<M, A> {
    /// Bare model, implicitly paired with [`Effect::None`]
    Model(M),
    /// Explicit model / effect pair
    Looped(Looped<M, A>),
}

/// Returns a reduced value pairing `model` with `effect`
pub fn looped<M, A>(model: M, effect: Effect<A>) -> Reduced<M, A> {
    Reduced::Looped(Looped { model, effect })
}

/// Normalizes any reducer output into a [`Looped`] state. Bare models get
/// [`Effect::None`] and existing pairs pass through untouched.
pub fn lift_state<M, A: 'static>(reduced: Reduced<M, A>) -> Looped<M, A> {
    match reduced {
        Reduced::Model(model) => Looped::pure(model),
        Reduced::Looped(state) => state,
    }
}

impl<M, A: 'static> From<Reduced<M, A>> for Looped<M, A> {
    fn from(value: Reduced<M, A>) -> Self {
        lift_state(value)
    }
}

impl<M, A> From<Looped<M, A>> for Reduced<M, A> {
    fn from(value: Looped<M, A>) -> Self {
        Reduced::Looped(value)
    }
}

impl<M: Clone, A: Clone> Clone for Looped<M, A> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            effect: self.effect.clone(),
        }
    }
}

impl<M: Debug, A: Debug> Debug for Looped<M, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Looped")
            .field("model", &self.model)
            .field("effect", &self.effect)
            .finish()
    }
}

impl<M: Debug, A: Debug> Debug for Reduced<M, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(model) => f.debug_tuple("Model").field(model).finish(),
            Self::Looped(state) => f.debug_tuple("Looped").field(state).finish(),
        }
    }
}

#[cfg(test)]
#[path = "./looped_tests.rs"]
mod tests;
