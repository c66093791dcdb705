//! Canned demo scenarios driven through an installed effect loop

use clap::ValueEnum;
use log::*;
use r_looplib::{
    action::Action,
    effect::Effect,
    error::LoopError,
    install::{InstallOptions, LoopStore, install},
    logger::ActionLogger,
    looped::{Reduced, looped},
    settlement::Settlement,
    store::{BasicStore, LoopReducer},
};
use serde::Serialize;
use std::{rc::Rc, time::Duration};
use strum::AsRefStr;

/// Which demo to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Increments a counter; no effects
    Counter,
    /// Fetches items one at a time through delayed calls
    Fetch,
    /// Fetches every item at once through a single batch
    Batch,
    /// Increments, then fetches from a source that always fails
    Fail,
}

impl Scenario {
    /// Actions dispatched, in order, when running this scenario
    pub fn actions(&self, count: u32) -> Vec<Msg> {
        match self {
            Self::Counter => (0..count).map(|_| Msg::Increment).collect(),
            Self::Fetch => (1..=count).map(Msg::Fetch).collect(),
            Self::Batch => vec![Msg::FetchAll(count)],
            Self::Fail => vec![Msg::Increment, Msg::Fail],
        }
    }
}

/// Demo actions
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr, Serialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Msg {
    Increment,
    Fetch(u32),
    FetchAll(u32),
    Fetched(u32),
    Fail,
}

impl Action for Msg {
    fn action_type(&self) -> &str {
        self.as_ref()
    }
}

/// Demo model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Model {
    pub count: u32,
    pub pending: u32,
    pub fetched: Vec<u32>,
}

/// Reducer attaching delayed fetch effects to the model
pub struct DemoReducer {
    delay: Duration,
}

impl DemoReducer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

async fn fetch_item((id, delay): (u32, Duration)) -> Result<Msg, String> {
    tokio::time::sleep(delay).await;
    Ok(Msg::Fetched(id))
}

async fn fetch_broken(delay: Duration) -> Result<Msg, String> {
    tokio::time::sleep(delay).await;
    Err("remote source refused the request".to_string())
}

impl LoopReducer<Model, Msg> for DemoReducer {
    fn reduce(&self, model: &Model, action: Msg) -> Reduced<Model, Msg> {
        let mut next = model.clone();

        match action {
            Msg::Increment => {
                next.count += 1;
                Reduced::Model(next)
            }
            Msg::Fetch(id) => {
                next.pending += 1;
                looped(next, Effect::call(fetch_item, (id, self.delay)))
            }
            Msg::FetchAll(count) => {
                let fetches = (1..=count).map(|id| Effect::constant(Msg::Fetch(id)));
                looped(next, Effect::batch(fetches))
            }
            Msg::Fetched(id) => {
                next.pending = next.pending.saturating_sub(1);
                next.fetched.push(id);
                Reduced::Model(next)
            }
            Msg::Fail => {
                next.pending += 1;
                looped(next, Effect::call(fetch_broken, self.delay))
            }
        }
    }
}

/// Outcome of a scenario run
#[derive(Debug, Serialize)]
pub struct Report {
    pub scenario: String,
    pub model: Model,
    pub error: Option<String>,
}

/// Creates the demo store, optionally logging every dispatch
pub fn create_store(
    delay: Duration,
    log_dispatch: bool,
) -> Result<(LoopStore<Model, Msg>, Settlement), LoopError> {
    let mut builder = InstallOptions::<Model, Msg>::builder();

    if log_dispatch {
        builder = builder.logger(Rc::new(ActionLogger::new(Level::Info)));
    }

    Ok(install(builder.build()?).create_store(
        BasicStore::new,
        DemoReducer::new(delay),
        Reduced::Model(Model::default()),
    ))
}

/// Dispatches every scenario action, waiting for each to settle. Stops at
/// the first failed settlement.
pub async fn run(
    scenario: Scenario,
    count: u32,
    delay: Duration,
    log_dispatch: bool,
) -> Result<Report, LoopError> {
    let (store, init) = create_store(delay, log_dispatch)?;
    init.await?;

    let mut error = None;

    for action in scenario.actions(count) {
        debug!("dispatching {}", action.action_type());

        if let Err(err) = store.dispatch(action).await {
            warn!("scenario stopped: {err}");
            error = Some(err.to_string());
            break;
        }
    }

    let mut model = store.get_state().model().clone();
    model.fetched.sort();

    Ok(Report {
        scenario: format!("{scenario:?}").to_lowercase(),
        model,
        error,
    })
}

#[cfg(test)]
#[path = "./scenario_tests.rs"]
mod tests;
