use strum::AsRefStr;
use thiserror::Error;

use crate::action::Action;

#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TestAction {
    Increment,
    Add(i32),
    Fetch,
    Done(i32),
    Fail,
    Noop,
}

impl Action for TestAction {
    fn action_type(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Error, Debug)]
#[error("test failure: {_0}")]
pub struct TestError(pub String);

pub async fn answer(value: i32) -> Result<TestAction, TestError> {
    Ok(TestAction::Done(value))
}

pub async fn explode(reason: &'static str) -> Result<TestAction, TestError> {
    Err(TestError(reason.to_string()))
}
