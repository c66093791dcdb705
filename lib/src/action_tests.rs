use crate::test_utils::TestAction;

use super::*;

#[test]
fn uses_strum_names_for_action_type() {
    assert_eq!(TestAction::Increment.action_type(), "INCREMENT");
    assert_eq!(TestAction::Done(42).action_type(), "DONE");
}

#[test]
fn extends_chain_without_mutating_parent() {
    let root = CallChain::new();
    let first = root.extend(&TestAction::Fetch);
    let second = first.extend(&TestAction::Done(1));

    assert!(root.is_empty());
    assert_eq!(first.len(), 1);
    assert_eq!(
        second.origins(),
        vec![
            Origin::Action("FETCH".to_string()),
            Origin::Action("DONE".to_string())
        ]
    );
}

#[test]
fn compares_chains_by_origins() {
    let left = CallChain::new().extend(&TestAction::Fetch);
    let right = CallChain::new().extend(&TestAction::Fetch);

    assert_eq!(left, right);
    assert_ne!(left, left.extend(&TestAction::Noop));
    assert_ne!(CallChain::bootstrap(), CallChain::new());
    assert_eq!(format!("{left:?}"), r#"CallChain([Action("FETCH")])"#);
}

#[test]
fn extends_and_drops_long_chains() {
    let mut chain = CallChain::bootstrap();
    for _ in 0..100_000 {
        chain = chain.extend(&TestAction::Increment);
    }

    assert_eq!(chain.len(), 100_001);
    assert_eq!(chain.origins()[0], Origin::Bootstrap);
    drop(chain);
}

#[test]
fn displays_chain_joined_by_arrows() {
    let chain = CallChain::new()
        .extend(&TestAction::Fetch)
        .extend(&TestAction::Done(1));

    assert_eq!(chain.to_string(), "FETCH > DONE");
}

#[test]
fn bootstrap_origin_never_equals_an_application_action() {
    let chain = CallChain::bootstrap().extend(&TestAction::Increment);

    assert_eq!(chain.origins()[0], Origin::Bootstrap);
    assert_ne!(
        Origin::Bootstrap,
        Origin::Action(BOOTSTRAP_ACTION_TYPE.to_string())
    );
    assert_eq!(chain.to_string(), "@@r-loop/INIT > INCREMENT");
}
