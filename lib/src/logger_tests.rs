use mockall::predicate::eq;

use crate::{store::MockStore, test_utils::TestAction};

use super::*;

#[test]
fn defaults_to_debug_level() {
    assert_eq!(ActionLogger::default().level(), Level::Debug);
    assert_eq!(ActionLogger::new(Level::Info).level(), Level::Info);
}

#[test]
fn forwards_dispatch_to_wrapped_store() {
    let mut store = MockStore::<i32, TestAction>::new();

    store
        .expect_dispatch()
        .with(eq(TestAction::Add(2)))
        .times(1)
        .returning(|_| ());

    store
        .expect_get_state()
        .times(1)
        .returning(|| Rc::new(2));

    let wrapped = ActionLogger::default().wrap(Rc::new(store));

    wrapped.dispatch(TestAction::Add(2));
    assert_eq!(*wrapped.get_state(), 2);
}

#[test]
fn forwards_replace_reducer() {
    let mut store = MockStore::<i32, TestAction>::new();

    store.expect_replace_reducer().times(1).returning(|_| ());

    let wrapped = ActionLogger::new(Level::Trace).wrap(Rc::new(store));

    wrapped.replace_reducer(Box::new(|state: &i32, _: TestAction| *state));
}
