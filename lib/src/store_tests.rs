use std::cell::RefCell;

use crate::{effect::Effect, looped::looped, test_utils::TestAction};

use super::*;

fn counter(state: &i32, action: TestAction) -> i32 {
    match action {
        TestAction::Increment => state + 1,
        TestAction::Add(n) => state + n,
        _ => *state,
    }
}

fn setup() -> BasicStore<i32, TestAction> {
    BasicStore::new(0, Box::new(counter))
}

#[test]
fn test_new() {
    let store = setup();
    assert_eq!(*store.get_state(), 0);
}

#[test]
fn test_dispatch() {
    let store = setup();

    store.dispatch(TestAction::Increment);
    store.dispatch(TestAction::Add(5));

    assert_eq!(*store.get_state(), 6);
}

#[test]
fn test_snapshots_are_not_mutated() {
    let store = setup();

    let before = store.get_state();
    store.dispatch(TestAction::Increment);

    assert_eq!(*before, 0);
    assert_eq!(*store.get_state(), 1);
}

#[test]
fn test_notifies_subscribers_before_returning() {
    let store = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&seen);

    store.subscribe(move |state: &i32| recorder.borrow_mut().push(*state));

    store.dispatch(TestAction::Increment);
    assert_eq!(*seen.borrow(), vec![1]);

    store.dispatch(TestAction::Increment);
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn test_unsubscribe() {
    let store = setup();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);

    let id = store.subscribe(move |_: &i32| counter.set(counter.get() + 1));
    store.dispatch(TestAction::Increment);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));

    store.dispatch(TestAction::Increment);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_replace_reducer() {
    let store = setup();

    store.dispatch(TestAction::Increment);
    store.replace_reducer(Box::new(|state: &i32, _: TestAction| state * 10));
    store.dispatch(TestAction::Increment);

    assert_eq!(*store.get_state(), 10);
}

#[test]
fn test_rc_store_forwards_to_inner() {
    let store = Rc::new(setup());
    let handle: Box<dyn Store<i32, TestAction>> = Box::new(Rc::clone(&store));

    handle.dispatch(TestAction::Add(3));

    assert_eq!(*store.get_state(), 3);
    assert_eq!(*handle.get_state(), 3);
}

#[test]
fn test_loop_reducer_closure() {
    let reducer = |model: &i32, action: TestAction| match action {
        TestAction::Fetch => looped(*model, Effect::constant(TestAction::Done(1))),
        _ => Reduced::Model(model + 1),
    };

    assert!(matches!(
        LoopReducer::reduce(&reducer, &0, TestAction::Increment),
        Reduced::Model(1)
    ));
    assert!(matches!(
        LoopReducer::reduce(&reducer, &0, TestAction::Fetch),
        Reduced::Looped(_)
    ));
}
