//! End-to-end reducer scenarios using the testing harness.

use serde_json::json;
use std::sync::Arc;
use tagged_reducer_core::{
    HandleActions, HandlerTable, JsonAction, Reducer, create_action, create_action_with_payload,
    handle_actions_with_initial_state,
};
use tagged_reducer_macros::Action;
use tagged_reducer_testing::{HandlerSpy, ReducerTest, assertions, init_test_tracing};

const ACTION: &str = "SOME_ACTION";

#[derive(Clone, Debug, PartialEq)]
struct FooState {
    foo: &'static str,
}

struct Fixture {
    initial_state: Arc<FooState>,
    returned_state: Arc<FooState>,
    spy: HandlerSpy<Arc<FooState>, JsonAction>,
}

impl Fixture {
    fn new() -> Self {
        init_test_tracing();
        let returned_state = Arc::new(FooState { foo: "foo" });
        Self {
            initial_state: Arc::new(FooState { foo: "bar" }),
            spy: HandlerSpy::returning(Arc::clone(&returned_state)),
            returned_state,
        }
    }

    fn reducer(&self) -> HandleActions<Arc<FooState>, JsonAction> {
        handle_actions_with_initial_state(
            HandlerTable::new().on(ACTION, self.spy.handler()),
            Arc::clone(&self.initial_state),
        )
    }
}

#[test]
fn handles_actions() {
    let fixture = Fixture::new();
    let action: JsonAction = create_action(ACTION);

    let actual = fixture
        .reducer()
        .reduce(Arc::clone(&fixture.initial_state), action.clone());

    assert!(Arc::ptr_eq(&actual, &fixture.returned_state));
    let calls = fixture.spy.calls();
    assert_eq!(calls.len(), 1);
    assert!(Arc::ptr_eq(&calls[0].0, &fixture.initial_state));
    assert_eq!(calls[0].1, action);
}

#[test]
fn returns_state_when_action_type_is_not_handled() {
    let fixture = Fixture::new();
    let state = Arc::new(FooState { foo: "foo" });

    assertions::assert_same_state(&fixture.reducer(), &state, create_action("other_action"));
    assert!(fixture.spy.was_not_called());
}

#[test]
fn returns_the_same_state_when_the_handler_returns_its_input() {
    let reducer = handle_actions_with_initial_state(
        HandlerTable::<Arc<FooState>, JsonAction>::new().on(ACTION, |state, _action| state),
        Arc::new(FooState { foo: "bar" }),
    );
    let state = Arc::new(FooState { foo: "foo" });

    assertions::assert_same_state(&reducer, &state, create_action(ACTION));
}

#[test]
fn defaults_to_initial_state_when_state_is_absent() {
    let fixture = Fixture::new();
    let action: JsonAction = create_action(ACTION);

    let _ = fixture.reducer().reduce_optional(None, action.clone());

    let calls = fixture.spy.calls();
    assert_eq!(calls.len(), 1);
    assert!(Arc::ptr_eq(&calls[0].0, &fixture.initial_state));
    assert_eq!(calls[0].1, action);
}

#[test]
fn returns_initial_state_when_state_is_absent_and_action_is_not_handled() {
    let fixture = Fixture::new();
    let initial_state = Arc::clone(&fixture.initial_state);

    ReducerTest::new(fixture.reducer())
        .when_action(create_action("@@REDUX/INIT"))
        .then_state(move |state| {
            assert!(Arc::ptr_eq(state, &initial_state));
        })
        .run();

    assert!(fixture.spy.was_not_called());
}

#[test]
fn loose_json_actions_dispatch_by_type_field() {
    init_test_tracing();
    let reducer = handle_actions_with_initial_state(
        HandlerTable::<u64, serde_json::Value>::new().on("add", |total, action| {
            total + action["payload"].as_u64().unwrap_or_default()
        }),
        0,
    );

    ReducerTest::new(reducer)
        .when_action(json!({ "type": "add", "payload": 2 }))
        .when_action(json!({ "payload": 100 }))
        .when_action(json!({ "type": ["add"] }))
        .when_action(json!({ "type": "add", "payload": 3 }))
        .then_state(|total| assert_eq!(*total, 5))
        .run();
}

// Typed actions: each handler sees its own kind

#[derive(Clone, Debug, PartialEq)]
struct Bar(String);

#[derive(Clone, Debug, PartialEq)]
struct Baz(u32);

#[derive(Action, Clone, Debug, PartialEq)]
enum Actions {
    #[action(rename = "foo")]
    Foo,
    #[action(rename = "bar")]
    Bar(Bar),
    #[action(rename = "baz")]
    Baz(Baz),
}

#[derive(Clone, Debug, PartialEq)]
struct State {
    foo: String,
}

fn typed_reducer() -> impl Reducer<State = State, Action = Actions> {
    handle_actions_with_initial_state(
        HandlerTable::<State, Actions>::new()
            .on("foo", |_state, _action| State {
                foo: "foo".to_string(),
            })
            .handle(|state: State, Bar(suffix): Bar| State {
                foo: state.foo + &suffix,
            })
            .handle(|state: State, Baz(n): Baz| State {
                foo: state.foo + &n.to_string(),
            }),
        State {
            foo: "bar".to_string(),
        },
    )
}

#[test]
fn typed_handlers_receive_their_payload() {
    ReducerTest::new(typed_reducer())
        .when_action(Bar("-x".to_string()).into())
        .when_action(Baz(7).into())
        .then_state(|state| assert_eq!(state.foo, "bar-x7"))
        .run();

    ReducerTest::new(typed_reducer())
        .given_state(State {
            foo: "anything".to_string(),
        })
        .when_action(Actions::Foo)
        .then_state(|state| assert_eq!(state.foo, "foo"))
        .run();
}

#[test]
fn typed_and_json_actions_share_tags() {
    let json: JsonAction = create_action_with_payload("bar", json!("-x"));
    assert_eq!(json.action_type(), Actions::Bar(Bar("-x".to_string())).action_type());
}
