//! # Tagged Reducer Testing
//!
//! Testing utilities and helpers for tagged-reducer.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - [`HandlerSpy`], a handler that records its calls
//! - proptest strategies for actions and JSON values
//! - A tracing subscriber hook for test output
//!
//! ## Example
//!
//! ```
//! use tagged_reducer_core::{create_action, handle_actions_with_initial_state, HandlerTable, JsonAction};
//! use tagged_reducer_testing::{HandlerSpy, ReducerTest};
//!
//! let spy = HandlerSpy::returning(1_u32);
//! let reducer = handle_actions_with_initial_state(
//!     HandlerTable::<u32, JsonAction>::new().on("SOME_ACTION", spy.handler()),
//!     0,
//! );
//!
//! ReducerTest::new(reducer)
//!     .when_action(create_action("SOME_ACTION"))
//!     .then_state(|state| assert_eq!(*state, 1))
//!     .run();
//!
//! assert_eq!(spy.calls(), vec![(0, create_action("SOME_ACTION"))]);
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Mock handlers
///
/// Stand-ins for real handlers that let a test observe what a reducer dispatched.
pub mod mocks {
    use std::sync::{Arc, Mutex, PoisonError};

    /// A recorded handler invocation: `(state, action)`.
    pub type Call<S, A> = (S, A);

    /// A handler that records every call and returns a fixed state
    ///
    /// Clones share the same call log, so the spy can be moved into a table while
    /// the test keeps a handle to inspect it.
    ///
    /// # Example
    ///
    /// ```
    /// use tagged_reducer_core::{create_action, handle_actions, Action, HandlerTable, Reducer};
    /// use tagged_reducer_testing::mocks::HandlerSpy;
    ///
    /// let spy = HandlerSpy::returning("handled");
    /// let reducer = handle_actions(HandlerTable::<&str, Action>::new().on("ping", spy.handler()));
    ///
    /// assert_eq!(reducer.reduce("idle", create_action("ping")), "handled");
    /// assert_eq!(reducer.reduce("idle", create_action("pong")), "idle");
    /// assert_eq!(spy.call_count(), 1);
    /// ```
    #[derive(Debug)]
    pub struct HandlerSpy<S, A> {
        returns: S,
        calls: Arc<Mutex<Vec<Call<S, A>>>>,
    }

    impl<S, A> HandlerSpy<S, A> {
        /// Create a spy whose handler always returns `state`
        #[must_use]
        pub fn returning(state: S) -> Self {
            Self {
                returns: state,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Number of times the handler has been called
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .len()
        }

        /// Whether the handler has never been called
        #[must_use]
        pub fn was_not_called(&self) -> bool {
            self.call_count() == 0
        }
    }

    impl<S, A> HandlerSpy<S, A>
    where
        S: Clone + Send + Sync + 'static,
        A: Send + 'static,
    {
        /// A handler to register in a table; every call is recorded on this spy
        #[must_use]
        pub fn handler(&self) -> impl Fn(S, A) -> S + Send + Sync + 'static {
            let returns = self.returns.clone();
            let calls = Arc::clone(&self.calls);
            move |state, action| {
                calls
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((state, action));
                returns.clone()
            }
        }
    }

    impl<S: Clone, A: Clone> HandlerSpy<S, A> {
        /// Every recorded call, oldest first
        #[must_use]
        pub fn calls(&self) -> Vec<Call<S, A>> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// The most recent call, if any
        #[must_use]
        pub fn last_call(&self) -> Option<Call<S, A>> {
            self.calls
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
        }
    }

    impl<S: Clone, A> Clone for HandlerSpy<S, A> {
        fn clone(&self) -> Self {
            Self {
                returns: self.returns.clone(),
                calls: Arc::clone(&self.calls),
            }
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a tracing subscriber that writes to the test harness
    ///
    /// Honors `RUST_LOG`; safe to call from every test, only the first call installs.
    pub fn init_test_tracing() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    }
}

/// Property-based testing utilities
///
/// proptest strategies for tags, JSON values and [`JsonAction`]s.
pub mod properties {
    use proptest::collection::{hash_map, vec};
    use proptest::option;
    use proptest::prelude::*;
    use serde_json::Value;
    use tagged_reducer_core::{JsonAction, create_action_from_parts};

    /// Arbitrary action tags, including the empty string
    pub fn action_type() -> impl Strategy<Value = String> {
        "[A-Za-z0-9@/_.-]{0,24}"
    }

    /// Arbitrary JSON values, nested up to three levels
    pub fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z ]{0,12}".prop_map(Value::from),
        ];

        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                vec(inner.clone(), 0..4).prop_map(Value::Array),
                hash_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|fields| Value::Object(fields.into_iter().collect())),
            ]
        })
    }

    /// Arbitrary actions with any of the four key sets
    pub fn json_action() -> impl Strategy<Value = JsonAction> {
        (
            action_type(),
            option::of(json_value()),
            option::of(json_value()),
        )
            .prop_map(|(action_type, payload, meta)| {
                create_action_from_parts(action_type, payload, meta)
            })
    }

    /// Arbitrary actions whose tag is one of `action_types`
    pub fn json_action_of(action_types: Vec<String>) -> impl Strategy<Value = JsonAction> {
        (
            proptest::sample::select(action_types),
            option::of(json_value()),
            option::of(json_value()),
        )
            .prop_map(|(action_type, payload, meta)| {
                create_action_from_parts(action_type, payload, meta)
            })
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::HandlerSpy;
