//! # Counter Demo
//!
//! A simple counter built from tagged actions and a tag-dispatching reducer.
//!
//! This demo showcases:
//! - An action union with `#[derive(Action)]`
//! - Handlers that receive a narrowed action kind
//! - A reducer with an initial state
//! - The same handlers driven by loose JSON actions
//!
//! ## Example
//!
//! ```
//! use counter::{counter_reducer, AddBy, CounterAction};
//! use tagged_reducer_core::Reducer;
//!
//! let reducer = counter_reducer();
//! let state = reducer.reduce_optional(None, CounterAction::Increment);
//! let state = reducer.reduce_optional(state, AddBy(41).into());
//! assert_eq!(state.map(|s| s.count), Some(42));
//! ```

use tagged_reducer_core::{HandleActions, HandlerTable, JsonAction, handle_actions_with_initial_state};
use tagged_reducer_macros::Action;

/// Counter state
///
/// The state is just a simple count. In a real application, this might
/// contain more complex domain data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    /// Current count value
    pub count: i64,
}

/// Payload of [`CounterAction::Add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddBy(pub i64);

/// Counter actions
///
/// Tags are namespaced so the same handlers can be shared with JSON producers.
#[derive(Action, Debug, Clone, PartialEq)]
pub enum CounterAction {
    /// Increment the counter by 1
    #[action(rename = "counter/increment")]
    Increment,
    /// Decrement the counter by 1
    #[action(rename = "counter/decrement")]
    Decrement,
    /// Add an arbitrary amount
    #[action(rename = "counter/add")]
    Add(AddBy),
    /// Reset the counter to 0
    #[action(rename = "counter/reset")]
    Reset,
}

fn increment(state: CounterState) -> CounterState {
    CounterState {
        count: state.count.saturating_add(1),
    }
}

fn decrement(state: CounterState) -> CounterState {
    CounterState {
        count: state.count.saturating_sub(1),
    }
}

fn add(state: CounterState, AddBy(amount): AddBy) -> CounterState {
    CounterState {
        count: state.count.saturating_add(amount),
    }
}

/// Counter reducer over typed actions, starting at 0
#[must_use]
pub fn counter_reducer() -> HandleActions<CounterState, CounterAction> {
    handle_actions_with_initial_state(
        HandlerTable::<CounterState, CounterAction>::new()
            .on("counter/increment", |state, _action| increment(state))
            .on("counter/decrement", |state, _action| decrement(state))
            .handle(add)
            .on("counter/reset", |_state, _action| CounterState::default()),
        CounterState::default(),
    )
}

/// Counter reducer over JSON actions, starting at 0
///
/// `counter/add` reads an integer payload; a missing or non-integer payload adds
/// nothing.
#[must_use]
pub fn json_counter_reducer() -> HandleActions<CounterState, JsonAction> {
    handle_actions_with_initial_state(
        HandlerTable::<CounterState, JsonAction>::new()
            .on("counter/increment", |state, _action: JsonAction| increment(state))
            .on("counter/decrement", |state, _action: JsonAction| decrement(state))
            .on("counter/add", |state, action: JsonAction| {
                let amount = action
                    .payload()
                    .and_then(serde_json::Value::as_i64)
                    .unwrap_or_default();
                add(state, AddBy(amount))
            })
            .on("counter/reset", |_state, _action: JsonAction| CounterState::default()),
        CounterState::default(),
    )
}
