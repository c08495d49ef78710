//! # Tagged Reducer Core
//!
//! Tagged actions and tag-dispatching reducers for unidirectional state updates.
//!
//! ## Core Concepts
//!
//! - **Action**: An immutable tagged event with optional payload and meta ([`Action`])
//! - **Handler**: A pure function `(State, Action) → State` for one tag
//! - **Handler Table**: One handler per tag ([`HandlerTable`])
//! - **Reducer**: A pure function `(State, Action) → State` ([`Reducer`])
//!
//! ## Architecture Principles
//!
//! - State is threaded by value through every call, never held by the reducer
//! - Unrecognized tags leave state untouched, so independently authored tables compose
//! - Each handler sees its own action kind, not the whole union
//!
//! ## Example
//!
//! ```
//! use tagged_reducer_core::{create_action, handle_actions_with_initial_state, HandlerTable, JsonAction, Reducer};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct State {
//!     foo: &'static str,
//! }
//!
//! let reducer = handle_actions_with_initial_state(
//!     HandlerTable::new().on("SOME_ACTION", |_state: State, _action: JsonAction| State { foo: "foo" }),
//!     State { foo: "bar" },
//! );
//!
//! let next = reducer.reduce(State { foo: "bar" }, create_action("SOME_ACTION"));
//! assert_eq!(next, State { foo: "foo" });
//!
//! // Unknown tags fall through.
//! let next = reducer.reduce(next, create_action("other"));
//! assert_eq!(next, State { foo: "foo" });
//!
//! // Absent state is replaced by the initial state.
//! let next = reducer.reduce_optional(None, create_action("@@INIT"));
//! assert_eq!(next, Some(State { foo: "bar" }));
//! ```

pub mod action;
pub mod composition;
pub mod handle_actions;

pub use action::{
    Action, ActionError, ActionKind, ActionShape, JsonAction, TaggedAction, create_action,
    create_action_from_parts, create_action_with_meta, create_action_with_payload,
    create_action_with_payload_and_meta,
};
pub use handle_actions::{
    HandleActions, HandlerError, HandlerTable, handle_actions, handle_actions_with_initial_state,
};
pub use reducer::Reducer;

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action) → State`
///
/// They hold no state of their own; every call receives the current state and
/// returns the next one.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer folds actions into
    /// - `Action`: The action type this reducer processes
    ///
    /// # Example
    ///
    /// ```
    /// use tagged_reducer_core::Reducer;
    ///
    /// struct CounterReducer;
    ///
    /// enum CounterAction {
    ///     Increment,
    ///     Reset,
    /// }
    ///
    /// impl Reducer for CounterReducer {
    ///     type State = i64;
    ///     type Action = CounterAction;
    ///
    ///     fn reduce(&self, state: i64, action: CounterAction) -> i64 {
    ///         match action {
    ///             CounterAction::Increment => state + 1,
    ///             CounterAction::Reset => 0,
    ///         }
    ///     }
    /// }
    ///
    /// assert_eq!(CounterReducer.reduce(41, CounterAction::Increment), 42);
    /// assert_eq!(CounterReducer.reduce_optional(None, CounterAction::Reset), None);
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Fold `action` into `state`, returning the next state
        ///
        /// Returning `state` itself means "unchanged".
        fn reduce(&self, state: Self::State, action: Self::Action) -> Self::State;

        /// The state to use when a caller has none yet
        ///
        /// Defaults to `None`: the reducer has no initial state.
        fn initial_state(&self) -> Option<Self::State> {
            None
        }

        /// Reduce a possibly absent state
        ///
        /// An absent `state` is replaced by [`Reducer::initial_state`] before reducing.
        /// If there is no initial state either, the result is `None` and `action` is
        /// dropped without being dispatched.
        fn reduce_optional(
            &self,
            state: Option<Self::State>,
            action: Self::Action,
        ) -> Option<Self::State> {
            state
                .or_else(|| self.initial_state())
                .map(|state| self.reduce(state, action))
        }
    }
}
