//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Fold one action through several reducers on the same state
//! - **`scope_reducer`**: Focus a reducer on a subset of state
//!
//! Because unrecognized tags fall through, handler tables written independently
//! can be combined without each one knowing every tag in the system.
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use tagged_reducer_core::{create_action, handle_actions, Action, HandlerTable, Reducer};
//! use tagged_reducer_core::composition::combine_reducers;
//!
//! let counter = handle_actions(HandlerTable::new().on("increment", |n: u32, _a: Action| n + 1));
//! let doubler = handle_actions(HandlerTable::new().on("double", |n: u32, _a: Action| n * 2));
//!
//! let combined = combine_reducers(vec![Box::new(counter), Box::new(doubler)]);
//! let n = combined.reduce(1, create_action("increment"));
//! let n = combined.reduce(n, create_action("double"));
//! assert_eq!(n, 4);
//! ```

use crate::reducer::Reducer;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence; the state returned by one is passed to the
/// next, and the action is cloned for every reducer.
///
/// The combined reducer's initial state is the first one any of its reducers
/// provides.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
#[must_use]
pub fn combine_reducers<S, A>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A> + Send + Sync>>,
) -> CombinedReducer<S, A>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A> {
    reducers: Vec<Box<dyn Reducer<State = S, Action = A> + Send + Sync>>,
}

impl<S, A> CombinedReducer<S, A> {
    /// Number of reducers combined
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether no reducers are combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A> Reducer for CombinedReducer<S, A>
where
    A: Clone,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: Self::State, action: Self::Action) -> Self::State {
        self.reducers
            .iter()
            .fold(state, |state, reducer| reducer.reduce(state, action.clone()))
    }

    fn initial_state(&self) -> Option<Self::State> {
        self.reducers.iter().find_map(|reducer| reducer.initial_state())
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// This allows you to reuse reducers designed for smaller state types
/// within a larger application state.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `SubS`: The child state type (subset of `S`)
/// - `A`: The action type
///
/// # Examples
///
/// ```
/// use tagged_reducer_core::{create_action, handle_actions, Action, HandlerTable, Reducer};
/// use tagged_reducer_core::composition::scope_reducer;
///
/// #[derive(Clone, Default)]
/// struct CounterState {
///     count: i32,
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: CounterState,
///     other_data: String,
/// }
///
/// let counter = handle_actions(HandlerTable::new().on(
///     "increment",
///     |state: CounterState, _action: Action| CounterState { count: state.count + 1 },
/// ));
///
/// let scoped = scope_reducer(
///     counter,
///     |app_state: &AppState| &app_state.counter,
///     |app_state: &mut AppState, counter: CounterState| {
///         app_state.counter = counter;
///     },
/// );
///
/// let state = scoped.reduce(AppState::default(), create_action("increment"));
/// assert_eq!(state.counter.count, 1);
/// ```
pub fn scope_reducer<S, SubS, A, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`]. Has no initial state of its own: the child's
/// initial state is only a slice of the parent's.
pub struct ScopedReducer<S, SubS, A, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<fn(A)>,
}

impl<S, SubS, A, R> Reducer for ScopedReducer<S, SubS, A, R>
where
    SubS: Clone,
    R: Reducer<State = SubS, Action = A>,
{
    type State = S;
    type Action = A;

    fn reduce(&self, mut state: Self::State, action: Self::Action) -> Self::State {
        let sub_state = (self.get_state)(&state).clone();
        let sub_state = self.reducer.reduce(sub_state, action);
        (self.set_state)(&mut state, sub_state);
        state
    }
}
