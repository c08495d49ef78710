//! Tag-dispatching reducers
//!
//! A [`HandlerTable`] maps action tags to handlers. [`handle_actions`] closes a
//! reducer over a table; [`handle_actions_with_initial_state`] also gives it a
//! state to start from.
//!
//! Each reduction looks up the action's tag and either runs the matching handler or
//! hands the state back untouched. There is no error path: an unknown tag, or an
//! action with no tag at all, is a lookup miss.
//!
//! # Examples
//!
//! ```
//! use tagged_reducer_core::{create_action, handle_actions, Action, HandlerTable, Reducer};
//!
//! let reducer = handle_actions(
//!     HandlerTable::new()
//!         .on("increment", |count: i64, _action: Action<i64>| count + 1)
//!         .on("add", |count: i64, action: Action<i64>| {
//!             count + action.payload().copied().unwrap_or_default()
//!         }),
//! );
//!
//! let count = reducer.reduce(0, create_action("increment"));
//! let count = reducer.reduce(count, Action::new("add").with_payload(10));
//! let count = reducer.reduce(count, create_action("unknown"));
//! assert_eq!(count, 11);
//! ```

use crate::action::{ActionKind, TaggedAction};
use crate::reducer::Reducer;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// A boxed handler: pure `(State, Action) → State`.
type Handler<S, A> = Box<dyn Fn(S, A) -> S + Send + Sync>;

/// Produces a fresh copy of the configured initial state.
type InitialState<S> = Box<dyn Fn() -> S + Send + Sync>;

/// Errors from strict handler registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// A handler is already registered for this tag.
    #[error("Duplicate handler for action type: {action_type}")]
    DuplicateHandler {
        /// The tag that was registered twice.
        action_type: String,
    },
}

/// A mapping from action tag to handler.
///
/// Holds at most one handler per tag. The lenient registration methods
/// ([`on`](Self::on), [`handle`](Self::handle), [`insert`](Self::insert),
/// [`merge`](Self::merge)) replace an existing handler; the `try_` variants refuse.
pub struct HandlerTable<S, A> {
    handlers: HashMap<String, Handler<S, A>>,
}

impl<S, A> HandlerTable<S, A> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `action_type`, replacing any existing one
    ///
    /// The handler receives the whole action value.
    #[must_use]
    pub fn on<F>(mut self, action_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(S, A) -> S + Send + Sync + 'static,
    {
        self.insert(action_type, handler);
        self
    }

    /// Register `handler` for `action_type` unless one is already registered
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::DuplicateHandler`] if the tag is taken.
    pub fn try_on<F>(mut self, action_type: impl Into<String>, handler: F) -> Result<Self, HandlerError>
    where
        F: Fn(S, A) -> S + Send + Sync + 'static,
    {
        let action_type = action_type.into();
        if self.handlers.contains_key(&action_type) {
            return Err(HandlerError::DuplicateHandler { action_type });
        }
        self.handlers.insert(action_type, Box::new(handler));
        Ok(self)
    }

    /// Register a handler for the action kind `K`, under `K::TYPE`
    ///
    /// The handler receives the narrowed `K` rather than the whole union, so it can
    /// use the kind's payload directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_reducer_core::{ActionKind, HandlerTable, Reducer, TaggedAction, handle_actions};
    ///
    /// struct Add(i64);
    ///
    /// enum MathAction {
    ///     Add(Add),
    ///     Clear,
    /// }
    ///
    /// impl TaggedAction for MathAction {
    ///     fn tag(&self) -> Option<&str> {
    ///         Some(match self {
    ///             Self::Add(_) => "Add",
    ///             Self::Clear => "Clear",
    ///         })
    ///     }
    /// }
    ///
    /// impl ActionKind<MathAction> for Add {
    ///     const TYPE: &'static str = "Add";
    ///
    ///     fn from_action(action: MathAction) -> Result<Self, MathAction> {
    ///         match action {
    ///             MathAction::Add(add) => Ok(add),
    ///             other => Err(other),
    ///         }
    ///     }
    /// }
    ///
    /// let reducer = handle_actions(
    ///     HandlerTable::<i64, MathAction>::new()
    ///         .handle(|total: i64, Add(n): Add| total + n)
    ///         .on("Clear", |_total, _action| 0),
    /// );
    ///
    /// assert_eq!(reducer.reduce(1, MathAction::Add(Add(2))), 3);
    /// assert_eq!(reducer.reduce(3, MathAction::Clear), 0);
    /// ```
    #[must_use]
    pub fn handle<K, F>(self, handler: F) -> Self
    where
        S: 'static,
        A: 'static,
        K: ActionKind<A> + 'static,
        F: Fn(S, K) -> S + Send + Sync + 'static,
    {
        self.on(K::TYPE, narrowed::<S, A, K, F>(handler))
    }

    /// Strict form of [`handle`](Self::handle)
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::DuplicateHandler`] if `K::TYPE` is taken.
    pub fn try_handle<K, F>(self, handler: F) -> Result<Self, HandlerError>
    where
        S: 'static,
        A: 'static,
        K: ActionKind<A> + 'static,
        F: Fn(S, K) -> S + Send + Sync + 'static,
    {
        self.try_on(K::TYPE, narrowed::<S, A, K, F>(handler))
    }

    /// Register `handler` for `action_type` in place
    ///
    /// Returns `true` if an existing handler was replaced.
    pub fn insert<F>(&mut self, action_type: impl Into<String>, handler: F) -> bool
    where
        F: Fn(S, A) -> S + Send + Sync + 'static,
    {
        let action_type = action_type.into();
        let replaced = self
            .handlers
            .insert(action_type.clone(), Box::new(handler))
            .is_some();

        if replaced {
            tracing::debug!(action_type = %action_type, "Replaced existing handler");
        }

        replaced
    }

    /// Merge `other` into this table
    ///
    /// Where both tables handle a tag, `other`'s handler wins.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (action_type, handler) in other.handlers {
            if self.handlers.insert(action_type.clone(), handler).is_some() {
                tracing::debug!(action_type = %action_type, "Merged handler replaced existing handler");
            }
        }
        self
    }

    /// The handler registered for `action_type`, if any
    #[must_use]
    pub fn get(&self, action_type: &str) -> Option<&(dyn Fn(S, A) -> S + Send + Sync + 'static)> {
        self.handlers.get(action_type).map(|handler| &**handler)
    }

    /// Whether a handler is registered for `action_type`
    #[must_use]
    pub fn contains(&self, action_type: &str) -> bool {
        self.handlers.contains_key(action_type)
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The registered tags, in no particular order
    pub fn action_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl<S, A> Default for HandlerTable<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> fmt::Debug for HandlerTable<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut action_types: Vec<&str> = self.action_types().collect();
        action_types.sort_unstable();
        f.debug_struct("HandlerTable")
            .field("action_types", &action_types)
            .finish()
    }
}

/// Adapt a kind handler to a union handler.
///
/// The table only routes `K::TYPE` here, so a failed narrowing means the union's
/// `tag()` and the kind's `from_action` disagree; the state is returned untouched.
fn narrowed<S, A, K, F>(handler: F) -> impl Fn(S, A) -> S + Send + Sync + 'static
where
    S: 'static,
    A: 'static,
    K: ActionKind<A> + 'static,
    F: Fn(S, K) -> S + Send + Sync + 'static,
{
    move |state, action| match K::from_action(action) {
        Ok(kind) => handler(state, kind),
        Err(_) => {
            tracing::warn!(action_type = K::TYPE, "Action routed to kind handler did not narrow");
            state
        },
    }
}

/// A reducer that dispatches on the action's tag.
///
/// Created by [`handle_actions`] or [`handle_actions_with_initial_state`].
/// Immutable once built; all state flows through [`Reducer::reduce`].
///
/// Dispatch places no bounds on `S`. Only configuring an initial state requires
/// `S: Clone`, since every absent state receives its own copy.
pub struct HandleActions<S, A> {
    handlers: HandlerTable<S, A>,
    initial_state: Option<InitialState<S>>,
}

impl<S, A> HandleActions<S, A> {
    /// Create a reducer over `handlers` with no initial state
    #[must_use]
    pub const fn new(handlers: HandlerTable<S, A>) -> Self {
        Self {
            handlers,
            initial_state: None,
        }
    }

    /// Set the state substituted when a caller passes none
    #[must_use]
    pub fn with_initial_state(mut self, initial_state: S) -> Self
    where
        S: Clone + Send + Sync + 'static,
    {
        self.initial_state = Some(Box::new(move || initial_state.clone()));
        self
    }

    /// The handler table this reducer dispatches through
    #[must_use]
    pub const fn handlers(&self) -> &HandlerTable<S, A> {
        &self.handlers
    }

    /// Whether an initial state is configured
    #[must_use]
    pub const fn has_initial_state(&self) -> bool {
        self.initial_state.is_some()
    }
}

impl<S, A> Reducer for HandleActions<S, A>
where
    A: TaggedAction,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: S, action: A) -> S {
        let action_type = action.tag();
        let handler = action_type.and_then(|action_type| self.handlers.get(action_type));

        tracing::trace!(
            action_type = action_type.unwrap_or("<untagged>"),
            handled = handler.is_some(),
            "Dispatching action"
        );

        match handler {
            Some(handler) => handler(state, action),
            None => state,
        }
    }

    fn initial_state(&self) -> Option<S> {
        self.initial_state.as_ref().map(|initial_state| initial_state())
    }
}

impl<S, A> fmt::Debug for HandleActions<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleActions")
            .field("handlers", &self.handlers)
            .field("has_initial_state", &self.has_initial_state())
            .finish()
    }
}

/// Build a reducer over `handlers` with no initial state.
///
/// Callers must always pass a state; [`Reducer::reduce_optional`] on this reducer
/// returns `None` for an absent state.
#[must_use]
pub const fn handle_actions<S, A>(handlers: HandlerTable<S, A>) -> HandleActions<S, A> {
    HandleActions::new(handlers)
}

/// Build a reducer over `handlers` that substitutes `initial_state` for an absent state.
#[must_use]
pub fn handle_actions_with_initial_state<S, A>(
    handlers: HandlerTable<S, A>,
    initial_state: S,
) -> HandleActions<S, A>
where
    S: Clone + Send + Sync + 'static,
{
    HandleActions::new(handlers).with_initial_state(initial_state)
}
