//! Tagged action values.
//!
//! An [`Action`] is an immutable record naming an event kind (its `type` tag) and
//! optionally carrying a `payload` and a `meta` value. Which of the optional keys
//! are present is decided entirely by the constructor used:
//!
//! | Constructor                               | Keys                       |
//! |-------------------------------------------|----------------------------|
//! | [`create_action`]                         | `type`                     |
//! | [`create_action_with_payload`]            | `type`, `payload`          |
//! | [`create_action_with_meta`]               | `type`, `meta`             |
//! | [`create_action_with_payload_and_meta`]   | `type`, `payload`, `meta`  |
//!
//! [`create_action_from_parts`] covers all four cases with `Option`s, where `None`
//! means "not supplied".
//!
//! # Serialization
//!
//! Absent keys are omitted, not written as `null`:
//!
//! ```
//! use tagged_reducer_core::action::{create_action, create_action_with_payload, JsonAction};
//! use serde_json::json;
//!
//! let action: JsonAction = create_action("action-type");
//! assert_eq!(serde_json::to_value(&action).unwrap(), json!({ "type": "action-type" }));
//!
//! let action: JsonAction = create_action_with_payload("action-type", json!({ "foo": "bar" }));
//! assert_eq!(
//!     serde_json::to_value(&action).unwrap(),
//!     json!({ "type": "action-type", "payload": { "foo": "bar" } })
//! );
//! ```

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use std::fmt;
use thiserror::Error;

/// An action whose payload and meta are arbitrary JSON.
pub type JsonAction = Action<serde_json::Value, serde_json::Value>;

/// Errors from parsing untrusted input into an [`Action`].
///
/// Constructing an action in code never fails; only the `from_json_*` entry points
/// return these.
#[derive(Error, Debug)]
pub enum ActionError {
    /// The input was not valid JSON, or its payload/meta did not match the target types.
    #[error("Malformed action: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The input had no string `type` field.
    #[error("Action is missing a string `type` field")]
    MissingType,
}

/// Which of the four key sets an action carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionShape {
    /// `{ type }`
    TypeOnly,
    /// `{ type, payload }`
    WithPayload,
    /// `{ type, meta }`
    WithMeta,
    /// `{ type, payload, meta }`
    WithPayloadAndMeta,
}

impl ActionShape {
    /// The keys present on an action of this shape, in serialization order.
    #[must_use]
    pub const fn keys(self) -> &'static [&'static str] {
        match self {
            Self::TypeOnly => &["type"],
            Self::WithPayload => &["type", "payload"],
            Self::WithMeta => &["type", "meta"],
            Self::WithPayloadAndMeta => &["type", "payload", "meta"],
        }
    }
}

/// An immutable tagged event with optional payload and metadata.
///
/// `P` is the payload type and `M` the meta type. Both default to `()` for actions
/// that carry nothing beyond their tag.
///
/// Fields are private; an action is read through its accessors and taken apart with
/// [`Action::into_parts`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>, M: Deserialize<'de>"))]
pub struct Action<P = (), M = ()> {
    #[serde(rename = "type")]
    action_type: String,

    #[serde(
        default = "absent",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    payload: Option<P>,

    #[serde(
        default = "absent",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    meta: Option<M>,
}

/// A key that is missing from the input.
const fn absent<T>() -> Option<T> {
    None
}

/// A key that is present in the input, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl<P, M> Action<P, M> {
    /// Create an action carrying only its tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_reducer_core::action::{Action, ActionShape};
    ///
    /// let action: Action<u32, String> = Action::new("increment");
    /// assert_eq!(action.action_type(), "increment");
    /// assert_eq!(action.shape(), ActionShape::TypeOnly);
    /// ```
    #[must_use]
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
            meta: None,
        }
    }

    /// Return this action with `payload` attached.
    #[must_use]
    pub fn with_payload(self, payload: P) -> Self {
        Self {
            payload: Some(payload),
            ..self
        }
    }

    /// Return this action with `meta` attached.
    #[must_use]
    pub fn with_meta(self, meta: M) -> Self {
        Self {
            meta: Some(meta),
            ..self
        }
    }

    /// The tag naming this action's kind.
    #[must_use]
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// The payload, if one was supplied.
    #[must_use]
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// The meta value, if one was supplied.
    #[must_use]
    pub const fn meta(&self) -> Option<&M> {
        self.meta.as_ref()
    }

    /// Which keys this action carries.
    #[must_use]
    pub const fn shape(&self) -> ActionShape {
        match (self.payload.is_some(), self.meta.is_some()) {
            (false, false) => ActionShape::TypeOnly,
            (true, false) => ActionShape::WithPayload,
            (false, true) => ActionShape::WithMeta,
            (true, true) => ActionShape::WithPayloadAndMeta,
        }
    }

    /// Take the action apart into `(type, payload, meta)`.
    #[must_use]
    pub fn into_parts(self) -> (String, Option<P>, Option<M>) {
        (self.action_type, self.payload, self.meta)
    }
}

impl<P, M> Action<P, M>
where
    P: DeserializeOwned,
    M: DeserializeOwned,
{
    /// Parse an action from a JSON value.
    ///
    /// Only a missing key means "not supplied"; a `null` payload or meta is kept as
    /// a supplied value and must deserialize as `P` or `M`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingType`] if `value` has no string `type` field,
    /// or [`ActionError::Malformed`] if the payload or meta do not deserialize.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ActionError> {
        if value.tag().is_none() {
            return Err(ActionError::MissingType);
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Parse an action from a JSON string.
    ///
    /// # Errors
    ///
    /// Same as [`Action::from_json_value`], plus [`ActionError::Malformed`] if the
    /// input is not JSON at all.
    pub fn from_json_str(input: &str) -> Result<Self, ActionError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_json_value(value)
    }
}

impl<P, M> fmt::Display for Action<P, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action_type)
    }
}

/// Create an action with only a `type`.
///
/// # Examples
///
/// ```
/// use tagged_reducer_core::action::{create_action, Action};
///
/// let action: Action = create_action("action-type");
/// assert_eq!(action.payload(), None);
/// assert_eq!(action.meta(), None);
/// ```
#[must_use]
pub fn create_action<P, M>(action_type: impl Into<String>) -> Action<P, M> {
    Action::new(action_type)
}

/// Create an action with a `type` and a `payload`.
#[must_use]
pub fn create_action_with_payload<P, M>(action_type: impl Into<String>, payload: P) -> Action<P, M> {
    Action::new(action_type).with_payload(payload)
}

/// Create an action with a `type` and a `meta` value but no payload.
#[must_use]
pub fn create_action_with_meta<P, M>(action_type: impl Into<String>, meta: M) -> Action<P, M> {
    Action::new(action_type).with_meta(meta)
}

/// Create an action with a `type`, a `payload` and a `meta` value.
#[must_use]
pub fn create_action_with_payload_and_meta<P, M>(
    action_type: impl Into<String>,
    payload: P,
    meta: M,
) -> Action<P, M> {
    Action::new(action_type).with_payload(payload).with_meta(meta)
}

/// Create an action from optional parts; `None` means "not supplied".
///
/// # Examples
///
/// ```
/// use tagged_reducer_core::action::{create_action_from_parts, Action, ActionShape};
///
/// let action: Action<u8, &str> = create_action_from_parts("tick", None, Some("trace-1"));
/// assert_eq!(action.shape(), ActionShape::WithMeta);
/// ```
#[must_use]
pub fn create_action_from_parts<P, M>(
    action_type: impl Into<String>,
    payload: Option<P>,
    meta: Option<M>,
) -> Action<P, M> {
    Action {
        action_type: action_type.into(),
        payload,
        meta,
    }
}

/// Anything a reducer can read a tag from.
///
/// Returning `None` means the value carries no usable tag; reducers treat that as a
/// lookup miss.
pub trait TaggedAction {
    /// The action's tag, if it has one.
    fn tag(&self) -> Option<&str>;

    /// Whether this action's tag is `action_type`.
    fn is_type(&self, action_type: &str) -> bool {
        self.tag() == Some(action_type)
    }
}

impl<P, M> TaggedAction for Action<P, M> {
    fn tag(&self) -> Option<&str> {
        Some(&self.action_type)
    }
}

/// Loose JSON actions are tagged by their string `type` field.
impl TaggedAction for serde_json::Value {
    fn tag(&self) -> Option<&str> {
        self.get("type").and_then(serde_json::Value::as_str)
    }
}

impl<T: TaggedAction + ?Sized> TaggedAction for &T {
    fn tag(&self) -> Option<&str> {
        (**self).tag()
    }
}

/// One kind of action within an action union `A`.
///
/// Implementors are the per-tag types of a union enum (usually generated by
/// `#[derive(Action)]` in `tagged-reducer-macros`). A handler registered for a kind
/// receives the kind value itself, so it sees exactly that kind's payload shape.
///
/// # Examples
///
/// ```
/// use tagged_reducer_core::action::{ActionKind, TaggedAction};
///
/// #[derive(Debug, PartialEq)]
/// struct Rename(String);
///
/// enum UserAction {
///     Rename(Rename),
///     Logout,
/// }
///
/// impl TaggedAction for UserAction {
///     fn tag(&self) -> Option<&str> {
///         match self {
///             Self::Rename(_) => Some("Rename"),
///             Self::Logout => Some("Logout"),
///         }
///     }
/// }
///
/// impl ActionKind<UserAction> for Rename {
///     const TYPE: &'static str = "Rename";
///
///     fn from_action(action: UserAction) -> Result<Self, UserAction> {
///         match action {
///             UserAction::Rename(rename) => Ok(rename),
///             other => Err(other),
///         }
///     }
/// }
///
/// let action = UserAction::Rename(Rename("ada".into()));
/// assert_eq!(Rename::from_action(action).ok(), Some(Rename("ada".into())));
/// assert!(Rename::from_action(UserAction::Logout).is_err());
/// ```
pub trait ActionKind<A>: Sized {
    /// The tag every action of this kind carries.
    const TYPE: &'static str;

    /// Narrow `action` to this kind, handing it back unchanged if it is another kind.
    ///
    /// # Errors
    ///
    /// Returns the original action when it is not of this kind.
    fn from_action(action: A) -> Result<Self, A>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_action_type_only() {
        let action: JsonAction = create_action("action-type");

        assert_eq!(action.action_type(), "action-type");
        assert_eq!(action.shape(), ActionShape::TypeOnly);
        assert_eq!(
            serde_json::to_value(&action).ok(),
            Some(json!({ "type": "action-type" }))
        );
    }

    #[test]
    fn test_create_action_with_payload() {
        let payload = json!({ "foo": "bar" });
        let action: JsonAction = create_action_with_payload("action-type", payload.clone());

        assert_eq!(action.payload(), Some(&payload));
        assert_eq!(action.meta(), None);
        assert_eq!(
            serde_json::to_value(&action).ok(),
            Some(json!({ "type": "action-type", "payload": { "foo": "bar" } }))
        );
    }

    #[test]
    fn test_create_action_with_payload_and_meta() {
        let payload = json!({ "foo": "bar" });
        let meta = json!({ "foo": "bar" });
        let action: JsonAction =
            create_action_with_payload_and_meta("action-type", payload.clone(), meta.clone());

        assert_eq!(action.shape(), ActionShape::WithPayloadAndMeta);
        assert_eq!(
            serde_json::to_value(&action).ok(),
            Some(json!({ "type": "action-type", "payload": payload, "meta": meta }))
        );
    }

    #[test]
    fn test_create_action_with_meta_only() {
        let action: Action<(), &str> = create_action_with_meta("tick", "trace-7");

        assert_eq!(action.shape(), ActionShape::WithMeta);
        assert_eq!(action.meta(), Some(&"trace-7"));
        assert_eq!(action.payload(), None);
    }

    #[test]
    fn test_from_parts_none_means_not_supplied() {
        let action: Action<u8, u8> = create_action_from_parts("noop", None, None);
        assert_eq!(action, create_action("noop"));
    }

    #[test]
    fn test_falsy_payload_is_still_supplied() {
        // Zero, false and empty values are legitimate payloads, not "missing".
        let action: Action<u32> = create_action_with_payload("set", 0);
        assert_eq!(action.shape(), ActionShape::WithPayload);

        let action: JsonAction = create_action_with_payload("set", json!(false));
        assert_eq!(
            serde_json::to_value(&action).ok(),
            Some(json!({ "type": "set", "payload": false }))
        );
    }

    #[test]
    fn test_empty_type_is_accepted() {
        let action: Action = create_action("");
        assert_eq!(action.tag(), Some(""));
    }

    #[test]
    fn test_structural_equality() {
        let a: JsonAction = create_action_with_payload("x", json!([1, 2]));
        let b: JsonAction = create_action_with_payload("x", json!([1, 2]));
        assert_eq!(a, b);
        assert_ne!(a, create_action("x"));
    }

    #[test]
    fn test_from_json_value() {
        let action = JsonAction::from_json_value(json!({ "type": "add", "payload": 3 }));
        assert!(matches!(action, Ok(ref a) if a.payload() == Some(&json!(3))));
    }

    #[test]
    fn test_from_json_null_payload_is_supplied() {
        let action = JsonAction::from_json_value(json!({ "type": "add", "payload": null }));
        assert!(matches!(action, Ok(ref a) if a.shape() == ActionShape::WithPayload));
        assert!(matches!(action, Ok(ref a) if a.payload() == Some(&serde_json::Value::Null)));
    }

    #[test]
    fn test_null_payload_and_meta_survive_serialization() {
        let action: JsonAction = create_action_with_payload_and_meta("x", json!(null), json!(null));
        let value = serde_json::to_value(&action).unwrap_or_default();
        assert_eq!(value, json!({ "type": "x", "payload": null, "meta": null }));

        let parsed = JsonAction::from_json_value(value).ok();
        assert_eq!(parsed, Some(action));
    }

    #[test]
    fn test_missing_keys_are_absent() {
        let action = JsonAction::from_json_value(json!({ "type": "add" }));
        assert!(matches!(action, Ok(ref a) if a.shape() == ActionShape::TypeOnly));

        let action = Action::<u32, String>::from_json_value(json!({ "type": "add", "meta": "m" }));
        assert!(matches!(action, Ok(ref a) if a.shape() == ActionShape::WithMeta));
    }

    #[test]
    fn test_from_json_missing_type() {
        let result = JsonAction::from_json_value(json!({ "payload": 3 }));
        assert!(matches!(result, Err(ActionError::MissingType)));

        let result = JsonAction::from_json_value(json!({ "type": 42 }));
        assert!(matches!(result, Err(ActionError::MissingType)));
    }

    #[test]
    fn test_from_json_str_malformed() {
        let result = JsonAction::from_json_str("{ not json");
        assert!(matches!(result, Err(ActionError::Malformed(_))));

        let result = Action::<u32, ()>::from_json_str(r#"{ "type": "add", "payload": "three" }"#);
        assert!(matches!(result, Err(ActionError::Malformed(_))));
    }

    #[test]
    fn test_json_value_tag() {
        assert_eq!(json!({ "type": "SOME_ACTION" }).tag(), Some("SOME_ACTION"));
        assert_eq!(json!({ "kind": "SOME_ACTION" }).tag(), None);
        assert_eq!(json!({ "type": 1 }).tag(), None);
        assert!(json!({ "type": "a" }).is_type("a"));
    }

    #[test]
    fn test_shape_keys() {
        assert_eq!(ActionShape::TypeOnly.keys(), &["type"]);
        assert_eq!(ActionShape::WithPayloadAndMeta.keys(), &["type", "payload", "meta"]);
    }
}
