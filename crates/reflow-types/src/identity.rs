use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable, caller-assigned identity of a section or item.
///
/// Identity is the only signal used to match elements across two snapshots.
/// It must be unique among siblings at diff time; duplicates produce an
/// unspecified (but deterministic) matching.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Create an identity from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, time-ordered identity (UUID v7).
    ///
    /// Used for sections created without an explicit id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identity and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelId({})", self.0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ModelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// An identity-bearing element that can be diffed.
///
/// The differ never inspects payload fields. The only content question it
/// asks is [`is_changed_from`](Model::is_changed_from), and only for an
/// element that kept its relative position; a `true` answer turns the
/// retained element into a `Replace` edit.
pub trait Model {
    /// The element's identity.
    fn model_id(&self) -> &ModelId;

    /// Change-detection hook. Returns `true` if this element should be
    /// re-rendered in place compared to `previous` (same identity).
    ///
    /// The default reports no change, so retained elements never produce
    /// `Replace` edits unless the caller opts in.
    fn is_changed_from(&self, previous: &Self) -> bool {
        let _ = previous;
        false
    }
}

impl Model for ModelId {
    fn model_id(&self) -> &ModelId {
        self
    }
}
