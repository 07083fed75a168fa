use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Reserved claim stamped into every issued token and required, with value
/// `true`, by every validation.
pub const ACCESS_CLAIM: &str = "access";

/// Reserved claim carrying the expiry as integer Unix seconds.
pub const EXPIRY_CLAIM: &str = "exp";

/// Canonical identity claim naming the subject the token was issued for.
pub const IDENTITY_CLAIM: &str = "id";

/// A single claim value: boolean, number, or string.
///
/// Claim matching is exact on both type and value, so the integer `1` and
/// the string `"1"` are different claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ClaimValue {
    /// Boolean value, if this is a boolean claim.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value, if this is an integer claim.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// String value, if this is a string claim.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A set of named claims, serialized as a flat JSON object.
///
/// Claim names are unique and order never matters. This is the payload of
/// issued tokens and also how callers state which claims a token must
/// carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: BTreeMap<String, ClaimValue>,
}

impl ClaimSet {
    /// Create an empty claim set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a claim, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Insert a claim, returning the previous value if the name was taken.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.claims.insert(name.into(), value.into())
    }

    /// Look up a claim by name.
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    /// String value of a claim (convenience method).
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ClaimValue::as_str)
    }

    /// Check whether a claim is present, regardless of value.
    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate over claims in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ClaimValue> {
        self.claims.iter()
    }

    /// Expiry claim as integer Unix seconds.
    ///
    /// None when the claim is absent or not an integer; both mean the token
    /// has no usable expiry.
    pub fn expiry(&self) -> Option<i64> {
        self.get(EXPIRY_CLAIM).and_then(ClaimValue::as_i64)
    }

    /// Identity claim value (convenience method).
    pub fn identity(&self) -> Option<&str> {
        self.get_str(IDENTITY_CLAIM)
    }
}
