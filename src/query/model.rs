//! Query document model
//!
//! The payload is opaque to the service: rules and responses are stored and
//! returned verbatim, never evaluated.

use serde::{Deserialize, Deserializer, Serialize};

/// A named, rule-based filter definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Server-generated identifier, assigned on creation
    #[serde(default)]
    pub query_id: String,

    /// Client-supplied name; also the store key suffix
    #[serde(default)]
    pub name: String,

    /// Logical operator combining `groups`
    #[serde(default)]
    pub combinator: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub groups: Vec<Group>,

    /// Response used when the query does not match
    #[serde(default, rename = "default")]
    pub default_response: Response,

    /// Response used when the query matches
    #[serde(default, rename = "match")]
    pub match_response: Response,
}

/// A set of rules joined by a combinator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub combinator: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub rules: Vec<Rule>,
}

/// A single filter condition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub parameter: String,
    #[serde(default)]
    pub value: String,
}

/// Output descriptor handed to whoever consumes the query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

/// Documents written by older producers carry `null` for empty sequences.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
