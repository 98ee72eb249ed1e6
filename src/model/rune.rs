// src/model/rune.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rune {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    /// `"Keystone"` or `"Primary"`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rune {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Stand-in for a rune nobody has details for yet.
    pub fn placeholder(name: &str) -> Self {
        Self {
            name: s!(name),
            tree: Some(s!("Unknown")),
            kind: Some(s!("Primary")),
            description: Some(format!("Rune effect for {name}")),
            stats: Some(Map::new()),
            tier: Some(s!("A")),
            ..Default::default()
        }
    }

    /// True when the record still holds stand-in values.
    pub fn is_placeholder(&self) -> bool {
        let desc = self.description.as_deref().unwrap_or("");
        desc.is_empty()
            || desc.starts_with("Rune effect for")
            || self.tree.as_deref().is_none_or(|t| t.is_empty() || t == "Unknown")
    }
}
