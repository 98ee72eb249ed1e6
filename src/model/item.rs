// src/model/item.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::sanitize::first_int;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Flat,
    Percentage,
}

/// One stat line, `{"value": 100, "type": "flat"}`.
/// `Number` keeps integers as integers on rewrite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: Number,
    #[serde(rename = "type")]
    pub kind: StatKind,
}

impl Stat {
    pub fn flat(value: u64) -> Self {
        Self { value: value.into(), kind: StatKind::Flat }
    }
    pub fn percentage(value: u64) -> Self {
        Self { value: value.into(), kind: StatKind::Percentage }
    }
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub name: String,
    /// Stat name → stat. Kept as raw JSON so malformed entries load and can be reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Cost as an integer. Accepts numbers and strings like `"3400 gold"`.
    pub fn cost_value(&self) -> Option<u64> {
        match self.cost.as_ref()? {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
            Value::String(s) => first_int(s),
            _ => None,
        }
    }

    pub fn set_cost(&mut self, cost: u64) {
        self.cost = Some(Value::from(cost));
    }

    pub fn stat(&self, key: &str) -> Option<Stat> {
        let v = self.stats.as_ref()?.get(key)?;
        serde_json::from_value(v.clone()).ok()
    }

    pub fn set_stat(&mut self, key: &str, stat: Stat) {
        self.stats.get_or_insert_with(Map::new).insert(s!(key), stat.to_value());
    }

    pub fn has_stats(&self) -> bool {
        self.stats.as_ref().is_some_and(|m| !m.is_empty())
    }

    pub fn description_str(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn passive_str(&self) -> &str {
        self.passive.as_deref().unwrap_or("")
    }

    pub fn has_tips(&self) -> bool {
        self.tips.as_ref().is_some_and(|t| !t.is_empty())
    }
}
