// src/model/champion.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Item, Rune};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    #[serde(default)]
    pub champion: ChampionInfo,
    #[serde(default)]
    pub stats: Map<String, Value>,
    #[serde(default)]
    pub abilities: Value,
    #[serde(default)]
    pub builds: Builds,
    #[serde(default)]
    pub runes: RunePage,
    #[serde(default)]
    pub summoner_spells: Vec<String>,
    #[serde(default)]
    pub counters: Counters,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChampionInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub lanes: Vec<String>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub splash_art: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The build categories that hold item names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildCategory {
    Starting,
    Core,
    Boots,
    Situational,
}

impl BuildCategory {
    pub const ALL: [BuildCategory; 4] = [Self::Starting, Self::Core, Self::Boots, Self::Situational];

    pub fn key(self) -> &'static str {
        match self {
            Self::Starting => "starting_items",
            Self::Core => "core_items",
            Self::Boots => "boots",
            Self::Situational => "situational_items",
        }
    }

    pub fn detailed_key(self) -> &'static str {
        match self {
            Self::Starting => "starting_items_detailed",
            Self::Core => "core_items_detailed",
            Self::Boots => "boots_detailed",
            Self::Situational => "situational_items_detailed",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Builds {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lanes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situational_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_build: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchants: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_items_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_items_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boots_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situational_items_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchants_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_build_detailed: Option<Vec<Item>>,
    /// Per-lane builds keyed by lane name, when the page splits them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_specific: Option<BTreeMap<String, LaneBuild>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One lane's build. Same categories as [`Builds`], without the optional
/// wrapping: a lane section either lists items for a category or it does not.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneBuild {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starting_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boots: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub situational_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_build: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enchants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_items_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_items_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boots_detailed: Option<Vec<Item>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situational_items_detailed: Option<Vec<Item>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LaneBuild {
    pub fn list(&self, cat: BuildCategory) -> &Vec<String> {
        match cat {
            BuildCategory::Starting => &self.starting_items,
            BuildCategory::Core => &self.core_items,
            BuildCategory::Boots => &self.boots,
            BuildCategory::Situational => &self.situational_items,
        }
    }

    pub fn detailed_mut(&mut self, cat: BuildCategory) -> &mut Option<Vec<Item>> {
        match cat {
            BuildCategory::Starting => &mut self.starting_items_detailed,
            BuildCategory::Core => &mut self.core_items_detailed,
            BuildCategory::Boots => &mut self.boots_detailed,
            BuildCategory::Situational => &mut self.situational_items_detailed,
        }
    }

    pub fn is_empty(&self) -> bool {
        BuildCategory::ALL.iter().all(|c| self.list(*c).is_empty())
            && self.example_build.is_empty()
            && self.enchants.is_empty()
    }

    /// Every list with its key, category lists first.
    pub fn named_lists(&self) -> [(&'static str, &Vec<String>); 6] {
        [
            ("starting_items", &self.starting_items),
            ("core_items", &self.core_items),
            ("boots", &self.boots),
            ("situational_items", &self.situational_items),
            ("enchants", &self.enchants),
            ("example_build", &self.example_build),
        ]
    }
}

/// Category-by-category difference between two lanes' builds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaneDifference {
    pub category: &'static str,
    /// Lane name to that lane's list for this category.
    pub lanes: BTreeMap<String, Vec<String>>,
}

/// Categories whose item lists differ between any of the lanes, in category
/// order. Empty when every lane builds the same.
pub fn compare_lane_builds(lanes: &BTreeMap<String, LaneBuild>) -> Vec<LaneDifference> {
    let keys = ["starting_items", "core_items", "boots", "situational_items", "example_build"];
    let mut out = Vec::new();
    for key in keys {
        let per_lane: BTreeMap<String, Vec<String>> = lanes
            .iter()
            .map(|(lane, b)| {
                let list = b.named_lists().into_iter().find(|(k, _)| *k == key).map(|(_, l)| l.clone());
                (lane.clone(), list.unwrap_or_default())
            })
            .collect();
        let mut lists = per_lane.values();
        let first = lists.next();
        if lists.any(|l| Some(l) != first) {
            out.push(LaneDifference { category: key, lanes: per_lane });
        }
    }
    out
}

impl Builds {
    pub fn list(&self, cat: BuildCategory) -> Option<&Vec<String>> {
        match cat {
            BuildCategory::Starting => self.starting_items.as_ref(),
            BuildCategory::Core => self.core_items.as_ref(),
            BuildCategory::Boots => self.boots.as_ref(),
            BuildCategory::Situational => self.situational_items.as_ref(),
        }
    }

    pub fn list_mut(&mut self, cat: BuildCategory) -> &mut Option<Vec<String>> {
        match cat {
            BuildCategory::Starting => &mut self.starting_items,
            BuildCategory::Core => &mut self.core_items,
            BuildCategory::Boots => &mut self.boots,
            BuildCategory::Situational => &mut self.situational_items,
        }
    }

    pub fn detailed(&self, cat: BuildCategory) -> Option<&Vec<Item>> {
        match cat {
            BuildCategory::Starting => self.starting_items_detailed.as_ref(),
            BuildCategory::Core => self.core_items_detailed.as_ref(),
            BuildCategory::Boots => self.boots_detailed.as_ref(),
            BuildCategory::Situational => self.situational_items_detailed.as_ref(),
        }
    }

    pub fn detailed_mut(&mut self, cat: BuildCategory) -> &mut Option<Vec<Item>> {
        match cat {
            BuildCategory::Starting => &mut self.starting_items_detailed,
            BuildCategory::Core => &mut self.core_items_detailed,
            BuildCategory::Boots => &mut self.boots_detailed,
            BuildCategory::Situational => &mut self.situational_items_detailed,
        }
    }

    /// Every item name across the item categories, enchants and the example
    /// build, deduplicated, first occurrence order.
    pub fn all_item_names(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let lists = BuildCategory::ALL
            .iter()
            .filter_map(|c| self.list(*c))
            .chain(self.enchants.as_ref())
            .chain(self.example_build.as_ref());
        for list in lists {
            for name in list {
                if !name.is_empty() && !out.contains(name) {
                    out.push(name.clone());
                }
            }
        }
        out
    }

    /// Every named list with its key, including enchants and the example
    /// build. Absent lists come through as `None`.
    pub fn named_lists(&self) -> [(&'static str, Option<&Vec<String>>); 6] {
        [
            ("starting_items", self.starting_items.as_ref()),
            ("core_items", self.core_items.as_ref()),
            ("boots", self.boots.as_ref()),
            ("situational_items", self.situational_items.as_ref()),
            ("enchants", self.enchants.as_ref()),
            ("example_build", self.example_build.as_ref()),
        ]
    }

    /// Item names that only the per-lane builds mention, first occurrence order.
    pub fn lane_item_names(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for lane in self.lane_specific.iter().flat_map(|m| m.values()) {
            for (_, list) in lane.named_lists() {
                for name in list {
                    if !name.is_empty() && !out.contains(name) {
                        out.push(name.clone());
                    }
                }
            }
        }
        out
    }

    /// Every detailed item record, category lists first, lane lists last.
    pub fn all_detailed(&self) -> impl Iterator<Item = &Item> {
        let lanes = self.lane_specific.iter().flat_map(|m| m.values()).flat_map(|l| {
            [
                &l.starting_items_detailed,
                &l.core_items_detailed,
                &l.boots_detailed,
                &l.situational_items_detailed,
            ]
        });
        BuildCategory::ALL
            .into_iter()
            .filter_map(move |c| self.detailed(c))
            .chain(self.enchants_detailed.as_ref())
            .chain(self.example_build_detailed.as_ref())
            .chain(lanes.filter_map(Option::as_ref))
            .flatten()
    }

    /// Drop all `_detailed` siblings, the per-lane ones included.
    pub fn strip_detailed(&mut self) {
        for cat in BuildCategory::ALL {
            *self.detailed_mut(cat) = None;
        }
        self.enchants_detailed = None;
        self.example_build_detailed = None;
        for lane in self.lane_specific.iter_mut().flat_map(|m| m.values_mut()) {
            for cat in BuildCategory::ALL {
                *lane.detailed_mut(cat) = None;
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunePage {
    #[serde(default)]
    pub primary: PrimaryRunes,
    #[serde(default)]
    pub secondary: SecondaryRunes,
    #[serde(default)]
    pub stat_shards: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRunes {
    #[serde(default)]
    pub tree: String,
    #[serde(default)]
    pub keystone: String,
    #[serde(default)]
    pub runes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystone_detailed: Option<Rune>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runes_detailed: Option<Vec<Rune>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryRunes {
    #[serde(default)]
    pub tree: String,
    #[serde(default)]
    pub runes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runes_detailed: Option<Vec<Rune>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RunePage {
    /// Keystone first, then primary runes, then secondary runes.
    pub fn all_rune_names(&self) -> Vec<String> {
        std::iter::once(&self.primary.keystone)
            .chain(self.primary.runes.iter())
            .chain(self.secondary.runes.iter())
            .filter(|n| !n.is_empty())
            .cloned()
            .collect()
    }

    /// Every detailed rune record attached to this page.
    pub fn detailed(&self) -> Vec<&Rune> {
        self.primary.keystone_detailed.iter()
            .chain(self.primary.runes_detailed.iter().flatten())
            .chain(self.secondary.runes_detailed.iter().flatten())
            .collect()
    }

    pub fn strip_detailed(&mut self) {
        self.primary.keystone_detailed = None;
        self.primary.runes_detailed = None;
        self.secondary.runes_detailed = None;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    #[serde(default)]
    pub strong_against: Vec<String>,
    #[serde(default)]
    pub weak_against: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub win_rate: String,
    #[serde(default)]
    pub pick_rate: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
