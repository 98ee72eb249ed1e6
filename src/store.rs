// src/store.rs
use std::{fs, path::{Path, PathBuf}};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::config::consts::INDEX_FILE;
use crate::core::sanitize::file_slug;
use crate::error::{Error, Result};
use crate::model::{Item, ItemIndex, ItemIndexEntry, Rune, RuneIndex, RuneIndexEntry};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| Error::json(path, e))
}

/// Two-space pretty JSON, non-ASCII left as is, trailing newline.
pub fn to_pretty<T: Serialize>(value: &T) -> std::result::Result<String, serde_json::Error> {
    let mut s = serde_json::to_string_pretty(value)?;
    s.push('\n');
    Ok(s)
}

/// Write `value` to `path` unless the file already holds exactly these bytes.
/// Returns whether anything was written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<bool> {
    let text = to_pretty(value).map_err(|e| Error::json(path, e))?;
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == text {
            return Ok(false);
        }
    }
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    fs::write(path, text).map_err(|e| Error::io(path, e))?;
    Ok(true)
}

/// Lay `updated` over `original`. Keys already in the file keep their place,
/// new keys go last. A key the update dropped is removed unless the file had
/// it as an explicit `null`. Nested objects merge the same way.
pub fn merge_over(original: &Map<String, Value>, mut updated: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, old) in original {
        match (updated.remove(key), old) {
            (Some(Value::Object(new)), Value::Object(old)) => {
                out.insert(key.clone(), Value::Object(merge_over(old, new)));
            }
            (Some(new), _) => {
                out.insert(key.clone(), new);
            }
            (None, Value::Null) => {
                out.insert(key.clone(), Value::Null);
            }
            (None, _) => {}
        }
    }
    out.extend(updated);
    out
}

/// Write a patched record back over the raw object it was read from, keeping
/// that file's key order and explicit nulls. Skips identical bytes like
/// [`write_json`].
pub fn write_record<T: Serialize>(path: &Path, original: &Map<String, Value>, record: &T) -> Result<bool> {
    match serde_json::to_value(record).map_err(|e| Error::json(path, e))? {
        Value::Object(updated) => write_json(path, &merge_over(original, updated)),
        other => write_json(path, &other),
    }
}

/// Like [`load_all`], keeping each file's raw object next to the typed record
/// so it can be handed to [`write_record`].
pub fn load_all_raw<T: DeserializeOwned>(dir: &Path) -> Result<Vec<(PathBuf, Result<(Map<String, Value>, T)>)>> {
    Ok(load_all::<Map<String, Value>>(dir)?
        .into_iter()
        .map(|(p, raw)| {
            let rec = raw.and_then(|raw| {
                let typed = serde_json::from_value::<T>(Value::Object(raw.clone())).map_err(|e| Error::json(&p, e))?;
                Ok((raw, typed))
            });
            (p, rec)
        })
        .collect())
}

/// Record files in `dir`, sorted, `index.json` excluded. A missing directory is empty.
pub fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let path = entry.map_err(|e| Error::io(dir, e))?.path();
        if !path.is_file() { continue; }
        if path.extension().and_then(|s| s.to_str()) != Some("json") { continue; }
        if path.file_name().and_then(|s| s.to_str()) == Some(INDEX_FILE) { continue; }
        out.push(path);
    }
    out.sort();
    Ok(out)
}

/// Load every record in `dir`. Per-file failures come back alongside the
/// successes so one bad file never stops a directory walk.
pub fn load_all<T: DeserializeOwned>(dir: &Path) -> Result<Vec<(PathBuf, Result<T>)>> {
    Ok(json_files(dir)?
        .into_iter()
        .map(|p| {
            let rec = read_json::<T>(&p);
            (p, rec)
        })
        .collect())
}

pub fn item_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", file_slug(name)))
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name().and_then(|s| s.to_str()).map(String::from).unwrap_or_default()
}

/// Rebuild `index.json` for an item directory from the files in it.
pub fn refresh_item_index(dir: &Path) -> Result<ItemIndex> {
    let mut index = ItemIndex::default();
    if !dir.exists() {
        return Ok(index);
    }
    for (path, rec) in load_all::<Item>(dir)? {
        match rec {
            Ok(item) if !item.name.is_empty() => {
                index.insert(item.name.clone(), ItemIndexEntry {
                    file: file_name_of(&path),
                    category: item.category.clone().unwrap_or_default(),
                    cost: item.cost_value().unwrap_or(0),
                    tier: item.tier.clone().unwrap_or_default(),
                });
            }
            Ok(_) => logw!("{}: record has no name, left out of the index", path.display()),
            Err(e) => loge!("{e}"),
        }
    }
    if write_json(&dir.join(INDEX_FILE), &index)? {
        logd!("{} items indexed in {}", index.total_items, dir.display());
    }
    Ok(index)
}

pub fn refresh_rune_index(dir: &Path) -> Result<RuneIndex> {
    let mut index = RuneIndex::default();
    if !dir.exists() {
        return Ok(index);
    }
    for (path, rec) in load_all::<Rune>(dir)? {
        match rec {
            Ok(rune) if !rune.name.is_empty() => {
                index.insert(rune.name.clone(), RuneIndexEntry {
                    file: file_name_of(&path),
                    tree: rune.tree.clone().unwrap_or_default(),
                    kind: rune.kind.clone().unwrap_or_default(),
                    tier: rune.tier.clone().unwrap_or_default(),
                });
            }
            Ok(_) => logw!("{}: record has no name, left out of the index", path.display()),
            Err(e) => loge!("{e}"),
        }
    }
    if write_json(&dir.join(INDEX_FILE), &index)? {
        logd!("{} runes indexed in {}", index.total_runes, dir.display());
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn merge_keeps_file_order_and_nulls() {
        let original = obj(json!({"b": 1, "gone": "x", "a": null, "stats": {"y": 1, "x": 2}}));
        let updated = obj(json!({"stats": {"x": 3, "y": 1}, "a2": true, "b": 2}));
        let out = merge_over(&original, updated);
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "stats", "a2"]);
        assert_eq!(out["b"], 2);
        assert!(out["a"].is_null());
        let stats: Vec<&str> = out["stats"].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(stats, ["y", "x"]);
        assert_eq!(out["stats"]["x"], 3);
    }
}
