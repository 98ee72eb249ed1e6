// tests/validators.rs
mod common;

use serde_json::json;
use tempfile::tempdir;
use wr_scrape::catalog::Catalog;
use wr_scrape::config::options::DataDirs;
use wr_scrape::validate::{self, crossref, descriptions, placeholder, schema, tips, Severity};

use common::write;

fn ahri(core: &[&str]) -> serde_json::Value {
    json!({
        "champion": {"name": "Ahri"},
        "stats": {"health": 590},
        "abilities": {"passive": "Essence Theft"},
        "builds": {
            "starting_items": ["Doran's Ring"],
            "core_items": core,
            "boots": [],
        },
    })
}

fn complete_item(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "stats": {"ability_power": {"value": 120, "type": "flat"}},
        "cost": 3600,
        "description": "Massive Ability Power with a passive that multiplies the rest of your AP.",
        "tips": ["Build it third"],
    })
}

#[test]
fn crossref_reports_one_warning_per_missing_item() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let items = dirs.items();
    write(&items.join("dorans_ring.json"), &complete_item("Doran's Ring"));
    write(&items.join("rabadons_deathcap.json"), &complete_item("Rabadon's Deathcap"));
    let champ = dirs.clean_champions().join("ahri.json");
    let dirs_list = [dirs.clean_champions()];
    let champion_dirs: Vec<&std::path::Path> = dirs_list.iter().map(|p| p.as_path()).collect();

    write(&champ, &ahri(&["Rabadon's Deathcap"]));
    let base = crossref::validate(&items, &champion_dirs).unwrap();
    assert_eq!(base.count(Severity::Warning), 0);
    assert!(base.passed());

    write(&champ, &ahri(&["Rabadon's Deathcap", "NonexistentItem9000"]));
    let report = crossref::validate(&items, &champion_dirs).unwrap();
    let warnings: Vec<_> = report.issues.iter().filter(|i| i.severity == Severity::Warning).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("NonexistentItem9000"));
    assert_eq!(warnings[0].subject, "Ahri");
    assert_eq!(report.issues.len(), base.issues.len() + 1);
    assert!(!report.passed());
}

#[test]
fn empty_categories_are_info_only() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    write(&dirs.clean_champions().join("ahri.json"), &ahri(&[]));
    let clean = dirs.clean_champions();
    let report = crossref::validate(&dirs.items(), &[clean.as_path()]).unwrap();
    assert_eq!(report.count(Severity::Info), 3);
    assert_eq!(report.count(Severity::Warning), 1); // Doran's Ring has no file
}

#[test]
fn filling_an_empty_category_with_a_missing_item_adds_one_issue() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let items = dirs.items();
    write(&items.join("dorans_ring.json"), &complete_item("Doran's Ring"));
    let champ = dirs.clean_champions().join("ahri.json");
    let clean = dirs.clean_champions();

    write(&champ, &ahri(&[]));
    let base = crossref::validate(&items, &[clean.as_path()]).unwrap();
    assert!(base.issues.is_empty());
    assert_eq!(base.count(Severity::Info), 3);

    write(&champ, &ahri(&["NonexistentItem9000"]));
    let report = crossref::validate(&items, &[clean.as_path()]).unwrap();
    assert_eq!(report.issues.len(), base.issues.len() + 1);
    assert_eq!(report.issues[0].severity, Severity::Warning);
    assert_eq!(report.count(Severity::Info), 2);
}

#[test]
fn crossref_checks_enchants_and_example_build() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let items = dirs.items();
    write(&items.join("dorans_ring.json"), &complete_item("Doran's Ring"));
    write(&items.join("rabadons_deathcap.json"), &complete_item("Rabadon's Deathcap"));
    write(&dirs.clean_champions().join("ahri.json"), &json!({
        "champion": {"name": "Ahri"},
        "builds": {
            "starting_items": ["Doran's Ring"],
            "core_items": ["Rabadon's Deathcap"],
            "enchants": ["Made Up Enchant"],
            "example_build": ["1. Rabadon's Deathcap", "2. Imaginary Blade (situational)"],
        },
    }));
    let clean = dirs.clean_champions();
    let report = crossref::validate(&items, &[clean.as_path()]).unwrap();
    let msgs: Vec<&str> = report.issues.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(msgs.len(), 2, "{msgs:?}");
    assert!(msgs[0].starts_with("enchants") && msgs[0].contains("Made Up Enchant"));
    assert!(msgs[1].starts_with("example_build") && msgs[1].contains("'Imaginary Blade'"));
}

#[test]
fn crossref_checks_lane_builds() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    let items = dirs.items();
    write(&items.join("rabadons_deathcap.json"), &complete_item("Rabadon's Deathcap"));
    write(&dirs.clean_champions().join("ahri.json"), &json!({
        "champion": {"name": "Ahri"},
        "builds": {
            "core_items": ["Rabadon's Deathcap"],
            "lane_specific": {
                "Mid Lane": {"core_items": ["Rabadon's Deathcap", "Lane Only Item"]},
            },
        },
    }));
    let clean = dirs.clean_champions();
    let report = crossref::validate(&items, &[clean.as_path()]).unwrap();
    assert_eq!(report.issues.len(), 1);
    assert!(report.issues[0].message.starts_with("Mid Lane core_items"));
}

#[test]
fn placeholder_report_is_deterministic() {
    let tmp = tempdir().unwrap();
    let items = tmp.path().join("items");
    write(&items.join("good.json"), &complete_item("Good Item"));
    write(&items.join("stub.json"), &json!({
        "name": "Stub",
        "stats": {},
        "cost": 0,
        "description": "Details for Stub",
    }));

    let a = placeholder::validate(&items, Catalog::get()).unwrap();
    let b = placeholder::validate(&items, Catalog::get()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.checked, 2);
    assert!(!a.passed());
    assert!(a.issues.iter().all(|i| i.subject == "Stub"));
    assert!((placeholder::completion_rate(&a) - 50.0).abs() < f64::EPSILON);
}

#[test]
fn clean_items_pass_every_item_check() {
    let tmp = tempdir().unwrap();
    let items = tmp.path().join("items");
    write(&items.join("good.json"), &complete_item("Good Item"));

    assert!(placeholder::validate(&items, Catalog::get()).unwrap().passed());
    assert!(tips::validate(&items).unwrap().passed());
    assert!(descriptions::validate(&items).unwrap().passed());
    assert!(schema::validate(&items, &[]).unwrap().passed());
}

#[test]
fn tips_and_descriptions_flag_gaps() {
    let tmp = tempdir().unwrap();
    let items = tmp.path().join("items");
    write(&items.join("a.json"), &json!({"name": "A", "description": "Cut off..."}));
    write(&items.join("b.json"), &json!({"name": "B", "description": "", "tips": []}));

    let t = tips::validate(&items).unwrap();
    assert_eq!(t.count(Severity::Warning), 2);
    assert_eq!(t.exit_code(), 1);

    let d = descriptions::validate(&items).unwrap();
    assert_eq!(d.count(Severity::Warning), 1);
    assert_eq!(d.count(Severity::Error), 1);
}

#[test]
fn broken_files_are_reported_not_fatal() {
    let tmp = tempdir().unwrap();
    let items = tmp.path().join("items");
    std::fs::create_dir_all(&items).unwrap();
    std::fs::write(items.join("broken.json"), "{ not json").unwrap();
    write(&items.join("good.json"), &complete_item("Good Item"));

    let r = schema::validate(&items, &[]).unwrap();
    assert_eq!(r.checked, 2);
    assert_eq!(r.count(Severity::Error), 1);
    assert_eq!(r.issues[0].file, "broken.json");
}

#[test]
fn run_all_covers_every_offline_check() {
    let tmp = tempdir().unwrap();
    let dirs = DataDirs::new(tmp.path());
    write(&dirs.items().join("good_item.json"), &complete_item("Good Item"));
    let reports = validate::run_all(&dirs, Catalog::get()).unwrap();
    assert_eq!(reports.len(), 5);
    assert!(reports.iter().all(|r| r.passed()));
}
