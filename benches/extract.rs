// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use scraper::Html;

use wr_scrape::specs::{champion, item};

const NAMES: &[&str] = &[
    "Rabadon's Deathcap", "Infinity Edge", "Plated Steelcaps", "Trinity Force", "Guardian Angel",
    "Luden's Echo", "Frozen Heart", "Black Cleaver", "Thornmail", "Hullbreaker",
];

/// A synthetic items page: one container per item, repeated to page size.
fn items_page() -> String {
    let mut html = String::from("<html><body>");
    for round in 0..8 {
        for (i, name) in NAMES.iter().enumerate() {
            let cost = 2400 + (i as u32) * 100 + round;
            html.push_str(&format!(
                r#"<div class="item-container"><h3>{name}</h3><p>+{ap} Ability Power</p><p>+{hp} Health</p><p>{cost} gold</p><p>Passive: Gain {pct}% bonus damage.</p><div>Tips<ul><li>Build it early</li><li>Pairs well with haste</li></ul></div></div>"#,
                ap = 40 + i * 10,
                hp = 150 + i * 25,
                pct = 5 + i,
            ));
        }
    }
    html.push_str("</body></html>");
    html
}

const CHAMPION_PAGE: &str = r#"<html><head><title>Ahri - Wild Rift Build, Runes</title></head>
<body><article>
  <p>Ahri is a mobile mage for mid lane. Tier: S Win Rate: 52.3%</p>
  <p>Electrocute with Cheap Shot and Sudden Impact, then Font of Life.</p>
  <p>Start Doran's Ring, rush Luden's Echo then Rabadon's Deathcap. Boots: Ionian Boots of Lucidity.</p>
  <p>Spells: Flash and Ignite.</p>
</article></body></html>"#;

fn bench_extract(c: &mut Criterion) {
    let page = items_page();
    let doc = Html::parse_document(&page);

    c.bench_function("items_extract_all", |b| {
        b.iter(|| {
            let items = item::extract_all(black_box(&doc)).unwrap_or_default();
            black_box(items.len())
        })
    });

    c.bench_function("items_locate_one", |b| {
        b.iter(|| black_box(item::locate_item(black_box(&doc), "Hullbreaker").ok().flatten().is_some()))
    });

    c.bench_function("items_parse_and_extract", |b| {
        b.iter(|| {
            let doc = Html::parse_document(black_box(&page));
            black_box(item::extract_all(&doc).map(|v| v.len()).unwrap_or(0))
        })
    });

    c.bench_function("champion_parse", |b| {
        b.iter(|| {
            let c = champion::parse_champion(black_box(CHAMPION_PAGE), "https://wr-meta.com/1-ahri.html");
            black_box(c.map(|c| c.builds.all_item_names().len()).unwrap_or(0))
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
