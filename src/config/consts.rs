// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://wr-meta.com";
pub const ITEMS_PATH: &str = "/items";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const HEAD_TIMEOUT_SECS: u64 = 5;

/// Index pages crawled for champion links, relative to `BASE_URL`.
pub const DISCOVERY_PATHS: &[&str] = &[
    "/", "/meta/", "/fighters/", "/assassins/", "/mages/", "/marksmans/", "/supports/", "/tanks/",
];

// Politeness
pub const REQUEST_PAUSE_MS: u64 = 1000;
pub const CHAMPION_PAUSE_MS: u64 = 1500;
pub const ITEM_PAUSE_MS: u64 = 500;

// Retry
pub const MAX_CHAMPION_RETRIES: usize = 3;
pub const RETRY_PAUSE_MS: u64 = 3000;
pub const MAX_ITEM_RETRIES: usize = 2;
pub const ITEM_RETRY_BASE_MS: u64 = 1000;

// URL discovery
pub const BRUTE_FORCE_MAX_ID: u32 = 600;
pub const VALIDATE_SAMPLE: usize = 20;

// Local layout
pub const ITEMS_DIR: &str = "items";
pub const RUNES_DIR: &str = "runes";
pub const CHAMPIONS_DIR: &str = "scraped_champions";
pub const CLEAN_CHAMPIONS_DIR: &str = "champions_clean";
pub const LOGS_DIR: &str = "logs";
pub const INDEX_FILE: &str = "index.json";
pub const MASTER_FILE: &str = "all_champions_data.json";
pub const CHAMPION_LIST_FILE: &str = "champion_list.json";
pub const DISCOVERED_URLS_FILE: &str = "discovered_champion_urls.json";
pub const URL_MAPPING_FILE: &str = "champion_url_mapping.json";
pub const FAILED_ITEMS_LOG: &str = "failed_items.log";
pub const ERROR_REPORT_FILE: &str = "error_report.json";

// Patch/validate thresholds
pub const MIN_DESCRIPTION_LEN: usize = 100;
pub const MIN_REAL_DESCRIPTION_LEN: usize = 20;
pub const MAX_TIPS: usize = 5;
/// Items kept per category in one lane's build.
pub const MAX_LANE_CATEGORY_ITEMS: usize = 8;
pub const GENERIC_DESCRIPTION: &str = "Wild Rift item with real stats and effects from wr-meta.com";

// Concurrency
pub const WORKERS: usize = 1;
