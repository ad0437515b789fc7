// src/config/consts.rs

// Net config
pub const HOST: &str = "www.prydwen.gg";
pub const SITE_ROOT: &str = "https://www.prydwen.gg";
pub const CHARACTER_INDEX_PATH: &str = "/star-rail/tier-list";
pub const CHARACTER_PAGE_PREFIX: &str = "/star-rail/characters/";
pub const RELIC_SETS_PATH: &str = "/star-rail/guides/relic-sets";

// Local store
pub const TABLES_DIR: &str = "tables";
pub const STORE_SEP: char = ',';

// Stat label matching. Labels are near-exact widget text; anything scoring
// below this against every candidate carries no usable stat.
pub const MAIN_STAT_CUTOFF: f64 = 0.4;

// Filter advisories
pub const SUBSTAT_SOFT_CAP: usize = 4;

// Concurrency
pub const WORKERS: usize = 2;
pub const REQUEST_PAUSE_MS: u64 = 2000; // be polite
pub const JITTER_MS: u64 = 250; // extra 0..250 ms

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_RESULTS_STEM: &str = "matches";
