// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-specific scraping specifications for the site. Each spec focuses on
//! a single page/endpoint and encodes *where the ground truth lives in the
//! HTML* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** for remote pages (character index, character
//!   build pages, the relic-set guide).
//! - **Selector choice & precedence** (e.g., the portrait is the third
//!   `<img>` inside a character link; set names come from `img` `alt`
//!   texts inside the build-relics widget).
//! - **Tolerant extraction** using `core::html` helpers (case-insensitive,
//!   nesting-aware block capture, tag stripping, entity/whitespace
//!   normalization).
//! - **Light shaping** into small "bundle" structs that the batch driver
//!   normalizes and persists.
//!
//! ## What does **not** live here
//! - **Stat normalization**: `normalize` owns the taxonomy mapping; specs
//!   hand it raw label text.
//! - **Caching/persistence** (`store`): handled by `scrape::collect_*`.
//! - **GUI concerns, filtering, or export formatting.**
//!
//! ## Typical call chain
//! ```text
//! GUI / CLI → scrape::collect_* → specs::<page>::fetch*()
//!                              ↘  returns bundle(s)
//!                  store::save_dataset (outside of specs)
//! ```
//!
//! ## Testing notes
//! - Specs are testable **offline** against synthetic HTML snippets.
//! - Selectors stay resilient to whitespace, attribute order, and harmless
//!   markup noise.
pub mod character;
pub mod relic_sets;
pub mod roster;
