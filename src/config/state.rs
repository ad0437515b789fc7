// src/config/state.rs
use std::collections::BTreeSet;

use super::options::AppOptions;
use crate::stats::{MainStat, Piece, Stat};

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Skip the relic-set predicate entirely.
    pub ignore_sets: bool,
    /// Selected relic set name (left panel). None until the user picks one.
    pub selected_set: Option<String>,
    /// None = any piece.
    pub piece: Option<Piece>,
    pub main_stat: MainStat,

    pub filter_by_substats: bool,
    pub substats: BTreeSet<Stat>,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            ignore_sets: false,
            selected_set: None,
            piece: None,
            main_stat: MainStat::Anything,
            filter_by_substats: false,
            substats: BTreeSet::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
