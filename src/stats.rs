// src/stats.rs
//! Closed taxonomy of relic stats and pieces.
//!
//! Every value the normalizer emits is a member of [`Stat`] or the
//! [`MainStat::Anything`] sentinel; the filter layer relies on that.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Hp,
    Atk,
    Def,
    HpPct,
    AtkPct,
    DefPct,
    EffectHitRate,
    EffectRes,
    OutgoingHealingBoost,
    CritRate,
    CritDmg,
    Spd,
    BreakEffect,
    EnergyRegenRate,
    PhysicalDmgBoost,
    FireDmgBoost,
    IceDmgBoost,
    WindDmgBoost,
    LightningDmgBoost,
    QuantumDmgBoost,
    ImaginaryDmgBoost,
}

use Stat::*;

pub const ALL_STATS: [Stat; 21] = [
    Hp, Atk, Def,
    HpPct, AtkPct, DefPct,
    EffectHitRate, EffectRes,
    OutgoingHealingBoost,
    CritRate, CritDmg,
    Spd, BreakEffect, EnergyRegenRate,
    PhysicalDmgBoost, FireDmgBoost, IceDmgBoost, WindDmgBoost,
    LightningDmgBoost, QuantumDmgBoost, ImaginaryDmgBoost,
];

/// Substats rollable on a relic piece. Flat HP/ATK/DEF never appear here.
pub const SUBSTATS: [Stat; 9] = [
    HpPct, AtkPct, DefPct,
    BreakEffect, EffectHitRate, EffectRes,
    CritRate, CritDmg, Spd,
];

impl Stat {
    pub fn name(self) -> &'static str {
        match self {
            Hp => "HP",
            Atk => "ATK",
            Def => "DEF",
            HpPct => "HP%",
            AtkPct => "ATK%",
            DefPct => "DEF%",
            EffectHitRate => "Effect Hit Rate",
            EffectRes => "Effect RES",
            OutgoingHealingBoost => "Outgoing Healing Boost",
            CritRate => "CRIT Rate",
            CritDmg => "CRIT DMG",
            Spd => "SPD",
            BreakEffect => "Break Effect",
            EnergyRegenRate => "Energy Regeneration Rate",
            PhysicalDmgBoost => "Physical DMG Boost",
            FireDmgBoost => "Fire DMG Boost",
            IceDmgBoost => "Ice DMG Boost",
            WindDmgBoost => "Wind DMG Boost",
            LightningDmgBoost => "Lightning DMG Boost",
            QuantumDmgBoost => "Quantum DMG Boost",
            ImaginaryDmgBoost => "Imaginary DMG Boost",
        }
    }

    /// Exact (case-insensitive) lookup by canonical name. No fuzzing here.
    pub fn from_name(s: &str) -> Option<Stat> {
        ALL_STATS.iter().copied().find(|st| st.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A main-stat cell: a taxonomy member, or the site's stat-agnostic tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MainStat {
    Anything,
    Stat(Stat),
}

pub const ANYTHING: &str = "Anything";

impl MainStat {
    pub fn name(self) -> &'static str {
        match self {
            MainStat::Anything => ANYTHING,
            MainStat::Stat(s) => s.name(),
        }
    }

    pub fn from_name(s: &str) -> Option<MainStat> {
        if s.eq_ignore_ascii_case(ANYTHING) {
            return Some(MainStat::Anything);
        }
        Stat::from_name(s).map(MainStat::Stat)
    }
}

impl fmt::Display for MainStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Piece {
    Head,
    Hands,
    Body,
    Feet,
    PlanarSphere,
    LinkRope,
}

use Piece::*;

pub const ALL_PIECES: [Piece; 6] = [Head, Hands, Body, Feet, PlanarSphere, LinkRope];

impl Piece {
    pub fn name(self) -> &'static str {
        match self {
            Head => "Head",
            Hands => "Hands",
            Body => "Body",
            Feet => "Feet",
            PlanarSphere => "Planar Sphere",
            LinkRope => "Link Rope",
        }
    }

    pub fn from_name(s: &str) -> Option<Piece> {
        ALL_PIECES.iter().copied().find(|p| p.name().eq_ignore_ascii_case(s))
    }

    /// The fixed pool of main stats this piece can roll.
    pub fn main_stats(self) -> &'static [Stat] {
        match self {
            Head => &[Hp],
            Hands => &[Atk],
            Body => &[HpPct, AtkPct, DefPct, EffectHitRate, OutgoingHealingBoost, CritRate, CritDmg],
            Feet => &[HpPct, AtkPct, DefPct, Spd],
            PlanarSphere => &[
                HpPct, AtkPct, DefPct,
                PhysicalDmgBoost, FireDmgBoost, IceDmgBoost, WindDmgBoost,
                LightningDmgBoost, QuantumDmgBoost, ImaginaryDmgBoost,
            ],
            LinkRope => &[HpPct, AtkPct, DefPct, BreakEffect, EnergyRegenRate],
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Main stats ever offered as free text: the union of the piece pools,
/// minus flat HP/ATK (piece-locked to Head/Hands, never typed out).
pub fn main_stat_candidates() -> Vec<Stat> {
    let mut out: Vec<Stat> = Vec::new();
    for piece in ALL_PIECES {
        for &st in piece.main_stats() {
            if st == Hp || st == Atk {
                continue;
            }
            if !out.contains(&st) {
                out.push(st);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_and_hands_are_piece_locked() {
        assert_eq!(Head.main_stats(), &[Hp]);
        assert_eq!(Hands.main_stats(), &[Atk]);
    }

    #[test]
    fn candidates_exclude_flat_hp_and_atk() {
        let cands = main_stat_candidates();
        assert!(!cands.contains(&Hp));
        assert!(!cands.contains(&Atk));
        assert!(cands.contains(&CritRate));
        assert!(cands.contains(&EnergyRegenRate));
        assert!(cands.contains(&ImaginaryDmgBoost));
    }

    #[test]
    fn substat_pool_excludes_flats() {
        assert!(!SUBSTATS.contains(&Hp));
        assert!(!SUBSTATS.contains(&Atk));
        assert!(!SUBSTATS.contains(&Def));
        assert!(SUBSTATS.contains(&EffectRes));
    }

    #[test]
    fn names_round_trip() {
        for st in ALL_STATS {
            assert_eq!(Stat::from_name(st.name()), Some(st));
        }
        for p in ALL_PIECES {
            assert_eq!(Piece::from_name(p.name()), Some(p));
        }
        assert_eq!(MainStat::from_name("anything"), Some(MainStat::Anything));
    }
}
