//! XP-to-level computation and rank tiers.
//!
//! Levels are linear: every 100 XP is one level. Ranks are named bands of
//! levels used for display.

use serde::Serialize;

/// XP required to advance one level.
const XP_PER_LEVEL: i64 = 100;

/// A named rank band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    /// Lowest level in the band (inclusive).
    pub min_level: u32,
    /// Highest level in the band (inclusive).
    pub max_level: u32,
    /// Display title.
    pub title: &'static str,
    /// Icon asset path served by the frontend.
    pub icon: &'static str,
}

/// Rank bands, lowest first.
pub const RANKS: [Rank; 5] = [
    Rank {
        min_level: 1,
        max_level: 4,
        title: "Novato",
        icon: "/ranks/rank_novato.png",
    },
    Rank {
        min_level: 5,
        max_level: 9,
        title: "Aprendiz",
        icon: "/ranks/rank_aprendiz.png",
    },
    Rank {
        min_level: 10,
        max_level: 19,
        title: "Explorador",
        icon: "/ranks/rank_explorador.png",
    },
    Rank {
        min_level: 20,
        max_level: 49,
        title: "Mestre",
        icon: "/ranks/rank_mestre.png",
    },
    Rank {
        min_level: 50,
        max_level: 999,
        title: "Lenda",
        icon: "/ranks/rank_lenda.png",
    },
];

/// Derived level/rank information for a given XP total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelInfo {
    /// Current level (1-based).
    pub level: u32,
    /// Rank title for the current level.
    pub rank_title: &'static str,
    /// Rank icon for the current level.
    pub rank_icon: &'static str,
    /// XP accumulated within the current level.
    pub xp_current: i64,
    /// Total XP at which the next level is reached.
    pub xp_next_level: i64,
    /// Progress through the current level, 0–100.
    pub progress_percent: f64,
}

/// Compute level and rank information from an XP total.
pub fn level_info(xp: i64) -> LevelInfo {
    let xp = xp.max(0);
    let level = (1 + xp / XP_PER_LEVEL) as u32;
    let rank = RANKS
        .iter()
        .find(|r| level >= r.min_level && level <= r.max_level)
        .unwrap_or(&RANKS[RANKS.len() - 1]);

    let xp_current_level_start = (level as i64 - 1) * XP_PER_LEVEL;
    let xp_current = xp - xp_current_level_start;
    let progress_percent = ((xp_current as f64 / XP_PER_LEVEL as f64) * 100.0).clamp(0.0, 100.0);

    LevelInfo {
        level,
        rank_title: rank.title,
        rank_icon: rank.icon,
        xp_current,
        xp_next_level: level as i64 * XP_PER_LEVEL,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_xp_is_level_one_novato() {
        let info = level_info(0);
        assert_eq!(info.level, 1);
        assert_eq!(info.rank_title, "Novato");
        assert_eq!(info.xp_current, 0);
        assert_eq!(info.xp_next_level, 100);
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_info(99).level, 1);
        assert_eq!(level_info(100).level, 2);
        assert_eq!(level_info(450).level, 5);
        assert_eq!(level_info(450).rank_title, "Aprendiz");
    }

    #[test]
    fn test_progress_percent() {
        let info = level_info(150);
        assert_eq!(info.level, 2);
        assert_eq!(info.xp_current, 50);
        assert!((info.progress_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_high_level_is_lenda() {
        assert_eq!(level_info(10_000).rank_title, "Lenda");
    }

    #[test]
    fn test_negative_xp_clamped() {
        let info = level_info(-50);
        assert_eq!(info.level, 1);
        assert_eq!(info.xp_current, 0);
    }
}
