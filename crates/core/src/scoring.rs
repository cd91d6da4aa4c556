//! Scoring module - points for clusters and flowers
//!
//! Clusters pay `(size - 2) * base * level`. Flowers pay `level * 1000`,
//! scaled by the center tile and then by the ring.

use crate::board::Board;
use crate::hex::HexCoord;
use crate::types::{
    HexType, CLUSTER_BASE_BASIC, CLUSTER_BASE_BLACK_PEARL, CLUSTER_BASE_MULTIPLIER,
    CLUSTER_BASE_STARFLOWER, FLOWER_ALL_BLACK_PEARL_BONUS, FLOWER_ALL_STARFLOWER_BONUS,
    FLOWER_BASE,
};

/// What a flower's ring was made of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowerRing {
    /// Basic colors (multipliers allowed).
    Basic,
    AllStarflower,
    AllBlackPearl,
}

/// Flower score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowerScore {
    pub ring: FlowerRing,
    /// Multiplier tiles in the ring.
    pub multipliers: u32,
    pub total: u32,
}

/// Base points per tile of a cluster
pub fn cluster_base(kind: HexType, has_multiplier: bool) -> u32 {
    if kind.is_black_pearl() {
        CLUSTER_BASE_BLACK_PEARL
    } else if kind.is_starflower() {
        CLUSTER_BASE_STARFLOWER
    } else if has_multiplier {
        CLUSTER_BASE_MULTIPLIER
    } else {
        CLUSTER_BASE_BASIC
    }
}

/// Points for a cluster of `size` tiles
///
/// ```
/// use hexic_core::scoring::calculate_cluster_score;
/// use hexic_core::types::HexType;
///
/// assert_eq!(calculate_cluster_score(HexType::Green, false, 3, 1), 5);
/// assert_eq!(calculate_cluster_score(HexType::Green, false, 5, 2), 30);
/// assert_eq!(calculate_cluster_score(HexType::Starflower, false, 3, 1), 2500);
/// ```
pub fn calculate_cluster_score(kind: HexType, has_multiplier: bool, size: usize, level: u32) -> u32 {
    let extra = size.saturating_sub(2) as u32;
    extra
        .saturating_mul(cluster_base(kind, has_multiplier))
        .saturating_mul(level)
}

/// Points for the cluster at `coords`
pub fn cluster_score(board: &Board, coords: &[HexCoord], level: u32) -> u32 {
    let Some(&first) = coords.first() else {
        return 0;
    };
    let kind = board.tile_at(first).kind;
    let has_multiplier = coords.iter().any(|&c| board.tile_at(c).multiplier);
    calculate_cluster_score(kind, has_multiplier, coords.len(), level)
}

/// Points for a flower given its center and ring
pub fn calculate_flower_score(
    center: HexType,
    ring: FlowerRing,
    multipliers: u32,
    level: u32,
) -> u32 {
    let base = level.saturating_mul(FLOWER_BASE);
    let centered = if center.is_black_pearl() {
        base.saturating_mul(5) / 2
    } else if center.is_starflower() {
        base.saturating_mul(3) / 2
    } else {
        base
    };
    let bonus = match ring {
        FlowerRing::AllStarflower => FLOWER_ALL_STARFLOWER_BONUS,
        FlowerRing::AllBlackPearl => FLOWER_ALL_BLACK_PEARL_BONUS,
        FlowerRing::Basic => 1u32.checked_shl(multipliers).unwrap_or(u32::MAX),
    };
    centered.saturating_mul(bonus)
}

/// Score the flower at `coords` (center first, then the ring).
pub fn flower_score(board: &Board, coords: &[HexCoord], level: u32) -> FlowerScore {
    let center = board.tile_at(coords[0]).kind;
    let petals = &coords[1..];
    let all = |pred: fn(&HexType) -> bool| petals.iter().all(|&c| pred(&board.tile_at(c).kind));

    let ring = if all(HexType::is_starflower) {
        FlowerRing::AllStarflower
    } else if all(HexType::is_black_pearl) {
        FlowerRing::AllBlackPearl
    } else {
        FlowerRing::Basic
    };
    let multipliers = petals
        .iter()
        .filter(|&&c| board.tile_at(c).multiplier)
        .count() as u32;

    FlowerScore {
        ring,
        multipliers,
        total: calculate_flower_score(center, ring, multipliers, level),
    }
}
