//! Animation module - timed match effects
//!
//! Match animations only track time; the tiles they cover carry their own
//! [`Fade`](crate::board::Fade). A match animation finishing is the signal to
//! collapse the board. Score popups are purely cosmetic.

use crate::board::{Board, FadeKind};
use crate::layout::Point;
use crate::types::{
    CLUSTER_MATCH_DURATION_MS, FLOWER_MATCH_DURATION_MS, LOCAL_SCORE_DURATION_MS,
    LOCAL_SCORE_RISE,
};

/// Fraction of `duration_ms` elapsed since `start_ms`, clamped to [0, 1].
pub fn progress(start_ms: u64, now_ms: u64, duration_ms: u32) -> f64 {
    let elapsed = now_ms.saturating_sub(start_ms) as f64;
    (elapsed / duration_ms as f64).clamp(0.0, 1.0)
}

pub fn fade_duration_ms(kind: FadeKind) -> u32 {
    match kind {
        FadeKind::Flower => FLOWER_MATCH_DURATION_MS,
        FadeKind::Cluster => CLUSTER_MATCH_DURATION_MS,
    }
}

/// Advance the fade of every matched tile.
pub fn update_fades(board: &mut Board, now_ms: u64) {
    for tile in board.tiles_mut() {
        let Some(fade) = tile.fade.as_mut() else {
            continue;
        };
        if fade.done {
            continue;
        }
        let p = progress(fade.start_ms, now_ms, fade_duration_ms(fade.kind));
        tile.alpha = 1.0 - p;
        if p >= 1.0 {
            fade.done = true;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowerMatchAnimation {
    pub in_progress: bool,
    pub start_ms: u64,
    /// Center of the flower's middle tile.
    pub center: Point,
}

impl FlowerMatchAnimation {
    pub fn new(center: Point, now_ms: u64) -> Self {
        Self {
            in_progress: true,
            start_ms: now_ms,
            center,
        }
    }

    /// Returns true on the tick the animation ends.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if !self.in_progress {
            return false;
        }
        if progress(self.start_ms, now_ms, FLOWER_MATCH_DURATION_MS) >= 1.0 {
            self.in_progress = false;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterMatchAnimation {
    pub in_progress: bool,
    pub start_ms: u64,
    /// Center of the cluster's bounding box.
    pub center: Point,
}

impl ClusterMatchAnimation {
    pub fn new(center: Point, now_ms: u64) -> Self {
        Self {
            in_progress: true,
            start_ms: now_ms,
            center,
        }
    }

    /// Returns true on the tick the animation ends.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if !self.in_progress {
            return false;
        }
        if progress(self.start_ms, now_ms, CLUSTER_MATCH_DURATION_MS) >= 1.0 {
            self.in_progress = false;
            return true;
        }
        false
    }
}

/// Floating score popup that rises and fades out
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalScoreAnimation {
    pub in_progress: bool,
    pub start_ms: u64,
    pub score: u32,
    pub alpha: f64,
    pub start_point: Point,
    pub current_point: Point,
}

impl LocalScoreAnimation {
    pub fn new(score: u32, at: Point, now_ms: u64) -> Self {
        Self {
            in_progress: true,
            start_ms: now_ms,
            score,
            alpha: 1.0,
            start_point: at,
            current_point: at,
        }
    }

    pub fn update(&mut self, now_ms: u64) {
        if !self.in_progress {
            return;
        }
        let p = progress(self.start_ms, now_ms, LOCAL_SCORE_DURATION_MS);
        self.alpha = 1.0 - p;
        self.current_point = Point::new(self.start_point.x, self.start_point.y - LOCAL_SCORE_RISE * p);
        if p >= 1.0 {
            self.in_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Fade;
    use crate::fixture::{board_from_grid, tricolor};
    use crate::hex::HexCoord;
    use crate::layout::Layout;

    #[test]
    fn test_progress_clamped() {
        assert_eq!(progress(100, 50, 300), 0.0);
        assert_eq!(progress(100, 250, 300), 0.5);
        assert_eq!(progress(100, 1_000, 300), 1.0);
    }

    #[test]
    fn test_fades_finish_with_their_animation() {
        let mut board = board_from_grid(&tricolor(), Layout::standard());
        let c = HexCoord::new(3, 3);
        board.tile_at_mut(c).fade = Some(Fade {
            kind: FadeKind::Cluster,
            start_ms: 0,
            done: false,
        });
        let mut anim = ClusterMatchAnimation::new(Point::default(), 0);

        update_fades(&mut board, 150);
        assert!(!anim.update(150));
        assert!((board.tile_at(c).alpha - 0.5).abs() < 1e-9);

        let end = CLUSTER_MATCH_DURATION_MS as u64;
        update_fades(&mut board, end);
        assert!(anim.update(end));
        assert!(board.tile_at(c).fade.is_some_and(|f| f.done));
        assert_eq!(board.tile_at(c).alpha, 0.0);

        // Completion is reported once.
        assert!(!anim.update(end + 16));
    }

    #[test]
    fn test_flower_outlasts_cluster() {
        let mut flower = FlowerMatchAnimation::new(Point::default(), 0);
        assert!(!flower.update(CLUSTER_MATCH_DURATION_MS as u64));
        assert!(flower.update(FLOWER_MATCH_DURATION_MS as u64));
    }

    #[test]
    fn test_score_popup_rises_and_fades() {
        let mut popup = LocalScoreAnimation::new(500, Point::new(10.0, 100.0), 0);
        popup.update(LOCAL_SCORE_DURATION_MS as u64 / 2);
        assert!(popup.in_progress);
        assert!((popup.current_point.y - (100.0 - LOCAL_SCORE_RISE / 2.0)).abs() < 1e-9);
        assert!((popup.alpha - 0.5).abs() < 1e-9);

        popup.update(LOCAL_SCORE_DURATION_MS as u64);
        assert!(!popup.in_progress);
        assert_eq!(popup.current_point.x, 10.0);
    }
}
