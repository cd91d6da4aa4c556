//! Game state module - the turn resolver
//!
//! Ties together board, cursor, rotation, gravity, and match animations.
//! The integrating application calls [`GameState::update`] once per frame
//! with the elapsed time and that frame's input; everything else follows from
//! there:
//!
//! 1. consume input (gated while the board is busy)
//! 2. advance the rotation
//! 3. advance match animations, tile fades, and score popups
//! 4. advance gravity
//! 5. resolve matches after a rotation step or a landing
//! 6. collapse the board when a match animation ends
//! 7. reset per-tick scratch storage

use tracing::{debug, error, info};

use crate::animation::{
    update_fades, ClusterMatchAnimation, FlowerMatchAnimation, LocalScoreAnimation,
};
use crate::board::{Board, Fade, FadeKind};
use crate::cursor::Cursor;
use crate::gravity::update_gravity;
use crate::hex::HexCoord;
use crate::layout::Layout;
use crate::matching::{find_one_flower, find_one_simple_cluster, has_cluster_match, has_flower_match};
use crate::rng::SimpleRng;
use crate::rotation::RotationAnimation;
use crate::scoring::{cluster_score, flower_score, FlowerRing};
use crate::scratch::ScratchArena;
use crate::snapshot::{board_hash, CursorSnapshot, GameSnapshot, TileView};
use crate::types::{
    GameAction, HexDirection, HexType, InputFrame, Spin, BLACK_PEARL_TYPE_MASK, GRAVITY_DROP_IN,
    GRAVITY_STEADY, INITIAL_COMBOS, MAX_BOARD_REROLLS, MAX_RESOLVE_ITERATIONS, NUM_COLUMNS,
    NUM_ROWS,
};

/// Something the integrating application may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ClusterResolved {
        kind: HexType,
        size: usize,
        score: u32,
    },
    FlowerResolved {
        center: HexCoord,
        /// Type the center tile was given.
        created: HexType,
        score: u32,
    },
    /// A cluster of black pearls was cleared.
    BlackPearlCluster { size: usize, score: u32 },
    /// A ring of black pearls closed around a tile.
    BlackPearlFlower { center: HexCoord, score: u32 },
    /// The combo counter just reached zero.
    CombosExhausted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    cursor: Cursor,
    rng: SimpleRng,
    seed: u32,
    level: u32,
    score: u32,
    combos_remaining: u32,
    gravity: f64,
    /// Simulation clock, advanced by `update`.
    now_ms: u64,
    ticks: u64,
    rotation: RotationAnimation,
    flower_animations: Vec<FlowerMatchAnimation>,
    cluster_animations: Vec<ClusterMatchAnimation>,
    score_animations: Vec<LocalScoreAnimation>,
    events: Vec<GameEvent>,
    scratch: ScratchArena,
    /// Find-one/handle-one passes allowed per resolution loop.
    resolve_limit: usize,
}

impl GameState {
    /// Create a new game with every tile dropping in from above the board.
    ///
    /// The opening board never contains a match.
    pub fn new(seed: u32, level: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut board = Board::new(Layout::standard());
        board.fill(&mut rng, level, 0);
        let mut state = Self::with_board(board, rng, seed, level);
        state.reroll_opening_matches();
        state
    }

    /// Start from an existing board (typically a fixture).
    ///
    /// Matches already on the board are left for the first landing or
    /// rotation to resolve.
    pub fn from_board(board: Board, level: u32, seed: u32) -> Self {
        Self::with_board(board, SimpleRng::new(seed), seed, level)
    }

    fn with_board(board: Board, rng: SimpleRng, seed: u32, level: u32) -> Self {
        Self {
            board,
            cursor: Cursor::new(),
            rng,
            seed,
            level,
            score: 0,
            combos_remaining: INITIAL_COMBOS,
            gravity: GRAVITY_DROP_IN,
            now_ms: 0,
            ticks: 0,
            rotation: RotationAnimation::new(),
            flower_animations: Vec::with_capacity(8),
            cluster_animations: Vec::with_capacity(16),
            score_animations: Vec::with_capacity(16),
            events: Vec::with_capacity(16),
            scratch: ScratchArena::new(),
            resolve_limit: MAX_RESOLVE_ITERATIONS,
        }
    }

    fn reroll_opening_matches(&mut self) {
        for pass in 0..MAX_BOARD_REROLLS {
            let mut rerolled = 0;
            for coord in HexCoord::all_valid() {
                let target = if has_cluster_match(&self.board, coord, false).is_some() {
                    coord
                } else if has_flower_match(&self.board, coord, false) {
                    coord.neighbor(HexDirection::Top)
                } else {
                    continue;
                };
                let (kind, multiplier) = Board::random_face(&mut self.rng, self.level);
                self.board.tile_at_mut(target).set_face(kind, multiplier);
                rerolled += 1;
            }
            if rerolled == 0 {
                debug!(passes = pass, "opening board is match free");
                return;
            }
        }
        self.fatal("opening board still has matches after rerolling");
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combos_remaining(&self) -> u32 {
        self.combos_remaining
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get mutable board reference (for testing)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn rotation(&self) -> &RotationAnimation {
        &self.rotation
    }

    pub fn flower_animations(&self) -> &[FlowerMatchAnimation] {
        &self.flower_animations
    }

    pub fn cluster_animations(&self) -> &[ClusterMatchAnimation] {
        &self.cluster_animations
    }

    pub fn score_animations(&self) -> &[LocalScoreAnimation] {
        &self.score_animations
    }

    /// Drain the events raised since the last call.
    pub fn take_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn match_animating(&self) -> bool {
        !self.flower_animations.is_empty() || !self.cluster_animations.is_empty()
    }

    /// Whether cursor moves are accepted right now
    pub fn can_move_cursor(&self) -> bool {
        !self.rotation.in_progress && !self.match_animating()
    }

    /// Whether a rotation may start right now
    pub fn can_rotate(&self) -> bool {
        self.can_move_cursor() && !self.board.any_falling()
    }

    /// Nothing is moving, rotating, or fading
    pub fn is_quiescent(&self) -> bool {
        !self.rotation.in_progress && !self.match_animating() && self.board.is_settled()
    }

    /// Apply one action immediately. Returns whether it had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::PrintBoard => {
                info!("{}\n{}", self.cursor.describe(), self.board);
                true
            }
            action @ (GameAction::MoveUp
            | GameAction::MoveDown
            | GameAction::MoveLeft
            | GameAction::MoveRight) => {
                if !self.can_move_cursor() {
                    return false;
                }
                let board = &self.board;
                match action {
                    GameAction::MoveUp => self.cursor.move_up(board),
                    GameAction::MoveDown => self.cursor.move_down(board),
                    GameAction::MoveLeft => self.cursor.move_left(board),
                    _ => self.cursor.move_right(board),
                }
            }
            GameAction::RotateCw => self.try_rotate(Spin::Clockwise),
            GameAction::RotateCcw => self.try_rotate(Spin::CounterClockwise),
        }
    }

    fn try_rotate(&mut self, spin: Spin) -> bool {
        if !self.can_rotate() {
            return false;
        }
        let Some(selection) = self.cursor.selection(&self.board) else {
            return false;
        };
        let center = self.cursor.screen_point(self.board.layout());
        self.rotation.start(&selection, spin, center, self.now_ms);
        debug!(?spin, tiles = selection.tiles.len(), "rotation started");
        true
    }

    /// Advance the game by `elapsed_ms` with no input.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.update(elapsed_ms, &InputFrame::default());
    }

    /// Advance the game by `elapsed_ms`, consuming this frame's input.
    pub fn update(&mut self, elapsed_ms: u32, input: &InputFrame) {
        self.now_ms += elapsed_ms as u64;
        self.ticks += 1;
        let now = self.now_ms;

        for action in input.actions() {
            self.apply_action(action);
        }

        let rotation_done = self.rotation.update(&mut self.board, now);

        update_fades(&mut self.board, now);
        let mut match_done = false;
        for anim in &mut self.flower_animations {
            match_done |= anim.update(now);
        }
        for anim in &mut self.cluster_animations {
            match_done |= anim.update(now);
        }
        self.flower_animations.retain(|a| a.in_progress);
        self.cluster_animations.retain(|a| a.in_progress);
        for popup in &mut self.score_animations {
            popup.update(now);
        }
        self.score_animations.retain(|a| a.in_progress);

        let gravity = update_gravity(&mut self.board, self.gravity, now, elapsed_ms as f64);

        if rotation_done || gravity.landed > 0 {
            let matched = self.resolve_matches();
            if rotation_done {
                self.rotation.finish_step(matched, now);
            }
        }

        if match_done {
            let mut replaced = 0;
            for q in 0..NUM_COLUMNS {
                replaced += self.board.collapse_column(q, &mut self.rng, self.level, now);
            }
            // Refills drop in fast, like the opening board.
            if replaced > 0 {
                self.gravity = GRAVITY_DROP_IN;
            }
        }

        if self.gravity != GRAVITY_STEADY && self.is_quiescent() {
            self.gravity = GRAVITY_STEADY;
        }

        self.scratch.reset();
    }

    /// Resolve every match on the board: flowers first, then clusters.
    ///
    /// Returns whether anything matched.
    fn resolve_matches(&mut self) -> bool {
        let mut found = std::mem::take(&mut self.scratch.matched);
        let mut matched = false;

        let mut iterations = 0;
        while find_one_flower(&self.board, &mut found, true) > 0 {
            iterations += 1;
            if iterations > self.resolve_limit {
                self.fatal("flower resolution did not converge");
            }
            self.handle_flower(&found);
            matched = true;
        }

        // Bomb and mixed-multiplier clusters would slot in here.

        iterations = 0;
        while find_one_simple_cluster(&self.board, &mut self.scratch, &mut found, true) > 0 {
            iterations += 1;
            if iterations > self.resolve_limit {
                self.fatal("cluster resolution did not converge");
            }
            self.handle_cluster(&found);
            matched = true;
        }

        self.board.clear_match_flags();
        found.clear();
        self.scratch.matched = found;
        matched
    }

    fn handle_flower(&mut self, coords: &[HexCoord]) {
        let now = self.now_ms;
        let center = coords[0];
        let scored = flower_score(&self.board, coords, self.level);

        for &c in coords {
            let tile = self.board.tile_at_mut(c);
            tile.is_matched = true;
            tile.is_flower_matched = true;
        }
        for &c in &coords[1..] {
            let tile = self.board.tile_at_mut(c);
            tile.respawn = true;
            tile.fade = Some(Fade {
                kind: FadeKind::Flower,
                start_ms: now,
                done: false,
            });
        }

        let event = match scored.ring {
            FlowerRing::AllBlackPearl => GameEvent::BlackPearlFlower {
                center,
                score: scored.total,
            },
            FlowerRing::AllStarflower => {
                let pearl = Board::random_type_with_mask(&mut self.rng, BLACK_PEARL_TYPE_MASK);
                self.board.tile_at_mut(center).set_face(pearl, false);
                GameEvent::FlowerResolved {
                    center,
                    created: pearl,
                    score: scored.total,
                }
            }
            FlowerRing::Basic => {
                self.board
                    .tile_at_mut(center)
                    .set_face(HexType::Starflower, false);
                GameEvent::FlowerResolved {
                    center,
                    created: HexType::Starflower,
                    score: scored.total,
                }
            }
        };
        debug!(%center, ring = ?scored.ring, score = scored.total, "flower resolved");

        let point = self.board.layout().hex_center(center);
        self.flower_animations.push(FlowerMatchAnimation::new(point, now));
        self.award(scored.total, point, event);
    }

    fn handle_cluster(&mut self, coords: &[HexCoord]) {
        let now = self.now_ms;
        let kind = self.board.tile_at(coords[0]).kind;
        let score = cluster_score(&self.board, coords, self.level);

        for &c in coords {
            let tile = self.board.tile_at_mut(c);
            tile.is_matched = true;
            tile.respawn = true;
            tile.fade = Some(Fade {
                kind: FadeKind::Cluster,
                start_ms: now,
                done: false,
            });
        }

        let event = if kind.is_black_pearl() {
            GameEvent::BlackPearlCluster {
                size: coords.len(),
                score,
            }
        } else {
            GameEvent::ClusterResolved {
                kind,
                size: coords.len(),
                score,
            }
        };
        debug!(?kind, size = coords.len(), score, "cluster resolved");

        let point = self.board.layout().bounding_box_center(coords);
        self.cluster_animations.push(ClusterMatchAnimation::new(point, now));
        self.award(score, point, event);
    }

    fn award(&mut self, score: u32, at: crate::layout::Point, event: GameEvent) {
        self.score = self.score.saturating_add(score);
        self.score_animations
            .push(LocalScoreAnimation::new(score, at, self.now_ms));
        self.events.push(event);

        if self.combos_remaining > 0 {
            self.combos_remaining -= 1;
            if self.combos_remaining == 0 {
                self.events.push(GameEvent::CombosExhausted);
            }
        }
    }

    /// Log the board and cursor, then abort: the simulation broke an invariant.
    fn fatal(&self, what: &str) -> ! {
        error!(
            seed = self.seed,
            now_ms = self.now_ms,
            "{what}\n{}\n{}",
            self.cursor.describe(),
            self.board
        );
        panic!("{what}");
    }

    /// Fill the board grid, its hash, and the per-tile views.
    pub fn snapshot_board_into(&self, out: &mut GameSnapshot) {
        out.board = [[0u8; NUM_COLUMNS]; NUM_ROWS];
        out.tiles.clear();
        for (coord, tile) in self.board.tiles() {
            out.board[coord.r as usize][coord.q as usize] = tile.kind.as_u8();
            let x = self.board.layout().hex_to_screen(coord).x;
            out.tiles.push(TileView::new(coord, x, tile));
        }
        out.board_hash = board_hash(&out.board);
    }

    /// Fill everything except the board.
    pub fn snapshot_meta_into(&self, out: &mut GameSnapshot) {
        out.cursor = CursorSnapshot {
            q: self.cursor.hex_anchor.q,
            r: self.cursor.hex_anchor.r,
            position: self.cursor.position.as_str(),
        };
        out.seed = self.seed;
        out.score = self.score;
        out.level = self.level;
        out.combos_remaining = self.combos_remaining;
        out.now_ms = self.now_ms;
        out.rotating = self.rotation.in_progress;
        out.quiescent = self.is_quiescent();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.snapshot_board_into(out);
        self.snapshot_meta_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, crate::types::INITIAL_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{board_from_grid, tricolor};
    use crate::matching::board_has_match;
    use crate::types::{CursorPos, TICK_MS};

    fn quiet_game() -> GameState {
        let board = board_from_grid(&tricolor(), Layout::standard());
        GameState::from_board(board, 1, 7)
    }

    fn run_until_quiescent(game: &mut GameState) {
        for _ in 0..5_000 {
            if game.is_quiescent() {
                return;
            }
            game.tick(TICK_MS);
        }
        panic!("game never came to rest");
    }

    #[test]
    fn test_new_game_state() {
        let game = GameState::new(12345, 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.combos_remaining(), INITIAL_COMBOS);
        assert_eq!(game.gravity(), GRAVITY_DROP_IN);
        assert!(!game.is_quiescent());
        assert!(!board_has_match(game.board(), false));
    }

    #[test]
    fn test_opening_drop_settles_without_scoring() {
        let mut game = GameState::new(99, 1);
        run_until_quiescent(&mut game);
        assert_eq!(game.score(), 0);
        assert_eq!(game.gravity(), GRAVITY_STEADY);
        assert_eq!(game.take_events().count(), 0);
    }

    #[test]
    fn test_moves_blocked_while_rotating() {
        let mut game = quiet_game();
        assert!(game.apply_action(GameAction::RotateCw));
        assert!(!game.apply_action(GameAction::MoveRight));
        assert!(!game.apply_action(GameAction::RotateCcw));
        assert_eq!(game.cursor().position, CursorPos::Left);
    }

    #[test]
    fn test_rotation_blocked_while_falling() {
        let mut game = GameState::new(3, 1);
        assert!(!game.apply_action(GameAction::RotateCw));
        assert!(game.apply_action(GameAction::MoveRight));
    }

    #[test]
    fn test_trio_rotation_without_match_returns_home() {
        let mut game = quiet_game();
        let before = crate::fixture::grid_of(game.board());
        assert!(game.apply_action(GameAction::RotateCw));
        run_until_quiescent(&mut game);
        assert_eq!(game.rotation().count, 3);
        assert_eq!(crate::fixture::grid_of(game.board()), before);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_landing_resolves_cluster() {
        let mut game = quiet_game();
        let trio = [HexCoord::new(2, 2), HexCoord::new(3, 2), HexCoord::new(3, 3)];
        for c in trio {
            game.board_mut().tile_at_mut(c).kind = HexType::Green;
        }
        // Matches wait until something lands.
        game.tick(TICK_MS);
        assert_eq!(game.score(), 0);

        game.board_mut().tile_at_mut(trio[2]).is_stationary = false;
        game.tick(TICK_MS);
        assert_eq!(game.score(), 5);
        let events: Vec<_> = game.take_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::ClusterResolved {
                kind: HexType::Green,
                size: 3,
                score: 5
            }]
        );
        for c in trio {
            assert!(game.board().tile_at(c).respawn);
            assert!(!game.board().tile_at(c).is_matched);
        }
        assert!(!game.can_move_cursor());

        run_until_quiescent(&mut game);
        assert!(game.board().is_full());
        assert!(game.cluster_animations().is_empty());
    }

    #[test]
    fn test_combos_exhausted_once() {
        let mut game = quiet_game();
        game.combos_remaining = 1;
        let at = crate::layout::Point::default();
        game.award(5, at, GameEvent::ClusterResolved { kind: HexType::Red, size: 3, score: 5 });
        game.award(5, at, GameEvent::ClusterResolved { kind: HexType::Red, size: 3, score: 5 });
        let exhausted = game
            .take_events()
            .filter(|e| *e == GameEvent::CombosExhausted)
            .count();
        assert_eq!(exhausted, 1);
        assert_eq!(game.combos_remaining(), 0);
        assert_eq!(game.score(), 10);
    }

    fn landing_green_trio(game: &mut GameState) {
        let trio = [HexCoord::new(2, 2), HexCoord::new(3, 2), HexCoord::new(3, 3)];
        for c in trio {
            game.board_mut().tile_at_mut(c).kind = HexType::Green;
        }
        game.board_mut().tile_at_mut(trio[2]).is_stationary = false;
    }

    #[test]
    fn test_refill_uses_drop_in_gravity() {
        let mut game = quiet_game();
        game.tick(TICK_MS);
        assert_eq!(game.gravity(), GRAVITY_STEADY);

        landing_green_trio(&mut game);
        game.tick(TICK_MS);
        assert_eq!(game.score(), 5);

        let mut refill_gravity = None;
        for _ in 0..200 {
            game.tick(TICK_MS);
            if game.board().any_falling() {
                refill_gravity = Some(game.gravity());
                break;
            }
        }
        assert_eq!(refill_gravity, Some(GRAVITY_DROP_IN));

        run_until_quiescent(&mut game);
        assert_eq!(game.gravity(), GRAVITY_STEADY);
    }

    #[test]
    #[should_panic(expected = "cluster resolution did not converge")]
    fn test_cluster_loop_cap_is_fatal() {
        let mut game = quiet_game();
        game.resolve_limit = 0;
        landing_green_trio(&mut game);
        game.tick(TICK_MS);
    }

    #[test]
    #[should_panic(expected = "flower resolution did not converge")]
    fn test_flower_loop_cap_is_fatal() {
        let mut game = quiet_game();
        game.resolve_limit = 0;
        let center = HexCoord::new(5, 4);
        for petal in center.ring() {
            game.board_mut().tile_at_mut(petal).kind = HexType::Yellow;
        }
        game.board_mut()
            .tile_at_mut(center.neighbor(HexDirection::Top))
            .is_stationary = false;
        game.tick(TICK_MS);
    }

    #[test]
    fn test_input_frame_gated_while_rotating() {
        let mut game = quiet_game();
        game.update(TICK_MS, &InputFrame::with(GameAction::RotateCw));
        assert!(game.rotation().is_in_progress());

        let anchor = game.cursor().hex_anchor;
        game.update(TICK_MS, &InputFrame::with(GameAction::MoveRight));
        assert_eq!(game.cursor().hex_anchor, anchor);
        assert_eq!(game.cursor().position, CursorPos::Left);

        run_until_quiescent(&mut game);
        game.update(TICK_MS, &InputFrame::with(GameAction::MoveRight));
        assert_eq!(game.cursor().position, CursorPos::Right);
    }

    #[test]
    fn test_scratch_clear_after_tick() {
        let mut game = GameState::new(8, 1);
        for _ in 0..50 {
            game.tick(TICK_MS);
            assert!(game.scratch.is_clear());
        }
    }
}
