//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, presentation layers, scripted drivers).
//!
//! # Board Dimensions
//!
//! The board is a staggered hex grid using the "even-q" offset layout:
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 9 (indexed 0-8, top to bottom)
//! - Even columns sit half a hex lower than odd columns, so the bottom row only
//!   holds tiles in odd columns.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `ROTATION_DURATION_MS` | 180 | One rotation step |
//! | `ROTATION_CHAIN_DELAY_MS` | 100 | Stall between auto-chained trio steps |
//! | `FLOWER_MATCH_DURATION_MS` | 600 | Flower fade-out |
//! | `CLUSTER_MATCH_DURATION_MS` | 300 | Cluster fade-out |
//! | `LOCAL_SCORE_DURATION_MS` | 1000 | Score popup lifetime |
//!
//! # Examples
//!
//! ```
//! use hexic_types::{GameAction, HexDirection, HexType, NUM_COLUMNS, NUM_ROWS};
//!
//! assert_eq!(HexType::from_code("YL"), Some(HexType::Yellow));
//! assert_eq!(HexDirection::Top.opposite(), HexDirection::Bottom);
//! assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
//!
//! assert_eq!(NUM_COLUMNS, 10);
//! assert_eq!(NUM_ROWS, 9);
//! ```

/// Board width in hex columns
pub const NUM_COLUMNS: usize = 10;

/// Board height in hex rows
pub const NUM_ROWS: usize = 9;

/// Total number of tile slots, valid or not
pub const BOARD_SIZE: usize = NUM_COLUMNS * NUM_ROWS;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of a single rotation step.
pub const ROTATION_DURATION_MS: u32 = 180;

/// Delay before an auto-chained trio rotation starts moving.
pub const ROTATION_CHAIN_DELAY_MS: u32 = 100;

/// A trio twist chains until a match appears or this many steps have run.
pub const MAX_TRIO_ROTATIONS: u32 = 3;

/// Tile scale at the midpoint of a rotation step.
pub const ROTATION_PEAK_SCALE: f64 = 1.5;

/// Degrees per step when turning the ring around a starflower.
pub const FLOWER_ROTATION_DEGREES: f64 = 60.0;

/// Degrees per step for trios and black pearl triangles.
pub const TRIO_ROTATION_DEGREES: f64 = 120.0;

pub const FLOWER_MATCH_DURATION_MS: u32 = 600;

pub const CLUSTER_MATCH_DURATION_MS: u32 = 300;

pub const LOCAL_SCORE_DURATION_MS: u32 = 1000;

/// How far a score popup floats up over its lifetime, in logical pixels.
pub const LOCAL_SCORE_RISE: f64 = 40.0;

/// Gravity while the opening board drops in (logical pixels per ms²).
pub const GRAVITY_DROP_IN: f64 = 0.004;

/// Gravity once the board has settled for the first time.
pub const GRAVITY_STEADY: f64 = 0.0025;

/// Terminal falling speed (logical pixels per ms).
pub const MAX_VELOCITY: f64 = 1.2;

/// Fall delay between consecutive tiles of the opening drop-in.
pub const INITIAL_FALL_STAGGER_MS: u32 = 12;

/// Fall delay between consecutive respawned tiles in one column.
pub const RESPAWN_FALL_STAGGER_MS: u32 = 60;

/// Safety cap for every find-one/handle-one resolution loop.
pub const MAX_RESOLVE_ITERATIONS: usize = 100;

/// Safety cap for rerolling the opening board until it has no matches.
pub const MAX_BOARD_REROLLS: usize = 100;

pub const INITIAL_LEVEL: u32 = 1;

pub const INITIAL_COMBOS: u32 = 50;

/// Highest level with its own spawn mask.
pub const MAX_NUM_LEVELS: usize = 7;

/// Spawn masks by level. Bit index is the `HexType` discriminant.
///
/// Index 0 is not a level. Levels 1-3 leave out magenta, level 4 adds it.
pub const LEVEL_HEX_TYPE_MASK: [u32; MAX_NUM_LEVELS + 1] =
    [0x00, 0x37, 0x37, 0x37, 0x3F, 0x3F, 0x3F, 0x3F];

/// Spawn mask for the two black pearl orientations.
pub const BLACK_PEARL_TYPE_MASK: u32 = (1 << HexType::BlackPearlUp as u32)
    | (1 << HexType::BlackPearlDown as u32);

/// First level that spawns multiplier tiles.
pub const MULTIPLIER_MIN_LEVEL: u32 = 2;

/// Chance (percent) that a basic tile spawns with a multiplier.
pub const MULTIPLIER_CHANCE_PERCENT: u32 = 3;

/// Neighbor selection masks. Bit index is the `HexDirection` discriminant.
pub const ALL_NEIGHBORS: u8 = 0x3F;
pub const BLACK_PEARL_UP_NEIGHBORS: u8 = 0x15;
pub const BLACK_PEARL_DOWN_NEIGHBORS: u8 = 0x2A;
pub const TRIO_LEFT_NEIGHBORS: u8 = 0x30;
pub const TRIO_RIGHT_NEIGHBORS: u8 = 0x06;

/// Cluster base points per extra tile, by what the cluster is made of.
pub const CLUSTER_BASE_BASIC: u32 = 5;
pub const CLUSTER_BASE_MULTIPLIER: u32 = 100;
pub const CLUSTER_BASE_STARFLOWER: u32 = 2500;
pub const CLUSTER_BASE_BLACK_PEARL: u32 = 25000;

/// Flower base points per level, before center and ring bonuses.
pub const FLOWER_BASE: u32 = 1000;

/// Ring bonus when all six petals are starflowers.
pub const FLOWER_ALL_STARFLOWER_BONUS: u32 = 10;

/// Ring bonus when all six petals are black pearls.
pub const FLOWER_ALL_BLACK_PEARL_BONUS: u32 = 200;

/// Width of one hex in logical pixels.
pub const HEX_WIDTH: f64 = 60.0;

pub const LOGICAL_WINDOW_WIDTH: f64 = 1280.0;
pub const LOGICAL_WINDOW_HEIGHT: f64 = 720.0;


/// The tile types
///
/// - Six basic colors, spawned according to the level mask
/// - **Starflower**: created at the center of a resolved flower
/// - **BlackPearlUp / BlackPearlDown**: created at the center of a starflower flower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexType {
    Green,
    Blue,
    Yellow,
    Magenta,
    Purple,
    Red,
    Starflower,
    BlackPearlUp,
    BlackPearlDown,
}

impl HexType {
    pub const ALL: [HexType; 9] = [
        HexType::Green,
        HexType::Blue,
        HexType::Yellow,
        HexType::Magenta,
        HexType::Purple,
        HexType::Red,
        HexType::Starflower,
        HexType::BlackPearlUp,
        HexType::BlackPearlDown,
    ];

    /// Look up a type by its mask bit index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a two-letter fixture code (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use hexic_types::HexType;
    ///
    /// assert_eq!(HexType::from_code("gr"), Some(HexType::Green));
    /// assert_eq!(HexType::from_code("SF"), Some(HexType::Starflower));
    /// assert_eq!(HexType::from_code("XX"), None);
    /// ```
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GR" => Some(HexType::Green),
            "BL" => Some(HexType::Blue),
            "YL" => Some(HexType::Yellow),
            "MG" => Some(HexType::Magenta),
            "PL" => Some(HexType::Purple),
            "RD" => Some(HexType::Red),
            "SF" => Some(HexType::Starflower),
            "BU" => Some(HexType::BlackPearlUp),
            "BD" => Some(HexType::BlackPearlDown),
            _ => None,
        }
    }

    /// Two-letter fixture code
    pub fn code(&self) -> &'static str {
        match self {
            HexType::Green => "GR",
            HexType::Blue => "BL",
            HexType::Yellow => "YL",
            HexType::Magenta => "MG",
            HexType::Purple => "PL",
            HexType::Red => "RD",
            HexType::Starflower => "SF",
            HexType::BlackPearlUp => "BU",
            HexType::BlackPearlDown => "BD",
        }
    }

    /// Compact grid encoding used by snapshots (0 is reserved for invalid slots).
    pub fn as_u8(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            HexType::Green
                | HexType::Blue
                | HexType::Yellow
                | HexType::Magenta
                | HexType::Purple
                | HexType::Red
        )
    }

    pub fn is_starflower(&self) -> bool {
        *self == HexType::Starflower
    }

    pub fn is_black_pearl(&self) -> bool {
        matches!(self, HexType::BlackPearlUp | HexType::BlackPearlDown)
    }

    /// Starflowers and black pearls can be turned from the cursor `On` position.
    pub fn is_special(&self) -> bool {
        self.is_starflower() || self.is_black_pearl()
    }

    /// Whether two tiles count as the same for matching.
    ///
    /// Both black pearl orientations match each other.
    pub fn matches(&self, other: HexType) -> bool {
        *self == other || (self.is_black_pearl() && other.is_black_pearl())
    }
}

/// The six hex neighbors, clockwise from the top
///
/// The discriminant is the bit index used by the neighbor masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexDirection {
    Top,
    TopRight,
    BottomRight,
    Bottom,
    BottomLeft,
    TopLeft,
}

impl HexDirection {
    /// All directions in clockwise order starting at `Top`
    pub const ALL: [HexDirection; 6] = [
        HexDirection::Top,
        HexDirection::TopRight,
        HexDirection::BottomRight,
        HexDirection::Bottom,
        HexDirection::BottomLeft,
        HexDirection::TopLeft,
    ];

    /// Direction for a mask bit index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 6`; direction indices come from the fixed ring and
    /// anything else is a logic error.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => HexDirection::Top,
            1 => HexDirection::TopRight,
            2 => HexDirection::BottomRight,
            3 => HexDirection::Bottom,
            4 => HexDirection::BottomLeft,
            5 => HexDirection::TopLeft,
            _ => panic!("invalid hex neighbor index {index}"),
        }
    }

    /// Mask bit for this direction
    pub fn bit(&self) -> u8 {
        1 << (*self as u8)
    }

    /// Direction pointing back
    ///
    /// # Examples
    ///
    /// ```
    /// use hexic_types::HexDirection;
    ///
    /// assert_eq!(HexDirection::TopRight.opposite(), HexDirection::BottomLeft);
    /// assert_eq!(HexDirection::TopLeft.opposite(), HexDirection::BottomRight);
    /// ```
    pub fn opposite(&self) -> Self {
        Self::from_index((*self as usize + 3) % 6)
    }
}

/// Where the cursor sits relative to its anchor hex
///
/// - **Left** / **Right**: on the vertex left or right of the anchor, selecting a trio
/// - **On**: centered on a starflower or black pearl anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorPos {
    Left,
    Right,
    On,
}

impl CursorPos {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorPos::Left => "left",
            CursorPos::Right => "right",
            CursorPos::On => "on",
        }
    }
}

/// Turning direction of a rotation gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

impl Spin {
    /// +1 for clockwise, -1 for counterclockwise
    pub fn sign(&self) -> f64 {
        match self {
            Spin::Clockwise => 1.0,
            Spin::CounterClockwise => -1.0,
        }
    }
}

/// Commands consumed from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the cursor up one vertex
    MoveUp,
    /// Move the cursor down one vertex
    MoveDown,
    /// Move the cursor left
    MoveLeft,
    /// Move the cursor right
    MoveRight,
    /// Turn the current selection clockwise
    RotateCw,
    /// Turn the current selection counterclockwise
    RotateCcw,
    /// Log the board in fixture format
    PrintBoard,
}

impl GameAction {
    /// Parse action from string (for scripts)
    ///
    /// # Examples
    ///
    /// ```
    /// use hexic_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateccw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "printboard" => Some(GameAction::PrintBoard),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::PrintBoard => "printBoard",
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(
            self,
            GameAction::MoveUp | GameAction::MoveDown | GameAction::MoveLeft | GameAction::MoveRight
        )
    }
}

/// One tick worth of debounced input
///
/// Each flag is a one-shot press; the game reads them once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
    pub print_board: bool,
}

impl InputFrame {
    /// Frame with a single action pressed
    pub fn with(action: GameAction) -> Self {
        let mut frame = Self::default();
        frame.press(action);
        frame
    }

    pub fn press(&mut self, action: GameAction) {
        match action {
            GameAction::MoveUp => self.move_up = true,
            GameAction::MoveDown => self.move_down = true,
            GameAction::MoveLeft => self.move_left = true,
            GameAction::MoveRight => self.move_right = true,
            GameAction::RotateCw => self.rotate_cw = true,
            GameAction::RotateCcw => self.rotate_ccw = true,
            GameAction::PrintBoard => self.print_board = true,
        }
    }

    /// Pressed actions in processing order: debug dump, moves, then rotations.
    pub fn actions(&self) -> impl Iterator<Item = GameAction> {
        [
            (self.print_board, GameAction::PrintBoard),
            (self.move_up, GameAction::MoveUp),
            (self.move_down, GameAction::MoveDown),
            (self.move_left, GameAction::MoveLeft),
            (self.move_right, GameAction::MoveRight),
            (self.rotate_cw, GameAction::RotateCw),
            (self.rotate_ccw, GameAction::RotateCcw),
        ]
        .into_iter()
        .filter_map(|(pressed, action)| pressed.then_some(action))
    }
}
