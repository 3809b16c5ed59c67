//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions (the board is always square)
pub const BOARD_SIZE: usize = 8;

/// Number of tile colors
pub const COLORS: u8 = 7;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const CASCADE_STEP_MS: u32 = 600;
pub const COUNTDOWN_TICK_MS: u32 = 1000;
pub const GRAVITY_ROTATE_MS: u32 = 30_000;
pub const TIME_FREEZE_MS: u32 = 5_000;

/// Hard cap on cascade steps per resolution (forces runaway chains stable)
pub const CASCADE_MAX_STEPS: u32 = 20;

/// Chain-storm time economy (seconds)
pub const CHAIN_BREAK_PENALTY_SECS: u32 = 10;
pub const CHAIN_BONUS_MIN_SECS: u32 = 1;
pub const CHAIN_BONUS_MAX_SECS: u32 = 5;

/// Combo counts that fire a milestone event
pub const COMBO_MILESTONES: [u32; 4] = [5, 10, 15, 20];

/// Starting frozen layers for a freshly frozen tile
pub const FROZEN_LAYERS: u8 = 2;

/// Board coordinate, row-major with (0, 0) top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 4-connectivity adjacency (Manhattan distance exactly 1)
    pub fn is_adjacent(&self, other: Coord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}

/// Special tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    Row,
    Col,
    Bomb,
    Rainbow,
}

impl SpecialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialKind::Row => "row",
            SpecialKind::Col => "col",
            SpecialKind::Bomb => "bomb",
            SpecialKind::Rainbow => "rainbow",
        }
    }
}

/// Tile state modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Normal,
    Locked,
    Frozen,
    Chained,
}

impl CellState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Normal => "normal",
            CellState::Locked => "locked",
            CellState::Frozen => "frozen",
            CellState::Chained => "chained",
        }
    }
}

/// A single board tile.
///
/// Invariants: an empty cell (`color == None`) carries no special and is in
/// the `Normal` state; `state == Frozen` implies `frozen_layers > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub color: Option<u8>,
    pub special: Option<SpecialKind>,
    pub state: CellState,
    pub frozen_layers: u8,
}

impl Cell {
    /// The empty cell (no color, no special, normal state)
    pub const EMPTY: Cell = Cell {
        color: None,
        special: None,
        state: CellState::Normal,
        frozen_layers: 0,
    };

    /// A plain tile of the given color
    pub const fn normal(color: u8) -> Self {
        Cell {
            color: Some(color),
            special: None,
            state: CellState::Normal,
            frozen_layers: 0,
        }
    }

    /// A locked tile (must be unlocked by a match before it can clear)
    pub const fn locked(color: u8) -> Self {
        Cell {
            color: Some(color),
            special: None,
            state: CellState::Locked,
            frozen_layers: 0,
        }
    }

    /// A frozen tile with the given number of layers
    pub const fn frozen(color: u8, layers: u8) -> Self {
        Cell {
            color: Some(color),
            special: None,
            state: CellState::Frozen,
            frozen_layers: layers,
        }
    }

    /// A tile carrying a special kind
    pub const fn special(color: u8, kind: SpecialKind) -> Self {
        Cell {
            color: Some(color),
            special: Some(kind),
            state: CellState::Normal,
            frozen_layers: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none()
    }

    pub fn is_locked(&self) -> bool {
        self.state == CellState::Locked
    }

    pub fn is_frozen(&self) -> bool {
        self.state == CellState::Frozen
    }

    /// Reset to the empty cell, upholding the empty-cell invariant
    pub fn clear(&mut self) {
        *self = Cell::EMPTY;
    }
}

/// Game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Classic,
    Time,
    Endless,
    Puzzle,
    ChainStorm,
    SpecialChallenge,
    GravityFlip,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "time" => Some(GameMode::Time),
            "endless" => Some(GameMode::Endless),
            "puzzle" => Some(GameMode::Puzzle),
            "chainstorm" | "chain-storm" => Some(GameMode::ChainStorm),
            "specialchallenge" | "special-challenge" => Some(GameMode::SpecialChallenge),
            "gravityflip" | "gravity-flip" => Some(GameMode::GravityFlip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Time => "time",
            GameMode::Endless => "endless",
            GameMode::Puzzle => "puzzle",
            GameMode::ChainStorm => "chainStorm",
            GameMode::SpecialChallenge => "specialChallenge",
            GameMode::GravityFlip => "gravityFlip",
        }
    }

    /// Modes whose countdown clock is live
    pub fn is_timed(&self) -> bool {
        matches!(
            self,
            GameMode::Time | GameMode::ChainStorm | GameMode::GravityFlip
        )
    }

    /// Modes in which a successful swap or activation consumes a move
    pub fn tracks_moves(&self) -> bool {
        matches!(
            self,
            GameMode::Classic | GameMode::SpecialChallenge | GameMode::Puzzle
        )
    }
}

/// Game difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

/// Progression states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Idle,
    Playing,
    Paused,
    Animating,
    LevelUp,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::Animating => "animating",
            GamePhase::LevelUp => "levelUp",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Fire-and-forget notifications for the audio/presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Click,
    Match,
    Special,
    LevelUp,
    GameOver,
    Combo,
    PowerUp,
}

impl GameEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Click => "click",
            GameEvent::Match => "match",
            GameEvent::Special => "special",
            GameEvent::LevelUp => "levelUp",
            GameEvent::GameOver => "gameOver",
            GameEvent::Combo => "combo",
            GameEvent::PowerUp => "powerUp",
        }
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Rearrange,
    HintBoost,
    SpecialGenerator,
    TimeFreeze,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Rearrange,
        PowerUpKind::HintBoost,
        PowerUpKind::SpecialGenerator,
        PowerUpKind::TimeFreeze,
    ];

    /// Count granted at the start of every game
    pub fn starting_count(&self) -> u8 {
        match self {
            PowerUpKind::Rearrange => 3,
            PowerUpKind::HintBoost => 2,
            PowerUpKind::SpecialGenerator => 1,
            PowerUpKind::TimeFreeze => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Rearrange => "rearrange",
            PowerUpKind::HintBoost => "hintBoost",
            PowerUpKind::SpecialGenerator => "specialGen",
            PowerUpKind::TimeFreeze => "timeFreeze",
        }
    }
}

/// Gravity direction for gravity-flip mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GravityDir {
    #[default]
    Down,
    Left,
    Up,
    Right,
}

impl GravityDir {
    /// Rotation order: down -> left -> up -> right -> down
    pub fn next(&self) -> Self {
        match self {
            GravityDir::Down => GravityDir::Left,
            GravityDir::Left => GravityDir::Up,
            GravityDir::Up => GravityDir::Right,
            GravityDir::Right => GravityDir::Down,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GravityDir::Down => "down",
            GravityDir::Left => "left",
            GravityDir::Up => "up",
            GravityDir::Right => "right",
        }
    }
}

/// A move or time budget: either unlimited or a remaining count.
///
/// Replaces the numeric `Infinity` sentinel so exhaustion checks cannot
/// misfire on unlimited modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quota {
    Unlimited,
    Remaining(u32),
}

impl Quota {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Quota::Remaining(0))
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            Quota::Unlimited => None,
            Quota::Remaining(n) => Some(*n),
        }
    }

    /// Consume one unit; unlimited quotas are unaffected
    pub fn consume(&mut self) {
        if let Quota::Remaining(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    pub fn add(&mut self, amount: u32) {
        if let Quota::Remaining(n) = self {
            *n = n.saturating_add(amount);
        }
    }

    /// Subtract, flooring at zero
    pub fn sub(&mut self, amount: u32) {
        if let Quota::Remaining(n) = self {
            *n = n.saturating_sub(amount);
        }
    }
}

/// Initial moves/target/time for a mode + difficulty combination.
///
/// Puzzle is the exception: its moves and target come from the level data,
/// so the table only pins it as untimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeParams {
    pub moves: Quota,
    pub target_score: u32,
    pub time_left: Quota,
}

impl ModeParams {
    pub fn for_game(mode: GameMode, difficulty: Difficulty) -> Self {
        let (base_moves, base_target, base_secs) = match difficulty {
            Difficulty::Easy => (40, 800, 70),
            Difficulty::Normal => (30, 1000, 60),
            Difficulty::Hard => (20, 1200, 50),
        };

        match mode {
            GameMode::Classic => ModeParams {
                moves: Quota::Remaining(base_moves),
                target_score: base_target,
                time_left: Quota::Remaining(base_secs),
            },
            GameMode::Time | GameMode::Endless => ModeParams {
                moves: Quota::Unlimited,
                target_score: base_target,
                time_left: Quota::Remaining(base_secs),
            },
            GameMode::Puzzle => ModeParams {
                moves: Quota::Remaining(0),
                target_score: 0,
                time_left: Quota::Unlimited,
            },
            GameMode::ChainStorm => ModeParams {
                moves: Quota::Unlimited,
                target_score: 0,
                time_left: Quota::Remaining(60),
            },
            GameMode::SpecialChallenge => ModeParams {
                moves: Quota::Remaining(20),
                target_score: 2000,
                time_left: Quota::Unlimited,
            },
            GameMode::GravityFlip => ModeParams {
                moves: Quota::Unlimited,
                target_score: 0,
                time_left: Quota::Remaining(120),
            },
        }
    }
}

/// Player actions at the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Select,
    Cancel,
    PowerUp(PowerUpKind),
    Pause,
    Restart,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Select => "select",
            GameAction::Cancel => "cancel",
            GameAction::PowerUp(PowerUpKind::Rearrange) => "powerUp:rearrange",
            GameAction::PowerUp(PowerUpKind::HintBoost) => "powerUp:hintBoost",
            GameAction::PowerUp(PowerUpKind::SpecialGenerator) => "powerUp:specialGen",
            GameAction::PowerUp(PowerUpKind::TimeFreeze) => "powerUp:timeFreeze",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_adjacency() {
        let c = Coord::new(3, 3);
        assert!(c.is_adjacent(Coord::new(2, 3)));
        assert!(c.is_adjacent(Coord::new(4, 3)));
        assert!(c.is_adjacent(Coord::new(3, 2)));
        assert!(c.is_adjacent(Coord::new(3, 4)));
        // Diagonals and self are not adjacent
        assert!(!c.is_adjacent(Coord::new(2, 2)));
        assert!(!c.is_adjacent(Coord::new(4, 4)));
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(Coord::new(3, 5)));
    }

    #[test]
    fn test_empty_cell_invariant() {
        let mut cell = Cell::special(3, SpecialKind::Bomb);
        cell.clear();
        assert!(cell.is_empty());
        assert_eq!(cell.special, None);
        assert_eq!(cell.state, CellState::Normal);
        assert_eq!(cell.frozen_layers, 0);
        assert_eq!(cell, Cell::EMPTY);
    }

    #[test]
    fn test_quota_consume_and_floor() {
        let mut moves = Quota::Remaining(2);
        moves.consume();
        assert_eq!(moves.remaining(), Some(1));
        assert!(!moves.is_exhausted());
        moves.consume();
        assert!(moves.is_exhausted());
        moves.consume();
        assert_eq!(moves.remaining(), Some(0));

        let mut unlimited = Quota::Unlimited;
        unlimited.consume();
        unlimited.sub(100);
        assert!(!unlimited.is_exhausted());
        assert_eq!(unlimited.remaining(), None);
    }

    #[test]
    fn test_quota_time_arithmetic() {
        let mut time = Quota::Remaining(5);
        time.sub(10);
        assert_eq!(time.remaining(), Some(0));
        time.add(3);
        assert_eq!(time.remaining(), Some(3));
    }

    #[test]
    fn test_gravity_rotation_cycle() {
        let mut dir = GravityDir::Down;
        let mut seen = vec![dir];
        for _ in 0..3 {
            dir = dir.next();
            seen.push(dir);
        }
        assert_eq!(
            seen,
            vec![
                GravityDir::Down,
                GravityDir::Left,
                GravityDir::Up,
                GravityDir::Right
            ]
        );
        assert_eq!(dir.next(), GravityDir::Down);
    }

    #[test]
    fn test_mode_params_classic_normal() {
        let params = ModeParams::for_game(GameMode::Classic, Difficulty::Normal);
        assert_eq!(params.moves, Quota::Remaining(30));
        assert_eq!(params.target_score, 1000);
        assert_eq!(params.time_left, Quota::Remaining(60));

        let timed = ModeParams::for_game(GameMode::Time, Difficulty::Normal);
        assert_eq!(timed.moves, Quota::Unlimited);
        assert_eq!(timed.time_left, Quota::Remaining(60));

        let endless = ModeParams::for_game(GameMode::Endless, Difficulty::Hard);
        assert_eq!(endless.moves, Quota::Unlimited);
        assert_eq!(endless.time_left, Quota::Remaining(50));
    }

    #[test]
    fn test_mode_params_difficulty_spread() {
        let easy = ModeParams::for_game(GameMode::Classic, Difficulty::Easy);
        let hard = ModeParams::for_game(GameMode::Classic, Difficulty::Hard);
        assert_eq!(easy.moves, Quota::Remaining(40));
        assert_eq!(easy.target_score, 800);
        assert_eq!(hard.moves, Quota::Remaining(20));
        assert_eq!(hard.target_score, 1200);
    }

    #[test]
    fn test_mode_params_untracked_moves() {
        for mode in [GameMode::Time, GameMode::ChainStorm, GameMode::GravityFlip] {
            let params = ModeParams::for_game(mode, Difficulty::Normal);
            assert_eq!(params.moves, Quota::Unlimited);
            assert!(mode.is_timed());
            assert!(!mode.tracks_moves());
        }
        assert!(GameMode::SpecialChallenge.tracks_moves());
        assert!(!GameMode::Endless.is_timed());
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [
            GameMode::Classic,
            GameMode::Time,
            GameMode::Endless,
            GameMode::Puzzle,
            GameMode::ChainStorm,
            GameMode::SpecialChallenge,
            GameMode::GravityFlip,
        ] {
            assert_eq!(GameMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(GameMode::from_str("bogus"), None);
    }
}
