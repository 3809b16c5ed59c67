use crate::types::{
    Cell, Coord, Difficulty, GameMode, GamePhase, GravityDir, PowerUpKind, Quota, BOARD_SIZE,
};

/// Flat copy of everything a front end needs to draw one frame.
///
/// Reusable: `GameSession::snapshot_into` overwrites an existing snapshot
/// so render loops can hold one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub moves: Quota,
    pub target_score: u32,
    pub time_left: Quota,
    pub combo: u32,
    pub max_combo: u32,
    pub selected: Option<Coord>,
    pub gravity: GravityDir,
    pub power_ups: [(PowerUpKind, u8); 4],
    pub capped_cascades: u32,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[Cell::EMPTY; BOARD_SIZE]; BOARD_SIZE];
        self.phase = GamePhase::Idle;
        self.score = 0;
        self.level = 1;
        self.moves = Quota::Unlimited;
        self.target_score = 0;
        self.time_left = Quota::Unlimited;
        self.combo = 0;
        self.max_combo = 0;
        self.selected = None;
        self.gravity = GravityDir::Down;
        self.power_ups = PowerUpKind::ALL.map(|k| (k, 0));
        self.capped_cascades = 0;
    }

    pub fn playable(&self) -> bool {
        matches!(self.phase, GamePhase::Playing)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[Cell::EMPTY; BOARD_SIZE]; BOARD_SIZE],
            mode: GameMode::Classic,
            difficulty: Difficulty::Normal,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            moves: Quota::Unlimited,
            target_score: 0,
            time_left: Quota::Unlimited,
            combo: 0,
            max_combo: 0,
            selected: None,
            gravity: GravityDir::Down,
            power_ups: PowerUpKind::ALL.map(|k| (k, 0)),
            capped_cascades: 0,
        };
        s.clear();
        s
    }
}
