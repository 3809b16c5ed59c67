//! Session module - the complete game state machine
//!
//! Ties together board, matcher, cascade, scoring, puzzle levels, and
//! power-ups. A session advances through a fixed-timestep `tick` plus
//! player-driven `select_cell` calls; cascades run one step per scheduled
//! advance so a front end can pace them for animation.

use crate::board::Board;
use crate::cascade::{CascadeConfig, CascadeEngine, CascadeStep};
use crate::puzzle::{self, PuzzleTarget};
use crate::rng::SimpleRng;
use crate::scoring;
use crate::snapshot::SessionSnapshot;
use crate::specials;
use crate::types::{
    Cell, Coord, Difficulty, GameEvent, GameMode, GamePhase, GravityDir, ModeParams, PowerUpKind,
    Quota, SpecialKind, BOARD_SIZE, CHAIN_BREAK_PENALTY_SECS, COUNTDOWN_TICK_MS, GRAVITY_ROTATE_MS,
    TIME_FREEZE_MS,
};

/// What a `select_cell` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The click was not acted on (wrong phase, out of bounds, no moves left)
    Ignored,
    /// The cell is now the selection
    Selected,
    /// The selection was cleared
    Deselected,
    /// A matching swap was made and the cascade started
    Swapped,
    /// The swap produced no match and was reverted
    SwappedBack,
    /// A special tile was activated
    Activated,
}

/// Result of spending a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpEffect {
    Rearranged,
    Hint(Option<(Coord, Coord)>),
    SpecialSpawned(Coord, SpecialKind),
    TimeFrozen,
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    rng: SimpleRng,
    mode: GameMode,
    difficulty: Difficulty,
    phase: GamePhase,

    score: u32,
    level: u32,
    moves: Quota,
    target_score: u32,
    time_left: Quota,

    combo: u32,
    max_combo: u32,
    current_milestone: u32,

    selected: Option<Coord>,
    power_ups: [u8; 4],
    puzzle_target: Option<PuzzleTarget>,

    gravity: GravityDir,
    gravity_timer_ms: u32,
    /// Gravity rotated while a cascade was running; apply it on settle
    gravity_due: bool,

    countdown_ms: u32,
    freeze_ms: u32,

    cascade: CascadeEngine,
    cascade_wait_ms: u32,
    capped_cascades: u32,

    events: Vec<GameEvent>,
    last_step: Option<CascadeStep>,
}

impl GameSession {
    /// Create a new session with the given RNG seed
    pub fn new(mode: GameMode, difficulty: Difficulty, seed: u32) -> Self {
        Self::with_config(mode, difficulty, seed, CascadeConfig::default())
    }

    /// Create a session with custom cascade pacing
    pub fn with_config(
        mode: GameMode,
        difficulty: Difficulty,
        seed: u32,
        config: CascadeConfig,
    ) -> Self {
        let mut rng = SimpleRng::new(seed);
        let params = ModeParams::for_game(mode, difficulty);

        let (board, moves, target_score, puzzle_target) = if mode == GameMode::Puzzle {
            let def = puzzle::level(1);
            let target_score = match def.target {
                PuzzleTarget::Score(v) => v,
                PuzzleTarget::ClearState(_) => 0,
            };
            (
                puzzle::build_board(def),
                Quota::Remaining(def.moves),
                target_score,
                Some(def.target),
            )
        } else {
            (
                Board::generate(&mut rng, 1, difficulty, mode),
                params.moves,
                params.target_score,
                None,
            )
        };

        Self {
            board,
            rng,
            mode,
            difficulty,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            moves,
            target_score,
            time_left: params.time_left,
            combo: 0,
            max_combo: 0,
            current_milestone: 0,
            selected: None,
            power_ups: PowerUpKind::ALL.map(|k| k.starting_count()),
            puzzle_target,
            gravity: GravityDir::Down,
            gravity_timer_ms: 0,
            gravity_due: false,
            countdown_ms: 0,
            freeze_ms: 0,
            cascade: CascadeEngine::new(config),
            cascade_wait_ms: 0,
            capped_cascades: 0,
            events: Vec::new(),
            last_step: None,
        }
    }

    /// Create a session over a prepared board (for scripted setups)
    pub fn with_board(
        board: Board,
        mode: GameMode,
        difficulty: Difficulty,
        seed: u32,
    ) -> Self {
        let mut session = Self::new(mode, difficulty, seed);
        session.board = board;
        session
    }

    /// Begin play
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Playing;
        }
    }

    /// Restart with a fresh board drawn from the current RNG stream
    pub fn restart(&mut self) {
        let seed = self.rng.state();
        *self = Self::with_config(self.mode, self.difficulty, seed, self.cascade.config());
        self.start();
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn moves(&self) -> Quota {
        self.moves
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn time_left(&self) -> Quota {
        self.time_left
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn gravity(&self) -> GravityDir {
        self.gravity
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn power_up_count(&self, kind: PowerUpKind) -> u8 {
        self.power_ups[power_up_index(kind)]
    }

    pub fn puzzle_target(&self) -> Option<PuzzleTarget> {
        self.puzzle_target
    }

    /// Cascades that were forced stable by the step cap
    pub fn capped_cascades(&self) -> u32 {
        self.capped_cascades
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Drain the queued presentation events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take and clear the last cascade step report
    pub fn take_last_step(&mut self) -> Option<CascadeStep> {
        self.last_step.take()
    }

    /// Main game tick - update timers and pace the cascade
    pub fn tick(&mut self, elapsed_ms: u32) {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::Animating) {
            return;
        }

        self.tick_gravity(elapsed_ms);
        self.tick_countdown(elapsed_ms);
        if self.phase == GamePhase::GameOver {
            return;
        }

        if self.phase == GamePhase::Animating {
            self.cascade_wait_ms += elapsed_ms;
            if self.cascade_wait_ms >= self.cascade.config().step_delay_ms {
                self.cascade_wait_ms = 0;
                self.advance_cascade();
            }
        }
    }

    /// Run the active cascade to completion, ignoring step pacing
    pub fn fast_forward(&mut self) {
        while self.phase == GamePhase::Animating {
            self.advance_cascade();
        }
    }

    fn tick_gravity(&mut self, elapsed_ms: u32) {
        if self.mode != GameMode::GravityFlip {
            return;
        }
        self.gravity_timer_ms += elapsed_ms;
        while self.gravity_timer_ms >= GRAVITY_ROTATE_MS {
            self.gravity_timer_ms -= GRAVITY_ROTATE_MS;
            self.gravity = self.gravity.next();
            if self.phase == GamePhase::Playing {
                // A rotation reshuffles the whole board
                self.board.rearrange(&mut self.rng);
            } else {
                self.gravity_due = true;
            }
        }
    }

    fn tick_countdown(&mut self, elapsed_ms: u32) {
        if !self.mode.is_timed() {
            return;
        }

        // Frozen time absorbs the clock first
        let mut elapsed = elapsed_ms;
        if self.freeze_ms > 0 {
            let consumed = self.freeze_ms.min(elapsed);
            self.freeze_ms -= consumed;
            elapsed -= consumed;
        }
        if elapsed == 0 {
            return;
        }

        self.countdown_ms += elapsed;
        while self.countdown_ms >= COUNTDOWN_TICK_MS {
            self.countdown_ms -= COUNTDOWN_TICK_MS;
            self.time_left.sub(1);
            if self.time_left.is_exhausted() {
                self.end_game();
                return;
            }
        }
    }

    /// Handle a click or keyboard confirm on a cell
    pub fn select_cell(&mut self, row: usize, col: usize) -> SelectOutcome {
        if self.phase != GamePhase::Playing {
            return SelectOutcome::Ignored;
        }
        if self.mode.tracks_moves() && self.moves.is_exhausted() {
            return SelectOutcome::Ignored;
        }
        let coord = Coord::new(row, col);
        let Some(cell) = self.board.at(coord) else {
            return SelectOutcome::Ignored;
        };

        self.events.push(GameEvent::Click);

        // A special tile activates on click instead of being selected
        if let Some(kind) = cell.special {
            self.activate_special(coord, kind);
            self.consume_move();
            return SelectOutcome::Activated;
        }

        let Some(prev) = self.selected else {
            self.selected = Some(coord);
            return SelectOutcome::Selected;
        };

        if prev == coord {
            self.selected = None;
            return SelectOutcome::Deselected;
        }

        if !prev.is_adjacent(coord) {
            self.selected = Some(coord);
            return SelectOutcome::Selected;
        }

        self.selected = None;
        self.board.swap(prev, coord);
        if crate::matcher::find_matches(&self.board).cells.is_empty() {
            // No match: revert, the move is free
            self.board.swap(prev, coord);
            return SelectOutcome::SwappedBack;
        }

        self.consume_move();
        self.begin_cascade();
        SelectOutcome::Swapped
    }

    /// Clear the current selection
    pub fn cancel_selection(&mut self) {
        self.selected = None;
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Playing,
            _ => {}
        }
    }

    /// Dismiss the level-up banner and resume play
    pub fn continue_after_level_up(&mut self) {
        if self.phase == GamePhase::LevelUp {
            self.phase = GamePhase::Playing;
        }
    }

    /// First available move, if any
    pub fn hint(&self) -> Option<(Coord, Coord)> {
        self.board.find_first_move()
    }

    /// Spend a power-up. Returns what happened, or None if it could not be
    /// used.
    pub fn use_power_up(&mut self, kind: PowerUpKind) -> Option<PowerUpEffect> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        if kind == PowerUpKind::TimeFreeze && self.mode != GameMode::Time {
            return None;
        }
        let idx = power_up_index(kind);
        if self.power_ups[idx] == 0 {
            return None;
        }
        self.power_ups[idx] -= 1;
        self.events.push(GameEvent::PowerUp);

        let effect = match kind {
            PowerUpKind::Rearrange => {
                self.board.rearrange(&mut self.rng);
                PowerUpEffect::Rearranged
            }
            PowerUpKind::HintBoost => PowerUpEffect::Hint(self.hint()),
            PowerUpKind::SpecialGenerator => {
                let coord = self.random_coord();
                let kinds = [
                    SpecialKind::Row,
                    SpecialKind::Col,
                    SpecialKind::Bomb,
                    SpecialKind::Rainbow,
                ];
                let special = kinds[self.rng.next_range(4) as usize];
                self.stamp_special(coord, special);
                PowerUpEffect::SpecialSpawned(coord, special)
            }
            PowerUpKind::TimeFreeze => {
                self.freeze_ms = TIME_FREEZE_MS;
                PowerUpEffect::TimeFrozen
            }
        };
        Some(effect)
    }

    /// Write the current state into a reusable snapshot buffer
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                out.grid[row][col] = self.board.get(row, col).unwrap_or(Cell::EMPTY);
            }
        }
        out.mode = self.mode;
        out.difficulty = self.difficulty;
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.moves = self.moves;
        out.target_score = self.target_score;
        out.time_left = self.time_left;
        out.combo = self.combo;
        out.max_combo = self.max_combo;
        out.selected = self.selected;
        out.gravity = self.gravity;
        out.power_ups = PowerUpKind::ALL.map(|k| (k, self.power_up_count(k)));
        out.capped_cascades = self.capped_cascades;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn consume_move(&mut self) {
        if self.mode.tracks_moves() {
            self.moves.consume();
        }
    }

    fn begin_cascade(&mut self) {
        self.phase = GamePhase::Animating;
        self.cascade.begin();
        self.cascade_wait_ms = 0;
    }

    fn advance_cascade(&mut self) {
        let step = self.cascade.resolve_step(&mut self.board, &mut self.rng);
        self.last_step = Some(step);
        match step {
            CascadeStep::Matched { cleared, .. } => self.on_match(cleared),
            CascadeStep::Stable => self.settle(),
            CascadeStep::CapHit => {
                self.capped_cascades += 1;
                self.settle();
            }
        }
    }

    fn on_match(&mut self, cleared: u32) {
        // Chain-storm awards time per chain step, scaled by the combo going
        // into this step
        if self.mode == GameMode::ChainStorm {
            self.time_left.add(scoring::chain_time_bonus(self.combo));
        }

        self.combo += 1;
        if self.combo > self.max_combo {
            self.max_combo = self.combo;
        }
        if scoring::milestone_for(self.combo).is_some() {
            self.current_milestone = self.combo;
            self.events.push(GameEvent::Combo);
        }

        let score = scoring::match_score(cleared, self.level, self.combo, self.current_milestone);
        self.score += score.total;
        self.events.push(GameEvent::Match);
    }

    /// The cascade is over: apply end-of-chain penalties, check progression,
    /// and hand control back to the player
    fn settle(&mut self) {
        if self.mode == GameMode::ChainStorm {
            self.time_left.sub(CHAIN_BREAK_PENALTY_SECS);
            if self.time_left.is_exhausted() {
                self.end_game();
                return;
            }
        }

        self.combo = 0;
        self.current_milestone = 0;

        self.check_progress();
        if !matches!(self.phase, GamePhase::Animating) {
            return;
        }

        let gravity_pending = std::mem::take(&mut self.gravity_due);
        if gravity_pending || !self.board.has_valid_move() {
            self.board.rearrange(&mut self.rng);
        }
        self.phase = GamePhase::Playing;
    }

    fn check_progress(&mut self) {
        if self.mode == GameMode::Puzzle {
            let done = self
                .puzzle_target
                .map(|t| puzzle::is_complete(t, &self.board, self.score))
                .unwrap_or(false);
            if done {
                self.level_up();
            } else if self.moves.is_exhausted() {
                self.end_game();
            }
            return;
        }

        if self.score >= self.target_score {
            self.level_up();
        }
        if self.mode.tracks_moves() && self.moves.is_exhausted() {
            self.end_game();
        }
    }

    fn level_up(&mut self) {
        self.events.push(GameEvent::LevelUp);
        self.level += 1;

        if self.mode == GameMode::Puzzle {
            let next = puzzle::levels().iter().find(|l| l.level == self.level);
            match next {
                Some(def) => {
                    self.moves = Quota::Remaining(def.moves);
                    self.puzzle_target = Some(def.target);
                    self.target_score = match def.target {
                        PuzzleTarget::Score(v) => v,
                        PuzzleTarget::ClearState(_) => 0,
                    };
                    self.score = 0;
                    self.board = puzzle::build_board(def);
                    self.phase = GamePhase::LevelUp;
                }
                None => self.end_game(),
            }
            return;
        }

        match self.mode {
            GameMode::Classic => self.moves.add(20),
            GameMode::Time => self.time_left.add(30),
            _ => {}
        }
        self.target_score += self.level * 1000;
        self.phase = GamePhase::LevelUp;
    }

    fn end_game(&mut self) {
        self.events.push(GameEvent::GameOver);
        self.phase = GamePhase::GameOver;
    }

    fn activate_special(&mut self, at: Coord, kind: SpecialKind) {
        self.events.push(GameEvent::Special);

        let mut cleared = 0;
        for coord in specials::blast_pattern(kind, at) {
            if let Some(cell) = self.board.at(coord) {
                // Blasts remove locked and frozen tiles outright
                if !cell.is_empty() {
                    self.board.clear_at(coord);
                    cleared += 1;
                }
            }
        }
        self.score += scoring::special_score(cleared, self.level);

        self.board.drop_cells();
        self.board.refill_top(&mut self.rng);

        // Special-challenge replenishes the board with a new special for
        // every one spent
        if self.mode == GameMode::SpecialChallenge {
            let coord = self.random_coord();
            let kinds = [SpecialKind::Row, SpecialKind::Col, SpecialKind::Bomb];
            let special = kinds[self.rng.next_range(3) as usize];
            self.stamp_special(coord, special);
        }

        self.begin_cascade();
    }

    fn random_coord(&mut self) -> Coord {
        Coord::new(
            self.rng.next_range(BOARD_SIZE as u32) as usize,
            self.rng.next_range(BOARD_SIZE as u32) as usize,
        )
    }

    /// Turn the tile at `coord` into a special of the given kind, keeping
    /// its color
    fn stamp_special(&mut self, coord: Coord, kind: SpecialKind) {
        if let Some(cell) = self.board.at(coord) {
            if let Some(color) = cell.color {
                self.board.set(coord.row, coord.col, Cell::special(color, kind));
            }
        }
    }
}

fn power_up_index(kind: PowerUpKind) -> usize {
    match kind {
        PowerUpKind::Rearrange => 0,
        PowerUpKind::HintBoost => 1,
        PowerUpKind::SpecialGenerator => 2,
        PowerUpKind::TimeFreeze => 3,
    }
}
