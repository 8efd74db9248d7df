use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::{
    board::{Board, Cell},
    piece::ActivePiece,
    tetromino::{BlockMask, PieceColor, TetrominoKind},
};

use super::{
    clock::{self, FallTimer, SessionClock},
    piece_bag::PieceBag,
    settings::DifficultySource,
    stats::StatsSink,
};

/// Raw points per simultaneous line clear, multiplied by the current level.
const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];
/// Lines needed to advance one level.
const LINES_PER_LEVEL: u32 = 10;

/// Placement-speed bonus tiers: lock within the duration, earn the points
/// (times the current level). Checked in order.
const PLACEMENT_BONUS: [(Duration, u64); 3] = [
    (Duration::from_secs(2), 50),
    (Duration::from_secs(5), 25),
    (Duration::from_secs(10), 10),
];

/// The engine's lifecycle state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    derive_more::Display,
    derive_more::IsVariant,
    Deserialize,
    Serialize,
)]
pub enum GameState {
    /// Waiting for the first `start`.
    #[default]
    #[display("ready")]
    Ready,
    #[display("playing")]
    Playing,
    #[display("paused")]
    Paused,
    #[display("game over")]
    GameOver,
}

/// What a downward step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move: it was locked and a new piece spawned.
    Landed,
    /// The command did not apply in the current state.
    Ignored,
}

/// The game engine: board, falling piece, sequencing, scoring, and timing.
///
/// Single-threaded and cooperatively driven: commands are plain method
/// calls, and instead of owning wall-clock timers the engine keeps
/// deadlines which the host's event loop services by calling
/// [`advance`](Self::advance) with the current time. Commands whose
/// semantics depend on time take an explicit `now`, which also makes every
/// behavior reproducible in tests.
///
/// Collaborators are injected: `D` supplies the difficulty multiplier read
/// on each fall-interval computation, `S` receives final scores and played
/// time at session end (never mid-session).
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use quadfall_engine::{DropSpeed, GameEngine, PlayerStats};
///
/// let mut engine = GameEngine::new(DropSpeed::Normal, PlayerStats::new());
/// let now = Instant::now();
/// engine.start(now);
/// engine.move_left();
/// engine.rotate();
/// engine.advance(now); // fire any due gravity ticks
/// let view = engine.merged_view();
/// ```
#[derive(Debug)]
pub struct GameEngine<D, S> {
    board: Board,
    bag: PieceBag,
    current: ActivePiece,
    next_kind: TetrominoKind,
    state: GameState,
    score: u64,
    lines_cleared: u32,
    level: u32,
    fast_drop: bool,
    fall_timer: FallTimer,
    session: SessionClock,
    piece_spawned_at: Option<Instant>,
    difficulty: D,
    stats: S,
}

impl<D: DifficultySource, S: StatsSink> GameEngine<D, S> {
    /// Creates an engine in the [`Ready`](GameState::Ready) state with an
    /// OS-seeded piece sequence.
    #[must_use]
    pub fn new(difficulty: D, stats: S) -> Self {
        Self::with_bag(difficulty, stats, PieceBag::new())
    }

    /// Creates an engine with a deterministic piece sequence.
    #[must_use]
    pub fn from_seed(difficulty: D, stats: S, seed: u64) -> Self {
        Self::with_bag(difficulty, stats, PieceBag::from_seed(seed))
    }

    fn with_bag(difficulty: D, stats: S, mut bag: PieceBag) -> Self {
        let current = ActivePiece::spawn(bag.next());
        let next_kind = bag.next();
        Self {
            board: Board::new(),
            bag,
            current,
            next_kind,
            state: GameState::Ready,
            score: 0,
            lines_cleared: 0,
            level: 1,
            fast_drop: false,
            fall_timer: FallTimer::default(),
            session: SessionClock::default(),
            piece_spawned_at: None,
            difficulty,
            stats,
        }
    }

    // ---- state machine ----------------------------------------------------

    /// Starts a fresh game. Legal from any state, including mid-game: an
    /// unfinished session's play time is committed to the stats sink before
    /// everything is reset.
    pub fn start(&mut self, now: Instant) {
        let leftover = self.session.take(now);
        if !leftover.is_zero() {
            self.stats.add_time_played(leftover);
        }

        self.board.reset();
        self.score = 0;
        self.lines_cleared = 0;
        self.level = 1;
        self.fast_drop = false;
        self.bag.reset();
        self.next_kind = self.bag.next();
        self.state = GameState::Playing;
        log::debug!("game started");

        self.spawn_next(now);
        if self.state.is_playing() {
            self.session.restart(now);
            self.rearm_fall_timer(now);
        }
    }

    /// Pauses the game. Descent and session time stop immediately; the
    /// board and piece are preserved. No-op unless playing.
    pub fn pause(&mut self, now: Instant) {
        if !self.state.is_playing() {
            return;
        }
        self.state = GameState::Paused;
        self.fall_timer.cancel();
        self.session.pause(now);
        log::debug!("game paused");
    }

    /// Resumes a paused game with the current fall interval. No-op unless
    /// paused.
    pub fn resume(&mut self, now: Instant) {
        if self.state != GameState::Paused {
            return;
        }
        self.state = GameState::Playing;
        self.session.resume(now);
        self.rearm_fall_timer(now);
        log::debug!("game resumed");
    }

    /// Pauses when playing, resumes when paused, otherwise does nothing.
    pub fn toggle_pause(&mut self, now: Instant) {
        match self.state {
            GameState::Playing => self.pause(now),
            GameState::Paused => self.resume(now),
            GameState::Ready | GameState::GameOver => {}
        }
    }

    /// Releases the session without finishing it: cancels the timers and
    /// commits any unreported play time. The game state is left unchanged,
    /// so a host can call this when the player abandons the screen.
    pub fn cleanup(&mut self, now: Instant) {
        self.fall_timer.cancel();
        let leftover = self.session.take(now);
        if !leftover.is_zero() {
            self.stats.add_time_played(leftover);
        }
    }

    fn game_over(&mut self, now: Instant) {
        self.state = GameState::GameOver;
        self.fall_timer.cancel();
        let played = self.session.take(now);
        self.stats.update_high_score(self.score);
        self.stats.add_time_played(played);
        log::debug!(
            "game over: score {} after {} lines",
            self.score,
            self.lines_cleared
        );
    }

    // ---- timed descent ----------------------------------------------------

    /// Fires every gravity tick due at `now`.
    ///
    /// The host's event loop calls this whenever time has passed; each
    /// elapsed fall interval moves the piece down one row through the same
    /// path as a manual soft drop. Does nothing while not playing.
    pub fn advance(&mut self, now: Instant) {
        while self.state.is_playing() {
            let interval = self.current_fall_interval();
            if !self.fall_timer.fire(now, interval) {
                break;
            }
            self.soft_drop(now);
        }
    }

    /// The interval the fall timer is currently running at.
    #[must_use]
    pub fn current_fall_interval(&self) -> Duration {
        clock::fall_interval(self.level, self.fast_drop, self.difficulty.speed_multiplier())
    }

    /// When the next gravity tick is due, if the timer is armed. Lets a
    /// host sleep until exactly the right moment.
    #[must_use]
    pub fn next_fall_deadline(&self) -> Option<Instant> {
        self.fall_timer.deadline()
    }

    fn rearm_fall_timer(&mut self, now: Instant) {
        let interval = self.current_fall_interval();
        self.fall_timer.arm(now, interval);
    }

    /// Enables or disables fast drop; the timer is re-armed so the new rate
    /// applies immediately. No-op unless playing.
    pub fn set_fast_drop(&mut self, active: bool, now: Instant) {
        if !self.state.is_playing() {
            return;
        }
        self.fast_drop = active;
        self.rearm_fall_timer(now);
    }

    /// Re-arms the fall timer after the difficulty setting changed, so the
    /// new multiplier takes effect without waiting for a level-up. No-op
    /// unless playing.
    pub fn apply_speed_setting(&mut self, now: Instant) {
        if !self.state.is_playing() {
            return;
        }
        self.rearm_fall_timer(now);
    }

    // ---- movement commands ------------------------------------------------

    /// Moves the piece one column left if the board allows it.
    pub fn move_left(&mut self) {
        self.try_shift(-1);
    }

    /// Moves the piece one column right if the board allows it.
    pub fn move_right(&mut self) {
        self.try_shift(1);
    }

    fn try_shift(&mut self, dx: i32) {
        if !self.state.is_playing() {
            return;
        }
        let trial = self.current.moved(dx, 0);
        if self.board.can_place(&trial) {
            self.current = trial;
        }
    }

    /// Moves the piece down one row. If the move is blocked the piece has
    /// landed: it is locked, lines are cleared and scored, and the next
    /// piece spawns.
    pub fn soft_drop(&mut self, now: Instant) -> DropOutcome {
        if !self.state.is_playing() {
            return DropOutcome::Ignored;
        }
        let trial = self.current.moved(0, 1);
        if self.board.can_place(&trial) {
            self.current = trial;
            DropOutcome::Moved
        } else {
            self.lock_and_spawn(now);
            DropOutcome::Landed
        }
    }

    /// Drops the piece straight to its resting position and locks it.
    /// Exactly one lock-and-spawn runs.
    pub fn hard_drop(&mut self, now: Instant) {
        while self.soft_drop(now) == DropOutcome::Moved {}
    }

    /// Rotates the piece clockwise, kicking it horizontally by
    /// `-1, +1, -2, +2` columns if the in-place rotation is blocked. If
    /// every kick fails the piece is unchanged.
    pub fn rotate(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        let rotated = self.current.rotated(true);
        if self.board.can_place(&rotated) {
            self.current = rotated;
            return;
        }
        for kick in [-1, 1, -2, 2] {
            let kicked = rotated.moved(kick, 0);
            if self.board.can_place(&kicked) {
                self.current = kicked;
                return;
            }
        }
    }

    // ---- lock, scoring, spawn ---------------------------------------------

    fn lock_and_spawn(&mut self, now: Instant) {
        self.board.lock(&self.current);
        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.apply_line_clear(cleared, now);
        }
        // The bonus applies even without a line clear, at the level the
        // clear (if any) just established.
        self.score += self.placement_bonus(now);
        self.spawn_next(now);
    }

    fn apply_line_clear(&mut self, cleared: usize, now: Instant) {
        #[expect(clippy::cast_possible_truncation)]
        let cleared_u32 = cleared as u32;
        self.lines_cleared += cleared_u32;
        self.score += LINE_SCORES[cleared] * u64::from(self.level);
        log::debug!("cleared {cleared} lines, total {}", self.lines_cleared);

        let new_level = self.lines_cleared / LINES_PER_LEVEL + 1;
        if new_level > self.level {
            self.level = new_level;
            log::debug!("level up to {new_level}");
            self.rearm_fall_timer(now);
        }
    }

    fn placement_bonus(&self, now: Instant) -> u64 {
        let Some(spawned_at) = self.piece_spawned_at else {
            return 0;
        };
        let held = now.saturating_duration_since(spawned_at);
        for (limit, points) in PLACEMENT_BONUS {
            if held < limit {
                return points * u64::from(self.level);
            }
        }
        0
    }

    /// Promotes the preview piece to current, draws a new preview, and
    /// checks for top-out. The piece counts as spawned (timestamp recorded)
    /// before the collision check runs.
    fn spawn_next(&mut self, now: Instant) {
        let piece = ActivePiece::spawn(self.next_kind);
        self.next_kind = self.bag.next();
        self.current = piece;
        self.piece_spawned_at = Some(now);
        if self.board.is_game_over(&piece) {
            self.game_over(now);
        }
    }

    // ---- read surface -----------------------------------------------------

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> ActivePiece {
        self.current
    }

    #[must_use]
    pub fn next_kind(&self) -> TetrominoKind {
        self.next_kind
    }

    /// Preview mask for the next piece, at spawn rotation.
    #[must_use]
    pub fn next_blocks(&self) -> BlockMask {
        self.next_kind.blocks(0)
    }

    #[must_use]
    pub fn next_color(&self) -> PieceColor {
        self.next_kind.color()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    #[must_use]
    pub fn fast_drop_active(&self) -> bool {
        self.fast_drop
    }

    /// Elapsed play time of the current session, excluding paused spans.
    #[must_use]
    pub fn session_time(&self, now: Instant) -> Duration {
        self.session.elapsed(now)
    }

    /// Session time as `m:ss` for display.
    #[must_use]
    pub fn formatted_session_time(&self, now: Instant) -> String {
        clock::format_clock(self.session.elapsed(now))
    }

    /// Locked cells with the falling piece overlaid, for rendering.
    #[must_use]
    pub fn merged_view(&self) -> Vec<Vec<Cell>> {
        self.board.merged_view(&self.current)
    }

    #[must_use]
    pub fn stats(&self) -> &S {
        &self.stats
    }

    #[must_use]
    pub fn difficulty(&self) -> &D {
        &self.difficulty
    }
}
