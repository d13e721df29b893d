//! Engine - the turn-processing state machine
//!
//! The engine owns the board, the active tile types, the RNG and the hint
//! cache. It never waits on anything itself: each step mutates the board,
//! records [`Transition`]s and marks tiles moving. The host animates,
//! reports arrival with [`Engine::settle`] / [`Engine::settle_all`], then
//! calls [`Engine::advance`] for the next step.
//!
//! ```text
//! Idle --request_swap--> Swapping --advance--> Reverting --advance--> Idle
//!                                 \--advance--> Resolving --advance--> ... --> Idle
//! Idle --request_shuffle--> Shuffling --advance--> Idle
//! ```

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::board::{Board, TileId, Transition, TransitionKind};
use crate::cascade::{pick_special_candidate, plan_round};
use crate::config::EngineConfig;
use crate::hint::{HintStatus, HintTracker};
use crate::matcher::find_matches;
use crate::refill::{generate_board, refill, spawn_checked};
use crate::rng::{ActiveTypeSet, SimpleRng};
use crate::session::Session;
use crate::shuffle::shuffle_board;
use crate::snapshot::BoardSnapshot;
use crate::types::{Coord, EngineError, SpecialKind, SwapRejection, ValidMove};

/// Upper bound on `advance` calls in one [`Engine::drive`]
const DRIVE_STEP_LIMIT: u32 = 10_000;

/// Shuffles `drive` may request before giving up on a deadlocked board
const DRIVE_SHUFFLE_LIMIT: u32 = 3;

/// Mixed into the seed for the hint stream
const HINT_SEED_SALT: u32 = 0x9e37_79b9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Tiles exchanged, waiting for them to arrive
    Swapping { first: Coord, second: Coord },
    /// Swap produced nothing and is being undone
    Reverting,
    /// Round `round` was applied, waiting for the refill to land
    Resolving { round: u32 },
    Shuffling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    Accepted,
    Rejected(SwapRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleOutcome {
    Shuffled { preserved: usize },
    Rejected(SwapRejection),
}

/// What one resolution round did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u32,
    pub destroyed: usize,
    /// Specials that fired
    pub activated: usize,
    /// Special promoted this round
    pub created: Option<(Coord, SpecialKind)>,
    pub spawned: usize,
    /// Refill slots left empty for lack of an archetype
    pub missing: usize,
}

/// Result of [`Engine::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Tiles are still moving; nothing was done
    Waiting,
    /// The swap matched nothing and was undone
    Reverted,
    Round(RoundReport),
    /// Nothing left to process
    Idle { deadlocked: bool },
}

/// Totals from a headless [`Engine::drive`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveReport {
    pub rounds: u32,
    pub tiles_destroyed: usize,
    pub specials_created: u32,
    pub shuffles: u32,
    pub reverted: bool,
    /// Set when `play_swap` was turned away before anything happened
    pub rejected: Option<SwapRejection>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    board: Board,
    types: ActiveTypeSet,
    rng: SimpleRng,
    /// Hint picks only, so asking for a hint never changes the game
    hint_rng: SimpleRng,
    phase: Phase,
    /// Dragged tile first, then its partner
    swapped: ArrayVec<TileId, 2>,
    hints: HintTracker,
    transitions: Vec<Transition>,
}

impl Engine {
    /// Draw the active types and generate a playable starting board
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = SimpleRng::new(config.seed);
        let types =
            ActiveTypeSet::draw(&config.master_palette, config.active_type_count, &mut rng)?;
        let mut board = Board::new(config.width, config.height);
        generate_board(&mut board, &types, &mut rng, config.spawn_limits(), true)?;

        Ok(Self::assemble(config, board, types, rng))
    }

    /// Start from a prepared board; the board's size wins over the config's
    pub fn with_board(config: EngineConfig, board: Board) -> Result<Self, EngineError> {
        config.validate_types()?;
        let mut rng = SimpleRng::new(config.seed);
        let types =
            ActiveTypeSet::draw(&config.master_palette, config.active_type_count, &mut rng)?;

        Ok(Self::assemble(config, board, types, rng))
    }

    fn assemble(config: EngineConfig, board: Board, types: ActiveTypeSet, rng: SimpleRng) -> Self {
        let hint_rng = SimpleRng::new(config.seed ^ HINT_SEED_SALT);
        let mut engine = Self {
            config,
            board,
            types,
            rng,
            hint_rng,
            phase: Phase::Idle,
            swapped: ArrayVec::new(),
            hints: HintTracker::new(),
            transitions: Vec::new(),
        };
        engine.refresh_hints();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for tests and tools; call `refresh_hints` after
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active_types(&self) -> &ActiveTypeSet {
        &self.types
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_board_processing(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn hints(&self) -> &HintTracker {
        &self.hints
    }

    pub fn valid_moves(&self) -> &[ValidMove] {
        self.hints.moves()
    }

    pub fn is_deadlocked(&self) -> bool {
        self.hints.is_deadlocked()
    }

    pub fn refresh_hints(&mut self) -> HintStatus {
        let status = self.hints.refresh(&self.board);
        if status == HintStatus::NoMoves {
            warn!("no valid moves left");
        }
        status
    }

    /// Highlight a random valid move
    pub fn request_hint(&mut self) -> Option<ValidMove> {
        if self.is_board_processing() {
            return None;
        }
        self.hints.request_hint(&mut self.hint_rng)
    }

    pub fn clear_hint(&mut self) {
        self.hints.clear_hint();
    }

    /// Pending visual changes, oldest first
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn drain_transitions(&mut self) -> std::vec::Drain<'_, Transition> {
        self.transitions.drain(..)
    }

    pub fn settle(&mut self, id: TileId) -> bool {
        self.board.settle(id)
    }

    pub fn settle_all(&mut self) {
        self.board.settle_all();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snap = BoardSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.fill_from(&self.board);
        out.processing = self.is_board_processing();
    }

    fn push_move(&mut self, id: TileId, from: Coord) {
        self.board.mark_moving(id);
        if let Some(t) = self.board.tile(id) {
            self.transitions.push(Transition {
                tile: id,
                serial: t.serial,
                kind: TransitionKind::Moved { from },
                to: t.coord(),
            });
        }
    }

    /// Exchange two adjacent tiles and start processing the swap
    pub fn request_swap(&mut self, a: Coord, b: Coord, session: &dyn Session) -> SwapOutcome {
        if self.is_board_processing() {
            return SwapOutcome::Rejected(SwapRejection::Processing);
        }
        if session.is_session_over() {
            return SwapOutcome::Rejected(SwapRejection::SessionOver);
        }
        if !self.board.contains(a) || !self.board.contains(b) {
            return SwapOutcome::Rejected(SwapRejection::OutOfBounds);
        }
        if !a.is_adjacent(b) {
            return SwapOutcome::Rejected(SwapRejection::NotAdjacent);
        }
        let ia = self.board.tile_id_at(a.x, a.y);
        let ib = self.board.tile_id_at(b.x, b.y);
        let (Some(ia), Some(ib)) = (ia, ib) else {
            return SwapOutcome::Rejected(SwapRejection::EmptyCell);
        };

        self.board.swap_positions(a, b);
        self.push_move(ia, a);
        self.push_move(ib, b);

        self.swapped.clear();
        self.swapped.push(ia);
        self.swapped.push(ib);
        self.hints.invalidate();
        self.phase = Phase::Swapping {
            first: a,
            second: b,
        };
        debug!(%a, %b, "swap accepted");
        SwapOutcome::Accepted
    }

    /// Regenerate a board, keeping its specials
    pub fn request_shuffle(
        &mut self,
        session: &dyn Session,
    ) -> Result<ShuffleOutcome, EngineError> {
        if self.is_board_processing() {
            return Ok(ShuffleOutcome::Rejected(SwapRejection::Processing));
        }
        if session.is_session_over() {
            return Ok(ShuffleOutcome::Rejected(SwapRejection::SessionOver));
        }

        let report = shuffle_board(
            &mut self.board,
            &self.types,
            &mut self.rng,
            self.config.spawn_limits(),
            &mut self.transitions,
        )?;
        self.hints.invalidate();
        self.phase = Phase::Shuffling;
        Ok(ShuffleOutcome::Shuffled {
            preserved: report.preserved,
        })
    }

    /// Run the next processing step once the board has settled
    pub fn advance(&mut self, session: &mut dyn Session) -> Advance {
        if !self.board.is_settled() {
            return Advance::Waiting;
        }

        match self.phase {
            Phase::Idle => Advance::Idle {
                deadlocked: self.hints.is_deadlocked(),
            },
            Phase::Swapping { first, second } => {
                let mut processing = find_matches(&self.board);
                for &id in &self.swapped {
                    let special = self.board.tile(id).is_some_and(|t| t.is_special());
                    if special && !processing.contains(&id) {
                        processing.push(id);
                    }
                }

                if processing.is_empty() {
                    self.revert_swap(first, second);
                    return Advance::Reverted;
                }

                session.on_move_consumed();
                Advance::Round(self.run_round(1, &processing, session))
            }
            Phase::Reverting => self.finish_turn(session),
            Phase::Resolving { round } => {
                let processing = find_matches(&self.board);
                if processing.is_empty() {
                    return self.finish_turn(session);
                }
                Advance::Round(self.run_round(round + 1, &processing, session))
            }
            Phase::Shuffling => {
                self.phase = Phase::Idle;
                let status = self.refresh_hints();
                Advance::Idle {
                    deadlocked: status == HintStatus::NoMoves,
                }
            }
        }
    }

    fn revert_swap(&mut self, first: Coord, second: Coord) {
        self.board.swap_positions(first, second);
        let ids = self.swapped.clone();
        if let [ia, ib] = ids.as_slice() {
            self.push_move(*ia, second);
            self.push_move(*ib, first);
        }
        self.swapped.clear();
        self.phase = Phase::Reverting;
        debug!(%first, %second, "swap reverted");
    }

    fn finish_turn(&mut self, session: &mut dyn Session) -> Advance {
        self.phase = Phase::Idle;
        self.swapped.clear();
        session.on_turn_finished();
        let status = self.refresh_hints();
        Advance::Idle {
            deadlocked: status == HintStatus::NoMoves,
        }
    }

    fn run_round(
        &mut self,
        round: u32,
        processing: &[TileId],
        session: &mut dyn Session,
    ) -> RoundReport {
        let plan = plan_round(&self.board, processing);
        let dragged = if round == 1 { self.swapped.first().copied() } else { None };
        let candidate = pick_special_candidate(&self.board, processing, dragged);

        let mut destroy = plan.destroy;
        let mut created = None;
        if let Some(id) = candidate {
            destroy.remove(id);
            if let Some(old) = self.board.remove_tile(id) {
                let kind = self.rng.next_special();
                let at = old.coord();
                let spawned =
                    spawn_checked(&mut self.board, &self.types, at, old.type_index, kind);
                if let Some(new_id) = spawned {
                    if let Some(t) = self.board.tile(new_id) {
                        self.transitions.push(Transition {
                            tile: new_id,
                            serial: t.serial,
                            kind: TransitionKind::Replaced,
                            to: at,
                        });
                    }
                    created = Some((at, kind));
                }
            }
        }

        let destroyed = destroy
            .iter()
            .filter(|&id| self.board.remove_tile(id).is_some())
            .count();
        session.on_tiles_destroyed(destroyed as u32);

        let refilled = refill(
            &mut self.board,
            &self.types,
            &mut self.rng,
            self.config.max_spawn_attempts,
            &mut self.transitions,
        );
        self.phase = Phase::Resolving { round };

        debug!(
            round,
            destroyed,
            activated = plan.activated,
            created = created.is_some(),
            "cascade round"
        );
        RoundReport {
            round,
            destroyed,
            activated: plan.activated,
            created,
            spawned: refilled.spawned,
            missing: refilled.missing,
        }
    }

    /// Settle and advance until idle, shuffling a deadlocked board
    ///
    /// This is the headless host: transitions are discarded and every tile
    /// is reported as arrived immediately.
    pub fn drive(&mut self, session: &mut dyn Session) -> Result<DriveReport, EngineError> {
        let mut report = DriveReport::default();

        for _ in 0..DRIVE_STEP_LIMIT {
            self.board.settle_all();
            self.transitions.clear();

            match self.advance(session) {
                Advance::Waiting => {}
                Advance::Reverted => report.reverted = true,
                Advance::Round(r) => {
                    report.rounds += 1;
                    report.tiles_destroyed += r.destroyed;
                    if r.created.is_some() {
                        report.specials_created += 1;
                    }
                }
                Advance::Idle { deadlocked: false } => break,
                Advance::Idle { deadlocked: true } => {
                    if report.shuffles >= DRIVE_SHUFFLE_LIMIT {
                        break;
                    }
                    match self.request_shuffle(session)? {
                        ShuffleOutcome::Shuffled { .. } => report.shuffles += 1,
                        ShuffleOutcome::Rejected(_) => break,
                    }
                }
            }
        }

        self.board.settle_all();
        self.transitions.clear();
        Ok(report)
    }

    /// Swap and resolve everything in one call
    pub fn play_swap(
        &mut self,
        a: Coord,
        b: Coord,
        session: &mut dyn Session,
    ) -> Result<DriveReport, EngineError> {
        if let SwapOutcome::Rejected(reason) = self.request_swap(a, b, session) {
            return Ok(DriveReport {
                rejected: Some(reason),
                ..DriveReport::default()
            });
        }
        self.drive(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::has_matches;
    use crate::session::MoveBudgetSession;

    /// 8x8 board with no match and no valid move: type (x + 3y) % 6
    fn deadlocked_board() -> Board {
        let mut board = Board::new(8, 8);
        for x in 0..8 {
            for y in 0..8 {
                board.spawn(x, y, ((x + 3 * y) % 6) as u8, SpecialKind::None);
            }
        }
        board
    }

    fn engine_with(board: Board) -> Engine {
        Engine::with_board(EngineConfig::default(), board).unwrap()
    }

    #[test]
    fn test_new_engine_is_idle_and_playable() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!engine.is_board_processing());
        assert!(!has_matches(engine.board()));
        assert!(!engine.valid_moves().is_empty());
        assert_eq!(engine.active_types().len(), 6);
    }

    #[test]
    fn test_swap_rejections() {
        let mut engine = engine_with(deadlocked_board());
        let session = MoveBudgetSession::default();
        let a = Coord::new(0, 0);

        assert_eq!(
            engine.request_swap(a, Coord::new(2, 0), &session),
            SwapOutcome::Rejected(SwapRejection::NotAdjacent)
        );
        assert_eq!(
            engine.request_swap(a, Coord::new(-1, 0), &session),
            SwapOutcome::Rejected(SwapRejection::OutOfBounds)
        );

        engine.board_mut().remove(1, 0);
        assert_eq!(
            engine.request_swap(a, Coord::new(1, 0), &session),
            SwapOutcome::Rejected(SwapRejection::EmptyCell)
        );

        assert_eq!(
            engine.request_swap(a, Coord::new(0, 1), &session),
            SwapOutcome::Accepted
        );
        assert_eq!(
            engine.request_swap(Coord::new(3, 3), Coord::new(3, 4), &session),
            SwapOutcome::Rejected(SwapRejection::Processing)
        );
    }

    #[test]
    fn test_session_over_blocks_swaps() {
        let mut engine = engine_with(deadlocked_board());
        let mut session = MoveBudgetSession::new(0);
        session.on_turn_finished();
        assert_eq!(
            engine.request_swap(Coord::new(0, 0), Coord::new(1, 0), &session),
            SwapOutcome::Rejected(SwapRejection::SessionOver)
        );
        assert_eq!(
            engine.request_shuffle(&session).unwrap(),
            ShuffleOutcome::Rejected(SwapRejection::SessionOver)
        );
    }

    #[test]
    fn test_advance_waits_for_settle() {
        let mut engine = engine_with(deadlocked_board());
        let mut session = MoveBudgetSession::default();
        engine.request_swap(Coord::new(0, 0), Coord::new(1, 0), &session);

        assert_eq!(engine.advance(&mut session), Advance::Waiting);
        assert_eq!(engine.transitions().len(), 2);

        let ids: Vec<TileId> = engine.drain_transitions().map(|t| t.tile).collect();
        for id in ids {
            engine.settle(id);
        }
        assert_eq!(engine.advance(&mut session), Advance::Reverted);
    }

    #[test]
    fn test_fruitless_swap_reverts_without_cost() {
        let mut engine = engine_with(deadlocked_board());
        let before = engine.board().to_rows();
        let mut session = MoveBudgetSession::default();

        engine.request_swap(Coord::new(0, 0), Coord::new(1, 0), &session);
        engine.settle_all();
        assert_eq!(engine.advance(&mut session), Advance::Reverted);
        assert_eq!(engine.phase(), Phase::Reverting);
        assert_eq!(engine.transitions().len(), 4);

        engine.settle_all();
        assert_eq!(
            engine.advance(&mut session),
            Advance::Idle { deadlocked: true }
        );
        assert_eq!(engine.board().to_rows(), before);
        assert_eq!(session.moves_left(), 30);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_swap_resolves_three_run() {
        let mut board = deadlocked_board();
        // Row 3 reads 3 4 5 0 2 2 3 2; moving the last 2 left lines up three
        board.remove(4, 3);
        board.spawn(4, 3, 2, SpecialKind::None);
        board.remove(7, 3);
        board.spawn(7, 3, 2, SpecialKind::None);
        let mut engine = engine_with(board);
        let mut session = MoveBudgetSession::default();

        assert_eq!(
            engine.request_swap(Coord::new(7, 3), Coord::new(6, 3), &session),
            SwapOutcome::Accepted
        );
        engine.settle_all();
        let Advance::Round(first) = engine.advance(&mut session) else {
            panic!("expected a round");
        };
        assert_eq!(first.round, 1);
        assert_eq!(first.destroyed, 3);
        assert_eq!(first.created, None);
        assert_eq!(first.spawned, 3);
        assert_eq!(session.score(), 30);
        assert_eq!(session.moves_left(), 29);
        assert!(matches!(engine.phase(), Phase::Resolving { round: 1 }));

        engine.drive(&mut session).unwrap();
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!has_matches(engine.board()));
        assert_eq!(engine.board().len(), 64);
    }

    #[test]
    fn test_special_swap_clears_row() {
        let mut board = deadlocked_board();
        board.remove(3, 4);
        board.spawn(3, 4, 3, SpecialKind::HorizontalClear);
        let mut engine = engine_with(board);
        let mut session = MoveBudgetSession::default();

        engine.request_swap(Coord::new(3, 4), Coord::new(3, 3), &session);
        engine.settle_all();
        let Advance::Round(first) = engine.advance(&mut session) else {
            panic!("expected a round");
        };
        assert_eq!(first.destroyed, 8);
        assert_eq!(first.activated, 1);
        assert_eq!(session.score(), 80);
    }

    #[test]
    fn test_four_match_promotes_dragged_tile() {
        let mut board = deadlocked_board();
        // Row 1 becomes 3 4 0 0 1 0 3 4; dragging the 0 at (4,2) down makes four
        for c in [Coord::new(2, 1), Coord::new(5, 1), Coord::new(4, 2)] {
            board.remove(c.x, c.y);
            board.spawn(c.x, c.y, 0, SpecialKind::None);
        }
        let mut engine = engine_with(board);
        let mut session = MoveBudgetSession::default();

        engine.request_swap(Coord::new(4, 2), Coord::new(4, 1), &session);
        engine.settle_all();
        let Advance::Round(first) = engine.advance(&mut session) else {
            panic!("expected a round");
        };
        let (at, kind) = first.created.unwrap();
        assert_eq!(at, Coord::new(4, 1));
        assert!(kind.is_special());
        assert_eq!(first.destroyed, 3);
        assert_eq!(session.score(), 30);

        // Nothing below it was destroyed, so the special stays put
        let special = engine.board().get(4, 1).unwrap();
        assert_eq!(special.type_index, 0);
        assert_eq!(special.special, kind);
    }

    #[test]
    fn test_four_match_by_partner_promotes_first_member() {
        let mut board = deadlocked_board();
        for c in [Coord::new(2, 1), Coord::new(5, 1), Coord::new(4, 2)] {
            board.remove(c.x, c.y);
            board.spawn(c.x, c.y, 0, SpecialKind::None);
        }
        let mut engine = engine_with(board);
        let mut session = MoveBudgetSession::default();

        // Dragging the 1 up leaves the partner to complete the four
        engine.request_swap(Coord::new(4, 1), Coord::new(4, 2), &session);
        engine.settle_all();
        let Advance::Round(first) = engine.advance(&mut session) else {
            panic!("expected a round");
        };
        let (at, kind) = first.created.unwrap();
        assert_eq!(at, Coord::new(2, 1));
        assert_eq!(first.destroyed, 3);

        let special = engine.board().get(2, 1).unwrap();
        assert_eq!(special.type_index, 0);
        assert_eq!(special.special, kind);
    }

    #[test]
    fn test_deadlock_triggers_single_shuffle() {
        let mut engine = engine_with(deadlocked_board());
        let mut session = MoveBudgetSession::default();
        assert!(engine.is_deadlocked());
        assert_eq!(
            engine.advance(&mut session),
            Advance::Idle { deadlocked: true }
        );

        let report = engine.drive(&mut session).unwrap();
        assert_eq!(report.shuffles, 1);
        assert!(!engine.is_deadlocked());
        assert!(!has_matches(engine.board()));
        assert_eq!(session.moves_left(), 30);
    }

    #[test]
    fn test_processing_board_is_not_deadlocked() {
        let mut engine = Engine::new(EngineConfig::default().with_seed(5)).unwrap();
        let mut session = MoveBudgetSession::default();
        let hint = engine.request_hint().unwrap();
        engine.request_swap(hint.first, hint.second, &session);

        assert_eq!(engine.hints().status(), HintStatus::Stale);
        assert!(!engine.is_deadlocked());
        engine.settle_all();
        assert!(matches!(engine.advance(&mut session), Advance::Round(_)));
        assert!(!engine.is_deadlocked());

        engine.drive(&mut session).unwrap();
        assert!(matches!(engine.hints().status(), HintStatus::Available(_)));
    }

    #[test]
    fn test_hints_do_not_change_the_game() {
        let play = |hints_requested: usize| {
            let mut engine = Engine::new(EngineConfig::default().with_seed(17)).unwrap();
            let mut session = MoveBudgetSession::default();
            let mv = engine.valid_moves()[0];
            for _ in 0..hints_requested {
                engine.request_hint();
            }
            engine.play_swap(mv.first, mv.second, &mut session).unwrap();
            (engine.board().to_rows(), session.score())
        };
        assert_eq!(play(0), play(5));
    }

    #[test]
    fn test_hint_blocked_while_processing() {
        let mut engine = Engine::new(EngineConfig::default().with_seed(5)).unwrap();
        let session = MoveBudgetSession::default();
        let hint = engine.request_hint().unwrap();
        assert!(engine.valid_moves().contains(&hint));

        engine.request_swap(hint.first, hint.second, &session);
        assert!(engine.request_hint().is_none());
    }
}
