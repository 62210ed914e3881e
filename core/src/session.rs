use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Setup -> Editing
/// - Editing -> Evaluating
/// - Evaluating -> Editing (route rejected)
/// - Evaluating -> Ended
/// - Editing | Ended -> Setup (reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Setup,
    Editing,
    Evaluating,
    Ended,
}

impl SessionState {
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Editing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ended)
    }
}

/// Inbound events from the input collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    ToggleMark(Coord2),
    Mark(Coord2),
    Unmark(Coord2),
    Evaluate,
    Reset,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Whether the marks connected start to end. Nothing else is meaningful
    /// when this is false.
    pub valid: bool,
    pub player_wins: bool,
    pub mark_count: CellCount,
    /// Cells on the shortest path, endpoints excluded.
    pub optimal_length: CellCount,
}

impl EvaluationResult {
    pub const fn invalid_route(mark_count: CellCount) -> Self {
        Self {
            valid: false,
            player_wins: false,
            mark_count,
            optimal_length: 0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Mark(MarkOutcome),
    Evaluated(EvaluationResult),
    Reset,
}

/// One round of play and the only owner of mutable game state.
#[derive(Clone, Debug)]
pub struct Session<G = RandomGridGenerator> {
    config: GameConfig,
    generator: G,
    grid: Grid,
    start: Coord2,
    end: Coord2,
    mark_count: Saturating<CellCount>,
    optimal_path: Option<Path>,
    last_result: Option<EvaluationResult>,
    state: SessionState,
    round: u32,
}

impl Session<RandomGridGenerator> {
    /// Session whose rounds are drawn from a generator seeded with `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomGridGenerator::new(seed))
    }
}

impl<G: GridGenerator> Session<G> {
    pub fn with_generator(config: GameConfig, mut generator: G) -> Result<Self> {
        let (grid, (start, end)) = Self::setup(&config, &mut generator)?;
        let session = Self {
            config,
            generator,
            grid,
            start,
            end,
            mark_count: Saturating(0),
            optimal_path: None,
            last_result: None,
            state: SessionState::Editing,
            round: 1,
        };
        log::debug!("round {} ready", session.round);
        Ok(session)
    }

    /// Builds a fresh grid. Nothing from a previous round is reused.
    fn setup(config: &GameConfig, generator: &mut G) -> Result<(Grid, (Coord2, Coord2))> {
        let mut grid = generator.generate(config)?;
        grid.clear_marks();
        let endpoints = grid.endpoints().ok_or(GameError::InvalidEndpoints)?;
        Ok((grid, endpoints))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn start(&self) -> Coord2 {
        self.start
    }

    pub fn end(&self) -> Coord2 {
        self.end
    }

    pub fn mark_count(&self) -> CellCount {
        self.mark_count.0
    }

    /// Rounds played so far, counting the current one.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Shortest path of the last successful evaluation.
    pub fn optimal_path(&self) -> Option<&Path> {
        self.optimal_path.as_ref()
    }

    pub fn optimal_length(&self) -> Option<CellCount> {
        self.optimal_path.as_ref().map(Path::len)
    }

    /// Most recent evaluation, including a rejected one.
    pub fn last_result(&self) -> Option<EvaluationResult> {
        self.last_result
    }

    /// Final result, only once the round has ended.
    pub fn outcome(&self) -> Option<EvaluationResult> {
        if self.state.is_finished() {
            self.last_result
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<EventOutcome> {
        use SessionEvent::*;

        Ok(match event {
            ToggleMark(coords) => EventOutcome::Mark(self.toggle_mark(coords)?),
            Mark(coords) => EventOutcome::Mark(self.mark(coords)?),
            Unmark(coords) => EventOutcome::Mark(self.unmark(coords)?),
            Evaluate => EventOutcome::Evaluated(self.evaluate()?),
            Reset => {
                self.reset()?;
                EventOutcome::Reset
            }
        })
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.check_mark_target(coords)?;
        let outcome = self.grid.toggle_player_mark(coords);
        self.count_mark(coords, outcome);
        Ok(outcome)
    }

    pub fn mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.check_mark_target(coords)?;
        let outcome = self.grid.set_player_mark(coords, true);
        self.count_mark(coords, outcome);
        Ok(outcome)
    }

    pub fn unmark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.check_mark_target(coords)?;
        let outcome = self.grid.set_player_mark(coords, false);
        self.count_mark(coords, outcome);
        Ok(outcome)
    }

    fn check_mark_target(&self, coords: Coord2) -> Result<Coord2> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_editing()?;
        Ok(coords)
    }

    fn count_mark(&mut self, coords: Coord2, outcome: MarkOutcome) {
        match outcome {
            MarkOutcome::Marked => self.mark_count += 1,
            MarkOutcome::Unmarked => self.mark_count -= 1,
            MarkOutcome::NoChange => {
                log::debug!("Mark at {:?} left unchanged", coords);
            }
        }
    }

    /// Checks the player's route and, when it connects, scores it against the
    /// shortest path.
    ///
    /// A disconnected route yields `valid: false` and keeps the round in
    /// `Editing`. A connected one ends the round.
    pub fn evaluate(&mut self) -> Result<EvaluationResult> {
        self.check_editing()?;
        self.state = SessionState::Evaluating;

        let mark_count = self.mark_count.0;
        if !player_route_connects(&self.grid, self.start, self.end) {
            log::debug!("Rejected route with {} marks", mark_count);
            let result = EvaluationResult::invalid_route(mark_count);
            self.last_result = Some(result);
            self.state = SessionState::Editing;
            return Ok(result);
        }

        let path = match solve(&mut self.grid, self.start, self.end) {
            SolveOutcome::Found { .. } => reconstruct_path(&self.grid, self.end),
            SolveOutcome::NoPath => None,
        };
        let Some(path) = path else {
            self.state = SessionState::Editing;
            return Err(GameError::NoPathExists);
        };

        let optimal_length = path.len();
        let result = EvaluationResult {
            valid: true,
            player_wins: mark_count <= optimal_length,
            mark_count,
            optimal_length,
        };
        log::debug!(
            "Round {} ended, marks: {}, shortest: {}, player wins: {}",
            self.round,
            mark_count,
            optimal_length,
            result.player_wins
        );

        self.optimal_path = Some(path);
        self.last_result = Some(result);
        self.state = SessionState::Ended;
        Ok(result)
    }

    /// Replaces the whole round with a freshly generated one.
    ///
    /// If generation fails the current round is kept as it was.
    pub fn reset(&mut self) -> Result<()> {
        let previous = self.state;
        self.state = SessionState::Setup;

        let (grid, (start, end)) = match Self::setup(&self.config, &mut self.generator) {
            Ok(round) => round,
            Err(err) => {
                log::warn!("Reset failed, keeping current round: {}", err);
                self.state = previous;
                return Err(err);
            }
        };

        self.grid = grid;
        self.start = start;
        self.end = end;
        self.mark_count = Saturating(0);
        self.optimal_path = None;
        self.last_result = None;
        self.round += 1;
        self.state = SessionState::Editing;
        log::debug!("round {} ready", self.round);
        Ok(())
    }

    fn check_editing(&self) -> Result<()> {
        if self.state.is_editing() {
            Ok(())
        } else {
            Err(GameError::NotEditing)
        }
    }
}
