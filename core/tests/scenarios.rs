use pathgame_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn grid_with(size: Coord2, start: Coord2, end: Coord2) -> Grid {
    let mut grid = Grid::new(size);
    grid.set_endpoints(start, end).unwrap();
    grid
}

fn preset_session(grid: Grid) -> Session<PresetGridGenerator> {
    let config = GameConfig::new(grid.size(), (0, 0));
    Session::with_generator(config, PresetGridGenerator::new(grid)).unwrap()
}

#[test]
fn open_grid_straight_line() {
    let mut grid = grid_with((5, 5), (0, 0), (0, 4));

    let outcome = solve(&mut grid, (0, 0), (0, 4));

    assert_eq!(outcome, SolveOutcome::Found { distance: 4 });
}

#[test]
fn wall_row_separates_start_from_end() {
    let mut grid = grid_with((5, 5), (0, 0), (4, 0));
    for col in 0..5 {
        assert!(grid.toggle_obstacle((2, col)));
    }

    let outcome = solve(&mut grid, (0, 0), (4, 0));

    assert_eq!(outcome, SolveOutcome::NoPath);
    assert!(!outcome.is_found());
}

#[test]
fn l_shaped_route_ties_the_optimum() {
    let grid = grid_with((5, 5), (0, 0), (2, 3));
    let mut session = preset_session(grid);
    for pos in [(1, 0), (2, 0), (2, 1), (2, 2)] {
        session.handle(SessionEvent::ToggleMark(pos)).unwrap();
    }
    assert!(player_route_connects(session.grid(), (0, 0), (2, 3)));

    let result = session.evaluate().unwrap();

    assert!(result.valid);
    assert_eq!(result.mark_count, 4);
    assert_eq!(result.optimal_length, 4);
    assert!(result.player_wins);
    assert_eq!(session.state(), SessionState::Ended);
}

#[test]
fn gap_in_route_is_rejected() {
    let grid = grid_with((5, 5), (0, 0), (2, 3));
    let mut session = preset_session(grid);
    for pos in [(1, 0), (2, 0), (2, 2)] {
        session.handle(SessionEvent::ToggleMark(pos)).unwrap();
    }
    assert!(!player_route_connects(session.grid(), (0, 0), (2, 3)));

    let outcome = session.handle(SessionEvent::Evaluate).unwrap();

    assert_eq!(
        outcome,
        EventOutcome::Evaluated(EvaluationResult::invalid_route(3))
    );
    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.optimal_path(), None);
}

#[test]
fn repeated_solves_agree() {
    let mut session = Session::new(GameConfig::classic().with_keep_route_open(true), 77).unwrap();
    let (start, end) = (session.start(), session.end());
    let mut grid = session.grid().clone();

    assert!(solve(&mut grid, start, end).is_found());
    let first = reconstruct_path(&grid, end).unwrap();
    assert!(solve(&mut grid, start, end).is_found());
    let second = reconstruct_path(&grid, end).unwrap();

    assert_eq!(first, second);

    // a session walking its own optimal path always wins
    for &pos in first.cells() {
        session.mark(pos).unwrap();
    }
    let result = session.evaluate().unwrap();
    assert!(result.player_wins);
    assert_eq!(result.optimal_length, first.len());
}

#[test]
fn bend_around_the_straight_line_loses() {
    let grid = grid_with((7, 7), (3, 0), (3, 6));
    let mut session = preset_session(grid);
    // straight along row 3 except for a bump through row 2
    for pos in [(3, 1), (3, 2), (2, 2), (2, 3), (2, 4), (3, 4), (3, 5)] {
        assert_eq!(session.mark(pos).unwrap(), MarkOutcome::Marked);
    }

    let result = session.evaluate().unwrap();

    assert!(result.valid);
    assert!(!result.player_wins);
    assert_eq!(result.mark_count, 7);
    assert_eq!(result.optimal_length, 5);
}

#[test]
fn optimal_route_with_a_spur_loses() {
    let mut checked = 0;

    for seed in 0..40 {
        let mut session = Session::new(GameConfig::new((10, 10), (2, 8)), seed).unwrap();
        let (start, end) = (session.start(), session.end());
        let mut grid = session.grid().clone();
        assert!(solve(&mut grid, start, end).is_found());
        let path = reconstruct_path(&grid, end).unwrap();

        // one free cell hanging off the route, connected but never needed
        let spur = path.cells().iter().find_map(|&pos| {
            neighbors_of(&grid, pos).into_iter().find(|&n| {
                !path.contains(n) && !grid.is_obstacle(n) && !grid.is_endpoint(n)
            })
        });
        let Some(spur) = spur else {
            continue;
        };

        for &pos in path.cells() {
            session.mark(pos).unwrap();
        }
        assert_eq!(session.mark(spur).unwrap(), MarkOutcome::Marked);

        let result = session.evaluate().unwrap();
        assert!(result.valid);
        assert!(!result.player_wins);
        assert_eq!(result.mark_count, result.optimal_length + 1);
        checked += 1;
    }

    assert!(checked > 30);
}

#[test]
fn reset_clears_previous_round() {
    let mut session = Session::new(GameConfig::classic(), 3).unwrap();
    let free = session
        .grid()
        .iter()
        .find(|(_, cell)| !cell.is_obstacle() && !cell.role().is_endpoint())
        .map(|(pos, _)| pos)
        .unwrap();
    session.mark(free).unwrap();

    session.handle(SessionEvent::Reset).unwrap();

    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.mark_count(), 0);
    assert_eq!(session.grid().mark_count(), 0);
    assert_eq!(session.grid().obstacle_count() % 4, 0);
    let blocks = session.grid().obstacle_count() / 4;
    assert!((5..=15).contains(&blocks));
}

#[test]
fn endpoints_stay_clear_across_rounds() {
    let mut session = Session::new(GameConfig::new((8, 8), (3, 10)), 2024).unwrap();

    for _ in 0..30 {
        let (start, end) = (session.start(), session.end());
        assert_ne!(start, end);
        assert!(!are_adjacent(start, end));
        assert!(!session.grid()[start].is_obstacle());
        assert!(!session.grid()[end].is_obstacle());
        assert_eq!(session.grid()[start].role(), CellRole::Start);
        assert_eq!(session.grid()[end].role(), CellRole::End);

        for pos in [start, end] {
            assert_eq!(session.toggle_mark(pos).unwrap(), MarkOutcome::NoChange);
        }

        session.reset().unwrap();
    }
}

#[test]
fn obstacle_blocks_never_share_cells() {
    for seed in 0..100 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = Grid::new((12, 12));
        let (start, end) = grid.place_start_and_end(&mut rng).unwrap();

        let placed = place_obstacles(&mut grid, 20, false, &mut rng);

        assert!(placed <= 20);
        assert_eq!(grid.obstacle_count(), placed * 4);
        assert!(!grid.is_obstacle(start));
        assert!(!grid.is_obstacle(end));
    }
}

#[test]
fn blocked_layout_reports_missing_path() {
    // marks cannot sit on obstacles, so a blocked grid never validates a route
    let mut grid = grid_with((5, 5), (0, 0), (4, 0));
    for col in 0..5 {
        grid.toggle_obstacle((2, col));
    }
    let mut session = preset_session(grid);
    session.mark((1, 0)).unwrap();
    session.mark((3, 0)).unwrap();

    assert_eq!(session.mark((2, 0)).unwrap(), MarkOutcome::NoChange);
    let result = session.evaluate().unwrap();
    assert!(!result.valid);
}

#[test]
fn same_seed_replays_same_rounds() {
    let config = GameConfig::classic();
    let mut first = Session::new(config, 99).unwrap();
    let mut second = Session::new(config, 99).unwrap();

    for _ in 0..5 {
        assert_eq!(first.grid(), second.grid());
        first.reset().unwrap();
        second.reset().unwrap();
    }
}
