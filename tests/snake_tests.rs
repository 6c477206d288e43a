// Host-side tests for the snake rules and its frame clock.

use glam::IVec2;
use studio_core::snake::{start_cell, Direction, SnakeGame, TickOutcome};
use studio_core::SNAKE_TICK_MS;

fn cells(g: &SnakeGame) -> Vec<IVec2> {
    g.body().collect()
}

#[test]
fn single_cell_moves_one_step() {
    let mut g = SnakeGame::with_state(&[IVec2::new(5, 5)], Direction::Up, IVec2::new(0, 0), 1);
    assert_eq!(g.tick(), TickOutcome::Moved);
    assert_eq!(cells(&g), vec![IVec2::new(5, 4)]);
}

#[test]
fn eating_grows_and_wins() {
    let mut g = SnakeGame::with_state(&[IVec2::new(5, 5)], Direction::Up, IVec2::new(5, 4), 1);
    assert_eq!(g.tick(), TickOutcome::Ate);
    assert_eq!(cells(&g), vec![IVec2::new(5, 4), IVec2::new(5, 5)]);
    assert!(g.won());
    assert!(!g.completed());
    assert!(g.body().all(|c| c != g.food()));
    // frozen once won
    assert_eq!(g.tick(), TickOutcome::Idle);
}

#[test]
fn wall_hit_resets_to_the_start_cell() {
    let mut g = SnakeGame::with_state(&[IVec2::new(19, 7)], Direction::Right, IVec2::new(0, 0), 1);
    assert_eq!(g.tick(), TickOutcome::Reset);
    assert_eq!(cells(&g), vec![start_cell()]);
    assert!(g.started());
}

#[test]
fn running_into_itself_resets() {
    let body = [
        IVec2::new(5, 5),
        IVec2::new(6, 5),
        IVec2::new(6, 6),
        IVec2::new(5, 6),
        IVec2::new(4, 6),
    ];
    let mut g = SnakeGame::with_state(&body, Direction::Down, IVec2::new(0, 0), 1);
    assert_eq!(g.tick(), TickOutcome::Reset);
    assert_eq!(g.len(), 1);
}

#[test]
fn two_quick_turns_cannot_reverse() {
    let mut g = SnakeGame::with_state(&[IVec2::new(5, 5)], Direction::Up, IVec2::new(0, 0), 1);
    assert!(g.steer(Direction::Left));
    assert!(!g.steer(Direction::Down));
    g.tick();
    assert_eq!(g.head(), IVec2::new(4, 5));
    // now moving left, so vertical turns are allowed again
    assert!(g.steer(Direction::Down));
    assert!(!g.steer(Direction::Right));
}

#[test]
fn clock_ticks_every_interval_and_caps_catch_up() {
    let mut g = SnakeGame::with_state(&[IVec2::new(10, 10)], Direction::Up, IVec2::new(0, 19), 1);
    assert_eq!(g.advance(SNAKE_TICK_MS - 1.0).ticks, 0);
    assert_eq!(g.advance(1.0).ticks, 1);
    assert_eq!(g.head(), IVec2::new(10, 9));

    // a long stall never replays more than a handful of moves
    let update = g.advance(10_000.0);
    assert_eq!(update.ticks, 4);
    assert_eq!(g.head(), IVec2::new(10, 5));
}

#[test]
fn completion_fires_a_second_after_eating() {
    let mut g = SnakeGame::with_state(&[IVec2::new(3, 3)], Direction::Right, IVec2::new(4, 3), 9);
    let update = g.advance(SNAKE_TICK_MS);
    assert!(update.ate);
    assert!(!update.completed);

    assert!(!g.advance(999.0).completed);
    let update = g.advance(1.0);
    assert!(update.completed);
    assert!(g.completed());
    // reported only once
    assert!(!g.advance(500.0).completed);
}

#[test]
fn unstarted_game_stays_put() {
    let mut g = SnakeGame::new(5);
    assert!(!g.started());
    assert_eq!(g.advance(5_000.0).ticks, 0);
    assert!(!g.steer(Direction::Left));
    assert_eq!(cells(&g), vec![start_cell()]);
    assert_ne!(g.food(), start_cell());
}

#[test]
fn restart_clears_a_finished_round() {
    let mut g = SnakeGame::with_state(&[IVec2::new(3, 3)], Direction::Right, IVec2::new(4, 3), 2);
    g.advance(SNAKE_TICK_MS);
    assert!(g.won());
    g.start();
    assert!(!g.won());
    assert_eq!(cells(&g), vec![start_cell()]);
    assert_eq!(g.direction(), Direction::Up);
}
