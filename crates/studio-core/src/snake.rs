//! Grid snake played inside the modal at the final stage.
//!
//! Time comes in as frame deltas and is banked in an accumulator so the
//! game always moves once every [`SNAKE_TICK_MS`] regardless of frame rate.

use crate::constants::{SNAKE_COMPLETE_DELAY_MS, SNAKE_GRID_SIZE, SNAKE_START_CELL, SNAKE_TICK_MS};
use fnv::FnvHashSet;
use glam::IVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

// After a long stall (hidden tab) only a few moves are replayed.
const MAX_CATCH_UP_TICKS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Moved,
    Ate,
    Reset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnakeUpdate {
    pub ticks: u32,
    pub ate: bool,
    pub resets: u32,
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct SnakeGame {
    body: VecDeque<IVec2>,
    direction: Direction,
    last_moved: Direction,
    food: IVec2,
    started: bool,
    won: bool,
    completed: bool,
    accumulator_ms: f64,
    completion_in_ms: Option<f64>,
    rng: StdRng,
}

pub fn start_cell() -> IVec2 {
    IVec2::new(SNAKE_START_CELL.0, SNAKE_START_CELL.1)
}

fn in_bounds(c: IVec2) -> bool {
    (0..SNAKE_GRID_SIZE).contains(&c.x) && (0..SNAKE_GRID_SIZE).contains(&c.y)
}

impl SnakeGame {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let body: VecDeque<IVec2> = std::iter::once(start_cell()).collect();
        let food = free_cell(&body, &mut rng).unwrap_or(IVec2::ZERO);
        Self {
            body,
            direction: Direction::Up,
            last_moved: Direction::Up,
            food,
            started: false,
            won: false,
            completed: false,
            accumulator_ms: 0.0,
            completion_in_ms: None,
            rng,
        }
    }

    /// A running game in an explicit position.
    pub fn with_state(body: &[IVec2], direction: Direction, food: IVec2, seed: u64) -> Self {
        let mut game = Self::new(seed);
        if !body.is_empty() {
            game.body = body.iter().copied().collect();
        }
        game.direction = direction;
        game.last_moved = direction;
        game.food = food;
        game.started = true;
        game
    }

    pub fn body(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or_else(start_cell)
    }

    pub fn food(&self) -> IVec2 {
        self.food
    }

    pub fn set_food(&mut self, food: IVec2) {
        self.food = food;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Fresh game, running.
    pub fn start(&mut self) {
        self.body.clear();
        self.body.push_back(start_cell());
        self.direction = Direction::Up;
        self.last_moved = Direction::Up;
        self.food = free_cell(&self.body, &mut self.rng).unwrap_or(self.food);
        self.started = true;
        self.won = false;
        self.completed = false;
        self.accumulator_ms = 0.0;
        self.completion_in_ms = None;
    }

    /// Only turns perpendicular to the last applied move are accepted, so
    /// two quick presses between ticks cannot reverse the snake.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if !self.started || dir.is_vertical() == self.last_moved.is_vertical() {
            return false;
        }
        self.direction = dir;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.started || self.won {
            return TickOutcome::Idle;
        }
        let head = self.head() + self.direction.vector();
        self.last_moved = self.direction;

        if !in_bounds(head) || self.body.contains(&head) {
            self.body.clear();
            self.body.push_back(start_cell());
            return TickOutcome::Reset;
        }

        self.body.push_front(head);
        if head == self.food {
            if let Some(food) = free_cell(&self.body, &mut self.rng) {
                self.food = food;
            }
            self.won = true;
            self.completion_in_ms = Some(SNAKE_COMPLETE_DELAY_MS);
            return TickOutcome::Ate;
        }
        self.body.pop_back();
        TickOutcome::Moved
    }

    pub fn advance(&mut self, dt_ms: f64) -> SnakeUpdate {
        let mut update = SnakeUpdate::default();
        if !self.started || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return update;
        }

        if !self.won {
            self.accumulator_ms += dt_ms;
            while self.accumulator_ms >= SNAKE_TICK_MS && !self.won {
                self.accumulator_ms -= SNAKE_TICK_MS;
                update.ticks += 1;
                match self.tick() {
                    TickOutcome::Ate => update.ate = true,
                    TickOutcome::Reset => update.resets += 1,
                    _ => {}
                }
                if update.ticks >= MAX_CATCH_UP_TICKS {
                    self.accumulator_ms = self.accumulator_ms.min(SNAKE_TICK_MS);
                    break;
                }
            }
            if update.ate {
                // the completion delay starts at the eating move
                return update;
            }
        }

        if let Some(left) = self.completion_in_ms.as_mut() {
            *left -= dt_ms;
            if *left <= 0.0 {
                self.completion_in_ms = None;
                self.completed = true;
                update.completed = true;
            }
        }
        update
    }
}

fn free_cell(body: &VecDeque<IVec2>, rng: &mut StdRng) -> Option<IVec2> {
    let taken: FnvHashSet<IVec2> = body.iter().copied().collect();
    let free: Vec<IVec2> = (0..SNAKE_GRID_SIZE)
        .flat_map(|y| (0..SNAKE_GRID_SIZE).map(move |x| IVec2::new(x, y)))
        .filter(|c| !taken.contains(c))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.gen_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_never_spawns_on_body() {
        let body: Vec<IVec2> = (0..SNAKE_GRID_SIZE).map(|x| IVec2::new(x, 0)).collect();
        for seed in 0..32 {
            let mut g = SnakeGame::with_state(&body, Direction::Down, IVec2::new(0, 1), seed);
            g.tick();
            assert!(g.body().all(|c| c != g.food()));
        }
    }

    #[test]
    fn reverse_turn_is_rejected() {
        let mut g = SnakeGame::new(1);
        g.start();
        assert!(!g.steer(Direction::Down));
        assert!(g.steer(Direction::Left));
        // still moving up until the next tick, so right is also allowed
        assert!(g.steer(Direction::Right));
    }
}
