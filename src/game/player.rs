use std::collections::VecDeque;
use std::f32::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::game::config::GameConfig;
use crate::game::rows::RowStore;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    /// (row, tile) change of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Forward => (1, 0),
            Direction::Backward => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Yaw about +z the player faces while taking this step.
    pub fn facing(self) -> f32 {
        match self {
            Direction::Forward => 0.0,
            Direction::Left => PI / 2.0,
            Direction::Right => -PI / 2.0,
            Direction::Backward => PI,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Forward),
            "ArrowDown" | "s" | "S" => Some(Direction::Backward),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "forward" => Some(Direction::Forward),
            "backward" => Some(Direction::Backward),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: i32,
    pub tile: i32,
}

impl GridPosition {
    pub fn new(row: i32, tile: i32) -> Self {
        GridPosition { row, tile }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dt) = direction.delta();
        GridPosition { row: self.row + dr, tile: self.tile + dt }
    }
}

pub fn calculate_final_position<'a>(
    start: GridPosition,
    moves: impl IntoIterator<Item = &'a Direction>,
) -> GridPosition {
    moves.into_iter().fold(start, |pos, &dir| pos.step(dir))
}

/// Whether applying `moves` from `start` lands somewhere the player may stand:
/// not behind the run-up zone, not past either playfield edge, not on a tree.
pub fn ends_up_in_valid_position<'a>(
    start: GridPosition,
    moves: impl IntoIterator<Item = &'a Direction>,
    min_tile: i32,
    max_tile: i32,
    rows: &RowStore,
) -> bool {
    let end = calculate_final_position(start, moves);
    if end.row < 0 || end.tile < min_tile || end.tile > max_tile {
        return false;
    }
    !rows.is_blocked(end.row, end.tile)
}

/// Discrete cell plus the queued hops still to animate.
///
/// The cell only changes when a hop finishes. While a hop is in flight the
/// world position is interpolated between the cell and the hop's destination.
#[derive(Debug, Clone)]
pub struct Player {
    cell: GridPosition,
    queue: VecDeque<Direction>,
    elapsed: f32,
    facing: f32,
    facing_start: f32,
    min_tile: i32,
    max_tile: i32,
    step_duration: f32,
    tile_size: f32,
    hop_height: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Player {
            cell: GridPosition::default(),
            queue: VecDeque::new(),
            elapsed: 0.0,
            facing: 0.0,
            facing_start: 0.0,
            min_tile: config.min_tile,
            max_tile: config.max_tile,
            step_duration: config.step_duration,
            tile_size: config.tile_size,
            hop_height: config.hop_height,
        }
    }

    pub fn reset(&mut self) {
        self.cell = GridPosition::default();
        self.queue.clear();
        self.elapsed = 0.0;
        self.facing = 0.0;
        self.facing_start = 0.0;
    }

    /// Queues `direction` if the whole queue would still end on a valid cell.
    pub fn queue_move(&mut self, direction: Direction, rows: &RowStore) -> bool {
        let valid = ends_up_in_valid_position(
            self.cell,
            self.queue.iter().chain(std::iter::once(&direction)),
            self.min_tile,
            self.max_tile,
            rows,
        );
        if valid {
            self.queue.push_back(direction);
        }
        valid
    }

    /// Advances the hop in flight by `dt` seconds. Returns the direction of a
    /// hop that finished this call; its delta is already applied to the cell.
    pub fn advance(&mut self, dt: f32) -> Option<Direction> {
        let direction = *self.queue.front()?;
        if self.elapsed == 0.0 {
            self.facing_start = self.facing;
        }

        self.elapsed += dt.max(0.0);
        let progress = (self.elapsed / self.step_duration).min(1.0);
        self.facing = lerp(self.facing_start, direction.facing(), progress);

        if progress < 1.0 {
            return None;
        }
        self.queue.pop_front();
        self.cell = self.cell.step(direction);
        self.facing = direction.facing();
        self.elapsed = 0.0;
        Some(direction)
    }

    pub fn cell(&self) -> GridPosition {
        self.cell
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// 0..1 through the hop in flight; 0 when idle.
    pub fn progress(&self) -> f32 {
        if self.queue.is_empty() {
            0.0
        } else {
            (self.elapsed / self.step_duration).min(1.0)
        }
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Interpolated world position, z carrying the hop bob.
    pub fn world_position(&self) -> Vector3<f32> {
        let progress = self.progress();
        let start = self.cell;
        let end = self.queue.front().map_or(start, |&dir| start.step(dir));

        let x = lerp(start.tile as f32, end.tile as f32, progress) * self.tile_size;
        let y = lerp(start.row as f32, end.row as f32, progress) * self.tile_size;
        let z = (progress * PI).sin() * self.hop_height;
        Vector3::new(x, y, z)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
