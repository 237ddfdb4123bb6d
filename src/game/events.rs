use serde::Serialize;

use crate::game::lane::LaneDescriptor;
use crate::game::player::{Direction, GridPosition};
use crate::game::traffic::Vehicle;

/// Things the presentation layer has to react to, in the order they happened.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// The map was cleared; rows `run_up_first..=run_up_last` are plain grass.
    SessionStarted { run_up_first: i32, run_up_last: i32 },
    /// New lanes, the first one at `first_row`, the rest following in order.
    RowsAdded { first_row: i32, lanes: Vec<LaneDescriptor> },
    StepCompleted { direction: Direction, cell: GridPosition },
    ScoreChanged { score: i32 },
    GameOver { final_score: i32 },
}

/// Per-tick render state.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub player_cell: GridPosition,
    pub player_progress: f32,
    pub player_position: [f32; 3],
    pub facing: f32,
    pub pending_moves: usize,
    pub vehicles: Vec<Vehicle>,
    pub score: i32,
    pub game_over: bool,
    pub final_score: i32,
}
