use serde::{Deserialize, Serialize};

use crate::game::error::GameError;

/// Densest lane is three cars each reserving three tiles; any row this wide
/// can always place it.
pub const MIN_TILES_PER_ROW: i32 = 7;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub min_tile: i32,
    pub max_tile: i32,
    pub tile_size: f32,
    /// Seconds one hop takes.
    pub step_duration: f32,
    pub hop_height: f32,
    /// Plain grass rows at and behind the start (rows 0, -1, ...).
    pub run_up_rows: i32,
    pub batch_rows: usize,
    /// Grow the map once the player is this close to the last stored row.
    pub watermark: i32,
    /// Tiles vehicles travel past the playfield edge before wrapping.
    pub wrap_margin: i32,
    pub lane_speeds: Vec<f32>,
    pub blossom_chance: f64,
    /// Rows behind / ahead of the player whose vehicles go into a snapshot.
    pub view_rows_behind: i32,
    pub view_rows_ahead: i32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            min_tile: -8,
            max_tile: 8,
            tile_size: 42.0,
            step_duration: 0.2,
            hop_height: 8.0,
            run_up_rows: 10,
            batch_rows: 20,
            watermark: 10,
            wrap_margin: 2,
            lane_speeds: vec![125.0, 156.0, 188.0],
            blossom_chance: 0.4,
            view_rows_behind: 10,
            view_rows_ahead: 30,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.min_tile > self.max_tile {
            return Err(GameError::InvalidConfig(format!(
                "min_tile {} is greater than max_tile {}",
                self.min_tile, self.max_tile
            )));
        }
        if self.tiles_per_row() < MIN_TILES_PER_ROW {
            return Err(GameError::InvalidConfig(format!(
                "{} tiles per row, need at least {}",
                self.tiles_per_row(),
                MIN_TILES_PER_ROW
            )));
        }
        if !(self.tile_size > 0.0) {
            return Err(GameError::InvalidConfig("tile_size must be positive".into()));
        }
        if !(self.step_duration > 0.0) {
            return Err(GameError::InvalidConfig("step_duration must be positive".into()));
        }
        if self.lane_speeds.is_empty() {
            return Err(GameError::InvalidConfig("lane_speeds is empty".into()));
        }
        if self.batch_rows == 0 {
            return Err(GameError::InvalidConfig("batch_rows must be at least 1".into()));
        }
        if self.run_up_rows < 1 {
            return Err(GameError::InvalidConfig("run_up_rows must be at least 1".into()));
        }
        if self.watermark < 0 || self.wrap_margin < 0 {
            return Err(GameError::InvalidConfig("watermark and wrap_margin must not be negative".into()));
        }
        if self.view_rows_behind < 0 || self.view_rows_ahead < 0 {
            return Err(GameError::InvalidConfig("view rows must not be negative".into()));
        }
        if !(0.0..=1.0).contains(&self.blossom_chance) {
            return Err(GameError::InvalidConfig("blossom_chance must be within [0, 1]".into()));
        }
        Ok(())
    }

    pub fn tiles_per_row(&self) -> i32 {
        self.max_tile - self.min_tile + 1
    }

    /// World x where vehicles moving toward -x wrap, and where +x movers respawn.
    pub fn row_start(&self) -> f32 {
        (self.min_tile - self.wrap_margin) as f32 * self.tile_size
    }

    pub fn row_end(&self) -> f32 {
        (self.max_tile + self.wrap_margin) as f32 * self.tile_size
    }
}
