pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod lane;
pub mod player;
pub mod rows;
pub mod traffic;

use serde::Serialize;
use tracing::{debug, info};

use crate::game::collision::hit_test;
use crate::game::config::GameConfig;
use crate::game::error::GameError;
use crate::game::events::{GameEvent, Snapshot};
use crate::game::lane::{LaneDescriptor, LaneGenerator};
use crate::game::player::{Direction, Player};
use crate::game::rows::RowStore;
use crate::game::traffic::Traffic;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    Over,
}

/// One play session: the map, the player, the traffic and the score.
///
/// `tick` runs the fixed per-frame order: vehicles move, the player's hop
/// advances (possibly committing a step and growing the map), then the player
/// is tested against the traffic in its row.
pub struct Game {
    config: GameConfig,
    generator: LaneGenerator,
    rows: RowStore,
    player: Player,
    traffic: Traffic,
    phase: Phase,
    score: i32,
    final_score: i32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let mut game = Self::empty(config)?;
        game.initialize_game()?;
        Ok(game)
    }

    /// A session whose first lanes are given instead of generated. Later
    /// growth is generated as usual.
    pub fn with_lanes(config: GameConfig, lanes: Vec<LaneDescriptor>) -> Result<Self, GameError> {
        let mut game = Self::empty(config)?;
        game.start_session(lanes);
        Ok(game)
    }

    fn empty(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Game {
            generator: LaneGenerator::new(&config),
            rows: RowStore::new(),
            player: Player::new(&config),
            traffic: Traffic::new(&config),
            phase: Phase::Playing,
            score: 0,
            final_score: 0,
            events: Vec::new(),
            config,
        })
    }

    /// Starts a fresh session on a newly generated map. Safe to call at any time.
    pub fn initialize_game(&mut self) -> Result<(), GameError> {
        let lanes = self.generator.generate_rows(self.config.batch_rows)?;
        self.start_session(lanes);
        Ok(())
    }

    fn start_session(&mut self, lanes: Vec<LaneDescriptor>) {
        self.player.reset();
        self.traffic.clear();
        self.rows.reset();
        self.events.clear();

        self.events.push(GameEvent::SessionStarted {
            run_up_first: 1 - self.config.run_up_rows,
            run_up_last: 0,
        });
        self.extend_rows(lanes);

        self.score = 0;
        self.final_score = 0;
        self.phase = Phase::Playing;
        info!(rows = self.rows.len(), vehicles = self.traffic.len(), "session started");
    }

    /// Queues a hop. Invalid hops and hops after game over are dropped.
    pub fn queue_move(&mut self, direction: Direction) -> bool {
        if self.phase == Phase::Over {
            return false;
        }
        self.player.queue_move(direction, &self.rows)
    }

    /// Advances the session by `dt` seconds. Negative or non-finite frame
    /// times count as zero.
    pub fn tick(&mut self, dt: f32) -> Result<(), GameError> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.traffic.advance(dt);
        if self.phase == Phase::Over {
            return Ok(());
        }

        if let Some(direction) = self.player.advance(dt) {
            self.step_completed(direction)?;
        }

        if let Some(vehicle) = hit_test(&self.player, &self.rows, &self.traffic, self.config.tile_size) {
            self.phase = Phase::Over;
            self.final_score = self.player.cell().row;
            self.events.push(GameEvent::GameOver { final_score: self.final_score });
            info!(?vehicle, final_score = self.final_score, "game over");
        }
        Ok(())
    }

    fn step_completed(&mut self, direction: Direction) -> Result<(), GameError> {
        let cell = self.player.cell();
        debug!(?direction, row = cell.row, tile = cell.tile, "step completed");
        self.events.push(GameEvent::StepCompleted { direction, cell });

        if self.rows.needs_growth(cell.row, self.config.watermark) {
            self.add_rows()?;
        }

        if self.score != cell.row {
            self.score = cell.row;
            self.events.push(GameEvent::ScoreChanged { score: self.score });
        }
        Ok(())
    }

    fn add_rows(&mut self) -> Result<(), GameError> {
        let lanes = self.generator.generate_rows(self.config.batch_rows)?;
        self.extend_rows(lanes);
        Ok(())
    }

    fn extend_rows(&mut self, lanes: Vec<LaneDescriptor>) {
        let first_row = self.rows.len() + 1;
        for (offset, lane) in lanes.iter().enumerate() {
            self.traffic.spawn_row(first_row + offset as i32, lane);
        }
        self.rows.append(lanes.clone());
        debug!(first_row, total = self.rows.len(), "rows added");
        self.events.push(GameEvent::RowsAdded { first_row, lanes });
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render state; vehicles are limited to the rows around the player.
    pub fn snapshot(&self) -> Snapshot {
        let position = self.player.world_position();
        let row = self.player.cell().row;
        let vehicles = self
            .traffic
            .in_rows(row - self.config.view_rows_behind, row + self.config.view_rows_ahead)
            .copied()
            .collect();
        Snapshot {
            player_cell: self.player.cell(),
            player_progress: self.player.progress(),
            player_position: [position.x, position.y, position.z],
            facing: self.player.facing(),
            pending_moves: self.player.pending_len(),
            vehicles,
            score: self.score,
            game_over: self.is_game_over(),
            final_score: self.final_score,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn final_score(&self) -> i32 {
        self.final_score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    pub fn traffic_mut(&mut self) -> &mut Traffic {
        &mut self.traffic
    }
}
