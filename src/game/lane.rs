use std::collections::HashSet;

use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::random::{chance, pick, rand_int, seeded_rng};
use crate::game::config::GameConfig;
use crate::game::error::GameError;

pub const TREES_PER_FOREST: usize = 4;
pub const CARS_PER_LANE: usize = 3;
pub const TRUCKS_PER_LANE: usize = 2;
/// Tiles reserved on each side of a placed car / truck.
pub const CAR_REACH: i32 = 1;
pub const TRUCK_REACH: i32 = 2;

const LANE_KINDS: [LaneKind; 3] = [LaneKind::Car, LaneKind::Truck, LaneKind::Forest];
const DIRECTIONS: [bool; 2] = [true, false];
const BLOSSOM_COUNTS: [u8; 3] = [2, 3, 4];

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LaneKind {
    Forest,
    Car,
    Truck,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TreeHeight {
    Short,
    Medium,
    Tall,
}

impl TreeHeight {
    pub const ALL: [TreeHeight; 3] = [TreeHeight::Short, TreeHeight::Medium, TreeHeight::Tall];

    /// Crown height in world units.
    pub fn units(self) -> f32 {
        match self {
            TreeHeight::Short => 20.0,
            TreeHeight::Medium => 45.0,
            TreeHeight::Tall => 60.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleColor {
    Red,
    Yellow,
    Green,
}

impl VehicleColor {
    pub const ALL: [VehicleColor; 3] = [VehicleColor::Red, VehicleColor::Yellow, VehicleColor::Green];

    pub fn hex(self) -> u32 {
        match self {
            VehicleColor::Red => 0xa52523,
            VehicleColor::Yellow => 0xbdb638,
            VehicleColor::Green => 0x78b14b,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Tree {
    pub tile: i32,
    pub height: TreeHeight,
    /// Decorative blossoms on the crown; 0 or 2..=4.
    pub blossoms: u8,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct VehicleSpawn {
    pub initial_tile: i32,
    pub color: VehicleColor,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Road {
    /// true = vehicles travel toward +x.
    pub direction: bool,
    /// World units per second.
    pub speed: f32,
    pub vehicles: Vec<VehicleSpawn>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LaneDescriptor {
    Forest { trees: Vec<Tree> },
    Car(Road),
    Truck(Road),
}

impl LaneDescriptor {
    pub fn kind(&self) -> LaneKind {
        match self {
            LaneDescriptor::Forest { .. } => LaneKind::Forest,
            LaneDescriptor::Car(_) => LaneKind::Car,
            LaneDescriptor::Truck(_) => LaneKind::Truck,
        }
    }

    pub fn road(&self) -> Option<&Road> {
        match self {
            LaneDescriptor::Car(road) | LaneDescriptor::Truck(road) => Some(road),
            LaneDescriptor::Forest { .. } => None,
        }
    }

    /// Trees block movement; roads never do.
    pub fn blocks(&self, tile: i32) -> bool {
        match self {
            LaneDescriptor::Forest { trees } => trees.iter().any(|t| t.tile == tile),
            _ => false,
        }
    }
}

pub struct LaneGenerator {
    min_tile: i32,
    max_tile: i32,
    speeds: Vec<f32>,
    blossom_chance: f64,
    rng: SmallRng,
}

impl LaneGenerator {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, seeded_rng(config.seed))
    }

    pub fn with_rng(config: &GameConfig, rng: SmallRng) -> Self {
        LaneGenerator {
            min_tile: config.min_tile,
            max_tile: config.max_tile,
            speeds: config.lane_speeds.clone(),
            blossom_chance: config.blossom_chance,
            rng,
        }
    }

    pub fn generate(&mut self) -> Result<LaneDescriptor, GameError> {
        let kind = pick(&mut self.rng, &LANE_KINDS).unwrap_or(LaneKind::Forest);
        match kind {
            LaneKind::Forest => self.forest(),
            LaneKind::Car => {
                let road = self.road(LaneKind::Car, CARS_PER_LANE, CAR_REACH)?;
                Ok(LaneDescriptor::Car(road))
            }
            LaneKind::Truck => {
                let road = self.road(LaneKind::Truck, TRUCKS_PER_LANE, TRUCK_REACH)?;
                Ok(LaneDescriptor::Truck(road))
            }
        }
    }

    /// `amount` independent lanes.
    pub fn generate_rows(&mut self, amount: usize) -> Result<Vec<LaneDescriptor>, GameError> {
        (0..amount).map(|_| self.generate()).collect()
    }

    fn forest(&mut self) -> Result<LaneDescriptor, GameError> {
        let mut occupied = HashSet::new();
        let mut trees = Vec::with_capacity(TREES_PER_FOREST);
        for placed in 0..TREES_PER_FOREST {
            let tile = self.free_tile(&occupied, LaneKind::Forest, placed, TREES_PER_FOREST)?;
            occupied.insert(tile);

            let height = pick(&mut self.rng, &TreeHeight::ALL).unwrap_or(TreeHeight::Short);
            let blossoms = if chance(&mut self.rng, self.blossom_chance) {
                pick(&mut self.rng, &BLOSSOM_COUNTS).unwrap_or(0)
            } else {
                0
            };
            trees.push(Tree { tile, height, blossoms });
        }
        Ok(LaneDescriptor::Forest { trees })
    }

    fn road(&mut self, kind: LaneKind, count: usize, reach: i32) -> Result<Road, GameError> {
        let direction = pick(&mut self.rng, &DIRECTIONS).unwrap_or(true);
        let speed = pick(&mut self.rng, &self.speeds)
            .ok_or_else(|| GameError::InvalidConfig("lane_speeds is empty".into()))?;

        let mut occupied = HashSet::new();
        let mut vehicles = Vec::with_capacity(count);
        for placed in 0..count {
            let initial_tile = self.free_tile(&occupied, kind, placed, count)?;
            occupied.extend(initial_tile - reach..=initial_tile + reach);

            let color = pick(&mut self.rng, &VehicleColor::ALL).unwrap_or(VehicleColor::Red);
            vehicles.push(VehicleSpawn { initial_tile, color });
        }
        Ok(Road { direction, speed, vehicles })
    }

    /// Rejection sampling over `[min_tile, max_tile]`, bounded; past the bound,
    /// pick directly among whatever tiles are still free.
    fn free_tile(
        &mut self,
        occupied: &HashSet<i32>,
        kind: LaneKind,
        placed: usize,
        wanted: usize,
    ) -> Result<i32, GameError> {
        let span = (self.max_tile - self.min_tile + 1).max(1) as usize;
        for _ in 0..span * 8 {
            let tile = rand_int(&mut self.rng, self.min_tile, self.max_tile);
            if !occupied.contains(&tile) {
                return Ok(tile);
            }
        }

        let free: Vec<i32> = (self.min_tile..=self.max_tile)
            .filter(|t| !occupied.contains(t))
            .collect();
        warn!(?kind, free = free.len(), "tile sampling hit its retry bound");
        pick(&mut self.rng, &free).ok_or(GameError::GenerationExhausted { kind, placed, wanted })
    }
}
