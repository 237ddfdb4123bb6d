use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::game::config::GameConfig;
use crate::game::lane::{LaneDescriptor, VehicleColor};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId {
    pub row: i32,
    pub slot: usize,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Truck,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub kind: VehicleKind,
    pub color: VehicleColor,
    /// `color` as 0xRRGGBB.
    pub color_hex: u32,
    pub direction: bool,
    pub speed: f32,
    /// World x of the vehicle origin.
    pub x: f32,
}

/// Runtime positions of every vehicle on the map, keyed by (row, slot).
/// Lane descriptors stay immutable; only this table moves.
#[derive(Debug, Clone)]
pub struct Traffic {
    vehicles: BTreeMap<VehicleId, Vehicle>,
    row_start: f32,
    row_end: f32,
    tile_size: f32,
}

impl Traffic {
    pub fn new(config: &GameConfig) -> Self {
        Traffic {
            vehicles: BTreeMap::new(),
            row_start: config.row_start(),
            row_end: config.row_end(),
            tile_size: config.tile_size,
        }
    }

    /// Puts the vehicles of a road lane at their initial tiles.
    pub fn spawn_row(&mut self, row: i32, lane: &LaneDescriptor) -> usize {
        let (kind, road) = match lane {
            LaneDescriptor::Car(road) => (VehicleKind::Car, road),
            LaneDescriptor::Truck(road) => (VehicleKind::Truck, road),
            LaneDescriptor::Forest { .. } => return 0,
        };

        for (slot, spawn) in road.vehicles.iter().enumerate() {
            let id = VehicleId { row, slot };
            self.vehicles.insert(
                id,
                Vehicle {
                    id,
                    kind,
                    color: spawn.color,
                    color_hex: spawn.color.hex(),
                    direction: road.direction,
                    speed: road.speed,
                    x: spawn.initial_tile as f32 * self.tile_size,
                },
            );
        }
        debug!(row, ?kind, count = road.vehicles.len(), "spawned vehicles");
        road.vehicles.len()
    }

    /// Moves every vehicle along its lane. A vehicle already past the far end
    /// respawns at the near end instead of moving this tick.
    pub fn advance(&mut self, dt: f32) {
        let (start, end) = (self.row_start, self.row_end);
        for vehicle in self.vehicles.values_mut() {
            vehicle.x = if vehicle.direction {
                if vehicle.x > end {
                    start
                } else {
                    vehicle.x + vehicle.speed * dt
                }
            } else if vehicle.x < start {
                end
            } else {
                vehicle.x - vehicle.speed * dt
            };
        }
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// Teleports a vehicle; returns false for unknown ids.
    pub fn place(&mut self, id: VehicleId, x: f32) -> bool {
        match self.vehicles.get_mut(&id) {
            Some(vehicle) => {
                vehicle.x = x;
                true
            }
            None => false,
        }
    }

    pub fn in_row(&self, row: i32) -> impl Iterator<Item = &Vehicle> + '_ {
        self.in_rows(row, row)
    }

    /// Vehicles of rows `first..=last`, ordered by id.
    pub fn in_rows(&self, first: i32, last: i32) -> impl Iterator<Item = &Vehicle> + '_ {
        let lo = VehicleId { row: first, slot: 0 };
        let hi = VehicleId { row: last.max(first), slot: usize::MAX };
        self.vehicles.range(lo..=hi).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn clear(&mut self) {
        self.vehicles.clear();
    }
}
