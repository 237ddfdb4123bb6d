use std::f32::consts::PI;

use nalgebra::Vector3;

use crate::engine::bounds::{hull, Aabb, BoxPart};
use crate::game::player::Player;
use crate::game::rows::RowStore;
use crate::game::traffic::{Traffic, Vehicle, VehicleId, VehicleKind};

// Footprints in model space, +x forward for vehicles, +y forward for the player.

pub const PLAYER_PARTS: [BoxPart; 12] = [
    BoxPart::new([0.0, 0.0, 12.0], [18.0, 16.0, 18.0]),
    BoxPart::new([0.0, 4.0, 26.0], [12.0, 10.0, 14.0]),
    BoxPart::new([0.0, 4.0, 35.0], [4.0, 6.0, 10.0]),
    BoxPart::new([0.0, 8.0, 20.0], [3.0, 4.0, 5.0]),
    BoxPart::new([0.0, 10.0, 26.0], [5.0, 8.0, 4.0]),
    BoxPart::new([-5.0, 6.0, 28.0], [2.0, 2.0, 3.0]),
    BoxPart::new([5.0, 6.0, 28.0], [2.0, 2.0, 3.0]),
    BoxPart::new([-5.0, 0.0, 3.0], [3.0, 3.0, 6.0]),
    BoxPart::new([5.0, 0.0, 3.0], [3.0, 3.0, 6.0]),
    // tail feathers are tilted -0.3 rad about x; this is their upright hull
    BoxPart::new([0.0, -10.0, 18.0], [10.0, 12.38, 17.64]),
    BoxPart::new([-10.0, 0.0, 12.0], [4.0, 10.0, 10.0]),
    BoxPart::new([10.0, 0.0, 12.0], [4.0, 10.0, 10.0]),
];

pub const CAR_PARTS: [BoxPart; 4] = [
    BoxPart::new([0.0, 0.0, 12.0], [60.0, 30.0, 15.0]),
    BoxPart::new([-6.0, 0.0, 25.5], [33.0, 24.0, 12.0]),
    BoxPart::new([18.0, 0.0, 6.0], [12.0, 33.0, 12.0]),
    BoxPart::new([-18.0, 0.0, 6.0], [12.0, 33.0, 12.0]),
];

pub const TRUCK_PARTS: [BoxPart; 5] = [
    BoxPart::new([-15.0, 0.0, 25.0], [70.0, 35.0, 35.0]),
    BoxPart::new([35.0, 0.0, 20.0], [30.0, 30.0, 30.0]),
    BoxPart::new([37.0, 0.0, 6.0], [12.0, 33.0, 12.0]),
    BoxPart::new([5.0, 0.0, 6.0], [12.0, 33.0, 12.0]),
    BoxPart::new([-35.0, 0.0, 6.0], [12.0, 33.0, 12.0]),
];

impl VehicleKind {
    pub fn parts(self) -> &'static [BoxPart] {
        match self {
            VehicleKind::Car => &CAR_PARTS,
            VehicleKind::Truck => &TRUCK_PARTS,
        }
    }
}

/// Current volume of the player: interpolated, bobbing and turned.
pub fn player_bounds(player: &Player) -> Option<Aabb> {
    hull(&PLAYER_PARTS, player.facing(), player.world_position())
}

pub fn vehicle_bounds(vehicle: &Vehicle, tile_size: f32) -> Option<Aabb> {
    let yaw = if vehicle.direction { 0.0 } else { PI };
    let offset = Vector3::new(vehicle.x, vehicle.id.row as f32 * tile_size, 0.0);
    hull(vehicle.kind.parts(), yaw, offset)
}

/// First vehicle in the player's row whose volume touches the player.
/// Forest rows and rows outside the store never collide.
pub fn hit_test(player: &Player, rows: &RowStore, traffic: &Traffic, tile_size: f32) -> Option<VehicleId> {
    let row = player.cell().row;
    let on_road = rows.get(row).map_or(false, |lane| lane.road().is_some());
    if !on_road {
        return None;
    }

    let player_box = player_bounds(player)?;
    traffic
        .in_row(row)
        .find(|v| vehicle_bounds(v, tile_size).map_or(false, |b| b.intersects(&player_box)))
        .map(|v| v.id)
}
