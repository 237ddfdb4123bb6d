//! Integration tests: drive whole sessions through `Game::tick` the way a
//! frame loop would, on hand-built maps where the outcome must be exact.

use lane_hopper::game::config::GameConfig;
use lane_hopper::game::events::GameEvent;
use lane_hopper::game::lane::{LaneDescriptor, Road, VehicleColor, VehicleSpawn};
use lane_hopper::game::player::{Direction, GridPosition};
use lane_hopper::game::traffic::VehicleId;
use lane_hopper::game::{Game, Phase};

fn open_field(rows: usize) -> Vec<LaneDescriptor> {
    vec![LaneDescriptor::Forest { trees: vec![] }; rows]
}

fn car_lane(initial_tile: i32) -> LaneDescriptor {
    LaneDescriptor::Car(Road {
        direction: true,
        speed: 125.0,
        vehicles: vec![VehicleSpawn { initial_tile, color: VehicleColor::Red }],
    })
}

fn config() -> GameConfig {
    GameConfig::default().with_seed(77)
}

#[test]
fn vehicle_on_arrival_tile_ends_the_game() {
    let mut lanes = open_field(4);
    lanes.push(car_lane(7));
    let mut game = Game::with_lanes(config(), lanes).unwrap();

    for _ in 0..5 {
        assert!(game.queue_move(Direction::Forward));
    }
    for _ in 0..4 {
        game.tick(0.2).unwrap();
    }
    assert_eq!(game.player().cell(), GridPosition::new(4, 0));
    assert!(!game.is_game_over());

    // After this tick's motion step the car sits right on tile 0.
    let car = VehicleId { row: 5, slot: 0 };
    assert!(game.traffic_mut().place(car, -25.0));
    game.drain_events();
    game.tick(0.2).unwrap();

    assert_eq!(game.player().cell(), GridPosition::new(5, 0));
    assert!(game.is_game_over());
    assert_eq!(game.phase(), Phase::Over);
    assert_eq!(game.final_score(), 5);
    let events = game.drain_events();
    assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 5 }));
}

#[test]
fn game_over_freezes_player_but_not_traffic() {
    let mut lanes = vec![car_lane(7)];
    lanes.extend(open_field(29));
    let mut game = Game::with_lanes(config(), lanes).unwrap();

    assert!(game.queue_move(Direction::Forward));
    game.tick(0.2).unwrap();
    assert_eq!(game.player().cell(), GridPosition::new(1, 0));

    let car = VehicleId { row: 1, slot: 0 };
    game.traffic_mut().place(car, 0.0);
    game.tick(0.0).unwrap();
    assert!(game.is_game_over());

    assert!(!game.queue_move(Direction::Forward));
    let before = game.traffic().get(car).unwrap().x;
    game.tick(0.1).unwrap();
    assert_eq!(game.player().cell(), GridPosition::new(1, 0));
    assert!(game.traffic().get(car).unwrap().x > before);
    assert_eq!(game.final_score(), 1);
}

#[test]
fn vehicle_sweeps_into_player_mid_hop() {
    let mut lanes = vec![car_lane(7)];
    lanes.extend(open_field(29));
    let mut game = Game::with_lanes(config(), lanes).unwrap();

    assert!(game.queue_move(Direction::Forward));
    game.tick(0.2).unwrap();
    assert!(!game.is_game_over());

    // Halfway through a hop to the right the player is at x = 21.
    assert!(game.queue_move(Direction::Right));
    let car = VehicleId { row: 1, slot: 0 };
    game.traffic_mut().place(car, 21.0 - 12.5 + 60.0);
    game.tick(0.1).unwrap();
    assert!(!game.is_game_over());

    game.traffic_mut().place(car, 21.0 - 12.5);
    game.tick(0.0).unwrap();
    assert_eq!(game.player().progress(), 0.5);
    assert!(game.is_game_over());
    assert_eq!(game.player().cell(), GridPosition::new(1, 0));
}

#[test]
fn map_grows_by_one_batch_past_the_watermark() {
    let mut game = Game::with_lanes(config(), open_field(30)).unwrap();
    game.drain_events();

    for _ in 0..20 {
        assert!(game.queue_move(Direction::Forward));
        game.tick(0.2).unwrap();
    }
    assert_eq!(game.player().cell().row, 20);
    assert_eq!(game.rows().len(), 30);

    assert!(game.queue_move(Direction::Forward));
    game.tick(0.2).unwrap();
    assert_eq!(game.rows().len(), 50);
    assert_eq!(game.score(), 21);

    let added: Vec<(i32, usize)> = game
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::RowsAdded { first_row, lanes } => Some((first_row, lanes.len())),
            _ => None,
        })
        .collect();
    assert_eq!(added, vec![(31, 20)]);
}

#[test]
fn left_wall_stops_the_ninth_step() {
    let mut game = Game::new(config()).unwrap();
    let accepted = (0..9).filter(|_| game.queue_move(Direction::Left)).count();
    assert_eq!(accepted, 8);
    for _ in 0..8 {
        game.tick(0.2).unwrap();
    }
    assert_eq!(game.player().cell(), GridPosition::new(0, -8));
    assert!(!game.queue_move(Direction::Left));
}

#[test]
fn right_wall_stops_the_ninth_step() {
    let mut game = Game::new(config()).unwrap();
    let accepted = (0..9).filter(|_| game.queue_move(Direction::Right)).count();
    assert_eq!(accepted, 8);
    for _ in 0..8 {
        game.tick(0.2).unwrap();
    }
    assert_eq!(game.player().cell(), GridPosition::new(0, 8));
    assert!(!game.queue_move(Direction::Right));
    assert!(game.queue_move(Direction::Left));
}

#[test]
fn queued_moves_stay_unconsumed_after_a_hit() {
    let mut lanes = vec![car_lane(7)];
    lanes.extend(open_field(29));
    let mut game = Game::with_lanes(config(), lanes).unwrap();

    for _ in 0..3 {
        assert!(game.queue_move(Direction::Forward));
    }
    let car = VehicleId { row: 1, slot: 0 };
    game.traffic_mut().place(car, -25.0);
    game.tick(0.2).unwrap();
    assert!(game.is_game_over());
    assert_eq!(game.player().cell(), GridPosition::new(1, 0));
    assert_eq!(game.player().pending_len(), 2);

    for _ in 0..10 {
        game.tick(0.2).unwrap();
    }
    assert_eq!(game.player().cell(), GridPosition::new(1, 0));
    assert_eq!(game.player().pending_len(), 2);
    assert_eq!(game.snapshot().pending_moves, 2);
    assert_eq!(game.final_score(), 1);
}

#[test]
fn non_finite_frame_time_is_ignored() {
    let mut game = Game::with_lanes(config(), vec![car_lane(3)]).unwrap();
    let car = VehicleId { row: 1, slot: 0 };
    let before = game.traffic().get(car).unwrap().x;

    game.tick(f32::NAN).unwrap();
    game.tick(f32::INFINITY).unwrap();
    game.tick(-1.0).unwrap();
    assert_eq!(game.traffic().get(car).unwrap().x, before);

    assert!(game.queue_move(Direction::Forward));
    game.tick(0.2).unwrap();
    assert_eq!(game.player().cell(), GridPosition::new(1, 0));
    assert!(!game.is_game_over());
}

#[test]
fn retry_twice_gives_identical_fresh_state() {
    let mut game = Game::new(config()).unwrap();
    game.queue_move(Direction::Right);
    game.queue_move(Direction::Right);
    game.tick(0.3).unwrap();

    for _ in 0..2 {
        game.initialize_game().unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
        assert_eq!(snap.player_cell, GridPosition::new(0, 0));
        assert_eq!(snap.pending_moves, 0);
        assert_eq!(snap.player_position, [0.0, 0.0, 0.0]);
        assert_eq!(game.rows().len(), 20);
    }
}

#[test]
fn snapshot_serializes_for_the_host() {
    let game = Game::with_lanes(config(), vec![car_lane(3)]).unwrap();
    let value = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(value["score"], 0);
    assert_eq!(value["game_over"], false);
    assert_eq!(value["vehicles"][0]["kind"], "car");
    assert_eq!(value["vehicles"][0]["color"], "red");
    assert_eq!(value["vehicles"][0]["color_hex"], 0xa52523);
    assert_eq!(value["vehicles"][0]["id"]["row"], 1);
}
