pub mod engine;
pub mod game;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};
use std::cell::RefCell;
use tracing::{info, warn, Level};
use crate::engine::console;
use crate::game::Game;
use crate::game::config::GameConfig;
use crate::game::player::Direction;

thread_local! {
    static GAME: RefCell<Option<Game>> = RefCell::new(None);
}

fn with_game<T>(f: impl FnOnce(&mut Game) -> T) -> Option<T> {
    GAME.with(|g| g.borrow_mut().as_mut().map(f))
}

fn install(mut config: GameConfig) -> Result<(), JsError> {
    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * 1_000_000_000.0) as u64);
    }
    let game = Game::new(config).map_err(|e| JsError::new(&e.to_string()))?;
    GAME.with(|g| *g.borrow_mut() = Some(game));
    info!("session ready");
    Ok(())
}

/// Fetches a JSON config and starts a session. A missing or broken config
/// falls back to the defaults.
#[wasm_bindgen]
pub async fn load_game(config_url: String) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init(Level::INFO);
    let window = web_sys::window().ok_or("No window")?;

    let mut config: Option<GameConfig> = None;
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(&config_url, &opts)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await;

    if let Ok(resp_value) = resp_value {
        let resp: Response = resp_value.dyn_into()?;
        if resp.ok() {
            let text = JsFuture::from(resp.text()?).await?;
            if let Some(json) = text.as_string() {
                match GameConfig::from_json(&json) {
                    Ok(c) => config = Some(c),
                    Err(e) => warn!(error = %e, "config rejected, using defaults"),
                }
            }
        }
    }

    install(config.unwrap_or_default()).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn start_game(config_json: Option<String>) -> Result<(), JsError> {
    console_error_panic_hook::set_once();
    console::init(Level::INFO);
    let config = match config_json {
        Some(json) => GameConfig::from_json(&json).map_err(|e| JsError::new(&e.to_string()))?,
        None => GameConfig::default(),
    };
    install(config)
}

/// `direction` is one of "forward", "backward", "left", "right".
#[wasm_bindgen]
pub fn queue_move(direction: &str) -> bool {
    Direction::from_name(direction)
        .and_then(|dir| with_game(|game| game.queue_move(dir)))
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn press_key(key: &str) -> bool {
    Direction::from_key(key)
        .and_then(|dir| with_game(|game| game.queue_move(dir)))
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn tick(dt: f32) -> Result<(), JsError> {
    with_game(|game| game.tick(dt))
        .transpose()
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(())
}

#[wasm_bindgen]
pub fn retry() -> Result<(), JsError> {
    with_game(|game| game.initialize_game())
        .transpose()
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(())
}

#[wasm_bindgen]
pub fn snapshot() -> Result<JsValue, JsValue> {
    match with_game(|game| game.snapshot()) {
        Some(snap) => Ok(serde_wasm_bindgen::to_value(&snap)?),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen]
pub fn drain_events() -> Result<JsValue, JsValue> {
    let events = with_game(|game| game.drain_events()).unwrap_or_default();
    Ok(serde_wasm_bindgen::to_value(&events)?)
}
