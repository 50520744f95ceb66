//! JavaScript binding for the browser page
//!
//! The page owns the canvas, the input listeners and the
//! requestAnimationFrame loop. Each frame it hands the elapsed time and the
//! current input to `WebSession::frame` and draws the returned JSON.

use wasm_bindgen::prelude::*;

use crate::config::{EngineConfig, WaveConfig};
use crate::sim::{Session, SessionPhase, TickInput, TileMap};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A game session driven from JavaScript
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
}

#[wasm_bindgen]
impl WebSession {
    /// Default level and tuning, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebSession, JsValue> {
        crate::platform::init_logging();
        let seed = js_sys::Date::now() as u64;
        let session = Session::with_default_level(seed).map_err(js_error)?;
        Ok(Self { session })
    }

    /// Custom level (`#`/`.` rows) and JSON tuning; empty strings use defaults
    #[wasm_bindgen(js_name = withLevel)]
    pub fn with_level(
        level: &str,
        config_json: &str,
        waves_json: &str,
    ) -> Result<WebSession, JsValue> {
        crate::platform::init_logging();
        let map = if level.trim().is_empty() {
            TileMap::default_level()
        } else {
            TileMap::from_ascii(level, crate::consts::TILE_SIZE).map_err(js_error)?
        };
        let config = if config_json.trim().is_empty() {
            EngineConfig::default()
        } else {
            EngineConfig::from_json(config_json).map_err(js_error)?
        };
        let waves = if waves_json.trim().is_empty() {
            WaveConfig::default()
        } else {
            WaveConfig::from_json(waves_json).map_err(js_error)?
        };
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(map, config, waves, seed).map_err(js_error)?;
        Ok(Self { session })
    }

    /// Advance by `dt_ms` and return the tick output as JSON
    ///
    /// Returns `null` when no fixed step was due this frame.
    pub fn frame(
        &mut self,
        dt_ms: f64,
        forward: f32,
        strafe: f32,
        turn: f32,
        fire: bool,
        switch_weapon: bool,
    ) -> Result<Option<String>, JsValue> {
        let input = TickInput {
            forward,
            strafe,
            turn,
            fire,
            switch_weapon,
        };
        self.session
            .advance((dt_ms / 1000.0) as f32, &input)
            .map(|out| serde_json::to_string(&out).map_err(js_error))
            .transpose()
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn defeated(&self) -> bool {
        self.session.phase() == SessionPhase::Defeated
    }

    #[wasm_bindgen(getter)]
    pub fn wave(&self) -> u32 {
        self.session.state.wave.number
    }

    #[wasm_bindgen(getter)]
    pub fn kills(&self) -> u32 {
        self.session.state.kills
    }

    #[wasm_bindgen(getter)]
    pub fn health(&self) -> f32 {
        self.session.state.player.health
    }

    /// Current weapon name and ammo as JSON (`null` ammo means unlimited)
    #[wasm_bindgen(js_name = weaponHud)]
    pub fn weapon_hud(&self) -> Result<String, JsValue> {
        let hud = self
            .session
            .state
            .player
            .weapon()
            .map(|w| (w.name.as_str(), w.remaining_ammo()));
        serde_json::to_string(&hud).map_err(js_error)
    }
}

/// Module entry point: logging only, the page constructs sessions itself
#[wasm_bindgen(start)]
pub fn start() {
    crate::platform::init_logging();
    log::info!("Alien Invasion core loaded");
}
