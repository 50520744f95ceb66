//! Alien Invasion entry point
//!
//! On the web the page drives `platform::web::WebSession` directly. Natively
//! this runs a headless demo: a scripted player spins, strafes and fires
//! through the default arena while game events are logged.
//!
//! Usage: `alien-invasion [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use alien_invasion::consts::SIM_DT;
    use alien_invasion::sim::{GameEvent, Session, SessionPhase, TickInput, TileMap};
    use alien_invasion::{EngineConfig, WaveConfig};

    alien_invasion::platform::init_logging();
    log::info!("Alien Invasion (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match EngineConfig::load(std::path::Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bad config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut session =
        match Session::new(TileMap::default_level(), config, WaveConfig::default(), seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Could not start session: {e}");
                std::process::exit(1);
            }
        };

    // Two minutes of 60 fps frames
    let frames = 120 * 60;
    for frame in 0..frames {
        let phase = frame as f32 * SIM_DT;
        let input = TickInput {
            forward: (phase * 0.7).sin(),
            strafe: (phase * 0.3).cos() * 0.5,
            turn: 0.02,
            fire: true,
            switch_weapon: frame % 900 == 899,
        };
        let Some(out) = session.advance(SIM_DT, &input) else {
            continue;
        };
        for event in &out.events {
            match event {
                GameEvent::PlayerDamaged { .. } | GameEvent::WeaponFireAccepted { .. } => {
                    log::trace!("{event:?}")
                }
                GameEvent::EntityHit { .. } => log::debug!("{event:?}"),
                _ => log::info!("{event:?}"),
            }
        }
        if session.phase() == SessionPhase::Defeated {
            break;
        }
    }

    let state = &session.state;
    println!(
        "Reached wave {} with {} kills in {:.1}s (health {:.0}, {} weapons)",
        state.wave.number,
        state.kills,
        state.time_ms / 1000.0,
        state.player.health,
        state.player.weapons.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
