use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use macroquad::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tft_snake::app::{GameContext, MonotonicClock};
use tft_snake::SettingsError;
use tft_snake::config::{SCREEN_HEIGHT, SCREEN_WIDTH, SETTINGS_FILE, Settings};
use tft_snake::input::{ButtonLatch, EdgeDetector};
use tft_snake::storage::FileEeprom;

mod desktop;

use desktop::{KeyboardJoystick, SpeakerBuzzer, WindowPanel};

// Loaded once for both the window and main; errors are logged from main once tracing is up
fn settings() -> &'static Result<Settings, SettingsError> {
    static SETTINGS: OnceLock<Result<Settings, SettingsError>> = OnceLock::new();
    SETTINGS.get_or_init(|| Settings::load(Path::new(SETTINGS_FILE)))
}

fn window_conf() -> Conf {
    let settings = settings().as_ref().cloned().unwrap_or_default();
    Conf {
        window_title: "TFT Snake".to_owned(),
        window_width: (SCREEN_WIDTH as f32 * settings.scale) as i32,
        window_height: (SCREEN_HEIGHT as f32 * settings.scale) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tft_snake=info".into()),
        )
        .init();

    let settings = match settings() {
        Ok(settings) => settings.clone(),
        Err(e) => {
            warn!("Ignoring settings file {}: {}", SETTINGS_FILE, e);
            Settings::default()
        }
    };
    let eeprom = match FileEeprom::open(&settings.eeprom_path) {
        Ok(eeprom) => eeprom,
        Err(e) => {
            error!("Cannot open EEPROM image {}: {}", settings.eeprom_path.display(), e);
            return;
        }
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);
    info!("Starting with seed {} and EEPROM image {}", seed, eeprom.path().display());

    // Space/Enter stand in for the push-button; its falling edge only sets the latch
    let latch = Arc::new(ButtonLatch::new());
    let mut button_edges = EdgeDetector::new();

    let buzzer = SpeakerBuzzer::load(settings.volume).await;
    let mut ctx = GameContext::new(WindowPanel::new(), KeyboardJoystick, buzzer, eeprom, Arc::clone(&latch), seed);
    let clock = MonotonicClock::new();

    loop {
        if is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape) {
            break;
        }
        if button_edges.update(is_key_down(KeyCode::Space) || is_key_down(KeyCode::Enter)) {
            latch.signal();
        }

        ctx.tick(&clock);
        next_frame().await;
    }
}
