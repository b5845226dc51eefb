use std::{env, path::PathBuf, process::ExitCode};

use log::{error, info, warn};
use storia_core::app::{PlayerConfig, PlayerStatus, StoryPlayer, TickResult};
use tracing_subscriber::EnvFilter;

use console::ConsoleRenderer;
use script::ScriptInput;
use surface::SimulatedSurface;

#[path = "main/console.rs"]
mod console;
#[path = "main/feed.rs"]
mod feed;
#[path = "main/script.rs"]
mod script;
#[path = "main/surface.rs"]
mod surface;

/// Virtual time between two engine ticks.
const FRAME_MS: u64 = 16;
/// Length of every simulated video clip.
const CLIP_MS: u64 = 4_000;
/// Hard stop for runs that never finish (a video that is never played).
const MAX_RUN_MS: u64 = 10 * 60 * 1_000;
/// Time the viewer stays open after the feed finished and the script ran out.
const LINGER_MS: u64 = 1_000;
const REPORT_INTERVAL_MS: u64 = 5_000;

const ENV_PANEL_MS: &str = "STORIA_PANEL_MS";
const ENV_TICK_MS: &str = "STORIA_TICK_MS";
const ENV_BLOCK_AUTOPLAY: &str = "STORIA_BLOCK_AUTOPLAY";

fn env_u32(name: &str) -> Option<u32> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("config: ignoring {}={:?}: {}", name, raw, err);
            None
        }
    }
}

fn player_config() -> PlayerConfig {
    let mut config = PlayerConfig::default();
    if let Some(panel_ms) = env_u32(ENV_PANEL_MS) {
        config.default_panel_ms = panel_ms;
    }
    if let Some(tick_ms) = env_u32(ENV_TICK_MS) {
        config.tick_ms = tick_ms;
    }
    config
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args = env::args().skip(1);
    let feed_path = args.next().map(PathBuf::from);
    let script_source = args.next().unwrap_or_default();

    let loaded = match feed_path {
        Some(path) => match feed::load(&path) {
            Ok(loaded) => loaded,
            Err(err) => {
                error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
        None => feed::sample(),
    };

    let input = match ScriptInput::parse(&script_source, &loaded.feed) {
        Ok(input) => input,
        Err(err) => {
            error!("script: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let script_end_ms = input.last_event_ms();

    let block_autoplay = env::var_os(ENV_BLOCK_AUTOPLAY).is_some();
    let surface = SimulatedSurface::new(CLIP_MS, block_autoplay);
    let config = player_config();

    info!(
        "Player started: panel_ms={} tick_ms={} frame_ms={} clip_ms={} block_autoplay={}",
        config.default_panel_ms, config.tick_ms, FRAME_MS, CLIP_MS, block_autoplay
    );

    let mut player = StoryPlayer::new(
        loaded.feed,
        surface,
        input,
        config,
        loaded.start_story_id.as_deref(),
    );
    let mut renderer = ConsoleRenderer::default();

    let mut now_ms = 0u64;
    let mut finished_at_ms = None;
    let mut report_panels = 0u32;
    let mut report_start_ms = 0u64;

    loop {
        player.with_input_mut(|input| input.advance_to(now_ms));
        player.with_surface_mut(|surface| surface.advance_to(now_ms));

        if player.tick(now_ms) == TickResult::RenderRequested {
            player.with_screen(|screen| renderer.render(now_ms, screen));
        }
        for signal in player.drain_signals() {
            console::log_signal(now_ms, signal);
        }

        report_panels = report_panels.saturating_add(player.drain_completed_panels());
        if now_ms.saturating_sub(report_start_ms) >= REPORT_INTERVAL_MS {
            info!(
                "panels_completed={} elapsed_ms={} frames={} video_playing={}",
                report_panels,
                now_ms - report_start_ms,
                renderer.frames(),
                player.with_surface_mut(|surface| surface.is_playing())
            );
            report_panels = 0;
            report_start_ms = now_ms;
        }

        let script_done = player.with_input_mut(|input| input.is_exhausted());
        match player.status() {
            PlayerStatus::Closed => break,
            PlayerStatus::Empty if script_done => break,
            PlayerStatus::Finished if script_done => {
                let since = *finished_at_ms.get_or_insert(now_ms);
                if now_ms.saturating_sub(since) >= LINGER_MS {
                    player.close();
                    player.with_screen(|screen| renderer.render(now_ms, screen));
                    for signal in player.drain_signals() {
                        console::log_signal(now_ms, signal);
                    }
                    break;
                }
            }
            _ => finished_at_ms = None,
        }

        if now_ms >= MAX_RUN_MS.max(script_end_ms) {
            warn!("player: stopping after {}ms without finishing", now_ms);
            break;
        }
        now_ms += FRAME_MS;
    }

    info!(
        "Player stopped at {}ms status={:?} frames={}",
        now_ms,
        player.status(),
        renderer.frames()
    );
    ExitCode::SUCCESS
}
