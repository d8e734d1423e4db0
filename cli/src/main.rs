mod command;

use anyhow::{Context, Result};
use async_std::io::BufReader;
use async_std::prelude::*;
use clap::Parser;
use command::Command;
use log::{info, warn};
use player::{Player, SimulatedBackend};
use state::{format_duration, Episode, EpisodeRecord, PlaybackController, PlayerConfig};
use std::path::{Path, PathBuf};

/// Drives the player from stdin against a simulated audio device.
#[derive(Debug, Parser)]
#[command(name = "podcast-player", version)]
struct Args {
    /// JSON array of episodes, as served by the episode API.
    #[arg(long)]
    episodes: PathBuf,

    /// TOML player config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start playing the whole list from this index.
    #[arg(long)]
    start: Option<usize>,
}

fn load_episodes(path: &Path) -> Result<Vec<Episode>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading episodes from {}", path.display()))?;
    let records: Vec<EpisodeRecord> = serde_json::from_str(&text)
        .with_context(|| format!("parsing episodes from {}", path.display()))?;

    Ok(EpisodeRecord::to_episodes(&records)?)
}

fn load_config(path: Option<&Path>) -> Result<PlayerConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config from {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(PlayerConfig::default()),
    }
}

fn print_status(player: &Player<SimulatedBackend>) {
    let state = player.controller().get();
    let (position, duration) = player.progress();

    let mut modes = vec![];
    if state.is_looping() {
        modes.push("loop");
    }
    if state.is_shuffling() {
        modes.push("shuffle");
    }

    match state.current_episode() {
        Some(episode) => println!(
            "{} [{}/{}] {} - {}  {} / {}  {}",
            if state.is_playing() { "playing" } else { "paused" },
            state.current_index() + 1,
            state.playlist().len(),
            episode.title(),
            episode.members(),
            format_duration(position),
            format_duration(duration),
            modes.join(", "),
        ),
        None => println!("stopped  {}", modes.join(", ")),
    }
}

fn run(
    player: &mut Player<SimulatedBackend>,
    episodes: &[Episode],
    command: Command,
) -> Result<bool> {
    let controller = player.controller().clone();

    match command {
        Command::Play(id) => {
            let episode = episodes
                .iter()
                .find(|episode| episode.id() == id)
                .with_context(|| format!("no episode {:?}", id))?;
            controller.play_single(episode.clone());
        }
        Command::List(index) => controller.play_list(episodes.to_vec(), index)?,
        Command::Toggle => controller.toggle_play(),
        Command::Next => controller.next_episode(),
        Command::Previous => controller.previous_episode(),
        Command::Loop => controller.toggle_loop(),
        Command::Shuffle => controller.toggle_shuffle(),
        Command::Clear => controller.clear_player_state(),
        Command::Seek(position) => player.seek(position),
        Command::Tick(seconds) => player.backend_mut().advance(seconds),
        Command::Status => print_status(player),
        Command::Quit => return Ok(false),
    }

    player.refresh();
    player.process_events();

    Ok(true)
}

// For now, this is a way to sanity check the player, not a real frontend.
fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();
    let episodes = load_episodes(&args.episodes)?;
    let config = load_config(args.config.as_deref())?;
    info!("Loaded {} episodes", episodes.len());

    async_std::task::block_on(async {
        let (controller, mut waiter) = PlaybackController::new(config);
        let mut player = Player::new(controller.clone(), SimulatedBackend::default());

        if let Some(start) = args.start {
            controller.play_list(episodes.clone(), start)?;
            player.refresh();
            player.process_events();
        }

        let mut lines = BufReader::new(async_std::io::stdin()).lines();
        while let Some(line) = lines.next().await {
            let line = line.context("reading stdin")?;

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    warn!("{:#}", err);
                    continue;
                }
            };

            match run(&mut player, &episodes, command) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => warn!("{:#}", err),
            }

            let mut changed = false;
            while let Ok(()) = waiter.try_recv() {
                changed = true;
            }
            if changed {
                print_status(&player);
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}
