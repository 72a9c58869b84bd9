use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use synclyrics::app::{self, actions::Action, App, FollowSettings};
use synclyrics::config::{self, Config};
use synclyrics::lyrics::{self, LyricsTimeline};
use synclyrics::player::format_time;
use synclyrics::playlist::NewTrack;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "synclyrics", version, about = "Timestamped lyrics follower")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every parsed line with its offset.
    Parse {
        /// Lyrics file, or `-` for stdin.
        file: PathBuf,
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the line that is active at a playback position.
    Active {
        file: PathBuf,
        /// Playback position in seconds.
        #[arg(long)]
        at: f64,
    },
    /// Simulate playback and print each change of active line.
    Follow {
        file: PathBuf,
        /// Start position in seconds.
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        /// Stop position in seconds (default: last timestamp plus the configured tail).
        #[arg(long)]
        until: Option<f64>,
        /// Playback rate (default: from config).
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Print the built-in demo lyrics.
    Demo,
    /// Inspect the config file.
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the config file location.
    Path,
    /// Print the effective config.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Parse { file, json } => {
            let timeline = LyricsTimeline::parse(&lyrics::read_lyrics(&file)?);
            if json {
                serde_json::to_writer_pretty(&mut out, &timeline.lines)
                    .context("encode lyrics json")?;
                writeln!(out)?;
            } else {
                for (i, line) in timeline.lines.iter().enumerate() {
                    writeln!(out, "{i:>3}  {:>5}  {}", format_time(line.time_secs), line.text)?;
                }
            }
        }
        Command::Active { file, at } => {
            let timeline = LyricsTimeline::parse(&lyrics::read_lyrics(&file)?);
            match timeline.active_index(at) {
                Some(i) => {
                    let line = &timeline.lines[i];
                    writeln!(out, "{i:>3}  {:>5}  {}", format_time(line.time_secs), line.text)?;
                }
                None => writeln!(out, "none")?,
            }
        }
        Command::Follow {
            file,
            from,
            until,
            speed,
        } => {
            let raw = lyrics::read_lyrics(&file)?;
            let mut settings = FollowSettings::from_config(&cfg);
            settings.from_secs = from;
            if let Some(speed) = speed {
                settings.speed = speed;
            }
            let duration = until.unwrap_or_else(|| default_stop(&raw, &cfg));

            let mut app = App::new(&cfg);
            app.apply(Action::AddTracks(vec![NewTrack::new(
                track_file_name(&file),
                duration,
            )]));
            app.apply(Action::SetLyrics(raw));

            let marker = cfg.ui.active_marker.clone();
            let changes = app::follow(&mut app, &settings, |change| {
                let at = format_time(change.position_secs);
                let written = match &change.line {
                    Some(line) => writeln!(out, "[{at}] {marker}{}", line.text),
                    None => writeln!(out, "[{at}] -"),
                };
                written.context("write line")?;
                out.flush().context("flush stdout")
            })
            .await?;
            tracing::info!(changes, "follow finished");
        }
        Command::Demo => writeln!(out, "{}", lyrics::DEMO_LYRICS)?,
        Command::Config { cmd } => match cmd {
            ConfigCommand::Path => {
                let path = match cli.config {
                    Some(p) => p,
                    None => config::default_config_path().context("default config path")?,
                };
                writeln!(out, "{}", path.display())?;
            }
            ConfigCommand::Show => {
                let raw = toml::to_string_pretty(&cfg).context("serialize config")?;
                write!(out, "{raw}")?;
            }
        },
    }

    Ok(())
}

/// Last timestamp in the text plus the configured tail
fn default_stop(raw: &str, cfg: &Config) -> f64 {
    let last = LyricsTimeline::parse(raw)
        .lines
        .iter()
        .map(|l| l.time_secs)
        .fold(0.0, f64::max);
    last + cfg.player.tail_secs.max(0.0)
}

fn track_file_name(path: &Path) -> String {
    if path == Path::new("-") {
        return "stdin".to_string();
    }
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
