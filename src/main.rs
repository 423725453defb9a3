mod script;
mod services;
mod state;

use std::io::{self, Read};
use std::path::PathBuf;

use canvas::doc::CameraKind;
use canvas::render::build_scene;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::services::materials::{material_lines, material_list};
use crate::services::report::ReportStatus;
use crate::state::{Session, SessionError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read script {path}: {source}")]
    ReadScript {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("script {path}, {source}")]
    Script {
        path: String,
        #[source]
        source: script::ScriptError,
    },
    #[error("script {path}, {source}")]
    Replay {
        path: String,
        #[source]
        source: SessionError,
    },
    #[error("{0}")]
    Report(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "floorplan", about = "Headless floor-plan editor: replay input scripts and derive artifacts")]
struct Cli {
    /// Name of the floor every new plan starts with.
    #[arg(long, global = true, env = "FLOORPLAN_INITIAL_FLOOR", default_value = "Erdgeschoss")]
    initial_floor: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a replay script to a fresh plan and print the result.
    Replay {
        #[arg(help = "Script file path, or - for stdin")]
        script: String,
        #[arg(long, value_enum, default_value_t = Output::Summary)]
        output: Output,
    },
    /// Print the material list for a set of camera variants.
    Materials {
        #[arg(required = true)]
        cameras: Vec<CameraKind>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Floor and entity counts as JSON.
    Summary,
    /// The active floor's scene as JSON.
    Scene,
    /// Material list lines.
    Materials,
    /// Compliance report text.
    Report,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay { script, output } => run_replay(&cli.initial_floor, &script, output).await,
        Command::Materials { cameras } => {
            print_lines(&material_lines(&material_list(cameras)));
            Ok(())
        }
    }
}

async fn run_replay(initial_floor: &str, path: &str, output: Output) -> Result<(), CliError> {
    let text = read_script(path).await.map_err(|source| CliError::ReadScript { path: path.to_owned(), source })?;
    let steps = script::parse_script(&text).map_err(|source| CliError::Script { path: path.to_owned(), source })?;

    let mut session = Session::new(initial_floor);
    session.replay(&steps).await.map_err(|source| CliError::Replay { path: path.to_owned(), source })?;

    match output {
        Output::Summary => print_json(&session.summary()),
        Output::Scene => print_json(&build_scene(session.engine())),
        Output::Materials => {
            let items = match session.materials() {
                Some(captured) => captured.to_vec(),
                None => session.current_materials(),
            };
            print_lines(&material_lines(&items));
            Ok(())
        }
        Output::Report => {
            if matches!(session.report(), ReportStatus::Idle) {
                session.generate_report().await;
            }
            match session.report() {
                ReportStatus::Ready(text) => {
                    println!("{text}");
                    Ok(())
                }
                ReportStatus::Failed(message) => Err(CliError::Report(message.clone())),
                ReportStatus::Idle | ReportStatus::Pending => Err(CliError::Report("report did not complete".to_owned())),
            }
        }
    }
}

async fn read_script(path: &str) -> io::Result<String> {
    if path == "-" {
        return tokio::task::spawn_blocking(|| {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok::<_, io::Error>(text)
        })
        .await
        .map_err(io::Error::other)?;
    }
    tokio::fs::read_to_string(PathBuf::from(path)).await
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
