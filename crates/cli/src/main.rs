//! SkyCrew CLI
//!
//! Command-line front end for checking, ranking, and committing pilot and
//! drone assignments against a JSON roster directory.

mod args;
mod commands;

use anyhow::{Context, Result};
use skycrew_assignment::AssignmentRequest;
use skycrew_core::{logging, Config};
use std::process;

use args::{Cli, Command};
use commands::*;

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default_config(),
    };
    if let Some(dir) = &cli.data {
        config.data.dir = dir.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    logging::init_with(&config.logging);

    let roster = open_roster(&config.data)?;
    let json = cli.json;

    match cli.command {
        Command::Check { pilot, drone, project } => cmd_check(roster, &pilot, &drone, &project, json),
        Command::Match { project } => cmd_match(roster, config.ranking, &project, json),
        Command::Urgent { project } => cmd_urgent(roster, config.ranking, &project, json),
        Command::Assign {
            pilot,
            drone,
            project,
            confirm,
        } => {
            let mut request = AssignmentRequest::new(pilot, drone, project);
            request.confirmed = confirm;
            cmd_assign(roster, request, json)
        }
        Command::Release { pilot, drone } => cmd_release(roster, &pilot, &drone, json),
        Command::Pilots(query) => cmd_pilots(roster, &query, json),
        Command::Drones(query) => cmd_drones(roster, &query, json),
        Command::Missions(query) => cmd_missions(roster, &query, json),
        Command::SetPilot(update) => cmd_set_pilot(roster, &update, json),
        Command::SetDrone(update) => cmd_set_drone(roster, &update, json),
        Command::Summary => cmd_summary(roster, json),
    }
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if raw.iter().any(|a| a == "--help" || a == "-h") {
        args::print_usage();
        return;
    }

    let cli = match args::parse(&raw) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            println!();
            args::print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
