//! Command-line parsing
//!
//! Global flags may appear anywhere on the line. Every other `--flag` takes
//! a value, except `--confirm`. Identifiers, statuses, and dates are
//! validated here so the engine only ever sees well-formed input.

use skycrew_roster::validation::{validate_date, validate_drone_id, validate_pilot_id, validate_project_id};
use skycrew_roster::{
    DroneQuery, DroneStatus, DroneStatusUpdate, MissionQuery, PilotQuery, PilotStatus, PilotStatusUpdate,
};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub json: bool,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Check {
        pilot: String,
        drone: String,
        project: String,
    },
    Match {
        project: String,
    },
    Urgent {
        project: String,
    },
    Assign {
        pilot: String,
        drone: String,
        project: String,
        confirm: bool,
    },
    Release {
        pilot: String,
        drone: String,
    },
    Pilots(PilotQuery),
    Drones(DroneQuery),
    Missions(MissionQuery),
    SetPilot(PilotStatusUpdate),
    SetDrone(DroneStatusUpdate),
    Summary,
}

/// Option values collected for the selected command
struct Options {
    values: HashMap<String, String>,
    confirm: bool,
}

impl Options {
    fn take(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    fn required(&mut self, name: &str) -> Result<String, String> {
        self.take(name)
            .ok_or_else(|| format!("--{} is required", name))
    }

    fn pilot(&mut self) -> Result<String, String> {
        let id = self.required("pilot")?;
        validate_pilot_id(&id).map_err(|e| e.to_string())?;
        Ok(id)
    }

    fn drone(&mut self) -> Result<String, String> {
        let id = self.required("drone")?;
        validate_drone_id(&id).map_err(|e| e.to_string())?;
        Ok(id)
    }

    fn project(&mut self, name: &str) -> Result<String, String> {
        let id = self.required(name)?;
        validate_project_id(&id).map_err(|e| e.to_string())?;
        Ok(id)
    }

    fn optional_project(&mut self, name: &str) -> Result<Option<String>, String> {
        if self.values.contains_key(name) {
            self.project(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Fail on options the command does not understand
    fn finish(self, command: &str) -> Result<(), String> {
        let mut unknown: Vec<_> = self.values.into_keys().collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort();
        Err(format!(
            "Unexpected option(s) for {}: --{}",
            command,
            unknown.join(", --")
        ))
    }
}

/// Parse everything after the program name
pub fn parse(args: &[String]) -> Result<Cli, String> {
    let mut config = None;
    let mut data = None;
    let mut json = false;
    let mut confirm = false;
    let mut command = None;
    let mut values = HashMap::new();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--json" => json = true,
            "--confirm" => confirm = true,
            "--config" | "--data" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a value", arg))?;
                if arg == "--config" {
                    config = Some(PathBuf::from(value));
                } else {
                    data = Some(PathBuf::from(value));
                }
            }
            flag if flag.starts_with("--") => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a value", flag))?;
                values.insert(flag.trim_start_matches("--").to_string(), value.clone());
            }
            word => {
                if command.is_some() {
                    return Err(format!("Unexpected argument: {}", word));
                }
                command = Some(word.to_string());
            }
        }
        i += 1;
    }

    let name = command.ok_or_else(|| "No command given".to_string())?;
    let mut options = Options { values, confirm };
    let command = build_command(&name, &mut options)?;
    if options.confirm && !matches!(command, Command::Assign { .. }) {
        return Err(format!("--confirm is only valid for assign, not {}", name));
    }
    options.finish(&name)?;

    Ok(Cli {
        config,
        data,
        json,
        command,
    })
}

fn build_command(name: &str, options: &mut Options) -> Result<Command, String> {
    let command = match name {
        "check" => Command::Check {
            pilot: options.pilot()?,
            drone: options.drone()?,
            project: options.project("project")?,
        },
        "match" => Command::Match {
            project: options.project("project")?,
        },
        "urgent" => Command::Urgent {
            project: options.project("project")?,
        },
        "assign" => Command::Assign {
            pilot: options.pilot()?,
            drone: options.drone()?,
            project: options.project("project")?,
            confirm: options.confirm,
        },
        "release" => Command::Release {
            pilot: options.pilot()?,
            drone: options.drone()?,
        },
        "pilots" => Command::Pilots(PilotQuery {
            skill: options.take("skill"),
            location: options.take("location"),
            status: options.take("status"),
            certification: options.take("cert"),
        }),
        "drones" => Command::Drones(DroneQuery {
            capability: options.take("capability"),
            location: options.take("location"),
            status: options.take("status"),
            model: options.take("model"),
        }),
        "missions" => Command::Missions(MissionQuery {
            priority: options.take("priority"),
            location: options.take("location"),
            client: options.take("client"),
        }),
        "set-pilot" => {
            let pilot = options.pilot()?;
            let status: PilotStatus = options
                .required("status")?
                .parse()
                .map_err(|e: skycrew_roster::RosterError| e.to_string())?;
            let mut update = PilotStatusUpdate::new(pilot, status);
            if let Some(date) = options.take("available-from") {
                validate_date(&date).map_err(|e| e.to_string())?;
                update = update.available_from(date);
            }
            if let Some(project) = options.optional_project("assignment")? {
                update = update.current_assignment(project);
            }
            Command::SetPilot(update)
        }
        "set-drone" => {
            let drone = options.drone()?;
            let status: DroneStatus = options
                .required("status")?
                .parse()
                .map_err(|e: skycrew_roster::RosterError| e.to_string())?;
            let mut update = DroneStatusUpdate::new(drone, status);
            if let Some(project) = options.optional_project("assignment")? {
                update = update.current_assignment(project);
            }
            Command::SetDrone(update)
        }
        "summary" => Command::Summary,
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(command)
}

pub fn print_usage() {
    println!("SkyCrew - pilot and drone assignment engine");
    println!();
    println!("USAGE:");
    println!("    skycrew [--config <file>] [--data <dir>] [--json] <command> [options]");
    println!();
    println!("COMMANDS:");
    println!("    check      --pilot <id> --drone <id> --project <id>");
    println!("    match      --project <id>");
    println!("    urgent     --project <id>");
    println!("    assign     --pilot <id> --drone <id> --project <id> [--confirm]");
    println!("    release    --pilot <id> --drone <id>");
    println!("    pilots     [--skill s] [--location l] [--status s] [--cert c]");
    println!("    drones     [--capability c] [--location l] [--status s] [--model m]");
    println!("    missions   [--priority p] [--location l] [--client c]");
    println!("    set-pilot  --pilot <id> --status <s> [--available-from <date>] [--assignment <id>]");
    println!("    set-drone  --drone <id> --status <s> [--assignment <id>]");
    println!("    summary");
    println!();
    println!("EXAMPLES:");
    println!("    skycrew check --pilot P001 --drone D001 --project PRJ001");
    println!("    skycrew --json urgent --project PRJ009");
    println!("    skycrew assign --pilot P003 --drone D003 --project PRJ005 --confirm");
}
