//! Command handlers
//!
//! Each handler talks to the engine through a shared roster handle and
//! prints either plain text or pretty JSON.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use skycrew_assignment::{
    AssignmentCoordinator, AssignmentOutcome, AssignmentRequest, CandidateRanker, ConflictDetector,
};
use skycrew_core::{DataConfig, RankingPolicy};
use skycrew_roster::{
    CachedRoster, DroneQuery, DroneStatusUpdate, FallbackRoster, JsonDirectoryRoster, MissionQuery,
    PilotQuery, PilotStatusUpdate, RosterSource,
};
use std::sync::Arc;
use tracing::warn;

pub type Roster = Arc<dyn RosterSource>;

/// Open the roster described by the `[data]` table
pub fn open_roster(config: &DataConfig) -> Result<Roster> {
    let fallback = match &config.fallback_dir {
        Some(dir) => Some(
            JsonDirectoryRoster::open(dir)
                .with_context(|| format!("Failed to open fallback roster {}", dir.display()))?,
        ),
        None => None,
    };

    let source: Box<dyn RosterSource> = match (JsonDirectoryRoster::open(&config.dir), fallback) {
        (Ok(primary), Some(secondary)) => Box::new(FallbackRoster::new(primary, secondary)),
        (Ok(primary), None) => Box::new(primary),
        (Err(e), Some(secondary)) => {
            warn!(dir = %config.dir.display(), error = %e, "Primary roster unavailable, using fallback");
            Box::new(secondary)
        }
        (Err(e), None) => {
            return Err(e).with_context(|| format!("Failed to open roster {}", config.dir.display()))
        }
    };

    if config.cache {
        Ok(Arc::new(CachedRoster::new(source)))
    } else {
        Ok(Arc::from(source))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

pub fn cmd_check(roster: Roster, pilot: &str, drone: &str, project: &str, json: bool) -> Result<()> {
    let report = ConflictDetector::new(roster).check_conflicts(pilot, drone, project);

    if json {
        print_json(&report)
    } else {
        print!("{}", report);
        Ok(())
    }
}

pub fn cmd_match(roster: Roster, policy: RankingPolicy, project: &str, json: bool) -> Result<()> {
    let matches = CandidateRanker::with_policy(roster, policy).match_pilots_to_project(project)?;

    if json {
        return print_json(&matches);
    }

    if matches.is_empty() {
        println!("No available pilots match project {}", project);
        return Ok(());
    }
    println!("Pilots for {}:", project);
    for (rank, m) in matches.iter().enumerate() {
        println!(
            "{}. {} {} (score {}) - {} - {}",
            rank + 1,
            m.pilot_id,
            m.name,
            m.score,
            m.location,
            m.skills
        );
    }
    Ok(())
}

pub fn cmd_urgent(roster: Roster, policy: RankingPolicy, project: &str, json: bool) -> Result<()> {
    let urgent = CandidateRanker::with_policy(roster, policy).find_urgent_reassignment_candidates(project)?;

    if json {
        return print_json(&urgent);
    }

    if urgent.candidates.is_empty() {
        println!("No pilot with a co-located available drone for {}", project);
        return Ok(());
    }
    println!("Urgent candidates for {}:", urgent.project_id);
    for (rank, c) in urgent.candidates.iter().enumerate() {
        println!(
            "{}. {} {} with {} (total {}, skills matched {}, on site: {})",
            rank + 1,
            c.pilot_id,
            c.pilot_name,
            c.drone_id,
            c.total_score,
            c.skill_match_score,
            if c.location_match { "yes" } else { "no" }
        );
    }
    Ok(())
}

pub fn cmd_assign(roster: Roster, request: AssignmentRequest, json: bool) -> Result<()> {
    let outcome = AssignmentCoordinator::new(roster).assign(&request)?;

    if json {
        print_json(&outcome)?;
    } else {
        match &outcome {
            AssignmentOutcome::Blocked { report } => {
                print!("{}", report);
                println!("Assignment not committed.");
            }
            AssignmentOutcome::NeedsConfirmation { report } => {
                print!("{}", report);
                println!("Re-run with --confirm to commit despite the warnings.");
            }
            AssignmentOutcome::Committed { report, .. } => {
                if !report.is_clear() {
                    print!("{}", report);
                }
                if outcome.is_committed() {
                    println!(
                        "Assigned {} with {} to {}",
                        request.pilot_id, request.drone_id, request.project_id
                    );
                }
            }
        }
    }

    match &outcome {
        AssignmentOutcome::Blocked { .. } => bail!("Assignment blocked by critical conflicts"),
        AssignmentOutcome::NeedsConfirmation { .. } => bail!("Assignment needs confirmation"),
        AssignmentOutcome::Committed {
            pilot_updated,
            drone_updated,
            ..
        } if !outcome.is_committed() => bail!(
            "Assignment was only partially written (pilot updated: {}, drone updated: {})",
            pilot_updated,
            drone_updated
        ),
        AssignmentOutcome::Committed { .. } => Ok(()),
    }
}

pub fn cmd_release(roster: Roster, pilot: &str, drone: &str, json: bool) -> Result<()> {
    let released = AssignmentCoordinator::new(roster).release(pilot, drone)?;

    if json {
        print_json(&released)?;
    } else {
        println!("Pilot {}: {}", pilot, updated_label(released.pilot_updated));
        println!("Drone {}: {}", drone, updated_label(released.drone_updated));
    }
    Ok(())
}

pub fn cmd_pilots(roster: Roster, query: &PilotQuery, json: bool) -> Result<()> {
    let pilots = roster.query_pilots(query)?;
    if json {
        return print_json(&pilots);
    }

    println!("{} pilot(s)", pilots.len());
    for p in &pilots {
        println!(
            "{} {} | {} | {} | skills: {} | certs: {}{}",
            p.pilot_id,
            p.name,
            p.location,
            p.status,
            p.skills,
            p.certifications,
            p.active_assignment()
                .map(|prj| format!(" | on {}", prj))
                .unwrap_or_default()
        );
    }
    Ok(())
}

pub fn cmd_drones(roster: Roster, query: &DroneQuery, json: bool) -> Result<()> {
    let drones = roster.query_drones(query)?;
    if json {
        return print_json(&drones);
    }

    println!("{} drone(s)", drones.len());
    for d in &drones {
        println!(
            "{} {} | {} | {} | {}{}",
            d.drone_id,
            d.model,
            d.location,
            d.status,
            d.capabilities,
            d.current_assignment
                .as_deref()
                .map(|prj| format!(" | on {}", prj))
                .unwrap_or_default()
        );
    }
    Ok(())
}

pub fn cmd_missions(roster: Roster, query: &MissionQuery, json: bool) -> Result<()> {
    let missions = roster.query_missions(query)?;
    if json {
        return print_json(&missions);
    }

    println!("{} mission(s)", missions.len());
    for m in &missions {
        println!(
            "{} {} | {} | {} | {} to {} | skills: {}",
            m.project_id, m.client, m.priority, m.location, m.start_date, m.end_date, m.required_skills
        );
    }
    Ok(())
}

pub fn cmd_set_pilot(roster: Roster, update: &PilotStatusUpdate, json: bool) -> Result<()> {
    let updated = roster.update_pilot_status(update)?;
    report_update(json, "Pilot", &update.pilot_id, updated)
}

pub fn cmd_set_drone(roster: Roster, update: &DroneStatusUpdate, json: bool) -> Result<()> {
    let updated = roster.update_drone_status(update)?;
    report_update(json, "Drone", &update.drone_id, updated)
}

pub fn cmd_summary(roster: Roster, json: bool) -> Result<()> {
    let summary = roster.summary()?;
    if json {
        return print_json(&summary);
    }

    let p = &summary.pilots;
    let d = &summary.drones;
    let m = &summary.missions;
    println!(
        "Pilots:   {} total, {} available, {} assigned, {} on leave",
        p.total, p.available, p.assigned, p.on_leave
    );
    println!(
        "Drones:   {} total, {} available, {} assigned, {} in maintenance",
        d.total, d.available, d.assigned, d.maintenance
    );
    println!(
        "Missions: {} total, {} urgent, {} high, {} standard",
        m.total, m.urgent, m.high, m.standard
    );
    Ok(())
}

#[derive(Serialize)]
struct UpdateOutput<'a> {
    id: &'a str,
    updated: bool,
}

fn report_update(json: bool, entity: &str, id: &str, updated: bool) -> Result<()> {
    if json {
        print_json(&UpdateOutput { id, updated })?;
    } else {
        println!("{} {}: {}", entity, id, updated_label(updated));
    }

    if !updated {
        bail!("{} {} not found", entity, id);
    }
    Ok(())
}

fn updated_label(updated: bool) -> &'static str {
    if updated {
        "updated"
    } else {
        "not found"
    }
}
