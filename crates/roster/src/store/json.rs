//! JSON snapshot directory store
//!
//! A directory holding `pilots.json`, `drones.json`, and `missions.json`,
//! each an array of flat records whose keys match the roster column names.
//! Every read goes to disk. Updates write the whole collection to a
//! temporary file in the same directory and rename it over the original,
//! so a concurrent reader sees either the old file or the new one.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, RosterError};
use crate::model::{Drone, Mission, Pilot};
use crate::source::{DroneStatusUpdate, PilotStatusUpdate, RosterSnapshot, RosterSource};

pub const PILOTS_FILE: &str = "pilots.json";
pub const DRONES_FILE: &str = "drones.json";
pub const MISSIONS_FILE: &str = "missions.json";

#[derive(Debug)]
pub struct JsonDirectoryRoster {
    dir: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonDirectoryRoster {
    /// Open an existing snapshot directory
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(RosterError::Unavailable(format!(
                "roster directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// Write `snapshot` into `dir` (created if needed) and open it
    pub fn create<P: AsRef<Path>>(dir: P, snapshot: &RosterSnapshot) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        write_collection(&dir.join(PILOTS_FILE), &snapshot.pilots)?;
        write_collection(&dir.join(DRONES_FILE), &snapshot.drones)?;
        write_collection(&dir.join(MISSIONS_FILE), &snapshot.missions)?;
        Self::open(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| RosterError::Unavailable("roster write lock poisoned".to_string()))
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

impl RosterSource for JsonDirectoryRoster {
    fn pilots(&self) -> Result<Vec<Pilot>> {
        read_collection(&self.dir.join(PILOTS_FILE))
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        read_collection(&self.dir.join(DRONES_FILE))
    }

    fn missions(&self) -> Result<Vec<Mission>> {
        read_collection(&self.dir.join(MISSIONS_FILE))
    }

    fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool> {
        let _guard = self.lock()?;
        let path = self.dir.join(PILOTS_FILE);
        let mut pilots: Vec<Pilot> = read_collection(&path)?;

        let Some(pilot) = pilots.iter_mut().find(|p| p.pilot_id == update.pilot_id) else {
            return Ok(false);
        };
        update.apply(pilot);
        write_collection(&path, &pilots)?;
        Ok(true)
    }

    fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool> {
        let _guard = self.lock()?;
        let path = self.dir.join(DRONES_FILE);
        let mut drones: Vec<Drone> = read_collection(&path)?;

        let Some(drone) = drones.iter_mut().find(|d| d.drone_id == update.drone_id) else {
            return Ok(false);
        };
        update.apply(drone);
        write_collection(&path, &drones)?;
        Ok(true)
    }
}
