//! Explicit snapshot cache in front of a roster source
//!
//! Collections are loaded on first read and served from memory until they
//! are invalidated. Writes through the cache invalidate the collection they
//! touched; [`CachedRoster::refresh_all`] drops everything.

use std::sync::RwLock;
use tracing::{debug, info};

use crate::error::{Result, RosterError};
use crate::model::{Drone, Mission, Pilot};
use crate::source::{DroneStatusUpdate, PilotStatusUpdate, RosterSource};

#[derive(Debug)]
struct Entry<T> {
    value: Option<Vec<T>>,
    // Bumped on every invalidation.
    generation: u64,
}

#[derive(Debug)]
struct Slot<T> {
    name: &'static str,
    entry: RwLock<Entry<T>>,
}

impl<T: Clone> Slot<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            entry: RwLock::new(Entry {
                value: None,
                generation: 0,
            }),
        }
    }

    fn poisoned(&self) -> RosterError {
        RosterError::Unavailable(format!("{} cache lock poisoned", self.name))
    }

    /// Serve the cached collection or load it.
    ///
    /// A load that overlaps an invalidation is returned to the caller but
    /// not stored, so a write through the cache is never shadowed by rows
    /// read before it.
    fn get_or_load(&self, load: impl FnOnce() -> Result<Vec<T>>) -> Result<Vec<T>> {
        let generation = {
            let entry = self.entry.read().map_err(|_| self.poisoned())?;
            if let Some(cached) = entry.value.as_ref() {
                return Ok(cached.clone());
            }
            entry.generation
        };

        let fresh = load()?;

        let mut entry = self.entry.write().map_err(|_| self.poisoned())?;
        if entry.generation == generation {
            debug!(collection = self.name, records = fresh.len(), "Cache filled");
            entry.value = Some(fresh.clone());
        } else {
            debug!(collection = self.name, "Discarded load that raced an invalidation");
        }
        Ok(fresh)
    }

    fn invalidate(&self) -> Result<()> {
        let mut entry = self.entry.write().map_err(|_| self.poisoned())?;
        entry.value = None;
        entry.generation = entry.generation.wrapping_add(1);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.entry.read().map(|e| e.value.is_some()).unwrap_or(false)
    }
}

/// Roster source that keeps snapshots of `S` until told to refresh
#[derive(Debug)]
pub struct CachedRoster<S> {
    inner: S,
    pilots: Slot<Pilot>,
    drones: Slot<Drone>,
    missions: Slot<Mission>,
}

impl<S: RosterSource> CachedRoster<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            pilots: Slot::new("pilots"),
            drones: Slot::new("drones"),
            missions: Slot::new("missions"),
        }
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn invalidate_pilots(&self) -> Result<()> {
        self.pilots.invalidate()
    }

    pub fn invalidate_drones(&self) -> Result<()> {
        self.drones.invalidate()
    }

    pub fn invalidate_missions(&self) -> Result<()> {
        self.missions.invalidate()
    }

    /// Drop every cached collection; the next reads hit the source
    pub fn refresh_all(&self) -> Result<()> {
        self.pilots.invalidate()?;
        self.drones.invalidate()?;
        self.missions.invalidate()?;
        info!("Roster cache cleared");
        Ok(())
    }

    /// Which collections are currently held: (pilots, drones, missions)
    pub fn loaded(&self) -> (bool, bool, bool) {
        (
            self.pilots.is_loaded(),
            self.drones.is_loaded(),
            self.missions.is_loaded(),
        )
    }
}

impl<S: RosterSource> RosterSource for CachedRoster<S> {
    fn pilots(&self) -> Result<Vec<Pilot>> {
        self.pilots.get_or_load(|| self.inner.pilots())
    }

    fn drones(&self) -> Result<Vec<Drone>> {
        self.drones.get_or_load(|| self.inner.drones())
    }

    fn missions(&self) -> Result<Vec<Mission>> {
        self.missions.get_or_load(|| self.inner.missions())
    }

    fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool> {
        let updated = self.inner.update_pilot_status(update)?;
        self.pilots.invalidate()?;
        Ok(updated)
    }

    fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool> {
        let updated = self.inner.update_drone_status(update)?;
        self.drones.invalidate()?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PilotStatus;
    use crate::store::InMemoryRoster;
    use std::sync::{mpsc, Arc, Mutex};
    use std::thread;

    fn backing() -> Arc<InMemoryRoster> {
        Arc::new(InMemoryRoster::new(
            vec![Pilot::new("P001", "Arjun", "Pune")],
            vec![Drone::new("D001", "M300", "Pune")],
            vec![],
        ))
    }

    #[test]
    fn test_serves_stale_until_refreshed() {
        let store = backing();
        let cache = CachedRoster::new(Arc::clone(&store));

        assert_eq!(cache.pilots().unwrap().len(), 1);
        store.add_pilot(Pilot::new("P002", "Neha", "Pune")).unwrap();
        assert_eq!(cache.pilots().unwrap().len(), 1);

        cache.refresh_all().unwrap();
        assert_eq!(cache.pilots().unwrap().len(), 2);
    }

    #[test]
    fn test_write_invalidates_only_touched_collection() {
        let cache = CachedRoster::new(backing());
        cache.pilots().unwrap();
        cache.drones().unwrap();
        assert_eq!(cache.loaded(), (true, true, false));

        cache
            .update_pilot_status(&PilotStatusUpdate::new("P001", PilotStatus::OnLeave))
            .unwrap();

        assert_eq!(cache.loaded(), (false, true, false));
        assert_eq!(cache.pilots().unwrap()[0].status, PilotStatus::OnLeave);
    }

    /// Pauses the first `pilots` read after the rows are fetched
    struct PausedReads {
        inner: InMemoryRoster,
        entered: Mutex<Option<mpsc::Sender<()>>>,
        resume: Mutex<Option<mpsc::Receiver<()>>>,
    }

    impl RosterSource for PausedReads {
        fn pilots(&self) -> Result<Vec<Pilot>> {
            let rows = self.inner.pilots()?;
            let entered = self.entered.lock().unwrap().take();
            let resume = self.resume.lock().unwrap().take();
            if let (Some(entered), Some(resume)) = (entered, resume) {
                entered.send(()).unwrap();
                resume.recv().unwrap();
            }
            Ok(rows)
        }

        fn drones(&self) -> Result<Vec<Drone>> {
            self.inner.drones()
        }

        fn missions(&self) -> Result<Vec<Mission>> {
            self.inner.missions()
        }

        fn update_pilot_status(&self, update: &PilotStatusUpdate) -> Result<bool> {
            self.inner.update_pilot_status(update)
        }

        fn update_drone_status(&self, update: &DroneStatusUpdate) -> Result<bool> {
            self.inner.update_drone_status(update)
        }
    }

    #[test]
    fn test_write_during_load_is_not_shadowed() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (resume_tx, resume_rx) = mpsc::channel();
        let cache = Arc::new(CachedRoster::new(PausedReads {
            inner: InMemoryRoster::new(vec![Pilot::new("P001", "Arjun", "Pune")], vec![], vec![]),
            entered: Mutex::new(Some(entered_tx)),
            resume: Mutex::new(Some(resume_rx)),
        }));

        let reader = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.pilots().unwrap())
        };

        entered_rx.recv().unwrap();
        cache
            .update_pilot_status(&PilotStatusUpdate::new("P001", PilotStatus::OnLeave))
            .unwrap();
        resume_tx.send(()).unwrap();

        let stale = reader.join().unwrap();
        assert_eq!(stale[0].status, PilotStatus::Available);

        assert_eq!(cache.loaded(), (false, false, false));
        assert_eq!(cache.pilots().unwrap()[0].status, PilotStatus::OnLeave);
        assert_eq!(cache.loaded(), (true, false, false));
    }

    #[test]
    fn test_explicit_invalidation() {
        let cache = CachedRoster::new(backing());
        cache.drones().unwrap();
        cache.invalidate_drones().unwrap();
        assert_eq!(cache.loaded(), (false, false, false));
    }
}
