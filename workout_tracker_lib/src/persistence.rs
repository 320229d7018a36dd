use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    coords::Coords,
    error::{StoreError, TrackerError, ValidationError},
    storage::KeyValueStore,
    workout::{Activity, NewWorkout, Workout, WorkoutId, WorkoutKind},
};

/// Stored shape of a single workout. The `kind` tag decides which variant it
/// is rebuilt into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkoutRecord {
    id: WorkoutId,
    created_at: DateTime<FixedOffset>,
    coords: Coords,
    distance: f64,
    duration: f64,
    description: String,
    #[serde(flatten)]
    activity: ActivityRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ActivityRecord {
    Running {
        cadence: u32,
    },
    Cycling {
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
    },
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let activity = match *workout.activity() {
            Activity::Running { cadence, .. } => ActivityRecord::Running { cadence },
            Activity::Cycling { elevation_gain, .. } => ActivityRecord::Cycling { elevation_gain },
        };

        Self {
            id: workout.id().clone(),
            created_at: *workout.created_at(),
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            description: workout.description().to_string(),
            activity,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = ValidationError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let (kind, specific) = match record.activity {
            ActivityRecord::Running { cadence } => (WorkoutKind::Running, cadence as f64),
            ActivityRecord::Cycling { elevation_gain } => (WorkoutKind::Cycling, elevation_gain),
        };

        let new = NewWorkout {
            kind,
            coords: record.coords,
            distance: record.distance,
            duration: record.duration,
            specific,
        };

        Workout::create(new, record.id, record.created_at)
    }
}

/// Reads and writes the whole workout collection under a single key.
pub struct WorkoutRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), StoreError> {
        let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
        let json = serde_json::to_string(&records).map_err(|e| StoreError::Write {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;

        self.store.set(&self.key, &json)
    }

    /// Best effort: anything that cannot be read yields an empty collection.
    pub fn load(&self) -> Vec<Workout> {
        match self.try_load() {
            Ok(workouts) => workouts,
            Err(err) => {
                warn!("{err}, starting with no workouts");
                Vec::new()
            }
        }
    }

    /// Like `load`, but reports a document that is not a list of records.
    /// Individual records that fail to rebuild are skipped.
    pub fn try_load(&self) -> Result<Vec<Workout>, TrackerError> {
        let Some(json) = self.store.get(&self.key) else {
            return Ok(Vec::new());
        };

        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&json).map_err(|e| TrackerError::PersistenceRead(e.to_string()))?;

        let total = entries.len();
        let workouts: Vec<Workout> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let rebuilt = serde_json::from_value::<WorkoutRecord>(entry)
                    .map_err(|e| e.to_string())
                    .and_then(|record| Workout::try_from(record).map_err(|e| e.to_string()));

                match rebuilt {
                    Ok(workout) => Some(workout),
                    Err(reason) => {
                        warn!("Skipping stored workout #{index}: {reason}");
                        None
                    }
                }
            })
            .collect();

        info!("Loaded {} of {} stored workouts", workouts.len(), total);
        Ok(workouts)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(&self.key)
    }
}
