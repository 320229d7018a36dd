use chrono::{DateTime, FixedOffset};
use tracing::{debug, info, warn};

use crate::{
    collection::WorkoutCollection,
    config::TrackerConfig,
    coords::Coords,
    error::TrackerError,
    form::FormController,
    geolocation::GeolocationError,
    list::ListEntry,
    map::{MapController, MapService},
    persistence::WorkoutRepository,
    storage::KeyValueStore,
    workout::{Field, IdGenerator, Workout, WorkoutId, WorkoutKind},
};

/// Outcome of a successful `submit`.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: WorkoutId,
    pub save_error: Option<TrackerError>,
}

/**
 * Owns every piece of tracker state and drives it from UI events.
 *
 * Startup: `start` rehydrates stored workouts, `on_located` creates the map
 * once a position is known and `on_map_ready` renders the stored markers.
 * A map click opens the form through `select_point`, `submit` turns the form
 * into a workout.
 */
pub struct AppController<M, S> {
    config: TrackerConfig,
    workouts: WorkoutCollection,
    repository: WorkoutRepository<S>,
    map: MapController<M>,
    form: FormController,
    ids: IdGenerator,
}

impl<M: MapService, S: KeyValueStore> AppController<M, S> {
    pub fn new(config: TrackerConfig, map_service: M, store: S) -> Self {
        let repository = WorkoutRepository::new(store, config.storage.key.clone());
        let map = MapController::new(map_service, config.map.clone());

        Self {
            config,
            workouts: WorkoutCollection::new(),
            repository,
            map,
            form: FormController::new(),
            ids: IdGenerator::default(),
        }
    }

    pub fn start(&mut self) {
        let stored = self.repository.load();
        for workout in &stored {
            self.ids.observe(workout.id());
        }
        self.workouts.replace_all(stored);
        info!("Rehydrated {} workouts", self.workouts.len());

        if self.map.is_ready() {
            self.render_all_markers();
        }
    }

    pub fn on_located(
        &mut self,
        position: Result<Coords, GeolocationError>,
        on_ready: Box<dyn FnOnce()>,
    ) -> Result<(), TrackerError> {
        match position {
            Ok(center) => {
                self.map.initialize(center, on_ready);
                Ok(())
            }
            Err(err) => {
                warn!("Geolocation failed: {err}");
                self.map.mark_unavailable();
                Err(TrackerError::GeolocationUnavailable(err))
            }
        }
    }

    pub fn on_map_ready(&mut self) {
        if self.map.mark_ready() {
            info!("Map ready");
            self.render_all_markers();
        }
    }

    pub fn on_point_selected(&mut self, handler: Box<dyn Fn(Coords)>) {
        self.map.on_point_selected(handler);
    }

    pub fn select_point(&mut self, point: Coords) {
        self.form.open(point);
    }

    pub fn select_kind(&mut self, kind: WorkoutKind) {
        self.form.select_kind(kind);
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
    }

    pub fn restore_form_display(&mut self) {
        self.form.restore_display();
    }

    /// Validates the form and records the workout. A failed save does not undo
    /// the submission: the workout stays in memory for the rest of the session
    /// and the failure comes back in `Submission::save_error`.
    pub fn submit(&mut self, created_at: DateTime<FixedOffset>) -> Result<Submission, TrackerError> {
        let new = self.form.validate()?;
        let mut ids = self.ids.clone();
        let id = ids.next(&created_at);
        let workout = Workout::create(new, id.clone(), created_at)?;
        self.ids = ids;

        info!("New workout {}: {}", workout.id(), workout.description());
        self.workouts.append(workout);
        if let Some(workout) = self.workouts.last() {
            self.map.render_marker(workout);
        }

        let save_error = self.repository.save(self.workouts.all()).err().map(|err| {
            let err = TrackerError::PersistenceWrite(err);
            warn!("{err}");
            err
        });

        self.form.finish_submission();
        Ok(Submission { id, save_error })
    }

    /// Pans to the selected workout. Unknown ids are ignored.
    pub fn select_workout(&mut self, id: &WorkoutId) -> bool {
        match self.workouts.find(id) {
            Some(workout) => self.map.pan_to(workout.coords()),
            None => {
                debug!("No workout with id {id}");
                false
            }
        }
    }

    /// Forgets every workout. The caller restarts the page afterwards.
    pub fn reset(&mut self) -> Result<(), TrackerError> {
        self.repository.clear()?;
        self.workouts.replace_all(Vec::new());
        self.form = FormController::new();
        self.ids = IdGenerator::default();
        info!("Stored workouts cleared");
        Ok(())
    }

    /// Newest first.
    pub fn list_entries(&self) -> Vec<ListEntry> {
        self.workouts.all().iter().rev().map(ListEntry::from).collect()
    }

    pub fn workouts(&self) -> &WorkoutCollection {
        &self.workouts
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn map(&self) -> &MapController<M> {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapController<M> {
        &mut self.map
    }

    pub fn repository(&self) -> &WorkoutRepository<S> {
        &self.repository
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn render_all_markers(&mut self) {
        for workout in self.workouts.all() {
            self.map.render_marker(workout);
        }
    }
}
