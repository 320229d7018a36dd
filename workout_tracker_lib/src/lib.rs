pub mod app;
pub mod collection;
pub mod config;
pub mod coords;
pub mod error;
pub mod form;
pub mod geolocation;
pub mod list;
pub mod map;
pub mod persistence;
pub mod storage;
pub mod workout;

pub use app::{AppController, Submission};
pub use collection::WorkoutCollection;
pub use config::TrackerConfig;
pub use coords::Coords;
pub use error::{ConfigError, StoreError, TrackerError, ValidationError};
pub use form::{FormController, FormState};
pub use geolocation::{GeolocationError, Geolocator, PositionCallback};
pub use list::{ListEntry, ListDetail};
pub use map::{MapController, MapService, MapStatus, PopupSpec, ViewOptions};
pub use persistence::WorkoutRepository;
pub use storage::{KeyValueStore, MemoryStore};
pub use workout::{Activity, Field, IdGenerator, Metric, NewWorkout, Workout, WorkoutId, WorkoutKind};
