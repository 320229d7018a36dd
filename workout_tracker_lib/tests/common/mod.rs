#![allow(dead_code)]

use std::{cell::Cell, rc::Rc};

use chrono::{DateTime, FixedOffset, TimeZone};
use workout_tracker_lib::{
    AppController, Coords, KeyValueStore, MapService, MemoryStore, PopupSpec, StoreError, TrackerConfig,
    ViewOptions,
};

/// Map fake that records every call.
#[derive(Default)]
pub struct RecordingMap {
    pub view: Option<(Coords, f64)>,
    pub tile_layers: Vec<(String, String)>,
    pub markers: Vec<(Coords, PopupSpec)>,
    pub views: Vec<(Coords, f64, ViewOptions)>,
    pub click_handler: Option<Box<dyn Fn(Coords)>>,
    pending_ready: Option<Box<dyn FnOnce()>>,
}

impl RecordingMap {
    pub fn fire_ready(&mut self) {
        if let Some(on_ready) = self.pending_ready.take() {
            on_ready();
        }
    }

    pub fn click(&self, at: Coords) {
        if let Some(handler) = &self.click_handler {
            handler(at);
        }
    }
}

impl MapService for RecordingMap {
    fn create_view(&mut self, center: Coords, zoom: f64, on_ready: Box<dyn FnOnce()>) {
        self.view = Some((center, zoom));
        self.pending_ready = Some(on_ready);
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        self.tile_layers.push((url_template.to_string(), attribution.to_string()));
    }

    fn add_marker(&mut self, at: Coords, popup: &PopupSpec) {
        self.markers.push((at, popup.clone()));
    }

    fn set_view(&mut self, center: Coords, zoom: f64, options: ViewOptions) {
        self.views.push((center, zoom, options));
    }

    fn on_click(&mut self, handler: Box<dyn Fn(Coords)>) {
        self.click_handler = Some(handler);
    }
}

/// Store that reads fine but refuses every write.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write {
            key: key.to_string(),
            reason: "quota exceeded".to_string(),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        Err(StoreError::Remove {
            key: key.to_string(),
            reason: "read only".to_string(),
        })
    }
}

pub type TestApp<S = MemoryStore> = AppController<RecordingMap, S>;

pub fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2024, 3, 7, 18, 30, 0).unwrap()
}

/// Runs the startup protocol up to a ready map. The returned flag shows
/// whether the map signalled readiness.
pub fn started_app<S: KeyValueStore>(store: S) -> (TestApp<S>, Rc<Cell<bool>>) {
    let mut app = AppController::new(TrackerConfig::default(), RecordingMap::default(), store);
    app.start();

    let ready = Rc::new(Cell::new(false));
    let flag = ready.clone();
    app.on_located(Ok(Coords(56.17, 10.19)), Box::new(move || flag.set(true)))
        .unwrap();
    app.map_mut().service_mut().fire_ready();
    app.on_map_ready();

    (app, ready)
}
