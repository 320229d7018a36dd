use tracing::{debug, info};

use crate::{config::MapConfig, coords::Coords, workout::Workout};

#[derive(Debug, Clone, PartialEq)]
pub struct PopupSpec {
    pub content: String,
    pub class_name: String,
    pub min_width: f64,
    pub max_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub animate: bool,
    pub pan_duration_secs: f64,
}

/// The map widget as seen by the tracker.
pub trait MapService {
    /// Centers a new view. `on_ready` is called once the map accepts markers.
    fn create_view(&mut self, center: Coords, zoom: f64, on_ready: Box<dyn FnOnce()>);

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);

    fn add_marker(&mut self, at: Coords, popup: &PopupSpec);

    fn set_view(&mut self, center: Coords, zoom: f64, options: ViewOptions);

    fn on_click(&mut self, handler: Box<dyn Fn(Coords)>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapStatus {
    /// Waiting for the user's position.
    Pending,
    /// View created, waiting for the ready signal.
    Loading,
    Ready,
    /// No position could be found, map features stay off.
    Unavailable,
}

pub struct MapController<M> {
    service: M,
    config: MapConfig,
    status: MapStatus,
    markers: usize,
}

impl<M: MapService> MapController<M> {
    pub fn new(service: M, config: MapConfig) -> Self {
        Self {
            service,
            config,
            status: MapStatus::Pending,
            markers: 0,
        }
    }

    pub fn initialize(&mut self, center: Coords, on_ready: Box<dyn FnOnce()>) {
        info!("Creating map view at {center}");
        self.status = MapStatus::Loading;
        self.service.create_view(center, self.config.zoom, on_ready);
        self.service.add_tile_layer(&self.config.tile_url, &self.config.attribution);
    }

    /// Returns false if the map was already ready.
    pub fn mark_ready(&mut self) -> bool {
        if self.status == MapStatus::Ready {
            return false;
        }
        self.status = MapStatus::Ready;
        true
    }

    pub fn mark_unavailable(&mut self) {
        self.status = MapStatus::Unavailable;
    }

    pub fn on_point_selected(&mut self, handler: Box<dyn Fn(Coords)>) {
        self.service.on_click(handler);
    }

    pub fn popup_for(&self, workout: &Workout) -> PopupSpec {
        let kind = workout.kind();
        PopupSpec {
            content: format!("{} {}", kind.icon(), workout.description()),
            class_name: format!("{}-popup", kind.as_str()),
            min_width: self.config.popup_min_width,
            max_width: self.config.popup_max_width,
            auto_close: false,
            close_on_click: false,
        }
    }

    /// Markers can only be added once the map is ready. Returns whether one was added.
    pub fn render_marker(&mut self, workout: &Workout) -> bool {
        if self.status != MapStatus::Ready {
            debug!("Map not ready, deferring marker for {}", workout.id());
            return false;
        }
        let popup = self.popup_for(workout);
        self.service.add_marker(workout.coords(), &popup);
        self.markers += 1;
        true
    }

    pub fn pan_to(&mut self, center: Coords) -> bool {
        if self.status != MapStatus::Ready {
            return false;
        }
        let options = ViewOptions {
            animate: true,
            pan_duration_secs: self.config.pan_duration_secs,
        };
        self.service.set_view(center, self.config.zoom, options);
        true
    }

    pub fn status(&self) -> MapStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == MapStatus::Ready
    }

    pub fn marker_count(&self) -> usize {
        self.markers
    }

    pub fn service(&self) -> &M {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut M {
        &mut self.service
    }
}
