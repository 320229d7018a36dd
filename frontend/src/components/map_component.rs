use gloo_console::{error, info};
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue, UnwrapThrowExt};
use web_sys::{
    js_sys::{Function, Object, Reflect},
    HtmlElement, Node,
};
use workout_tracker_lib::{Coords, MapService, PopupSpec, ViewOptions};
use yew::prelude::*;

// Leaflet calls the `leaflet` crate does not cover.
#[wasm_bindgen]
extern "C" {
    type LeafletHandle;

    #[wasm_bindgen(method, js_name = on)]
    fn on(this: &LeafletHandle, event: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = whenReady)]
    fn when_ready(this: &LeafletHandle, handler: &Function);

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view_with_options(this: &LeafletHandle, center: &LatLng, zoom: f64, options: &JsValue);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LeafletHandle);
}

/// Leaflet map living in a detached container that the root component mounts.
pub struct LeafletMap {
    map: Map,
    container: HtmlElement,
    click_handlers: Vec<Closure<dyn Fn(JsValue)>>,
}

impl LeafletMap {
    pub fn new() -> Self {
        let container: HtmlElement = document()
            .create_element("div")
            .expect_throw("failed to create map container")
            .unchecked_into();
        container.set_id("map");
        container.set_class_name("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        Self {
            map,
            container,
            click_handlers: Vec::new(),
        }
    }

    pub fn render(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    fn handle(&self) -> &LeafletHandle {
        self.map.unchecked_ref()
    }
}

impl MapService for LeafletMap {
    fn create_view(&mut self, center: Coords, zoom: f64, on_ready: Box<dyn FnOnce()>) {
        self.map.invalidate_size(false);

        let on_ready = Closure::once_into_js(move || on_ready());
        self.handle().when_ready(on_ready.unchecked_ref());

        self.map.set_view(&lat_lng(center), zoom);
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        let opts = TileLayerOptions::new();
        set_option(opts.as_ref(), "attribution", &attribution.into());
        TileLayer::new_options(url_template, &opts).add_to(&self.map);
    }

    fn add_marker(&mut self, at: Coords, popup: &PopupSpec) {
        let opts = PopupOptions::default();
        set_option(opts.as_ref(), "maxWidth", &popup.max_width.into());
        set_option(opts.as_ref(), "minWidth", &popup.min_width.into());
        set_option(opts.as_ref(), "autoClose", &popup.auto_close.into());
        set_option(opts.as_ref(), "closeOnClick", &popup.close_on_click.into());
        set_option(opts.as_ref(), "className", &popup.class_name.as_str().into());

        let leaflet_popup = Popup::new(&opts, None);
        leaflet_popup.set_content(&popup.content.as_str().into());

        let marker = Marker::new(&lat_lng(at));
        marker.add_to(&self.map);
        marker.bind_popup(&leaflet_popup);
        marker.unchecked_ref::<LeafletHandle>().open_popup();
    }

    fn set_view(&mut self, center: Coords, zoom: f64, options: ViewOptions) {
        let pan = Object::new();
        set_option(&pan, "duration", &options.pan_duration_secs.into());

        let view_options = Object::new();
        set_option(&view_options, "animate", &options.animate.into());
        set_option(&view_options, "pan", &pan);

        self.handle()
            .set_view_with_options(&lat_lng(center), zoom, &view_options);
    }

    fn on_click(&mut self, handler: Box<dyn Fn(Coords)>) {
        let closure = Closure::<dyn Fn(JsValue)>::new(move |event: JsValue| match clicked_coords(&event) {
            Some(coords) => handler(coords),
            None => error!("Map click without a usable position"),
        });
        self.handle().on("click", closure.as_ref().unchecked_ref());
        self.click_handlers.push(closure);
        info!("Map click handler registered");
    }
}

fn lat_lng(coords: Coords) -> LatLng {
    LatLng::new(coords.latitude(), coords.longitude())
}

fn set_option(target: &JsValue, key: &str, value: &JsValue) {
    if let Err(err) = Reflect::set(target, &JsValue::from_str(key), value) {
        error!(format!("Failed to set map option {key}: {err:?}"));
    }
}

fn clicked_coords(event: &JsValue) -> Option<Coords> {
    let latlng = Reflect::get(event, &JsValue::from_str("latlng")).ok()?;
    let lat = Reflect::get(&latlng, &JsValue::from_str("lat")).ok()?.as_f64()?;
    let lng = Reflect::get(&latlng, &JsValue::from_str("lng")).ok()?.as_f64()?;
    Coords::wrapped(lat, lng).ok()
}
