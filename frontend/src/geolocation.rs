use std::{cell::RefCell, rc::Rc};

use gloo_utils::window;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::js_sys::Reflect;
use workout_tracker_lib::{Coords, GeolocationError, Geolocator, PositionCallback};

type Pending = Rc<RefCell<Option<PositionCallback>>>;

/// `navigator.geolocation`, asked once for the current position.
pub struct BrowserGeolocator;

impl Geolocator for BrowserGeolocator {
    fn current_position(&self, respond: PositionCallback) {
        let Ok(geolocation) = window().navigator().geolocation() else {
            respond(Err(GeolocationError::Unsupported));
            return;
        };

        let pending: Pending = Rc::new(RefCell::new(Some(respond)));

        let on_success = {
            let pending = pending.clone();
            Closure::once_into_js(move |position: JsValue| answer(&pending, read_position(&position)))
        };
        let on_error = {
            let pending = pending.clone();
            Closure::once_into_js(move |err: JsValue| answer(&pending, Err(read_error(&err))))
        };

        if let Err(err) =
            geolocation.get_current_position_with_error_callback(on_success.unchecked_ref(), Some(on_error.unchecked_ref()))
        {
            answer(&pending, Err(GeolocationError::Other(format!("{err:?}"))));
        }
    }
}

fn answer(pending: &Pending, result: Result<Coords, GeolocationError>) {
    let respond = pending.borrow_mut().take();
    if let Some(respond) = respond {
        respond(result);
    }
}

fn read_position(position: &JsValue) -> Result<Coords, GeolocationError> {
    let number = |target: &JsValue, key: &str| Reflect::get(target, &JsValue::from_str(key)).ok().and_then(|v| v.as_f64());

    let coords = Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|_| GeolocationError::PositionUnavailable)?;
    let (Some(latitude), Some(longitude)) = (number(&coords, "latitude"), number(&coords, "longitude")) else {
        return Err(GeolocationError::PositionUnavailable);
    };

    Coords::new(latitude, longitude).map_err(|err| GeolocationError::Other(err.to_string()))
}

fn read_error(err: &JsValue) -> GeolocationError {
    let code = Reflect::get(err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or_default() as u16;
    let message = Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();

    GeolocationError::from_code(code, message)
}
