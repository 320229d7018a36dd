use chrono::Local;
use components::{map_component::LeafletMap, workout_form::WorkoutForm, workout_list::WorkoutList};
use geolocation::BrowserGeolocator;
use gloo_console::{error, info};
use gloo_timers::callback::Timeout;
use gloo_utils::window;
use storage::LocalStore;
use workout_tracker_lib::{
    AppController, Coords, Field, GeolocationError, Geolocator, TrackerConfig, TrackerError, WorkoutId, WorkoutKind,
};
use yew::prelude::*;

mod components;
mod geolocation;
mod storage;

const CONFIG: &str = include_str!("../tracker.toml");

enum MainMsg {
    Located(Result<Coords, GeolocationError>),
    MapReady,
    PointSelected(Coords),
    KindChanged(WorkoutKind),
    FieldChanged(Field, String),
    Submit,
    RestoreFormDisplay,
    SelectWorkout(WorkoutId),
    Reset,
}

struct Model {
    app: AppController<LeafletMap, LocalStore>,
    // Dropping the timeout cancels it
    #[allow(dead_code)]
    restore_timeout: Option<Timeout>,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();

        let config = TrackerConfig::from_toml_str(CONFIG).unwrap_or_else(|err| {
            error!(format!("{err}, falling back to defaults"));
            TrackerConfig::default()
        });

        let mut app = AppController::new(config, LeafletMap::new(), LocalStore::new());
        app.start();

        let point_cb = link.callback(MainMsg::PointSelected);
        app.on_point_selected(Box::new(move |point| point_cb.emit(point)));

        let located_cb = link.callback(MainMsg::Located);
        BrowserGeolocator.current_position(Box::new(move |position| located_cb.emit(position)));

        Self {
            app,
            restore_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(position) => {
                let ready_cb = ctx.link().callback(|()| MainMsg::MapReady);
                if let Err(err) = self.app.on_located(position, Box::new(move || ready_cb.emit(()))) {
                    notify(&err);
                }
            }
            MainMsg::MapReady => {
                info!("Map ready, rendering stored workouts");
                self.app.on_map_ready();
            }
            MainMsg::PointSelected(point) => self.app.select_point(point),
            MainMsg::KindChanged(kind) => self.app.select_kind(kind),
            MainMsg::FieldChanged(field, value) => self.app.set_field(field, value),
            MainMsg::Submit => match self.app.submit(Local::now().fixed_offset()) {
                Ok(submission) => {
                    info!(format!("Added workout {}", submission.id));
                    if let Some(err) = submission.save_error {
                        error!(format!("Workout kept for this session only: {err}"));
                    }
                    let link = ctx.link().clone();
                    let delay = self.app.config().form.restore_delay_ms;
                    self.restore_timeout = Some(Timeout::new(delay, move || {
                        link.send_message(MainMsg::RestoreFormDisplay)
                    }));
                }
                Err(err) => notify(&err),
            },
            MainMsg::RestoreFormDisplay => {
                self.restore_timeout = None;
                self.app.restore_form_display();
            }
            MainMsg::SelectWorkout(id) => {
                self.app.select_workout(&id);
                return false;
            }
            MainMsg::Reset => match self.app.reset() {
                Ok(()) => {
                    if let Err(err) = window().location().reload() {
                        error!(format!("Reload failed: {:?}", err));
                    }
                }
                Err(err) => notify(&err),
            },
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let on_kind = link.callback(MainMsg::KindChanged);
        let on_input = link.callback(|(field, value): (Field, String)| MainMsg::FieldChanged(field, value));
        let on_submit = link.callback(|()| MainMsg::Submit);
        let on_select = link.callback(MainMsg::SelectWorkout);
        let on_reset = link.callback(|_: MouseEvent| MainMsg::Reset);

        html! {
            <>
                <div class="sidebar">
                    <ul class="workouts">
                        <WorkoutForm form={self.app.form().clone()} {on_kind} {on_input} {on_submit} />
                        <WorkoutList entries={self.app.list_entries()} {on_select} />
                    </ul>
                    <button class="reset-btn" onclick={on_reset}>{"Reset"}</button>
                </div>
                {self.app.map().service().render()}
            </>
        }
    }
}

fn notify(err: &TrackerError) {
    let message = err.to_string();
    error!(message.clone());
    if window().alert_with_message(&message).is_err() {
        error!("Could not show alert");
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
