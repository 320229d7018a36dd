use gloo_console::error;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{Field, FormController, WorkoutKind};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct FormProps {
    pub form: FormController,
    pub on_kind: Callback<WorkoutKind>,
    pub on_input: Callback<(Field, String)>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutForm(props: &FormProps) -> Html {
    let distance_ref = use_node_ref();
    let form = &props.form;

    // Focus distance whenever the form opens
    {
        let distance_ref = distance_ref.clone();
        use_effect_with(form.is_open(), move |open| {
            if *open {
                if let Some(input) = distance_ref.cast::<HtmlInputElement>() {
                    if let Err(err) = input.focus() {
                        error!(format!("Could not focus distance input: {:?}", err));
                    }
                }
            }
        });
    }

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let onchange = {
        let on_kind = props.on_kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(kind) = select.value().parse::<WorkoutKind>() {
                on_kind.emit(kind);
            }
        })
    };

    let class = classes!("form", (!form.is_open()).then_some("hidden"));
    let style = form.is_display_suppressed().then_some("display: none");

    html! {
        <form {class} {style} {onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" {onchange}>
                    { for WorkoutKind::ALL.iter().map(|kind| html! {
                        <option value={kind.as_str()} selected={form.kind() == *kind}>{kind.label()}</option>
                    }) }
                </select>
            </div>
            {field_row(props, Field::Distance, "Distance", "km", distance_ref)}
            {field_row(props, Field::Duration, "Duration", "min", NodeRef::default())}
            {field_row(props, Field::Cadence, "Cadence", "step/min", NodeRef::default())}
            {field_row(props, Field::ElevationGain, "Elev Gain", "meters", NodeRef::default())}
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}

fn field_row(props: &FormProps, field: Field, label: &'static str, placeholder: &'static str, node_ref: NodeRef) -> Html {
    let on_input = props.on_input.clone();
    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_input.emit((field, input.value()));
    });

    let class = classes!(
        "form__row",
        (!props.form.is_field_visible(field)).then_some("form__row--hidden")
    );

    html! {
        <div {class}>
            <label class="form__label">{label}</label>
            <input
                class="form__input"
                ref={node_ref}
                {placeholder}
                value={props.form.field(field).to_string()}
                {oninput}
            />
        </div>
    }
}
