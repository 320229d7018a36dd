use workout_tracker_lib::{ListEntry, WorkoutId};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct ListProps {
    pub entries: Vec<ListEntry>,
    pub on_select: Callback<WorkoutId>,
}

#[function_component]
pub fn WorkoutList(props: &ListProps) -> Html {
    html! {
        <>
            { for props.entries.iter().map(|entry| {
                let on_select = props.on_select.clone();
                let id = entry.id.clone();
                let onclick = Callback::from(move |_: MouseEvent| on_select.emit(id.clone()));

                html! {
                    <li key={entry.id.to_string()} class={entry.css_class()} data-id={entry.id.to_string()} {onclick}>
                        <h2 class="workout__title">{entry.title.clone()}</h2>
                        { for entry.details.iter().map(|detail| html! {
                            <div class="workout__details">
                                <span class="workout__icon">{detail.icon}</span>
                                <span class="workout__value">{detail.value.clone()}</span>
                                <span class="workout__unit">{detail.unit}</span>
                            </div>
                        }) }
                    </li>
                }
            }) }
        </>
    }
}
