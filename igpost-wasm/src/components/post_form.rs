use igpost_core::DraftField;
use igpost_core::view::submit_button;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::state::AppState;

fn field_value(state: AppState, field: DraftField) -> impl Fn() -> String + Send + Sync + 'static {
    move || state.flow.with(|flow| flow.form().value(field).to_string())
}

fn field_error(
    state: AppState,
    field: DraftField,
) -> impl Fn() -> Option<AnyView> + Send + Sync + 'static {
    move || {
        state
            .flow
            .with(|flow| flow.form().error(field).map(str::to_string))
            .map(|message| view! { <p class="field-error">{message}</p> }.into_any())
    }
}

fn set_field(state: AppState, field: DraftField) -> impl Fn(String) + Copy + 'static {
    move |value| state.flow.update(|flow| flow.set_field(field, value))
}

#[component]
pub(crate) fn PostForm(state: AppState) -> impl IntoView {
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        state.submit_post();
    };
    let button = move || state.flow.with(|flow| submit_button(flow.phase()));

    let set_text = set_field(state, DraftField::TextPrompt);
    let set_type = set_field(state, DraftField::PostType);
    let set_time = set_field(state, DraftField::ScheduledTime);

    view! {
        <h2>"New post"</h2>
        <form class="post-form" on:submit=on_submit>
            <label>
                "Text prompt"
                <textarea
                    rows="4"
                    placeholder="Describe the post you want to generate"
                    prop:value=field_value(state, DraftField::TextPrompt)
                    on:input=move |ev| set_text(event_target_value(&ev))
                ></textarea>
            </label>
            {field_error(state, DraftField::TextPrompt)}

            <label>
                "Post type"
                <select
                    prop:value=field_value(state, DraftField::PostType)
                    on:change=move |ev| set_type(event_target_value(&ev))
                >
                    <option value="photo">"Photo"</option>
                    <option value="reel">"Reel"</option>
                </select>
            </label>
            {field_error(state, DraftField::PostType)}

            <label>
                "Scheduled time (optional)"
                <input
                    type="datetime-local"
                    prop:value=field_value(state, DraftField::ScheduledTime)
                    on:input=move |ev| set_time(event_target_value(&ev))
                />
            </label>

            <button type="submit" disabled=move || button().disabled>
                {move || button().label}
            </button>
        </form>
    }
}
