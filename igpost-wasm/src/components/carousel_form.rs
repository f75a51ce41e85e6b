use igpost_core::{CarouselApi, CarouselDraft, ImageCount, Notification, validate_carousel};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GlooApi;
use crate::state::AppState;

const CREATED_MESSAGE: &str = "Carousel post created successfully!";

#[component]
pub(crate) fn CarouselForm(state: AppState) -> impl IntoView {
    let text_prompt = RwSignal::new(String::new());
    let images = RwSignal::new(ImageCount::MIN);
    let ready = RwSignal::new(false);
    let submitting = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let draft = CarouselDraft {
            text_prompt: text_prompt.get_untracked(),
            number_of_images: images.get_untracked(),
            ready: ready.get_untracked(),
        };
        let request = match validate_carousel(&draft) {
            Ok(request) => request,
            Err(err) => {
                error.set(Some(err.message.to_string()));
                return;
            }
        };

        error.set(None);
        submitting.set(true);
        spawn_local(async move {
            match GlooApi.create_carousel_post(&request).await {
                Ok(_) => {
                    text_prompt.set(String::new());
                    images.set(ImageCount::MIN);
                    ready.set(false);
                    state.show(Notification::success(CREATED_MESSAGE));
                }
                Err(err) => state.show(Notification::error(err.message())),
            }
            submitting.set(false);
        });
    };

    view! {
        <h2>"New carousel"</h2>
        <form class="carousel-form" on:submit=on_submit>
            <label>
                "Text prompt"
                <textarea
                    rows="3"
                    prop:value=move || text_prompt.get()
                    on:input=move |ev| text_prompt.set(event_target_value(&ev))
                ></textarea>
            </label>
            <label>
                "Number of images"
                <select
                    prop:value=move || images.get().to_string()
                    on:change=move |ev| {
                        images.set(event_target_value(&ev).parse().unwrap_or(ImageCount::MIN))
                    }
                >
                    <option value="5">"5"</option>
                    <option value="6">"6"</option>
                    <option value="7">"7"</option>
                </select>
            </label>
            <label>
                <input
                    type="checkbox"
                    prop:checked=move || ready.get()
                    on:change=move |ev| ready.set(event_target_checked(&ev))
                />
                "Ready"
            </label>
            {move || error.get().map(|message| view! { <p class="field-error">{message}</p> })}
            <button type="submit" disabled=move || submitting.get()>
                {move || if submitting.get() { "Creating..." } else { "Create Carousel" }}
            </button>
        </form>
    }
}
