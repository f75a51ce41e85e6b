use igpost_core::NotificationKind;
use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub(crate) fn Notice(state: AppState) -> impl IntoView {
    move || {
        state.notice.get().map(|notice| {
            let class = match notice.kind {
                NotificationKind::Success => "toast toast-success",
                NotificationKind::Error => "toast toast-error",
            };
            view! {
                <div class=class role="status">
                    <span>{notice.text}</span>
                    <button class="toast-close" on:click=move |_| state.dismiss()>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
