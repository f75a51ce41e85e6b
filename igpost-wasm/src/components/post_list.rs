use igpost_core::view::PostCard;
use igpost_core::{ListFilters, PostStatus, PostType};
use leptos::prelude::*;

use crate::state::AppState;

fn parse_filter<T: std::str::FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

#[component]
fn PostCardView(card: PostCard) -> impl IntoView {
    view! {
        <li class="post-card">
            <div class="post-card-header">
                <span class=card.badge.variant.css_class()>{card.badge.label}</span>
                <span class="post-type">{card.type_label}</span>
            </div>
            {card.preview_url.map(|url| view! { <img class="post-preview" src=url alt="preview" /> })}
            <h3>{card.title}</h3>
            {card.caption.map(|caption| view! { <p class="post-caption">{caption}</p> })}
            {card.created.map(|created| view! { <p class="post-meta">{created}</p> })}
            {card.scheduled.map(|scheduled| view! { <p class="post-meta">{scheduled}</p> })}
        </li>
    }
}

#[component]
pub(crate) fn PostList(state: AppState) -> impl IntoView {
    let status_value = move || {
        state.flow.with(|flow| {
            flow.posts()
                .filters()
                .status
                .map(|status| status.as_str())
                .unwrap_or_default()
                .to_string()
        })
    };
    let type_value = move || {
        state.flow.with(|flow| {
            flow.posts()
                .filters()
                .post_type
                .map(|post_type| post_type.as_str())
                .unwrap_or_default()
                .to_string()
        })
    };

    let on_status = move |ev: leptos::ev::Event| {
        let current = state.flow.with_untracked(|flow| flow.posts().filters().clone());
        state.set_filters(ListFilters {
            status: parse_filter::<PostStatus>(&event_target_value(&ev)),
            ..current
        });
    };
    let on_type = move |ev: leptos::ev::Event| {
        let current = state.flow.with_untracked(|flow| flow.posts().filters().clone());
        state.set_filters(ListFilters {
            post_type: parse_filter::<PostType>(&event_target_value(&ev)),
            ..current
        });
    };

    let cards = move || {
        state
            .flow
            .with(|flow| flow.posts().posts().iter().map(PostCard::from).collect::<Vec<_>>())
    };

    view! {
        <h2>"Posts"</h2>
        <div class="post-filters">
            <select prop:value=status_value on:change=on_status>
                <option value="">"All statuses"</option>
                <option value="not_ready">"Draft"</option>
                <option value="ready">"Ready"</option>
                <option value="published">"Published"</option>
                <option value="failed">"Failed"</option>
            </select>
            <select prop:value=type_value on:change=on_type>
                <option value="">"All types"</option>
                <option value="photo">"Photo"</option>
                <option value="reel">"Reel"</option>
            </select>
            <button on:click=move |_| state.refresh_posts() disabled=move || state.loading.get()>
                "Refresh"
            </button>
        </div>

        <Show
            when=move || !cards().is_empty()
            fallback=|| view! { <p class="empty">"No posts yet"</p> }
        >
            <ul class="post-grid">
                <For
                    each=cards
                    key=|card| card.key.clone()
                    children=|card| view! { <PostCardView card=card /> }
                />
            </ul>
        </Show>
    }
}
