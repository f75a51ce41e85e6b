use leptos::prelude::*;

use crate::components::carousel_form::CarouselForm;
use crate::components::notice::Notice;
use crate::components::post_form::PostForm;
use crate::components::post_list::PostList;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    state.refresh_posts();

    view! {
        <main class="page">
            <section class="container">
                <h1>"Instagram Post Composer"</h1>
                <Notice state=state />
                <PostForm state=state />
                <CarouselForm state=state />
                <PostList state=state />
            </section>
        </main>
    }
}
