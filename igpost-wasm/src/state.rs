use igpost_core::{ListFilters, Notification, PostsApi, SubmissionFlow};
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::GlooApi;

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) flow: RwSignal<SubmissionFlow>,
    pub(crate) notice: RwSignal<Option<Notification>>,
    pub(crate) loading: RwSignal<bool>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            flow: RwSignal::new(SubmissionFlow::default()),
            notice: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    /// Переносит очередь уведомлений сценария в тост; показывается последнее.
    pub(crate) fn publish_notifications(&self) {
        let mut drained = Vec::new();
        self.flow
            .update(|flow| drained = flow.take_notifications());
        if let Some(last) = drained.pop() {
            self.notice.set(Some(last));
        }
    }

    pub(crate) fn show(&self, notification: Notification) {
        self.notice.set(Some(notification));
    }

    pub(crate) fn dismiss(&self) {
        self.notice.set(None);
    }

    pub(crate) fn set_filters(&self, filters: ListFilters) {
        self.flow
            .update(|flow| flow.posts_mut().set_filters(filters));
        self.refresh_posts();
    }

    pub(crate) fn refresh_posts(&self) {
        let state = *self;
        state.loading.set(true);

        spawn_local(async move {
            let filters = state
                .flow
                .with_untracked(|flow| flow.posts().filters().clone());
            let listed = GlooApi.list_posts(&filters).await;

            let mut applied = Ok(());
            state
                .flow
                .update(|flow| applied = flow.complete_refresh(listed));
            if let Err(err) = applied {
                warn!("post list refresh failed: {err}");
            }
            state.publish_notifications();
            state.loading.set(false);
        });
    }

    /// Проверка, создание и перечитывание списка шагами сценария.
    pub(crate) fn submit_post(&self) {
        let state = *self;
        let mut begun = None;
        state.flow.update(|flow| begun = Some(flow.begin_submit()));
        let Some(Ok(new_post)) = begun else {
            state.publish_notifications();
            return;
        };

        spawn_local(async move {
            let created = GlooApi.create_post(&new_post).await;

            let mut accepted = false;
            state
                .flow
                .update(|flow| accepted = flow.complete_submit(created).is_ok());
            state.publish_notifications();

            if accepted {
                state.refresh_posts();
            }
        });
    }
}
