use tracing::{debug, info, warn};

use crate::api::PostsApi;
use crate::error::ApiError;
use crate::form::{Draft, DraftField, FieldErrors, FormState};
use crate::models::{NewPost, Post};
use crate::post_list::PostListStore;
use crate::validation::validated;

const CREATED_MESSAGE: &str = "Post created successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Фаза сценария отправки.
pub enum SubmitPhase {
    /// Форма редактируется, отправка доступна.
    Idle,
    /// Идёт проверка черновика.
    Validating,
    /// Запрос на создание в полёте.
    Submitting,
    /// Пост создан, список перечитывается.
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Вид уведомления.
pub enum NotificationKind {
    /// Операция прошла успешно.
    Success,
    /// Операция завершилась ошибкой.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Кратковременное уведомление для пользователя.
pub struct Notification {
    /// Вид.
    pub kind: NotificationKind,
    /// Текст.
    pub text: String,
}

impl Notification {
    /// Уведомление об успехе.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            text: text.into(),
        }
    }

    /// Уведомление об ошибке.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Итог одной попытки отправки.
pub enum SubmitOutcome {
    /// Предыдущая отправка ещё не завершена.
    Ignored,
    /// Черновик не прошёл проверку, запрос не отправлялся.
    Invalid(FieldErrors),
    /// Пост создан; `refresh` хранит результат перечитывания списка.
    Created {
        /// Созданный пост.
        post: Post,
        /// Результат перечитывания списка.
        refresh: Result<(), ApiError>,
    },
    /// Сервер или транспорт вернули ошибку; черновик сохранён.
    Failed(ApiError),
}

#[derive(Debug, Clone)]
/// Сценарий «проверить → создать → перечитать список».
///
/// Ошибка создания оставляет черновик как есть, успех сбрасывает его к
/// начальному. Для UI со своим рантаймом сценарий разбит на шаги
/// [`begin_submit`](Self::begin_submit), [`complete_submit`](Self::complete_submit)
/// и [`complete_refresh`](Self::complete_refresh); нативный код может вызвать
/// [`submit`](Self::submit) целиком.
pub struct SubmissionFlow {
    form: FormState,
    posts: PostListStore,
    initial: Draft,
    phase: SubmitPhase,
    notifications: Vec<Notification>,
}

impl Default for SubmissionFlow {
    fn default() -> Self {
        Self::new(Draft::default())
    }
}

impl SubmissionFlow {
    /// Сценарий с пустым списком постов и формой, заполненной `initial`.
    pub fn new(initial: Draft) -> Self {
        Self {
            form: FormState::new(initial.clone()),
            posts: PostListStore::new(),
            initial,
            phase: SubmitPhase::Idle,
            notifications: Vec::new(),
        }
    }

    /// Подставляет заранее заполненный список постов.
    pub fn with_posts(mut self, posts: PostListStore) -> Self {
        self.posts = posts;
        self
    }

    /// Состояние формы.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Меняет поле черновика.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Список постов.
    pub fn posts(&self) -> &PostListStore {
        &self.posts
    }

    /// Список постов для смены фильтров.
    pub fn posts_mut(&mut self) -> &mut PostListStore {
        &mut self.posts
    }

    /// Текущая фаза.
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Идёт ли отправка (кнопка должна быть неактивна).
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            SubmitPhase::Validating | SubmitPhase::Submitting | SubmitPhase::Succeeded
        )
    }

    /// Накопленные уведомления, самое свежее в конце.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Самое свежее уведомление.
    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Забирает уведомления для показа и очищает очередь.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Шаг 1: проверяет черновик и переводит сценарий в `Submitting`.
    ///
    /// Если черновик невалиден, ошибки попадают в форму и сценарий
    /// остаётся в `Idle`.
    pub fn begin_submit(&mut self) -> Result<NewPost, SubmitOutcome> {
        if self.is_busy() {
            debug!(phase = ?self.phase, "submit ignored, previous submission in flight");
            return Err(SubmitOutcome::Ignored);
        }

        self.phase = SubmitPhase::Validating;
        match validated(self.form.values()) {
            Ok(new_post) => {
                self.form.set_errors(FieldErrors::new());
                self.phase = SubmitPhase::Submitting;
                debug!(post_type = %new_post.post_type, "draft is valid, submitting");
                Ok(new_post)
            }
            Err(errors) => {
                debug!(invalid_fields = errors.len(), "draft rejected by validator");
                self.form.set_errors(errors.clone());
                self.phase = SubmitPhase::Idle;
                Err(SubmitOutcome::Invalid(errors))
            }
        }
    }

    /// Шаг 2: применяет ответ на создание.
    ///
    /// `Ok` означает, что следующим должен быть запрос списка.
    pub fn complete_submit(&mut self, result: Result<Post, ApiError>) -> Result<Post, ApiError> {
        match result {
            Ok(post) => {
                info!(post_id = %post.id, "post created");
                self.notifications.push(Notification::success(CREATED_MESSAGE));
                self.form.reset(self.initial.clone());
                self.phase = SubmitPhase::Succeeded;
                Ok(post)
            }
            Err(err) => {
                warn!(error = %err, "post creation failed, draft kept");
                self.notifications.push(Notification::error(err.message()));
                self.phase = SubmitPhase::Idle;
                Err(err)
            }
        }
    }

    /// Шаг 3: применяет результат запроса списка и возвращает сценарий в `Idle`.
    ///
    /// Годится и для обновления списка вне отправки.
    pub fn complete_refresh(&mut self, result: Result<Vec<Post>, ApiError>) -> Result<(), ApiError> {
        let applied = self.posts.apply(result);
        if let Err(err) = &applied {
            self.notifications.push(Notification::error(err.message()));
        }
        if self.phase == SubmitPhase::Succeeded {
            self.phase = SubmitPhase::Idle;
        }
        applied
    }

    /// Перечитывает список с текущими фильтрами.
    pub async fn refresh<A>(&mut self, api: &A) -> Result<(), ApiError>
    where
        A: PostsApi + ?Sized,
    {
        let filters = self.posts.filters().clone();
        let result = api.list_posts(&filters).await;
        self.complete_refresh(result)
    }

    /// Полный цикл отправки. Создание всегда завершается до начала
    /// перечитывания списка.
    pub async fn submit<A>(&mut self, api: &A) -> SubmitOutcome
    where
        A: PostsApi + ?Sized,
    {
        let new_post = match self.begin_submit() {
            Ok(new_post) => new_post,
            Err(outcome) => return outcome,
        };

        let created = api.create_post(&new_post).await;
        match self.complete_submit(created) {
            Ok(post) => {
                let refresh = self.refresh(api).await;
                SubmitOutcome::Created { post, refresh }
            }
            Err(err) => SubmitOutcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiOperation, ErrorBody, FailureCause};
    use crate::models::{PostStatus, PostType};
    use crate::testing::{FakeApi, sample_post};

    fn filled_flow(text_prompt: &str, post_type: &str) -> SubmissionFlow {
        let mut flow = SubmissionFlow::default();
        flow.set_field(DraftField::TextPrompt, text_prompt);
        flow.set_field(DraftField::PostType, post_type);
        flow
    }

    #[tokio::test]
    async fn successful_submit_clears_draft_and_refreshes_list() {
        let api = FakeApi::default();
        let mut flow = filled_flow("Hello", "photo");

        let outcome = flow.submit(&api).await;

        let SubmitOutcome::Created { post, refresh } = outcome else {
            panic!("expected Created outcome");
        };
        assert!(refresh.is_ok());
        assert_eq!(post.id.as_str(), "1");
        assert_eq!(post.status, PostStatus::NotReady);

        assert_eq!(flow.posts().posts(), &[post]);
        assert_eq!(flow.form().values().text_prompt, "");
        assert_eq!(flow.phase(), SubmitPhase::Idle);
        assert_eq!(
            flow.last_notification(),
            Some(&Notification::success(CREATED_MESSAGE))
        );
        assert_eq!(api.calls(), vec!["create", "list"]);
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft_and_shows_server_message() {
        let api = FakeApi::default();
        let body = ErrorBody {
            message: Some("boom".to_string()),
            ..ErrorBody::default()
        };
        api.fail_create(ApiError::server(ApiOperation::CreatePost, 500, Some(&body)));
        let mut flow = filled_flow("Hello", "reel");

        let outcome = flow.submit(&api).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(flow.last_notification().map(|n| n.text.as_str()), Some("boom"));
        assert_eq!(
            flow.last_notification().map(|n| n.kind),
            Some(NotificationKind::Error)
        );
        assert_eq!(flow.form().values().text_prompt, "Hello");
        assert_eq!(flow.form().values().post_type, "reel");
        assert_eq!(flow.phase(), SubmitPhase::Idle);
        assert_eq!(api.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_network() {
        let api = FakeApi::default();
        let mut flow = filled_flow("   ", "story");

        let outcome = flow.submit(&api).await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected Invalid outcome");
        };
        assert!(errors.contains_key(&DraftField::TextPrompt));
        assert!(errors.contains_key(&DraftField::PostType));
        assert_eq!(flow.form().errors(), &errors);
        assert!(api.calls().is_empty());
        assert_eq!(flow.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn editing_after_rejection_clears_field_error() {
        let api = FakeApi::default();
        let mut flow = filled_flow("", "photo");
        flow.submit(&api).await;
        assert!(flow.form().error(DraftField::TextPrompt).is_some());

        flow.set_field(DraftField::TextPrompt, "fixed");

        assert!(!flow.form().has_errors());
        assert!(matches!(flow.submit(&api).await, SubmitOutcome::Created { .. }));
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut flow = filled_flow("Hello", "photo");

        let first = flow.begin_submit();
        assert!(first.is_ok());
        assert!(flow.is_busy());

        assert_eq!(flow.begin_submit(), Err(SubmitOutcome::Ignored));
        assert_eq!(flow.phase(), SubmitPhase::Submitting);
    }

    #[test]
    fn stepwise_flow_stays_busy_until_list_arrives() {
        let mut flow = filled_flow("Hello", "photo");
        let new_post = flow.begin_submit().expect("draft is valid");
        assert_eq!(new_post.post_type, PostType::Photo);

        let created = sample_post("7", "Hello");
        flow.complete_submit(Ok(created.clone()))
            .expect("creation succeeded");
        assert_eq!(flow.phase(), SubmitPhase::Succeeded);
        assert!(flow.is_busy());

        flow.complete_refresh(Ok(vec![created]))
            .expect("refresh succeeded");
        assert_eq!(flow.phase(), SubmitPhase::Idle);
        assert_eq!(flow.posts().len(), 1);
    }

    #[tokio::test]
    async fn refresh_failure_after_create_keeps_old_list_and_notifies() {
        let api = FakeApi::default();
        api.fail_list(ApiError::network(ApiOperation::ListPosts, "connection reset"));
        let seeded = vec![sample_post("1", "a"), sample_post("2", "b")];
        let mut flow = filled_flow("Hello", "photo")
            .with_posts(PostListStore::with_posts(seeded.clone()));

        let outcome = flow.submit(&api).await;

        let SubmitOutcome::Created { refresh, .. } = outcome else {
            panic!("expected Created outcome");
        };
        let err = refresh.expect_err("refresh must fail");
        assert_eq!(err.cause(), FailureCause::Network);
        assert_eq!(flow.posts().posts(), seeded.as_slice());

        let texts: Vec<_> = flow
            .take_notifications()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec![CREATED_MESSAGE.to_string(), "connection reset".to_string()]);
        assert!(flow.notifications().is_empty());
        assert_eq!(flow.phase(), SubmitPhase::Idle);
    }

    #[tokio::test]
    async fn success_resets_to_configured_initial_draft() {
        let api = FakeApi::default();
        let mut flow = SubmissionFlow::new(Draft::new("", PostType::Reel));
        flow.set_field(DraftField::TextPrompt, "clip");
        flow.set_field(DraftField::PostType, "photo");
        flow.set_field(DraftField::ScheduledTime, "2026-10-20T18:00");

        flow.submit(&api).await;

        assert_eq!(flow.form().values(), &Draft::new("", PostType::Reel));
        assert_eq!(
            api.received()[0].scheduled_time.as_deref(),
            Some("2026-10-20T18:00")
        );
    }
}
