use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::data::post_repository::{
    CarouselRepository, NewCarousel, NewPost, PostFilter, PostRepository,
};
use crate::domain::carousel::CarouselPost;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

/// Одна строка журнала.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum LogEntry {
    Post(Post),
    Carousel(CarouselPost),
}

impl LogEntry {
    fn id(&self) -> i64 {
        match self {
            Self::Post(post) => post.id,
            Self::Carousel(carousel) => carousel.id,
        }
    }
}

#[derive(Debug, Default)]
struct Replay {
    posts: Vec<Post>,
    carousels: Vec<CarouselPost>,
    last_id: i64,
    valid_len: u64,
    torn_tail: bool,
}

impl Replay {
    fn push(&mut self, entry: LogEntry) -> Result<()> {
        let id = entry.id();
        if id <= self.last_id {
            return Err(anyhow!("id {id} is not greater than {}", self.last_id));
        }
        self.last_id = id;
        match entry {
            LogEntry::Post(post) => self.posts.push(post),
            LogEntry::Carousel(carousel) => self.carousels.push(carousel),
        }
        Ok(())
    }
}

fn replay(raw: &[u8]) -> Result<Replay> {
    let mut replay = Replay::default();
    let mut offset = 0;
    let mut line_no = 0;

    while offset < raw.len() {
        let rest = &raw[offset..];
        // хвост без '\n' - append оборвался до fsync, ответа клиент не получил
        let Some(end) = rest.iter().position(|byte| *byte == b'\n') else {
            replay.torn_tail = true;
            break;
        };
        line_no += 1;
        offset += end + 1;

        let line = rest[..end].trim_ascii();
        if !line.is_empty() {
            let entry: LogEntry = serde_json::from_slice(line)
                .with_context(|| format!("corrupt entry at line {line_no}"))?;
            replay
                .push(entry)
                .with_context(|| format!("out of order entry at line {line_no}"))?;
        }
        replay.valid_len = offset as u64;
    }

    Ok(replay)
}

#[derive(Debug)]
struct LogState {
    file: File,
    len: u64,
    posts: Vec<Post>,
    carousels: Vec<CarouselPost>,
    last_id: i64,
}

impl LogState {
    fn next_id(&self) -> i64 {
        self.last_id + 1
    }

    /// Дописывает строку и ждёт fsync. При ошибке файл обрезается обратно,
    /// чтобы следующая запись не склеилась с обрывком.
    async fn write(&mut self, entry: &LogEntry) -> Result<(), DomainError> {
        let mut line = serde_json::to_vec(entry)
            .map_err(|err| DomainError::Unexpected(format!("failed to encode log entry: {err}")))?;
        line.push(b'\n');

        let written = async {
            self.file.write_all(&line).await?;
            self.file.flush().await?;
            self.file.sync_data().await
        }
        .await;

        if let Err(err) = written {
            if let Err(rollback) = self.file.set_len(self.len).await {
                warn!(error = %rollback, "failed to roll back partial log write");
            }
            return Err(DomainError::Storage(format!(
                "failed to append to post log: {err}"
            )));
        }

        self.len += line.len() as u64;
        self.last_id = entry.id();
        Ok(())
    }
}

/// Журнал постов в формате JSON Lines: одна запись на строку, только дозапись.
///
/// При открытии журнал проигрывается в память. Оборванная последняя строка
/// отрезается с предупреждением; битая строка в середине - ошибка старта.
#[derive(Debug)]
pub(crate) struct JsonLogStore {
    path: PathBuf,
    state: Mutex<LogState>,
}

impl JsonLogStore {
    pub(crate) async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        let replay =
            replay(&raw).with_context(|| format!("post log {} is corrupt", path.display()))?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("failed to open {}", path.display()))?;

        if replay.torn_tail {
            warn!(
                path = %path.display(),
                dropped_bytes = raw.len() as u64 - replay.valid_len,
                "dropping torn tail of post log"
            );
            file.set_len(replay.valid_len)
                .await
                .context("failed to truncate torn tail")?;
            file.sync_all().await.context("failed to sync post log")?;
        }

        info!(
            path = %path.display(),
            posts = replay.posts.len(),
            carousels = replay.carousels.len(),
            "post log opened"
        );

        Ok(Self {
            path,
            state: Mutex::new(LogState {
                file,
                len: replay.valid_len,
                posts: replay.posts,
                carousels: replay.carousels,
                last_id: replay.last_id,
            }),
        })
    }

    pub(crate) async fn close(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.file.flush().await.context("failed to flush post log")?;
        state
            .file
            .sync_all()
            .await
            .context("failed to sync post log")?;
        info!(path = %self.path.display(), "post log closed");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for JsonLogStore {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .posts
            .iter()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect())
    }

    async fn append(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let post = Post {
            id: state.next_id(),
            text_prompt: input.text_prompt,
            post_type: input.post_type,
            status: input.status,
            ai_caption: None,
            image_url: None,
            video_url: None,
            instagram_url: None,
            created_at: now,
            updated_at: now,
            scheduled_time: input.scheduled_time,
        };

        state.write(&LogEntry::Post(post.clone())).await?;
        state.posts.push(post.clone());
        Ok(post)
    }
}

#[async_trait]
impl CarouselRepository for JsonLogStore {
    async fn list_carousels(&self) -> Result<Vec<CarouselPost>, DomainError> {
        Ok(self.state.lock().await.carousels.clone())
    }

    async fn append_carousel(&self, input: NewCarousel) -> Result<CarouselPost, DomainError> {
        let mut state = self.state.lock().await;
        let carousel = CarouselPost {
            id: state.next_id(),
            text_prompt: input.text_prompt,
            number_of_images: input.number_of_images,
            status: input.status,
            created_at: Utc::now(),
        };

        state.write(&LogEntry::Carousel(carousel.clone())).await?;
        state.carousels.push(carousel.clone());
        Ok(carousel)
    }
}
