use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tokio::sync::RwLock;
use tubely_core::{models::Video, AppError};
use uuid::Uuid;

/// Load and persist video records.
///
/// `update_video` replaces every mutable column with the values carried by the
/// given record. Concurrent writers to the same record race; the last one wins.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist `video`. Updating a record that does not exist is an error.
    async fn update_video(&self, video: &Video) -> Result<(), AppError>;
}

/// PostgreSQL-backed video repository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<Postgres, Video>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", video_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Database(sqlx::Error::RowNotFound));
        }

        Ok(())
    }
}

/// Map-backed repository for tests and local runs without PostgreSQL.
#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }

    /// Current stored copy of a record, bypassing the trait.
    pub async fn snapshot(&self, id: Uuid) -> Option<Video> {
        self.videos.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&video.id)
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

        *stored = video.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_in_memory_update_replaces_record() {
        let repo = InMemoryVideoRepository::new();
        let mut video = Video::new(Uuid::new_v4(), "title", "desc");
        repo.insert(video.clone()).await;

        video.video_url = Some("https://cdn.example.com/landscape/a.mp4".to_string());
        video.updated_at = Utc::now();
        repo.update_video(&video).await.unwrap();

        assert_eq!(repo.snapshot(video.id).await, Some(video));
    }

    #[tokio::test]
    async fn test_in_memory_update_missing_row_fails() {
        let repo = InMemoryVideoRepository::new();
        let video = Video::new(Uuid::new_v4(), "title", "desc");

        let err = repo.update_video(&video).await.unwrap_err();
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
        assert!(repo.get_video(video.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_last_write_wins() {
        let repo = InMemoryVideoRepository::new();
        let video = Video::new(Uuid::new_v4(), "title", "desc");
        repo.insert(video.clone()).await;

        let first = Video {
            video_url: Some("https://a.example.com/portrait/1.mp4".to_string()),
            ..video.clone()
        };
        let second = Video {
            video_url: Some("https://a.example.com/landscape/2.mp4".to_string()),
            ..video.clone()
        };
        repo.update_video(&first).await.unwrap();
        repo.update_video(&second).await.unwrap();

        let stored = repo.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(stored.video_url, second.video_url);
    }
}
