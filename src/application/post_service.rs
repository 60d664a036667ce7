use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Author, BlogPost, PostPatch};
use chrono::{DateTime, Utc};
use tracing::instrument;
use uuid::Uuid;

/// Orchestrates validation and persistence for the posts collection.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_post(&self, id: Uuid) -> Result<BlogPost, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn get_posts(&self) -> Result<Vec<BlogPost>, DomainError> {
        self.repo.list().await
    }

    #[instrument(skip(self))]
    pub async fn create_post(
        &self,
        author: Author,
        title: String,
        content: String,
        created: Option<DateTime<Utc>>,
    ) -> Result<BlogPost, DomainError> {
        require(&author.first_name, "author.firstName")?;
        require(&author.last_name, "author.lastName")?;
        require(&title, "title")?;
        require(&content, "content")?;

        let post = BlogPost::new(author, title, content, created);
        self.repo.insert(post).await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<(), DomainError> {
        if let Some(author) = &patch.author {
            require(&author.first_name, "author.firstName")?;
            require(&author.last_name, "author.lastName")?;
        }
        if let Some(title) = &patch.title {
            require(title, "title")?;
        }
        if let Some(content) = &patch.content {
            require(content, "content")?;
        }

        match self.repo.update(id, patch).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::PostNotFound(id)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        // Deleting an unknown id is an error, matching the update contract.
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(DomainError::PostNotFound(id))
        }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        Err(DomainError::Validation(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryPostRepository;

    fn service() -> PostService {
        PostService::new(Arc::new(InMemoryPostRepository::new()))
    }

    fn author() -> Author {
        Author {
            first_name: "Mel".into(),
            last_name: "Brookes".into(),
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_required_fields() {
        let svc = service();

        let err = svc
            .create_post(author(), "".into(), "content".into(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation("title")));

        let err = svc
            .create_post(
                Author {
                    first_name: "  ".into(),
                    last_name: "Brookes".into(),
                },
                "title".into(),
                "content".into(),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation("author.firstName")));
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let svc = service();
        let post = svc
            .create_post(author(), "title".into(), "content".into(), None)
            .await
            .unwrap();

        let fetched = svc.get_post(post.id).await.unwrap();
        assert_eq!(fetched.title, "title");
        assert_eq!(fetched.content, "content");
        assert_eq!(fetched.author.display_name(), "Mel Brookes");
        assert_eq!(fetched.created, post.created);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let svc = service();
        let err = svc
            .update_post(Uuid::new_v4(), PostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound(_)));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let svc = service();
        let err = svc.delete_post(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound(_)));
    }

    #[tokio::test]
    async fn update_patch_rejects_partial_author_blank() {
        let svc = service();
        let post = svc
            .create_post(author(), "title".into(), "content".into(), None)
            .await
            .unwrap();

        let patch = PostPatch {
            author: Some(Author {
                first_name: "Mel".into(),
                last_name: "".into(),
            }),
            ..Default::default()
        };
        let err = svc.update_post(post.id, patch).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation("author.lastName")));
    }
}
