use crate::domain::error::DomainError;
use crate::domain::post::{BlogPost, PostPatch};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::post_repository::PostRepository;

/// Insertion-ordered in-memory store. Backs the service when no database
/// is configured and gives each test run an isolated store instance.
/// Writes take the exclusive lock, so conflicting patches to one id
/// serialize just like they would in the database backend.
#[derive(Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<BlogPost>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: BlogPost) -> Result<BlogPost, DomainError> {
        let mut posts = self.posts.write().await;
        posts.push(post.clone());
        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<BlogPost>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.clone())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<BlogPost>, DomainError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(author) = patch.author {
            post.author = author;
        }
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }

        info!(post_id = %id, "post updated");
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        let removed = posts.len() < before;
        if removed {
            info!(post_id = %id, "post deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::Author;

    fn sample(first: &str, last: &str, title: &str) -> BlogPost {
        BlogPost::new(
            Author {
                first_name: first.into(),
                last_name: last.into(),
            },
            title.into(),
            "some content".into(),
            None,
        )
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let repo = InMemoryPostRepository::new();
        let a = repo.insert(sample("A", "One", "first")).await.unwrap();
        let b = repo.insert(sample("B", "Two", "second")).await.unwrap();
        let c = repo.insert(sample("C", "Three", "third")).await.unwrap();

        let ids: Vec<_> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);
    }

    #[tokio::test]
    async fn update_patches_only_supplied_fields() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(sample("A", "One", "first")).await.unwrap();

        let patch = PostPatch {
            title: Some("renamed".into()),
            ..Default::default()
        };
        let updated = repo.update(post.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.author, post.author);
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.created, post.created);
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let repo = InMemoryPostRepository::new();
        let patch = PostPatch {
            title: Some("renamed".into()),
            ..Default::default()
        };
        assert!(repo.update(Uuid::new_v4(), patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(sample("A", "One", "first")).await.unwrap();

        assert!(repo.delete(post.id).await.unwrap());
        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());

        assert!(!repo.delete(post.id).await.unwrap());
    }
}
