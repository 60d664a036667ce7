use crate::domain::post::{Author, BlogPost, PostPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire shape of the author composite: `{"firstName": ..., "lastName": ...}`.
#[derive(Debug, Deserialize)]
pub struct AuthorInput {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

impl From<AuthorInput> for Author {
    fn from(input: AuthorInput) -> Self {
        Author {
            first_name: input.first_name,
            last_name: input.last_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub author: AuthorInput,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Any subset of the mutable fields. The body may echo the record id; the
/// handler rejects it when it disagrees with the path.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub author: Option<AuthorInput>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        PostPatch {
            author: req.author.map(Author::from),
            title: req.title,
            content: req.content,
        }
    }
}

/// External representation of one record. The split author is rendered as
/// a single display string; the internal shape never leaks over the API.
#[derive(Debug, Serialize)]
pub struct BlogPostResponse {
    pub id: Uuid,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<BlogPost> for BlogPostResponse {
    fn from(post: BlogPost) -> Self {
        BlogPostResponse {
            id: post.id,
            author: post.author.display_name(),
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}
