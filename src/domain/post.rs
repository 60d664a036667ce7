use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author name parts are stored split and only concatenated at the
/// serialization boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// `created` falls back to the current time when the caller does not
    /// supply one. `id` is always server-assigned.
    pub fn new(
        author: Author,
        title: String,
        content: String,
        created: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            title,
            content,
            created: created.unwrap_or_else(Utc::now),
        }
    }
}

/// Partial update applied by the update operation. `id` and `created`
/// are never part of a patch. A supplied author replaces both name parts.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub author: Option<Author>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_concatenates_first_and_last() {
        let author = Author {
            first_name: "Mel".into(),
            last_name: "Brookes".into(),
        };
        assert_eq!(author.display_name(), "Mel Brookes");
    }

    #[test]
    fn new_post_defaults_created_to_now() {
        let before = Utc::now();
        let post = BlogPost::new(
            Author {
                first_name: "A".into(),
                last_name: "B".into(),
            },
            "title".into(),
            "content".into(),
            None,
        );
        assert!(post.created >= before && post.created <= Utc::now());
    }

    #[test]
    fn new_post_keeps_supplied_created() {
        let created = "2020-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap();
        let post = BlogPost::new(
            Author {
                first_name: "A".into(),
                last_name: "B".into(),
            },
            "title".into(),
            "content".into(),
            Some(created),
        );
        assert_eq!(post.created, created);
    }
}
