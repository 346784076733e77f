use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Post entity - a short text post with optional attached images.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub created_by: Uuid,
    pub text: String,
    pub images: Vec<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub created_by: Uuid,
    pub text: String,
    pub images: Vec<Value>,
}

/// Partial update. Only `text` and `images` are mutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub text: Option<String>,
    pub images: Option<Vec<Value>>,
}

impl Post {
    /// Create a new post with a generated ID and timestamps.
    pub fn new(draft: NewPost) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4(),
            created_by: draft.created_by,
            text: draft.text,
            images: draft.images,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the provided fields onto this post and refresh `updated_at`.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(text) = changes.text {
            self.text = text;
        }
        if let Some(images) = changes.images {
            self.images = images;
        }
        self.touch();
    }

    /// Refresh `updated_at`. The new value is always strictly later than the old one.
    fn touch(&mut self) {
        let now = timestamp();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

/// Current time at storage precision (microseconds).
fn timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
