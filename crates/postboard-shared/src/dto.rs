//! Data Transfer Objects - response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use postboard_core::domain::{Page, Post};

/// Public JSON form of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub created_by: Uuid,
    pub text: String,
    pub images: Vec<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            created_by: post.created_by,
            text: post.text,
            images: post.images,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResultResponse<T> {
    pub results: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl From<Page<Post>> for QueryResultResponse<PostResponse> {
    fn from(page: Page<Post>) -> Self {
        let page = page.map(PostResponse::from);
        Self {
            results: page.results,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
            total_results: page.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use postboard_core::domain::{NewPost, PageRequest};
    use serde_json::json;

    use super::*;

    #[test]
    fn post_json_uses_camel_case_field_names() {
        let post = Post::new(NewPost {
            created_by: Uuid::new_v4(),
            text: "hello".to_string(),
            images: vec![json!("a.png")],
        });

        let value = serde_json::to_value(PostResponse::from(post.clone())).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["createdAt", "createdBy", "id", "images", "text", "updatedAt"]
        );
        assert_eq!(value["id"], json!(post.id.to_string()));
        assert_eq!(value["images"], json!(["a.png"]));
    }

    #[test]
    fn listing_json_carries_pagination_metadata() {
        let request = PageRequest::new(Vec::new(), Some(10), Some(1));
        let page: Page<Post> = Page::new(Vec::new(), &request, 0);

        let value = serde_json::to_value(QueryResultResponse::from(page)).unwrap();
        assert_eq!(
            value,
            json!({ "results": [], "page": 1, "limit": 10, "totalPages": 0, "totalResults": 0 })
        );
    }
}
