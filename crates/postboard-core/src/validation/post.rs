//! Request schemas for the post endpoints.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{ValidationFailure, parse_id};
use crate::domain::{NewPost, PageRequest, PostChanges, PostFilter, parse_sort_by};

/// Body of a create request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePostBody {
    #[validate(required, custom(function = "super::object_id"))]
    pub created_by: Option<String>,
    #[validate(required, length(min = 1))]
    pub text: Option<String>,
    pub images: Option<Vec<Value>>,
}

impl CreatePostBody {
    pub fn into_new_post(self) -> Result<NewPost, ValidationFailure> {
        self.validate()?;

        let created_by = parse_id("createdBy", self.created_by.as_deref())?;
        let text = self
            .text
            .ok_or_else(|| ValidationFailure::single("text", "required"))?;

        Ok(NewPost {
            created_by,
            text,
            images: self.images.unwrap_or_default(),
        })
    }
}

/// Query string of a list request. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListPostsQuery {
    #[validate(custom(function = "super::object_id"))]
    pub created_by: Option<String>,
    #[validate(custom(function = "super::sort_by"))]
    pub sort_by: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl ListPostsQuery {
    /// Split into the filter and the paging options.
    pub fn into_query(self) -> Result<(PostFilter, PageRequest), ValidationFailure> {
        self.validate()?;

        let filter = match self.created_by.as_deref() {
            Some(id) => PostFilter::by_author(parse_id("createdBy", Some(id))?),
            None => PostFilter::default(),
        };
        let sort = match self.sort_by.as_deref() {
            Some(value) => {
                parse_sort_by(value).map_err(|_| ValidationFailure::single("sortBy", "sort_by"))?
            }
            None => Vec::new(),
        };

        let request = PageRequest::new(sort, self.limit, self.page);
        let last_page = PageRequest::max_page(request.limit());
        if matches!(self.page, Some(page) if page > 0 && page as u64 > last_page) {
            return Err(ValidationFailure::single("page", "range"));
        }

        Ok((filter, request))
    }
}

/// Path parameters of the get, update and delete requests.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostIdParams {
    #[serde(rename = "postId")]
    #[validate(custom(function = "super::object_id"))]
    pub post_id: String,
}

impl PostIdParams {
    pub fn new(post_id: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
        }
    }

    pub fn post_id(&self) -> Result<Uuid, ValidationFailure> {
        self.validate()?;
        parse_id("postId", Some(&self.post_id))
    }
}

/// Body of an update request: at least one of `text` or `images`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "has_changes"))]
pub struct UpdatePostBody {
    #[validate(length(min = 1))]
    pub text: Option<String>,
    pub images: Option<Vec<Value>>,
}

fn has_changes(body: &UpdatePostBody) -> Result<(), ValidationError> {
    if body.text.is_none() && body.images.is_none() {
        return Err(ValidationError::new("at_least_one"));
    }
    Ok(())
}

impl From<UpdatePostBody> for PostChanges {
    fn from(body: UpdatePostBody) -> Self {
        Self {
            text: body.text,
            images: body.images,
        }
    }
}

/// Validate an update request, reporting path and body violations together.
pub fn validate_update(
    params: &PostIdParams,
    body: UpdatePostBody,
) -> Result<(Uuid, PostChanges), ValidationFailure> {
    match (params.post_id(), body.validate()) {
        (Ok(id), Ok(())) => Ok((id, body.into())),
        (Err(path), Err(body)) => Err(path.merge(body.into())),
        (Err(path), Ok(())) => Err(path),
        (Ok(_), Err(body)) => Err(body.into()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const ID: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    fn create_body(value: Value) -> CreatePostBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn create_rejects_missing_text() {
        let err = create_body(json!({ "createdBy": ID }))
            .into_new_post()
            .unwrap_err();
        assert!(err.has("text", "required"));
    }

    #[test]
    fn create_accepts_text_without_images() {
        let draft = create_body(json!({ "createdBy": ID, "text": "hello" }))
            .into_new_post()
            .unwrap();
        assert_eq!(draft.text, "hello");
        assert_eq!(draft.created_by.to_string(), ID);
        assert!(draft.images.is_empty());
    }

    #[test]
    fn create_rejects_empty_text_and_bad_author() {
        let err = create_body(json!({ "createdBy": "u1", "text": "" }))
            .into_new_post()
            .unwrap_err();
        assert!(err.has("text", "length"));
        assert!(err.has("createdBy", "object_id"));
        assert_eq!(err.violations[0].field, "createdBy");
    }

    #[test]
    fn create_rejects_unknown_keys() {
        let parsed: Result<CreatePostBody, _> =
            serde_json::from_value(json!({ "createdBy": ID, "text": "x", "title": "t" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn create_rejects_non_string_text() {
        let parsed: Result<CreatePostBody, _> =
            serde_json::from_value(json!({ "createdBy": ID, "text": 42 }));
        assert!(parsed.is_err());
    }

    #[test]
    fn list_query_is_all_optional() {
        let (filter, request) = ListPostsQuery::default().into_query().unwrap();
        assert_eq!(filter, PostFilter::default());
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn list_query_parses_every_field() {
        let query: ListPostsQuery = serde_json::from_value(json!({
            "createdBy": ID,
            "sortBy": "createdAt:desc",
            "limit": 5,
            "page": 3,
        }))
        .unwrap();

        let (filter, request) = query.into_query().unwrap();
        assert_eq!(filter.created_by.map(|id| id.to_string()), Some(ID.to_string()));
        assert_eq!(request.limit(), 5);
        assert_eq!(request.page(), 3);
        assert_eq!(request.sort_keys()[0].to_string(), "createdAt:desc");
    }

    #[test]
    fn list_query_rejects_bad_sort() {
        let query = ListPostsQuery {
            sort_by: Some("createdAt:sideways".to_string()),
            ..Default::default()
        };
        let err = query.into_query().unwrap_err();
        assert!(err.has("sortBy", "sort_by"));
    }

    #[test]
    fn list_query_rejects_a_page_past_the_last_offset() {
        let query = ListPostsQuery {
            limit: Some(10),
            page: Some(i64::MAX),
            ..Default::default()
        };
        let err = query.into_query().unwrap_err();
        assert!(err.has("page", "range"));
        assert_eq!(err.messages(), vec!["page: is out of range".to_string()]);

        let last = PageRequest::max_page(10) as i64;
        let query = ListPostsQuery {
            limit: Some(10),
            page: Some(last),
            ..Default::default()
        };
        let (_, request) = query.into_query().unwrap();
        assert_eq!(request.offset(), (last as u64 - 1) * 10);
    }

    #[test]
    fn post_id_is_format_checked() {
        assert!(PostIdParams::new(ID).post_id().is_ok());
        let err = PostIdParams::new("123").post_id().unwrap_err();
        assert!(err.has("postId", "object_id"));
    }

    #[test]
    fn update_rejects_empty_body() {
        let err = validate_update(&PostIdParams::new(ID), UpdatePostBody::default()).unwrap_err();
        assert!(err.has("body", "at_least_one"));
    }

    #[test]
    fn update_accepts_text_only() {
        let body: UpdatePostBody = serde_json::from_value(json!({ "text": "x" })).unwrap();
        let (id, changes) = validate_update(&PostIdParams::new(ID), body).unwrap();
        assert_eq!(id.to_string(), ID);
        assert_eq!(changes.text.as_deref(), Some("x"));
        assert!(changes.images.is_none());
    }

    #[test]
    fn update_reports_path_and_body_together() {
        let err = validate_update(&PostIdParams::new("nope"), UpdatePostBody::default())
            .unwrap_err();
        assert!(err.has("postId", "object_id"));
        assert!(err.has("body", "at_least_one"));
    }
}
