use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::domain::{NewPost, Page, PageRequest, Post, PostChanges, PostFilter};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Post operations over a [`PostRepository`].
///
/// No state is kept between calls; every operation goes back to the repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post.
    #[instrument(skip(self, draft), fields(created_by = %draft.created_by))]
    pub async fn create_post(&self, draft: NewPost) -> Result<Post, DomainError> {
        let post = self.repo.insert(Post::new(draft)).await?;
        tracing::debug!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Query posts matching `filter`, one page at a time.
    #[instrument(skip(self))]
    pub async fn query_posts(
        &self,
        filter: PostFilter,
        request: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        Ok(self.repo.paginate(&filter, &request).await?)
    }

    /// Get a post by id. A missing post is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn get_post_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    /// Update a post by id.
    #[instrument(skip(self, changes))]
    pub async fn update_post_by_id(
        &self,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        let mut post = self
            .get_post_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        post.apply(changes);

        self.repo.update(post).await.map_err(|e| not_found_or(id, e))
    }

    /// Delete a post by id, returning its last known state.
    #[instrument(skip(self))]
    pub async fn delete_post_by_id(&self, id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .get_post_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        self.repo.delete(id).await.map_err(|e| not_found_or(id, e))?;
        tracing::debug!(post_id = %id, "Post deleted");

        Ok(post)
    }
}

// The record can vanish between the read and the write.
fn not_found_or(id: Uuid, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => DomainError::Store(other),
    }
}
