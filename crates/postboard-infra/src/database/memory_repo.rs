//! In-memory post repository - used when no database is configured, and in tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use postboard_core::domain::{Page, PageRequest, Post, PostFilter, PostSortField, SortKey, SortOrder};
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, PostRepository};

/// Posts held in a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn compare(a: &Post, b: &Post, keys: &[SortKey]) -> Ordering {
        keys.iter()
            .map(|key| {
                let ordering = match key.field {
                    PostSortField::Id => a.id.cmp(&b.id),
                    PostSortField::CreatedBy => a.created_by.cmp(&b.created_by),
                    PostSortField::Text => a.text.cmp(&b.text),
                    PostSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                    PostSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                };
                match key.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&post.id) {
            Some(existing) => {
                *existing = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn paginate(
        &self,
        filter: &PostFilter,
        request: &PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let store = self.store.read().await;

        let mut matches: Vec<&Post> = store
            .values()
            .filter(|post| filter.created_by.is_none_or(|id| post.created_by == id))
            .collect();

        let keys = request.sort_keys();
        matches.sort_by(|a, b| Self::compare(a, b, &keys));

        let total = matches.len() as u64;
        let results = matches
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .cloned()
            .collect();

        Ok(Page::new(results, request, total))
    }
}
