//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder};

use postboard_core::domain::{Page, PageRequest, Post, PostFilter, PostSortField, SortOrder};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn column(field: PostSortField) -> post::Column {
    match field {
        PostSortField::Id => post::Column::Id,
        PostSortField::CreatedBy => post::Column::CreatedBy,
        PostSortField::Text => post::Column::Text,
        PostSortField::CreatedAt => post::Column::CreatedAt,
        PostSortField::UpdatedAt => post::Column::UpdatedAt,
    }
}

fn order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn paginate(
        &self,
        filter: &PostFilter,
        request: &PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        tracing::debug!(?filter, limit = request.limit(), page = request.page(), "Paginating posts");

        let mut select = PostEntity::find();
        if let Some(created_by) = filter.created_by {
            select = select.filter(post::Column::CreatedBy.eq(created_by));
        }
        for key in request.sort_keys() {
            select = select.order_by(column(key.field), order(key.order));
        }
        // Stable pages when sort keys tie.
        select = select.order_by_asc(post::Column::Id);

        let paginator = select.paginate(&self.db, request.limit());
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator
            .fetch_page(request.page() - 1)
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            request,
            total,
        ))
    }
}
