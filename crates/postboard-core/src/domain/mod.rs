//! Domain entities - the core business objects.

mod post;
mod query;

pub use post::{NewPost, Post, PostChanges};
pub use query::{
    DEFAULT_LIMIT, DEFAULT_PAGE, Page, PageRequest, PostFilter, PostSortField, SortKey,
    SortOrder, SortParseError, parse_sort_by,
};
