use crate::db::{DbConnection, DbPool};
use crate::domain::category::Category;
use crate::domain::contact::NewContactMessage;
use crate::domain::page::Page;
use crate::domain::post::Post;
use crate::domain::route::DateFilter;
use crate::domain::types::{CategorySlug, PageId, PageSlug, TagName};

pub mod category;
pub mod contact;
pub mod errors;
pub mod page;
pub mod post;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query over the live posts beneath a blog index.
///
/// The index is mandatory: every query starts from the live descendants of
/// `index_id` and the optional refinements narrow that set further.
#[derive(Debug, Clone, PartialEq)]
pub struct PostListQuery {
    /// Blog index whose descendants are searched.
    pub index_id: PageId,
    /// Restrict to a calendar year, month or day.
    pub date: Option<DateFilter>,
    /// Restrict to posts carrying this exact tag label.
    pub tag: Option<TagName>,
    /// Restrict to posts in this category.
    pub category: Option<CategorySlug>,
    /// Restrict to posts with this slug.
    pub slug: Option<PageSlug>,
    /// Maximum number of posts returned.
    pub limit: Option<usize>,
}

impl PostListQuery {
    pub fn new(index_id: PageId) -> Self {
        Self {
            index_id,
            date: None,
            tag: None,
            category: None,
            slug: None,
            limit: None,
        }
    }
    pub fn date(mut self, date: DateFilter) -> Self {
        self.date = Some(date);
        self
    }
    pub fn tag(mut self, tag: TagName) -> Self {
        self.tag = Some(tag);
        self
    }
    pub fn category(mut self, category: CategorySlug) -> Self {
        self.category = Some(category);
        self
    }
    pub fn slug(mut self, slug: PageSlug) -> Self {
        self.slug = Some(slug);
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `post` satisfies the refinements (not the descendant filter).
    pub fn matches(&self, post: &Post) -> bool {
        self.date.is_none_or(|date| date.contains(post.date))
            && self.tag.as_ref().is_none_or(|tag| post.has_tag(tag))
            && self
                .category
                .as_ref()
                .is_none_or(|category| post.in_category(category))
            && self.slug.as_ref().is_none_or(|slug| post.slug == *slug)
    }
}

/// Read-only operations over the page tree.
pub trait PageReader {
    /// The root of the page tree, if any page exists.
    fn get_root_page(&self) -> RepositoryResult<Option<Page>>;
    /// Retrieve a page by its identifier regardless of its live state.
    fn get_page_by_id(&self, id: PageId) -> RepositoryResult<Option<Page>>;
    /// Retrieve the live child of `parent_id` with the given slug.
    fn get_live_child(&self, parent_id: PageId, slug: &PageSlug) -> RepositoryResult<Option<Page>>;
    /// List every live page ordered by id.
    fn list_live_pages(&self) -> RepositoryResult<Vec<Page>>;
}

/// Read-only operations for posts.
pub trait PostReader {
    /// List live descendant posts of the query's index, in ascending id order.
    fn list_posts(&self, query: &PostListQuery) -> RepositoryResult<Vec<Post>>;
    /// List live posts anywhere in the tree, optionally restricted to a tag.
    fn list_tagged_posts(&self, tag: Option<&TagName>) -> RepositoryResult<Vec<Post>>;
    /// Retrieve a post by its page identifier.
    fn get_post_by_id(&self, id: PageId) -> RepositoryResult<Option<Post>>;
}

/// Read-only operations for categories.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations for contact form submissions.
pub trait ContactWriter {
    /// Persist a new submission.
    fn create_contact_message(&self, message: &NewContactMessage) -> RepositoryResult<usize>;
}
