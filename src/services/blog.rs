//! Blog archive resolution: route → posts → render context.

use serde::Serialize;
use thiserror::Error;

use crate::domain::post::Post;
use crate::domain::route::{RouteMatch, SearchDescriptor, SearchKind};
use crate::domain::types::{PageId, PageKind};
use crate::repository::{PageReader, PostListQuery, PostReader, RepositoryError};
use crate::routing::match_route;

use super::{ServiceError, ServiceResult};

/// Failures while resolving a blog route.
#[derive(Debug, Error)]
pub enum BlogError {
    /// The path matches none of the blog routes.
    #[error("no blog route matches the path")]
    NoRouteMatch,
    /// A date/slug route named a slug that has no live post below the index.
    #[error("no post with this slug")]
    SlugNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<BlogError> for ServiceError {
    fn from(val: BlogError) -> Self {
        match val {
            BlogError::NoRouteMatch | BlogError::SlugNotFound => ServiceError::NotFound,
            BlogError::Repository(e) => {
                log::error!("Failed to resolve blog posts: {e}");
                ServiceError::Internal
            }
        }
    }
}

/// Outcome of resolving a route against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPosts {
    Listing(Vec<Post>),
    Single(Post),
}

impl ResolvedPosts {
    pub fn into_posts(self) -> Vec<Post> {
        match self {
            Self::Listing(posts) => posts,
            Self::Single(post) => vec![post],
        }
    }
}

/// Data handed to the template renderer for a blog route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    pub posts: Vec<Post>,
    pub search_kind: SearchKind,
    pub search_term: String,
}

impl RenderContext {
    pub fn build(route: &RouteMatch, resolved: ResolvedPosts) -> Self {
        let SearchDescriptor { kind, term } = SearchDescriptor::describe(route);
        Self {
            posts: resolved.into_posts(),
            search_kind: kind,
            search_term: term,
        }
    }
}

/// Resolve `route` against the live descendants of the blog index `index_id`.
///
/// Collections come back in store order. A date/slug route ignores its date
/// segments and returns the first post with the slug; when several posts
/// share it the lowest id wins and a warning is logged.
pub fn resolve_posts<R>(
    repo: &R,
    index_id: PageId,
    route: &RouteMatch,
) -> Result<ResolvedPosts, BlogError>
where
    R: PostReader + ?Sized,
{
    let base = PostListQuery::new(index_id);

    let query = match route {
        RouteMatch::ByYear { .. }
        | RouteMatch::ByYearMonth { .. }
        | RouteMatch::ByYearMonthDay { .. } => match route.date_filter() {
            Some(date) => base.date(date),
            None => base,
        },
        RouteMatch::ByDateSlug { slug, .. } => {
            let found = repo.list_posts(&base.slug(slug.clone()).limit(2))?;
            if found.len() > 1 {
                log::warn!(
                    "Slug '{slug}' is shared by several posts below index {index_id}; serving post {}",
                    found[0].id
                );
            }
            return found
                .into_iter()
                .next()
                .map(ResolvedPosts::Single)
                .ok_or(BlogError::SlugNotFound);
        }
        RouteMatch::ByTag { tag } => base.tag(tag.clone()),
        RouteMatch::ByCategory { category } => base.category(category.clone()),
        RouteMatch::Index => base,
    };

    Ok(ResolvedPosts::Listing(repo.list_posts(&query)?))
}

/// Match `path` (the remainder below the index) and resolve it.
pub fn resolve_route<R>(repo: &R, index_id: PageId, path: &str) -> Result<RenderContext, BlogError>
where
    R: PostReader + ?Sized,
{
    let route = match_route(path).ok_or(BlogError::NoRouteMatch)?;
    let resolved = resolve_posts(repo, index_id, &route)?;
    Ok(RenderContext::build(&route, resolved))
}

/// Order used by the blog index listing: most recently published first.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.first_published_at
            .cmp(&a.first_published_at)
            .then_with(|| b.date.cmp(&a.date))
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Render context for `path` below the blog index with raw id `index_id`.
///
/// The index must exist, be live and be a blog index.
pub fn show_blog<R>(repo: &R, index_id: i32, path: &str) -> ServiceResult<RenderContext>
where
    R: PageReader + PostReader,
{
    let index_id = PageId::new(index_id).map_err(|_| ServiceError::NotFound)?;

    match repo.get_page_by_id(index_id) {
        Ok(Some(page)) if page.live && page.kind == PageKind::BlogIndex => {}
        Ok(_) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get blog index: {e}");
            return Err(ServiceError::Internal);
        }
    }

    Ok(resolve_route(repo, index_id, path)?)
}
