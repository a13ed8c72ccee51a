//! Page tree dispatch: request path → page → view.

use crate::domain::category::Category;
use crate::domain::page::Page;
use crate::domain::post::Post;
use crate::domain::route::RouteMatch;
use crate::domain::types::{PageKind, PageSlug, TagName};
use crate::repository::{CategoryReader, PageReader, PostReader};
use crate::routing::match_route;
use crate::services::blog::{RenderContext, ResolvedPosts, resolve_posts, sort_newest_first};

use super::{ServiceError, ServiceResult};

/// What the HTTP layer should render for a path.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    /// A blog index listing or archive.
    Blog {
        index: Page,
        /// URL path of the index, ending in `/`.
        index_path: String,
        context: RenderContext,
        categories: Vec<Category>,
    },
    /// A single post, reached by its page path or by a date/slug route.
    Post { post: Post },
    /// Posts carrying the `tag` query parameter, site-wide.
    TagIndex {
        page: Page,
        tag: Option<TagName>,
        posts: Vec<Post>,
    },
    /// A contact form page.
    Form { page: Page },
    /// Any page rendered as title and body.
    Standard { page: Page },
}

impl PageView {
    pub fn page_title(&self) -> &str {
        match self {
            Self::Blog { index, .. } => index.title.as_str(),
            Self::Post { post } => post.title.as_str(),
            Self::TagIndex { page, .. } | Self::Form { page } | Self::Standard { page } => {
                page.title.as_str()
            }
        }
    }
}

/// Resolve `path` against the page tree.
///
/// Segments are matched against live children starting at the root. Below a
/// blog index the remaining segments are offered to the blog routes first and
/// fall back to child pages when no route matches. `tag` is the raw `tag`
/// query parameter used by tag index pages.
pub fn serve_path<R>(repo: &R, path: &str, tag: Option<&str>) -> ServiceResult<PageView>
where
    R: PageReader + PostReader + CategoryReader,
{
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut page = match repo.get_root_page() {
        Ok(Some(root)) if root.live => root,
        Ok(_) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get root page: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let mut rest = segments.as_slice();

    loop {
        if page.kind == PageKind::BlogIndex {
            let remainder = format!("/{}", rest.join("/"));
            if let Some(route) = match_route(&remainder) {
                let consumed = &segments[..segments.len() - rest.len()];
                let index_path = if consumed.is_empty() {
                    "/".to_string()
                } else {
                    format!("/{}/", consumed.join("/"))
                };
                return serve_blog(repo, page, index_path, &route);
            }
        }

        let Some((head, tail)) = rest.split_first() else {
            break;
        };
        let slug = PageSlug::new(*head).map_err(|_| ServiceError::NotFound)?;
        page = match repo.get_live_child(page.id, &slug) {
            Ok(Some(child)) => child,
            Ok(None) => return Err(ServiceError::NotFound),
            Err(e) => {
                log::error!("Failed to get child page '{slug}' of {}: {e}", page.id);
                return Err(ServiceError::Internal);
            }
        };
        rest = tail;
    }

    match page.kind {
        PageKind::Post => match repo.get_post_by_id(page.id) {
            Ok(Some(post)) => Ok(PageView::Post { post }),
            Ok(None) => {
                log::error!("Page {} is a post without a post record", page.id);
                Err(ServiceError::Internal)
            }
            Err(e) => {
                log::error!("Failed to get post {}: {e}", page.id);
                Err(ServiceError::Internal)
            }
        },
        PageKind::TagIndex => {
            // An unusable tag label simply lists nothing.
            let tag = match tag.filter(|t| !t.trim().is_empty()) {
                Some(raw) => match TagName::new(raw) {
                    Ok(tag) => Some(tag),
                    Err(_) => {
                        return Ok(PageView::TagIndex {
                            page,
                            tag: None,
                            posts: Vec::new(),
                        });
                    }
                },
                None => None,
            };
            match repo.list_tagged_posts(tag.as_ref()) {
                Ok(posts) => Ok(PageView::TagIndex { page, tag, posts }),
                Err(e) => {
                    log::error!("Failed to list tagged posts: {e}");
                    Err(ServiceError::Internal)
                }
            }
        }
        PageKind::Form => Ok(PageView::Form { page }),
        PageKind::Root | PageKind::Standard | PageKind::BlogIndex => {
            Ok(PageView::Standard { page })
        }
    }
}

fn serve_blog<R>(
    repo: &R,
    index: Page,
    index_path: String,
    route: &RouteMatch,
) -> ServiceResult<PageView>
where
    R: PostReader + CategoryReader,
{
    let resolved = resolve_posts(repo, index.id, route)?;

    if let ResolvedPosts::Single(post) = resolved {
        return Ok(PageView::Post { post });
    }

    let mut context = RenderContext::build(route, resolved);
    if *route == RouteMatch::Index {
        sort_newest_first(&mut context.posts);
    }

    let categories = match repo.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(PageView::Blog {
        index,
        index_path,
        context,
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::SearchKind;
    use crate::repository::test::{TestRepository, sample_category, sample_page, sample_post};

    fn sample_repo() -> TestRepository {
        let mut hidden = sample_page(6, Some(1), PageKind::Standard, "hidden");
        hidden.live = false;

        TestRepository::new(
            vec![
                sample_page(1, None, PageKind::Root, "home"),
                sample_page(2, Some(1), PageKind::BlogIndex, "blog"),
                sample_page(3, Some(1), PageKind::TagIndex, "tags"),
                sample_page(4, Some(1), PageKind::Form, "contact"),
                sample_page(5, Some(2), PageKind::Standard, "about"),
                hidden,
            ],
            vec![
                sample_post(10, 2, "hello", (2024, 3, 5), &["go"]),
                sample_post(11, 2, "later", (2024, 3, 20), &["rust"]),
            ],
            vec![sample_category(1, "news")],
        )
    }

    #[test]
    fn serves_the_root_page() {
        let view = serve_path(&sample_repo(), "/", None).unwrap();

        assert!(matches!(view, PageView::Standard { ref page } if page.is_root()));
    }

    #[test]
    fn blog_index_lists_newest_first() {
        let view = serve_path(&sample_repo(), "/blog/", None).unwrap();

        let PageView::Blog {
            index_path,
            context,
            categories,
            ..
        } = view
        else {
            panic!("expected a blog view");
        };
        assert_eq!(index_path, "/blog/");
        let slugs: Vec<&str> = context.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["later", "hello"]);
        assert_eq!(categories.len(), 1);
    }

    #[test]
    fn archive_routes_below_nested_paths() {
        let view = serve_path(&sample_repo(), "/blog/2024/03/", None).unwrap();

        let PageView::Blog {
            index_path,
            context,
            ..
        } = view
        else {
            panic!("expected a blog view");
        };
        assert_eq!(index_path, "/blog/");
        assert_eq!(context.search_kind, SearchKind::Date);
        assert_eq!(context.search_term, "March 2024");
        assert_eq!(context.posts.len(), 2);
    }

    #[test]
    fn date_slug_serves_the_post_page() {
        let view = serve_path(&sample_repo(), "/blog/2024/03/05/hello/", None).unwrap();

        assert!(matches!(view, PageView::Post { ref post } if post.slug == "hello"));
    }

    #[test]
    fn posts_are_reachable_by_page_path() {
        let view = serve_path(&sample_repo(), "/blog/later", None).unwrap();

        assert!(matches!(view, PageView::Post { ref post } if post.slug == "later"));
    }

    #[test]
    fn unmatched_blog_remainder_falls_back_to_children() {
        let view = serve_path(&sample_repo(), "/blog/about/", None).unwrap();

        assert_eq!(view.page_title(), "about");
    }

    #[test]
    fn missing_slug_under_blog_is_not_found() {
        let err = serve_path(&sample_repo(), "/blog/2024/03/05/missing/", None).unwrap_err();

        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn unknown_or_hidden_pages_are_not_found() {
        let repo = sample_repo();

        assert_eq!(
            serve_path(&repo, "/nowhere/", None).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            serve_path(&repo, "/hidden/", None).unwrap_err(),
            ServiceError::NotFound
        );
        assert_eq!(
            serve_path(&repo, "/blog/about/deeper/", None).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn blog_tag_routes_take_decoded_labels() {
        let repo = TestRepository::new(
            vec![
                sample_page(1, None, PageKind::Root, "home"),
                sample_page(2, Some(1), PageKind::BlogIndex, "blog"),
            ],
            vec![
                sample_post(10, 2, "coffee", (2024, 3, 5), &["café"]),
                sample_post(11, 2, "stack", (2024, 3, 6), &["web dev", "c++"]),
            ],
            vec![],
        );

        for (path, tag, slug) in [
            ("/blog/tag/café/", "café", "coffee"),
            ("/blog/tag/web dev/", "web dev", "stack"),
            ("/blog/tag/c++/", "c++", "stack"),
        ] {
            let PageView::Blog { context, .. } = serve_path(&repo, path, None).unwrap() else {
                panic!("expected a blog view for {path}");
            };
            assert_eq!(context.search_kind, SearchKind::Tag);
            assert_eq!(context.search_term, tag);
            let slugs: Vec<&str> = context.posts.iter().map(|p| p.slug.as_str()).collect();
            assert_eq!(slugs, vec![slug], "{path}");
        }
    }

    #[test]
    fn tag_index_filters_by_query_parameter() {
        let repo = sample_repo();

        let PageView::TagIndex { tag, posts, .. } =
            serve_path(&repo, "/tags/", Some("go")).unwrap()
        else {
            panic!("expected a tag index");
        };
        assert_eq!(tag.unwrap(), "go");
        assert_eq!(posts.len(), 1);

        let PageView::TagIndex { tag, posts, .. } = serve_path(&repo, "/tags/", None).unwrap()
        else {
            panic!("expected a tag index");
        };
        assert!(tag.is_none());
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn form_pages_render_the_form() {
        let view = serve_path(&sample_repo(), "/contact/", None).unwrap();

        assert!(matches!(view, PageView::Form { .. }));
    }
}
