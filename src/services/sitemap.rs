//! `sitemap.xml` entries for the live page tree.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::page::Page;
use crate::domain::types::{ChangeFrequency, PageId};
use crate::repository::PageReader;

use super::{ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    /// URL path below the site root, ending in `/`.
    pub path: String,
    /// `YYYY-MM-DD` of the last publication, when known.
    pub lastmod: Option<String>,
    pub priority: String,
    pub changefreq: ChangeFrequency,
}

/// Every live page reachable from the root through live ancestors and not
/// excluded from the sitemap.
pub fn sitemap_entries<R>(repo: &R) -> ServiceResult<Vec<SitemapEntry>>
where
    R: PageReader + ?Sized,
{
    let root = match repo.get_root_page() {
        Ok(Some(root)) if root.live => root,
        Ok(_) => return Ok(Vec::new()),
        Err(e) => {
            log::error!("Failed to get root page: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let pages = match repo.list_live_pages() {
        Ok(pages) => pages,
        Err(e) => {
            log::error!("Failed to list live pages: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let live: HashMap<PageId, &Page> = pages.iter().map(|p| (p.id, p)).collect();

    Ok(pages
        .iter()
        .filter(|page| page.sitemap.include)
        .filter_map(|page| {
            let path = url_path(page, root.id, &live)?;
            Some(SitemapEntry {
                path,
                lastmod: page
                    .last_modified()
                    .map(|at| at.format("%Y-%m-%d").to_string()),
                priority: page.sitemap.priority.to_string(),
                changefreq: page.sitemap.changefreq,
            })
        })
        .collect())
}

/// Path of `page` built from the slugs up to `root`, or `None` when an
/// ancestor is missing from `live`.
fn url_path(page: &Page, root: PageId, live: &HashMap<PageId, &Page>) -> Option<String> {
    let mut slugs = Vec::new();
    let mut current = page;
    while current.id != root {
        if slugs.len() > live.len() {
            return None;
        }
        slugs.push(current.slug.as_str());
        current = live.get(&current.parent_id?).copied()?;
    }

    if slugs.is_empty() {
        return Some("/".to_string());
    }
    slugs.reverse();
    Some(format!("/{}/", slugs.join("/")))
}
