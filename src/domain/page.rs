use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ChangeFrequency, PageId, PageKind, PageSlug, PageTitle, SitemapPriority,
};

/// Search engine and social sharing metadata of a page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageMeta {
    pub search_description: String,
    /// Open Graph title, the page title is used when absent.
    pub og_title: Option<String>,
    pub og_description: Option<String>,
}

/// How a page is advertised in `sitemap.xml`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SitemapSettings {
    pub include: bool,
    pub priority: SitemapPriority,
    pub changefreq: ChangeFrequency,
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self {
            include: true,
            priority: SitemapPriority::default(),
            changefreq: ChangeFrequency::default(),
        }
    }
}

/// Node of the content tree.
///
/// The tree is an explicit parent-id table: only the root has no parent and
/// siblings never share a slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub parent_id: Option<PageId>,
    pub kind: PageKind,
    pub title: PageTitle,
    pub slug: PageSlug,
    /// Stored HTML, emitted verbatim by templates.
    pub body: String,
    pub live: bool,
    pub first_published_at: Option<NaiveDateTime>,
    pub last_published_at: Option<NaiveDateTime>,
    pub meta: PageMeta,
    /// Template rendered instead of the kind's default one.
    pub template: Option<String>,
    pub sitemap: SitemapSettings,
    /// Confirmation shown after a form submission. Only used by form pages.
    pub thank_you_text: String,
}

impl Page {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Timestamp advertised as `lastmod` in the sitemap.
    pub fn last_modified(&self) -> Option<NaiveDateTime> {
        self.last_published_at.or(self.first_published_at)
    }
}
