use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::page::PageMeta;
use crate::domain::types::{CategorySlug, PageId, PageSlug, PageTitle, TagName};

/// Blog post: a page of kind [`crate::domain::types::PageKind::Post`] together
/// with its post-specific attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    pub id: PageId,
    /// Direct parent in the page tree.
    pub parent_id: PageId,
    pub title: PageTitle,
    pub slug: PageSlug,
    pub date: NaiveDate,
    pub intro: String,
    pub body: String,
    pub tags: BTreeSet<TagName>,
    pub categories: BTreeSet<CategorySlug>,
    pub live: bool,
    pub first_published_at: Option<NaiveDateTime>,
    pub meta: PageMeta,
    /// Template rendered instead of `blog/post.html`.
    pub template: Option<String>,
}

impl Post {
    pub fn has_tag(&self, tag: &TagName) -> bool {
        self.tags.contains(tag)
    }

    pub fn in_category(&self, category: &CategorySlug) -> bool {
        self.categories.contains(category)
    }
}
