use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::page::{Page as DomainPage, PageMeta, SitemapSettings};
use crate::domain::types::{
    ChangeFrequency, PageKind, PageSlug, PageTitle, SitemapPriority, TypeConstraintError,
};

/// Diesel model representing the `pages` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::pages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Page {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub kind: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub live: bool,
    pub first_published_at: Option<NaiveDateTime>,
    pub search_description: String,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub template: Option<String>,
    pub include_in_sitemap: bool,
    pub sitemap_priority: f64,
    pub changefreq: String,
    pub last_published_at: Option<NaiveDateTime>,
    pub thank_you_text: String,
}

/// Insertable form of [`Page`]. Metadata columns keep their defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::pages)]
pub struct NewPage<'a> {
    pub parent_id: Option<i32>,
    pub kind: &'a str,
    pub title: &'a str,
    pub slug: &'a str,
    pub body: &'a str,
    pub live: bool,
    pub first_published_at: Option<NaiveDateTime>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Page {
    /// Split off the metadata columns shared by pages and posts.
    pub(crate) fn take_meta(&mut self) -> (PageMeta, Option<String>) {
        let meta = PageMeta {
            search_description: std::mem::take(&mut self.search_description),
            og_title: non_blank(self.og_title.take()),
            og_description: non_blank(self.og_description.take()),
        };
        (meta, non_blank(self.template.take()))
    }
}

impl TryFrom<Page> for DomainPage {
    type Error = TypeConstraintError;

    fn try_from(mut page: Page) -> Result<Self, Self::Error> {
        let (meta, template) = page.take_meta();
        Ok(Self {
            id: page.id.try_into()?,
            parent_id: page.parent_id.map(TryInto::try_into).transpose()?,
            kind: PageKind::try_from(page.kind)?,
            title: PageTitle::new(page.title)?,
            slug: PageSlug::new(page.slug)?,
            body: page.body,
            live: page.live,
            first_published_at: page.first_published_at,
            last_published_at: page.last_published_at,
            meta,
            template,
            sitemap: SitemapSettings {
                include: page.include_in_sitemap,
                priority: SitemapPriority::new(page.sitemap_priority)?,
                changefreq: ChangeFrequency::try_from(page.changefreq)?,
            },
            thank_you_text: page.thank_you_text,
        })
    }
}
