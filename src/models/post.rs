use std::collections::BTreeSet;

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::post::Post as DomainPost;
use crate::domain::types::{
    CategorySlug, PageKind, PageSlug, PageTitle, TagName, TypeConstraintError,
};
use crate::models::page::Page;

/// Diesel model representing the `posts` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(primary_key(page_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Post {
    pub page_id: i32,
    pub date: NaiveDate,
    pub intro: String,
}

/// Row of the `post_tags` table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::post_tags)]
pub struct PostTag {
    pub post_id: i32,
    pub tag: String,
}

/// Row of the `post_categories` table.
#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::post_categories)]
pub struct PostCategory {
    pub post_id: i32,
    pub category_id: i32,
}

/// A joined `pages`/`posts` row plus the labels loaded for it.
pub struct PostRow {
    pub page: Page,
    pub post: Post,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
}

impl TryFrom<PostRow> for DomainPost {
    type Error = TypeConstraintError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let PostRow {
            mut page,
            post,
            tags,
            categories,
        } = row;

        if PageKind::try_from(page.kind.as_str())? != PageKind::Post {
            return Err(TypeConstraintError::InvalidValue(format!(
                "page {} is not a post",
                page.id
            )));
        }
        let (meta, template) = page.take_meta();
        let parent_id = page.parent_id.ok_or_else(|| {
            TypeConstraintError::InvalidValue(format!("post {} has no parent", page.id))
        })?;

        Ok(Self {
            id: page.id.try_into()?,
            parent_id: parent_id.try_into()?,
            title: PageTitle::new(page.title)?,
            slug: PageSlug::new(page.slug)?,
            date: post.date,
            intro: post.intro,
            body: page.body,
            tags: tags
                .into_iter()
                .map(TagName::new)
                .collect::<Result<BTreeSet<_>, _>>()?,
            categories: categories
                .into_iter()
                .map(CategorySlug::new)
                .collect::<Result<BTreeSet<_>, _>>()?,
            live: page.live,
            first_published_at: page.first_published_at,
            meta,
            template,
        })
    }
}
