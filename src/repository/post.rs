use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::post::Post;
use crate::domain::types::{PageId, PageKind, TagName};
use crate::models::page::Page as DbPage;
use crate::models::post::{Post as DbPost, PostRow};
use crate::repository::{DieselRepository, PostListQuery, PostReader, RepositoryResult};
use crate::schema::{categories, pages, post_categories, post_tags, posts};

/// Collect the ids of every page beneath `root`, walking the parent-id table
/// one level at a time.
fn descendant_ids(conn: &mut SqliteConnection, root: PageId) -> QueryResult<Vec<i32>> {
    let mut all = Vec::new();
    let mut frontier = vec![Some(root.get())];

    while !frontier.is_empty() {
        let parents = std::mem::take(&mut frontier);
        let children = pages::table
            .filter(pages::parent_id.eq_any(parents))
            .select(pages::id)
            .load::<i32>(conn)?;
        all.extend_from_slice(&children);
        frontier = children.into_iter().map(Some).collect();
    }

    Ok(all)
}

/// Attach tags and category slugs to loaded rows and convert them.
fn hydrate(
    conn: &mut SqliteConnection,
    rows: Vec<(DbPage, DbPost)>,
) -> RepositoryResult<Vec<Post>> {
    let ids: Vec<i32> = rows.iter().map(|(page, _)| page.id).collect();

    let mut tags: HashMap<i32, Vec<String>> = HashMap::new();
    for (post_id, tag) in post_tags::table
        .filter(post_tags::post_id.eq_any(ids.clone()))
        .select((post_tags::post_id, post_tags::tag))
        .load::<(i32, String)>(conn)?
    {
        tags.entry(post_id).or_default().push(tag);
    }

    let mut slugs: HashMap<i32, Vec<String>> = HashMap::new();
    for (post_id, slug) in post_categories::table
        .inner_join(categories::table)
        .filter(post_categories::post_id.eq_any(ids))
        .select((post_categories::post_id, categories::slug))
        .load::<(i32, String)>(conn)?
    {
        slugs.entry(post_id).or_default().push(slug);
    }

    let posts = rows
        .into_iter()
        .map(|(page, post)| {
            let id = page.id;
            PostRow {
                page,
                post,
                tags: tags.remove(&id).unwrap_or_default(),
                categories: slugs.remove(&id).unwrap_or_default(),
            }
            .try_into()
        })
        .collect::<Result<Vec<Post>, _>>()?;

    Ok(posts)
}

impl PostReader for DieselRepository {
    fn list_posts(&self, query: &PostListQuery) -> RepositoryResult<Vec<Post>> {
        let mut conn = self.conn()?;

        let descendants = descendant_ids(&mut conn, query.index_id)?;

        let mut items = pages::table
            .inner_join(posts::table)
            .filter(pages::id.eq_any(descendants))
            .filter(pages::live.eq(true))
            .filter(pages::kind.eq(PageKind::Post.as_str()))
            .select((DbPage::as_select(), DbPost::as_select()))
            .into_boxed::<Sqlite>();

        if let Some(date) = query.date {
            // An impossible calendar period matches nothing.
            let Some((start, end)) = date.span() else {
                return Ok(Vec::new());
            };
            items = items.filter(posts::date.ge(start)).filter(posts::date.lt(end));
        }
        if let Some(tag) = &query.tag {
            items = items.filter(
                pages::id.eq_any(
                    post_tags::table
                        .filter(post_tags::tag.eq(tag.as_str().to_owned()))
                        .select(post_tags::post_id),
                ),
            );
        }
        if let Some(category) = &query.category {
            items = items.filter(
                pages::id.eq_any(
                    post_categories::table
                        .inner_join(categories::table)
                        .filter(categories::slug.eq(category.as_str().to_owned()))
                        .select(post_categories::post_id),
                ),
            );
        }
        if let Some(slug) = &query.slug {
            items = items.filter(pages::slug.eq(slug.as_str().to_owned()));
        }
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        let rows = items
            .order(pages::id.asc())
            .load::<(DbPage, DbPost)>(&mut conn)?;

        hydrate(&mut conn, rows)
    }

    fn list_tagged_posts(&self, tag: Option<&TagName>) -> RepositoryResult<Vec<Post>> {
        let mut conn = self.conn()?;

        let mut items = pages::table
            .inner_join(posts::table)
            .filter(pages::live.eq(true))
            .filter(pages::kind.eq(PageKind::Post.as_str()))
            .select((DbPage::as_select(), DbPost::as_select()))
            .into_boxed::<Sqlite>();
        if let Some(tag) = tag {
            items = items.filter(
                pages::id.eq_any(
                    post_tags::table
                        .filter(post_tags::tag.eq(tag.as_str().to_owned()))
                        .select(post_tags::post_id),
                ),
            );
        }

        let rows = items
            .order(pages::id.asc())
            .load::<(DbPage, DbPost)>(&mut conn)?;

        hydrate(&mut conn, rows)
    }

    fn get_post_by_id(&self, id: PageId) -> RepositoryResult<Option<Post>> {
        let mut conn = self.conn()?;

        let rows = pages::table
            .inner_join(posts::table)
            .filter(pages::id.eq(id.get()))
            .select((DbPage::as_select(), DbPost::as_select()))
            .load::<(DbPage, DbPost)>(&mut conn)?;

        Ok(hydrate(&mut conn, rows)?.into_iter().next())
    }
}
