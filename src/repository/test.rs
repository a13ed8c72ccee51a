use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::domain::category::Category;
use crate::domain::contact::NewContactMessage;
use crate::domain::page::{Page, PageMeta, SitemapSettings};
use crate::domain::post::Post;
use crate::domain::types::{
    CategoryId, CategoryName, CategorySlug, PageId, PageKind, PageSlug, PageTitle, TagName,
};
use crate::repository::{
    CategoryReader, ContactWriter, PageReader, PostListQuery, PostReader, RepositoryResult,
};

/// Simple in-memory repository used for unit tests.
///
/// Pages are kept in insertion order; posts are stored alongside their page
/// so that both readers see the same tree.
#[derive(Default)]
pub struct TestRepository {
    pages: Vec<Page>,
    posts: HashMap<PageId, Post>,
    categories: Vec<Category>,
    contact_messages: RefCell<Vec<NewContactMessage>>,
}

impl TestRepository {
    pub fn new(pages: Vec<Page>, posts: Vec<Post>, categories: Vec<Category>) -> Self {
        let mut repo = Self {
            pages,
            categories,
            ..Self::default()
        };
        for post in posts {
            repo.pages.push(Self::page_of(&post));
            repo.posts.insert(post.id, post);
        }
        repo
    }

    pub fn contact_messages(&self) -> Vec<NewContactMessage> {
        self.contact_messages.borrow().clone()
    }

    fn page_of(post: &Post) -> Page {
        Page {
            id: post.id,
            parent_id: Some(post.parent_id),
            kind: PageKind::Post,
            title: post.title.clone(),
            slug: post.slug.clone(),
            body: post.body.clone(),
            live: post.live,
            first_published_at: post.first_published_at,
            last_published_at: None,
            meta: post.meta.clone(),
            template: post.template.clone(),
            sitemap: SitemapSettings::default(),
            thank_you_text: String::new(),
        }
    }

    fn is_descendant(&self, id: PageId, ancestor: PageId) -> bool {
        let parents: HashMap<PageId, Option<PageId>> =
            self.pages.iter().map(|p| (p.id, p.parent_id)).collect();
        let mut current = parents.get(&id).copied().flatten();
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = parents.get(&parent).copied().flatten();
        }
        false
    }

    fn sorted_live_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().filter(|p| p.live).cloned().collect();
        posts.sort_by_key(|p| p.id);
        posts
    }
}

impl PageReader for TestRepository {
    fn get_root_page(&self) -> RepositoryResult<Option<Page>> {
        Ok(self.pages.iter().find(|p| p.is_root()).cloned())
    }

    fn get_page_by_id(&self, id: PageId) -> RepositoryResult<Option<Page>> {
        Ok(self.pages.iter().find(|p| p.id == id).cloned())
    }

    fn get_live_child(&self, parent_id: PageId, slug: &PageSlug) -> RepositoryResult<Option<Page>> {
        Ok(self
            .pages
            .iter()
            .find(|p| p.parent_id == Some(parent_id) && p.slug == *slug && p.live)
            .cloned())
    }

    fn list_live_pages(&self) -> RepositoryResult<Vec<Page>> {
        let mut items: Vec<Page> = self.pages.iter().filter(|p| p.live).cloned().collect();
        items.sort_by_key(|p| p.id);
        Ok(items)
    }
}

impl PostReader for TestRepository {
    fn list_posts(&self, query: &PostListQuery) -> RepositoryResult<Vec<Post>> {
        let mut items: Vec<Post> = self
            .sorted_live_posts()
            .into_iter()
            .filter(|p| self.is_descendant(p.id, query.index_id))
            .filter(|p| query.matches(p))
            .collect();
        if let Some(limit) = query.limit {
            items.truncate(limit);
        }
        Ok(items)
    }

    fn list_tagged_posts(&self, tag: Option<&TagName>) -> RepositoryResult<Vec<Post>> {
        Ok(self
            .sorted_live_posts()
            .into_iter()
            .filter(|p| tag.is_none_or(|tag| p.has_tag(tag)))
            .collect())
    }

    fn get_post_by_id(&self, id: PageId) -> RepositoryResult<Option<Post>> {
        Ok(self.posts.get(&id).cloned())
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut items = self.categories.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }
}

impl ContactWriter for TestRepository {
    fn create_contact_message(&self, message: &NewContactMessage) -> RepositoryResult<usize> {
        self.contact_messages.borrow_mut().push(message.clone());
        Ok(1)
    }
}

/// Builds a page for tests.
pub fn sample_page(id: i32, parent: Option<i32>, kind: PageKind, slug: &str) -> Page {
    Page {
        id: PageId::new(id).unwrap(),
        parent_id: parent.map(|p| PageId::new(p).unwrap()),
        kind,
        title: PageTitle::new(slug).unwrap(),
        slug: PageSlug::new(slug).unwrap(),
        body: String::new(),
        live: true,
        first_published_at: None,
        last_published_at: None,
        meta: PageMeta::default(),
        template: None,
        sitemap: SitemapSettings::default(),
        thank_you_text: String::new(),
    }
}

/// Builds a live post for tests.
pub fn sample_post(id: i32, parent: i32, slug: &str, date: (i32, u32, u32), tags: &[&str]) -> Post {
    let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
    Post {
        id: PageId::new(id).unwrap(),
        parent_id: PageId::new(parent).unwrap(),
        title: PageTitle::new(slug).unwrap(),
        slug: PageSlug::new(slug).unwrap(),
        date,
        intro: String::new(),
        body: String::new(),
        tags: tags.iter().map(|t| TagName::new(*t).unwrap()).collect(),
        categories: BTreeSet::new(),
        live: true,
        first_published_at: date.and_hms_opt(12, 0, 0),
        meta: PageMeta::default(),
        template: None,
    }
}

/// Builds a category for tests.
pub fn sample_category(id: i32, slug: &str) -> Category {
    Category {
        id: CategoryId::new(id).unwrap(),
        name: CategoryName::new(slug).unwrap(),
        slug: CategorySlug::new(slug).unwrap(),
    }
}
