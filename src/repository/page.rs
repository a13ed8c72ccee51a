use diesel::prelude::*;

use crate::domain::page::Page;
use crate::domain::types::{PageId, PageSlug};
use crate::models::page::Page as DbPage;
use crate::repository::{DieselRepository, PageReader, RepositoryResult};

impl PageReader for DieselRepository {
    fn get_root_page(&self) -> RepositoryResult<Option<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let page = pages::table
            .filter(pages::parent_id.is_null())
            .order(pages::id.asc())
            .select(DbPage::as_select())
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(page.map(TryInto::try_into).transpose()?)
    }

    fn get_page_by_id(&self, id: PageId) -> RepositoryResult<Option<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let page = pages::table
            .filter(pages::id.eq(id.get()))
            .select(DbPage::as_select())
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(page.map(TryInto::try_into).transpose()?)
    }

    fn get_live_child(&self, parent_id: PageId, slug: &PageSlug) -> RepositoryResult<Option<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let page = pages::table
            .filter(pages::parent_id.eq(parent_id.get()))
            .filter(pages::slug.eq(slug.as_str()))
            .filter(pages::live.eq(true))
            .select(DbPage::as_select())
            .first::<DbPage>(&mut conn)
            .optional()?;

        Ok(page.map(TryInto::try_into).transpose()?)
    }

    fn list_live_pages(&self) -> RepositoryResult<Vec<Page>> {
        use crate::schema::pages;

        let mut conn = self.conn()?;

        let items = pages::table
            .filter(pages::live.eq(true))
            .order(pages::id.asc())
            .select(DbPage::as_select())
            .load::<DbPage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Page>, _>>()?;

        Ok(items)
    }
}
