//! Comic and comic link operations.
//!
//! A comic's links and chapters are independent fan-outs and are loaded
//! concurrently; the first failure drops the other.

use comicat_core::auth::{require_write, Authorizer};
use comicat_core::listing::{COMIC_LINK_LIST, COMIC_LIST};
use comicat_core::types::DbId;
use comicat_db::generic::ListParams;
use comicat_db::models::comic::{
    Comic, ComicLink, ComicLinkSid, ComicRef, CreateComic, CreateComicLink, UpdateComic,
    UpdateComicLink,
};
use comicat_db::models::link::Link;
use comicat_db::query::Condition;
use comicat_db::repositories::{ComicLinkRepo, ComicRepo};
use comicat_db::DbPool;

use crate::chapter::chapters_by_comic;
use crate::error::ServiceResult;
use crate::link::links_by_owner;
use crate::{CatalogService, ListRequest};

fn by_code(code: &str) -> ComicRef {
    ComicRef::Code(code.to_string())
}

impl CatalogService {
    // -----------------------------------------------------------------------
    // Comics
    // -----------------------------------------------------------------------

    pub async fn add_comic(&self, auth: &impl Authorizer, input: &CreateComic) -> ServiceResult<Comic> {
        require_write(auth, "add comic")?;
        input.validate()?;

        let comic = ComicRepo::create(&self.pool, input).await?;
        tracing::info!(id = comic.id, code = %comic.code, "Comic added");
        self.with_children(comic).await
    }

    pub async fn get_comic_by_code(&self, code: &str) -> ServiceResult<Comic> {
        let comic = ComicRepo::find(&self.pool, &by_code(code)).await?;
        self.with_children(comic).await
    }

    pub async fn update_comic_by_code(
        &self,
        auth: &impl Authorizer,
        code: &str,
        input: &UpdateComic,
    ) -> ServiceResult<Comic> {
        require_write(auth, "update comic")?;
        input.validate()?;

        let comic = ComicRepo::update(&self.pool, &by_code(code), input).await?;
        tracing::info!(id = comic.id, "Comic updated");
        self.with_children(comic).await
    }

    /// Removes the comic's chapters and link pairings along with it.
    pub async fn delete_comic_by_code(&self, auth: &impl Authorizer, code: &str) -> ServiceResult<()> {
        require_write(auth, "delete comic")?;

        let deleted = ComicRepo::delete(&self.pool, &by_code(code)).await?;
        tracing::info!(code, deleted, "Comic deleted");
        Ok(())
    }

    pub async fn list_comics(&self, request: ListRequest) -> ServiceResult<Vec<Comic>> {
        let params = request.into_params(&COMIC_LIST, Condition::Empty);
        let mut comics = ComicRepo::list(&self.pool, &params).await?;
        attach_comic_children(&self.pool, &mut comics).await?;
        Ok(comics)
    }

    pub async fn count_comics(&self) -> ServiceResult<i64> {
        Ok(ComicRepo::count(&self.pool, &Condition::Empty).await?)
    }

    pub async fn comic_exists(&self, code: &str) -> ServiceResult<bool> {
        Ok(ComicRepo::exists(&self.pool, &by_code(code)).await?)
    }

    async fn with_children(&self, comic: Comic) -> ServiceResult<Comic> {
        let mut comics = [comic];
        attach_comic_children(&self.pool, &mut comics).await?;
        let [comic] = comics;
        Ok(comic)
    }

    // -----------------------------------------------------------------------
    // Comic links
    // -----------------------------------------------------------------------

    pub async fn add_comic_link(
        &self,
        auth: &impl Authorizer,
        input: &CreateComicLink,
    ) -> ServiceResult<ComicLink> {
        require_write(auth, "add comic link")?;
        input.validate()?;

        let row = ComicLinkRepo::create(&self.pool, input).await?;
        tracing::info!(comic_id = row.comic_id, link_id = row.link_id, "Comic link added");
        Ok(row)
    }

    pub async fn get_comic_link_by_sid(&self, sid: &ComicLinkSid) -> ServiceResult<ComicLink> {
        Ok(ComicLinkRepo::find(&self.pool, sid).await?)
    }

    pub async fn update_comic_link_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &ComicLinkSid,
        input: &UpdateComicLink,
    ) -> ServiceResult<ComicLink> {
        require_write(auth, "update comic link")?;
        input.validate()?;

        let row = ComicLinkRepo::update(&self.pool, sid, input).await?;
        tracing::info!(comic_id = row.comic_id, link_id = row.link_id, "Comic link updated");
        Ok(row)
    }

    pub async fn delete_comic_link_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &ComicLinkSid,
    ) -> ServiceResult<()> {
        require_write(auth, "delete comic link")?;

        let deleted = ComicLinkRepo::delete(&self.pool, sid).await?;
        tracing::info!(deleted, "Comic link deleted");
        Ok(())
    }

    /// Link pairings of one comic.
    pub async fn list_comic_links(
        &self,
        code: &str,
        request: ListRequest,
    ) -> ServiceResult<Vec<ComicLink>> {
        let params = request.into_params(&COMIC_LINK_LIST, of_comic(code));
        Ok(ComicLinkRepo::list(&self.pool, &params).await?)
    }

    pub async fn count_comic_links(&self, code: &str) -> ServiceResult<i64> {
        Ok(ComicLinkRepo::count(&self.pool, &of_comic(code)).await?)
    }
}

fn of_comic(code: &str) -> Condition {
    Condition::eq("comic_id", by_code(code).operand())
}

async fn links_by_comic(pool: &DbPool, comic_ids: &[DbId]) -> ServiceResult<Vec<Vec<Link>>> {
    let params = ListParams::unbounded(Condition::any_of("comic_id", comic_ids.iter().copied()));
    let pairs: Vec<(DbId, DbId)> = ComicLinkRepo::list(pool, &params)
        .await?
        .iter()
        .map(|row| (row.comic_id, row.link_id))
        .collect();
    links_by_owner(pool, comic_ids, &pairs).await
}

/// Fill `links` and `chapters` on every comic.
async fn attach_comic_children(pool: &DbPool, comics: &mut [Comic]) -> ServiceResult<()> {
    let comic_ids: Vec<DbId> = comics.iter().map(|c| c.id).collect();
    if comic_ids.is_empty() {
        return Ok(());
    }

    let (links, chapters) = tokio::try_join!(
        links_by_comic(pool, &comic_ids),
        chapters_by_comic(pool, &comic_ids)
    )?;

    for ((comic, links), chapters) in comics.iter_mut().zip(links).zip(chapters) {
        comic.links = links;
        comic.chapters = chapters;
    }
    Ok(())
}
