//! Comic chapter and chapter link operations.

use comicat_core::auth::{require_write, Authorizer};
use comicat_core::listing::{COMIC_CHAPTER_LINK_LIST, COMIC_CHAPTER_LIST};
use comicat_core::types::DbId;
use comicat_db::generic::ListParams;
use comicat_db::models::chapter::{
    ChapterRef, ChapterSid, ComicChapter, ComicChapterLink, ComicChapterLinkSid,
    CreateComicChapter, CreateComicChapterLink, UpdateComicChapter, UpdateComicChapterLink,
};
use comicat_db::models::comic::ComicRef;
use comicat_db::query::Condition;
use comicat_db::repositories::{ComicChapterLinkRepo, ComicChapterRepo};
use comicat_db::DbPool;

use crate::error::ServiceResult;
use crate::fanout::group_by_owner;
use crate::link::links_by_owner;
use crate::{CatalogService, ListRequest};

impl CatalogService {
    // -----------------------------------------------------------------------
    // Chapters
    // -----------------------------------------------------------------------

    pub async fn add_comic_chapter(
        &self,
        auth: &impl Authorizer,
        input: &CreateComicChapter,
    ) -> ServiceResult<ComicChapter> {
        require_write(auth, "add comic chapter")?;
        input.validate()?;

        let chapter = ComicChapterRepo::create(&self.pool, input).await?;
        tracing::info!(
            id = chapter.id,
            comic_code = %chapter.comic_code,
            chapter = %chapter.chapter,
            "Comic chapter added"
        );
        self.with_chapter_links(chapter).await
    }

    pub async fn get_comic_chapter_by_sid(&self, sid: &ChapterSid) -> ServiceResult<ComicChapter> {
        let chapter = ComicChapterRepo::find(&self.pool, &ChapterRef::Sid(sid.clone())).await?;
        self.with_chapter_links(chapter).await
    }

    pub async fn update_comic_chapter_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &ChapterSid,
        input: &UpdateComicChapter,
    ) -> ServiceResult<ComicChapter> {
        require_write(auth, "update comic chapter")?;
        input.validate()?;

        let chapter =
            ComicChapterRepo::update(&self.pool, &ChapterRef::Sid(sid.clone()), input).await?;
        tracing::info!(id = chapter.id, "Comic chapter updated");
        self.with_chapter_links(chapter).await
    }

    pub async fn delete_comic_chapter_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &ChapterSid,
    ) -> ServiceResult<()> {
        require_write(auth, "delete comic chapter")?;

        let deleted = ComicChapterRepo::delete(&self.pool, &ChapterRef::Sid(sid.clone())).await?;
        tracing::info!(chapter = %sid.chapter, deleted, "Comic chapter deleted");
        Ok(())
    }

    /// Chapters of one comic.
    pub async fn list_comic_chapters(
        &self,
        code: &str,
        request: ListRequest,
    ) -> ServiceResult<Vec<ComicChapter>> {
        let params = request.into_params(&COMIC_CHAPTER_LIST, of_comic(code));
        let mut chapters = ComicChapterRepo::list(&self.pool, &params).await?;
        attach_chapter_links(&self.pool, &mut chapters).await?;
        Ok(chapters)
    }

    pub async fn count_comic_chapters(&self, code: &str) -> ServiceResult<i64> {
        Ok(ComicChapterRepo::count(&self.pool, &of_comic(code)).await?)
    }

    pub async fn comic_chapter_exists(&self, sid: &ChapterSid) -> ServiceResult<bool> {
        Ok(ComicChapterRepo::exists(&self.pool, &ChapterRef::Sid(sid.clone())).await?)
    }

    async fn with_chapter_links(&self, chapter: ComicChapter) -> ServiceResult<ComicChapter> {
        let mut chapters = [chapter];
        attach_chapter_links(&self.pool, &mut chapters).await?;
        let [chapter] = chapters;
        Ok(chapter)
    }

    // -----------------------------------------------------------------------
    // Chapter links
    // -----------------------------------------------------------------------

    pub async fn add_comic_chapter_link(
        &self,
        auth: &impl Authorizer,
        input: &CreateComicChapterLink,
    ) -> ServiceResult<ComicChapterLink> {
        require_write(auth, "add comic chapter link")?;
        input.validate()?;

        let row = ComicChapterLinkRepo::create(&self.pool, input).await?;
        tracing::info!(
            chapter_id = row.chapter_id,
            link_id = row.link_id,
            "Comic chapter link added"
        );
        Ok(row)
    }

    pub async fn get_comic_chapter_link_by_sid(
        &self,
        sid: &ComicChapterLinkSid,
    ) -> ServiceResult<ComicChapterLink> {
        Ok(ComicChapterLinkRepo::find(&self.pool, sid).await?)
    }

    pub async fn update_comic_chapter_link_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &ComicChapterLinkSid,
        input: &UpdateComicChapterLink,
    ) -> ServiceResult<ComicChapterLink> {
        require_write(auth, "update comic chapter link")?;
        input.validate()?;

        let row = ComicChapterLinkRepo::update(&self.pool, sid, input).await?;
        tracing::info!(
            chapter_id = row.chapter_id,
            link_id = row.link_id,
            "Comic chapter link updated"
        );
        Ok(row)
    }

    pub async fn delete_comic_chapter_link_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &ComicChapterLinkSid,
    ) -> ServiceResult<()> {
        require_write(auth, "delete comic chapter link")?;

        let deleted = ComicChapterLinkRepo::delete(&self.pool, sid).await?;
        tracing::info!(deleted, "Comic chapter link deleted");
        Ok(())
    }

    /// Links of one chapter.
    pub async fn list_comic_chapter_links(
        &self,
        chapter: &ChapterSid,
        request: ListRequest,
    ) -> ServiceResult<Vec<ComicChapterLink>> {
        let params = request.into_params(&COMIC_CHAPTER_LINK_LIST, of_chapter(chapter));
        Ok(ComicChapterLinkRepo::list(&self.pool, &params).await?)
    }

    pub async fn count_comic_chapter_links(&self, chapter: &ChapterSid) -> ServiceResult<i64> {
        Ok(ComicChapterLinkRepo::count(&self.pool, &of_chapter(chapter)).await?)
    }
}

fn of_comic(code: &str) -> Condition {
    Condition::eq("comic_id", ComicRef::Code(code.to_string()).operand())
}

fn of_chapter(chapter: &ChapterSid) -> Condition {
    Condition::eq("chapter_id", ChapterRef::Sid(chapter.clone()).operand())
}

/// Fill `links` on every chapter with batched queries.
pub(crate) async fn attach_chapter_links(
    pool: &DbPool,
    chapters: &mut [ComicChapter],
) -> ServiceResult<()> {
    let owner_ids: Vec<DbId> = chapters.iter().map(|c| c.id).collect();
    if owner_ids.is_empty() {
        return Ok(());
    }

    let params = ListParams::unbounded(Condition::any_of("chapter_id", owner_ids.iter().copied()));
    let pairs: Vec<(DbId, DbId)> = ComicChapterLinkRepo::list(pool, &params)
        .await?
        .iter()
        .map(|row| (row.chapter_id, row.link_id))
        .collect();

    let grouped = links_by_owner(pool, &owner_ids, &pairs).await?;
    for (chapter, links) in chapters.iter_mut().zip(grouped) {
        chapter.links = links;
    }
    Ok(())
}

/// Chapters of each comic in `comic_ids`, in release order, with their links.
pub(crate) async fn chapters_by_comic(
    pool: &DbPool,
    comic_ids: &[DbId],
) -> ServiceResult<Vec<Vec<ComicChapter>>> {
    if comic_ids.is_empty() {
        return Ok(Vec::new());
    }

    let params = ListParams::unbounded(Condition::any_of("comic_id", comic_ids.iter().copied()));
    let mut chapters = ComicChapterRepo::list(pool, &params).await?;
    attach_chapter_links(pool, &mut chapters).await?;

    let pairs: Vec<(DbId, DbId)> = chapters.iter().map(|c| (c.comic_id, c.id)).collect();
    Ok(group_by_owner(comic_ids, &pairs, &chapters, |c| c.id))
}
