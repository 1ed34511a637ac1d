//! Link and link translation-language operations.

use comicat_core::auth::{require_write, Authorizer};
use comicat_core::listing::{LINK_LIST, LINK_TL_LANGUAGE_LIST};
use comicat_core::types::DbId;
use comicat_db::generic::ListParams;
use comicat_db::models::link::{
    CreateLink, CreateLinkTlLanguage, Link, LinkRef, LinkSid, LinkTlLanguage, LinkTlLanguageSid,
    UpdateLink, UpdateLinkTlLanguage,
};
use comicat_db::query::Condition;
use comicat_db::repositories::{LinkRepo, LinkTlLanguageRepo};
use comicat_db::DbPool;

use crate::error::ServiceResult;
use crate::fanout::{distinct_ids, group_by_owner};
use crate::language::languages_by_ids;
use crate::{CatalogService, ListRequest};

impl CatalogService {
    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    pub async fn add_link(&self, auth: &impl Authorizer, input: &CreateLink) -> ServiceResult<Link> {
        require_write(auth, "add link")?;
        input.validate()?;

        let link = LinkRepo::create(&self.pool, input).await?;
        tracing::info!(
            id = link.id,
            domain = %link.website_domain,
            relative_url = %link.relative_url,
            "Link added"
        );
        self.with_link_tl_languages(link).await
    }

    pub async fn get_link_by_sid(&self, sid: &LinkSid) -> ServiceResult<Link> {
        let link = LinkRepo::find(&self.pool, &LinkRef::Sid(sid.clone())).await?;
        self.with_link_tl_languages(link).await
    }

    pub async fn update_link_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &LinkSid,
        input: &UpdateLink,
    ) -> ServiceResult<Link> {
        require_write(auth, "update link")?;
        input.validate()?;

        let link = LinkRepo::update(&self.pool, &LinkRef::Sid(sid.clone()), input).await?;
        tracing::info!(id = link.id, "Link updated");
        self.with_link_tl_languages(link).await
    }

    pub async fn delete_link_by_sid(&self, auth: &impl Authorizer, sid: &LinkSid) -> ServiceResult<()> {
        require_write(auth, "delete link")?;

        let deleted = LinkRepo::delete(&self.pool, &LinkRef::Sid(sid.clone())).await?;
        tracing::info!(relative_url = %sid.relative_url, deleted, "Link deleted");
        Ok(())
    }

    pub async fn list_links(&self, request: ListRequest) -> ServiceResult<Vec<Link>> {
        let params = request.into_params(&LINK_LIST, Condition::Empty);
        let mut links = LinkRepo::list(&self.pool, &params).await?;
        attach_link_tl_languages(&self.pool, &mut links).await?;
        Ok(links)
    }

    pub async fn count_links(&self) -> ServiceResult<i64> {
        Ok(LinkRepo::count(&self.pool, &Condition::Empty).await?)
    }

    pub async fn link_exists(&self, sid: &LinkSid) -> ServiceResult<bool> {
        Ok(LinkRepo::exists(&self.pool, &LinkRef::Sid(sid.clone())).await?)
    }

    async fn with_link_tl_languages(&self, link: Link) -> ServiceResult<Link> {
        let mut links = [link];
        attach_link_tl_languages(&self.pool, &mut links).await?;
        let [link] = links;
        Ok(link)
    }

    // -----------------------------------------------------------------------
    // Link translation languages
    // -----------------------------------------------------------------------

    pub async fn add_link_tl_language(
        &self,
        auth: &impl Authorizer,
        input: &CreateLinkTlLanguage,
    ) -> ServiceResult<LinkTlLanguage> {
        require_write(auth, "add link tl language")?;
        input.validate()?;

        let row = LinkTlLanguageRepo::create(&self.pool, input).await?;
        tracing::info!(
            link_id = row.link_id,
            language_id = row.language_id,
            "Link tl language added"
        );
        Ok(row)
    }

    pub async fn get_link_tl_language_by_sid(
        &self,
        sid: &LinkTlLanguageSid,
    ) -> ServiceResult<LinkTlLanguage> {
        Ok(LinkTlLanguageRepo::find(&self.pool, sid).await?)
    }

    pub async fn update_link_tl_language_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &LinkTlLanguageSid,
        input: &UpdateLinkTlLanguage,
    ) -> ServiceResult<LinkTlLanguage> {
        require_write(auth, "update link tl language")?;
        input.validate()?;

        let row = LinkTlLanguageRepo::update(&self.pool, sid, input).await?;
        tracing::info!(
            link_id = row.link_id,
            language_id = row.language_id,
            "Link tl language updated"
        );
        Ok(row)
    }

    pub async fn delete_link_tl_language_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &LinkTlLanguageSid,
    ) -> ServiceResult<()> {
        require_write(auth, "delete link tl language")?;

        let deleted = LinkTlLanguageRepo::delete(&self.pool, sid).await?;
        tracing::info!(deleted, "Link tl language deleted");
        Ok(())
    }

    pub async fn list_link_tl_languages(
        &self,
        link: &LinkSid,
        request: ListRequest,
    ) -> ServiceResult<Vec<LinkTlLanguage>> {
        let params = request.into_params(&LINK_TL_LANGUAGE_LIST, of_link(link));
        Ok(LinkTlLanguageRepo::list(&self.pool, &params).await?)
    }

    pub async fn count_link_tl_languages(&self, link: &LinkSid) -> ServiceResult<i64> {
        Ok(LinkTlLanguageRepo::count(&self.pool, &of_link(link)).await?)
    }
}

fn of_link(link: &LinkSid) -> Condition {
    Condition::eq("link_id", LinkRef::Sid(link.clone()).operand())
}

/// Fill `tl_languages` on every link with two batched queries.
pub(crate) async fn attach_link_tl_languages(pool: &DbPool, links: &mut [Link]) -> ServiceResult<()> {
    let owner_ids: Vec<DbId> = links.iter().map(|l| l.id).collect();
    if owner_ids.is_empty() {
        return Ok(());
    }

    let params = ListParams::unbounded(Condition::any_of("link_id", owner_ids.iter().copied()));
    let pairs: Vec<(DbId, DbId)> = LinkTlLanguageRepo::list(pool, &params)
        .await?
        .iter()
        .map(|row| (row.link_id, row.language_id))
        .collect();
    let languages = languages_by_ids(pool, &distinct_ids(&pairs)).await?;

    let grouped = group_by_owner(&owner_ids, &pairs, &languages, |l| l.id);
    for (link, tl_languages) in links.iter_mut().zip(grouped) {
        link.tl_languages = tl_languages;
    }
    Ok(())
}

/// Links referenced by a junction, each with its translation languages.
///
/// `pairs` are `(owner, link_id)` in junction order; the result has one
/// collection per owner in `owner_ids` order.
pub(crate) async fn links_by_owner(
    pool: &DbPool,
    owner_ids: &[DbId],
    pairs: &[(DbId, DbId)],
) -> ServiceResult<Vec<Vec<Link>>> {
    let link_ids = distinct_ids(pairs);
    let mut links = if link_ids.is_empty() {
        Vec::new()
    } else {
        let params = ListParams::unbounded(Condition::any_of("id", link_ids.iter().copied()));
        LinkRepo::list(pool, &params).await?
    };
    attach_link_tl_languages(pool, &mut links).await?;

    Ok(group_by_owner(owner_ids, pairs, &links, |l| l.id))
}
