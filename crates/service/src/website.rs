//! Website and website translation-language operations.

use comicat_core::auth::{require_write, Authorizer};
use comicat_core::listing::{WEBSITE_LIST, WEBSITE_TL_LANGUAGE_LIST};
use comicat_core::types::DbId;
use comicat_db::generic::ListParams;
use comicat_db::models::website::{
    CreateWebsite, CreateWebsiteTlLanguage, UpdateWebsite, UpdateWebsiteTlLanguage, Website,
    WebsiteRef, WebsiteTlLanguage, WebsiteTlLanguageSid,
};
use comicat_db::query::Condition;
use comicat_db::repositories::{WebsiteRepo, WebsiteTlLanguageRepo};
use comicat_db::DbPool;

use crate::error::ServiceResult;
use crate::fanout::{distinct_ids, group_by_owner};
use crate::language::languages_by_ids;
use crate::{CatalogService, ListRequest};

fn by_domain(domain: &str) -> WebsiteRef {
    WebsiteRef::Domain(domain.to_string())
}

impl CatalogService {
    // -----------------------------------------------------------------------
    // Websites
    // -----------------------------------------------------------------------

    pub async fn add_website(
        &self,
        auth: &impl Authorizer,
        input: &CreateWebsite,
    ) -> ServiceResult<Website> {
        require_write(auth, "add website")?;
        input.validate()?;

        let website = WebsiteRepo::create(&self.pool, input).await?;
        tracing::info!(id = website.id, domain = %website.domain, "Website added");
        self.with_tl_languages(website).await
    }

    pub async fn get_website_by_domain(&self, domain: &str) -> ServiceResult<Website> {
        let website = WebsiteRepo::find(&self.pool, &by_domain(domain)).await?;
        self.with_tl_languages(website).await
    }

    pub async fn update_website_by_domain(
        &self,
        auth: &impl Authorizer,
        domain: &str,
        input: &UpdateWebsite,
    ) -> ServiceResult<Website> {
        require_write(auth, "update website")?;
        input.validate()?;

        let website = WebsiteRepo::update(&self.pool, &by_domain(domain), input).await?;
        tracing::info!(id = website.id, "Website updated");
        self.with_tl_languages(website).await
    }

    /// Removes the website's links along with it.
    pub async fn delete_website_by_domain(
        &self,
        auth: &impl Authorizer,
        domain: &str,
    ) -> ServiceResult<()> {
        require_write(auth, "delete website")?;

        let deleted = WebsiteRepo::delete(&self.pool, &by_domain(domain)).await?;
        tracing::info!(domain, deleted, "Website deleted");
        Ok(())
    }

    pub async fn list_websites(&self, request: ListRequest) -> ServiceResult<Vec<Website>> {
        let params = request.into_params(&WEBSITE_LIST, Condition::Empty);
        let mut websites = WebsiteRepo::list(&self.pool, &params).await?;
        attach_tl_languages(&self.pool, &mut websites).await?;
        Ok(websites)
    }

    pub async fn count_websites(&self) -> ServiceResult<i64> {
        Ok(WebsiteRepo::count(&self.pool, &Condition::Empty).await?)
    }

    pub async fn website_exists(&self, domain: &str) -> ServiceResult<bool> {
        Ok(WebsiteRepo::exists(&self.pool, &by_domain(domain)).await?)
    }

    async fn with_tl_languages(&self, website: Website) -> ServiceResult<Website> {
        let mut websites = [website];
        attach_tl_languages(&self.pool, &mut websites).await?;
        let [website] = websites;
        Ok(website)
    }

    // -----------------------------------------------------------------------
    // Website translation languages
    // -----------------------------------------------------------------------

    pub async fn add_website_tl_language(
        &self,
        auth: &impl Authorizer,
        input: &CreateWebsiteTlLanguage,
    ) -> ServiceResult<WebsiteTlLanguage> {
        require_write(auth, "add website tl language")?;
        input.validate()?;

        let row = WebsiteTlLanguageRepo::create(&self.pool, input).await?;
        tracing::info!(
            website_id = row.website_id,
            language_id = row.language_id,
            "Website tl language added"
        );
        Ok(row)
    }

    pub async fn get_website_tl_language_by_sid(
        &self,
        sid: &WebsiteTlLanguageSid,
    ) -> ServiceResult<WebsiteTlLanguage> {
        Ok(WebsiteTlLanguageRepo::find(&self.pool, sid).await?)
    }

    pub async fn update_website_tl_language_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &WebsiteTlLanguageSid,
        input: &UpdateWebsiteTlLanguage,
    ) -> ServiceResult<WebsiteTlLanguage> {
        require_write(auth, "update website tl language")?;
        input.validate()?;

        let row = WebsiteTlLanguageRepo::update(&self.pool, sid, input).await?;
        tracing::info!(
            website_id = row.website_id,
            language_id = row.language_id,
            "Website tl language updated"
        );
        Ok(row)
    }

    pub async fn delete_website_tl_language_by_sid(
        &self,
        auth: &impl Authorizer,
        sid: &WebsiteTlLanguageSid,
    ) -> ServiceResult<()> {
        require_write(auth, "delete website tl language")?;

        let deleted = WebsiteTlLanguageRepo::delete(&self.pool, sid).await?;
        tracing::info!(deleted, "Website tl language deleted");
        Ok(())
    }

    /// Translation languages of one website.
    pub async fn list_website_tl_languages(
        &self,
        domain: &str,
        request: ListRequest,
    ) -> ServiceResult<Vec<WebsiteTlLanguage>> {
        let params = request.into_params(&WEBSITE_TL_LANGUAGE_LIST, of_website(domain));
        Ok(WebsiteTlLanguageRepo::list(&self.pool, &params).await?)
    }

    pub async fn count_website_tl_languages(&self, domain: &str) -> ServiceResult<i64> {
        Ok(WebsiteTlLanguageRepo::count(&self.pool, &of_website(domain)).await?)
    }
}

fn of_website(domain: &str) -> Condition {
    Condition::eq("website_id", by_domain(domain).operand())
}

/// Fill `tl_languages` on every website with two batched queries.
pub(crate) async fn attach_tl_languages(pool: &DbPool, websites: &mut [Website]) -> ServiceResult<()> {
    let owner_ids: Vec<DbId> = websites.iter().map(|w| w.id).collect();
    if owner_ids.is_empty() {
        return Ok(());
    }

    let params = ListParams::unbounded(Condition::any_of("website_id", owner_ids.iter().copied()));
    let pairs: Vec<(DbId, DbId)> = WebsiteTlLanguageRepo::list(pool, &params)
        .await?
        .iter()
        .map(|row| (row.website_id, row.language_id))
        .collect();
    let languages = languages_by_ids(pool, &distinct_ids(&pairs)).await?;

    let grouped = group_by_owner(&owner_ids, &pairs, &languages, |l| l.id);
    for (website, tl_languages) in websites.iter_mut().zip(grouped) {
        website.tl_languages = tl_languages;
    }
    Ok(())
}
