//! Language operations.

use comicat_core::auth::{require_write, Authorizer};
use comicat_core::listing::LANGUAGE_LIST;
use comicat_core::types::DbId;
use comicat_db::generic::ListParams;
use comicat_db::models::language::{CreateLanguage, Language, LanguageRef, UpdateLanguage};
use comicat_db::query::Condition;
use comicat_db::repositories::LanguageRepo;
use comicat_db::DbPool;

use crate::error::ServiceResult;
use crate::{CatalogService, ListRequest};

impl CatalogService {
    pub async fn add_language(
        &self,
        auth: &impl Authorizer,
        input: &CreateLanguage,
    ) -> ServiceResult<Language> {
        require_write(auth, "add language")?;
        input.validate()?;

        let language = LanguageRepo::create(&self.pool, input).await?;
        tracing::info!(id = language.id, ietf = %language.ietf, "Language added");
        Ok(language)
    }

    pub async fn get_language_by_id(&self, id: DbId) -> ServiceResult<Language> {
        Ok(LanguageRepo::find(&self.pool, &LanguageRef::Id(id)).await?)
    }

    pub async fn get_language_by_ietf(&self, ietf: &str) -> ServiceResult<Language> {
        Ok(LanguageRepo::find(&self.pool, &LanguageRef::Ietf(ietf.to_string())).await?)
    }

    pub async fn update_language_by_ietf(
        &self,
        auth: &impl Authorizer,
        ietf: &str,
        input: &UpdateLanguage,
    ) -> ServiceResult<Language> {
        require_write(auth, "update language")?;
        input.validate()?;

        let language =
            LanguageRepo::update(&self.pool, &LanguageRef::Ietf(ietf.to_string()), input).await?;
        tracing::info!(id = language.id, "Language updated");
        Ok(language)
    }

    /// Fails with a business rule error while the language is referenced.
    pub async fn delete_language_by_ietf(
        &self,
        auth: &impl Authorizer,
        ietf: &str,
    ) -> ServiceResult<()> {
        require_write(auth, "delete language")?;

        let deleted = LanguageRepo::delete(&self.pool, &LanguageRef::Ietf(ietf.to_string())).await?;
        tracing::info!(ietf, deleted, "Language deleted");
        Ok(())
    }

    pub async fn list_languages(&self, request: ListRequest) -> ServiceResult<Vec<Language>> {
        let params = request.into_params(&LANGUAGE_LIST, Condition::Empty);
        Ok(LanguageRepo::list(&self.pool, &params).await?)
    }

    pub async fn count_languages(&self) -> ServiceResult<i64> {
        Ok(LanguageRepo::count(&self.pool, &Condition::Empty).await?)
    }
}

/// Load the languages with the given ids in one query.
pub(crate) async fn languages_by_ids(pool: &DbPool, ids: &[DbId]) -> ServiceResult<Vec<Language>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let params = ListParams::unbounded(Condition::any_of("id", ids.iter().copied()));
    Ok(LanguageRepo::list(pool, &params).await?)
}
