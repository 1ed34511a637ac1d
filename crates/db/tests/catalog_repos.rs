//! Integration tests for the catalog repositories.
//!
//! Exercises the repository layer against a real database:
//! - Create / find / update / delete through id and natural-key selectors
//! - Joined display fields on entities and junctions
//! - Constraint translation into domain messages
//! - Update guards (empty update, unchanged values, set null)
//! - Listing, counting and existence checks

use assert_matches::assert_matches;
use comicat_core::listing::{OrderBy, Pagination};
use comicat_db::error::{ConstraintKind, DbError};
use comicat_db::generic::ListParams;
use comicat_db::models::chapter::{ChapterRef, ChapterSid, CreateComicChapter, UpdateComicChapter};
use comicat_db::models::comic::{ComicLinkSid, ComicRef, CreateComic, CreateComicLink};
use comicat_db::models::language::{CreateLanguage, LanguageRef, UpdateLanguage};
use comicat_db::models::link::{CreateLink, CreateLinkTlLanguage, LinkRef, LinkSid};
use comicat_db::models::website::{
    CreateWebsite, CreateWebsiteTlLanguage, UpdateWebsite, WebsiteRef,
};
use comicat_db::query::Condition;
use comicat_db::repositories::{
    ComicChapterRepo, ComicLinkRepo, ComicRepo, LanguageRepo, LinkRepo, LinkTlLanguageRepo,
    WebsiteRepo, WebsiteTlLanguageRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_language(ietf: &str, name: &str) -> CreateLanguage {
    CreateLanguage {
        ietf: ietf.to_string(),
        name: name.to_string(),
    }
}

fn new_website(domain: &str) -> CreateWebsite {
    CreateWebsite {
        domain: domain.to_string(),
        name: "Example".to_string(),
        machine_tl: None,
    }
}

fn new_link(domain: &str, relative_url: &str) -> CreateLink {
    CreateLink {
        website: Some(WebsiteRef::Domain(domain.to_string())),
        relative_url: relative_url.to_string(),
        machine_tl: None,
    }
}

fn link_sid(domain: &str, relative_url: &str) -> LinkRef {
    LinkRef::Sid(LinkSid::new(WebsiteRef::Domain(domain.to_string()), relative_url))
}

fn comic(code: &str) -> ComicRef {
    ComicRef::Code(code.to_string())
}

fn new_chapter(code: &str, chapter: &str, version: Option<&str>) -> CreateComicChapter {
    CreateComicChapter {
        comic: Some(comic(code)),
        chapter: chapter.to_string(),
        version: version.map(str::to_string),
        released_at: None,
    }
}

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_language_crud(pool: PgPool) {
    let created = LanguageRepo::create(&pool, &new_language("en", "English"))
        .await
        .unwrap();
    assert_eq!(created.ietf, "en");
    assert!(created.updated_at.is_none());

    let by_ietf = LanguageRepo::find(&pool, &LanguageRef::Ietf("en".into()))
        .await
        .unwrap();
    let by_id = LanguageRepo::find(&pool, &LanguageRef::Id(created.id))
        .await
        .unwrap();
    assert_eq!(by_ietf, created);
    assert_eq!(by_id, created);

    let input = UpdateLanguage {
        name: Some("British English".into()),
        ..UpdateLanguage::default()
    };
    let updated = LanguageRepo::update(&pool, &LanguageRef::Ietf("en".into()), &input)
        .await
        .unwrap();
    assert_eq!(updated.name, "British English");
    assert!(updated.updated_at.is_some());

    assert!(LanguageRepo::delete(&pool, &LanguageRef::Id(created.id)).await.unwrap());
    assert!(!LanguageRepo::delete(&pool, &LanguageRef::Id(created.id)).await.unwrap());
    assert_matches!(
        LanguageRepo::find(&pool, &LanguageRef::Id(created.id)).await,
        Err(DbError::NotFound { entity: "language" })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_ietf_is_rule_error(pool: PgPool) {
    LanguageRepo::create(&pool, &new_language("ja", "Japanese"))
        .await
        .unwrap();
    let err = LanguageRepo::create(&pool, &new_language("ja", "Nihongo"))
        .await
        .unwrap_err();
    assert_matches!(err, DbError::Rule("same ietf already exists"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_violation_stays_a_constraint(pool: PgPool) {
    let err = LanguageRepo::create(&pool, &new_language("", "Empty"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        DbError::Constraint { kind: ConstraintKind::Check, ref constraint, .. }
            if constraint == "ck_languages_ietf"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_update_returns_current_row(pool: PgPool) {
    let created = LanguageRepo::create(&pool, &new_language("fr", "French"))
        .await
        .unwrap();
    let same = LanguageRepo::update(&pool, &LanguageRef::Ietf("fr".into()), &UpdateLanguage::default())
        .await
        .unwrap();
    assert_eq!(same, created);
    assert!(same.updated_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unchanged_update_reports_not_found(pool: PgPool) {
    LanguageRepo::create(&pool, &new_language("de", "German"))
        .await
        .unwrap();
    let input = UpdateLanguage {
        name: Some("German".into()),
        ..UpdateLanguage::default()
    };
    assert_matches!(
        LanguageRepo::update(&pool, &LanguageRef::Ietf("de".into()), &input).await,
        Err(DbError::NotFound { entity: "language" })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_language_in_use_cannot_be_deleted(pool: PgPool) {
    LanguageRepo::create(&pool, &new_language("en", "English"))
        .await
        .unwrap();
    WebsiteRepo::create(&pool, &new_website("example.com"))
        .await
        .unwrap();
    WebsiteTlLanguageRepo::create(
        &pool,
        &CreateWebsiteTlLanguage {
            website: Some(WebsiteRef::Domain("example.com".into())),
            language: Some(LanguageRef::Ietf("en".into())),
        },
    )
    .await
    .unwrap();

    assert_matches!(
        LanguageRepo::delete(&pool, &LanguageRef::Ietf("en".into())).await,
        Err(DbError::Rule("language is still in use"))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_and_paginates(pool: PgPool) {
    for (ietf, name) in [("de", "German"), ("en", "English"), ("fr", "French")] {
        LanguageRepo::create(&pool, &new_language(ietf, name))
            .await
            .unwrap();
    }

    let default_order = LanguageRepo::list(&pool, &ListParams::default()).await.unwrap();
    let tags: Vec<&str> = default_order.iter().map(|l| l.ietf.as_str()).collect();
    assert_eq!(tags, ["de", "en", "fr"]);

    let params = ListParams {
        conditions: Condition::Empty,
        order_bys: vec![OrderBy::desc("ietf")],
        pagination: Some(Pagination::new(2, 2)),
    };
    let page = LanguageRepo::list(&pool, &params).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].ietf, "de");

    assert_eq!(LanguageRepo::count(&pool, &Condition::Empty).await.unwrap(), 3);
    assert_eq!(
        LanguageRepo::count(&pool, &Condition::any_of("ietf", ["en", "fr"]))
            .await
            .unwrap(),
        2
    );
}

// ---------------------------------------------------------------------------
// Websites and links
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_website_set_null_clears_machine_tl(pool: PgPool) {
    let mut input = new_website("example.com");
    input.machine_tl = Some(true);
    let created = WebsiteRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.machine_tl, Some(true));
    assert!(created.tl_languages.is_empty());

    let update = UpdateWebsite {
        machine_tl: Some(false),
        set_null: vec!["machine_tl".into()],
        ..UpdateWebsite::default()
    };
    let updated = WebsiteRepo::update(&pool, &WebsiteRef::Domain("example.com".into()), &update)
        .await
        .unwrap();
    assert_eq!(updated.machine_tl, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_scenario(pool: PgPool) {
    let website = WebsiteRepo::create(&pool, &new_website("example.com"))
        .await
        .unwrap();

    let link = LinkRepo::create(&pool, &new_link("example.com", "/a"))
        .await
        .unwrap();
    assert_eq!(link.website_id, website.id);
    assert_eq!(link.website_domain, "example.com");
    assert!(link.tl_languages.is_empty());

    let found = LinkRepo::find(&pool, &link_sid("example.com", "/a")).await.unwrap();
    assert_eq!(found, link);
    assert!(LinkRepo::exists(&pool, &LinkRef::Id(link.id)).await.unwrap());

    assert_matches!(
        LinkRepo::create(&pool, &new_link("example.com", "/a")).await,
        Err(DbError::Rule("same website id + path already exists"))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_on_unknown_website(pool: PgPool) {
    assert_matches!(
        LinkRepo::create(&pool, &new_link("missing.example", "/a")).await,
        Err(DbError::Rule("website does not exist"))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_website_cascades_to_links(pool: PgPool) {
    WebsiteRepo::create(&pool, &new_website("example.com"))
        .await
        .unwrap();
    LinkRepo::create(&pool, &new_link("example.com", "/a"))
        .await
        .unwrap();

    let deleted = WebsiteRepo::delete_returning(&pool, &WebsiteRef::Domain("example.com".into()))
        .await
        .unwrap();
    assert_eq!(deleted.domain, "example.com");
    assert_eq!(LinkRepo::count(&pool, &Condition::Empty).await.unwrap(), 0);
    assert!(!WebsiteRepo::exists(&pool, &WebsiteRef::Domain("example.com".into()))
        .await
        .unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tl_language_junctions_expose_ietf(pool: PgPool) {
    let language = LanguageRepo::create(&pool, &new_language("en", "English"))
        .await
        .unwrap();
    WebsiteRepo::create(&pool, &new_website("example.com"))
        .await
        .unwrap();
    let link = LinkRepo::create(&pool, &new_link("example.com", "/a"))
        .await
        .unwrap();

    let row = LinkTlLanguageRepo::create(
        &pool,
        &CreateLinkTlLanguage {
            link: Some(link_sid("example.com", "/a")),
            language: Some(LanguageRef::Ietf("en".into())),
        },
    )
    .await
    .unwrap();
    assert_eq!(row.link_id, link.id);
    assert_eq!(row.language_id, language.id);
    assert_eq!(row.language_ietf, "en");

    assert_matches!(
        LinkTlLanguageRepo::create(
            &pool,
            &CreateLinkTlLanguage {
                link: Some(LinkRef::Id(link.id)),
                language: Some(LanguageRef::Ietf("en".into())),
            },
        )
        .await,
        Err(DbError::Rule("same language id already exists"))
    );
    assert_matches!(
        LinkTlLanguageRepo::create(
            &pool,
            &CreateLinkTlLanguage {
                link: Some(LinkRef::Id(link.id)),
                language: Some(LanguageRef::Ietf("xx".into())),
            },
        )
        .await,
        Err(DbError::Rule("language does not exist"))
    );
}

// ---------------------------------------------------------------------------
// Comics and chapters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comic_link_exposes_link_key(pool: PgPool) {
    ComicRepo::create(&pool, &CreateComic { code: "ABCD1234".into() })
        .await
        .unwrap();
    WebsiteRepo::create(&pool, &new_website("example.com"))
        .await
        .unwrap();
    LinkRepo::create(&pool, &new_link("example.com", "/series/1"))
        .await
        .unwrap();

    let row = ComicLinkRepo::create(
        &pool,
        &CreateComicLink {
            comic: Some(comic("ABCD1234")),
            link: Some(link_sid("example.com", "/series/1")),
        },
    )
    .await
    .unwrap();
    assert_eq!(row.link_website_domain, "example.com");
    assert_eq!(row.link_relative_url, "/series/1");

    let sid = ComicLinkSid {
        comic: comic("ABCD1234"),
        link: link_sid("example.com", "/series/1"),
    };
    assert_eq!(ComicLinkRepo::find(&pool, &sid).await.unwrap(), row);
    assert!(ComicLinkRepo::delete(&pool, &sid).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_unversioned_chapters_collide(pool: PgPool) {
    ComicRepo::create(&pool, &CreateComic { code: "ABCD1234".into() })
        .await
        .unwrap();
    let chapter = ComicChapterRepo::create(&pool, &new_chapter("ABCD1234", "1", None))
        .await
        .unwrap();
    assert_eq!(chapter.comic_code, "ABCD1234");
    assert_eq!(chapter.version, None);

    assert_matches!(
        ComicChapterRepo::create(&pool, &new_chapter("ABCD1234", "1", None)).await,
        Err(DbError::Rule("same comic id + chapter + version already exists"))
    );
    ComicChapterRepo::create(&pool, &new_chapter("ABCD1234", "1", Some("raw")))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chapter_sid_matches_missing_version(pool: PgPool) {
    ComicRepo::create(&pool, &CreateComic { code: "ABCD1234".into() })
        .await
        .unwrap();
    let plain = ComicChapterRepo::create(&pool, &new_chapter("ABCD1234", "2", None))
        .await
        .unwrap();
    let raw = ComicChapterRepo::create(&pool, &new_chapter("ABCD1234", "2", Some("raw")))
        .await
        .unwrap();

    let unversioned = ChapterRef::Sid(ChapterSid::new(comic("ABCD1234"), "2", None));
    let versioned = ChapterRef::Sid(ChapterSid::new(comic("ABCD1234"), "2", Some("raw".into())));
    assert_eq!(ComicChapterRepo::find(&pool, &unversioned).await.unwrap().id, plain.id);
    assert_eq!(ComicChapterRepo::find(&pool, &versioned).await.unwrap().id, raw.id);

    let update = UpdateComicChapter {
        set_null: vec!["version".into()],
        ..UpdateComicChapter::default()
    };
    assert_matches!(
        ComicChapterRepo::update(&pool, &versioned, &update).await,
        Err(DbError::Rule("same comic id + chapter + version already exists"))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_chapter_on_unknown_comic(pool: PgPool) {
    assert_matches!(
        ComicChapterRepo::create(&pool, &new_chapter("ZZZZ9999", "1", None)).await,
        Err(DbError::Rule("comic does not exist"))
    );
}
