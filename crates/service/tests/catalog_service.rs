//! Integration tests for the catalog service.
//!
//! Covers permission gating, validation ordering, constraint translation,
//! and nested collection assembly against a real database.

use assert_matches::assert_matches;
use comicat_core::auth::Authorizer;
use comicat_core::error::CoreError;
use comicat_core::listing::{OrderBy, Pagination};
use comicat_db::models::chapter::{
    ChapterRef, ChapterSid, CreateComicChapter, CreateComicChapterLink,
};
use comicat_db::models::comic::{ComicRef, CreateComic, CreateComicLink, UpdateComic};
use comicat_db::models::language::{CreateLanguage, LanguageRef};
use comicat_db::models::link::{CreateLink, CreateLinkTlLanguage, LinkRef, LinkSid};
use comicat_db::models::website::{CreateWebsite, UpdateWebsite, WebsiteRef};
use comicat_service::{CatalogService, ErrorKind, ListRequest, ServiceError};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Grant(bool);

impl Authorizer for Grant {
    fn has_permission(&self, permission: &str) -> bool {
        self.0 && permission == "comicat:write"
    }

    fn permission_key(&self, permission: &str) -> String {
        format!("comicat:{permission}")
    }
}

const ADMIN: Grant = Grant(true);
const ANONYMOUS: Grant = Grant(false);

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

fn sid(domain: &str, relative_url: &str) -> LinkSid {
    LinkSid::new(WebsiteRef::Domain(domain.to_string()), relative_url)
}

async fn add_comic(service: &CatalogService, code: &str) {
    service
        .add_comic(&ADMIN, &CreateComic { code: code.to_string() })
        .await
        .unwrap();
}

async fn pair_comic_link(service: &CatalogService, code: &str, relative_url: &str) {
    service
        .add_comic_link(
            &ADMIN,
            &CreateComicLink {
                comic: Some(ComicRef::Code(code.to_string())),
                link: Some(LinkRef::Sid(sid("example.com", relative_url))),
            },
        )
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Permissions and validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_permission_checked_before_validation(pool: PgPool) {
    let service = CatalogService::new(pool);

    let err = service
        .add_comic(&ANONYMOUS, &CreateComic { code: "short".into() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_matches!(
        err,
        ServiceError::Core(CoreError::Forbidden(msg)) if msg == "missing admin permission to add comic"
    );
    assert_eq!(service.count_comics().await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comic_code_rules(pool: PgPool) {
    let service = CatalogService::new(pool);

    let comic = service
        .add_comic(&ADMIN, &CreateComic { code: "ABCD1234".into() })
        .await
        .unwrap();
    assert!(comic.links.is_empty());
    assert!(comic.chapters.is_empty());

    let err = service
        .add_comic(&ADMIN, &CreateComic { code: "short".into() })
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::Validation(msg)) if msg == "code must be 8 characters long"
    );

    let err = service
        .add_comic(&ADMIN, &CreateComic { code: "ABCD1234".into() })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BusinessRule);
}

// ---------------------------------------------------------------------------
// Websites and links
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_scenario(pool: PgPool) {
    let service = CatalogService::new(pool);

    let website = service
        .add_website(&ADMIN, &new_website("example.com"))
        .await
        .unwrap();
    assert!(website.id > 0);

    let link = service
        .add_link(&ADMIN, &new_link("example.com", "/a"))
        .await
        .unwrap();
    assert_eq!(link.website_domain, "example.com");
    assert!(link.tl_languages.is_empty());

    let found = service.get_link_by_sid(&sid("example.com", "/a")).await.unwrap();
    assert_eq!(found, link);
    assert!(service.link_exists(&sid("example.com", "/a")).await.unwrap());

    let err = service
        .add_link(&ADMIN, &new_link("example.com", "/a"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::Core(CoreError::Conflict(msg)) if msg == "same website id + path already exists"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_update_is_noop(pool: PgPool) {
    let service = CatalogService::new(pool);
    let created = service
        .add_website(&ADMIN, &new_website("example.com"))
        .await
        .unwrap();

    let same = service
        .update_website_by_domain(&ADMIN, "example.com", &UpdateWebsite::default())
        .await
        .unwrap();
    assert_eq!(same.updated_at, created.updated_at);
    assert_eq!(same, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_succeeds(pool: PgPool) {
    let service = CatalogService::new(pool);
    service
        .delete_website_by_domain(&ADMIN, "missing.example")
        .await
        .unwrap();
    service.delete_comic_by_code(&ADMIN, "ABCD1234").await.unwrap();
    service.delete_language_by_ietf(&ADMIN, "xx").await.unwrap();
    assert!(!service.website_exists("missing.example").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_carries_tl_languages(pool: PgPool) {
    let service = CatalogService::new(pool);
    for (ietf, name) in [("en", "English"), ("ja", "Japanese")] {
        service
            .add_language(
                &ADMIN,
                &CreateLanguage {
                    ietf: ietf.into(),
                    name: name.into(),
                },
            )
            .await
            .unwrap();
    }
    service
        .add_website(&ADMIN, &new_website("example.com"))
        .await
        .unwrap();
    service
        .add_link(&ADMIN, &new_link("example.com", "/a"))
        .await
        .unwrap();
    for ietf in ["ja", "en"] {
        service
            .add_link_tl_language(
                &ADMIN,
                &CreateLinkTlLanguage {
                    link: Some(LinkRef::Sid(sid("example.com", "/a"))),
                    language: Some(LanguageRef::Ietf(ietf.into())),
                },
            )
            .await
            .unwrap();
    }

    let link = service.get_link_by_sid(&sid("example.com", "/a")).await.unwrap();
    let tags: Vec<&str> = link.tl_languages.iter().map(|l| l.ietf.as_str()).collect();
    assert_eq!(tags.len(), 2);
    assert!(tags.contains(&"en") && tags.contains(&"ja"));
    assert_eq!(
        service.count_link_tl_languages(&sid("example.com", "/a")).await.unwrap(),
        2
    );
}

// ---------------------------------------------------------------------------
// Comics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comic_list_fan_out_keeps_owner_order(pool: PgPool) {
    let service = CatalogService::new(pool);
    service
        .add_website(&ADMIN, &new_website("example.com"))
        .await
        .unwrap();
    for url in ["/1", "/2", "/3"] {
        service
            .add_link(&ADMIN, &new_link("example.com", url))
            .await
            .unwrap();
    }
    for code in ["AAAA0001", "BBBB0002", "CCCC0003"] {
        add_comic(&service, code).await;
    }
    pair_comic_link(&service, "AAAA0001", "/1").await;
    pair_comic_link(&service, "AAAA0001", "/2").await;
    pair_comic_link(&service, "CCCC0003", "/3").await;

    let comics = service.list_comics(ListRequest::default()).await.unwrap();
    let codes: Vec<&str> = comics.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["AAAA0001", "BBBB0002", "CCCC0003"]);
    let lengths: Vec<usize> = comics.iter().map(|c| c.links.len()).collect();
    assert_eq!(lengths, [2, 0, 1]);
    assert_eq!(comics[2].links[0].relative_url, "/3");
    assert!(comics.iter().all(|c| c.chapters.is_empty()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comic_nests_chapters_with_links(pool: PgPool) {
    let service = CatalogService::new(pool);
    service
        .add_website(&ADMIN, &new_website("example.com"))
        .await
        .unwrap();
    service
        .add_link(&ADMIN, &new_link("example.com", "/chapter-1"))
        .await
        .unwrap();
    add_comic(&service, "ABCD1234").await;

    let chapter = service
        .add_comic_chapter(
            &ADMIN,
            &CreateComicChapter {
                comic: Some(ComicRef::Code("ABCD1234".into())),
                chapter: "1".into(),
                version: None,
                released_at: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(chapter.comic_code, "ABCD1234");
    assert!(chapter.links.is_empty());

    let chapter_sid = ChapterSid::new(ComicRef::Code("ABCD1234".into()), "1", None);
    service
        .add_comic_chapter_link(
            &ADMIN,
            &CreateComicChapterLink {
                chapter: Some(ChapterRef::Sid(chapter_sid.clone())),
                link: Some(LinkRef::Sid(sid("example.com", "/chapter-1"))),
            },
        )
        .await
        .unwrap();

    let comic = service.get_comic_by_code("ABCD1234").await.unwrap();
    assert!(comic.links.is_empty());
    assert_eq!(comic.chapters.len(), 1);
    assert_eq!(comic.chapters[0].links.len(), 1);
    assert_eq!(comic.chapters[0].links[0].website_domain, "example.com");
    assert!(service.comic_chapter_exists(&chapter_sid).await.unwrap());

    let duplicate = service
        .add_comic_chapter(
            &ADMIN,
            &CreateComicChapter {
                comic: Some(ComicRef::Code("ABCD1234".into())),
                chapter: "1".into(),
                version: None,
                released_at: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(
        duplicate,
        ServiceError::Core(CoreError::Conflict(msg))
            if msg == "same comic id + chapter + version already exists"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_request_never_errors(pool: PgPool) {
    let service = CatalogService::new(pool);
    for code in ["AAAA0001", "BBBB0002"] {
        add_comic(&service, code).await;
    }

    let request = ListRequest {
        order_bys: vec![OrderBy::desc("code"), OrderBy::asc("no_such_column")],
        pagination: Some(Pagination::new(-3, 10_000)),
    };
    let comics = service.list_comics(request).await.unwrap();
    let codes: Vec<&str> = comics.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, ["BBBB0002", "AAAA0001"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_past_the_end_is_empty(pool: PgPool) {
    let service = CatalogService::new(pool);
    add_comic(&service, "ABCD1234").await;

    for page in [i64::MAX / 10, i64::MAX] {
        let request = ListRequest {
            order_bys: Vec::new(),
            pagination: Some(Pagination::new(page, 50)),
        };
        assert!(service.list_comics(request).await.unwrap().is_empty());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unchanged_comic_update_is_not_found(pool: PgPool) {
    let service = CatalogService::new(pool);
    add_comic(&service, "ABCD1234").await;

    let err = service
        .update_comic_by_code(
            &ADMIN,
            "ABCD1234",
            &UpdateComic {
                code: Some("ABCD1234".into()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_language_by_id_and_ietf_agree(pool: PgPool) {
    let service = CatalogService::new(pool);
    let added = service
        .add_language(
            &ADMIN,
            &CreateLanguage {
                ietf: "en".into(),
                name: "English".into(),
            },
        )
        .await
        .unwrap();

    let by_id = service.get_language_by_id(added.id).await.unwrap();
    let by_ietf = service.get_language_by_ietf("en").await.unwrap();
    assert_eq!(by_id, by_ietf);

    let err = service.get_language_by_id(added.id + 1000).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
