//! Integration tests for the resource services.
//!
//! Each test checks the path, method and headers a service sends.

mod common;

use common::{config_builder, env_path, fixture, management_client, SPACE_ID};
use contentful::clients::{CONTENT_TYPE_ID_HEADER, VERSION_HEADER};
use contentful::rest::resources::{Asset, ContentType, Entry, Environment, Locale, Role, Webhook};
use contentful::rest::Sys;
use contentful::{
    ApiKind, Client, Context, EnvironmentId, HttpError, InvalidHttpRequestError, Versioned,
};
use wiremock::matchers::{body_bytes, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(fixture(name))
}

fn stored_entry() -> Entry {
    serde_json::from_value(fixture("entry.json")).unwrap()
}

// ============================================================================
// Entries
// ============================================================================

#[tokio::test]
async fn test_new_entry_is_posted_with_content_type_header() {
    let server = MockServer::start().await;
    let mut entry = Entry::default();
    entry
        .fields
        .insert("name".to_string(), serde_json::json!({"en-US": "Nyan Cat"}));

    Mock::given(method("POST"))
        .and(path(env_path("/entries")))
        .and(header(VERSION_HEADER, "1"))
        .and(header(CONTENT_TYPE_ID_HEADER, "cat"))
        .and(body_json(serde_json::json!({"fields": {"name": {"en-US": "Nyan Cat"}}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixture("entry.json")))
        .expect(1)
        .mount(&server)
        .await;

    let saved = management_client(&server)
        .entries()
        .upsert(&Context::background(), SPACE_ID, "cat", &entry)
        .await
        .unwrap();

    assert_eq!(saved.id(), Some("nyancat"));
    assert_eq!(saved.content_type_id(), Some("cat"));
    assert_eq!(saved.field("name", "tlh").unwrap(), "Nyan vIghro'");
}

#[tokio::test]
async fn test_entry_with_empty_id_is_posted() {
    let server = MockServer::start().await;
    let entry = Entry {
        sys: Some(Sys {
            id: Some(String::new()),
            ..Sys::default()
        }),
        ..Entry::default()
    };

    Mock::given(method("POST"))
        .and(path(env_path("/entries")))
        .and(header(CONTENT_TYPE_ID_HEADER, "cat"))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixture("entry.json")))
        .expect(1)
        .mount(&server)
        .await;

    let saved = management_client(&server)
        .entries()
        .upsert(&Context::background(), SPACE_ID, "cat", &entry)
        .await
        .unwrap();

    assert_eq!(saved.id(), Some("nyancat"));
}

#[tokio::test]
async fn test_existing_entry_is_put_with_its_version() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(env_path("/entries/nyancat")))
        .and(header(VERSION_HEADER, "5"))
        .respond_with(ok("entry.json"))
        .expect(1)
        .mount(&server)
        .await;

    management_client(&server)
        .entries()
        .upsert(&Context::background(), SPACE_ID, "cat", &stored_entry())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_stale_version_is_version_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(env_path("/entries/nyancat")))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(fixture("error_version_mismatch.json")),
        )
        .mount(&server)
        .await;

    let err = management_client(&server)
        .entries()
        .upsert(&Context::background(), SPACE_ID, "cat", &stored_entry())
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::VersionMismatch(_)));
}

#[tokio::test]
async fn test_entry_lifecycle_paths() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(env_path("/entries/nyancat/published")))
        .and(header(VERSION_HEADER, "5"))
        .respond_with(ok("entry_published.json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(env_path("/entries/nyancat/published")))
        .respond_with(ok("entry.json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(env_path("/entries/nyancat/archived")))
        .respond_with(ok("entry.json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(env_path("/entries/nyancat/archived")))
        .respond_with(ok("entry.json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = management_client(&server);
    let ctx = Context::background();
    let entry = stored_entry();

    let published = client
        .entries()
        .publish(&ctx, SPACE_ID, &entry)
        .await
        .unwrap();
    assert!(published.is_published());
    assert_eq!(published.version(), 6);

    let unpublished = client
        .entries()
        .unpublish(&ctx, SPACE_ID, &entry)
        .await
        .unwrap();
    assert!(!unpublished.is_published());

    client
        .entries()
        .archive(&ctx, SPACE_ID, &entry)
        .await
        .unwrap();
    client
        .entries()
        .unarchive(&ctx, SPACE_ID, &entry)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_entry_delete_sends_version() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(env_path("/entries/nyancat")))
        .and(header(VERSION_HEADER, "5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    management_client(&server)
        .entries()
        .delete(&Context::background(), SPACE_ID, &stored_entry())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_lifecycle_without_id_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ok("entry.json"))
        .expect(0)
        .mount(&server)
        .await;

    let err = management_client(&server)
        .entries()
        .publish(&Context::background(), SPACE_ID, &Entry::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        HttpError::InvalidRequest(InvalidHttpRequestError::MissingEntityId {
            resource: "entry",
            operation: "publish",
        })
    ));
}

#[tokio::test]
async fn test_environment_switch_changes_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/spaces/{SPACE_ID}/environments/staging/entries/nyancat"
        )))
        .respond_with(ok("entry.json"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = management_client(&server);
    client.set_environment(EnvironmentId::new("staging").unwrap());

    client
        .entries()
        .get(&Context::background(), SPACE_ID, "nyancat")
        .await
        .unwrap();
}

// ============================================================================
// Assets
// ============================================================================

#[tokio::test]
async fn test_asset_get_decodes_localized_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(env_path("/assets/happycat")))
        .respond_with(ok("asset.json"))
        .mount(&server)
        .await;

    let asset = management_client(&server)
        .assets()
        .get(&Context::background(), SPACE_ID, "happycat")
        .await
        .unwrap();

    let file = asset.fields.file.as_ref().unwrap().get("en-US").unwrap();
    assert_eq!(file.file_name, "happycatw.jpg");
    let image = file.details.as_ref().unwrap().image.unwrap();
    assert_eq!(image.width, 273);
}

#[tokio::test]
async fn test_asset_process_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(env_path("/assets/happycat/files/en-US/process")))
        .and(header(VERSION_HEADER, "3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let asset: Asset = serde_json::from_value(fixture("asset.json")).unwrap();
    management_client(&server)
        .assets()
        .process(&Context::background(), SPACE_ID, &asset, "en-US")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_published_assets_use_public_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(env_path("/public/assets")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sys": {"type": "Array"}, "total": 0, "skip": 0, "limit": 100, "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assets = management_client(&server)
        .assets()
        .list_published(&Context::background(), SPACE_ID, None)
        .await
        .unwrap();

    assert!(assets.items.is_empty());
    assert!(!assets.has_more());
}

// ============================================================================
// Space-scoped resources
// ============================================================================

#[tokio::test]
async fn test_environment_upsert_puts_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/spaces/{SPACE_ID}/environments/staging")))
        .and(header(VERSION_HEADER, "1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixture("environment.json")))
        .expect(1)
        .mount(&server)
        .await;

    let environment = Environment {
        name: "staging".to_string(),
        ..Environment::default()
    };
    let created = management_client(&server)
        .environments()
        .upsert(&Context::background(), SPACE_ID, &environment)
        .await
        .unwrap();

    assert_eq!(created.id(), Some("staging"));
}

#[tokio::test]
async fn test_roles_and_webhooks_are_space_scoped() {
    let server = MockServer::start().await;
    let empty = serde_json::json!({
        "sys": {"type": "Array"},
        "total": 0,
        "skip": 0,
        "limit": 100,
        "items": []
    });
    Mock::given(method("GET"))
        .and(path(format!("/spaces/{SPACE_ID}/roles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/spaces/{SPACE_ID}/webhook_definitions")))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty))
        .expect(1)
        .mount(&server)
        .await;

    let client = management_client(&server);
    let ctx = Context::background();

    let roles = client.roles().list(&ctx, SPACE_ID, None).await.unwrap();
    let webhooks = client.webhooks().list(&ctx, SPACE_ID, None).await.unwrap();

    assert_eq!(roles.total, 0);
    assert_eq!(webhooks.total, 0);
}

#[tokio::test]
async fn test_new_role_and_webhook_are_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/spaces/{SPACE_ID}/roles")))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sys": {"id": "r1", "type": "Role", "version": 1},
            "name": "Editor",
            "policies": [],
            "permissions": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/spaces/{SPACE_ID}/webhook_definitions")))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "sys": {"id": "w1", "type": "WebhookDefinition", "version": 1},
            "name": "Deploy",
            "url": "https://example.com/hook",
            "topics": ["Entry.publish"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = management_client(&server);
    let ctx = Context::background();

    let role = Role {
        name: "Editor".to_string(),
        ..Role::default()
    };
    let role = client.roles().upsert(&ctx, SPACE_ID, &role).await.unwrap();
    assert_eq!(role.id(), Some("r1"));

    let webhook = Webhook {
        name: "Deploy".to_string(),
        url: "https://example.com/hook".to_string(),
        topics: vec!["Entry.publish".to_string()],
        ..Webhook::default()
    };
    let webhook = client
        .webhooks()
        .upsert(&ctx, SPACE_ID, &webhook)
        .await
        .unwrap();
    assert_eq!(webhook.topics, vec!["Entry.publish"]);
}

// ============================================================================
// Environment-scoped metadata
// ============================================================================

#[tokio::test]
async fn test_locales_are_listed_per_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(env_path("/locales")))
        .respond_with(ok("locales.json"))
        .expect(1)
        .mount(&server)
        .await;

    let locales = management_client(&server)
        .locales()
        .list(&Context::background(), SPACE_ID, None)
        .await
        .unwrap();

    let default: Vec<&Locale> = locales.items.iter().filter(|l| l.default).collect();
    assert_eq!(default.len(), 1);
    assert_eq!(default[0].code, "en-US");
}

#[tokio::test]
async fn test_content_type_activation_paths() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "sys": {"id": "cat", "type": "ContentType", "version": 2},
        "name": "Cat",
        "displayField": "name",
        "fields": [{"id": "name", "name": "Name", "type": "Symbol", "required": true}]
    });
    Mock::given(method("PUT"))
        .and(path(env_path("/content_types/cat/published")))
        .and(header(VERSION_HEADER, "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(env_path("/content_types/cat/published")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = management_client(&server);
    let ctx = Context::background();
    let content_type: ContentType = serde_json::from_value(body).unwrap();

    let active = client
        .content_types()
        .activate(&ctx, SPACE_ID, &content_type)
        .await
        .unwrap();
    assert_eq!(active.fields[0].kind, "Symbol");

    client
        .content_types()
        .deactivate(&ctx, SPACE_ID, &content_type)
        .await
        .unwrap();
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload_sends_raw_bytes() {
    let server = MockServer::start().await;
    let bytes = b"\x89PNG fake image".to_vec();
    Mock::given(method("POST"))
        .and(path(format!("/spaces/{SPACE_ID}/uploads")))
        .and(header("content-type", "application/octet-stream"))
        .and(body_bytes(bytes.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(fixture("upload.json")))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_builder(&server, ApiKind::Upload).build().unwrap();
    let client = Client::new(&config).unwrap();

    let upload = client
        .uploads()
        .create(&Context::background(), SPACE_ID, bytes)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(upload.id(), Some("5zOE5kHsrrhZFk3HT6BSn5"));
}

#[tokio::test]
async fn test_upload_with_undecodable_reply_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/spaces/{SPACE_ID}/uploads")))
        .respond_with(ResponseTemplate::new(201).set_body_string("accepted"))
        .mount(&server)
        .await;

    let config = config_builder(&server, ApiKind::Upload).build().unwrap();
    let upload = Client::new(&config)
        .unwrap()
        .uploads()
        .create(&Context::background(), SPACE_ID, vec![1, 2, 3])
        .await
        .unwrap();

    assert!(upload.is_none());
}
