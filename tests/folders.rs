//! Folder endpoint tests: hierarchy reads, create/edit/move, and the
//! one-shot delete (folders carry no asynchronous processing, so there
//! is no wait).

use permapi::{EditFolderOptions, Pagination, PermaClient, PermaError};
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DUMMY_API_KEY: &str = "abcedfghijklmnopqrstuvwxyz12345678901234";

fn client_for(server: &MockServer) -> PermaClient {
    PermaClient::builder()
        .api_key(DUMMY_API_KEY)
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn folder_json(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "parent": "/v1/folders/25/",
        "has_children": false,
        "path": format!("25-{id}"),
        "organization": null,
        "read_only": false
    })
}

fn page_of(objects: serde_json::Value, limit: u32, total: u64) -> serde_json::Value {
    serde_json::json!({
        "meta": {"limit": limit, "offset": 0, "total_count": total, "next": null, "previous": null},
        "objects": objects
    })
}

#[tokio::test]
async fn pull_top_level_folders_forwards_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/folders"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_of(serde_json::json!([folder_json(26, "Personal Links")]), 10, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .pull_top_level_folders(Pagination::new(10, 0))
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.objects[0].name, "Personal Links");
}

#[tokio::test]
async fn pull_folder_uses_trailing_slash_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/folders/26/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(folder_json(26, "Personal Links")))
        .expect(1)
        .mount(&server)
        .await;

    let folder = client_for(&server).pull_folder(26).await.unwrap();
    assert_eq!(folder.id, 26);
    assert!(!folder.has_children);
}

#[tokio::test]
async fn pull_folder_children_lists_direct_children() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/folders/26/folders"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_of(serde_json::json!([folder_json(27, "Child")]), 10, 1)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .pull_folder_children(26, Pagination::new(10, 0))
        .await
        .unwrap();
    assert_eq!(page.objects[0].id, 27);
}

#[tokio::test]
async fn create_folder_posts_name_under_parent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/folders/26/folders"))
        .and(body_json(serde_json::json!({"name": "Temporary"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(folder_json(30, "Temporary")))
        .expect(1)
        .mount(&server)
        .await;

    let folder = client_for(&server)
        .create_folder(26, "Temporary")
        .await
        .unwrap();
    assert_eq!(folder.id, 30);
    assert_eq!(folder.name, "Temporary");
}

#[tokio::test]
async fn edit_folder_patches_supplied_fields_only() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/folders/30"))
        .and(body_json(serde_json::json!({"name": "New folder name"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(folder_json(30, "New folder name")))
        .expect(1)
        .mount(&server)
        .await;

    let options = EditFolderOptions {
        name: Some("New folder name".to_string()),
    };
    let folder = client_for(&server).edit_folder(30, &options).await.unwrap();
    assert_eq!(folder.name, "New folder name");
}

#[tokio::test]
async fn move_folder_puts_under_new_parent() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/folders/31/folders/30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(folder_json(30, "Temporary")))
        .expect(1)
        .mount(&server)
        .await;

    let folder = client_for(&server).move_folder(30, 31).await.unwrap();
    assert_eq!(folder.id, 30);
}

#[tokio::test]
async fn delete_folder_is_one_shot_and_returns_true() {
    let server = MockServer::start().await;

    // No detail polling: exactly one request total.
    Mock::given(method("DELETE"))
        .and(path("/v1/folders/30"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).delete_folder(30).await.unwrap());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn delete_folder_failure_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/folders/30"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"detail": "Not found."})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).delete_folder(30).await.unwrap_err();
    assert!(matches!(err, PermaError::Api { status: 404, .. }));
}

#[tokio::test]
async fn zero_limit_fails_before_dispatch() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .pull_top_level_folders(Pagination::new(0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, PermaError::InvalidPagination(_)));
}
