#![allow(clippy::unwrap_used)]
// Integration tests for `RecordClient` using wiremock.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use samsara_api::{Error, Filter, ListQuery, RecordClient, Sort};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RecordClient) {
    let server = MockServer::start().await;
    let client = RecordClient::with_client(reqwest::Client::new(), &server.uri()).unwrap();
    (server, client)
}

fn page(items: Value, page: u32, total_pages: u32) -> Value {
    json!({
        "page": page,
        "perPage": 500,
        "totalItems": 3,
        "totalPages": total_pages,
        "items": items,
    })
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_authenticate_stores_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/usuarios/auth-with-password"))
        .and(body_json(json!({ "identity": "ana", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-1",
            "record": { "id": "u1", "nome_completo": "Ana Souza" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/obras/records/o1"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "o1" })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "s3cret".to_string().into();
    let auth = client.authenticate("usuarios", "ana", &secret).await.unwrap();
    assert_eq!(auth.token, "tok-1");
    assert!(client.has_token());

    let obra: Value = client.get("obras", "o1", &[]).await.unwrap();
    assert_eq!(obra["id"], "o1");
}

#[tokio::test]
async fn test_authenticate_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/usuarios/auth-with-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to authenticate.",
            "data": {}
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.authenticate("usuarios", "ana", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.has_token());
}

#[tokio::test]
async fn test_refresh_without_token_is_session_expired() {
    let (_server, client) = setup().await;
    let result = client.refresh_auth("usuarios").await;
    assert!(matches!(result, Err(Error::SessionExpired)));
}

#[tokio::test]
async fn test_password_reset_request() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/usuarios/request-password-reset"))
        .and(body_json(json!({ "email": "ana@example.com" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .request_password_reset("usuarios", "ana@example.com")
        .await
        .unwrap();
}

// ── Records ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_sends_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .and(query_param("page", "2"))
        .and(query_param("perPage", "10"))
        .and(query_param("sort", "-created"))
        .and(query_param("filter", "(inativo=false)"))
        .and(query_param("expand", "obra"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "perPage": 10,
            "totalItems": 11,
            "totalPages": 2,
            "items": [{ "id": "e11" }]
        })))
        .mount(&server)
        .await;

    let query = ListQuery::new()
        .page(2)
        .per_page(10)
        .sort(Sort::desc("created"))
        .filter(Filter::eq("inativo", false))
        .expand("obra");
    let result = client.list::<Value>("equipamentos", &query).await.unwrap();

    assert_eq!(result.total_items, 11);
    assert!(result.is_last());
    assert_eq!(result.items[0]["id"], "e11");
}

#[tokio::test]
async fn test_list_all_walks_pages() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/multas/records"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(json!([{ "id": "m1" }, { "id": "m2" }]), 1, 2)),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/multas/records"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page(json!([{ "id": "m3" }]), 2, 2)),
        )
        .mount(&server)
        .await;

    let all: Vec<Value> = client.list_all("multas", None, None).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
}

#[tokio::test]
async fn test_get_with_expand() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/boletins/records/b1"))
        .and(query_param("expand", "obra,equipamento"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "b1",
            "expand": { "obra": { "id": "o1" } }
        })))
        .mount(&server)
        .await;

    let boletim: Value = client
        .get("boletins", "b1", &["obra", "equipamento"])
        .await
        .unwrap();
    assert_eq!(boletim["expand"]["obra"]["id"], "o1");
}

#[tokio::test]
async fn test_create_and_update() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/obras/records"))
        .and(body_json(json!({ "nome": "Ponte", "cidade": "Recife" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "o9", "nome": "Ponte", "cidade": "Recife"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/obras/records/o9"))
        .and(body_json(json!({ "cidade": "Olinda" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "o9", "nome": "Ponte", "cidade": "Olinda"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created: Value = client
        .create("obras", &json!({ "nome": "Ponte", "cidade": "Recife" }))
        .await
        .unwrap();
    assert_eq!(created["id"], "o9");

    let updated: Value = client
        .update("obras", "o9", &json!({ "cidade": "Olinda" }))
        .await
        .unwrap();
    assert_eq!(updated["cidade"], "Olinda");
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/obras/records"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401, "message": "The request requires valid record authorization token.", "data": {}
        })))
        .mount(&server)
        .await;

    let result = client
        .list::<Value>("obras", &ListQuery::new())
        .await;
    assert!(matches!(result, Err(Error::SessionExpired)));
}

#[tokio::test]
async fn test_delete_required_relation() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/collections/obras/records/o1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to delete record. Make sure that the record is not part of a required relation reference.",
            "data": {}
        })))
        .mount(&server)
        .await;

    let err = client.delete("obras", "o1").await.unwrap_err();
    assert!(err.is_required_relation(), "got: {err:?}");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_not_unique_data_is_preserved() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/equipamentos/records"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to create record.",
            "data": { "codigo": { "code": "validation_not_unique", "message": "Value must be unique." } }
        })))
        .mount(&server)
        .await;

    let err = client
        .create::<Value, _>("equipamentos", &json!({ "codigo": "EQ-01" }))
        .await
        .unwrap_err();
    assert!(err.is_not_unique("codigo"));
}

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/obras/records/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404, "message": "The requested resource wasn't found.", "data": {}
        })))
        .mount(&server)
        .await;

    let err = client.get::<Value>("obras", "missing", &[]).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_bad_json_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/obras/records/o1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let result = client.get::<Value>("obras", "o1", &[]).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Files ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_and_list_files() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/manutencoes_files/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "f1",
            "collectionName": "manutencoes_files",
            "record": "m1",
            "file": "nota_abc123.pdf",
            "created": "2024-05-01 10:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/manutencoes_files/records"))
        .and(query_param("filter", "(record='m1')"))
        .and(query_param("sort", "-created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{ "id": "f1", "record": "m1", "file": "nota_abc123.pdf" }]),
            1,
            1,
        )))
        .mount(&server)
        .await;

    let uploaded = client
        .upload_file("manutencoes", "m1", "nota.pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap();
    assert_eq!(uploaded.file, "nota_abc123.pdf");

    let files = client.list_files("manutencoes", "m1").await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].record, "m1");
}

#[test]
fn test_file_url() {
    let client =
        RecordClient::with_client(reqwest::Client::new(), "https://store.example.com/api").unwrap();
    let url = client
        .file_url("manutencoes_files", "f1", "nota_abc123.pdf")
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://store.example.com/api/files/manutencoes_files/f1/nota_abc123.pdf"
    );
}
