#![allow(clippy::unwrap_used)]
// Login, token validation and page-level access through the facade.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use samsara_api::RecordClient;
use samsara_core::{AuthCredentials, Area, CoreError, Samsara, StoreConfig, TipoAcesso};

fn samsara(server: &MockServer, auth: AuthCredentials) -> Samsara {
    let client = RecordClient::with_client(reqwest::Client::new(), &server.uri()).unwrap();
    let config = StoreConfig::new(url::Url::parse(&server.uri()).unwrap(), auth);
    Samsara::with_client(config, client)
}

fn auth_body(token: &str, tipo: &str) -> serde_json::Value {
    json!({
        "token": token,
        "record": {
            "id": "u1",
            "username": "ana",
            "nome_completo": "Ana Souza",
            "tipo_acesso": tipo
        }
    })
}

#[tokio::test]
async fn test_password_login_opens_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/usuarios/auth-with-password"))
        .and(body_json(json!({ "identity": "ana", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok-1", "Encarregado")))
        .expect(1)
        .mount(&server)
        .await;

    let samsara = samsara(
        &server,
        AuthCredentials::Password {
            identity: "ana".into(),
            password: "s3cret".to_string().into(),
        },
    );
    let session = samsara.connect().await.unwrap().unwrap();
    assert_eq!(session.username, "ana");
    assert_eq!(session.tipo_acesso, TipoAcesso::Encarregado);
    assert!(samsara.client().has_token());

    assert!(samsara.authorize(Area::Boletins).await.is_ok());
    assert!(matches!(
        samsara.authorize(Area::Usuarios).await,
        Err(CoreError::AccessDenied { area: Area::Usuarios, .. })
    ));

    samsara.logout().await;
    assert!(samsara.session().await.is_none());
    assert!(!samsara.client().has_token());
}

#[tokio::test]
async fn test_stored_token_is_refreshed_on_connect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/usuarios/auth-refresh"))
        .and(header("authorization", "Bearer old-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(auth_body("new-token", "Administrador")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let samsara = samsara(
        &server,
        AuthCredentials::Token("old-token".to_string().into()),
    );
    let session = samsara.connect().await.unwrap().unwrap();
    assert_eq!(session.tipo_acesso, TipoAcesso::Administrador);
    assert!(samsara.authorize(Area::Usuarios).await.is_ok());
}

#[tokio::test]
async fn test_rejected_token_means_session_expired() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/usuarios/auth-refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401, "message": "The request requires valid record authorization token.", "data": {}
        })))
        .mount(&server)
        .await;

    let samsara = samsara(&server, AuthCredentials::Token("stale".to_string().into()));
    let err = samsara.connect().await.unwrap_err();
    assert!(err.is_auth(), "expected auth error, got {err:?}");
}

#[tokio::test]
async fn test_anonymous_connect_is_a_no_op() {
    let server = MockServer::start().await;
    let samsara = samsara(&server, AuthCredentials::Anonymous);
    assert!(samsara.connect().await.unwrap().is_none());
    assert!(samsara.authorize(Area::Usuarios).await.is_ok());
}

#[tokio::test]
async fn test_password_reset_trims_address() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/usuarios/request-password-reset"))
        .and(body_json(json!({ "email": "ana@example.com" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let samsara = samsara(&server, AuthCredentials::Anonymous);
    samsara
        .request_password_reset("  ana@example.com ")
        .await
        .unwrap();
}
