#![allow(clippy::unwrap_used)]
// End-to-end write chains against a mocked record store.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, body_partial_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use samsara_api::RecordClient;
use samsara_core::model::{
    CatalogoEntry, EquipamentoTipoUpdate, EquipamentoUpdate, InstrumentoMedicao, NewEquipamento,
    NewManutencao, NewMulta, NewOperador, UsuarioUpdate,
};
use samsara_core::{AuthCredentials, CoreError, CreateOutcome, Samsara, StoreConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Samsara) {
    let server = MockServer::start().await;
    let client = RecordClient::with_client(reqwest::Client::new(), &server.uri()).unwrap();
    let config = StoreConfig::new(
        url::Url::parse(&server.uri()).unwrap(),
        AuthCredentials::Anonymous,
    );
    (server, Samsara::with_client(config, client))
}

fn empty_page() -> Value {
    json!({ "page": 1, "perPage": 1, "totalItems": 0, "totalPages": 0, "items": [] })
}

fn equipamento(atual: &str, frequencia: &str, proxima: &str, status: &str) -> Value {
    json!({
        "id": "e1",
        "codigo": "EQ-01",
        "instrumento_medicao": "Horímetro",
        "instrumento_medicao_inicio": "1000",
        "instrumento_medicao_atual": atual,
        "frequencia_revisao": frequencia,
        "proxima_revisao": proxima,
        "revisao_status": status,
        "obra": "o1",
        "encarregado": "u1",
        "tipo_equipamento": "t1",
        "grupo_equipamento": "g1",
        "inativo": false,
        "motivo": ""
    })
}

/// Mount the four relation lookups an equipment reconciliation performs.
async fn mount_equipment_relations(server: &MockServer) {
    let lookups = [
        ("obras", "o1", json!({ "id": "o1", "nome": "Ponte Norte" })),
        ("usuarios", "u1", json!({ "id": "u1", "nome_completo": "Ana Souza" })),
        ("equipamento_tipos", "t1", json!({ "id": "t1", "tipo_nome": "Escavadeira" })),
        ("equipamento_grupos", "g1", json!({ "id": "g1", "grupo_nome": "Linha amarela" })),
    ];
    for (collection, id, body) in lookups {
        Mock::given(method("GET"))
            .and(path(format!("/collections/{collection}/records/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }
}

fn shadows() -> Value {
    json!({
        "obraX": "Ponte Norte",
        "encarregadoX": "Ana Souza",
        "tipo_equipamentoX": "Escavadeira",
        "grupo_equipamentoX": "Linha amarela"
    })
}

fn new_equipamento() -> NewEquipamento {
    NewEquipamento {
        codigo: "EQ-01".into(),
        instrumento_medicao: InstrumentoMedicao::Horimetro,
        instrumento_medicao_inicio: "1000".into(),
        frequencia_revisao: "500".into(),
        obra: "o1".into(),
        encarregado: "u1".into(),
        tipo_equipamento: "t1".into(),
        grupo_equipamento: "g1".into(),
    }
}

// ── Equipamento ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_equipment_opens_revision_window() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .and(query_param("filter", "(codigo='EQ-01') && (inativo=false)"))
        .and(query_param("perPage", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/equipamentos/records"))
        .and(body_partial_json(json!({
            "codigo": "EQ-01",
            "instrumento_medicao_inicio": "1000",
            "instrumento_medicao_atual": "1000",
            "inativo": false,
            "proxima_revisao": "1500.00",
            "revisao_status": "500.00"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1000", "500", "1500.00", "500.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_equipment_relations(&server).await;

    let patched = json!({
        "id": "e1",
        "codigo": "EQ-01",
        "instrumento_medicao_atual": "1000",
        "proxima_revisao": "1500.00",
        "revisao_status": "500.00",
        "obraX": "Ponte Norte"
    });
    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(shadows()))
        .respond_with(ResponseTemplate::new(200).set_body_json(patched))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = samsara
        .equipamentos()
        .create(&new_equipamento())
        .await
        .unwrap();
    let created = outcome.created().expect("equipment should be created");
    assert_eq!(created.proxima_revisao, "1500.00");
    assert_eq!(created.revisao_status, "500.00");
    assert_eq!(created.obra_x, "Ponte Norte");
}

#[tokio::test]
async fn test_duplicate_codigo_is_refused_without_insert() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "perPage": 1, "totalItems": 1, "totalPages": 1,
            "items": [equipamento("1000", "500", "1500.00", "500.00")]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/equipamentos/records"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = samsara
        .equipamentos()
        .create(&new_equipamento())
        .await
        .unwrap();

    match outcome {
        CreateOutcome::Conflict(duplicate) => {
            assert_eq!(duplicate.to_string(), "Código existente: EQ-01");
            assert_eq!(duplicate.existing_id.as_deref(), Some("e1"));
        }
        CreateOutcome::Created(_) => panic!("expected a conflict"),
    }
}

#[tokio::test]
async fn test_store_uniqueness_rejection_maps_to_conflict() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/equipamentos/records"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to create record.",
            "data": { "codigo": { "code": "validation_not_unique", "message": "Value must be unique." } }
        })))
        .mount(&server)
        .await;

    let outcome = samsara
        .equipamentos()
        .create(&new_equipamento())
        .await
        .unwrap();
    assert!(outcome.is_conflict());
}

#[tokio::test]
async fn test_reading_update_keeps_threshold() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1000", "500", "1500.00", "500.00")),
        )
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(json!({
            "instrumento_medicao_atual": "1300",
            "proxima_revisao": "1500.00",
            "revisao_status": "200.00"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1300", "500", "1500.00", "200.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_equipment_relations(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(shadows()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1300", "500", "1500.00", "200.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = EquipamentoUpdate {
        instrumento_medicao_atual: Some("1300".into()),
        ..EquipamentoUpdate::default()
    };
    let updated = samsara.equipamentos().update("e1", &body).await.unwrap();
    assert_eq!(updated.proxima_revisao, "1500.00");
    assert_eq!(updated.revisao_status, "200.00");
}

#[tokio::test]
async fn test_frequency_change_resets_window() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1000", "500", "1500.00", "500.00")),
        )
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(json!({
            "instrumento_medicao_atual": "1300",
            "frequencia_revisao": "600",
            "proxima_revisao": "1900.00",
            "revisao_status": "600.00"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1300", "600", "1900.00", "600.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    mount_equipment_relations(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(shadows()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1300", "600", "1900.00", "600.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = EquipamentoUpdate {
        instrumento_medicao_atual: Some("1300".into()),
        frequencia_revisao: Some("600".into()),
        ..EquipamentoUpdate::default()
    };
    let updated = samsara.equipamentos().update("e1", &body).await.unwrap();
    assert_eq!(updated.proxima_revisao, "1900.00");
    assert_eq!(updated.revisao_status, "600.00");
}

#[tokio::test]
async fn test_interrupted_frequency_change_is_repaired() {
    let (server, samsara) = setup().await;

    // Stored before the edit; every later read sees the edited record.
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1000", "500", "1500.00", "500.00")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1300", "600", "1900.00", "600.00")),
        )
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(json!({
            "instrumento_medicao_atual": "1300",
            "frequencia_revisao": "600",
            "proxima_revisao": "1900.00",
            "revisao_status": "600.00"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1300", "600", "1900.00", "600.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The first obra lookup fails, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/collections/obras/records/o1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 500, "message": "Something went wrong.", "data": {}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_equipment_relations(&server).await;

    let mut repaired = equipamento("1300", "600", "1900.00", "600.00");
    repaired["obraX"] = json!("Ponte Norte");
    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(shadows()))
        .respond_with(ResponseTemplate::new(200).set_body_json(repaired))
        .expect(1)
        .mount(&server)
        .await;

    let body = EquipamentoUpdate {
        instrumento_medicao_atual: Some("1300".into()),
        frequencia_revisao: Some("600".into()),
        ..EquipamentoUpdate::default()
    };
    let err = assert_err!(samsara.equipamentos().update("e1", &body).await);
    assert!(matches!(err, CoreError::Reconciliation { ref step, .. } if step == "fetching obra"));

    let fixed = samsara.equipamentos().reconcile("e1").await.unwrap();
    assert_eq!(fixed.proxima_revisao, "1900.00");
    assert_eq!(fixed.revisao_status, "600.00");
    assert_eq!(fixed.obra_x, "Ponte Norte");
}

#[tokio::test]
async fn test_update_to_taken_codigo_is_refused() {
    let (server, samsara) = setup().await;

    let mut other = equipamento("800", "500", "1300.00", "500.00");
    other["id"] = json!("e2");
    other["codigo"] = json!("EQ-02");
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .and(query_param(
            "filter",
            "(codigo='EQ-02') && (inativo=false) && (id!='e1')",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "perPage": 1, "totalItems": 1, "totalPages": 1,
            "items": [other]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let body = EquipamentoUpdate {
        codigo: Some("EQ-02".into()),
        ..EquipamentoUpdate::default()
    };
    let err = assert_err!(samsara.equipamentos().update("e1", &body).await);
    match err {
        CoreError::Duplicate(duplicate) => {
            assert_eq!(duplicate.codigo, "EQ-02");
            assert_eq!(duplicate.existing_id.as_deref(), Some("e2"));
        }
        other => panic!("expected Duplicate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_store_rejection_on_update_is_duplicate() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1000", "500", "1500.00", "500.00")),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to update record.",
            "data": { "codigo": { "code": "validation_not_unique", "message": "Value must be unique." } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = EquipamentoUpdate {
        codigo: Some("EQ-02".into()),
        ..EquipamentoUpdate::default()
    };
    let err = assert_err!(samsara.equipamentos().update("e1", &body).await);
    assert!(matches!(err, CoreError::Duplicate(ref d) if d.codigo == "EQ-02" && d.existing_id.is_none()));
}

#[tokio::test]
async fn test_reactivation_refused_while_codigo_is_reused() {
    let (server, samsara) = setup().await;

    let mut stored = equipamento("1000", "500", "1500.00", "500.00");
    stored["inativo"] = json!(true);
    stored["motivo"] = json!("vendido");
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .mount(&server)
        .await;

    let mut successor = equipamento("0", "500", "500.00", "500.00");
    successor["id"] = json!("e9");
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .and(query_param(
            "filter",
            "(codigo='EQ-01') && (inativo=false) && (id!='e1')",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "perPage": 1, "totalItems": 1, "totalPages": 1,
            "items": [successor]
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let equipamentos = samsara.equipamentos();
    let err = assert_err!(equipamentos.reactivate("e1").await);
    assert!(matches!(err, CoreError::Duplicate(ref d) if d.existing_id.as_deref() == Some("e9")));

    let err = assert_err!(equipamentos.repo().toggle("e1", None).await);
    assert!(matches!(err, CoreError::Duplicate(_)));
}

#[tokio::test]
async fn test_reactivation_with_free_codigo() {
    let (server, samsara) = setup().await;

    let mut stored = equipamento("1000", "500", "1500.00", "500.00");
    stored["inativo"] = json!(true);
    stored["motivo"] = json!("parado");
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(json!({ "inativo": false, "motivo": "" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1000", "500", "1500.00", "500.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let active = samsara.equipamentos().reactivate("e1").await.unwrap();
    assert!(!active.inativo);
}

#[tokio::test]
async fn test_invalid_body_never_reaches_the_store() {
    let (server, samsara) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut body = new_equipamento();
    body.frequencia_revisao = "0".into();
    let result = samsara.equipamentos().create(&body).await;
    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

// ── Operador ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_operator_soft_delete_round_trip() {
    let (server, samsara) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/collections/operadores/records/op1"))
        .and(body_json(json!({ "inativo": true, "motivo": "inactive license" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "op1", "inativo": true, "motivo": "inactive license"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/operadores/records/op1"))
        .and(body_json(json!({ "inativo": false, "motivo": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "op1", "inativo": false, "motivo": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let operadores = samsara.operadores();
    let inactive = operadores
        .deactivate("op1", Some("inactive license"))
        .await
        .unwrap();
    assert!(inactive.inativo);
    assert_eq!(inactive.motivo, "inactive license");

    let active = operadores.reactivate("op1").await.unwrap();
    assert!(!active.inativo);
    assert_eq!(active.motivo, "");
}

#[tokio::test]
async fn test_operator_deactivation_requires_reason() {
    let (server, samsara) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = samsara.operadores().deactivate("op1", Some("   ")).await;
    assert!(matches!(result, Err(CoreError::ReasonRequired { .. })));
}

#[tokio::test]
async fn test_failed_lookup_reports_partial_write() {
    let (server, samsara) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/operadores/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "op9", "nome_completo": "João Lima", "obra": "o1", "encarregado": "u1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/obras/records/o1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "code": 500, "message": "Something went wrong.", "data": {}
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let body = NewOperador {
        nome_completo: "João Lima".into(),
        atividade: "Operador de escavadeira".into(),
        encarregado: "u1".into(),
        obra: "o1".into(),
    };
    let err = assert_err!(samsara.operadores().create(&body).await);
    match err {
        CoreError::Reconciliation { entity, id, step, .. } => {
            assert_eq!(entity, "operador");
            assert_eq!(id, "op9");
            assert_eq!(step, "fetching obra");
        }
        other => panic!("expected Reconciliation, got {other:?}"),
    }
}

// ── Usuario ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_user_move_copies_new_obra_name() {
    let (server, samsara) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/collections/usuarios/records/u1"))
        .and(body_json(json!({ "obra": "o2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "username": "ana", "nome_completo": "Ana Souza",
            "obra": "o2", "obraX": "Ponte Norte"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/obras/records/o2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "o2", "nome": "Viaduto Sul"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/usuarios/records/u1"))
        .and(body_json(json!({ "obraX": "Viaduto Sul" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "username": "ana", "nome_completo": "Ana Souza",
            "obra": "o2", "obraX": "Viaduto Sul"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = UsuarioUpdate {
        obra: Some("o2".into()),
        ..UsuarioUpdate::default()
    };
    let user = samsara.usuarios().update("u1", &body).await.unwrap();
    assert_eq!(user.obra_x, "Viaduto Sul");
}

#[tokio::test]
async fn test_user_without_obra_clears_shadow() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/usuarios/records/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "username": "ana", "obra": "", "obraX": "Ponte Norte"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/obras/records/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/usuarios/records/u1"))
        .and(body_json(json!({ "obraX": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1", "username": "ana", "obra": "", "obraX": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = samsara.usuarios().reconcile("u1").await.unwrap();
    assert_eq!(user.obra_x, "");
}

// ── EquipamentoTipo ─────────────────────────────────────────────────

#[tokio::test]
async fn test_type_regroup_copies_group_name() {
    let (server, samsara) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamento_tipos/records/t1"))
        .and(body_json(json!({ "grupo_equipamento": "g2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1", "tipo_nome": "Escavadeira",
            "grupo_equipamento": "g2", "grupo_nomeX": "Linha amarela"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamento_grupos/records/g2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "g2", "grupo_nome": "Caminhões", "categoria": "Caminhão"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamento_tipos/records/t1"))
        .and(body_json(json!({ "grupo_nomeX": "Caminhões" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1", "tipo_nome": "Escavadeira",
            "grupo_equipamento": "g2", "grupo_nomeX": "Caminhões"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = EquipamentoTipoUpdate {
        grupo_equipamento: Some("g2".into()),
        ..EquipamentoTipoUpdate::default()
    };
    let tipo = samsara.equipamento_tipos().update("t1", &body).await.unwrap();
    assert_eq!(tipo.grupo_nome_x, "Caminhões");
}

#[tokio::test]
async fn test_type_with_missing_group_reports_step() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamento_tipos/records/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "t1", "tipo_nome": "Escavadeira", "grupo_equipamento": "g404"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamento_grupos/records/g404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404, "message": "The requested resource wasn't found.", "data": {}
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = assert_err!(samsara.equipamento_tipos().reconcile("t1").await);
    match err {
        CoreError::Reconciliation { entity, id, step, .. } => {
            assert_eq!(entity, "tipo de equipamento");
            assert_eq!(id, "t1");
            assert_eq!(step, "fetching grupo de equipamento");
        }
        other => panic!("expected Reconciliation, got {other:?}"),
    }
}

// ── Manutencao ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_revisao_cascades_to_equipment_and_boletim() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1200", "500", "1500.00", "300.00")),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/operadores/records/op1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "op1", "nome_completo": "João Lima", "encarregadoX": "Ana Souza"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/manutencoes/records"))
        .and(body_partial_json(json!({
            "tipo_manutencao": "Revisão",
            "IM_atual": "1300",
            "equipamentoX": "EQ-01",
            "feito_porX": "João Lima",
            "encarregadoX": "Ana Souza",
            "inativo": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m1",
            "tipo_manutencao": "Revisão",
            "equipamento": "e1",
            "feito_por": "op1",
            "IM_atual": 1300,
            "boletim": "b1",
            "descricao": "Revisão das 1500 horas",
            "data": "2024-05-02"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(json!({
            "instrumento_medicao_atual": "1300.00",
            "proxima_revisao": "1800.00",
            "revisao_status": "1540.00"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1300.00", "500", "1800.00", "1540.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/boletins/records/b1"))
        .and(body_json(json!({
            "manutencao": true,
            "descricao_manutencao": "Revisão das 1500 horas"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "b1" })))
        .expect(1)
        .mount(&server)
        .await;

    let body = NewManutencao {
        tipo_manutencao: "Revisão".into(),
        equipamento: "e1".into(),
        feito_por: "op1".into(),
        im_atual: "1300".into(),
        data: "2024-05-02".into(),
        descricao: "Revisão das 1500 horas".into(),
        boletim: "b1".into(),
    };
    let created = assert_ok!(samsara.manutencoes().create(&body).await);
    assert_eq!(created.id, "m1");
    assert_eq!(created.im_atual, "1300");
}

#[tokio::test]
async fn test_routine_maintenance_moves_reading_only() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1200", "500", "1500.00", "300.00")),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/operadores/records/op1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "op1", "nome_completo": "João Lima", "encarregadoX": "Ana Souza"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/manutencoes/records"))
        .and(body_partial_json(json!({
            "tipo_manutencao": "Troca de óleo",
            "IM_atual": "1400",
            "equipamentoX": "EQ-01"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m2",
            "tipo_manutencao": "Troca de óleo",
            "equipamento": "e1",
            "feito_por": "op1",
            "IM_atual": "1400",
            "boletim": "",
            "data": "2024-05-20"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/equipamentos/records/e1"))
        .and(body_json(json!({
            "instrumento_medicao_atual": "1400.00",
            "proxima_revisao": "1500.00",
            "revisao_status": "100.00"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(equipamento("1400.00", "500", "1500.00", "100.00")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path_regex("^/collections/boletins/records/.*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let body = NewManutencao {
        tipo_manutencao: "Troca de óleo".into(),
        equipamento: "e1".into(),
        feito_por: "op1".into(),
        im_atual: "1400".into(),
        data: "2024-05-20".into(),
        descricao: String::new(),
        boletim: String::new(),
    };
    let created = assert_ok!(samsara.manutencoes().create(&body).await);
    assert_eq!(created.id, "m2");
    assert!(!created.is_revisao());
}

// ── Catalogo ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_referenced_operation_cannot_be_deleted() {
    let (server, samsara) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/collections/operacoes/records/op-esc"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to delete record. Make sure that the record is not part of a required relation reference.",
            "data": {}
        })))
        .mount(&server)
        .await;

    let err = samsara.operacoes().delete("op-esc").await.unwrap_err();
    assert!(matches!(err, CoreError::InUse { entity: "operação", .. }));
}

#[tokio::test]
async fn test_catalog_codigo_check_ignores_activity() {
    let (server, samsara) = setup().await;

    Mock::given(method("GET"))
        .and(path("/collections/ordens_servico/records"))
        .and(query_param("filter", "(codigo='OS-7')"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collections/ordens_servico/records"))
        .and(body_json(json!({ "codigo": "OS-7", "descricao": "Terraplenagem" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "os7", "codigo": "OS-7", "descricao": "Terraplenagem"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = CatalogoEntry {
        codigo: "OS-7".into(),
        descricao: "Terraplenagem".into(),
    };
    let created = samsara
        .ordens_servico()
        .create(&entry)
        .await
        .unwrap()
        .created()
        .unwrap();
    assert_eq!(created.id, "os7");
}

// ── Multa ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fine_without_driver_clears_driver_shadow() {
    let (server, samsara) = setup().await;

    Mock::given(method("POST"))
        .and(path("/collections/multas/records"))
        .and(body_partial_json(json!({ "codigo_infracao": "745-5", "condutor": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m1",
            "data_infracao": "2024-05-10 00:00:00.000Z",
            "codigo_infracao": "745-5",
            "valor_infracao": "130.16",
            "condutor": "",
            "equipamento": "e1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/equipamentos/records/e1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(equipamento("1200", "500", "1500", "300")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/multas/records/m1"))
        .and(body_json(json!({ "condutorX": "", "equipamentoX": "EQ-01" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m1",
            "codigo_infracao": "745-5",
            "equipamento": "e1",
            "equipamentoX": "EQ-01"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let multa = samsara
        .multas()
        .create(&NewMulta {
            data_infracao: "2024-05-10".into(),
            codigo_infracao: "745-5".into(),
            valor_infracao: "130.16".into(),
            condutor: String::new(),
            equipamento: "e1".into(),
        })
        .await
        .unwrap();

    assert_eq!(multa.equipamento_x, "EQ-01");
    assert_eq!(multa.condutor_x, "");
}

#[tokio::test]
async fn test_fine_cancellation_requires_reason() {
    let (server, samsara) = setup().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = samsara.multas().deactivate("m1", None).await;
    assert!(matches!(result, Err(CoreError::ReasonRequired { .. })));
}
