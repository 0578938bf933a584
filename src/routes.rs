// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn create_router(app_state: AppState) -> Router {
    let reseller_routes = Router::new()
        .route("/"
               ,post(handlers::resellers::create_reseller)
               .get(handlers::resellers::list_resellers)
        )
        .route("/{id}"
               ,get(handlers::resellers::get_reseller)
               .delete(handlers::resellers::delete_reseller)
        )
        .route("/{id}/clients"
               ,post(handlers::resellers::create_client)
        )
        .route("/{id}/process"
               ,post(handlers::processing::process_reseller)
        )
        .route("/{id}/supplier-orders"
               ,get(handlers::supplier_orders::list_reseller_supplier_orders)
        );

    let order_routes = Router::new()
        .route("/"
               ,post(handlers::orders::create_order)
        )
        .route("/process"
               ,post(handlers::processing::process_pending_orders)
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/resellers", reseller_routes)
        .nest("/api/orders", order_routes)
        .route("/api/supplier-orders/{id}"
               ,get(handlers::supplier_orders::get_supplier_order)
        )
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{PartnerMode, Settings, StoreBackend},
        db::{InMemoryResellerStore, InMemorySupplierOrderStore},
        services::partner_client::{FakePartnerClient, PartnerError},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app_with(fake: FakePartnerClient) -> Router {
        let settings = Settings {
            store_backend: StoreBackend::Memory,
            partner_mode: PartnerMode::Fake,
            ..Settings::default()
        };
        let state = AppState::from_parts(
            settings,
            Arc::new(InMemoryResellerStore::new()),
            Arc::new(InMemorySupplierOrderStore::new()),
            Arc::new(fake),
        );
        create_router(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn register_reseller(app: &Router) -> Uuid {
        let (status, body) = send(
            app,
            "POST",
            "/api/resellers",
            Some(json!({
                "cnpj": "12345678000195",
                "corporateName": "Empresa Exemplo Ltda",
                "tradeName": "Exemplo Comercial",
                "email": "contato@exemplo.com.br",
                "phones": [{ "number": "11999998888" }],
                "contacts": [{ "name": "José Silva", "isPrimary": true }],
                "addresses": [{
                    "street": "Avenida Paulista", "number": "1000", "district": "Bela Vista",
                    "city": "São Paulo", "state": "SP", "zipCode": "01310100"
                }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().parse().unwrap()
    }

    async fn register_client(app: &Router, reseller_id: Uuid) -> Uuid {
        let (status, body) = send(
            app,
            "POST",
            &format!("/api/resellers/{}/clients", reseller_id),
            Some(json!({ "document": "12345678909", "name": "Bar do Zé" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["clientId"].as_str().unwrap().parse().unwrap()
    }

    async fn place_order(
        app: &Router,
        reseller_id: Uuid,
        client_id: Uuid,
        quantity: u32,
    ) -> (StatusCode, Value) {
        send(
            app,
            "POST",
            "/api/orders",
            Some(json!({
                "resellerId": reseller_id,
                "clientId": client_id,
                "items": [{
                    "product": "X", "quantity": quantity, "unitPrice": 18.5, "valorTotal": 1.0
                }],
                "notes": "Manter refrigerado."
            })),
        )
        .await
    }

    #[tokio::test]
    async fn health_check() {
        let app = app_with(FakePartnerClient::accepting());
        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn full_flow_from_registration_to_submission() {
        let app = app_with(FakePartnerClient::scripted([Ok("AMB-48213".into())]));
        let reseller_id = register_reseller(&app).await;
        let client_a = register_client(&app, reseller_id).await;
        let client_b = register_client(&app, reseller_id).await;

        let (status, body) = place_order(&app, reseller_id, client_a, 600).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["resellerId"], json!(reseller_id));
        assert_eq!(body["clientId"], json!(client_a));
        let (status, _) = place_order(&app, reseller_id, client_b, 500).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, summary) = send(&app, "POST", "/api/orders/process", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["totalResellers"], 1);
        assert_eq!(summary["processedResellers"], 1);
        assert_eq!(summary["details"][0]["totalQuantity"], 1100);
        assert_eq!(summary["details"][0]["pendingOrders"], 2);
        assert_eq!(summary["details"][0]["status"], "Processado");
        assert_eq!(summary["details"][0]["orderNumber"], "AMB-48213");

        let supplier_order_id = summary["details"][0]["supplierOrderId"].as_str().unwrap();
        let uri = format!("/api/supplier-orders/{}", supplier_order_id);
        let (status, supplier_order) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(supplier_order["status"], "Enviado");
        assert_eq!(supplier_order["confirmationNumber"], "AMB-48213");
        assert_eq!(supplier_order["totalQuantity"], 1100);

        let uri = format!("/api/resellers/{}/supplier-orders", reseller_id);
        let (status, history) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().unwrap().len(), 1);

        let uri = format!("/api/resellers/{}", reseller_id);
        let (status, reseller) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        for client in reseller["clients"].as_array().unwrap() {
            let order = &client["orders"][0];
            assert_eq!(order["status"], "Enviado");
            // valorTotal enviado pelo cliente é ignorado
            assert_ne!(order["totalValue"], json!(1.0));
        }
    }

    #[tokio::test]
    async fn failed_submission_is_reported_not_thrown() {
        let app = app_with(FakePartnerClient::scripted([Err(PartnerError::Transport(
            "Timeout na conexão".into(),
        ))]));
        let reseller_id = register_reseller(&app).await;
        let client_id = register_client(&app, reseller_id).await;
        place_order(&app, reseller_id, client_id, 1500).await;

        let (status, summary) = send(&app, "POST", "/api/orders/process", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["failedResellers"], 1);
        assert_eq!(summary["details"][0]["status"], "Erro");
        assert!(summary["details"][0].get("orderNumber").is_none());
    }

    #[tokio::test]
    async fn processing_without_resellers_is_not_found() {
        let app = app_with(FakePartnerClient::accepting());

        let (status, body) = send(&app, "POST", "/api/orders/process", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Nenhuma revenda encontrada");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn order_validation_and_lookup_errors() {
        let app = app_with(FakePartnerClient::accepting());
        let reseller_id = register_reseller(&app).await;
        let client_id = register_client(&app, reseller_id).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/orders",
            Some(json!({ "resellerId": reseller_id, "clientId": client_id, "items": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["items"].is_array());

        let (status, body) = send(
            &app,
            "POST",
            "/api/orders",
            Some(json!({
                "clientId": client_id,
                "items": [{ "product": "X", "quantity": 1, "unitPrice": 1 }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Dados inválidos");

        let (status, body) = place_order(&app, Uuid::new_v4(), client_id, 10).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Revenda não encontrada");

        let (status, body) = place_order(&app, reseller_id, Uuid::new_v4(), 10).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Cliente não encontrado");
    }

    #[tokio::test]
    async fn reseller_registration_validates_required_fields() {
        let app = app_with(FakePartnerClient::accepting());

        let (status, body) = send(
            &app,
            "POST",
            "/api/resellers",
            Some(json!({
                "cnpj": "",
                "corporateName": "Empresa",
                "tradeName": "Empresa",
                "email": "não-é-email"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["cnpj"].is_array());
        assert!(body["details"]["email"].is_array());
    }

    #[tokio::test]
    async fn list_and_delete_resellers() {
        let app = app_with(FakePartnerClient::accepting());
        let first = register_reseller(&app).await;
        register_reseller(&app).await;

        let (status, list) = send(&app, "GET", "/api/resellers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 2);
        assert_eq!(list[0]["isActive"], true);

        let (status, _) = send(&app, "DELETE", &format!("/api/resellers/{}", first), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", &format!("/api/resellers/{}", first), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn single_reseller_processing_endpoint() {
        let app = app_with(FakePartnerClient::accepting());
        let reseller_id = register_reseller(&app).await;

        let uri = format!("/api/resellers/{}/process", reseller_id);
        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Nenhum pedido pendente para esta revenda");

        let client_id = register_client(&app, reseller_id).await;
        place_order(&app, reseller_id, client_id, 200).await;
        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Pendente");
        assert_eq!(body["totalQuantity"], 200);
    }

    #[tokio::test]
    async fn order_total_beyond_decimal_range_is_a_bad_request() {
        let app = app_with(FakePartnerClient::accepting());
        let reseller_id = register_reseller(&app).await;
        let client_id = register_client(&app, reseller_id).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/orders",
            Some(json!({
                "resellerId": reseller_id,
                "clientId": client_id,
                "items": [{ "product": "X", "quantity": 4000000000u32, "unitPrice": 1e20 }]
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Dados inválidos");
        assert!(body["message"].is_string());

        let uri = format!("/api/resellers/{}", reseller_id);
        let (_, reseller) = send(&app, "GET", &uri, None).await;
        assert!(reseller["clients"][0]["orders"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_ids_in_the_path_get_a_json_error() {
        let app = app_with(FakePartnerClient::accepting());

        for (method, uri) in [
            ("GET", "/api/resellers/not-a-uuid"),
            ("DELETE", "/api/resellers/not-a-uuid"),
            ("POST", "/api/resellers/not-a-uuid/process"),
            ("GET", "/api/resellers/not-a-uuid/supplier-orders"),
            ("GET", "/api/supplier-orders/not-a-uuid"),
        ] {
            let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{} {}", method, uri);
            let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
            assert!(content_type.starts_with("application/json"), "{} {}", method, uri);

            let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"], "Parâmetro inválido");
            assert!(body["message"].is_string());
        }

        let (status, body) = send(
            &app,
            "POST",
            "/api/resellers/not-a-uuid/clients",
            Some(json!({ "document": "1", "name": "Cliente" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Parâmetro inválido");
    }

    #[tokio::test]
    async fn unknown_supplier_order_is_not_found() {
        let app = app_with(FakePartnerClient::accepting());

        let uri = format!("/api/supplier-orders/{}", Uuid::new_v4());
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Pedido à fornecedora não encontrado");

        let uri = format!("/api/resellers/{}/supplier-orders", Uuid::new_v4());
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
