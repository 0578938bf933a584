// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Resellers ---
        handlers::resellers::create_reseller,
        handlers::resellers::list_resellers,
        handlers::resellers::get_reseller,
        handlers::resellers::delete_reseller,
        handlers::resellers::create_client,

        // --- Orders ---
        handlers::orders::create_order,

        // --- Processing ---
        handlers::processing::process_pending_orders,
        handlers::processing::process_reseller,
        handlers::supplier_orders::get_supplier_order,
        handlers::supplier_orders::list_reseller_supplier_orders,
    ),
    components(
        schemas(
            // --- Resellers ---
            models::reseller::Reseller,
            models::reseller::Client,
            models::reseller::Phone,
            models::reseller::Contact,
            models::reseller::Address,
            models::reseller::NewReseller,
            models::reseller::NewPhone,
            models::reseller::NewContact,
            models::reseller::NewClient,

            // --- Orders ---
            models::order::OrderStatus,
            models::order::LineItem,
            models::order::ClientOrder,

            // --- Supplier ---
            models::supplier::AggregatedLineItem,
            models::supplier::SupplierOrderStatus,
            models::supplier::SupplierOrder,

            // --- Processing ---
            models::processing::ProcessingStatus,
            models::processing::ResellerProcessingResult,
            models::processing::ProcessingSummary,

            // --- Payloads ---
            handlers::resellers::ResellerCreatedResponse,
            handlers::resellers::ClientCreatedResponse,
            handlers::orders::CreateOrderPayload,
            handlers::orders::OrderCreatedResponse,
        )
    ),
    tags(
        (name = "Resellers", description = "Cadastro de Revendas e Clientes"),
        (name = "Orders", description = "Pedidos dos Clientes"),
        (name = "Processing", description = "Consolidação e Envio à Fornecedora")
    )
)]
pub struct ApiDoc;
