pub mod aggregation;
pub mod partner_client;
pub mod processing_service;
pub mod reseller_service;
pub mod status_ledger;
pub mod submission;

pub use processing_service::ProcessingService;
pub use reseller_service::ResellerService;
