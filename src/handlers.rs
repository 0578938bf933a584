pub mod orders;
pub mod processing;
pub mod resellers;
pub mod supplier_orders;
