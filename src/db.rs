pub mod memory_store;
pub mod reseller_repo;
pub mod supplier_order_repo;

pub use memory_store::{InMemoryResellerStore, InMemorySupplierOrderStore};
pub use reseller_repo::{PgResellerRepository, ResellerPage, ResellerStore};
pub use supplier_order_repo::{PgSupplierOrderRepository, SupplierOrderStore};
