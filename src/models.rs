pub mod order;
pub mod processing;
pub mod reseller;
pub mod supplier;
