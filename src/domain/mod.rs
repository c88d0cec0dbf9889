pub mod contract;
pub mod registration;
