pub mod asserts;
pub mod client;
pub mod contract;
