pub mod health_check;
pub mod push;
pub mod settings;
pub mod stats;
pub mod transfer;
