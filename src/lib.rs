pub mod chain;
pub mod config;
pub mod error;
pub mod funding;
pub mod logging;
pub mod mint;
pub mod proxy;
pub mod relay;
pub mod swap;
