//! Configuration models shared across the CRM admin client.

pub mod config;
