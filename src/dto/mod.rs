//! Render-ready snapshots of the admin views.

pub mod contacts;
pub mod customers;
