//! Domain records shown by the CRM admin views.

use std::hash::Hash;

pub mod contact;
pub mod customer;
pub mod types;
pub mod user;

/// A server-owned entity that can be listed, searched and addressed by id.
pub trait Record {
    type Id: Copy + Eq + Ord + Hash + std::fmt::Debug;

    fn id(&self) -> Self::Id;

    /// Display fields the free-text search runs against.
    fn search_fields(&self) -> Vec<&str>;
}
