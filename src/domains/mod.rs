//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes tools only; each subdomain lives in its own module.

pub mod tools;
