//! Suave Auth Core - Authorization business logic
//!
//! Core authorization functionality: scrypt credential hashing, JWT
//! issuance and verification, and the TTL'd token cache that backs
//! revocation and single-active-token semantics.

pub mod cache;
pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use cache::*;
pub use config::*;
pub use error::*;
pub use password::*;
pub use service::*;
pub use token::*;
