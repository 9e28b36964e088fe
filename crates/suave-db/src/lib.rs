//! Suave DB - Database abstractions
//!
//! SQLx-based database layer for Suave services.
//!
//! # Example
//!
//! ```rust,ignore
//! use suave_db::{create_pool, schema, Repositories};
//!
//! let pool = create_pool("postgres://localhost/suave").await?;
//! schema::ensure_auth_schema(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! // Use repositories
//! let user = repos.users.find_by_username("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
pub mod schema;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, DbPool};
pub use repo::*;
