//! Mock repositories for testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use suave_db::{CreateUser, DbError, DbResult, UserRepository, UserRow};
use uuid::Uuid;

/// In-memory user repository for testing
///
/// Enforces username uniqueness the way the real table's constraint does.
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_username: Arc<DashMap<String, Uuid>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_username
            .get(username)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_username.contains_key(&user.username) {
            return Err(DbError::UniqueViolation);
        }
        let row = UserRow {
            id: user.id,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        self.by_username.insert(row.username.clone(), row.id);
        self.users.insert(row.id, row.clone());
        Ok(row)
    }
}
