use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::database::STRING_COLUMN_LIMIT;
use crate::models::user::{NewUser, User, UserChanges};

/// In-process backend used for `DB_DIALECT=memory` and as the HTTP test double.
/// Mirrors the Postgres table: sequential ids from 1, `VARCHAR(255)` limits.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    users: BTreeMap<i32, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose next insert would be assigned `last_id + 1`.
    pub fn with_last_id(last_id: i32) -> Self {
        Self {
            inner: RwLock::new(Inner {
                last_id,
                users: BTreeMap::new(),
            }),
        }
    }
}

fn check_length(value: Option<&String>) -> Result<(), StoreError> {
    match value {
        Some(s) if s.chars().count() > STRING_COLUMN_LIMIT => Err(StoreError::Constraint(format!(
            "value too long for type character varying({STRING_COLUMN_LIMIT})"
        ))),
        _ => Ok(()),
    }
}

fn check_lengths(
    name: Option<&String>,
    address: Option<&String>,
    description: Option<&String>,
) -> Result<(), StoreError> {
    check_length(name)?;
    check_length(address)?;
    check_length(description)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<Option<User>, StoreError> {
        check_lengths(
            user.name.as_ref(),
            user.address.as_ref(),
            user.description.as_ref(),
        )?;

        let mut inner = self.inner.write().await;
        let id = inner.last_id.checked_add(1).ok_or_else(|| {
            StoreError::Constraint(format!(
                r#"nextval: reached maximum value of sequence "Users_id_seq" ({})"#,
                i32::MAX
            ))
        })?;
        inner.last_id = id;
        let created = User {
            id,
            name: user.name,
            dob: user.dob,
            address: user.address,
            description: user.description,
            created_at: Utc::now(),
        };
        inner.users.insert(created.id, created.clone());

        Ok(Some(created))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<bool, StoreError> {
        check_lengths(
            changes.name.as_ref().and_then(Option::as_ref),
            changes.address.as_ref().and_then(Option::as_ref),
            changes.description.as_ref().and_then(Option::as_ref),
        )?;

        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id) {
            Some(user) => {
                changes.apply(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }
}
