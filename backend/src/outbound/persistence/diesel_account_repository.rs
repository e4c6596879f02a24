//! PostgreSQL-backed `AccountRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, NewAccount};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::{DbPool, PoolError};
use super::schema::user_info;

/// Diesel-backed implementation of the account repository port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> AccountPersistenceError {
    map_pool_error(error, AccountPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> AccountPersistenceError {
    map_diesel_error(
        error,
        AccountPersistenceError::query,
        AccountPersistenceError::connection,
    )
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: NewAccount) -> Result<Account, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let result = diesel::insert_into(user_info::table)
            .values(NewAccountRow {
                name: &account.name,
                password: &account.password_hash,
                roles: account.roles.as_csv(),
            })
            .returning(AccountRow::as_returning())
            .get_result::<AccountRow>(&mut conn)
            .await;

        match result {
            Ok(row) => Ok(Account::from(row)),
            // The unique index on name is the source of truth for taken names.
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(AccountPersistenceError::duplicate_name(account.name))
            }
            Err(err) => Err(map_diesel(err)),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = user_info::table
            .filter(user_info::name.eq(name))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(row.map(Account::from))
    }
}
