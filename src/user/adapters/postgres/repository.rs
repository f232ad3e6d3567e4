//! `PostgreSQL` repository implementation for the user directory.

use super::{
    models::{NewUserRow, UserChangeset, UserRow},
    schema::users,
};
use crate::db::PgPool;
use crate::user::{
    domain::{PasswordHash, User, UserCredentials, UserId, Username},
    ports::{DirectoryError, DirectoryResult, UserDirectory},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

const USERNAME_UNIQUE_CONSTRAINT: &str = "idx_users_username_unique";

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn register(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let new_row = to_new_row(user, password_hash);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, user_id, &username))?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(|found| row_to_credentials(found).map(|creds| creds.user))
                .transpose()
        })
        .await
    }

    async fn find_by_username(&self, username: &Username) -> DirectoryResult<Option<User>> {
        let credentials = self.find_credentials(username).await?;
        Ok(credentials.map(|creds| creds.user))
    }

    async fn find_all(&self) -> DirectoryResult<Vec<User>> {
        self.run_blocking(|connection| {
            let rows = users::table
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(DirectoryError::persistence)?;
            rows.into_iter()
                .map(|row| row_to_credentials(row).map(|creds| creds.user))
                .collect()
        })
        .await
    }

    async fn find_credentials(
        &self,
        username: &Username,
    ) -> DirectoryResult<Option<UserCredentials>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::username.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_credentials).transpose()
        })
        .await
    }

    async fn update(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()> {
        let user_id = user.id();
        let username = user.username().clone();
        let changes = UserChangeset {
            username: username.as_str().to_owned(),
            password_hash: password_hash.as_str().to_owned(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set(&changes)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, user_id, &username))?;
            if updated == 0 {
                return Err(DirectoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(user: &User, password_hash: &PasswordHash) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        username: user.username().as_str().to_owned(),
        password_hash: password_hash.as_str().to_owned(),
        created_at: user.created_at(),
    }
}

fn row_to_credentials(row: UserRow) -> DirectoryResult<UserCredentials> {
    let UserRow {
        id,
        username: raw_username,
        password_hash,
        created_at,
    } = row;
    let username = Username::new(raw_username).map_err(DirectoryError::persistence)?;
    Ok(UserCredentials {
        user: User::from_persisted(UserId::from_uuid(id), username, created_at),
        password_hash: PasswordHash::from_hash(password_hash),
    })
}

fn map_unique_violation(err: DieselError, user_id: UserId, username: &Username) -> DirectoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_username_unique_violation(info.as_ref()) =>
        {
            DirectoryError::DuplicateUsername(username.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DirectoryError::DuplicateUser(user_id)
        }
        _ => DirectoryError::persistence(err),
    }
}

fn is_username_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == USERNAME_UNIQUE_CONSTRAINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn row(username: &str) -> UserRow {
        UserRow {
            id: uuid::Uuid::new_v4(),
            username: username.to_owned(),
            password_hash: "$2b$04$stored".to_owned(),
            created_at: chrono::Utc
                .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn row_conversion_preserves_fields() {
        let source = row("alice");
        let expected_id = source.id;
        let expected_created = source.created_at;

        let credentials = row_to_credentials(source).expect("row should convert");

        assert_eq!(credentials.user.id().into_inner(), expected_id);
        assert_eq!(credentials.user.username().as_str(), "alice");
        assert_eq!(credentials.user.created_at(), expected_created);
        assert_eq!(credentials.password_hash.as_str(), "$2b$04$stored");
    }

    #[rstest]
    fn blank_persisted_username_is_a_persistence_fault() {
        let result = row_to_credentials(row("   "));
        assert!(matches!(result, Err(DirectoryError::Persistence(_))));
    }

    #[rstest]
    fn non_unique_errors_become_persistence_faults() {
        let username = Username::new("bob").expect("valid username");
        let mapped = map_unique_violation(DieselError::NotFound, UserId::new(), &username);
        assert!(matches!(mapped, DirectoryError::Persistence(_)));
    }
}
