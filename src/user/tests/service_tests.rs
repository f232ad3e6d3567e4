//! Service orchestration tests for registration and self-edit.

use std::sync::Arc;

use crate::payload::FieldError;
use crate::user::{
    adapters::{bcrypt::BcryptPasswordHasher, memory::InMemoryUserDirectory},
    domain::{PasswordHash, User, UserCredentials, UserId, Username},
    ports::{DirectoryError, DirectoryResult, PasswordHasher, UserDirectory},
    services::{UserService, UserServiceError},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use mockall::mock;
use rstest::{fixture, rstest};
use serde_json::json;

type TestService = UserService<InMemoryUserDirectory, BcryptPasswordHasher, DefaultClock>;

mock! {
    Directory {}

    #[async_trait]
    impl UserDirectory for Directory {
        async fn register(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()>;
        async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<User>>;
        async fn find_by_username(&self, username: &Username) -> DirectoryResult<Option<User>>;
        async fn find_all(&self) -> DirectoryResult<Vec<User>>;
        async fn find_credentials(
            &self,
            username: &Username,
        ) -> DirectoryResult<Option<UserCredentials>>;
        async fn update(&self, user: &User, password_hash: &PasswordHash) -> DirectoryResult<()>;
    }
}

#[fixture]
fn directory() -> Arc<InMemoryUserDirectory> {
    Arc::new(InMemoryUserDirectory::new())
}

fn service_over(directory: &Arc<InMemoryUserDirectory>) -> TestService {
    UserService::new(
        Arc::clone(directory),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_stores_hashed_password(directory: Arc<InMemoryUserDirectory>) {
    let service = service_over(&directory);

    let user = service
        .register(&json!({"username": "joe", "password": "pw"}))
        .await
        .expect("registration should succeed");

    let credentials = directory
        .find_credentials(user.username())
        .await
        .expect("lookup should succeed")
        .expect("user should be stored");
    assert_ne!(credentials.password_hash.as_str(), "pw");
    assert!(
        BcryptPasswordHasher::new(4)
            .verify("pw", &credentials.password_hash)
            .expect("hash should decode")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_rejects_taken_username(directory: Arc<InMemoryUserDirectory>) {
    let service = service_over(&directory);
    let payload = json!({"username": "joe", "password": "pw"});
    service
        .register(&payload)
        .await
        .expect("first registration should succeed");

    let result = service.register(&payload).await;

    match result {
        Err(UserServiceError::Field(error)) => {
            assert_eq!(error, FieldError::incorrect_value("username"));
        }
        other => panic!("expected incorrect username value, got {other:?}"),
    }
    assert_eq!(directory.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn register_validates_before_touching_directory() {
    let mut mock_directory = MockDirectory::new();
    mock_directory.expect_find_by_username().never();
    mock_directory.expect_register().never();
    let service = UserService::new(
        Arc::new(mock_directory),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::new(DefaultClock),
    );

    let result = service.register(&json!({"username": 42})).await;

    assert!(matches!(result, Err(UserServiceError::Field(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_username_reports_missing_user(directory: Arc<InMemoryUserDirectory>) {
    let service = service_over(&directory);

    let result = service.find_by_username("johnny").await;

    assert!(matches!(result, Err(UserServiceError::NotFound(name)) if name == "johnny"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_renames_caller(directory: Arc<InMemoryUserDirectory>) {
    let service = service_over(&directory);
    let joe = service
        .register(&json!({"username": "joe", "password": "pw"}))
        .await
        .expect("registration should succeed");

    let updated = service
        .update(joe.id(), "joe", &json!({"username": "joe2", "password": "pw"}))
        .await
        .expect("self-edit should succeed");

    assert_eq!(updated.id(), joe.id());
    assert!(service.find_by_username("joe").await.is_err());
    let found = service
        .find_by_username("joe2")
        .await
        .expect("renamed user should exist");
    assert_eq!(found.id(), joe.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_other_callers(directory: Arc<InMemoryUserDirectory>) {
    let service = service_over(&directory);
    let joe = service
        .register(&json!({"username": "joe", "password": "pw"}))
        .await
        .expect("registration should succeed");
    service
        .register(&json!({"username": "bill", "password": "pw"}))
        .await
        .expect("registration should succeed");

    let result = service
        .update(
            joe.id(),
            "bill",
            &json!({"username": "dummyuser", "password": "dummypw"}),
        )
        .await;

    assert!(matches!(result, Err(UserServiceError::Unauthorized { .. })));
    assert!(service.find_by_username("bill").await.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_faults_propagate() {
    let mut mock_directory = MockDirectory::new();
    mock_directory
        .expect_find_all()
        .returning(|| Err(DirectoryError::persistence(std::io::Error::other("down"))));
    let service = UserService::new(
        Arc::new(mock_directory),
        Arc::new(BcryptPasswordHasher::new(4)),
        Arc::new(DefaultClock),
    );

    let result = service.list().await;

    assert!(matches!(
        result,
        Err(UserServiceError::Directory(DirectoryError::Persistence(_)))
    ));
}
