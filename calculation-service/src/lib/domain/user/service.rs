use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::Username;
use crate::user::ports::AccountServicePort;
use crate::user::ports::UserRepository;

/// Domain service for account operations.
///
/// Owns the credential lifecycle: plaintext passwords enter here, get
/// hashed, and are discarded. Nothing outside this service ever sees a
/// stored hash compared against a plaintext.
pub struct AccountService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> AccountService<UR>
where
    UR: UserRepository,
{
    /// Create a new account service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> AccountServicePort for AccountService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Friendly pre-checks; the storage-layer UNIQUE constraints remain
        // the authoritative guard against concurrent registrations.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        // Hash the password; the plaintext is dropped with the command.
        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn verify_credentials(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        let user = match self.repository.find_by_username(username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let is_valid = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| UserError::Unknown(format!("Password verification failed: {}", e)))?;

        if is_valid {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    async fn get_user_by_username(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFoundByUsername(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        }
    }

    fn register_command(username: &str, email: &str, password: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = AccountService::new(Arc::new(repository));

        let result = service
            .register(register_command("testuser", "test@example.com", "password123"))
            .await;
        assert!(result.is_ok());

        let user = result.unwrap();
        assert_eq!(user.username.as_str(), "testuser");
        // Password is hashed with real Argon2, plaintext never stored
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        let existing = User {
            id: UserId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("other@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        };
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_find_by_email().times(0);
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository));

        let result = service
            .register(register_command("testuser", "test@example.com", "password123"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        let existing = User {
            id: UserId::new(),
            username: Username::new("otheruser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        };
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository));

        let result = service
            .register(register_command("testuser", "test@example.com", "password123"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let mut repository = MockTestUserRepository::new();

        let hash = auth::PasswordHasher::new().hash("password123").unwrap();
        let stored = User {
            id: UserId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: hash,
            created_at: Utc::now(),
        };
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AccountService::new(Arc::new(repository));

        let username = Username::new("testuser".to_string()).unwrap();
        let result = service
            .verify_credentials(&username, "password123")
            .await
            .unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().username.as_str(), "testuser");
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let hash = auth::PasswordHasher::new().hash("password123").unwrap();
        let stored = User {
            id: UserId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: hash,
            created_at: Utc::now(),
        };
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = AccountService::new(Arc::new(repository));

        let username = Username::new("testuser".to_string()).unwrap();
        let result = service
            .verify_credentials(&username, "wrong_password")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_user() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository));

        let username = Username::new("nonexistent".to_string()).unwrap();
        let result = service
            .verify_credentials(&username, "password123")
            .await
            .unwrap();
        // Indistinguishable from a wrong password at this layer as well
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_user_by_username_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository));

        let username = Username::new("nonexistent".to_string()).unwrap();
        let result = service.get_user_by_username(&username).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::NotFoundByUsername(_)
        ));
    }
}
