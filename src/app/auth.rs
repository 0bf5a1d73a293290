//! Login and registration use cases: validate form input, then delegate to the
//! [`AuthRepository`].

use crate::domain::model::{AuthSession, LoginCredentials, RegisterData};
use crate::domain::ports::AuthRepository;
use crate::utils::error::{Result, StorefrontError};
use crate::utils::validation::{validate_email, validate_min_length, validate_required};
use std::sync::Arc;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Per-field messages in form order.
pub type FieldErrors = Vec<(String, String)>;

fn collect(errors: &mut FieldErrors, result: Result<()>) {
    if let Err(StorefrontError::ValidationError { field, message }) = result {
        errors.push((field, message));
    }
}

fn first_error(errors: FieldErrors) -> Result<()> {
    match errors.into_iter().next() {
        Some((field, message)) => Err(StorefrontError::ValidationError { field, message }),
        None => Ok(()),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct LoginUseCase<R: AuthRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AuthRepository + ?Sized> LoginUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn validate(email: &str, password: &str) -> FieldErrors {
        let mut errors = FieldErrors::new();
        collect(&mut errors, validate_email("email", email));
        collect(
            &mut errors,
            validate_required("password", password, "Password is required"),
        );
        errors
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<AuthSession> {
        first_error(Self::validate(email, password))?;

        let credentials = LoginCredentials {
            email: normalize_email(email),
            password: password.to_string(),
        };
        tracing::debug!("Logging in {}", credentials.email);
        self.repository.login(&credentials).await
    }
}

pub struct RegisterUseCase<R: AuthRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AuthRepository + ?Sized> RegisterUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn validate(data: &RegisterData) -> FieldErrors {
        let mut errors = FieldErrors::new();
        collect(
            &mut errors,
            validate_required("firstName", &data.first_name, "First name is required"),
        );
        collect(
            &mut errors,
            validate_required("lastName", &data.last_name, "Last name is required"),
        );
        collect(&mut errors, validate_email("email", &data.email));
        collect(
            &mut errors,
            validate_min_length(
                "password",
                &data.password,
                MIN_PASSWORD_LENGTH,
                "Password must be at least 8 characters",
            ),
        );
        if data.password != data.confirm_password {
            errors.push((
                "confirmPassword".to_string(),
                "Passwords do not match".to_string(),
            ));
        }
        errors
    }

    pub async fn execute(&self, data: &RegisterData) -> Result<AuthSession> {
        first_error(Self::validate(data))?;

        let data = RegisterData {
            first_name: data.first_name.trim().to_string(),
            last_name: data.last_name.trim().to_string(),
            email: normalize_email(&data.email),
            password: data.password.clone(),
            confirm_password: data.confirm_password.clone(),
        };
        tracing::debug!("Registering {}", data.email);
        self.repository.register(&data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Role, User};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingAuth {
        logins: Mutex<Vec<LoginCredentials>>,
        registrations: Mutex<Vec<RegisterData>>,
    }

    fn session(email: &str) -> AuthSession {
        AuthSession {
            token: "token".to_string(),
            user: User {
                id: "u1".to_string(),
                email: email.to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                role: Role::Customer,
            },
        }
    }

    #[async_trait]
    impl AuthRepository for RecordingAuth {
        async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession> {
            self.logins.lock().await.push(credentials.clone());
            Ok(session(&credentials.email))
        }

        async fn register(&self, data: &RegisterData) -> Result<AuthSession> {
            self.registrations.lock().await.push(data.clone());
            Ok(session(&data.email))
        }
    }

    fn valid_registration() -> RegisterData {
        RegisterData {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "analytical".to_string(),
            confirm_password: "analytical".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_normalizes_email_before_delegating() {
        let repo = Arc::new(RecordingAuth::default());
        let use_case = LoginUseCase::new(repo.clone());

        let session = use_case.execute("  Ada@Example.COM ", "pw").await.unwrap();

        assert_eq!(session.user.email, "ada@example.com");
        assert_eq!(repo.logins.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_input_without_calling_repository() {
        let repo = Arc::new(RecordingAuth::default());
        let use_case = LoginUseCase::new(repo.clone());

        match use_case.execute("not-an-email", "pw").await {
            Err(StorefrontError::ValidationError { field, .. }) => assert_eq!(field, "email"),
            other => panic!("unexpected result: {:?}", other),
        }
        match use_case.execute("ada@example.com", "").await {
            Err(StorefrontError::ValidationError { field, message }) => {
                assert_eq!(field, "password");
                assert_eq!(message, "Password is required");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(repo.logins.lock().await.is_empty());
    }

    #[test]
    fn test_login_validate_reports_every_field() {
        let errors = LoginUseCase::<RecordingAuth>::validate("", "");
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[tokio::test]
    async fn test_register_trims_and_normalizes() {
        let repo = Arc::new(RecordingAuth::default());
        let use_case = RegisterUseCase::new(repo.clone());

        use_case.execute(&valid_registration()).await.unwrap();

        let sent = repo.registrations.lock().await;
        assert_eq!(sent[0].first_name, "Ada");
        assert_eq!(sent[0].email, "ada@example.com");
    }

    #[test]
    fn test_register_validation_rules() {
        let mut data = valid_registration();
        assert!(RegisterUseCase::<RecordingAuth>::validate(&data).is_empty());

        data.first_name = "  ".to_string();
        data.password = "short".to_string();
        data.confirm_password = "different".to_string();

        let errors = RegisterUseCase::<RecordingAuth>::validate(&data);
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "password", "confirmPassword"]);
        assert_eq!(errors[1].1, "Password must be at least 8 characters");
    }

    #[tokio::test]
    async fn test_register_mismatched_confirmation_never_reaches_repository() {
        let repo = Arc::new(RecordingAuth::default());
        let use_case = RegisterUseCase::new(repo.clone());

        let mut data = valid_registration();
        data.confirm_password = "analyticaL".to_string();

        match use_case.execute(&data).await {
            Err(StorefrontError::ValidationError { field, message }) => {
                assert_eq!(field, "confirmPassword");
                assert_eq!(message, "Passwords do not match");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(repo.registrations.lock().await.is_empty());
    }
}
