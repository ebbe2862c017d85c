use std::sync::Arc;

use provider::{AuthProvider, ProviderError, UserIdentity};

use crate::error::ExamServiceError;

/// Thin gate over the auth collaborator.
///
/// Browsing stays open to everyone; taking an exam and upgrading require a
/// signed-in identity, which `require_user` enforces.
pub struct AuthService {
    auth: Arc<dyn AuthProvider>,
}

impl AuthService {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    /// Who is signed in, if anyone.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on transport failures.
    pub async fn current_user(&self) -> Result<Option<UserIdentity>, ProviderError> {
        self.auth.current_user().await
    }

    /// The signed-in identity, or `AuthRequired` so the UI can redirect.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::AuthRequired` when nobody is signed in.
    pub async fn require_user(&self) -> Result<UserIdentity, ExamServiceError> {
        self.auth
            .current_user()
            .await?
            .ok_or(ExamServiceError::AuthRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provider::{InMemoryProvider, UserId};

    #[tokio::test]
    async fn require_user_rejects_the_signed_out_state() {
        let backend = InMemoryProvider::new();
        let service = AuthService::new(Arc::new(backend.clone()));

        let err = service.require_user().await.unwrap_err();
        assert!(matches!(err, ExamServiceError::AuthRequired));

        backend
            .set_identity(Some(UserIdentity {
                id: UserId::generate(),
                email: "student@example.com".into(),
                is_premium: false,
            }))
            .unwrap();
        let identity = service.require_user().await.unwrap();
        assert_eq!(identity.email, "student@example.com");
    }
}
