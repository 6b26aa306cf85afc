//! # Session Service
//!
//! Sign-up, sign-in, and session observation.
//!
//! ## Sign-Up Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SignUpForm                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  client-side validation ── mismatch/short phone ──► ClientError        │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Authenticator::sign_up ── provider rejection ────► user-readable msg  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  create UserData profile document (auto-generated key)                 │
//! │      │   (a failed profile write is logged, not fatal - the account    │
//! │      │    already exists and the profile screen can recover)           │
//! │      ▼                                                                  │
//! │  Session { uid, email }                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use tiffin_core::validation::{validate_email, validate_password_pair, validate_phone};
use tiffin_store::document::UserDoc;
use tiffin_store::{AuthError, Authenticator, DocumentStore, Session};

use crate::config::CollectionsConfig;
use crate::error::ClientError;

/// The sign-up form as entered on the registration screen.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
}

/// Auth/session operations for one client.
pub struct SessionService {
    auth: Arc<dyn Authenticator>,
    store: Arc<dyn DocumentStore>,
    collections: CollectionsConfig,
}

impl SessionService {
    pub fn new(
        auth: Arc<dyn Authenticator>,
        store: Arc<dyn DocumentStore>,
        collections: CollectionsConfig,
    ) -> Self {
        SessionService {
            auth,
            store,
            collections,
        }
    }

    /// Registers a new account and writes its profile document.
    ///
    /// Client-side rules run before the provider is called: the password
    /// confirmation must match and the phone number must be 10 digits.
    pub async fn sign_up(&self, form: SignUpForm) -> Result<Session, ClientError> {
        validate_password_pair(&form.password, &form.confirm_password)
            .map_err(|_| ClientError::validation("Passwords do not match"))?;
        validate_phone(&form.phone)
            .map_err(|_| ClientError::validation("Phone number should be 10 digits"))?;
        validate_email(&form.email)
            .map_err(|_| ClientError::auth(AuthError::InvalidEmail.to_string()))?;

        let session = self.auth.sign_up(&form.email, &form.password).await?;
        debug!(uid = %session.uid, "account registered");

        let profile = UserDoc {
            uid: session.uid.clone(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
        };
        let data = serde_json::to_value(&profile)
            .map_err(|e| ClientError::internal(e.to_string()))?;

        // Profile keys are auto-generated; lookup goes through the uid field.
        let key = Uuid::new_v4().to_string();
        if let Err(err) = self
            .store
            .upsert(&self.collections.user_data, &key, data)
            .await
        {
            // The account exists either way; surface the session and let the
            // profile screen retry the document later.
            warn!(uid = %session.uid, %err, "profile document write failed");
        }

        Ok(session)
    }

    /// Signs an existing account in.
    ///
    /// Failure messages collapse to the two strings the login screen shows:
    /// a malformed email gets its own hint, everything else reads as bad
    /// credentials.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        match self.auth.sign_in(email, password).await {
            Ok(session) => {
                debug!(uid = %session.uid, "signed in");
                Ok(session)
            }
            Err(AuthError::InvalidEmail) => {
                Err(ClientError::auth("Please enter a valid email address"))
            }
            Err(_) => Err(ClientError::auth("Incorrect email or password")),
        }
    }

    /// Ends the current session.
    pub async fn sign_out(&self) {
        self.auth.sign_out().await;
    }

    /// The current user's uid, if signed in.
    pub fn current_uid(&self) -> Option<String> {
        self.auth.current_session().map(|s| s.uid)
    }

    /// The uid, or the error screens use to bounce to login.
    pub fn require_uid(&self) -> Result<String, ClientError> {
        self.current_uid()
            .ok_or_else(|| ClientError::auth(AuthError::NotSignedIn.to_string()))
    }

    /// Observes session changes; fires with the current session or `None`.
    pub fn watch_session(&self) -> watch::Receiver<Option<Session>> {
        self.auth.on_session_change()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tiffin_store::{MemoryBackend, Query};

    fn service() -> (Arc<MemoryBackend>, SessionService) {
        let backend = Arc::new(MemoryBackend::new());
        let service = SessionService::new(
            backend.clone(),
            backend.clone(),
            CollectionsConfig::default(),
        );
        (backend, service)
    }

    fn form() -> SignUpForm {
        SignUpForm {
            name: "Sam Lee".to_string(),
            email: "sam@example.edu".to_string(),
            phone: "2015550100".to_string(),
            address: "Dorm B-204".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_profile_document() {
        let (backend, service) = service();

        let session = service.sign_up(form()).await.unwrap();

        let docs = backend
            .query(Query::collection("UserData").with_eq("uid", session.uid.clone()))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].data["name"], "Sam Lee");
        assert_eq!(docs[0].data["phone"], "2015550100");
    }

    #[tokio::test]
    async fn test_sign_up_rejects_mismatched_passwords() {
        let (_, service) = service();
        let mut bad = form();
        bad.confirm_password = "different".to_string();

        let err = service.sign_up(bad).await.unwrap_err();
        assert_eq!(err.message, "Passwords do not match");
    }

    #[tokio::test]
    async fn test_sign_up_rejects_short_phone() {
        let (_, service) = service();
        let mut bad = form();
        bad.phone = "555".to_string();

        let err = service.sign_up(bad).await.unwrap_err();
        assert_eq!(err.message, "Phone number should be 10 digits");
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_message() {
        let (_, service) = service();
        service.sign_up(form()).await.unwrap();

        let err = service.sign_up(form()).await.unwrap_err();
        assert_eq!(err.message, "Email already exists");
    }

    #[tokio::test]
    async fn test_sign_up_weak_password_message() {
        let (_, service) = service();
        let mut bad = form();
        bad.password = "tiny".to_string();
        bad.confirm_password = "tiny".to_string();

        let err = service.sign_up(bad).await.unwrap_err();
        assert_eq!(err.message, "Password should be at least 6 characters");
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_message() {
        let (_, service) = service();
        service.sign_up(form()).await.unwrap();
        service.sign_out().await;

        let err = service
            .sign_in("sam@example.edu", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Incorrect email or password");
    }

    #[tokio::test]
    async fn test_sign_in_invalid_email_message() {
        let (_, service) = service();

        let err = service.sign_in("not-an-email", "secret1").await.unwrap_err();
        assert_eq!(err.message, "Please enter a valid email address");
    }

    #[tokio::test]
    async fn test_session_gating() {
        let (_, service) = service();
        assert!(service.require_uid().is_err());

        let session = service.sign_up(form()).await.unwrap();
        assert_eq!(service.require_uid().unwrap(), session.uid);

        let mut rx = service.watch_session();
        service.sign_out().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert!(service.current_uid().is_none());
    }
}
