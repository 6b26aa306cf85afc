//! # Profile Service
//!
//! Viewing and editing the user's profile, and the password-change flow.
//!
//! Profile documents live in `UserData` under auto-generated keys; every
//! lookup filters on the `uid` field. Password changes go through the auth
//! provider only (reauthenticate, then update) - the password is never
//! stored in a document by this client.

use std::sync::Arc;

use tracing::debug;

use tiffin_core::types::UserProfile;
use tiffin_store::document::UserDoc;
use tiffin_store::{Authenticator, DocumentStore, Query};

use crate::config::CollectionsConfig;
use crate::error::ClientError;

/// Profile operations for one client.
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn Authenticator>,
    collections: CollectionsConfig,
}

impl ProfileService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn Authenticator>,
        collections: CollectionsConfig,
    ) -> Self {
        ProfileService {
            store,
            auth,
            collections,
        }
    }

    /// Loads the profile for a uid.
    ///
    /// An absent profile is an error here - the profile screen bounces the
    /// user back to login when their document is missing.
    pub async fn load(&self, uid: &str) -> Result<UserProfile, ClientError> {
        let docs = self
            .store
            .query(Query::collection(&self.collections.user_data).with_eq("uid", uid))
            .await?;

        let doc = docs
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::not_found("Error! Data not found"))?;

        let user: UserDoc = serde_json::from_value(doc.data)
            .map_err(|e| ClientError::internal(e.to_string()))?;
        Ok(user.to_profile())
    }

    /// Updates the editable profile fields.
    ///
    /// Only non-empty values are applied; leaving a field blank on the edit
    /// form keeps its stored value. Fails when no profile document exists.
    pub async fn update(
        &self,
        uid: &str,
        new_name: Option<&str>,
        new_address: Option<&str>,
    ) -> Result<(), ClientError> {
        let docs = self
            .store
            .query(Query::collection(&self.collections.user_data).with_eq("uid", uid))
            .await?;

        if docs.is_empty() {
            return Err(ClientError::not_found("Error! Data not found"));
        }

        let mut fields = serde_json::Map::new();
        if let Some(name) = new_name.filter(|n| !n.is_empty()) {
            fields.insert("name".to_string(), name.into());
        }
        if let Some(address) = new_address.filter(|a| !a.is_empty()) {
            fields.insert("address".to_string(), address.into());
        }
        if fields.is_empty() {
            return Ok(());
        }

        for doc in docs {
            self.store
                .update(
                    &self.collections.user_data,
                    &doc.key,
                    serde_json::Value::Object(fields.clone()),
                )
                .await?;
        }
        debug!(uid, "profile updated");
        Ok(())
    }

    /// Changes the account password.
    ///
    /// Reauthenticates with the old password first; the provider's failure
    /// messages pass through as user-readable text.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        self.auth.reauthenticate(old_password).await?;
        self.auth.update_password(new_password).await?;
        debug!("password changed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tiffin_store::MemoryBackend;

    async fn seeded() -> (Arc<MemoryBackend>, ProfileService) {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .upsert(
                "UserData",
                "doc-1",
                json!({
                    "uid": "uid-1",
                    "name": "Sam Lee",
                    "email": "sam@example.edu",
                    "phone": "2015550100",
                    "address": "Dorm B-204",
                }),
            )
            .await
            .unwrap();

        let service = ProfileService::new(
            backend.clone(),
            backend.clone(),
            CollectionsConfig::default(),
        );
        (backend, service)
    }

    #[tokio::test]
    async fn test_load_profile() {
        let (_, service) = seeded().await;

        let profile = service.load("uid-1").await.unwrap();
        assert_eq!(profile.name, "Sam Lee");
        assert_eq!(profile.address, "Dorm B-204");
    }

    #[tokio::test]
    async fn test_load_missing_profile_is_not_found() {
        let (_, service) = seeded().await;

        let err = service.load("uid-unknown").await.unwrap_err();
        assert_eq!(err.message, "Error! Data not found");
    }

    #[tokio::test]
    async fn test_update_applies_only_non_empty_fields() {
        let (_, service) = seeded().await;

        service
            .update("uid-1", Some("Sam A. Lee"), Some(""))
            .await
            .unwrap();

        let profile = service.load("uid-1").await.unwrap();
        assert_eq!(profile.name, "Sam A. Lee");
        // Blank address input keeps the stored value.
        assert_eq!(profile.address, "Dorm B-204");
    }

    #[tokio::test]
    async fn test_update_missing_profile_is_not_found() {
        let (_, service) = seeded().await;

        let err = service
            .update("uid-unknown", Some("Name"), None)
            .await
            .unwrap_err();
        assert_eq!(err.message, "Error! Data not found");
    }

    #[tokio::test]
    async fn test_change_password_requires_old_password() {
        let backend = Arc::new(MemoryBackend::new());
        backend.sign_up("sam@example.edu", "secret1").await.unwrap();
        let service = ProfileService::new(
            backend.clone(),
            backend.clone(),
            CollectionsConfig::default(),
        );

        let err = service
            .change_password("wrong-old", "secret2")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Incorrect email or password");

        service.change_password("secret1", "secret2").await.unwrap();
        backend.sign_out().await;
        backend.sign_in("sam@example.edu", "secret2").await.unwrap();
    }
}
