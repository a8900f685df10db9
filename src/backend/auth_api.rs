use super::Backend;

use async_trait::async_trait;
use serde::{de::IgnoredAny, Deserialize};
use serde_json::json;

use crate::{
    api::AuthAPI,
    entities::{ProfileUpdate, SignupFields, User},
    error::{malformed_response_error, rejected_error, Error},
};

#[derive(Deserialize)]
struct UserPayload {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct MessagePayload {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl AuthAPI for Backend {
    #[tracing::instrument(skip_all, fields(email = %fields.email, role = ?fields.role))]
    async fn signup(&self, fields: &SignupFields) -> Result<(), Error> {
        let _: IgnoredAny = self.post("/auth/signup", fields).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<User, Error> {
        let payload: UserPayload = self
            .post("/auth/login", &json!({ "email": email, "password": password }))
            .await?;

        payload
            .user
            .ok_or_else(|| rejected_error(payload.message.unwrap_or_else(|| "Login failed".into())))
    }

    #[tracing::instrument(skip(self))]
    async fn logout(&self) -> Result<(), Error> {
        let _: IgnoredAny = self.post("/auth/logout", &json!({})).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn reset_password(&self, email: &str) -> Result<Option<String>, Error> {
        let payload: MessagePayload = self
            .post("/auth/reset-password", &json!({ "email": email }))
            .await?;

        Ok(payload.message)
    }

    #[tracing::instrument(skip_all)]
    async fn update_password(&self, password: &str) -> Result<(), Error> {
        let _: IgnoredAny = self
            .post("/auth/update-password", &json!({ "password": password }))
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn current_user(&self) -> Result<Option<User>, Error> {
        match self.get::<UserPayload>("/auth/me").await {
            Ok(payload) => Ok(payload.user),
            Err(err) if err.is_rejection() || err.code == 102 => {
                tracing::debug!(%err, "no signed-in user");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    #[tracing::instrument(skip_all)]
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, Error> {
        let payload: UserPayload = self.post("/auth/profile", update).await?;

        payload
            .user
            .ok_or_else(|| malformed_response_error("profile response without user"))
    }
}
