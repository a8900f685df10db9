mod auth_api;
mod helpers;
mod payment_api;
mod ride_api;

use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{api::API, config::Config, error::Error};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the RideX backend. Session credentials live in the cookie store,
/// so every clone of a `Backend` shares the signed-in session.
#[derive(Clone, Debug)]
pub struct Backend {
    client: Client,
    base_url: String,
}

impl Backend {
    #[tracing::instrument(name = "Backend::new", skip_all)]
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        helpers::read(self.request(Method::GET, path)).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        helpers::read(self.request(Method::POST, path).json(body)).await
    }
}

impl API for Backend {}
