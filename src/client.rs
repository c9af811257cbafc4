//! HTTP gateway to the backend.
//!
//! Single point of egress: every outbound request re-reads the token store
//! and attaches the bearer credential when one is present, and every 401
//! response clears the session and forces a redirect to login. All other
//! statuses pass through to the caller untouched; the gateway never
//! retries, never transforms bodies, and never suppresses a failure.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use url::Url;

use crate::auth::guard::{Destination, Navigator};
use crate::auth::store::TokenStore;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            store,
            navigator,
        })
    }

    /// The token slot this client reads from and clears on 401.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::DELETE, path)).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        self.send(self.request(Method::POST, path).multipart(form))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        self.http.request(method, url)
    }

    /// Sends one request. The token is read from the store at send time so
    /// each request independently observes the current session.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match self.store.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Invalid or expired credential: drop the session and force a
            // fresh login. The failure still reaches the caller so the
            // page can react before the navigation completes.
            tracing::warn!("backend returned 401, clearing session");
            self.store.remove();
            self.navigator.navigate(Destination::Login);
            return Err(Error::Unauthorized);
        }

        Ok(response)
    }
}
