//! Backend API access.
//!
//! [`BooksApi`] is the seam between the sync adapter and the network.
//! [`HttpBooksApi`] talks to a REST backend with `reqwest`; tests plug in
//! their own implementations.

use crate::config::Config;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shelf_engine::{Book, BookDraft, BookId};
use tracing::debug;

/// The four calls the backend must support.
#[async_trait]
pub trait BooksApi: Send + Sync {
    /// Base URL, for user-facing messages.
    fn base_url(&self) -> &str;

    /// `GET /books`
    async fn list(&self) -> std::result::Result<Vec<Book>, ApiError>;

    /// `POST /books`
    async fn create(&self, draft: &BookDraft) -> std::result::Result<Book, ApiError>;

    /// `PUT /books/{id}`
    async fn update(&self, book: &Book) -> std::result::Result<Book, ApiError>;

    /// `DELETE /books/{id}`
    async fn delete(&self, id: BookId) -> std::result::Result<(), ApiError>;
}

/// `reqwest`-backed implementation of [`BooksApi`].
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBooksApi {
    /// Build a client for the configured backend.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method: method_name(&method),
                path: path.to_string(),
                status,
            });
        }

        Ok(response)
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> std::result::Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.send(method, path, body).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list(&self) -> std::result::Result<Vec<Book>, ApiError> {
        let body: Value = self.request(Method::GET, "/books", None::<&()>).await?;
        books_from_listing(body)
    }

    async fn create(&self, draft: &BookDraft) -> std::result::Result<Book, ApiError> {
        self.request(Method::POST, "/books", Some(draft)).await
    }

    async fn update(&self, book: &Book) -> std::result::Result<Book, ApiError> {
        self.request(Method::PUT, &format!("/books/{}", book.id), Some(book))
            .await
    }

    async fn delete(&self, id: BookId) -> std::result::Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/books/{}", id), None::<&()>)
            .await?;
        Ok(())
    }
}

/// Interpret a listing body. Anything other than an array counts as empty.
pub fn books_from_listing(body: Value) -> std::result::Result<Vec<Book>, ApiError> {
    match body {
        Value::Array(_) => Ok(serde_json::from_value(body)?),
        _ => Ok(Vec::new()),
    }
}

fn method_name(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        _ => "HTTP",
    }
}
