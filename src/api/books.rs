//! Book collection endpoint client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult},
    models::{Book, BookId, NewBook},
};

/// Operations offered by the remote book collection.
///
/// Successful create/update responses are not decoded: callers reload the
/// collection afterwards and treat that as the authoritative state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookApi: Send + Sync {
    /// `GET /api/books`
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// `POST /api/books`
    async fn create(&self, book: &NewBook) -> AppResult<()>;

    /// `PUT /api/books/{id}`
    async fn update(&self, id: &BookId, book: &Book) -> AppResult<()>;

    /// `DELETE /api/books/{id}`
    async fn delete(&self, id: &BookId) -> AppResult<()>;
}

/// HTTP client for the book collection
#[derive(Clone)]
pub struct BooksClient {
    http: Client,
    collection_url: Url,
}

impl BooksClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let collection_url = Url::parse(&config.books_url()).map_err(|e| {
            AppError::Config(config::ConfigError::Message(format!(
                "invalid API URL '{}': {}",
                config.books_url(),
                e
            )))
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            collection_url,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &BookId) -> AppResult<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Network(format!("cannot address items under {}", self.collection_url)))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}

/// Turn any status outside the success range into an error; the body is ignored.
fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::from_status(status));
    }
    Ok(response)
}

#[async_trait]
impl BookApi for BooksClient {
    async fn list(&self) -> AppResult<Vec<Book>> {
        tracing::debug!(url = %self.collection_url, "GET book collection");
        let response = self.http.get(self.collection_url.clone()).send().await?;
        let books = ensure_success(response)?
            .json::<Vec<Book>>()
            .await
            .map_err(|e| AppError::Network(format!("Invalid response body: {}", e)))?;
        Ok(books)
    }

    async fn create(&self, book: &NewBook) -> AppResult<()> {
        tracing::debug!(url = %self.collection_url, title = %book.title, "POST book");
        let response = self
            .http
            .post(self.collection_url.clone())
            .json(book)
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn update(&self, id: &BookId, book: &Book) -> AppResult<()> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "PUT book");
        let response = self.http.put(url).json(book).send().await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> AppResult<()> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "DELETE book");
        let response = self.http.delete(url).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}
