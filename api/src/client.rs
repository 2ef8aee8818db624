//! HTTP implementation of the todos collection API

use crate::{
    TodoApi,
    error::ApiError,
    types::{NewTodo, Todo},
};
use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};

/// Environment variable naming the API base URL
const API_URL_VAR: &str = "TODO_API_URL";

/// HTTP client for the remote todos collection
///
/// Collection resource layout:
/// - `GET {base}/todos?ownerId={id}` - list records for a user
/// - `POST {base}/todos` - create a record (server assigns the id)
/// - `DELETE {base}/todos/{id}` - delete a record
#[derive(Clone)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client with the base URL from `TODO_API_URL`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingBaseUrl` if `TODO_API_URL` is not set
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = std::env::var(API_URL_VAR).map_err(|_| ApiError::MissingBaseUrl)?;

        Ok(Self::new(base_url))
    }

    /// Create a client with an explicit base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn list_todos(&self, owner_id: i64) -> Result<Vec<Todo>, ApiError> {
        tracing::debug!(owner_id, "Listing todos");

        let response = self
            .client
            .get(format!("{}/todos", self.base_url))
            .query(&[("ownerId", owner_id)])
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<Todo>>()
                .await
                .map_err(|e| ApiError::ParseFailed(e.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }

    async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, ApiError> {
        tracing::debug!(owner_id = new_todo.owner_id, title = %new_todo.title, "Creating todo");

        let response = self
            .client
            .post(format!("{}/todos", self.base_url))
            .json(&new_todo)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<Todo>()
                .await
                .map_err(|e| ApiError::ParseFailed(e.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Validation {
                    status: status.as_u16(),
                    message: body,
                })
            },
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }

    async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        tracing::debug!(id, "Deleting todo");

        let response = self
            .client
            .delete(format!("{}/todos/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        Err(ApiError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}

impl TodoApi for HttpTodoApi {
    fn list(&self, owner_id: i64) -> BoxFuture<'_, Result<Vec<Todo>, ApiError>> {
        Box::pin(self.list_todos(owner_id))
    }

    fn create(&self, new_todo: NewTodo) -> BoxFuture<'_, Result<Todo, ApiError>> {
        Box::pin(self.create_todo(new_todo))
    }

    fn delete(&self, id: i64) -> BoxFuture<'_, Result<(), ApiError>> {
        Box::pin(self.delete_todo(id))
    }
}
