use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub pro: bool,
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    /// `None` when the server kept an unparseable deadline.
    pub deadline: Option<String>,
    pub done: bool,
    pub created_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Status code of an API error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct TodoClient {
    client: Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder().no_proxy().build().unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn register(&self, name: &str, username: &str) -> Result<User, ClientError> {
        let body = serde_json::json!({ "name": name, "username": username });
        self.send(self.request(Method::POST, "/users", None).json(&body)).await
    }

    pub async fn user(&self, id: &str) -> Result<User, ClientError> {
        self.send(self.request(Method::GET, &format!("/users/{id}"), None)).await
    }

    pub async fn upgrade(&self, id: &str) -> Result<User, ClientError> {
        self.send(self.request(Method::PATCH, &format!("/users/{id}/pro"), None)).await
    }

    pub async fn list_todos(&self, username: &str) -> Result<Vec<Todo>, ClientError> {
        self.send(self.request(Method::GET, "/todos", Some(username))).await
    }

    /// `deadline` is sent as-is, so callers can exercise any date-like input.
    pub async fn create_todo(
        &self,
        username: &str,
        title: &str,
        deadline: serde_json::Value,
    ) -> Result<Todo, ClientError> {
        let body = serde_json::json!({ "title": title, "deadline": deadline });
        self.send(self.request(Method::POST, "/todos", Some(username)).json(&body)).await
    }

    pub async fn update_todo(
        &self,
        username: &str,
        id: &str,
        title: &str,
        deadline: serde_json::Value,
    ) -> Result<Todo, ClientError> {
        let body = serde_json::json!({ "title": title, "deadline": deadline });
        self.send(
            self.request(Method::PUT, &format!("/todos/{id}"), Some(username))
                .json(&body),
        )
        .await
    }

    pub async fn complete_todo(&self, username: &str, id: &str) -> Result<Todo, ClientError> {
        self.send(self.request(Method::PATCH, &format!("/todos/{id}/done"), Some(username)))
            .await
    }

    pub async fn delete_todo(&self, username: &str, id: &str) -> Result<(), ClientError> {
        let resp = self
            .request(Method::DELETE, &format!("/todos/{id}"), Some(username))
            .send()
            .await?;
        check(resp).await.map(|_| ())
    }

    fn request(&self, method: Method, path: &str, username: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match username {
            Some(username) => builder.header("username", username),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let resp = check(builder.send().await?).await?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let message = match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    };
    Err(ClientError::Api { status, message })
}
