//! Client for the listing and detail endpoints. Endpoint paths live here so the
//! view never builds URLs itself.

use super::{
    api::JsonApi,
    config::DirectoryConfig,
    errors::ApiError,
    types::{UserDetailResponse, UserPage},
};
use std::future::Future;
use tracing::instrument;

/// Source of directory data. `DirectoryView` is generic over it so sessions can
/// run against the HTTP client or an in-memory fixture.
pub trait UserDirectory: Send + Sync {
    /// Fetches one page of user summaries.
    fn list_users(&self, page: u32) -> impl Future<Output = Result<UserPage, ApiError>> + Send;

    /// Fetches one user's detail record and optional advisory.
    fn get_user(&self, id: u64)
    -> impl Future<Output = Result<UserDetailResponse, ApiError>> + Send;
}

/// `UserDirectory` backed by the remote JSON API.
#[derive(Clone, Debug)]
pub struct DirectoryClient {
    api: JsonApi,
}

impl DirectoryClient {
    /// # Errors
    /// Returns `ApiError::Config` if the HTTP client cannot be built.
    pub fn new(config: &DirectoryConfig) -> Result<Self, ApiError> {
        Ok(Self {
            api: JsonApi::new(config)?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

impl UserDirectory for DirectoryClient {
    #[instrument(skip(self))]
    async fn list_users(&self, page: u32) -> Result<UserPage, ApiError> {
        if page == 0 {
            return Err(ApiError::Config("Page numbers start at 1.".to_string()));
        }

        self.api.get_json(&format!("users?page={page}")).await
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: u64) -> Result<UserDetailResponse, ApiError> {
        self.api.get_json(&format!("users/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[tokio::test]
    async fn list_users_queries_page_parameter() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "per_page": 6,
                "total": 7,
                "total_pages": 2,
                "data": [{
                    "id": 7,
                    "email": "michael.lawson@reqres.in",
                    "first_name": "Michael",
                    "last_name": "Lawson",
                    "avatar": "https://reqres.in/img/faces/7-image.jpg"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DirectoryClient::new(&DirectoryConfig::new(&server.uri())).unwrap();
        let page = client.list_users(2).await.unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, 7);
    }

    #[tokio::test]
    async fn list_users_rejects_page_zero_without_request() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = DirectoryClient::new(&DirectoryConfig::new(&server.uri())).unwrap();
        let result = client.list_users(0).await;
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn get_user_uses_id_path() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": 7,
                    "email": "michael.lawson@reqres.in",
                    "first_name": "Michael",
                    "last_name": "Lawson",
                    "avatar": null
                },
                "support": { "text": "Buy now", "url": "https://x" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = DirectoryClient::new(&DirectoryConfig::new(&server.uri())).unwrap();
        let response = client.get_user(7).await.unwrap();
        assert_eq!(response.data.id, 7);
        assert_eq!(
            response.support.map(|advisory| advisory.text),
            Some("Buy now".to_string())
        );
    }

    #[tokio::test]
    async fn get_user_surfaces_not_found() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/23"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = DirectoryClient::new(&DirectoryConfig::new(&server.uri())).unwrap();
        let result = client.get_user(23).await;
        assert_eq!(
            result.map(|_| ()),
            Err(ApiError::Http {
                status: 404,
                message: "Request failed.".to_string()
            })
        );
    }
}
