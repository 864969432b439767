//! reqwest-backed `AuthenticatedRequest` for the PostFast API.

use async_trait::async_trait;
use reqwest::{header, Client, Method};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument};

use nodes::{AuthenticatedRequest, HttpMethod, HttpRequestOptions, RequestError};

use crate::credentials::{PostFastCredentials, API_KEY_HEADER, CREDENTIAL_TEST_PATH};

/// Sends node requests to the credential's base URL with the API key header.
pub struct PostFastClient {
    client: Client,
    credentials: PostFastCredentials,
}

impl PostFastClient {
    pub fn new(credentials: PostFastCredentials) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    /// Reuse an existing reqwest client (connection pool, proxy settings).
    pub fn with_client(client: Client, credentials: PostFastCredentials) -> Self {
        Self {
            client,
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.credentials.base_url.trim_end_matches('/'), path)
    }

    /// Validates the API key against the account listing endpoint.
    pub async fn test_credentials(&self) -> Result<(), RequestError> {
        self.request(&HttpRequestOptions::get(CREDENTIAL_TEST_PATH))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl AuthenticatedRequest for PostFastClient {
    #[instrument(skip(self, options), fields(method = %options.method, path = %options.path))]
    async fn request(&self, options: &HttpRequestOptions) -> Result<Value, RequestError> {
        let method = match options.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut request = self
            .client
            .request(method, self.url(&options.path))
            .header(API_KEY_HEADER, self.credentials.api_key.expose_secret())
            .header(header::ACCEPT, "application/json");
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        debug!("{} answered {} ({} bytes)", options.path, status, text.len());

        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
                message: format!("Request failed with status code {}", status.as_u16()),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        // A non-JSON success body is handed back as a plain string.
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

fn transport_error(err: reqwest::Error) -> RequestError {
    if err.is_connect() {
        RequestError::Connection(err.to_string())
    } else {
        RequestError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PostFastClient {
        PostFastClient::new(PostFastCredentials::new("test-key").with_base_url(server.uri()))
    }

    #[tokio::test]
    async fn sends_key_query_and_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/social-posts"))
            .and(header_eq("pf-api-key", "test-key"))
            .and(query_param("limit", "20"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let req = HttpRequestOptions::get("/social-posts")
            .with_query("limit", 20)
            .with_query("page", 0);
        let out = client_for(&server).request(&req).await.unwrap();
        assert_eq!(out, json!({ "data": [] }));
    }

    #[tokio::test]
    async fn posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/file/get-signed-upload-urls"))
            .and(body_json(json!({ "contentType": "image/png", "count": 2 })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "key": "image/a.png" }])))
            .mount(&server)
            .await;

        let req = HttpRequestOptions::post(
            "/file/get-signed-upload-urls",
            json!({ "contentType": "image/png", "count": 2 }),
        );
        let out = client_for(&server).request(&req).await.unwrap();
        assert_eq!(out, json!([{ "key": "image/a.png" }]));
    }

    #[tokio::test]
    async fn error_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/social-posts/p-1"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "message": "already published" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .request(&HttpRequestOptions::delete("/social-posts/p-1"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RequestError::Status {
                status: 400,
                body: Some(json!({ "message": "already published" })),
                message: "Request failed with status code 400".into(),
            }
        );
    }

    #[tokio::test]
    async fn empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let out = client_for(&server)
            .request(&HttpRequestOptions::delete("/social-posts/p-2"))
            .await
            .unwrap();
        assert_eq!(out, Value::Null);
    }

    #[tokio::test]
    async fn credential_test_hits_account_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/social-media/my-social-accounts"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).test_credentials().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn refused_connection_is_a_connection_error() {
        // Grab a free port, then close it so nothing listens there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = PostFastClient::new(PostFastCredentials::new("k").with_base_url(uri));
        let err = client
            .request(&HttpRequestOptions::get("/social-media/my-social-accounts"))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Connection(_)), "got {err:?}");
    }
}
