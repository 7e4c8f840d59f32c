//! Client for remote callable functions.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::RemoteError;
use super::types::*;

/// Request envelope: the payload goes under `data`.
#[derive(Serialize)]
struct CallRequest<'a, T> {
    data: &'a T,
}

/// Response envelope: the payload comes back under `result`.
#[derive(Deserialize)]
struct CallResponse<T> {
    result: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Configuration for the callable function client.
#[derive(Debug, Clone)]
pub struct CallableClientConfig {
    /// Base URL the function name is appended to
    pub base_url: String,
    /// Bearer token identifying the caller
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CallableClientConfig {
    /// Create a new config for the given functions endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: 30,
        }
    }

    /// Authenticate calls with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client issuing named request/response calls over HTTP.
#[derive(Debug, Clone)]
pub struct CallableClient {
    http: reqwest::Client,
    base_url: String,
}

impl CallableClient {
    pub fn new(config: CallableClientConfig) -> Result<Self, RemoteError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                RemoteError::InvalidToken {
                    message: e.to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Invoke the function `name` with `request`.
    pub async fn call<Req, Resp>(&self, name: &str, request: &Req) -> Result<Resp, RemoteError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, name);
        debug!(function = name, "calling remote function");

        let response = self
            .http
            .post(&url)
            .json(&CallRequest { data: request })
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RemoteError::Unauthorized);
        }

        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(RemoteError::Api {
                function: name.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CallResponse<Resp> =
            serde_json::from_str(&body).map_err(|e| RemoteError::Json {
                message: e.to_string(),
            })?;

        Ok(parsed.result)
    }

    pub async fn create_meetup(
        &self,
        request: &CreateMeetupRequest,
    ) -> Result<CreateMeetupResponse, RemoteError> {
        self.call(CREATE_MEETUP, request).await
    }

    pub async fn update_meetup(
        &self,
        request: &UpdateMeetupRequest,
    ) -> Result<UpdateMeetupResponse, RemoteError> {
        self.call(UPDATE_MEETUP, request).await
    }

    pub async fn refresh_meetup(&self, share_id: &str) -> Result<(), RemoteError> {
        let request = RefreshMeetupRequest {
            share_id: share_id.to_string(),
        };
        self.call(REFRESH_MEETUP, &request).await
    }

    /// Register the device's push token for the current user.
    pub async fn register_push_token(&self, expo_token: &str) -> Result<(), RemoteError> {
        let request = UpdateUserRequest {
            expo_token: expo_token.to_string(),
        };
        self.call(UPDATE_USER, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn user_route() -> UserRouteRequest {
        UserRouteRequest {
            user_name: "alice".to_string(),
            visible: true,
            route_name: "渋谷".to_string(),
        }
    }

    #[test]
    fn config_defaults() {
        let config = CallableClientConfig::new("http://localhost:5001/app/us-central1");
        assert_eq!(config.base_url, "http://localhost:5001/app/us-central1");
        assert_eq!(config.token, None);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = CallableClientConfig::new("http://localhost")
            .with_token("tok")
            .with_timeout_secs(5);
        assert_eq!(config.token.as_deref(), Some("tok"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn rejects_unprintable_token() {
        let config = CallableClientConfig::new("http://localhost").with_token("bad\ntoken");
        assert!(matches!(
            CallableClient::new(config),
            Err(RemoteError::InvalidToken { .. })
        ));
    }

    #[tokio::test]
    async fn create_meetup_wraps_and_unwraps_envelope() {
        let server = MockServer::start().await;
        let request = CreateMeetupRequest {
            category: MeetupCategory {
                title: "飲み会".to_string(),
                icon: None,
                station_names: vec!["目黒".to_string()],
            },
            colors: vec!["#7B84A5".to_string()],
            title: "金曜日".to_string(),
            user_route: user_route(),
            visible: true,
        };

        Mock::given(method("POST"))
            .and(path("/onCreateGather"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({ "data": request })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"id": "g1"}})))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            CallableClient::new(CallableClientConfig::new(server.uri()).with_token("tok")).unwrap();
        let response = client.create_meetup(&request).await.unwrap();
        assert_eq!(response.id, "g1");
    }

    #[tokio::test]
    async fn unit_responses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/onRefrectGather"))
            .and(body_json(json!({"data": {"shareId": "s1"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": null})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/onUpdateUser"))
            .and(body_json(json!({"data": {"expoToken": "ExponentPushToken[x]"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": null})))
            .mount(&server)
            .await;

        let client = CallableClient::new(CallableClientConfig::new(server.uri())).unwrap();
        client.refresh_meetup("s1").await.unwrap();
        client.register_push_token("ExponentPushToken[x]").await.unwrap();
    }

    #[tokio::test]
    async fn error_status_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/onUpdateGather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(
                json!({"error": {"message": "gather not found", "status": "NOT_FOUND"}}),
            ))
            .mount(&server)
            .await;

        let client = CallableClient::new(CallableClientConfig::new(server.uri())).unwrap();
        let request = UpdateMeetupRequest {
            share_id: "missing".to_string(),
            title: None,
            user_route: user_route(),
            visible: true,
        };

        match client.update_meetup(&request).await {
            Err(RemoteError::Api {
                function,
                status,
                message,
            }) => {
                assert_eq!(function, "onUpdateGather");
                assert_eq!(status, 404);
                assert_eq!(message, "gather not found");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = CallableClient::new(CallableClientConfig::new(server.uri())).unwrap();
        assert!(matches!(
            client.refresh_meetup("s1").await,
            Err(RemoteError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn malformed_result_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"nope": 1}})))
            .mount(&server)
            .await;

        let client = CallableClient::new(CallableClientConfig::new(server.uri())).unwrap();
        let request = CreateMeetupRequest {
            category: MeetupCategory {
                title: "t".to_string(),
                icon: None,
                station_names: vec![],
            },
            colors: vec![],
            title: "t".to_string(),
            user_route: user_route(),
            visible: true,
        };
        assert!(matches!(
            client.create_meetup(&request).await,
            Err(RemoteError::Json { .. })
        ));
    }
}
