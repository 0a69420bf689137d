//! PostgREST Gateway
//!
//! HTTP client for the hosted content store's REST interface.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{Gateway, GatewayError, GatewayResult, Query, NOT_SINGLE_CODE};
use crate::config::StoreConfig;

const SINGLE_OBJECT_MEDIA_TYPE: &str = "application/vnd.pgrst.object+json";

/// Content store client speaking PostgREST
pub struct RestGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl RestGateway {
    /// Create a gateway for the configured store endpoint
    pub fn new(config: &StoreConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.anon_key.clone(),
        })
    }

    /// Full request URL for a read query
    pub fn query_url(&self, query: &Query) -> String {
        format!(
            "{}/{}?{}",
            self.rest_root(),
            urlencoding::encode(&query.table),
            query.to_query_string()
        )
    }

    fn rest_root(&self) -> String {
        format!("{}/rest/v1", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> GatewayResult<Response> {
        self.authorized(request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }
}

/// Turn a non-success response into the store's error descriptor
async fn error_from_response(response: Response) -> GatewayError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    error_from_body(status, &text)
}

/// Map a status and raw body to an error. The store's `message` is kept verbatim.
fn error_from_body(status: StatusCode, text: &str) -> GatewayError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body)
            if status == StatusCode::NOT_ACCEPTABLE
                && body.code.as_deref() == Some(NOT_SINGLE_CODE) =>
        {
            GatewayError::NotSingle {
                message: body.message,
            }
        }
        Ok(body) => GatewayError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body.message,
        },
        Err(_) => GatewayError::Api {
            status: status.as_u16(),
            code: None,
            message: if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                text.to_string()
            },
        },
    }
}

#[async_trait]
impl Gateway for RestGateway {
    fn name(&self) -> &str {
        "rest"
    }

    async fn select(&self, query: &Query) -> GatewayResult<Value> {
        let url = self.query_url(query);
        let mut request = self.client.get(&url);
        if query.single {
            request = request.header(reqwest::header::ACCEPT, SINGLE_OBJECT_MEDIA_TYPE);
        }

        let response = self.send(request).await?;
        let status = response.status();

        if !status.is_success() {
            let err = error_from_response(response).await;
            tracing::debug!(table = %query.table, status = status.as_u16(), error = %err, "Select failed");
            return Err(err);
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        tracing::debug!(
            table = %query.table,
            rows = value.as_array().map(Vec::len).unwrap_or(1),
            "Select completed"
        );
        Ok(value)
    }

    async fn insert(&self, table: &str, record: Value) -> GatewayResult<()> {
        let url = format!("{}/{}", self.rest_root(), urlencoding::encode(table));
        let request = self
            .client
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&record);

        let response = self.send(request).await?;
        if response.status().is_success() {
            tracing::debug!(table = %table, "Insert completed");
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn health_check(&self) -> GatewayResult<()> {
        let url = format!("{}/", self.rest_root());
        let response = self.send(self.client.get(&url)).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Direction;

    fn test_config() -> StoreConfig {
        StoreConfig {
            url: "https://example.supabase.co/".to_string(),
            anon_key: "public-anon-key".to_string(),
        }
    }

    #[test]
    fn test_query_url() {
        let gateway = RestGateway::new(&test_config()).unwrap();
        let query = Query::table("courses_with_counts")
            .eq("subject_id", "cs")
            .order("sort_order", Direction::Asc);

        assert_eq!(
            gateway.query_url(&query),
            "https://example.supabase.co/rest/v1/courses_with_counts?select=%2A&subject_id=eq.cs&order=sort_order.asc"
        );
    }

    #[test]
    fn test_not_single_body() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let err = error_from_body(StatusCode::NOT_ACCEPTABLE, body);

        assert_eq!(
            err,
            GatewayError::NotSingle {
                message: "JSON object requested, multiple (or no) rows returned".to_string()
            }
        );
        assert!(err.is_not_single());
    }

    #[test]
    fn test_not_single_code_needs_406() {
        let body = r#"{"code":"PGRST116","message":"odd"}"#;
        assert!(matches!(
            error_from_body(StatusCode::BAD_REQUEST, body),
            GatewayError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn test_api_message_passed_through() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"permission denied for table courses"}"#;
        let err = error_from_body(StatusCode::UNAUTHORIZED, body);

        assert_eq!(
            err,
            GatewayError::Api {
                status: 401,
                code: Some("42501".to_string()),
                message: "permission denied for table courses".to_string(),
            }
        );
        assert_eq!(err.to_string(), "permission denied for table courses");
    }

    #[test]
    fn test_non_json_body() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, "upstream timed out");
        assert_eq!(err.to_string(), "upstream timed out");

        let err = error_from_body(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[test]
    fn test_name() {
        let gateway = RestGateway::new(&test_config()).unwrap();
        assert_eq!(gateway.name(), "rest");
    }
}
