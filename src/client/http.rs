use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::messages::{
    BeginTransactionRequest, BeginTransactionResponse, CommitTransactionRequest,
    CommitTransactionResponse, ExecuteStatementRequest, ExecuteStatementResponse,
    RollbackTransactionRequest, RollbackTransactionResponse,
};
use super::{DataApi, DataApiError};

const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// [`DataApi`] over the service's JSON/HTTP endpoints.
///
/// Request signing is left to the deployment: attach whatever headers the endpoint
/// expects with [`HttpDataApi::with_header`] (a signing proxy or a local emulator needs
/// none).
#[derive(Debug, Clone)]
pub struct HttpDataApi {
    client: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
}

impl HttpDataApi {
    /// Client for the regional public endpoint, `https://rds-data.<region>.amazonaws.com`.
    #[must_use]
    pub fn for_region(region: &str) -> Self {
        Self::with_endpoint(format!("https://rds-data.{region}.amazonaws.com"))
    }

    /// Client for an explicit endpoint (proxy, emulator, VPC endpoint).
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            headers: HeaderMap::new(),
        }
    }

    /// Add a header sent with every call.
    ///
    /// # Errors
    ///
    /// Returns `DataApiError::InvalidRequest` if the name or value is not a valid header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, DataApiError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| DataApiError::InvalidRequest(format!("header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| DataApiError::InvalidRequest(format!("header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, DataApiError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{path}", self.endpoint);
        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| DataApiError::Transport(format!("{path}: {e}")))?;

        let status = response.status();
        let error_type = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DataApiError::Transport(format!("{path}: {e}")))?;

        if !status.is_success() {
            return Err(service_error(status.as_u16(), error_type.as_deref(), &bytes));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| DataApiError::InvalidResponse(format!("{path}: {e}")))
    }
}

/// Build a `Service` error from a non-2xx response.
///
/// The code comes from `x-amzn-ErrorType` (minus any `:<uri>` suffix), then from a
/// `code`/`__type` member of the body, then from the status. The message comes from
/// `message`/`Message`, else the raw body.
pub(crate) fn service_error(status: u16, error_type: Option<&str>, body: &[u8]) -> DataApiError {
    let parsed: Option<serde_json::Value> = serde_json::from_slice(body).ok();
    let member = |key: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    };

    let code = error_type
        .map(|t| t.split(':').next().unwrap_or(t).to_string())
        .or_else(|| member("code"))
        .or_else(|| member("__type"))
        .unwrap_or_else(|| format!("HTTP {status}"));
    let message = member("message")
        .or_else(|| member("Message"))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    DataApiError::Service { code, message }
}

#[async_trait]
impl DataApi for HttpDataApi {
    async fn begin_transaction(
        &self,
        input: &BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse, DataApiError> {
        self.post("BeginTransaction", input).await
    }

    async fn execute_statement(
        &self,
        input: &ExecuteStatementRequest,
    ) -> Result<ExecuteStatementResponse, DataApiError> {
        self.post("Execute", input).await
    }

    async fn commit_transaction(
        &self,
        input: &CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse, DataApiError> {
        self.post("CommitTransaction", input).await
    }

    async fn rollback_transaction(
        &self,
        input: &RollbackTransactionRequest,
    ) -> Result<RollbackTransactionResponse, DataApiError> {
        self.post("RollbackTransaction", input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regional_endpoint() {
        let api = HttpDataApi::for_region("eu-west-1");
        assert_eq!(api.endpoint(), "https://rds-data.eu-west-1.amazonaws.com");
    }

    #[test]
    fn custom_endpoint_drops_trailing_slash() {
        let api = HttpDataApi::with_endpoint("http://localhost:8080/");
        assert_eq!(api.endpoint(), "http://localhost:8080");
    }

    #[test]
    fn invalid_header_is_rejected() {
        let res = HttpDataApi::with_endpoint("http://localhost").with_header("bad header", "x");
        assert!(matches!(res, Err(DataApiError::InvalidRequest(_))));
    }

    #[test]
    fn error_type_header_wins() {
        let err = service_error(
            400,
            Some("BadRequestException:http://internal.amazon.com/coral/"),
            br#"{"message":"Transaction abc is not found"}"#,
        );
        assert_eq!(
            err,
            DataApiError::Service {
                code: "BadRequestException".to_string(),
                message: "Transaction abc is not found".to_string(),
            }
        );
    }

    #[test]
    fn falls_back_to_status_and_raw_body() {
        let err = service_error(502, None, b"upstream down");
        assert_eq!(
            err,
            DataApiError::Service {
                code: "HTTP 502".to_string(),
                message: "upstream down".to_string(),
            }
        );
    }

    #[test]
    fn body_code_and_capitalized_message() {
        let err = service_error(403, None, br#"{"code":"AccessDeniedException","Message":"no"}"#);
        assert_eq!(
            err,
            DataApiError::Service {
                code: "AccessDeniedException".to_string(),
                message: "no".to_string(),
            }
        );
    }
}
