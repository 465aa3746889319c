use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION, DATE, USER_AGENT};
use reqwest::{Client, Method, Response};
use tracing::{debug, error};
use url::Url;
use uuid::Uuid;

use super::signer::RequestSigner;
use super::types::{ApiError, ApiResult, ServiceErrorBody};

/// RFC 7231 date, as required by the signature scheme
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

const OPC_REQUEST_ID: &str = "opc-request-id";

/// Send a signed GET request and map non-2xx responses to [`ApiError::Service`].
///
/// The request is attempted exactly once.
pub(super) async fn send_signed_get(
    client: &Client,
    signer: &RequestSigner,
    user_agent: &str,
    url: Url,
) -> ApiResult<Response> {
    let date = Utc::now().format(HTTP_DATE_FORMAT).to_string();
    let authorization = signer.authorization(&Method::GET, &url, &date)?;
    let request_id = Uuid::new_v4().simple().to_string().to_uppercase();

    debug!("=== API Request ===");
    debug!("URL: {}", url);
    debug!("Request ID: {}", request_id);

    let response = client
        .get(url)
        .header(DATE, &date)
        .header(AUTHORIZATION, authorization)
        .header(USER_AGENT, user_agent)
        .header(ACCEPT, "application/json")
        .header(OPC_REQUEST_ID, &request_id)
        .send()
        .await
        .map_err(ApiError::Transport)?;

    let status = response.status();
    debug!("=== API Response ===");
    debug!("Status: {}", status);

    if status.is_success() {
        return Ok(response);
    }

    let request_id = response
        .headers()
        .get(OPC_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.text().await.unwrap_or_default();
    error!("API request failed with status {}: {}", status, body);

    let parsed = serde_json::from_str::<ServiceErrorBody>(&body).ok();
    Err(service_error(status.as_u16(), parsed, &body, request_id))
}

fn service_error(
    status: u16,
    parsed: Option<ServiceErrorBody>,
    raw_body: &str,
    request_id: Option<String>,
) -> ApiError {
    let (code, message) = match parsed {
        Some(body) => (body.code, body.message),
        None => ("Unknown".to_string(), raw_body.trim().to_string()),
    };

    ApiError::Service {
        status,
        code,
        message,
        request_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_from_body() {
        let body = r#"{"code":"NotAuthorizedOrNotFound","message":"Authorization failed or requested resource not found."}"#;
        let parsed = serde_json::from_str::<ServiceErrorBody>(body).ok();

        match service_error(404, parsed, body, Some("ABC".to_string())) {
            ApiError::Service {
                status,
                code,
                message,
                request_id,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, "NotAuthorizedOrNotFound");
                assert!(message.starts_with("Authorization failed"));
                assert_eq!(request_id.as_deref(), Some("ABC"));
            }
            other => panic!("Expected Service, got {:?}", other),
        }
    }

    #[test]
    fn test_service_error_from_plain_text() {
        match service_error(502, None, " Bad Gateway \n", None) {
            ApiError::Service { code, message, .. } => {
                assert_eq!(code, "Unknown");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Expected Service, got {:?}", other),
        }
    }

    #[test]
    fn test_http_date_format() {
        use chrono::TimeZone;

        let date = Utc.with_ymd_and_hms(2014, 1, 5, 21, 31, 40).unwrap();
        assert_eq!(
            date.format(HTTP_DATE_FORMAT).to_string(),
            "Sun, 05 Jan 2014 21:31:40 GMT"
        );
    }
}
