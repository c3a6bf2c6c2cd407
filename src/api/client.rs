//! HTTP client for the management API.
//!
//! # Security Note - Logging
//!
//! The bearer token is attached through the `RedactedHeader` wrapper and the
//! header is marked sensitive, so neither `Debug` output nor reqwest's own
//! logging prints it.
//!
//! Every response passes through [`ApiClient::intercept`]: a 401 invalidates
//! the shared [`SessionContext`] before the error reaches the caller.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{HotelDeskError, Result};
use crate::session::SessionContext;

/// Wrapper for sensitive header values that redacts the value when formatted.
struct RedactedHeader {
    value: String,
}

impl RedactedHeader {
    fn new(value: String) -> Self {
        Self { value }
    }

    fn as_header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.value).map_err(|_| {
            HotelDeskError::InvalidInput("session token contains invalid characters".to_string())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Display for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for RedactedHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedHeader")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract the server's message from an error body, if it has one.
fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn from_config(config: &Config, session: Arc<SessionContext>) -> Result<Self> {
        Self::new(
            config.base_url()?,
            config.timeout(),
            config.connect_timeout(),
            session,
        )
    }

    pub fn new(
        base_url: Url,
        timeout: Duration,
        connect_timeout: Duration,
        session: Arc<SessionContext>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("hoteldesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Resolve a resource path beneath the base URL.
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// GET `path` with query pairs and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.endpoint_url(path)?;
        let mut request = self.client.get(url.clone()).query(query);
        if let Some(auth) = self.session.authorization() {
            let auth_header = RedactedHeader::new(auth);
            request = request.header(header::AUTHORIZATION, auth_header.as_header_value()?);
        }

        tracing::debug!(url = %url, params = query.len(), "GET");
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %url, status = status.as_u16(), "response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.intercept(status, &body));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Map a non-2xx response to an error. A 401 also invalidates the session.
    fn intercept(&self, status: StatusCode, body: &str) -> HotelDeskError {
        if status == StatusCode::UNAUTHORIZED {
            self.session.invalidate();
            return HotelDeskError::SessionExpired;
        }
        HotelDeskError::Server {
            status: Some(status.as_u16()),
            message: error_message(body),
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionState};

    fn client_with_token(token: Option<&str>) -> ApiClient {
        let store = Arc::new(match token {
            Some(t) => MemorySessionStore::with_token(t),
            None => MemorySessionStore::default(),
        });
        let session = Arc::new(SessionContext::new(store, token.map(str::to_string)));
        ApiClient::new(
            Url::parse("https://hotel.example.com/api/").unwrap(),
            Duration::from_secs(30),
            Duration::from_secs(10),
            session,
        )
        .unwrap()
    }

    #[test]
    fn test_redacted_header_display() {
        let header = RedactedHeader::new("Bearer secret-token-123".to_string());
        assert_eq!(format!("{header}"), "[REDACTED]");
        assert!(!format!("{header:?}").contains("secret-token-123"));
        assert!(header.as_header_value().unwrap().is_sensitive());
    }

    #[test]
    fn test_endpoint_url() {
        let client = client_with_token(None);
        assert_eq!(
            client.endpoint_url("/inventory/history").unwrap().as_str(),
            "https://hotel.example.com/api/inventory/history"
        );
    }

    #[test]
    fn test_unauthorized_invalidates_session() {
        let client = client_with_token(Some("expired"));
        let err = client.intercept(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, HotelDeskError::SessionExpired));
        assert_eq!(client.session().state(), SessionState::Expired);
        assert!(client.session().authorization().is_none());
    }

    #[test]
    fn test_server_error_carries_message() {
        let client = client_with_token(Some("ok"));
        let err = client.intercept(
            StatusCode::BAD_REQUEST,
            r#"{"success": false, "message": "startDate must be before endDate"}"#,
        );
        assert_eq!(
            err.user_message("Failed to load bookings"),
            "startDate must be before endDate"
        );
        assert_eq!(client.session().state(), SessionState::Authenticated);

        let err = client.intercept(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(
            err,
            HotelDeskError::Server {
                status: Some(502),
                message: None
            }
        ));
    }

    #[test]
    fn test_error_message_fields() {
        assert_eq!(error_message(r#"{"error": "Forbidden"}"#).as_deref(), Some("Forbidden"));
        assert_eq!(error_message(r#"{"message": "  "}"#), None);
        assert_eq!(error_message("not json"), None);
    }

    #[test]
    fn test_debug_hides_token() {
        let client = client_with_token(Some("very-secret"));
        assert!(!format!("{client:?}").contains("very-secret"));
    }
}
