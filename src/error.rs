use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelDeskError {
    #[error("unknown resource '{0}'")]
    UnknownResource(String),

    #[error("unknown filter '{filter}' for {resource}")]
    UnknownFilter { resource: String, filter: String },

    #[error("invalid value '{value}' for filter '{filter}': {reason}")]
    InvalidFilterValue {
        filter: String,
        value: String,
        reason: String,
    },

    #[error("invalid page size {0} (expected one of 5, 10, 20, 50, 100)")]
    InvalidPageSize(usize),

    #[error("invalid sort order '{0}' (expected 'asc' or 'desc')")]
    InvalidSortOrder(String),

    #[error("column '{column}' of {resource} cannot be sorted")]
    NotSortable { resource: String, column: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("session expired, run `hoteldesk login` to sign in again")]
    SessionExpired,

    #[error("server error{}: {}", .status.map(|s| format!(" ({s})")).unwrap_or_default(), .message.as_deref().unwrap_or("request failed"))]
    Server {
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch task failed: {0}")]
    TaskFailed(String),
}

impl HotelDeskError {
    /// Text for a user-facing notification. Server-provided messages win;
    /// everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            HotelDeskError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            HotelDeskError::SessionExpired => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn invalid_sort_order(s: String) -> Self {
        HotelDeskError::InvalidSortOrder(s)
    }

    pub fn unknown_resource(s: String) -> Self {
        HotelDeskError::UnknownResource(s)
    }
}

pub type Result<T> = std::result::Result<T, HotelDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = HotelDeskError::Server {
            status: Some(400),
            message: Some("Invalid date range".to_string()),
        };
        assert_eq!(err.user_message("Failed to load bookings"), "Invalid date range");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = HotelDeskError::Server {
            status: Some(500),
            message: None,
        };
        assert_eq!(err.user_message("Failed to load bookings"), "Failed to load bookings");

        let err = HotelDeskError::Server {
            status: Some(500),
            message: Some("   ".to_string()),
        };
        assert_eq!(err.user_message("Failed to load rooms"), "Failed to load rooms");

        let err = HotelDeskError::TaskFailed("panicked".to_string());
        assert_eq!(err.user_message("Failed to load staff"), "Failed to load staff");
    }

    #[test]
    fn test_server_error_display() {
        let err = HotelDeskError::Server {
            status: Some(503),
            message: Some("maintenance".to_string()),
        };
        assert_eq!(err.to_string(), "server error (503): maintenance");

        let err = HotelDeskError::Server {
            status: None,
            message: None,
        };
        assert_eq!(err.to_string(), "server error: request failed");
    }
}
