use thiserror::Error;

/// Longest slice of a response body carried into an error message.
const MAX_BODY_CHARS: usize = 512;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed with status {status}{}", body_suffix(.body))]
    Http { status: u16, body: Option<String> },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, InventoryError>;

impl InventoryError {
    /// Build an HTTP error, dropping blank bodies and truncating long ones.
    pub fn http(status: u16, body: Option<String>) -> Self {
        let body = body
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .map(|text| match text.char_indices().nth(MAX_BODY_CHARS) {
                Some((cut, _)) => format!("{}…", &text[..cut]),
                None => text,
            });
        InventoryError::Http { status, body }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            InventoryError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(text) => format!(": {}", text),
        None => String::new(),
    }
}

impl From<reqwest::Error> for InventoryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return InventoryError::Parse(error.to_string());
        }
        if error.is_timeout() {
            return InventoryError::Network(format!("request timed out: {}", error));
        }
        InventoryError::Network(error.to_string())
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(error: serde_json::Error) -> Self {
        InventoryError::Parse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_message_includes_status_and_body() {
        let error = InventoryError::http(500, Some("Failed to get VMs\n".to_string()));
        assert_eq!(
            error.to_string(),
            "Request failed with status 500: Failed to get VMs"
        );
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_http_message_without_body() {
        let error = InventoryError::http(404, Some("   ".to_string()));
        assert_eq!(error.to_string(), "Request failed with status 404");
    }

    #[test]
    fn test_long_body_is_truncated() {
        let error = InventoryError::http(502, Some("x".repeat(2000)));
        let InventoryError::Http { body: Some(body), .. } = error else {
            panic!("expected http error with body");
        };
        assert_eq!(body.chars().count(), MAX_BODY_CHARS + 1);
    }
}
