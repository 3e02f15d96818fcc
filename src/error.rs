use crate::session::Service;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Cis365Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("No session found for tenant '{0}'. Sign in with your session tooling first")]
    SessionNotFound(String),

    #[error("No access token for {0} in the current session")]
    MissingServiceToken(Service),

    #[error("Admin API error: {0}")]
    AdminApiError(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Tenant '{0}' not found")]
    TenantNotFound(String),

    #[error("Unknown control '{0}'")]
    UnknownControl(String),

    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    #[error("{0} returned no configuration object")]
    EmptyResponse(String),
}

pub type Result<T> = std::result::Result<T, Cis365Error>;

pub use Cis365Error as Error;

/// Parse an admin API error body and add context for the common failure codes
///
/// Graph, the Exchange admin REST endpoint and the Teams configuration API all
/// answer with an `{"error": {"code", "message"}}` envelope.
pub fn enhance_admin_error(error_response: &str) -> String {
    if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(error_response) {
        if let Some(error_obj) = error_json.get("error") {
            let code = error_obj
                .get("code")
                .and_then(|c| c.as_str())
                .unwrap_or("Unknown");
            let message = error_obj
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("No message");

            let hint = match code {
                "Unauthorized" | "InvalidAuthenticationToken" => {
                    " (hint: the session token is invalid or expired; sign in again with your session tooling)"
                }
                "Forbidden" | "InsufficientPrivileges" | "Authorization_RequestDenied" => {
                    " (hint: the signed-in principal needs a read role such as Global Reader for this service)"
                }
                "NotFound" => " (hint: the requested configuration object does not exist in this tenant)",
                "TooManyRequests" => " (hint: the service is throttling requests; run the check again later)",
                _ => "",
            };

            return format!("{}: {}{}", code, message, hint);
        }
    }

    error_response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_known_code_adds_hint() {
        let body = r#"{"error":{"code":"Forbidden","message":"Access denied"}}"#;
        let msg = enhance_admin_error(body);
        assert!(msg.starts_with("Forbidden: Access denied"));
        assert!(msg.contains("Global Reader"));
    }

    #[test]
    fn test_enhance_unknown_code_has_no_hint() {
        let body = r#"{"error":{"code":"Weird","message":"Something"}}"#;
        assert_eq!(enhance_admin_error(body), "Weird: Something");
    }

    #[test]
    fn test_enhance_passes_through_non_json() {
        assert_eq!(enhance_admin_error("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_missing_token_display_names_service() {
        let err = Cis365Error::MissingServiceToken(Service::ExchangeOnline);
        assert_eq!(
            err.to_string(),
            "No access token for Exchange Online in the current session"
        );
    }
}
