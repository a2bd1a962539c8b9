//! Error types for the currency converter.

use tracing::error;

/// Failures talking to the remote API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// Connection, DNS or protocol failure before a response arrived.
    #[error("HTTP error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The body arrived but could not be decoded.
    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidShape { endpoint: String, reason: String },
}

impl GatewayError {
    /// Transport-level failures are worth another attempt; a body that
    /// does not decode will not decode the second time either.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transport(_) | GatewayError::Api { .. })
    }

    /// Recovery strategy for call sites that swallow failures: logs the
    /// error against `operation` and hands back `fallback`.
    pub fn absorb<T>(operation: &'static str, fallback: T) -> impl FnOnce(GatewayError) -> T {
        move |err| {
            error!(operation, error = %err, "operation failed, using fallback");
            fallback
        }
    }
}

/// User-facing conversion failures.
///
/// The `Display` text is exactly what the widget shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A valid request was sent but the API returned no usable value.
    #[error("Conversion failed. Please try again.")]
    NoResult,

    /// The request never produced a decodable response.
    #[error("An error occurred. Please try again.")]
    Transport,
}

impl From<GatewayError> for ConversionError {
    fn from(_: GatewayError) -> Self {
        ConversionError::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(GatewayError::Transport("connection refused".into()).is_retryable());
        assert!(
            GatewayError::Api {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(
            !GatewayError::InvalidShape {
                endpoint: "convert".into(),
                reason: "expected value".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_absorb_returns_fallback() {
        let recover = GatewayError::absorb("getCurrencies", Vec::<u8>::new());
        assert!(recover(GatewayError::Transport("boom".into())).is_empty());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ConversionError::NoResult.to_string(),
            "Conversion failed. Please try again."
        );
        assert_eq!(
            ConversionError::Transport.to_string(),
            "An error occurred. Please try again."
        );
    }

    #[test]
    fn test_every_gateway_failure_shows_generic_message() {
        let failures = [
            GatewayError::Transport("reset".into()),
            GatewayError::Api {
                status: 401,
                message: "invalid api key".into(),
            },
            GatewayError::InvalidShape {
                endpoint: "convert".into(),
                reason: "expected value at line 1 column 1".into(),
            },
        ];
        for failure in failures {
            assert_eq!(ConversionError::from(failure), ConversionError::Transport);
        }
    }
}
