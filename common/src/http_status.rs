//! HTTP status classification for upstream responses.

/// Status code returned by an upstream service.
///
/// Stored as a number so error handling branches on the code, never on
/// message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// 401 or 403: the bearer token was rejected and must be dropped.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.0, 401 | 403)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
