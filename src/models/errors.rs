//! Error classification shared by the CLI, the API and report sections
//!
//! Codes are `CATEGORY_DETAIL` strings. Input and pair-lookup failures abort
//! an evaluation; the upstream codes (holders, WHOIS, TLS, scraper) normally
//! end up as `SectionError` entries instead.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    InputInvalidUrl,
    TokenNotFound,
    MarketDataError,
    HolderDataError,
    WhoisError,
    TlsProbeFailed,
    ScraperError,
    ApiBadRequest,
    ApiInternalError,
    /// A provider was constructed without its key
    ConfigMissingApiKey,
    ExternalTimeout,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputInvalidUrl => "INPUT_INVALID_URL",
            Self::TokenNotFound => "TOKEN_NOT_FOUND",
            Self::MarketDataError => "MARKET_DATA_ERROR",
            Self::HolderDataError => "HOLDER_DATA_ERROR",
            Self::WhoisError => "WHOIS_ERROR",
            Self::TlsProbeFailed => "TLS_PROBE_FAILED",
            Self::ScraperError => "SCRAPER_ERROR",
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::ConfigMissingApiKey => "CFG_MISSING_API_KEY",
            Self::ExternalTimeout => "EXTERNAL_TIMEOUT",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Status returned by the HTTP API when this code aborts a request
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InputInvalidUrl | Self::ApiBadRequest => 400,
            Self::TokenNotFound => 404,
            Self::ExternalTimeout => 504,
            code if code.is_upstream() => 502,
            _ => 500,
        }
    }

    /// Failures of a remote data source
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::MarketDataError
                | Self::HolderDataError
                | Self::WhoisError
                | Self::TlsProbeFailed
                | Self::ScraperError
        )
    }

    /// Codes that only degrade one report section
    pub fn is_section_local(&self) -> bool {
        (self.is_upstream() && *self != Self::MarketDataError) || *self == Self::ConfigMissingApiKey
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure: code, message and optionally the error behind it
#[derive(Debug)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    cause: Option<eyre::Report>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the underlying error, exposed through `Error::source`
    pub fn caused_by(mut self, cause: impl Into<eyre::Report>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn invalid_url() -> Self {
        Self::new(ErrorCode::InputInvalidUrl, "Invalid DexScreener URL format.")
    }

    pub fn token_not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::TokenNotFound, msg)
    }

    pub fn market_data(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::MarketDataError, msg)
    }

    pub fn missing_api_key(var: &str) -> Self {
        Self::new(ErrorCode::ConfigMissingApiKey, format!("{} is not set", var))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Recovers an `AppError` that travelled inside an eyre report
impl From<eyre::Report> for AppError {
    fn from(report: eyre::Report) -> Self {
        match report.downcast::<AppError>() {
            Ok(app) => app,
            Err(other) => Self::new(ErrorCode::Unknown, other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::ExternalTimeout
        } else {
            ErrorCode::Unknown
        };
        Self::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::Unknown, "Malformed JSON").caused_by(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorCode::Unknown, "I/O failure").caused_by(err)
    }
}
