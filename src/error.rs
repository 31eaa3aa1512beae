//! Error types for presto-metrico
//!
//! This module defines the error types used throughout the application.

use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Collector error
    #[error("Collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Statsd transport could not be initialized
    #[error("Failed to initialize statsd client: {0}")]
    Statsd(#[source] std::io::Error),
}

/// Collector 모듈 에러 타입
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Bean Catalog에 없는 논리 그룹
    #[error("Unknown metric group: {0}")]
    UnknownMetricGroup(String),

    /// HTTP 클라이언트 초기화 실패
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClientInit(#[source] reqwest::Error),

    /// HTTP 요청 실패
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[source] reqwest::Error),

    /// HTTP 응답 읽기 실패
    #[error("Failed to read HTTP response: {0}")]
    HttpResponse(#[source] reqwest::Error),

    /// HTTP 상태 코드 에러
    #[error("HTTP error status: {0}")]
    HttpStatus(u16),

    /// JSON 파싱 에러
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// 타임아웃
    /// The value is the configured timeout in milliseconds, if known.
    #[error("Request timed out{}", .0.map(|ms| format!(" after {}ms", ms)).unwrap_or_default())]
    Timeout(Option<u64>),

    /// 연결 실패
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

impl CollectorError {
    /// 네트워크 계층 실패인지 확인 (bean은 이번 pass에서 건너뜀)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CollectorError::HttpRequest(_)
                | CollectorError::HttpResponse(_)
                | CollectorError::HttpStatus(_)
                | CollectorError::Timeout(..)
                | CollectorError::ConnectionFailed(_)
        )
    }

    /// 응답 본문 디코딩 실패인지 확인
    pub fn is_decode(&self) -> bool {
        matches!(self, CollectorError::JsonParse(_))
    }

    /// HTTP 상태 코드 추출
    pub fn http_status(&self) -> Option<u16> {
        match self {
            CollectorError::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }

    /// Create a Timeout error with known duration
    pub fn timeout_with_duration(ms: u64) -> Self {
        CollectorError::Timeout(Some(ms))
    }

    /// Classify a reqwest error, attaching the configured timeout when known
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            CollectorError::timeout_with_duration(timeout_ms)
        } else {
            CollectorError::from(err)
        }
    }
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // Timeout value is unknown when converting from reqwest::Error
            // because reqwest API doesn't expose the configured timeout duration.
            CollectorError::Timeout(None)
        } else if err.is_connect() {
            CollectorError::ConnectionFailed(err.to_string())
        } else if err.is_request() {
            CollectorError::HttpRequest(err)
        } else {
            CollectorError::HttpResponse(err)
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
