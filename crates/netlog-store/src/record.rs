//! Record - The stored HTTP log entry
//!
//! One record is one observation of an HTTP exchange: either the outgoing
//! request or the incoming response, tied together by `query_id`.

use serde::{Deserialize, Serialize};

/// Which side of the exchange a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    /// Outgoing request
    Request,
    /// Incoming response
    Response,
}

impl QueryType {
    /// Returns the stored representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "REQUEST",
            Self::Response => "RESPONSE",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUEST" => Ok(Self::Request),
            "RESPONSE" => Ok(Self::Response),
            _ => Err(format!("unknown query type: {s}")),
        }
    }
}

/// A captured HTTP request or response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpLogRecord {
    /// Row identifier, assigned on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Correlation id shared by a request and its response
    pub query_id: String,
    /// Request or response
    pub query_type: QueryType,
    /// HTTP method
    #[serde(default)]
    pub method: Option<String>,
    /// Status code, absent until a response arrives
    #[serde(default)]
    pub code: Option<u16>,
    /// Status message
    #[serde(default)]
    pub message: Option<String>,
    /// Full status line
    #[serde(default)]
    pub full_status: Option<String>,
    /// Short IP address
    #[serde(default)]
    pub ip: Option<String>,
    /// Full IP address
    #[serde(default)]
    pub full_ip_address: Option<String>,
    /// Observation time, as reported by the capturing layer
    #[serde(default)]
    pub time: Option<String>,
    /// Exchange duration
    #[serde(default)]
    pub duration: Option<String>,
    /// Request content type
    #[serde(default)]
    pub request_content_type: Option<String>,
    /// Body size
    #[serde(default)]
    pub body_size: Option<String>,
    /// Remote port
    #[serde(default)]
    pub port: Option<String>,
    /// Request URL
    #[serde(default)]
    pub url: Option<String>,
    /// Body text
    #[serde(default)]
    pub body: Option<String>,
    /// Failure description, present only when the exchange failed
    #[serde(default)]
    pub error_message: Option<String>,
    /// Header lines in wire order
    #[serde(default)]
    pub headers: Vec<String>,
}

impl HttpLogRecord {
    /// Create an empty record of the given kind
    #[must_use]
    pub fn new(query_id: impl Into<String>, query_type: QueryType) -> Self {
        Self {
            id: None,
            query_id: query_id.into(),
            query_type,
            method: None,
            code: None,
            message: None,
            full_status: None,
            ip: None,
            full_ip_address: None,
            time: None,
            duration: None,
            request_content_type: None,
            body_size: None,
            port: None,
            url: None,
            body: None,
            error_message: None,
            headers: Vec::new(),
        }
    }

    /// Create a request record
    #[must_use]
    pub fn request(
        query_id: impl Into<String>,
        method: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let mut record = Self::new(query_id, QueryType::Request);
        record.method = Some(method.into());
        record.url = Some(url.into());
        record
    }

    /// Create a response record
    #[must_use]
    pub fn response(query_id: impl Into<String>, code: u16) -> Self {
        let mut record = Self::new(query_id, QueryType::Response);
        record.code = Some(code);
        record
    }

    /// Set the status message and full status line
    #[must_use]
    pub fn with_status(
        mut self,
        message: impl Into<String>,
        full_status: impl Into<String>,
    ) -> Self {
        self.message = Some(message.into());
        self.full_status = Some(full_status.into());
        self
    }

    /// Set the short and full IP address
    #[must_use]
    pub fn with_address(
        mut self,
        ip: impl Into<String>,
        full_ip_address: impl Into<String>,
    ) -> Self {
        self.ip = Some(ip.into());
        self.full_ip_address = Some(full_ip_address.into());
        self
    }

    /// Set the port
    #[must_use]
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the observation time
    #[must_use]
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Set the duration
    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Set the body, its size and the request content type
    #[must_use]
    pub fn with_body(
        mut self,
        body: impl Into<String>,
        body_size: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        self.body = Some(body.into());
        self.body_size = Some(body_size.into());
        self.request_content_type = Some(content_type.into());
        self
    }

    /// Set the error message
    #[must_use]
    pub fn with_error(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    /// Replace the header lines
    #[must_use]
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this record describes a failed exchange
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error_message.as_deref().is_some_and(|m| !m.is_empty())
            || self.code.is_some_and(|c| (400..=599).contains(&c))
    }
}
