use std::fmt;

/// HTTP request methods.
///
/// Only `GET` and `HEAD` are served. Anything else is carried through so the
/// connection handler can answer it with 501 Not Implemented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// Any other token, kept verbatim
    Other(String),
}

/// The parsed request line.
///
/// Headers and bodies are never read, so this is all the server knows about
/// a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (GET, HEAD, ...)
    pub method: Method,
    /// The raw request target (e.g., "/index.html")
    pub path: String,
    /// Protocol version token, informational only
    pub version: String,
}

impl Method {
    /// Maps a method token to a `Method`.
    ///
    /// Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::Other(s) => s,
        }
    }

    /// True for the methods that may be answered with file contents.
    pub fn is_supported(&self) -> bool {
        matches!(self, Method::GET | Method::HEAD)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: version.into(),
        }
    }
}
