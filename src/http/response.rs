use bytes::Bytes;

/// Content type of every successful response; not derived from the file.
pub const HTML: &str = "text/html";
/// Content type of every error response.
pub const PLAIN_TEXT: &str = "text/plain";

/// HTTP status codes the server produces.
///
/// - `Ok` (200): File served
/// - `BadRequest` (400): Malformed request line
/// - `NotFound` (404): Missing target or a directory
/// - `InternalServerError` (500): Target exists but could not be opened
/// - `NotImplemented` (501): Method other than GET or HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// What follows the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// No body; `Content-Length: 0`.
    Empty,
    /// Exactly these bytes.
    Full(Bytes),
    /// Answer to HEAD: the length of the body GET would send, but no bytes.
    HeadersOnly(u64),
}

impl Body {
    /// The value written in `Content-Length`.
    pub fn content_length(&self) -> u64 {
        match self {
            Body::Empty => 0,
            Body::Full(bytes) => bytes.len() as u64,
            Body::HeadersOnly(len) => *len,
        }
    }

    /// The bytes written after the blank line.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Body::Full(bytes) => bytes,
            Body::Empty | Body::HeadersOnly(_) => &[],
        }
    }
}

/// A complete HTTP/1.0 response ready to be framed.
///
/// Every response closes the connection, so `Connection: close` is not
/// stored here; the writer always emits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Body,
}

impl Response {
    pub fn new(status: StatusCode, content_type: &'static str, body: Body) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// 200 OK carrying file contents.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::Ok, HTML, Body::Full(body.into()))
    }

    /// 200 OK for HEAD: announces `len` bytes without sending them.
    pub fn ok_headers_only(len: u64) -> Self {
        Self::new(StatusCode::Ok, HTML, Body::HeadersOnly(len))
    }

    pub fn bad_request() -> Self {
        Self::plain(StatusCode::BadRequest, "Bad Request\n")
    }

    pub fn not_found() -> Self {
        Self::plain(StatusCode::NotFound, "File Not Found\n")
    }

    pub fn internal_error() -> Self {
        Self::plain(StatusCode::InternalServerError, "Internal Server Error\n")
    }

    pub fn not_implemented() -> Self {
        Self::plain(StatusCode::NotImplemented, "Not Implemented\n")
    }

    fn plain(status: StatusCode, message: &'static str) -> Self {
        Self::new(status, PLAIN_TEXT, Body::Full(Bytes::from_static(message.as_bytes())))
    }

    pub fn content_length(&self) -> u64 {
        self.body.content_length()
    }
}
