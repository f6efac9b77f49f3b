use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::http::request::{Method, Request};

/// Longest request line accepted, terminator included.
pub const MAX_LINE_LEN: usize = 8 * 1024;
pub const MAX_METHOD_LEN: usize = 16;
pub const MAX_PATH_LEN: usize = 1024;
pub const MAX_VERSION_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to answer: the peer closed or sent a blank line.
    NoRequest,
    /// A line arrived but is not `METHOD TARGET VERSION`.
    Malformed,
}

/// Reads the first line of `reader` and parses it.
///
/// Only that line is consumed; later header lines stay unread. The outer
/// `Result` carries transport failures, the inner one protocol outcomes.
pub async fn read_request<R>(reader: &mut R) -> std::io::Result<Result<Request, ParseError>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::with_capacity(256);
    let n = reader
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', &mut line)
        .await?;

    if n == 0 {
        return Ok(Err(ParseError::NoRequest));
    }
    if line.len() > MAX_LINE_LEN {
        return Ok(Err(ParseError::Malformed));
    }

    Ok(parse_request_line(&line))
}

/// Splits one request line into its three whitespace-separated tokens.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::Malformed)?;

    let mut parts = line.split_ascii_whitespace();

    let method = parts.next().ok_or(ParseError::NoRequest)?;
    let path = parts.next().ok_or(ParseError::Malformed)?;
    let version = parts.next().ok_or(ParseError::Malformed)?;

    if parts.next().is_some() {
        return Err(ParseError::Malformed);
    }

    if method.len() > MAX_METHOD_LEN
        || path.len() > MAX_PATH_LEN
        || version.len() > MAX_VERSION_LEN
    {
        return Err(ParseError::Malformed);
    }

    Ok(Request::new(Method::from_token(method), path, version))
}
