use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, BufReader};
use tracing::{debug, warn};

use crate::config::Config;
use crate::fs::{ResolvedTarget, resolve};
use crate::http::parser::{self, ParseError};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// One accepted client, one request, one response.
///
/// The stream is owned here and released when the `Connection` is dropped,
/// whichever way `run` returns.
pub struct Connection<S> {
    stream: S,
    config: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Resolving(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        Self {
            stream,
            config,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Ok(req) => ConnectionState::Resolving(req),
                        Err(ParseError::NoRequest) => {
                            debug!("peer sent no request line");
                            ConnectionState::Closed
                        }
                        Err(ParseError::Malformed) => {
                            debug!("malformed request line");
                            ConnectionState::Writing(ResponseWriter::new(&Response::bad_request()))
                        }
                    };
                }

                ConnectionState::Resolving(req) => {
                    let response = respond(&self.config, &req).await;
                    debug!(
                        method = %req.method,
                        path = %req.path,
                        version = %req.version,
                        status = response.status.as_u16(),
                        "request handled"
                    );
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer
                        .write_to_stream(&mut self.stream)
                        .await
                        .context("writing response")?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<Result<Request, ParseError>> {
        let mut reader = BufReader::new(&mut self.stream);
        let parsed = parser::read_request(&mut reader)
            .await
            .context("reading request line")?;
        Ok(parsed)
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }
}

/// Picks the single response for `req`.
async fn respond(config: &Config, req: &Request) -> Response {
    let target = resolve(&config.root, &req.path, config.confine_to_root).await;

    match target {
        ResolvedTarget::NotFound | ResolvedTarget::IsDirectory => Response::not_found(),
        ResolvedTarget::Unreadable => Response::internal_error(),
        ResolvedTarget::Readable { .. } if !req.method.is_supported() => {
            Response::not_implemented()
        }
        ResolvedTarget::Readable { size, .. } if req.method == Method::HEAD => {
            Response::ok_headers_only(size)
        }
        ResolvedTarget::Readable { size, file } => read_body(file, size).await,
    }
}

async fn read_body(mut file: tokio::fs::File, size: u64) -> Response {
    let mut body = Vec::with_capacity(size as usize);

    match file.read_to_end(&mut body).await {
        Ok(_) => Response::ok(body),
        Err(e) => {
            warn!(error = %e, "failed reading file body");
            Response::internal_error()
        }
    }
}
