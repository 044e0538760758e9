use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout_at};
use tracing::debug;

use crate::domain::RunConfig;
use crate::metrics::{FailureCategory, RequestOutcome};

use super::request::{ResponseHead, build_request};

/// Size of each read issued while waiting for the response head.
pub(crate) const READ_CHUNK_SIZE: usize = 1024;

/// One complete request/response cycle. Implementations must classify every
/// failure into the returned outcome instead of propagating it.
pub trait ExecuteRequest {
    fn execute(&self, client: usize) -> impl Future<Output = RequestOutcome>;
}

/// Performs a single `GET` over a fresh TCP connection.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    host: String,
    port: u16,
    timeout: Duration,
    request: Vec<u8>,
}

impl RequestExecutor {
    #[must_use]
    pub fn new(config: &RunConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            timeout: config.timeout,
            request: build_request(&config.host, &config.path),
        }
    }

    async fn run_once(&self, client: usize) -> RequestOutcome {
        let start = Instant::now();
        // Deadline covers connect, write and the header read.
        let deadline = start.checked_add(self.timeout);

        let mut stream =
            match within(deadline, TcpStream::connect((self.host.as_str(), self.port))).await {
                Some(Ok(stream)) => stream,
                Some(Err(err)) => {
                    debug!(client, "connect failed: {}", err);
                    return RequestOutcome::failure(FailureCategory::ConnectError, 0);
                }
                None => {
                    debug!(client, "connect timed out");
                    return RequestOutcome::failure(FailureCategory::Timeout, 0);
                }
            };

        match within(deadline, stream.write_all(&self.request)).await {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                debug!(client, "send failed: {}", err);
                close_quietly(stream).await;
                return RequestOutcome::failure(FailureCategory::SendError, 0);
            }
            None => {
                debug!(client, "send timed out");
                return RequestOutcome::failure(FailureCategory::Timeout, 0);
            }
        }

        let mut head = ResponseHead::new();
        match within(deadline, read_head(&mut stream, &mut head)).await {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                debug!(client, bytes = head.bytes_read(), "read failed: {}", err);
                close_quietly(stream).await;
                return RequestOutcome::failure(FailureCategory::ReadError, head.bytes_read());
            }
            None => {
                debug!(client, bytes = head.bytes_read(), "response timed out");
                return RequestOutcome::failure(FailureCategory::Timeout, head.bytes_read());
            }
        }

        if !head.is_complete() {
            debug!(client, bytes = head.bytes_read(), "peer closed before end of headers");
        }
        close_quietly(stream).await;
        RequestOutcome::success(start.elapsed(), head.bytes_read(), head.status_line())
    }
}

impl ExecuteRequest for RequestExecutor {
    fn execute(&self, client: usize) -> impl Future<Output = RequestOutcome> {
        self.run_once(client)
    }
}

/// Reads chunks until the header terminator arrives or the peer closes.
pub(crate) async fn read_head<R>(reader: &mut R, head: &mut ResponseHead) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut chunk = [0_u8; READ_CHUNK_SIZE];
    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        if head.push(chunk.get(..read).unwrap_or_default()) {
            return Ok(());
        }
    }
}

async fn within<F>(deadline: Option<Instant>, future: F) -> Option<F::Output>
where
    F: Future,
{
    match deadline {
        Some(deadline) => timeout_at(deadline, future).await.ok(),
        None => Some(future.await),
    }
}

async fn close_quietly(mut stream: TcpStream) {
    drop(stream.shutdown().await);
}
