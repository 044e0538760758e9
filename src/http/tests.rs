use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use super::executor::read_head;
use super::request::has_header_terminator;
use super::*;
use crate::domain::RunConfig;
use crate::metrics::FailureCategory;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn config_for(addr: SocketAddr, timeout: Duration) -> Result<RunConfig, String> {
    RunConfig::new(
        &addr.ip().to_string(),
        addr.port(),
        "/",
        1,
        timeout,
        Duration::ZERO,
        1,
    )
    .map_err(|err| err.to_string())
}

async fn bind_local() -> Result<(TcpListener, SocketAddr), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    Ok((listener, addr))
}

/// Accepts one connection, reads the request head, then writes `reply`
/// and closes.
fn serve_once(listener: TcpListener, reply: &'static [u8]) -> tokio::task::JoinHandle<Vec<u8>> {
    tokio::spawn(async move {
        let mut received = Vec::new();
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut head = ResponseHead::new();
            drop(read_head(&mut stream, &mut head).await);
            received = head_bytes(&head);
            if !reply.is_empty() {
                drop(stream.write_all(reply).await);
            }
            drop(stream.shutdown().await);
        }
        received
    })
}

fn head_bytes(head: &ResponseHead) -> Vec<u8> {
    head.status_line().into_bytes()
}

#[test]
fn request_bytes_match_wire_format() -> Result<(), String> {
    let request = build_request("127.0.0.1", "/cgi-bin/test_get.py");
    let expected: &[u8] =
        b"GET /cgi-bin/test_get.py HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n";
    if request != expected {
        return Err(format!(
            "Unexpected request: {}",
            String::from_utf8_lossy(&request)
        ));
    }
    Ok(())
}

#[test]
fn header_terminator_detection() -> Result<(), String> {
    let cases: [(&[u8], bool); 5] = [
        (b"HTTP/1.1 200 OK\r\n\r\n", true),
        (b"HTTP/1.0 200 OK\n\nbody", true),
        (b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n", false),
        (b"", false),
        (b"\r\n\r", false),
    ];
    for (input, expected) in cases {
        if has_header_terminator(input) != expected {
            return Err(format!(
                "Unexpected result for {:?}",
                String::from_utf8_lossy(input)
            ));
        }
    }
    Ok(())
}

#[test]
fn response_head_detects_terminator_across_chunks() -> Result<(), String> {
    let mut head = ResponseHead::new();
    if head.push(b"HTTP/1.1 204 No Content\r\n\r") {
        return Err("Terminator reported too early".to_owned());
    }
    if !head.push(b"\n") {
        return Err("Terminator split across chunks was missed".to_owned());
    }
    if head.bytes_read() != 27 {
        return Err(format!("Unexpected byte count {}", head.bytes_read()));
    }
    if head.status_line() != "HTTP/1.1 204 No Content" {
        return Err(format!("Unexpected status line {:?}", head.status_line()));
    }
    Ok(())
}

#[test]
fn response_head_status_line_is_lossy() -> Result<(), String> {
    let mut head = ResponseHead::new();
    head.push(b"HTTP/1.1 200 \xffOK\r\n\r\n");
    if !head.status_line().starts_with("HTTP/1.1 200 ") {
        return Err(format!("Unexpected status line {:?}", head.status_line()));
    }
    let empty = ResponseHead::new();
    if !empty.status_line().is_empty() || empty.is_complete() {
        return Err("Empty head should have an empty status line".to_owned());
    }
    Ok(())
}

#[test]
fn status_line_ends_at_any_line_boundary() -> Result<(), String> {
    let cases: [(&[u8], &str); 4] = [
        (b"HTTP/1.0 200 OK\rX-Foo: 1\n\n", "HTTP/1.0 200 OK"),
        (b"HTTP/1.1 200 OK\r\n\r\n", "HTTP/1.1 200 OK"),
        (b"HTTP/1.1 200 OK\x0cjunk\n\n", "HTTP/1.1 200 OK"),
        (b"\nHTTP/1.1 200 OK\n\n", ""),
    ];
    for (input, expected) in cases {
        let mut head = ResponseHead::new();
        head.push(input);
        if head.status_line() != expected {
            return Err(format!(
                "Unexpected status line {:?} for {:?}",
                head.status_line(),
                String::from_utf8_lossy(input)
            ));
        }
    }
    Ok(())
}

#[test]
fn read_head_stops_at_terminator() -> Result<(), String> {
    run_async_test(async {
        let payload: &[u8] = b"HTTP/1.1 200 OK\r\nX-A: 1\r\n\r\nbody that arrives in the same chunk";
        let mut reader = payload;
        let mut head = ResponseHead::new();
        read_head(&mut reader, &mut head)
            .await
            .map_err(|err| format!("read failed: {}", err))?;
        if !head.is_complete() {
            return Err("Expected a complete head".to_owned());
        }
        let expected = u64::try_from(payload.len()).map_err(|err| err.to_string())?;
        if head.bytes_read() != expected {
            return Err(format!("Unexpected bytes {}", head.bytes_read()));
        }
        Ok(())
    })
}

#[test]
fn executor_reports_success_with_status_line() -> Result<(), String> {
    run_async_test(async {
        let (listener, addr) = bind_local().await?;
        let server = serve_once(listener, b"HTTP/1.1 200 OK\r\n\r\n");
        let executor = RequestExecutor::new(&config_for(addr, Duration::from_secs(5))?);

        let outcome = executor.execute(0).await;
        let received = server.await.map_err(|err| err.to_string())?;

        if !outcome.is_success() {
            return Err(format!("Expected success, got {:?}", outcome.category()));
        }
        if outcome.status_line() != "HTTP/1.1 200 OK" {
            return Err(format!("Unexpected status line {:?}", outcome.status_line()));
        }
        if outcome.bytes_read() == 0 {
            return Err("Expected bytes to be read".to_owned());
        }
        if received != b"GET / HTTP/1.1" {
            return Err(format!(
                "Server saw unexpected request line {:?}",
                String::from_utf8_lossy(&received)
            ));
        }
        Ok(())
    })
}

#[test]
fn executor_counts_empty_close_as_success() -> Result<(), String> {
    run_async_test(async {
        let (listener, addr) = bind_local().await?;
        let server = serve_once(listener, b"");
        let executor = RequestExecutor::new(&config_for(addr, Duration::from_secs(5))?);

        let outcome = executor.execute(0).await;
        drop(server.await);

        if !outcome.is_success() {
            return Err(format!("Expected success, got {:?}", outcome.category()));
        }
        if outcome.bytes_read() != 0 || !outcome.status_line().is_empty() {
            return Err("Expected zero bytes and an empty status line".to_owned());
        }
        Ok(())
    })
}

#[test]
fn executor_reports_connect_error_without_listener() -> Result<(), String> {
    run_async_test(async {
        let (listener, addr) = bind_local().await?;
        drop(listener);
        let executor = RequestExecutor::new(&config_for(addr, Duration::from_secs(5))?);

        let outcome = executor.execute(0).await;
        if outcome.category() != FailureCategory::ConnectError {
            return Err(format!("Expected connect error, got {:?}", outcome.category()));
        }
        if !outcome.latency().is_zero() || outcome.bytes_read() != 0 {
            return Err("Connect errors carry no latency or bytes".to_owned());
        }
        Ok(())
    })
}

#[test]
fn executor_times_out_on_silent_target() -> Result<(), String> {
    run_async_test(async {
        let (listener, addr) = bind_local().await?;
        let server = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut sink = Vec::new();
                drop(stream.read_to_end(&mut sink).await);
            }
        });
        let executor = RequestExecutor::new(&config_for(addr, Duration::from_millis(200))?);

        let started = tokio::time::Instant::now();
        let outcome = executor.execute(0).await;
        let waited = started.elapsed();
        drop(server.await);

        if outcome.category() != FailureCategory::Timeout {
            return Err(format!("Expected timeout, got {:?}", outcome.category()));
        }
        if waited < Duration::from_millis(150) || waited > Duration::from_secs(3) {
            return Err(format!("Unexpected wait before timeout: {:?}", waited));
        }
        Ok(())
    })
}

#[test]
fn executor_does_not_wait_for_close_after_headers() -> Result<(), String> {
    run_async_test(async {
        let (listener, addr) = bind_local().await?;
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut head = ResponseHead::new();
                drop(read_head(&mut stream, &mut head).await);
                drop(stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n").await);
                drop(release_rx.await);
            }
        });
        let executor = RequestExecutor::new(&config_for(addr, Duration::from_secs(5))?);

        let outcome = tokio::time::timeout(Duration::from_secs(2), executor.execute(0))
            .await
            .map_err(|_elapsed| "Executor waited for the peer to close".to_owned())?;
        drop(release_tx.send(()));
        drop(server.await);

        if !outcome.is_success() || outcome.status_line() != "HTTP/1.1 200 OK" {
            return Err(format!("Unexpected outcome {:?}", outcome));
        }
        Ok(())
    })
}

#[test]
fn executor_reports_read_error_on_reset() -> Result<(), String> {
    run_async_test(async {
        let (listener, addr) = bind_local().await?;
        let server = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut head = ResponseHead::new();
                drop(read_head(&mut stream, &mut head).await);
                drop(stream.set_zero_linger());
                drop(stream);
            }
        });
        let executor = RequestExecutor::new(&config_for(addr, Duration::from_secs(5))?);

        let outcome = executor.execute(0).await;
        drop(server.await);

        if outcome.category() != FailureCategory::ReadError {
            return Err(format!("Expected read error, got {:?}", outcome.category()));
        }
        if outcome.is_success() || !outcome.latency().is_zero() {
            return Err(format!("Read errors carry no latency: {:?}", outcome));
        }
        Ok(())
    })
}
