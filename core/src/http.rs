//! # Request/Response Driver
//!
//! One fixed HTTP/1.0 request out, raw bytes back. Nothing here parses the
//! response: status line, headers and body travel through the sink exactly
//! as the peer sent them, and a zero-length read is the only success exit.

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use fetchr_common::debug;

/// Receive buffer capacity. The buffer is reused for every read and is
/// never grown; large responses simply take more iterations.
pub const RESPONSE_BUFFER_SIZE: usize = 1024;

/// Send or receive failed mid-exchange. Fatal either way; the caller closes
/// the connection and gives up.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("unable to send request: {source}")]
    Send {
        #[source]
        source: std::io::Error,
    },
    #[error("error reading response: {source}")]
    Recv {
        #[source]
        source: std::io::Error,
    },
    #[error("unable to forward response chunk: {source}")]
    Sink {
        #[source]
        source: std::io::Error,
    },
}

/// Renders the fixed request line and headers for one GET.
///
/// The `www.` prefix on the Host header is part of the fixed format and is
/// prepended verbatim, whatever `host` looks like.
pub fn build_request(host: &str, path: &str) -> String {
    format!("GET {path} HTTP/1.0\r\nHost: www.{host}\r\n\r\n")
}

/// Writes the whole request, looping on short writes until every byte is
/// out, then flushes.
pub async fn send_request<S>(stream: &mut S, request: &[u8]) -> Result<(), IoError>
where
    S: AsyncWrite + Unpin,
{
    stream
        .write_all(request)
        .await
        .map_err(|source| IoError::Send { source })?;
    stream
        .flush()
        .await
        .map_err(|source| IoError::Send { source })?;

    debug!("request sent ({} bytes)", request.len());
    Ok(())
}

/// Drains the response into `sink` until the peer closes its send side.
///
/// Each chunk is forwarded unmodified; the loop ends on the first
/// zero-length read and never touches the stream again. Returns the total
/// number of response bytes forwarded.
pub async fn stream_response<S, W>(stream: &mut S, sink: &mut W) -> Result<u64, IoError>
where
    S: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = [0u8; RESPONSE_BUFFER_SIZE];
    let mut total: u64 = 0;

    loop {
        let len = stream
            .read(&mut buffer)
            .await
            .map_err(|source| IoError::Recv { source })?;

        if len == 0 {
            break;
        }

        sink.write_all(&buffer[..len])
            .await
            .map_err(|source| IoError::Sink { source })?;
        total += len as u64;
    }

    sink.flush()
        .await
        .map_err(|source| IoError::Sink { source })?;

    Ok(total)
}



// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    /// Stream stub that serves a script of read results and panics if the
    /// driver keeps reading past the end of it.
    struct ScriptedStream {
        reads: VecDeque<io::Result<Vec<u8>>>,
    }

    impl ScriptedStream {
        fn new(reads: Vec<io::Result<Vec<u8>>>) -> Self {
            Self { reads: reads.into() }
        }
    }

    impl AsyncRead for ScriptedStream {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            match self.reads.pop_front() {
                Some(Ok(bytes)) => {
                    buf.put_slice(&bytes);
                    Poll::Ready(Ok(()))
                }
                Some(Err(err)) => Poll::Ready(Err(err)),
                None => panic!("read past end of script"),
            }
        }
    }

    #[test]
    fn request_is_plain_http10_text() {
        assert_eq!(
            build_request("google.com", "/"),
            "GET / HTTP/1.0\r\nHost: www.google.com\r\n\r\n"
        );
    }

    #[test]
    fn request_keeps_host_verbatim() {
        // No deduplication: a host that already starts with www. gets the
        // prefix anyway, exactly like the fixed request text.
        assert_eq!(
            build_request("www.example.test", "/index.html"),
            "GET /index.html HTTP/1.0\r\nHost: www.www.example.test\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn response_stops_at_end_of_stream() {
        let mut stream = ScriptedStream::new(vec![Ok(b"abc".to_vec()), Ok(Vec::new())]);
        let mut sink: Vec<u8> = Vec::new();

        let total = stream_response(&mut stream, &mut sink).await.unwrap();

        // The zero-length read ends the loop; a further read would panic.
        assert_eq!(total, 3);
        assert_eq!(sink, b"abc");
    }

    #[tokio::test]
    async fn response_chunks_arrive_in_order() {
        let mut stream = ScriptedStream::new(vec![
            Ok(b"HTTP/1.0 200 OK\r\n\r\n".to_vec()),
            Ok(b"hello ".to_vec()),
            Ok(b"world".to_vec()),
            Ok(Vec::new()),
        ]);
        let mut sink: Vec<u8> = Vec::new();

        let total = stream_response(&mut stream, &mut sink).await.unwrap();

        assert_eq!(total, 30);
        assert_eq!(sink, b"HTTP/1.0 200 OK\r\n\r\nhello world");
    }

    #[tokio::test]
    async fn read_error_is_fatal_but_keeps_partial_output() {
        let mut stream = ScriptedStream::new(vec![
            Ok(b"partial".to_vec()),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset")),
        ]);
        let mut sink: Vec<u8> = Vec::new();

        let result = stream_response(&mut stream, &mut sink).await;

        assert!(matches!(result, Err(IoError::Recv { .. })));
        assert_eq!(sink, b"partial");
    }

    #[tokio::test]
    async fn send_loops_until_the_whole_request_is_out() {
        // A 4-byte pipe forces write_all to go around several times.
        let (mut client, mut server) = tokio::io::duplex(4);
        let request = build_request("example.test", "/some/longer/path");
        let expected = request.clone();

        let reader = tokio::spawn(async move {
            let mut seen: Vec<u8> = Vec::new();
            let mut chunk = [0u8; 8];
            loop {
                let n = server.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                seen.extend_from_slice(&chunk[..n]);
            }
            seen
        });

        send_request(&mut client, request.as_bytes()).await.unwrap();
        drop(client);

        let seen = reader.await.unwrap();
        assert_eq!(seen, expected.as_bytes());
    }
}
