//! Response logger
//!
//! Appends each completed exchange to the capture sink in raw HTTP/1 wire
//! format, one entry per exchange:
//!
//! ```text
//! <blank line>
//! <request bytes as UTF-8 text>
//! <blank line>
//! <blank line>
//! <response bytes as UTF-8 text, invalid sequences replaced with U+FFFD>
//! <blank line>
//! ```
//!
//! Requests must decode as strict UTF-8; a malformed request fails the call
//! with nothing written. Response bodies are decoded lossily so a binary
//! payload can never fail a capture.

use anyhow::{anyhow, Context};
use std::io::Write;
use std::sync::Mutex;

use crate::capture::hooks::ExchangeHook;
use crate::capture::sink::DumpFile;
use crate::capture::CaptureConfig;
use crate::models::Exchange;
use crate::wire;

/// Logs completed exchanges to an injected sink.
pub struct ResponseLogger<W: Write> {
    // Entries must land contiguously even if the host dispatches hooks from
    // more than one thread, so the sink sits behind a lock.
    sink: Mutex<W>,
}

impl ResponseLogger<DumpFile> {
    /// Open the configured capture file and build a logger over it.
    pub fn from_config(config: &CaptureConfig) -> anyhow::Result<Self> {
        Ok(Self::new(DumpFile::create(&config.output_path)?))
    }
}

impl<W: Write> ResponseLogger<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Append one capture entry for `exchange` and flush the sink.
    ///
    /// On return the entry is visible to readers of the underlying file.
    pub fn log_exchange(&self, exchange: &Exchange) -> anyhow::Result<()> {
        let request_bytes = wire::assemble_request(&exchange.request)
            .with_context(|| format!("serializing request of exchange {}", exchange.id))?;
        let request_text = String::from_utf8(request_bytes)
            .map_err(|_| anyhow!("request of exchange {} is not valid UTF-8", exchange.id))?;

        let response_bytes = wire::assemble_response(&exchange.response)
            .with_context(|| format!("serializing response of exchange {}", exchange.id))?;
        // Lossy by policy: binary response bodies get U+FFFD per invalid
        // sequence instead of failing the capture.
        let response_text = String::from_utf8_lossy(&response_bytes);

        let mut entry = String::with_capacity(request_text.len() + response_text.len() + 4);
        entry.push('\n');
        entry.push_str(&request_text);
        entry.push_str("\n\n");
        entry.push_str(&response_text);
        entry.push('\n');

        let mut sink = self
            .sink
            .lock()
            .map_err(|e| anyhow!("capture sink lock poisoned: {}", e))?;
        sink.write_all(entry.as_bytes())
            .context("appending capture entry")?;
        sink.flush().context("flushing capture sink")?;

        tracing::debug!(
            "Captured exchange {} ({} {})",
            exchange.id,
            exchange.request.method,
            exchange.request.target
        );
        Ok(())
    }

    /// Tear down the logger and hand back the sink.
    pub fn into_inner(self) -> anyhow::Result<W> {
        self.sink
            .into_inner()
            .map_err(|e| anyhow!("capture sink lock poisoned: {}", e))
    }
}

impl<W: Write + Send> ExchangeHook for ResponseLogger<W> {
    fn on_exchange_complete(&self, exchange: &Exchange) -> anyhow::Result<()> {
        self.log_exchange(exchange)
    }

    fn name(&self) -> &str {
        "response-logger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CapturedRequest, CapturedResponse, Header};

    fn get_exchange(path: &str, body: &[u8]) -> Exchange {
        Exchange::new(
            CapturedRequest {
                method: "GET".to_string(),
                target: path.to_string(),
                http_version: "HTTP/1.1".to_string(),
                headers: vec![Header::new("Host", "example.com")],
                body: Vec::new(),
            },
            CapturedResponse {
                http_version: "HTTP/1.1".to_string(),
                status_code: 200,
                reason: "OK".to_string(),
                headers: vec![Header::new("Content-Type", "text/plain")],
                body: body.to_vec(),
            },
        )
    }

    fn logged(logger: ResponseLogger<Vec<u8>>) -> String {
        String::from_utf8(logger.into_inner().expect("sink")).expect("utf8 output")
    }

    #[test]
    fn entry_matches_template() {
        let logger = ResponseLogger::new(Vec::new());
        logger
            .log_exchange(&get_exchange("/hello", b"hi"))
            .expect("log ok");

        assert_eq!(
            logged(logger),
            "\n\
             GET /hello HTTP/1.1\r\n\
             Host: example.com\r\n\
             \r\n\
             \n\n\
             HTTP/1.1 200 OK\r\n\
             Content-Type: text/plain\r\n\
             \r\n\
             hi\n"
        );
    }

    #[test]
    fn entries_are_ordered_by_call_order() {
        let logger = ResponseLogger::new(Vec::new());
        for i in 0..3 {
            logger
                .log_exchange(&get_exchange(&format!("/page/{i}"), b"x"))
                .expect("log ok");
        }

        let out = logged(logger);
        let p0 = out.find("/page/0").unwrap();
        let p1 = out.find("/page/1").unwrap();
        let p2 = out.find("/page/2").unwrap();
        assert!(p0 < p1 && p1 < p2);
    }

    #[test]
    fn binary_response_body_is_replaced_not_fatal() {
        let logger = ResponseLogger::new(Vec::new());
        logger
            .log_exchange(&get_exchange("/blob", &[0x68, 0x69, 0xff, 0xfe]))
            .expect("binary body still logs");

        let out = logged(logger);
        assert!(out.contains("hi\u{fffd}\u{fffd}"));
    }

    #[test]
    fn malformed_request_writes_nothing() {
        let logger = ResponseLogger::new(Vec::new());
        let mut ex = get_exchange("/ok", b"ok");
        ex.request.method = "BAD METHOD".to_string();

        assert!(logger.log_exchange(&ex).is_err());
        assert!(logged(logger).is_empty(), "failed call leaves no partial entry");
    }

    #[test]
    fn non_utf8_request_body_fails_the_call() {
        let logger = ResponseLogger::new(Vec::new());
        let mut ex = get_exchange("/upload", b"ok");
        ex.request.method = "POST".to_string();
        ex.request.body = vec![0xde, 0xad, 0xbe, 0xef];

        assert!(logger.log_exchange(&ex).is_err());
        assert!(logged(logger).is_empty());
    }
}
