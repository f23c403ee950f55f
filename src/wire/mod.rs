//! HTTP/1 wire-format assembly
//!
//! Turns captured request/response models back into the raw byte form they
//! had on the network: start line, headers in observed order, blank line,
//! body. The assembler emits headers exactly as stored and never invents or
//! corrects `Content-Length`; the host proxy owns message correctness.

use thiserror::Error;

use crate::models::{CapturedRequest, CapturedResponse, Header};

/// A model that cannot be rendered as a valid HTTP/1 message.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),
    #[error("invalid request target {0:?}")]
    InvalidTarget(String),
    #[error("invalid HTTP version {0:?}")]
    InvalidVersion(String),
    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),
    #[error("header {name:?} has a value containing CR, LF or NUL")]
    InvalidHeaderValue { name: String },
    #[error("status code {0} outside 100..=999")]
    InvalidStatusCode(u16),
    #[error("reason phrase contains CR or LF")]
    InvalidReason,
}

/// RFC 9110 token characters, used for methods and header names.
fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}

fn is_valid_version(version: &str) -> bool {
    match version.strip_prefix("HTTP/") {
        Some(rest) => {
            // "HTTP/2" and "HTTP/1.1" are both seen in captures
            let mut parts = rest.splitn(2, '.');
            let major = parts.next().unwrap_or("");
            let minor = parts.next();
            !major.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.map_or(true, |m| {
                    !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit())
                })
        }
        None => false,
    }
}

fn is_valid_target(target: &str) -> bool {
    !target.is_empty() && target.bytes().all(|b| b > 0x20 && b != 0x7f)
}

fn is_valid_header_value(value: &str) -> bool {
    value.bytes().all(|b| b != b'\r' && b != b'\n' && b != 0)
}

fn write_headers(out: &mut Vec<u8>, headers: &[Header]) -> Result<(), WireError> {
    for header in headers {
        if !is_token(&header.name) {
            return Err(WireError::InvalidHeaderName(header.name.clone()));
        }
        if !is_valid_header_value(&header.value) {
            return Err(WireError::InvalidHeaderValue {
                name: header.name.clone(),
            });
        }
        out.extend_from_slice(header.name.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(header.value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(b"\r\n");
    Ok(())
}

/// Assemble a request into raw wire bytes (request line, headers, body).
pub fn assemble_request(request: &CapturedRequest) -> Result<Vec<u8>, WireError> {
    if !is_token(&request.method) {
        return Err(WireError::InvalidMethod(request.method.clone()));
    }
    if !is_valid_target(&request.target) {
        return Err(WireError::InvalidTarget(request.target.clone()));
    }
    if !is_valid_version(&request.http_version) {
        return Err(WireError::InvalidVersion(request.http_version.clone()));
    }

    let mut out = Vec::with_capacity(64 + request.body.len());
    out.extend_from_slice(request.method.as_bytes());
    out.push(b' ');
    out.extend_from_slice(request.target.as_bytes());
    out.push(b' ');
    out.extend_from_slice(request.http_version.as_bytes());
    out.extend_from_slice(b"\r\n");
    write_headers(&mut out, &request.headers)?;
    out.extend_from_slice(&request.body);
    Ok(out)
}

/// Assemble a response into raw wire bytes (status line, headers, body).
pub fn assemble_response(response: &CapturedResponse) -> Result<Vec<u8>, WireError> {
    if !is_valid_version(&response.http_version) {
        return Err(WireError::InvalidVersion(response.http_version.clone()));
    }
    if !(100..=999).contains(&response.status_code) {
        return Err(WireError::InvalidStatusCode(response.status_code));
    }
    if response.reason.bytes().any(|b| b == b'\r' || b == b'\n') {
        return Err(WireError::InvalidReason);
    }

    let mut out = Vec::with_capacity(64 + response.body.len());
    out.extend_from_slice(response.http_version.as_bytes());
    out.push(b' ');
    out.extend_from_slice(response.status_code.to_string().as_bytes());
    out.push(b' ');
    out.extend_from_slice(response.reason.as_bytes());
    out.extend_from_slice(b"\r\n");
    write_headers(&mut out, &response.headers)?;
    out.extend_from_slice(&response.body);
    Ok(out)
}
