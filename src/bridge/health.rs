// Assistant Console - bridge/health.rs
//
// Engine health probe and best-effort stop request.
//
// The engine exposes a tiny HTTP /health endpoint on localhost. A raw
// TCP conversation with strict connect/read/write timeouts keeps the
// worst case under ~1 second regardless of what the engine is doing;
// the console never blocks its UI thread on these calls (see
// app/health.rs for the worker-thread plumbing).
//
// An unreachable engine is the normal "not started" case, not an error:
// `probe()` synthesizes an `offline` report for it.

use crate::core::model::HealthStatus;
use crate::util::constants::{
    ENGINE_CONNECT_TIMEOUT_MS, ENGINE_CONTROL_ADDR, ENGINE_HEALTH_ADDR, ENGINE_READ_TIMEOUT_MS,
    ENGINE_WRITE_TIMEOUT_MS,
};
use crate::util::error::BridgeError;
use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Query the engine's health endpoint.
///
/// Never fails: any transport problem is reported as an `offline` status
/// so callers can render a badge without an error path.
pub fn probe() -> HealthStatus {
    match probe_http(ENGINE_HEALTH_ADDR) {
        Ok(status) => status,
        Err(e) => {
            tracing::debug!(error = %e, "Health endpoint unreachable; reporting offline");
            HealthStatus::offline(now_unix_secs())
        }
    }
}

/// Ask the engine to shut down, then report its health.
///
/// The shutdown write is best-effort: a refused connection simply means
/// the engine is already gone. A short grace period lets the engine act
/// on the command before the follow-up probe.
pub fn request_stop() -> HealthStatus {
    match send_shutdown(ENGINE_CONTROL_ADDR) {
        Ok(()) => {
            std::thread::sleep(Duration::from_millis(ENGINE_WRITE_TIMEOUT_MS));
        }
        Err(e) => {
            tracing::debug!(error = %e, "Shutdown request not delivered");
        }
    }
    probe()
}

/// One `GET /health` conversation against `addr`.
fn probe_http(addr: &str) -> Result<HealthStatus, BridgeError> {
    let addr = addr
        .to_socket_addrs()
        .map_err(|e| BridgeError::Io {
            operation: "resolve health address",
            source: e,
        })?
        .next()
        .ok_or_else(|| BridgeError::MalformedResponse {
            operation: "resolve health address",
            detail: "no address resolved".to_string(),
        })?;

    let mut stream = TcpStream::connect_timeout(
        &addr,
        Duration::from_millis(ENGINE_CONNECT_TIMEOUT_MS),
    )
    .map_err(|e| BridgeError::Io {
        operation: "connect to health endpoint",
        source: e,
    })?;

    stream
        .set_read_timeout(Some(Duration::from_millis(ENGINE_READ_TIMEOUT_MS)))
        .map_err(|e| BridgeError::Io {
            operation: "set read timeout",
            source: e,
        })?;
    stream
        .set_write_timeout(Some(Duration::from_millis(ENGINE_WRITE_TIMEOUT_MS)))
        .map_err(|e| BridgeError::Io {
            operation: "set write timeout",
            source: e,
        })?;

    let request = format!(
        "GET /health HTTP/1.1\r\nHost: {ENGINE_HEALTH_ADDR}\r\nConnection: close\r\n\r\n"
    );
    stream
        .write_all(request.as_bytes())
        .map_err(|e| BridgeError::Io {
            operation: "send health request",
            source: e,
        })?;

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .map_err(|e| BridgeError::Io {
            operation: "read health response",
            source: e,
        })?;

    parse_health_response(&response)
}

/// Split the HTTP response and parse the JSON body.
///
/// The engine's fields are extracted defensively: a missing field becomes
/// an empty/unknown value rather than a failed probe.
fn parse_health_response(response: &str) -> Result<HealthStatus, BridgeError> {
    let body = response
        .split("\r\n\r\n")
        .nth(1)
        .ok_or_else(|| BridgeError::MalformedResponse {
            operation: "health probe",
            detail: "missing HTTP header/body separator".to_string(),
        })?;

    let json: serde_json::Value =
        serde_json::from_str(body.trim()).map_err(|e| BridgeError::MalformedResponse {
            operation: "health probe",
            detail: format!("body is not valid JSON: {e}"),
        })?;

    Ok(HealthStatus {
        status: json["status"].as_str().unwrap_or("unknown").to_string(),
        message: json["message"].as_str().unwrap_or("").to_string(),
        timestamp: json["timestamp"].as_str().unwrap_or("").to_string(),
    })
}

/// Deliver the plain-text `shutdown` command to the control port.
fn send_shutdown(addr: &str) -> Result<(), BridgeError> {
    let addr = addr
        .to_socket_addrs()
        .map_err(|e| BridgeError::Io {
            operation: "resolve control address",
            source: e,
        })?
        .next()
        .ok_or_else(|| BridgeError::MalformedResponse {
            operation: "resolve control address",
            detail: "no address resolved".to_string(),
        })?;

    let mut stream = TcpStream::connect_timeout(
        &addr,
        Duration::from_millis(ENGINE_CONNECT_TIMEOUT_MS),
    )
    .map_err(|e| BridgeError::Io {
        operation: "connect to control port",
        source: e,
    })?;
    stream
        .set_write_timeout(Some(Duration::from_millis(ENGINE_WRITE_TIMEOUT_MS)))
        .map_err(|e| BridgeError::Io {
            operation: "set write timeout",
            source: e,
        })?;
    stream.write_all(b"shutdown").map_err(|e| BridgeError::Io {
        operation: "send shutdown command",
        source: e,
    })
}

/// Seconds since the Unix epoch; 0 if the system clock is before 1970.
fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

// =============================================================================
// Unit tests
// =============================================================================
