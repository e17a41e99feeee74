// src/core/net.rs

// HTTP/1.0 form submission over plain TCP (std-only).
// HTTP/1.0 + Connection: close means the server ends the stream for us,
// so there is no chunked-transfer handling to worry about.

use std::{
    io::{Read, Write},
    net::TcpStream,
    time::Duration,
};

/// Percent-encode a form value (application/x-www-form-urlencoded).
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// POST a single-field form and return the response body as a String.
pub fn form_post(
    host: &str,
    port: u16,
    path: &str,
    field: &str,
    value: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect((host, port))?;
    stream.set_read_timeout(Some(Duration::from_secs(15)))?;
    stream.set_write_timeout(Some(Duration::from_secs(15)))?;

    let body = format!("{}={}", urlencode(field), urlencode(value));
    let req = format!(
        "POST {path} HTTP/1.0\r\n\
         Host: {host}\r\n\
         User-Agent: commonality/0.3\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(req.as_bytes())?;
    stream.flush()?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(format!("HTTP error: {status} {host}{path}").into());
    }
    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")? + 4;
    Ok(resp[body_idx..].to_string())
}
