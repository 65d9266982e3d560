//! Request signing for Hunyuan's HMAC-SHA1 authentication scheme
//!
//! The signature covers the endpoint's host and path followed by a canonical
//! query string of the request fields. The vendor verifies it byte for byte,
//! so field order, float formatting and JSON escaping are all fixed here.

use std::io;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha1::Sha1;
use url::{Position, Url};

use crate::protocol::{HunyuanMessage, HunyuanRequest};

type HmacSha1 = Hmac<Sha1>;

/// Sign a request payload for the given endpoint
///
/// Returns the base64-encoded HMAC-SHA1 digest, sent verbatim as the
/// `Authorization` header.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length.
pub fn signature(secret_key: &SecretString, url: &Url, payload: &HunyuanRequest) -> String {
    let message = string_to_sign(url, payload);

    let mut mac =
        HmacSha1::new_from_slice(secret_key.expose_secret().as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(message.as_bytes());

    STANDARD.encode(mac.finalize().into_bytes())
}

/// Build the exact string covered by the signature
///
/// Authority and path of `url` (no scheme, no query), then `?`, then the
/// canonical parameters.
pub fn string_to_sign(url: &Url, payload: &HunyuanRequest) -> String {
    let endpoint = &url[Position::BeforeUsername..Position::AfterPath];
    format!("{endpoint}?{}", canonical_query(payload))
}

/// Render the payload as `key=value` pairs joined by `&`
///
/// Keys appear in the vendor's fixed sequence, which is lexicographic by
/// name. `query_id` is left out when unset. Values are not URL-encoded.
pub fn canonical_query(payload: &HunyuanRequest) -> String {
    let mut params: Vec<(&str, String)> = vec![
        ("app_id", payload.app_id.clone()),
        ("expired", payload.expired.to_string()),
        ("messages", messages_json(&payload.messages)),
    ];
    if let Some(query_id) = &payload.query_id {
        params.push(("query_id", query_id.clone()));
    }
    params.extend([
        ("secret_id", payload.secret_id.clone()),
        ("stream", u8::from(payload.stream).to_string()),
        ("temperature", format_float(payload.temperature)),
        ("timestamp", payload.timestamp.to_string()),
        ("top_p", format_float(payload.top_p)),
    ]);

    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compact JSON with every non-ASCII character `\u`-escaped
fn messages_json(messages: &[HunyuanMessage]) -> String {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter);
    messages
        .serialize(&mut serializer)
        .expect("serializing messages into memory cannot fail");

    String::from_utf8_lossy(&buf).into_owned()
}

/// Compact formatter that escapes characters outside printable ASCII
///
/// `serde_json` already escapes control characters, quotes and backslashes;
/// this covers DEL and everything above it, using UTF-16 surrogate pairs for
/// characters outside the basic plane.
struct AsciiFormatter;

impl serde_json::ser::Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut utf8 = [0u8; 4];
        let mut utf16 = [0u16; 2];

        for ch in fragment.chars() {
            if ch.is_ascii() && ch != '\u{7f}' {
                writer.write_all(ch.encode_utf8(&mut utf8).as_bytes())?;
            } else {
                for unit in ch.encode_utf16(&mut utf16) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }

        Ok(())
    }
}

/// Format a float like C's `%g`: six significant digits, trailing zeros
/// stripped, exponent notation below `1e-4` or from `1e6` up
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let scientific = format!("{value:.5e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..6).contains(&exponent) {
        let precision = usize::try_from(5 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.precision$}")).to_owned()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.unsigned_abs())
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
