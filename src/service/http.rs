//! HTTP client factory and response body decoding.

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use rquest::Client;
use rquest_util::Emulation;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum ClientType {
    Standard,
    HeavyEmulation,
}

/// Factory for creating an HTTP client based on the desired level of stealth/performance.
pub fn create_client(client_type: ClientType) -> Result<Client> {
    let builder = Client::builder().timeout(Duration::from_secs(30));

    match client_type {
        ClientType::HeavyEmulation => {
            // Use rquest_util for heavy browser impersonation
            builder
                .emulation(Emulation::Firefox136)
                .build()
                .context("Failed to build heavy impersonated rquest client")
        }
        ClientType::Standard => {
            // Standard rquest client
            builder
                .build()
                .context("Failed to build standard rquest client")
        }
    }
}

/// Decode a response body using the charset from the Content-Type header,
/// falling back to a `<meta charset>` sniff, then UTF-8. Korean sites
/// still commonly serve EUC-KR.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    let charset = content_type
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("charset="))?;
    Encoding::for_label(charset.trim_matches('"').as_bytes())
}

/// Look for a charset declaration in the document head. Only the first
/// 1024 bytes are inspected, matching what browsers pre-scan.
fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(1024)];
    let head = String::from_utf8_lossy(head).to_lowercase();

    let position = head.find("charset=")?;
    let value = head[position + "charset=".len()..]
        .trim_start_matches(['"', '\''])
        .split(|c: char| c == '"' || c == '\'' || c == '>' || c == ' ' || c == ';')
        .next()?;
    Encoding::for_label(value.as_bytes())
}
