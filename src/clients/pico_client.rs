use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// The device's character display is 16x2.
pub const MAX_TEXT_BYTES: usize = 32;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Snapshot reported by `GET /api/status` on the device.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PicoStatus {
    /// Last word read back from the SPI slave.
    pub raw: u32,
    pub temperature: u16,
    pub led: u8,
    pub timestamp: u64,
}

#[derive(Error, Debug)]
pub enum PicoError {
    #[error("pico device request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// HTTP client for the pico device living at `PICO_URL`.
#[derive(Clone, Debug)]
pub struct PicoClient {
    base_url: String,
    http: reqwest::Client,
}

impl PicoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn status(&self) -> Result<PicoStatus, PicoError> {
        let status = self
            .http
            .get(self.url("/api/status"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<PicoStatus>()
            .await?;
        Ok(status)
    }

    /// Queue a new LED byte on the device.
    pub async fn set_led(&self, led: u8) -> Result<(), PicoError> {
        self.http
            .post(self.url("/api/control"))
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "led": led }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Put text on the device display. Anything past [`MAX_TEXT_BYTES`] is cut
    /// off here, the same way the device would; the text actually sent is returned.
    pub async fn send_text<'a>(&self, text: &'a str) -> Result<&'a str, PicoError> {
        let text = truncate_display_text(text);
        self.http
            .post(self.url("/api/text"))
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({ "text": text }))
            .send()
            .await?
            .error_for_status()?;
        Ok(text)
    }
}

/// Longest prefix of `text` that fits the display without splitting a character.
pub fn truncate_display_text(text: &str) -> &str {
    if text.len() <= MAX_TEXT_BYTES {
        return text;
    }
    let mut end = MAX_TEXT_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_display_text("hello pico"), "hello pico");
        assert_eq!(truncate_display_text(""), "");
    }

    #[test]
    fn test_long_text_is_cut_at_display_size() {
        let text = "0123456789abcdef0123456789ABCDEF-overflow";
        assert_eq!(truncate_display_text(text), "0123456789abcdef0123456789ABCDEF");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 31 ASCII bytes then a 2-byte char straddling the limit
        let text = format!("{}é tail", "a".repeat(31));
        let cut = truncate_display_text(&text);
        assert_eq!(cut.len(), 31);
        assert!(cut.chars().all(|c| c == 'a'));
    }

    #[test]
    fn test_trailing_slash_is_dropped_from_base_url() {
        let client = PicoClient::new("http://192.168.1.183/");
        assert_eq!(client.base_url(), "http://192.168.1.183");
        assert_eq!(client.url("/api/status"), "http://192.168.1.183/api/status");
    }

    #[test]
    fn test_status_payload_shape() {
        let status: PicoStatus =
            serde_json::from_str(r#"{"raw":305419896,"temperature":412,"led":3,"timestamp":1700000000}"#)
                .expect("parse");
        assert_eq!(status.raw, 0x1234_5678);
        assert_eq!(status.temperature, 412);
        assert_eq!(status.led, 3);
        assert_eq!(status.timestamp, 1_700_000_000);
    }
}
