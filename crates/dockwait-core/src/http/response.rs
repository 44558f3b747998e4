use serde::de::DeserializeOwned;

use super::error::RequestError;

/// Status line, headers and body of a completed exchange.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    /// Raw header lines (without trailing CRLF), status lines included.
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Value of the last header named `name` (case-insensitive). With
    /// redirects the last one belongs to the final response.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .filter_map(|line| line.split_once(':'))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.trim())
    }
}
