//! Performing requests with curl's easy interface.

use std::str;

use super::error::RequestError;
use super::request::{Method, Request};
use super::response::Response;
use crate::retry::{run_with_retry, RetryPolicy};

/// Performs the request and returns the response whatever its status.
///
/// Runs in the current thread. Only transport failures are errors.
pub fn send(req: &Request) -> Result<Response, RequestError> {
    url::Url::parse(&req.url).map_err(|e| RequestError::Invalid(format!("{}: {e}", req.url)))?;
    let transport = |source: curl::Error| RequestError::Transport {
        method: req.method,
        url: req.url.clone(),
        source,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url).map_err(transport)?;
    easy.connect_timeout(req.connect_timeout).map_err(transport)?;
    easy.timeout(req.timeout).map_err(transport)?;

    match req.method {
        Method::Get => easy.get(true).map_err(transport)?,
        Method::Head => easy.nobody(true).map_err(transport)?,
        Method::Post => easy.post(true).map_err(transport)?,
        other => easy.custom_request(other.as_str()).map_err(transport)?,
    }
    let sends_body = !matches!(req.method, Method::Get | Method::Head);
    if let Some(body) = req.body.as_ref().filter(|_| sends_body) {
        easy.post_fields_copy(body).map_err(transport)?;
    } else if req.method == Method::Post {
        easy.post_field_size(0).map_err(transport)?;
    }

    if let Some((user, password)) = &req.basic_auth {
        easy.username(user).map_err(transport)?;
        easy.password(password).map_err(transport)?;
    }
    if req.insecure {
        easy.ssl_verify_peer(false).map_err(transport)?;
        easy.ssl_verify_host(false).map_err(transport)?;
    }
    if let Some(path) = &req.unix_socket {
        let path = path
            .to_str()
            .ok_or_else(|| RequestError::Invalid(format!("non-UTF-8 socket path {}", path.display())))?;
        easy.unix_socket(path).map_err(transport)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in &req.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(transport)?;
    }
    if !req.headers.is_empty() {
        easy.http_headers(list).map_err(transport)?;
    }

    let mut headers: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    if !line.is_empty() {
                        headers.push(line.to_string());
                    }
                }
                true
            })
            .map_err(transport)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport)?;
        transfer.perform().map_err(transport)?;
    }

    let status = easy.response_code().map_err(transport)?;
    tracing::debug!(method = %req.method, url = %req.url, status, "http exchange");
    Ok(Response {
        status,
        headers,
        body,
    })
}

/// Like [`send`] but a non-2xx status is an error carrying the body text.
pub fn send_checked(req: &Request) -> Result<Response, RequestError> {
    let resp = send(req)?;
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(RequestError::Status {
            method: req.method,
            url: req.url.clone(),
            status: resp.status,
            body: resp.text(),
        })
    }
}

/// [`send_checked`] under a fixed-delay retry policy. Any transport error or
/// non-2xx status consumes an attempt; the last error is returned on
/// exhaustion.
pub fn send_with_retry(req: &Request, policy: &RetryPolicy) -> Result<Response, RequestError> {
    run_with_retry(policy, || send_checked(req))
}
