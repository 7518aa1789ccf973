use http::header::{HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, StatusCode};
use std::io;

/// Body written when no route matches and no not-found handler is set.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// In-memory response sink passed to handlers.
///
/// Handlers set a status, headers and body; the host stack turns the result
/// into bytes on the wire via [`ResponseWriter::into_response`]. The first
/// status written sticks, later calls are ignored, and writing a body without
/// a status implies `200 OK`.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the response headers
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header as a string
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Set the response status; only the first call has an effect
    pub fn write_status(&mut self, status: StatusCode) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    /// Append bytes to the body
    pub fn write_body(&mut self, data: &[u8]) {
        self.write_status(StatusCode::OK);
        self.body.extend_from_slice(data);
    }

    /// Status written so far (`200 OK` if none)
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text, lossily decoded
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Finish the response
    #[must_use]
    pub fn into_response(self) -> http::Response<Vec<u8>> {
        let mut res = http::Response::new(self.body);
        *res.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *res.headers_mut() = self.headers;
        res
    }
}

impl io::Write for ResponseWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_body(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write a plain-text error response
pub fn write_error(res: &mut ResponseWriter, status: StatusCode, message: &str) {
    let headers = res.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    res.write_status(status);
    res.write_body(message.as_bytes());
}

/// Default response for unmatched requests
pub fn write_not_found(res: &mut ResponseWriter) {
    write_error(res, StatusCode::NOT_FOUND, NOT_FOUND_BODY);
}

/// Write a JSON body with `Content-Type: application/json`
pub fn write_json(res: &mut ResponseWriter, status: StatusCode, body: &serde_json::Value) {
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    res.write_status(status);
    res.write_body(body.to_string().as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_status_is_ok() {
        let mut res = ResponseWriter::new();
        write!(res, "hello, togo/router").unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body_string(), "hello, togo/router");
    }

    #[test]
    fn test_first_status_wins() {
        let mut res = ResponseWriter::new();
        res.write_status(StatusCode::NOT_FOUND);
        res.write_status(StatusCode::OK);
        res.write_body(b"not found");
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_response() {
        let mut res = ResponseWriter::new();
        write_not_found(&mut res);
        let res = res.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.body().as_slice(), b"404 page not found\n");
        assert_eq!(
            res.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(res.headers().get(X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    }
}
