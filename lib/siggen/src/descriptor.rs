use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue};

/// Snapshot of an intercepted request
///
/// Header lookups are case-insensitive, iteration follows insertion order.
/// The URL is kept as the exact string the host handed us, since eligibility is decided by byte-for-byte comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Full request URL, including scheme, host, path and query
    pub url: String,

    /// Request headers
    pub headers: HeaderMap,

    /// Raw request body
    pub body: Bytes,
}

impl RequestDescriptor {
    /// Construct a descriptor without headers and with an empty body
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Append a header
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the body
    #[must_use]
    pub fn body(self, body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            ..self
        }
    }

    /// Check whether the request carries at least one value for the header
    #[inline]
    #[must_use]
    pub fn has_header(&self, name: &HeaderName) -> bool {
        self.headers.contains_key(name)
    }
}

#[cfg(test)]
mod test {
    use super::RequestDescriptor;
    use http::{header::CONTENT_TYPE, HeaderName, HeaderValue};

    #[test]
    fn header_lookup_ignores_case() {
        let request = RequestDescriptor::new("https://target.com/api/staging").header(
            HeaderName::from_bytes(b"X-Signature").unwrap(),
            HeaderValue::from_static("placeholder"),
        );

        assert!(request.has_header(&HeaderName::from_static("x-signature")));
        assert!(!request.has_header(&CONTENT_TYPE));
    }

    #[test]
    fn headers_iterate_in_insertion_order() {
        let request = RequestDescriptor::new("https://target.com/api/staging")
            .header(
                HeaderName::from_static("x-first"),
                HeaderValue::from_static("1"),
            )
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(
                HeaderName::from_static("x-last"),
                HeaderValue::from_static("3"),
            );

        let names: Vec<_> = request.headers.keys().map(HeaderName::as_str).collect();
        assert_eq!(names, ["x-first", "content-type", "x-last"]);
    }
}
