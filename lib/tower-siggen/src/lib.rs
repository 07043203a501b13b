//!
//! Tower middleware running a [`siggen::Policy`] over outgoing requests
//!
//! The request body is buffered completely, since the signature covers the whole payload.
//! Eligibility is decided on the string form of the request URI. Make sure your client builds requests with absolute URIs.
//!

use bytes::Bytes;
use futures_util::{future::BoxFuture, FutureExt};
use http::{header::CONTENT_LENGTH, HeaderValue, Request};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use siggen::{Policy, RequestDescriptor};
use std::{
    error::Error as StdError,
    mem,
    sync::Arc,
    task::{self, Poll},
};
use tower_layer::Layer;
use tower_service::Service;
use tracing::debug;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Run the policy over a buffered request
///
/// Method, URI, version and extensions are kept. An existing `Content-Length` header is updated to the length of the forwarded body.
#[must_use]
pub fn sign_request(policy: &Policy, req: Request<Bytes>) -> Request<Full<Bytes>> {
    let (mut parts, body) = req.into_parts();

    let descriptor = RequestDescriptor {
        url: parts.uri.to_string(),
        headers: mem::take(&mut parts.headers),
        body,
    };
    let processed = policy.process(descriptor);

    parts.headers = processed.headers;
    if parts.headers.contains_key(CONTENT_LENGTH) {
        let content_length = processed.body.len();
        debug!(content_length, "updating content length");

        parts
            .headers
            .insert(CONTENT_LENGTH, HeaderValue::from(content_length));
    }

    Request::from_parts(parts, Full::new(processed.body))
}

/// Service signing requests with a [`Policy`] before handing them to the inner service
#[derive(Clone)]
pub struct SignatureService<S> {
    inner: S,
    policy: Arc<Policy>,
}

impl<S> SignatureService<S> {
    /// Wrap the inner service
    pub fn new(inner: S, policy: impl Into<Arc<Policy>>) -> Self {
        Self {
            inner,
            policy: policy.into(),
        }
    }
}

impl<S, B> Service<Request<B>> for SignatureService<S>
where
    S: Service<Request<Full<Bytes>>> + Clone + Send + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        // The clone hasn't been polled for readiness, keep it and use the ready one
        let clone = self.inner.clone();
        let mut inner = mem::replace(&mut self.inner, clone);
        let policy = Arc::clone(&self.policy);

        async move {
            let (parts, body) = req.into_parts();
            let body = body
                .collect()
                .await
                .map_err(Into::<BoxError>::into)?
                .to_bytes();

            let req = sign_request(&policy, Request::from_parts(parts, body));
            let response = inner.call(req).await.map_err(Into::<BoxError>::into)?;

            Ok::<_, BoxError>(response)
        }
        .boxed()
    }
}

/// Layer applying [`SignatureService`]
#[derive(Clone)]
pub struct SignatureLayer {
    policy: Arc<Policy>,
}

impl SignatureLayer {
    /// Construct a layer sharing the policy between all services it creates
    #[must_use]
    pub fn new(policy: impl Into<Arc<Policy>>) -> Self {
        Self {
            policy: policy.into(),
        }
    }
}

impl<S> Layer<S> for SignatureLayer {
    type Service = SignatureService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SignatureService {
            inner,
            policy: Arc::clone(&self.policy),
        }
    }
}
