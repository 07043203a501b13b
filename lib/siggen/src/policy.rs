//!
//! Decides which requests get signed and rewrites them
//!

use crate::{
    crypto::{self, SignError, SigningKey},
    payload::{ParseError, PayloadMutator},
    RequestDescriptor, DEFAULT_TRIGGER_HEADER,
};
use bytes::Bytes;
use http::{header::InvalidHeaderValue, HeaderName, HeaderValue};
use miette::Diagnostic;
use std::{fmt, sync::Arc};
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use typed_builder::TypedBuilder;

/// Failure while rewriting an eligible request
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Signature isn't a valid header value
    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    /// Body couldn't be updated
    #[error(transparent)]
    Payload(#[from] ParseError),

    /// Body couldn't be signed
    #[error(transparent)]
    Sign(#[from] SignError),
}

/// Why a request was left alone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Trigger header is absent
    MissingTriggerHeader,

    /// URL doesn't equal the target URL
    UrlMismatch,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingTriggerHeader => "trigger header missing",
            Self::UrlMismatch => "URL doesn't match the target URL",
        };

        f.write_str(reason)
    }
}

/// What happened to a request
#[derive(Debug)]
pub enum Outcome {
    /// Body was updated and signed
    Signed,

    /// Request wasn't eligible and was passed through
    Skipped(SkipReason),

    /// Request was eligible but rewriting failed. It was passed through unchanged.
    FailedOpen(Error),
}

impl Outcome {
    /// Whether the request was changed
    #[must_use]
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed)
    }
}

/// Result of [`Policy::evaluate`]
#[derive(Debug)]
pub struct Processed {
    /// Request to forward
    pub request: RequestDescriptor,

    /// Decision taken for the request
    pub outcome: Outcome,
}

/// Interception policy
///
/// Signs requests to `target_url` that carry the trigger header. Everything else passes through untouched.
/// Failures while signing never block the request, the original request is forwarded unsigned instead.
#[derive(Debug, TypedBuilder)]
pub struct Policy {
    /// Exact URL of the endpoint whose requests get signed
    #[builder(setter(into))]
    target_url: String,

    /// Header marking requests for signing, replaced by the signature
    #[builder(default = HeaderName::from_static(DEFAULT_TRIGGER_HEADER))]
    trigger_header: HeaderName,

    /// Signing key
    key: Arc<SigningKey>,

    /// Payload mutator
    #[builder(default)]
    mutator: PayloadMutator,
}

impl Policy {
    /// URL whose requests get signed
    #[must_use]
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Header marking requests for signing
    #[must_use]
    pub fn trigger_header(&self) -> &HeaderName {
        &self.trigger_header
    }

    /// Check whether the request qualifies for signing
    ///
    /// The URL is compared byte-for-byte. No normalisation happens, a trailing slash or a query string makes a difference.
    pub fn check_eligibility(&self, req: &RequestDescriptor) -> Result<(), SkipReason> {
        if !req.has_header(&self.trigger_header) {
            return Err(SkipReason::MissingTriggerHeader);
        }

        if req.url != self.target_url {
            return Err(SkipReason::UrlMismatch);
        }

        Ok(())
    }

    fn rewrite(&self, req: &RequestDescriptor) -> Result<RequestDescriptor, Error> {
        let body = self.mutator.mutate(&req.body)?;
        let signature = crypto::sign(&body, &self.key)?;

        let mut headers = req.headers.clone();
        headers.insert(
            self.trigger_header.clone(),
            HeaderValue::try_from(signature)?,
        );

        Ok(RequestDescriptor {
            url: req.url.clone(),
            headers,
            body: Bytes::from(body),
        })
    }

    /// Process the request and report the decision taken
    #[instrument(skip_all, fields(url = %req.url))]
    pub fn evaluate(&self, req: RequestDescriptor) -> Processed {
        if let Err(reason) = self.check_eligibility(&req) {
            debug!(%reason, "condition to sign request was not met");

            return Processed {
                request: req,
                outcome: Outcome::Skipped(reason),
            };
        }

        match self.rewrite(&req) {
            Ok(signed) => {
                info!("signed request body");
                debug!(headers = ?signed.headers, body = ?signed.body, "updated request");

                Processed {
                    request: signed,
                    outcome: Outcome::Signed,
                }
            }
            Err(error) => {
                error!(?error, "failed to sign request, forwarding it unchanged");

                Processed {
                    request: req,
                    outcome: Outcome::FailedOpen(error),
                }
            }
        }
    }

    /// Process the request
    ///
    /// Returns either the signed request or the original request
    #[inline]
    #[must_use]
    pub fn process(&self, req: RequestDescriptor) -> RequestDescriptor {
        self.evaluate(req).request
    }
}
