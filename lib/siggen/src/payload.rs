//!
//! Injection of the freshness fields into JSON request bodies
//!

use crate::freshness::{self, Clock, NonceSource, SystemClock, ThreadRng, NONCE_RANGE};
use miette::Diagnostic;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Key of the injected random value
pub const RANDOM_VALUE_KEY: &str = "requestRandomValue";

/// Key of the injected timestamp
pub const TIMESTAMP_KEY: &str = "requestTimestamp";

/// Payload mutation error
#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    /// Body isn't well-formed JSON
    #[error(transparent)]
    Malformed(#[from] serde_json::Error),

    /// Body is valid JSON but not an object
    #[error("Request body is not a JSON object")]
    NotAnObject,

    /// Re-serialising the updated object failed
    #[error("Failed to serialise the updated payload")]
    Serialise(#[source] serde_json::Error),
}

/// Adds `requestRandomValue` and `requestTimestamp` to JSON object payloads
pub struct PayloadMutator {
    nonce: Box<dyn NonceSource>,
    clock: Box<dyn Clock>,
}

impl PayloadMutator {
    /// Construct a mutator with custom nonce and time sources
    #[must_use]
    pub fn new<N, C>(nonce: N, clock: C) -> Self
    where
        N: NonceSource + 'static,
        C: Clock + 'static,
    {
        Self {
            nonce: Box::new(nonce),
            clock: Box::new(clock),
        }
    }

    /// Inject the freshness fields and return the canonical serialisation
    ///
    /// Existing keys keep their position and value. The two injected keys overwrite any previous value of the same name.
    /// The returned bytes are exactly what has to be signed and sent.
    pub fn mutate(&self, body: &[u8]) -> Result<Vec<u8>, ParseError> {
        let Value::Object(mut payload) = serde_json::from_slice::<Value>(body)? else {
            return Err(ParseError::NotAnObject);
        };

        let nonce = self.nonce.generate(NONCE_RANGE);
        debug_assert!(NONCE_RANGE.contains(&nonce));
        payload.insert(RANDOM_VALUE_KEY.into(), Value::from(nonce));

        // Read the clock as late as possible
        let timestamp = freshness::unix_millis(self.clock.now());
        payload.insert(TIMESTAMP_KEY.into(), Value::from(timestamp));

        serialise(&payload)
    }
}

impl Default for PayloadMutator {
    fn default() -> Self {
        Self::new(ThreadRng, SystemClock)
    }
}

impl fmt::Debug for PayloadMutator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadMutator").finish_non_exhaustive()
    }
}

#[inline]
fn serialise(payload: &Map<String, Value>) -> Result<Vec<u8>, ParseError> {
    serde_json::to_vec(payload).map_err(ParseError::Serialise)
}

/// Mutate the payload using the thread-local RNG and the system clock
#[inline]
pub fn mutate(body: &[u8]) -> Result<Vec<u8>, ParseError> {
    PayloadMutator::default().mutate(body)
}
