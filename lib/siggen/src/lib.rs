#![doc = include_str!("../README.md")]

pub mod crypto;
pub mod descriptor;
pub mod freshness;
pub mod payload;
pub mod policy;

pub use self::descriptor::RequestDescriptor;
pub use self::payload::PayloadMutator;
pub use self::policy::{Outcome, Policy, Processed};

/// Name of the header whose presence marks a request for signing
pub const DEFAULT_TRIGGER_HEADER: &str = "x-signature";
