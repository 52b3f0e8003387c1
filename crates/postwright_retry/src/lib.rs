//! Retry with exponential backoff.
//!
//! [`RetryPolicy`] wraps any zero-argument fallible async operation. Each
//! model call site in the generation pipeline runs through one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod policy;

pub use policy::RetryPolicy;
