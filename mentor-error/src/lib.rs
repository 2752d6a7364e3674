//! # mentor-error
//!
//! Unified error handling for mentor, modeled on OpenDAL's error handling practices.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what went wrong (e.g., CredentialMissing, Timeout)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary)
//! - **Error Context**: Locate the cause with key-value context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use mentor_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ResponseMalformed, "no choices in response")
//!         .with_operation("openrouter::complete")
//!         .with_context("model", "meta-llama/llama-3.1-8b-instant"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All library functions return `Result<T, mentor_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, later layers only append context
//! - No blanket `From<OtherError>` so raw errors don't leak

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using mentor Error
pub type Result<T> = std::result::Result<T, Error>;
