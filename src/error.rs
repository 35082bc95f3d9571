//! Crate-wide error type.
//!
//! Callers need several distinct, caller-facing error kinds rather than a single
//! "something went wrong" marker, so this uses `thiserror` to derive `Display`
//! instead of hand-rolling it.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied argument violated a documented precondition
    /// (zero nonce, secret key < 2, empty ciphertext list, empty base64 string, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A strict integer/byte decode produced a value outside the group's range.
    #[error("value out of range for this group")]
    OutOfRange,

    /// Two operands were drawn from `GroupContext`s with different strength flags.
    #[error("operands belong to incompatible group contexts")]
    IncompatibleContext,

    /// A multiplicative inverse was requested for a non-unit (only possible for 0 mod a prime).
    #[error("no multiplicative inverse exists for this element")]
    DomainError,
}
