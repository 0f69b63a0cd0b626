//! Shared error plumbing.
//!
//! Crates in this workspace keep their own error enums (`DecodeError` in the
//! session crate, `ClientError` in the API client). Fallible operations that
//! cross a network or configuration boundary return them wrapped in a
//! rootcause [`Report`] through the alias below, so callers can attach
//! their own context on the way up.

use rootcause::Report;

/// Result whose error is a rootcause report carrying a `C` context.
///
/// `C` defaults to `()` for call sites that only need a dynamic report.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
