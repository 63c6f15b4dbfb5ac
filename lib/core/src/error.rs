//! Error handling foundation shared by the workspace.
//!
//! Only the `Result` alias lives here. The conversation library and the
//! site each define their own error enums (transport, storage, config) and
//! wrap them in a rootcause `Report` at the point of failure.

use rootcause::Report;

/// Result whose error side is a rootcause `Report` carrying context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
