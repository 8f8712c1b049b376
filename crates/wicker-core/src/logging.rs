//! Logging facilities for Wicker.
//!
//! Wicker uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! The [`targets`] constants can be used with `tracing` filter directives
//! to narrow logs to a single subsystem, e.g.
//! `RUST_LOG=wicker::adapter=trace`.

/// Target names for log filtering.
pub mod targets {
    /// Core foundation target.
    pub const CORE: &str = "wicker_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "wicker_core::signal";
    /// Item store target.
    pub const STORE: &str = "wicker::store";
    /// Adapter orchestration target.
    pub const ADAPTER: &str = "wicker::adapter";
    /// Screen lifecycle target.
    pub const SCREEN: &str = "wicker::screen";
}
