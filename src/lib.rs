// Restwire - a format-agnostic REST call layer for Rust
//
// This library runs uniform GET/POST/PUT/DELETE calls over a pooled HTTP
// transport, with JSON/XML bodies, request/response logging, and typed
// fallbacks for malformed GET responses.

// Re-export core functionality
pub use restwire_client::*;

// Re-export optional crates
#[cfg(feature = "log")]
pub use restwire_log;

// Prelude for common imports
pub mod prelude {
    pub use restwire_client::prelude::*;

    #[cfg(feature = "log")]
    pub use restwire_log::{Level, tracing_sink};
}
