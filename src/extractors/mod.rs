//! Request extractors and the middleware built on them.

pub mod api_version;

pub use api_version::{negotiate_version, ApiVersion};
