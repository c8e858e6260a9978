//! HTTP Protocol closed sets.
mod method;
mod status;
mod version;
mod date;

pub use method::{Method, UnknownMethod};
pub(crate) use method::Candidate;
pub use version::Version;
pub use status::StatusCode;
pub use date::{httpdate, httpdate_now};
