//! HTTP Headers.
mod name;
mod value;
mod map;

pub use name::{HeaderName, AsHeaderName, InvalidHeaderName, standard};
pub use value::{HeaderValue, InvalidHeaderValue};
pub use map::RequestHeaders;

pub(crate) use map::Append;

#[cfg(test)]
mod test;
