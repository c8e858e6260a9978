//! HTTP/1.1 Exchange State Machine
//!
//! [`Exchange`] speaks HTTP/1.1 directly over a blocking [`Socket`]. It owns a single fixed size
//! buffer, tokenizes the request line and header fields straight from it, hands control to a
//! [`Handler`], then serializes the response back through the same buffer.
//!
//! All work is split into discrete steps. Each call to [`Exchange::step_one`] performs exactly
//! one state worth of work and returns, so the caller decides how and where exchanges are
//! driven. [`rt::serve`] is one such driver built on tokio's blocking pool.
//!
//! ```no_run
//! use std::net::TcpListener;
//! use stepline::{Config, Exchange, handler::from_fn, http::StatusCode, headers::standard};
//!
//! let listener = TcpListener::bind("127.0.0.1:7001")?;
//! let handler = from_fn(|_req, res| {
//!     res.status(StatusCode::OK);
//!     res.header(standard::CONTENT_TYPE, "text/plain")?;
//!     res.send("Hello World!\n");
//!     Ok(())
//! });
//!
//! for socket in listener.incoming() {
//!     Exchange::new(socket?, &handler, Config::new()).run();
//! }
//! # Ok::<_, std::io::Error>(())
//! ```
#![warn(missing_debug_implementations)]

mod log;

pub mod http;
pub mod headers;
pub mod body;
pub mod config;
pub mod error;
pub mod exchange;
pub mod handler;
pub mod note;
pub mod socket;
pub mod rt;

pub use config::Config;
pub use error::{ExchangeError, ParseError};
pub use exchange::{Exchange, Request, Response, State};
pub use handler::Handler;
pub use note::{Note, NoteSink};
pub use socket::Socket;

#[cfg(test)]
mod mock;
