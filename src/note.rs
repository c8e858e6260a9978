//! Exchange events.
use std::io;

use crate::error::{ExchangeError, ParseError};
use crate::headers::HeaderName;
use crate::http::{Method, StatusCode};
use crate::log::{debug, error, info, warning};

/// Event reported by an exchange.
#[derive(Debug)]
pub enum Note<'a> {
    /// Socket read failed, the exchange is closing.
    ReadError(&'a io::Error),
    /// Socket write failed, the exchange is closing.
    WriteError(&'a io::Error),
    /// Socket close failed.
    CloseError(&'a io::Error),
    /// Request was rejected, a client error response is being sent.
    ClientError(StatusCode, ParseError),
    /// Handler failed, the exchange is closing.
    HandlerError(&'a ExchangeError),
    /// Request contained headers outside the standard table.
    UnknownHeaders(&'a [HeaderName]),
    /// Response was fully written.
    Processed {
        method: Method,
        target: &'a str,
        status: StatusCode,
    },
}

/// Receiver of exchange events.
///
/// Sending a note must not block the exchange and cannot fail.
pub trait NoteSink {
    fn send(&self, note: Note<'_>);
}

impl<F> NoteSink for F
where
    F: Fn(Note<'_>),
{
    #[inline]
    fn send(&self, note: Note<'_>) {
        self(note)
    }
}

/// [`NoteSink`] that forwards events to the `log` facade.
///
/// Events are dropped when the `log` feature is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotes;

impl NoteSink for LogNotes {
    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    fn send(&self, note: Note<'_>) {
        match note {
            Note::ReadError(err) => { warning!("read failed: {err}"); }
            Note::WriteError(err) => { warning!("write failed: {err}"); }
            Note::CloseError(err) => { debug!("close failed: {err}"); }
            Note::ClientError(status, err) => { debug!("client error {status}: {err}"); }
            Note::HandlerError(err) => { error!("{err}"); }
            Note::UnknownHeaders(names) => { debug!("unknown headers: {names:?}"); }
            Note::Processed { method, target, status } => {
                info!("{method} {target} {status}");
            }
        }
    }
}

/// [`NoteSink`] that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNotes;

impl NoteSink for NoNotes {
    #[inline]
    fn send(&self, _: Note<'_>) { }
}
