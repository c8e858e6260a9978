//! Tokio based driver.
//!
//! Connections are accepted on the tokio runtime, each accepted socket is converted to a
//! blocking one and driven by an [`Exchange`] on the blocking thread pool.
use std::{
    io,
    net::SocketAddr,
    pin::Pin,
    sync::Arc,
    task::{Poll, ready},
};
use tokio::net::TcpListener;

#[cfg(unix)]
use tokio::net::UnixListener;

use crate::{
    config::Config,
    exchange::Exchange,
    handler::Handler,
    log::error,
    note::{LogNotes, NoteSink},
    socket::Socket,
};

// ===== Listener =====

/// Source of accepted connections.
pub trait Listener {
    /// Blocking socket handed to the [`Exchange`].
    type Stream: Socket + Send + 'static;

    type Addr;

    fn poll_accept(
        &self,
        cx: &mut std::task::Context,
    ) -> Poll<io::Result<(Self::Stream, Self::Addr)>>;
}

impl Listener for TcpListener {
    type Stream = std::net::TcpStream;

    type Addr = SocketAddr;

    fn poll_accept(
        &self,
        cx: &mut std::task::Context,
    ) -> Poll<io::Result<(Self::Stream, Self::Addr)>> {
        let (io, addr) = ready!(TcpListener::poll_accept(self, cx))?;
        let io = io.into_std()?;
        io.set_nonblocking(false)?;
        Poll::Ready(Ok((io, addr)))
    }
}

#[cfg(unix)]
impl Listener for UnixListener {
    type Stream = std::os::unix::net::UnixStream;

    type Addr = tokio::net::unix::SocketAddr;

    fn poll_accept(
        &self,
        cx: &mut std::task::Context,
    ) -> Poll<io::Result<(Self::Stream, Self::Addr)>> {
        let (io, addr) = ready!(UnixListener::poll_accept(self, cx))?;
        let io = io.into_std()?;
        io.set_nonblocking(false)?;
        Poll::Ready(Ok((io, addr)))
    }
}

// ===== Runtime =====

/// Serve every accepted connection with `handler`.
///
/// The returned future never completes, it must be polled within a tokio runtime.
pub fn serve<L: Listener, H: Handler>(io: L, handler: H, config: Config) -> Serve<L, H> {
    Serve {
        io,
        handler: Arc::new(handler),
        notes: Arc::new(LogNotes),
        config,
    }
}

/// Future returned from [`serve`].
pub struct Serve<L, H> {
    io: L,
    handler: Arc<H>,
    notes: Arc<dyn NoteSink + Send + Sync>,
    config: Config,
}

impl<L, H> Serve<L, H> {
    /// Replace the [`NoteSink`] shared by every exchange, the default is [`LogNotes`].
    pub fn with_notes<N>(mut self, notes: N) -> Self
    where
        N: NoteSink + Send + Sync + 'static,
    {
        self.notes = Arc::new(notes);
        self
    }
}

impl<L, H> Future for Serve<L, H>
where
    L: Listener,
    H: Handler + Send + Sync + 'static,
{
    type Output = ();

    #[cfg_attr(not(feature = "log"), allow(unused_variables))]
    fn poll(self: Pin<&mut Self>, cx: &mut std::task::Context<'_>) -> Poll<Self::Output> {
        loop {
            match ready!(self.io.poll_accept(cx)) {
                Ok((io, _)) => {
                    let handler = Arc::clone(&self.handler);
                    let notes = Arc::clone(&self.notes);
                    let config = self.config;
                    tokio::task::spawn_blocking(move || {
                        Exchange::new(io, handler, config)
                            .with_shared_notes(notes)
                            .run();
                    });
                }
                Err(err) => {
                    error!("failed to accept connection: {err}");
                }
            }
        }
    }
}

impl<L, H> std::fmt::Debug for Serve<L, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serve")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
