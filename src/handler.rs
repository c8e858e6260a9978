//! Application handler.
use std::sync::Arc;

use crate::error::BoxError;
use crate::exchange::{Request, Response};

// ===== Handler =====

/// Application logic invoked once per parsed request.
///
/// The handler must set a status on the [`Response`] before returning `Ok`. On error or panic,
/// whatever was staged is still written when a status was set, then the connection is closed.
pub trait Handler {
    fn handle(&self, request: &Request<'_>, response: &mut Response) -> Result<(), BoxError>;
}

impl<H: Handler + ?Sized> Handler for &H {
    #[inline]
    fn handle(&self, request: &Request<'_>, response: &mut Response) -> Result<(), BoxError> {
        H::handle(self, request, response)
    }
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    #[inline]
    fn handle(&self, request: &Request<'_>, response: &mut Response) -> Result<(), BoxError> {
        H::handle(self, request, response)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    #[inline]
    fn handle(&self, request: &Request<'_>, response: &mut Response) -> Result<(), BoxError> {
        H::handle(self, request, response)
    }
}

// ===== FromFn =====

/// Create [`Handler`] from a function.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(&Request<'_>, &mut Response) -> Result<(), BoxError>,
{
    FromFn { f }
}

/// [`Handler`] returned from [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    f: F,
}

impl<F> Handler for FromFn<F>
where
    F: Fn(&Request<'_>, &mut Response) -> Result<(), BoxError>,
{
    #[inline]
    fn handle(&self, request: &Request<'_>, response: &mut Response) -> Result<(), BoxError> {
        (self.f)(request, response)
    }
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}
