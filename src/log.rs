//! `log` facade shim, every macro expands to nothing without the `log` feature.
#![allow(unused, reason = "depends on the `log` feature")]

/// Target of every record emitted by this crate.
pub(crate) const TARGET: &str = "stepline";

macro_rules! emit {
    ($level:ident, $($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::$level!(target: $crate::log::TARGET, $($tt)*);
    };
}

macro_rules! info {
    ($($tt:tt)*) => { $crate::log::emit!(info, $($tt)*); };
}

macro_rules! debug {
    ($($tt:tt)*) => { $crate::log::emit!(debug, $($tt)*); };
}

macro_rules! warning {
    ($($tt:tt)*) => { $crate::log::emit!(warn, $($tt)*); };
}

macro_rules! error {
    ($($tt:tt)*) => { $crate::log::emit!(error, $($tt)*); };
}

pub(crate) use {emit, info, debug, warning, error};
