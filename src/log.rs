//!
//! Logging shim
//!
//! When the `logging` feature is disabled the crate must not pull in the
//! `log` crate at all; these macros expand to nothing in that case.
//!
#[cfg(feature = "logging")]
pub(crate) use log::{debug, error, info, trace, warn};

#[cfg(not(feature = "logging"))]
mod noop {
    macro_rules! __trace__ ( ($($tt:tt)*) => {{}} );
    macro_rules! __debug__ ( ($($tt:tt)*) => {{}} );
    macro_rules! __info__  ( ($($tt:tt)*) => {{}} );
    macro_rules! __warn__  ( ($($tt:tt)*) => {{}} );
    macro_rules! __error__ ( ($($tt:tt)*) => {{}} );

    #[allow(unused_imports)]
    pub(crate) use {
        __debug__ as debug, __error__ as error, __info__ as info, __trace__ as trace,
        __warn__ as warn,
    };
}

#[cfg(not(feature = "logging"))]
pub(crate) use noop::{debug, error, info, trace, warn};
