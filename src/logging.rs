// Not every macro is used in every feature combination.
#![allow(unused_macros)]

/// Expands to its body only when the `logging` feature is enabled.
///
/// Arguments given to the logging macros below are not evaluated at all when
/// logging is disabled, so it is fine to pass expressions that allocate.
macro_rules! log {
    ($($tt:tt)*) => {
        #[cfg(feature = "logging")]
        {
            $($tt)*
        }
    }
}

macro_rules! error {
    ($($tt:tt)*) => { log!(log::error!(target: "calends", $($tt)*)) }
}

macro_rules! warn {
    ($($tt:tt)*) => { log!(log::warn!(target: "calends", $($tt)*)) }
}

macro_rules! info {
    ($($tt:tt)*) => { log!(log::info!(target: "calends", $($tt)*)) }
}

macro_rules! debug {
    ($($tt:tt)*) => { log!(log::debug!(target: "calends", $($tt)*)) }
}

macro_rules! trace {
    ($($tt:tt)*) => { log!(log::trace!(target: "calends", $($tt)*)) }
}
