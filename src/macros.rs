//! Diagnostic output
//!
//! Driver messages go to `defmt` when the `defmt` feature is enabled and to
//! the [`log`] facade otherwise. Format strings are restricted to the
//! subset both accept: plain `{}` and `{:#x}` with positional arguments.

/// Emit a diagnostic at the given level (`error`, `warn`, `info`, `debug`).
///
/// # Example
/// ```ignore
/// diag!(error, "ch9120: {} failed: {}", name, e);
/// ```
macro_rules! diag {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        defmt::$level!($($arg)+);
        #[cfg(not(feature = "defmt"))]
        #[allow(clippy::uninlined_format_args)]
        log::$level!($($arg)+);
    }};
}
