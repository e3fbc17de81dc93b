//! Attribution of log lines to their call site.
//!
//! Rust has no stable way to recover the enclosing function of a call at
//! runtime, so every emission carries an explicit [`CallSite`]. The
//! [`call_site!`](crate::call_site) macro builds one from `file!()`,
//! `line!()` and the enclosing function path; the `log_*!` macros pass it
//! along for you.

/// Where a message was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    /// Fully qualified function path.
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self { function, file, line }
    }

    /// Short function identifier, see [`short_function_name`].
    pub fn short_function(&self) -> &'static str {
        short_function_name(self.function)
    }
}

/// Keep the last two segments of a function path, skipping closure
/// segments: `app::handlers::users::create::{{closure}}` becomes
/// `users::create`.
pub fn short_function_name(path: &str) -> &str {
    let mut trimmed = path;
    while let Some(rest) = trimmed.strip_suffix("::{{closure}}") {
        trimmed = rest;
    }
    match trimmed.rmatch_indices("::").nth(1) {
        Some((idx, _)) => &trimmed[idx + 2..],
        None => trimmed,
    }
}

/// Fully qualified path of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        name.strip_suffix("::__here").unwrap_or(name)
    }};
}

/// [`CallSite`](crate::caller::CallSite) of the macro invocation.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::caller::CallSite::new($crate::function_name!(), file!(), line!())
    };
}

/// Emit an error-level message attributed to the enclosing function.
///
/// ```ignore
/// log_error!(ctx, err);
/// log_error!(ctx, "lookup failed for {}", id);
/// ```
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $fmt:literal, $($arg:tt)+) => {
        $ctx.error($crate::call_site!(), format!($fmt, $($arg)+))
    };
    ($ctx:expr, $fmt:literal $(,)?) => {
        $ctx.error($crate::call_site!(), format!($fmt))
    };
    ($ctx:expr, $msg:expr $(,)?) => {
        $ctx.error($crate::call_site!(), $msg)
    };
}

/// Emit an info-level message attributed to the enclosing function.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $fmt:literal, $($arg:tt)+) => {
        $ctx.info($crate::call_site!(), format!($fmt, $($arg)+))
    };
    ($ctx:expr, $fmt:literal $(,)?) => {
        $ctx.info($crate::call_site!(), format!($fmt))
    };
    ($ctx:expr, $msg:expr $(,)?) => {
        $ctx.info($crate::call_site!(), $msg)
    };
}

/// Emit a warning-level message attributed to the enclosing function.
#[macro_export]
macro_rules! log_warning {
    ($ctx:expr, $fmt:literal, $($arg:tt)+) => {
        $ctx.warning($crate::call_site!(), format!($fmt, $($arg)+))
    };
    ($ctx:expr, $fmt:literal $(,)?) => {
        $ctx.warning($crate::call_site!(), format!($fmt))
    };
    ($ctx:expr, $msg:expr $(,)?) => {
        $ctx.warning($crate::call_site!(), $msg)
    };
}
