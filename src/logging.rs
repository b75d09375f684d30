//! Explicitly constructed diagnostic sink
//!
//! Events are emitted through the [`tracing`] facade. A [`LogContext`] turns
//! them into formatted lines via `tracing-subscriber`, but only inside
//! [`LogContext::in_scope()`]. Nothing here installs a global subscriber, so
//! contexts can be created and passed around freely, e.g. one per test.

use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Level};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Severity of a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Debug,
}

impl LogLevel {
    fn level(self) -> Level {
        match self {
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Debug => Level::DEBUG,
        }
    }
}

/// Logging configuration that is passed to whoever wants to log
///
/// A new context is muted, matching the library's default of staying quiet
/// until the application opts in.
#[derive(Debug, Clone)]
pub struct LogContext {
    muted: bool,
    max_level: LogLevel,
    ansi: bool,
}

impl LogContext {
    /// Muted context with the default level for this build profile
    ///
    /// Debug builds let everything through, release builds stop at
    /// [`LogLevel::Info`] once unmuted.
    pub fn new() -> Self {
        let max_level = if cfg!(debug_assertions) {
            LogLevel::Debug
        } else {
            LogLevel::Info
        };

        Self {
            muted: true,
            max_level,
            ansi: std::io::stderr().is_terminal(),
        }
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Most verbose level that is still written
    pub fn with_max_level(mut self, level: LogLevel) -> Self {
        self.max_level = level;
        self
    }

    /// Enable or disable ANSI colors
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    fn filter(&self) -> LevelFilter {
        if self.muted {
            LevelFilter::OFF
        } else {
            LevelFilter::from_level(self.max_level.level())
        }
    }

    /// Build a dispatcher that writes warnings to stderr and everything
    /// else to stdout
    pub fn dispatch(&self) -> Dispatch {
        self.dispatch_with_writers(std::io::stderr, std::io::stdout)
    }

    /// Build a dispatcher that sends warnings to `warnings` and info and
    /// debug lines to `output`
    pub fn dispatch_with_writers<E, O>(&self, warnings: E, output: O) -> Dispatch
    where
        E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
        O: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.dispatch_with_writer(warnings.with_max_level(Level::WARN).or_else(output))
    }

    /// Build a dispatcher that writes to `make_writer`
    pub fn dispatch_with_writer<W>(&self, make_writer: W) -> Dispatch
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.filter())
            .with_ansi(self.ansi)
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .finish();

        Dispatch::new(subscriber)
    }

    /// Run `f` with this context collecting every event on the current thread
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch(), f)
    }

    /// Emit one line at `level`
    ///
    /// Nothing is emitted while the context is muted or when `level` is more
    /// verbose than the context's maximum. Otherwise the line goes to
    /// whichever dispatcher is current, so call this inside
    /// [`in_scope()`](Self::in_scope) to route it through this context.
    pub fn write(&self, level: LogLevel, message: &str) {
        if level.level() > self.filter() {
            return;
        }

        match level {
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warning => tracing::warn!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
        }
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FixedPointCoordinate;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            let buf = self.0.lock().unwrap();
            String::from_utf8(buf.clone()).unwrap()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(context: &LogContext, f: impl FnOnce()) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let dispatch = context.dispatch_with_writer(move || writer.clone());
        tracing::dispatcher::with_default(&dispatch, f);
        capture.contents()
    }

    #[test]
    fn new_context_is_muted() {
        let context = LogContext::new().with_ansi(false);
        assert!(context.is_muted());

        let output = capture(&context, || context.write(LogLevel::Warning, "hidden"));
        assert_eq!(output, "");
    }

    #[test]
    fn unmuted_context_writes_lines() {
        let mut context = LogContext::new().with_ansi(false);
        context.unmute();
        assert!(!context.is_muted());

        let output = capture(&context, || {
            context.write(LogLevel::Info, "loaded 3 points");
            context.write(LogLevel::Warning, "something odd");
        });
        assert!(output.contains("INFO"), "{output}");
        assert!(output.contains("loaded 3 points"), "{output}");
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("something odd"), "{output}");
    }

    #[test]
    fn max_level_filters_verbose_lines() {
        let mut context = LogContext::new()
            .with_ansi(false)
            .with_max_level(LogLevel::Warning);
        context.unmute();

        let output = capture(&context, || {
            context.write(LogLevel::Debug, "too chatty");
            context.write(LogLevel::Info, "still too chatty");
            context.write(LogLevel::Warning, "kept");
        });
        assert!(!output.contains("chatty"), "{output}");
        assert!(output.contains("kept"), "{output}");
    }

    #[test]
    fn muted_context_stays_quiet_under_foreign_dispatcher() {
        let mut outer = LogContext::new().with_ansi(false);
        outer.unmute();

        let muted = LogContext::new();
        let output = capture(&outer, || muted.write(LogLevel::Warning, "hidden"));
        assert_eq!(output, "");

        let terse = {
            let mut context = LogContext::new().with_max_level(LogLevel::Warning);
            context.unmute();
            context
        };
        let output = capture(&outer, || {
            terse.write(LogLevel::Debug, "too chatty");
            terse.write(LogLevel::Warning, "kept");
        });
        assert!(!output.contains("chatty"), "{output}");
        assert!(output.contains("kept"), "{output}");
    }

    #[test]
    fn warnings_and_info_use_separate_writers() {
        let mut context = LogContext::new()
            .with_ansi(false)
            .with_max_level(LogLevel::Debug);
        context.unmute();

        let warnings = Capture::default();
        let output = Capture::default();
        let dispatch = {
            let warnings = warnings.clone();
            let output = output.clone();
            context.dispatch_with_writers(move || warnings.clone(), move || output.clone())
        };

        tracing::dispatcher::with_default(&dispatch, || {
            context.write(LogLevel::Info, "loaded 3 points");
            context.write(LogLevel::Debug, "transposed axes");
            context.write(LogLevel::Warning, "something odd");
        });

        let warnings = warnings.contents();
        let output = output.contents();
        assert!(warnings.contains("something odd"), "{warnings}");
        assert!(!warnings.contains("loaded 3 points"), "{warnings}");
        assert!(output.contains("loaded 3 points"), "{output}");
        assert!(output.contains("transposed axes"), "{output}");
        assert!(!output.contains("something odd"), "{output}");
    }

    #[test]
    fn in_scope_returns_closure_value() {
        let context = LogContext::new();
        assert_eq!(context.in_scope(|| 6 * 7), 42);
    }

    #[test]
    fn mute_silences_again() {
        let mut context = LogContext::new().with_ansi(false);
        context.unmute();
        context.mute();

        let output = capture(&context, || context.write(LogLevel::Warning, "hidden"));
        assert_eq!(output, "");
    }

    #[cfg(debug_assertions)]
    #[test]
    fn broken_coordinates_are_reported() {
        let mut context = LogContext::new().with_ansi(false);
        context.unmute();

        let output = capture(&context, || {
            FixedPointCoordinate::new(1 << 30, 13_404_954);
        });
        assert!(output.contains("broken lat: 1073741824"), "{output}");
        assert!(
            output.contains("bits: 01000000000000000000000000000000"),
            "{output}"
        );
        assert!(!output.contains("broken lon"), "{output}");
    }

    #[test]
    fn valid_coordinates_are_quiet() {
        let mut context = LogContext::new().with_ansi(false);
        context.unmute();

        let output = capture(&context, || {
            FixedPointCoordinate::new(90_000_000, -180_000_000);
        });
        assert_eq!(output, "");
    }
}
