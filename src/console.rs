// Console logging for the scheduler core
//
// The core never writes to a screen. Every informational or warning line goes
// through a `ConsoleSink`, which the embedder provides.
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use conquer_once::spin::OnceCell;
use core::fmt;
use crossbeam_queue::ArrayQueue;

/// Log levels from most to least severe
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Suffix appended to the subsystem tag, e.g. `[ML WARNING]`.
    fn tag_suffix(self) -> &'static str {
        match self {
            LogLevel::Error => " ERROR",
            LogLevel::Warn => " WARNING",
            LogLevel::Info => "",
            LogLevel::Debug => " DEBUG",
        }
    }
}

/// Destination for console lines.
pub trait ConsoleSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Discards everything.
pub struct NullSink;

impl ConsoleSink for NullSink {
    fn emit(&self, _line: &str) {}
}

/// Keeps the most recent lines in a bounded ring, dropping the oldest first.
pub struct BufferSink {
    lines: ArrayQueue<String>,
}

impl BufferSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: ArrayQueue::new(capacity.max(1)),
        }
    }

    /// Remove and return all buffered lines, oldest first.
    pub fn drain(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len());
        while let Some(line) = self.lines.pop() {
            out.push(line);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl ConsoleSink for BufferSink {
    fn emit(&self, line: &str) {
        self.lines.force_push(String::from(line));
    }
}

/// Cloneable handle pairing a sink with a minimum level.
#[derive(Clone)]
pub struct Console {
    sink: Arc<dyn ConsoleSink>,
    level: LogLevel,
}

impl Console {
    pub fn new(sink: Arc<dyn ConsoleSink>, level: LogLevel) -> Self {
        Self { sink, level }
    }

    pub fn null() -> Self {
        Self::new(Arc::new(NullSink), LogLevel::Error)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Format and emit one tagged line if `level` is enabled.
    pub fn log(&self, level: LogLevel, tag: &str, args: fmt::Arguments) {
        if !self.is_enabled(level) {
            return;
        }
        let line = alloc::format!("[{}{}] {}", tag, level.tag_suffix(), args);
        self.sink.emit(&line);
    }

    /// Emit a raw line (report tables) at info level.
    pub fn line(&self, args: fmt::Arguments) {
        if self.is_enabled(LogLevel::Info) {
            self.sink.emit(&alloc::format!("{}", args));
        }
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Console").field("level", &self.level).finish()
    }
}

/// Console errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    AlreadyInstalled,
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConsoleError::AlreadyInstalled => write!(f, "Global console already installed"),
        }
    }
}

static GLOBAL_CONSOLE: OnceCell<Console> = OnceCell::uninit();

/// Install the process-wide console. Only the first call succeeds.
pub fn install_console(console: Console) -> Result<(), ConsoleError> {
    GLOBAL_CONSOLE
        .try_init_once(move || console)
        .map_err(|_| ConsoleError::AlreadyInstalled)
}

/// The installed process-wide console, or a null console.
pub fn global_console() -> Console {
    match GLOBAL_CONSOLE.try_get() {
        Ok(console) => console.clone(),
        Err(_) => Console::null(),
    }
}

#[macro_export]
macro_rules! kinfo {
    ($console:expr, $tag:expr, $($arg:tt)*) => {
        $console.log($crate::console::LogLevel::Info, $tag, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! kwarn {
    ($console:expr, $tag:expr, $($arg:tt)*) => {
        $console.log($crate::console::LogLevel::Warn, $tag, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! kerror {
    ($console:expr, $tag:expr, $($arg:tt)*) => {
        $console.log($crate::console::LogLevel::Error, $tag, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! kdebug {
    ($console:expr, $tag:expr, $($arg:tt)*) => {
        $console.log($crate::console::LogLevel::Debug, $tag, format_args!($($arg)*))
    };
}
