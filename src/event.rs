//! Event and log callback system.
//!
//! The core never prints. Hosts that want to observe forced breaks, table
//! normalization, or row rebuilds install a callback here.

use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
///
/// The callback receives an event name and a JSON object payload.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    if let Ok(mut guard) = event_callback().lock() {
        *guard = None;
    }
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

/// Emit a log message built lazily.
///
/// The closure only runs when a callback is installed, so hot paths such as
/// row breaking do not pay for formatting.
pub(crate) fn emit_log_with<F>(level: LogLevel, message: F)
where
    F: FnOnce() -> String,
{
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, &message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_callback() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let called = Arc::new(AtomicBool::new(false));
        let called_clone = Arc::clone(&called);
        set_event_callback(move |name, _data| {
            if name == "event_test" {
                called_clone.store(true, Ordering::SeqCst);
            }
        });
        emit_event("event_test", "{}");
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_log_callback_lazy() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = Arc::clone(&hits);
        set_log_callback(move |_level, msg| {
            if msg == "lazy hello" {
                hits_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        emit_log_with(LogLevel::Info, || "lazy hello".to_string());
        emit_log(LogLevel::Info, "lazy hello");
        assert!(hits.load(Ordering::SeqCst) >= 2);
    }
}
