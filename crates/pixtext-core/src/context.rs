//! Process-wide library state
//!
//! Three things live here and nowhere else: the init reference count, the
//! default byte order for 16-bit text without a byte-order mark, and the
//! message of the most recent failure.
//!
//! The global context is created on first use. Set `PIXTEXT_BYTE_SWAPPED=1`
//! to start with swapped 16-bit text:
//!
//! ```bash
//! PIXTEXT_BYTE_SWAPPED=1 ./my_app
//! ```
//!
//! ```
//! use pixtext_core::context::Context;
//!
//! let ctx = Context::new();
//! ctx.init();
//! assert!(ctx.was_init());
//! ctx.set_error("something broke");
//! assert_eq!(ctx.last_error().as_deref(), Some("something broke"));
//! ctx.quit();
//! assert!(!ctx.was_init());
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::OnceLock;

use parking_lot::Mutex;

/// Shared state behind the library's global functions
#[derive(Debug, Default)]
pub struct Context {
    init_count: AtomicUsize,
    byte_swapped: AtomicBool,
    last_error: Mutex<Option<String>>,
}

static GLOBAL: OnceLock<Context> = OnceLock::new();

/// The process-wide context
pub fn global() -> &'static Context {
    GLOBAL.get_or_init(|| {
        let ctx = Context::new();
        if let Ok(val) = std::env::var("PIXTEXT_BYTE_SWAPPED") {
            let swapped = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
            if swapped {
                ctx.set_byte_swapped(true);
                log::info!("16-bit text defaults to swapped byte order via PIXTEXT_BYTE_SWAPPED");
            }
        }
        ctx
    })
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the init count, returning the new value
    pub fn init(&self) -> usize {
        let count = self.init_count.fetch_add(1, Ordering::SeqCst) + 1;
        if count == 1 {
            log::info!("pixtext initialized");
        }
        count
    }

    /// Decrements the init count; the last quit clears the error slot
    pub fn quit(&self) {
        let prev = self
            .init_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .unwrap_or(0);
        if prev == 1 {
            self.clear_error();
            log::info!("pixtext shut down");
        }
    }

    pub fn was_init(&self) -> bool {
        self.init_count.load(Ordering::SeqCst) > 0
    }

    pub fn init_count(&self) -> usize {
        self.init_count.load(Ordering::SeqCst)
    }

    /// Default byte order for 16-bit text that carries no byte-order mark
    pub fn set_byte_swapped(&self, swapped: bool) {
        self.byte_swapped.store(swapped, Ordering::SeqCst);
    }

    pub fn is_byte_swapped(&self) -> bool {
        self.byte_swapped.load(Ordering::SeqCst)
    }

    /// Overwrites the last-error slot
    pub fn set_error(&self, message: impl Into<String>) {
        *self.last_error.lock() = Some(message.into());
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn clear_error(&self) {
        *self.last_error.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_reference_counted() {
        let ctx = Context::new();
        assert!(!ctx.was_init());
        assert_eq!(ctx.init(), 1);
        assert_eq!(ctx.init(), 2);
        ctx.quit();
        assert!(ctx.was_init());
        ctx.quit();
        assert!(!ctx.was_init());
    }

    #[test]
    fn quit_without_init_is_harmless() {
        let ctx = Context::new();
        ctx.quit();
        assert_eq!(ctx.init_count(), 0);
    }

    #[test]
    fn error_slot_is_overwritten() {
        let ctx = Context::new();
        assert_eq!(ctx.last_error(), None);
        ctx.set_error("first");
        ctx.set_error("second");
        assert_eq!(ctx.last_error().as_deref(), Some("second"));
    }

    #[test]
    fn final_quit_clears_error() {
        let ctx = Context::new();
        ctx.init();
        ctx.set_error("boom");
        ctx.quit();
        assert_eq!(ctx.last_error(), None);
    }

    #[test]
    fn byte_swap_toggle() {
        let ctx = Context::new();
        assert!(!ctx.is_byte_swapped());
        ctx.set_byte_swapped(true);
        assert!(ctx.is_byte_swapped());
    }
}
