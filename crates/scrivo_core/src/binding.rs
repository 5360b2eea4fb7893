//! Two-way bindings to externally owned state
//!
//! A `Binding<T>` is how a view reads and writes state it does not own.
//! Reads return the owner's current value; writes hand a new value back to
//! the owner and raise the shared dirty flag so the host re-renders.
//!
//! ```rust
//! use scrivo_core::binding::{dirty_flag, Binding};
//! use std::sync::atomic::Ordering;
//!
//! let dirty = dirty_flag();
//! let text = Binding::with_dirty_flag(String::from("hello"), dirty.clone());
//!
//! text.set("hello world".to_string());
//! assert_eq!(text.get(), "hello world");
//! assert!(dirty.swap(false, Ordering::SeqCst));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, ScrivoError};

/// Shared dirty flag for triggering UI rebuilds
pub type DirtyFlag = Arc<AtomicBool>;

/// Create a fresh, clean dirty flag
pub fn dirty_flag() -> DirtyFlag {
    Arc::new(AtomicBool::new(false))
}

type Getter<T> = Arc<dyn Fn() -> T + Send + Sync>;
type Setter<T> = Arc<dyn Fn(T) + Send + Sync>;

/// A two-way reference to externally owned state
pub struct Binding<T> {
    get: Getter<T>,
    /// `None` for constant bindings
    set: Option<Setter<T>>,
    /// Raised on every successful write
    dirty_flag: Option<DirtyFlag>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: self.set.clone(),
            dirty_flag: self.dirty_flag.clone(),
        }
    }
}

impl<T> Binding<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a binding that owns its storage
    pub fn new(initial: T) -> Self {
        let storage = Arc::new(Mutex::new(initial));
        let read = Arc::clone(&storage);
        Self {
            get: Arc::new(move || read.lock().unwrap_or_else(PoisonError::into_inner).clone()),
            set: Some(Arc::new(move |value| {
                *storage.lock().unwrap_or_else(PoisonError::into_inner) = value;
            })),
            dirty_flag: None,
        }
    }

    /// Create an owning binding that raises `flag` on every write
    pub fn with_dirty_flag(initial: T, flag: DirtyFlag) -> Self {
        Self::new(initial).dirty_on(flag)
    }

    /// Create a read-only binding
    ///
    /// Writes are rejected by [`Binding::try_set`] and logged by [`Binding::set`].
    pub fn constant(value: T) -> Self {
        Self {
            get: Arc::new(move || value.clone()),
            set: None,
            dirty_flag: None,
        }
    }

    /// Create a projected binding from a getter/setter pair
    pub fn from_fns<G, S>(get: G, set: S) -> Self
    where
        G: Fn() -> T + Send + Sync + 'static,
        S: Fn(T) + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: Some(Arc::new(set)),
            dirty_flag: None,
        }
    }

    /// Attach a dirty flag, replacing any previous one
    pub fn dirty_on(mut self, flag: DirtyFlag) -> Self {
        self.dirty_flag = Some(flag);
        self
    }

    /// Read the owner's current value
    pub fn get(&self) -> T {
        (self.get)()
    }

    /// Write a new value to the owner
    pub fn try_set(&self, value: T) -> Result<()> {
        let set = self.set.as_ref().ok_or(ScrivoError::ConstantBinding)?;
        set(value);
        if let Some(flag) = &self.dirty_flag {
            flag.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Write a new value, dropping it with a warning if the binding is constant
    pub fn set(&self, value: T) {
        if let Err(err) = self.try_set(value) {
            tracing::warn!("Dropped binding write: {}", err);
        }
    }

    /// Update the value using a function
    pub fn update<F: FnOnce(T) -> T>(&self, f: F) {
        self.set(f(self.get()));
    }

    /// Whether writes through this binding are rejected
    pub fn is_constant(&self) -> bool {
        self.set.is_none()
    }

    /// The dirty flag raised on writes, if any
    pub fn dirty_flag(&self) -> Option<&DirtyFlag> {
        self.dirty_flag.as_ref()
    }
}

impl<T> Binding<Option<T>>
where
    T: Clone + Send + Sync + 'static,
{
    /// Project an optional binding onto a non-optional one
    ///
    /// `None` reads as `default`. Writes always store `Some`, so an empty string
    /// written back does not turn into `None` again.
    pub fn unwrap_or(&self, default: T) -> Binding<T> {
        let read = self.clone();
        let write = self.clone();
        Binding::from_fns(
            move || read.get().unwrap_or_else(|| default.clone()),
            move |value| write.set(Some(value)),
        )
    }
}

impl<T> fmt::Debug for Binding<T>
where
    T: Clone + Send + Sync + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .field("constant", &self.is_constant())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_read_write() {
        let binding = Binding::new(String::from("a"));
        let other = binding.clone();

        other.set("b".to_string());
        assert_eq!(binding.get(), "b");

        binding.update(|s| s + "c");
        assert_eq!(other.get(), "bc");
    }

    #[test]
    fn test_dirty_flag_raised_on_write() {
        let flag = dirty_flag();
        let binding = Binding::with_dirty_flag(0i32, flag.clone());

        assert!(!flag.load(Ordering::SeqCst));
        binding.set(3);
        assert!(flag.swap(false, Ordering::SeqCst));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_constant_binding_rejects_writes() {
        let binding = Binding::constant(5u32);
        assert!(binding.is_constant());
        assert_eq!(binding.try_set(6), Err(ScrivoError::ConstantBinding));

        binding.set(7);
        assert_eq!(binding.get(), 5);
    }

    #[test]
    fn test_unwrap_or_coalesces_none() {
        let source: Binding<Option<String>> = Binding::new(None);
        let text = source.unwrap_or(String::new());

        assert_eq!(text.get(), "");

        text.set("note".to_string());
        assert_eq!(source.get(), Some("note".to_string()));

        // Empty strings stay `Some`
        text.set(String::new());
        assert_eq!(source.get(), Some(String::new()));
    }

    #[test]
    fn test_unwrap_or_propagates_dirty_flag() {
        let flag = dirty_flag();
        let source = Binding::with_dirty_flag(None::<String>, flag.clone());
        let text = source.unwrap_or(String::new());

        text.set("x".to_string());
        assert!(flag.load(Ordering::SeqCst));
    }
}
