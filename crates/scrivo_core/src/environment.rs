//! Ambient environment values
//!
//! The environment carries values supplied implicitly by the enclosing UI
//! context: whether the surrounding form is enabled, the ambient font, line
//! spacing and so on. Views read it during reconciliation; they never write it.
//!
//! Besides the built-in fields, components can publish their own typed values
//! through [`EnvironmentKey`]:
//!
//! ```rust
//! use scrivo_core::environment::{Environment, EnvironmentKey};
//!
//! struct CornerRadiusKey;
//!
//! impl EnvironmentKey for CornerRadiusKey {
//!     type Value = f32;
//!     fn default_value() -> f32 {
//!         0.0
//!     }
//! }
//!
//! let env = Environment::new().with_value::<CornerRadiusKey>(6.0);
//! assert_eq!(env.get::<CornerRadiusKey>(), 6.0);
//! assert_eq!(Environment::new().get::<CornerRadiusKey>(), 0.0);
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::style::{Color, Font, LineBreakMode};

/// A typed key for a custom environment value
pub trait EnvironmentKey: 'static {
    /// Type of the stored value
    type Value: Clone + Send + Sync + 'static;

    /// Value returned when nothing has been set for this key
    fn default_value() -> Self::Value;
}

/// Snapshot of ambient values for one render pass
#[derive(Clone)]
pub struct Environment {
    /// Whether controls in this context accept interaction
    pub is_enabled: bool,
    /// Whether scroll views in this context may scroll
    pub is_scroll_enabled: bool,
    /// Ambient font, used when a view sets none
    pub font: Option<Font>,
    /// Ambient foreground color, used when a view sets none
    pub foreground_color: Option<Color>,
    /// Maximum number of displayed lines (`None` = unlimited)
    pub line_limit: Option<usize>,
    /// Ambient line-break mode
    pub line_break_mode: LineBreakMode,
    /// Extra spacing between lines, in points
    pub line_spacing: f32,
    /// Preferred maximum layout width for self-sizing text
    pub preferred_max_layout_width: Option<f32>,
    /// Component-defined values keyed by their `EnvironmentKey` type
    extensions: FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            is_enabled: true,
            is_scroll_enabled: true,
            font: None,
            foreground_color: None,
            line_limit: None,
            line_break_mode: LineBreakMode::WordWrap,
            line_spacing: 0.0,
            preferred_max_layout_width: None,
            extensions: FxHashMap::default(),
        }
    }
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    pub fn with_scroll_enabled(mut self, enabled: bool) -> Self {
        self.is_scroll_enabled = enabled;
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_foreground_color(mut self, color: Color) -> Self {
        self.foreground_color = Some(color);
        self
    }

    pub fn with_line_limit(mut self, limit: Option<usize>) -> Self {
        self.line_limit = limit;
        self
    }

    pub fn with_line_break_mode(mut self, mode: LineBreakMode) -> Self {
        self.line_break_mode = mode;
        self
    }

    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn with_preferred_max_layout_width(mut self, width: Option<f32>) -> Self {
        self.preferred_max_layout_width = width;
        self
    }

    /// Set a component-defined value
    pub fn with_value<K: EnvironmentKey>(mut self, value: K::Value) -> Self {
        self.set::<K>(value);
        self
    }

    /// Set a component-defined value in place
    pub fn set<K: EnvironmentKey>(&mut self, value: K::Value) {
        self.extensions.insert(TypeId::of::<K>(), Arc::new(value));
    }

    /// Read a component-defined value, falling back to the key's default
    pub fn get<K: EnvironmentKey>(&self) -> K::Value {
        self.extensions
            .get(&TypeId::of::<K>())
            .and_then(|value| value.downcast_ref::<K::Value>())
            .cloned()
            .unwrap_or_else(K::default_value)
    }

    /// Whether a value has been set explicitly for `K`
    pub fn contains<K: EnvironmentKey>(&self) -> bool {
        self.extensions.contains_key(&TypeId::of::<K>())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("is_enabled", &self.is_enabled)
            .field("is_scroll_enabled", &self.is_scroll_enabled)
            .field("font", &self.font)
            .field("foreground_color", &self.foreground_color)
            .field("line_limit", &self.line_limit)
            .field("line_break_mode", &self.line_break_mode)
            .field("line_spacing", &self.line_spacing)
            .field("preferred_max_layout_width", &self.preferred_max_layout_width)
            // Extension values are type-erased
            .field("extensions", &self.extensions.len())
            .finish()
    }
}
