//! Paragraph styling and the paragraph-spacing environment value

use scrivo_core::environment::{Environment, EnvironmentKey};
use scrivo_core::style::LineBreakMode;

/// Paragraph-level attributes applied to attributed text
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParagraphStyle {
    pub line_break_mode: LineBreakMode,
    /// Extra spacing between lines, in points
    pub line_spacing: f32,
    /// Extra spacing after each paragraph, in points
    pub paragraph_spacing: Option<f32>,
}

impl ParagraphStyle {
    /// Build the paragraph style the ambient context asks for
    pub fn from_environment(env: &Environment) -> Self {
        Self {
            line_break_mode: env.line_break_mode,
            line_spacing: env.line_spacing,
            paragraph_spacing: env.paragraph_spacing(),
        }
    }
}

/// Environment key for custom paragraph spacing
///
/// Setting it forces text views to render plain content as attributed text,
/// since paragraph spacing has no plain-text representation.
pub struct ParagraphSpacingKey;

impl EnvironmentKey for ParagraphSpacingKey {
    type Value = Option<f32>;

    fn default_value() -> Option<f32> {
        None
    }
}

/// Paragraph-spacing accessors on [`Environment`]
pub trait ParagraphSpacingEnvironment {
    /// Set the paragraph spacing for text views in this context
    fn with_paragraph_spacing(self, spacing: f32) -> Self;

    /// Paragraph spacing requested by the context, if any
    fn paragraph_spacing(&self) -> Option<f32>;
}

impl ParagraphSpacingEnvironment for Environment {
    fn with_paragraph_spacing(self, spacing: f32) -> Self {
        self.with_value::<ParagraphSpacingKey>(Some(spacing))
    }

    fn paragraph_spacing(&self) -> Option<f32> {
        self.get::<ParagraphSpacingKey>()
    }
}
