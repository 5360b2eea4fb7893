//! The content a text view edits

use std::fmt;

use scrivo_core::binding::Binding;

use crate::rich_text::RichText;

/// Either a plain-string binding or an attributed-text binding, never both
#[derive(Clone)]
pub enum TextContent {
    Plain(Binding<String>),
    Attributed(Binding<RichText>),
}

impl TextContent {
    /// Whether the bound value has no characters
    pub fn is_empty(&self) -> bool {
        match self {
            TextContent::Plain(binding) => binding.get().is_empty(),
            TextContent::Attributed(binding) => binding.get().is_empty(),
        }
    }

    pub fn is_attributed(&self) -> bool {
        matches!(self, TextContent::Attributed(_))
    }

    /// Whether writes through the binding are rejected
    pub fn is_constant(&self) -> bool {
        match self {
            TextContent::Plain(binding) => binding.is_constant(),
            TextContent::Attributed(binding) => binding.is_constant(),
        }
    }
}

impl fmt::Debug for TextContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextContent::Plain(binding) => f.debug_tuple("Plain").field(binding).finish(),
            TextContent::Attributed(binding) => {
                f.debug_tuple("Attributed").field(binding).finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_emptiness() {
        let binding = Binding::new(String::new());
        let content = TextContent::Plain(binding.clone());

        assert!(content.is_empty());
        binding.set("x".to_string());
        assert!(!content.is_empty());
        assert!(!content.is_attributed());
    }

    #[test]
    fn test_attributed_emptiness_uses_plain_projection() {
        let content = TextContent::Attributed(Binding::constant(RichText::new("")));
        assert!(content.is_empty());
        assert!(content.is_constant());

        let content = TextContent::Attributed(Binding::constant(RichText::new("hi")));
        assert!(!content.is_empty());
        assert!(content.is_attributed());
    }
}
