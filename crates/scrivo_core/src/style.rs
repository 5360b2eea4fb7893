//! Style values shared between the declarative and native layers
//!
//! Colors, fonts, insets and line-break modes. Semantic colors and fonts are
//! resolved to concrete native values with [`SemanticColor::resolve`] and
//! [`Font::body`].

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Primary text color
    pub const LABEL: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Secondary text color, used for placeholders
    pub const SECONDARY_LABEL: Color = Color::new(0.235, 0.235, 0.263, 0.6);
    /// Tint used for accents
    pub const ACCENT: Color = Color::rgb(0.0, 0.478, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// A color named by role rather than by value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SemanticColor {
    Primary,
    Secondary,
    Accent,
    Custom(Color),
}

impl SemanticColor {
    /// Convert to the native color used by text widgets
    pub fn resolve(self) -> Color {
        match self {
            SemanticColor::Primary => Color::LABEL,
            SemanticColor::Secondary => Color::SECONDARY_LABEL,
            SemanticColor::Accent => Color::ACCENT,
            SemanticColor::Custom(color) => color,
        }
    }
}

impl From<Color> for SemanticColor {
    fn from(color: Color) -> Self {
        SemanticColor::Custom(color)
    }
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// Font family
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Platform UI font
    #[default]
    System,
    /// Platform monospaced font
    Monospace,
    /// A named font family
    Named(String),
}

/// A concrete font description
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub size: f32,
    pub weight: FontWeight,
}

impl Font {
    /// Point size of the platform body text style
    pub const BODY_SIZE: f32 = 17.0;

    pub fn system(size: f32) -> Self {
        Self {
            family: FontFamily::System,
            size,
            weight: FontWeight::Regular,
        }
    }

    pub fn monospace(size: f32) -> Self {
        Self {
            family: FontFamily::Monospace,
            size,
            weight: FontWeight::Regular,
        }
    }

    pub fn named(name: impl Into<String>, size: f32) -> Self {
        Self {
            family: FontFamily::Named(name.into()),
            size,
            weight: FontWeight::Regular,
        }
    }

    /// The platform default body font
    pub fn body() -> Self {
        Self::system(Self::BODY_SIZE)
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn bold(self) -> Self {
        self.weight(FontWeight::Bold)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::body()
    }
}

/// Padding around text content
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every edge
    pub const fn uniform(inset: f32) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// Horizontal and vertical insets
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

/// How lines are broken when text exceeds the available width
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreakMode {
    #[default]
    WordWrap,
    CharWrap,
    Clip,
    TruncateHead,
    TruncateTail,
    TruncateMiddle,
}
