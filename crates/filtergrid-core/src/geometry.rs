//! Geometry and presentation primitives shared by the container and its items.

use std::fmt;

/// Measured size of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// CSS positioning scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Static,
    Relative,
    Absolute,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
        }
    }
}

/// A single inline presentation property written to a host element.
///
/// Hosts decide how to apply it; [`StyleProperty::name`] and
/// [`StyleProperty::css_value`] give the CSS rendering for hosts backed by a DOM.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StyleProperty {
    Padding(f32),
    Position(Position),
    Height(f32),
}

impl StyleProperty {
    /// CSS property name.
    pub fn name(&self) -> &'static str {
        match self {
            StyleProperty::Padding(_) => "padding",
            StyleProperty::Position(_) => "position",
            StyleProperty::Height(_) => "height",
        }
    }

    /// CSS value, with lengths expressed in pixels.
    pub fn css_value(&self) -> String {
        match self {
            StyleProperty::Padding(px) | StyleProperty::Height(px) => format!("{}px", px),
            StyleProperty::Position(position) => position.as_str().to_string(),
        }
    }

    /// Whether two properties target the same CSS property.
    pub fn same_property(&self, other: &StyleProperty) -> bool {
        self.name() == other.name()
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.css_value())
    }
}
