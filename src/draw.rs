//! # Draw-op IR
//!
//! Positioned drawing instructions, the contract between the cell
//! content renderers and the PDF backend. Each op is a single atomic
//! placement; the sequence for one page can be inspected and tested
//! without a PDF library in the loop.
//!
//! Coordinates are millimeters from the page's top-left corner. Text
//! `y` is the baseline. The backend converts to the PDF's bottom-left
//! coordinate space when drawing.

/// Font selector. Concrete faces are resolved by the
/// [`RenderingContext`](crate::context::RenderingContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    SemiBold,
    Bold,
}

/// Horizontal anchor of a text op's `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

/// Device-independent color. The reference palette mixes RGB and CMYK,
/// so both survive to the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgb(f32, f32, f32),
    Cmyk(f32, f32, f32, f32),
}

pub const BLACK: Color = Color::Rgb(0.0, 0.0, 0.0);
pub const WHITE: Color = Color::Rgb(1.0, 1.0, 1.0);
/// Accent green used for divider lines and the discount percentage.
pub const BRIGHT_GREEN: Color = Color::Cmyk(0.38, 0.04, 1.0, 0.0);
/// Headline ink on plain tags.
pub const DARK_GREEN: Color = Color::Rgb(67.0 / 255.0, 75.0 / 255.0, 49.0 / 255.0);

/// One abstract drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single run of text at a baseline position.
    Text {
        x_mm: f64,
        y_mm: f64,
        content: String,
        style: FontStyle,
        size_pt: f32,
        color: Color,
        anchor: TextAnchor,
    },

    /// A straight stroked segment.
    Line {
        x1_mm: f64,
        y1_mm: f64,
        x2_mm: f64,
        y2_mm: f64,
        width_pt: f32,
        color: Color,
    },

    /// An axis-aligned stroked rectangle (x/y is the top-left corner).
    RectOutline {
        x_mm: f64,
        y_mm: f64,
        w_mm: f64,
        h_mm: f64,
        width_pt: f32,
        color: Color,
    },

    /// An axis-aligned filled rectangle (x/y is the top-left corner).
    RectFill {
        x_mm: f64,
        y_mm: f64,
        w_mm: f64,
        h_mm: f64,
        color: Color,
    },

    /// An image resource placed into a bounding box, aspect-fit and
    /// centered. `name` is resolved through the rendering context; an
    /// unresolvable name is skipped by the backend.
    Image {
        name: String,
        x_mm: f64,
        y_mm: f64,
        w_mm: f64,
        h_mm: f64,
    },
}

impl DrawOp {
    /// Shorthand for a left-anchored text op.
    pub fn text(
        x_mm: f64,
        y_mm: f64,
        content: impl Into<String>,
        style: FontStyle,
        size_pt: f32,
        color: Color,
    ) -> Self {
        DrawOp::Text {
            x_mm,
            y_mm,
            content: content.into(),
            style,
            size_pt,
            color,
            anchor: TextAnchor::Left,
        }
    }

    /// Shorthand for a right-anchored text op.
    pub fn text_right(
        x_mm: f64,
        y_mm: f64,
        content: impl Into<String>,
        style: FontStyle,
        size_pt: f32,
        color: Color,
    ) -> Self {
        DrawOp::Text {
            x_mm,
            y_mm,
            content: content.into(),
            style,
            size_pt,
            color,
            anchor: TextAnchor::Right,
        }
    }
}
