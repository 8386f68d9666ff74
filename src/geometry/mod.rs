//! Geometric and numeric value primitives.
//!
//! These are pure value types with no dependency on the object graph:
//! rectangles, sizes, colors, and the number formatting rule used for every
//! real number written to the output file.

use serde::{Deserialize, Serialize};

/// Values closer to zero than this are written as `0`.
pub const NEAR_ZERO: f64 = 0.0001;

/// Format a real number for PDF syntax.
///
/// Rounds to 4 decimal places, half away from zero. Values with absolute
/// value below [`NEAR_ZERO`] are written as `0`, so `-0` never appears.
/// Trailing zeros and a trailing decimal point are removed.
///
/// # Examples
///
/// ```
/// use pdf_scribe::geometry::format_number;
///
/// assert_eq!(format_number(612.0), "612");
/// assert_eq!(format_number(1.00005), "1.0001");
/// assert_eq!(format_number(-0.00001), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value.abs() < NEAR_ZERO {
        return "0".to_string();
    }

    // beyond this magnitude there are no fractional digits left to round
    if value.abs() >= 1e15 {
        return format!("{:.0}", value);
    }

    // Round on the decimal rendering, not on the binary value: 1.00005 is
    // stored as 1.000049999... and must still round up.
    let text = format!("{:.12}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.as_bytes();
    let digit = |i: usize| frac.get(i).map_or(0, |b| u64::from(b - b'0'));

    let whole: u64 = int_part.parse().unwrap_or(0);
    let mut units = whole * 10_000 + digit(0) * 1000 + digit(1) * 100 + digit(2) * 10 + digit(3);
    if digit(4) >= 5 {
        units += 1;
    }
    if units == 0 {
        return "0".to_string();
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&(units / 10_000).to_string());
    let rem = units % 10_000;
    if rem != 0 {
        let frac = format!("{:04}", rem);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// Apply the near-zero rule to a value already in points.
pub fn normalize(value: f64) -> f64 {
    if value.abs() < NEAR_ZERO {
        0.0
    } else {
        value
    }
}

/// PDF rectangle: left, bottom, right, top.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left side
    pub left: f64,
    /// Bottom side
    pub bottom: f64,
    /// Right side
    pub right: f64,
    /// Top side
    pub top: f64,
}

impl Rect {
    /// Create a new rectangle from its four sides.
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Rectangle with the same value on all sides (margins).
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Rectangle anchored at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width (right - left).
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height (top - bottom).
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Move the rectangle.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.bottom + dy, self.right + dx, self.top + dy)
    }

    /// Grow every side by `margin`. A negative margin shrinks the rectangle.
    pub fn with_margin(&self, margin: f64) -> Self {
        Self::new(
            self.left - margin,
            self.bottom - margin,
            self.right + margin,
            self.top + margin,
        )
    }

    /// Multiply every side by `factor` (user units to points).
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(
            self.left * factor,
            self.bottom * factor,
            self.right * factor,
            self.top * factor,
        )
    }
}

/// Width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Swap width and height.
    pub fn landscape(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperType {
    /// US Letter (8.5" x 11")
    Letter,
    /// US Legal (8.5" x 14")
    Legal,
    /// ISO A3 (297mm x 420mm)
    A3,
    /// ISO A4 (210mm x 297mm)
    A4,
    /// ISO A5 (148mm x 210mm)
    A5,
}

impl PaperType {
    /// Paper size in points, portrait orientation.
    pub fn size(&self) -> Size {
        const MM: f64 = 72.0 / 25.4;
        match self {
            PaperType::Letter => Size::new(612.0, 792.0),
            PaperType::Legal => Size::new(612.0, 1008.0),
            PaperType::A3 => Size::new(297.0 * MM, 420.0 * MM),
            PaperType::A4 => Size::new(210.0 * MM, 297.0 * MM),
            PaperType::A5 => Size::new(148.0 * MM, 210.0 * MM),
        }
    }
}

/// User unit of measure. Coordinates passed to the writer are multiplied
/// by the unit's scale factor to get points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    /// PostScript point (1/72 inch)
    #[default]
    Point,
    /// Inch
    Inch,
    /// Millimeter
    Millimeter,
    /// Centimeter
    Centimeter,
}

impl UnitOfMeasure {
    /// Points per user unit.
    pub fn scale_factor(&self) -> f64 {
        match self {
            UnitOfMeasure::Point => 1.0,
            UnitOfMeasure::Inch => 72.0,
            UnitOfMeasure::Millimeter => 72.0 / 25.4,
            UnitOfMeasure::Centimeter => 72.0 / 2.54,
        }
    }
}

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Black
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// White
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn is_gray(&self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// How a color is rendered into PDF syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTarget {
    /// Fill operator (`rg` or `g`)
    NonStroking,
    /// Stroke operator (`RG` or `G`)
    Stroking,
    /// Array (`[r g b]` or `[g]`)
    Array,
}

/// Render a color as a content-stream operator or a color array.
pub fn color_to_string(color: Color, target: ColorTarget) -> String {
    let channel = |c: u8| format_number(f64::from(c) / 255.0);
    if color.is_gray() {
        let gray = channel(color.r);
        match target {
            ColorTarget::NonStroking => format!("{} g", gray),
            ColorTarget::Stroking => format!("{} G", gray),
            ColorTarget::Array => format!("[{}]", gray),
        }
    } else {
        let rgb = format!("{} {} {}", channel(color.r), channel(color.g), channel(color.b));
        match target {
            ColorTarget::NonStroking => format!("{} rg", rgb),
            ColorTarget::Stroking => format!("{} RG", rgb),
            ColorTarget::Array => format!("[{}]", rgb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integral_values() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(612.0), "612");
        assert_eq!(format_number(-72.0), "-72");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_number(1.00005), "1.0001");
        assert_eq!(format_number(-1.00005), "-1.0001");
        assert_eq!(format_number(0.12344), "0.1234");
        assert_eq!(format_number(2.99995), "3");
    }

    #[test]
    fn test_format_near_zero_is_zero() {
        assert_eq!(format_number(0.00009), "0");
        assert_eq!(format_number(-0.00009), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(841.8898), "841.8898");
        assert_eq!(format_number(10.25), "10.25");
    }

    #[test]
    fn test_rect_helpers() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
        assert_eq!(r.translate(5.0, -5.0), Rect::new(15.0, 15.0, 115.0, 65.0));
        assert_eq!(r.with_margin(-2.0), Rect::new(12.0, 22.0, 108.0, 68.0));
    }

    #[test]
    fn test_paper_sizes() {
        assert_eq!(PaperType::Letter.size(), Size::new(612.0, 792.0));
        assert_eq!(format_number(PaperType::A4.size().width), "595.2756");
        let landscape = PaperType::Letter.size().landscape();
        assert_eq!(landscape.width, 792.0);
    }

    #[test]
    fn test_color_to_string() {
        assert_eq!(color_to_string(Color::BLACK, ColorTarget::NonStroking), "0 g");
        assert_eq!(color_to_string(Color::WHITE, ColorTarget::Stroking), "1 G");
        assert_eq!(color_to_string(Color::rgb(255, 0, 0), ColorTarget::Array), "[1 0 0]");
        assert_eq!(
            color_to_string(Color::rgb(0, 0, 255), ColorTarget::NonStroking),
            "0 0 1 rg"
        );
    }

    #[test]
    fn test_unit_scale_factor() {
        assert_eq!(UnitOfMeasure::Inch.scale_factor(), 72.0);
        assert_eq!(UnitOfMeasure::Point.scale_factor(), 1.0);
    }
}
