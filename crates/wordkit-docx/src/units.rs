//! Measurement units and small value types shared across the tree
//!
//! OOXML mixes three length units:
//! - EMU (English Metric Unit): 914400 per inch, used by drawings
//! - twips: 1440 per inch, used by page and table layout
//! - half-points: used by font sizes

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{DocxError, Result};
use crate::xml::{Attrs, Element, ToXml, XmlWriter};

/// EMUs per inch (914400)
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per pixel at 96 DPI (9525)
pub const EMU_PER_PIXEL: i64 = 9_525;

/// Twips per inch (1440)
pub const TWIPS_PER_INCH: i64 = 1_440;

/// Widest drawing that fits the text area of an A4 page with default margins, in EMUs
pub const A4_EMU_MAX_WIDTH: i64 = 5_274_310;

/// Convert EMUs to pixels at 96 DPI
pub fn emu_to_pixels(emu: i64) -> i64 {
    (emu as f64 / EMU_PER_PIXEL as f64).round() as i64
}

/// Convert pixels to EMUs at 96 DPI
pub fn pixels_to_emu(pixels: i64) -> i64 {
    pixels * EMU_PER_PIXEL
}

/// Convert EMUs to inches
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMU_PER_INCH as f64
}

/// Convert inches to EMUs
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

/// Convert twips to inches
pub fn twips_to_inches(twips: i64) -> f64 {
    twips as f64 / TWIPS_PER_INCH as f64
}

/// Convert inches to twips
pub fn inches_to_twips(inches: f64) -> i64 {
    (inches * TWIPS_PER_INCH as f64).round() as i64
}

/// Convert a point size to half-points (`w:sz`)
pub fn points_to_half_points(points: f64) -> u32 {
    (points * 2.0).round().max(0.0) as u32
}

/// Page sizes supported by [`crate::Docx::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PageSize {
    /// 297 x 420 mm
    A3,
    /// 210 x 297 mm
    #[default]
    A4,
}

impl PageSize {
    /// Width and height in twips (portrait)
    pub fn twips(self) -> (i64, i64) {
        match self {
            Self::A3 => (16_838, 23_811),
            Self::A4 => (11_906, 16_838),
        }
    }
}

/// Paragraph and table alignment (`ST_Jc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    Start,
    Center,
    End,
    Both,
    MediumKashida,
    Distribute,
    NumTab,
    HighKashida,
    LowKashida,
    ThaiDistribute,
    Left,
    Right,
}

impl Justification {
    /// The OOXML attribute value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Both => "both",
            Self::MediumKashida => "mediumKashida",
            Self::Distribute => "distribute",
            Self::NumTab => "numTab",
            Self::HighKashida => "highKashida",
            Self::LowKashida => "lowKashida",
            Self::ThaiDistribute => "thaiDistribute",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parse an attribute value; unknown values are `BadAttribute`
    pub fn parse(value: &str) -> Result<Self> {
        Ok(match value {
            "start" => Self::Start,
            "center" => Self::Center,
            "end" => Self::End,
            "both" => Self::Both,
            "mediumKashida" => Self::MediumKashida,
            "distribute" => Self::Distribute,
            "numTab" => Self::NumTab,
            "highKashida" => Self::HighKashida,
            "lowKashida" => Self::LowKashida,
            "thaiDistribute" => Self::ThaiDistribute,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => return Err(DocxError::bad_attribute("val", value)),
        })
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hex RGB colour such as `FF0000`, or `auto`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// Black, the default border colour
    pub fn black() -> Self {
        Self("000000".to_string())
    }

    /// The `auto` colour
    pub fn auto() -> Self {
        Self("auto".to_string())
    }

    /// Build from a `RRGGBB` string, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(hex.to_ascii_uppercase()))
        } else {
            None
        }
    }

    /// Whether this is a six-digit hex colour
    pub fn is_hex(&self) -> bool {
        self.0.len() == 6 && self.0.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Attribute value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::from_hex(value).unwrap_or_else(|| Self(value.to_string()))
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Units of a table or cell width (`ST_TblWidth`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthType {
    #[default]
    Auto,
    /// Twentieths of a point (twips)
    Dxa,
    /// Fiftieths of a percent
    Pct,
    Nil,
}

impl WidthType {
    /// The OOXML attribute value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dxa => "dxa",
            Self::Pct => "pct",
            Self::Nil => "nil",
        }
    }
}

impl FromStr for WidthType {
    type Err = DocxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "dxa" => Ok(Self::Dxa),
            "pct" => Ok(Self::Pct),
            "nil" => Ok(Self::Nil),
            _ => Err(DocxError::bad_attribute("type", s)),
        }
    }
}

impl fmt::Display for WidthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical alignment of cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    /// Content spread over the whole cell height
    Both,
}

impl VerticalAlignment {
    /// The OOXML attribute value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
            Self::Both => "both",
        }
    }
}

impl FromStr for VerticalAlignment {
    type Err = DocxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            "both" => Ok(Self::Both),
            _ => Err(DocxError::bad_attribute("val", s)),
        }
    }
}

impl fmt::Display for VerticalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One border edge (`w:top`, `w:insideH`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    /// Line style (`single`, `double`, `dashed`, `none`, ...)
    pub style: String,
    /// Width in eighths of a point
    pub size: u32,
    /// Spacing from the content, in points
    pub space: u32,
    /// Line colour
    pub color: Color,
}

impl Border {
    /// A single line of the given width and colour
    pub fn single(size: u32, color: Color) -> Self {
        Self {
            style: "single".to_string(),
            size,
            space: 0,
            color,
        }
    }
}

impl Default for Border {
    /// Single 4-unit black line
    fn default() -> Self {
        Self::single(4, Color::black())
    }
}

/// Background shading (`w:shd`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shading {
    /// Pattern (`clear`, `solid`, ...)
    pub pattern: String,
    /// Pattern colour
    pub color: Option<Color>,
    /// Fill colour
    pub fill: Option<Color>,
}

impl Shading {
    /// Plain background fill
    pub fn fill(fill: impl Into<Color>) -> Self {
        Self {
            pattern: "clear".to_string(),
            color: Some(Color::auto()),
            fill: Some(fill.into()),
        }
    }
}

impl Border {
    /// Write as the named edge element (`w:top`, `w:insideH`, ...)
    pub(crate) fn write_edge<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.empty(
            name,
            Attrs::new()
                .with("w:val", &self.style)
                .with("w:sz", self.size)
                .with("w:space", self.space)
                .with("w:color", &self.color),
        )
    }

    /// Read from an edge element
    pub(crate) fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            style: el.val()?.unwrap_or_else(|| "nil".to_string()),
            size: el.parse_attr("sz")?.unwrap_or(0),
            space: el.parse_attr("space")?.unwrap_or(0),
            color: el.attr("color")?.map(Color::from).unwrap_or_else(Color::auto),
        })
    }
}

impl ToXml for Shading {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.empty(
            "w:shd",
            Attrs::new()
                .with("w:val", &self.pattern)
                .opt("w:color", self.color.as_ref())
                .opt("w:fill", self.fill.as_ref()),
        )
    }
}

impl Shading {
    /// Read from a `w:shd` element
    pub(crate) fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            pattern: el.val()?.unwrap_or_else(|| "clear".to_string()),
            color: el.attr("color")?.map(Color::from),
            fill: el.attr("fill")?.map(Color::from),
        })
    }
}
