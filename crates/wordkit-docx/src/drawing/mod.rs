//! Drawings: inline and anchored frames around a graphic payload
//!
//! ```xml
//! <w:drawing>
//!   <wp:inline distT="0" distB="0" distL="0" distR="0">
//!     <wp:extent cx="5274310" cy="2637155"/>
//!     <wp:effectExtent l="0" t="0" r="0" b="0"/>
//!     <wp:docPr id="1" name="Picture 1"/>
//!     <wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>
//!     <a:graphic>
//!       <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">
//!         <pic:pic>...</pic:pic>
//!       </a:graphicData>
//!     </a:graphic>
//!   </wp:inline>
//! </w:drawing>
//! ```
//!
//! The payload is chosen by `a:graphicData/@uri`. Drawings whose payload is
//! not one of picture, shape, group or canvas are dropped on parse.

mod group;
mod picture;
mod shape;

use std::io::Write;

pub use group::{Canvas, Group, GroupChild};
pub use picture::Picture;
pub use shape::{
    BodyProperties, ColorChoice, Line, LineFill, Shape, ShapeElem, ShapeProperties, Transform,
};

use crate::error::{DocxError, Result};
use crate::xml::namespace::{URI_CANVAS, URI_GROUP, URI_PICTURE, URI_SHAPE};
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

/// Stacking order Word assigns to the first floating object
pub const DEFAULT_RELATIVE_HEIGHT: u32 = 251_658_240;

/// Width and height in EMUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub cx: i64,
    pub cy: i64,
}

/// A coordinate pair in EMUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// Extra space around the frame taken by effects such as shadows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EffectExtent {
    pub l: i64,
    pub t: i64,
    pub r: i64,
    pub b: i64,
}

/// Distance between the frame and surrounding text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Distances {
    pub top: i64,
    pub bottom: i64,
    pub left: i64,
    pub right: i64,
}

/// Identification of a drawing object (`wp:docPr`, `pic:cNvPr`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NonVisualProps {
    pub id: u32,
    pub name: String,
    /// Alternative text
    pub descr: Option<String>,
}

/// The payload of a drawing, keyed by `a:graphicData/@uri`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicData {
    Picture(Picture),
    Shape(Shape),
    Group(Group),
    Canvas(Canvas),
}

/// A drawing flowing with the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    pub distances: Distances,
    pub extent: Extent,
    pub effect_extent: Option<EffectExtent>,
    pub doc_pr: NonVisualProps,
    /// `a:graphicFrameLocks/@noChangeAspect`
    pub no_change_aspect: Option<bool>,
    pub graphic: GraphicData,
}

/// A drawing positioned relative to the page, margin, column or paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub distances: Distances,
    /// Position by `simple_pos_point` instead of `position_h`/`position_v`
    pub simple_pos: bool,
    pub simple_pos_point: Point,
    pub relative_height: u32,
    pub behind_doc: bool,
    pub locked: bool,
    pub layout_in_cell: bool,
    pub allow_overlap: bool,
    pub position_h: Position,
    pub position_v: Position,
    pub extent: Extent,
    pub effect_extent: Option<EffectExtent>,
    pub wrap: Wrap,
    pub doc_pr: NonVisualProps,
    pub no_change_aspect: Option<bool>,
    pub graphic: GraphicData,
}

/// One axis of an anchor position (`wp:positionH` / `wp:positionV`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Reference frame (`column`, `paragraph`, `page`, `margin`, ...)
    pub relative_from: String,
    pub offset: PositionOffset,
}

/// How an anchor is placed along one axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionOffset {
    /// Absolute offset in EMUs (`wp:posOffset`)
    Offset(i64),
    /// Relative alignment such as `center` (`wp:align`)
    Align(String),
}

/// How text flows around an anchored drawing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Wrap {
    /// `wp:wrapNone`
    #[default]
    None,
    /// `wp:wrapSquare`; `wrap_text` is `bothSides`, `left`, `right` or `largest`
    Square { wrap_text: String },
    /// `wp:wrapTopAndBottom`
    TopAndBottom,
}

/// A `w:drawing` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawing {
    Inline(Inline),
    Anchor(Box<Anchor>),
}

impl Extent {
    pub(crate) fn attrs(&self) -> Attrs {
        Attrs::new().with("cx", self.cx).with("cy", self.cy)
    }

    pub(crate) fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            cx: el.parse_attr("cx")?.unwrap_or(0),
            cy: el.parse_attr("cy")?.unwrap_or(0),
        })
    }
}

impl Point {
    pub(crate) fn attrs(&self) -> Attrs {
        Attrs::new().with("x", self.x).with("y", self.y)
    }

    pub(crate) fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            x: el.parse_attr("x")?.unwrap_or(0),
            y: el.parse_attr("y")?.unwrap_or(0),
        })
    }
}

impl EffectExtent {
    fn write<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.empty(
            "wp:effectExtent",
            Attrs::new()
                .with("l", self.l)
                .with("t", self.t)
                .with("r", self.r)
                .with("b", self.b),
        )
    }

    fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            l: el.parse_attr("l")?.unwrap_or(0),
            t: el.parse_attr("t")?.unwrap_or(0),
            r: el.parse_attr("r")?.unwrap_or(0),
            b: el.parse_attr("b")?.unwrap_or(0),
        })
    }
}

impl Distances {
    fn push(&self, attrs: Attrs) -> Attrs {
        attrs
            .with("distT", self.top)
            .with("distB", self.bottom)
            .with("distL", self.left)
            .with("distR", self.right)
    }

    fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            top: el.parse_attr("distT")?.unwrap_or(0),
            bottom: el.parse_attr("distB")?.unwrap_or(0),
            left: el.parse_attr("distL")?.unwrap_or(0),
            right: el.parse_attr("distR")?.unwrap_or(0),
        })
    }
}

impl NonVisualProps {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            descr: None,
        }
    }

    pub(crate) fn write_named<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.empty(
            name,
            Attrs::new()
                .with("id", self.id)
                .with("name", &self.name)
                .opt("descr", self.descr.as_deref()),
        )
    }

    pub(crate) fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            id: el.parse_attr("id")?.unwrap_or(0),
            name: el.attr("name")?.unwrap_or_default(),
            descr: el.attr("descr")?,
        })
    }
}

impl GraphicData {
    /// The `a:graphicData/@uri` identifying this payload
    pub fn uri(&self) -> &'static str {
        match self {
            GraphicData::Picture(_) => URI_PICTURE,
            GraphicData::Shape(_) => URI_SHAPE,
            GraphicData::Group(_) => URI_GROUP,
            GraphicData::Canvas(_) => URI_CANVAS,
        }
    }

    /// Decode an `a:graphic` element; unsupported payloads yield `None`
    fn read_graphic<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Option<Self>> {
        let mut data = None;
        while let Some(child) = r.next_element(el)? {
            if child.local_name() == b"graphicData" && data.is_none() {
                data = Self::read_graphic_data(r, &child)?;
            } else {
                r.skip(&child)?;
            }
        }
        Ok(data)
    }

    fn read_graphic_data<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Option<Self>> {
        let uri = el.attr("uri")?.unwrap_or_default();
        let mut data = None;
        while let Some(child) = r.next_element(el)? {
            let decoded = match (uri.as_str(), child.local_name()) {
                (URI_PICTURE, b"pic") => Some(GraphicData::Picture(Picture::read_xml(r, &child)?)),
                (URI_SHAPE, b"wsp") => Some(GraphicData::Shape(Shape::read_xml(r, &child)?)),
                (URI_GROUP, b"wgp") => Some(GraphicData::Group(Group::read_xml(r, &child)?)),
                (URI_CANVAS, b"wpc") => Some(GraphicData::Canvas(Canvas::read_xml(r, &child)?)),
                _ => {
                    r.skip(&child)?;
                    None
                }
            };
            if data.is_none() {
                data = decoded;
            }
        }
        if data.is_none() {
            log::debug!("dropping drawing with unsupported graphic payload {uri:?}");
        }
        Ok(data)
    }
}

impl ToXml for GraphicData {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("a:graphic", Attrs::new())?;
        w.start("a:graphicData", Attrs::new().with("uri", self.uri()))?;
        match self {
            GraphicData::Picture(pic) => pic.write_xml(w)?,
            GraphicData::Shape(shape) => shape.write_xml(w)?,
            GraphicData::Group(group) => group.write_xml(w)?,
            GraphicData::Canvas(canvas) => canvas.write_xml(w)?,
        }
        w.end("a:graphicData")?;
        w.end("a:graphic")
    }
}

/// Children shared by `wp:inline` and `wp:anchor`
#[derive(Default)]
struct FrameParts {
    extent: Extent,
    effect_extent: Option<EffectExtent>,
    doc_pr: NonVisualProps,
    no_change_aspect: Option<bool>,
    graphic: Option<GraphicData>,
}

impl FrameParts {
    /// Consume `child` if it is one of the shared frame elements
    fn read_child<'a>(&mut self, r: &mut XmlReader<'a>, child: &Element<'a>) -> Result<bool> {
        match child.local_name() {
            b"extent" => self.extent = Extent::from_element(child)?,
            b"effectExtent" => self.effect_extent = Some(EffectExtent::from_element(child)?),
            b"docPr" => self.doc_pr = NonVisualProps::from_element(child)?,
            b"cNvGraphicFramePr" => {
                while let Some(lock) = r.next_element(child)? {
                    if lock.local_name() == b"graphicFrameLocks" {
                        self.no_change_aspect = lock.on_off_attr("noChangeAspect")?;
                    }
                    r.skip(&lock)?;
                }
                return Ok(true);
            }
            b"graphic" => {
                self.graphic = GraphicData::read_graphic(r, child)?;
                return Ok(true);
            }
            _ => return Ok(false),
        }
        r.skip(child)?;
        Ok(true)
    }
}

fn write_frame_tail<W: Write>(
    w: &mut XmlWriter<W>,
    doc_pr: &NonVisualProps,
    no_change_aspect: Option<bool>,
    graphic: &GraphicData,
) -> Result<()> {
    doc_pr.write_named(w, "wp:docPr")?;
    match no_change_aspect {
        Some(lock) => {
            w.start("wp:cNvGraphicFramePr", Attrs::new())?;
            w.empty(
                "a:graphicFrameLocks",
                Attrs::new().flag("noChangeAspect", Some(lock)),
            )?;
            w.end("wp:cNvGraphicFramePr")?;
        }
        None => w.empty("wp:cNvGraphicFramePr", Attrs::new())?,
    }
    graphic.write_xml(w)
}

impl Inline {
    /// Inline frame with zero distances and effect extents
    pub fn new(extent: Extent, doc_pr: NonVisualProps, graphic: GraphicData) -> Self {
        Self {
            distances: Distances::default(),
            extent,
            effect_extent: Some(EffectExtent::default()),
            doc_pr,
            no_change_aspect: Some(true),
            graphic,
        }
    }

    fn read_optional<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Option<Self>> {
        let distances = Distances::from_element(el)?;
        let mut parts = FrameParts::default();
        while let Some(child) = r.next_element(el)? {
            if !parts.read_child(r, &child)? {
                r.skip(&child)?;
            }
        }
        Ok(parts.graphic.map(|graphic| Inline {
            distances,
            extent: parts.extent,
            effect_extent: parts.effect_extent,
            doc_pr: parts.doc_pr,
            no_change_aspect: parts.no_change_aspect,
            graphic,
        }))
    }
}

impl ToXml for Inline {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("wp:inline", self.distances.push(Attrs::new()))?;
        w.empty("wp:extent", self.extent.attrs())?;
        if let Some(effect) = &self.effect_extent {
            effect.write(w)?;
        }
        write_frame_tail(w, &self.doc_pr, self.no_change_aspect, &self.graphic)?;
        w.end("wp:inline")
    }
}

impl Position {
    /// Absolute offset from a reference frame
    pub fn offset(relative_from: impl Into<String>, emu: i64) -> Self {
        Self {
            relative_from: relative_from.into(),
            offset: PositionOffset::Offset(emu),
        }
    }

    /// Alignment within a reference frame
    pub fn align(relative_from: impl Into<String>, align: impl Into<String>) -> Self {
        Self {
            relative_from: relative_from.into(),
            offset: PositionOffset::Align(align.into()),
        }
    }

    fn write<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name, Attrs::new().with("relativeFrom", &self.relative_from))?;
        match &self.offset {
            PositionOffset::Offset(emu) => w.text_element("wp:posOffset", &emu.to_string())?,
            PositionOffset::Align(align) => w.text_element("wp:align", align)?,
        }
        w.end(name)
    }

    fn read<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut pos = Position::offset(el.attr("relativeFrom")?.unwrap_or_default(), 0);
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"posOffset" => {
                    let text = r.text(&child)?;
                    let emu = text
                        .trim()
                        .parse()
                        .map_err(|_| DocxError::bad_attribute("posOffset", &text))?;
                    pos.offset = PositionOffset::Offset(emu);
                }
                b"align" => pos.offset = PositionOffset::Align(r.text(&child)?.trim().to_string()),
                _ => r.skip(&child)?,
            }
        }
        Ok(pos)
    }
}

impl Wrap {
    /// Square wrapping on both sides
    pub fn square() -> Self {
        Wrap::Square {
            wrap_text: "bothSides".to_string(),
        }
    }

    fn write<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Wrap::None => w.empty("wp:wrapNone", Attrs::new()),
            Wrap::Square { wrap_text } => {
                w.empty("wp:wrapSquare", Attrs::new().with("wrapText", wrap_text))
            }
            Wrap::TopAndBottom => w.empty("wp:wrapTopAndBottom", Attrs::new()),
        }
    }
}

impl Anchor {
    /// Anchor placed at the top-left of the current column and paragraph,
    /// with square wrapping
    pub fn new(extent: Extent, doc_pr: NonVisualProps, graphic: GraphicData) -> Self {
        Self {
            distances: Distances {
                left: 114_300,
                right: 114_300,
                ..Distances::default()
            },
            simple_pos: false,
            simple_pos_point: Point::default(),
            relative_height: DEFAULT_RELATIVE_HEIGHT,
            behind_doc: false,
            locked: false,
            layout_in_cell: true,
            allow_overlap: true,
            position_h: Position::offset("column", 0),
            position_v: Position::offset("paragraph", 0),
            extent,
            effect_extent: Some(EffectExtent::default()),
            wrap: Wrap::square(),
            doc_pr,
            no_change_aspect: Some(true),
            graphic,
        }
    }

    fn read_optional<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Option<Self>> {
        let distances = Distances::from_element(el)?;
        let simple_pos = el.on_off_attr("simplePos")?.unwrap_or(false);
        let relative_height = el.parse_attr("relativeHeight")?.unwrap_or(0);
        let behind_doc = el.on_off_attr("behindDoc")?.unwrap_or(false);
        let locked = el.on_off_attr("locked")?.unwrap_or(false);
        let layout_in_cell = el.on_off_attr("layoutInCell")?.unwrap_or(true);
        let allow_overlap = el.on_off_attr("allowOverlap")?.unwrap_or(true);

        let mut parts = FrameParts::default();
        let mut simple_pos_point = Point::default();
        let mut position_h = Position::offset("column", 0);
        let mut position_v = Position::offset("paragraph", 0);
        let mut wrap = Wrap::None;
        while let Some(child) = r.next_element(el)? {
            if parts.read_child(r, &child)? {
                continue;
            }
            match child.local_name() {
                b"simplePos" => {
                    simple_pos_point = Point::from_element(&child)?;
                    r.skip(&child)?;
                }
                b"positionH" => position_h = Position::read(r, &child)?,
                b"positionV" => position_v = Position::read(r, &child)?,
                b"wrapNone" => {
                    wrap = Wrap::None;
                    r.skip(&child)?;
                }
                b"wrapSquare" | b"wrapTight" | b"wrapThrough" => {
                    wrap = Wrap::Square {
                        wrap_text: child
                            .attr("wrapText")?
                            .unwrap_or_else(|| "bothSides".to_string()),
                    };
                    r.skip(&child)?;
                }
                b"wrapTopAndBottom" => {
                    wrap = Wrap::TopAndBottom;
                    r.skip(&child)?;
                }
                _ => r.skip(&child)?,
            }
        }

        Ok(parts.graphic.map(|graphic| Anchor {
            distances,
            simple_pos,
            simple_pos_point,
            relative_height,
            behind_doc,
            locked,
            layout_in_cell,
            allow_overlap,
            position_h,
            position_v,
            extent: parts.extent,
            effect_extent: parts.effect_extent,
            wrap,
            doc_pr: parts.doc_pr,
            no_change_aspect: parts.no_change_aspect,
            graphic,
        }))
    }
}

impl ToXml for Anchor {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        let attrs = self
            .distances
            .push(Attrs::new())
            .flag("simplePos", Some(self.simple_pos))
            .with("relativeHeight", self.relative_height)
            .flag("behindDoc", Some(self.behind_doc))
            .flag("locked", Some(self.locked))
            .flag("layoutInCell", Some(self.layout_in_cell))
            .flag("allowOverlap", Some(self.allow_overlap));
        w.start("wp:anchor", attrs)?;
        w.empty("wp:simplePos", self.simple_pos_point.attrs())?;
        self.position_h.write(w, "wp:positionH")?;
        self.position_v.write(w, "wp:positionV")?;
        w.empty("wp:extent", self.extent.attrs())?;
        if let Some(effect) = &self.effect_extent {
            effect.write(w)?;
        }
        self.wrap.write(w)?;
        write_frame_tail(w, &self.doc_pr, self.no_change_aspect, &self.graphic)?;
        w.end("wp:anchor")
    }
}

impl Drawing {
    /// Decode a `w:drawing`; `None` when it holds no supported frame
    pub fn read_optional<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Option<Self>> {
        let mut drawing = None;
        while let Some(child) = r.next_element(el)? {
            let decoded = match child.local_name() {
                b"inline" => Inline::read_optional(r, &child)?.map(Drawing::Inline),
                b"anchor" => Anchor::read_optional(r, &child)?.map(|a| Drawing::Anchor(Box::new(a))),
                _ => {
                    r.skip(&child)?;
                    None
                }
            };
            if drawing.is_none() {
                drawing = decoded;
            }
        }
        Ok(drawing)
    }

    pub fn doc_pr(&self) -> &NonVisualProps {
        match self {
            Drawing::Inline(inline) => &inline.doc_pr,
            Drawing::Anchor(anchor) => &anchor.doc_pr,
        }
    }

    pub fn extent(&self) -> Extent {
        match self {
            Drawing::Inline(inline) => inline.extent,
            Drawing::Anchor(anchor) => anchor.extent,
        }
    }

    pub fn graphic(&self) -> &GraphicData {
        match self {
            Drawing::Inline(inline) => &inline.graphic,
            Drawing::Anchor(anchor) => &anchor.graphic,
        }
    }

    /// The picture payload, if this drawing is a picture
    pub fn picture(&self) -> Option<&Picture> {
        match self.graphic() {
            GraphicData::Picture(pic) => Some(pic),
            _ => None,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Drawing::Inline(_))
    }

    /// Relationship ids of every picture in this drawing, including group and canvas members
    pub fn embedded_ids(&self) -> Vec<&str> {
        fn collect<'d>(children: &'d [GroupChild], out: &mut Vec<&'d str>) {
            for child in children {
                match child {
                    GroupChild::Picture(pic) => out.push(&pic.embed),
                    GroupChild::Group(group) => collect(&group.children, out),
                    GroupChild::Shape(_) => {}
                }
            }
        }

        let mut out = Vec::new();
        match self.graphic() {
            GraphicData::Picture(pic) => out.push(pic.embed.as_str()),
            GraphicData::Group(group) => collect(&group.children, &mut out),
            GraphicData::Canvas(canvas) => collect(&canvas.children, &mut out),
            GraphicData::Shape(_) => {}
        }
        out
    }

    /// Largest object id used by `wp:docPr` or any nested non-visual properties
    pub(crate) fn max_object_id(&self) -> u32 {
        fn walk(children: &[GroupChild]) -> u32 {
            children
                .iter()
                .map(|child| match child {
                    GroupChild::Picture(pic) => pic.non_visual.id,
                    GroupChild::Shape(shape) => shape.non_visual.as_ref().map_or(0, |nv| nv.id),
                    GroupChild::Group(group) => group
                        .non_visual
                        .as_ref()
                        .map_or(0, |nv| nv.id)
                        .max(walk(&group.children)),
                })
                .max()
                .unwrap_or(0)
        }

        let nested = match self.graphic() {
            GraphicData::Group(group) => walk(&group.children),
            GraphicData::Canvas(canvas) => walk(&canvas.children),
            GraphicData::Picture(_) | GraphicData::Shape(_) => 0,
        };
        self.doc_pr().id.max(nested)
    }
}

impl ToXml for Drawing {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:drawing", Attrs::new())?;
        match self {
            Drawing::Inline(inline) => inline.write_xml(w)?,
            Drawing::Anchor(anchor) => anchor.write_xml(w)?,
        }
        w.end("w:drawing")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{to_xml_string, XmlReader};

    fn parse_drawing(xml: &str) -> Option<Drawing> {
        let mut r = XmlReader::new(xml.as_bytes());
        let root = r.root().unwrap();
        Drawing::read_optional(&mut r, &root).unwrap()
    }

    fn sample_picture() -> GraphicData {
        GraphicData::Picture(Picture::new(
            0,
            "image1.png",
            "rId6",
            Extent { cx: 200, cy: 100 },
        ))
    }

    #[test]
    fn test_inline_round_trip() {
        let drawing = Drawing::Inline(Inline::new(
            Extent { cx: 200, cy: 100 },
            NonVisualProps::new(1, "Picture 1"),
            sample_picture(),
        ));
        let xml = to_xml_string(&drawing).unwrap();
        assert!(xml.starts_with(concat!(
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="200" cy="100"/><wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            r#"<wp:docPr id="1" name="Picture 1"/>"#,
            r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic>"#
        )));
        assert_eq!(parse_drawing(&xml), Some(drawing));
    }

    #[test]
    fn test_anchor_round_trip() {
        let mut anchor = Anchor::new(
            Extent { cx: 200, cy: 100 },
            NonVisualProps::new(7, "Rectangle 1"),
            GraphicData::Shape(Shape::new(Extent { cx: 200, cy: 100 }, "rect")),
        );
        anchor.position_h = Position::align("margin", "center");
        anchor.wrap = Wrap::TopAndBottom;
        let drawing = Drawing::Anchor(Box::new(anchor));
        let xml = to_xml_string(&drawing).unwrap();
        assert!(xml.contains(
            r#"<wp:positionH relativeFrom="margin"><wp:align>center</wp:align></wp:positionH>"#
        ));
        assert!(xml.contains(r#"<wp:wrapTopAndBottom/>"#));
        assert!(xml.contains(r#"relativeHeight="251658240""#));
        assert_eq!(parse_drawing(&xml), Some(drawing));
    }

    #[test]
    fn test_wrap_tight_reads_as_square() {
        let xml = concat!(
            r#"<w:drawing><wp:anchor simplePos="0" relativeHeight="5" behindDoc="1" locked="0" layoutInCell="1" allowOverlap="1">"#,
            r#"<wp:simplePos x="0" y="0"/><wp:positionH relativeFrom="page"><wp:posOffset>914400</wp:posOffset></wp:positionH>"#,
            r#"<wp:positionV relativeFrom="page"><wp:posOffset>-12700</wp:posOffset></wp:positionV>"#,
            r#"<wp:extent cx="10" cy="10"/><wp:wrapTight wrapText="left"><wp:wrapPolygon><wp:start x="0" y="0"/></wp:wrapPolygon></wp:wrapTight>"#,
            r#"<wp:docPr id="2" name="Shape 2"/><a:graphic><a:graphicData uri="http://schemas.microsoft.com/office/word/2010/wordprocessingShape">"#,
            r#"<wps:wsp><wps:cNvSpPr/><wps:spPr/></wps:wsp></a:graphicData></a:graphic></wp:anchor></w:drawing>"#
        );
        let Some(Drawing::Anchor(anchor)) = parse_drawing(xml) else {
            panic!("expected an anchor");
        };
        assert_eq!(
            anchor.wrap,
            Wrap::Square {
                wrap_text: "left".to_string()
            }
        );
        assert!(anchor.behind_doc);
        assert_eq!(anchor.position_h, Position::offset("page", 914_400));
        assert_eq!(anchor.position_v, Position::offset("page", -12_700));
    }

    #[test]
    fn test_unsupported_payload_is_dropped() {
        let xml = concat!(
            r#"<w:drawing><wp:inline><wp:extent cx="1" cy="1"/><wp:docPr id="4" name="Chart 4"/>"#,
            r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
            r#"<c:chart xmlns:c="urn:c" r:id="rId12"/></a:graphicData></a:graphic></wp:inline></w:drawing>"#
        );
        assert_eq!(parse_drawing(xml), None);
    }

    #[test]
    fn test_canvas_ids() {
        let pic = Picture::new(9, "Picture 9", "rId3", Extent::default());
        let canvas = Canvas {
            children: vec![GroupChild::Picture(pic)],
            ..Canvas::default()
        };
        let drawing = Drawing::Inline(Inline::new(
            Extent::default(),
            NonVisualProps::new(2, "Canvas 1"),
            GraphicData::Canvas(canvas),
        ));
        assert_eq!(drawing.embedded_ids(), vec!["rId3"]);
        assert_eq!(drawing.max_object_id(), 9);
    }
}
