//! DrawingML shape properties and Word shapes (`wps:wsp`)

use std::io::Write;

use crate::error::Result;
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

use super::{Extent, NonVisualProps, Point};

/// Position, size, rotation and flips (`a:xfrm`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transform {
    /// Rotation in 60000ths of a degree
    pub rot: Option<i64>,
    pub flip_h: Option<bool>,
    pub flip_v: Option<bool>,
    pub offset: Point,
    pub extent: Extent,
    /// Child coordinate space of a group (`a:chOff`)
    pub child_offset: Option<Point>,
    /// Child coordinate space of a group (`a:chExt`)
    pub child_extent: Option<Extent>,
}

/// A colour reference inside a fill
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorChoice {
    /// `a:srgbClr`, six hex digits
    Rgb(String),
    /// `a:schemeClr`, a theme slot such as `accent1`
    Scheme(String),
}

/// Fill of an outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineFill {
    NoFill,
    Solid(ColorChoice),
}

/// Outline (`a:ln`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Width in EMUs
    pub width: Option<i64>,
    pub fill: Option<LineFill>,
    /// Arrow head type (`triangle`, `arrow`, ...)
    pub head_end: Option<String>,
    pub tail_end: Option<String>,
}

/// Fill and outline items of a shape's properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeElem {
    NoFill,
    SolidFill(ColorChoice),
    Line(Line),
}

/// Visual shape properties (`pic:spPr`, `wps:spPr`, `wpg:grpSpPr`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShapeProperties {
    /// Black-and-white rendering mode (`auto`, `gray`, ...)
    pub bw_mode: Option<String>,
    pub transform: Option<Transform>,
    /// Preset geometry name (`rect`, `straightConnector1`, ...)
    pub geometry: Option<String>,
    pub elems: Vec<ShapeElem>,
}

/// Text body properties of a shape (`wps:bodyPr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyProperties {
    pub vert: Option<String>,
    /// Vertical anchoring of text (`t`, `ctr`, `b`)
    pub anchor: Option<String>,
}

/// A Word shape (`wps:wsp`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shape {
    /// `wps:cNvPr`, present when the shape lives inside a group or canvas
    pub non_visual: Option<NonVisualProps>,
    /// Connector shapes carry `wps:cNvCnPr` instead of `wps:cNvSpPr`
    pub connector: bool,
    pub properties: ShapeProperties,
    pub body: Option<BodyProperties>,
}

impl ShapeProperties {
    /// Properties with a transform at the origin and a preset geometry
    pub fn with_geometry(extent: Extent, geometry: impl Into<String>) -> Self {
        Self {
            transform: Some(Transform {
                extent,
                ..Transform::default()
            }),
            geometry: Some(geometry.into()),
            ..Self::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.bw_mode.is_none()
            && self.transform.is_none()
            && self.geometry.is_none()
            && self.elems.is_empty()
    }

    /// Encode under the given element name
    pub(crate) fn write_named<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        let attrs = Attrs::new().opt("bwMode", self.bw_mode.as_deref());
        if self.is_empty() {
            return w.empty(name, attrs);
        }
        w.start(name, attrs)?;
        self.transform.write_xml(w)?;
        if let Some(geometry) = &self.geometry {
            w.start("a:prstGeom", Attrs::new().with("prst", geometry))?;
            w.empty("a:avLst", Attrs::new())?;
            w.end("a:prstGeom")?;
        }
        self.elems.write_xml(w)?;
        w.end(name)
    }
}

impl FromXml for ShapeProperties {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut props = ShapeProperties {
            bw_mode: el.attr("bwMode")?,
            ..Self::default()
        };
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"xfrm" => props.transform = Some(Transform::read_xml(r, &child)?),
                b"prstGeom" => {
                    props.geometry = child.attr("prst")?;
                    r.skip(&child)?;
                }
                b"noFill" => {
                    props.elems.push(ShapeElem::NoFill);
                    r.skip(&child)?;
                }
                b"solidFill" => {
                    if let Some(color) = read_color(r, &child)? {
                        props.elems.push(ShapeElem::SolidFill(color));
                    }
                }
                b"ln" => props.elems.push(ShapeElem::Line(Line::read_xml(r, &child)?)),
                _ => r.skip(&child)?,
            }
        }
        Ok(props)
    }
}

impl ToXml for Transform {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start(
            "a:xfrm",
            Attrs::new()
                .opt("rot", self.rot)
                .flag("flipH", self.flip_h)
                .flag("flipV", self.flip_v),
        )?;
        w.empty("a:off", self.offset.attrs())?;
        w.empty("a:ext", self.extent.attrs())?;
        if let Some(offset) = &self.child_offset {
            w.empty("a:chOff", offset.attrs())?;
        }
        if let Some(extent) = &self.child_extent {
            w.empty("a:chExt", extent.attrs())?;
        }
        w.end("a:xfrm")
    }
}

impl FromXml for Transform {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut xfrm = Transform {
            rot: el.parse_attr("rot")?,
            flip_h: el.on_off_attr("flipH")?,
            flip_v: el.on_off_attr("flipV")?,
            ..Self::default()
        };
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"off" => xfrm.offset = Point::from_element(&child)?,
                b"ext" => xfrm.extent = Extent::from_element(&child)?,
                b"chOff" => xfrm.child_offset = Some(Point::from_element(&child)?),
                b"chExt" => xfrm.child_extent = Some(Extent::from_element(&child)?),
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(xfrm)
    }
}

impl ToXml for ColorChoice {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        match self {
            ColorChoice::Rgb(hex) => w.empty("a:srgbClr", Attrs::new().with("val", hex)),
            ColorChoice::Scheme(slot) => w.empty("a:schemeClr", Attrs::new().with("val", slot)),
        }
    }
}

/// First colour inside a fill element; colour modifiers are dropped
fn read_color<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Option<ColorChoice>> {
    let mut color = None;
    while let Some(child) = r.next_element(el)? {
        let value = child.val()?;
        match (child.local_name(), value) {
            (b"srgbClr", Some(v)) if color.is_none() => color = Some(ColorChoice::Rgb(v)),
            (b"schemeClr", Some(v)) if color.is_none() => color = Some(ColorChoice::Scheme(v)),
            _ => {}
        }
        r.skip(&child)?;
    }
    Ok(color)
}

impl ToXml for ShapeElem {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        match self {
            ShapeElem::NoFill => w.empty("a:noFill", Attrs::new()),
            ShapeElem::SolidFill(color) => {
                w.start("a:solidFill", Attrs::new())?;
                color.write_xml(w)?;
                w.end("a:solidFill")
            }
            ShapeElem::Line(line) => line.write_xml(w),
        }
    }
}

impl ToXml for Line {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        let attrs = Attrs::new().opt("w", self.width);
        if self.fill.is_none() && self.head_end.is_none() && self.tail_end.is_none() {
            return w.empty("a:ln", attrs);
        }
        w.start("a:ln", attrs)?;
        match &self.fill {
            Some(LineFill::NoFill) => w.empty("a:noFill", Attrs::new())?,
            Some(LineFill::Solid(color)) => {
                w.start("a:solidFill", Attrs::new())?;
                color.write_xml(w)?;
                w.end("a:solidFill")?;
            }
            None => {}
        }
        if let Some(head) = &self.head_end {
            w.empty("a:headEnd", Attrs::new().with("type", head))?;
        }
        if let Some(tail) = &self.tail_end {
            w.empty("a:tailEnd", Attrs::new().with("type", tail))?;
        }
        w.end("a:ln")
    }
}

impl FromXml for Line {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut line = Line {
            width: el.parse_attr("w")?,
            ..Self::default()
        };
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"noFill" => {
                    line.fill = Some(LineFill::NoFill);
                    r.skip(&child)?;
                }
                b"solidFill" => line.fill = read_color(r, &child)?.map(LineFill::Solid),
                b"headEnd" => {
                    line.head_end = child.attr("type")?;
                    r.skip(&child)?;
                }
                b"tailEnd" => {
                    line.tail_end = child.attr("type")?;
                    r.skip(&child)?;
                }
                _ => r.skip(&child)?,
            }
        }
        Ok(line)
    }
}

impl Shape {
    /// Shape with the given size and preset geometry
    pub fn new(extent: Extent, geometry: impl Into<String>) -> Self {
        Self {
            properties: ShapeProperties::with_geometry(extent, geometry),
            body: Some(BodyProperties::default()),
            ..Self::default()
        }
    }
}

impl ToXml for Shape {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("wps:wsp", Attrs::new())?;
        if let Some(nv) = &self.non_visual {
            nv.write_named(w, "wps:cNvPr")?;
        }
        if self.connector {
            w.empty("wps:cNvCnPr", Attrs::new())?;
        } else {
            w.empty("wps:cNvSpPr", Attrs::new())?;
        }
        self.properties.write_named(w, "wps:spPr")?;
        if let Some(body) = &self.body {
            w.empty(
                "wps:bodyPr",
                Attrs::new()
                    .opt("vert", body.vert.as_deref())
                    .opt("anchor", body.anchor.as_deref()),
            )?;
        }
        w.end("wps:wsp")
    }
}

impl FromXml for Shape {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut shape = Shape::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"cNvPr" => {
                    shape.non_visual = Some(NonVisualProps::from_element(&child)?);
                    r.skip(&child)?;
                }
                b"cNvCnPr" => {
                    shape.connector = true;
                    r.skip(&child)?;
                }
                b"spPr" => shape.properties = ShapeProperties::read_xml(r, &child)?,
                b"bodyPr" => {
                    shape.body = Some(BodyProperties {
                        vert: child.attr("vert")?,
                        anchor: child.attr("anchor")?,
                    });
                    r.skip(&child)?;
                }
                _ => r.skip(&child)?,
            }
        }
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_xml_str, to_xml_string};

    #[test]
    fn test_shape_encoding() {
        let mut shape = Shape::new(Extent { cx: 100, cy: 50 }, "rect");
        shape.properties.bw_mode = Some("auto".to_string());
        shape
            .properties
            .elems
            .push(ShapeElem::SolidFill(ColorChoice::Rgb("4472C4".to_string())));
        let xml = to_xml_string(&shape).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<wps:wsp><wps:cNvSpPr/><wps:spPr bwMode="auto">"#,
                r#"<a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="50"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#,
                r#"<a:solidFill><a:srgbClr val="4472C4"/></a:solidFill>"#,
                r#"</wps:spPr><wps:bodyPr/></wps:wsp>"#
            )
        );
        assert_eq!(from_xml_str::<Shape>(&xml).unwrap(), shape);
    }

    #[test]
    fn test_connector_with_arrow() {
        let xml = concat!(
            r#"<wps:wsp><wps:cNvCnPr/><wps:spPr>"#,
            r#"<a:prstGeom prst="straightConnector1"><a:avLst/></a:prstGeom>"#,
            r#"<a:ln w="12700"><a:solidFill><a:schemeClr val="tx1"><a:lumMod val="50000"/></a:schemeClr></a:solidFill>"#,
            r#"<a:prstDash val="dash"/><a:tailEnd type="triangle"/></a:ln>"#,
            r#"</wps:spPr><wps:style/></wps:wsp>"#
        );
        let shape: Shape = from_xml_str(xml).unwrap();
        assert!(shape.connector);
        assert_eq!(shape.properties.geometry.as_deref(), Some("straightConnector1"));
        assert_eq!(
            shape.properties.elems,
            vec![ShapeElem::Line(Line {
                width: Some(12700),
                fill: Some(LineFill::Solid(ColorChoice::Scheme("tx1".to_string()))),
                head_end: None,
                tail_end: Some("triangle".to_string()),
            })]
        );
        assert!(shape.body.is_none());
    }

    #[test]
    fn test_flipped_transform() {
        let xml = r#"<a:xfrm rot="5400000" flipH="1"><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></a:xfrm>"#;
        let xfrm: Transform = from_xml_str(xml).unwrap();
        assert_eq!(xfrm.rot, Some(5_400_000));
        assert_eq!(xfrm.flip_h, Some(true));
        assert_eq!(xfrm.flip_v, None);
        assert_eq!(xfrm.offset, Point { x: 10, y: 20 });
        assert_eq!(to_xml_string(&xfrm).unwrap(), xml);
    }
}
