//! Shape groups (`wpg:wgp`) and drawing canvases (`wpc:wpc`)

use std::io::Write;

use crate::error::Result;
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

use super::picture::Picture;
use super::shape::{Shape, ShapeProperties};
use super::NonVisualProps;

/// A member of a group or canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupChild {
    Shape(Shape),
    Picture(Picture),
    Group(Group),
}

/// A group of shapes sharing one coordinate space
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub non_visual: Option<NonVisualProps>,
    /// `wpg:grpSpPr`; the transform carries the child coordinate space
    pub properties: ShapeProperties,
    pub children: Vec<GroupChild>,
}

/// A drawing canvas holding free-floating shapes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Canvas {
    /// Canvas background fill (`wpc:bg`)
    pub background: Option<ShapeProperties>,
    /// Canvas outline (`wpc:whole`)
    pub whole: Option<ShapeProperties>,
    pub children: Vec<GroupChild>,
}

impl Group {
    /// Encode as `wpg:wgp` (graphic payload) or `wpg:grpSp` (nested)
    pub(crate) fn write_named<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name, Attrs::new())?;
        if let Some(nv) = &self.non_visual {
            nv.write_named(w, "wpg:cNvPr")?;
        }
        w.empty("wpg:cNvGrpSpPr", Attrs::new())?;
        self.properties.write_named(w, "wpg:grpSpPr")?;
        for child in &self.children {
            child.write_in(w, "wpg:grpSp")?;
        }
        w.end(name)
    }
}

impl ToXml for Group {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        self.write_named(w, "wpg:wgp")
    }
}

impl FromXml for Group {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut group = Group::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"cNvPr" => {
                    group.non_visual = Some(NonVisualProps::from_element(&child)?);
                    r.skip(&child)?;
                }
                b"grpSpPr" => group.properties = ShapeProperties::read_xml(r, &child)?,
                _ => {
                    if let Some(member) = GroupChild::read_optional(r, &child)? {
                        group.children.push(member);
                    }
                }
            }
        }
        Ok(group)
    }
}

impl GroupChild {
    fn write_in<W: Write>(&self, w: &mut XmlWriter<W>, group_name: &str) -> Result<()> {
        match self {
            GroupChild::Shape(shape) => shape.write_xml(w),
            GroupChild::Picture(pic) => pic.write_xml(w),
            GroupChild::Group(group) => group.write_named(w, group_name),
        }
    }

    /// Decode a member element; anything else is skipped
    fn read_optional<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Option<Self>> {
        Ok(Some(match el.local_name() {
            b"wsp" => GroupChild::Shape(Shape::read_xml(r, el)?),
            b"pic" => GroupChild::Picture(Picture::read_xml(r, el)?),
            b"wgp" | b"grpSp" => GroupChild::Group(Group::read_xml(r, el)?),
            _ => {
                r.skip(el)?;
                return Ok(None);
            }
        }))
    }
}

impl ToXml for Canvas {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("wpc:wpc", Attrs::new())?;
        if let Some(bg) = &self.background {
            bg.write_named(w, "wpc:bg")?;
        }
        if let Some(whole) = &self.whole {
            whole.write_named(w, "wpc:whole")?;
        }
        for child in &self.children {
            child.write_in(w, "wpg:wgp")?;
        }
        w.end("wpc:wpc")
    }
}

impl FromXml for Canvas {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut canvas = Canvas::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"bg" => canvas.background = Some(ShapeProperties::read_xml(r, &child)?),
                b"whole" => canvas.whole = Some(ShapeProperties::read_xml(r, &child)?),
                _ => {
                    if let Some(member) = GroupChild::read_optional(r, &child)? {
                        canvas.children.push(member);
                    }
                }
            }
        }
        Ok(canvas)
    }
}
