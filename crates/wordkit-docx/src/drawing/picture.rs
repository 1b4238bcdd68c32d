//! Pictures (`pic:pic`)

use std::io::Write;

use crate::error::Result;
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

use super::shape::ShapeProperties;
use super::{Extent, NonVisualProps};

/// An embedded raster image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Picture {
    pub non_visual: NonVisualProps,
    /// `a:picLocks/@noChangeAspect`
    pub no_change_aspect: Option<bool>,
    /// Relationship id of the image part (`a:blip/@r:embed`)
    pub embed: String,
    /// Whether the blip is stretched over the frame (`a:stretch`)
    pub stretch: bool,
    pub properties: ShapeProperties,
}

impl Picture {
    /// Picture bound to an image relationship, stretched over a `rect` frame
    pub fn new(id: u32, name: impl Into<String>, embed: impl Into<String>, extent: Extent) -> Self {
        Self {
            non_visual: NonVisualProps::new(id, name),
            no_change_aspect: Some(true),
            embed: embed.into(),
            stretch: true,
            properties: ShapeProperties::with_geometry(extent, "rect"),
        }
    }
}

impl ToXml for Picture {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("pic:pic", Attrs::new())?;

        w.start("pic:nvPicPr", Attrs::new())?;
        self.non_visual.write_named(w, "pic:cNvPr")?;
        match self.no_change_aspect {
            Some(lock) => {
                w.start("pic:cNvPicPr", Attrs::new())?;
                w.empty(
                    "a:picLocks",
                    Attrs::new().flag("noChangeAspect", Some(lock)),
                )?;
                w.end("pic:cNvPicPr")?;
            }
            None => w.empty("pic:cNvPicPr", Attrs::new())?,
        }
        w.end("pic:nvPicPr")?;

        w.start("pic:blipFill", Attrs::new())?;
        w.empty("a:blip", Attrs::new().with("r:embed", &self.embed))?;
        if self.stretch {
            w.start("a:stretch", Attrs::new())?;
            w.empty("a:fillRect", Attrs::new())?;
            w.end("a:stretch")?;
        }
        w.end("pic:blipFill")?;

        self.properties.write_named(w, "pic:spPr")?;
        w.end("pic:pic")
    }
}

impl FromXml for Picture {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut pic = Picture::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"nvPicPr" => pic.read_non_visual(r, &child)?,
                b"blipFill" => pic.read_blip_fill(r, &child)?,
                b"spPr" => pic.properties = ShapeProperties::read_xml(r, &child)?,
                _ => r.skip(&child)?,
            }
        }
        Ok(pic)
    }
}

impl Picture {
    fn read_non_visual<'a>(&mut self, r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<()> {
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"cNvPr" => {
                    self.non_visual = NonVisualProps::from_element(&child)?;
                    r.skip(&child)?;
                }
                b"cNvPicPr" => {
                    while let Some(lock) = r.next_element(&child)? {
                        if lock.local_name() == b"picLocks" {
                            self.no_change_aspect = lock.on_off_attr("noChangeAspect")?;
                        }
                        r.skip(&lock)?;
                    }
                }
                _ => r.skip(&child)?,
            }
        }
        Ok(())
    }

    fn read_blip_fill<'a>(&mut self, r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<()> {
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"blip" => self.embed = child.attr("embed")?.unwrap_or_default(),
                b"stretch" => self.stretch = true,
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_xml_str, to_xml_string};

    #[test]
    fn test_picture_encoding() {
        let pic = Picture::new(0, "image1.png", "rId6", Extent { cx: 914_400, cy: 457_200 });
        let xml = to_xml_string(&pic).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="image1.png"/>"#,
                r#"<pic:cNvPicPr><a:picLocks noChangeAspect="1"/></pic:cNvPicPr></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="rId6"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="914400" cy="457200"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#
            )
        );
        assert_eq!(from_xml_str::<Picture>(&xml).unwrap(), pic);
    }

    #[test]
    fn test_blip_extensions_are_ignored() {
        let xml = concat!(
            r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="3" name="Logo" descr="company logo"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="rId9" cstate="print"><a:extLst><a:ext uri="{28A0092B}"/></a:extLst></a:blip>"#,
            r#"<a:srcRect/></pic:blipFill><pic:spPr bwMode="auto"/></pic:pic>"#
        );
        let pic: Picture = from_xml_str(xml).unwrap();
        assert_eq!(pic.embed, "rId9");
        assert_eq!(pic.non_visual.descr.as_deref(), Some("company logo"));
        assert!(!pic.stretch);
        assert_eq!(pic.no_change_aspect, None);
        assert_eq!(pic.properties.bw_mode.as_deref(), Some("auto"));
    }
}
