//! Section properties (`w:sectPr`)

use std::io::Write;

use crate::error::Result;
use crate::units::PageSize;
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

/// Page setup of a section
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectPr {
    /// Header and footer parts used by this section
    pub references: Vec<HeaderFooterReference>,
    pub page_size: Option<PageDimensions>,
    pub margins: Option<PageMargins>,
    pub columns: Option<Columns>,
    pub doc_grid: Option<DocGrid>,
}

/// `w:headerReference` / `w:footerReference`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFooterReference {
    pub footer: bool,
    /// `default`, `first` or `even`
    pub kind: String,
    pub rel_id: String,
}

/// Page width and height in twips (`w:pgSz`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageDimensions {
    pub width: u32,
    pub height: u32,
    /// `portrait` or `landscape`
    pub orient: Option<String>,
}

/// Page margins in twips (`w:pgMar`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMargins {
    pub top: i32,
    pub right: u32,
    pub bottom: i32,
    pub left: u32,
    pub header: u32,
    pub footer: u32,
    pub gutter: u32,
}

/// Text columns (`w:cols`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Columns {
    pub num: Option<u32>,
    /// Space between columns in twips
    pub space: Option<u32>,
}

/// Document grid (`w:docGrid`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocGrid {
    pub kind: Option<String>,
    pub line_pitch: Option<u32>,
}

impl Default for PageMargins {
    /// One inch top and bottom, 1.25 inches left and right
    fn default() -> Self {
        Self {
            top: 1440,
            right: 1800,
            bottom: 1440,
            left: 1800,
            header: 851,
            footer: 992,
            gutter: 0,
        }
    }
}

impl SectPr {
    /// Section with the given paper size and default margins
    pub fn new(size: PageSize) -> Self {
        let (width, height) = size.twips();
        Self {
            references: Vec::new(),
            page_size: Some(PageDimensions {
                width: width as u32,
                height: height as u32,
                orient: None,
            }),
            margins: Some(PageMargins::default()),
            columns: Some(Columns {
                num: None,
                space: Some(425),
            }),
            doc_grid: Some(DocGrid {
                kind: Some("lines".to_string()),
                line_pitch: Some(312),
            }),
        }
    }

    /// Swap width and height and mark the page as landscape
    pub fn landscape(&mut self) -> &mut Self {
        if let Some(size) = &mut self.page_size {
            if size.orient.as_deref() != Some("landscape") {
                std::mem::swap(&mut size.width, &mut size.height);
                size.orient = Some("landscape".to_string());
            }
        }
        self
    }
}

impl ToXml for SectPr {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:sectPr", Attrs::new())?;
        for reference in &self.references {
            let name = if reference.footer {
                "w:footerReference"
            } else {
                "w:headerReference"
            };
            w.empty(
                name,
                Attrs::new()
                    .with("w:type", &reference.kind)
                    .with("r:id", &reference.rel_id),
            )?;
        }
        if let Some(size) = &self.page_size {
            w.empty(
                "w:pgSz",
                Attrs::new()
                    .with("w:w", size.width)
                    .with("w:h", size.height)
                    .opt("w:orient", size.orient.as_deref()),
            )?;
        }
        if let Some(m) = &self.margins {
            w.empty(
                "w:pgMar",
                Attrs::new()
                    .with("w:top", m.top)
                    .with("w:right", m.right)
                    .with("w:bottom", m.bottom)
                    .with("w:left", m.left)
                    .with("w:header", m.header)
                    .with("w:footer", m.footer)
                    .with("w:gutter", m.gutter),
            )?;
        }
        if let Some(cols) = &self.columns {
            w.empty(
                "w:cols",
                Attrs::new()
                    .opt("w:num", cols.num)
                    .opt("w:space", cols.space),
            )?;
        }
        if let Some(grid) = &self.doc_grid {
            w.empty(
                "w:docGrid",
                Attrs::new()
                    .opt("w:type", grid.kind.as_deref())
                    .opt("w:linePitch", grid.line_pitch),
            )?;
        }
        w.end("w:sectPr")
    }
}

impl FromXml for SectPr {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut sect = SectPr::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                name @ (b"headerReference" | b"footerReference") => {
                    sect.references.push(HeaderFooterReference {
                        footer: name == b"footerReference",
                        kind: child.attr("type")?.unwrap_or_else(|| "default".to_string()),
                        rel_id: child.attr("id")?.unwrap_or_default(),
                    })
                }
                b"pgSz" => {
                    sect.page_size = Some(PageDimensions {
                        width: child.parse_attr("w")?.unwrap_or(0),
                        height: child.parse_attr("h")?.unwrap_or(0),
                        orient: child.attr("orient")?,
                    })
                }
                b"pgMar" => {
                    let defaults = PageMargins::default();
                    sect.margins = Some(PageMargins {
                        top: child.parse_attr("top")?.unwrap_or(defaults.top),
                        right: child.parse_attr("right")?.unwrap_or(defaults.right),
                        bottom: child.parse_attr("bottom")?.unwrap_or(defaults.bottom),
                        left: child.parse_attr("left")?.unwrap_or(defaults.left),
                        header: child.parse_attr("header")?.unwrap_or(defaults.header),
                        footer: child.parse_attr("footer")?.unwrap_or(defaults.footer),
                        gutter: child.parse_attr("gutter")?.unwrap_or(defaults.gutter),
                    })
                }
                b"cols" => {
                    sect.columns = Some(Columns {
                        num: child.parse_attr("num")?,
                        space: child.parse_attr("space")?,
                    })
                }
                b"docGrid" => {
                    sect.doc_grid = Some(DocGrid {
                        kind: child.attr("type")?,
                        line_pitch: child.parse_attr("linePitch")?,
                    })
                }
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(sect)
    }
}
