//! Runs: inline content sharing one set of character properties
//!
//! ```xml
//! <w:r>
//!   <w:rPr><w:rStyle w:val="Hyperlink"/><w:b/><w:color w:val="FF0000"/></w:rPr>
//!   <w:t xml:space="preserve">Hello </w:t>
//!   <w:tab/>
//!   <w:drawing>...</w:drawing>
//! </w:r>
//! ```

use std::io::Write;

use crate::drawing::Drawing;
use crate::error::{DocxError, Result};
use crate::units::{Color, Shading};
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

/// A text run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    /// Character formatting
    pub properties: Option<RunProperties>,
    /// Field instruction (`w:instrText`)
    pub instr_text: Option<String>,
    /// Content in document order
    pub children: Vec<RunChild>,
}

/// Content of a run
#[derive(Debug, Clone, PartialEq)]
pub enum RunChild {
    /// Literal text (`w:t`)
    Text(String),
    /// Tab character (`w:tab`)
    Tab,
    /// Line, page or column break (`w:br`)
    Break(Break),
    /// Picture, shape, group or canvas (`w:drawing`)
    Drawing(Drawing),
    /// Complex field delimiter (`w:fldChar`)
    FieldChar(FieldCharType),
}

/// A `w:br` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Break {
    /// Break kind; `None` is a plain line break
    pub kind: Option<BreakType>,
}

/// Kinds of `w:br`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakType {
    Page,
    Column,
    TextWrapping,
}

impl BreakType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Column => "column",
            Self::TextWrapping => "textWrapping",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value {
            "page" => Ok(Self::Page),
            "column" => Ok(Self::Column),
            "textWrapping" => Ok(Self::TextWrapping),
            _ => Err(DocxError::bad_attribute("type", value)),
        }
    }
}

/// `w:fldChar/@w:fldCharType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCharType {
    Begin,
    Separate,
    End,
}

impl FieldCharType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Separate => "separate",
            Self::End => "end",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value {
            "begin" => Ok(Self::Begin),
            "separate" => Ok(Self::Separate),
            "end" => Ok(Self::End),
            _ => Err(DocxError::bad_attribute("fldCharType", value)),
        }
    }
}

/// Character properties (`w:rPr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunProperties {
    /// Character style id (`w:rStyle`)
    pub style: Option<String>,
    /// Font selection (`w:rFonts`)
    pub fonts: Option<RunFonts>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub strike: Option<bool>,
    pub color: Option<Color>,
    /// Font size in half-points (`w:sz`)
    pub size: Option<u32>,
    /// Complex-script font size in half-points (`w:szCs`)
    pub size_cs: Option<u32>,
    /// Highlight colour name (`yellow`, `green`, ...)
    pub highlight: Option<String>,
    /// Underline style (`single`, `double`, `wave`, ...)
    pub underline: Option<String>,
    pub shading: Option<Shading>,
    /// `superscript`, `subscript` or `baseline`
    pub vert_align: Option<String>,
}

/// `w:rFonts`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunFonts {
    pub ascii: Option<String>,
    pub east_asia: Option<String>,
    pub h_ansi: Option<String>,
    pub cs: Option<String>,
    /// Which font slot wins for ambiguous characters (`eastAsia`, `cs`, `default`)
    pub hint: Option<String>,
}

impl Run {
    /// Empty run
    pub fn new() -> Self {
        Self::default()
    }

    /// Run holding a single text node
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            children: vec![RunChild::Text(text.into())],
            ..Self::default()
        }
    }

    /// Character properties, created on first use
    pub fn properties_mut(&mut self) -> &mut RunProperties {
        self.properties.get_or_insert_with(RunProperties::default)
    }

    /// Set the text colour from a hex string such as `FF0000`
    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.properties_mut().color = Some(color.into());
        self
    }

    /// Set the font size in half-points
    pub fn size(&mut self, half_points: u32) -> &mut Self {
        self.properties_mut().size = Some(half_points);
        self
    }

    /// Reference a character style
    pub fn style(&mut self, style_id: impl Into<String>) -> &mut Self {
        self.properties_mut().style = Some(style_id.into());
        self
    }

    pub fn bold(&mut self) -> &mut Self {
        self.properties_mut().bold = Some(true);
        self
    }

    pub fn italic(&mut self) -> &mut Self {
        self.properties_mut().italic = Some(true);
        self
    }

    pub fn strike(&mut self) -> &mut Self {
        self.properties_mut().strike = Some(true);
        self
    }

    /// Underline with the given style (`single`, `double`, ...)
    pub fn underline(&mut self, style: impl Into<String>) -> &mut Self {
        self.properties_mut().underline = Some(style.into());
        self
    }

    pub fn highlight(&mut self, color: impl Into<String>) -> &mut Self {
        self.properties_mut().highlight = Some(color.into());
        self
    }

    pub fn shade(&mut self, shading: Shading) -> &mut Self {
        self.properties_mut().shading = Some(shading);
        self
    }

    /// Set the fonts used for each script
    pub fn fonts(&mut self, fonts: RunFonts) -> &mut Self {
        self.properties_mut().fonts = Some(fonts);
        self
    }

    /// Append a text node
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(RunChild::Text(text.into()));
        self
    }

    /// Append a tab after the existing content
    pub fn add_tab(&mut self) -> &mut Self {
        self.children.push(RunChild::Tab);
        self
    }

    /// Insert a tab before the existing content
    pub fn add_front_tab(&mut self) -> &mut Self {
        self.children.insert(0, RunChild::Tab);
        self
    }

    /// Append a line break
    pub fn add_break(&mut self) -> &mut Self {
        self.children.push(RunChild::Break(Break::default()));
        self
    }

    /// Append a page break
    pub fn add_page_break(&mut self) -> &mut Self {
        self.children.push(RunChild::Break(Break {
            kind: Some(BreakType::Page),
        }));
        self
    }

    /// Plain text; tabs and breaks become `\t` and `\n`
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                RunChild::Text(t) => out.push_str(t),
                RunChild::Tab => out.push('\t'),
                RunChild::Break(_) => out.push('\n'),
                RunChild::Drawing(_) | RunChild::FieldChar(_) => {}
            }
        }
        out
    }

    /// Drawings carried by this run
    pub fn drawings(&self) -> impl Iterator<Item = &Drawing> {
        self.children.iter().filter_map(|child| match child {
            RunChild::Drawing(d) => Some(d),
            _ => None,
        })
    }

    /// Decode the drawing inside `mc:AlternateContent`, taking the `mc:Choice` branch
    fn read_alternate_content<'a>(&mut self, r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<()> {
        while let Some(branch) = r.next_element(el)? {
            if branch.local_name() != b"Choice" {
                r.skip(&branch)?;
                continue;
            }
            while let Some(child) = r.next_element(&branch)? {
                match child.local_name() {
                    b"drawing" => {
                        if let Some(drawing) = Drawing::read_optional(r, &child)? {
                            self.children.push(RunChild::Drawing(drawing));
                        }
                    }
                    _ => r.skip(&child)?,
                }
            }
        }
        Ok(())
    }
}

impl ToXml for Run {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:r", Attrs::new())?;
        self.properties.write_xml(w)?;
        if let Some(instr) = &self.instr_text {
            w.text_element("w:instrText", instr)?;
        }
        self.children.write_xml(w)?;
        w.end("w:r")
    }
}

impl FromXml for Run {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut run = Run::new();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"rPr" => run.properties = Some(RunProperties::read_xml(r, &child)?),
                b"instrText" => {
                    let text = r.text(&child)?;
                    match &mut run.instr_text {
                        Some(existing) => existing.push_str(&text),
                        None => run.instr_text = Some(text),
                    }
                }
                b"t" => run.children.push(RunChild::Text(r.text(&child)?)),
                b"tab" => {
                    r.skip(&child)?;
                    run.children.push(RunChild::Tab);
                }
                b"br" => {
                    let kind = child.attr("type")?.map(|t| BreakType::parse(&t)).transpose()?;
                    r.skip(&child)?;
                    run.children.push(RunChild::Break(Break { kind }));
                }
                b"fldChar" => {
                    let kind = child
                        .attr("fldCharType")?
                        .ok_or_else(|| DocxError::bad_attribute("fldCharType", ""))?;
                    r.skip(&child)?;
                    run.children
                        .push(RunChild::FieldChar(FieldCharType::parse(&kind)?));
                }
                b"drawing" => {
                    if let Some(drawing) = Drawing::read_optional(r, &child)? {
                        run.children.push(RunChild::Drawing(drawing));
                    }
                }
                b"AlternateContent" => run.read_alternate_content(r, &child)?,
                _ => r.skip(&child)?,
            }
        }
        Ok(run)
    }
}

impl ToXml for RunChild {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        match self {
            RunChild::Text(text) => w.text_element("w:t", text),
            RunChild::Tab => w.empty("w:tab", Attrs::new()),
            RunChild::Break(br) => w.empty(
                "w:br",
                Attrs::new().opt("w:type", br.kind.map(BreakType::as_str)),
            ),
            RunChild::Drawing(drawing) => drawing.write_xml(w),
            RunChild::FieldChar(kind) => w.empty(
                "w:fldChar",
                Attrs::new().with("w:fldCharType", kind.as_str()),
            ),
        }
    }
}

impl RunProperties {
    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ToXml for RunProperties {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:rPr", Attrs::new())?;
        if let Some(style) = &self.style {
            w.val("w:rStyle", style)?;
        }
        if let Some(fonts) = &self.fonts {
            w.empty(
                "w:rFonts",
                Attrs::new()
                    .opt("w:ascii", fonts.ascii.as_deref())
                    .opt("w:eastAsia", fonts.east_asia.as_deref())
                    .opt("w:hAnsi", fonts.h_ansi.as_deref())
                    .opt("w:cs", fonts.cs.as_deref())
                    .opt("w:hint", fonts.hint.as_deref()),
            )?;
        }
        write_toggle(w, "w:b", self.bold)?;
        write_toggle(w, "w:i", self.italic)?;
        write_toggle(w, "w:strike", self.strike)?;
        if let Some(color) = &self.color {
            w.val("w:color", color)?;
        }
        if let Some(size) = self.size {
            w.val("w:sz", size)?;
        }
        if let Some(size) = self.size_cs {
            w.val("w:szCs", size)?;
        }
        if let Some(highlight) = &self.highlight {
            w.val("w:highlight", highlight)?;
        }
        if let Some(underline) = &self.underline {
            w.val("w:u", underline)?;
        }
        if let Some(shading) = &self.shading {
            shading.write_xml(w)?;
        }
        if let Some(vert_align) = &self.vert_align {
            w.val("w:vertAlign", vert_align)?;
        }
        w.end("w:rPr")
    }
}

impl FromXml for RunProperties {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut props = RunProperties::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"rStyle" => props.style = child.val()?,
                b"rFonts" => {
                    props.fonts = Some(RunFonts {
                        ascii: child.attr("ascii")?,
                        east_asia: child.attr("eastAsia")?,
                        h_ansi: child.attr("hAnsi")?,
                        cs: child.attr("cs")?,
                        hint: child.attr("hint")?,
                    })
                }
                b"b" => props.bold = Some(child.toggle()?),
                b"i" => props.italic = Some(child.toggle()?),
                b"strike" => props.strike = Some(child.toggle()?),
                b"color" => props.color = child.val()?.map(Color::from),
                b"sz" => props.size = child.parse_attr("val")?,
                b"szCs" => props.size_cs = child.parse_attr("val")?,
                b"highlight" => props.highlight = child.val()?,
                b"u" => {
                    props.underline = Some(child.val()?.unwrap_or_else(|| "single".to_string()))
                }
                b"shd" => props.shading = Some(Shading::from_element(&child)?),
                b"vertAlign" => props.vert_align = child.val()?,
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(props)
    }
}

fn write_toggle<W: Write>(w: &mut XmlWriter<W>, name: &str, value: Option<bool>) -> Result<()> {
    match value {
        Some(true) => w.empty(name, Attrs::new()),
        Some(false) => w.val(name, "0"),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_xml_str, to_xml_string};

    #[test]
    fn test_encode_styled_run() {
        let mut run = Run::with_text("Hello ");
        run.bold().color("ff0000").size(24);
        let xml = to_xml_string(&run).unwrap();
        assert_eq!(
            xml,
            r#"<w:r><w:rPr><w:b/><w:color w:val="FF0000"/><w:sz w:val="24"/></w:rPr><w:t xml:space="preserve">Hello </w:t></w:r>"#
        );
    }

    #[test]
    fn test_decode_any_property_order() {
        let xml = r#"<w:r><w:rPr><w:sz w:val="20"/><w:i w:val="0"/><w:rStyle w:val="Emph"/></w:rPr><w:t>x</w:t></w:r>"#;
        let run: Run = from_xml_str(xml).unwrap();
        let props = run.properties.as_ref().unwrap();
        assert_eq!(props.size, Some(20));
        assert_eq!(props.italic, Some(false));
        assert_eq!(props.style.as_deref(), Some("Emph"));
        assert_eq!(run.text(), "x");
    }

    #[test]
    fn test_decode_children_and_unknowns() {
        let xml = r#"<w:r><w:lastRenderedPageBreak/><w:t>a</w:t><w:tab/><w:br w:type="page"/><w14:foo xmlns:w14="urn:w14"><w14:bar/></w14:foo><w:fldChar w:fldCharType="begin"/></w:r>"#;
        let run: Run = from_xml_str(xml).unwrap();
        assert_eq!(
            run.children,
            vec![
                RunChild::Text("a".to_string()),
                RunChild::Tab,
                RunChild::Break(Break {
                    kind: Some(BreakType::Page)
                }),
                RunChild::FieldChar(FieldCharType::Begin),
            ]
        );
    }

    #[test]
    fn test_instr_text() {
        let xml = r#"<w:r><w:instrText xml:space="preserve"> PAGE </w:instrText></w:r>"#;
        let run: Run = from_xml_str(xml).unwrap();
        assert_eq!(run.instr_text.as_deref(), Some(" PAGE "));
        assert_eq!(to_xml_string(&run).unwrap(), xml);
    }

    #[test]
    fn test_front_and_rear_tabs() {
        let mut run = Run::with_text("mid");
        run.add_front_tab().add_tab();
        assert_eq!(run.text(), "\tmid\t");
    }

    #[test]
    fn test_bad_size_attribute() {
        let xml = r#"<w:r><w:rPr><w:sz w:val="large"/></w:rPr></w:r>"#;
        let err = from_xml_str::<Run>(xml).unwrap_err();
        assert!(matches!(err, DocxError::BadAttribute { .. }));
    }

    #[test]
    fn test_bare_underline_is_single() {
        let xml = r#"<w:r><w:rPr><w:u/></w:rPr><w:t>under</w:t></w:r>"#;
        let run: Run = from_xml_str(xml).unwrap();
        let props = run.properties.as_ref().unwrap();
        assert_eq!(props.underline.as_deref(), Some("single"));
        assert!(to_xml_string(&run)
            .unwrap()
            .contains(r#"<w:u w:val="single"/>"#));

        let xml = r#"<w:r><w:rPr><w:u w:val="double"/></w:rPr></w:r>"#;
        let run: Run = from_xml_str(xml).unwrap();
        assert_eq!(
            run.properties.unwrap().underline.as_deref(),
            Some("double")
        );
    }
}
