//! Paragraphs, their properties and inline children

use std::io::Write;

use crate::drawing::Drawing;
use crate::error::Result;
use crate::run::{Run, RunProperties};
use crate::units::Justification;
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

/// Character style applied to runs created by hyperlink builders
pub const HYPERLINK_STYLE: &str = "Hyperlink";

/// A paragraph (`w:p`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub properties: Option<ParagraphProperties>,
    /// Inline content in document order
    pub children: Vec<ParagraphChild>,
}

/// Inline content of a paragraph
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphChild {
    Run(Run),
    Hyperlink(Hyperlink),
    BookmarkStart(BookmarkStart),
    BookmarkEnd(BookmarkEnd),
    /// Run properties written directly inside the paragraph
    RunProperties(RunProperties),
}

/// Paragraph properties (`w:pPr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParagraphProperties {
    /// Paragraph style id (`w:pStyle`)
    pub style: Option<String>,
    pub keep_next: Option<bool>,
    pub spacing: Option<Spacing>,
    pub indentation: Option<Indentation>,
    pub justification: Option<Justification>,
    /// Formatting of the paragraph mark
    pub run_properties: Option<RunProperties>,
}

/// Paragraph spacing in twips (`w:spacing`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spacing {
    pub before: Option<u32>,
    pub after: Option<u32>,
    /// Line pitch; 240ths of a line when `line_rule` is `auto`
    pub line: Option<u32>,
    /// `auto`, `exact` or `atLeast`
    pub line_rule: Option<String>,
}

/// Paragraph indentation in twips (`w:ind`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Indentation {
    pub left: Option<i64>,
    pub right: Option<i64>,
    pub first_line: Option<i64>,
    pub hanging: Option<i64>,
}

/// Where a hyperlink points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyperlinkTarget {
    /// External target stored in the relationships part (`r:id`)
    Relationship(String),
    /// Bookmark inside this document (`w:anchor`)
    Anchor(String),
}

/// A hyperlink (`w:hyperlink`) and the runs it wraps
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    pub target: HyperlinkTarget,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkStart {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkEnd {
    pub id: String,
}

impl Paragraph {
    /// Empty paragraph
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph holding a single plain run
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            properties: None,
            children: vec![ParagraphChild::Run(Run::with_text(text))],
        }
    }

    /// Whether the paragraph has no inline content
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Paragraph properties, created on first use
    pub fn properties_mut(&mut self) -> &mut ParagraphProperties {
        self.properties
            .get_or_insert_with(ParagraphProperties::default)
    }

    /// Append a run and return it for styling
    pub fn push_run(&mut self, run: Run) -> &mut Run {
        self.children.push(ParagraphChild::Run(run));
        match self.children.last_mut() {
            Some(ParagraphChild::Run(run)) => run,
            _ => unreachable!("a run was just pushed"),
        }
    }

    /// Append a hyperlink and return its last run for styling; a link
    /// without runs gets an empty one
    pub fn push_hyperlink(&mut self, mut link: Hyperlink) -> &mut Run {
        if link.runs.is_empty() {
            link.runs.push(Run::default());
        }
        self.children.push(ParagraphChild::Hyperlink(link));
        match self.children.last_mut() {
            Some(ParagraphChild::Hyperlink(Hyperlink { runs, .. })) => match runs.last_mut() {
                Some(run) => run,
                None => unreachable!("a hyperlink always holds a run here"),
            },
            _ => unreachable!("a hyperlink was just pushed"),
        }
    }

    /// Direct runs, excluding runs inside hyperlinks
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(run),
            _ => None,
        })
    }

    pub fn hyperlinks(&self) -> impl Iterator<Item = &Hyperlink> {
        self.children.iter().filter_map(|child| match child {
            ParagraphChild::Hyperlink(link) => Some(link),
            _ => None,
        })
    }

    /// Drawings of every run in this paragraph
    pub fn drawings(&self) -> impl Iterator<Item = &Drawing> {
        self.children
            .iter()
            .flat_map(|child| match child {
                ParagraphChild::Run(run) => std::slice::from_ref(run),
                ParagraphChild::Hyperlink(link) => link.runs.as_slice(),
                _ => &[],
            })
            .flat_map(Run::drawings)
    }

    /// Concatenated text of runs and hyperlinks
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                ParagraphChild::Run(run) => text.push_str(&run.text()),
                ParagraphChild::Hyperlink(link) => text.push_str(&link.text()),
                _ => {}
            }
        }
        text
    }
}

impl ToXml for Paragraph {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        if self.properties.is_none() && self.children.is_empty() {
            return w.empty("w:p", Attrs::new());
        }
        w.start("w:p", Attrs::new())?;
        self.properties.write_xml(w)?;
        self.children.write_xml(w)?;
        w.end("w:p")
    }
}

impl FromXml for Paragraph {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut paragraph = Paragraph::new();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"pPr" => paragraph.properties = Some(ParagraphProperties::read_xml(r, &child)?),
                b"r" => paragraph
                    .children
                    .push(ParagraphChild::Run(Run::read_xml(r, &child)?)),
                b"hyperlink" => paragraph
                    .children
                    .push(ParagraphChild::Hyperlink(Hyperlink::read_xml(r, &child)?)),
                b"bookmarkStart" => {
                    paragraph.children.push(ParagraphChild::BookmarkStart(BookmarkStart {
                        id: child.attr("id")?.unwrap_or_default(),
                        name: child.attr("name")?.unwrap_or_default(),
                    }));
                    r.skip(&child)?;
                }
                b"bookmarkEnd" => {
                    paragraph.children.push(ParagraphChild::BookmarkEnd(BookmarkEnd {
                        id: child.attr("id")?.unwrap_or_default(),
                    }));
                    r.skip(&child)?;
                }
                b"rPr" => paragraph
                    .children
                    .push(ParagraphChild::RunProperties(RunProperties::read_xml(r, &child)?)),
                _ => r.skip(&child)?,
            }
        }
        Ok(paragraph)
    }
}

impl ToXml for ParagraphChild {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        match self {
            ParagraphChild::Run(run) => run.write_xml(w),
            ParagraphChild::Hyperlink(link) => link.write_xml(w),
            ParagraphChild::BookmarkStart(mark) => w.empty(
                "w:bookmarkStart",
                Attrs::new().with("w:id", &mark.id).with("w:name", &mark.name),
            ),
            ParagraphChild::BookmarkEnd(mark) => {
                w.empty("w:bookmarkEnd", Attrs::new().with("w:id", &mark.id))
            }
            ParagraphChild::RunProperties(props) => props.write_xml(w),
        }
    }
}

impl ToXml for ParagraphProperties {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:pPr", Attrs::new())?;
        if let Some(style) = &self.style {
            w.val("w:pStyle", style)?;
        }
        match self.keep_next {
            Some(true) => w.empty("w:keepNext", Attrs::new())?,
            Some(false) => w.val("w:keepNext", "0")?,
            None => {}
        }
        if let Some(spacing) = &self.spacing {
            w.empty(
                "w:spacing",
                Attrs::new()
                    .opt("w:before", spacing.before)
                    .opt("w:after", spacing.after)
                    .opt("w:line", spacing.line)
                    .opt("w:lineRule", spacing.line_rule.as_deref()),
            )?;
        }
        if let Some(ind) = &self.indentation {
            w.empty(
                "w:ind",
                Attrs::new()
                    .opt("w:left", ind.left)
                    .opt("w:right", ind.right)
                    .opt("w:firstLine", ind.first_line)
                    .opt("w:hanging", ind.hanging),
            )?;
        }
        if let Some(jc) = self.justification {
            w.val("w:jc", jc)?;
        }
        self.run_properties.write_xml(w)?;
        w.end("w:pPr")
    }
}

impl FromXml for ParagraphProperties {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut props = ParagraphProperties::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"pStyle" => props.style = child.val()?,
                b"keepNext" => props.keep_next = Some(child.toggle()?),
                b"spacing" => {
                    props.spacing = Some(Spacing {
                        before: child.parse_attr("before")?,
                        after: child.parse_attr("after")?,
                        line: child.parse_attr("line")?,
                        line_rule: child.attr("lineRule")?,
                    })
                }
                b"ind" => {
                    props.indentation = Some(Indentation {
                        left: match child.parse_attr("left")? {
                            Some(left) => Some(left),
                            None => child.parse_attr("start")?,
                        },
                        right: match child.parse_attr("right")? {
                            Some(right) => Some(right),
                            None => child.parse_attr("end")?,
                        },
                        first_line: child.parse_attr("firstLine")?,
                        hanging: child.parse_attr("hanging")?,
                    })
                }
                b"jc" => {
                    props.justification = child
                        .val()?
                        .map(|v| Justification::parse(&v))
                        .transpose()?
                }
                b"rPr" => {
                    props.run_properties = Some(RunProperties::read_xml(r, &child)?);
                    continue;
                }
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(props)
    }
}

impl Hyperlink {
    /// Link to an external target through a relationship id
    pub fn external(rel_id: impl Into<String>, run: Run) -> Self {
        Self {
            target: HyperlinkTarget::Relationship(rel_id.into()),
            runs: vec![run],
        }
    }

    /// Link to a bookmark in this document
    pub fn internal(anchor: impl Into<String>, run: Run) -> Self {
        Self {
            target: HyperlinkTarget::Anchor(anchor.into()),
            runs: vec![run],
        }
    }

    /// Concatenated text of the link's runs
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// Relationship id of an external link
    pub fn rel_id(&self) -> Option<&str> {
        match &self.target {
            HyperlinkTarget::Relationship(id) => Some(id),
            HyperlinkTarget::Anchor(_) => None,
        }
    }
}

impl ToXml for Hyperlink {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        let attrs = match &self.target {
            HyperlinkTarget::Relationship(id) => Attrs::new().with("r:id", id),
            HyperlinkTarget::Anchor(anchor) => Attrs::new().with("w:anchor", anchor),
        };
        w.start("w:hyperlink", attrs)?;
        for run in &self.runs {
            run.write_xml(w)?;
        }
        w.end("w:hyperlink")
    }
}

impl FromXml for Hyperlink {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let target = match el.attr("anchor")? {
            Some(anchor) => HyperlinkTarget::Anchor(anchor),
            None => HyperlinkTarget::Relationship(el.attr("id")?.unwrap_or_default()),
        };
        let mut runs = Vec::new();
        while let Some(child) = r.next_element(el)? {
            if child.local_name() == b"r" {
                runs.push(Run::read_xml(r, &child)?);
            } else {
                r.skip(&child)?;
            }
        }
        Ok(Self { target, runs })
    }
}
