//! Tables: properties, column grid, rows and cells
//!
//! ```xml
//! <w:tbl>
//!   <w:tblPr>
//!     <w:tblW w:w="0" w:type="auto"/>
//!     <w:tblBorders>...</w:tblBorders>
//!   </w:tblPr>
//!   <w:tblGrid><w:gridCol w:w="2000"/></w:tblGrid>
//!   <w:tr>
//!     <w:tc><w:tcPr><w:tcW w:w="2000" w:type="dxa"/></w:tcPr><w:p/></w:tc>
//!   </w:tr>
//! </w:tbl>
//! ```

use std::io::Write;

use crate::error::Result;
use crate::paragraph::Paragraph;
use crate::units::{Border, Justification, Shading, VerticalAlignment, WidthType};
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

/// A table (`w:tbl`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub properties: TableProperties,
    pub grid: Vec<GridColumn>,
    pub rows: Vec<TableRow>,
}

/// Table-level properties (`w:tblPr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableProperties {
    /// Table style id (`w:tblStyle`)
    pub style: Option<String>,
    /// Floating table placement (`w:tblpPr`)
    pub position: Option<TablePosition>,
    pub width: Option<TableWidth>,
    pub justification: Option<Justification>,
    pub borders: Option<Borders>,
    /// `fixed` or `autofit`
    pub layout: Option<String>,
    pub look: Option<TableLook>,
}

/// A width with its unit (`w:tblW`, `w:tcW`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableWidth {
    pub value: i64,
    pub kind: WidthType,
}

/// Placement of a floating table, distances in twips
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TablePosition {
    pub left_from_text: Option<i64>,
    pub right_from_text: Option<i64>,
    pub top_from_text: Option<i64>,
    pub bottom_from_text: Option<i64>,
    /// `text`, `margin` or `page`
    pub vert_anchor: Option<String>,
    pub horz_anchor: Option<String>,
    pub x: Option<i64>,
    pub y: Option<i64>,
}

/// Border set of a table (`w:tblBorders`) or cell (`w:tcBorders`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Borders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
    pub inside_h: Option<Border>,
    pub inside_v: Option<Border>,
}

/// Conditional formatting switches of the table style (`w:tblLook`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableLook {
    /// Legacy hex bitmask
    pub val: Option<String>,
    pub first_row: Option<bool>,
    pub last_row: Option<bool>,
    pub first_column: Option<bool>,
    pub last_column: Option<bool>,
    pub no_h_band: Option<bool>,
    pub no_v_band: Option<bool>,
}

/// One column of the table grid; width in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridColumn {
    pub width: Option<u32>,
}

/// A table row (`w:tr`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub properties: Option<RowProperties>,
    pub cells: Vec<TableCell>,
}

/// Row properties (`w:trPr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowProperties {
    pub cant_split: Option<bool>,
    pub height: Option<RowHeight>,
    /// Repeat as header row on every page
    pub header: Option<bool>,
    pub justification: Option<Justification>,
}

/// Row height in twips (`w:trHeight`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowHeight {
    pub value: u32,
    /// `auto`, `exact` or `atLeast` (the default when absent)
    pub rule: Option<String>,
}

/// A table cell (`w:tc`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub properties: Option<CellProperties>,
    pub paragraphs: Vec<Paragraph>,
}

/// Cell properties (`w:tcPr`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellProperties {
    pub width: Option<TableWidth>,
    /// Number of grid columns spanned
    pub grid_span: Option<u32>,
    pub v_merge: Option<VerticalMerge>,
    pub borders: Option<Borders>,
    pub shading: Option<Shading>,
    pub v_align: Option<VerticalAlignment>,
}

/// Vertical merge state of a cell (`w:vMerge`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMerge {
    /// First cell of a merged range
    Restart,
    /// Continues the range started above
    Continue,
}

/// Text area width of an A4 page with default margins, in twips
pub(crate) const A4_TEXT_WIDTH: u32 = 8306;

impl Borders {
    /// The same border on every edge and inside boundary
    pub fn all(border: Border) -> Self {
        Self {
            top: Some(border.clone()),
            left: Some(border.clone()),
            bottom: Some(border.clone()),
            right: Some(border.clone()),
            inside_h: Some(border.clone()),
            inside_v: Some(border),
        }
    }

    fn write_named<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.start(name, Attrs::new())?;
        let edges = [
            ("w:top", &self.top),
            ("w:left", &self.left),
            ("w:bottom", &self.bottom),
            ("w:right", &self.right),
            ("w:insideH", &self.inside_h),
            ("w:insideV", &self.inside_v),
        ];
        for (edge, border) in edges {
            if let Some(border) = border {
                border.write_edge(w, edge)?;
            }
        }
        w.end(name)
    }
}

impl FromXml for Borders {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut borders = Borders::default();
        while let Some(child) = r.next_element(el)? {
            let slot = match child.local_name() {
                b"top" => Some(&mut borders.top),
                b"left" | b"start" => Some(&mut borders.left),
                b"bottom" => Some(&mut borders.bottom),
                b"right" | b"end" => Some(&mut borders.right),
                b"insideH" => Some(&mut borders.inside_h),
                b"insideV" => Some(&mut borders.inside_v),
                _ => None,
            };
            if let Some(slot) = slot {
                *slot = Some(Border::from_element(&child)?);
            }
            r.skip(&child)?;
        }
        Ok(borders)
    }
}

impl TableWidth {
    pub fn auto() -> Self {
        Self {
            value: 0,
            kind: WidthType::Auto,
        }
    }

    /// Width in twips
    pub fn dxa(twips: u32) -> Self {
        Self {
            value: i64::from(twips),
            kind: WidthType::Dxa,
        }
    }

    fn write_named<W: Write>(&self, w: &mut XmlWriter<W>, name: &str) -> Result<()> {
        w.empty(
            name,
            Attrs::new().with("w:w", self.value).with("w:type", self.kind),
        )
    }

    fn from_element(el: &Element<'_>) -> Result<Self> {
        Ok(Self {
            value: el.parse_attr("w")?.unwrap_or(0),
            kind: el.parse_attr("type")?.unwrap_or(WidthType::Dxa),
        })
    }
}

impl Table {
    /// A `rows` x `cols` table with automatic widths and single black borders
    ///
    /// Grid columns share the A4 text width evenly.
    pub fn new(rows: usize, cols: usize) -> Self {
        let column = GridColumn {
            width: (cols > 0).then(|| A4_TEXT_WIDTH / cols as u32),
        };
        let row = TableRow {
            properties: None,
            cells: (0..cols).map(|_| TableCell::with_width(TableWidth::auto())).collect(),
        };
        Self {
            properties: TableProperties::bordered(TableWidth::auto()),
            grid: vec![column; cols],
            rows: vec![row; rows],
        }
    }

    /// A table with explicit row heights and column widths, in twips
    pub fn with_dimensions(row_heights: &[u32], col_widths: &[u32]) -> Self {
        let total = col_widths.iter().fold(0u32, |acc, &w| acc.saturating_add(w));
        let rows = row_heights
            .iter()
            .map(|&height| TableRow {
                properties: Some(RowProperties {
                    height: Some(RowHeight {
                        value: height,
                        rule: None,
                    }),
                    ..RowProperties::default()
                }),
                cells: col_widths
                    .iter()
                    .map(|&width| TableCell::with_width(TableWidth::dxa(width)))
                    .collect(),
            })
            .collect();
        Self {
            properties: TableProperties::bordered(TableWidth::dxa(total)),
            grid: col_widths
                .iter()
                .map(|&width| GridColumn { width: Some(width) })
                .collect(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of grid columns
    pub fn column_count(&self) -> usize {
        self.grid.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cells.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row)?.cells.get_mut(col)
    }

    /// Replace the border set of the table
    pub fn set_borders(&mut self, borders: Borders) -> &mut Self {
        self.properties.borders = Some(borders);
        self
    }

    pub fn set_width(&mut self, width: TableWidth) -> &mut Self {
        self.properties.width = Some(width);
        self
    }

    pub fn set_justification(&mut self, justification: Justification) -> &mut Self {
        self.properties.justification = Some(justification);
        self
    }

    /// Set the width of one grid column and of every cell in it
    pub fn set_column_width(&mut self, col: usize, twips: u32) -> &mut Self {
        if let Some(column) = self.grid.get_mut(col) {
            column.width = Some(twips);
        }
        for row in &mut self.rows {
            if let Some(cell) = row.cells.get_mut(col) {
                cell.properties_mut().width = Some(TableWidth::dxa(twips));
            }
        }
        self
    }
}

impl TableProperties {
    fn bordered(width: TableWidth) -> Self {
        Self {
            width: Some(width),
            borders: Some(Borders::all(Border::default())),
            ..Self::default()
        }
    }
}

impl TableCell {
    fn with_width(width: TableWidth) -> Self {
        Self {
            properties: Some(CellProperties {
                width: Some(width),
                ..CellProperties::default()
            }),
            paragraphs: Vec::new(),
        }
    }

    pub fn properties_mut(&mut self) -> &mut CellProperties {
        self.properties.get_or_insert_with(CellProperties::default)
    }

    /// Paragraph texts joined by newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ToXml for Table {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:tbl", Attrs::new())?;
        self.properties.write_xml(w)?;
        w.start("w:tblGrid", Attrs::new())?;
        for column in &self.grid {
            w.empty("w:gridCol", Attrs::new().opt("w:w", column.width))?;
        }
        w.end("w:tblGrid")?;
        self.rows.write_xml(w)?;
        w.end("w:tbl")
    }
}

impl FromXml for Table {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut table = Table::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"tblPr" => table.properties = TableProperties::read_xml(r, &child)?,
                b"tblGrid" => {
                    while let Some(col) = r.next_element(&child)? {
                        if col.local_name() == b"gridCol" {
                            table.grid.push(GridColumn {
                                width: col.parse_attr("w")?,
                            });
                        }
                        r.skip(&col)?;
                    }
                }
                b"tr" => table.rows.push(TableRow::read_xml(r, &child)?),
                _ => r.skip(&child)?,
            }
        }
        Ok(table)
    }
}

impl ToXml for TableProperties {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:tblPr", Attrs::new())?;
        if let Some(style) = &self.style {
            w.val("w:tblStyle", style)?;
        }
        if let Some(pos) = &self.position {
            w.empty(
                "w:tblpPr",
                Attrs::new()
                    .opt("w:leftFromText", pos.left_from_text)
                    .opt("w:rightFromText", pos.right_from_text)
                    .opt("w:topFromText", pos.top_from_text)
                    .opt("w:bottomFromText", pos.bottom_from_text)
                    .opt("w:vertAnchor", pos.vert_anchor.as_deref())
                    .opt("w:horzAnchor", pos.horz_anchor.as_deref())
                    .opt("w:tblpX", pos.x)
                    .opt("w:tblpY", pos.y),
            )?;
        }
        if let Some(width) = &self.width {
            width.write_named(w, "w:tblW")?;
        }
        if let Some(jc) = self.justification {
            w.val("w:jc", jc)?;
        }
        if let Some(borders) = &self.borders {
            borders.write_named(w, "w:tblBorders")?;
        }
        if let Some(layout) = &self.layout {
            w.empty("w:tblLayout", Attrs::new().with("w:type", layout))?;
        }
        if let Some(look) = &self.look {
            w.empty(
                "w:tblLook",
                Attrs::new()
                    .opt("w:val", look.val.as_deref())
                    .flag("w:firstRow", look.first_row)
                    .flag("w:lastRow", look.last_row)
                    .flag("w:firstColumn", look.first_column)
                    .flag("w:lastColumn", look.last_column)
                    .flag("w:noHBand", look.no_h_band)
                    .flag("w:noVBand", look.no_v_band),
            )?;
        }
        w.end("w:tblPr")
    }
}

impl FromXml for TableProperties {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut props = TableProperties::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"tblStyle" => props.style = child.val()?,
                b"tblpPr" => {
                    props.position = Some(TablePosition {
                        left_from_text: child.parse_attr("leftFromText")?,
                        right_from_text: child.parse_attr("rightFromText")?,
                        top_from_text: child.parse_attr("topFromText")?,
                        bottom_from_text: child.parse_attr("bottomFromText")?,
                        vert_anchor: child.attr("vertAnchor")?,
                        horz_anchor: child.attr("horzAnchor")?,
                        x: child.parse_attr("tblpX")?,
                        y: child.parse_attr("tblpY")?,
                    })
                }
                b"tblW" => props.width = Some(TableWidth::from_element(&child)?),
                b"jc" => {
                    props.justification = child
                        .val()?
                        .map(|v| Justification::parse(&v))
                        .transpose()?
                }
                b"tblBorders" => {
                    props.borders = Some(Borders::read_xml(r, &child)?);
                    continue;
                }
                b"tblLayout" => props.layout = child.attr("type")?,
                b"tblLook" => {
                    props.look = Some(TableLook {
                        val: child.val()?,
                        first_row: child.on_off_attr("firstRow")?,
                        last_row: child.on_off_attr("lastRow")?,
                        first_column: child.on_off_attr("firstColumn")?,
                        last_column: child.on_off_attr("lastColumn")?,
                        no_h_band: child.on_off_attr("noHBand")?,
                        no_v_band: child.on_off_attr("noVBand")?,
                    })
                }
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(props)
    }
}

impl ToXml for TableRow {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:tr", Attrs::new())?;
        self.properties.write_xml(w)?;
        self.cells.write_xml(w)?;
        w.end("w:tr")
    }
}

impl FromXml for TableRow {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut row = TableRow::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"trPr" => row.properties = Some(RowProperties::read_xml(r, &child)?),
                b"tc" => row.cells.push(TableCell::read_xml(r, &child)?),
                _ => r.skip(&child)?,
            }
        }
        Ok(row)
    }
}

impl ToXml for RowProperties {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:trPr", Attrs::new())?;
        if let Some(cant_split) = self.cant_split {
            w.empty("w:cantSplit", Attrs::new().flag("w:val", (!cant_split).then_some(false)))?;
        }
        if let Some(height) = &self.height {
            w.empty(
                "w:trHeight",
                Attrs::new()
                    .with("w:val", height.value)
                    .opt("w:hRule", height.rule.as_deref()),
            )?;
        }
        if let Some(header) = self.header {
            w.empty("w:tblHeader", Attrs::new().flag("w:val", (!header).then_some(false)))?;
        }
        if let Some(jc) = self.justification {
            w.val("w:jc", jc)?;
        }
        w.end("w:trPr")
    }
}

impl FromXml for RowProperties {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut props = RowProperties::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"cantSplit" => props.cant_split = Some(child.toggle()?),
                b"trHeight" => {
                    props.height = Some(RowHeight {
                        value: child.parse_attr("val")?.unwrap_or(0),
                        rule: child.attr("hRule")?,
                    })
                }
                b"tblHeader" => props.header = Some(child.toggle()?),
                b"jc" => {
                    props.justification = child
                        .val()?
                        .map(|v| Justification::parse(&v))
                        .transpose()?
                }
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(props)
    }
}

impl ToXml for TableCell {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:tc", Attrs::new())?;
        self.properties.write_xml(w)?;
        if self.paragraphs.is_empty() {
            // A cell must end with a paragraph
            w.empty("w:p", Attrs::new())?;
        } else {
            self.paragraphs.write_xml(w)?;
        }
        w.end("w:tc")
    }
}

impl FromXml for TableCell {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut cell = TableCell::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"tcPr" => cell.properties = Some(CellProperties::read_xml(r, &child)?),
                b"p" => {
                    let paragraph = Paragraph::read_xml(r, &child)?;
                    if !paragraph.is_empty() {
                        cell.paragraphs.push(paragraph);
                    }
                }
                b"tbl" => {
                    log::debug!("dropping nested table inside a table cell");
                    r.skip(&child)?;
                }
                _ => r.skip(&child)?,
            }
        }
        Ok(cell)
    }
}

impl ToXml for CellProperties {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:tcPr", Attrs::new())?;
        if let Some(width) = &self.width {
            width.write_named(w, "w:tcW")?;
        }
        if let Some(span) = self.grid_span {
            w.val("w:gridSpan", span)?;
        }
        match self.v_merge {
            Some(VerticalMerge::Restart) => w.val("w:vMerge", "restart")?,
            Some(VerticalMerge::Continue) => w.empty("w:vMerge", Attrs::new())?,
            None => {}
        }
        if let Some(borders) = &self.borders {
            borders.write_named(w, "w:tcBorders")?;
        }
        self.shading.write_xml(w)?;
        if let Some(v_align) = self.v_align {
            w.val("w:vAlign", v_align)?;
        }
        w.end("w:tcPr")
    }
}

impl FromXml for CellProperties {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut props = CellProperties::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"tcW" => props.width = Some(TableWidth::from_element(&child)?),
                b"gridSpan" => props.grid_span = child.parse_attr("val")?,
                b"vMerge" => {
                    props.v_merge = Some(match child.val()?.as_deref() {
                        Some("restart") => VerticalMerge::Restart,
                        _ => VerticalMerge::Continue,
                    })
                }
                b"tcBorders" => {
                    props.borders = Some(Borders::read_xml(r, &child)?);
                    continue;
                }
                b"shd" => props.shading = Some(Shading::from_element(&child)?),
                b"vAlign" => props.v_align = child.parse_attr("val")?,
                _ => {}
            }
            r.skip(&child)?;
        }
        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{from_xml_str, to_xml_string};

    #[test]
    fn test_new_table_shape() {
        let table = Table::new(4, 3);
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.column_count(), 3);
        assert!(table.rows.iter().all(|row| row.cells.len() == 3));
        assert_eq!(table.grid[0].width, Some(A4_TEXT_WIDTH / 3));
        assert_eq!(table.properties.width, Some(TableWidth::auto()));
        let borders = table.properties.borders.as_ref().unwrap();
        assert_eq!(borders.inside_v, Some(Border::default()));
    }

    #[test]
    fn test_table_encoding() {
        let mut table = Table::with_dimensions(&[400], &[2000, 1000]);
        table.properties.borders = None;
        let xml = to_xml_string(&table).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<w:tbl><w:tblPr><w:tblW w:w="3000" w:type="dxa"/></w:tblPr>"#,
                r#"<w:tblGrid><w:gridCol w:w="2000"/><w:gridCol w:w="1000"/></w:tblGrid>"#,
                r#"<w:tr><w:trPr><w:trHeight w:val="400"/></w:trPr>"#,
                r#"<w:tc><w:tcPr><w:tcW w:w="2000" w:type="dxa"/></w:tcPr><w:p/></w:tc>"#,
                r#"<w:tc><w:tcPr><w:tcW w:w="1000" w:type="dxa"/></w:tcPr><w:p/></w:tc>"#,
                r#"</w:tr></w:tbl>"#
            )
        );
        assert_eq!(from_xml_str::<Table>(&xml).unwrap(), table);
    }

    #[test]
    fn test_borders_xml() {
        let xml = to_xml_string(&TableProperties::bordered(TableWidth::auto())).unwrap();
        assert!(xml.contains(concat!(
            r#"<w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
            r#"<w:left w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#
        )));
        assert!(xml.ends_with(
            r#"<w:insideV w:val="single" w:sz="4" w:space="0" w:color="000000"/></w:tblBorders></w:tblPr>"#
        ));
    }

    #[test]
    fn test_cell_properties_round_trip() {
        let props = CellProperties {
            width: Some(TableWidth::dxa(1200)),
            grid_span: Some(2),
            v_merge: Some(VerticalMerge::Continue),
            borders: Some(Borders {
                bottom: Some(Border::single(12, "FF0000".into())),
                ..Borders::default()
            }),
            shading: Some(Shading::fill("EEEEEE")),
            v_align: Some(VerticalAlignment::Center),
        };
        let xml = to_xml_string(&props).unwrap();
        assert!(xml.contains(r#"<w:vMerge/>"#));
        assert!(xml.ends_with(r#"<w:vAlign w:val="center"/></w:tcPr>"#));
        assert_eq!(from_xml_str::<CellProperties>(&xml).unwrap(), props);
    }

    #[test]
    fn test_row_flags() {
        let xml = r#"<w:trPr><w:cantSplit/><w:tblHeader w:val="0"/><w:jc w:val="center"/></w:trPr>"#;
        let props: RowProperties = from_xml_str(xml).unwrap();
        assert_eq!(props.cant_split, Some(true));
        assert_eq!(props.header, Some(false));
        assert_eq!(props.justification, Some(Justification::Center));
        assert_eq!(to_xml_string(&props).unwrap(), xml);
    }

    #[test]
    fn test_empty_cell_paragraphs_dropped() {
        let xml = r#"<w:tc><w:p/><w:p><w:r><w:t>A</w:t></w:r></w:p><w:p><w:pPr/></w:p></w:tc>"#;
        let cell: TableCell = from_xml_str(xml).unwrap();
        assert_eq!(cell.paragraphs.len(), 1);
        assert_eq!(cell.text(), "A");
    }

    #[test]
    fn test_cell_lookup() {
        let mut table = Table::new(2, 2);
        table
            .cell_mut(1, 1)
            .unwrap()
            .paragraphs
            .push(Paragraph::with_text("x"));
        assert_eq!(table.cell(1, 1).unwrap().text(), "x");
        assert!(table.cell(2, 0).is_none());
        assert!(table.cell(0, 2).is_none());
    }

    #[test]
    fn test_cell_vertical_alignment_both() {
        let xml = concat!(
            r#"<w:tbl><w:tblGrid><w:gridCol w:w="2000"/></w:tblGrid>"#,
            r#"<w:tr><w:tc><w:tcPr><w:vAlign w:val="both"/></w:tcPr>"#,
            r#"<w:p><w:r><w:t>spread</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#
        );
        let table: Table = from_xml_str(xml).unwrap();
        let cell = table.cell(0, 0).unwrap();
        let props = cell.properties.as_ref().unwrap();
        assert_eq!(props.v_align, Some(VerticalAlignment::Both));
        assert_eq!(cell.text(), "spread");

        let written = to_xml_string(&table).unwrap();
        assert!(written.contains(r#"<w:vAlign w:val="both"/>"#));
        assert_eq!(from_xml_str::<Table>(&written).unwrap(), table);
    }

    #[test]
    fn test_oversized_widths_saturate() {
        let table = Table::with_dimensions(&[400], &[u32::MAX, 2000]);
        assert_eq!(table.properties.width, Some(TableWidth::dxa(u32::MAX)));
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.grid[0].width, Some(u32::MAX));
    }
}
