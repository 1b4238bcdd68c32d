//! Mutable handles returned by the document builder
//!
//! A handle borrows one node of the tree mutably together with the shared
//! [`Resources`] of its document. Handles on disjoint nodes (for example
//! different cells of a table) can live at the same time and be moved to
//! other threads; id allocation and the relationship and media tables are
//! synchronized inside [`Resources`].

use crate::drawing::{
    Anchor, Canvas, Drawing, Extent, GraphicData, Group, Inline, NonVisualProps, Picture, Shape,
    ShapeElem,
};
use crate::error::Result;
use crate::paragraph::{Hyperlink, Paragraph, HYPERLINK_STYLE};
use crate::registry::Resources;
use crate::run::{Run, RunChild};
use crate::table::{Borders, Table, TableCell, TableWidth};
use crate::units::{Justification, Shading, VerticalAlignment};

/// Size, geometry and styling of a new shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSpec {
    /// Base name; the shape is called `"<name> <n>"`
    pub name: String,
    /// Preset geometry (`rect`, `ellipse`, `straightConnector1`, ...)
    pub geometry: String,
    pub width: i64,
    pub height: i64,
    pub bw_mode: Option<String>,
    pub elems: Vec<ShapeElem>,
    /// Encode as a connector (`wps:cNvCnPr`)
    pub connector: bool,
}

impl ShapeSpec {
    /// Shape of `width` x `height` EMUs
    pub fn new(name: impl Into<String>, geometry: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            name: name.into(),
            geometry: geometry.into(),
            width,
            height,
            bw_mode: None,
            elems: Vec::new(),
            connector: false,
        }
    }

    pub fn bw_mode(mut self, mode: impl Into<String>) -> Self {
        self.bw_mode = Some(mode.into());
        self
    }

    /// Append a fill or outline element
    pub fn elem(mut self, elem: ShapeElem) -> Self {
        self.elems.push(elem);
        self
    }

    pub fn connector(mut self) -> Self {
        self.connector = true;
        self
    }

    fn extent(&self) -> Extent {
        Extent {
            cx: self.width,
            cy: self.height,
        }
    }

    fn into_shape(self) -> Shape {
        let mut shape = Shape::new(self.extent(), self.geometry);
        shape.connector = self.connector;
        shape.properties.bw_mode = self.bw_mode;
        shape.properties.elems = self.elems;
        shape
    }
}

/// Mutable handle on a paragraph
#[derive(Debug)]
pub struct ParagraphMut<'a> {
    paragraph: &'a mut Paragraph,
    resources: &'a Resources,
}

impl<'a> ParagraphMut<'a> {
    pub(crate) fn new(paragraph: &'a mut Paragraph, resources: &'a Resources) -> Self {
        Self {
            paragraph,
            resources,
        }
    }

    /// The paragraph as it stands
    pub fn paragraph(&self) -> &Paragraph {
        &*self.paragraph
    }

    /// Direct access to the node
    pub fn paragraph_mut(&mut self) -> &mut Paragraph {
        &mut *self.paragraph
    }

    pub fn justification(&mut self, justification: Justification) -> &mut Self {
        self.paragraph.properties_mut().justification = Some(justification);
        self
    }

    /// Reference a paragraph style
    pub fn style(&mut self, style_id: impl Into<String>) -> &mut Self {
        self.paragraph.properties_mut().style = Some(style_id.into());
        self
    }

    /// Append a run holding `text`
    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Run {
        self.paragraph.push_run(Run::with_text(text))
    }

    pub fn add_run(&mut self, run: Run) -> &mut Run {
        self.paragraph.push_run(run)
    }

    /// Append a link to an external URL
    ///
    /// The URL is registered as a hyperlink relationship and the run takes
    /// the `Hyperlink` character style.
    pub fn add_link(&mut self, text: impl Into<String>, url: &str) -> &mut Run {
        let rel_id = self.resources.add_link_relationship(url);
        let mut run = Run::with_text(text);
        run.style(HYPERLINK_STYLE);
        self.paragraph.push_hyperlink(Hyperlink::external(rel_id, run))
    }

    /// Append a link to a bookmark of this document
    pub fn add_anchor_link(&mut self, text: impl Into<String>, anchor: impl Into<String>) -> &mut Run {
        let mut run = Run::with_text(text);
        run.style(HYPERLINK_STYLE);
        self.paragraph.push_hyperlink(Hyperlink::internal(anchor, run))
    }

    /// Append a run holding a single tab
    pub fn add_tab(&mut self) -> &mut Run {
        let mut run = Run::new();
        run.add_tab();
        self.paragraph.push_run(run)
    }

    /// Append a run holding a single line break
    pub fn add_line_break(&mut self) -> &mut Run {
        let mut run = Run::new();
        run.add_break();
        self.paragraph.push_run(run)
    }

    /// Embed an image flowing with the text
    ///
    /// Fails with `BadImage` before anything is allocated when the bytes are
    /// not a supported image.
    pub fn add_inline_drawing(&mut self, bytes: Vec<u8>) -> Result<&mut Run> {
        let (extent, doc_pr, graphic) = self.picture(bytes)?;
        Ok(self.push_drawing(Drawing::Inline(Inline::new(extent, doc_pr, graphic))))
    }

    /// Embed an image anchored at the current paragraph
    pub fn add_anchor_drawing(&mut self, bytes: Vec<u8>) -> Result<&mut Run> {
        let (extent, doc_pr, graphic) = self.picture(bytes)?;
        Ok(self.push_drawing(Drawing::Anchor(Box::new(Anchor::new(
            extent, doc_pr, graphic,
        )))))
    }

    pub fn add_inline_shape(&mut self, spec: ShapeSpec) -> &mut Run {
        let (extent, doc_pr, graphic) = self.shape(spec);
        self.push_drawing(Drawing::Inline(Inline::new(extent, doc_pr, graphic)))
    }

    pub fn add_anchor_shape(&mut self, spec: ShapeSpec) -> &mut Run {
        let (extent, doc_pr, graphic) = self.shape(spec);
        self.push_drawing(Drawing::Anchor(Box::new(Anchor::new(
            extent, doc_pr, graphic,
        ))))
    }

    /// Append a drawing canvas of the given size
    pub fn add_canvas(&mut self, canvas: Canvas, extent: Extent) -> &mut Run {
        let doc_pr = self.named_doc_pr("Canvas");
        self.push_drawing(Drawing::Inline(Inline::new(
            extent,
            doc_pr,
            GraphicData::Canvas(canvas),
        )))
    }

    /// Append a shape group of the given size
    pub fn add_group(&mut self, group: Group, extent: Extent) -> &mut Run {
        let doc_pr = self.named_doc_pr("Group");
        self.push_drawing(Drawing::Inline(Inline::new(
            extent,
            doc_pr,
            GraphicData::Group(group),
        )))
    }

    fn picture(&self, bytes: Vec<u8>) -> Result<(Extent, NonVisualProps, GraphicData)> {
        let placed = self.resources.add_image(bytes)?;
        let extent = placed.info.display_extent();
        let id = self.resources.ids.alloc_doc_pr_id();
        let picture = Picture::new(0, placed.name, placed.rel_id, extent);
        Ok((
            extent,
            NonVisualProps::new(id, format!("Picture {id}")),
            GraphicData::Picture(picture),
        ))
    }

    fn shape(&self, spec: ShapeSpec) -> (Extent, NonVisualProps, GraphicData) {
        let extent = spec.extent();
        let doc_pr = self.named_doc_pr(&spec.name);
        (extent, doc_pr, GraphicData::Shape(spec.into_shape()))
    }

    fn named_doc_pr(&self, name: &str) -> NonVisualProps {
        let id = self.resources.ids.alloc_doc_pr_id();
        let n = self.resources.ids.next_shape_id(name);
        NonVisualProps::new(id, format!("{name} {n}"))
    }

    fn push_drawing(&mut self, drawing: Drawing) -> &mut Run {
        self.paragraph.push_run(Run {
            children: vec![RunChild::Drawing(drawing)],
            ..Run::default()
        })
    }
}

/// Mutable handle on a table
#[derive(Debug)]
pub struct TableMut<'a> {
    table: &'a mut Table,
    resources: &'a Resources,
}

impl<'a> TableMut<'a> {
    pub(crate) fn new(table: &'a mut Table, resources: &'a Resources) -> Self {
        Self { table, resources }
    }

    pub fn table(&self) -> &Table {
        &*self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    /// Handle on the cell at (`row`, `col`), `None` when out of range
    pub fn cell(&mut self, row: usize, col: usize) -> Option<CellMut<'_>> {
        let resources = self.resources;
        self.table
            .cell_mut(row, col)
            .map(|cell| CellMut::new(cell, resources))
    }

    /// Handles on every cell in row-major order, each tagged with its position
    ///
    /// The handles borrow disjoint cells and can be filled from different
    /// threads.
    pub fn cells_mut(&mut self) -> Vec<((usize, usize), CellMut<'_>)> {
        let resources = self.resources;
        self.table
            .rows
            .iter_mut()
            .enumerate()
            .flat_map(|(r, row)| {
                row.cells
                    .iter_mut()
                    .enumerate()
                    .map(move |(c, cell)| ((r, c), CellMut::new(cell, resources)))
            })
            .collect()
    }

    pub fn set_borders(&mut self, borders: Borders) -> &mut Self {
        self.table.set_borders(borders);
        self
    }

    pub fn set_width(&mut self, width: TableWidth) -> &mut Self {
        self.table.set_width(width);
        self
    }

    /// Width of one column in twips
    pub fn set_column_width(&mut self, col: usize, twips: u32) -> &mut Self {
        self.table.set_column_width(col, twips);
        self
    }

    pub fn set_justification(&mut self, justification: Justification) -> &mut Self {
        self.table.set_justification(justification);
        self
    }
}

/// Mutable handle on a table cell
#[derive(Debug)]
pub struct CellMut<'a> {
    cell: &'a mut TableCell,
    resources: &'a Resources,
}

impl<'a> CellMut<'a> {
    fn new(cell: &'a mut TableCell, resources: &'a Resources) -> Self {
        Self { cell, resources }
    }

    pub fn cell(&self) -> &TableCell {
        &*self.cell
    }

    /// Append an empty paragraph to the cell
    pub fn add_paragraph(&mut self) -> ParagraphMut<'_> {
        self.cell.paragraphs.push(Paragraph::new());
        let resources = self.resources;
        let index = self.cell.paragraphs.len() - 1;
        ParagraphMut::new(&mut self.cell.paragraphs[index], resources)
    }

    /// Handle on the `n`th paragraph of the cell
    pub fn paragraph(&mut self, n: usize) -> Option<ParagraphMut<'_>> {
        let resources = self.resources;
        self.cell
            .paragraphs
            .get_mut(n)
            .map(|p| ParagraphMut::new(p, resources))
    }

    pub fn set_width(&mut self, width: TableWidth) -> &mut Self {
        self.cell.properties_mut().width = Some(width);
        self
    }

    pub fn set_borders(&mut self, borders: Borders) -> &mut Self {
        self.cell.properties_mut().borders = Some(borders);
        self
    }

    pub fn set_shading(&mut self, shading: Shading) -> &mut Self {
        self.cell.properties_mut().shading = Some(shading);
        self
    }

    pub fn set_vertical_alignment(&mut self, align: VerticalAlignment) -> &mut Self {
        self.cell.properties_mut().v_align = Some(align);
        self
    }

    pub fn text(&self) -> String {
        self.cell.text()
    }
}
