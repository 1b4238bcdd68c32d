//! End-to-end build, write and parse scenarios

use std::io::{Cursor, Write};

use image::{ImageFormat, Rgb, RgbImage};
use wordkit_docx::units::A4_EMU_MAX_WIDTH;
use wordkit_docx::{
    BodyItem, Docx, DocxError, HyperlinkTarget, OoxmlArchive, PageSize, ParagraphChild,
    Relationships,
};
use zip::write::SimpleFileOptions;

fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 200]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

fn reparse(docx: &Docx) -> Docx {
    Docx::from_bytes(&docx.to_bytes().unwrap()).unwrap()
}

fn zip_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

mod text {
    use super::*;

    #[test]
    fn test_single_paragraph_round_trip() {
        let mut docx = Docx::new(PageSize::A4);
        docx.add_paragraph().add_text("hello");

        let parsed = reparse(&docx);
        let paragraphs: Vec<_> = parsed.document().paragraphs().collect();
        assert_eq!(paragraphs.len(), 1);

        let runs: Vec<_> = paragraphs[0].runs().collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "hello");
        assert!(parsed.document().section().is_some());
    }

    #[test]
    fn test_formatting_survives_round_trip() {
        let mut docx = Docx::default();
        docx.add_paragraph()
            .add_text("Title")
            .bold()
            .italic()
            .size(32)
            .color("FF0000");

        let parsed = reparse(&docx);
        let paragraph = parsed.document().paragraphs().next().unwrap();
        let run = paragraph.runs().next().unwrap();
        let props = run.properties.as_ref().unwrap();
        assert_eq!(props.bold, Some(true));
        assert_eq!(props.italic, Some(true));
        assert_eq!(props.size, Some(32));
        assert_eq!(props.color.as_ref().unwrap().as_str(), "FF0000");
    }

    #[test]
    fn test_tabs_and_breaks_in_plain_text() {
        let mut docx = Docx::default();
        let mut p = docx.add_paragraph();
        p.add_text("a");
        p.add_tab();
        p.add_text("b");
        p.add_line_break();
        p.add_text("c");

        assert_eq!(reparse(&docx).plain_text(), "a\tb\nc\n");
    }
}

mod hyperlinks {
    use super::*;

    #[test]
    fn test_external_link_resolves_after_parse() {
        let mut docx = Docx::new(PageSize::A4);
        docx.add_paragraph().add_link("ex", "http://example.com");

        let parsed = reparse(&docx);
        let paragraph = parsed.document().paragraphs().next().unwrap();
        let link = paragraph.hyperlinks().next().unwrap();
        let id = link.rel_id().unwrap();
        assert_eq!(parsed.resolve_target(id).unwrap(), "http://example.com");
        assert_eq!(paragraph.text(), "ex");
    }

    #[test]
    fn test_anchor_link_has_no_relationship() {
        let mut docx = Docx::default();
        docx.add_paragraph().add_anchor_link("see below", "_Toc1");

        let parsed = reparse(&docx);
        let paragraph = parsed.document().paragraphs().next().unwrap();
        let link = paragraph.hyperlinks().next().unwrap();
        assert_eq!(link.target, HyperlinkTarget::Anchor("_Toc1".to_string()));
        assert!(parsed
            .resources()
            .relationships
            .of_type(Relationships::TYPE_HYPERLINK)
            .is_empty());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let docx = Docx::default();
        assert!(matches!(
            docx.resolve_target("rId99"),
            Err(DocxError::RefIdNotFound(id)) if id == "rId99"
        ));
    }
}

mod drawings {
    use super::*;

    #[test]
    fn test_two_inline_drawings_in_one_paragraph() {
        let mut docx = Docx::new(PageSize::A4);
        let mut p = docx.add_paragraph();
        p.add_inline_drawing(image_bytes(600, 300, ImageFormat::Png))
            .unwrap();
        p.add_inline_drawing(image_bytes(40, 40, ImageFormat::Jpeg))
            .unwrap();

        let ids: Vec<u32> = docx
            .document()
            .drawings()
            .iter()
            .map(|d| d.doc_pr().id)
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);

        let resources = docx.resources();
        let images = resources.relationships.of_type(Relationships::TYPE_IMAGE);
        assert_eq!(images.len(), 2);
        for rel in &images {
            let basename = rel.target.rsplit('/').next().unwrap();
            assert!(resources.media.contains(basename), "{} has no media", rel.target);
        }
        assert_eq!(resources.media.names(), vec!["image1.png", "image2.jpeg"]);
    }

    #[test]
    fn test_drawing_extents_follow_aspect_ratio() {
        let mut docx = Docx::default();
        let mut p = docx.add_paragraph();
        p.add_inline_drawing(image_bytes(600, 300, ImageFormat::Png))
            .unwrap();
        p.add_inline_drawing(image_bytes(300, 600, ImageFormat::Png))
            .unwrap();

        let drawings = docx.document().drawings();
        let wide = drawings[0].extent();
        assert_eq!(wide.cx, A4_EMU_MAX_WIDTH);
        assert_eq!(wide.cy, A4_EMU_MAX_WIDTH / 2);

        let tall = drawings[1].extent();
        assert_eq!(tall.cx, A4_EMU_MAX_WIDTH / 2);
        assert_eq!(tall.cy, A4_EMU_MAX_WIDTH);
    }

    #[test]
    fn test_media_written_and_read_back() {
        let png = image_bytes(20, 10, ImageFormat::Png);
        let mut docx = Docx::default();
        docx.add_paragraph()
            .add_inline_drawing(png.clone())
            .unwrap();

        let bytes = docx.to_bytes().unwrap();
        let archive = OoxmlArchive::from_bytes(&bytes).unwrap();
        assert_eq!(archive.get("word/media/image1.png").unwrap(), png.as_slice());

        let parsed = Docx::from_bytes(&bytes).unwrap();
        let drawings = parsed.document().drawings();
        let picture = drawings[0].picture().unwrap();
        assert_eq!(
            parsed.resolve_target(&picture.embed).unwrap(),
            "media/image1.png"
        );
        assert_eq!(parsed.resources().media.get("image1.png").unwrap(), png);
    }

    #[test]
    fn test_gif_extension_declared_in_content_types() {
        let mut docx = Docx::default();
        docx.add_paragraph()
            .add_inline_drawing(image_bytes(8, 8, ImageFormat::Gif))
            .unwrap();

        let archive = OoxmlArchive::from_bytes(&docx.to_bytes().unwrap()).unwrap();
        let types = std::str::from_utf8(archive.get("[Content_Types].xml").unwrap()).unwrap();
        assert!(types.contains(r#"Extension="gif""#));
        assert!(types.contains("image/gif"));
    }

    #[test]
    fn test_bad_image_leaves_document_untouched() {
        let mut docx = Docx::default();
        let mut p = docx.add_paragraph();
        let result = p.add_inline_drawing(b"not an image".to_vec());
        assert!(matches!(result, Err(DocxError::BadImage(_))));
        assert!(p.paragraph().children.is_empty());
        assert!(docx.resources().media.is_empty());
        assert_eq!(docx.resources().relationships.len(), 5);
    }
}

mod tables {
    use super::*;

    #[test]
    fn test_four_by_three_table_round_trip() {
        let mut docx = Docx::new(PageSize::A4);
        {
            let mut table = docx.add_table(4, 3);
            table.cell(0, 0).unwrap().add_paragraph().add_text("A");
        }

        let parsed = reparse(&docx);
        let table = parsed.document().tables().next().unwrap();
        assert_eq!(table.rows.len(), 4);
        for row in &table.rows {
            assert_eq!(row.cells.len(), 3);
        }
        let first = table.cell(0, 0).unwrap();
        let text: String = first.paragraphs[0].runs().map(|r| r.text()).collect();
        assert_eq!(text, "A");
    }

    #[test]
    fn test_out_of_range_cell() {
        let mut docx = Docx::default();
        let mut table = docx.add_table(2, 2);
        assert!(table.cell(2, 0).is_none());
        assert!(table.cell(0, 2).is_none());
    }

    #[test]
    fn test_table_with_dimensions_round_trip() {
        let mut docx = Docx::default();
        docx.add_table_with_dimensions(&[400, 800], &[2000, 3000]);

        let parsed = reparse(&docx);
        let table = parsed.document().tables().next().unwrap();
        let widths: Vec<_> = table.grid.iter().map(|g| g.width).collect();
        assert_eq!(widths, vec![Some(2000), Some(3000)]);
        assert_eq!(table, docx.document().tables().next().unwrap());
    }
}

mod foreign_markup {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:x="urn:example:extension">
  <w:body>
    <x:banner x:level="3"><x:title>dropped</x:title></x:banner>
    <w:p>
      <x:marker/>
      <w:r><x:sparkle x:size="2"/><w:t>kept</w:t></w:r>
      <x:note>also dropped</x:note>
    </w:p>
    <w:p><x:marker/></w:p>
    <w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>
  </w:body>
</w:document>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#;

    #[test]
    fn test_unknown_elements_are_skipped() {
        let bytes = zip_parts(&[
            ("word/document.xml", DOCUMENT),
            ("word/_rels/document.xml.rels", RELS),
        ]);
        let docx = Docx::from_bytes(&bytes).unwrap();

        let items = &docx.document().body.items;
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], BodyItem::Paragraph(_)));
        assert!(matches!(items[1], BodyItem::SectPr(_)));
        assert_eq!(docx.plain_text(), "kept\n");

        let written = OoxmlArchive::from_bytes(&docx.to_bytes().unwrap()).unwrap();
        let xml = std::str::from_utf8(written.get("word/document.xml").unwrap()).unwrap();
        for foreign in ["urn:example:extension", "<x:", "banner", "sparkle", "dropped"] {
            assert!(!xml.contains(foreign), "{foreign} leaked into output");
        }
        assert!(xml.contains("<w:t>kept</w:t>"));
    }

    #[test]
    fn test_parsed_paragraphs_are_never_empty() {
        let bytes = zip_parts(&[
            ("word/document.xml", DOCUMENT),
            ("word/_rels/document.xml.rels", RELS),
        ]);
        let docx = Docx::from_bytes(&bytes).unwrap();
        for paragraph in docx.document().all_paragraphs() {
            assert!(!paragraph.children.is_empty());
        }
    }

    #[test]
    fn test_missing_document_part() {
        let bytes = zip_parts(&[("word/_rels/document.xml.rels", RELS)]);
        assert!(matches!(
            Docx::from_bytes(&bytes),
            Err(DocxError::MissingPart(_))
        ));
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            Docx::from_bytes(b"plain text"),
            Err(DocxError::Archive(_))
        ));
    }
}

mod determinism {
    use super::*;

    fn sample() -> Docx {
        let mut docx = Docx::new(PageSize::A3);
        docx.add_paragraph().add_text("intro").bold();
        docx.add_paragraph().add_link("site", "https://example.org");
        docx.add_paragraph()
            .add_inline_drawing(image_bytes(30, 20, ImageFormat::Png))
            .unwrap();
        docx.add_table(2, 2)
            .cell(1, 0)
            .unwrap()
            .add_paragraph()
            .add_text("cell");
        docx
    }

    #[test]
    fn test_serialize_twice_parses_equal() {
        let docx = sample();
        let first = Docx::from_bytes(&docx.to_bytes().unwrap()).unwrap();
        let second = Docx::from_bytes(&docx.to_bytes().unwrap()).unwrap();
        assert_eq!(first.document(), second.document());
        assert_eq!(
            first.resources().relationships.snapshot(),
            second.resources().relationships.snapshot()
        );
        assert_eq!(first.document(), docx.document());
    }

    #[test]
    fn test_rewrite_of_parsed_package_is_identical() {
        let bytes = sample().to_bytes().unwrap();
        let again = Docx::from_bytes(&bytes).unwrap().to_bytes().unwrap();
        assert_eq!(bytes, again);
    }

    #[test]
    fn test_editing_parsed_document_continues_ids() {
        let bytes = sample().to_bytes().unwrap();
        let mut docx = Docx::from_bytes(&bytes).unwrap();
        let before: Vec<String> = docx
            .resources()
            .relationships
            .snapshot()
            .into_iter()
            .map(|r| r.id)
            .collect();

        let mut p = docx.add_paragraph();
        p.add_link("more", "https://example.net");
        p.add_inline_drawing(image_bytes(10, 10, ImageFormat::Png))
            .unwrap();

        let rels = docx.resources().relationships.snapshot();
        let mut ids: Vec<&str> = rels.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), before.len() + 2);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before.len() + 2);
        assert!(docx.resources().media.contains("image2.png"));

        let doc_pr_ids: Vec<u32> = docx
            .document()
            .drawings()
            .iter()
            .map(|d| d.doc_pr().id)
            .collect();
        assert!(doc_pr_ids[0] < doc_pr_ids[1]);
    }

    #[test]
    fn test_paragraph_children_keep_order() {
        let docx = reparse(&sample());
        let paragraph = docx.document().paragraphs().nth(1).unwrap();
        assert!(matches!(paragraph.children[0], ParagraphChild::Hyperlink(_)));
    }
}
