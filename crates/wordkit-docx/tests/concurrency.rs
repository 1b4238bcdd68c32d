//! Building one document from several threads

use std::collections::HashSet;
use std::io::Cursor;
use std::thread;

use image::{ImageFormat, RgbImage};
use wordkit_docx::{Docx, Relationships};

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_cells_filled_in_parallel() {
    let mut docx = Docx::default();
    {
        let mut table = docx.add_table(3, 4);
        let cells = table.cells_mut();
        assert_eq!(cells.len(), 12);

        thread::scope(|s| {
            for ((row, col), mut cell) in cells {
                s.spawn(move || {
                    cell.add_paragraph().add_text(format!("{row},{col}"));
                    let mut p = cell.add_paragraph();
                    p.add_link("ref", &format!("https://example.com/{row}/{col}"));
                    p.add_inline_drawing(png(row as u32 + 1, col as u32 + 1))
                        .unwrap();
                });
            }
        });
    }

    let table = docx.document().tables().next().unwrap();
    for (r, row) in table.rows.iter().enumerate() {
        for (c, cell) in row.cells.iter().enumerate() {
            assert_eq!(cell.paragraphs.len(), 2);
            assert_eq!(cell.paragraphs[0].text(), format!("{r},{c}"));
        }
    }

    let resources = docx.resources();
    let rels = resources.relationships.snapshot();
    assert_eq!(rels.len(), 5 + 24);
    let ids: HashSet<&str> = rels.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), rels.len());

    let images = resources.relationships.of_type(Relationships::TYPE_IMAGE);
    assert_eq!(images.len(), 12);
    assert_eq!(resources.media.len(), 12);
    for rel in &images {
        assert!(resources.media.contains(rel.target.trim_start_matches("media/")));
    }

    let doc_pr_ids: HashSet<u32> = docx
        .document()
        .drawings()
        .iter()
        .map(|d| d.doc_pr().id)
        .collect();
    assert_eq!(doc_pr_ids.len(), 12);

    let parsed = Docx::from_bytes(&docx.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed.document(), docx.document());
}

#[test]
fn test_shared_resources_allocate_unique_ids() {
    let docx = Docx::default();
    let resources = docx.resources();

    let allocated: Vec<String> = thread::scope(|s| {
        let workers: Vec<_> = (0..8)
            .map(|t| {
                s.spawn(move || {
                    (0..50)
                        .map(|n| resources.add_link_relationship(&format!("https://example.com/{t}/{n}")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect()
    });

    let unique: HashSet<&String> = allocated.iter().collect();
    assert_eq!(unique.len(), 400);
    assert_eq!(resources.relationships.len(), 405);
    assert_eq!(resources.relationships.max_id(), 405);
    for id in &allocated {
        assert!(resources.resolve_target(id).unwrap().starts_with("https://example.com/"));
    }
}

#[test]
fn test_shape_numbers_unique_across_threads() {
    let docx = Docx::default();
    let ids = &docx.resources().ids;

    let numbers: Vec<u32> = thread::scope(|s| {
        let workers: Vec<_> = (0..4)
            .map(|_| s.spawn(|| (0..25).map(|_| ids.next_shape_id("Rectangle")).collect::<Vec<_>>()))
            .collect();
        workers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect()
    });

    let unique: HashSet<u32> = numbers.iter().copied().collect();
    assert_eq!(unique.len(), 100);
    assert_eq!(unique.iter().max(), Some(&100));
}
