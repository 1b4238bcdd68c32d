//! Reading and writing the ZIP container
//!
//! Write order is fixed: template parts, the document relationships, the
//! document, then media in insertion order. Entries carry a fixed timestamp
//! so the same tree always produces the same archive.

use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipWriter};

use crate::archive::{OoxmlArchive, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART, MEDIA_DIR};
use crate::config::Compression;
use crate::document::Document;
use crate::error::Result;
use crate::image::content_type_for_extension;
use crate::registry::Resources;
use crate::relationships::Relationships;
use crate::template::{ArchiveTemplate, TemplateSource};

/// Everything recovered from a package
#[derive(Debug)]
pub struct Unpacked {
    pub document: Document,
    pub resources: Resources,
    /// The parts this library does not model, kept for writing back
    pub template: ArchiveTemplate,
}

/// Stream a package into `sink`
pub fn write_package<W: Write + Seek>(
    sink: W,
    template: &dyn TemplateSource,
    document: &Document,
    resources: &Resources,
    compression: Compression,
) -> Result<W> {
    let options = SimpleFileOptions::default()
        .compression_method(compression.method())
        .last_modified_time(DateTime::default());
    let mut zip = ZipWriter::new(sink);

    let extensions = resources.media.extensions();
    for part in template.parts() {
        let mut bytes = template.read_part(&part)?;
        if part == CONTENT_TYPES_PART {
            bytes = declare_extensions(bytes, &extensions);
        }
        zip.start_file(part.as_str(), options)?;
        zip.write_all(&bytes)?;
        log::trace!("wrote template part {part} ({} bytes)", bytes.len());
    }

    zip.start_file(DOCUMENT_RELS_PART, options)?;
    resources.relationships.write_to(&mut zip)?;

    zip.start_file(DOCUMENT_PART, options)?;
    document.write_to(&mut zip)?;

    let media_count = resources.media.with_entries(|entries| -> Result<usize> {
        for entry in entries {
            zip.start_file(format!("{MEDIA_DIR}{}", entry.name), options)?;
            zip.write_all(&entry.bytes)?;
        }
        Ok(entries.len())
    })?;

    let sink = zip.finish()?;
    log::debug!(
        "wrote package from template {:?}: {} relationships, {} media parts",
        template.name(),
        resources.relationships.len(),
        media_count
    );
    Ok(sink)
}

/// Add a `Default` content type for every media extension the part lacks
fn declare_extensions(content_types: Vec<u8>, extensions: &[String]) -> Vec<u8> {
    let text = String::from_utf8_lossy(&content_types).into_owned();
    let lower = text.to_ascii_lowercase();
    let missing: Vec<&String> = extensions
        .iter()
        .filter(|ext| !lower.contains(&format!("extension=\"{ext}\"")))
        .collect();
    if missing.is_empty() {
        return content_types;
    }
    let Some(close) = text.rfind("</Types>") else {
        log::warn!("{CONTENT_TYPES_PART} has no </Types>, media types not declared");
        return content_types;
    };

    let mut patched = String::with_capacity(text.len() + missing.len() * 64);
    patched.push_str(&text[..close]);
    for ext in missing {
        patched.push_str(&format!(
            "<Default Extension=\"{ext}\" ContentType=\"{}\"/>",
            content_type_for_extension(ext)
        ));
    }
    patched.push_str(&text[close..]);
    patched.into_bytes()
}

/// Decode an unpacked archive into a document and its resources
pub fn read_package(name: &str, archive: OoxmlArchive) -> Result<Unpacked> {
    let document = Document::parse(archive.document_xml()?)?;
    let relationships = Relationships::parse(archive.document_rels_xml()?)?;
    let resources = Resources::with_relationships(relationships);

    for (media_name, bytes) in archive.media() {
        resources.media.insert(media_name, bytes.to_vec());
    }
    for rel in resources.relationships.of_type(Relationships::TYPE_IMAGE) {
        if rel.target_mode.is_some() {
            continue;
        }
        let basename = rel.target.rsplit('/').next().unwrap_or(&rel.target);
        if !resources.media.contains(basename) {
            log::warn!("relationship {} points at missing media {}", rel.id, rel.target);
        }
    }
    resources.prime_from(&document);

    log::debug!(
        "read package {name:?}: {} body items, {} relationships, {} media parts",
        document.body.len(),
        resources.relationships.len(),
        resources.media.len()
    );
    Ok(Unpacked {
        document,
        resources,
        template: ArchiveTemplate::new(name, archive),
    })
}
