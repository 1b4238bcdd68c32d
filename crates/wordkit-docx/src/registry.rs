//! Identifier allocation and the shared resources behind a document
//!
//! Builder handles only hold a shared reference to [`Resources`], so every
//! container here synchronizes internally: counters are atomics, the
//! relationship list sits behind a read/write lock and the media table and
//! per-name shape counters behind mutexes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;

use crate::document::Document;
use crate::error::Result;
use crate::image::{inspect, ImageInfo};
use crate::media::{image_name, Media};
use crate::relationships::{Relationship, Relationships};

/// Monotonic id counters of one document
///
/// Each counter stores the last value handed out, so the first allocation
/// returns 1.
#[derive(Debug, Default)]
pub struct IdRegistry {
    relationship: AtomicU32,
    image: AtomicU32,
    doc_pr: AtomicU32,
    shapes: Mutex<HashMap<String, u32>>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next `rId<N>`
    pub fn alloc_relationship_id(&self) -> String {
        format!("rId{}", self.relationship.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Next image number, used in media part names
    pub fn alloc_image_id(&self) -> u32 {
        self.image.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Next `wp:docPr/@id`
    pub fn alloc_doc_pr_id(&self) -> u32 {
        self.doc_pr.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Next number for shapes called `name`; each name counts separately
    pub fn next_shape_id(&self, name: &str) -> u32 {
        let mut shapes = self.shapes.lock();
        let counter = shapes.entry(name.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Raise the counters so the next allocations exceed the given values
    pub fn prime(&self, relationship: u32, image: u32, doc_pr: u32) {
        self.relationship.fetch_max(relationship, Ordering::SeqCst);
        self.image.fetch_max(image, Ordering::SeqCst);
        self.doc_pr.fetch_max(doc_pr, Ordering::SeqCst);
    }

    /// Raise the counter of one shape name
    pub fn prime_shape(&self, name: &str, last: u32) {
        let mut shapes = self.shapes.lock();
        let counter = shapes.entry(name.to_string()).or_insert(0);
        *counter = (*counter).max(last);
    }

    /// Last values handed out: (relationship, image, doc_pr)
    pub fn current(&self) -> (u32, u32, u32) {
        (
            self.relationship.load(Ordering::SeqCst),
            self.image.load(Ordering::SeqCst),
            self.doc_pr.load(Ordering::SeqCst),
        )
    }
}

impl Clone for IdRegistry {
    fn clone(&self) -> Self {
        let (relationship, image, doc_pr) = self.current();
        Self {
            relationship: AtomicU32::new(relationship),
            image: AtomicU32::new(image),
            doc_pr: AtomicU32::new(doc_pr),
            shapes: Mutex::new(self.shapes.lock().clone()),
        }
    }
}

/// An image stored in the media table and bound to a relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedImage {
    /// Relationship id for `a:blip/@r:embed`
    pub rel_id: String,
    /// Media part name, e.g. `image1.png`
    pub name: String,
    pub info: ImageInfo,
}

/// Relationships, media and ids shared by every builder handle of a document
#[derive(Debug, Default, Clone)]
pub struct Resources {
    pub ids: IdRegistry,
    pub relationships: Relationships,
    pub media: Media,
}

impl Resources {
    /// Resources seeded with an initial relationship list
    pub fn with_relationships(relationships: Relationships) -> Self {
        let resources = Self {
            relationships,
            ..Self::default()
        };
        resources
            .ids
            .prime(resources.relationships.max_id(), 0, 0);
        resources
    }

    /// Register an external hyperlink target and return its relationship id
    pub fn add_link_relationship(&self, target: &str) -> String {
        let id = self.ids.alloc_relationship_id();
        self.relationships.push(Relationship {
            id: id.clone(),
            rel_type: Relationships::TYPE_HYPERLINK.to_string(),
            target: target.to_string(),
            target_mode: Some("External".to_string()),
        });
        id
    }

    /// Register a media part as an image target and return its relationship id
    pub fn add_image_relationship(&self, media_name: &str) -> String {
        let id = self.ids.alloc_relationship_id();
        self.relationships.push(Relationship {
            id: id.clone(),
            rel_type: Relationships::TYPE_IMAGE.to_string(),
            target: format!("media/{media_name}"),
            target_mode: None,
        });
        id
    }

    /// Inspect image bytes, store them as a new media part and bind a relationship
    ///
    /// Nothing is allocated or stored when the bytes are not a supported image.
    pub fn add_image(&self, bytes: Vec<u8>) -> Result<PlacedImage> {
        let info = inspect(&bytes)?;
        let name = image_name(self.ids.alloc_image_id(), info.kind.extension());
        self.media.insert(name.clone(), bytes);
        let rel_id = self.add_image_relationship(&name);
        log::debug!("stored {} as {} ({}x{})", name, rel_id, info.width, info.height);
        Ok(PlacedImage { rel_id, name, info })
    }

    /// Target of a relationship id
    pub fn resolve_target(&self, id: &str) -> Result<String> {
        self.relationships.resolve_target(id)
    }

    /// Raise every counter above the ids already used by `document`, the
    /// relationship list and the media table
    pub fn prime_from(&self, document: &Document) {
        let mut max_doc_pr = 0;
        for drawing in document.drawings() {
            max_doc_pr = max_doc_pr.max(drawing.max_object_id());
            if let Some((name, n)) = split_numbered_name(&drawing.doc_pr().name) {
                self.ids.prime_shape(name, n);
            }
        }
        self.ids.prime(
            self.relationships.max_id(),
            self.media.max_image_id(),
            max_doc_pr,
        );
        let (relationship, image, doc_pr) = self.ids.current();
        log::debug!(
            "primed id registry: relationship={relationship} image={image} docPr={doc_pr}"
        );
    }
}

/// Split `"<name> <n>"` into its name and number
fn split_numbered_name(name: &str) -> Option<(&str, u32)> {
    let (stem, number) = name.rsplit_once(' ')?;
    Some((stem, number.parse().ok()?))
}
