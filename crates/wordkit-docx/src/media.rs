//! Media table: the raw bytes stored under `word/media/`

use std::collections::HashMap;

use parking_lot::Mutex;

/// One media part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    /// File name inside `word/media/`, e.g. `image1.png`
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default, Clone)]
struct MediaInner {
    entries: Vec<MediaEntry>,
    index: HashMap<String, usize>,
}

/// Ordered media parts with a name index, internally synchronized
#[derive(Debug, Default)]
pub struct Media {
    inner: Mutex<MediaInner>,
}

impl Media {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a media part; an existing part of the same name is replaced in place
    pub fn insert(&self, name: impl Into<String>, bytes: Vec<u8>) {
        let name = name.into();
        let mut inner = self.inner.lock();
        let existing = inner.index.get(&name).copied();
        if let Some(pos) = existing {
            inner.entries[pos].bytes = bytes;
            return;
        }
        let pos = inner.entries.len();
        inner.index.insert(name.clone(), pos);
        inner.entries.push(MediaEntry { name, bytes });
    }

    /// Bytes of a media part
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        let inner = self.inner.lock();
        inner
            .index
            .get(name)
            .map(|&pos| inner.entries[pos].bytes.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().index.contains_key(name)
    }

    /// Part names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.inner
            .lock()
            .entries
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Run `f` over the entries while holding the lock
    pub fn with_entries<R>(&self, f: impl FnOnce(&[MediaEntry]) -> R) -> R {
        f(&self.inner.lock().entries)
    }

    /// Distinct lower-case file extensions, in first-seen order
    pub fn extensions(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for entry in &self.inner.lock().entries {
            if let Some((_, ext)) = entry.name.rsplit_once('.') {
                let ext = ext.to_ascii_lowercase();
                if !out.contains(&ext) {
                    out.push(ext);
                }
            }
        }
        out
    }

    /// Highest `N` among parts named `image<N>.<ext>`, 0 when none
    pub fn max_image_id(&self) -> u32 {
        self.inner
            .lock()
            .entries
            .iter()
            .filter_map(|entry| image_number(&entry.name))
            .max()
            .unwrap_or(0)
    }
}

impl Clone for Media {
    fn clone(&self) -> Self {
        Self {
            inner: Mutex::new(self.inner.lock().clone()),
        }
    }
}

/// Media part name for an allocated image id
pub fn image_name(id: u32, extension: &str) -> String {
    format!("image{id}.{extension}")
}

fn image_number(name: &str) -> Option<u32> {
    let stem = name.split('.').next()?;
    stem.strip_prefix("image")?.parse().ok()
}
