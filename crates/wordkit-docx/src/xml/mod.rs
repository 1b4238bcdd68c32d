//! XML codec shared by every part of the document tree
//!
//! Node types implement [`ToXml`] and [`FromXml`]. Encoding writes children
//! in a fixed order; decoding accepts any order, matches elements and
//! attributes by local name and skips whatever it does not recognize.

pub mod namespace;
mod reader;
mod writer;

use std::io::Write;

pub use reader::{parse_on_off, Element, XmlNode, XmlReader};
pub use writer::{Attrs, XmlWriter};

use crate::error::Result;

/// Encode a node as XML
pub trait ToXml {
    /// Write this node, including its own start and end tags
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()>;
}

/// Decode a node from XML
pub trait FromXml: Sized {
    /// Build the node from its start tag, consuming everything up to the matching end tag
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self>;
}

impl<T: ToXml> ToXml for Option<T> {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Some(node) => node.write_xml(w),
            None => Ok(()),
        }
    }
}

impl<T: ToXml> ToXml for [T] {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        self.iter().try_for_each(|node| node.write_xml(w))
    }
}

/// Encode a node into a standalone string (no XML declaration)
pub fn to_xml_string<T: ToXml + ?Sized>(node: &T) -> Result<String> {
    let mut w = XmlWriter::new(Vec::new());
    node.write_xml(&mut w)?;
    Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
}

/// Decode a node from a standalone XML fragment whose root is the node itself
pub fn from_xml_str<T: FromXml>(xml: &str) -> Result<T> {
    let mut r = XmlReader::new(xml.as_bytes());
    let root = r.root()?;
    T::read_xml(&mut r, &root)
}
