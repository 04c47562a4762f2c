//! Typed model of the subset of GPX 1.0/1.1 that trip statistics need.
//!
//! Every repeatable element is a `Vec` child, so a document with one track, one segment or one
//! point comes out with the same shape as one with many. Elements and attributes not listed
//! here (waypoints, routes, extensions, namespace declarations) are skipped by the reader.

use std::borrow::Cow;
use strong_xml::XmlRead;

use crate::error::{Error, Malformed};

#[derive(Debug, XmlRead)]
#[xml(tag = "gpx")]
pub struct Gpx<'a> {
    #[xml(child = "metadata")]
    pub metadata: Option<Metadata<'a>>,

    #[xml(child = "trk")]
    pub tracks: Vec<Track<'a>>,

    #[xml(attr = "version")]
    pub version: Option<Cow<'a, str>>,

    #[xml(attr = "creator")]
    pub creator: Option<Cow<'a, str>>,
}

impl<'a> Gpx<'a> {
    /// Name from the document metadata, if any.
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.name.as_deref())
    }
}

#[derive(Debug, XmlRead)]
#[xml(tag = "metadata")]
pub struct Metadata<'a> {
    #[xml(flatten_text = "name")]
    pub name: Option<Cow<'a, str>>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "trk")]
pub struct Track<'a> {
    #[xml(flatten_text = "name")]
    pub name: Option<Cow<'a, str>>,

    #[xml(child = "trkseg")]
    pub segments: Vec<Segment<'a>>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "trkseg")]
pub struct Segment<'a> {
    #[xml(child = "trkpt")]
    pub points: Vec<Point<'a>>,
}

#[derive(Debug, XmlRead)]
#[xml(tag = "trkpt")]
pub struct Point<'a> {
    #[xml(flatten_text = "ele")]
    pub elevation: Option<Cow<'a, str>>,

    // Optional in the schema, and some recorders really do leave it out.
    #[xml(flatten_text = "time")]
    pub time: Option<Cow<'a, str>>,

    #[xml(attr = "lat")]
    pub latitude: Cow<'a, str>,

    #[xml(attr = "lon")]
    pub longitude: Cow<'a, str>,
}

/// Parse a GPX document.
///
/// strong-xml is a pull reader: it stops once the root element closes and does not check that
/// the whole text is well-formed. So the text goes through roxmltree first, which rejects any
/// XML syntax error and tells us what the root element actually is.
pub fn parse(text: &str) -> Result<Gpx<'_>, Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options).map_err(Malformed::Xml)?;

    let root = doc.root_element();
    let name = root.tag_name().name();
    if name != "gpx" {
        return Err(Error::NotAGpxDocument {
            root: name.to_owned(),
        });
    }

    // The typed model matches tags literally, so `<g:gpx xmlns:g="...">` can't be read.
    let qualified = text[root.range()]
        .trim_start_matches('<')
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or_default();
    if qualified != "gpx" {
        return Err(Malformed::PrefixedRoot(qualified.to_owned()).into());
    }

    let gpx = Gpx::from_str(text).map_err(Malformed::Structure)?;

    log::debug!(
        "parsed GPX {} from {}: {} tracks",
        gpx.version.as_deref().unwrap_or("<unversioned>"),
        gpx.creator.as_deref().unwrap_or("<unknown creator>"),
        gpx.tracks.len(),
    );

    Ok(gpx)
}
