use std::num::ParseFloatError;
use std::str::Utf8Error;
use thiserror::Error;

/// Why an analysis failed.
///
/// Only input that cannot be read at all ends up here. Documents without tracks, points without
/// elevation or time, and single-point tracks all produce a (zeroed) result instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed input: {0}")]
    MalformedInput(#[from] Malformed),

    #[error("not a GPX document: root element is <{root}>")]
    NotAGpxDocument { root: String },
}

/// The underlying reason for [`Error::MalformedInput`].
#[derive(Debug, Error)]
pub enum Malformed {
    #[error("input is not valid UTF-8")]
    Utf8(#[source] Utf8Error),

    #[error("XML syntax error")]
    Xml(#[source] roxmltree::Error),

    #[error("GPX root element <{0}> has a namespace prefix, which is not supported")]
    PrefixedRoot(String),

    #[error("invalid GPX structure")]
    Structure(#[source] strong_xml::XmlError),

    #[error("invalid {field} {value:?}")]
    Number {
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("{field} {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },
}
