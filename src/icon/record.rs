//! Icon records
//!
//! An icon is either a summary (metadata only, as returned by search) or
//! detailed (metadata plus its resolved SVG markup).

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when markup is not a complete SVG document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SvgError {
    #[error("SVG markup is empty")]
    Empty,

    #[error("Root element is <{0}>, expected <svg>")]
    WrongRoot(String),

    #[error("Content found after the closing </svg> tag")]
    TrailingContent,

    #[error("Document ended before </svg>")]
    Unterminated,

    #[error("Malformed XML: {0}")]
    Malformed(String),
}

/// A complete, well-formed SVG document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Svg(String);

impl Svg {
    /// Validate markup and wrap it
    pub fn parse(markup: impl Into<String>) -> Result<Self, SvgError> {
        let markup = markup.into();
        check_svg_document(&markup)?;
        Ok(Self(markup))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Svg {
    type Error = SvgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Svg::parse(value)
    }
}

impl From<Svg> for String {
    fn from(svg: Svg) -> Self {
        svg.0
    }
}

/// Walk the document once, requiring a single `<svg>` root that is closed
fn check_svg_document(markup: &str) -> Result<(), SvgError> {
    if markup.trim().is_empty() {
        return Err(SvgError::Empty);
    }

    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut root_seen = false;
    let mut root_closed = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SvgError::Malformed(e.to_string()))?;

        match event {
            Event::Start(ref tag) | Event::Empty(ref tag) => {
                if root_closed {
                    return Err(SvgError::TrailingContent);
                }
                if !root_seen {
                    let name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();
                    if !name.eq_ignore_ascii_case("svg") {
                        return Err(SvgError::WrongRoot(name));
                    }
                    root_seen = true;
                }
                if matches!(event, Event::Start(_)) {
                    depth += 1;
                } else if depth == 0 {
                    root_closed = true;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(ref text) => {
                if (root_closed || !root_seen) && !text.is_empty() {
                    return Err(SvgError::TrailingContent);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(SvgError::Empty);
    }
    if !root_closed {
        return Err(SvgError::Unterminated);
    }
    Ok(())
}

/// Metadata shared by every icon, resolved or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconMeta {
    /// Stable Icons8 identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Canonical web page for the icon
    pub link: String,
    /// Direct preview image URL
    pub url: String,
    /// File name override used when saving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_name: Option<String>,
    /// Icons8 style/platform token (e.g. "ios", "fluency")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Multi-color icons ignore color overrides
    #[serde(default)]
    pub is_color: bool,
}

impl IconMeta {
    /// Base file name used on save: `download_name` if set, else `name`
    pub fn file_stem(&self) -> &str {
        match self.download_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.name,
        }
    }
}

/// Flat wire/storage shape: metadata with an optional `svg` field
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredIcon {
    #[serde(flatten)]
    meta: IconMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    svg: Option<Svg>,
}

/// An icon whose SVG detail may or may not have been resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredIcon", into = "StoredIcon")]
pub enum IconRecord {
    Summary(IconMeta),
    Detailed { meta: IconMeta, svg: Svg },
}

impl IconRecord {
    pub fn meta(&self) -> &IconMeta {
        match self {
            Self::Summary(meta) => meta,
            Self::Detailed { meta, .. } => meta,
        }
    }

    pub fn svg(&self) -> Option<&Svg> {
        match self {
            Self::Summary(_) => None,
            Self::Detailed { svg, .. } => Some(svg),
        }
    }

    pub fn is_detailed(&self) -> bool {
        matches!(self, Self::Detailed { .. })
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    /// Attach resolved markup, keeping every other field
    pub fn with_svg(self, svg: Svg) -> Self {
        Self::Detailed {
            meta: self.into_meta(),
            svg,
        }
    }

    pub fn into_meta(self) -> IconMeta {
        match self {
            Self::Summary(meta) => meta,
            Self::Detailed { meta, .. } => meta,
        }
    }
}

impl From<StoredIcon> for IconRecord {
    fn from(stored: StoredIcon) -> Self {
        match stored.svg {
            Some(svg) => Self::Detailed {
                meta: stored.meta,
                svg,
            },
            None => Self::Summary(stored.meta),
        }
    }
}

impl From<IconRecord> for StoredIcon {
    fn from(record: IconRecord) -> Self {
        match record {
            IconRecord::Summary(meta) => StoredIcon { meta, svg: None },
            IconRecord::Detailed { meta, svg } => StoredIcon {
                meta,
                svg: Some(svg),
            },
        }
    }
}
