//! Icon data model
//!
//! Icon records as returned by the Icons8 API and the options that shape a
//! single copy or download.

mod options;
mod record;

pub use options::{Color, DownloadOptions, ImageFormat, OptionsError, DEFAULT_SIZE};
pub use record::{IconMeta, IconRecord, Svg, SvgError};
