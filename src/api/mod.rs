//! Icons8 API integration
//!
//! Detail lookup for icons loaded without their SVG, download link
//! resolution and raw asset fetching.

pub mod detail;
pub mod http;
pub mod link;

pub use detail::{apply_color, fetch_detail, ApiError, IconApi, Icons8Client};
pub use http::{AssetFetcher, FetchError, HttpFetcher};
pub use link::resolve_download_link;
