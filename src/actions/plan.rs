//! Action planning
//!
//! Maps an action kind, an icon and its download options to the ordered
//! list of side effects the dispatcher must perform. Planning is pure: it
//! reads no files and makes no requests, so the handler table can be
//! inspected and tested on its own.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::notify::Toast;
use crate::api::resolve_download_link;
use crate::icon::{DownloadOptions, IconRecord};

/// User-triggered actions offered for an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    View,
    OpenInBrowser,
    CopySvg,
    CopyImageUrl,
    DownloadSvg,
    DownloadRaster,
}

impl ActionKind {
    /// Command-line token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::OpenInBrowser => "open",
            Self::CopySvg => "copy-svg",
            Self::CopyImageUrl => "copy-url",
            Self::DownloadSvg => "download-svg",
            Self::DownloadRaster => "download",
        }
    }

    /// Menu title; raster downloads name their format
    pub fn title(&self, options: &DownloadOptions) -> String {
        match self {
            Self::View => "View Icon".to_string(),
            Self::OpenInBrowser => "Open in Browser".to_string(),
            Self::CopySvg => "Copy SVG Code".to_string(),
            Self::CopyImageUrl => "Copy Image URL".to_string(),
            Self::DownloadSvg => "Download SVG Icon".to_string(),
            Self::DownloadRaster => format!("Download {} Icon", options.format.display_name()),
        }
    }

    pub fn all() -> &'static [ActionKind] {
        &[
            Self::View,
            Self::OpenInBrowser,
            Self::DownloadSvg,
            Self::DownloadRaster,
            Self::CopySvg,
            Self::CopyImageUrl,
        ]
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}

/// One side effect in an action's plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Check the destination directory before doing any work
    ValidateDestination,
    /// Resolve the SVG; when not `required`, failure is logged and ignored
    FetchDetail { required: bool },
    OpenUrl(String),
    /// Copy the (resolved) SVG markup
    CopySvg,
    CopyText(String),
    /// Write the resolved SVG to this file
    WriteSvg(PathBuf),
    /// Download the asset fully into memory
    FetchAsset(String),
    /// Write the downloaded asset to this file
    WriteAsset(PathBuf),
}

/// Everything the dispatcher needs to run one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    pub kind: ActionKind,
    /// Shown before the first step, if any
    pub pending: Option<Toast>,
    pub steps: Vec<Step>,
    /// Shown when every step succeeded
    pub success: Option<Toast>,
    /// Title of the failure toast
    pub failure_title: String,
    /// File written on success
    pub target: Option<PathBuf>,
}

/// Build the plan for `kind` on `icon`
///
/// Detail is only fetched for icons that do not already carry their SVG.
pub fn plan(
    kind: ActionKind,
    icon: &IconRecord,
    options: &DownloadOptions,
    asset_base_url: &str,
) -> ActionPlan {
    let meta = icon.meta();
    let needs_detail = !icon.is_detailed();

    let mut plan = ActionPlan {
        kind,
        pending: None,
        steps: Vec::new(),
        success: None,
        failure_title: format!("{} Failed", kind.title(options)),
        target: None,
    };

    match kind {
        ActionKind::View => {
            if needs_detail {
                plan.steps.push(Step::FetchDetail { required: false });
            }
        }
        ActionKind::OpenInBrowser => {
            plan.steps.push(Step::OpenUrl(meta.link.clone()));
        }
        ActionKind::CopySvg => {
            if needs_detail {
                plan.pending = Some(Toast::animated("Getting SVG Code..."));
                plan.steps.push(Step::FetchDetail { required: true });
            }
            plan.steps.push(Step::CopySvg);
            plan.success = Some(Toast::success("Copied SVG Code"));
            plan.failure_title = "Copy SVG Code Failed".to_string();
        }
        ActionKind::CopyImageUrl => {
            plan.steps.push(Step::CopyText(meta.url.clone()));
            plan.success = Some(Toast::success("Copied Image URL"));
            plan.failure_title = "Copy Image URL Failed".to_string();
        }
        ActionKind::DownloadSvg => {
            let target = options.target_file(meta.file_stem(), "svg");
            plan.pending = Some(Toast::animated("Downloading SVG Icon ..."));
            plan.steps.push(Step::ValidateDestination);
            if needs_detail {
                plan.steps.push(Step::FetchDetail { required: true });
            }
            plan.steps.push(Step::WriteSvg(target.clone()));
            plan.success = Some(Toast::success("SVG Icon Downloaded").with_file_actions(&target));
            plan.failure_title = "SVG Icon Download Failed".to_string();
            plan.target = Some(target);
        }
        ActionKind::DownloadRaster => {
            let format_name = options.format.display_name();
            let target = options.target_file(meta.file_stem(), options.format.as_str());
            plan.pending = Some(Toast::animated(format!("Downloading {} Icon ...", format_name)));
            plan.steps.push(Step::ValidateDestination);
            plan.steps.push(Step::FetchAsset(resolve_download_link(asset_base_url, meta, options)));
            plan.steps.push(Step::WriteAsset(target.clone()));
            plan.success = Some(
                Toast::success(format!("{} Icon Downloaded", format_name)).with_file_actions(&target),
            );
            plan.failure_title = format!("{} Icon Download Failed", format_name);
            plan.target = Some(target);
        }
    }

    plan
}
