//! Action execution
//!
//! Runs an [`ActionPlan`] against the collaborators, reports the result
//! through the notifier and records successful actions in the recent-icons
//! history. `run` always completes; failures end up in a toast and in the
//! returned outcome, never in a panic or an `Err`.

use std::cell::Cell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::desktop::{Desktop, DesktopError, SystemDesktop};
use super::notify::{LogNotifier, Notifier, Toast, ToastAction};
use super::plan::{plan, ActionKind, Step};
use crate::api::{fetch_detail, ApiError, AssetFetcher, FetchError, HttpFetcher, IconApi, Icons8Client};
use crate::config::{AppConfig, AppSecrets};
use crate::icon::{DownloadOptions, IconRecord, OptionsError};
use crate::storage::RecentIcons;

/// Lifecycle of one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    InProgress,
    Success,
    Failed,
}

/// Reasons an action can fail
///
/// Fetch and write failures are kept apart so the toast tells the user
/// whether the network or the disk was at fault.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Invalid destination: {0}")]
    Destination(#[from] OptionsError),

    #[error("Could not get SVG code: {0}")]
    Detail(#[from] ApiError),

    #[error("Could not fetch icon: {0}")]
    Fetch(#[from] FetchError),

    #[error("Could not fetch icon: response is not a {expected} image")]
    NotAnImage { expected: String },

    #[error("Could not save {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Nothing was downloaded for {}", .0.display())]
    MissingAsset(PathBuf),

    #[error(transparent)]
    Desktop(#[from] DesktopError),
}

/// Result of running one action
#[derive(Debug)]
pub struct ActionOutcome {
    pub kind: ActionKind,
    pub state: ActionState,
    /// The icon after the action, detailed if detail was resolved
    pub icon: IconRecord,
    /// File written by a successful download
    pub saved_to: Option<PathBuf>,
    pub error: Option<String>,
    /// Background history append, present only on success
    pub history: Option<JoinHandle<()>>,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        self.state == ActionState::Success
    }

    /// Block until the history append (if any) has been written
    pub fn wait_for_history(&mut self) {
        if let Some(handle) = self.history.take() {
            if handle.join().is_err() {
                log::warn!("Recent icon thread panicked");
            }
        }
    }
}

/// Executes icon actions
pub struct Dispatcher {
    api: Box<dyn IconApi>,
    fetcher: Box<dyn AssetFetcher>,
    desktop: Box<dyn Desktop>,
    notifier: Box<dyn Notifier>,
    recent: Arc<RecentIcons>,
    asset_base_url: String,
    state: Cell<ActionState>,
}

/// Working state threaded through a plan's steps
struct Progress {
    icon: IconRecord,
    asset: Option<Vec<u8>>,
}

impl Dispatcher {
    pub fn new(
        api: Box<dyn IconApi>,
        fetcher: Box<dyn AssetFetcher>,
        desktop: Box<dyn Desktop>,
        notifier: Box<dyn Notifier>,
        recent: Arc<RecentIcons>,
        asset_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            fetcher,
            desktop,
            notifier,
            recent,
            asset_base_url: asset_base_url.into(),
            state: Cell::new(ActionState::Idle),
        }
    }

    /// Wire the Icons8 client, HTTP fetcher, system desktop and log notifier
    pub fn from_config(
        config: &AppConfig,
        secrets: &AppSecrets,
        recent: Arc<RecentIcons>,
    ) -> Result<Self, FetchError> {
        if !secrets.icons8.has_credentials() {
            log::warn!("No Icons8 API token configured; SVG detail requests may be rejected");
        }
        Ok(Self::new(
            Box::new(Icons8Client::new(&config.api, secrets.icons8.api_key.clone())?),
            Box::new(HttpFetcher::new(&config.api)?),
            Box::new(SystemDesktop),
            Box::new(LogNotifier),
            recent,
            config.api.asset_base_url.clone(),
        ))
    }

    pub fn recent(&self) -> &Arc<RecentIcons> {
        &self.recent
    }

    /// State of the most recent action, `Idle` before the first run
    pub fn state(&self) -> ActionState {
        self.state.get()
    }

    fn set_state(&self, kind: ActionKind, state: ActionState) {
        log::debug!("{}: {:?} -> {:?}", kind, self.state.get(), state);
        self.state.set(state);
    }

    /// Run `kind` on `icon`
    pub fn run(&self, kind: ActionKind, icon: IconRecord, options: &DownloadOptions) -> ActionOutcome {
        let plan = plan(kind, &icon, options, &self.asset_base_url);
        self.set_state(kind, ActionState::InProgress);

        if let Some(pending) = &plan.pending {
            self.notifier.show(pending);
        }

        let mut progress = Progress {
            icon: icon.clone(),
            asset: None,
        };

        let result = plan
            .steps
            .iter()
            .try_for_each(|step| self.execute(step, options, &mut progress));

        match result {
            Ok(()) => {
                self.set_state(kind, ActionState::Success);
                if let Some(success) = &plan.success {
                    self.notifier.show(success);
                }
                log::info!("{} on {} succeeded", kind, icon.meta().name);
                let history = self.recent.append_in_background(icon);
                ActionOutcome {
                    kind,
                    state: ActionState::Success,
                    icon: progress.icon,
                    saved_to: plan.target,
                    error: None,
                    history: Some(history),
                }
            }
            Err(e) => {
                self.set_state(kind, ActionState::Failed);
                log::error!("{} on {} failed: {}", kind, icon.id(), e);
                self.notifier
                    .show(&Toast::failure(plan.failure_title.as_str()).with_message(e.to_string()));
                ActionOutcome {
                    kind,
                    state: ActionState::Failed,
                    icon: progress.icon,
                    saved_to: None,
                    error: Some(e.to_string()),
                    history: None,
                }
            }
        }
    }

    /// Run a toast follow-up
    pub fn follow_up(&self, action: &ToastAction) -> Result<(), DesktopError> {
        match action {
            ToastAction::OpenFile(path) => self.desktop.open(&path.to_string_lossy()),
            ToastAction::ShowInFolder(path) => self.desktop.show_in_folder(path),
        }
    }

    fn execute(
        &self,
        step: &Step,
        options: &DownloadOptions,
        progress: &mut Progress,
    ) -> Result<(), ActionError> {
        match step {
            Step::ValidateDestination => options.validate()?,
            Step::FetchDetail { required } => {
                match fetch_detail(self.api.as_ref(), progress.icon.clone(), options.color.as_ref()) {
                    Ok(icon) => progress.icon = icon,
                    Err(e) if !required => {
                        log::warn!("Showing {} without SVG detail: {}", progress.icon.id(), e);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Step::OpenUrl(url) => {
                if let Err(e) = self.desktop.open(url) {
                    log::warn!("Could not open {}: {}", url, e);
                }
            }
            Step::CopySvg => {
                let svg = progress
                    .icon
                    .svg()
                    .ok_or_else(|| ApiError::MissingSvg(progress.icon.id().to_string()))?;
                self.desktop.copy_text(svg.as_str())?;
            }
            Step::CopyText(text) => {
                if let Err(e) = self.desktop.copy_text(text) {
                    log::warn!("Could not copy {}: {}", text, e);
                }
            }
            Step::WriteSvg(path) => {
                let svg = progress
                    .icon
                    .svg()
                    .ok_or_else(|| ApiError::MissingSvg(progress.icon.id().to_string()))?;
                write_atomic(path, svg.as_str().as_bytes())?;
            }
            Step::FetchAsset(url) => {
                let bytes = self.fetcher.fetch_bytes(url)?;
                check_image(&bytes, options)?;
                progress.asset = Some(bytes);
            }
            Step::WriteAsset(path) => {
                let bytes = progress
                    .asset
                    .take()
                    .ok_or_else(|| ActionError::MissingAsset(path.clone()))?;
                write_atomic(path, &bytes)?;
            }
        }
        Ok(())
    }
}

/// Reject bodies that are not an image (error pages served with 200)
fn check_image(bytes: &[u8], options: &DownloadOptions) -> Result<(), ActionError> {
    let expected = options.format;
    match image::guess_format(bytes) {
        Ok(found) if found == expected.image_format() => Ok(()),
        Ok(found) => {
            log::warn!("Asked for {} but received {:?}", expected.display_name(), found);
            Ok(())
        }
        Err(_) => Err(ActionError::NotAnImage {
            expected: expected.display_name().to_string(),
        }),
    }
}

/// Write `bytes` to a temp file beside `path`, then rename it into place
///
/// A failed write never leaves a partial file at `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ActionError> {
    let write_error = |source: std::io::Error| ActionError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(bytes).map_err(write_error)?;
    temp.flush().map_err(write_error)?;
    temp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{Color, IconMeta, ImageFormat, Svg};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const BASE: &str = "https://img.icons8.com";
    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="4"/></svg>"#;
    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRfake";

    #[derive(Default)]
    struct Calls {
        detail: AtomicUsize,
        fetch: AtomicUsize,
        fetched_urls: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
        revealed: Mutex<Vec<PathBuf>>,
        clipboard: Mutex<Vec<String>>,
        toasts: Mutex<Vec<Toast>>,
    }

    struct FakeApi {
        calls: Arc<Calls>,
        fail: bool,
    }

    impl IconApi for FakeApi {
        fn get_icon_detail(&self, icon: &IconMeta, _color: Option<&Color>) -> Result<IconRecord, ApiError> {
            self.calls.detail.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ApiError::Http(FetchError::Request("connection refused".to_string())));
            }
            Ok(IconRecord::Summary(icon.clone()).with_svg(Svg::parse(SVG)?))
        }
    }

    struct FakeFetcher {
        calls: Arc<Calls>,
        response: Result<Vec<u8>, u16>,
    }

    impl AssetFetcher for FakeFetcher {
        fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.fetch.fetch_add(1, Ordering::SeqCst);
            self.calls.fetched_urls.lock().unwrap().push(url.to_string());
            self.response.clone().map_err(FetchError::Status)
        }
    }

    struct FakeDesktop {
        calls: Arc<Calls>,
        fail: bool,
    }

    impl Desktop for FakeDesktop {
        fn open(&self, target: &str) -> Result<(), DesktopError> {
            if self.fail {
                return Err(DesktopError::Launch(target.to_string()));
            }
            self.calls.opened.lock().unwrap().push(target.to_string());
            Ok(())
        }

        fn show_in_folder(&self, path: &Path) -> Result<(), DesktopError> {
            self.calls.revealed.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        fn copy_text(&self, text: &str) -> Result<(), DesktopError> {
            if self.fail {
                return Err(DesktopError::Clipboard("no display".to_string()));
            }
            self.calls.clipboard.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct FakeNotifier {
        calls: Arc<Calls>,
    }

    impl Notifier for FakeNotifier {
        fn show(&self, toast: &Toast) {
            self.calls.toasts.lock().unwrap().push(toast.clone());
        }
    }

    struct Harness {
        dispatcher: Dispatcher,
        calls: Arc<Calls>,
        dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(api_fails: bool, response: Result<Vec<u8>, u16>) -> Self {
            Self::build(api_fails, response, false)
        }

        fn without_desktop() -> Self {
            Self::build(false, Ok(PNG_BYTES.to_vec()), true)
        }

        fn build(api_fails: bool, response: Result<Vec<u8>, u16>, desktop_fails: bool) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let calls = Arc::new(Calls::default());
            let recent = Arc::new(RecentIcons::open(dir.path().join("recent.json"), 20));
            let dispatcher = Dispatcher::new(
                Box::new(FakeApi { calls: calls.clone(), fail: api_fails }),
                Box::new(FakeFetcher { calls: calls.clone(), response }),
                Box::new(FakeDesktop { calls: calls.clone(), fail: desktop_fails }),
                Box::new(FakeNotifier { calls: calls.clone() }),
                recent,
                BASE,
            );
            Self { dispatcher, calls, dir }
        }

        fn ok() -> Self {
            Self::new(false, Ok(PNG_BYTES.to_vec()))
        }

        fn options(&self) -> DownloadOptions {
            DownloadOptions::new(ImageFormat::Png, self.dir.path())
        }

        fn run(&self, kind: ActionKind, icon: IconRecord) -> ActionOutcome {
            let mut outcome = self.dispatcher.run(kind, icon, &self.options());
            outcome.wait_for_history();
            outcome
        }

        fn history_ids(&self) -> Vec<String> {
            self.dispatcher
                .recent()
                .load()
                .iter()
                .map(|i| i.id().to_string())
                .collect()
        }

        fn last_toast(&self) -> Toast {
            self.calls.toasts.lock().unwrap().last().cloned().unwrap()
        }
    }

    fn react(download_name: Option<&str>) -> IconRecord {
        IconRecord::Summary(IconMeta {
            id: "react".to_string(),
            name: "react".to_string(),
            link: "https://icons8.com/icon/123/react".to_string(),
            url: "https://x/react.png".to_string(),
            download_name: download_name.map(str::to_string),
            platform: None,
            is_color: false,
        })
    }

    fn detailed_react() -> IconRecord {
        react(None).with_svg(Svg::parse(SVG).unwrap())
    }

    #[test]
    fn test_raster_download_success() {
        let h = Harness::ok();
        let outcome = h.run(ActionKind::DownloadRaster, react(None));

        assert_eq!(outcome.state, ActionState::Success);
        let target = h.dir.path().join("react.png");
        assert_eq!(outcome.saved_to.as_deref(), Some(target.as_path()));
        assert_eq!(std::fs::read(&target).unwrap(), PNG_BYTES);
        assert_eq!(h.history_ids(), vec!["react"]);

        let toast = h.last_toast();
        assert_eq!(toast.title, "PNG Icon Downloaded");
        assert_eq!(toast.primary_action, Some(ToastAction::OpenFile(target.clone())));
        assert_eq!(toast.secondary_action, Some(ToastAction::ShowInFolder(target)));
        assert_eq!(
            h.calls.fetched_urls.lock().unwrap().as_slice(),
            ["https://img.icons8.com/?size=256&id=react&format=png"]
        );
    }

    #[test]
    fn test_raster_download_fetch_failure() {
        let h = Harness::new(false, Err(503));
        let outcome = h.run(ActionKind::DownloadRaster, react(None));

        assert_eq!(outcome.state, ActionState::Failed);
        assert!(outcome.history.is_none());
        assert!(!h.dir.path().join("react.png").exists());
        assert!(h.history_ids().is_empty());

        let toast = h.last_toast();
        assert_eq!(toast.title, "PNG Icon Download Failed");
        assert!(toast.message.unwrap().starts_with("Could not fetch icon"));
    }

    #[test]
    fn test_raster_download_rejects_non_image_body() {
        let h = Harness::new(false, Ok(b"<html>rate limited</html>".to_vec()));
        let outcome = h.run(ActionKind::DownloadRaster, react(None));

        assert_eq!(outcome.state, ActionState::Failed);
        assert!(!h.dir.path().join("react.png").exists());
        assert!(h.history_ids().is_empty());
    }

    #[test]
    fn test_download_to_missing_directory_fails_before_fetch() {
        let h = Harness::ok();
        let options = DownloadOptions::new(ImageFormat::Png, h.dir.path().join("missing"));
        let outcome = h.dispatcher.run(ActionKind::DownloadRaster, react(None), &options);

        assert_eq!(outcome.state, ActionState::Failed);
        assert_eq!(h.calls.fetch.load(Ordering::SeqCst), 0);
        assert!(outcome.error.unwrap().starts_with("Invalid destination"));
    }

    #[test]
    fn test_write_failure_is_reported_as_save_error() {
        let h = Harness::ok();
        // A directory occupying the target name makes the final rename fail
        std::fs::create_dir(h.dir.path().join("react.png")).unwrap();
        let outcome = h.run(ActionKind::DownloadRaster, react(None));

        assert_eq!(outcome.state, ActionState::Failed);
        assert!(outcome.error.unwrap().starts_with("Could not save"));
        assert!(h.history_ids().is_empty());
    }

    #[test]
    fn test_download_name_is_used() {
        let h = Harness::ok();
        h.run(ActionKind::DownloadRaster, react(Some("react-icon")));
        h.run(ActionKind::DownloadSvg, react(Some("react-icon")));

        assert!(h.dir.path().join("react-icon.png").exists());
        assert!(h.dir.path().join("react-icon.svg").exists());
        assert!(!h.dir.path().join("react.png").exists());
        assert!(!h.dir.path().join("react.svg").exists());
    }

    #[test]
    fn test_svg_download_fetches_missing_detail() {
        let h = Harness::ok();
        let outcome = h.run(ActionKind::DownloadSvg, react(None));

        assert!(outcome.is_success());
        assert!(outcome.icon.is_detailed());
        assert_eq!(h.calls.detail.load(Ordering::SeqCst), 1);
        let written = std::fs::read_to_string(h.dir.path().join("react.svg")).unwrap();
        assert_eq!(written, SVG);
        assert_eq!(h.last_toast().title, "SVG Icon Downloaded");
    }

    #[test]
    fn test_svg_download_detail_failure() {
        let h = Harness::new(true, Ok(PNG_BYTES.to_vec()));
        let outcome = h.run(ActionKind::DownloadSvg, react(None));

        assert_eq!(outcome.state, ActionState::Failed);
        assert!(!h.dir.path().join("react.svg").exists());
        assert!(h.history_ids().is_empty());
        assert_eq!(h.last_toast().title, "SVG Icon Download Failed");
    }

    #[test]
    fn test_detailed_icon_skips_detail_fetch() {
        let h = Harness::ok();
        h.run(ActionKind::CopySvg, detailed_react());
        h.run(ActionKind::DownloadSvg, detailed_react());
        assert_eq!(h.calls.detail.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_copy_svg_with_existing_markup() {
        let h = Harness::ok();
        let outcome = h.run(ActionKind::CopySvg, detailed_react());

        assert!(outcome.is_success());
        assert_eq!(h.calls.detail.load(Ordering::SeqCst), 0);
        assert_eq!(h.calls.clipboard.lock().unwrap().as_slice(), [SVG]);
        assert_eq!(h.history_ids(), vec!["react"]);
        // No pending toast when nothing has to be fetched
        let toasts = h.calls.toasts.lock().unwrap();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Copied SVG Code");
    }

    #[test]
    fn test_copy_svg_fetch_failure() {
        let h = Harness::new(true, Ok(PNG_BYTES.to_vec()));
        let outcome = h.run(ActionKind::CopySvg, react(None));

        assert_eq!(outcome.state, ActionState::Failed);
        assert!(h.calls.clipboard.lock().unwrap().is_empty());
        assert!(h.history_ids().is_empty());
        let toasts = h.calls.toasts.lock().unwrap();
        assert_eq!(toasts[0].title, "Getting SVG Code...");
        assert_eq!(toasts[1].title, "Copy SVG Code Failed");
    }

    #[test]
    fn test_copy_image_url() {
        let h = Harness::ok();
        let outcome = h.run(ActionKind::CopyImageUrl, react(None));

        assert!(outcome.is_success());
        assert_eq!(h.calls.clipboard.lock().unwrap().as_slice(), ["https://x/react.png"]);
        assert_eq!(h.last_toast().title, "Copied Image URL");
        assert_eq!(h.history_ids(), vec!["react"]);
    }

    #[test]
    fn test_open_in_browser() {
        let h = Harness::ok();
        let outcome = h.run(ActionKind::OpenInBrowser, react(None));

        assert!(outcome.is_success());
        assert_eq!(
            h.calls.opened.lock().unwrap().as_slice(),
            ["https://icons8.com/icon/123/react"]
        );
        assert_eq!(h.history_ids(), vec!["react"]);
    }

    #[test]
    fn test_open_in_browser_records_when_launch_fails() {
        let h = Harness::without_desktop();
        let outcome = h.run(ActionKind::OpenInBrowser, react(None));

        assert_eq!(outcome.state, ActionState::Success);
        assert!(outcome.error.is_none());
        assert_eq!(h.history_ids(), vec!["react"]);
        assert!(h.calls.toasts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_copy_image_url_records_when_clipboard_fails() {
        let h = Harness::without_desktop();
        let outcome = h.run(ActionKind::CopyImageUrl, react(None));

        assert_eq!(outcome.state, ActionState::Success);
        assert_eq!(h.history_ids(), vec!["react"]);
        assert_eq!(h.last_toast().title, "Copied Image URL");
    }

    #[test]
    fn test_copy_svg_clipboard_failure() {
        let h = Harness::without_desktop();
        let outcome = h.run(ActionKind::CopySvg, detailed_react());

        assert_eq!(outcome.state, ActionState::Failed);
        assert!(outcome.error.unwrap().starts_with("Clipboard error"));
        assert!(h.history_ids().is_empty());
        assert_eq!(h.last_toast().title, "Copy SVG Code Failed");
    }

    #[test]
    fn test_state_follows_last_run() {
        let h = Harness::new(false, Err(503));
        assert_eq!(h.dispatcher.state(), ActionState::Idle);

        h.run(ActionKind::CopyImageUrl, react(None));
        assert_eq!(h.dispatcher.state(), ActionState::Success);

        h.run(ActionKind::DownloadRaster, react(None));
        assert_eq!(h.dispatcher.state(), ActionState::Failed);
    }

    #[test]
    fn test_write_without_download_is_an_error() {
        let h = Harness::ok();
        let target = h.dir.path().join("react.png");
        let mut progress = Progress {
            icon: react(None),
            asset: None,
        };

        let result = h
            .dispatcher
            .execute(&Step::WriteAsset(target.clone()), &h.options(), &mut progress);
        assert!(matches!(result, Err(ActionError::MissingAsset(_))));
        assert!(!target.exists());
    }

    #[test]
    fn test_view_records_even_when_detail_fails() {
        let h = Harness::new(true, Ok(PNG_BYTES.to_vec()));
        let outcome = h.run(ActionKind::View, react(None));

        assert!(outcome.is_success());
        assert!(!outcome.icon.is_detailed());
        assert_eq!(h.history_ids(), vec!["react"]);
        assert!(h.calls.toasts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_view_resolves_detail() {
        let h = Harness::ok();
        let outcome = h.run(ActionKind::View, react(None));
        assert!(outcome.icon.is_detailed());
    }

    #[test]
    fn test_each_success_appends_once() {
        let h = Harness::ok();
        for kind in ActionKind::all() {
            h.run(*kind, react(None));
        }
        assert_eq!(h.history_ids(), vec!["react"]);

        let other = IconRecord::Summary(IconMeta {
            id: "vue".to_string(),
            ..react(None).into_meta()
        });
        h.run(ActionKind::CopyImageUrl, other);
        assert_eq!(h.history_ids(), vec!["vue", "react"]);
    }

    #[test]
    fn test_history_keeps_record_as_given() {
        let h = Harness::ok();
        h.run(ActionKind::CopySvg, react(None));
        let recent = h.dispatcher.recent().load();
        assert_eq!(recent, vec![react(None)]);
    }

    #[test]
    fn test_follow_up_actions() {
        let h = Harness::ok();
        let path = h.dir.path().join("react.png");
        h.dispatcher.follow_up(&ToastAction::OpenFile(path.clone())).unwrap();
        h.dispatcher.follow_up(&ToastAction::ShowInFolder(path.clone())).unwrap();

        assert_eq!(
            h.calls.opened.lock().unwrap().as_slice(),
            [path.to_string_lossy().to_string()]
        );
        assert_eq!(h.calls.revealed.lock().unwrap().as_slice(), [path]);
    }

    #[test]
    fn test_write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        std::fs::write(&path, "old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
