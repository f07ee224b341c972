//! Transient status notifications
//!
//! Every action reports pending/success/failure through a [`Notifier`]
//! rather than through its return value.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    /// Work in progress
    Animated,
    Success,
    Failure,
}

/// Follow-up offered on a success toast; running it closes the toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastAction {
    OpenFile(PathBuf),
    ShowInFolder(PathBuf),
}

impl ToastAction {
    pub fn title(&self) -> &'static str {
        match self {
            Self::OpenFile(_) => "Open Icon",
            Self::ShowInFolder(_) => "Show In Folder",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::OpenFile(path) | Self::ShowInFolder(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
    pub message: Option<String>,
    pub primary_action: Option<ToastAction>,
    pub secondary_action: Option<ToastAction>,
}

impl Toast {
    fn new(style: ToastStyle, title: impl Into<String>) -> Self {
        Self {
            style,
            title: title.into(),
            message: None,
            primary_action: None,
            secondary_action: None,
        }
    }

    pub fn animated(title: impl Into<String>) -> Self {
        Self::new(ToastStyle::Animated, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastStyle::Success, title)
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self::new(ToastStyle::Failure, title)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the "Open Icon" / "Show In Folder" follow-ups for a saved file
    pub fn with_file_actions(mut self, path: &Path) -> Self {
        self.primary_action = Some(ToastAction::OpenFile(path.to_path_buf()));
        self.secondary_action = Some(ToastAction::ShowInFolder(path.to_path_buf()));
        self
    }
}

/// Surface that displays toasts
pub trait Notifier {
    fn show(&self, toast: &Toast);
}

/// Renders toasts as log lines
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, toast: &Toast) {
        let mut line = toast.title.clone();
        if let Some(message) = &toast.message {
            line.push_str(&format!(": {}", message));
        }
        match toast.style {
            ToastStyle::Animated => log::info!("{}", line),
            ToastStyle::Success => log::info!("✓ {}", line),
            ToastStyle::Failure => log::error!("✗ {}", line),
        }
        for action in [&toast.primary_action, &toast.secondary_action].into_iter().flatten() {
            log::info!("  {}: {}", action.title(), action.path().display());
        }
    }
}
