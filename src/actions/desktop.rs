//! Desktop primitives: launching URLs and files, revealing files, clipboard

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesktopError {
    #[error("Failed to launch {0}")]
    Launch(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Host facilities an action may need
pub trait Desktop {
    /// Open a URL or file with its default handler
    fn open(&self, target: &str) -> Result<(), DesktopError>;

    /// Reveal a file in the platform file browser
    fn show_in_folder(&self, path: &Path) -> Result<(), DesktopError>;

    fn copy_text(&self, text: &str) -> Result<(), DesktopError>;
}

/// Uses the platform launcher commands and the system clipboard
#[derive(Debug, Default)]
pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn open(&self, target: &str) -> Result<(), DesktopError> {
        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(target)
                .spawn()
                .map_err(|e| DesktopError::Launch(format!("{}: {}", target, e)))?;
        }

        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", "", target])
                .spawn()
                .map_err(|e| DesktopError::Launch(format!("{}: {}", target, e)))?;
        }

        #[cfg(target_os = "linux")]
        {
            std::process::Command::new("xdg-open")
                .arg(target)
                .spawn()
                .map_err(|e| DesktopError::Launch(format!("{}: {}", target, e)))?;
        }

        Ok(())
    }

    fn show_in_folder(&self, path: &Path) -> Result<(), DesktopError> {
        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg("-R")
                .arg(path)
                .spawn()
                .map_err(|e| DesktopError::Launch(format!("{}: {}", path.display(), e)))?;
        }

        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("explorer")
                .arg(format!("/select,{}", path.display()))
                .spawn()
                .map_err(|e| DesktopError::Launch(format!("{}: {}", path.display(), e)))?;
        }

        #[cfg(target_os = "linux")]
        {
            // xdg-open has no "select", so open the containing directory
            let folder = path.parent().unwrap_or(Path::new("."));
            std::process::Command::new("xdg-open")
                .arg(folder)
                .spawn()
                .map_err(|e| DesktopError::Launch(format!("{}: {}", folder.display(), e)))?;
        }

        Ok(())
    }

    fn copy_text(&self, text: &str) -> Result<(), DesktopError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| DesktopError::Clipboard(e.to_string()))?;

        // X11 and Wayland drop the selection with its owner, so a short-lived
        // process has to keep serving it until another client takes over
        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;

            log::info!("Holding clipboard contents until they are replaced");
            clipboard
                .set()
                .wait()
                .text(text.to_owned())
                .map_err(|e| DesktopError::Clipboard(e.to_string()))
        }

        #[cfg(not(target_os = "linux"))]
        {
            clipboard
                .set_text(text.to_owned())
                .map_err(|e| DesktopError::Clipboard(e.to_string()))
        }
    }
}
