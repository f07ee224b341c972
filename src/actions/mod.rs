//! Icon actions
//!
//! View, open, copy and download actions for a single icon. Each action is
//! planned as a list of steps, executed by the [`Dispatcher`], reported
//! through a [`Notifier`] and, on success, recorded in the recent-icons
//! history.

mod desktop;
mod dispatcher;
mod notify;
mod plan;

pub use desktop::{Desktop, DesktopError, SystemDesktop};
pub use dispatcher::{ActionError, ActionOutcome, ActionState, Dispatcher};
pub use notify::{LogNotifier, Notifier, Toast, ToastAction, ToastStyle};
pub use plan::{plan, ActionKind, ActionPlan, Step};
