//! Modal dialogs

use crate::backend::{Notification, NotificationLevel};
use tracing::debug;

/// Show `notification` as a native modal dialog. Blocks until dismissed.
pub fn show(notification: &Notification) {
    debug!("Showing dialog: {:?}", notification);

    let level = match notification.level {
        NotificationLevel::Info => rfd::MessageLevel::Info,
        NotificationLevel::Error => rfd::MessageLevel::Error,
    };

    let _ = rfd::MessageDialog::new()
        .set_level(level)
        .set_title(notification.title.as_str())
        .set_description(notification.message.as_str())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
