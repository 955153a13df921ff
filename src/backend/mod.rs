pub mod controller;
pub mod form;
pub mod messages;
pub mod status;

pub use controller::{ActiveDownload, DownloadController};
pub use form::DownloadForm;
pub use messages::{Notification, NotificationLevel};
pub use status::StatusBoard;
