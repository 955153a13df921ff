//! The single status line and the notifications it triggers

use crate::backend::messages::Notification;
use crate::downloader::progress::{ProgressEvent, ProgressPhase};
use tokio::sync::mpsc::{self, error::TryRecvError};

pub const STATUS_STARTING: &str = "Starting download...";
pub const STATUS_POST_PROCESSING: &str = "Download finished, now post-processing...";
pub const STATUS_COMPLETED: &str = "Download completed successfully.";
pub const STATUS_FAILED: &str = "Download failed.";

/// Reported when the background task goes away without a terminal event
const TASK_LOST: &str = "the download task stopped unexpectedly";

/// Status text for one event
pub fn status_text(event: &ProgressEvent) -> String {
    match event.phase {
        ProgressPhase::Downloading => match (&event.speed, event.percent) {
            (None, None) => STATUS_STARTING.to_string(),
            (speed, Some(percent)) => format!(
                "Downloading... {}% at {}",
                percent,
                speed.as_deref().unwrap_or_default()
            ),
            (Some(speed), None) => format!("Downloading... at {}", speed),
        },
        ProgressPhase::Finished | ProgressPhase::PostProcessing => STATUS_POST_PROCESSING.to_string(),
        ProgressPhase::Completed => STATUS_COMPLETED.to_string(),
        ProgressPhase::Failed => STATUS_FAILED.to_string(),
    }
}

/// What a non-blocking drain of the event channel produced
#[derive(Debug, Default)]
pub struct Drained {
    pub notifications: Vec<Notification>,
    /// A terminal event was seen (or the sender is gone); stop polling
    pub finished: bool,
}

/// Latest-event-wins view of a download. No history is kept.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    text: String,
    percent: Option<u8>,
    phase: Option<ProgressPhase>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phase(&self) -> Option<ProgressPhase> {
        self.phase
    }

    /// Progress bar value, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        f32::from(self.percent.unwrap_or(0)) / 100.0
    }

    /// Apply an event; terminal events yield the notification to show
    pub fn apply(&mut self, event: &ProgressEvent) -> Option<Notification> {
        self.text = status_text(event);
        self.phase = Some(event.phase);

        match event.phase {
            ProgressPhase::Downloading if event.speed.is_none() && event.percent.is_none() => {
                self.percent = None;
                None
            }
            ProgressPhase::Downloading => {
                if event.percent.is_some() {
                    self.percent = event.percent;
                }
                None
            }
            ProgressPhase::Finished | ProgressPhase::PostProcessing => None,
            ProgressPhase::Completed => {
                self.percent = Some(100);
                Some(Notification::success(STATUS_COMPLETED))
            }
            ProgressPhase::Failed => {
                let description = event.error_message.as_deref().unwrap_or("unknown error");
                Some(Notification::error(format!("An error occurred: {}", description)))
            }
        }
    }

    /// Apply every event currently queued without blocking. Called from the UI thread.
    pub fn drain(&mut self, events: &mut mpsc::UnboundedReceiver<ProgressEvent>) -> Drained {
        let mut drained = Drained::default();
        loop {
            match events.try_recv() {
                Ok(event) => {
                    drained.notifications.extend(self.apply(&event));
                    if event.is_terminal() {
                        drained.finished = true;
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    drained
                        .notifications
                        .extend(self.apply(&ProgressEvent::failed(TASK_LOST)));
                    drained.finished = true;
                    break;
                }
            }
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::messages::NotificationLevel;
    use crate::downloader::progress::RawProgress;

    fn apply_raw(board: &mut StatusBoard, raw: RawProgress) -> Option<Notification> {
        let event = ProgressEvent::from_raw(&raw)?;
        board.apply(&event)
    }

    #[test]
    fn starting_text() {
        let mut board = StatusBoard::new();
        assert!(board.apply(&ProgressEvent::starting()).is_none());
        assert_eq!(board.text(), "Starting download...");
    }

    #[test]
    fn downloading_text_truncates_percent() {
        let mut board = StatusBoard::new();
        apply_raw(&mut board, RawProgress::downloading(" 42.7% ", "1.2MiB/s"));
        assert_eq!(board.text(), "Downloading... 42% at 1.2MiB/s");
        assert!((board.progress() - 0.42).abs() < f32::EPSILON);
    }

    #[test]
    fn unparsable_percent_shows_speed_only() {
        let mut board = StatusBoard::new();
        apply_raw(&mut board, RawProgress::downloading("Unknown", "500KiB/s"));
        assert_eq!(board.text(), "Downloading... at 500KiB/s");
    }

    #[test]
    fn finished_text() {
        let mut board = StatusBoard::new();
        apply_raw(&mut board, RawProgress::finished());
        assert_eq!(board.text(), "Download finished, now post-processing...");
    }

    #[test]
    fn ignored_phase_keeps_text() {
        let mut board = StatusBoard::new();
        apply_raw(&mut board, RawProgress::downloading("10%", "1MiB/s"));
        let other = RawProgress {
            status: "error".into(),
            percent: None,
            speed: None,
        };
        apply_raw(&mut board, other);
        assert_eq!(board.text(), "Downloading... 10% at 1MiB/s");
    }

    #[test]
    fn terminal_events_notify() {
        let mut board = StatusBoard::new();
        let note = board.apply(&ProgressEvent::completed()).unwrap();
        assert_eq!(board.text(), "Download completed successfully.");
        assert_eq!(note.level, NotificationLevel::Info);
        assert_eq!(board.progress(), 1.0);

        let note = board.apply(&ProgressEvent::failed("disk full")).unwrap();
        assert_eq!(board.text(), "Download failed.");
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "An error occurred: disk full");
    }

    #[test]
    fn drain_stops_at_terminal_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(ProgressEvent::starting()).unwrap();
        tx.send(ProgressEvent::downloading(Some(12), "3MiB/s")).unwrap();
        tx.send(ProgressEvent::completed()).unwrap();

        let mut board = StatusBoard::new();
        let drained = board.drain(&mut rx);
        assert!(drained.finished);
        assert_eq!(drained.notifications.len(), 1);
        assert_eq!(board.text(), STATUS_COMPLETED);
    }

    #[test]
    fn drain_without_events_is_a_no_op() {
        let (_tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();
        let mut board = StatusBoard::new();
        let drained = board.drain(&mut rx);
        assert!(!drained.finished);
        assert!(drained.notifications.is_empty());
        assert_eq!(board.text(), "");
    }

    #[test]
    fn dropped_sender_counts_as_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(ProgressEvent::starting()).unwrap();
        drop(tx);

        let mut board = StatusBoard::new();
        let drained = board.drain(&mut rx);
        assert!(drained.finished);
        assert_eq!(board.text(), STATUS_FAILED);
        assert_eq!(drained.notifications[0].level, NotificationLevel::Error);
    }

    #[test]
    fn progress_survives_speed_only_update() {
        let mut board = StatusBoard::new();
        apply_raw(&mut board, RawProgress::downloading("55.0%", "2MiB/s"));
        apply_raw(&mut board, RawProgress::downloading("NA", "2MiB/s"));
        assert!((board.progress() - 0.55).abs() < f32::EPSILON);
    }
}
