//! Progress reporting from the downloader

/// Marker at the start of every progress line we ask yt-dlp to print
pub const PROGRESS_PREFIX: &str = "tubefetch";

/// `--progress-template` value. Fields are separated by `|`:
/// status, percent string, speed string.
pub const PROGRESS_TEMPLATE: &str =
    "download:tubefetch|%(progress.status)s|%(progress._percent_str)s|%(progress._speed_str)s";

/// Payload of one progress-hook invocation, as reported by the downloader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProgress {
    /// "downloading", "finished", "error", ...
    pub status: String,
    /// Formatted percent, e.g. `" 42.7%"`
    pub percent: Option<String>,
    /// Formatted speed, e.g. `"1.2MiB/s"`
    pub speed: Option<String>,
}

impl RawProgress {
    pub fn downloading(percent: impl Into<String>, speed: impl Into<String>) -> Self {
        Self {
            status: "downloading".to_string(),
            percent: Some(percent.into()),
            speed: Some(speed.into()),
        }
    }

    pub fn finished() -> Self {
        Self {
            status: "finished".to_string(),
            percent: None,
            speed: None,
        }
    }
}

/// Parse one line of downloader output. Lines without our prefix yield `None`.
pub fn parse_progress_line(line: &str) -> Option<RawProgress> {
    let mut fields = line.trim_end_matches(['\r', '\n']).splitn(4, '|');
    if fields.next()?.trim() != PROGRESS_PREFIX {
        return None;
    }

    let status = fields.next()?.trim().to_string();
    if status.is_empty() {
        return None;
    }

    Some(RawProgress {
        status,
        percent: fields.next().map(str::to_string),
        speed: fields.next().map(str::to_string),
    })
}

/// Parse a formatted percent string (`" 42.7% "`) and truncate it to a whole percent.
pub fn parse_percent(raw: &str) -> Option<u8> {
    let cleaned = raw.trim().replace('%', "");
    let value = cleaned.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, 100.0).trunc() as u8)
}

/// Lifecycle phase of a download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Downloading,
    Finished,
    PostProcessing,
    Completed,
    Failed,
}

/// Progress event published by the background download to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: ProgressPhase,
    pub percent: Option<u8>,
    pub speed: Option<String>,
    pub error_message: Option<String>,
}

impl ProgressEvent {
    fn phase(phase: ProgressPhase) -> Self {
        Self {
            phase,
            percent: None,
            speed: None,
            error_message: None,
        }
    }

    /// Published before the downloader is invoked
    pub fn starting() -> Self {
        Self::phase(ProgressPhase::Downloading)
    }

    pub fn downloading(percent: Option<u8>, speed: impl Into<String>) -> Self {
        Self {
            percent,
            speed: Some(speed.into()),
            ..Self::phase(ProgressPhase::Downloading)
        }
    }

    pub fn post_processing() -> Self {
        Self::phase(ProgressPhase::PostProcessing)
    }

    pub fn completed() -> Self {
        Self {
            percent: Some(100),
            ..Self::phase(ProgressPhase::Completed)
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::phase(ProgressPhase::Failed)
        }
    }

    /// Translate a progress-hook payload. Phases other than downloading/finished are
    /// ignored.
    pub fn from_raw(raw: &RawProgress) -> Option<Self> {
        match raw.status.as_str() {
            "downloading" => {
                let percent = raw.percent.as_deref().and_then(parse_percent);
                let speed = raw.speed.as_deref().unwrap_or_default().trim();
                Some(Self::downloading(percent, speed))
            }
            "finished" => Some(Self::post_processing()),
            _ => None,
        }
    }

    /// Completed or failed: nothing follows this event
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, ProgressPhase::Completed | ProgressPhase::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percent_is_truncated_not_rounded() {
        assert_eq!(parse_percent(" 42.7% "), Some(42));
        assert_eq!(parse_percent("99.9%"), Some(99));
        assert_eq!(parse_percent("100%"), Some(100));
        assert_eq!(parse_percent("  0.0%"), Some(0));
    }

    #[test]
    fn malformed_percent_is_omitted() {
        assert_eq!(parse_percent(""), None);
        assert_eq!(parse_percent("NA"), None);
        assert_eq!(parse_percent("  N/A%"), None);
        assert_eq!(parse_percent("nan%"), None);
    }

    #[test]
    fn template_line_parsing() {
        let raw = parse_progress_line("tubefetch|downloading| 42.7%|1.2MiB/s\n").unwrap();
        assert_eq!(raw, RawProgress::downloading(" 42.7%", "1.2MiB/s"));

        let raw = parse_progress_line("tubefetch|finished|100.0%|NA").unwrap();
        assert_eq!(raw.status, "finished");

        assert!(parse_progress_line("[download] Destination: video.mp4").is_none());
        assert!(parse_progress_line("tubefetch||").is_none());
    }

    #[test]
    fn raw_downloading_becomes_event() {
        let event = ProgressEvent::from_raw(&RawProgress::downloading(" 42.7% ", "1.2MiB/s")).unwrap();
        assert_eq!(event.phase, ProgressPhase::Downloading);
        assert_eq!(event.percent, Some(42));
        assert_eq!(event.speed.as_deref(), Some("1.2MiB/s"));

        let event = ProgressEvent::from_raw(&RawProgress::downloading("??", "500KiB/s")).unwrap();
        assert_eq!(event.percent, None);
        assert_eq!(event.speed.as_deref(), Some("500KiB/s"));
    }

    #[test]
    fn raw_finished_and_other_phases() {
        let event = ProgressEvent::from_raw(&RawProgress::finished()).unwrap();
        assert_eq!(event.phase, ProgressPhase::PostProcessing);

        let error = RawProgress {
            status: "error".into(),
            percent: None,
            speed: None,
        };
        assert!(ProgressEvent::from_raw(&error).is_none());
    }

    proptest! {
        #[test]
        fn formatted_percent_truncates(tenths in 0u32..=1000, pad in 0usize..3) {
            let spaces = " ".repeat(pad);
            let raw = format!("{}{}.{}%{}", spaces, tenths / 10, tenths % 10, spaces);
            prop_assert_eq!(parse_percent(&raw), Some((tenths / 10) as u8));
        }
    }
}
