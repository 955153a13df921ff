//! Dispatches validated requests to a single background download

use crate::backend::form::DownloadForm;
use crate::downloader::progress::{ProgressEvent, RawProgress};
use crate::downloader::request::DownloadRequest;
use crate::downloader::traits::{MediaDownloader, ProgressHook};
use crate::utils::error::ValidationError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, Instrument};

/// A download that has been handed to the background
pub struct ActiveDownload {
    pub request: DownloadRequest,
    /// Progress events, drained by the UI thread
    pub events: mpsc::UnboundedReceiver<ProgressEvent>,
    pub handle: JoinHandle<()>,
}

/// Runs at most one download at a time
pub struct DownloadController {
    downloader: Arc<dyn MediaDownloader>,
    busy: Arc<AtomicBool>,
}

/// Releases the busy slot when the background task ends, however it ends
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DownloadController {
    pub fn new(downloader: Arc<dyn MediaDownloader>) -> Self {
        Self {
            downloader,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn downloader_id(&self) -> &'static str {
        self.downloader.id()
    }

    /// True while a background download is running
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validate the form and start the download on `runtime`.
    ///
    /// Returns immediately. On a validation error nothing is spawned and no state
    /// changes. A second call while a download is running is rejected.
    pub fn start(&self, form: &DownloadForm, runtime: &Handle) -> Result<ActiveDownload, ValidationError> {
        let request = form.to_request()?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ValidationError::Busy);
        }
        let guard = BusyGuard(Arc::clone(&self.busy));

        let (tx, rx) = mpsc::unbounded_channel();
        let downloader = Arc::clone(&self.downloader);
        let task_request = request.clone();
        let span = info_span!("download", id = %request.id, mode = ?request.mode);

        let handle = runtime.spawn(
            async move {
                let _guard = guard;
                run_download(downloader.as_ref(), &task_request, tx).await;
            }
            .instrument(span),
        );

        Ok(ActiveDownload {
            request,
            events: rx,
            handle,
        })
    }
}

/// Background half of a download: publish progress, invoke the downloader, publish the
/// outcome. Every failure ends up as a `Failed` event.
pub async fn run_download(
    downloader: &dyn MediaDownloader,
    request: &DownloadRequest,
    events: mpsc::UnboundedSender<ProgressEvent>,
) {
    info!("Starting download of {} into {:?}", request.url, request.destination);
    let _ = events.send(ProgressEvent::starting());

    let options = request.options();
    let hook_events = events.clone();
    let hook: ProgressHook = Arc::new(move |raw: RawProgress| {
        if let Some(event) = ProgressEvent::from_raw(&raw) {
            let _ = hook_events.send(event);
        }
    });

    match downloader.download(&request.url, &options, hook).await {
        Ok(()) => {
            info!("Download completed");
            let _ = events.send(ProgressEvent::completed());
        }
        Err(e) => {
            error!("Download failed: {:#}", e);
            let _ = events.send(ProgressEvent::failed(e.to_string()));
        }
    }
}
