//! Runs `YtDlpDownloader` against a shell script standing in for yt-dlp.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tubefetch::downloader::{
    DownloadRequest, MediaDownloader, ProgressHook, RawProgress, YtDlpDownloader, AUDIO_PRESETS,
    QUALITY_PRESETS,
};

fn fake_ytdlp(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("yt-dlp");
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

fn recording_hook() -> (ProgressHook, Arc<Mutex<Vec<RawProgress>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let hook: ProgressHook = Arc::new(move |raw: RawProgress| sink.lock().unwrap().push(raw));
    (hook, seen)
}

#[tokio::test]
async fn progress_lines_reach_the_hook() {
    let temp = TempDir::new().expect("temp dir");
    let args_file = temp.path().join("args.txt");
    let script = fake_ytdlp(
        temp.path(),
        &format!(
            r#"printf '%s\n' "$@" > '{}'
echo "[youtube] abc: Downloading webpage"
echo "tubefetch|downloading| 12.5%|1.00MiB/s"
echo "tubefetch|downloading|100.0%|2.00MiB/s"
echo "tubefetch|finished|100.0%|2.00MiB/s"
exit 0
"#,
            args_file.display()
        ),
    );

    let downloader = YtDlpDownloader::new(script, None);
    let request = DownloadRequest::video("https://example.com/v", temp.path(), &QUALITY_PRESETS[1]);
    let (hook, seen) = recording_hook();

    downloader
        .download(&request.url, &request.options(), hook)
        .await
        .expect("download succeeds");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], RawProgress::downloading(" 12.5%", "1.00MiB/s"));
    assert_eq!(seen[2].status, "finished");

    let args = std::fs::read_to_string(&args_file).expect("args recorded");
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], "-f");
    assert_eq!(args[1], QUALITY_PRESETS[1].selector);
    assert_eq!(&args[args.len() - 2..], ["--", "https://example.com/v"]);
    assert!(args.contains(&"--merge-output-format"));
}

#[tokio::test]
async fn non_zero_exit_carries_the_error_line() {
    let temp = TempDir::new().expect("temp dir");
    let script = fake_ytdlp(
        temp.path(),
        r#"echo "tubefetch|downloading|  3.0%|500.00KiB/s"
echo "WARNING: something minor" >&2
echo "ERROR: disk full" >&2
echo "cleanup done" >&2
exit 1
"#,
    );

    let downloader = YtDlpDownloader::new(script, None);
    let request = DownloadRequest::audio("https://example.com/a", temp.path(), &AUDIO_PRESETS[0]);
    let (hook, seen) = recording_hook();

    let err = downloader
        .download(&request.url, &request.options(), hook)
        .await
        .expect_err("download fails");

    assert!(err.to_string().contains("ERROR: disk full"), "{}", err);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn non_utf8_output_does_not_break_a_download() {
    let temp = TempDir::new().expect("temp dir");
    let script = fake_ytdlp(
        temp.path(),
        r#"printf 'WARNING: caf\351\n' >&2
printf 'tubefetch|downloading| 50.0%%|1.00MiB/s [caf\351]\n'
i=0
while [ $i -lt 200 ]; do
  echo "[download] still going $i" >&2
  i=$((i + 1))
done
echo "tubefetch|finished|100%|NA"
exit 0
"#,
    );

    let downloader = YtDlpDownloader::new(script, None);
    let request = DownloadRequest::video("https://example.com/v", temp.path(), &QUALITY_PRESETS[0]);
    let (hook, seen) = recording_hook();

    downloader
        .download(&request.url, &request.options(), hook)
        .await
        .expect("download succeeds");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].percent.as_deref(), Some(" 50.0%"));
    assert_eq!(seen[1].status, "finished");
}

#[tokio::test]
async fn missing_executable_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    let downloader = YtDlpDownloader::new(temp.path().join("does-not-exist"), None);
    let request = DownloadRequest::video("https://example.com/v", temp.path(), &QUALITY_PRESETS[0]);
    let (hook, _) = recording_hook();

    let err = downloader
        .download(&request.url, &request.options(), hook)
        .await
        .expect_err("spawn fails");
    assert!(err.to_string().contains("Failed to start yt-dlp"));
}
