//! Document upload bookkeeping: screened file entries and the cosmetic
//! progress ticker that animates them while a step is on screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::record::AccountType;

/// MIME types accepted for identity documents.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

/// Upload ceiling of 5 MiB per document.
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

pub const UNSUPPORTED_TYPE_ERROR: &str = "Unsupported file type";
pub const FILE_TOO_LARGE_ERROR: &str = "File size exceeds 5MB limit";

/// How much a pending entry gains per tick.
pub const PROGRESS_TICK_STEP: u8 = 10;

/// Tick cadence of the upload animation.
pub const PROGRESS_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// A raw file handed over by the file surface: a name, a byte size, and a
/// MIME type string. Bytes are optional and never serialized; submission
/// carries descriptors only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBlob {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Option<Vec<u8>>,
}

impl FileBlob {
    /// Creates a descriptor-only blob (metadata known, content elsewhere).
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            bytes: None,
        }
    }

    /// Creates a blob that carries its encoded content in memory.
    pub fn with_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            bytes: Some(bytes),
        }
    }

    /// Whether a thumbnail can be rendered for this blob.
    pub fn previewable(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Screens a blob against the allow-list and the size ceiling.
///
/// The type check runs first: an oversized file of an accepted type reports
/// the size error, not the type error.
pub fn screen(blob: &FileBlob) -> Option<&'static str> {
    if !ALLOWED_MIME_TYPES.contains(&blob.mime_type.as_str()) {
        return Some(UNSUPPORTED_TYPE_ERROR);
    }
    if blob.size > MAX_FILE_SIZE_BYTES {
        return Some(FILE_TOO_LARGE_ERROR);
    }
    None
}

/// One entry in the upload list. Rejected files keep their slot so the
/// failure stays visible next to the file name.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub id: Uuid,
    pub blob: FileBlob,
    pub progress: u8,
    pub error: Option<String>,
}

impl UploadedDocument {
    /// Wraps a freshly selected blob, recording any screening error.
    pub fn screened(blob: FileBlob) -> Self {
        let error = screen(&blob).map(String::from);
        Self {
            id: Uuid::new_v4(),
            blob,
            progress: 0,
            error,
        }
    }

    /// Wraps a blob that was already accepted in an earlier visit.
    pub fn completed(blob: FileBlob) -> Self {
        Self {
            id: Uuid::new_v4(),
            blob,
            progress: 100,
            error: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    pub fn previewable(&self) -> bool {
        self.error.is_none() && self.blob.previewable()
    }
}

/// Required document labels for each applicant kind. The selfie is tracked
/// separately and is not part of these lists.
pub fn required_documents(kind: AccountType) -> &'static [&'static str] {
    match kind {
        AccountType::Individual => &["Government ID", "Proof of Address"],
        AccountType::Business => &[
            "Certificate Of Incorporation",
            "Valid ID of Business Owner",
            "Proof of Business Address",
        ],
    }
}

/// Advances every pending entry by one tick. Errored and finished entries
/// are left alone; progress never exceeds 100.
pub fn advance_progress(entries: &mut [UploadedDocument]) {
    for entry in entries.iter_mut() {
        if entry.error.is_some() || entry.is_complete() {
            continue;
        }
        entry.progress = entry.progress.saturating_add(PROGRESS_TICK_STEP).min(100);
    }
}

/// Background task that animates upload progress while its owner is alive.
/// Dropping the ticker cancels the task; no tick runs after `cancel`
/// returns.
pub struct ProgressTicker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Spawns the ticker over a shared upload list.
    pub fn spawn(entries: Arc<Mutex<Vec<UploadedDocument>>>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || loop {
            thread::sleep(interval);
            if stop_flag.load(Ordering::Relaxed) {
                break;
            }
            if let Ok(mut guard) = entries.lock() {
                advance_progress(&mut guard);
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stops the task and waits for it to exit. Safe to call twice.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(name: &str, size: u64) -> FileBlob {
        FileBlob::new(name, size, "image/jpeg")
    }

    #[test]
    fn screening_accepts_listed_types_within_limit() {
        assert_eq!(screen(&jpeg("id.jpg", 1024)), None);
        assert_eq!(screen(&FileBlob::new("doc.pdf", 4_000_000, "application/pdf")), None);
    }

    #[test]
    fn screening_rejects_unsupported_types() {
        let blob = FileBlob::new(
            "resume.docx",
            1024,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        );
        assert_eq!(screen(&blob), Some(UNSUPPORTED_TYPE_ERROR));
    }

    #[test]
    fn oversized_accepted_type_reports_size_error() {
        let blob = jpeg("passport.jpg", 6 * 1024 * 1024);
        assert_eq!(screen(&blob), Some(FILE_TOO_LARGE_ERROR));
    }

    #[test]
    fn boundary_size_passes_screening() {
        assert_eq!(screen(&jpeg("edge.jpg", MAX_FILE_SIZE_BYTES)), None);
        assert_eq!(
            screen(&jpeg("over.jpg", MAX_FILE_SIZE_BYTES + 1)),
            Some(FILE_TOO_LARGE_ERROR)
        );
    }

    #[test]
    fn rejected_entry_keeps_slot_with_error_and_zero_progress() {
        let entry = UploadedDocument::screened(jpeg("big.jpg", 6 * 1024 * 1024));
        assert_eq!(entry.error.as_deref(), Some(FILE_TOO_LARGE_ERROR));
        assert_eq!(entry.progress, 0);
    }

    #[test]
    fn progress_ticks_skip_errored_and_finished_entries() {
        let mut entries = vec![
            UploadedDocument::screened(jpeg("ok.jpg", 1024)),
            UploadedDocument::screened(jpeg("big.jpg", 6 * 1024 * 1024)),
            UploadedDocument::completed(jpeg("done.jpg", 1024)),
        ];
        entries[0].progress = 95;

        advance_progress(&mut entries);

        assert_eq!(entries[0].progress, 100);
        assert_eq!(entries[1].progress, 0);
        assert_eq!(entries[2].progress, 100);
    }

    #[test]
    fn ticker_advances_entries_until_cancelled() {
        let entries = Arc::new(Mutex::new(vec![UploadedDocument::screened(jpeg(
            "slow.jpg", 1024,
        ))]));
        let mut ticker = ProgressTicker::spawn(Arc::clone(&entries), Duration::from_millis(2));

        let deadline = std::time::Instant::now() + Duration::from_secs(2);
        loop {
            let progress = entries.lock().unwrap()[0].progress;
            if progress > 0 {
                break;
            }
            assert!(std::time::Instant::now() < deadline, "ticker never advanced");
            thread::sleep(Duration::from_millis(2));
        }

        ticker.cancel();
        let frozen = entries.lock().unwrap()[0].progress;
        thread::sleep(Duration::from_millis(20));
        assert_eq!(entries.lock().unwrap()[0].progress, frozen);
    }

    #[test]
    fn previewability_follows_mime_type() {
        assert!(UploadedDocument::screened(jpeg("a.jpg", 10)).previewable());
        assert!(!UploadedDocument::screened(FileBlob::new("a.pdf", 10, "application/pdf")).previewable());
    }
}
