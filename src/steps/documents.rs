use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use crate::domain::record::{AccountType, OnboardingRecord, RecordPatch};
use crate::upload::{
    required_documents, FileBlob, ProgressTicker, UploadedDocument, PROGRESS_TICK_INTERVAL,
};

pub const SELFIE_LABEL: &str = "Selfie Verification";

/// Final step: KYC document uploads plus the selfie. The upload list is
/// shared with the progress ticker, which lives no longer than the step.
pub struct DocumentsStep {
    kind: AccountType,
    uploads: Arc<Mutex<Vec<UploadedDocument>>>,
    selfie: Option<FileBlob>,
    ticker: Option<ProgressTicker>,
}

impl DocumentsStep {
    pub fn new(kind: AccountType) -> Self {
        Self {
            kind,
            uploads: Arc::new(Mutex::new(Vec::new())),
            selfie: None,
            ticker: None,
        }
    }

    /// Prefills from the record: previously accepted files come back as
    /// completed entries, the selfie slot is restored as-is.
    pub fn from_record(record: &OnboardingRecord) -> Self {
        let entries = record
            .uploaded_files
            .iter()
            .cloned()
            .map(UploadedDocument::completed)
            .collect();
        Self {
            kind: record.account_type.unwrap_or_default(),
            uploads: Arc::new(Mutex::new(entries)),
            selfie: record.selfie.clone(),
            ticker: None,
        }
    }

    pub fn kind(&self) -> AccountType {
        self.kind
    }

    /// Labels the applicant still has to satisfy, selfie included.
    pub fn outstanding(&self) -> Vec<&'static str> {
        let labels = self.required_labels();
        let filled = self.lock_uploads().len().min(labels.len());
        let mut out: Vec<&'static str> = labels[filled..].to_vec();
        if self.selfie.is_none() {
            out.push(SELFIE_LABEL);
        }
        out
    }

    pub fn required_labels(&self) -> &'static [&'static str] {
        required_documents(self.kind)
    }

    pub fn required_count(&self) -> usize {
        self.required_labels().len()
    }

    /// Starts the cosmetic upload animation at the standard cadence.
    pub fn start_ticker(&mut self) {
        self.start_ticker_with(PROGRESS_TICK_INTERVAL);
    }

    pub fn start_ticker_with(&mut self, interval: Duration) {
        if self.ticker.is_none() {
            self.ticker = Some(ProgressTicker::spawn(Arc::clone(&self.uploads), interval));
        }
    }

    /// Cancels the animation; also happens implicitly when the step drops.
    pub fn stop_ticker(&mut self) {
        self.ticker = None;
    }

    /// Screens a batch and appends it, truncated so the list never exceeds
    /// the required slot count. Returns how many entries were taken.
    pub fn add_files(&mut self, blobs: Vec<FileBlob>) -> usize {
        let mut entries = self.lock_uploads();
        let remaining = self.required_count().saturating_sub(entries.len());
        let mut taken = 0;
        for blob in blobs.into_iter().take(remaining) {
            entries.push(UploadedDocument::screened(blob));
            taken += 1;
        }
        taken
    }

    /// Removes one entry, freeing its slot. Returns false for unknown ids.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let mut entries = self.lock_uploads();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    /// A point-in-time copy of the upload list for rendering.
    pub fn snapshot(&self) -> Vec<UploadedDocument> {
        self.lock_uploads().clone()
    }

    pub fn valid_count(&self) -> usize {
        self.lock_uploads()
            .iter()
            .filter(|entry| entry.error.is_none())
            .count()
    }

    pub fn selfie(&self) -> Option<&FileBlob> {
        self.selfie.as_ref()
    }

    pub fn set_selfie(&mut self, blob: FileBlob) {
        self.selfie = Some(blob);
    }

    pub fn clear_selfie(&mut self) {
        self.selfie = None;
    }

    /// The proceed gate: every required slot holds an accepted file and the
    /// selfie has been captured. Progress is cosmetic and never gates.
    pub fn can_advance(&self) -> bool {
        self.valid_count() >= self.required_count() && self.selfie.is_some()
    }

    /// Emits the commit patch with the accepted blobs and the selfie.
    pub fn submit(&mut self) -> Option<RecordPatch> {
        if !self.can_advance() {
            return None;
        }
        let blobs = self
            .lock_uploads()
            .iter()
            .filter(|entry| entry.error.is_none())
            .map(|entry| entry.blob.clone())
            .collect();
        Some(RecordPatch {
            uploaded_files: Some(blobs),
            selfie: self.selfie.clone(),
            ..Default::default()
        })
    }

    fn lock_uploads(&self) -> std::sync::MutexGuard<'_, Vec<UploadedDocument>> {
        self.uploads.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
