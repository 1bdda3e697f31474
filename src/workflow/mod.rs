mod selection;

pub use selection::Selection;

use crate::config::AppConfig;
use crate::convert::{ConversionBackend, SelectedFile};
use crate::error::{ConvertError, Result, MSG_MISSING_FILE_PATH, MSG_NO_FILE, MSG_NO_FORMAT};
use tracing::{debug, info, warn};

/// Where the current conversion stands. Success and failure carry their
/// payload so a message can never outlive the status it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversionStatus {
    #[default]
    Idle,
    Uploading,
    Success {
        file: String,
    },
    Error(String),
}

impl ConversionStatus {
    pub fn is_uploading(&self) -> bool {
        matches!(self, ConversionStatus::Uploading)
    }
}

/// Everything the network half of a conversion needs, detached from the
/// workflow so it can run on another thread.
#[derive(Debug, Clone)]
pub struct Submission {
    pub generation: u64,
    pub file: SelectedFile,
    pub output_format: String,
}

/// Session state for one window: the selected file, the chosen format
/// and the status of the last conversion.
#[derive(Debug)]
pub struct Workflow {
    selection: Option<Selection>,
    status: ConversionStatus,
    /// Bumped on every selection; late results from an older one are dropped.
    generation: u64,
    download_prefix: String,
}

impl Workflow {
    pub fn new(download_prefix: impl Into<String>) -> Self {
        Self {
            selection: None,
            status: ConversionStatus::Idle,
            generation: 0,
            download_prefix: download_prefix.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.download_prefix.clone())
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn status(&self) -> &ConversionStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces (or with `None`, clears) the selected file. Any previous
    /// result is discarded. Refused while a conversion is running.
    pub fn select(&mut self, file: Option<SelectedFile>) -> Result<u64> {
        if self.status.is_uploading() {
            return Err(ConvertError::Busy);
        }

        self.generation += 1;
        self.status = ConversionStatus::Idle;
        self.selection = file.map(Selection::new);

        match &self.selection {
            Some(selection) => info!(
                "Selected '{}' ({}), {} candidate format(s)",
                selection.file().name,
                selection.file().extension,
                selection.candidates().len()
            ),
            None => info!("Selection cleared"),
        }
        Ok(self.generation)
    }

    pub fn set_output_format(&mut self, format: &str) -> Result<()> {
        if self.status.is_uploading() {
            return Err(ConvertError::Busy);
        }
        let selection = self
            .selection
            .as_mut()
            .ok_or_else(|| ConvertError::validation(MSG_NO_FILE))?;

        if !selection.choose(format) {
            return Err(ConvertError::validation(format!(
                "{} is not available for this file.",
                format
            )));
        }
        self.status = ConversionStatus::Idle;
        Ok(())
    }

    pub fn can_convert(&self) -> bool {
        !self.status.is_uploading()
            && self
                .selection
                .as_ref()
                .and_then(Selection::output_format)
                .is_some()
    }

    /// Moves to `Uploading` and returns the work to send. A missing file
    /// or format lands in the `Error` state without anything being sent.
    pub fn begin_convert(&mut self) -> Result<Submission> {
        if self.status.is_uploading() {
            warn!("Convert requested while a conversion is already running");
            return Err(ConvertError::Busy);
        }

        let Some(selection) = &self.selection else {
            self.status = ConversionStatus::Error(MSG_NO_FILE.to_string());
            return Err(ConvertError::validation(MSG_NO_FILE));
        };
        let Some(output_format) = selection.output_format() else {
            self.status = ConversionStatus::Error(MSG_NO_FORMAT.to_string());
            return Err(ConvertError::validation(MSG_NO_FORMAT));
        };

        let submission = Submission {
            generation: self.generation,
            file: selection.file().clone(),
            output_format: output_format.to_string(),
        };
        self.status = ConversionStatus::Uploading;
        Ok(submission)
    }

    /// Records the outcome of a submission. Returns false when the outcome
    /// was stale and ignored.
    pub fn finish(&mut self, generation: u64, outcome: Result<String>) -> bool {
        if generation != self.generation || !self.status.is_uploading() {
            debug!(
                "Dropping conversion outcome for generation {} (current {})",
                generation, self.generation
            );
            return false;
        }

        self.status = match outcome {
            Ok(file) if !file.is_empty() => {
                info!("Conversion finished: {}", file);
                ConversionStatus::Success { file }
            }
            Ok(_) => ConversionStatus::Error(MSG_MISSING_FILE_PATH.to_string()),
            Err(e) => {
                warn!("Conversion failed: {}", e);
                ConversionStatus::Error(e.to_string())
            }
        };
        true
    }

    /// Runs one full conversion against `backend`.
    pub async fn convert<B>(&mut self, backend: &B) -> &ConversionStatus
    where
        B: ConversionBackend + ?Sized,
    {
        if let Ok(submission) = self.begin_convert() {
            let outcome = backend
                .submit(&submission.file, &submission.output_format)
                .await;
            self.finish(submission.generation, outcome);
        }
        &self.status
    }

    /// Merges augmenter suggestions into the current candidates, if they
    /// were made for the current selection. Returns how many were new.
    pub fn apply_suggestions(&mut self, generation: u64, suggestions: &[String]) -> usize {
        if generation != self.generation {
            return 0;
        }
        match self.selection.as_mut() {
            Some(selection) => selection.extend_candidates(suggestions),
            None => 0,
        }
    }

    /// Link to the converted file: the download prefix followed by the
    /// server's path, unchanged.
    pub fn download_url(&self) -> Option<String> {
        match &self.status {
            ConversionStatus::Success { file } => Some(format!("{}{}", self.download_prefix, file)),
            _ => None,
        }
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Path(&'static str),
        Server(&'static str),
    }

    struct FakeBackend {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ConversionBackend for FakeBackend {
        async fn submit(&self, _file: &SelectedFile, _output_format: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Path(p) => Ok(p.to_string()),
                Reply::Server(m) => Err(ConvertError::server(m)),
            }
        }
    }

    fn report() -> SelectedFile {
        SelectedFile::new("/tmp/report.docx", "report.docx", 2048)
    }

    #[test]
    fn selecting_resolves_extension_and_default_format() {
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();

        let selection = workflow.selection().unwrap();
        assert_eq!(selection.file().extension, "DOCX");
        assert_eq!(selection.candidates()[..2], ["PDF", "TXT"]);
        assert_eq!(selection.output_format(), Some("PDF"));
        assert_eq!(workflow.status(), &ConversionStatus::Idle);
    }

    #[test]
    fn every_catalog_type_gets_a_default() {
        let mut workflow = Workflow::default();
        for ext in crate::catalog::supported_extensions() {
            let name = format!("file.{}", ext.to_lowercase());
            workflow
                .select(Some(SelectedFile::new("x", name, 1)))
                .unwrap();
            let selection = workflow.selection().unwrap();
            assert_eq!(
                selection.output_format(),
                crate::catalog::candidates_for(ext).first().copied()
            );
            assert!(selection.output_format().is_some(), "{} has no default", ext);
        }
    }

    #[test]
    fn unknown_extension_leaves_format_unset() {
        let mut workflow = Workflow::default();
        workflow
            .select(Some(SelectedFile::new("x", "Makefile", 1)))
            .unwrap();
        let selection = workflow.selection().unwrap();
        assert!(selection.candidates().is_empty());
        assert_eq!(selection.output_format(), None);
        assert!(!workflow.can_convert());
    }

    #[test]
    fn reselecting_the_same_file_is_idempotent() {
        let mut workflow = Workflow::default();
        let first_generation = workflow.select(Some(report())).unwrap();
        let first = workflow.selection().cloned();
        workflow.select(Some(report())).unwrap();
        assert_eq!(workflow.selection().cloned(), first);
        assert_eq!(workflow.generation(), first_generation + 1);
        assert_eq!(workflow.status(), &ConversionStatus::Idle);
    }

    #[test]
    fn removing_clears_everything() {
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();
        workflow.select(None).unwrap();
        assert!(workflow.selection().is_none());
        assert!(!workflow.can_convert());
    }

    #[tokio::test]
    async fn successful_conversion_builds_download_url() {
        let backend = FakeBackend::new(Reply::Path("converted/report.pdf"));
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();

        let status = workflow.convert(&backend).await.clone();
        assert_eq!(
            status,
            ConversionStatus::Success {
                file: "converted/report.pdf".to_string()
            }
        );
        assert_eq!(
            workflow.download_url().as_deref(),
            Some("download.php?file=converted/report.pdf")
        );
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn server_message_becomes_the_error() {
        let backend = FakeBackend::new(Reply::Server("corrupt file"));
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();

        let status = workflow.convert(&backend).await;
        assert_eq!(status, &ConversionStatus::Error("corrupt file".to_string()));
        assert!(workflow.download_url().is_none());
    }

    #[tokio::test]
    async fn convert_without_file_never_calls_backend() {
        let backend = FakeBackend::new(Reply::Path("x.pdf"));
        let mut workflow = Workflow::default();

        let status = workflow.convert(&backend).await;
        assert_eq!(
            status,
            &ConversionStatus::Error("Please select a file first.".to_string())
        );
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn convert_without_format_never_calls_backend() {
        let backend = FakeBackend::new(Reply::Path("x.pdf"));
        let mut workflow = Workflow::default();
        workflow
            .select(Some(SelectedFile::new("x", "blob.xyz", 1)))
            .unwrap();

        let status = workflow.convert(&backend).await;
        assert_eq!(status, &ConversionStatus::Error(MSG_NO_FORMAT.to_string()));
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn empty_path_is_not_a_success() {
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();
        let submission = workflow.begin_convert().unwrap();
        assert!(workflow.finish(submission.generation, Ok(String::new())));
        assert_eq!(
            workflow.status(),
            &ConversionStatus::Error(MSG_MISSING_FILE_PATH.to_string())
        );
    }

    #[test]
    fn second_convert_is_refused_while_uploading() {
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();

        let submission = workflow.begin_convert().unwrap();
        assert_eq!(submission.output_format, "PDF");
        assert!(workflow.status().is_uploading());
        assert!(!workflow.can_convert());

        assert!(matches!(workflow.begin_convert(), Err(ConvertError::Busy)));
        assert!(matches!(workflow.select(None), Err(ConvertError::Busy)));
        assert!(matches!(
            workflow.set_output_format("TXT"),
            Err(ConvertError::Busy)
        ));
        assert!(workflow.status().is_uploading());

        assert!(workflow.finish(submission.generation, Ok("converted/report.pdf".into())));
        assert!(workflow.can_convert());
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();
        let submission = workflow.begin_convert().unwrap();
        workflow.finish(submission.generation, Err(ConvertError::server("boom")));

        workflow.select(Some(report())).unwrap();
        assert!(!workflow.finish(submission.generation, Ok("late.pdf".into())));
        assert_eq!(workflow.status(), &ConversionStatus::Idle);
    }

    #[test]
    fn new_selection_or_format_change_resets_result() {
        let mut workflow = Workflow::default();
        workflow.select(Some(report())).unwrap();
        let submission = workflow.begin_convert().unwrap();
        workflow.finish(submission.generation, Ok("converted/report.pdf".into()));
        assert!(workflow.download_url().is_some());

        workflow.set_output_format("TXT").unwrap();
        assert_eq!(workflow.status(), &ConversionStatus::Idle);
        assert!(workflow.download_url().is_none());

        let submission = workflow.begin_convert().unwrap();
        assert_eq!(submission.output_format, "TXT");
        workflow.finish(submission.generation, Err(ConvertError::server("nope")));
        workflow
            .select(Some(SelectedFile::new("x", "photo.png", 1)))
            .unwrap();
        assert_eq!(workflow.status(), &ConversionStatus::Idle);
        assert_eq!(workflow.selection().unwrap().output_format(), Some("JPG"));
    }

    #[test]
    fn format_must_be_a_candidate() {
        let mut workflow = Workflow::default();
        assert!(workflow.set_output_format("PDF").is_err());

        workflow.select(Some(report())).unwrap();
        assert!(matches!(
            workflow.set_output_format("MP3"),
            Err(ConvertError::Validation(_))
        ));
        assert_eq!(workflow.selection().unwrap().output_format(), Some("PDF"));
    }

    #[test]
    fn suggestions_only_apply_to_their_selection() {
        let mut workflow = Workflow::default();
        let generation = workflow
            .select(Some(SelectedFile::new("x", "scan.heic", 1)))
            .unwrap();
        let extra = vec!["AVIF".to_string(), "jpg".to_string()];

        assert_eq!(workflow.apply_suggestions(generation, &extra), 1);
        assert!(workflow
            .selection()
            .unwrap()
            .candidates()
            .contains(&"AVIF".to_string()));
        workflow.set_output_format("AVIF").unwrap();

        workflow.select(Some(report())).unwrap();
        assert_eq!(workflow.apply_suggestions(generation, &extra), 0);
    }

    #[test]
    fn download_prefix_is_configurable() {
        let mut workflow = Workflow::new("files/");
        workflow.select(Some(report())).unwrap();
        let submission = workflow.begin_convert().unwrap();
        workflow.finish(submission.generation, Ok("a b.pdf".into()));
        assert_eq!(workflow.download_url().as_deref(), Some("files/a b.pdf"));
    }
}
