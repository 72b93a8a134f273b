//! Applying rotation decisions to documents.
//!
//! [`RotationCorrector`] walks the pages of a document in order, asks the
//! [`ModeController`] for a decision per page, writes non-zero corrections
//! into the page rotation metadata and saves the result. Page failures are
//! logged and leave that page untouched; open and save failures abort only
//! the document concerned.

use std::collections::{HashMap, HashSet};
use std::error::Error as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::document::{DocumentError, DocumentStore, PageDocument, Rotation};
use crate::orientation::anchors::{AnchorExtractor, PageObservation};
use crate::orientation::controller::ModeController;
use crate::orientation::decision::{RotationDecision, RotationDelta};
use crate::orientation::error::CorrectionError;
use crate::orientation::relative::ReferenceSet;
use crate::utils::config::AppConfig;
use crate::utils::file_utils;

/// Adds a delta to the current rotation metadata, modulo 360.
#[inline]
pub fn compose(current_degrees: i32, delta: RotationDelta) -> i32 {
    (current_degrees + delta.degrees()).rem_euclid(360)
}

/// Writes a correction into a page's rotation metadata.
///
/// # Returns
///
/// The new rotation, or `None` when the delta is zero and the page was left
/// untouched.
///
/// # Errors
///
/// Returns [`CorrectionError::RotationApply`] if the current rotation is not
/// a multiple of 90 or the document rejects the change.
pub fn apply_decision<D: PageDocument + ?Sized>(
    document: &mut D,
    page: usize,
    current_degrees: i32,
    delta: RotationDelta,
) -> Result<Option<Rotation>, CorrectionError> {
    if delta.is_none() {
        return Ok(None);
    }

    let rotation = Rotation::from_degrees(compose(current_degrees, delta)).ok_or(
        CorrectionError::RotationApply {
            page,
            source: DocumentError::UnsupportedRotation {
                degrees: current_degrees,
            },
        },
    )?;

    document
        .set_page_rotation(page, rotation)
        .map_err(|source| CorrectionError::RotationApply { page, source })?;

    Ok(Some(rotation))
}

/// What happened to one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    /// Zero-based page index.
    pub page: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_before: Option<i32>,
    /// Set only when the rotation metadata was changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_after: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<RotationDecision>,
    /// Why the page was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageReport {
    fn skipped(page: usize, error: &CorrectionError) -> Self {
        Self {
            page,
            rotation_before: None,
            rotation_after: None,
            decision: None,
            error: Some(error_chain(error)),
        }
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotation_after.is_some()
    }

    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.error.is_some()
    }
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub pages: Vec<PageReport>,
}

impl DocumentReport {
    /// Returns `true` if at least one page was rotated.
    pub fn is_corrected(&self) -> bool {
        self.pages.iter().any(PageReport::is_rotated)
    }

    pub fn rotated_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_rotated()).count()
    }

    pub fn skipped_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_skipped()).count()
    }
}

/// An input document and where its corrected copy goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl CorrectionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Pairs each input with its output path.
///
/// Inputs naming the same file are processed once, in first-seen order.
///
/// # Errors
///
/// Returns [`CorrectionError::OutputCollision`] if two inputs map to the
/// same output, and [`CorrectionError::OutputIsInput`] if an output would
/// replace an input document.
pub fn plan_jobs(
    inputs: &[PathBuf],
    output_dir: &Path,
    config: &AppConfig,
) -> Result<Vec<CorrectionJob>, CorrectionError> {
    let mut seen = HashSet::new();
    let unique: Vec<(&PathBuf, PathBuf)> = inputs
        .iter()
        .map(|input| (input, file_utils::path_key(input)))
        .filter(|(input, key)| {
            let first = seen.insert(key.clone());
            if !first {
                debug!(input = %input.display(), "Dropping duplicate input");
            }
            first
        })
        .collect();

    let input_keys: HashSet<&PathBuf> = unique.iter().map(|(_, key)| key).collect();
    let mut outputs: HashMap<PathBuf, &PathBuf> = HashMap::new();
    let mut jobs = Vec::with_capacity(unique.len());

    for (input, _) in &unique {
        let output = config.output_path(output_dir, input);
        let output_key = file_utils::path_key(&output);

        if input_keys.contains(&output_key) {
            return Err(CorrectionError::OutputIsInput { path: output });
        }
        if let Some(first) = outputs.insert(output_key, *input) {
            return Err(CorrectionError::OutputCollision {
                output,
                first: first.clone(),
                second: (*input).clone(),
            });
        }

        jobs.push(CorrectionJob::new((*input).clone(), output));
    }

    Ok(jobs)
}

/// The result for one document of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DocumentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentOutcome {
    #[inline]
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Returns `true` if the document was saved with at least one rotated page.
    pub fn is_corrected(&self) -> bool {
        self.report
            .as_ref()
            .is_some_and(DocumentReport::is_corrected)
    }
}

/// The results of a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub documents: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn failed_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.is_failed()).count()
    }

    pub fn corrected_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.is_corrected()).count()
    }
}

/// Drives page extraction, decisions and corrections over documents.
#[derive(Debug, Clone, Default)]
pub struct RotationCorrector {
    extractor: AnchorExtractor,
    reset_per_document: bool,
}

impl RotationCorrector {
    pub fn new(extractor: AnchorExtractor) -> Self {
        Self {
            extractor,
            reset_per_document: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(AnchorExtractor::new(config.min_fragment_chars))
            .with_reset_per_document(config.reset_per_document)
    }

    /// Clears the controller's reference before each document of a batch.
    #[must_use]
    pub fn with_reset_per_document(mut self, reset: bool) -> Self {
        self.reset_per_document = reset;
        self
    }

    /// Reads a page's rotation metadata and extracts its anchors.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::Extraction`] if the rotation, the text
    /// spans or the display size cannot be read. A missing native size is
    /// not an error; the display size is used instead.
    pub fn observe<D: PageDocument + ?Sized>(
        &self,
        document: &D,
        page: usize,
    ) -> Result<(i32, PageObservation), CorrectionError> {
        let extraction = |source| CorrectionError::Extraction { page, source };

        let rotation = document.page_rotation(page).map_err(extraction)?;
        let spans = document.text_spans(page).map_err(extraction)?;
        let display = document.display_size(page).map_err(extraction)?;
        let native = document.native_size(page).unwrap_or_else(|error| {
            debug!(page, %error, "Native page size unavailable, using display size");
            None
        });

        let observation = self.extractor.extract(&spans, display, native, rotation);
        Ok((rotation, observation))
    }

    fn correct_page<D: PageDocument + ?Sized>(
        &self,
        document: &mut D,
        page: usize,
        controller: &mut ModeController,
    ) -> Result<PageReport, CorrectionError> {
        let (rotation_before, observation) = self.observe(document, page)?;
        let decision = controller.decide(&observation, rotation_before);

        let applied = apply_decision(document, page, rotation_before, decision.delta)?;
        match applied {
            Some(rotation) => info!(
                page,
                from = rotation_before,
                delta = decision.delta.degrees(),
                to = rotation.degrees(),
                source = ?decision.source,
                "Rotated page"
            ),
            None => debug!(page, source = ?decision.source, "Page needs no rotation"),
        }

        Ok(PageReport {
            page,
            rotation_before: Some(rotation_before),
            rotation_after: applied.map(Rotation::degrees),
            decision: Some(decision),
            error: None,
        })
    }

    /// Corrects every page of `input` and saves the result to `output`.
    ///
    /// The output is written even when no page changed, so it always serves
    /// as a complete copy of the input.
    ///
    /// # Errors
    ///
    /// Returns [`CorrectionError::OutputIsInput`] if `output` is the input
    /// file, or [`CorrectionError::Open`] or [`CorrectionError::Save`]; page
    /// failures are recorded in the report instead.
    #[instrument(skip(self, store, controller), fields(input = %input.display()))]
    pub fn correct_document<S: DocumentStore>(
        &self,
        store: &S,
        controller: &mut ModeController,
        input: &Path,
        output: &Path,
    ) -> Result<DocumentReport, CorrectionError> {
        if file_utils::same_file(input, output) {
            return Err(CorrectionError::OutputIsInput {
                path: output.to_path_buf(),
            });
        }

        let mut document = store.open(input).map_err(|source| CorrectionError::Open {
            path: input.to_path_buf(),
            source,
        })?;

        let page_count = document.page_count();
        debug!(pages = page_count, mode = %controller.mode(), "Correcting document");

        let mut pages = Vec::with_capacity(page_count);
        for page in 0..page_count {
            match self.correct_page(&mut document, page, controller) {
                Ok(report) => pages.push(report),
                Err(error) => {
                    warn!(page, error = %error_chain(&error), "Skipping page");
                    pages.push(PageReport::skipped(page, &error));
                }
            }
        }

        document
            .save(output)
            .map_err(|source| CorrectionError::Save {
                path: output.to_path_buf(),
                source,
            })?;

        let report = DocumentReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            pages,
        };

        if report.is_corrected() {
            info!(
                output = %output.display(),
                rotated = report.rotated_pages(),
                "Saved corrected document"
            );
        } else {
            info!(output = %output.display(), "No correction needed, saved copy");
        }

        Ok(report)
    }

    /// Seeds the controller with the first page of `path` that has text.
    ///
    /// # Returns
    ///
    /// `true` if a reference was installed.
    pub fn capture_reference<S: DocumentStore>(
        &self,
        store: &S,
        controller: &mut ModeController,
        path: &Path,
    ) -> Result<bool, CorrectionError> {
        let document = store.open(path).map_err(|source| CorrectionError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        for page in 0..document.page_count() {
            match self.observe(&document, page) {
                Ok((_, observation)) => {
                    if let Some(reference) = ReferenceSet::new(observation) {
                        debug!(page, "Reference page found");
                        return Ok(controller.seed_reference(reference));
                    }
                }
                Err(error) => warn!(page, error = %error_chain(&error), "Skipping reference page"),
            }
        }

        warn!(path = %path.display(), "Reference document has no usable text");
        Ok(false)
    }

    /// Corrects documents one after another.
    ///
    /// A failed document is recorded and the batch moves on.
    pub fn correct_batch<S: DocumentStore>(
        &self,
        store: &S,
        controller: &mut ModeController,
        jobs: &[CorrectionJob],
    ) -> BatchReport {
        let mut batch = BatchReport::default();

        for job in jobs {
            if self.reset_per_document {
                controller.reset();
            }

            let outcome = match self.correct_document(store, controller, &job.input, &job.output) {
                Ok(report) => DocumentOutcome {
                    input: job.input.clone(),
                    output: job.output.clone(),
                    report: Some(report),
                    error: None,
                },
                Err(err) => {
                    error!(input = %job.input.display(), error = %error_chain(&err), "Document not corrected");
                    DocumentOutcome {
                        input: job.input.clone(),
                        output: job.output.clone(),
                        report: None,
                        error: Some(error_chain(&err)),
                    }
                }
            };
            batch.documents.push(outcome);
        }

        batch
    }
}

/// Formats an error with all of its sources, outermost first.
fn error_chain(error: &CorrectionError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
