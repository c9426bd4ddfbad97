//! Upload/detect flow controller.
//!
//! ```text
//! Idle ──select──▶ HasImage ──submit──▶ Submitting ──▶ Result | Error
//!   ▲                 │  ▲                                   │
//!   └──── reset ──────┘  └──────────── select ───────────────┘
//! ```
//!
//! The preview of the staged image is an owned [`Preview`] guard: dropping
//! it releases the underlying object URL. Replacing the image drops the old
//! guard before the new URL is created, and dropping the controller
//! releases whatever is still live.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::api::Predictor;
use crate::error::ApiError;
use crate::model::{ImageUpload, Prediction};
use crate::report::Report;

/// Message shown when submitting with nothing staged.
pub const NO_IMAGE_MESSAGE: &str = "Please select an image first";

/// Creates and releases displayable previews for selected images.
pub trait PreviewSource: Clone {
    /// The opaque selected blob (a browser `File`, or bytes in tests).
    type Image: Clone;

    /// Create a preview URL for `image`.
    fn create(&self, image: &Self::Image) -> String;

    /// Release a URL previously returned by [`PreviewSource::create`].
    fn release(&self, url: &str);
}

/// A live preview URL, released on drop.
pub struct Preview<S: PreviewSource> {
    url: String,
    source: S,
}

impl<S: PreviewSource> Preview<S> {
    fn acquire(source: &S, image: &S::Image) -> Self {
        let url = source.create(image);
        debug!("Preview created: {url}");
        Preview {
            url,
            source: source.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<S: PreviewSource> Drop for Preview<S> {
    fn drop(&mut self) {
        debug!("Preview released: {}", self.url);
        self.source.release(&self.url);
    }
}

struct Staged<S: PreviewSource> {
    image: S::Image,
    preview: Preview<S>,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Ready,
    Submitting,
    Done(Prediction),
    Failed(String),
}

/// Observable state of the flow.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectState {
    Idle,
    HasImage,
    Submitting,
    Result(Prediction),
    Error(String),
}

/// An in-flight submission. Pass the ticket back to [`DetectFlow::finish`].
#[derive(Debug, Clone)]
pub struct Submission<I> {
    pub image: I,
    pub ticket: u64,
}

pub struct DetectFlow<S: PreviewSource> {
    source: S,
    staged: Option<Staged<S>>,
    phase: Phase,
    /// Bumped on every select/reset so late completions can be recognised.
    generation: u64,
}

impl<S: PreviewSource> DetectFlow<S> {
    pub fn new(source: S) -> Self {
        DetectFlow {
            source,
            staged: None,
            phase: Phase::Ready,
            generation: 0,
        }
    }

    pub fn state(&self) -> DetectState {
        match (&self.phase, self.staged.is_some()) {
            (Phase::Submitting, _) => DetectState::Submitting,
            (Phase::Done(p), _) => DetectState::Result(p.clone()),
            (Phase::Failed(m), _) => DetectState::Error(m.clone()),
            (Phase::Ready, true) => DetectState::HasImage,
            (Phase::Ready, false) => DetectState::Idle,
        }
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.staged.as_ref().map(|s| s.preview.url())
    }

    pub fn has_image(&self) -> bool {
        self.staged.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn result(&self) -> Option<&Prediction> {
        match &self.phase {
            Phase::Done(p) => Some(p),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(m) => Some(m),
            _ => None,
        }
    }

    /// Stage a new image, replacing any previous one and clearing the
    /// previous result or error.
    pub fn select(&mut self, image: S::Image) {
        // Old preview must be released before the new one exists.
        self.staged = None;
        let preview = Preview::acquire(&self.source, &image);
        self.staged = Some(Staged { image, preview });
        self.phase = Phase::Ready;
        self.generation += 1;
    }

    /// Enter `Submitting` and hand out the staged image.
    ///
    /// Without an image this fails immediately and the flow shows the
    /// validation message; nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<Submission<S::Image>, ApiError> {
        let Some(staged) = &self.staged else {
            self.phase = Phase::Failed(NO_IMAGE_MESSAGE.into());
            return Err(ApiError::Validation(NO_IMAGE_MESSAGE.into()));
        };
        let image = staged.image.clone();
        self.phase = Phase::Submitting;
        Ok(Submission {
            image,
            ticket: self.generation,
        })
    }

    /// Apply the outcome of a submission. Returns `false` (and changes
    /// nothing) when the image was replaced or reset in the meantime.
    pub fn finish(&mut self, ticket: u64, outcome: Result<Prediction, ApiError>) -> bool {
        if ticket != self.generation || self.phase != Phase::Submitting {
            debug!("Ignoring stale prediction outcome (ticket {ticket})");
            return false;
        }
        self.phase = match outcome {
            Ok(p) => {
                info!("Detected {} ({})", p.label, p.confidence_label());
                Phase::Done(p)
            }
            Err(e) => {
                warn!("Detection failed: {e}");
                Phase::Failed(e.to_string())
            }
        };
        true
    }

    /// Drop the staged image and its preview; back to `Idle`.
    pub fn reset(&mut self) {
        self.staged = None;
        self.phase = Phase::Ready;
        self.generation += 1;
    }

    /// Report for the current result, dated `date`.
    pub fn report(&self, date: NaiveDate) -> Option<Report> {
        self.result().map(|p| Report::new(p.clone(), date))
    }
}

impl<S: PreviewSource<Image = ImageUpload>> DetectFlow<S> {
    /// Run a whole submission against `predictor`.
    pub async fn submit<P: Predictor>(&mut self, predictor: &P) -> Result<Prediction, ApiError> {
        let submission = self.begin_submit()?;
        let outcome = predictor.predict(submission.image).await;
        self.finish(submission.ticket, outcome.clone());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Created(String),
        Released(String),
    }

    /// Hands out `blob:N` URLs and records every create/release.
    #[derive(Clone, Default)]
    struct RecordingSource {
        events: Rc<RefCell<Vec<Event>>>,
        next: Rc<Cell<u32>>,
    }

    impl RecordingSource {
        fn live(&self) -> usize {
            let events = self.events.borrow();
            let created = events.iter().filter(|e| matches!(e, Event::Created(_))).count();
            created - (events.len() - created)
        }
    }

    impl PreviewSource for RecordingSource {
        type Image = ImageUpload;

        fn create(&self, _image: &ImageUpload) -> String {
            let n = self.next.get() + 1;
            self.next.set(n);
            let url = format!("blob:{n}");
            self.events.borrow_mut().push(Event::Created(url.clone()));
            url
        }

        fn release(&self, url: &str) {
            self.events.borrow_mut().push(Event::Released(url.to_string()));
        }
    }

    struct FakePredictor {
        calls: Cell<u32>,
        outcome: Result<Prediction, ApiError>,
    }

    impl FakePredictor {
        fn new(outcome: Result<Prediction, ApiError>) -> Self {
            FakePredictor {
                calls: Cell::new(0),
                outcome,
            }
        }
    }

    impl Predictor for FakePredictor {
        async fn predict(&self, _image: ImageUpload) -> Result<Prediction, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.outcome.clone()
        }
    }

    fn leaf(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.into(),
            mime: "image/jpeg".into(),
            bytes: vec![1, 2, 3],
        }
    }

    fn late_blight() -> Prediction {
        Prediction {
            label: "Late Blight".into(),
            confidence: 87.0,
            remedy: "Remove infected leaves and apply a copper-based fungicide.".into(),
        }
    }

    #[test]
    fn test_replacing_image_releases_before_creating() {
        let source = RecordingSource::default();
        let mut flow = DetectFlow::new(source.clone());

        flow.select(leaf("a.jpg"));
        flow.select(leaf("b.jpg"));
        assert_eq!(source.live(), 1);
        assert_eq!(flow.preview_url(), Some("blob:2"));
        assert_eq!(
            *source.events.borrow(),
            vec![
                Event::Created("blob:1".into()),
                Event::Released("blob:1".into()),
                Event::Created("blob:2".into()),
            ]
        );
    }

    #[test]
    fn test_reset_and_drop_release_preview() {
        let source = RecordingSource::default();
        let mut flow = DetectFlow::new(source.clone());
        flow.select(leaf("a.jpg"));
        flow.reset();
        assert_eq!(source.live(), 0);
        assert_eq!(flow.state(), DetectState::Idle);

        flow.select(leaf("b.jpg"));
        assert_eq!(source.live(), 1);
        drop(flow);
        assert_eq!(source.live(), 0);
    }

    #[tokio::test]
    async fn test_submit_without_image_makes_no_call() {
        let predictor = FakePredictor::new(Ok(late_blight()));
        let mut flow = DetectFlow::new(RecordingSource::default());

        let err = flow.submit(&predictor).await.unwrap_err();
        assert_eq!(err, ApiError::Validation(NO_IMAGE_MESSAGE.into()));
        assert_eq!(predictor.calls.get(), 0);
        assert_eq!(flow.state(), DetectState::Error(NO_IMAGE_MESSAGE.into()));
    }

    #[tokio::test]
    async fn test_successful_submit_shows_result_and_report() {
        let predictor = FakePredictor::new(Ok(late_blight()));
        let mut flow = DetectFlow::new(RecordingSource::default());
        flow.select(leaf("leaf.jpg"));
        assert_eq!(flow.state(), DetectState::HasImage);

        flow.submit(&predictor).await.unwrap();
        assert_eq!(predictor.calls.get(), 1);
        assert_eq!(flow.state(), DetectState::Result(late_blight()));

        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let text = flow.report(date).unwrap().plain_text();
        assert!(text.contains("Late Blight"));
        assert!(text.contains("87%"));
        assert!(text.contains("copper-based fungicide"));
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_submitting() {
        let predictor = FakePredictor::new(Err(ApiError::Remote("model unavailable".into())));
        let mut flow = DetectFlow::new(RecordingSource::default());
        flow.select(leaf("leaf.jpg"));

        flow.submit(&predictor).await.unwrap_err();
        assert!(!flow.is_submitting());
        assert_eq!(flow.error(), Some("model unavailable"));
        assert!(flow.has_image());
        assert!(flow.report(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).is_none());
    }

    #[test]
    fn test_new_selection_clears_result() {
        let mut flow = DetectFlow::new(RecordingSource::default());
        flow.select(leaf("a.jpg"));
        let sub = flow.begin_submit().unwrap();
        assert_eq!(flow.state(), DetectState::Submitting);
        assert!(flow.finish(sub.ticket, Ok(late_blight())));

        flow.select(leaf("b.jpg"));
        assert_eq!(flow.state(), DetectState::HasImage);
        assert!(flow.result().is_none());
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        let mut flow = DetectFlow::new(RecordingSource::default());
        flow.select(leaf("a.jpg"));
        let sub = flow.begin_submit().unwrap();

        flow.select(leaf("b.jpg"));
        assert!(!flow.finish(sub.ticket, Ok(late_blight())));
        assert_eq!(flow.state(), DetectState::HasImage);
    }
}
