//! Editor session: one slide, its source screenshot, and everything derived.
//!
//! The session owns the settings store and the composited-image cache. All
//! settings changes go through [`EditorSession::update_settings`], which runs
//! the regeneration gate and schedules recomposition. Composites come back
//! through [`EditorSession::finish`], which drops results that a newer
//! request has superseded.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::composite::{composite, CompositeError, CompositeOptions, CompositedImage};
use crate::decode::SourceImage;
use crate::export::{layout_slide, ExportLayout, TextVisibility};
use crate::geometry::NormalizedRect;
use crate::occlusion::occluded_text_ids;
use crate::scene::{SlideData, SlideElement};
use crate::schedule::{RegenerationScheduler, SchedulerConfig};
use crate::settings::{
    remix_eligible, ElementSettings, SettingsPatch, SettingsStore, SettingsUpdate,
};

/// Errors reported by an [`ImageRemixer`].
#[derive(Debug, Error)]
pub enum RemixError {
    /// The remix service rejected or failed the request.
    #[error("Remix failed: {0}")]
    Failed(String),

    /// The remix service did not answer in time.
    #[error("Remix timed out")]
    Timeout,
}

/// External service that regenerates an element's image instead of cropping it.
pub trait ImageRemixer {
    fn remix(
        &self,
        source: &SourceImage,
        element: &SlideElement,
    ) -> Result<CompositedImage, RemixError>;
}

/// A recomposition ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct RegenerationJob {
    pub element_id: String,
    pub stamp: u64,
    pub settings: ElementSettings,
}

pub struct EditorSession {
    slide: SlideData,
    source: Option<SourceImage>,
    store: SettingsStore,
    images: HashMap<String, CompositedImage>,
    errors: HashMap<String, String>,
    scheduler: RegenerationScheduler,
    remixer: Option<Box<dyn ImageRemixer>>,
    hidden_texts: HashSet<String>,
    show_text: bool,
}

impl EditorSession {
    pub fn new(slide: SlideData, source: Option<SourceImage>, config: SchedulerConfig) -> Self {
        let store = SettingsStore::for_slide(&slide);
        Self {
            slide,
            source,
            store,
            images: HashMap::new(),
            errors: HashMap::new(),
            scheduler: RegenerationScheduler::new(config),
            remixer: None,
            hidden_texts: HashSet::new(),
            show_text: true,
        }
    }

    pub fn with_remixer(mut self, remixer: Box<dyn ImageRemixer>) -> Self {
        self.remixer = Some(remixer);
        self
    }

    /// Replace the slide and source, discarding every edit and cached image.
    pub fn reload(&mut self, slide: SlideData, source: Option<SourceImage>) {
        self.store.reset(&slide);
        self.slide = slide;
        self.source = source;
        self.images.clear();
        self.errors.clear();
        self.scheduler.clear();
        self.hidden_texts.clear();
    }

    pub fn slide(&self) -> &SlideData {
        &self.slide
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn settings(&self, id: &str) -> ElementSettings {
        self.store.settings(id)
    }

    pub fn image(&self, id: &str) -> Option<&CompositedImage> {
        self.images.get(id)
    }

    /// Message of the last failed composite for `id`, if any.
    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn show_text(&self) -> bool {
        self.show_text
    }

    pub fn set_show_text(&mut self, show: bool) {
        self.show_text = show;
    }

    pub fn is_text_hidden(&self, id: &str) -> bool {
        self.hidden_texts.contains(id)
    }

    /// Flip the manual hide flag of a text element. Returns the new state.
    ///
    /// The next settings update recomputes occlusion and overrides this.
    pub fn toggle_text_hidden(&mut self, id: &str) -> bool {
        if self.hidden_texts.remove(id) {
            false
        } else {
            self.hidden_texts.insert(id.to_string());
            true
        }
    }

    /// Where the element is drawn, after overrides and crop insets.
    pub fn visual_rect(&self, id: &str) -> Option<NormalizedRect> {
        let element = self.slide.element(id)?;
        Some(self.store.settings(id).visual_rect(&element.position))
    }

    /// Apply a settings change and schedule recomposition when needed.
    pub fn update_settings(
        &mut self,
        id: &str,
        patch: &SettingsPatch,
        now_ms: f64,
    ) -> SettingsUpdate {
        let update = self.store.update(id, patch, self.images.contains_key(id));
        self.hidden_texts = occluded_text_ids(&self.slide, &self.store);

        if !update.current.is_image() {
            self.scheduler.cancel(id);
        } else if update.regenerate.is_some() && self.source.is_some() {
            self.scheduler.schedule(id, now_ms);
        }
        update
    }

    /// Earliest time [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<f64> {
        self.scheduler.next_deadline()
    }

    /// Jobs whose debounce window has elapsed.
    pub fn take_jobs(&mut self, now_ms: f64) -> Vec<RegenerationJob> {
        self.scheduler
            .take_due(now_ms)
            .into_iter()
            .filter(|d| self.slide.element(&d.element_id).is_some())
            .map(|d| RegenerationJob {
                settings: self.store.settings(&d.element_id),
                element_id: d.element_id,
                stamp: d.stamp,
            })
            .collect()
    }

    /// Produce the image for `job`. Does not touch the cache.
    ///
    /// Returns `Ok(None)` when no source is loaded or the element is gone.
    pub fn run_job(
        &self,
        job: &RegenerationJob,
    ) -> Result<Option<CompositedImage>, CompositeError> {
        let Some(element) = self.slide.element(&job.element_id) else {
            return Ok(None);
        };
        self.render(element, &job.settings, true)
    }

    /// Store the outcome of `job`, unless a newer request superseded it.
    ///
    /// Returns whether the outcome was accepted.
    pub fn finish(
        &mut self,
        job: &RegenerationJob,
        outcome: Result<Option<CompositedImage>, CompositeError>,
    ) -> bool {
        if !self.scheduler.is_current(&job.element_id, job.stamp) {
            tracing::debug!(
                element = %job.element_id,
                stamp = job.stamp,
                "dropping stale composite"
            );
            return false;
        }

        match outcome {
            Ok(Some(image)) => {
                self.errors.remove(&job.element_id);
                self.images.insert(job.element_id.clone(), image);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(element = %job.element_id, error = %err, "composite failed");
                self.errors.insert(job.element_id.clone(), err.to_string());
            }
        }
        true
    }

    /// Run every due job synchronously. Returns how many results were stored.
    pub fn poll(&mut self, now_ms: f64) -> usize {
        let jobs = self.take_jobs(now_ms);
        let mut accepted = 0;
        for job in &jobs {
            let outcome = self.run_job(job);
            if self.finish(job, outcome) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Composite `id` with uncommitted settings, for a live editor preview.
    ///
    /// Always uses the deterministic compositor.
    pub fn preview(
        &self,
        id: &str,
        settings: &ElementSettings,
    ) -> Result<Option<CompositedImage>, CompositeError> {
        let Some(element) = self.slide.element(id) else {
            return Ok(None);
        };
        self.render(element, settings, false)
    }

    fn render(
        &self,
        element: &SlideElement,
        settings: &ElementSettings,
        allow_remix: bool,
    ) -> Result<Option<CompositedImage>, CompositeError> {
        let Some(source) = &self.source else {
            return Ok(None);
        };

        let remixer = self
            .remixer
            .as_deref()
            .filter(|_| allow_remix && remix_eligible(settings));
        if let Some(remixer) = remixer {
            match remixer.remix(source, element) {
                Ok(image) => return Ok(Some(image)),
                Err(err) => {
                    tracing::warn!(
                        element = %element.id,
                        error = %err,
                        "remix failed, falling back to composite"
                    );
                }
            }
        }

        let (natural_width, natural_height) = source.natural_size();
        let options = CompositeOptions::from_settings(settings);
        composite(source, natural_width, natural_height, &element.position, &options).map(Some)
    }

    /// Placement of every visible element for the deck serializer.
    pub fn export_layout(&self) -> ExportLayout {
        layout_slide(
            &self.slide,
            &self.store,
            &self.images,
            TextVisibility {
                show_text: self.show_text,
                hidden: &self.hidden_texts,
            },
        )
    }
}
