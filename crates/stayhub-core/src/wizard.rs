//! The onboarding wizard controller.
//!
//! `WizardController` owns one [`WizardSession`] and drives it through the
//! step table of its category. Callers edit the session through
//! [`WizardController::update`] and the typed helpers, then call
//! [`WizardController::next`] / [`WizardController::back`].

use std::sync::Arc;
use std::time::Duration;

use stayhub_domain::{
    GeoPoint, ImageSlot, InventoryItem, NearbyPlace, PlacePrediction, PropertyCategory,
    WizardSession,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::autosave::{DraftAutosaver, DEFAULT_AUTOSAVE_DELAY};
use crate::draft_store::{restore_session, DraftKey, DraftStore, DEFAULT_DRAFT_PREFIX};
use crate::gateway::{LocationGateway, PropertyGateway};
use crate::location::{nearby_place_from, LocationProvider};
use crate::reconcile::{Reconciler, SubmissionOutcome, SubmissionPlan, SubmissionProgress};
use crate::steps::{steps_for, StepContext, StepDefinition};
use crate::validation::ValidationError;
use crate::CoreError;

#[derive(Debug, Clone)]
pub struct WizardSettings {
    pub autosave_delay: Duration,
    pub draft_prefix: String,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
            draft_prefix: DEFAULT_DRAFT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit { property_id: String },
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: usize, to: usize },
    Blocked { step: usize, message: String },
    Retreated { to: usize },
    /// `back()` on the first step; the host should close the wizard.
    Exited,
    Submitted(SubmissionOutcome),
    SubmissionFailed { message: String },
}

pub struct WizardController {
    mode: WizardMode,
    key: DraftKey,
    steps: &'static [StepDefinition],
    session: WizardSession,
    error: Option<String>,
    properties: Arc<dyn PropertyGateway>,
    drafts: Arc<dyn DraftStore>,
    autosaver: Option<DraftAutosaver>,
    background: Option<JoinHandle<Option<String>>>,
}

impl WizardController {
    /// Starts (or resumes from the local draft) onboarding of a new property.
    pub fn open_new(
        category: PropertyCategory,
        properties: Arc<dyn PropertyGateway>,
        drafts: Arc<dyn DraftStore>,
        settings: &WizardSettings,
    ) -> Self {
        let key = DraftKey::new_property(&settings.draft_prefix);
        let session = restore_session(drafts.as_ref(), &key, category);
        let autosaver = DraftAutosaver::new(drafts.clone(), key.clone(), settings.autosave_delay);
        info!(key = %key, category = %category, step = session.current_step, "opened wizard");
        Self::assemble(
            WizardMode::Create,
            key,
            session,
            properties,
            drafts,
            Some(autosaver),
        )
    }

    /// Opens an existing property for editing, hydrated from the backend.
    pub async fn open_existing(
        property_id: &str,
        properties: Arc<dyn PropertyGateway>,
        drafts: Arc<dyn DraftStore>,
        settings: &WizardSettings,
    ) -> Result<Self, CoreError> {
        let record = properties.get_property(property_id).await?;
        let session = record.into_session();
        let key = DraftKey::existing(&settings.draft_prefix, property_id);
        info!(property_id, category = %session.category(), "opened wizard for editing");
        Ok(Self::assemble(
            WizardMode::Edit {
                property_id: property_id.to_string(),
            },
            key,
            session,
            properties,
            drafts,
            None,
        ))
    }

    fn assemble(
        mode: WizardMode,
        key: DraftKey,
        mut session: WizardSession,
        properties: Arc<dyn PropertyGateway>,
        drafts: Arc<dyn DraftStore>,
        autosaver: Option<DraftAutosaver>,
    ) -> Self {
        let steps = steps_for(session.category());
        session.current_step = session.current_step.clamp(1, steps.len());
        let loaded: Vec<String> = session
            .room_types
            .iter()
            .filter_map(|item| item.backend_id.clone())
            .collect();
        session.persisted_room_ids.extend(loaded);
        Self {
            mode,
            key,
            steps,
            session,
            error: None,
            properties,
            drafts,
            autosaver,
            background: None,
        }
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn draft_key(&self) -> &DraftKey {
        &self.key
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    pub fn current_step(&self) -> usize {
        self.session.current_step
    }

    pub fn current_definition(&self) -> &'static StepDefinition {
        &self.steps[self.session.current_step - 1]
    }

    pub fn is_last_step(&self) -> bool {
        self.session.current_step == self.steps.len()
    }

    /// Inline error for the current step, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// "Step 3 of 9"
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.session.current_step, self.steps.len())
    }

    /// Applies an edit to the session and schedules an autosave.
    ///
    /// The step index and the backend bookkeeping are owned by the
    /// controller; changes the edit makes to them are discarded.
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut WizardSession),
    {
        let step = self.session.current_step;
        let parent_id = self.session.persisted_parent_id.clone();
        let room_ids = self.session.persisted_room_ids.clone();
        edit(&mut self.session);
        self.session.persisted_parent_id = parent_id;
        self.session.persisted_room_ids = room_ids;
        self.steps = steps_for(self.session.category());
        self.session.current_step = step.clamp(1, self.steps.len());
        self.autosave();
    }

    /// Discards all edits and returns to step 1.
    ///
    /// Records that already exist on the backend stay tracked, so the next
    /// submission updates the parent and deletes inventory left out.
    pub fn reset(&mut self) {
        let mut fresh = WizardSession::new(self.session.category());
        fresh.persisted_parent_id = match &self.mode {
            WizardMode::Edit { property_id } => Some(property_id.clone()),
            WizardMode::Create => self.session.persisted_parent_id.take(),
        };
        fresh.persisted_room_ids = std::mem::take(&mut self.session.persisted_room_ids);
        self.session = fresh;
        self.error = None;
        if let Some(handle) = self.background.take() {
            handle.abort();
        }
        let tracked = self.session.persisted_parent_id.is_some()
            || !self.session.persisted_room_ids.is_empty();
        match self.autosaver.as_mut() {
            Some(saver) if tracked => saver.save_now(&self.session),
            Some(saver) => {
                saver.cancel();
                self.remove_draft();
            }
            None => self.remove_draft(),
        }
        debug!(key = %self.key, tracked, "wizard reset");
    }

    /// Validates the current step and moves forward, submitting on the last step.
    pub async fn next(&mut self) -> Transition {
        self.harvest_background().await;
        let step = self.current_definition();
        let from = self.session.current_step;
        if let Err(err) = step.validate(&self.context()) {
            debug!(step = from, kind = ?step.kind, message = %err.message, "step blocked");
            self.error = Some(err.message.clone());
            return Transition::Blocked {
                step: from,
                message: err.message,
            };
        }
        if self.is_last_step() {
            return self.submit().await;
        }

        let to = from + 1;
        self.session.current_step = to;
        self.error = None;
        let target = self.current_definition();
        debug!(from, to, kind = ?target.kind, "step advanced");
        if !step.kind.is_otp() && !target.kind.is_otp() {
            self.spawn_background_save();
        }
        self.autosave();
        Transition::Advanced { from, to }
    }

    pub fn back(&mut self) -> Transition {
        self.error = None;
        if self.session.current_step <= 1 {
            return Transition::Exited;
        }
        self.session.current_step -= 1;
        self.autosave();
        Transition::Retreated {
            to: self.session.current_step,
        }
    }

    /// Reconciles the session with the backend. Reached only from `next()`
    /// on the last step; every step is validated again first.
    ///
    /// On failure nothing is rolled back: ids obtained so far stay in the
    /// session so a retry updates instead of creating duplicates.
    async fn submit(&mut self) -> Transition {
        if let Some((step, err)) = self.first_invalid_step() {
            warn!(step, message = %err.message, "submission blocked by an earlier step");
            self.error = Some(err.message.clone());
            return Transition::Blocked {
                step,
                message: err.message,
            };
        }
        self.flush_background().await;
        let mut progress = SubmissionProgress::default();
        let result = {
            let plan = SubmissionPlan {
                draft: &self.session.property_draft,
                room_types: &self.session.room_types,
                persisted_parent_id: self.session.persisted_parent_id.as_deref(),
                previously_persisted: &self.session.persisted_room_ids,
            };
            Reconciler::new(self.properties.as_ref())
                .submit(&plan, &mut progress)
                .await
        };
        self.apply_progress(&progress);

        match result {
            Ok(outcome) => {
                self.error = None;
                if let Some(saver) = self.autosaver.as_mut() {
                    saver.cancel();
                }
                self.remove_draft();
                info!(property_id = %outcome.property_id, "property submitted");
                Transition::Submitted(outcome)
            }
            Err(err) => {
                let message = err.user_message();
                warn!(error = %err, parent = ?progress.parent_id, "submission failed");
                self.error = Some(message.clone());
                self.autosave();
                Transition::SubmissionFailed { message }
            }
        }
    }

    pub fn add_room_type(&mut self, item: InventoryItem) -> Uuid {
        let local_id = item.local_id;
        self.session.room_types.push(item);
        self.autosave();
        local_id
    }

    pub fn update_room_type<F>(&mut self, local_id: Uuid, edit: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut InventoryItem),
    {
        let item = self
            .session
            .room_type_mut(local_id)
            .ok_or_else(|| CoreError::NotFound(format!("room type {local_id}")))?;
        edit(item);
        self.autosave();
        Ok(())
    }

    /// Removes an item; a persisted one is deleted remotely on submission.
    pub fn remove_room_type(&mut self, local_id: Uuid) -> Option<InventoryItem> {
        let index = self
            .session
            .room_types
            .iter()
            .position(|item| item.local_id == local_id)?;
        let removed = self.session.room_types.remove(index);
        self.autosave();
        Some(removed)
    }

    /// Attaches uploaded image URLs to a slot. The cover keeps the last URL.
    pub fn attach_images(&mut self, slot: ImageSlot, urls: Vec<String>) -> Result<(), CoreError> {
        if urls.is_empty() {
            return Ok(());
        }
        match slot {
            ImageSlot::Cover => {
                self.session.property_draft.base.cover_image = urls.into_iter().last();
            }
            ImageSlot::Gallery => self.session.property_draft.base.gallery.extend(urls),
            ImageSlot::RoomType(local_id) => {
                let item = self
                    .session
                    .room_type_mut(local_id)
                    .ok_or_else(|| CoreError::NotFound(format!("room type {local_id}")))?;
                item.images.extend(urls);
            }
        }
        self.autosave();
        Ok(())
    }

    pub fn remove_image(&mut self, slot: ImageSlot, url: &str) -> bool {
        let removed = match slot {
            ImageSlot::Cover => {
                let cover = &mut self.session.property_draft.base.cover_image;
                if cover.as_deref() == Some(url) {
                    *cover = None;
                    true
                } else {
                    false
                }
            }
            ImageSlot::Gallery => {
                retain_without(&mut self.session.property_draft.base.gallery, url)
            }
            ImageSlot::RoomType(local_id) => self
                .session
                .room_type_mut(local_id)
                .is_some_and(|item| retain_without(&mut item.images, url)),
        };
        if removed {
            self.autosave();
        }
        removed
    }

    /// Fills coordinates from the device and the address from reverse geocoding.
    ///
    /// A geolocation failure sets the inline error. A geocoding failure keeps
    /// the coordinates and leaves the address untouched.
    pub async fn use_current_location(
        &mut self,
        provider: &dyn LocationProvider,
        geocoder: &dyn LocationGateway,
    ) -> Result<GeoPoint, CoreError> {
        let point = match provider.current_position().await {
            Ok(point) => point,
            Err(err) => {
                warn!(error = %err, "current location unavailable");
                self.error = Some(err.to_string());
                return Err(err.into());
            }
        };
        self.session.property_draft.base.location = Some(point);
        match geocoder.reverse_geocode(point).await {
            Ok(address) => self
                .session
                .property_draft
                .base
                .address
                .merge_from(&address),
            Err(err) => warn!(%point, error = %err, "reverse geocoding failed"),
        }
        self.error = None;
        self.autosave();
        Ok(point)
    }

    pub async fn search_places(
        &self,
        query: &str,
        gateway: &dyn LocationGateway,
    ) -> Result<Vec<PlacePrediction>, CoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        gateway.search_places(query).await
    }

    /// Adds a search result to the nearby places, measuring its distance from
    /// the property when coordinates are set.
    pub async fn add_nearby_place(
        &mut self,
        prediction: &PlacePrediction,
        gateway: &dyn LocationGateway,
    ) -> NearbyPlace {
        let origin = self.session.property_draft.base.location;
        let place = nearby_place_from(prediction, origin, gateway).await;
        self.session
            .property_draft
            .base
            .nearby_places
            .push(place.clone());
        self.autosave();
        place
    }

    pub fn remove_nearby_place(&mut self, index: usize) -> Option<NearbyPlace> {
        let places = &mut self.session.property_draft.base.nearby_places;
        if index >= places.len() {
            return None;
        }
        let removed = places.remove(index);
        self.autosave();
        Some(removed)
    }

    /// Waits for any in-flight background save and adopts its id.
    pub async fn flush_background(&mut self) {
        if let Some(handle) = self.background.take() {
            self.adopt_background_result(handle.await);
        }
    }

    /// Writes any pending autosave immediately.
    pub fn flush_draft(&mut self) {
        if let Some(saver) = self.autosaver.as_mut() {
            saver.flush();
        }
    }

    fn context(&self) -> StepContext<'_> {
        StepContext {
            draft: &self.session.property_draft,
            room_types: &self.session.room_types,
        }
    }

    fn remove_draft(&self) {
        if let Err(err) = self.drafts.remove(&self.key) {
            warn!(key = %self.key, error = %err, "failed to remove wizard draft");
        }
    }

    fn first_invalid_step(&self) -> Option<(usize, ValidationError)> {
        let ctx = self.context();
        self.steps
            .iter()
            .enumerate()
            .find_map(|(index, step)| step.validate(&ctx).err().map(|err| (index + 1, err)))
    }

    fn autosave(&mut self) {
        if let Some(saver) = self.autosaver.as_mut() {
            saver.schedule(self.session.clone());
        }
    }

    async fn harvest_background(&mut self) {
        if self
            .background
            .as_ref()
            .is_some_and(|handle| handle.is_finished())
        {
            self.flush_background().await;
        }
    }

    fn adopt_background_result(&mut self, result: Result<Option<String>, tokio::task::JoinError>) {
        match result {
            Ok(Some(id)) if self.session.persisted_parent_id.is_none() => {
                debug!(property_id = %id, "background save created property");
                self.session.persisted_parent_id = Some(id);
                self.autosave();
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "background save task failed"),
        }
    }

    fn spawn_background_save(&mut self) {
        if self.background.is_some() {
            debug!("background save already in flight");
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            return;
        };
        let gateway = Arc::clone(&self.properties);
        let draft = self.session.property_draft.clone();
        let parent_id = self.session.persisted_parent_id.clone();
        self.background = Some(runtime.spawn(async move {
            match parent_id {
                Some(id) => match gateway.update_property(&id, &draft).await {
                    Ok(()) => Some(id),
                    Err(err) => {
                        warn!(property_id = %id, error = %err, "background update failed");
                        None
                    }
                },
                None => match gateway.create_property(&draft).await {
                    Ok(id) => Some(id),
                    Err(err) => {
                        warn!(error = %err, "background create failed");
                        None
                    }
                },
            }
        }));
    }

    fn apply_progress(&mut self, progress: &SubmissionProgress) {
        if let Some(parent_id) = &progress.parent_id {
            self.session.persisted_parent_id = Some(parent_id.clone());
        }
        for (local_id, backend_id) in &progress.created {
            if let Some(item) = self.session.room_type_mut(*local_id) {
                item.backend_id = Some(backend_id.clone());
            }
            self.session.persisted_room_ids.insert(backend_id.clone());
        }
        for deleted in &progress.deleted {
            self.session.persisted_room_ids.remove(deleted);
        }
    }
}

fn retain_without(urls: &mut Vec<String>, url: &str) -> bool {
    let before = urls.len();
    urls.retain(|existing| existing != url);
    urls.len() != before
}
