//! State for images whose real source is assigned only once they approach the
//! viewport.
//!
//! [`DeferredImage`] is the small one-way state machine behind the lazy image
//! component, and [`ObservationSlot`] owns whatever visibility registration the
//! host handed out so it is released exactly once.

/// 1×1 transparent GIF shown until the real source is assigned.
pub const PLACEHOLDER_SRC: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Where a deferred image is in its lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No source assigned; the placeholder is rendered.
    Unloaded,
    /// Source assigned, waiting for the browser to finish loading it.
    Loading,
    /// The image reported load completion.
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredImage {
    source: String,
    priority: bool,
    phase: LoadPhase,
}

impl DeferredImage {
    /// Priority images start in [`LoadPhase::Loading`] with their source set.
    #[must_use]
    pub fn new(source: impl Into<String>, priority: bool) -> Self {
        let phase = if priority {
            LoadPhase::Loading
        } else {
            LoadPhase::Unloaded
        };
        Self {
            source: source.into(),
            priority,
            phase,
        }
    }

    #[must_use]
    pub fn requested_source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn is_priority(&self) -> bool {
        self.priority
    }

    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Empty until revealed, then always the requested source.
    #[must_use]
    pub fn current_source(&self) -> &str {
        match self.phase {
            LoadPhase::Unloaded => "",
            LoadPhase::Loading | LoadPhase::Loaded => &self.source,
        }
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.phase, LoadPhase::Loaded)
    }

    /// Whether this state was built from the same inputs.
    #[must_use]
    pub fn targets(&self, source: &str, priority: bool) -> bool {
        self.source == source && self.priority == priority
    }

    /// Value for the `src` attribute.
    #[must_use]
    pub fn rendered_src(&self) -> &str {
        match self.phase {
            LoadPhase::Unloaded => PLACEHOLDER_SRC,
            LoadPhase::Loading | LoadPhase::Loaded => &self.source,
        }
    }

    /// Assigns the real source. Returns `false` if it was already assigned.
    pub fn reveal(&mut self) -> bool {
        if self.phase == LoadPhase::Unloaded {
            self.phase = LoadPhase::Loading;
            true
        } else {
            false
        }
    }

    /// Records load completion. Ignored unless the real source is assigned,
    /// so the placeholder's own load event never counts.
    pub fn mark_loaded(&mut self) -> bool {
        if self.phase == LoadPhase::Loading {
            self.phase = LoadPhase::Loaded;
            true
        } else {
            false
        }
    }

    /// Catches up with an element that finished loading before anything was
    /// listening for its `load` event, as happens when a server-rendered
    /// source completes ahead of hydration.
    pub fn sync_complete(&mut self, complete: bool) -> bool {
        complete && self.mark_loaded()
    }

    /// The image is only hidden while the real source is streaming in.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        !matches!(self.phase, LoadPhase::Loading)
    }

    #[must_use]
    pub const fn opacity_class(&self) -> &'static str {
        if self.is_visible() {
            "opacity-100"
        } else {
            "opacity-0"
        }
    }
}

/// A live visibility registration handed out by the host.
pub trait Observation {
    /// Stops delivering notifications. Must tolerate being called after the
    /// host already stopped on its own.
    fn disconnect(&self);
}

/// Owns at most one [`Observation`] and disconnects it exactly once, either on
/// [`ObservationSlot::release`] or when the slot is dropped.
pub struct ObservationSlot<O: Observation> {
    active: Option<O>,
}

impl<O: Observation> Default for ObservationSlot<O> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<O: Observation> ObservationSlot<O> {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Stores a new registration, releasing the previous one first.
    pub fn hold(&mut self, observation: O) {
        self.release();
        self.active = Some(observation);
    }

    pub fn release(&mut self) {
        if let Some(observation) = self.active.take() {
            observation.disconnect();
        }
    }
}

impl<O: Observation> Drop for ObservationSlot<O> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Runs the creation step for a deferred image.
///
/// Any previous registration in `slot` is released. Priority images are
/// revealed without registering anything, and images that already have their
/// source need nothing more; otherwise `register` is asked for a new
/// observation. If registration fails the image is revealed immediately
/// and the error is returned so the caller can report it.
///
/// # Errors
///
/// Returns the error produced by `register`.
pub fn arm<O, E>(
    state: &mut DeferredImage,
    slot: &mut ObservationSlot<O>,
    register: impl FnOnce() -> Result<O, E>,
) -> Result<(), E>
where
    O: Observation,
{
    slot.release();
    if state.is_priority() {
        state.reveal();
        return Ok(());
    }
    if state.phase() != LoadPhase::Unloaded {
        return Ok(());
    }
    match register() {
        Ok(observation) => {
            slot.hold(observation);
            Ok(())
        }
        Err(err) => {
            state.reveal();
            Err(err)
        }
    }
}

/// Brings `current` in line with the latest inputs and re-runs [`arm`].
///
/// Unchanged inputs keep their progress, since a reveal or a load may already
/// have happened. Changed inputs start over from a fresh [`DeferredImage`].
/// Returns the state to publish together with the outcome of [`arm`].
pub fn resync<O, E>(
    current: &DeferredImage,
    source: String,
    priority: bool,
    slot: &mut ObservationSlot<O>,
    register: impl FnOnce() -> Result<O, E>,
) -> (DeferredImage, Result<(), E>)
where
    O: Observation,
{
    let mut next = if current.targets(&source, priority) {
        current.clone()
    } else {
        DeferredImage::new(source, priority)
    };
    let armed = arm(&mut next, slot, register);
    (next, armed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mockall::mock;

    mock! {
        pub Observer {}
        impl Observation for Observer {
            fn disconnect(&self);
        }
    }

    fn observer_expecting(disconnects: usize) -> MockObserver {
        let mut observer = MockObserver::new();
        observer.expect_disconnect().times(disconnects).return_const(());
        observer
    }

    // === DeferredImage transitions ===

    #[test]
    fn test_priority_image_starts_with_source() {
        let state = DeferredImage::new("hero.webp", true);
        assert_eq!(state.current_source(), "hero.webp");
        assert_eq!(state.rendered_src(), "hero.webp");
        assert_matches!(state.phase(), LoadPhase::Loading);
    }

    #[test]
    fn test_deferred_image_starts_empty() {
        let state = DeferredImage::new("a.png", false);
        assert_eq!(state.current_source(), "");
        assert_eq!(state.rendered_src(), PLACEHOLDER_SRC);
        assert_matches!(state.phase(), LoadPhase::Unloaded);
        assert!(!state.is_loaded());
    }

    #[test]
    fn test_reveal_is_one_shot() {
        let mut state = DeferredImage::new("a.png", false);
        assert!(state.reveal());
        assert_eq!(state.current_source(), "a.png");

        assert!(!state.reveal());
        assert_eq!(state.current_source(), "a.png");
        assert_matches!(state.phase(), LoadPhase::Loading);
    }

    #[test]
    fn test_source_never_reverts_after_load() {
        let mut state = DeferredImage::new("a.png", false);
        state.reveal();
        state.mark_loaded();
        state.reveal();
        assert_eq!(state.current_source(), "a.png");
        assert_matches!(state.phase(), LoadPhase::Loaded);
    }

    #[test]
    fn test_placeholder_load_event_is_ignored() {
        let mut state = DeferredImage::new("a.png", false);
        assert!(!state.mark_loaded());
        assert!(!state.is_loaded());
        assert_eq!(state.current_source(), "");
    }

    #[test]
    fn test_loaded_only_after_load_signal() {
        let mut state = DeferredImage::new("a.png", false);
        state.reveal();
        assert!(!state.is_loaded());
        assert!(state.mark_loaded());
        assert!(state.is_loaded());
        assert!(!state.mark_loaded());
    }

    #[test]
    fn test_opacity_follows_phase() {
        let mut state = DeferredImage::new("a.png", false);
        assert_eq!(state.opacity_class(), "opacity-100");
        state.reveal();
        assert_eq!(state.opacity_class(), "opacity-0");
        state.mark_loaded();
        assert_eq!(state.opacity_class(), "opacity-100");
    }

    #[test]
    fn test_targets_compares_inputs() {
        let state = DeferredImage::new("a.png", false);
        assert!(state.targets("a.png", false));
        assert!(!state.targets("a.png", true));
        assert!(!state.targets("b.png", false));
    }

    // === ObservationSlot ===

    #[test]
    fn test_slot_release_disconnects_once() {
        let mut slot = ObservationSlot::default();
        slot.hold(observer_expecting(1));
        assert!(slot.is_active());

        slot.release();
        slot.release();
        assert!(!slot.is_active());
    }

    #[test]
    fn test_slot_drop_disconnects() {
        let mut slot = ObservationSlot::default();
        slot.hold(observer_expecting(1));
        drop(slot);
    }

    #[test]
    fn test_slot_hold_replaces_previous() {
        let mut slot = ObservationSlot::default();
        slot.hold(observer_expecting(1));
        slot.hold(observer_expecting(1));
    }

    // === arm ===

    #[test]
    fn test_arm_priority_registers_nothing() {
        let mut state = DeferredImage::new("hero.webp", true);
        let mut slot = ObservationSlot::<MockObserver>::default();

        let result = arm(&mut state, &mut slot, || -> Result<MockObserver, ()> {
            panic!("priority images must not register an observer")
        });

        assert_eq!(result, Ok(()));
        assert!(!slot.is_active());
        assert_eq!(state.current_source(), "hero.webp");
    }

    #[test]
    fn test_arm_registers_observer_for_deferred_image() {
        let mut state = DeferredImage::new("a.png", false);
        let mut slot = ObservationSlot::default();

        let result = arm(&mut state, &mut slot, || Ok::<_, ()>(observer_expecting(1)));

        assert_eq!(result, Ok(()));
        assert!(slot.is_active());
        assert_eq!(state.current_source(), "");
    }

    #[test]
    fn test_arm_failure_reveals_immediately() {
        let mut state = DeferredImage::new("a.png", false);
        let mut slot = ObservationSlot::<MockObserver>::default();

        let result = arm(&mut state, &mut slot, || Err("unsupported"));

        assert_eq!(result, Err("unsupported"));
        assert!(!slot.is_active());
        assert_eq!(state.current_source(), "a.png");
    }

    #[test]
    fn test_arm_skips_revealed_image() {
        let mut state = DeferredImage::new("a.png", false);
        state.reveal();
        let mut slot = ObservationSlot::<MockObserver>::default();

        let result = arm(&mut state, &mut slot, || -> Result<MockObserver, ()> {
            panic!("revealed images must not register an observer")
        });

        assert_eq!(result, Ok(()));
        assert!(!slot.is_active());
    }

    #[test]
    fn test_rearm_releases_previous_observation() {
        let mut state = DeferredImage::new("a.png", false);
        let mut slot = ObservationSlot::default();
        arm(&mut state, &mut slot, || Ok::<_, ()>(observer_expecting(1))).unwrap();

        let mut state = DeferredImage::new("b.png", true);
        arm(&mut state, &mut slot, || Ok::<_, ()>(observer_expecting(0))).unwrap();
        assert!(!slot.is_active());
    }

    // === sync_complete ===

    #[test]
    fn test_sync_complete_marks_loading_image_loaded() {
        let mut state = DeferredImage::new("hero.webp", true);
        assert!(state.sync_complete(true));
        assert_matches!(state.phase(), LoadPhase::Loaded);
        assert_eq!(state.opacity_class(), "opacity-100");
    }

    #[test]
    fn test_sync_complete_waits_for_incomplete_image() {
        let mut state = DeferredImage::new("hero.webp", true);
        assert!(!state.sync_complete(false));
        assert_matches!(state.phase(), LoadPhase::Loading);
    }

    #[test]
    fn test_sync_complete_ignored_while_unloaded() {
        let mut state = DeferredImage::new("a.png", false);
        assert!(!state.sync_complete(true));
        assert_matches!(state.phase(), LoadPhase::Unloaded);
        assert_eq!(state.current_source(), "");
    }

    // === resync ===

    #[test]
    fn test_resync_same_inputs_keeps_loaded_state() {
        let mut current = DeferredImage::new("a.png", false);
        current.reveal();
        current.mark_loaded();
        let mut slot = ObservationSlot::<MockObserver>::default();

        let (next, armed) = resync(&current, "a.png".to_owned(), false, &mut slot, || -> Result<MockObserver, ()> {
            panic!("loaded images must not register again")
        });

        assert_eq!(armed, Ok(()));
        assert_eq!(next, current);
        assert_matches!(next.phase(), LoadPhase::Loaded);
        assert!(!slot.is_active());
    }

    #[test]
    fn test_resync_same_inputs_registers_unrevealed_image() {
        let current = DeferredImage::new("a.png", false);
        let mut slot = ObservationSlot::default();

        let (next, armed) = resync(&current, "a.png".to_owned(), false, &mut slot, || {
            Ok::<_, ()>(observer_expecting(1))
        });

        assert_eq!(armed, Ok(()));
        assert_eq!(next, current);
        assert!(slot.is_active());
    }

    #[test]
    fn test_resync_changed_source_restarts_and_releases_old_observation() {
        let mut current = DeferredImage::new("a.png", false);
        let mut slot = ObservationSlot::default();
        arm(&mut current, &mut slot, || Ok::<_, ()>(observer_expecting(1))).unwrap();
        current.reveal();

        let (next, armed) = resync(&current, "b.png".to_owned(), false, &mut slot, || {
            Ok::<_, ()>(observer_expecting(1))
        });

        assert_eq!(armed, Ok(()));
        assert_eq!(next.requested_source(), "b.png");
        assert_matches!(next.phase(), LoadPhase::Unloaded);
        assert!(slot.is_active());
    }

    #[test]
    fn test_resync_priority_flip_reveals_and_releases() {
        let mut current = DeferredImage::new("a.png", false);
        let mut slot = ObservationSlot::default();
        arm(&mut current, &mut slot, || Ok::<_, ()>(observer_expecting(1))).unwrap();

        let (next, armed) = resync(&current, "a.png".to_owned(), true, &mut slot, || -> Result<MockObserver, ()> {
            panic!("priority images must not register an observer")
        });

        assert_eq!(armed, Ok(()));
        assert!(next.is_priority());
        assert_eq!(next.current_source(), "a.png");
        assert!(!slot.is_active());
    }

    #[test]
    fn test_resync_registration_failure_reveals() {
        let current = DeferredImage::new("a.png", false);
        let mut slot = ObservationSlot::<MockObserver>::default();

        let (next, armed) = resync(&current, "a.png".to_owned(), false, &mut slot, || {
            Err("unsupported")
        });

        assert_eq!(armed, Err("unsupported"));
        assert_eq!(next.current_source(), "a.png");
        assert!(!slot.is_active());
    }
}
