//! Per-object transform controller.
//!
//! Owns the controlled object, at most one in-flight [`AnimationTask`], and
//! any number of input-driven [`Accumulator`]s. The host calls
//! [`TransformController::handle_triggers`] with the frame's input, then
//! [`TransformController::tick`] once per frame.
//!
//! Within a tick the animation is stepped before any accumulator, and an
//! accumulator driving the same (property, dimension) as the animation is
//! skipped for that tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::{ActionId, Dimension, MotionEvent, MotionKey, Property};
use crate::core::transform::TransformHost;
use crate::errors::{MotionError, Result};
use crate::extensions::accumulator::{Accumulator, AccumulatorConfig, TriggerMode};
use crate::extensions::easing::Easing;
use crate::extensions::tween::{AnimationTask, StepOutcome};
use crate::input::binding::ActionBinding;
use crate::input::queue::{TriggerEvent, TriggerPhase, TriggerQueue};

/// Animation duration bounds, in whole seconds.
pub const MIN_ANIMATION_DURATION: u32 = 1;
pub const MAX_ANIMATION_DURATION: u32 = 10;

/// Controller configuration. Loaded from JSON or built in code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Slowly start and slowly stop animations.
    pub ease_in_and_out: bool,
    /// How long animations last, in seconds.
    pub animation_duration: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            ease_in_and_out: true,
            animation_duration: 1,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_ANIMATION_DURATION..=MAX_ANIMATION_DURATION).contains(&self.animation_duration) {
            return Err(MotionError::invalid(format!(
                "animation_duration must be within [{MIN_ANIMATION_DURATION}, {MAX_ANIMATION_DURATION}] (got {})",
                self.animation_duration
            )));
        }
        Ok(())
    }

    pub fn easing(&self) -> Easing {
        Easing::from_flag(self.ease_in_and_out)
    }

    pub fn duration_secs(&self) -> f32 {
        self.animation_duration as f32
    }
}

/// A one-shot animation request. Duration and easing come from the
/// controller's config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub property: Property,
    pub dimension: Dimension,
    pub delta: f32,
}

impl AnimationRequest {
    pub fn new(property: Property, dimension: Dimension, delta: f32) -> Self {
        Self { property, dimension, delta }
    }

    pub fn key(&self) -> MotionKey {
        (self.property, self.dimension)
    }
}

/// What happened during one controller tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Outcome of the animation step, if an animation was in flight.
    pub animation: Option<StepOutcome>,
    /// Number of accumulators that moved the object.
    pub accumulators_applied: usize,
}

/// The object's transform as it was when the controller took it over.
#[derive(Debug, Clone, Copy)]
struct InitialTransform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

/// Drives one object's transform from animation requests and input.
pub struct TransformController<H: TransformHost> {
    host: H,
    config: ControllerConfig,
    initial: InitialTransform,
    animation: Option<AnimationTask>,
    accumulators: Vec<(ActionId, Accumulator)>,
    animation_bindings: Vec<(ActionBinding, AnimationRequest)>,
    completed_events: Vec<MotionEvent>,
}

impl<H: TransformHost> TransformController<H> {
    /// Take over `host`, recording its current transform as the initial one.
    pub fn new(host: H, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let initial = InitialTransform {
            position: host.local_position(),
            rotation: host.local_rotation(),
            scale: host.local_scale(),
        };
        Ok(Self {
            host,
            config,
            initial,
            animation: None,
            accumulators: Vec::new(),
            animation_bindings: Vec::new(),
            completed_events: Vec::new(),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    // -- Initial / reference transforms --

    pub fn set_initial_position(&mut self) {
        self.host.set_local_position(self.initial.position);
    }

    pub fn set_initial_scale(&mut self) {
        self.host.set_local_scale(self.initial.scale);
    }

    pub fn set_initial_rotation(&mut self) {
        self.host.set_local_rotation(self.initial.rotation);
    }

    pub fn set_position_from<R: TransformHost + ?Sized>(&mut self, reference: &R) {
        self.host.set_local_position(reference.local_position());
    }

    pub fn set_scale_from<R: TransformHost + ?Sized>(&mut self, reference: &R) {
        self.host.set_local_scale(reference.local_scale());
    }

    pub fn set_rotation_from<R: TransformHost + ?Sized>(&mut self, reference: &R) {
        self.host.set_local_rotation(reference.local_rotation());
    }

    // -- One-shot animations --

    /// Start an animation unless one is already in flight.
    ///
    /// Returns `Ok(false)` when the request was ignored because another
    /// animation is running. Rejected deltas are logged and returned as
    /// `InvalidConfiguration`.
    pub fn request(&mut self, request: AnimationRequest) -> Result<bool> {
        if let Some(task) = &self.animation {
            log::debug!(
                "ignoring {:?} request: animation on {:?} still running",
                request.key(),
                task.key()
            );
            return Ok(false);
        }

        let task = AnimationTask::create(
            &self.host,
            request.property,
            request.dimension,
            request.delta,
            self.config.duration_secs(),
            self.config.easing(),
        )
        .inspect_err(|err| log::warn!("animation on {:?} not started: {}", request.key(), err))?;

        self.animation = Some(task);
        Ok(true)
    }

    pub fn move_x(&mut self, delta: f32) -> Result<bool> {
        self.request(AnimationRequest::new(Property::Position, Dimension::X, delta))
    }

    pub fn move_y(&mut self, delta: f32) -> Result<bool> {
        self.request(AnimationRequest::new(Property::Position, Dimension::Y, delta))
    }

    pub fn move_z(&mut self, delta: f32) -> Result<bool> {
        self.request(AnimationRequest::new(Property::Position, Dimension::Z, delta))
    }

    pub fn rotate_x(&mut self, delta: f32) -> Result<bool> {
        self.request(AnimationRequest::new(Property::Rotation, Dimension::X, delta))
    }

    pub fn rotate_y(&mut self, delta: f32) -> Result<bool> {
        self.request(AnimationRequest::new(Property::Rotation, Dimension::Y, delta))
    }

    pub fn rotate_z(&mut self, delta: f32) -> Result<bool> {
        self.request(AnimationRequest::new(Property::Rotation, Dimension::Z, delta))
    }

    pub fn animation(&self) -> Option<&AnimationTask> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    // -- Input bindings --

    /// Drive an accumulator from `action`. Replaces any accumulator already
    /// bound to that action. An invalid config leaves the binding unchanged.
    pub fn bind_accumulator(&mut self, action: ActionId, config: AccumulatorConfig) -> Result<()> {
        let accumulator = Accumulator::activate(config)?;
        match self.accumulators.iter_mut().find(|(a, _)| *a == action) {
            Some(slot) => slot.1 = accumulator,
            None => self.accumulators.push((action, accumulator)),
        }
        Ok(())
    }

    /// Start `request` whenever an event matching `binding` arrives.
    pub fn bind_animation(&mut self, binding: ActionBinding, request: AnimationRequest) {
        self.animation_bindings.push((binding, request));
    }

    pub fn accumulator(&self, action: ActionId) -> Option<&Accumulator> {
        self.accumulators
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, acc)| acc)
    }

    /// Route every queued event to its accumulators and animation bindings.
    /// Returns how many bound animation requests were rejected.
    pub fn handle_triggers(&mut self, queue: &mut TriggerQueue) -> usize {
        queue
            .drain()
            .into_iter()
            .map(|event| self.handle_trigger(event))
            .sum()
    }

    /// Route one event. Returns how many bound animation requests it
    /// triggered were rejected as invalid (each one is logged).
    pub fn handle_trigger(&mut self, event: TriggerEvent) -> usize {
        let busy = self.animation.as_ref().map(AnimationTask::key);

        for (action, acc) in &mut self.accumulators {
            if *action != event.action {
                continue;
            }
            let fires_now =
                event.phase == TriggerPhase::Started && acc.config().mode == TriggerMode::FireOnce;
            if fires_now && busy == Some(acc.key()) {
                log::debug!("fire-once on {:?} suppressed by running animation", acc.key());
                continue;
            }
            acc.on_trigger(event.phase, event.value, &mut self.host);
        }

        let requests: Vec<AnimationRequest> = self
            .animation_bindings
            .iter()
            .filter(|(binding, _)| binding.matches(&event))
            .map(|(_, request)| *request)
            .collect();
        let mut rejected = 0;
        for request in requests {
            if self.request(request).is_err() {
                rejected += 1;
            }
        }
        rejected
    }

    // -- Frame update --

    /// Advance the animation, then every accumulator not blocked by it.
    pub fn tick(&mut self, dt: f32) -> Result<TickReport> {
        if dt < 0.0 || dt.is_nan() {
            return Err(MotionError::NegativeDeltaTime(dt));
        }

        let mut report = TickReport::default();
        let busy = self.animation.as_ref().map(AnimationTask::key);

        if let Some(task) = self.animation.as_mut() {
            let outcome = task.step(dt)?;
            task.apply(&mut self.host, outcome.vector);
            if outcome.complete {
                log::debug!("animation on {:?} complete", task.key());
                self.completed_events.push(MotionEvent::AnimationComplete {
                    property: task.property(),
                    dimension: task.dimension(),
                    value: task.target_value(),
                });
                self.animation = None;
            }
            report.animation = Some(outcome);
        }

        for (_, acc) in &mut self.accumulators {
            if busy == Some(acc.key()) {
                continue;
            }
            if acc.tick(dt, &mut self.host)? {
                report.accumulators_applied += 1;
            }
        }

        Ok(report)
    }

    /// Drain completion notifications.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = MotionEvent> + '_ {
        self.completed_events.drain(..)
    }
}
