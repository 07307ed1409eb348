// extensions/accumulator.rs
//
// Continuous, input-driven adjustment of one scalar of position or rotation.
// While a hold trigger is engaged, every tick applies `rate * dt` along the
// configured axis, gated by optional minimum/maximum bounds.
//
// Usage:
//   let mut acc = Accumulator::activate(AccumulatorConfig::new(Property::Position, Dimension::X))?;
//   acc.on_trigger(TriggerPhase::Started, 2.0, &mut host);
//   acc.tick(dt, &mut host)?;

use serde::{Deserialize, Serialize};

use crate::api::types::{Dimension, MotionKey, Property};
use crate::core::transform::TransformHost;
use crate::errors::{MotionError, Result};
use crate::input::queue::TriggerPhase;

/// How a `Started` trigger engages the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerMode {
    /// Apply `rate * dt` every tick until the trigger is cancelled.
    #[default]
    Hold,
    /// Apply the raw trigger value once, un-scaled, and stay inactive.
    FireOnce,
}

/// Configuration for an accumulator, validated on activation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccumulatorConfig {
    pub property: Property,
    pub dimension: Dimension,
    #[serde(default)]
    pub mode: TriggerMode,
    #[serde(default)]
    pub minimum: Option<f32>,
    #[serde(default)]
    pub maximum: Option<f32>,
}

impl AccumulatorConfig {
    pub fn new(property: Property, dimension: Dimension) -> Self {
        Self {
            property,
            dimension,
            mode: TriggerMode::Hold,
            minimum: None,
            maximum: None,
        }
    }

    pub fn with_mode(mut self, mode: TriggerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_minimum(mut self, minimum: f32) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f32) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// Parse a config from a JSON string. The result is not yet validated.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, bound) in [("minimum", self.minimum), ("maximum", self.maximum)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(MotionError::invalid(format!(
                        "{name} must be a finite number (got {value})"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min >= max {
                return Err(MotionError::invalid(format!(
                    "minimum ({min}) must be less than maximum ({max})"
                )));
            }
        }
        Ok(())
    }
}

/// Clamp gate shared by position and rotation.
///
/// Negative movement needs `current > minimum`, positive movement needs
/// `current < maximum`. Moving back into range from past a bound is always
/// allowed, since only the bound being approached is checked. A zero delta
/// never mutates.
pub fn clamp_permits(current: f32, delta: f32, minimum: Option<f32>, maximum: Option<f32>) -> bool {
    if delta < 0.0 {
        minimum.map_or(true, |min| current > min)
    } else if delta > 0.0 {
        maximum.map_or(true, |max| current < max)
    } else {
        false
    }
}

/// Running state of a continuous adjustment.
#[derive(Debug, Clone)]
pub struct Accumulator {
    config: AccumulatorConfig,
    active: bool,
    per_tick_delta: f32,
    /// Euler readback wraps at 360, so rotation bounds compare against this
    /// running total instead. Rotations applied by anything else are not seen.
    accumulated_rotation: f32,
}

impl Accumulator {
    /// Validate `config` and return a ready, inactive accumulator.
    pub fn activate(config: AccumulatorConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            log::warn!(
                "accumulator on {:?}.{:?} not activated: {}",
                config.property,
                config.dimension,
                err
            );
            return Err(err);
        }

        Ok(Self {
            config,
            active: false,
            per_tick_delta: 0.0,
            accumulated_rotation: 0.0,
        })
    }

    /// Feed one trigger callback. Returns `true` if the host was mutated
    /// (only possible for a fire-once `Started`).
    pub fn on_trigger<H: TransformHost + ?Sized>(
        &mut self,
        phase: TriggerPhase,
        value: f32,
        host: &mut H,
    ) -> bool {
        match phase {
            TriggerPhase::Cancelled => {
                self.active = false;
                false
            }
            TriggerPhase::Started => {
                self.per_tick_delta = value;
                match self.config.mode {
                    TriggerMode::Hold => {
                        self.active = true;
                        false
                    }
                    TriggerMode::FireOnce => {
                        self.active = false;
                        self.apply(value, host)
                    }
                }
            }
            TriggerPhase::Performed => false,
        }
    }

    /// Apply one tick of continuous adjustment.
    ///
    /// Returns `Ok(false)` when inactive or blocked by a bound.
    pub fn tick<H: TransformHost + ?Sized>(&mut self, dt: f32, host: &mut H) -> Result<bool> {
        if dt < 0.0 || dt.is_nan() {
            return Err(MotionError::NegativeDeltaTime(dt));
        }
        if !self.active {
            return Ok(false);
        }
        Ok(self.apply(self.per_tick_delta * dt, host))
    }

    /// Disengage without waiting for a cancel trigger.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    fn apply<H: TransformHost + ?Sized>(&mut self, delta: f32, host: &mut H) -> bool {
        let current = self.current(host);
        if !clamp_permits(current, delta, self.config.minimum, self.config.maximum) {
            return false;
        }

        let axis = self.config.dimension.axis();
        match self.config.property {
            Property::Rotation => {
                host.rotate_local(axis, delta);
                self.accumulated_rotation += delta;
            }
            Property::Position => host.translate_local(axis, delta),
        }
        true
    }

    /// Value the bounds are compared against.
    pub fn current<H: TransformHost + ?Sized>(&self, host: &H) -> f32 {
        match self.config.property {
            Property::Position => self.config.dimension.component(host.local_position()),
            Property::Rotation => self.accumulated_rotation,
        }
    }

    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }

    /// The (property, dimension) pair this accumulator drives.
    pub fn key(&self) -> MotionKey {
        (self.config.property, self.config.dimension)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn per_tick_delta(&self) -> f32 {
        self.per_tick_delta
    }

    pub fn accumulated_rotation(&self) -> f32 {
        self.accumulated_rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::LocalTransform;
    use glam::Vec3;

    fn bounded_x(min: f32, max: f32) -> Accumulator {
        Accumulator::activate(
            AccumulatorConfig::new(Property::Position, Dimension::X)
                .with_minimum(min)
                .with_maximum(max),
        )
        .unwrap()
    }

    #[test]
    fn gate_blocks_at_maximum_and_allows_retreat() {
        assert!(!clamp_permits(10.0, 1.0, Some(0.0), Some(10.0)));
        assert!(clamp_permits(10.0, -1.0, Some(0.0), Some(10.0)));
        assert!(!clamp_permits(0.0, -1.0, Some(0.0), Some(10.0)));
        assert!(clamp_permits(-3.0, 1.0, Some(0.0), Some(10.0)));
        assert!(clamp_permits(1e6, 1.0, None, None));
        assert!(!clamp_permits(5.0, 0.0, None, None));
    }

    #[test]
    fn position_tick_suppressed_at_maximum() {
        let mut host = LocalTransform::new().with_position(Vec3::new(10.0, 0.0, 0.0));
        let mut acc = bounded_x(0.0, 10.0);

        acc.on_trigger(TriggerPhase::Started, 1.0, &mut host);
        assert!(acc.is_active());
        assert!(!acc.tick(1.0, &mut host).unwrap());
        assert_eq!(host.position.x, 10.0);

        acc.on_trigger(TriggerPhase::Started, -1.0, &mut host);
        assert!(acc.tick(1.0, &mut host).unwrap());
        assert_eq!(host.position.x, 9.0);
    }

    #[test]
    fn hold_applies_rate_times_dt_until_cancelled() {
        let mut host = LocalTransform::new();
        let mut acc =
            Accumulator::activate(AccumulatorConfig::new(Property::Position, Dimension::Z)).unwrap();

        acc.on_trigger(TriggerPhase::Started, 4.0, &mut host);
        acc.tick(0.5, &mut host).unwrap();
        acc.tick(0.25, &mut host).unwrap();
        assert!((host.position.z - 3.0).abs() < 1e-6);

        acc.on_trigger(TriggerPhase::Cancelled, 0.0, &mut host);
        assert!(!acc.is_active());
        assert!(!acc.tick(1.0, &mut host).unwrap());
        assert!((host.position.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn fire_once_applies_unscaled_value() {
        let mut host = LocalTransform::new();
        let mut acc = Accumulator::activate(
            AccumulatorConfig::new(Property::Position, Dimension::Y).with_mode(TriggerMode::FireOnce),
        )
        .unwrap();

        assert!(acc.on_trigger(TriggerPhase::Started, 2.5, &mut host));
        assert!(!acc.is_active());
        assert_eq!(host.position.y, 2.5);
        assert!(!acc.tick(1.0, &mut host).unwrap());
        assert_eq!(host.position.y, 2.5);
    }

    #[test]
    fn rotation_bounds_use_running_total() {
        let mut host = LocalTransform::new();
        let mut acc = Accumulator::activate(
            AccumulatorConfig::new(Property::Rotation, Dimension::Y)
                .with_minimum(-30.0)
                .with_maximum(30.0),
        )
        .unwrap();

        acc.on_trigger(TriggerPhase::Started, 20.0, &mut host);
        assert!(acc.tick(1.0, &mut host).unwrap());
        assert!(acc.tick(1.0, &mut host).unwrap());
        // 40 >= 30, further positive movement is blocked
        assert!(!acc.tick(1.0, &mut host).unwrap());
        assert_eq!(acc.accumulated_rotation(), 40.0);
        assert!((host.local_rotation().y - 40.0).abs() < 1e-2);

        acc.on_trigger(TriggerPhase::Started, -25.0, &mut host);
        assert!(acc.tick(1.0, &mut host).unwrap());
        assert_eq!(acc.accumulated_rotation(), 15.0);
    }

    #[test]
    fn negative_rotation_does_not_see_wraparound() {
        let mut host = LocalTransform::new();
        let mut acc = Accumulator::activate(
            AccumulatorConfig::new(Property::Rotation, Dimension::Z).with_minimum(-15.0),
        )
        .unwrap();

        acc.on_trigger(TriggerPhase::Started, -10.0, &mut host);
        assert!(acc.tick(1.0, &mut host).unwrap());
        // readback is 350, but the bound compares against -10
        assert!((host.local_rotation().z - 350.0).abs() < 1e-2);
        assert!(acc.tick(1.0, &mut host).unwrap());
        assert!(!acc.tick(1.0, &mut host).unwrap());
        assert_eq!(acc.accumulated_rotation(), -20.0);
    }

    #[test]
    fn performed_phase_is_ignored() {
        let mut host = LocalTransform::new();
        let mut acc =
            Accumulator::activate(AccumulatorConfig::new(Property::Position, Dimension::X)).unwrap();
        assert!(!acc.on_trigger(TriggerPhase::Performed, 3.0, &mut host));
        assert!(!acc.is_active());
        assert_eq!(acc.per_tick_delta(), 0.0);
    }

    #[test]
    fn rejects_inverted_or_equal_bounds() {
        let equal = AccumulatorConfig::new(Property::Position, Dimension::X)
            .with_minimum(5.0)
            .with_maximum(5.0);
        assert!(matches!(
            Accumulator::activate(equal),
            Err(MotionError::InvalidConfiguration(_))
        ));

        let one_sided = AccumulatorConfig::new(Property::Position, Dimension::X).with_minimum(5.0);
        assert!(Accumulator::activate(one_sided).is_ok());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        let nan_min = AccumulatorConfig::new(Property::Position, Dimension::X).with_minimum(f32::NAN);
        assert!(matches!(
            Accumulator::activate(nan_min),
            Err(MotionError::InvalidConfiguration(_))
        ));

        let inf_max = AccumulatorConfig::new(Property::Rotation, Dimension::Y)
            .with_minimum(0.0)
            .with_maximum(f32::INFINITY);
        assert!(inf_max.validate().is_err());
    }

    #[test]
    fn negative_dt_is_rejected() {
        let mut host = LocalTransform::new();
        let mut acc = bounded_x(0.0, 1.0);
        assert!(matches!(
            acc.tick(-0.01, &mut host),
            Err(MotionError::NegativeDeltaTime(_))
        ));
    }

    #[test]
    fn config_from_json() {
        let json = r#"{
            "property": "Rotation",
            "dimension": "Y",
            "mode": "FireOnce",
            "maximum": 90.0
        }"#;
        let config = AccumulatorConfig::from_json(json).unwrap();
        assert_eq!(config.mode, TriggerMode::FireOnce);
        assert_eq!(config.minimum, None);
        assert_eq!(config.maximum, Some(90.0));

        let minimal = AccumulatorConfig::from_json(r#"{ "property": "Position", "dimension": "X" }"#)
            .unwrap();
        assert_eq!(minimal.mode, TriggerMode::Hold);
    }
}
