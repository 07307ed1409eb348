use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which vector of a transform an operation mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// Local position.
    Position,
    /// Local rotation, as Euler angles in degrees.
    Rotation,
}

/// One scalar component of a position or Euler-rotation vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    X,
    Y,
    Z,
}

impl Dimension {
    /// Unit axis for this dimension.
    pub fn axis(self) -> Vec3 {
        match self {
            Dimension::X => Vec3::X,
            Dimension::Y => Vec3::Y,
            Dimension::Z => Vec3::Z,
        }
    }

    /// Read this dimension's component out of `v`.
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Dimension::X => v.x,
            Dimension::Y => v.y,
            Dimension::Z => v.z,
        }
    }

    /// Copy of `v` with this dimension's component replaced.
    pub fn with_component(self, mut v: Vec3, value: f32) -> Vec3 {
        match self {
            Dimension::X => v.x = value,
            Dimension::Y => v.y = value,
            Dimension::Z => v.z = value,
        }
        v
    }
}

/// A (property, dimension) pair. Animations and accumulators are mutually
/// exclusive per key.
pub type MotionKey = (Property, Dimension);

/// Identifier of an input action, assigned by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

/// Notification emitted by a controller, polled by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    /// A one-shot animation reached its target this tick.
    AnimationComplete {
        property: Property,
        dimension: Dimension,
        value: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_component_preserves_others() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Dimension::Y.with_component(v, 9.0), Vec3::new(1.0, 9.0, 3.0));
        assert_eq!(Dimension::Z.component(v), 3.0);
    }

    #[test]
    fn property_from_json() {
        let p: Property = serde_json::from_str("\"Rotation\"").unwrap();
        assert_eq!(p, Property::Rotation);
    }
}
