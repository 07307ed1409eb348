// core/transform.rs
//
// Capability interface between the motion engines and whatever owns the
// controlled object. Engines only ever see a `TransformHost`; the host's
// scene graph stays on the other side of this trait.
//
// `LocalTransform` is the in-memory implementation used by headless hosts
// and tests.

use glam::{EulerRot, Quat, Vec3};

/// Read/write access to an object's local transform.
///
/// Rotations are exchanged as Euler angles in degrees (applied Z, then X,
/// then Y). Readback is wrapped into `[0, 360)`, so a rotation set to `-10`
/// reads back as `350`.
pub trait TransformHost {
    fn local_position(&self) -> Vec3;
    fn set_local_position(&mut self, position: Vec3);

    fn local_rotation(&self) -> Vec3;
    fn set_local_rotation(&mut self, euler_degrees: Vec3);

    fn local_scale(&self) -> Vec3;
    fn set_local_scale(&mut self, scale: Vec3);

    /// Move `distance` along `axis` expressed in the object's own frame.
    fn translate_local(&mut self, axis: Vec3, distance: f32);

    /// Rotate `degrees` about `axis` expressed in the object's own frame.
    fn rotate_local(&mut self, axis: Vec3, degrees: f32);
}

/// Plain local transform: position, rotation and scale relative to a parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set rotation from Euler angles in degrees.
    pub fn with_euler(mut self, euler_degrees: Vec3) -> Self {
        self.rotation = quat_from_euler_degrees(euler_degrees);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

impl TransformHost for LocalTransform {
    fn local_position(&self) -> Vec3 {
        self.position
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn local_rotation(&self) -> Vec3 {
        let (y, x, z) = self.rotation.to_euler(EulerRot::YXZ);
        Vec3::new(
            wrap_degrees(x.to_degrees()),
            wrap_degrees(y.to_degrees()),
            wrap_degrees(z.to_degrees()),
        )
    }

    fn set_local_rotation(&mut self, euler_degrees: Vec3) {
        self.rotation = quat_from_euler_degrees(euler_degrees);
    }

    fn local_scale(&self) -> Vec3 {
        self.scale
    }

    fn set_local_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    fn translate_local(&mut self, axis: Vec3, distance: f32) {
        self.position += self.rotation * (axis * distance);
    }

    fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        let step = Quat::from_axis_angle(axis.normalize(), degrees.to_radians());
        self.rotation = (self.rotation * step).normalize();
    }
}

fn quat_from_euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn euler_round_trip_single_axis() {
        let t = LocalTransform::new().with_euler(Vec3::new(0.0, 30.0, 0.0));
        assert!(approx(t.local_rotation(), Vec3::new(0.0, 30.0, 0.0)));
    }

    #[test]
    fn negative_angles_wrap() {
        let t = LocalTransform::new().with_euler(Vec3::new(0.0, 0.0, -10.0));
        assert!(approx(t.local_rotation(), Vec3::new(0.0, 0.0, 350.0)));
    }

    #[test]
    fn translate_follows_local_frame() {
        let mut t = LocalTransform::new().with_euler(Vec3::new(0.0, 90.0, 0.0));
        t.translate_local(Vec3::X, 2.0);
        // +X rotated 90 degrees about Y points along -Z
        assert!(approx(t.position, Vec3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn translate_unrotated_is_axis_aligned() {
        let mut t = LocalTransform::new().with_position(Vec3::new(1.0, 1.0, 1.0));
        t.translate_local(Vec3::Y, -0.5);
        assert!(approx(t.position, Vec3::new(1.0, 0.5, 1.0)));
    }

    #[test]
    fn rotate_local_accumulates() {
        let mut t = LocalTransform::new();
        t.rotate_local(Vec3::Y, 20.0);
        t.rotate_local(Vec3::Y, 25.0);
        assert!(approx(t.local_rotation(), Vec3::new(0.0, 45.0, 0.0)));
    }

    #[test]
    fn wrap_degrees_range() {
        assert_eq!(wrap_degrees(370.0), 10.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }
}
