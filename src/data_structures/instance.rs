//! Node transformation data.
//!
//! Every scene node keeps a local `Instance` (relative to its parent) and a
//! world `Instance` that is recomputed by walking the graph from the root.

use std::ops::Mul;

use cgmath::{Euler, InnerSpace, One, Rad, Rotation, Vector3};

/// Transformation of a node: position, rotation (as quaternion), and scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Instance {
    /// Create a new instance with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Vector3::new(x, y, z).into()
    }

    /// Replaces the rotation with one built from Euler angles in radians (x, y, z).
    pub fn set_euler_angles(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Euler::new(Rad(x), Rad(y), Rad(z)).into();
    }

    pub fn euler_angles(&self) -> Euler<Rad<f32>> {
        Euler::from(self.rotation)
    }

    pub fn set_uniform_scale(&mut self, factor: f32) {
        self.scale = Vector3::new(factor, factor, factor);
    }

    /// Direction the local +Z axis points to after rotation. For a plane
    /// this is its surface normal.
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation.rotate_vector(Vector3::unit_z()).normalize()
    }
}

impl<'a, 'b> Mul<&'b Instance> for &'a Instance {
    type Output = Instance;

    fn mul(self, rhs: &'b Instance) -> Self::Output {
        let new_rotation = self.rotation * rhs.rotation;

        let new_scale = cgmath::Vector3::new(
            self.scale.x * rhs.scale.x,
            self.scale.y * rhs.scale.y,
            self.scale.z * rhs.scale.z,
        );
        let scaled_rhs_pos = cgmath::Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        let new_position = self.position + (self.rotation * scaled_rhs_pos);

        Instance {
            position: new_position,
            rotation: new_rotation,
            scale: new_scale,
        }
    }
}

impl Mul<Instance> for Instance {
    type Output = Self;

    fn mul(self, rhs: Instance) -> Self::Output {
        &self * &rhs
    }
}

impl From<cgmath::Vector3<f32>> for Instance {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use cgmath::{Quaternion, Rotation3};

    use super::*;

    fn assert_vec_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).magnitude() < 1e-5,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn rotating_minus_quarter_turn_about_x_points_normal_up() {
        let mut instance = Instance::new();
        instance.set_euler_angles(-FRAC_PI_2, 0.0, 0.0);
        assert_vec_eq(instance.forward(), Vector3::unit_y());
    }

    #[test]
    fn parent_scale_and_rotation_apply_to_child_position() {
        let parent = Instance {
            position: Vector3::new(1.0, 0.0, 0.0),
            rotation: Quaternion::from_angle_y(Rad(FRAC_PI_2)),
            scale: Vector3::new(2.0, 2.0, 2.0),
        };
        let child = Instance::at(0.0, 0.0, 1.0);
        let world = &parent * &child;
        // +Z rotated a quarter turn about Y lands on +X
        assert_vec_eq(world.position, Vector3::new(3.0, 0.0, 0.0));
        assert_vec_eq(world.scale, Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn identity_is_neutral() {
        let child = Instance::at(0.3, 0.0, -0.2);
        assert_eq!(&Instance::new() * &child, child);
    }
}
