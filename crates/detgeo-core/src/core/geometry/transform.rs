use nalgebra::{Point3, Rotation3, Vector3};

/// A rigid transform attaching a child volume to its parent frame.
///
/// The rotation is stored as `None` for pure translations so that placing an
/// unrotated volume never multiplies its coordinates through a floating-point
/// rotation matrix: positions along the unrotated axes stay bit-exact.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    translation: Vector3<f64>,
    rotation: Option<Rotation3<f64>>,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: None,
        }
    }

    /// A pure translation, with the rotation short-circuited to identity.
    pub fn translation(offset: Vector3<f64>) -> Self {
        Self {
            translation: offset,
            rotation: None,
        }
    }

    /// A translation combined with an explicit rotation.
    pub fn new(translation: Vector3<f64>, rotation: Rotation3<f64>) -> Self {
        Self {
            translation,
            rotation: Some(rotation),
        }
    }

    /// A translation combined with a rotation by `angle` radians about the
    /// build (z) axis, the only rotation the station builder needs.
    pub fn rotated_z(translation: Vector3<f64>, angle: f64) -> Self {
        Self::new(
            translation,
            Rotation3::from_axis_angle(&Vector3::z_axis(), angle),
        )
    }

    pub fn offset(&self) -> Vector3<f64> {
        self.translation
    }

    pub fn rotation(&self) -> Rotation3<f64> {
        self.rotation.unwrap_or_else(Rotation3::identity)
    }

    pub fn is_pure_translation(&self) -> bool {
        self.rotation.is_none()
    }

    /// Maps a point from the child frame into the parent frame.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        match &self.rotation {
            Some(rot) => rot * *point + self.translation,
            None => *point + self.translation,
        }
    }

    /// Composes `self` (parent placement) with `child`, yielding the child's
    /// placement expressed in the grandparent frame. Composition is
    /// associative in parent-then-child order.
    pub fn compose(&self, child: &Transform) -> Transform {
        let translation = match &self.rotation {
            Some(rot) => rot * child.translation + self.translation,
            None => child.translation + self.translation,
        };
        let rotation = match (&self.rotation, &child.rotation) {
            (None, None) => None,
            (Some(r), None) => Some(*r),
            (None, Some(r)) => Some(*r),
            (Some(a), Some(b)) => Some(a * b),
        };
        Transform {
            translation,
            rotation,
        }
    }
}

/// Expresses a globally-computed position as an offset in the frame of a
/// parent volume centered at `parent_origin`.
pub fn localize(global: &Point3<f64>, parent_origin: &Point3<f64>) -> Vector3<f64> {
    global - parent_origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn pure_translation_is_exact_on_unrotated_axes() {
        let t = Transform::translation(Vector3::new(0.0, 0.0, 3.7));
        let p = t.apply(&Point3::new(1.25, -0.5, 0.0));
        assert_eq!(p, Point3::new(1.25, -0.5, 3.7));
        assert!(t.is_pure_translation());
    }

    #[test]
    fn rotated_z_quarter_turn_swaps_x_and_y() {
        let t = Transform::rotated_z(Vector3::zeros(), FRAC_PI_2);
        let p = t.apply(&Point3::new(1.0, 0.0, 5.0));
        assert!(f64_approx_equal(p.x, 0.0));
        assert!(f64_approx_equal(p.y, 1.0));
        assert!(f64_approx_equal(p.z, 5.0));
    }

    #[test]
    fn composition_is_associative_parent_then_child() {
        let a = Transform::rotated_z(Vector3::new(1.0, 0.0, 0.0), 0.3);
        let b = Transform::translation(Vector3::new(0.0, 2.0, 0.0));
        let c = Transform::rotated_z(Vector3::new(0.0, 0.0, -1.0), -0.7);
        let p = Point3::new(0.5, 0.25, -2.0);

        let left = a.compose(&b).compose(&c).apply(&p);
        let right = a.compose(&b.compose(&c)).apply(&p);
        assert!(f64_approx_equal(left.x, right.x));
        assert!(f64_approx_equal(left.y, right.y));
        assert!(f64_approx_equal(left.z, right.z));
    }

    #[test]
    fn composing_pure_translations_stays_pure() {
        let a = Transform::translation(Vector3::new(0.0, 0.0, 1.0));
        let b = Transform::translation(Vector3::new(0.0, 0.0, 2.0));
        let c = a.compose(&b);
        assert!(c.is_pure_translation());
        assert_eq!(c.offset(), Vector3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn localize_subtracts_parent_origin() {
        let offset = localize(&Point3::new(0.0, 0.0, 12.5), &Point3::new(0.0, 0.0, 10.0));
        assert_eq!(offset, Vector3::new(0.0, 0.0, 2.5));
    }
}
