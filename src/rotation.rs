use druid::Data;

/// Rotation of the card, in whole degrees.
///
/// The y axis is the flip axis: the idle animation drives it and it decides
/// which face is visible. The z axis is the in-plane spin fed by drag
/// gestures. Both angles are kept normalized to `[0, 360)`.
#[derive(Clone, Copy, Data, PartialEq, Eq, Debug)]
pub struct RotationState {
    y_axis: i32,
    z_axis: i32,
}

impl RotationState {
    pub fn new(y_axis: i32, z_axis: i32) -> Self {
        RotationState {
            y_axis: normalize_degrees(y_axis),
            z_axis: normalize_degrees(z_axis),
        }
    }

    pub fn y_axis(&self) -> i32 {
        self.y_axis
    }

    pub fn z_axis(&self) -> i32 {
        self.z_axis
    }

    pub fn set_y_axis(&mut self, degrees: i32) {
        self.y_axis = normalize_degrees(degrees);
    }

    pub fn set_z_axis(&mut self, degrees: i32) {
        self.z_axis = normalize_degrees(degrees);
    }

    /// Adds a gesture delta to the in-plane spin.
    pub fn spin_by(&mut self, delta_degrees: i32) {
        self.set_z_axis(self.z_axis + delta_degrees);
    }
}

/// One of the two renderable sides of the card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Face {
    Front,
    Back,
}

/// Maps any integer angle into `[0, 360)`.
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Selects the visible face from the flip angle.
///
/// The back shows for angles in `(90, 270]`; 90 itself is still the front
/// and 270 itself is still the back, so there is no gap at either boundary.
pub fn visible_face(y_axis_degrees: i32) -> Face {
    let angle = normalize_degrees(y_axis_degrees);
    if angle > 90 && angle <= 270 {
        Face::Back
    } else {
        Face::Front
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_wraps_into_range() {
        assert_eq!(normalize_degrees(0), 0);
        assert_eq!(normalize_degrees(360), 0);
        assert_eq!(normalize_degrees(361), 1);
        assert_eq!(normalize_degrees(-1), 359);
        assert_eq!(normalize_degrees(-720), 0);
        assert_eq!(normalize_degrees(1080 + 45), 45);
    }

    #[test]
    fn normalization_preserves_congruence() {
        for delta in [-1000, -361, -90, 0, 89, 360, 719, 12345] {
            let normalized = normalize_degrees(delta);
            assert!((0..360).contains(&normalized));
            assert_eq!((delta - normalized).rem_euclid(360), 0);
        }
    }

    #[test]
    fn face_selection_boundaries() {
        assert_eq!(visible_face(0), Face::Front);
        assert_eq!(visible_face(90), Face::Front);
        assert_eq!(visible_face(91), Face::Back);
        assert_eq!(visible_face(180), Face::Back);
        assert_eq!(visible_face(270), Face::Back);
        assert_eq!(visible_face(271), Face::Front);
        assert_eq!(visible_face(359), Face::Front);
        assert_eq!(visible_face(360), Face::Front);
    }

    #[test]
    fn setters_normalize() {
        let mut rotation = RotationState::new(720, -90);
        assert_eq!(rotation.y_axis(), 0);
        assert_eq!(rotation.z_axis(), 270);

        rotation.set_y_axis(450);
        assert_eq!(rotation.y_axis(), 90);

        rotation.spin_by(-300);
        assert_eq!(rotation.z_axis(), 330);
    }
}
