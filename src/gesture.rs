/// Converts a drag around the card's center into incremental spin angles.
///
/// The tracker carries the previous touch point across a drag so that each
/// scroll event contributes only the angle travelled since the last event.
/// Using the gesture's down-point as the reference for every event would add
/// already-applied rotation again on each call and the spin would run away.
pub struct DragTracker {
    /// Previous touch point, relative to the viewport center. `None` between
    /// drags.
    last: Option<(f64, f64)>,
}

impl DragTracker {
    pub fn new() -> Self {
        DragTracker { last: None }
    }

    /// Feeds one scroll event and returns the signed angle travelled, in
    /// degrees.
    ///
    /// `gesture_start` is the down-point that began the drag; it is only
    /// consulted on the first event after a reset. All points are in
    /// viewport coordinates and are translated to be relative to `center`
    /// before the angle between the two vectors is measured: `acos` of the
    /// normalized dot product gives the magnitude, the k component of the
    /// cross product gives the direction (positive cross means clockwise,
    /// reported as a negative angle).
    ///
    /// Returns `None` when either vector has zero length, since no angle is
    /// defined there; the event is skipped rather than treated as an error.
    pub fn scroll(
        &mut self,
        gesture_start: (f64, f64),
        current: (f64, f64),
        center: (f64, f64),
    ) -> Option<f64> {
        let (start_x, start_y) = self
            .last
            .unwrap_or((gesture_start.0 - center.0, gesture_start.1 - center.1));

        let end_x = current.0 - center.0;
        let end_y = current.1 - center.1;
        self.last = Some((end_x, end_y));

        let dot_product = start_x * end_x + start_y * end_y;
        let magnitude_product = (start_x * start_x + start_y * start_y).sqrt()
            * (end_x * end_x + end_y * end_y).sqrt();
        if magnitude_product <= f64::EPSILON {
            return None;
        }

        // Rounding can push the ratio a hair outside acos's domain.
        let ratio = (dot_product / magnitude_product).clamp(-1.0, 1.0);
        let mut angle_travelled = ratio.acos().to_degrees();

        let cross_product_k = start_x * end_y - start_y * end_x;
        if cross_product_k > 0.0 {
            angle_travelled = -angle_travelled;
        }
        Some(angle_travelled)
    }

    /// Forgets the carried point at the end of a drag, so the next drag
    /// starts from its own down-point instead of jumping from this one's.
    pub fn finish(&mut self) {
        self.last = None;
    }
}
