use druid::{Data, Lens};

use crate::rotation::RotationState;

/// Application state
#[derive(Clone, Data, Lens)]
pub struct AppState {
    /// Current rotation of the card
    pub rotation: RotationState,
    /// Saturation applied to the drawn face, 0.0 (gray) to 1.0 (unchanged)
    pub saturation: f64,
    /// Enable debug mode
    pub debug: bool,
    /// Idle spin paused
    pub paused: bool,
}

impl AppState {
    pub fn new(rotation: RotationState, debug: bool) -> Self {
        AppState {
            rotation,
            saturation: 1.0,
            debug,
            paused: false,
        }
    }
}
