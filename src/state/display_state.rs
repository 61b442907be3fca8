//! Presentation flags owned by the clock view

/// View-level state that never influences the clock itself
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// Requested fullscreen mode; the display client applies it
    pub fullscreen: bool,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip fullscreen and return the new value
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }
}
