use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton, PointerButtonEvent};

/// Input transitions recorded since the last frame.
///
/// [`InputState`](super::InputState) holds what is currently down; this holds
/// what changed. The runtime clears it after every frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
    /// Button releases with the pointer position at release time.
    pub clicks: Vec<PointerButtonEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.clicks.clear();
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Release positions of `button` this frame, oldest first.
    pub fn clicks_of(&self, button: MouseButton) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.clicks.iter().filter(move |c| c.button == button).map(|c| (c.x, c.y))
    }
}
