//! Joystick events and the actions they trigger

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single joystick press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DirectionEvent {
    Up,
    Down,
    Left,
    Right,
    /// Stick pushed straight in
    Middle,
}

impl DirectionEvent {
    /// All directions in binding order
    pub const ALL: [DirectionEvent; 5] = [
        DirectionEvent::Up,
        DirectionEvent::Down,
        DirectionEvent::Left,
        DirectionEvent::Right,
        DirectionEvent::Middle,
    ];

    /// Config key for this direction
    pub fn name(self) -> &'static str {
        match self {
            DirectionEvent::Up => "up",
            DirectionEvent::Down => "down",
            DirectionEvent::Left => "left",
            DirectionEvent::Right => "right",
            DirectionEvent::Middle => "middle",
        }
    }

    /// Look up a direction by its config key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

/// What an input event asks the engine to do
///
/// Exactly one action fires per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Select the next mood in the catalog (wrapping)
    NextMood,
    /// Select the previous mood in the catalog (wrapping)
    PreviousMood,
    /// Freeze or resume the animation
    TogglePause,
    /// Jump to the home mood
    Home,
    /// Only counts as activity (wakes the display)
    #[default]
    Ignore,
}

impl Action {
    /// Parse a config value ("next", "previous", "pause", "home", "ignore")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "next" => Some(Action::NextMood),
            "previous" | "prev" => Some(Action::PreviousMood),
            "pause" => Some(Action::TogglePause),
            "home" => Some(Action::Home),
            "ignore" | "none" => Some(Action::Ignore),
            _ => None,
        }
    }

    /// Check if this action changes the selected mood
    pub fn is_navigation(&self) -> bool {
        matches!(self, Action::NextMood | Action::PreviousMood | Action::Home)
    }
}

/// Mapping from joystick direction to action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputBindings {
    pub up: Action,
    pub down: Action,
    pub left: Action,
    pub right: Action,
    pub middle: Action,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: Action::Home,
            down: Action::Ignore,
            left: Action::PreviousMood,
            right: Action::NextMood,
            middle: Action::TogglePause,
        }
    }
}

impl InputBindings {
    /// Action bound to a direction
    pub fn action_for(&self, event: DirectionEvent) -> Action {
        match event {
            DirectionEvent::Up => self.up,
            DirectionEvent::Down => self.down,
            DirectionEvent::Left => self.left,
            DirectionEvent::Right => self.right,
            DirectionEvent::Middle => self.middle,
        }
    }

    /// Rebind one direction
    pub fn bind(&mut self, event: DirectionEvent, action: Action) {
        match event {
            DirectionEvent::Up => self.up = action,
            DirectionEvent::Down => self.down = action,
            DirectionEvent::Left => self.left = action,
            DirectionEvent::Right => self.right = action,
            DirectionEvent::Middle => self.middle = action,
        }
    }
}
