//! Events flowing between the host and behaviors
//!
//! The host pushes input and load notifications; behaviors push their own
//! completion notices (e.g. autofit finished) for sibling behaviors.

/// What kind of element had focus when a key event fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// The 3D canvas or document body
    #[default]
    Canvas,
    /// A text field, text area, select box or editable element
    TextInput,
}

/// Physical key plus focus context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Key code, e.g. `KeyE`
    pub code: String,
    pub focus: FocusTarget,
}

impl KeyInput {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            focus: FocusTarget::Canvas,
        }
    }

    pub fn in_text_input(mut self) -> Self {
        self.focus = FocusTarget::TextInput;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// A model finished loading on the node
    ModelLoaded,
    /// The node's surface mesh was replaced
    MeshSet,
    /// Model autofit finished repositioning the node's model
    AutofitComplete,
    /// The node was clicked
    Click,
    KeyDown(KeyInput),
    KeyUp(KeyInput),
    /// The window lost focus
    WindowBlur,
}

/// Whether a behavior claimed an event
///
/// The host should suppress its default action for consumed key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventOutcome {
    #[default]
    Ignored,
    Consumed,
}

impl EventOutcome {
    pub fn is_consumed(self) -> bool {
        self == EventOutcome::Consumed
    }

    pub fn merge(self, other: EventOutcome) -> EventOutcome {
        if self.is_consumed() || other.is_consumed() {
            EventOutcome::Consumed
        } else {
            EventOutcome::Ignored
        }
    }
}
