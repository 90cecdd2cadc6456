//! State and preference types for the session converter

use bitflags::bitflags;

bitflags! {
    /// A set of converter states, for multi-state predicates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct States: u8 {
        const COMPOSITION = 1 << 0;
        const SUGGESTION = 1 << 1;
        const PREDICTION = 1 << 2;
        const CONVERSION = 1 << 3;
    }
}

/// The conversion lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// The user is editing the reading; no conversion is running.
    #[default]
    Composition,
    /// Unfocused suggestions are shown while typing.
    Suggestion,
    /// A prediction list is shown and focused.
    Prediction,
    /// A segmented conversion is being edited.
    Conversion,
}

impl State {
    pub const fn as_states(self) -> States {
        match self {
            State::Composition => States::COMPOSITION,
            State::Suggestion => States::SUGGESTION,
            State::Prediction => States::PREDICTION,
            State::Conversion => States::CONVERSION,
        }
    }

    /// True when this state is a member of `states`.
    pub fn matches(self, states: States) -> bool {
        states.contains(self.as_states())
    }
}

/// How conversion requests use the committed history context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionPreferences {
    pub use_history: bool,
    pub max_history_size: usize,
}

impl Default for ConversionPreferences {
    fn default() -> Self {
        Self {
            use_history: true,
            max_history_size: 3,
        }
    }
}

/// How the candidate window behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPreferences {
    /// Host the transliterations in a cascading sub-window instead of
    /// appending them to the main list.
    pub use_cascading_window: bool,
    /// Shortcut characters selecting candidates by page position.
    pub candidate_shortcuts: String,
}

impl Default for OperationPreferences {
    fn default() -> Self {
        Self {
            use_cascading_window: true,
            candidate_shortcuts: String::new(),
        }
    }
}
