//! Candidate focus movement
//!
//! Every move resets the result buffer and notifies the engine of the new
//! focus. Moving forward from the last prediction entry transparently
//! expands the prediction first.

use tracing::{debug, error};

use super::*;

impl SessionConverter {
    /// Focus the next candidate, expanding the prediction when the focus
    /// sits on the last entry.
    pub fn candidate_next(&mut self, composer: &dyn Composer) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("candidate_next is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();

        self.maybe_expand_prediction(composer);
        self.candidate_list.move_next();
        self.candidate_list_visible = true;
        self.segment_focus();
    }

    /// Focus the same position on the next page.
    pub fn candidate_next_page(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("candidate_next_page is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();

        self.candidate_list.move_next_page();
        self.candidate_list_visible = true;
        self.segment_focus();
    }

    /// Focus the previous candidate.
    pub fn candidate_prev(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("candidate_prev is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();

        self.candidate_list.move_prev();
        self.candidate_list_visible = true;
        self.segment_focus();
    }

    /// Focus the same position on the previous page.
    pub fn candidate_prev_page(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("candidate_prev_page is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();

        self.candidate_list.move_prev_page();
        self.candidate_list_visible = true;
        self.segment_focus();
    }

    /// Focus the candidate with the given id. From suggestion this first
    /// promotes the list to a prediction so the focus is meaningful.
    pub fn candidate_move_to_id(&mut self, id: i32, composer: &dyn Composer) {
        if !self.check_state(States::SUGGESTION | States::PREDICTION | States::CONVERSION) {
            error!("candidate_move_to_id is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();

        if self.check_state(States::SUGGESTION) {
            self.predict(composer);
        }

        self.candidate_list.move_to_id(id);
        self.candidate_list_visible = false;
        self.segment_focus();
    }

    /// Focus the candidate at `index` on the current page.
    pub fn candidate_move_to_page_index(&mut self, index: usize) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("candidate_move_to_page_index is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();

        self.candidate_list.move_to_page_index(index);
        self.candidate_list_visible = false;
        self.segment_focus();
    }

    /// Focus the candidate labeled with `shortcut` on the visible page.
    /// Returns false when the window is hidden, no shortcuts are
    /// configured, the character is not one of them, or its position is
    /// past the page.
    pub fn candidate_move_to_shortcut(&mut self, shortcut: char) -> bool {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("candidate_move_to_shortcut is not allowed in {:?}", self.state);
            return false;
        }

        if !self.candidate_list_visible {
            debug!("the candidate list is not displayed");
            return false;
        }

        let shortcuts = self.operation_preferences.candidate_shortcuts.clone();
        if shortcuts.is_empty() {
            debug!("no shortcuts are configured");
            return false;
        }

        let Some(index) = shortcuts.chars().position(|c| c == shortcut) else {
            debug!("{shortcut:?} is not a configured shortcut");
            return false;
        };

        if !self.candidate_list.move_to_page_index(index) {
            debug!("shortcut {shortcut:?} is out of the page range");
            return false;
        }
        self.reset_result();
        self.segment_focus();
        true
    }
}
