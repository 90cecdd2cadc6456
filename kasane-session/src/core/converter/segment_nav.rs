//! Segment focus movement and segment width editing
//!
//! All operations here are no-ops in prediction, where there is a single
//! unsegmented candidate list. Moving the focus first fixes the current
//! segment's candidate on the engine side.

use tracing::error;

use super::*;

impl SessionConverter {
    /// Focus the next segment, wrapping from the tail to the head.
    pub fn segment_focus_right(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("segment_focus_right is not allowed in {:?}", self.state);
            return;
        }
        self.candidate_list_visible = false;
        if self.check_state(States::PREDICTION) {
            return;
        }
        self.reset_result();
        self.segment_fix();

        if self.segment_index + 1 >= self.segments.conversion_segments_len() {
            self.segment_index = 0;
        } else {
            self.segment_index += 1;
        }
        self.update_candidate_list();
    }

    /// Focus the previous segment, wrapping from the head to the tail.
    pub fn segment_focus_left(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("segment_focus_left is not allowed in {:?}", self.state);
            return;
        }
        self.candidate_list_visible = false;
        if self.check_state(States::PREDICTION) {
            return;
        }
        self.reset_result();
        self.segment_fix();

        if self.segment_index == 0 {
            self.segment_index = self.segments.conversion_segments_len().saturating_sub(1);
        } else {
            self.segment_index -= 1;
        }
        self.update_candidate_list();
    }

    /// Focus the last segment. Already there, nothing happens.
    pub fn segment_focus_last(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("segment_focus_last is not allowed in {:?}", self.state);
            return;
        }
        self.candidate_list_visible = false;
        if self.check_state(States::PREDICTION) {
            return;
        }
        self.reset_result();

        let right_edge = self.segments.conversion_segments_len().saturating_sub(1);
        if self.segment_index >= right_edge {
            return;
        }

        self.segment_fix();
        self.segment_index = right_edge;
        self.update_candidate_list();
    }

    /// Focus the first segment. Already there, nothing happens.
    pub fn segment_focus_left_edge(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("segment_focus_left_edge is not allowed in {:?}", self.state);
            return;
        }
        self.candidate_list_visible = false;
        if self.check_state(States::PREDICTION) {
            return;
        }
        self.reset_result();

        if self.segment_index == 0 {
            return;
        }

        self.segment_fix();
        self.segment_index = 0;
        self.update_candidate_list();
    }

    /// Widen the focused segment by one character. A refused resize is a
    /// no-op.
    pub fn segment_width_expand(&mut self) {
        self.resize_focused_segment(1);
    }

    /// Narrow the focused segment by one character. A refused resize is a
    /// no-op.
    pub fn segment_width_shrink(&mut self) {
        self.resize_focused_segment(-1);
    }

    fn resize_focused_segment(&mut self, delta: i32) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("segment resizing is not allowed in {:?}", self.state);
            return;
        }
        self.candidate_list_visible = false;
        if self.check_state(States::PREDICTION) {
            return;
        }
        self.reset_result();

        if !self
            .engine
            .resize_segment(&mut self.segments, self.segment_index, delta)
        {
            return;
        }

        self.update_candidate_list();
    }
}
