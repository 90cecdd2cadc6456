//! Session converter - the conversion-mode state machine
//!
//! Mediates between the composer (the reading being typed) and the
//! conversion engine (segmentation and candidates). Owns the conversion
//! lifecycle: suggestion, prediction, full conversion, segment focus and
//! resizing, candidate navigation, and commit. State is projected into
//! `Output` records for the host UI.

mod candidate_nav;
mod commit;
mod convert;
mod output;
mod predict;
mod segment_nav;
mod types;

pub use types::{ConversionPreferences, OperationPreferences, State, States};

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::warn;

use super::candidate_list::CandidateList;
use super::composer::Composer;
use super::engine::ConversionEngine;
use super::output::CommitResult;
use super::segments::{RequestType, Segment, Segments};
use super::transliteration::TransliterationType;
use super::{output as session_output, text};

/// Label of the cascading transliteration sub-window.
const TRANSLITERATION_LABEL: &str = "そのほかの文字種";

/// The session-layer conversion state machine.
pub struct SessionConverter {
    state: State,
    engine: Arc<dyn ConversionEngine>,
    segments: Segments,
    segment_index: usize,
    /// Deep copy of the suggestion segment, merged ahead of prediction
    /// results so the suggested order survives prediction rebuilds.
    previous_suggestions: Segment,
    conversion_preferences: ConversionPreferences,
    operation_preferences: OperationPreferences,
    candidate_list: CandidateList,
    candidate_list_visible: bool,
    result: Option<CommitResult>,
    /// The reading of the whole current conversion.
    composition: String,
    /// Conversion of the whole current composition with default candidates.
    default_result: String,
}

impl SessionConverter {
    pub fn new(engine: Arc<dyn ConversionEngine>) -> Self {
        Self {
            state: State::Composition,
            engine,
            segments: Segments::new(),
            segment_index: 0,
            previous_suggestions: Segment::default(),
            conversion_preferences: ConversionPreferences::default(),
            operation_preferences: OperationPreferences::default(),
            candidate_list: CandidateList::new(true),
            candidate_list_visible: false,
            result: None,
            composition: String::new(),
            default_result: String::new(),
        }
    }

    /// True when `state` is a member of `states`.
    pub fn check_state(&self, states: States) -> bool {
        self.state.matches(states)
    }

    /// True while a suggestion, prediction, or conversion is shown.
    pub fn is_active(&self) -> bool {
        self.check_state(States::SUGGESTION | States::PREDICTION | States::CONVERSION)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    pub fn set_segments(&mut self, src: &Segments) {
        self.segments = src.clone();
    }

    pub fn candidate_list(&self) -> &CandidateList {
        &self.candidate_list
    }

    pub fn previous_suggestions(&self) -> &Segment {
        &self.previous_suggestions
    }

    pub fn composition(&self) -> &str {
        &self.composition
    }

    pub fn default_result(&self) -> &str {
        &self.default_result
    }

    pub fn result(&self) -> Option<&CommitResult> {
        self.result.as_ref()
    }

    pub fn conversion_preferences(&self) -> &ConversionPreferences {
        &self.conversion_preferences
    }

    pub fn set_conversion_preferences(&mut self, preferences: ConversionPreferences) {
        self.conversion_preferences = preferences;
    }

    pub fn operation_preferences(&self) -> &OperationPreferences {
        &self.operation_preferences
    }

    pub fn set_operation_preferences(&mut self, preferences: OperationPreferences) {
        self.operation_preferences = preferences;
    }

    pub fn is_candidate_list_visible(&self) -> bool {
        self.candidate_list_visible
    }

    pub fn set_candidate_list_visible(&mut self, visible: bool) {
        self.candidate_list_visible = visible;
    }

    pub fn is_last_segment_focused(&self) -> bool {
        self.segment_index + 1 >= self.segments.conversion_segments_len()
    }

    /// Trim the last `num_of_characters` characters of committed history.
    pub fn remove_tail_of_history_segments(&mut self, num_of_characters: usize) {
        self.segments
            .remove_tail_of_history_segments(num_of_characters);
    }

    /// Copy the full observable state of `src`: segments, state,
    /// preferences, result, previous suggestions, composition strings, and
    /// candidate-list focus (restored by id after a rebuild). The engine
    /// reference of `self` is kept.
    pub fn copy_from(&mut self, src: &SessionConverter) {
        self.reset();

        self.segments = src.segments.clone();
        self.state = src.state;
        self.composition = src.composition.clone();
        self.default_result = src.default_result.clone();
        self.segment_index = src.segment_index;
        self.conversion_preferences = src.conversion_preferences;
        self.operation_preferences = src.operation_preferences.clone();
        self.result = src.result.clone();
        self.previous_suggestions = src.previous_suggestions.clone();

        if self.is_active() {
            self.update_candidate_list();
            self.candidate_list.move_to_id(src.candidate_list.focused_id());
            self.candidate_list_visible = src.candidate_list_visible;
        }
    }

    pub(super) fn reset_result(&mut self) {
        self.result = None;
    }

    pub(super) fn reset_state(&mut self) {
        self.state = State::Composition;
        self.segment_index = 0;
        self.previous_suggestions.clear();
        self.candidate_list_visible = false;
        self.candidate_list.clear();
        self.composition.clear();
        self.default_result.clear();
    }

    /// Notify the engine which candidate is highlighted for the focused
    /// segment.
    pub(super) fn segment_focus(&mut self) {
        debug_assert!(self.is_active());
        let id = self.candidate_index_for_engine(self.segment_index);
        self.engine
            .focus_segment_value(&mut self.segments, self.segment_index, id);
    }

    /// Fix the focused segment to its focused candidate.
    pub(super) fn segment_fix(&mut self) {
        debug_assert!(self.is_active());
        let id = self.candidate_index_for_engine(self.segment_index);
        self.engine
            .commit_segment_value(&mut self.segments, self.segment_index, id);
    }

    /// The candidate id reported to the engine for `segment_index`.
    /// Segments other than the focused one always report their default
    /// (top-ranked) choice until focus visits them.
    pub(super) fn candidate_index_for_engine(&self, segment_index: usize) -> i32 {
        if segment_index != self.segment_index {
            return 0;
        }
        self.candidate_list.focused_id()
    }

    /// The candidate currently selected for `segment_index`.
    pub(super) fn selected_candidate(
        &self,
        segment_index: usize,
    ) -> Option<&super::segments::Candidate> {
        let id = self.candidate_index_for_engine(segment_index);
        self.segments
            .conversion_segment(segment_index)?
            .candidate_by_id(id)
    }

    /// Concatenated reading and conversion of `count` segments starting at
    /// `index`. In conversion state the reading is the segment key; in
    /// suggestion and prediction it is the selected candidate's content
    /// key, which may drop a conjugational tail.
    pub(super) fn preedit_and_conversion(&self, index: usize, count: usize) -> (String, String) {
        debug_assert!(self.is_active());
        let mut preedit = String::new();
        let mut conversion = String::new();
        for i in index..index + count {
            let Some(segment) = self.segments.conversion_segment(i) else {
                break;
            };
            if self.check_state(States::CONVERSION) {
                preedit.push_str(segment.key());
            } else if let Some(candidate) = self.selected_candidate(i) {
                preedit.push_str(&candidate.content_key);
            }
            if let Some(candidate) = self.selected_candidate(i) {
                conversion.push_str(&candidate.value);
            }
        }
        (preedit, conversion)
    }

    /// Write the selected values of `count` segments starting at `index`
    /// into the result buffer.
    pub(super) fn update_result(&mut self, index: usize, count: usize) {
        let (preedit, conversion) = self.preedit_and_conversion(index, count);
        self.result = Some(session_output::conversion_result(&preedit, &conversion));
    }

    /// Cache the reading and default conversion of the whole composition.
    pub(super) fn update_composition_cache(&mut self) {
        let count = self.segments.conversion_segments_len();
        let (composition, default_result) = self.preedit_and_conversion(0, count);
        self.composition = composition;
        self.default_result = default_result;
    }

    /// Rebuild the candidate list for the focused segment.
    pub(super) fn update_candidate_list(&mut self) {
        debug_assert!(self.is_active());
        self.candidate_list.clear();

        let Some(segment) = self.segments.conversion_segment(self.segment_index) else {
            return;
        };
        for i in 0..segment.candidates_len() {
            let candidate = segment.candidate(i).unwrap();
            self.candidate_list
                .add_candidate(i as i32, candidate.value.as_str());
            // A spelling correction is always displayed so the user sees
            // the misspelled reading.
            if i < 10
                && candidate
                    .attributes
                    .contains(super::segments::CandidateAttributes::SPELLING_CORRECTION)
            {
                self.candidate_list_visible = true;
            }
        }

        let focused = self.segments.request_type() != RequestType::Suggestion;
        self.candidate_list.set_focused(focused);

        if segment.meta_candidates_len() == 0 {
            warn!("transliterations are not initialized: {}", segment.key());
            return;
        }

        if self.operation_preferences.use_cascading_window {
            let transliterations = self.candidate_list.allocate_sub_candidate_list(false);
            transliterations.set_focused(true);
            transliterations.set_name(TRANSLITERATION_LABEL);
            for (i, t13n) in TransliterationType::ALL.iter().enumerate() {
                if let Some(meta) = segment.meta_candidate(i) {
                    transliterations.add_candidate_with_attributes(
                        t13n.id(),
                        meta.value.as_str(),
                        t13n.attributes(),
                    );
                }
            }
        } else {
            for (i, t13n) in TransliterationType::ALL.iter().enumerate() {
                if let Some(meta) = segment.meta_candidate(i) {
                    self.candidate_list.add_candidate_with_attributes(
                        t13n.id(),
                        meta.value.as_str(),
                        t13n.attributes(),
                    );
                }
            }
        }
    }
}
