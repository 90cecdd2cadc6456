//! Suggestion and prediction, including the merge of both lists

use tracing::{error, warn};

use super::convert::apply_conversion_preferences;
use super::*;

/// Prepend the cached suggestion candidates to the first prediction
/// segment, so the suggested order stays ahead of prediction results, and
/// carry over its meta candidates.
fn prepend_candidates(previous_segment: &Segment, preedit: &str, segments: &mut Segments) {
    if segments.conversion_segments_len() == 0 {
        let segment = segments.add_segment();
        segment.set_key(preedit);
        segment.set_content_key(preedit);
    }

    let segment = segments.conversion_segment_mut(0).unwrap();
    for i in (0..previous_segment.candidates_len()).rev() {
        *segment.push_front_candidate() = previous_segment.candidate(i).unwrap().clone();
    }
    segment.set_meta_candidates(previous_segment.meta_candidates().to_vec());
}

impl SessionConverter {
    /// Ask the engine for suggestions on the current preedit. The result
    /// is cached so a later prediction can merge it in front.
    pub fn suggest(&mut self, composer: &dyn Composer) -> bool {
        self.suggest_with_preferences(composer, self.conversion_preferences)
    }

    pub fn suggest_with_preferences(
        &mut self,
        composer: &dyn Composer,
        preferences: ConversionPreferences,
    ) -> bool {
        if !self.check_state(States::COMPOSITION | States::SUGGESTION) {
            error!("suggest is not allowed in {:?}", self.state);
            return false;
        }
        self.candidate_list_visible = false;

        // Normalize the current state by resetting the previous one.
        self.reset_state();

        self.segments.set_request_type(RequestType::Suggestion);
        apply_conversion_preferences(&preferences, &mut self.segments);

        let preedit = composer.query_for_prediction();
        if !self.engine.start_suggestion(&mut self.segments, &preedit) {
            warn!("no suggestions for {preedit:?}");
            // Clear the segments but keep the history context.
            self.engine.cancel_conversion(&mut self.segments);
            return false;
        }

        // Keep a deep copy of the suggestions for later merging with
        // prediction results.
        self.previous_suggestions = self
            .segments
            .conversion_segment(0)
            .cloned()
            .unwrap_or_default();

        self.segment_index = 0;
        self.state = State::Suggestion;
        self.update_candidate_list();
        self.candidate_list_visible = true;
        true
    }

    /// Ask the engine for predictions. On first entry this starts fresh;
    /// called again with the focus on the last candidate it requests more
    /// results and merges them behind the cached suggestions. An engine
    /// failure during expansion keeps the current list usable.
    pub fn predict(&mut self, composer: &dyn Composer) -> bool {
        self.predict_with_preferences(composer, self.conversion_preferences)
    }

    pub fn predict_with_preferences(
        &mut self,
        composer: &dyn Composer,
        preferences: ConversionPreferences,
    ) -> bool {
        if !self.check_state(
            States::COMPOSITION | States::SUGGESTION | States::CONVERSION | States::PREDICTION,
        ) {
            error!("predict is not allowed in {:?}", self.state);
            return false;
        }
        self.reset_result();

        self.segments.set_request_type(RequestType::Prediction);
        apply_conversion_preferences(&preferences, &mut self.segments);

        let predict_first =
            !self.check_state(States::PREDICTION) && self.previous_suggestions.is_empty();

        let predict_expand = self.check_state(States::PREDICTION)
            && !self.previous_suggestions.is_empty()
            && !self.candidate_list.is_empty()
            && self.candidate_list.focused()
            && self.candidate_list.focused_index() == self.candidate_list.last_index();

        let preedit = composer.query_for_prediction();
        self.segments.clear_conversion_segments();

        if (predict_expand || predict_first)
            && !self.engine.start_prediction(&mut self.segments, &preedit)
        {
            warn!("the engine could not start a prediction");
            // In expand mode the cached suggestions still make a usable
            // list, so only the first prediction gives up.
            if predict_first {
                self.reset_state();
                return false;
            }
        }

        // Merge suggestions and prediction.
        prepend_candidates(&self.previous_suggestions, &preedit, &mut self.segments);

        self.segment_index = 0;
        self.state = State::Prediction;
        self.update_candidate_list();
        self.candidate_list_visible = true;
        self.update_composition_cache();
        true
    }

    /// When the focus sits on the last prediction entry, fetch more
    /// predictions and put the focus back onto that entry, so navigation
    /// continues seamlessly into the new results. A no-op anywhere else.
    pub fn maybe_expand_prediction(&mut self, composer: &dyn Composer) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("maybe_expand_prediction is not allowed in {:?}", self.state);
            return;
        }

        if !self.check_state(States::PREDICTION)
            || self.previous_suggestions.is_empty()
            || !self.candidate_list.focused()
            || self.candidate_list.focused_index() != self.candidate_list.last_index()
        {
            return;
        }

        self.reset_result();

        let previous_index = self.candidate_list.focused_index();
        self.predict_with_preferences(composer, self.conversion_preferences);

        if let Some(id) = self.candidate_list.candidate_id_at(previous_index) {
            self.candidate_list.move_to_id(id);
        }
    }
}
