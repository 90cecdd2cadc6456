//! Projection of converter state into UI output records

use super::super::output::{
    CandidateWindow, CandidateWords, Category, Context, DisplayType, Output,
};
use super::*;

impl SessionConverter {
    /// Project the current state into an output record. The composer is
    /// needed to render the composition preedit; pass `None` when no
    /// composition is active.
    pub fn fill_output(&self, composer: Option<&dyn Composer>) -> Output {
        let mut output = Output::default();
        if let Some(result) = &self.result {
            output.result = Some(result.clone());
        }

        if self.check_state(States::COMPOSITION) {
            if let Some(composer) = composer
                && !composer.is_empty()
            {
                output.preedit = Some(session_output::composition_preedit(composer));
            }
            return output;
        }

        if self.check_state(States::SUGGESTION) {
            // A zero-query suggestion has an empty composer; no preedit is
            // rendered then.
            if let Some(composer) = composer
                && !composer.is_empty()
            {
                output.preedit = Some(session_output::composition_preedit(composer));
            }
        } else if self.check_state(States::PREDICTION | States::CONVERSION) {
            output.preedit = Some(session_output::conversion_preedit(
                &self.segments,
                self.segment_index,
                self.candidate_list.focused_id(),
            ));
        }

        if self.candidate_list_visible {
            output.candidates = self.build_candidate_window();
        }
        output.all_candidate_words = self.build_all_candidate_words();
        output
    }

    /// Like `fill_output`, but consumes the result buffer.
    pub fn pop_output(&mut self, composer: Option<&dyn Composer>) -> Output {
        let output = self.fill_output(composer);
        self.reset_result();
        output
    }

    /// Fill the preceding text from the history segments, unless the
    /// client already provided surrounding-text information.
    pub fn fill_context(&self, context: &mut Context) {
        if context.preceding_text.is_some() {
            return;
        }
        if self.segments.history_segments_len() == 0 {
            return;
        }

        let mut preceding_text = String::new();
        for i in 0..self.segments.history_segments_len() {
            if let Some(candidate) = self
                .segments
                .history_segment(i)
                .and_then(|segment| segment.candidate(0))
            {
                preceding_text.push_str(&candidate.value);
            }
        }
        context.preceding_text = Some(preceding_text);
    }

    fn category(&self) -> Category {
        match self.segments.request_type() {
            RequestType::Conversion => Category::Conversion,
            RequestType::Prediction => Category::Prediction,
            RequestType::Suggestion => Category::Suggestion,
        }
    }

    fn build_candidate_window(&self) -> Option<CandidateWindow> {
        debug_assert!(self.is_active());

        // The window is anchored after the segments left of the focus.
        let mut position = 0;
        for i in 0..self.segment_index {
            if let Some(candidate) = self.selected_candidate(i) {
                position += candidate.value.chars().count();
            }
        }

        let segment = self.segments.conversion_segment(self.segment_index)?;
        let mut window = session_output::candidate_window(&self.candidate_list, position);
        window.usages = session_output::usage_window(segment, &self.candidate_list).map(Box::new);

        if self.check_state(States::PREDICTION | States::CONVERSION) {
            session_output::fill_shortcuts(
                &mut window,
                &self.operation_preferences.candidate_shortcuts,
            );
        }

        window.category = self.category();
        window.display_type = DisplayType::Main;
        if let Some(subcandidates) = &mut window.subcandidates {
            subcandidates.category = Category::Transliteration;
            subcandidates.display_type = DisplayType::Cascade;
        }
        window.footer = session_output::footer_for(window.category);
        Some(window)
    }

    fn build_all_candidate_words(&self) -> Option<CandidateWords> {
        debug_assert!(self.is_active());
        let segment = self.segments.conversion_segment(self.segment_index)?;
        Some(session_output::all_candidate_words(
            segment,
            &self.candidate_list,
            self.category(),
        ))
    }
}
