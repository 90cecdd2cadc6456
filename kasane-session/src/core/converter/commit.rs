//! Committing, cancelling, and resetting conversions

use tracing::{debug, error};

use super::super::segments::Candidate;
use super::*;

impl SessionConverter {
    /// Abandon the current prediction or conversion, keeping the history
    /// context, and return to composition.
    pub fn cancel(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("cancel is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();

        // Clear the segments but keep the context.
        self.engine.cancel_conversion(&mut self.segments);
        self.reset_state();
    }

    /// Return to a clean composition state. When no conversion is in
    /// flight this also clears the engine-side history.
    pub fn reset(&mut self) {
        // Reset the engine even from composition, to clear history
        // segments. With conversion segments present, leave them to
        // cancel/commit paths.
        if self.segments.conversion_segments_len() == 0 {
            self.engine.reset_conversion(&mut self.segments);
        }

        if self.check_state(States::COMPOSITION) {
            return;
        }

        self.reset_result();
        self.reset_state();
    }

    /// Commit every conversion segment with its selected candidate and
    /// finalize the conversion.
    pub fn commit(&mut self) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("commit is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();
        let count = self.segments.conversion_segments_len();
        self.update_result(0, count);

        for i in 0..count {
            let id = self.candidate_index_for_engine(i);
            self.engine.commit_segment_value(&mut self.segments, i, id);
        }
        self.engine.finish_conversion(&mut self.segments);
        self.reset_state();
    }

    /// Commit the suggestion at `index` on the current page. Out-of-range
    /// indices are ignored.
    pub fn commit_suggestion(&mut self, index: usize) {
        if !self.check_state(States::SUGGESTION) {
            error!("commit_suggestion is not allowed in {:?}", self.state);
            return;
        }
        if !self.candidate_list.move_to_page_index(index) {
            debug!("suggestion index {index} is out of the page range");
            return;
        }

        self.reset_result();
        let count = self.segments.conversion_segments_len();
        self.update_result(0, count);
        self.engine.finish_conversion(&mut self.segments);
        self.reset_state();
    }

    /// Commit only the first conversion segment, removing its reading from
    /// the composer and keeping the rest under conversion. With a single
    /// segment this is a plain commit.
    pub fn commit_first_segment(&mut self, composer: &mut dyn Composer) {
        if !self.check_state(States::PREDICTION | States::CONVERSION) {
            error!("commit_first_segment is not allowed in {:?}", self.state);
            return;
        }
        self.reset_result();
        self.candidate_list_visible = false;

        if self.segments.conversion_segments_len() == 1 {
            self.commit();
            return;
        }

        self.update_result(0, 1);

        let Some(first_segment) = self.segments.conversion_segment(0) else {
            error!("there is no conversion segment");
            return;
        };

        // Delete the key characters of the first segment from the preedit.
        for _ in 0..first_segment.key().chars().count() {
            composer.delete_at(0);
        }

        // The first segment disappears, so the focus moves one left.
        if self.segment_index > 0 {
            self.segment_index -= 1;
        }

        let id = self.candidate_list.focused_id();
        self.engine.submit_first_segment(&mut self.segments, id);
        self.update_candidate_list();
    }

    /// Commit the raw composition without conversion. The engine still
    /// sees a single fixed segment so it can record history.
    pub fn commit_preedit(&mut self, composer: &dyn Composer) {
        let key = composer.query_for_conversion();
        let preedit = composer.string_for_submission();
        let normalized = text::normalize_preedit_text(&preedit);
        self.result = Some(session_output::preedit_result(&normalized));

        super::convert::apply_conversion_preferences(
            &self.conversion_preferences,
            &mut self.segments,
        );
        self.segments.clear_conversion_segments();
        let segment = self.segments.add_segment();
        segment.set_key(&key);
        segment.set_content_key(&key);
        segment.add_candidate(Candidate::new(normalized).with_content_key(key.clone()));

        self.engine.finish_conversion(&mut self.segments);
        self.reset_state();
    }

    /// Commit the first `count` characters of the preedit without
    /// conversion, clamped to the preedit length, and remove them from the
    /// composer.
    pub fn commit_head(&mut self, count: usize, composer: &mut dyn Composer) {
        let preedit = composer.string_for_submission();
        let count = count.min(preedit.chars().count());
        let head: String = preedit.chars().take(count).collect();
        let normalized = text::normalize_preedit_text(&head);
        self.result = Some(session_output::preedit_result(&normalized));

        for _ in 0..count {
            composer.delete_at(0);
        }
    }

    /// Undo the effect of the last finished conversion on the engine side.
    pub fn revert(&mut self) {
        self.engine.revert_conversion(&mut self.segments);
    }
}
