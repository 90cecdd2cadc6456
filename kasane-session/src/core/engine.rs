//! Conversion engine interface
//!
//! The engine performs the linguistic work: segmenting a reading, ranking
//! candidates, resizing segments, and maintaining history context. It is
//! borrowed for the lifetime of the session converter and mutates only the
//! `Segments` passed to it. Boolean results signal "produced no usable
//! segments" rather than errors; failures never propagate as panics.

use super::composer::Composer;
use super::segments::Segments;

pub trait ConversionEngine {
    /// Start a full conversion of the composer's reading.
    fn start_conversion_with_composer(
        &self,
        segments: &mut Segments,
        composer: &dyn Composer,
    ) -> bool;

    /// Start a prefix-search suggestion for the preedit.
    fn start_suggestion(&self, segments: &mut Segments, preedit: &str) -> bool;

    /// Start a prediction for the preedit.
    fn start_prediction(&self, segments: &mut Segments, preedit: &str) -> bool;

    /// Recover a reading from committed surface text.
    fn start_reverse_conversion(&self, segments: &mut Segments, source_text: &str) -> bool;

    /// Grow (`delta > 0`) or shrink (`delta < 0`) the segment boundary at
    /// `index` by `delta` characters, clamped to the reading.
    fn resize_segment(&self, segments: &mut Segments, index: usize, delta: i32) -> bool;

    /// Note which candidate is highlighted for a segment.
    fn focus_segment_value(&self, segments: &mut Segments, index: usize, candidate_id: i32);

    /// Fix a segment to the given candidate.
    fn commit_segment_value(&self, segments: &mut Segments, index: usize, candidate_id: i32);

    /// Commit the first conversion segment and drop it from the segments,
    /// keeping the rest under conversion.
    fn submit_first_segment(&self, segments: &mut Segments, candidate_id: i32);

    /// Finalize the conversion, moving segments into history.
    fn finish_conversion(&self, segments: &mut Segments);

    /// Discard the conversion segments but keep the history context.
    fn cancel_conversion(&self, segments: &mut Segments);

    /// Full reset including history.
    fn reset_conversion(&self, segments: &mut Segments);

    /// Revert the effect of the last finished conversion.
    fn revert_conversion(&self, segments: &mut Segments);
}
