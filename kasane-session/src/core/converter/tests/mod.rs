//! Tests for the session converter

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;

use super::*;
use crate::core::segments::Candidate;

mod proptest_fsm;
mod suggestion;
mod transliteration;

/// Engine calls observed by the mock, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineCall {
    StartConversion { key: String },
    StartSuggestion { preedit: String },
    StartPrediction { preedit: String },
    StartReverseConversion { source_text: String },
    ResizeSegment { index: usize, delta: i32 },
    FocusSegmentValue { index: usize, candidate_id: i32 },
    CommitSegmentValue { index: usize, candidate_id: i32 },
    SubmitFirstSegment { candidate_id: i32 },
    FinishConversion,
    CancelConversion,
    ResetConversion,
    RevertConversion,
}

/// Scripted conversion engine: canned segment sets are handed out per
/// request, every call is recorded, and segment bookkeeping (submit,
/// finish, cancel) is emulated.
#[derive(Default)]
struct MockEngine {
    calls: RefCell<Vec<EngineCall>>,
    conversion_results: RefCell<VecDeque<Vec<Segment>>>,
    suggestion_results: RefCell<VecDeque<Vec<Segment>>>,
    prediction_results: RefCell<VecDeque<Vec<Segment>>>,
    reverse_results: RefCell<VecDeque<Vec<Segment>>>,
    resize_results: RefCell<VecDeque<Vec<Segment>>>,
    /// Fallbacks used when the matching queue is empty.
    default_conversion: RefCell<Option<Vec<Segment>>>,
    default_suggestion: RefCell<Option<Vec<Segment>>>,
    default_prediction: RefCell<Option<Vec<Segment>>>,
}

impl MockEngine {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn calls(&self) -> Vec<EngineCall> {
        self.calls.borrow().clone()
    }

    fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn push_conversion(&self, segments: Vec<Segment>) {
        self.conversion_results.borrow_mut().push_back(segments);
    }

    fn push_suggestion(&self, segments: Vec<Segment>) {
        self.suggestion_results.borrow_mut().push_back(segments);
    }

    fn push_prediction(&self, segments: Vec<Segment>) {
        self.prediction_results.borrow_mut().push_back(segments);
    }

    fn push_reverse(&self, segments: Vec<Segment>) {
        self.reverse_results.borrow_mut().push_back(segments);
    }

    fn push_resize(&self, segments: Vec<Segment>) {
        self.resize_results.borrow_mut().push_back(segments);
    }

    fn set_default_conversion(&self, segments: Vec<Segment>) {
        *self.default_conversion.borrow_mut() = Some(segments);
    }

    fn set_default_suggestion(&self, segments: Vec<Segment>) {
        *self.default_suggestion.borrow_mut() = Some(segments);
    }

    fn set_default_prediction(&self, segments: Vec<Segment>) {
        *self.default_prediction.borrow_mut() = Some(segments);
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }

    fn pop_or_default(
        queue: &RefCell<VecDeque<Vec<Segment>>>,
        fallback: &RefCell<Option<Vec<Segment>>>,
    ) -> Option<Vec<Segment>> {
        queue
            .borrow_mut()
            .pop_front()
            .or_else(|| fallback.borrow().clone())
    }

    fn replace_conversion(segments: &mut Segments, new_segments: Vec<Segment>) {
        segments.clear_conversion_segments();
        for segment in new_segments {
            segments.push_conversion_segment(segment);
        }
    }
}

impl ConversionEngine for MockEngine {
    fn start_conversion_with_composer(
        &self,
        segments: &mut Segments,
        composer: &dyn Composer,
    ) -> bool {
        self.record(EngineCall::StartConversion {
            key: composer.query_for_conversion(),
        });
        match Self::pop_or_default(&self.conversion_results, &self.default_conversion) {
            Some(result) => {
                Self::replace_conversion(segments, result);
                true
            }
            None => false,
        }
    }

    fn start_suggestion(&self, segments: &mut Segments, preedit: &str) -> bool {
        self.record(EngineCall::StartSuggestion {
            preedit: preedit.to_string(),
        });
        match Self::pop_or_default(&self.suggestion_results, &self.default_suggestion) {
            Some(result) => {
                Self::replace_conversion(segments, result);
                true
            }
            None => false,
        }
    }

    fn start_prediction(&self, segments: &mut Segments, preedit: &str) -> bool {
        self.record(EngineCall::StartPrediction {
            preedit: preedit.to_string(),
        });
        match Self::pop_or_default(&self.prediction_results, &self.default_prediction) {
            Some(result) => {
                Self::replace_conversion(segments, result);
                true
            }
            None => false,
        }
    }

    fn start_reverse_conversion(&self, segments: &mut Segments, source_text: &str) -> bool {
        self.record(EngineCall::StartReverseConversion {
            source_text: source_text.to_string(),
        });
        match self.reverse_results.borrow_mut().pop_front() {
            Some(result) => {
                Self::replace_conversion(segments, result);
                true
            }
            None => false,
        }
    }

    fn resize_segment(&self, segments: &mut Segments, index: usize, delta: i32) -> bool {
        self.record(EngineCall::ResizeSegment { index, delta });
        match self.resize_results.borrow_mut().pop_front() {
            Some(result) => {
                Self::replace_conversion(segments, result);
                true
            }
            None => false,
        }
    }

    fn focus_segment_value(&self, _segments: &mut Segments, index: usize, candidate_id: i32) {
        self.record(EngineCall::FocusSegmentValue {
            index,
            candidate_id,
        });
    }

    fn commit_segment_value(&self, _segments: &mut Segments, index: usize, candidate_id: i32) {
        self.record(EngineCall::CommitSegmentValue {
            index,
            candidate_id,
        });
    }

    fn submit_first_segment(&self, segments: &mut Segments, candidate_id: i32) {
        self.record(EngineCall::SubmitFirstSegment { candidate_id });
        if let Some(first) = segments.remove_conversion_segment(0) {
            segments.push_history_segment(first);
        }
    }

    fn finish_conversion(&self, segments: &mut Segments) {
        self.record(EngineCall::FinishConversion);
        let record_history = segments.user_history_enabled();
        while let Some(segment) = segments.remove_conversion_segment(0) {
            if record_history {
                segments.push_history_segment(segment);
            }
        }
    }

    fn cancel_conversion(&self, segments: &mut Segments) {
        self.record(EngineCall::CancelConversion);
        segments.clear_conversion_segments();
    }

    fn reset_conversion(&self, segments: &mut Segments) {
        self.record(EngineCall::ResetConversion);
        segments.clear_conversion_segments();
        segments.clear_history_segments();
    }

    fn revert_conversion(&self, segments: &mut Segments) {
        self.record(EngineCall::RevertConversion);
        segments.clear_history_segments();
    }
}

/// A plain string-buffer composer.
#[derive(Default)]
struct MockComposer {
    text: String,
    source_text: String,
    inserted: Vec<String>,
}

impl MockComposer {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn inserted(&self) -> &[String] {
        &self.inserted
    }

    fn source_text(&self) -> &str {
        &self.source_text
    }
}

impl Composer for MockComposer {
    fn query_for_conversion(&self) -> String {
        self.text.clone()
    }

    fn query_for_prediction(&self) -> String {
        self.text.clone()
    }

    fn string_for_submission(&self) -> String {
        self.text.clone()
    }

    fn insert_character_preedit(&mut self, character: &str) {
        self.text.push_str(character);
        self.inserted.push(character.to_string());
    }

    fn delete_at(&mut self, position: usize) {
        if position < self.text.chars().count() {
            self.text = self
                .text
                .chars()
                .enumerate()
                .filter(|(i, _)| *i != position)
                .map(|(_, c)| c)
                .collect();
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn reset(&mut self) {
        self.text.clear();
        self.source_text.clear();
    }

    fn set_source_text(&mut self, text: &str) {
        self.source_text = text.to_string();
    }
}

/// A segment with candidates whose content key is the segment key.
fn segment(key: &str, values: &[&str]) -> Segment {
    let mut segment = Segment::new(key);
    for value in values {
        segment.add_candidate(Candidate::new(*value).with_content_key(key));
    }
    segment
}

/// Like `segment`, plus synthetic meta candidates so the candidate list
/// grows a transliteration sub-list.
fn segment_with_meta(key: &str, values: &[&str]) -> Segment {
    let mut segment = segment(key, values);
    let meta = (0..TransliterationType::COUNT)
        .map(|i| Candidate::new(format!("{key}#{i}")).with_content_key(key))
        .collect();
    segment.set_meta_candidates(meta);
    segment
}

fn converter(engine: &Arc<MockEngine>) -> SessionConverter {
    SessionConverter::new(engine.clone())
}

/// Converter already holding a conversion of `かんじは` into two
/// meta-less segments.
fn two_segment_conversion(engine: &Arc<MockEngine>) -> (SessionConverter, MockComposer) {
    let composer = MockComposer::new("かんじは");
    engine.push_conversion(vec![
        segment("かんじ", &["漢字", "感じ", "幹事"]),
        segment("は", &["は", "葉", "歯"]),
    ]);
    let mut converter = converter(engine);
    assert!(converter.convert(&composer));
    (converter, composer)
}

/// The value of the deepest focused candidate.
fn focused_value(converter: &SessionConverter) -> String {
    converter
        .candidate_list()
        .deepest_focused_candidate()
        .map(|c| c.value().to_string())
        .unwrap_or_default()
}
