//! Conversion segment containers
//!
//! Plain data exchanged between the session converter and the conversion
//! engine: segments of the reading, their ranked candidates, and the
//! already-committed history context. All conversion policy lives in
//! `core::converter`.

use bitflags::bitflags;

bitflags! {
    /// Flags attached to an engine candidate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CandidateAttributes: u32 {
        /// Correction of a misspelled reading; must stay visible to the user.
        const SPELLING_CORRECTION = 1 << 0;
    }
}

/// A proposed surface form for one segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    /// The surface text to display and commit.
    pub value: String,
    /// Non-inflected prefix of the reading covered by this candidate.
    pub content_key: String,
    pub attributes: CandidateAttributes,
    /// Usage note shown in the cascading usage window, if any.
    pub usage_title: Option<String>,
    pub usage_description: Option<String>,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_content_key(mut self, content_key: impl Into<String>) -> Self {
        self.content_key = content_key.into();
        self
    }

    pub fn with_attributes(mut self, attributes: CandidateAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// One conversion segment: a contiguous slice of the reading with its
/// ordinary candidates and the fixed-arity meta candidates (one per
/// transliteration type).
#[derive(Debug, Clone, Default)]
pub struct Segment {
    key: String,
    content_key: String,
    candidates: Vec<Candidate>,
    meta_candidates: Vec<Candidate>,
}

impl Segment {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            content_key: key.clone(),
            key,
            candidates: Vec::new(),
            meta_candidates: Vec::new(),
        }
    }

    /// The reading covered by this segment.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Non-inflected prefix of the reading, used during suggestion and
    /// prediction where candidates may drop the conjugational tail.
    pub fn content_key(&self) -> &str {
        &self.content_key
    }

    pub fn set_content_key(&mut self, content_key: impl Into<String>) {
        self.content_key = content_key.into();
    }

    pub fn candidates_len(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidate(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn candidate_mut(&mut self, index: usize) -> Option<&mut Candidate> {
        self.candidates.get_mut(index)
    }

    /// Resolve a candidate-list id: non-negative ids index the ordinary
    /// candidates, negative ids index the meta candidates (`-(t + 1)` is
    /// transliteration type `t`).
    pub fn candidate_by_id(&self, id: i32) -> Option<&Candidate> {
        if id >= 0 {
            self.candidates.get(id as usize)
        } else {
            self.meta_candidates.get((-id - 1) as usize)
        }
    }

    pub fn add_candidate(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    /// Insert an empty candidate at the head and return it for filling.
    pub fn push_front_candidate(&mut self) -> &mut Candidate {
        self.candidates.insert(0, Candidate::default());
        &mut self.candidates[0]
    }

    /// Fix the candidate with `id` as the top-ranked choice. A meta
    /// candidate is copied to the front of the ordinary candidates.
    pub fn move_candidate_to_front(&mut self, id: i32) {
        if id > 0 {
            let index = id as usize;
            if index < self.candidates.len() {
                let candidate = self.candidates.remove(index);
                self.candidates.insert(0, candidate);
            }
        } else if id < 0 {
            if let Some(meta) = self.meta_candidates.get((-id - 1) as usize) {
                let meta = meta.clone();
                self.candidates.insert(0, meta);
            }
        }
    }

    pub fn meta_candidates_len(&self) -> usize {
        self.meta_candidates.len()
    }

    pub fn meta_candidate(&self, index: usize) -> Option<&Candidate> {
        self.meta_candidates.get(index)
    }

    pub fn meta_candidates(&self) -> &[Candidate] {
        &self.meta_candidates
    }

    pub fn set_meta_candidates(&mut self, meta_candidates: Vec<Candidate>) {
        self.meta_candidates = meta_candidates;
    }

    /// True when the segment has neither ordinary nor meta candidates.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.meta_candidates.is_empty()
    }

    pub fn clear(&mut self) {
        self.key.clear();
        self.content_key.clear();
        self.candidates.clear();
        self.meta_candidates.clear();
    }
}

/// The kind of request the conversion segments were produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestType {
    #[default]
    Conversion,
    Prediction,
    Suggestion,
}

/// An ordered pair of segment regions: committed history context followed
/// by the conversion segments currently being edited.
#[derive(Debug, Clone, Default)]
pub struct Segments {
    history: Vec<Segment>,
    conversion: Vec<Segment>,
    request_type: RequestType,
    user_history_enabled: bool,
    max_history_segments_size: usize,
}

impl Segments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    pub fn set_request_type(&mut self, request_type: RequestType) {
        self.request_type = request_type;
    }

    pub fn user_history_enabled(&self) -> bool {
        self.user_history_enabled
    }

    pub fn set_user_history_enabled(&mut self, enabled: bool) {
        self.user_history_enabled = enabled;
    }

    pub fn max_history_segments_size(&self) -> usize {
        self.max_history_segments_size
    }

    pub fn set_max_history_segments_size(&mut self, size: usize) {
        self.max_history_segments_size = size;
    }

    pub fn history_segments_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_segment(&self, index: usize) -> Option<&Segment> {
        self.history.get(index)
    }

    pub fn push_history_segment(&mut self, segment: Segment) {
        self.history.push(segment);
    }

    /// Drop the oldest history segment.
    pub fn pop_front_history_segment(&mut self) -> Option<Segment> {
        if self.history.is_empty() {
            None
        } else {
            Some(self.history.remove(0))
        }
    }

    pub fn conversion_segments_len(&self) -> usize {
        self.conversion.len()
    }

    pub fn conversion_segment(&self, index: usize) -> Option<&Segment> {
        self.conversion.get(index)
    }

    pub fn conversion_segment_mut(&mut self, index: usize) -> Option<&mut Segment> {
        self.conversion.get_mut(index)
    }

    /// Append an empty conversion segment and return it for filling.
    pub fn add_segment(&mut self) -> &mut Segment {
        self.conversion.push(Segment::default());
        self.conversion.last_mut().unwrap()
    }

    pub fn push_conversion_segment(&mut self, segment: Segment) {
        self.conversion.push(segment);
    }

    pub fn remove_conversion_segment(&mut self, index: usize) -> Option<Segment> {
        if index < self.conversion.len() {
            Some(self.conversion.remove(index))
        } else {
            None
        }
    }

    pub fn clear_conversion_segments(&mut self) {
        self.conversion.clear();
    }

    pub fn clear_history_segments(&mut self) {
        self.history.clear();
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.conversion.clear();
        self.request_type = RequestType::default();
    }

    /// Drop the last `num_of_characters` characters from the tail of the
    /// history region. Whole segments are popped while their top candidate
    /// value fits; a final partially-covered segment has its value and key
    /// truncated.
    pub fn remove_tail_of_history_segments(&mut self, num_of_characters: usize) {
        let mut remaining = num_of_characters;
        while remaining > 0 {
            let Some(last) = self.history.last_mut() else {
                return;
            };
            let value_len = last
                .candidate(0)
                .map(|c| c.value.chars().count())
                .unwrap_or(0);
            if value_len <= remaining {
                remaining -= value_len;
                self.history.pop();
            } else {
                let keep = value_len - remaining;
                let candidate = last.candidate_mut(0).unwrap();
                candidate.value = candidate.value.chars().take(keep).collect();
                let key_len = last.key.chars().count();
                last.key = last
                    .key
                    .chars()
                    .take(key_len.saturating_sub(remaining))
                    .collect();
                return;
            }
        }
    }
}
