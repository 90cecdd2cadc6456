//! UI-facing output records
//!
//! Pure projections of session state into the records a host UI renders:
//! the preedit, the candidate window, the committed result, and the full
//! unpaginated candidate list. Nothing here mutates session state.

use super::candidate_list::{CandidateEntry, CandidateList};
use super::composer::Composer;
use super::segments::{Segment, Segments};

/// Rendering style of one preedit span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    /// Uncommitted text.
    Underline,
    /// The focused conversion segment.
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreeditSegment {
    pub annotation: Annotation,
    pub value: String,
    /// Length of `value` in characters.
    pub value_len: usize,
}

impl PreeditSegment {
    pub fn new(annotation: Annotation, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            annotation,
            value_len: value.chars().count(),
            value,
        }
    }
}

/// The composition shown to the user before commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preedit {
    pub segments: Vec<PreeditSegment>,
    /// Caret position in characters.
    pub cursor: usize,
    /// Character offset of the highlighted segment, if any.
    pub highlighted_position: Option<usize>,
}

impl Preedit {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.value.as_str()).collect()
    }
}

/// What kind of list the candidate window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Conversion,
    Prediction,
    Suggestion,
    Usage,
    Transliteration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayType {
    Main,
    Cascade,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer {
    pub label: Option<String>,
    pub index_visible: bool,
    pub logo_visible: bool,
}

/// One row of the candidate window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowCandidate {
    /// Absolute index in the owning candidate list.
    pub index: usize,
    pub value: String,
    /// Engine candidate id; `None` for a nested-list row.
    pub id: Option<i32>,
    pub shortcut: Option<char>,
    /// Usage note, used by the usage cascade.
    pub description: Option<String>,
}

/// The visible candidate window: one page plus its cascades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWindow {
    /// Character offset of the focused segment within the conversion.
    pub position: usize,
    /// Total number of entries in the list (not just this page).
    pub size: usize,
    pub focused_index: Option<usize>,
    pub current_page: usize,
    pub total_pages: usize,
    pub candidates: Vec<WindowCandidate>,
    pub category: Category,
    pub display_type: DisplayType,
    pub footer: Option<Footer>,
    /// Transliteration cascade, present while its sub-list is focused.
    pub subcandidates: Option<Box<CandidateWindow>>,
    /// Usage cascade for candidates carrying usage notes.
    pub usages: Option<Box<CandidateWindow>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWord {
    pub index: usize,
    pub id: i32,
    /// Reading, present when it differs from the segment key.
    pub key: Option<String>,
    pub value: String,
}

/// Every candidate of the focused segment, unpaginated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWords {
    pub focused_index: Option<usize>,
    pub category: Category,
    pub candidates: Vec<CandidateWord>,
}

/// Finalized text delivered to the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitResult {
    /// The reading the value was produced from.
    pub key: String,
    pub value: String,
}

/// Surrounding-text information provided by or for the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub preceding_text: Option<String>,
}

/// The full per-operation output record.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub preedit: Option<Preedit>,
    pub candidates: Option<CandidateWindow>,
    pub result: Option<CommitResult>,
    pub all_candidate_words: Option<CandidateWords>,
}

/// Preedit for composition: the composer's text as one underlined span.
pub fn composition_preedit(composer: &dyn Composer) -> Preedit {
    let segment = PreeditSegment::new(Annotation::Underline, composer.string_for_submission());
    Preedit {
        cursor: segment.value_len,
        segments: vec![segment],
        highlighted_position: None,
    }
}

/// Preedit for conversion: one span per conversion segment, with the
/// focused segment highlighted. The focused segment shows the candidate
/// with `focused_id`; other segments show their current top candidate.
pub fn conversion_preedit(segments: &Segments, segment_index: usize, focused_id: i32) -> Preedit {
    let mut preedit = Preedit::default();
    let mut position = 0;
    for i in 0..segments.conversion_segments_len() {
        let Some(segment) = segments.conversion_segment(i) else {
            continue;
        };
        let id = if i == segment_index { focused_id } else { 0 };
        let value = segment
            .candidate_by_id(id)
            .map(|c| c.value.as_str())
            .unwrap_or_else(|| segment.key());
        let annotation = if i == segment_index {
            preedit.highlighted_position = Some(position);
            Annotation::Highlight
        } else {
            Annotation::Underline
        };
        let span = PreeditSegment::new(annotation, value);
        position += span.value_len;
        preedit.segments.push(span);
    }
    preedit.cursor = position;
    preedit
}

fn window_row(index: usize, entry: &CandidateEntry) -> WindowCandidate {
    match entry {
        CandidateEntry::Leaf(leaf) => WindowCandidate {
            index,
            value: leaf.value().to_string(),
            id: Some(leaf.id()),
            shortcut: None,
            description: None,
        },
        CandidateEntry::SubList(sub) => WindowCandidate {
            index,
            value: sub.name().unwrap_or_default().to_string(),
            id: None,
            shortcut: None,
            description: None,
        },
    }
}

/// The current page of `list` as a candidate window. When the focused
/// entry is a nested list, its page is attached as the cascade.
pub fn candidate_window(list: &CandidateList, position: usize) -> CandidateWindow {
    let page_start = list.page_start();
    let candidates = list
        .page_entries()
        .iter()
        .enumerate()
        .map(|(offset, entry)| window_row(page_start + offset, entry))
        .collect();

    let mut window = CandidateWindow {
        position,
        size: list.len(),
        focused_index: list.focused().then_some(list.focused_index()),
        current_page: list.current_page(),
        total_pages: list.total_pages(),
        candidates,
        category: Category::Conversion,
        display_type: DisplayType::Main,
        footer: None,
        subcandidates: None,
        usages: None,
    };

    if let Some(CandidateEntry::SubList(sub)) = list.entry(list.focused_index()) {
        window.subcandidates = Some(Box::new(candidate_window(sub, position)));
    }
    window
}

/// Usage cascade for the current page: the distinct usage notes carried by
/// the page's candidates, or `None` when no candidate has one.
pub fn usage_window(segment: &Segment, list: &CandidateList) -> Option<CandidateWindow> {
    let mut usages: Vec<WindowCandidate> = Vec::new();
    let mut focused_usage = None;
    let page_start = list.page_start();
    for (offset, entry) in list.page_entries().iter().enumerate() {
        let CandidateEntry::Leaf(leaf) = entry else {
            continue;
        };
        let Some(candidate) = segment.candidate_by_id(leaf.id()) else {
            continue;
        };
        let Some(title) = &candidate.usage_title else {
            continue;
        };
        let position = match usages.iter().position(|u| u.value == *title) {
            Some(existing) => existing,
            None => {
                usages.push(WindowCandidate {
                    index: usages.len(),
                    value: title.clone(),
                    id: Some(leaf.id()),
                    shortcut: None,
                    description: candidate.usage_description.clone(),
                });
                usages.len() - 1
            }
        };
        if page_start + offset == list.focused_index() {
            focused_usage = Some(position);
        }
    }
    if usages.is_empty() {
        return None;
    }
    Some(CandidateWindow {
        position: 0,
        size: usages.len(),
        focused_index: focused_usage,
        current_page: 0,
        total_pages: 1,
        candidates: usages,
        category: Category::Usage,
        display_type: DisplayType::Cascade,
        footer: None,
        subcandidates: None,
        usages: None,
    })
}

/// Assign shortcut labels to the window's rows by page position.
pub fn fill_shortcuts(window: &mut CandidateWindow, shortcuts: &str) {
    for (row, shortcut) in window.candidates.iter_mut().zip(shortcuts.chars()) {
        row.shortcut = Some(shortcut);
    }
}

/// Footer contents for a window category, if that category has one.
pub fn footer_for(category: Category) -> Option<Footer> {
    match category {
        Category::Suggestion => Some(Footer {
            label: Some("Tabキーで選択".to_string()),
            index_visible: false,
            logo_visible: true,
        }),
        Category::Conversion | Category::Prediction => Some(Footer {
            label: None,
            index_visible: true,
            logo_visible: false,
        }),
        Category::Usage | Category::Transliteration => None,
    }
}

fn collect_words(
    segment: &Segment,
    list: &CandidateList,
    follow_focus: bool,
    words: &mut Vec<CandidateWord>,
    focused_flat: &mut Option<usize>,
) {
    for (index, entry) in list.entries().iter().enumerate() {
        let on_focus = follow_focus && index == list.focused_index();
        match entry {
            CandidateEntry::Leaf(leaf) => {
                if on_focus {
                    *focused_flat = Some(words.len());
                }
                let key = segment
                    .candidate_by_id(leaf.id())
                    .filter(|c| !c.content_key.is_empty() && c.content_key != segment.key())
                    .map(|c| c.content_key.clone());
                words.push(CandidateWord {
                    index: words.len(),
                    id: leaf.id(),
                    key,
                    value: leaf.value().to_string(),
                });
            }
            CandidateEntry::SubList(sub) => {
                collect_words(segment, sub, on_focus, words, focused_flat);
            }
        }
    }
}

/// Every leaf of the candidate list in depth-first order, unpaginated.
pub fn all_candidate_words(
    segment: &Segment,
    list: &CandidateList,
    category: Category,
) -> CandidateWords {
    let mut candidates = Vec::new();
    let mut focused_flat = None;
    collect_words(segment, list, list.focused(), &mut candidates, &mut focused_flat);
    CandidateWords {
        focused_index: focused_flat,
        category,
        candidates,
    }
}

/// Result record for committing the preedit verbatim (no conversion).
pub fn preedit_result(preedit: &str) -> CommitResult {
    CommitResult {
        key: preedit.to_string(),
        value: preedit.to_string(),
    }
}

/// Result record for a finished conversion.
pub fn conversion_result(key: &str, value: &str) -> CommitResult {
    CommitResult {
        key: key.to_string(),
        value: value.to_string(),
    }
}
