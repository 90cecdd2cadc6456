//! Generates random operation sequences and verifies the reachable-state
//! invariants after every step.

use proptest::prelude::*;

use super::*;

#[derive(Debug, Clone)]
enum Op {
    Convert,
    Suggest,
    Predict,
    Cancel,
    Reset,
    Commit,
    CommitSuggestion(usize),
    CommitFirstSegment,
    CommitPreedit,
    CommitHead(usize),
    CandidateNext,
    CandidatePrev,
    CandidateNextPage,
    CandidatePrevPage,
    CandidateMoveToId(i32),
    CandidateMoveToPageIndex(usize),
    CandidateShortcut(char),
    SegmentFocusRight,
    SegmentFocusLeft,
    SegmentFocusLast,
    SegmentFocusLeftEdge,
    SegmentWidthExpand,
    SegmentWidthShrink,
    SwitchKanaType,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let plain = proptest::sample::select(vec![
        Op::Convert,
        Op::Suggest,
        Op::Predict,
        Op::Cancel,
        Op::Reset,
        Op::Commit,
        Op::CommitFirstSegment,
        Op::CommitPreedit,
        Op::CandidateNext,
        Op::CandidatePrev,
        Op::CandidateNextPage,
        Op::CandidatePrevPage,
        Op::SegmentFocusRight,
        Op::SegmentFocusLeft,
        Op::SegmentFocusLast,
        Op::SegmentFocusLeftEdge,
        Op::SegmentWidthExpand,
        Op::SegmentWidthShrink,
        Op::SwitchKanaType,
    ]);
    prop_oneof![
        6 => plain,
        1 => (0usize..4).prop_map(Op::CommitSuggestion),
        1 => (0usize..6).prop_map(Op::CommitHead),
        1 => (-3i32..5).prop_map(Op::CandidateMoveToId),
        1 => (0usize..10).prop_map(Op::CandidateMoveToPageIndex),
        1 => proptest::char::range('1', '4').prop_map(Op::CandidateShortcut),
    ]
}

fn scripted_engine() -> Arc<MockEngine> {
    let engine = MockEngine::new();
    engine.set_default_conversion(vec![
        segment_with_meta("かんじ", &["漢字", "感じ", "幹事"]),
        segment_with_meta("は", &["は", "葉"]),
    ]);
    engine.set_default_suggestion(vec![segment_with_meta("かんじは", &["漢字は", "感じは"])]);
    engine.set_default_prediction(vec![segment_with_meta("かんじは", &["漢字判"])]);
    engine
}

fn apply(op: &Op, converter: &mut SessionConverter, composer: &mut MockComposer) {
    match op {
        Op::Convert => {
            converter.convert(composer);
        }
        Op::Suggest => {
            converter.suggest(composer);
        }
        Op::Predict => {
            converter.predict(composer);
        }
        Op::Cancel => converter.cancel(),
        Op::Reset => converter.reset(),
        Op::Commit => converter.commit(),
        Op::CommitSuggestion(index) => converter.commit_suggestion(*index),
        Op::CommitFirstSegment => converter.commit_first_segment(composer),
        Op::CommitPreedit => converter.commit_preedit(composer),
        Op::CommitHead(count) => converter.commit_head(*count, composer),
        Op::CandidateNext => converter.candidate_next(composer),
        Op::CandidatePrev => converter.candidate_prev(),
        Op::CandidateNextPage => converter.candidate_next_page(),
        Op::CandidatePrevPage => converter.candidate_prev_page(),
        Op::CandidateMoveToId(id) => converter.candidate_move_to_id(*id, composer),
        Op::CandidateMoveToPageIndex(index) => converter.candidate_move_to_page_index(*index),
        Op::CandidateShortcut(shortcut) => {
            converter.candidate_move_to_shortcut(*shortcut);
        }
        Op::SegmentFocusRight => converter.segment_focus_right(),
        Op::SegmentFocusLeft => converter.segment_focus_left(),
        Op::SegmentFocusLast => converter.segment_focus_last(),
        Op::SegmentFocusLeftEdge => converter.segment_focus_left_edge(),
        Op::SegmentWidthExpand => converter.segment_width_expand(),
        Op::SegmentWidthShrink => converter.segment_width_shrink(),
        Op::SwitchKanaType => {
            converter.switch_kana_type(composer);
        }
    }
}

fn assert_invariants(converter: &SessionConverter) {
    // Activity matches the state set.
    assert_eq!(
        converter.is_active(),
        matches!(
            converter.state(),
            State::Suggestion | State::Prediction | State::Conversion
        )
    );

    // The focused segment index stays within the conversion segments.
    if converter.check_state(States::PREDICTION | States::CONVERSION)
        && converter.segments().conversion_segments_len() > 0
    {
        assert!(converter.segment_index() < converter.segments().conversion_segments_len());
    }

    // A suggestion is a single unfocused segment.
    if converter.check_state(States::SUGGESTION) {
        assert_eq!(converter.segments().conversion_segments_len(), 1);
        assert!(!converter.candidate_list().focused());
    }

    // The candidate window only shows while active.
    if converter.is_candidate_list_visible() {
        assert!(converter.is_active());
    }

    // Composition always means a cleared focus.
    if converter.check_state(States::COMPOSITION) {
        assert_eq!(converter.segment_index(), 0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn random_operation_sequences_keep_invariants(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let engine = scripted_engine();
        let mut converter = converter(&engine);
        converter.set_operation_preferences(OperationPreferences {
            use_cascading_window: true,
            candidate_shortcuts: "123".to_string(),
        });
        let mut composer = MockComposer::new("かんじは");

        for op in &ops {
            apply(op, &mut converter, &mut composer);
            assert_invariants(&converter);
        }
    }

    #[test]
    fn segment_focus_right_cycles_back_to_the_first_segment(extra in 0usize..3) {
        let engine = MockEngine::new();
        let mut segments = vec![segment("かんじ", &["漢字"]), segment("は", &["は"])];
        for i in 0..extra {
            let value = format!("の{i}");
            segments.push(segment("の", &[value.as_str()]));
        }
        let count = segments.len();
        engine.push_conversion(segments);

        let mut converter = converter(&engine);
        prop_assert!(converter.convert(&MockComposer::new("かんじは")));

        for _ in 0..count {
            converter.segment_focus_right();
        }
        prop_assert_eq!(converter.segment_index(), 0);
    }
}
