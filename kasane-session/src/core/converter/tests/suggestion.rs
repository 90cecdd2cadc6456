use super::*;

#[test]
fn test_suggest_shows_unfocused_candidates() {
    let engine = MockEngine::new();
    engine.push_suggestion(vec![segment("k", &["Kyoto", "Kanji"])]);

    let mut converter = converter(&engine);
    let composer = MockComposer::new("k");
    assert!(converter.suggest(&composer));

    assert_eq!(converter.state(), State::Suggestion);
    assert!(converter.is_candidate_list_visible());
    assert!(!converter.candidate_list().focused());
    assert_eq!(converter.segments().conversion_segments_len(), 1);
    assert_eq!(converter.candidate_list().len(), 2);

    // The suggestions are cached for a later prediction merge.
    assert_eq!(converter.previous_suggestions().candidates_len(), 2);
}

#[test]
fn test_commit_suggestion_commits_the_selected_entry() {
    let engine = MockEngine::new();
    engine.push_suggestion(vec![segment("k", &["Kyoto", "Kanji"])]);

    let mut converter = converter(&engine);
    let composer = MockComposer::new("k");
    assert!(converter.suggest(&composer));

    converter.commit_suggestion(1);
    let result = converter.result().expect("commit produced a result");
    assert_eq!(result.value, "Kanji");
    assert_eq!(result.key, "k");
    assert_eq!(converter.state(), State::Composition);
    assert!(engine.calls().contains(&EngineCall::FinishConversion));
}

#[test]
fn test_commit_suggestion_out_of_range_is_ignored() {
    let engine = MockEngine::new();
    engine.push_suggestion(vec![segment("k", &["Kyoto", "Kanji"])]);

    let mut converter = converter(&engine);
    assert!(converter.suggest(&MockComposer::new("k")));
    engine.clear_calls();

    converter.commit_suggestion(5);
    assert_eq!(converter.state(), State::Suggestion);
    assert!(converter.result().is_none());
    assert!(engine.calls().is_empty());
}

#[test]
fn test_suggest_failure_cancels_and_keeps_composition() {
    let engine = MockEngine::new();
    let mut converter = converter(&engine);

    assert!(!converter.suggest(&MockComposer::new("q")));
    assert_eq!(converter.state(), State::Composition);
    assert!(!converter.is_candidate_list_visible());
    assert_eq!(
        engine.calls(),
        vec![
            EngineCall::StartSuggestion {
                preedit: "q".to_string()
            },
            EngineCall::CancelConversion,
        ]
    );
}

#[test]
fn test_suggest_replaces_a_previous_suggestion() {
    let engine = MockEngine::new();
    engine.push_suggestion(vec![segment("k", &["Kyoto"])]);
    engine.push_suggestion(vec![segment("ka", &["Kanji", "Kana"])]);

    let mut converter = converter(&engine);
    assert!(converter.suggest(&MockComposer::new("k")));
    assert!(converter.suggest(&MockComposer::new("ka")));

    assert_eq!(converter.candidate_list().len(), 2);
    assert_eq!(converter.previous_suggestions().key(), "ka");
}

#[test]
fn test_suggest_is_rejected_during_conversion() {
    let engine = MockEngine::new();
    let (mut converter, _composer) = two_segment_conversion(&engine);
    engine.clear_calls();

    assert!(!converter.suggest(&MockComposer::new("か")));
    assert_eq!(converter.state(), State::Conversion);
    assert!(engine.calls().is_empty());
}
