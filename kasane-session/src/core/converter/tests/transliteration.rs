use super::*;

/// A segment for the reading "かんじ" with the full set of meta
/// candidates in canonical transliteration order.
fn kanji_segment() -> Segment {
    let mut segment = segment("かんじ", &["漢字", "感じ"]);
    segment.set_meta_candidates(
        [
            "かんじ", "カンジ", "kanji", "KANJI", "kanji", "Kanji", "ｋａｎｊｉ", "ＫＡＮＪＩ",
            "ｋａｎｊｉ", "Ｋａｎｊｉ", "ｶﾝｼﾞ",
        ]
        .iter()
        .map(|value| Candidate::new(*value).with_content_key("かんじ"))
        .collect(),
    );
    segment
}

/// Same shape for an ASCII reading.
fn ascii_segment() -> Segment {
    let mut segment = segment("kanji", &["漢字"]);
    segment.set_meta_candidates(
        [
            "かんじ", "カンジ", "kanji", "KANJI", "kanji", "Kanji", "ｋａｎｊｉ", "ＫＡＮＪＩ",
            "ｋａｎｊｉ", "Ｋａｎｊｉ", "ｶﾝｼﾞ",
        ]
        .iter()
        .map(|value| Candidate::new(*value).with_content_key("kanji"))
        .collect(),
    );
    segment
}

#[test]
fn test_switch_kana_type_cycles_three_ways() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![kanji_segment()]);
    let mut converter = converter(&engine);
    let composer = MockComposer::new("かんじ");

    // From composition: convert, then full-width katakana.
    assert!(converter.switch_kana_type(&composer));
    assert_eq!(converter.state(), State::Conversion);
    assert_eq!(focused_value(&converter), "カンジ");
    assert!(!converter.is_candidate_list_visible());

    assert!(converter.switch_kana_type(&composer));
    assert_eq!(focused_value(&converter), "ｶﾝｼﾞ");

    assert!(converter.switch_kana_type(&composer));
    assert_eq!(focused_value(&converter), "かんじ");

    // The cycle closes.
    assert!(converter.switch_kana_type(&composer));
    assert_eq!(focused_value(&converter), "カンジ");
}

#[test]
fn test_convert_to_transliteration_from_composition() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![kanji_segment()]);
    let mut converter = converter(&engine);
    let composer = MockComposer::new("かんじ");

    assert!(converter.convert_to_transliteration(&composer, TransliterationType::HalfKatakana));
    assert_eq!(converter.state(), State::Conversion);
    assert_eq!(focused_value(&converter), "ｶﾝｼﾞ");

    // The engine is told about the transliteration focus.
    assert!(engine.calls().iter().any(|c| matches!(
        c,
        EngineCall::FocusSegmentValue {
            index: 0,
            candidate_id
        } if *candidate_id < 0
    )));
}

#[test]
fn test_convert_to_transliteration_widens_to_one_segment() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![kanji_segment(), segment("は", &["は"])]);
    let mut merged = kanji_segment();
    merged.set_key("かんじは");
    engine.push_resize(vec![merged]);

    let mut converter = converter(&engine);
    let composer = MockComposer::new("かんじは");
    assert!(converter.convert_to_transliteration(&composer, TransliterationType::FullKatakana));

    assert!(engine.calls().contains(&EngineCall::ResizeSegment {
        index: 0,
        delta: 4
    }));
    assert_eq!(converter.segments().conversion_segments_len(), 1);
    assert_eq!(focused_value(&converter), "カンジ");
}

#[test]
fn test_ascii_width_flip_inherits_casing() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![kanji_segment()]);
    let mut converter = converter(&engine);
    let composer = MockComposer::new("かんじ");
    assert!(converter.convert(&composer));

    // Focus the full-width upper-case ASCII variant.
    converter.candidate_move_to_id(TransliterationType::FullAsciiUpper.id(), &composer);
    assert_eq!(focused_value(&converter), "ＫＡＮＪＩ");

    // Flipping to half width keeps the upper casing.
    assert!(converter.convert_to_transliteration(&composer, TransliterationType::HalfAscii));
    assert_eq!(focused_value(&converter), "KANJI");
}

#[test]
fn test_convert_to_half_width_prefers_katakana_for_kana_readings() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![kanji_segment()]);
    let mut converter = converter(&engine);
    let composer = MockComposer::new("かんじ");

    assert!(converter.convert_to_half_width(&composer));
    assert_eq!(focused_value(&converter), "ｶﾝｼﾞ");
}

#[test]
fn test_convert_to_half_width_uses_ascii_for_ascii_readings() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![ascii_segment()]);
    let mut converter = converter(&engine);
    let composer = MockComposer::new("kanji");

    assert!(converter.convert_to_half_width(&composer));
    assert_eq!(focused_value(&converter), "kanji");
}

#[test]
fn test_convert_to_half_width_inherits_casing_in_conversion() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![ascii_segment()]);
    let mut converter = converter(&engine);
    let composer = MockComposer::new("kanji");
    assert!(converter.convert(&composer));

    converter.candidate_move_to_id(TransliterationType::FullAsciiUpper.id(), &composer);
    assert_eq!(focused_value(&converter), "ＫＡＮＪＩ");

    // The focused value "ＫＡＮＪＩ" has no kana, so half-width means
    // ASCII with the current casing.
    assert!(converter.convert_to_half_width(&composer));
    assert_eq!(focused_value(&converter), "KANJI");
}

#[test]
fn test_transliteration_from_prediction_cancels_first() {
    let engine = MockEngine::new();
    engine.set_default_prediction(vec![segment("かんじ", &["感じ"])]);
    engine.push_conversion(vec![kanji_segment()]);

    let mut converter = converter(&engine);
    let composer = MockComposer::new("かんじ");
    assert!(converter.predict(&composer));
    assert_eq!(converter.state(), State::Prediction);
    engine.clear_calls();

    assert!(converter.switch_kana_type(&composer));
    assert_eq!(converter.state(), State::Conversion);
    assert_eq!(focused_value(&converter), "カンジ");

    let calls = engine.calls();
    let cancel_pos = calls
        .iter()
        .position(|c| *c == EngineCall::CancelConversion)
        .expect("prediction was cancelled");
    let convert_pos = calls
        .iter()
        .position(|c| matches!(c, EngineCall::StartConversion { .. }))
        .expect("conversion was started");
    assert!(cancel_pos < convert_pos);
}

#[test]
fn test_transliterations_live_in_the_cascading_sub_list() {
    let engine = MockEngine::new();
    engine.push_conversion(vec![kanji_segment()]);
    let mut converter = converter(&engine);
    assert!(converter.convert(&MockComposer::new("かんじ")));

    // Two ordinary candidates plus one sub-list entry.
    assert_eq!(converter.candidate_list().len(), 3);

    converter.set_operation_preferences(OperationPreferences {
        use_cascading_window: false,
        candidate_shortcuts: String::new(),
    });
    converter.update_candidate_list();
    // Appended as siblings instead: 2 candidates + 9 distinct
    // transliteration values (two pairs share a value and merge).
    assert_eq!(converter.candidate_list().len(), 11);
}
