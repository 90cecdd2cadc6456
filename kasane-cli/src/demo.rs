//! Demo collaborators for the interactive driver: a plain string-buffer
//! composer and a small rule-based conversion engine over a built-in
//! lexicon. Good enough to drive every session-converter operation from a
//! terminal; not a real kana-kanji converter.

use kasane_session::{
    Candidate, Composer, ConversionEngine, Segment, Segments, TransliterationType,
};

/// Accumulates typed characters into a reading.
#[derive(Default)]
pub struct SimpleComposer {
    text: String,
    source_text: String,
}

impl SimpleComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, input: &str) {
        self.text.push_str(input);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Composer for SimpleComposer {
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

/// Reading → surface forms.
const LEXICON: &[(&str, &[&str])] = &[
    ("あめ", &["雨", "飴"]),
    ("いく", &["行く", "逝く"]),
    ("かく", &["書く", "描く", "欠く"]),
    ("かんじ", &["漢字", "感じ", "幹事"]),
    ("が", &["が", "蛾"]),
    ("がくせい", &["学生"]),
    ("きょう", &["今日", "京", "郷"]),
    ("と", &["と", "戸", "都"]),
    ("に", &["に", "二", "荷"]),
    ("の", &["の", "野"]),
    ("は", &["は", "葉", "歯"]),
    ("はし", &["橋", "箸", "端"]),
    ("はしる", &["走る"]),
    ("はれ", &["晴れ"]),
    ("ふる", &["降る", "振る"]),
    ("みる", &["見る", "観る", "診る"]),
    ("も", &["も", "喪"]),
    ("よむ", &["読む", "詠む"]),
    ("わたし", &["私", "渡し"]),
    ("を", &["を"]),
];

/// Usage notes for a few homophones, keyed by surface.
const USAGES: &[(&str, &str, &str)] = &[
    ("見る", "見る", "目でとらえる。"),
    ("観る", "見る", "鑑賞する。"),
    ("診る", "診る", "診察する。"),
    ("書く", "書く", "文字を記す。"),
    ("描く", "描く", "絵や図をえがく。"),
];

fn is_particle(c: char) -> bool {
    matches!(c, 'は' | 'が' | 'を' | 'に' | 'で' | 'と' | 'へ' | 'も' | 'の')
}

fn lexicon_surfaces(reading: &str) -> Option<&'static [&'static str]> {
    LEXICON
        .iter()
        .find(|(key, _)| *key == reading)
        .map(|(_, surfaces)| *surfaces)
}

fn hiragana_to_katakana(reading: &str) -> String {
    reading
        .chars()
        .map(|c| {
            if ('\u{3041}'..='\u{3096}').contains(&c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

fn to_full_width_ascii(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' ' => '\u{3000}',
            '!'..='~' => char::from_u32(c as u32 + 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Katakana → half-width katakana, decomposing voiced marks.
fn to_half_width_katakana(text: &str) -> String {
    const TABLE: &[(char, &str)] = &[
        ('ア', "ｱ"), ('イ', "ｲ"), ('ウ', "ｳ"), ('エ', "ｴ"), ('オ', "ｵ"),
        ('カ', "ｶ"), ('キ', "ｷ"), ('ク', "ｸ"), ('ケ', "ｹ"), ('コ', "ｺ"),
        ('ガ', "ｶﾞ"), ('ギ', "ｷﾞ"), ('グ', "ｸﾞ"), ('ゲ', "ｹﾞ"), ('ゴ', "ｺﾞ"),
        ('サ', "ｻ"), ('シ', "ｼ"), ('ス', "ｽ"), ('セ', "ｾ"), ('ソ', "ｿ"),
        ('ザ', "ｻﾞ"), ('ジ', "ｼﾞ"), ('ズ', "ｽﾞ"), ('ゼ', "ｾﾞ"), ('ゾ', "ｿﾞ"),
        ('タ', "ﾀ"), ('チ', "ﾁ"), ('ツ', "ﾂ"), ('テ', "ﾃ"), ('ト', "ﾄ"),
        ('ダ', "ﾀﾞ"), ('ヂ', "ﾁﾞ"), ('ヅ', "ﾂﾞ"), ('デ', "ﾃﾞ"), ('ド', "ﾄﾞ"),
        ('ナ', "ﾅ"), ('ニ', "ﾆ"), ('ヌ', "ﾇ"), ('ネ', "ﾈ"), ('ノ', "ﾉ"),
        ('ハ', "ﾊ"), ('ヒ', "ﾋ"), ('フ', "ﾌ"), ('ヘ', "ﾍ"), ('ホ', "ﾎ"),
        ('バ', "ﾊﾞ"), ('ビ', "ﾋﾞ"), ('ブ', "ﾌﾞ"), ('ベ', "ﾍﾞ"), ('ボ', "ﾎﾞ"),
        ('パ', "ﾊﾟ"), ('ピ', "ﾋﾟ"), ('プ', "ﾌﾟ"), ('ペ', "ﾍﾟ"), ('ポ', "ﾎﾟ"),
        ('マ', "ﾏ"), ('ミ', "ﾐ"), ('ム', "ﾑ"), ('メ', "ﾒ"), ('モ', "ﾓ"),
        ('ヤ', "ﾔ"), ('ユ', "ﾕ"), ('ヨ', "ﾖ"),
        ('ラ', "ﾗ"), ('リ', "ﾘ"), ('ル', "ﾙ"), ('レ', "ﾚ"), ('ロ', "ﾛ"),
        ('ワ', "ﾜ"), ('ヲ', "ｦ"), ('ン', "ﾝ"),
        ('ァ', "ｧ"), ('ィ', "ｨ"), ('ゥ', "ｩ"), ('ェ', "ｪ"), ('ォ', "ｫ"),
        ('ャ', "ｬ"), ('ュ', "ｭ"), ('ョ', "ｮ"), ('ッ', "ｯ"), ('ー', "ｰ"),
    ];
    text.chars()
        .map(|c| {
            TABLE
                .iter()
                .find(|(full, _)| *full == c)
                .map(|(_, half)| half.to_string())
                .unwrap_or_else(|| c.to_string())
        })
        .collect()
}

/// Best-effort hiragana → romaji; unmapped characters pass through.
fn hiragana_to_romaji(reading: &str) -> String {
    const DIGRAPHS: &[(&str, &str)] = &[
        ("きゃ", "kya"), ("きゅ", "kyu"), ("きょ", "kyo"),
        ("しゃ", "sha"), ("しゅ", "shu"), ("しょ", "sho"),
        ("ちゃ", "cha"), ("ちゅ", "chu"), ("ちょ", "cho"),
        ("にゃ", "nya"), ("にゅ", "nyu"), ("にょ", "nyo"),
        ("ひゃ", "hya"), ("ひゅ", "hyu"), ("ひょ", "hyo"),
        ("みゃ", "mya"), ("みゅ", "myu"), ("みょ", "myo"),
        ("りゃ", "rya"), ("りゅ", "ryu"), ("りょ", "ryo"),
        ("ぎゃ", "gya"), ("ぎゅ", "gyu"), ("ぎょ", "gyo"),
        ("じゃ", "ja"), ("じゅ", "ju"), ("じょ", "jo"),
        ("びゃ", "bya"), ("びゅ", "byu"), ("びょ", "byo"),
        ("ぴゃ", "pya"), ("ぴゅ", "pyu"), ("ぴょ", "pyo"),
    ];
    const SINGLES: &[(char, &str)] = &[
        ('あ', "a"), ('い', "i"), ('う', "u"), ('え', "e"), ('お', "o"),
        ('か', "ka"), ('き', "ki"), ('く', "ku"), ('け', "ke"), ('こ', "ko"),
        ('が', "ga"), ('ぎ', "gi"), ('ぐ', "gu"), ('げ', "ge"), ('ご', "go"),
        ('さ', "sa"), ('し', "shi"), ('す', "su"), ('せ', "se"), ('そ', "so"),
        ('ざ', "za"), ('じ', "ji"), ('ず', "zu"), ('ぜ', "ze"), ('ぞ', "zo"),
        ('た', "ta"), ('ち', "chi"), ('つ', "tsu"), ('て', "te"), ('と', "to"),
        ('だ', "da"), ('ぢ', "ji"), ('づ', "zu"), ('で', "de"), ('ど', "do"),
        ('な', "na"), ('に', "ni"), ('ぬ', "nu"), ('ね', "ne"), ('の', "no"),
        ('は', "ha"), ('ひ', "hi"), ('ふ', "fu"), ('へ', "he"), ('ほ', "ho"),
        ('ば', "ba"), ('び', "bi"), ('ぶ', "bu"), ('べ', "be"), ('ぼ', "bo"),
        ('ぱ', "pa"), ('ぴ', "pi"), ('ぷ', "pu"), ('ぺ', "pe"), ('ぽ', "po"),
        ('ま', "ma"), ('み', "mi"), ('む', "mu"), ('め', "me"), ('も', "mo"),
        ('や', "ya"), ('ゆ', "yu"), ('よ', "yo"),
        ('ら', "ra"), ('り', "ri"), ('る', "ru"), ('れ', "re"), ('ろ', "ro"),
        ('わ', "wa"), ('を', "wo"), ('ん', "n"), ('ー', "-"),
    ];

    let chars: Vec<char> = reading.chars().collect();
    let mut romaji = String::new();
    let mut pos = 0;
    while pos < chars.len() {
        if pos + 1 < chars.len() {
            let pair: String = chars[pos..pos + 2].iter().collect();
            if let Some((_, value)) = DIGRAPHS.iter().find(|(kana, _)| *kana == pair) {
                romaji.push_str(value);
                pos += 2;
                continue;
            }
        }
        if chars[pos] == 'っ' && pos + 1 < chars.len() {
            // Geminate: double the next consonant.
            let rest = hiragana_to_romaji(&chars[pos + 1..].iter().collect::<String>());
            if let Some(first) = rest.chars().next().filter(|c| c.is_ascii_alphabetic()) {
                romaji.push(first);
            }
            romaji.push_str(&rest);
            return romaji;
        }
        match SINGLES.iter().find(|(kana, _)| *kana == chars[pos]) {
            Some((_, value)) => romaji.push_str(value),
            None => romaji.push(chars[pos]),
        }
        pos += 1;
    }
    romaji
}

/// The eleven transliteration renderings of a reading, in canonical order.
fn transliterations(reading: &str) -> Vec<Candidate> {
    let romaji = hiragana_to_romaji(reading);
    TransliterationType::ALL
        .iter()
        .map(|t13n| {
            let value = match t13n {
                TransliterationType::Hiragana => reading.to_string(),
                TransliterationType::FullKatakana => hiragana_to_katakana(reading),
                TransliterationType::HalfAscii => romaji.clone(),
                TransliterationType::HalfAsciiUpper => romaji.to_uppercase(),
                TransliterationType::HalfAsciiLower => romaji.to_lowercase(),
                TransliterationType::HalfAsciiCapitalized => capitalize(&romaji),
                TransliterationType::FullAscii => to_full_width_ascii(&romaji),
                TransliterationType::FullAsciiUpper => to_full_width_ascii(&romaji.to_uppercase()),
                TransliterationType::FullAsciiLower => to_full_width_ascii(&romaji.to_lowercase()),
                TransliterationType::FullAsciiCapitalized => {
                    to_full_width_ascii(&capitalize(&romaji))
                }
                TransliterationType::HalfKatakana => {
                    to_half_width_katakana(&hiragana_to_katakana(reading))
                }
            };
            Candidate::new(value).with_content_key(reading)
        })
        .collect()
}

fn make_candidate(surface: &str, reading: &str) -> Candidate {
    let mut candidate = Candidate::new(surface).with_content_key(reading);
    if let Some((_, title, description)) = USAGES.iter().find(|(s, _, _)| *s == surface) {
        candidate.usage_title = Some(title.to_string());
        candidate.usage_description = Some(description.to_string());
    }
    candidate
}

fn make_segment(reading: &str) -> Segment {
    let mut segment = Segment::new(reading);
    let mut seen = Vec::new();
    if let Some(surfaces) = lexicon_surfaces(reading) {
        for surface in surfaces {
            seen.push(surface.to_string());
            segment.add_candidate(make_candidate(surface, reading));
        }
    }
    for fallback in [reading.to_string(), hiragana_to_katakana(reading)] {
        if !seen.contains(&fallback) {
            seen.push(fallback.clone());
            segment.add_candidate(Candidate::new(fallback).with_content_key(reading));
        }
    }
    segment.set_meta_candidates(transliterations(reading));
    segment
}

/// Split a reading into naive bunsetsu: longest lexicon match first, then
/// up to the next particle.
fn segment_reading(reading: &str) -> Vec<String> {
    let chars: Vec<char> = reading.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let mut len = 0;
        for (key, _) in LEXICON {
            let key_len = key.chars().count();
            if key_len > len
                && pos + key_len <= chars.len()
                && chars[pos..pos + key_len].iter().collect::<String>() == *key
            {
                len = key_len;
            }
        }
        if len == 0 {
            let mut end = pos + 1;
            while end < chars.len() && !is_particle(chars[end]) {
                end += 1;
            }
            len = end - pos;
        }
        segments.push(chars[pos..pos + len].iter().collect());
        pos += len;
    }
    segments
}

fn trim_history(segments: &mut Segments) {
    let max = segments.max_history_segments_size();
    while segments.history_segments_len() > max {
        segments.pop_front_history_segment();
    }
}

/// A stateless engine over the built-in lexicon.
pub struct DemoEngine;

impl DemoEngine {
    pub fn new() -> Self {
        Self
    }

    fn fill_lookup(&self, segments: &mut Segments, preedit: &str, limit: usize) -> bool {
        if preedit.is_empty() {
            return false;
        }
        let mut surfaces: Vec<(String, String)> = Vec::new();
        for (key, values) in LEXICON {
            if key.starts_with(preedit) {
                for value in *values {
                    if surfaces.len() < limit {
                        surfaces.push((value.to_string(), key.to_string()));
                    }
                }
            }
        }
        if surfaces.is_empty() {
            return false;
        }

        segments.clear_conversion_segments();
        let segment = segments.add_segment();
        segment.set_key(preedit);
        segment.set_content_key(preedit);
        for (surface, reading) in surfaces {
            let mut candidate = make_candidate(&surface, &reading);
            candidate.content_key = preedit.to_string();
            segment.add_candidate(candidate);
        }
        segment.set_meta_candidates(transliterations(preedit));
        true
    }
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionEngine for DemoEngine {
    fn start_conversion_with_composer(
        &self,
        segments: &mut Segments,
        composer: &dyn Composer,
    ) -> bool {
        let reading = composer.query_for_conversion();
        if reading.is_empty() {
            return false;
        }
        segments.clear_conversion_segments();
        for key in segment_reading(&reading) {
            segments.push_conversion_segment(make_segment(&key));
        }
        true
    }

    fn start_suggestion(&self, segments: &mut Segments, preedit: &str) -> bool {
        self.fill_lookup(segments, preedit, 3)
    }

    fn start_prediction(&self, segments: &mut Segments, preedit: &str) -> bool {
        self.fill_lookup(segments, preedit, 10)
    }

    fn start_reverse_conversion(&self, segments: &mut Segments, source_text: &str) -> bool {
        if source_text.is_empty() {
            return false;
        }
        let reading = LEXICON
            .iter()
            .find(|(_, surfaces)| surfaces.contains(&source_text))
            .map(|(key, _)| key.to_string())
            .unwrap_or_else(|| source_text.to_string());

        segments.clear_conversion_segments();
        let segment = segments.add_segment();
        segment.set_key(source_text);
        segment.add_candidate(Candidate::new(reading).with_content_key(source_text));
        true
    }

    fn resize_segment(&self, segments: &mut Segments, index: usize, delta: i32) -> bool {
        if index >= segments.conversion_segments_len() || delta == 0 {
            return false;
        }
        // Re-split everything from the resized segment on.
        let mut tail = String::new();
        for i in index..segments.conversion_segments_len() {
            tail.push_str(segments.conversion_segment(i).unwrap().key());
        }
        let tail_len = tail.chars().count();
        let current_len = segments
            .conversion_segment(index)
            .unwrap()
            .key()
            .chars()
            .count() as i32;
        let new_len = (current_len + delta).clamp(1, tail_len as i32) as usize;
        if new_len == current_len as usize {
            return false;
        }

        while segments.conversion_segments_len() > index {
            segments.remove_conversion_segment(index);
        }
        let head: String = tail.chars().take(new_len).collect();
        let rest: String = tail.chars().skip(new_len).collect();
        segments.push_conversion_segment(make_segment(&head));
        for key in segment_reading(&rest) {
            segments.push_conversion_segment(make_segment(&key));
        }
        true
    }

    fn focus_segment_value(&self, _segments: &mut Segments, _index: usize, _candidate_id: i32) {}

    fn commit_segment_value(&self, segments: &mut Segments, index: usize, candidate_id: i32) {
        if let Some(segment) = segments.conversion_segment_mut(index) {
            segment.move_candidate_to_front(candidate_id);
        }
    }

    fn submit_first_segment(&self, segments: &mut Segments, candidate_id: i32) {
        self.commit_segment_value(segments, 0, candidate_id);
        if let Some(first) = segments.remove_conversion_segment(0) {
            if segments.user_history_enabled() {
                segments.push_history_segment(first);
                trim_history(segments);
            }
        }
    }

    fn finish_conversion(&self, segments: &mut Segments) {
        let record_history = segments.user_history_enabled();
        while let Some(segment) = segments.remove_conversion_segment(0) {
            if record_history {
                segments.push_history_segment(segment);
            }
        }
        trim_history(segments);
    }

    fn cancel_conversion(&self, segments: &mut Segments) {
        segments.clear_conversion_segments();
    }

    fn reset_conversion(&self, segments: &mut Segments) {
        segments.clear_conversion_segments();
        segments.clear_history_segments();
    }

    fn revert_conversion(&self, segments: &mut Segments) {
        let len = segments.history_segments_len();
        if len > 0 {
            if let Some(value_len) = segments
                .history_segment(len - 1)
                .and_then(|s| s.candidate(0))
                .map(|c| c.value.chars().count())
            {
                segments.remove_tail_of_history_segments(value_len.max(1));
            }
        }
    }
}
