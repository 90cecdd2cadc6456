//! Starting conversions: full conversion, reverse conversion, and
//! transliteration switches

use tracing::{error, warn};

use super::super::candidate_list::Attributes;
use super::*;

impl SessionConverter {
    /// Start a conversion of the composer's reading. On failure the state
    /// is left unchanged.
    pub fn convert(&mut self, composer: &dyn Composer) -> bool {
        self.convert_with_preferences(composer, self.conversion_preferences)
    }

    pub fn convert_with_preferences(
        &mut self,
        composer: &dyn Composer,
        preferences: ConversionPreferences,
    ) -> bool {
        if !self.check_state(States::COMPOSITION | States::SUGGESTION | States::CONVERSION) {
            error!("convert is not allowed in {:?}", self.state);
            return false;
        }

        self.segments.set_request_type(RequestType::Conversion);
        apply_conversion_preferences(&preferences, &mut self.segments);

        if !self
            .engine
            .start_conversion_with_composer(&mut self.segments, composer)
        {
            warn!("the engine could not start a conversion");
            return false;
        }

        self.segment_index = 0;
        self.state = State::Conversion;
        self.candidate_list_visible = false;
        self.update_candidate_list();
        self.update_composition_cache();
        true
    }

    /// Recover a reading from committed surface text, feed it back into
    /// the composer one character at a time, and convert it.
    pub fn convert_reverse(&mut self, source_text: &str, composer: &mut dyn Composer) -> bool {
        let mut reverse_segments = Segments::new();
        if !self
            .engine
            .start_reverse_conversion(&mut reverse_segments, source_text)
        {
            return false;
        }
        if reverse_segments.conversion_segments_len() == 0 {
            warn!("no segments from reverse conversion");
            return false;
        }
        let mut reading = String::new();
        for i in 0..reverse_segments.conversion_segments_len() {
            let segment = reverse_segments.conversion_segment(i).unwrap();
            let Some(top) = segment.candidate(0) else {
                warn!("got an empty segment from reverse conversion");
                return false;
            };
            reading.push_str(&top.value);
        }

        composer.reset();
        // The composer accepts one UTF-8 character per insert.
        let mut buf = [0u8; 4];
        for character in reading.chars() {
            composer.insert_character_preedit(character.encode_utf8(&mut buf));
        }
        composer.set_source_text(source_text);

        if !self.convert(composer) {
            error!("failed to start conversion for reverse conversion");
            return false;
        }
        true
    }

    /// Move the focus to the transliteration variant selected by `t13n_type`.
    /// Entered from composition or suggestion this converts first and
    /// widens the conversion to a single segment; already in conversion it
    /// rotates among matching variants.
    pub fn convert_to_transliteration(
        &mut self,
        composer: &dyn Composer,
        t13n_type: TransliterationType,
    ) -> bool {
        if !self.check_state(
            States::COMPOSITION | States::SUGGESTION | States::PREDICTION | States::CONVERSION,
        ) {
            error!("convert_to_transliteration is not allowed in {:?}", self.state);
            return false;
        }
        if self.check_state(States::PREDICTION) {
            // Transliteration of a prediction works on the composition, so
            // fall back to it first.
            self.cancel();
        }

        let mut query_attributes = t13n_type.attributes()
            & (Attributes::HALF_WIDTH
                | Attributes::FULL_WIDTH
                | Attributes::ASCII
                | Attributes::HIRAGANA
                | Attributes::KATAKANA);

        if self.check_state(States::COMPOSITION | States::SUGGESTION) {
            if !self.convert(composer) {
                error!("conversion failed");
                return false;
            }
            self.resize_to_whole_composition();
            self.candidate_list.move_to_attributes(query_attributes);
        } else {
            let current_attributes = self
                .candidate_list
                .deepest_focused_candidate()
                .map_or(Attributes::empty(), |c| c.attributes());

            // Flipping the width of an ASCII variant keeps the casing.
            if query_attributes
                .intersection(current_attributes)
                .contains(Attributes::ASCII)
                && ((query_attributes.contains(Attributes::HALF_WIDTH)
                    && current_attributes.contains(Attributes::FULL_WIDTH))
                    || (query_attributes.contains(Attributes::FULL_WIDTH)
                        && current_attributes.contains(Attributes::HALF_WIDTH)))
            {
                query_attributes |= current_attributes
                    & (Attributes::UPPER | Attributes::LOWER | Attributes::CAPITALIZED);
            }

            self.candidate_list.move_next_attributes(query_attributes);
        }
        self.candidate_list_visible = false;
        self.segment_focus();
        true
    }

    /// Switch the focused value to a half-width rendering: half katakana
    /// when the composition contains kana or kanji, half ASCII (inheriting
    /// the current casing) otherwise.
    pub fn convert_to_half_width(&mut self, composer: &dyn Composer) -> bool {
        if !self.check_state(
            States::COMPOSITION | States::SUGGESTION | States::PREDICTION | States::CONVERSION,
        ) {
            error!("convert_to_half_width is not allowed in {:?}", self.state);
            return false;
        }
        if self.check_state(States::PREDICTION) {
            self.cancel();
        }

        let composition: String;
        if self.check_state(States::COMPOSITION | States::SUGGESTION) {
            if !self.convert(composer) {
                error!("conversion failed");
                return false;
            }
            self.resize_to_whole_composition();
            composition = self.composition.clone();
        } else {
            composition = self
                .selected_candidate(self.segment_index)
                .map(|c| c.value.clone())
                .unwrap_or_default();
        }

        let mut attributes = Attributes::HALF_WIDTH;
        // A mixed composition such as "あｂｃ" is treated as katakana.
        if text::contains_script_type(&composition, text::ScriptType::Katakana)
            || text::contains_script_type(&composition, text::ScriptType::Hiragana)
            || text::contains_script_type(&composition, text::ScriptType::Kanji)
            || text::contains_kana_symbol(&composition)
        {
            attributes |= Attributes::KATAKANA;
        } else {
            attributes |= Attributes::ASCII;
            attributes |= self
                .candidate_list
                .deepest_focused_candidate()
                .map_or(Attributes::empty(), |c| c.attributes())
                & (Attributes::UPPER | Attributes::LOWER | Attributes::CAPITALIZED);
        }
        self.candidate_list.move_next_attributes(attributes);
        self.candidate_list_visible = false;
        self.segment_focus();
        true
    }

    /// Cycle the focused value through hiragana, full-width katakana, and
    /// half-width katakana.
    pub fn switch_kana_type(&mut self, composer: &dyn Composer) -> bool {
        if !self.check_state(
            States::COMPOSITION | States::SUGGESTION | States::PREDICTION | States::CONVERSION,
        ) {
            error!("switch_kana_type is not allowed in {:?}", self.state);
            return false;
        }
        if self.check_state(States::PREDICTION) {
            self.cancel();
        }

        let attributes = if self.check_state(States::COMPOSITION | States::SUGGESTION) {
            if !self.convert(composer) {
                error!("conversion failed");
                return false;
            }
            self.resize_to_whole_composition();
            Attributes::FULL_WIDTH | Attributes::KATAKANA
        } else {
            let current = self
                .candidate_list
                .deepest_focused_candidate()
                .map_or(Attributes::empty(), |c| c.attributes());
            if current.contains(Attributes::HIRAGANA) {
                Attributes::FULL_WIDTH | Attributes::KATAKANA
            } else if current.contains(Attributes::KATAKANA)
                && current.contains(Attributes::FULL_WIDTH)
            {
                Attributes::HALF_WIDTH | Attributes::KATAKANA
            } else {
                Attributes::HIRAGANA
            }
        };

        self.candidate_list.move_next_attributes(attributes);
        self.candidate_list_visible = false;
        self.segment_focus();
        true
    }

    /// Widen segment 0 to cover the entire composition, so transliteration
    /// applies to the whole preedit as a single segment.
    fn resize_to_whole_composition(&mut self) {
        if self.segments.conversion_segments_len() <= 1 {
            return;
        }
        let length = self.composition.chars().count() as i32;
        self.engine.resize_segment(&mut self.segments, 0, length);
        self.update_candidate_list();
    }
}

/// Propagate the history preferences into the segments handed to the
/// engine.
pub(super) fn apply_conversion_preferences(
    preferences: &ConversionPreferences,
    segments: &mut Segments,
) {
    segments.set_user_history_enabled(preferences.use_history);
    segments.set_max_history_segments_size(preferences.max_history_size);
}
