//! Composer interface
//!
//! The composer accumulates keystrokes into a reading and is owned by the
//! host session layer. The session converter only borrows it for the
//! duration of a call; operations that read it take `&dyn Composer`,
//! operations that rewrite it take `&mut dyn Composer`.

pub trait Composer {
    /// The reading used as the conversion key.
    fn query_for_conversion(&self) -> String;

    /// The (possibly trimmed) reading used for suggestion and prediction.
    fn query_for_prediction(&self) -> String;

    /// The text committed verbatim when no conversion runs.
    fn string_for_submission(&self) -> String;

    /// Append one UTF-8 character to the preedit.
    fn insert_character_preedit(&mut self, character: &str);

    /// Delete the character at `position` (in characters).
    fn delete_at(&mut self, position: usize);

    /// Preedit length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reset(&mut self);

    /// Record the surface text a reverse conversion started from.
    fn set_source_text(&mut self, text: &str);
}
