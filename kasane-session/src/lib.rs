//! kasane-session: the session layer of a Japanese input method
//!
//! This crate owns the user-visible conversion lifecycle between a composer
//! (which accumulates keystrokes into a reading) and a pluggable conversion
//! engine (which segments the reading and ranks candidates): suggestion
//! while typing, prediction on demand, full conversion, segment focus and
//! resizing, candidate navigation, and commit. Its state is projected into
//! plain output records for the host UI.

pub mod config;
pub mod core;
pub mod logging;

pub use core::candidate_list::{Attributes, CandidateList};
pub use core::composer::Composer;
pub use core::converter::{
    ConversionPreferences, OperationPreferences, SessionConverter, State, States,
};
pub use core::engine::ConversionEngine;
pub use core::output::Output;
pub use core::segments::{Candidate, CandidateAttributes, RequestType, Segment, Segments};
pub use core::transliteration::TransliterationType;
