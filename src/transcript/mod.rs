//! Transcript module for callnotes
//!
//! Fetches ordered, speaker-attributed utterances for a named meeting.

mod file;
mod fireflies;
mod source;

pub use file::FileSource;
pub use fireflies::FirefliesSource;
pub use source::{build_source, TranscriptSource, Utterance};
