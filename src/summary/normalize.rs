//! Turn merging and relevance filtering

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use crate::transcript::Utterance;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{Nd}]+").expect("valid word regex"));

/// Count words as maximal runs of alphanumerics.
pub fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}

/// Names of the investors on the call. Matching is exact and case-sensitive
/// after trimming.
#[derive(Debug, Clone, Default)]
pub struct InvestorSet(HashSet<String>);

impl InvestorSet {
    pub fn contains(&self, speaker: &str) -> bool {
        self.0.contains(speaker.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn role_of(&self, speaker: &str) -> Role {
        if self.contains(speaker) {
            Role::Investor
        } else {
            Role::Founder
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for InvestorSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|name| name.as_ref().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Investor,
    Founder,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investor => "Investor",
            Self::Founder => "Founder",
        }
    }
}

/// One uninterrupted block of speech from a single speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    /// Speaker name with role suffix, e.g. `Alice (Investor)`
    pub speaker_label: String,
    /// Merged utterance text, never empty
    pub text: String,
}

impl Turn {
    fn new(speaker: &str, text: String, investors: &InvestorSet) -> Self {
        Self {
            speaker_label: format!("{} ({})", speaker, investors.role_of(speaker).as_str()),
            text,
        }
    }

    /// The line this turn contributes to a chunk: `label: text\n`.
    pub fn render(&self) -> String {
        format!("{}: {}\n", self.speaker_label, self.text)
    }

    /// Words in the rendered line, speaker label included.
    pub fn word_count(&self) -> usize {
        count_words(&self.speaker_label) + count_words(&self.text)
    }
}

/// Merge consecutive same-speaker utterances into turns, in call order.
///
/// Text is concatenated as-is; empty merged text never produces a turn.
pub fn merge_turns(utterances: &[Utterance], investors: &InvestorSet) -> Vec<Turn> {
    let mut turns = Vec::new();
    let mut current_speaker: Option<&str> = None;
    let mut current_text = String::new();

    for utterance in utterances {
        if current_speaker == Some(utterance.speaker.as_str()) {
            current_text.push_str(&utterance.text);
            continue;
        }

        if let Some(speaker) = current_speaker {
            if !current_text.is_empty() {
                turns.push(Turn::new(
                    speaker,
                    std::mem::take(&mut current_text),
                    investors,
                ));
            }
        }

        current_speaker = Some(utterance.speaker.as_str());
        current_text.clear();
        current_text.push_str(&utterance.text);
    }

    if let Some(speaker) = current_speaker {
        if !current_text.is_empty() {
            turns.push(Turn::new(speaker, current_text, investors));
        }
    }

    turns
}

/// Drop filler turns shorter than `min_words`.
pub fn filter_relevant(turns: Vec<Turn>, min_words: usize) -> Vec<Turn> {
    let before = turns.len();
    let kept: Vec<Turn> = turns
        .into_iter()
        .filter(|turn| turn.word_count() >= min_words)
        .collect();

    tracing::debug!(
        "Kept {} of {} turns with at least {} words",
        kept.len(),
        before,
        min_words
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investors(names: &[&str]) -> InvestorSet {
        names.iter().collect()
    }

    #[test]
    fn counts_alphanumeric_runs() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("okay, go on"), 3);
        assert_eq!(count_words("Alice (Investor): 300% growth!"), 4);
        assert_eq!(count_words("We're at $1.5M ARR"), 6);
        assert_eq!(count_words("José übernimmt"), 2);
    }

    #[test]
    fn empty_transcript_yields_no_turns() {
        assert!(merge_turns(&[], &InvestorSet::default()).is_empty());
    }

    #[test]
    fn labels_speakers_by_role() {
        let utterances = vec![
            Utterance::new(
                "Alice",
                "Tell me about your traction and revenue growth this quarter please",
            ),
            Utterance::new(
                "Bob",
                "We grew three hundred percent year over year with strong retention metrics",
            ),
        ];

        let turns = merge_turns(&utterances, &investors(&["Alice"]));
        let rendered: Vec<String> = turns.iter().map(Turn::render).collect();

        assert_eq!(
            rendered,
            vec![
                "Alice (Investor): Tell me about your traction and revenue growth this quarter please\n",
                "Bob (Founder): We grew three hundred percent year over year with strong retention metrics\n",
            ]
        );
        assert_eq!(filter_relevant(turns, 12).len(), 2);
    }

    #[test]
    fn merges_consecutive_same_speaker_utterances() {
        let utterances = vec![
            Utterance::new("Bob", "We sell to banks. "),
            Utterance::new("Bob", "Mostly in Europe."),
            Utterance::new("Alice", "Why banks?"),
            Utterance::new("Bob", "They pay."),
        ];

        let turns = merge_turns(&utterances, &investors(&["Alice"]));

        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].text, "We sell to banks. Mostly in Europe.");
        assert_eq!(turns[1].speaker_label, "Alice (Investor)");
        assert_eq!(turns[2].speaker_label, "Bob (Founder)");
    }

    #[test]
    fn concatenated_turn_text_reproduces_input() {
        let utterances = vec![
            Utterance::new("A", "one "),
            Utterance::new("A", "two "),
            Utterance::new("B", "three "),
            Utterance::new("A", "four"),
            Utterance::new("A", " five"),
        ];

        let turns = merge_turns(&utterances, &InvestorSet::default());
        let merged: String = turns.iter().map(|t| t.text.as_str()).collect();
        let original: String = utterances.iter().map(|u| u.text.as_str()).collect();

        assert_eq!(merged, original);
    }

    #[test]
    fn empty_utterances_never_form_a_turn() {
        let utterances = vec![
            Utterance::new("A", ""),
            Utterance::new("B", "hello"),
            Utterance::new("C", ""),
        ];

        let turns = merge_turns(&utterances, &InvestorSet::default());
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].speaker_label, "B (Founder)");
    }

    #[test]
    fn investor_match_is_case_sensitive_and_trimmed() {
        let set = investors(&["  Alice  "]);
        assert!(set.contains("Alice"));
        assert!(!set.contains("alice"));
        assert!(!set.contains("Alice Smith"));
    }

    #[test]
    fn short_turns_are_filtered() {
        let utterances = vec![
            Utterance::new("Alice", "yeah"),
            Utterance::new(
                "Bob",
                "We are raising a two million seed round led by an existing angel investor",
            ),
        ];

        let kept = filter_relevant(merge_turns(&utterances, &investors(&["Alice"])), 12);
        assert_eq!(kept.len(), 1);
        assert!(kept.iter().all(|t| t.word_count() >= 12));
    }
}
