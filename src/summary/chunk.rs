//! Word-budgeted packing of turns into chunks

use serde::Serialize;

use crate::summary::Turn;

/// Consecutive turns rendered into one blob for a single extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub text: String,
    pub word_count: usize,
    pub turn_count: usize,
}

impl Chunk {
    fn push(&mut self, turn: &Turn, words: usize) {
        self.text.push_str(&turn.render());
        self.word_count += words;
        self.turn_count += 1;
    }

    fn is_empty(&self) -> bool {
        self.turn_count == 0
    }
}

/// Pack turns greedily, in order, into chunks of at most `budget` words.
///
/// A turn is never split: one that alone exceeds the budget becomes its own
/// oversized chunk.
pub fn build_chunks(turns: &[Turn], budget: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = Chunk::default();

    for turn in turns {
        let words = turn.word_count();

        if !current.is_empty() && current.word_count + words > budget {
            chunks.push(std::mem::take(&mut current));
        }

        current.push(turn, words);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    for chunk in chunks.iter().filter(|c| c.word_count > budget) {
        tracing::warn!(
            "Chunk of {} words exceeds the {} word budget (single oversized turn)",
            chunk.word_count,
            budget
        );
    }

    chunks
}
