//! Sentence splitting shared by the shortening strategies and the fallback
//! trimmer.
//!
//! One rule, one place: boundaries fall after sentence-terminal punctuation
//! (`.` `!` `?` and their full-width forms) followed by whitespace, or at
//! newlines. Both the strategies and the trimmer reference this function so
//! their notion of a "sentence" can't drift apart.

/// Characters that terminate a sentence. Covers ASCII and the full-width
/// forms used in Korean/Japanese/Chinese text.
const TERMINALS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

/// Split `text` into trimmed, non-empty sentences.
///
/// A sentence ends after a terminal punctuation character that is followed
/// by whitespace, or at a newline. Requiring trailing whitespace keeps
/// decimals ("3.5") and ellipses ("One...") intact. Terminal punctuation
/// stays attached to its sentence. Text with no boundary at all comes back
/// as a single sentence. Empty or whitespace-only input yields an empty vec.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            push_trimmed(&mut sentences, &mut current);
            continue;
        }
        current.push(ch);
        if TERMINALS.contains(&ch)
            && chars.peek().is_some_and(|next| next.is_whitespace())
        {
            push_trimmed(&mut sentences, &mut current);
        }
    }
    push_trimmed(&mut sentences, &mut current);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}
