use crate::domain::language::Language;
use unicode_segmentation::UnicodeSegmentation;

/// Measure text length in the unit appropriate for the language: grapheme
/// clusters for complex scripts (a rendered character may span several
/// chars), plain chars otherwise.
fn text_length(text: &str, language: Language) -> usize {
    if language.has_complex_script() {
        text.graphemes(true).count()
    } else {
        text.chars().count()
    }
}

/// Split sentences after sentence-final punctuation followed by whitespace.
/// Complex scripts additionally end sentences with the Devanagari danda and
/// double danda.
fn split_sentences(text: &str, language: Language) -> Vec<&str> {
    let pattern = if language.has_complex_script() {
        r"[।॥.!?]+\s+"
    } else {
        r"[.!?]+\s+"
    };
    let boundary = regex::Regex::new(pattern).unwrap();

    let mut sentences = Vec::new();
    let mut last_end = 0;
    for mat in boundary.find_iter(text) {
        sentences.push(text[last_end..mat.end()].trim_end());
        last_end = mat.end();
    }
    if last_end < text.len() {
        sentences.push(text[last_end..].trim_end());
    }
    sentences
}

/// Second-level split for a sentence that alone exceeds the bound: greedy
/// word accumulation with the same length metric. Words are never cut, so
/// a single word longer than the bound becomes its own oversized chunk.
/// The trailing partial chunk is returned so following sentences can
/// continue to fill it.
fn split_long_sentence(
    sentence: &str,
    language: Language,
    max_length: usize,
    chunks: &mut Vec<String>,
) -> String {
    let mut piece = String::new();
    for word in sentence.split_whitespace() {
        let word_length = text_length(word, language);
        let piece_length = text_length(&piece, language);
        if !piece.is_empty() && piece_length + word_length + 1 > max_length {
            chunks.push(piece.trim().to_string());
            piece = String::new();
        }
        piece.push_str(word);
        piece.push(' ');
    }
    piece
}

/// Split narration text into synthesis-safe chunks.
///
/// Sentences are accumulated greedily: the running chunk is flushed the
/// moment the next sentence would push it past `max_length`. Length is
/// measured in grapheme clusters for complex scripts and chars otherwise,
/// so a conjunct or vowel sign is never separated from its base consonant.
/// Joining the returned chunks with single spaces reproduces the input up
/// to whitespace normalization.
pub fn chunk_text(text: &str, language: Language, max_length: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if text_length(trimmed, language) <= max_length {
        return vec![trimmed.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(trimmed, language) {
        let sentence_length = text_length(sentence, language);
        let current_length = text_length(&current, language);

        if current_length + sentence_length + 1 > max_length {
            if !current.trim().is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = if sentence_length > max_length {
                split_long_sentence(sentence, language, max_length, &mut chunks)
            } else {
                format!("{} ", sentence)
            };
        } else {
            current.push_str(sentence);
            current.push(' ');
        }
    }

    if !current.trim().is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grapheme_len(text: &str) -> usize {
        text.graphemes(true).count()
    }

    fn normalized(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_text_is_a_single_chunk() {
        let chunks = chunk_text("Hello. World.", Language::English, 100);
        assert_eq!(chunks, vec!["Hello. World.".to_string()]);
    }

    #[test]
    fn test_empty_and_whitespace_input_yield_no_chunks() {
        assert!(chunk_text("", Language::English, 100).is_empty());
        assert!(chunk_text("   \n\t  ", Language::Hindi, 100).is_empty());
    }

    #[test]
    fn test_sentences_group_without_exceeding_bound() {
        // 10 sentences of exactly 100 chars each, bound 250: two fit per
        // chunk, the third would overflow.
        let sentence = format!("{}.", "s".repeat(99));
        let text = std::iter::repeat(sentence.as_str())
            .take(10)
            .collect::<Vec<_>>()
            .join(" ");
        let chunks = chunk_text(&text, Language::English, 250);

        assert_eq!(chunks.len(), 5);
        for chunk in &chunks {
            assert!(
                chunk.chars().count() <= 250,
                "chunk length {} exceeds bound",
                chunk.chars().count()
            );
        }
        assert_eq!(normalized(&chunks.join(" ")), normalized(&text));
    }

    #[test]
    fn test_concatenation_reproduces_content() {
        let sentence = "The quick brown fox jumps over the lazy dog. ";
        let text = sentence.repeat(40);
        let chunks = chunk_text(&text, Language::English, 120);

        assert!(chunks.len() > 1);
        assert_eq!(normalized(&chunks.join(" ")), normalized(&text));
    }

    #[test]
    fn test_oversized_sentence_splits_on_word_boundaries() {
        // One sentence far over the bound, no internal punctuation.
        let text = format!("{}.", "word ".repeat(60).trim_end());
        let chunks = chunk_text(&text, Language::English, 50);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 50);
            // No word was cut.
            for word in chunk.split_whitespace() {
                assert!(word.starts_with("word"));
            }
        }
        assert_eq!(normalized(&chunks.join(" ")), normalized(&text));
    }

    #[test]
    fn test_single_indivisible_word_may_exceed_bound() {
        let long_word = "a".repeat(80);
        let text = format!("short words then {} and more.", long_word);
        let chunks = chunk_text(&text, Language::English, 40);

        // The oversized word survives intact as its own chunk.
        assert!(chunks.iter().any(|c| c.contains(&long_word)));
        assert_eq!(normalized(&chunks.join(" ")), normalized(&text));
    }

    #[test]
    fn test_rechunking_is_stable() {
        let sentence = "Stability is a property worth testing. ";
        let text = sentence.repeat(30);
        let chunks = chunk_text(&text, Language::English, 150);

        for chunk in &chunks {
            let rechunked = chunk_text(chunk, Language::English, 150);
            assert_eq!(rechunked, vec![chunk.clone()]);
        }
    }

    #[test]
    fn test_hindi_splits_on_danda() {
        let sentence = "यह एक परीक्षण वाक्य है जो शोध पत्र की कथा के लिए लिखा गया है।";
        let text = std::iter::repeat(sentence)
            .take(12)
            .collect::<Vec<_>>()
            .join(" ");
        let bound = 120;
        let chunks = chunk_text(&text, Language::Hindi, bound);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(
                grapheme_len(chunk) <= bound,
                "chunk has {} graphemes, bound {}",
                grapheme_len(chunk),
                bound
            );
            // Sentence boundaries were respected: chunks end at a danda.
            assert!(chunk.ends_with('।'));
        }
        assert_eq!(normalized(&chunks.join(" ")), normalized(&text));
    }

    #[test]
    fn test_grapheme_bound_never_splits_clusters() {
        // Each "कि" is a single grapheme cluster of two chars (consonant
        // plus vowel sign). A char-based splitter at this bound would cut
        // inside clusters; the grapheme metric must not.
        let word = "कि".repeat(5);
        let text = format!("{}।", format!("{} ", word).repeat(20).trim_end());
        let bound = 30;
        let chunks = chunk_text(&text, Language::Hindi, bound);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(grapheme_len(chunk) <= bound);
            for w in chunk.trim_end_matches('।').split_whitespace() {
                assert_eq!(grapheme_len(w), 5, "cluster was split in {:?}", w);
            }
        }
    }

    #[test]
    fn test_exactly_at_bound_is_one_chunk() {
        let text = "b".repeat(200);
        let chunks = chunk_text(&text, Language::English, 200);
        assert_eq!(chunks.len(), 1);
    }
}
