//! The text heuristics behind the simulated pipeline.
//!
//! None of this is real NLP. Splitting on whitespace, length filters and
//! substring checks are all the simulator needs to fabricate plausible output.

/// First fabricated token id.
pub const TOKEN_ID_BASE: u64 = 20_000;

/// Gap between consecutive fabricated token ids.
pub const TOKEN_ID_STRIDE: u64 = 137;

/// Upper bound on extracted keywords.
pub const MAX_KEYWORDS: usize = 3;

/// Whitespace as web text engines see it: Unicode `White_Space` without
/// U+0085 (NEXT LINE), plus U+FEFF (BYTE ORDER MARK).
pub fn is_separator(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Split on whitespace runs, dropping empty fragments.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// `TOKEN_ID_BASE + index * TOKEN_ID_STRIDE` for each token position.
pub fn token_ids(count: usize) -> Vec<u64> {
    (0..count as u64)
        .map(|i| TOKEN_ID_BASE + i * TOKEN_ID_STRIDE)
        .collect()
}

/// The first [`MAX_KEYWORDS`] tokens longer than three characters, in order.
pub fn keywords(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.chars().count() > 3)
        .take(MAX_KEYWORDS)
        .cloned()
        .collect()
}

/// Keyword at `index`, or `fallback` when there are not enough keywords.
pub fn keyword_or<'a>(keywords: &'a [String], index: usize, fallback: &'a str) -> &'a str {
    keywords.get(index).map(String::as_str).unwrap_or(fallback)
}

/// Leading `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Canned response shapes for the decoding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseTemplate {
    Travel,
    Explanation,
    HowTo,
    General,
}

impl ResponseTemplate {
    /// Pick a template from the lowercased prompt. The first match wins, in the
    /// order travel, explanation, how-to.
    pub fn select(prompt: &str) -> Self {
        let lower = prompt.to_lowercase();
        if lower.contains("trip") || lower.contains("travel") {
            ResponseTemplate::Travel
        } else if lower.contains("explain") || lower.contains("what") {
            ResponseTemplate::Explanation
        } else if lower.contains("how") {
            ResponseTemplate::HowTo
        } else {
            ResponseTemplate::General
        }
    }

    pub fn render(&self, keywords: &[String]) -> String {
        match self {
            ResponseTemplate::Travel => {
                "day one could start with exploring the main attractions then visit cultural sites"
                    .to_string()
            }
            ResponseTemplate::Explanation => format!(
                "to answer your question about {} we need to consider several factors including {}",
                keyword_or(keywords, 0, "this topic"),
                keyword_or(keywords, 1, "key aspects"),
            ),
            ResponseTemplate::HowTo => format!(
                "here is how to {} first you should {} the basics then proceed with implementation",
                keyword_or(keywords, 0, "approach this"),
                keyword_or(keywords, 1, "understand"),
            ),
            ResponseTemplate::General => format!(
                "regarding {} the key points are {} which relate to {}",
                keyword_or(keywords, 0, "your query"),
                keyword_or(keywords, 1, "important aspects"),
                keyword_or(keywords, 2, "core concepts"),
            ),
        }
    }
}

/// Split after `.`, `!` or `?` when followed by whitespace. The whitespace run
/// is dropped; a trailing run leaves an empty final sentence.
pub fn split_sentences(raw: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = raw.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if is_separator(c) && matches!(prev, Some('.' | '!' | '?')) {
            sentences.push(&raw[start..idx]);
            let mut end = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !is_separator(next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            start = end;
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    sentences.push(&raw[start..]);
    sentences
}

fn capitalize_first(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalize and number each sentence, one per line.
pub fn format_response(raw: &str) -> String {
    split_sentences(raw)
        .into_iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, capitalize_first(s)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_tokenize_drops_empty_fragments() {
        assert_eq!(
            tokenize("  Plan a\t3-day  trip\nto Tokyo "),
            strings(&["Plan", "a", "3-day", "trip", "to", "Tokyo"])
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
        assert_eq!(tokenize("single"), strings(&["single"]));
    }

    #[test]
    fn test_separator_class() {
        assert_eq!(tokenize("ab\u{feff}cd"), strings(&["ab", "cd"]));
        assert_eq!(tokenize("ab\u{85}cd"), strings(&["ab\u{85}cd"]));
        assert_eq!(tokenize("a\u{a0}b\u{3000}c"), strings(&["a", "b", "c"]));
        assert_eq!(format_response("one.\u{feff}two"), "1. One.\n2. Two");
        assert_eq!(split_sentences("one.\u{85}two"), vec!["one.\u{85}two"]);
    }

    #[test]
    fn test_token_ids() {
        assert_eq!(token_ids(3), vec![20000, 20137, 20274]);
        assert!(token_ids(0).is_empty());
    }

    #[test]
    fn test_keywords_length_rule_and_order() {
        let tokens = tokenize("Plan a 3-day trip to Tokyo");
        assert_eq!(keywords(&tokens), strings(&["Plan", "3-day", "trip"]));
    }

    #[test]
    fn test_keywords_cap_and_short_input() {
        assert!(keywords(&tokenize("a an the")).is_empty());
        assert_eq!(
            keywords(&tokenize("alpha beta gamma delta")),
            strings(&["alpha", "beta", "gamma"])
        );
    }

    #[test]
    fn test_keywords_count_characters_not_bytes() {
        // four characters, eight bytes
        assert_eq!(keywords(&tokenize("über ñuñó")), strings(&["über", "ñuñó"]));
        assert!(keywords(&tokenize("ñoñ")).is_empty());
    }

    #[test]
    fn test_keyword_or() {
        let kws = strings(&["Tokyo"]);
        assert_eq!(keyword_or(&kws, 0, "x"), "Tokyo");
        assert_eq!(keyword_or(&kws, 1, "x"), "x");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("hello world", 5), "hello");
        assert_eq!(preview("short", 30), "short");
        assert_eq!(preview("日本語のテキスト", 3), "日本語");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn test_template_priority() {
        assert_eq!(ResponseTemplate::select("how do I trip"), ResponseTemplate::Travel);
        assert_eq!(ResponseTemplate::select("TRAVEL plans"), ResponseTemplate::Travel);
        assert_eq!(
            ResponseTemplate::select("what is how"),
            ResponseTemplate::Explanation
        );
        assert_eq!(
            ResponseTemplate::select("Explain closures"),
            ResponseTemplate::Explanation
        );
        assert_eq!(ResponseTemplate::select("How to bake"), ResponseTemplate::HowTo);
        assert_eq!(ResponseTemplate::select("bake bread"), ResponseTemplate::General);
        assert_eq!(ResponseTemplate::select(""), ResponseTemplate::General);
    }

    #[test]
    fn test_substring_matching_is_not_word_based() {
        // "somehow" contains "how"
        assert_eq!(ResponseTemplate::select("somehow"), ResponseTemplate::HowTo);
    }

    #[test]
    fn test_templates_fall_back_without_keywords() {
        assert_eq!(
            ResponseTemplate::General.render(&[]),
            "regarding your query the key points are important aspects which relate to core concepts"
        );
        assert_eq!(
            ResponseTemplate::Explanation.render(&[]),
            "to answer your question about this topic we need to consider several factors including key aspects"
        );
        assert_eq!(
            ResponseTemplate::HowTo.render(&strings(&["bake"])),
            "here is how to bake first you should understand the basics then proceed with implementation"
        );
    }

    #[test]
    fn test_format_response_example() {
        assert_eq!(
            format_response("hello world. this is a test."),
            "1. Hello world.\n2. This is a test."
        );
    }

    #[test]
    fn test_split_sentences_edge_cases() {
        assert_eq!(split_sentences(""), vec![""]);
        assert_eq!(split_sentences("no punctuation here"), vec!["no punctuation here"]);
        assert_eq!(split_sentences("wait! really?  yes."), vec!["wait!", "really?", "yes."]);
        assert_eq!(split_sentences("end. "), vec!["end.", ""]);
        // punctuation without following whitespace does not split
        assert_eq!(split_sentences("v1.2 is out"), vec!["v1.2 is out"]);
    }

    #[test]
    fn test_format_response_single_sentence() {
        assert_eq!(
            format_response("day one could start early"),
            "1. Day one could start early"
        );
        assert_eq!(format_response(""), "1. ");
    }

    proptest! {
        #[test]
        fn prop_token_count_matches_whitespace_split(text in "[a-z \\t\\n]{0,60}") {
            let tokens = tokenize(&text);
            let expected = text.split_whitespace().count();  // ASCII-only input
            prop_assert_eq!(tokens.len(), expected);
            prop_assert!(tokens.iter().all(|t| !t.is_empty()));
        }

        #[test]
        fn prop_token_ids_strictly_increasing(count in 0usize..200) {
            let ids = token_ids(count);
            prop_assert_eq!(ids.len(), count);
            for (i, id) in ids.iter().enumerate() {
                prop_assert_eq!(*id, TOKEN_ID_BASE + TOKEN_ID_STRIDE * i as u64);
            }
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_keywords_bounded(text in "[a-zA-Z ]{0,80}") {
            let kws = keywords(&tokenize(&text));
            prop_assert!(kws.len() <= MAX_KEYWORDS);
            prop_assert!(kws.iter().all(|k| k.chars().count() > 3));
        }

        #[test]
        fn prop_formatted_lines_are_numbered(text in "[a-z .!?]{0,80}") {
            let formatted = format_response(&text);
            for (i, line) in formatted.split('\n').enumerate() {
                let prefix = format!("{}. ", i + 1);
                prop_assert!(line.starts_with(&prefix));
            }
        }
    }
}
