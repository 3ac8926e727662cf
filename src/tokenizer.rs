//! Maximal-munch scanner (§4.B) turning a format string into an ordered
//! [`FormatElement`] list.
//!
//! The element vocabulary is matched through a [`Trie`] built once and
//! shared for the lifetime of the process, the same "build once, share
//! immutably" shape the civil-time collaborator's own lookup tables use
//! (§5, §9).

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::casing::infer_casing_policy;
use crate::element::{ElementType, FormatElement};
use crate::error::AnalysisError;

/// Punctuation characters that stand for themselves when they don't begin
/// a longer recognized token.
const SIMPLE_LITERAL_CHARS: &[char] = &['-', '.', '/', ',', '\'', ';', ':'];

struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    value: Option<ElementType>,
}

impl TrieNode {
    fn empty() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

struct Trie {
    root: TrieNode,
}

impl Trie {
    fn insert(&mut self, key: &str, value: ElementType) {
        let mut node = &mut self.root;
        for byte in key.bytes() {
            node = node.children.entry(byte).or_insert_with(TrieNode::empty);
        }
        node.value = Some(value);
    }

    /// Longest-prefix lookup of `haystack` (already upper-cased) against the
    /// trie. Returns the matched length and element type, or `None` if not
    /// even the first byte matches.
    fn longest_match(&self, haystack: &[u8]) -> Option<(usize, ElementType)> {
        let mut node = &self.root;
        let mut best: Option<(usize, ElementType)> = None;
        for (i, byte) in haystack.iter().enumerate() {
            match node.children.get(byte) {
                Some(next) => {
                    node = next;
                    if let Some(value) = &node.value {
                        best = Some((i + 1, value.clone()));
                    }
                }
                None => break,
            }
        }
        best
    }
}

fn build_trie() -> Trie {
    let mut trie = Trie {
        root: TrieNode::empty(),
    };

    let entries: &[(&str, ElementType)] = &[
        ("YYYY", ElementType::Yyyy),
        ("YYY", ElementType::Yyy),
        ("YY", ElementType::Yy),
        ("Y", ElementType::Y),
        ("RRRR", ElementType::Rrrr),
        ("RR", ElementType::Rr),
        ("Y,YYY", ElementType::YCommaYyy),
        ("IYYY", ElementType::Iyyy),
        ("IYY", ElementType::Iyy),
        ("IY", ElementType::Iy),
        ("I", ElementType::I),
        ("SYYYY", ElementType::Syyyy),
        ("YEAR", ElementType::YearWord),
        ("SYEAR", ElementType::SyearWord),
        ("MM", ElementType::Mm),
        ("MON", ElementType::Mon),
        ("MONTH", ElementType::Month),
        ("RM", ElementType::Rm),
        ("DDD", ElementType::Ddd),
        ("DD", ElementType::Dd),
        ("D", ElementType::D),
        ("DAY", ElementType::Day),
        ("DY", ElementType::Dy),
        ("J", ElementType::J),
        ("HH24", ElementType::Hh24),
        ("HH12", ElementType::Hh12),
        ("HH", ElementType::Hh),
        ("MI", ElementType::Mi),
        ("SSSSS", ElementType::Sssss),
        ("SS", ElementType::Ss),
        ("FF1", ElementType::Ff(1)),
        ("FF2", ElementType::Ff(2)),
        ("FF3", ElementType::Ff(3)),
        ("FF4", ElementType::Ff(4)),
        ("FF5", ElementType::Ff(5)),
        ("FF6", ElementType::Ff(6)),
        ("FF7", ElementType::Ff(7)),
        ("FF8", ElementType::Ff(8)),
        ("FF9", ElementType::Ff(9)),
        ("AM", ElementType::Am),
        ("PM", ElementType::Pm),
        ("A.M.", ElementType::AmDotted),
        ("P.M.", ElementType::PmDotted),
        ("TZH", ElementType::Tzh),
        ("TZM", ElementType::Tzm),
        ("SCC", ElementType::Scc),
        ("CC", ElementType::Cc),
        ("Q", ElementType::Q),
        ("IW", ElementType::Iw),
        ("WW", ElementType::Ww),
        ("W", ElementType::W),
        ("AD", ElementType::Ad),
        ("BC", ElementType::Bc),
        ("A.D.", ElementType::AdDotted),
        ("B.C.", ElementType::BcDotted),
        ("SPTH", ElementType::Spth),
        ("THSP", ElementType::Thsp),
        ("SP", ElementType::Sp),
        ("TH", ElementType::Th),
        ("FM", ElementType::Fm),
    ];

    for (key, value) in entries {
        trie.insert(key, value.clone());
    }

    trie
}

static TRIE: OnceLock<Trie> = OnceLock::new();

fn trie() -> &'static Trie {
    TRIE.get_or_init(build_trie)
}

/// A byte-slice scanner over the format string, tracking how many bytes
/// have been consumed so elements can report their source offset.
struct Cursor<'a> {
    original: &'a str,
    remaining: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(original: &'a str) -> Self {
        Self {
            original,
            remaining: original.as_bytes(),
        }
    }

    fn offset(&self) -> usize {
        self.original.len() - self.remaining.len()
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    fn first_char(&self) -> Option<char> {
        self.remaining_str().chars().next()
    }

    fn remaining_str(&self) -> &'a str {
        std::str::from_utf8(self.remaining).expect("cursor stays on a UTF-8 boundary")
    }

    fn advance(&mut self, len: usize) {
        self.remaining = &self.remaining[len..];
    }
}

/// Tokenize a format string into an ordered list of [`FormatElement`]s
/// (§4.B). Returns an error at the first position that matches nothing in
/// the vocabulary and isn't a recognized literal form.
pub fn tokenize(format: &str) -> Result<Vec<FormatElement>, AnalysisError> {
    let mut cursor = Cursor::new(format);
    let mut elements = Vec::new();

    while !cursor.is_empty() {
        let offset = cursor.offset();
        let c = cursor.first_char().expect("non-empty cursor has a char");

        if c == '"' {
            let (literal, consumed) = scan_quoted_literal(&cursor)?;
            elements.push(FormatElement {
                element_type: ElementType::DoubleQuotedLiteral(literal),
                length_in_source: consumed,
                source_offset: offset,
                casing_policy: crate::element::CasingPolicy::PreserveCase,
            });
            cursor.advance(consumed);
            continue;
        }

        if c == ' ' {
            let run_len = cursor
                .remaining_str()
                .chars()
                .take_while(|&ch| ch == ' ')
                .count();
            elements.push(FormatElement {
                element_type: ElementType::Whitespace,
                length_in_source: run_len,
                source_offset: offset,
                casing_policy: crate::element::CasingPolicy::PreserveCase,
            });
            cursor.advance(run_len);
            continue;
        }

        let remaining = cursor.remaining_str();
        let upper: String = remaining.to_uppercase();
        if let Some((matched_len, element_type)) = trie().longest_match(upper.as_bytes()) {
            // The trie is built from ASCII-only keys, so byte length in the
            // upper-cased scratch buffer equals byte length in the original
            // (ASCII case folding never changes byte length).
            let original_span = &remaining[..matched_len];
            let casing_policy = infer_casing_policy(original_span, &element_type);
            elements.push(FormatElement {
                element_type,
                length_in_source: matched_len,
                source_offset: offset,
                casing_policy,
            });
            cursor.advance(matched_len);
            continue;
        }

        if SIMPLE_LITERAL_CHARS.contains(&c) {
            let len = c.len_utf8();
            elements.push(FormatElement {
                element_type: ElementType::SimpleLiteral(c),
                length_in_source: len,
                source_offset: offset,
                casing_policy: crate::element::CasingPolicy::PreserveCase,
            });
            cursor.advance(len);
            continue;
        }

        return Err(AnalysisError::NoMatchingElement { offset });
    }

    Ok(elements)
}

fn scan_quoted_literal(cursor: &Cursor<'_>) -> Result<(String, usize), AnalysisError> {
    let start_offset = cursor.offset();
    let text = cursor.remaining_str();
    let mut chars = text.char_indices();
    let (_, opening) = chars.next().expect("caller checked for opening quote");
    debug_assert_eq!(opening, '"');

    let mut literal = String::new();
    let mut escaped = false;

    for (idx, ch) in chars {
        if escaped {
            match ch {
                '\\' => literal.push('\\'),
                '"' => literal.push('"'),
                other => {
                    return Err(AnalysisError::UnsupportedEscapeSequence {
                        offset: start_offset + idx - 1,
                        character: other,
                    });
                }
            }
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return Ok((literal, idx + ch.len_utf8()));
        } else {
            literal.push(ch);
        }
    }

    Err(AnalysisError::UnterminatedQuotedLiteral {
        offset: start_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(format: &str) -> Vec<ElementType> {
        tokenize(format)
            .unwrap()
            .into_iter()
            .map(|e| e.element_type)
            .collect()
    }

    #[test]
    fn maximal_munch_year_family() {
        assert_eq!(types("YYYY"), vec![ElementType::Yyyy]);
        assert_eq!(types("YYY"), vec![ElementType::Yyy]);
        assert_eq!(types("YY"), vec![ElementType::Yy]);
        assert_eq!(types("Y"), vec![ElementType::Y]);
        assert_eq!(types("RRRR"), vec![ElementType::Rrrr]);
        assert_eq!(types("RR"), vec![ElementType::Rr]);
    }

    #[test]
    fn y_comma_yyy_is_one_element() {
        let elements = tokenize("Y,YYY").unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].element_type, ElementType::YCommaYyy);
        assert_eq!(elements[0].length_in_source, 5);
    }

    #[test]
    fn meridian_dotted_forms_are_distinct_from_plain() {
        assert_eq!(types("A.M."), vec![ElementType::AmDotted]);
        assert_eq!(types("AM"), vec![ElementType::Am]);
    }

    #[test]
    fn total_coverage_sums_to_source_length() {
        let format = "YYYY-MM-DD\"T\"HH24:MI:SS.FF3";
        let elements = tokenize(format).unwrap();
        let total: usize = elements.iter().map(|e| e.length_in_source).sum();
        assert_eq!(total, format.len());
    }

    #[test]
    fn case_insensitive_matching_same_types_regardless_of_case() {
        assert_eq!(types("yyyy-mm-dd"), types("YYYY-MM-DD"));
    }

    #[test]
    fn whitespace_run_is_single_element() {
        let elements = tokenize("YYYY   MM").unwrap();
        assert_eq!(elements[1].element_type, ElementType::Whitespace);
        assert_eq!(elements[1].length_in_source, 3);
    }

    #[test]
    fn quoted_literal_unescapes() {
        let elements = tokenize("\"a\\\"b\\\\c\"").unwrap();
        assert_eq!(
            elements[0].element_type,
            ElementType::DoubleQuotedLiteral("a\"b\\c".to_string())
        );
    }

    #[test]
    fn unsupported_escape_sequence_errors() {
        let err = tokenize("\"a\\nb\"").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnsupportedEscapeSequence { character: 'n', .. }
        ));
    }

    #[test]
    fn unterminated_quoted_literal_errors() {
        let err = tokenize("\"abc").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::UnterminatedQuotedLiteral { offset: 0 }
        ));
    }

    #[test]
    fn simple_literal_punctuation_passes_through() {
        assert_eq!(
            types("YYYY-MM-DD"),
            vec![
                ElementType::Yyyy,
                ElementType::SimpleLiteral('-'),
                ElementType::Mm,
                ElementType::SimpleLiteral('-'),
                ElementType::Dd,
            ]
        );
    }

    #[test]
    fn unrecognized_character_errors_with_offset() {
        let err = tokenize("YYYY@MM").unwrap_err();
        assert_eq!(err, AnalysisError::NoMatchingElement { offset: 4 });
    }
}
