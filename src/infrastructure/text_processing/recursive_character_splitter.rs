use std::collections::VecDeque;
use std::ops::Range;

use crate::application::ports::TextSplitterError;

/// Separators tried from coarse to fine. The empty separator splits per character.
pub const DEFAULT_SEPARATORS: &[&str] = &["\n### ", "\n## ", "\n\n", "\n", ". ", " ", ""];

/// A slice of the input text and its byte offset inside that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub offset: usize,
}

impl Fragment {
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Length-bounded recursive splitter.
///
/// Each level splits on the first separator present in the text, keeping the
/// separator at the start of the following piece. Pieces longer than
/// `chunk_size` characters go down to the next separator; consecutive short
/// pieces are packed greedily, and every packed fragment after the first
/// starts with trailing pieces of its predecessor worth at most
/// `chunk_overlap` characters.
///
/// Fragments are exact substrings of the input. Nothing is trimmed, so the
/// input can be rebuilt from the fragments and their offsets.
#[derive(Debug, Clone)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, TextSplitterError> {
        Self::with_separators(chunk_size, chunk_overlap, DEFAULT_SEPARATORS)
    }

    pub fn with_separators<S: AsRef<str>>(
        chunk_size: usize,
        chunk_overlap: usize,
        separators: &[S],
    ) -> Result<Self, TextSplitterError> {
        if chunk_size == 0 {
            return Err(TextSplitterError::InvalidConfiguration(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(TextSplitterError::InvalidConfiguration(format!(
                "chunk overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
            separators: separators.iter().map(|s| s.as_ref().to_string()).collect(),
        })
    }

    pub fn split(&self, text: &str) -> Vec<Fragment> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut spans = Vec::new();
        self.split_span(text, 0..text.len(), &self.separators, &mut spans);

        spans
            .into_iter()
            .map(|span| Fragment {
                text: text[span.clone()].to_string(),
                offset: span.start,
            })
            .collect()
    }

    fn split_span(
        &self,
        text: &str,
        span: Range<usize>,
        separators: &[String],
        out: &mut Vec<Range<usize>>,
    ) {
        let (separator, finer) = pick_separator(&text[span.clone()], separators);
        let mut short_pieces: Vec<(Range<usize>, usize)> = Vec::new();

        for piece in split_keeping_separator(text, span, separator) {
            let len = char_len(text, &piece);
            if len <= self.chunk_size {
                short_pieces.push((piece, len));
                continue;
            }

            if !short_pieces.is_empty() {
                self.pack(&short_pieces, out);
                short_pieces.clear();
            }

            if finer.is_empty() {
                out.push(piece);
            } else {
                self.split_span(text, piece, finer, out);
            }
        }

        if !short_pieces.is_empty() {
            self.pack(&short_pieces, out);
        }
    }

    fn pack(&self, pieces: &[(Range<usize>, usize)], out: &mut Vec<Range<usize>>) {
        let mut window: VecDeque<(Range<usize>, usize)> = VecDeque::new();
        let mut total = 0;

        for (piece, len) in pieces {
            if total + len > self.chunk_size && !window.is_empty() {
                out.push(window_span(&window));

                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    let Some((_, dropped)) = window.pop_front() else {
                        break;
                    };
                    total -= dropped;
                }
            }

            window.push_back((piece.clone(), *len));
            total += len;
        }

        if !window.is_empty() {
            out.push(window_span(&window));
        }
    }
}

fn pick_separator<'s>(text: &str, separators: &'s [String]) -> (&'s str, &'s [String]) {
    for (i, separator) in separators.iter().enumerate() {
        if separator.is_empty() || text.contains(separator.as_str()) {
            return (separator.as_str(), &separators[i + 1..]);
        }
    }

    match separators.last() {
        Some(last) => (last.as_str(), &[]),
        None => ("", &[]),
    }
}

fn split_keeping_separator(text: &str, span: Range<usize>, separator: &str) -> Vec<Range<usize>> {
    let base = span.start;
    let slice = &text[span];

    if separator.is_empty() {
        return slice
            .char_indices()
            .map(|(i, c)| base + i..base + i + c.len_utf8())
            .collect();
    }

    let mut bounds = vec![0];
    bounds.extend(slice.match_indices(separator).map(|(i, _)| i).filter(|&i| i > 0));
    bounds.push(slice.len());

    bounds
        .windows(2)
        .filter(|w| w[0] < w[1])
        .map(|w| base + w[0]..base + w[1])
        .collect()
}

fn window_span(window: &VecDeque<(Range<usize>, usize)>) -> Range<usize> {
    match (window.front(), window.back()) {
        (Some((first, _)), Some((last, _))) => first.start..last.end,
        _ => 0..0,
    }
}

fn char_len(text: &str, span: &Range<usize>) -> usize {
    text[span.clone()].chars().count()
}
