//! HTML tag counter
//!
//! Counts every start tag and every end tag in a page by name, in the order the
//! names are first seen. The page is only tokenized: no tree is built, nothing
//! is validated, and broken markup is tolerated the way browsers tolerate it.

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
    TokenizerResult,
};
use std::collections::HashMap;
use std::fmt;

/// Tag occurrence counts for one page
///
/// Iteration follows first-seen order. Every count is at least one; tags that
/// never appeared are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCounts {
    entries: Vec<(String, u64)>,
}

impl TagCounts {
    /// Count for a tag, or `None` if it never appeared
    pub fn get(&self, tag: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, count)| *count)
    }

    /// Number of distinct tag names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the page had no tags at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterates `(tag, count)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    /// Converts into a map, dropping the ordering
    pub fn to_map(&self) -> HashMap<String, u64> {
        self.entries.iter().cloned().collect()
    }

    /// Renders one `<tag> - <count>` line per tag
    ///
    /// This is the text that is stored and shown to the user.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TagCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in &self.entries {
            writeln!(f, "{} - {}", name, count)?;
        }
        Ok(())
    }
}

/// Token sink that tallies tag names as the tokenizer emits them
#[derive(Default)]
struct TagTally {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl TagTally {
    fn record(&mut self, name: &str) {
        match self.index.get(name) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), 1));
            }
        }
    }
}

impl TokenSink for TagTally {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(tag) = token {
            self.record(&tag.name);
            if tag.kind == TagKind::StartTag && !tag.self_closing {
                if let Some(kind) = raw_text_kind(&tag) {
                    return TokenSinkResult::RawData(kind);
                }
            }
        }
        TokenSinkResult::Continue
    }
}

/// Elements whose content is text, not markup
///
/// Without a tree builder the tokenizer has to be told to switch state, or a
/// `<` inside a script would be read as a tag.
fn raw_text_kind(tag: &Tag) -> Option<RawKind> {
    match &*tag.name {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(RawKind::Rawtext),
        "title" | "textarea" => Some(RawKind::Rcdata),
        _ => None,
    }
}

/// Counts start and end tags in an HTML page
///
/// Bytes are decoded as UTF-8 with invalid sequences replaced, so this never
/// fails. Tag names are lowercased by the tokenizer and attributes are
/// ignored. `<p>..</p>` counts `p` twice; a self-closing `<br/>` counts once.
///
/// # Example
///
/// ```
/// use tagcounter::pipeline::count_tags;
///
/// let counts = count_tags(b"<html><head><title>Test</title></head>");
/// assert_eq!(counts.get("html"), Some(1));
/// assert_eq!(counts.get("head"), Some(2));
/// assert_eq!(counts.get("title"), Some(2));
/// ```
pub fn count_tags(html: &[u8]) -> TagCounts {
    let text = String::from_utf8_lossy(html);

    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from_slice(&text));

    let mut tokenizer = Tokenizer::new(TagTally::default(), TokenizerOpts::default());
    // The sink never yields a script handle, so feeding always runs to the end
    // of the input
    if let TokenizerResult::Script(()) = tokenizer.feed(&mut input) {
        tracing::debug!("Tokenizer paused on a script handle");
    }
    tokenizer.end();

    TagCounts {
        entries: tokenizer.sink.entries,
    }
}
