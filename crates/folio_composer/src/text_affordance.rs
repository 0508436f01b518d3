//! List authoring helpers for multi-line text fields.
//!
//! [`TextAffordance::apply`] is a pure function of the field contents, the
//! selection and the key pressed. It returns `None` when the key should fall
//! through to the host field unchanged.
//!
//! Caret positions are character offsets, not byte offsets.

use crate::TextConfig;

/// Keys the affordances intercept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Key {
    /// Tab
    #[display("tab")]
    Tab,
    /// Enter / Return
    #[display("enter")]
    Enter,
}

/// Replacement field contents and caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// New field contents
    pub text: String,
    /// Collapsed caret position, in characters
    pub caret: usize,
}

/// Dash-to-bullet conversion, indentation and list continuation.
///
/// # Example
///
/// ```
/// use folio_composer::{Key, TextAffordance};
///
/// let affordance = TextAffordance::default();
/// let edit = affordance.apply("- ", 2, 2, Key::Tab).unwrap();
/// assert_eq!(edit.text, "• ");
/// assert_eq!(edit.caret, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAffordance {
    marker: String,
    indent: String,
}

impl Default for TextAffordance {
    fn default() -> Self {
        Self::new(&TextConfig::default())
    }
}

impl TextAffordance {
    /// Build from the configured bullet and indent.
    pub fn new(config: &TextConfig) -> Self {
        Self {
            marker: format!("{} ", config.bullet),
            indent: config.indent.clone(),
        }
    }

    /// Bullet marker including its trailing space.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Apply `key` to `text` with the selection `caret_start..caret_end`.
    pub fn apply(
        &self,
        text: &str,
        caret_start: usize,
        caret_end: usize,
        key: Key,
    ) -> Option<TextEdit> {
        let (start, end) = if caret_start <= caret_end {
            (caret_start, caret_end)
        } else {
            (caret_end, caret_start)
        };
        let start = byte_index(text, start);
        let end = byte_index(text, end);

        match key {
            Key::Tab => Some(self.tab(text, start, end)),
            Key::Enter => self.enter(text, start, end),
        }
    }

    fn tab(&self, text: &str, start: usize, end: usize) -> TextEdit {
        let line_start = line_start(text, start);
        let before_caret = &text[line_start..start];

        if before_caret == "-" || before_caret == "- " {
            return splice(text, line_start, start, &self.marker);
        }
        splice(text, start, end, &self.indent)
    }

    fn enter(&self, text: &str, start: usize, end: usize) -> Option<TextEdit> {
        let line_start = line_start(text, start);
        let line_end = text[start..]
            .find('\n')
            .map_or(text.len(), |offset| start + offset);
        let line = &text[line_start..line_end];

        let leading = line.len() - line.trim_start_matches([' ', '\t']).len();
        let marker_end = leading + self.marker.len();
        if !line[leading..].starts_with(&self.marker) || start - line_start < marker_end {
            return None;
        }

        if line[marker_end..].trim().is_empty() {
            return Some(splice(text, line_start, line_end, ""));
        }

        let continuation = format!("\n{}{}", &line[..leading], self.marker);
        Some(splice(text, start, end, &continuation))
    }
}

fn line_start(text: &str, at: usize) -> usize {
    text[..at].rfind('\n').map_or(0, |idx| idx + 1)
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx)
}

fn splice(text: &str, from: usize, to: usize, insert: &str) -> TextEdit {
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..from]);
    out.push_str(insert);
    let caret = out.chars().count();
    out.push_str(&text[to..]);
    TextEdit { text: out, caret }
}
