use super::fallback::FontFallbackChain;
use super::traits::{same_resolution, Font, FontRef};

/// A maximal stretch of text whose characters all resolve to the same face.
///
/// `font` is `None` for characters no face in the chain can render. Runs
/// borrow from the input and are rebuilt on every call.
#[derive(Clone)]
pub struct FontRun<'a> {
    /// Byte offset of the run in the input text.
    pub start: usize,
    pub text: &'a str,
    pub font: Option<FontRef>,
}

impl FontRun<'_> {
    pub fn is_resolved(&self) -> bool {
        self.font.is_some()
    }

    /// Length in Unicode scalar values.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

impl std::fmt::Debug for FontRun<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRun")
            .field("start", &self.start)
            .field("text", &self.text)
            .field("font", &self.font.as_ref().map(|font| font.full_name()))
            .finish()
    }
}

/// Iterator that groups consecutive characters into font runs.
///
/// A new run starts whenever a character resolves to a different face (or to
/// no face) than the character before it. Resolution is per character, so a
/// boundary character always lands in the run of its own face.
pub struct FontRunIterator<'a> {
    chain: &'a FontFallbackChain,
    text: &'a str,
    pos: usize,
}

impl<'a> FontRunIterator<'a> {
    pub fn new(chain: &'a FontFallbackChain, text: &'a str) -> Self {
        Self {
            chain,
            text,
            pos: 0,
        }
    }
}

impl<'a> Iterator for FontRunIterator<'a> {
    type Item = FontRun<'a>;

    fn next(&mut self) -> Option<FontRun<'a>> {
        if self.chain.is_empty() || self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let rest = &self.text[start..];
        let mut chars = rest.char_indices();

        let (_, first) = chars.next()?;
        let font = self.chain.font_for_character(first as u32);
        let mut end = rest.len();

        for (offset, ch) in chars {
            let next_font = self.chain.font_for_character(ch as u32);
            if !same_resolution(font.as_ref(), next_font.as_ref()) {
                end = offset;
                break;
            }
        }

        self.pos = start + end;
        Some(FontRun {
            start,
            text: &rest[..end],
            font,
        })
    }
}

impl std::iter::FusedIterator for FontRunIterator<'_> {}
