/// Shared cursor primitive for the format-specifier parser and the JSON
/// lexer: a read-only view over a pre-decoded char buffer with peek,
/// consume, retreat and substring-by-span operations.
///
/// Input is decoded to chars up front so that multi-byte text can flow
/// through literals untouched while the grammar itself stays a simple
/// char-at-a-time dispatch.
pub struct Scanner<'a> {
    input: &'a str,
    chars: Vec<char>,
    byte_indices: Vec<usize>,
    index: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut chars: Vec<char> = Vec::new();
        let mut byte_indices: Vec<usize> = Vec::new();
        for (idx, ch) in input.char_indices() {
            byte_indices.push(idx);
            chars.push(ch);
        }
        byte_indices.push(input.len());

        Self { input, chars, byte_indices, index: 0 }
    }

    /// Current position, in chars.
    pub fn tell(&self) -> usize {
        self.index
    }

    pub fn is_eof(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// Look ahead without consuming; out-of-range reads yield None.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    pub fn current(&self) -> Option<char> {
        self.peek(0)
    }

    pub fn ignore(&mut self, count: usize) {
        self.index = (self.index + count).min(self.chars.len());
    }

    pub fn retreat(&mut self, count: usize) {
        self.index = self.index.saturating_sub(count);
    }

    pub fn consume(&mut self) -> Option<char> {
        let ch = self.current();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    /// Consume the next char only if it matches.
    pub fn consume_specific(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.index += 1;
            return true;
        }
        false
    }

    /// The source text between two char positions.
    pub fn substring(&self, start: usize, end: usize) -> &'a str {
        &self.input[self.byte_indices[start]..self.byte_indices[end]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_operations() {
        let mut scanner = Scanner::new("ab{}");
        assert_eq!(scanner.peek(0), Some('a'));
        assert_eq!(scanner.peek(1), Some('b'));
        assert_eq!(scanner.consume(), Some('a'));
        assert!(scanner.consume_specific('b'));
        assert!(!scanner.consume_specific('x'));
        assert_eq!(scanner.tell(), 2);
        scanner.ignore(2);
        assert!(scanner.is_eof());
        assert_eq!(scanner.consume(), None);
        scanner.retreat(1);
        assert_eq!(scanner.current(), Some('}'));
    }

    #[test]
    fn substring_spans_multibyte_text() {
        let scanner = Scanner::new("aé{}");
        assert_eq!(scanner.substring(0, 2), "aé");
        assert_eq!(scanner.substring(2, 4), "{}");
    }
}
