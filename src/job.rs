use crate::parser::Parser;
use crate::tokenizer::{Lexer, Token};
use crate::value::Value;

/// One recorded parse error, 0-based positions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// A single lex+parse session over one document.
///
/// Defects in the input never panic; every one is recorded as a
/// [`Diagnostic`], rendered to stderr and flips the session's success flag,
/// which stays down for the rest of the job.
pub struct Job<'a> {
    input: &'a str,
    line_digits: usize,
    tokens: Vec<Token>,
    success: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Job<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut line_count = input.matches('\n').count();
        if !input.ends_with('\n') {
            line_count += 1;
        }
        let line_digits = line_count.to_string().len();

        Self { input, line_digits, tokens: Vec::new(), success: true, diagnostics: Vec::new() }
    }

    /// Run the session. Any reported defect yields `Value::Null`.
    pub fn fire(&mut self) -> Value {
        Lexer::new(self).analyze();
        if !self.success {
            return Value::Null;
        }

        let value = Parser::new(self).parse();
        if !self.success {
            return Value::Null;
        }

        value
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn push_token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub(crate) fn take_tokens(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.tokens)
    }

    /// Record a defect at the token's position and render a three-line
    /// diagnostic to stderr: message header, offending source line, caret.
    pub fn report(&mut self, token: &Token, message: &str) {
        self.success = false;
        self.diagnostics.push(Diagnostic {
            line: token.line,
            column: token.column,
            message: message.to_string(),
        });

        eprintln!(
            "\x1b[;1mJSON:{}:{}: \x1b[31;1merror: \x1b[0m{}",
            token.line + 1,
            token.column + 1,
            message
        );

        let line = self
            .input
            .split('\n')
            .nth(token.line)
            .unwrap_or("")
            .trim_end_matches('\r');

        // Expand leading tab indentation to 4 spaces, shifting the column
        // to match.
        let tabs = line.chars().take_while(|&ch| ch == '\t').count();
        let mut chars: Vec<char> = Vec::new();
        chars.extend(std::iter::repeat(' ').take(tabs * 4));
        chars.extend(line.chars().skip(tabs));
        let column = (token.column + tabs * 3).min(chars.len());

        let before: String = chars[..column].iter().collect();
        let after: String = chars[column..].iter().collect();
        eprintln!(
            " {:>width$} | {}\x1b[31;1m{}\x1b[0m",
            token.line + 1,
            before,
            after,
            width = self.line_digits
        );

        eprintln!(
            " {} | \x1b[31;1m{}^{}\x1b[0m",
            " ".repeat(self.line_digits),
            " ".repeat(column),
            "~".repeat(chars.len().saturating_sub(column))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_flag_is_one_way() {
        let mut job = Job::new("[1, 2,]");
        let value = job.fire();
        assert!(!job.success());
        assert_eq!(value, Value::Null);
        assert!(!job.diagnostics().is_empty());
    }

    #[test]
    fn clean_parse_keeps_success() {
        let mut job = Job::new("{\"a\": [1, 2]}");
        let value = job.fire();
        assert!(job.success());
        assert!(value.is_object());
        assert!(job.diagnostics().is_empty());
    }

    #[test]
    fn diagnostic_position_is_recorded() {
        let mut job = Job::new("[1, x]");
        job.fire();
        let diagnostic = &job.diagnostics()[0];
        assert_eq!(diagnostic.line, 0);
        assert_eq!(diagnostic.column, 4);
    }
}
