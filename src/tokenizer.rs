use crate::job::Job;
use crate::scanner::Scanner;

/// Lexical class of one JSON token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenType {
    /// Placeholder for a character the lexer could not classify.
    #[default]
    None,
    BraceOpen,
    BraceClose,
    BracketOpen,
    BracketClose,
    Colon,
    Comma,
    String,
    Number,
    Literal,
}

/// One token with its 0-based source position. String symbols exclude the
/// surrounding quotes but keep backslash escapes verbatim; number and
/// literal symbols are raw character runs, validated by the parser.
#[derive(Debug, Clone, Default)]
pub struct Token {
    pub token_type: TokenType,
    pub line: usize,
    pub column: usize,
    pub symbol: String,
}

impl Token {
    fn new(token_type: TokenType, line: usize, column: usize, symbol: &str) -> Self {
        Self { token_type, line, column, symbol: symbol.to_string() }
    }
}

/// Lexical analyzer. Fills the job's token buffer; on the first
/// unrecoverable input defect it reports through the job and halts.
pub struct Lexer<'a, 'j> {
    job: &'j mut Job<'a>,
    scanner: Scanner<'a>,
    line: usize,
    column: usize,
}

impl<'a, 'j> Lexer<'a, 'j> {
    pub fn new(job: &'j mut Job<'a>) -> Self {
        let scanner = Scanner::new(job.input());
        Self { job, scanner, line: 0, column: 0 }
    }

    pub fn analyze(&mut self) {
        while let Some(character) = self.scanner.current() {
            match character {
                '{' => self.consume_single(TokenType::BraceOpen, "{"),
                '}' => self.consume_single(TokenType::BraceClose, "}"),
                '[' => self.consume_single(TokenType::BracketOpen, "["),
                ']' => self.consume_single(TokenType::BracketClose, "]"),
                ':' => self.consume_single(TokenType::Colon, ":"),
                ',' => self.consume_single(TokenType::Comma, ","),
                '"' => {
                    if !self.consume_string() {
                        return;
                    }
                }
                '-' | '0'..='9' => self.consume_run(TokenType::Number),
                'a'..='z' => self.consume_run(TokenType::Literal),
                ' ' | '\t' => {
                    self.scanner.ignore(1);
                    self.column += 1;
                }
                '\r' => {
                    self.scanner.ignore(1);
                    // CRLF counts as a single newline; the '\n' half does
                    // the line bookkeeping.
                    if self.scanner.current() != Some('\n') {
                        self.line += 1;
                        self.column = 0;
                    }
                }
                '\n' => {
                    self.scanner.ignore(1);
                    self.line += 1;
                    self.column = 0;
                }
                _ => {
                    let token =
                        Token::new(TokenType::None, self.line, self.column, &character.to_string());
                    self.job.push_token(token.clone());
                    self.job.report(&token, &format!("unexpected character '{character}'"));
                    return;
                }
            }
        }
    }

    fn consume_single(&mut self, token_type: TokenType, symbol: &str) {
        self.job.push_token(Token::new(token_type, self.line, self.column, symbol));
        self.scanner.ignore(1);
        self.column += 1;
    }

    /// A string token runs to the next unescaped quote. A newline or EOF
    /// before that still records the partial token so the diagnostic can
    /// point at the opening quote.
    fn consume_string(&mut self) -> bool {
        let column = self.column;
        let mut symbol = String::new();

        self.scanner.ignore(1);
        self.column += 1;

        let mut escape = false;
        let terminator = loop {
            let character = match self.scanner.current() {
                Some(character) => character,
                None => break None,
            };

            if !escape && character == '\\' {
                symbol.push('\\');
                self.scanner.ignore(1);
                self.column += 1;
                escape = true;
                continue;
            }

            if !escape && (character == '"' || character == '\r' || character == '\n') {
                break Some(character);
            }

            symbol.push(character);
            self.scanner.ignore(1);
            self.column += 1;
            escape = false;
        };

        let token = Token::new(TokenType::String, self.line, column, &symbol);
        self.job.push_token(token.clone());

        if terminator != Some('"') {
            self.job.report(&token, "strings should be wrapped in double quotes");
            return false;
        }

        self.scanner.ignore(1);
        self.column += 1;

        true
    }

    /// Number and literal runs share one consumer; they stop at the next
    /// structural character, whitespace or EOF and are validated later.
    fn consume_run(&mut self, token_type: TokenType) {
        let begin = self.scanner.tell();
        let column = self.column;

        while let Some(character) = self.scanner.current() {
            if matches!(
                character,
                '{' | '}' | '[' | ']' | ':' | ',' | '"' | ' ' | '\t' | '\r' | '\n'
            ) {
                break;
            }
            self.scanner.ignore(1);
            self.column += 1;
        }

        let symbol = self.scanner.substring(begin, self.scanner.tell());
        self.job.push_token(Token::new(token_type, self.line, column, symbol));
    }
}
