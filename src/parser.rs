use std::collections::{BTreeMap, HashSet};

use crate::job::Job;
use crate::tokenizer::{Token, TokenType};
use crate::value::Value;

/// Recursive-descent parser over a job's token buffer.
///
/// Every defect is reported through the job; inside a container the parser
/// resynchronizes to the matching closer and returns the partial value, so
/// one document yields as many diagnostics as possible.
pub struct Parser<'a, 'j> {
    job: &'j mut Job<'a>,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a, 'j> Parser<'a, 'j> {
    pub fn new(job: &'j mut Job<'a>) -> Self {
        let tokens = job.take_tokens();
        Self { job, tokens, index: 0 }
    }

    pub fn parse(&mut self) -> Value {
        if self.tokens.is_empty() {
            self.job.report(&Token::default(), "expecting token, not 'EOF'");
            return Value::Null;
        }

        let token = self.tokens[self.index].clone();
        let result = match token.token_type {
            TokenType::Literal => self.consume_literal(),
            TokenType::Number => self.consume_number(),
            TokenType::String => self.consume_string(),
            TokenType::BracketOpen => self.consume_array(),
            TokenType::BraceOpen => self.consume_object(),
            TokenType::BracketClose => {
                self.job.report(&token, "expecting value, not ']'");
                self.index += 1;
                Value::Null
            }
            TokenType::BraceClose => {
                self.job.report(&token, "expecting string, not '}'");
                self.index += 1;
                Value::Null
            }
            _ => {
                self.job.report(&token, "multiple root elements");
                self.index += 1;
                Value::Null
            }
        };

        if !self.is_eof() {
            let token = self.tokens[self.index].clone();
            self.job.report(&token, "multiple root elements");
        }

        result
    }

    fn is_eof(&self) -> bool {
        self.index >= self.tokens.len()
    }

    fn consume(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        self.index += 1;
        token
    }

    fn ignore_until(&mut self, token_type: TokenType) {
        while !self.is_eof() && self.tokens[self.index].token_type != token_type {
            self.index += 1;
        }
    }

    // Report, then skip to just past the closing bracket of the current
    // container.
    fn recover_array(&mut self, token: &Token, message: &str) {
        self.job.report(token, message);
        self.ignore_until(TokenType::BracketClose);
        self.index += 1;
    }

    fn recover_object(&mut self, token: &Token, message: &str) {
        self.job.report(token, message);
        self.ignore_until(TokenType::BraceClose);
        self.index += 1;
    }

    fn consume_literal(&mut self) -> Value {
        let token = self.consume();

        match token.symbol.as_str() {
            "null" => Value::Null,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => {
                self.job.report(&token, "invalid literal");
                Value::Null
            }
        }
    }

    /// Revalidate the raw run against `[ minus ] int [ frac ] [ exp ]`
    /// before handing it to the float parser.
    fn consume_number(&mut self) -> Value {
        let token = self.consume();
        let bytes = token.symbol.as_bytes();
        let length = bytes.len();

        let minus_prefix = usize::from(bytes[0] == b'-');
        if bytes.get(minus_prefix) == Some(&b'0')
            && matches!(bytes.get(minus_prefix + 1), Some(b'0'..=b'9'))
        {
            self.job.report(&token, "invalid leading zero");
            return Value::Null;
        }

        enum State {
            Int,
            Fraction,
            Exponent,
        }

        let mut state = State::Int;
        let mut fraction_position: Option<usize> = None;
        let mut exponent_position: Option<usize> = None;

        for (i, &character) in bytes.iter().enumerate() {
            if character == b'.' && matches!(state, State::Int) {
                state = State::Fraction;
                fraction_position = Some(i);
                continue;
            }
            if (character == b'e' || character == b'E') && !matches!(state, State::Exponent) {
                state = State::Exponent;
                exponent_position = Some(i);
                continue;
            }

            match state {
                State::Int => {
                    if character == b'-' {
                        if i == length - 1 {
                            self.job.report(&token, "expected number after minus");
                            return Value::Null;
                        }
                        if i != 0 {
                            self.job.report(&token, "invalid minus");
                            return Value::Null;
                        }
                    } else if !character.is_ascii_digit() {
                        self.job.report(
                            &token,
                            &std::format!("invalid number, unexpected '{}'", character as char),
                        );
                        return Value::Null;
                    }
                }
                State::Fraction => {
                    if !character.is_ascii_digit() {
                        self.job.report(
                            &token,
                            &std::format!("invalid number, unexpected '{}'", character as char),
                        );
                        return Value::Null;
                    }
                }
                State::Exponent => {
                    if character == b'-' || character == b'+' {
                        if i == length - 1 {
                            self.job.report(&token, "expected number after plus/minus");
                            return Value::Null;
                        }
                        if exponent_position.map_or(false, |position| i > position + 1) {
                            self.job.report(&token, "invalid plus/minus");
                            return Value::Null;
                        }
                    } else if !character.is_ascii_digit() {
                        self.job.report(
                            &token,
                            &std::format!("invalid number, unexpected '{}'", character as char),
                        );
                        return Value::Null;
                    }
                }
            }
        }

        if fraction_position.is_some() || exponent_position.is_some() {
            if let (Some(fraction), Some(exponent)) = (fraction_position, exponent_position) {
                // A '.' directly followed by 'e' has an empty fraction.
                if fraction + 1 == exponent {
                    self.job.report(&token, "invalid exponent sign, expected number");
                    return Value::Null;
                }
            }
            if fraction_position == Some(length - 1) || exponent_position == Some(length - 1) {
                self.job.report(&token, "invalid number");
                return Value::Null;
            }
        }

        match token.symbol.parse::<f64>() {
            Ok(number) => Value::Number(number),
            Err(_) => {
                self.job.report(&token, "invalid number");
                Value::Null
            }
        }
    }

    /// Revalidate escapes. Recognized escapes stay in escaped form so the
    /// stored string serializes back to the original text; anything else
    /// behind a backslash is a defect.
    fn consume_string(&mut self) -> Value {
        let token = self.consume();

        let mut string = String::new();
        let mut escape = false;
        for character in token.symbol.chars() {
            if !escape {
                if character == '\\' {
                    escape = true;
                    continue;
                }
                if character == '"' || (character as u32) <= 31 {
                    self.job.report(&token, "invalid string, unescaped character found");
                    return Value::Null;
                }
                string.push(character);
                continue;
            }

            match character {
                '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' => {
                    string.push('\\');
                    string.push(character);
                }
                _ => {
                    self.job
                        .report(&token, &std::format!("invalid string, unknown escape '\\{character}'"));
                    return Value::Null;
                }
            }
            escape = false;
        }

        Value::String(string)
    }

    fn consume_array(&mut self) -> Value {
        self.index += 1;

        let mut array: Vec<Value> = Vec::new();
        loop {
            if self.is_eof() {
                let previous = self.tokens[self.index - 1].clone();
                self.recover_array(&previous, "expecting closing ']' at end");
                break;
            }

            let token = self.tokens[self.index].clone();
            match token.token_type {
                TokenType::Literal => array.push(self.consume_literal()),
                TokenType::Number => array.push(self.consume_number()),
                TokenType::String => array.push(self.consume_string()),
                TokenType::BracketOpen => array.push(self.consume_array()),
                TokenType::BraceOpen => array.push(self.consume_object()),
                TokenType::BracketClose => {
                    // A closer after a comma is a trailing comma; a closer
                    // as the first token is an empty array, handled below.
                    if !array.is_empty() {
                        let previous = self.tokens[self.index - 1].clone();
                        self.recover_array(&previous, "invalid comma, expecting ']'");
                        break;
                    }
                }
                _ => {
                    self.recover_array(
                        &token,
                        &std::format!("expecting value or ']', not '{}'", token.symbol),
                    );
                    break;
                }
            }

            if self.is_eof() {
                self.recover_array(&token, "expecting closing ']' at end");
                break;
            }

            let token = self.consume();
            match token.token_type {
                TokenType::Comma => continue,
                TokenType::BracketClose => break,
                _ => {
                    self.recover_array(
                        &token,
                        &std::format!("expecting comma or ']', not '{}'", token.symbol),
                    );
                    break;
                }
            }
        }

        Value::Array(array)
    }

    fn consume_object(&mut self) -> Value {
        self.index += 1;

        let mut object: BTreeMap<String, Value> = BTreeMap::new();
        let mut unique: HashSet<String> = HashSet::new();
        loop {
            if self.is_eof() {
                let previous = self.tokens[self.index - 1].clone();
                self.recover_object(&previous, "expecting closing '}' at end");
                break;
            }

            let token = self.consume();
            if token.token_type == TokenType::BraceClose {
                if !object.is_empty() {
                    self.recover_object(&token, "invalid comma, expecting '}'");
                }
                break;
            }
            if token.token_type != TokenType::String {
                self.recover_object(
                    &token,
                    &std::format!("expecting string or '}}', not '{}'", token.symbol),
                );
                break;
            }

            // Re-run the member name through string validation.
            self.index -= 1;
            let name = match self.consume_string() {
                Value::String(name) => name,
                _ => {
                    self.ignore_until(TokenType::BraceClose);
                    self.index += 1;
                    break;
                }
            };

            if unique.contains(&name) {
                self.recover_object(
                    &token,
                    &std::format!("duplicate name '{}', names should be unique", token.symbol),
                );
                break;
            }
            unique.insert(name.clone());

            if self.is_eof() {
                self.recover_object(&token, "expecting colon, not 'EOF'");
                self.recover_object(&token, "expecting closing '}' at end");
                break;
            }

            let colon = self.consume();
            if colon.token_type != TokenType::Colon {
                self.recover_object(
                    &colon,
                    &std::format!("expecting colon, not '{}'", colon.symbol),
                );
                break;
            }

            if self.is_eof() {
                self.recover_object(&colon, "expecting value, not 'EOF'");
                self.recover_object(&colon, "expecting closing '}' at end");
                break;
            }

            let token = self.tokens[self.index].clone();
            let value = match token.token_type {
                TokenType::Literal => self.consume_literal(),
                TokenType::Number => self.consume_number(),
                TokenType::String => self.consume_string(),
                TokenType::BracketOpen => self.consume_array(),
                TokenType::BraceOpen => self.consume_object(),
                _ => {
                    self.recover_object(
                        &token,
                        &std::format!("expecting value, not '{}'", token.symbol),
                    );
                    break;
                }
            };
            object.insert(name, value);

            if self.is_eof() {
                self.recover_object(&token, "expecting closing '}' at end");
                break;
            }

            let token = self.consume();
            match token.token_type {
                TokenType::Comma => continue,
                TokenType::BraceClose => break,
                _ => {
                    self.recover_object(
                        &token,
                        &std::format!("expecting comma or '}}', not '{}'", token.symbol),
                    );
                    break;
                }
            }
        }

        Value::Object(object)
    }
}
