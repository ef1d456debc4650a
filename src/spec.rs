use crate::scanner::Scanner;

/// Field alignment inside a padded width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    None,
    Left,
    Right,
    Center,
}

/// Sign policy for numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    None,
    /// Only print the sign when negative.
    Negative,
    /// Always print a sign.
    Both,
    /// Print a space in place of a positive sign.
    Space,
}

/// The single-letter presentation code at the end of a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationType {
    #[default]
    None,
    // Integer
    Binary,
    BinaryUppercase,
    Decimal,
    Octal,
    Hex,
    HexUppercase,
    // Floating-point
    Hexfloat,
    HexfloatUppercase,
    Exponent,
    ExponentUppercase,
    FixedPoint,
    FixedPointUppercase,
    General,
    GeneralUppercase,
    // Character
    Character,
    // String
    String,
    // Pointer
    Pointer,
    // Container
    Container,
}

impl PresentationType {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(Self::Binary),
            'B' => Some(Self::BinaryUppercase),
            'd' => Some(Self::Decimal),
            'o' => Some(Self::Octal),
            'x' => Some(Self::Hex),
            'X' => Some(Self::HexUppercase),
            'a' => Some(Self::Hexfloat),
            'A' => Some(Self::HexfloatUppercase),
            'e' => Some(Self::Exponent),
            'E' => Some(Self::ExponentUppercase),
            'f' => Some(Self::FixedPoint),
            'F' => Some(Self::FixedPointUppercase),
            'g' => Some(Self::General),
            'G' => Some(Self::GeneralUppercase),
            'c' => Some(Self::Character),
            's' => Some(Self::String),
            'p' => Some(Self::Pointer),
            'C' => Some(Self::Container),
            _ => None,
        }
    }
}

/// Parsed structural description of one `{...}` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct Specifier {
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub alternative_form: bool,
    pub zero_padding: bool,
    pub width: usize,
    pub precision: Option<usize>,
    pub type_: PresentationType,
}

impl Default for Specifier {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: Align::None,
            sign: Sign::None,
            alternative_form: false,
            zero_padding: false,
            width: 0,
            precision: None,
            type_: PresentationType::None,
        }
    }
}

/// Which compatibility check applies after parsing a specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    Integral,
    FloatingPoint,
    Char,
    CString,
    String,
    Pointer,
    Container,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexingMode {
    Automatic,
    Manual,
}

// Canonical component order inside a specifier body; parsing may only move
// forward through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum State {
    AfterAlign,
    AfterSign,
    AfterAlternativeForm,
    AfterZeroPadding,
    AfterWidth,
    AfterDot,
    AfterPrecision,
    AfterType,
}

/// Parser over one format string. Construction runs a full pre-pass
/// consistency check; malformed format strings are a caller bug and panic.
pub struct SpecParser<'a> {
    scanner: Scanner<'a>,
    mode: IndexingMode,
}

impl<'a> SpecParser<'a> {
    pub fn new(format: &'a str, parameter_count: usize) -> Self {
        let mode = Self::check_parameter_consistency(format, parameter_count);
        Self { scanner: Scanner::new(format), mode }
    }

    /// Count unescaped braces, detect the indexing mode, and reject brace
    /// imbalance or (in automatic mode) a placeholder/argument mismatch
    /// before any argument is formatted.
    fn check_parameter_consistency(format: &str, parameter_count: usize) -> IndexingMode {
        let mut scanner = Scanner::new(format);
        let mut mode = IndexingMode::Automatic;
        let mut brace_open = 0usize;
        let mut brace_close = 0usize;

        while !scanner.is_eof() {
            let peek0 = scanner.peek(0);
            let peek1 = scanner.peek(1);

            if peek0 == Some('{') && peek1 == Some('{') {
                scanner.ignore(2);
                continue;
            }
            if peek0 == Some('}') && peek1 == Some('}') {
                scanner.ignore(2);
                continue;
            }

            if peek0 == Some('{') {
                brace_open += 1;
                if matches!(peek1, Some('0'..='9')) {
                    mode = IndexingMode::Manual;
                }
            }
            if peek0 == Some('}') {
                brace_close += 1;
            }

            scanner.ignore(1);
        }

        assert!(brace_open >= brace_close, "extra closing braces in format string");
        assert!(brace_open <= brace_close, "extra open braces in format string");

        if mode == IndexingMode::Automatic {
            assert!(
                brace_open >= parameter_count,
                "format string does not reference all passed parameters"
            );
            assert!(
                brace_open <= parameter_count,
                "format string references nonexistent parameter"
            );
        }

        mode
    }

    pub fn is_eof(&self) -> bool {
        self.scanner.is_eof()
    }

    /// Consume everything up to the next specifier, collapsing `{{` and `}}`
    /// into their literal braces.
    pub fn consume_literal(&mut self) -> String {
        let mut literal = String::new();

        while !self.scanner.is_eof() {
            let peek0 = self.scanner.peek(0);
            let peek1 = self.scanner.peek(1);

            if peek0 == Some('{') && peek1 == Some('{') {
                literal.push('{');
                self.scanner.ignore(2);
                continue;
            }
            if peek0 == Some('}') && peek1 == Some('}') {
                literal.push('}');
                self.scanner.ignore(2);
                continue;
            }

            if peek0 == Some('{') || peek0 == Some('}') {
                break;
            }

            literal.push(peek0.unwrap_or_default());
            self.scanner.ignore(1);
        }

        literal
    }

    /// Consume `{` plus an optional explicit argument index and the `:`
    /// separating it from the specifier body.
    pub fn consume_index(&mut self) -> Option<usize> {
        if !self.scanner.consume_specific('{') {
            unreachable!("specifier without opening brace");
        }

        match self.mode {
            IndexingMode::Automatic => {
                assert!(
                    self.scanner.consume_specific(':') || self.scanner.current() == Some('}'),
                    "expecting ':' or '}}', not '{}'",
                    self.scanner.current().unwrap_or_default()
                );
                None
            }
            IndexingMode::Manual => {
                let begin = self.scanner.tell();

                while !self.scanner.is_eof() {
                    let peek0 = self.scanner.current();
                    if peek0 == Some('}') || peek0 == Some(':') {
                        break;
                    }
                    assert!(
                        matches!(peek0, Some('0'..='9')),
                        "expecting number, not '{}'",
                        peek0.unwrap_or_default()
                    );
                    self.scanner.ignore(1);
                }

                let result = digits_to_number(self.scanner.substring(begin, self.scanner.tell()));

                if self.scanner.current() == Some(':') {
                    self.scanner.ignore(1);
                }

                Some(result)
            }
        }
    }

    /// Parse one specifier body and leave the cursor just past the closing
    /// `}`. Components must appear in canonical order; an out-of-order
    /// component or a field the parameter type does not support is fatal.
    pub fn parse_specifier(&mut self, specifier: &mut Specifier, parameter_type: ParameterType) {
        if self.scanner.consume_specific('}') || self.scanner.is_eof() {
            return;
        }

        // Fill + align come as a two-char lookahead: any fill char followed
        // by one of `<`, `>`, `^`.
        let peek0 = self.scanner.peek(0);
        let peek1 = self.scanner.peek(1);
        if let Some(align_char) = peek1 {
            if matches!(align_char, '<' | '>' | '^') {
                specifier.fill = peek0.unwrap_or(' ');
                specifier.align = match align_char {
                    '<' => Align::Left,
                    '>' => Align::Right,
                    _ => Align::Center,
                };
                self.scanner.ignore(2);
            }
        }

        let mut state = State::AfterAlign;
        let mut width_begin: Option<usize> = None;
        let mut width_end: Option<usize> = None;
        let mut precision_begin: Option<usize> = None;
        let mut precision_end: Option<usize> = None;

        loop {
            let peek0 = match self.scanner.current() {
                Some('}') => {
                    self.scanner.ignore(1);
                    break;
                }
                Some(ch) => ch,
                None => break,
            };

            // Sign is only valid for numeric types.
            if matches!(peek0, '+' | '-' | ' ') {
                assert!(state < State::AfterSign, "unexpected '{peek0}' at this position");
                state = State::AfterSign;
                specifier.sign = match peek0 {
                    '+' => Sign::Both,
                    '-' => Sign::Negative,
                    _ => Sign::Space,
                };
            }

            // Alternative form is only valid for numeric types.
            if peek0 == '#' {
                assert!(state < State::AfterAlternativeForm, "unexpected '#' at this position");
                state = State::AfterAlternativeForm;
                specifier.alternative_form = true;
            }

            // Sign-aware zero padding; a leading '0' also begins the width.
            if peek0 == '0' && state < State::AfterWidth {
                assert!(state < State::AfterZeroPadding, "unexpected '0' at this position");
                state = State::AfterZeroPadding;
                specifier.zero_padding = true;
            }

            if peek0.is_ascii_digit() {
                if width_begin.is_none() && state < State::AfterDot {
                    assert!(state < State::AfterWidth, "unexpected '{peek0}' at this position");
                    state = State::AfterWidth;
                    width_begin = Some(self.scanner.tell());
                }
                if precision_begin.is_none() && state == State::AfterDot {
                    state = State::AfterPrecision;
                    precision_begin = Some(self.scanner.tell());
                }
            }

            if peek0 == '.' {
                if state == State::AfterWidth {
                    width_end = Some(self.scanner.tell());
                }
                assert!(state < State::AfterDot, "unexpected '.' at this position");
                state = State::AfterDot;
            }

            if peek0.is_ascii_alphabetic() {
                if state == State::AfterWidth {
                    width_end = Some(self.scanner.tell());
                }
                if state == State::AfterPrecision {
                    precision_end = Some(self.scanner.tell());
                }

                assert!(state < State::AfterType, "unexpected '{peek0}' at this position");
                state = State::AfterType;
                specifier.type_ = match PresentationType::from_code(peek0) {
                    Some(type_) => type_,
                    None => panic!("unexpected '{peek0}' at this position"),
                };
            }

            self.scanner.ignore(1);
        }

        // The cursor sits one past the closing '}' here, so open spans end
        // one char back.
        if let Some(begin) = width_begin {
            let end = width_end.unwrap_or(self.scanner.tell() - 1);
            specifier.width = digits_to_number(self.scanner.substring(begin, end));
        }
        if let Some(begin) = precision_begin {
            let end = precision_end.unwrap_or(self.scanner.tell() - 1);
            specifier.precision = Some(digits_to_number(self.scanner.substring(begin, end)));
        }

        check_specifier_type(specifier, parameter_type);
    }
}

/// Strict digits-only integer parser; anything else is a caller bug.
fn digits_to_number(value: &str) -> usize {
    let mut result = 0usize;
    for ch in value.chars() {
        assert!(ch.is_ascii_digit(), "unexpected '{ch}'");
        result = result * 10 + (ch as usize - '0' as usize);
    }
    result
}

fn check_specifier_integral_type(specifier: &Specifier) {
    match specifier.type_ {
        PresentationType::None
        | PresentationType::Binary
        | PresentationType::BinaryUppercase
        | PresentationType::Character
        | PresentationType::Decimal
        | PresentationType::Octal
        | PresentationType::Hex
        | PresentationType::HexUppercase => {}
        _ => panic!("invalid type specifier"),
    }

    // Invalid: precision
    assert!(specifier.precision.is_none(), "invalid specifier option");
}

fn check_specifier_floating_point_type(specifier: &Specifier) {
    match specifier.type_ {
        PresentationType::None
        | PresentationType::Hexfloat
        | PresentationType::HexfloatUppercase
        | PresentationType::Exponent
        | PresentationType::ExponentUppercase
        | PresentationType::FixedPoint
        | PresentationType::FixedPointUppercase
        | PresentationType::General
        | PresentationType::GeneralUppercase => {}
        _ => panic!("invalid type specifier"),
    }
}

fn check_specifier_char_type(specifier: &Specifier) {
    check_specifier_integral_type(specifier);

    //   Valid: fill + align, width
    // Invalid: sign, alternative form, zero padding, precision
    if specifier.type_ == PresentationType::None || specifier.type_ == PresentationType::Character {
        assert!(specifier.sign == Sign::None, "invalid specifier option");
        assert!(!specifier.alternative_form, "invalid specifier option");
        assert!(!specifier.zero_padding, "invalid specifier option");
    }
}

fn check_specifier_c_string_type(specifier: &Specifier) {
    match specifier.type_ {
        PresentationType::None | PresentationType::String | PresentationType::Pointer => {}
        _ => panic!("invalid type specifier"),
    }

    //   Valid: fill + align, width
    // Invalid: sign, alternative form, zero padding, precision
    assert!(specifier.sign == Sign::None, "invalid specifier option");
    assert!(!specifier.alternative_form, "invalid specifier option");
    assert!(!specifier.zero_padding, "invalid specifier option");
    assert!(specifier.precision.is_none(), "invalid specifier option");
}

fn check_specifier_string_type(specifier: &Specifier) {
    check_specifier_c_string_type(specifier);
    assert!(specifier.type_ != PresentationType::Pointer, "invalid type specifier");
}

fn check_specifier_pointer_type(specifier: &Specifier) {
    check_specifier_c_string_type(specifier);
    assert!(specifier.type_ != PresentationType::String, "invalid type specifier");
}

fn check_specifier_container_type(specifier: &Specifier) {
    match specifier.type_ {
        PresentationType::None | PresentationType::Container => {}
        _ => panic!("invalid type specifier"),
    }

    //   Valid: fill + align, alternative form, width
    // Invalid: sign, zero padding, precision
    assert!(specifier.sign == Sign::None, "invalid specifier option");
    assert!(!specifier.zero_padding, "invalid specifier option");
    assert!(specifier.precision.is_none(), "invalid specifier option");
}

fn check_specifier_type(specifier: &Specifier, parameter_type: ParameterType) {
    match parameter_type {
        ParameterType::Integral => check_specifier_integral_type(specifier),
        ParameterType::FloatingPoint => check_specifier_floating_point_type(specifier),
        ParameterType::Char => check_specifier_char_type(specifier),
        ParameterType::CString => check_specifier_c_string_type(specifier),
        ParameterType::String => check_specifier_string_type(specifier),
        ParameterType::Pointer => check_specifier_pointer_type(specifier),
        ParameterType::Container => check_specifier_container_type(specifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(format: &str, parameter_type: ParameterType) -> Specifier {
        let mut parser = SpecParser::new(format, 1);
        parser.consume_literal();
        parser.consume_index();
        let mut specifier = Specifier::default();
        parser.parse_specifier(&mut specifier, parameter_type);
        specifier
    }

    #[test]
    fn empty_specifier_is_default() {
        assert_eq!(parse("{}", ParameterType::Integral), Specifier::default());
    }

    #[test]
    fn full_specifier() {
        let specifier = parse("{:*^+#012x}", ParameterType::Integral);
        assert_eq!(specifier.fill, '*');
        assert_eq!(specifier.align, Align::Center);
        assert_eq!(specifier.sign, Sign::Both);
        assert!(specifier.alternative_form);
        assert!(specifier.zero_padding);
        assert_eq!(specifier.width, 12);
        assert_eq!(specifier.precision, None);
        assert_eq!(specifier.type_, PresentationType::Hex);
    }

    #[test]
    fn width_and_precision_spans() {
        let specifier = parse("{:10.3f}", ParameterType::FloatingPoint);
        assert_eq!(specifier.width, 10);
        assert_eq!(specifier.precision, Some(3));
        assert_eq!(specifier.type_, PresentationType::FixedPoint);
    }

    #[test]
    fn precision_without_type() {
        let specifier = parse("{:.15}", ParameterType::FloatingPoint);
        assert_eq!(specifier.width, 0);
        assert_eq!(specifier.precision, Some(15));
    }

    #[test]
    fn manual_index_consumption() {
        let mut parser = SpecParser::new("{1} {0}", 2);
        parser.consume_literal();
        assert_eq!(parser.consume_index(), Some(1));
        let mut specifier = Specifier::default();
        parser.parse_specifier(&mut specifier, ParameterType::String);
        assert_eq!(parser.consume_literal(), " ");
        assert_eq!(parser.consume_index(), Some(0));
    }

    #[test]
    #[should_panic(expected = "extra open braces")]
    fn unbalanced_open_brace() {
        SpecParser::new("{} {", 1);
    }

    #[test]
    #[should_panic(expected = "nonexistent parameter")]
    fn too_many_placeholders() {
        SpecParser::new("{} {}", 1);
    }

    #[test]
    #[should_panic(expected = "does not reference all passed parameters")]
    fn too_few_placeholders() {
        SpecParser::new("{}", 2);
    }

    #[test]
    #[should_panic(expected = "unexpected '+' at this position")]
    fn out_of_order_sign() {
        parse("{:10+}", ParameterType::Integral);
    }

    #[test]
    #[should_panic(expected = "invalid specifier option")]
    fn precision_on_integral() {
        parse("{:.3}", ParameterType::Integral);
    }

    #[test]
    #[should_panic(expected = "invalid type specifier")]
    fn float_code_on_integral() {
        parse("{:f}", ParameterType::Integral);
    }
}
