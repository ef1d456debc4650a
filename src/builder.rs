use crate::spec::{Align, Sign};

/// Renders already-parsed values into an output buffer, honoring the
/// alignment, padding, sign and base rules of a [`Specifier`].
///
/// [`Specifier`]: crate::spec::Specifier
pub struct Builder<'a> {
    output: &'a mut String,
}

/// Digits after the decimal point when a float specifier carries no
/// explicit precision.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

impl<'a> Builder<'a> {
    pub fn new(output: &'a mut String) -> Self {
        Self { output }
    }

    pub fn put_char(&mut self, ch: char) {
        self.output.push(ch);
    }

    pub fn put_literal(&mut self, literal: &str) {
        self.output.push_str(literal);
    }

    /// Render an unsigned magnitude in the given base. The sign of the
    /// original value arrives separately so that signed and unsigned
    /// integers share one code path.
    #[allow(clippy::too_many_arguments)]
    pub fn put_u64(
        &mut self,
        value: u64,
        base: u8,
        uppercase: bool,
        fill: char,
        align: Align,
        sign: Sign,
        alternative_form: bool,
        zero_padding: bool,
        width: usize,
        is_negative: bool,
    ) {
        let mut number = number_to_string(value, base, uppercase);

        let mut prefix = String::new();
        match sign {
            Sign::None | Sign::Negative => {
                if is_negative {
                    prefix.push('-');
                }
            }
            Sign::Both => prefix.push(if is_negative { '-' } else { '+' }),
            Sign::Space => prefix.push(if is_negative { '-' } else { ' ' }),
        }

        if alternative_form {
            match base {
                2 => prefix.push_str(if uppercase { "0B" } else { "0b" }),
                8 => prefix.push('0'),
                10 => {}
                16 => prefix.push_str(if uppercase { "0X" } else { "0x" }),
                _ => unreachable!("unsupported base {base}"),
            }
        }

        // Zero padding overrides the fill char, and unless an explicit
        // alignment was requested the pad zeros go between prefix and
        // digits rather than in front of the sign.
        let mut fill = fill;
        if !zero_padding {
            number.insert_str(0, &prefix);
        } else {
            if align != Align::None {
                number.insert_str(0, &prefix);
            }
            fill = '0';
        }

        let length = number.chars().count();
        if width < length {
            self.output.push_str(&number);
            return;
        }

        match align {
            Align::Left => {
                self.output.push_str(&number);
                self.push_fill(fill, width - length);
            }
            Align::Center => {
                let half = (width - length) / 2;
                self.push_fill(fill, half);
                self.output.push_str(&number);
                self.push_fill(fill, width - half - length);
            }
            Align::Right => {
                self.push_fill(fill, width - length);
                self.output.push_str(&number);
            }
            Align::None => {
                if zero_padding {
                    self.output.push_str(&prefix);
                    let prefix_length = prefix.chars().count();
                    self.push_fill(fill, (width - length).saturating_sub(prefix_length));
                } else {
                    self.push_fill(fill, width - length);
                }
                self.output.push_str(&number);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn put_i64(
        &mut self,
        value: i64,
        base: u8,
        uppercase: bool,
        fill: char,
        align: Align,
        sign: Sign,
        alternative_form: bool,
        zero_padding: bool,
        width: usize,
    ) {
        let is_negative = value < 0;
        self.put_u64(
            value.unsigned_abs(),
            base,
            uppercase,
            fill,
            align,
            sign,
            alternative_form,
            zero_padding,
            width,
            is_negative,
        );
    }

    /// Render a float with exactly `precision` digits after the decimal
    /// point, starting from the shortest decimal representation. Rounding is
    /// half-up on a single lookahead digit: round up iff the digit past the
    /// cutoff is greater than 4, carrying 9s leftward; a carry past the most
    /// significant digit grows the number by one digit. Truncation strips
    /// trailing zeros back to the last significant digit (the bare `.` goes
    /// too when precision is 0).
    pub fn put_f64(&mut self, number: f64, precision: usize) {
        let mut converted = number.to_string();

        let dot = match converted.find('.') {
            Some(dot) => dot,
            None => {
                // No fractional part at all; pad one out if requested.
                if precision > 0 {
                    converted.push('.');
                    converted.push_str(&"0".repeat(precision));
                }
                self.output.push_str(&converted);
                return;
            }
        };
        let mut length = dot + precision + 1;

        // Fewer digits behind the decimal point than the precision asks for.
        if converted.len() < length {
            let padding = length - converted.len();
            converted.push_str(&"0".repeat(padding));
            self.output.push_str(&converted);
            return;
        }

        let mut digits: Vec<u8> = converted.into_bytes();

        if digits.len() > length && digits[length] > b'4' {
            let mut carried = true;
            for i in (0..length).rev() {
                if digits[i] == b'.' || digits[i] == b'-' {
                    continue;
                }
                if digits[i] < b'9' {
                    // Carry stops here.
                    digits[i] += 1;
                    carried = false;
                    break;
                }
                digits[i] = b'0';
            }
            if carried {
                // All nines: the carry overflows into a new leading digit.
                let at = usize::from(digits[0] == b'-');
                digits.insert(at, b'1');
                length += 1;
            }
        }

        // Cut off everything past the requested precision, dropping
        // insignificant zeros along the way.
        if digits.len() > length {
            let mut last_included = length - 1;
            while last_included > 0 && digits[last_included] == b'0' {
                last_included -= 1;
            }
            let end = if digits[last_included] == b'.' {
                if precision > 0 {
                    last_included + 2
                } else {
                    last_included
                }
            } else {
                last_included + 1
            };
            digits.truncate(end);
        }

        // The buffer started as valid UTF-8 and only ASCII digits changed.
        self.output.push_str(&String::from_utf8_lossy(&digits));
    }

    pub fn put_str(&mut self, string: &str, fill: char, align: Align, width: usize) {
        let length = string.chars().count();
        if width < length {
            self.output.push_str(string);
            return;
        }

        match align {
            Align::None | Align::Left => {
                self.output.push_str(string);
                self.push_fill(fill, width - length);
            }
            Align::Center => {
                let half = (width - length) / 2;
                self.push_fill(fill, half);
                self.output.push_str(string);
                self.push_fill(fill, width - half - length);
            }
            Align::Right => {
                self.push_fill(fill, width - length);
                self.output.push_str(string);
            }
        }
    }

    fn push_fill(&mut self, fill: char, count: usize) {
        for _ in 0..count {
            self.output.push(fill);
        }
    }
}

fn number_to_string(mut value: u64, base: u8, uppercase: bool) -> String {
    const LOOKUP_LOWERCASE: &[u8] = b"0123456789abcdef";
    const LOOKUP_UPPERCASE: &[u8] = b"0123456789ABCDEF";

    if value == 0 {
        return "0".to_string();
    }

    let lookup = if uppercase { LOOKUP_UPPERCASE } else { LOOKUP_LOWERCASE };
    let base = base as u64;
    let mut digits: Vec<u8> = Vec::new();
    while value > 0 {
        digits.push(lookup[(value % base) as usize]);
        value /= base;
    }
    digits.reverse();

    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Align, Sign};

    fn render_f64(number: f64, precision: usize) -> String {
        let mut output = String::new();
        Builder::new(&mut output).put_f64(number, precision);
        output
    }

    #[test]
    fn digit_conversion() {
        assert_eq!(number_to_string(0, 10, false), "0");
        assert_eq!(number_to_string(12345, 2, false), "11000000111001");
        assert_eq!(number_to_string(12345, 8, false), "30071");
        assert_eq!(number_to_string(62432, 16, false), "f3e0");
        assert_eq!(number_to_string(62432, 16, true), "F3E0");
    }

    #[test]
    fn zero_padding_goes_after_prefix() {
        let mut output = String::new();
        Builder::new(&mut output).put_u64(
            0x192,
            16,
            false,
            ' ',
            Align::None,
            Sign::Both,
            true,
            true,
            10,
            false,
        );
        assert_eq!(output, "+0x0000192");
    }

    #[test]
    fn width_already_satisfied_means_no_padding() {
        let mut output = String::new();
        Builder::new(&mut output).put_i64(-12345, 10, false, ' ', Align::Right, Sign::None, false, false, 3);
        assert_eq!(output, "-12345");
    }

    #[test]
    fn float_rounding_is_half_up_on_next_digit() {
        assert_eq!(render_f64(3.14159, 2), "3.14");
        assert_eq!(render_f64(3.6, 0), "4");
        assert_eq!(render_f64(3.5, 0), "4");
        assert_eq!(render_f64(3.4, 0), "3");
        assert_eq!(render_f64(-3.5, 0), "-4");
    }

    #[test]
    fn float_carry_cascades_through_nines() {
        assert_eq!(render_f64(3.999, 2), "4.0");
        assert_eq!(render_f64(9.99, 1), "10.0");
        assert_eq!(render_f64(-9.99, 1), "-10.0");
        assert_eq!(render_f64(9.9, 0), "10");
        assert_eq!(render_f64(99.95, 1), "100.0");
    }

    #[test]
    fn float_padding_to_precision() {
        assert_eq!(render_f64(87522.3, 6), "87522.300000");
        assert_eq!(render_f64(3.0, 2), "3.00");
        assert_eq!(render_f64(42.0, 0), "42");
        assert_eq!(render_f64(3.14159265359, 15), "3.141592653590000");
    }

    #[test]
    fn string_center_puts_spare_fill_trailing() {
        let mut output = String::new();
        Builder::new(&mut output).put_str("ab", '*', Align::Center, 5);
        assert_eq!(output, "*ab**");
    }
}
