use std::collections::BTreeMap;
use std::ffi::CStr;

use crate::builder::{Builder, DEFAULT_FLOAT_PRECISION};
use crate::spec::{ParameterType, PresentationType, SpecParser, Specifier};

/// A value that can be rendered by a `{...}` placeholder.
///
/// `parse` validates and captures the specifier for this value's parameter
/// class; `format` renders the value under that specifier. Both take `&self`
/// so arguments can travel as `&dyn Format` through the driver.
pub trait Format {
    fn parse(&self, parser: &mut SpecParser) -> Specifier;
    fn format(&self, builder: &mut Builder, specifier: &Specifier);
}

// Arguments reach the driver behind a reference, often more than one deep
// when they come out of the macro.
impl<T: Format + ?Sized> Format for &T {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        (**self).parse(parser)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        (**self).format(builder, specifier)
    }
}

fn parse_as(parser: &mut SpecParser, parameter_type: ParameterType) -> Specifier {
    let mut specifier = Specifier::default();
    parser.parse_specifier(&mut specifier, parameter_type);
    specifier
}

/// Base and letter case implied by an integer presentation code.
fn integer_base(type_: PresentationType) -> (u8, bool) {
    match type_ {
        PresentationType::Binary => (2, false),
        PresentationType::BinaryUppercase => (2, true),
        PresentationType::Octal => (8, false),
        PresentationType::None | PresentationType::Decimal => (10, false),
        PresentationType::Hex => (16, false),
        PresentationType::HexUppercase => (16, true),
        _ => unreachable!("presentation type rejected during parsing"),
    }
}

fn format_u64(builder: &mut Builder, value: u64, specifier: &Specifier) {
    if specifier.type_ == PresentationType::Character {
        assert!(value <= 127, "character value out of ASCII range");
        let character = (value as u8 as char).to_string();
        builder.put_str(&character, specifier.fill, specifier.align, specifier.width);
        return;
    }

    let (base, uppercase) = integer_base(specifier.type_);
    builder.put_u64(
        value,
        base,
        uppercase,
        specifier.fill,
        specifier.align,
        specifier.sign,
        specifier.alternative_form,
        specifier.zero_padding,
        specifier.width,
        false,
    );
}

fn format_i64(builder: &mut Builder, value: i64, specifier: &Specifier) {
    if specifier.type_ == PresentationType::Character {
        assert!((0..=127).contains(&value), "character value out of ASCII range");
        let character = (value as u8 as char).to_string();
        builder.put_str(&character, specifier.fill, specifier.align, specifier.width);
        return;
    }

    let (base, uppercase) = integer_base(specifier.type_);
    builder.put_i64(
        value,
        base,
        uppercase,
        specifier.fill,
        specifier.align,
        specifier.sign,
        specifier.alternative_form,
        specifier.zero_padding,
        specifier.width,
    );
}

macro_rules! impl_format_for_unsigned {
    ($($ty:ty)*) => {$(
        impl Format for $ty {
            fn parse(&self, parser: &mut SpecParser) -> Specifier {
                parse_as(parser, ParameterType::Integral)
            }

            fn format(&self, builder: &mut Builder, specifier: &Specifier) {
                format_u64(builder, *self as u64, specifier);
            }
        }
    )*};
}

macro_rules! impl_format_for_signed {
    ($($ty:ty)*) => {$(
        impl Format for $ty {
            fn parse(&self, parser: &mut SpecParser) -> Specifier {
                parse_as(parser, ParameterType::Integral)
            }

            fn format(&self, builder: &mut Builder, specifier: &Specifier) {
                format_i64(builder, *self as i64, specifier);
            }
        }
    )*};
}

impl_format_for_unsigned! { u8 u16 u32 u64 usize }
impl_format_for_signed! { i8 i16 i32 i64 isize }

impl Format for f64 {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::FloatingPoint)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        let precision = specifier.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
        builder.put_f64(*self, precision);
    }
}

impl Format for f32 {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::FloatingPoint)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        (*self as f64).format(builder, specifier);
    }
}

impl Format for char {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::Char)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        // A numeric presentation code renders the code point instead.
        if specifier.type_ != PresentationType::None
            && specifier.type_ != PresentationType::Character
        {
            format_u64(builder, *self as u64, specifier);
            return;
        }

        let character = self.to_string();
        builder.put_str(&character, specifier.fill, specifier.align, specifier.width);
    }
}

impl Format for bool {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::Char)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        match specifier.type_ {
            PresentationType::Binary
            | PresentationType::BinaryUppercase
            | PresentationType::Character
            | PresentationType::Decimal
            | PresentationType::Octal
            | PresentationType::Hex
            | PresentationType::HexUppercase => {
                format_u64(builder, *self as u64, specifier);
            }
            _ => {
                let text = if *self { "true" } else { "false" };
                builder.put_str(text, specifier.fill, specifier.align, specifier.width);
            }
        }
    }
}

impl Format for str {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::String)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        builder.put_str(self, specifier.fill, specifier.align, specifier.width);
    }
}

impl Format for String {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::String)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        self.as_str().format(builder, specifier);
    }
}

impl Format for CStr {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::CString)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        if specifier.type_ == PresentationType::Pointer {
            format_pointer(builder, self.as_ptr() as usize, specifier);
            return;
        }

        let text = self.to_string_lossy();
        builder.put_str(&text, specifier.fill, specifier.align, specifier.width);
    }
}

fn format_pointer(builder: &mut Builder, address: usize, specifier: &Specifier) {
    let mut specifier = specifier.clone();
    specifier.alternative_form = true;
    specifier.type_ = PresentationType::Hex;
    format_u64(builder, address as u64, &specifier);
}

impl<T> Format for *const T {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::Pointer)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        format_pointer(builder, *self as usize, specifier);
    }
}

impl<T> Format for *mut T {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::Pointer)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        format_pointer(builder, *self as usize, specifier);
    }
}

impl<T: Format> Format for Vec<T> {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::Container)
    }

    /// Elements render with a default specifier; the container's own fill
    /// and width act as per-element indentation and alternative form puts
    /// one element per line.
    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        let indent: String = std::iter::repeat(specifier.fill).take(specifier.width).collect();
        let element_specifier = Specifier::default();

        builder.put_char('{');
        if specifier.alternative_form {
            builder.put_char('\n');
        }
        for (i, element) in self.iter().enumerate() {
            builder.put_literal(&indent);

            element.format(builder, &element_specifier);

            if i != self.len() - 1 {
                builder.put_char(',');
            } else if !specifier.alternative_form {
                builder.put_literal(&indent);
            }

            if specifier.alternative_form {
                builder.put_char('\n');
            }
        }
        builder.put_char('}');
    }
}

impl<K: Format, V: Format> Format for BTreeMap<K, V> {
    fn parse(&self, parser: &mut SpecParser) -> Specifier {
        parse_as(parser, ParameterType::Container)
    }

    fn format(&self, builder: &mut Builder, specifier: &Specifier) {
        let indent: String = std::iter::repeat(specifier.fill).take(specifier.width).collect();
        let element_specifier = Specifier::default();

        builder.put_char('{');
        if specifier.alternative_form {
            builder.put_char('\n');
        }
        for (i, (key, value)) in self.iter().enumerate() {
            builder.put_literal(&indent);
            builder.put_char('"');
            key.format(builder, &element_specifier);
            builder.put_char('"');
            builder.put_literal(if specifier.width > 0 { ": " } else { ":" });
            value.format(builder, &element_specifier);

            if i != self.len() - 1 {
                builder.put_char(',');
            } else if !specifier.alternative_form {
                builder.put_literal(&indent);
            }

            if specifier.alternative_form {
                builder.put_char('\n');
            }
        }
        builder.put_char('}');
    }
}
