use crate::builder::Builder;
use crate::formatter::Format;
use crate::spec::SpecParser;

/// Append the rendered format string to an existing buffer.
///
/// Arguments are matched to placeholders either positionally (automatic
/// mode) or by explicit `{N}` index (manual mode). A reference to an
/// argument no placeholder names, or a placeholder past the argument list,
/// is a caller bug and panics.
pub fn vformat_to(output: &mut String, format: &str, arguments: &[&dyn Format]) {
    let mut parser = SpecParser::new(format, arguments.len());
    let mut builder = Builder::new(output);
    let mut cursor = 0usize;

    loop {
        let literal = parser.consume_literal();
        builder.put_literal(&literal);

        if parser.is_eof() {
            break;
        }

        let index = parser.consume_index().unwrap_or(cursor);
        let argument = match arguments.get(index) {
            Some(argument) => argument,
            None => panic!("argument not found at index {index}"),
        };

        let specifier = argument.parse(&mut parser);
        argument.format(&mut builder, &specifier);

        // The cursor advances even under manual indexing; mixing modes is
        // already rejected by the pre-pass.
        cursor += 1;
    }
}

/// Render a format string against a slice of type-erased arguments.
pub fn vformat(format: &str, arguments: &[&dyn Format]) -> String {
    let mut output = String::new();
    vformat_to(&mut output, format, arguments);
    output
}

/// Render a `{...}` format string with the crate's specifier mini-language.
///
/// ```
/// let text = curly::format!("{} = {:#x}", "flags", 255u32);
/// assert_eq!(text, "flags = 0xff");
/// ```
#[macro_export]
macro_rules! format {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::vformat($fmt, &[$(&$arg as &dyn $crate::Format),*])
    };
}

/// Like [`format!`], but appends to an existing `String`.
#[macro_export]
macro_rules! format_to {
    ($output:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::vformat_to($output, $fmt, &[$(&$arg as &dyn $crate::Format),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_passthrough() {
        assert_eq!(vformat("plain text", &[]), "plain text");
        assert_eq!(vformat("{{escaped}}", &[]), "{escaped}");
    }

    #[test]
    fn automatic_indexing_advances() {
        assert_eq!(vformat("{} {} {}", &[&1u32, &2u32, &3u32]), "1 2 3");
    }

    #[test]
    fn manual_indexing_reorders() {
        assert_eq!(vformat("{1}{0}", &[&"a", &"b"]), "ba");
    }

    #[test]
    #[should_panic(expected = "argument not found at index 5")]
    fn manual_index_out_of_bounds() {
        vformat("{5}", &[&1u32]);
    }
}
