use crate::value::Value;

/// Depth-first writer for [`Value`] trees.
///
/// Indent 0 produces the compact form. Indented output puts a newline after
/// every opener and element and re-indents the closing bracket to the
/// parent level. Numbers go through `f64`'s `Display`, not the format
/// engine.
pub struct Serializer {
    indent: usize,
    indent_char: char,
    output: String,
}

impl Serializer {
    pub fn new(indent: usize, indent_char: char) -> Self {
        Self { indent, indent_char, output: String::new() }
    }

    pub fn dump(mut self, value: &Value) -> String {
        self.dump_value(value, 0);
        self.output
    }

    fn indentation(&self, level: usize) -> String {
        std::iter::repeat(self.indent_char).take(self.indent * level).collect()
    }

    fn dump_value(&mut self, value: &Value, level: usize) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(boolean) => {
                self.output.push_str(if *boolean { "true" } else { "false" })
            }
            Value::Number(number) => self.output.push_str(&number.to_string()),
            Value::String(string) => {
                self.output.push('"');
                self.output.push_str(string);
                self.output.push('"');
            }
            Value::Array(_) => self.dump_array(value, level),
            Value::Object(_) => self.dump_object(value, level),
        }
    }

    fn dump_array(&mut self, value: &Value, level: usize) {
        let elements = match value {
            Value::Array(elements) => elements,
            _ => unreachable!(),
        };

        self.output.push('[');
        if self.indent > 0 {
            self.output.push('\n');
        }

        if elements.is_empty() {
            self.output.push(']');
            return;
        }

        if self.indent == 0 {
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    self.output.push(',');
                }
                self.dump_value(element, level + 1);
            }
        } else {
            let indentation = self.indentation(level + 1);
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(",\n");
                }
                self.output.push_str(&indentation);
                self.dump_value(element, level + 1);
            }
            self.output.push('\n');
            let closing = self.indentation(level);
            self.output.push_str(&closing);
        }

        self.output.push(']');
    }

    fn dump_object(&mut self, value: &Value, level: usize) {
        let members = match value {
            Value::Object(members) => members,
            _ => unreachable!(),
        };

        self.output.push('{');
        if self.indent > 0 {
            self.output.push('\n');
        }

        if members.is_empty() {
            self.output.push('}');
            return;
        }

        if self.indent == 0 {
            for (i, (name, member)) in members.iter().enumerate() {
                if i > 0 {
                    self.output.push(',');
                }
                self.output.push('"');
                self.output.push_str(name);
                self.output.push_str("\":");
                self.dump_value(member, level + 1);
            }
        } else {
            let indentation = self.indentation(level + 1);
            for (i, (name, member)) in members.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(",\n");
                }
                self.output.push_str(&indentation);
                self.output.push('"');
                self.output.push_str(name);
                self.output.push_str("\": ");
                self.dump_value(member, level + 1);
            }
            self.output.push('\n');
            let closing = self.indentation(level);
            self.output.push_str(&closing);
        }

        self.output.push('}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_has_no_whitespace() {
        let value = Value::parse("{ \"b\": [ 1, true ], \"a\": null }");
        assert_eq!(value.dump(0, ' '), "{\"a\":null,\"b\":[1,true]}");
    }

    #[test]
    fn indented_output() {
        let value = Value::parse("{\"a\": [1, 2]}");
        assert_eq!(
            value.dump(2, ' '),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn empty_containers_in_indented_mode() {
        assert_eq!(Value::Array(Vec::new()).dump(4, ' '), "[\n]");
        assert_eq!(Value::parse("{}").dump(4, ' '), "{\n}");
    }

    #[test]
    fn tabs_as_indent_character() {
        let value = Value::parse("[1]");
        assert_eq!(value.dump(1, '\t'), "[\n\t1\n]");
    }
}
