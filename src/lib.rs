//! # curly
//!
//! A `{}`-style string-formatting engine with a typed specifier
//! mini-language, paired with a small JSON value library built for
//! readable diagnostics.
//!
//! ## Formatting
//!
//! Placeholders follow `{index:fill align sign # 0 width .precision type}`,
//! every component optional but strictly ordered. Arguments are matched
//! positionally or by explicit `{N}` index; a malformed format string or a
//! placeholder/argument mismatch is a caller bug and panics.
//!
//! Alignment is written as a fill character followed by the align code, so
//! right-aligning with spaces is `{: >8}`:
//!
//! ```
//! let line = curly::format!("{: >8} | {:.2}", "total", 12.345);
//! assert_eq!(line, "   total | 12.35");
//!
//! let flags = curly::format!("{:#010b}", 5u8);
//! assert_eq!(flags, "0b00000101");
//! ```
//!
//! Any type implementing [`Format`] can appear as an argument; containers
//! get one level of pretty-printing:
//!
//! ```
//! let list = curly::format!("{:2}", vec![1, 2, 3]);
//! assert_eq!(list, "{  1,  2,  3  }");
//! ```
//!
//! ## JSON
//!
//! [`Value`] is a plain sum type with implicit array/object construction on
//! first write. Parsing never panics on bad input; defects are reported as
//! diagnostics on stderr and the parse yields `Value::Null`.
//!
//! ```
//! use curly::Value;
//!
//! let value = Value::parse(r#"{"b": [1, 2], "a": true}"#);
//! assert_eq!(value.dump(0, ' '), r#"{"a":true,"b":[1,2]}"#);
//!
//! let mut doc = Value::Null;
//! doc["servers"][0] = "alpha".into();
//! assert_eq!(doc.dump(0, ' '), r#"{"servers":["alpha"]}"#);
//! ```

mod builder;
mod convert;
mod error;
mod format;
mod formatter;
mod job;
mod parser;
mod scanner;
mod serializer;
mod spec;
mod tokenizer;
mod value;

pub use builder::Builder;
pub use error::Error;
pub use format::{vformat, vformat_to};
pub use formatter::Format;
pub use job::{Diagnostic, Job};
pub use serializer::Serializer;
pub use spec::{Align, ParameterType, PresentationType, Sign, SpecParser, Specifier};
pub use parser::Parser;
pub use tokenizer::{Lexer, Token, TokenType};
pub use value::{Kind, Value, ValueIndex};
