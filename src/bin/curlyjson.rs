use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use is_terminal::IsTerminal;

use curly::Value;

/// Validate and reformat JSON.
///
/// curlyjson reads JSON from stdin or files and rewrites it compact or
/// indented, with object members in alphabetical order. Parse errors are
/// reported with line, column and a caret into the offending source line.
#[derive(Parser, Debug)]
#[command(name = "curlyjson")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s). If not specified, reads from stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output file. If not specified, writes to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Minify output (remove all whitespace).
    #[arg(short, long)]
    compact: bool,

    /// Number of indentation characters per nesting level.
    #[arg(short, long, default_value = "4")]
    indent: usize,

    /// Use tabs instead of spaces for indentation.
    #[arg(short = 't', long)]
    tabs: bool,

    /// Validate only; produce no output.
    #[arg(long)]
    check: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("curlyjson: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Read input
    let input = if args.files.is_empty() {
        if io::stdin().is_terminal() {
            return Err("no input files and stdin is a terminal".into());
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        let mut combined = String::new();
        for path in &args.files {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
            combined.push_str(&content);
        }
        combined
    };

    // Parse; diagnostics have already been rendered to stderr on failure.
    let value = Value::try_parse(&input).map_err(|_| "input is not valid JSON")?;

    if args.check {
        return Ok(());
    }

    let mut output = if args.compact {
        value.dump(0, ' ')
    } else if args.tabs {
        value.dump(1, '\t')
    } else {
        value.dump(args.indent, ' ')
    };
    output.push('\n');

    if let Some(path) = args.output {
        fs::write(&path, &output)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?;
    } else {
        io::stdout().write_all(output.as_bytes())?;
    }

    Ok(())
}
