use std::io::{BufRead, Write};

use log::debug;

use super::{parse::parse_production, Grammar, ParseError, ParseErrorKind};

pub const SENTINEL: &str = "end";

/// Builds a grammar by prompting for one non-terminal and its `|`-separated
/// productions at a time, until `end` or end of input.
pub fn read_grammar<R: BufRead, W: Write>(input: R, mut output: W) -> Result<Grammar, ParseError> {
    let mut g = Grammar::new();
    let mut lines = input.lines();
    let mut line_no = 0;

    let io_err = |line, e: std::io::Error| ParseError {
        line,
        kind: ParseErrorKind::Io(e.to_string()),
    };

    writeln!(output, "Enter the grammar:").map_err(|e| io_err(0, e))?;
    writeln!(
        output,
        "For each non-terminal, enter its productions separated by '|'. Example: S -> aSb | abS"
    )
    .map_err(|e| io_err(0, e))?;

    loop {
        write!(output, "Enter a non-terminal (or type '{}' to finish): ", SENTINEL)
            .and_then(|_| output.flush())
            .map_err(|e| io_err(line_no, e))?;
        let name = match lines.next() {
            Some(line) => line.map_err(|e| io_err(line_no + 1, e))?,
            None => break,
        };
        line_no += 1;

        let name = name.trim();
        if name == SENTINEL {
            break;
        }
        if name.is_empty() {
            return Err(ParseError {
                line: line_no,
                kind: ParseErrorKind::EmptyLeft,
            });
        }
        if name.split_whitespace().count() != 1 {
            return Err(ParseError {
                line: line_no,
                kind: ParseErrorKind::LeftContainsWhitespace,
            });
        }

        write!(output, "Enter productions for {} (separate with '|' ): ", name)
            .and_then(|_| output.flush())
            .map_err(|e| io_err(line_no, e))?;
        let rights = match lines.next() {
            Some(line) => line.map_err(|e| io_err(line_no + 1, e))?,
            None => String::new(),
        };
        line_no += 1;

        if rights.trim().is_empty() {
            debug!("{}: no productions given, skipping", name);
            continue;
        }
        for right in rights.split('|') {
            g.add_production(name, parse_production(right));
        }
    }

    Ok(g)
}
