use crate::grammar::{Grammar, ParseError, ParseErrorKind, Production};

/// Drops whitespace inside an alternative; every symbol is one character.
pub fn parse_production(right: &str) -> Production {
    Production::new(right.chars().filter(|c| !c.is_whitespace()).collect::<String>())
}

impl Grammar {
    /// Parses lines of the form `A -> x | y`. A line starting with `|`
    /// continues the previous left side. Empty alternatives are kept so the
    /// transformations can report them.
    pub fn parse(grammar: &str) -> Result<Self, ParseError> {
        let mut g = Self::new();

        let mut previous_left: Option<&str> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let err = |kind| ParseError { line: i + 1, kind };

            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(err(ParseErrorKind::TooManyArrows));
            }
            let (left, rights): (&str, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(err(ParseErrorKind::EmptyLeft));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(err(ParseErrorKind::LeftContainsWhitespace));
                }
                (left_str, parts[1].trim())
            } else if let Some(left) = previous_left {
                let continued = parts[0].trim();
                match continued.strip_prefix('|') {
                    Some(rest) => (left, rest.trim()),
                    None => return Err(err(ParseErrorKind::MissingLeft)),
                }
            } else {
                return Err(err(ParseErrorKind::MissingLeft));
            };

            previous_left = Some(left);

            g.add_non_terminal(left);
            for right in rights.split('|') {
                g.add_production(left, parse_production(right));
            }
        }

        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::{Grammar, ParseErrorKind};

    fn prods(g: &Grammar, name: &str) -> Vec<String> {
        g.productions(name)
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn continuation_lines() {
        let g = Grammar::parse("E -> E+T | T\n  | (E)\n\nT -> a").unwrap();

        assert_eq!(prods(&g, "E"), vec!["E+T", "T", "(E)"]);
        assert_eq!(prods(&g, "T"), vec!["a"]);
    }

    #[test]
    fn inner_whitespace_is_dropped() {
        let g = Grammar::parse("S -> a S b | ε").unwrap();
        assert_eq!(prods(&g, "S"), vec!["aSb", "ε"]);
    }

    #[test]
    fn repeated_left_appends() {
        let g = Grammar::parse("S -> a\nB -> b\nS -> c").unwrap();
        let names = g.non_terminal_iter().map(|(n, _)| n).collect::<Vec<_>>();

        assert_eq!(names, vec!["S", "B"]);
        assert_eq!(prods(&g, "S"), vec!["a", "c"]);
    }

    #[test]
    fn empty_alternative_is_kept() {
        let g = Grammar::parse("S -> a |").unwrap();
        assert_eq!(prods(&g, "S"), vec!["a", ""]);
    }

    #[test]
    fn errors_carry_line() {
        let e = Grammar::parse("S -> a\nS -> a -> b").unwrap_err();
        assert_eq!(e.line, 2);
        assert_eq!(e.kind, ParseErrorKind::TooManyArrows);
        assert_eq!(e.to_string(), "Line 2: too many \"->\"");
    }
}
