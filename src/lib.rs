extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{
    CollisionPolicy, FactoringKind, Grammar, ParseError, Production, Symbol, TransformError,
    TransformOptions,
};

/// Removes immediate left recursion; see [`Grammar::eliminate_left_recursion_with`].
pub fn eliminate(grammar: &Grammar) -> Result<Grammar, TransformError> {
    grammar.eliminate_left_recursion()
}

/// Left factors with the shared-helper strategy; see [`Grammar::left_factor_by`].
pub fn factor(grammar: &Grammar) -> Result<Grammar, TransformError> {
    grammar.left_factor()
}

fn json_error(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

fn transform_to_json(
    grammar: &str,
    options: &str,
    transform: impl Fn(&Grammar, &TransformOptions) -> Result<Grammar, TransformError>,
) -> String {
    let options: TransformOptions = if options.trim().is_empty() {
        TransformOptions::default()
    } else {
        match serde_json::from_str(options) {
            Ok(o) => o,
            Err(e) => return json_error(e),
        }
    };
    let g = match crate::Grammar::parse(grammar) {
        Ok(g) => g,
        Err(e) => return json_error(e),
    };
    match transform(&g, &options) {
        Ok(g) => g
            .to_production_output_vec()
            .to_json()
            .unwrap_or_else(json_error),
        Err(e) => json_error(e),
    }
}

#[wasm_bindgen]
pub fn eliminate_left_recursion_to_json(grammar: &str, options: &str) -> String {
    transform_to_json(grammar, options, Grammar::eliminate_left_recursion_with)
}

#[wasm_bindgen]
pub fn left_factor_to_json(grammar: &str, options: &str) -> String {
    transform_to_json(grammar, options, Grammar::left_factor_with)
}

#[cfg(test)]
mod parse_tests {
    use crate::grammar::EPSILON;

    #[test]
    fn simple_parse() {
        let g = crate::Grammar::parse("S -> a").unwrap();

        assert_eq!(g.len(), 1);
        assert_eq!(g.productions("S").unwrap()[0].as_str(), "a");
    }

    #[test]
    fn simple_parse_with_space_and_newline() {
        let g = crate::Grammar::parse("  S -> a \n | b c\n | ε").unwrap();
        let s = g.productions("S").unwrap();

        assert_eq!(s[0].as_str(), "a");
        assert_eq!(s[1].as_str(), "bc");
        assert_eq!(s[2].as_str(), EPSILON);
        assert!(s[2].is_epsilon());
    }

    #[test]
    fn empty_parse() {
        let g = crate::Grammar::parse("  \n  ").unwrap();
        assert!(g.is_empty());
    }

    #[test]
    #[should_panic]
    fn two_rightarrows_parse() {
        let _g = crate::Grammar::parse("S -> a -> b").unwrap();
    }

    #[test]
    #[should_panic]
    fn no_left_parse() {
        let _g = crate::Grammar::parse("-> a").unwrap();
    }

    #[test]
    #[should_panic]
    fn no_previous_left_parse() {
        let _g = crate::Grammar::parse("| a b\n S -> a").unwrap();
    }

    #[test]
    #[should_panic]
    fn left_contain_space() {
        let _g = crate::Grammar::parse("S a S -> x").unwrap();
    }
}
