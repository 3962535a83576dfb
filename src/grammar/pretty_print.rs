use crowbook_text_processing::escape;
use serde::Serialize;

use super::{Grammar, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<&'a str>,
}

impl ProductionOutput<'_> {
    /// `A -> x | y | `, every alternative followed by a separator.
    pub fn to_plaintext(&self) -> String {
        let mut output = format!("{} -> ", self.left);
        for right in &self.rights {
            output.push_str(right);
            output.push_str(" | ");
        }
        output
    }

    /// One row of a LaTeX `array`.
    pub fn to_latex(&self) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = format!("{} & \\rightarrow &", escape::tex(self.left));
        let right = self
            .rights
            .iter()
            .map(|right| escape::tex(*right).into_owned())
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.productions
            .iter()
            .map(|p| p.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|p| p.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Grammar {
    /// Rendering view in the grammar's stored order.
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .map(|(left, rights)| ProductionOutput {
                left,
                rights: rights.iter().map(|p| p.as_str()).collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::Grammar;

    #[test]
    fn plaintext_trails_separator() {
        let g = Grammar::parse("S -> bS'\nS' -> aS' | ε").unwrap();
        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            "S -> bS' | \nS' -> aS' | ε | "
        );
    }

    #[test]
    fn latex_spells_epsilon() {
        let g = Grammar::parse("A' -> b | ε").unwrap();
        let latex = g.to_production_output_vec().to_latex();

        assert!(latex.starts_with("\\[\\begin{array}{cll}"));
        assert!(latex.contains("\\mid \\epsilon"));
        assert!(!latex.contains(crate::grammar::EPSILON));
    }

    #[test]
    fn latex_epsilon_is_separated() {
        let g = Grammar::parse("B -> Bx | ε").unwrap();
        let latex = g
            .eliminate_left_recursion()
            .unwrap()
            .to_production_output_vec()
            .to_latex();

        assert!(latex.contains("\\epsilon B"));
        assert!(!latex.contains("\\epsilonB"));
    }

    #[test]
    fn json_shape() {
        let g = Grammar::parse("A -> aA'\nA' -> B | C").unwrap();
        assert_eq!(
            g.to_production_output_vec().to_json().unwrap(),
            r#"{"productions":[{"left":"A","rights":["aA'"]},{"left":"A'","rights":["B","C"]}]}"#
        );
    }
}
