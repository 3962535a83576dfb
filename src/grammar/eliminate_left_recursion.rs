use log::{debug, trace};

use super::{
    grammar::split_production, naming::PrimeNamer, Grammar, Production, Symbol, TransformError,
    TransformOptions,
};

impl Grammar {
    pub fn eliminate_left_recursion(&self) -> Result<Grammar, TransformError> {
        self.eliminate_left_recursion_with(&TransformOptions::default())
    }

    /// Removes immediate left recursion from every non-terminal.
    ///
    /// `A -> Aα | β` becomes `A -> βA'` and `A' -> αA' | ε`. Recursion is
    /// detected by comparing the leading character of each production with
    /// the leading character of `A`, so cycles through other non-terminals
    /// are left in place. The result is keyed in lexicographic order.
    pub fn eliminate_left_recursion_with(
        &self,
        options: &TransformOptions,
    ) -> Result<Grammar, TransformError> {
        let namer = PrimeNamer::new(self, options.collision);
        let mut g = Grammar::new();
        let mut helpers: Vec<String> = Vec::new();

        for (name, productions) in self.sorted_non_terminal_iter() {
            let leading = Symbol::leading_of(name);

            let mut recursive_productions: Vec<Production> = Vec::new();
            let mut other_productions: Vec<Production> = Vec::new();
            for (i, production) in productions.iter().enumerate() {
                let (head, residual) = split_production(name, i, production)?;
                if Some(head) == leading {
                    recursive_productions.push(residual);
                } else {
                    other_productions.push(production.clone());
                }
            }

            if recursive_productions.is_empty() {
                g.extend_productions(name, other_productions);
                continue;
            }

            let name_prime = namer.name_for(name)?;
            debug!(
                "{}: {} left recursive production(s), introducing {}",
                name,
                recursive_productions.len(),
                name_prime
            );

            let rewritten = other_productions
                .iter()
                .map(|p| p.followed_by(&name_prime))
                .collect::<Vec<_>>();
            for p in &rewritten {
                trace!("{} -> {}", name, p);
            }
            g.add_non_terminal(name);
            g.extend_productions(name, rewritten);

            let tails = recursive_productions
                .iter()
                .map(|p| p.followed_by(&name_prime))
                .collect::<Vec<_>>();
            for p in &tails {
                trace!("{} -> {}", name_prime, p);
            }
            g.extend_productions(&name_prime, tails);
            helpers.push(name_prime);
        }

        // A merged helper may already hold alternatives of its own, ε included.
        // Every helper ends with exactly one ε.
        for helper in &helpers {
            if let Some(alternatives) = g.productions_mut(helper) {
                alternatives.retain(|p| !p.is_epsilon());
                alternatives.push(Production::epsilon());
            }
        }

        Ok(g.sorted())
    }
}
