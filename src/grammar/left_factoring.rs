use std::collections::BTreeMap;

use log::{debug, trace};
use serde::Deserialize;

use super::{
    grammar::split_production,
    naming::{fresh_name, prime_name, PrimeNamer},
    Grammar, Production, Symbol, TransformError, TransformOptions,
};

/// Residuals of a non-terminal's productions, keyed by their leading symbol.
/// Groups iterate in symbol order, residuals in input order.
pub type PrefixGroups = BTreeMap<Symbol, Vec<Production>>;

pub fn group_by_prefix(
    name: &str,
    productions: &[Production],
) -> Result<PrefixGroups, TransformError> {
    let mut groups = PrefixGroups::new();
    for (i, production) in productions.iter().enumerate() {
        let (head, residual) = split_production(name, i, production)?;
        groups.entry(head).or_default().push(residual);
    }
    Ok(groups)
}

pub struct FactoringContext<'a> {
    pub input: &'a Grammar,
    pub namer: PrimeNamer<'a>,
}

/// Rewrites one non-terminal given its prefix groups, writing into `output`.
pub trait FactoringStrategy {
    fn factor(
        &self,
        ctx: &FactoringContext,
        name: &str,
        productions: &[Production],
        groups: PrefixGroups,
        output: &mut Grammar,
    ) -> Result<(), TransformError>;
}

/// Every prefix group points at one shared `A'`, which collects the residuals
/// of all groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedHelper;

impl FactoringStrategy for SharedHelper {
    fn factor(
        &self,
        ctx: &FactoringContext,
        name: &str,
        productions: &[Production],
        groups: PrefixGroups,
        output: &mut Grammar,
    ) -> Result<(), TransformError> {
        if groups.len() <= 1 && groups.values().all(|residuals| residuals.len() <= 1) {
            output.extend_productions(name, productions.iter().cloned());
            return Ok(());
        }

        let name_prime = ctx.namer.name_for(name)?;
        debug!(
            "{}: {} prefix group(s), introducing {}",
            name,
            groups.len(),
            name_prime
        );

        output.add_non_terminal(name);
        let mut residuals = Vec::new();
        for (prefix, group) in groups {
            let production = Production::from(prefix).followed_by(&name_prime);
            trace!("{} -> {}", name, production);
            output.add_production(name, production);
            residuals.extend(group);
        }
        for p in &residuals {
            trace!("{} -> {}", name_prime, p);
        }
        output.extend_productions(&name_prime, residuals);
        Ok(())
    }
}

/// One helper per prefix group that has something to share; groups with a
/// single production are kept as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerPrefixHelper;

impl FactoringStrategy for PerPrefixHelper {
    fn factor(
        &self,
        ctx: &FactoringContext,
        name: &str,
        productions: &[Production],
        groups: PrefixGroups,
        output: &mut Grammar,
    ) -> Result<(), TransformError> {
        if groups.values().all(|residuals| residuals.len() <= 1) {
            output.extend_productions(name, productions.iter().cloned());
            return Ok(());
        }

        output.add_non_terminal(name);
        for (prefix, group) in groups {
            if let [residual] = group.as_slice() {
                output.add_production(name, Production::from(prefix).followed_by(residual.as_str()));
                continue;
            }

            let helper = fresh_name(prime_name(name), |n| {
                ctx.input.contains(n) || output.contains(n)
            });
            debug!("{}: factoring prefix {} into {}", name, prefix, helper);
            output.add_production(name, Production::from(prefix).followed_by(&helper));
            output.extend_productions(
                &helper,
                group.into_iter().map(|residual| {
                    if residual.is_empty() {
                        Production::epsilon()
                    } else {
                        residual
                    }
                }),
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FactoringKind {
    #[default]
    Shared,
    PerPrefix,
}

impl FactoringKind {
    pub fn strategy(self) -> &'static dyn FactoringStrategy {
        match self {
            FactoringKind::Shared => &SharedHelper,
            FactoringKind::PerPrefix => &PerPrefixHelper,
        }
    }
}

impl Grammar {
    pub fn left_factor(&self) -> Result<Grammar, TransformError> {
        self.left_factor_with(&TransformOptions::default())
    }

    pub fn left_factor_with(&self, options: &TransformOptions) -> Result<Grammar, TransformError> {
        self.left_factor_by(options.factoring.strategy(), options)
    }

    /// Groups each non-terminal's productions by leading symbol and lets
    /// `strategy` rewrite it. The result is keyed in lexicographic order.
    pub fn left_factor_by(
        &self,
        strategy: &dyn FactoringStrategy,
        options: &TransformOptions,
    ) -> Result<Grammar, TransformError> {
        let ctx = FactoringContext {
            input: self,
            namer: PrimeNamer::new(self, options.collision),
        };
        let mut g = Grammar::new();

        for (name, productions) in self.sorted_non_terminal_iter() {
            let groups = group_by_prefix(name, productions)?;
            strategy.factor(&ctx, name, productions, groups, &mut g)?;
        }

        Ok(g.sorted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::CollisionPolicy;

    fn prods(g: &Grammar, name: &str) -> Vec<String> {
        g.productions(name)
            .unwrap()
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn common_prefix() {
        let g: Grammar = [("A", vec!["aB", "aC"])].into_iter().collect();
        let f = g.left_factor().unwrap();

        assert_eq!(prods(&f, "A"), vec!["aA'"]);
        assert_eq!(prods(&f, "A'"), vec!["B", "C"]);
    }

    #[test]
    fn distinct_prefixes_still_group() {
        let g: Grammar = [("A", vec!["cC", "aB"])].into_iter().collect();
        let f = g.left_factor().unwrap();

        assert_eq!(prods(&f, "A"), vec!["aA'", "cA'"]);
        assert_eq!(prods(&f, "A'"), vec!["B", "C"]);
    }

    #[test]
    fn residuals_share_one_helper() {
        let g: Grammar = [("S", vec!["iEtS", "iEtSeS", "a", "b"])].into_iter().collect();
        let f = g.left_factor().unwrap();

        assert_eq!(prods(&f, "S"), vec!["aS'", "bS'", "iS'"]);
        assert_eq!(prods(&f, "S'"), vec!["", "", "EtS", "EtSeS"]);
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn single_production_is_unchanged_and_stable() {
        let g: Grammar = [("A", vec!["aB"]), ("B", vec!["b"])].into_iter().collect();
        let once = g.left_factor().unwrap();
        let twice = once.left_factor().unwrap();

        assert_eq!(once, g);
        assert_eq!(twice, once);
    }

    #[test]
    fn output_is_sorted() {
        let g: Grammar = [("T", vec!["ab", "ac"]), ("B", vec!["x", "y"]), ("C", vec!["c"])]
            .into_iter()
            .collect();
        let f = g.left_factor().unwrap();
        let names = f.non_terminal_iter().map(|(n, _)| n).collect::<Vec<_>>();

        assert_eq!(names, vec!["B", "B'", "C", "T", "T'"]);
        assert_eq!(prods(&f, "B"), vec!["xB'", "yB'"]);
        assert_eq!(prods(&f, "T'"), vec!["b", "c"]);
    }

    #[test]
    fn empty_production_is_malformed() {
        let g: Grammar = [("A", vec!["aB", ""])].into_iter().collect();

        assert!(matches!(
            g.left_factor(),
            Err(TransformError::MalformedProduction { index: 1, .. })
        ));
        assert!(matches!(
            g.left_factor_with(&TransformOptions::default().with_factoring(FactoringKind::PerPrefix)),
            Err(TransformError::MalformedProduction { index: 1, .. })
        ));
    }

    #[test]
    fn collision_policy_applies() {
        let g: Grammar = [("A", vec!["aB", "aC"]), ("A'", vec!["x"])]
            .into_iter()
            .collect();

        assert!(matches!(
            g.left_factor(),
            Err(TransformError::IdentifierCollision { .. })
        ));

        let merged = g
            .left_factor_with(&TransformOptions::default().with_collision(CollisionPolicy::Merge))
            .unwrap();
        assert_eq!(prods(&merged, "A"), vec!["aA'"]);
        assert_eq!(prods(&merged, "A'"), vec!["B", "C", "x"]);
    }

    #[test]
    fn per_prefix_helpers() {
        let g: Grammar = [("S", vec!["iEtS", "iEtSeS", "a", "bc", "bd"])]
            .into_iter()
            .collect();
        let options = TransformOptions::default().with_factoring(FactoringKind::PerPrefix);
        let f = g.left_factor_with(&options).unwrap();

        assert_eq!(prods(&f, "S"), vec!["a", "bS'", "iS''"]);
        assert_eq!(prods(&f, "S'"), vec!["c", "d"]);
        assert_eq!(prods(&f, "S''"), vec!["EtS", "EtSeS"]);
    }

    #[test]
    fn per_prefix_keeps_unshared_alternatives() {
        let g: Grammar = [("A", vec!["cC", "aB"])].into_iter().collect();
        let options = TransformOptions::default().with_factoring(FactoringKind::PerPrefix);

        assert_eq!(g.left_factor_with(&options).unwrap(), g);
    }

    #[test]
    fn per_prefix_avoids_existing_names() {
        let g: Grammar = [("A", vec!["a", "ab"]), ("A'", vec!["x"])]
            .into_iter()
            .collect();
        let options = TransformOptions::default().with_factoring(FactoringKind::PerPrefix);
        let f = g.left_factor_with(&options).unwrap();

        assert_eq!(prods(&f, "A"), vec!["aA''"]);
        assert_eq!(prods(&f, "A''"), vec!["ε", "b"]);
        assert_eq!(prods(&f, "A'"), vec!["x"]);
    }
}
