use std::convert::Infallible;

use log::{debug, warn};

use crate::{
    environement::Environement,
    error::{BaseError, Result},
    formula::sentence::{Operands, Sentence},
};

impl Sentence {
    /// Distributes `∨` over `∧` until no disjunction has a conjunction as
    /// operand
    ///
    /// `∧` and `∨` get flattened on the way.
    pub fn distributed(&self) -> Sentence {
        match fixpoint(self, &mut |_: usize| Ok::<_, Infallible>(())) {
            Ok(s) => s,
            Err(e) => match e {},
        }
    }

    /// [Sentence::distributed] under the size limit of `env`
    pub fn distributed_with(&self, env: &Environement) -> Result<Sentence> {
        let result = fixpoint(self, &mut |size: usize| env.check_size(size))?;
        match result.or_over_and_count() {
            0 => Ok(result),
            remaining => Err(BaseError::DistributionStalled { remaining }.into()),
        }
    }
}

/// Runs [rewrite] until the number of disjunctions over conjunctions drops to
/// zero or stops decreasing
fn fixpoint<E, G>(sentence: &Sentence, guard: &mut G) -> std::result::Result<Sentence, E>
where
    G: FnMut(usize) -> std::result::Result<(), E>,
{
    let mut current = sentence.clone();
    let mut measure = current.or_over_and_count();
    let mut pass = 0;
    loop {
        pass += 1;
        let next = rewrite(&current, guard)?;
        guard(next.size())?;
        let next_measure = next.or_over_and_count();
        debug!("distribution pass {pass}: {measure} -> {next_measure}");
        if next_measure == 0 {
            return Ok(next);
        }
        if next_measure >= measure {
            warn!("distribution stalled with {next_measure} disjunctions over conjunctions");
            return Ok(next);
        }
        current = next;
        measure = next_measure;
    }
}

/// Innermost first, every `∧` and `∨` is flattened and every `∨` is pushed
/// below the `∧`s among its operands
fn rewrite<E, G>(sentence: &Sentence, guard: &mut G) -> std::result::Result<Sentence, E>
where
    G: FnMut(usize) -> std::result::Result<(), E>,
{
    match sentence.try_map_children(|child| rewrite(child, guard))? {
        Sentence::And(ops) => Ok(Sentence::and_flat(&ops)),
        Sentence::Or(ops) => distribute_or(&ops, guard),
        s => Ok(s),
    }
}

/// `ops` are already rewritten
fn distribute_or<E, G>(ops: &Operands, guard: &mut G) -> std::result::Result<Sentence, E>
where
    G: FnMut(usize) -> std::result::Result<(), E>,
{
    let flat = ops.flattened(Sentence::as_or);
    let Some((conjunction, conjuncts)) = flat.iter().find_map(|s| Some((s, s.as_and()?))) else {
        return Ok(Sentence::or_flat(&flat));
    };
    guard(distributed_size(&flat))?;
    let distributed =
        conjuncts.try_map(|q| distribute_or(&flat.replaced(conjunction, q.clone()), guard))?;
    Ok(Sentence::and_flat(&distributed))
}

/// Number of nodes of the conjunction `flat` fully distributes into, that is
/// one disjunction of `flat.len()` operands per choice of a conjunct in every
/// `∧` of `flat`
///
/// Saturates at [usize::MAX].
fn distributed_size(flat: &Operands) -> usize {
    let clauses = flat
        .iter()
        .map(|s| s.as_and().map_or(1, |conjuncts| conjuncts.len()))
        .fold(1usize, usize::saturating_mul);
    clauses
        .saturating_mul(flat.len() + 1)
        .saturating_add(1)
}

#[cfg(test)]
mod tests {
    use crate::{
        environement::EnvironementBuilder,
        error::BaseError,
        formula::{
            sentence::{ands, ors, predicate, Sentence},
            term::Term,
        },
    };

    fn p(name: &str) -> Sentence {
        predicate::<Term>(name, [])
    }

    #[test]
    fn or_over_and() {
        let s = p("P") & (p("Q") | (p("R") & p("S")));
        let expected = ands([p("P"), p("Q") | p("R"), p("Q") | p("S")]).unwrap();
        assert_eq!(s.distributed(), expected);
    }

    #[test]
    fn both_sides() {
        let s = (p("A") & p("B")) | (p("C") & p("D"));
        let result = s.distributed();
        let expected = ands([
            p("A") | p("C"),
            p("A") | p("D"),
            p("B") | p("C"),
            p("B") | p("D"),
        ])
        .unwrap();
        assert_eq!(result, expected);
        assert_eq!(result.or_over_and_count(), 0);
    }

    #[test]
    fn nested_and_idempotent() {
        let s = ors([
            p("A"),
            (p("B") | (p("C") & p("D"))) & p("E"),
            p("F") & (p("G") | p("H")),
        ])
        .unwrap();
        let once = s.distributed();
        assert_eq!(once.or_over_and_count(), 0);
        assert!(once.is_cnf());
        assert_eq!(once.distributed(), once);
    }

    #[test]
    fn size_guard() {
        let s = ands([p("A"), p("B"), p("C")]).unwrap() | ands([p("D"), p("E"), p("F")]).unwrap();
        let env = EnvironementBuilder::default().max_size(4).build().unwrap();
        let err = s.distributed_with(&env).unwrap_err();
        assert!(matches!(err.base(), BaseError::TooLarge { .. }));

        let env = EnvironementBuilder::default().build().unwrap();
        assert_eq!(s.distributed_with(&env).unwrap(), s.distributed());
    }

    #[test]
    fn size_guard_on_whole_expansion() {
        // 2^12 clauses of 12 literals, no single step of which is large
        let s = ors((0..12).map(|i| p(&format!("A{i}")) & p(&format!("B{i}")))).unwrap();
        let env = EnvironementBuilder::default().max_size(100).build().unwrap();
        let err = s.distributed_with(&env).unwrap_err();
        assert!(matches!(err.base(), BaseError::TooLarge { limit: 100, .. }));
        let err = s.cnf_with(&env).unwrap_err();
        assert!(matches!(err.base(), BaseError::TooLarge { limit: 100, .. }));

        let small = ors((0..3).map(|i| p(&format!("A{i}")) & p(&format!("B{i}")))).unwrap();
        let result = small.distributed_with(&env).unwrap();
        assert!(result.size() <= 100);
        assert_eq!(result.as_and().map(|c| c.len()), Some(8));
    }

    #[test]
    fn expansion_size_is_exact_for_flat_input() {
        let flat = (p("A") & p("B")) | (p("C") & p("D"));
        let ops = flat.as_or().unwrap();
        // 4 clauses of 2 literals under one ∧
        assert_eq!(super::distributed_size(ops), 4 * 3 + 1);
        assert_eq!(flat.distributed().size(), 4 * 3 + 1);
    }
}
