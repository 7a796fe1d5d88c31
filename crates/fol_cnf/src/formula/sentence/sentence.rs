use std::{
    convert::Infallible,
    fmt,
    ops::{BitAnd, BitOr, Shr},
    sync::Arc,
};

use hashbrown::HashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utils::implvec;

use crate::formula::{
    manipulation::{CaptureError, OneVarSubst, Substitution},
    term::Term,
    variable::Variable,
};

use super::{EmptyOperands, Operands, Predicate, Subformulas};

pub type ASentence = Arc<Sentence>;

/// A first-order sentence
///
/// `And`, `Or` and `Iff` don't care about the order nor the multiplicity of
/// their operands. Everything is immutable, transformations build new trees
/// sharing the unchanged parts.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
pub enum Sentence {
    Predicate(Predicate),
    Not(ASentence),
    And(Operands),
    Or(Operands),
    Implies(ASentence, ASentence),
    /// Built from two operands, only one remains when they are equal
    Iff(Operands),
    ForAll(Variable, ASentence),
    Exists(Variable, ASentence),
}

pub fn predicate<T>(name: impl Into<Arc<str>>, args: impl IntoIterator<Item = T>) -> Sentence
where
    T: Into<Term>,
{
    Sentence::Predicate(Predicate::new(name, args))
}

pub fn not(s: impl Into<ASentence>) -> Sentence {
    Sentence::Not(s.into())
}

pub fn ands(args: implvec!(Sentence)) -> Result<Sentence, EmptyOperands> {
    Ok(Sentence::And(Operands::new(args)?))
}

pub fn ors(args: implvec!(Sentence)) -> Result<Sentence, EmptyOperands> {
    Ok(Sentence::Or(Operands::new(args)?))
}

pub fn implies(a: impl Into<ASentence>, b: impl Into<ASentence>) -> Sentence {
    Sentence::Implies(a.into(), b.into())
}

pub fn iff(a: Sentence, b: Sentence) -> Sentence {
    Sentence::Iff(Operands::pair(a, b))
}

pub fn forall(var: Variable, body: impl Into<ASentence>) -> Sentence {
    Sentence::ForAll(var, body.into())
}

pub fn exists(var: Variable, body: impl Into<ASentence>) -> Sentence {
    Sentence::Exists(var, body.into())
}

/// Nested universal quantifiers, the first variable is the outermost one
pub fn foralls(vars: implvec!(Variable), body: Sentence) -> Sentence {
    vars.into_iter()
        .collect_vec()
        .into_iter()
        .rev()
        .fold(body, |body, v| forall(v, body))
}

/// Nested existential quantifiers, the first variable is the outermost one
pub fn existss(vars: implvec!(Variable), body: Sentence) -> Sentence {
    vars.into_iter()
        .collect_vec()
        .into_iter()
        .rev()
        .fold(body, |body, v| exists(v, body))
}

impl Sentence {
    /// The direct subformulas
    pub fn children(&self) -> impl Iterator<Item = &Sentence> {
        let (operands, first, second): (&[Sentence], Option<&Sentence>, Option<&Sentence>) =
            match self {
                Sentence::Predicate(_) => (&[], None, None),
                Sentence::Not(s) | Sentence::ForAll(_, s) | Sentence::Exists(_, s) => {
                    (&[], Some(s.as_ref()), None)
                }
                Sentence::And(ops) | Sentence::Or(ops) | Sentence::Iff(ops) => {
                    (ops.as_slice(), None, None)
                }
                Sentence::Implies(a, b) => (&[], Some(a.as_ref()), Some(b.as_ref())),
            };
        operands.iter().chain(first).chain(second)
    }

    /// Rebuilds `self` with `f` applied to its direct subformulas
    ///
    /// This is the default case of every structural recursion on sentences.
    pub fn try_map_children<E, F>(&self, mut f: F) -> Result<Sentence, E>
    where
        F: FnMut(&Sentence) -> Result<Sentence, E>,
    {
        Ok(match self {
            Sentence::Predicate(_) => self.clone(),
            Sentence::Not(s) => Sentence::Not(f(s.as_ref())?.into()),
            Sentence::And(ops) => Sentence::And(ops.try_map(&mut f)?),
            Sentence::Or(ops) => Sentence::Or(ops.try_map(&mut f)?),
            Sentence::Iff(ops) => Sentence::Iff(ops.try_map(&mut f)?),
            Sentence::Implies(a, b) => {
                let a = f(a.as_ref())?;
                Sentence::Implies(a.into(), f(b.as_ref())?.into())
            }
            Sentence::ForAll(v, s) => Sentence::ForAll(v.clone(), f(s.as_ref())?.into()),
            Sentence::Exists(v, s) => Sentence::Exists(v.clone(), f(s.as_ref())?.into()),
        })
    }

    /// Infallible [Sentence::try_map_children]
    pub fn map_children<F>(&self, mut f: F) -> Sentence
    where
        F: FnMut(&Sentence) -> Sentence,
    {
        match self.try_map_children(|s| Ok::<_, Infallible>(f(s))) {
            Ok(s) => s,
            Err(e) => match e {},
        }
    }

    /// Same quantifier as `self` (a universal one if `self` isn't a quantifier)
    pub(crate) fn quantified(&self, var: Variable, body: Sentence) -> Sentence {
        match self {
            Sentence::Exists(..) => exists(var, body),
            _ => forall(var, body),
        }
    }

    /// Builds a flat conjunction, collapsing it if only one operand is left
    pub(crate) fn and_flat(ops: &Operands) -> Sentence {
        let ops = ops.flattened(Sentence::as_and);
        match ops.single() {
            Some(s) => s.clone(),
            None => Sentence::And(ops),
        }
    }

    /// Builds a flat disjunction, collapsing it if only one operand is left
    pub(crate) fn or_flat(ops: &Operands) -> Sentence {
        let ops = ops.flattened(Sentence::as_or);
        match ops.single() {
            Some(s) => s.clone(),
            None => Sentence::Or(ops),
        }
    }

    pub fn free_variables(&self) -> HashSet<Variable> {
        let mut set = HashSet::new();
        self.collect_free_variables(&mut set);
        set
    }

    fn collect_free_variables(&self, set: &mut HashSet<Variable>) {
        match self {
            Sentence::Predicate(p) => p.collect_free_variables(set),
            Sentence::ForAll(v, body) | Sentence::Exists(v, body) => {
                let mut inner = body.free_variables();
                inner.remove(v);
                set.extend(inner)
            }
            _ => {
                for child in self.children() {
                    child.collect_free_variables(set)
                }
            }
        }
    }

    pub fn has_free_variable(&self, var: &Variable) -> bool {
        match self {
            Sentence::Predicate(p) => p.has_free_variable(var),
            Sentence::ForAll(v, body) | Sentence::Exists(v, body) => {
                v != var && body.has_free_variable(var)
            }
            _ => self.children().any(|c| c.has_free_variable(var)),
        }
    }

    /// Every variable bound by some quantifier
    pub fn bound_variables(&self) -> HashSet<Variable> {
        self.subformulas()
            .filter_map(|s| match s {
                Sentence::ForAll(v, _) | Sentence::Exists(v, _) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// Structural containment, a sentence contains itself
    pub fn contains(&self, other: &Sentence) -> bool {
        self.subformulas().any(|s| s == other)
    }

    /// Whether `term` occurs in the arguments of some atom
    pub fn contains_term(&self, term: &Term) -> bool {
        self.subformulas().any(|s| match s {
            Sentence::Predicate(p) => p.contains_term(term),
            _ => false,
        })
    }

    /// Applies `subst` to every atom
    ///
    /// Fails when a quantifier binds one of the keys of `subst`, see
    /// [Sentence::substitute_avoiding_capture] for a total version.
    pub fn substitute<S: Substitution + ?Sized>(&self, subst: &S) -> Result<Sentence, CaptureError> {
        match self {
            Sentence::Predicate(p) => Ok(Sentence::Predicate(p.substitute(subst))),
            Sentence::ForAll(v, _) | Sentence::Exists(v, _) if subst.contains(v) => {
                Err(CaptureError {
                    variable: v.clone(),
                })
            }
            _ => self.try_map_children(|s| s.substitute(subst)),
        }
    }

    /// Applies `subst`, renaming the quantified variables that would get in
    /// the way
    ///
    /// A binder is renamed when it is a key of `subst` or when it occurs in a
    /// term that gets substituted in its body.
    pub fn substitute_avoiding_capture<S: Substitution + ?Sized>(&self, subst: &S) -> Sentence {
        match self {
            Sentence::Predicate(p) => Sentence::Predicate(p.substitute(subst)),
            Sentence::ForAll(v, body) | Sentence::Exists(v, body) => {
                let captures = subst.contains(v)
                    || subst
                        .iter()
                        .any(|(k, t)| t.contains_variable(v) && body.has_free_variable(k));
                if captures {
                    let fresh = v.renamed();
                    let renaming = OneVarSubst::new(v.clone(), fresh.clone().into_term());
                    let body = body
                        .substitute_avoiding_capture(&renaming)
                        .substitute_avoiding_capture(subst);
                    self.quantified(fresh, body)
                } else {
                    self.quantified(v.clone(), body.substitute_avoiding_capture(subst))
                }
            }
            _ => self.map_children(|s| s.substitute_avoiding_capture(subst)),
        }
    }

    /// Every subformula, `self` included, depth first
    pub fn subformulas(&self) -> impl Iterator<Item = &Sentence> {
        self.subformulas_with_depth().map(|(_, s)| s)
    }

    /// [Sentence::subformulas] along with their depth (`self` is at depth 0)
    pub fn subformulas_with_depth(&self) -> Subformulas<'_> {
        Subformulas::new(self)
    }

    /// Number of nodes (atoms count for one)
    pub fn size(&self) -> usize {
        self.subformulas().count()
    }

    /// Length of the longest branch, an atom has depth 1
    pub fn depth(&self) -> u32 {
        self.subformulas_with_depth()
            .map(|(d, _)| d + 1)
            .max()
            .unwrap_or(1)
    }

    pub fn is_quantifier_free(&self) -> bool {
        self.subformulas().all(|s| !s.is_quantifier())
    }

    /// Number of disjunctions having a conjunction among their operands
    pub fn or_over_and_count(&self) -> usize {
        self.subformulas()
            .filter(|s| matches!(s, Sentence::Or(ops) if ops.iter().any(Sentence::is_and)))
            .count()
    }

    /// A conjunction of disjunctions of literals (any level may be collapsed)
    pub fn is_cnf(&self) -> bool {
        fn is_clause(s: &Sentence) -> bool {
            match s {
                Sentence::Or(ops) => ops.iter().all(Sentence::is_literal),
                _ => s.is_literal(),
            }
        }
        match self {
            Sentence::And(ops) => ops.iter().all(is_clause),
            _ => is_clause(self),
        }
    }

    /// An atom or a negated atom
    pub fn is_literal(&self) -> bool {
        match self {
            Sentence::Predicate(_) => true,
            Sentence::Not(s) => s.is_predicate(),
            _ => false,
        }
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(self, Sentence::ForAll(..) | Sentence::Exists(..))
    }

    /// Returns `true` if the sentence is [`Predicate`].
    ///
    /// [`Predicate`]: Sentence::Predicate
    #[must_use]
    pub fn is_predicate(&self) -> bool {
        matches!(self, Self::Predicate(..))
    }

    /// Returns `true` if the sentence is [`And`].
    ///
    /// [`And`]: Sentence::And
    #[must_use]
    pub fn is_and(&self) -> bool {
        matches!(self, Self::And(..))
    }

    /// Returns `true` if the sentence is [`Or`].
    ///
    /// [`Or`]: Sentence::Or
    #[must_use]
    pub fn is_or(&self) -> bool {
        matches!(self, Self::Or(..))
    }

    pub fn as_predicate(&self) -> Option<&Predicate> {
        if let Self::Predicate(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_and(&self) -> Option<&Operands> {
        if let Self::And(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_or(&self) -> Option<&Operands> {
        if let Self::Or(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl From<Predicate> for Sentence {
    fn from(value: Predicate) -> Self {
        Sentence::Predicate(value)
    }
}

impl BitAnd for Sentence {
    type Output = Sentence;

    fn bitand(self, rhs: Self) -> Self::Output {
        Sentence::And(Operands::pair(self, rhs))
    }
}

impl BitOr for Sentence {
    type Output = Sentence;

    fn bitor(self, rhs: Self) -> Self::Output {
        Sentence::Or(Operands::pair(self, rhs))
    }
}

impl std::ops::Not for Sentence {
    type Output = Sentence;

    fn not(self) -> Self::Output {
        not(self)
    }
}

/// `a >> b` is `a => b`
impl Shr for Sentence {
    type Output = Sentence;

    fn shr(self, rhs: Self) -> Self::Output {
        implies(self, rhs)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentence::Predicate(p) => p.fmt(f),
            Sentence::Not(s) => write!(f, "¬{s}"),
            Sentence::And(ops) => write!(f, "({})", ops.iter().join(" ∧ ")),
            Sentence::Or(ops) => write!(f, "({})", ops.iter().join(" ∨ ")),
            Sentence::Implies(a, b) => write!(f, "({a} => {b})"),
            Sentence::Iff(ops) => match ops.single() {
                Some(s) => write!(f, "({s} <=> {s})"),
                None => write!(f, "({})", ops.iter().join(" <=> ")),
            },
            Sentence::ForAll(v, s) => write!(f, "∀ {v} [{s}]"),
            Sentence::Exists(v, s) => write!(f, "∃ {v} [{s}]"),
        }
    }
}
