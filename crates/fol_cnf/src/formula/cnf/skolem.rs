use log::debug;

use crate::{
    environement::Environement,
    error::{BaseError, Result},
    formula::{
        manipulation::OneVarSubst,
        sentence::Sentence,
        symbol::Symbol,
        term::Term,
        variable::Variable,
    },
};

/// Replaces existential quantifiers by skolem functions
///
/// Universal quantifiers are dropped as well, their variables become the
/// arguments of the skolem functions introduced below them.
#[derive(Debug, Clone, Copy)]
pub struct Skolemiser<'a> {
    env: &'a Environement,
}

impl<'a> Skolemiser<'a> {
    pub fn new(env: &'a Environement) -> Self {
        Self { env }
    }

    /// Expects a sentence in negation normal form
    pub fn skolemise(&self, sentence: &Sentence) -> Result<Sentence> {
        if !sentence.is_nnf() {
            return Err(BaseError::Precondition {
                stage: "skolemisation",
                expected: "negation normal form",
            }
            .into());
        }
        self.skolemise_in(sentence, &mut Vec::new())
    }

    /// `scope` holds the universally quantified variables above `sentence`,
    /// outermost first and without repetition
    fn skolemise_in(&self, sentence: &Sentence, scope: &mut Vec<Variable>) -> Result<Sentence> {
        match sentence {
            Sentence::ForAll(v, body) => {
                let pushed = !scope.contains(v);
                if pushed {
                    scope.push(v.clone())
                }
                let result = self.skolemise_in(body, scope);
                if pushed {
                    scope.pop();
                }
                result
            }
            Sentence::Exists(v, body) => {
                let skolem = self.skolem_term(scope);
                debug!("skolemising {v} into {skolem}");
                let subst = OneVarSubst::new(v.clone(), skolem);
                let body = if self.env.is_renaming_binders() {
                    body.substitute_avoiding_capture(&subst)
                } else {
                    body.substitute(&subst)?
                };
                self.skolemise_in(&body, scope)
            }
            _ => sentence.try_map_children(|child| self.skolemise_in(child, scope)),
        }
    }

    fn skolem_term(&self, scope: &[Variable]) -> Term {
        let symbol = Symbol::fresh_skolem(self.env.skolem_prefix().clone());
        Term::fun(symbol, scope)
    }
}

impl Sentence {
    /// [Skolemiser::skolemise] with the default [Environement]
    pub fn skolemised(&self) -> Result<Sentence> {
        self.skolemised_with(&Environement::default())
    }

    pub fn skolemised_with(&self, env: &Environement) -> Result<Sentence> {
        Skolemiser::new(env).skolemise(self)
    }
}
