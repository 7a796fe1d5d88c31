use clap::Parser;
use hashbrown::HashSet;
use utils::assert_traits;

use crate::{
    cli::Args,
    formula::{
        manipulation::{Substitution, VarSubst},
        sentence::{exists, forall, iff, not, ors, predicate, Sentence},
        term::{Function, Term},
        variable::Variable,
    },
    run_from_json, Return,
};

assert_traits!(shareable; [Sentence, Term, Variable, Function, VarSubst, crate::Error]; Send, Sync);

fn p(name: &str) -> Sentence {
    predicate::<Term>(name, [])
}

/// A handful of sentences exercising every connective
fn corpus() -> Vec<Sentence> {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let z = Variable::new("z");
    let px = predicate("P", [&x]);
    let qxy = predicate("Q", [&x, &y]);
    let rz = predicate("R", [Term::fun("f", [&z])]);

    vec![
        p("A"),
        not(not(p("A"))),
        p("A") >> (p("B") >> p("C")),
        iff(p("A"), p("B") & p("C")),
        not(iff(p("A"), not(p("B")))),
        forall(x.clone(), px.clone() >> exists(y.clone(), qxy.clone())),
        exists(
            z.clone(),
            forall(x.clone(), not(px.clone() | rz.clone()) >> qxy.clone()),
        ),
        forall(
            x.clone(),
            forall(
                y.clone(),
                iff(qxy.clone(), not(exists(z.clone(), rz.clone() & px.clone()))),
            ),
        ),
        ors([
            p("A") & p("B"),
            p("C") & (p("D") | (p("E") & p("F"))),
            not(p("G") >> p("H")),
        ])
        .unwrap(),
        // free variables survive
        px.clone() | (qxy.clone() & forall(z.clone(), rz.clone())),
    ]
}

#[test]
fn stages_postconditions() {
    for s in corpus() {
        let simplified = s.simplified();
        assert!(simplified.is_simplified(), "{simplified}");

        let nnf = simplified.negated_inwards(false);
        assert!(nnf.is_nnf(), "{nnf}");

        let skolemised = nnf.skolemised().unwrap();
        assert!(skolemised.is_quantifier_free(), "{skolemised}");

        let cleaned = skolemised.cleaned();
        assert_eq!(cleaned.cleaned(), cleaned);

        let distributed = cleaned.distributed();
        assert_eq!(distributed.or_over_and_count(), 0, "{distributed}");
        assert_eq!(distributed.distributed(), distributed);
        assert!(distributed.is_cnf(), "{distributed}");
    }
}

#[test]
fn cnf_introduces_no_new_variable() {
    for s in corpus() {
        let cnf = s.cnf().unwrap();
        let allowed: HashSet<_> = s
            .free_variables()
            .into_iter()
            .chain(s.bound_variables())
            .collect();
        // universally quantified variables become implicitly quantified ones
        assert!(cnf.free_variables().is_subset(&allowed), "{s} ~> {cnf}");
    }
}

#[test]
fn cnf_of_quantifier_free_keeps_free_variables() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let s = predicate("P", [&x]) >> (predicate("Q", [&y]) & p("R"));
    let cnf = s.cnf().unwrap();
    assert!(cnf.free_variables().is_subset(&s.free_variables()));
    assert_eq!(cnf.free_variables().len(), 2);
}

#[test]
fn unification_is_sound() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let z = Variable::new("z");
    let a = Term::constant("a");
    let pairs = [
        (predicate("P", [&x, &y]), predicate("P", [Term::from(&y), a.clone()])),
        (
            predicate("P", [Term::fun("f", [&x, &y]), Term::from(&z)]),
            predicate("P", [Term::fun("f", [&z, &z]), a.clone()]),
        ),
        (
            not(predicate("Q", [Term::from(&x), Term::fun("g", [&y])])),
            not(predicate("Q", [Term::fun("h", [&z]), Term::fun("g", [a.clone()])])),
        ),
    ];
    for (l, r) in pairs {
        let subst = l.unify(&r).unwrap_or_else(|e| panic!("{l} and {r}: {e}"));
        assert_eq!(
            l.substitute(&subst).unwrap(),
            r.substitute(&subst).unwrap(),
            "{subst}"
        );
        for (v, t) in subst.iter() {
            assert!(
                subst.iter().all(|(_, t)| !t.contains_variable(v)),
                "{v} ↦ {t} is not idempotent"
            );
        }
    }
}

#[test]
fn unification_failures() {
    let x = Variable::new("x");
    let a = Term::constant("a");
    let b = Term::constant("b");
    let failing = [
        (predicate("P", [a.clone()]), predicate("P", [b.clone()])),
        (predicate("P", [&x]), predicate("Q", [&x])),
        (
            predicate("P", [Term::from(&x), Term::from(&x)]),
            predicate("P", [a.clone(), b.clone()]),
        ),
        (predicate("P", [&x]), predicate("P", [Term::fun("f", [&x])])),
        (
            not(predicate("Q", [Term::from(&x), Term::fun("g", [&x])])),
            not(predicate("Q", [Term::fun("h", [&x]), Term::from(&x)])),
        ),
    ];
    for (l, r) in failing {
        assert!(l.unify(&r).is_err(), "{l} and {r} should not unify");
    }
}

#[test]
fn run_cnf_from_json() {
    let x = Variable::new("x");
    let y = Variable::new("y");
    let s = forall(x.clone(), exists(y.clone(), predicate("Loves", [&x, &y])));
    let json = serde_json::to_string(&s).unwrap();

    let args = Args::parse_from(["fol_cnf", "--verify"]);
    let Return::Cnf { cnf, clauses } = run_from_json(&args, &json).unwrap() else {
        panic!("expected a cnf")
    };
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].len(), 1);
    assert!(cnf.has_free_variable(&x));
    assert!(!cnf.has_free_variable(&y));
}

#[test]
fn run_unify_from_json() {
    let x = Variable::new("x");
    let pair = (
        predicate("P", [&x]),
        predicate("P", [Term::constant("a")]),
    );
    let json = serde_json::to_string(&pair).unwrap();
    let args = Args::parse_from(["fol_cnf", "--command", "unify"]);
    let result = run_from_json(&args, &json).unwrap();
    let expected: VarSubst = [(x, Term::constant("a"))].into();
    assert_eq!(result, Return::Unifier(expected));
    assert_eq!(result.to_string(), "unifier: {x ↦ a}");
}

#[test]
fn run_reports_errors() {
    let args = Args::parse_from(["fol_cnf"]);
    assert!(run_from_json(&args, "not json").is_err());

    let args = Args::parse_from(["fol_cnf", "--command", "unify"]);
    let pair = (p("P") & p("Q"), p("P"));
    let json = serde_json::to_string(&pair).unwrap();
    assert!(run_from_json(&args, &json).is_err());
}
