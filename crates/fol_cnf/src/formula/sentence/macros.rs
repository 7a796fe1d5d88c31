/// Universally quantifies fresh variables over a sentence
///
/// ```
/// use fol_cnf::{formula::sentence::predicate, mforall};
///
/// let s = mforall!(x, y; predicate("R", [&x, &y]));
/// assert_eq!(s.to_string(), "∀ x [∀ y [R(x, y)]]");
/// ```
#[macro_export]
macro_rules! mforall {
    ($($var:ident),+ ; $content:expr) => {{
        $(let $var = $crate::formula::variable::Variable::new(stringify!($var));)+
        $crate::formula::sentence::foralls([$($var.clone()),+], $content)
    }};
}

/// Existentially quantifies fresh variables over a sentence
///
/// ```
/// use fol_cnf::{formula::sentence::predicate, mexists};
///
/// let s = mexists!(x; predicate("P", [&x]));
/// assert_eq!(s.to_string(), "∃ x [P(x)]");
/// ```
#[macro_export]
macro_rules! mexists {
    ($($var:ident),+ ; $content:expr) => {{
        $(let $var = $crate::formula::variable::Variable::new(stringify!($var));)+
        $crate::formula::sentence::existss([$($var.clone()),+], $content)
    }};
}
