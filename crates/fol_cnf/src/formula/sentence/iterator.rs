use super::Sentence;

/// Depth-first walk over the subformulas of a [Sentence]
///
/// Yields every node with its depth, the root being at depth 0. Uses an
/// explicit pile so deep sentences don't blow the stack.
#[derive(Debug, Clone)]
pub struct Subformulas<'a> {
    pile: Vec<(u32, &'a Sentence)>,
}

impl<'a> Subformulas<'a> {
    pub fn new(root: &'a Sentence) -> Self {
        Self {
            pile: vec![(0, root)],
        }
    }
}

impl<'a> Iterator for Subformulas<'a> {
    type Item = (u32, &'a Sentence);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, current) = self.pile.pop()?;
        self.pile
            .extend(current.children().map(|child| (depth + 1, child)));
        Some((depth, current))
    }
}

#[cfg(test)]
mod tests {
    use crate::formula::{
        sentence::{not, predicate, Sentence},
        term::Term,
    };

    fn p(name: &str) -> Sentence {
        predicate::<Term>(name, [])
    }

    #[test]
    fn visits_everything_once() {
        let s = (p("P") >> p("Q")) & not(p("R"));
        let visited: Vec<_> = s.subformulas_with_depth().collect();
        assert_eq!(visited.len(), 6);
        assert_eq!(visited[0], (0, &s));
        assert!(visited.contains(&(2, &p("Q"))));
        assert!(visited.contains(&(2, &p("R"))));
    }
}
