use std::collections::{HashMap, HashSet};

use super::{FirstSets, Grammar, END_MARK_INDEX, EPSILON_INDEX};

/// Completed FOLLOW sets, keyed by nonterminal index.
///
/// A set holds terminal indices and, where input may end after the
/// nonterminal, [`END_MARK_INDEX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSets {
    sets: HashMap<usize, HashSet<usize>>,
}

impl FollowSets {
    pub fn get(&self, non_terminal: usize) -> Option<&HashSet<usize>> {
        self.sets.get(&non_terminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &HashSet<usize>)> {
        self.sets.iter().map(|(idx, follow)| (*idx, follow))
    }
}

struct FollowSetEngine<'g> {
    grammar: &'g Grammar,
    first_sets: &'g FirstSets,
    sets: HashMap<usize, HashSet<usize>>,
}

impl<'g> FollowSetEngine<'g> {
    fn new(grammar: &'g Grammar, first_sets: &'g FirstSets) -> Self {
        let mut sets: HashMap<usize, HashSet<usize>> = grammar
            .non_terminal_iter()
            .map(|nt| (nt.index, HashSet::new()))
            .collect();
        sets.entry(grammar.start_symbol())
            .or_default()
            .insert(END_MARK_INDEX);

        Self {
            grammar,
            first_sets,
            sets,
        }
    }

    /// One full pass over every production. Returns whether any set grew.
    fn pass(&mut self) -> bool {
        let grammar = self.grammar;
        let mut changed = false;
        for left in grammar.non_terminal_iter() {
            for production in &left.productions {
                for (i, &symbol) in production.iter().enumerate() {
                    if !grammar.is_non_terminal(symbol) {
                        continue;
                    }

                    let beta = &production[i + 1..];
                    let first_beta = self.first_sets.first_of_sequence(beta);

                    let mut addition: HashSet<usize> = first_beta
                        .iter()
                        .filter(|&&s| s != EPSILON_INDEX)
                        .cloned()
                        .collect();
                    // an empty beta yields {ε}, so it takes this branch too
                    if first_beta.contains(&EPSILON_INDEX) {
                        if let Some(left_follow) = self.sets.get(&left.index) {
                            addition.extend(left_follow.iter().cloned());
                        }
                    }

                    let follow = self.sets.entry(symbol).or_default();
                    let before = follow.len();
                    follow.extend(addition);
                    if follow.len() != before {
                        log::trace!(
                            "FOLLOW({}) grew to {} symbol(s) in a production of {}",
                            grammar.get_symbol_name(symbol),
                            follow.len(),
                            left.name
                        );
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    fn run(mut self) -> FollowSets {
        let mut passes = 1;
        while self.pass() {
            passes += 1;
        }
        log::debug!(
            "FOLLOW sets reached a fixpoint after {} pass(es)",
            passes
        );

        FollowSets { sets: self.sets }
    }
}

impl Grammar {
    pub fn follow_sets(&self, first_sets: &FirstSets) -> FollowSets {
        FollowSetEngine::new(self, first_sets).run()
    }

    pub fn first_follow(&self) -> (FirstSets, FollowSets) {
        let first = self.first_sets();
        let follow = self.follow_sets(&first);
        (first, follow)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::FollowSetEngine;
    use crate::grammar::{GrammarDefinition, END_MARK_INDEX};

    #[test]
    fn follow_sets_only_grow() {
        let g = GrammarDefinition::new()
            .rule("E", &[&["T", "E'"]])
            .rule("E'", &[&["+", "T", "E'"], &["ε"]])
            .rule("T", &[&["F", "T'"]])
            .rule("T'", &[&["*", "F", "T'"], &["ε"]])
            .rule("F", &[&["(", "E", ")"], &["id"]])
            .build()
            .unwrap();
        let first = g.first_sets();

        let mut engine = FollowSetEngine::new(&g, &first);
        let mut previous = engine.sets.clone();
        let mut passes = 0;
        loop {
            let changed = engine.pass();
            passes += 1;
            for (nt, before) in &previous {
                assert!(before.is_subset(&engine.sets[nt]));
            }
            if !changed {
                assert_eq!(previous, engine.sets);
                break;
            }
            previous = engine.sets.clone();
        }
        assert!(passes > 1);
    }

    #[test]
    fn start_symbol_is_seeded_with_end_mark() {
        let g = GrammarDefinition::new()
            .rule("S", &[&["a", "S"], &["b"]])
            .build()
            .unwrap();
        let first = g.first_sets();
        let engine = FollowSetEngine::new(&g, &first);
        let s = g.start_symbol();

        let mut expected: HashMap<usize, HashSet<usize>> = HashMap::new();
        expected.insert(s, [END_MARK_INDEX].into_iter().collect());
        assert_eq!(engine.sets, expected);
    }
}
