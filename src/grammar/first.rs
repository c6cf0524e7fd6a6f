use std::collections::{HashMap, HashSet};

use super::{Grammar, EPSILON_INDEX};

/// Completed FIRST sets, keyed by symbol index.
///
/// A set holds terminal indices and, when the symbol is nullable,
/// [`EPSILON_INDEX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSets {
    sets: HashMap<usize, HashSet<usize>>,
}

impl FirstSets {
    pub fn get(&self, symbol: usize) -> Option<&HashSet<usize>> {
        self.sets.get(&symbol)
    }

    pub fn is_nullable(&self, symbol: usize) -> bool {
        self.sets
            .get(&symbol)
            .map_or(false, |first| first.contains(&EPSILON_INDEX))
    }

    pub fn first_of_sequence(&self, sequence: &[usize]) -> HashSet<usize> {
        first_of_sequence_with(sequence, |symbol| {
            self.sets.get(&symbol).cloned().unwrap_or_default()
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &HashSet<usize>)> {
        self.sets.iter().map(|(idx, first)| (*idx, first))
    }
}

fn first_of_sequence_with<F>(sequence: &[usize], mut first_of: F) -> HashSet<usize>
where
    F: FnMut(usize) -> HashSet<usize>,
{
    let mut first = HashSet::new();
    for &symbol in sequence {
        let symbol_first = first_of(symbol);
        first.extend(symbol_first.iter().filter(|&&s| s != EPSILON_INDEX));
        if !symbol_first.contains(&EPSILON_INDEX) {
            return first;
        }
    }
    first.insert(EPSILON_INDEX);
    first
}

struct FirstSetEngine<'g> {
    grammar: &'g Grammar,
    cache: HashMap<usize, HashSet<usize>>,
    visiting: HashSet<usize>,
}

impl<'g> FirstSetEngine<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            cache: HashMap::new(),
            visiting: HashSet::new(),
        }
    }

    fn first_of(&mut self, symbol: usize) -> HashSet<usize> {
        if let Some(first) = self.cache.get(&symbol) {
            return first.clone();
        }

        let grammar = self.grammar;
        let productions = match grammar.productions(symbol) {
            Some(productions) => productions,
            None => {
                // terminal, epsilon or end marker: FIRST is the symbol itself
                let first: HashSet<usize> = std::iter::once(symbol).collect();
                self.cache.insert(symbol, first.clone());
                return first;
            }
        };

        if !self.visiting.insert(symbol) {
            log::debug!(
                "FIRST({}) requested while in progress, cycle contributes nothing",
                grammar.get_symbol_name(symbol)
            );
            return HashSet::new();
        }

        let mut first = HashSet::new();
        for production in productions {
            first.extend(self.first_of_sequence(production));
        }

        self.visiting.remove(&symbol);
        self.cache.insert(symbol, first.clone());
        first
    }

    fn first_of_sequence(&mut self, sequence: &[usize]) -> HashSet<usize> {
        first_of_sequence_with(sequence, |symbol| self.first_of(symbol))
    }

    /// Sets cached inside a cycle may miss what the cycle contributes.
    /// Re-evaluates every nonterminal against the cache until nothing grows.
    fn settle(&mut self) -> usize {
        let grammar = self.grammar;
        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for nt in grammar.non_terminal_iter() {
                let mut first = HashSet::new();
                for production in &nt.productions {
                    first.extend(self.first_of_sequence(production));
                }

                let cached = self.cache.entry(nt.index).or_default();
                let before = cached.len();
                cached.extend(first);
                if cached.len() != before {
                    changed = true;
                }
            }
        }
        passes
    }

    fn run(mut self) -> FirstSets {
        let grammar = self.grammar;
        self.first_of(EPSILON_INDEX);
        for nt in grammar.non_terminal_iter() {
            self.first_of(nt.index);
        }
        for (idx, _) in grammar.terminal_iter() {
            self.first_of(idx);
        }
        debug_assert!(self.visiting.is_empty());

        let passes = self.settle();
        log::debug!(
            "FIRST sets settled after {} refinement pass(es) over {} symbols",
            passes,
            self.cache.len()
        );

        FirstSets { sets: self.cache }
    }
}

impl Grammar {
    pub fn first_sets(&self) -> FirstSets {
        FirstSetEngine::new(self).run()
    }
}
