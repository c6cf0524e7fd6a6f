use std::collections::{BTreeSet, HashMap, HashSet};

use super::{
    is_blank, InvalidGrammarError, RuleDefinition, Symbol, SymbolClassifier, END_MARK,
    END_MARK_INDEX, EPSILON, EPSILON_INDEX,
};

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }
}

/// A classified, immutable grammar.
///
/// Symbols live in an arena and are referred to by index. Index
/// [`EPSILON_INDEX`] is always the epsilon marker and [`END_MARK_INDEX`] the
/// end-of-input marker; nonterminals follow in declaration order and
/// terminals are appended as they are first seen in a production.
#[derive(Debug, Clone)]
pub struct Grammar {
    symbols: Vec<Symbol>,
    symbol_table: HashMap<String, usize>,
    non_terminals: Vec<NonTerminal>,
    non_terminal_table: HashMap<usize, usize>,
    start_symbol: usize,
    epsilon: String,
}

impl Grammar {
    pub fn build(rules: &[RuleDefinition], start_symbol: &str) -> Result<Self, InvalidGrammarError> {
        Self::build_with_epsilon(rules, start_symbol, EPSILON)
    }

    pub fn build_with_epsilon(
        rules: &[RuleDefinition],
        start_symbol: &str,
        epsilon: &str,
    ) -> Result<Self, InvalidGrammarError> {
        if rules.is_empty() {
            return Err(InvalidGrammarError::NoRules);
        }
        if is_blank(epsilon) {
            return Err(InvalidGrammarError::InvalidName(epsilon.to_string()));
        }
        if epsilon == END_MARK {
            return Err(InvalidGrammarError::ReservedName(epsilon.to_string()));
        }

        let classifier = SymbolClassifier::new(epsilon, rules.iter().map(|r| r.lhs.as_str()));
        let mut g = Self::new(classifier.epsilon());

        for rule in rules {
            if classifier.is_reserved(&rule.lhs) {
                return Err(InvalidGrammarError::ReservedName(rule.lhs.clone()));
            }
            if is_blank(&rule.lhs) {
                return Err(InvalidGrammarError::InvalidName(rule.lhs.clone()));
            }
            if g.get_symbol_index(&rule.lhs).is_none() {
                g.add_non_terminal(&rule.lhs);
            }
        }

        for rule in rules {
            let left = g.symbol_table[&rule.lhs];
            for right in &rule.rhs {
                let mut production = Vec::with_capacity(right.len());
                for token in right {
                    let idx = match classifier.classify_in(&rule.lhs, token)? {
                        Symbol::Epsilon => EPSILON_INDEX,
                        Symbol::NonTerminal(name) => g.symbol_table[&name],
                        Symbol::Terminal(name) => match g.get_symbol_index(&name) {
                            Some(idx) => idx,
                            None => g.add_terminal(name),
                        },
                        Symbol::EndMarker => {
                            return Err(InvalidGrammarError::UnclassifiableSymbol {
                                non_terminal: rule.lhs.clone(),
                                token: token.clone(),
                            })
                        }
                    };
                    production.push(idx);
                }
                g.add_production(left, production);
            }
        }

        match g.get_symbol_index(start_symbol) {
            Some(idx) if g.is_non_terminal(idx) => g.start_symbol = idx,
            _ => {
                return Err(InvalidGrammarError::MissingStartSymbol(
                    start_symbol.to_string(),
                ))
            }
        }

        if let Some(nt) = g.non_terminals.iter().find(|nt| nt.productions.is_empty()) {
            return Err(if nt.index == g.start_symbol {
                InvalidGrammarError::MissingStartSymbol(nt.name.clone())
            } else {
                InvalidGrammarError::EmptyProductions(nt.name.clone())
            });
        }

        log::debug!(
            "grammar built: {} nonterminals, {} terminals, start symbol {}",
            g.non_terminals.len(),
            g.terminal_iter().count(),
            start_symbol
        );

        Ok(g)
    }

    fn new(epsilon: &str) -> Self {
        let mut g = Self {
            symbols: vec![Symbol::Epsilon, Symbol::EndMarker],
            symbol_table: HashMap::new(),
            non_terminals: Vec::new(),
            non_terminal_table: HashMap::new(),
            start_symbol: EPSILON_INDEX,
            epsilon: epsilon.to_string(),
        };
        g.symbol_table.insert(epsilon.to_string(), EPSILON_INDEX);
        g.symbol_table
            .insert(END_MARK.to_string(), END_MARK_INDEX);
        g
    }

    fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::NonTerminal(name.to_string()));
        self.symbol_table.insert(name.to_string(), idx);
        self.non_terminal_table
            .insert(idx, self.non_terminals.len());
        self.non_terminals
            .push(NonTerminal::new(idx, name.to_string()));
        idx
    }

    fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    fn add_production(&mut self, left: usize, right: Vec<usize>) {
        let pos = self.non_terminal_table[&left];
        self.non_terminals[pos].productions.push(right);
    }

    pub fn start_symbol(&self) -> usize {
        self.start_symbol
    }

    pub fn epsilon(&self) -> &str {
        &self.epsilon
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, index: usize) -> &Symbol {
        &self.symbols[index]
    }

    pub fn is_non_terminal(&self, index: usize) -> bool {
        self.non_terminal_table.contains_key(&index)
    }

    pub fn non_terminal(&self, index: usize) -> Option<&NonTerminal> {
        self.non_terminal_table
            .get(&index)
            .map(|&pos| &self.non_terminals[pos])
    }

    /// `None` for anything that is not a nonterminal.
    pub fn productions(&self, index: usize) -> Option<&[Vec<usize>]> {
        self.non_terminal(index).map(|nt| nt.productions.as_slice())
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.non_terminals.iter()
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| match s {
                Symbol::Terminal(name) => Some((idx, name.as_str())),
                _ => None,
            })
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        self.symbols[index].name(&self.epsilon)
    }

    pub fn symbol_names(&self, set: &HashSet<usize>) -> BTreeSet<&str> {
        set.iter().map(|idx| self.get_symbol_name(*idx)).collect()
    }
}
