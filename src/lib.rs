extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{
    FirstSets, FollowSets, Grammar, GrammarDefinition, InvalidGrammarError, RuleDefinition,
    Symbol,
};

#[wasm_bindgen]
pub fn first_follow_to_json(definition: &str) -> String {
    let g = GrammarDefinition::from_json(definition).and_then(|d| d.build());
    match g {
        Ok(g) => {
            let (first, follow) = g.first_follow();
            g.to_first_follow_output(&first, &follow).to_json()
        }
        Err(e) => serde_json::json!({ "error": e.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod build_tests {
    use crate::grammar::{Symbol, END_MARK, END_MARK_INDEX, EPSILON, EPSILON_INDEX};
    use crate::{Grammar, GrammarDefinition, InvalidGrammarError, RuleDefinition};

    fn rule(lhs: &str, rhs: &[&[&str]]) -> RuleDefinition {
        GrammarDefinition::new().rule(lhs, rhs).rules.remove(0)
    }

    #[test]
    fn simple_build() {
        let g = Grammar::build(&[rule("S", &[&["a"]])], "S").unwrap();

        let s = g.get_symbol_index("S").unwrap();
        let a = g.get_symbol_index("a").unwrap();

        assert_eq!(g.get_symbol_name(s), "S");
        assert_eq!(g.get_symbol_name(a), "a");
        assert_eq!(g.get_symbol_name(EPSILON_INDEX), EPSILON);
        assert_eq!(g.get_symbol_name(END_MARK_INDEX), END_MARK);
        assert_eq!(g.start_symbol(), s);
        assert_eq!(g.productions(s).unwrap()[0], vec![a]);
        assert!(g.productions(a).is_none());
    }

    #[test]
    fn vocabularies() {
        let g = GrammarDefinition::new()
            .rule("S", &[&["A", "B"]])
            .rule("A", &[&["a"], &["ε"]])
            .rule("B", &[&["b"], &["c"]])
            .build()
            .unwrap();

        let non_terminals: Vec<&str> = g.non_terminal_iter().map(|nt| nt.name.as_str()).collect();
        let terminals: Vec<&str> = g.terminal_iter().map(|(_, name)| name).collect();
        assert_eq!(non_terminals, vec!["S", "A", "B"]);
        assert_eq!(terminals, vec!["a", "b", "c"]);

        let a = g.get_symbol_index("A").unwrap();
        assert_eq!(g.productions(a).unwrap()[1], vec![EPSILON_INDEX]);
        assert_eq!(g.symbol(a), &Symbol::NonTerminal("A".to_string()));
        assert_eq!(g.symbol(EPSILON_INDEX), &Symbol::Epsilon);
    }

    #[test]
    fn classification_ignores_casing() {
        let g = GrammarDefinition::new()
            .rule("expr", &[&["expr", "PLUS", "term"], &["term"]])
            .rule("term", &[&["ID"]])
            .build()
            .unwrap();

        let expr = g.get_symbol_index("expr").unwrap();
        let plus = g.get_symbol_index("PLUS").unwrap();
        let id = g.get_symbol_index("ID").unwrap();
        assert!(g.is_non_terminal(expr));
        assert!(g.symbol(plus).is_terminal());
        assert!(g.symbol(id).is_terminal());
    }

    #[test]
    fn repeated_left_side_appends() {
        let g = GrammarDefinition::new()
            .rule("S", &[&["a"]])
            .rule("S", &[&["b"]])
            .build()
            .unwrap();
        let s = g.get_symbol_index("S").unwrap();
        assert_eq!(g.non_terminal_iter().count(), 1);
        assert_eq!(g.productions(s).unwrap().len(), 2);
    }

    #[test]
    fn custom_epsilon() {
        let g = GrammarDefinition::new()
            .epsilon("eps")
            .rule("S", &[&["a"], &["eps"]])
            .build()
            .unwrap();
        let s = g.get_symbol_index("S").unwrap();
        assert_eq!(g.productions(s).unwrap()[1], vec![EPSILON_INDEX]);
        assert_eq!(g.get_symbol_name(EPSILON_INDEX), "eps");
    }

    #[test]
    fn explicit_start_symbol() {
        let g = GrammarDefinition::new()
            .rule("A", &[&["a"]])
            .rule("S", &[&["A"]])
            .start("S")
            .build()
            .unwrap();
        assert_eq!(g.start_symbol(), g.get_symbol_index("S").unwrap());
    }

    #[test]
    fn missing_start_symbol() {
        let e = Grammar::build(&[rule("A", &[&["a"]])], "S").unwrap_err();
        assert_eq!(e, InvalidGrammarError::MissingStartSymbol("S".to_string()));

        let e = Grammar::build(&[rule("A", &[&["a"]])], "a").unwrap_err();
        assert_eq!(e, InvalidGrammarError::MissingStartSymbol("a".to_string()));

        let e = Grammar::build(&[rule("S", &[]), rule("A", &[&["a"]])], "S").unwrap_err();
        assert_eq!(e, InvalidGrammarError::MissingStartSymbol("S".to_string()));
    }

    #[test]
    fn no_rules() {
        assert_eq!(
            Grammar::build(&[], "S").unwrap_err(),
            InvalidGrammarError::NoRules
        );
        assert_eq!(
            GrammarDefinition::new().build().unwrap_err(),
            InvalidGrammarError::NoRules
        );
    }

    #[test]
    fn empty_production_list() {
        let e = GrammarDefinition::new()
            .rule("S", &[&["A"]])
            .rule("A", &[])
            .build()
            .unwrap_err();
        assert_eq!(e, InvalidGrammarError::EmptyProductions("A".to_string()));
    }

    #[test]
    fn unclassifiable_symbols() {
        let e = GrammarDefinition::new()
            .rule("S", &[&["a", "$"]])
            .build()
            .unwrap_err();
        assert_eq!(
            e,
            InvalidGrammarError::UnclassifiableSymbol {
                non_terminal: "S".to_string(),
                token: "$".to_string()
            }
        );

        let e = GrammarDefinition::new()
            .rule("S", &[&["a b"]])
            .build()
            .unwrap_err();
        assert!(matches!(e, InvalidGrammarError::UnclassifiableSymbol { .. }));

        let e = GrammarDefinition::new()
            .rule("S", &[&[""]])
            .build()
            .unwrap_err();
        assert!(matches!(e, InvalidGrammarError::UnclassifiableSymbol { .. }));
    }

    #[test]
    fn reserved_names() {
        let e = GrammarDefinition::new()
            .rule("ε", &[&["a"]])
            .build()
            .unwrap_err();
        assert_eq!(e, InvalidGrammarError::ReservedName("ε".to_string()));

        let e = GrammarDefinition::new()
            .rule("S", &[&["a"]])
            .rule("$", &[&["a"]])
            .build()
            .unwrap_err();
        assert_eq!(e, InvalidGrammarError::ReservedName("$".to_string()));
    }

    #[test]
    fn epsilon_must_not_clash_with_end_mark() {
        let e = GrammarDefinition::new()
            .epsilon("$")
            .rule("S", &[&["A", "b"]])
            .rule("A", &[&["a"], &["$"]])
            .build()
            .unwrap_err();
        assert_eq!(e, InvalidGrammarError::ReservedName("$".to_string()));
    }

    #[test]
    fn blank_epsilon() {
        for epsilon in ["", "e ps", " "] {
            let e = GrammarDefinition::new()
                .epsilon(epsilon)
                .rule("S", &[&["a"]])
                .build()
                .unwrap_err();
            assert_eq!(e, InvalidGrammarError::InvalidName(epsilon.to_string()));
        }
    }

    #[test]
    fn blank_left_sides() {
        let e = GrammarDefinition::new()
            .rule("S", &[&[""]])
            .rule("", &[&["a"]])
            .build()
            .unwrap_err();
        assert_eq!(e, InvalidGrammarError::InvalidName(String::new()));

        let e = GrammarDefinition::new()
            .rule("S", &[&["a b"]])
            .rule("a b", &[&["a"]])
            .build()
            .unwrap_err();
        assert_eq!(e, InvalidGrammarError::InvalidName("a b".to_string()));
    }

    #[test]
    #[should_panic]
    fn malformed_json() {
        let _d = GrammarDefinition::from_json("{\"rules\": 3}").unwrap();
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            InvalidGrammarError::EmptyProductions("A".to_string()).to_string(),
            "nonterminal \"A\" has an empty production list"
        );
        assert!(InvalidGrammarError::Malformed("x".to_string())
            .to_string()
            .starts_with("malformed"));
    }
}
