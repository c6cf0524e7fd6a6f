use std::collections::HashSet;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{FirstSets, FollowSets, Grammar, END_MARK, END_MARK_INDEX, EPSILON_INDEX};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
    #[serde(skip)]
    epsilon: &'a str,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|&s| {
                        if s == self.epsilon {
                            "\\epsilon".to_string()
                        } else {
                            escape::tex(s).to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        format!("{} & \\rightarrow & {}", escape::tex(self.left), right)
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.chars().count())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex()))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .map(|nt| ProductionOutput {
                left: nt.name.as_str(),
                rights: nt
                    .productions
                    .iter()
                    .map(|production| {
                        production
                            .iter()
                            .map(|idx| self.get_symbol_name(*idx))
                            .collect()
                    })
                    .collect(),
                epsilon: self.epsilon(),
            })
            .collect();
        ProductionOutputVec { productions }
    }

    /// Names sorted, with ε and `$` moved to the end.
    fn set_to_vec_str(&self, set: &HashSet<usize>) -> Vec<&str> {
        let mut names: Vec<&str> = set
            .iter()
            .filter(|&&idx| idx != EPSILON_INDEX && idx != END_MARK_INDEX)
            .map(|&idx| self.get_symbol_name(idx))
            .collect();
        names.sort();
        if set.contains(&EPSILON_INDEX) {
            names.push(self.epsilon());
        }
        if set.contains(&END_MARK_INDEX) {
            names.push(END_MARK);
        }
        names
    }
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

#[derive(Serialize)]
struct TerminalOutput<'a> {
    name: &'a str,
    first: Vec<&'a str>,
}

/// FIRST and FOLLOW sets of one grammar, ready to print.
#[derive(Serialize)]
pub struct FirstFollowOutput<'a> {
    non_terminals: Vec<NonTerminalOutput<'a>>,
    terminals: Vec<TerminalOutput<'a>>,
    #[serde(skip)]
    epsilon: &'a str,
}

impl FirstFollowOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        fn f(a: &[&str]) -> String {
            format!("{{{}}}", a.join(", "))
        }

        let first = self
            .non_terminals
            .iter()
            .map(|nt| format!("{}: {}", nt.name, f(&nt.first)))
            .chain(
                self.terminals
                    .iter()
                    .map(|t| format!("{}: {}", t.name, f(&t.first))),
            );
        let follow = self
            .non_terminals
            .iter()
            .map(|nt| format!("{}: {}", nt.name, f(&nt.follow)));

        std::iter::once("FIRST sets:".to_string())
            .chain(first)
            .chain(std::iter::once(String::new()))
            .chain(std::iter::once("FOLLOW sets:".to_string()))
            .chain(follow)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_latex(&self) -> String {
        let f = |a: &[&str]| -> String {
            a.iter()
                .map(|&s| {
                    if s == self.epsilon {
                        r"$\epsilon$".to_string()
                    } else {
                        escape::tex(s).to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(r"\ ")
        };

        let non_terminals = self
            .non_terminals
            .iter()
            .map(|nt| {
                format!(
                    "{} & {} & {} & {}",
                    escape::tex(nt.name),
                    nt.nullable,
                    f(nt.first.as_slice()),
                    f(nt.follow.as_slice())
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n");

        let terminals = self
            .terminals
            .iter()
            .map(|t| format!("{} & {}", escape::tex(t.name), f(t.first.as_slice())))
            .collect::<Vec<_>>()
            .join("\\\\\n");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &non_terminals
            + "\\\\\n\\end{tabular}\n\n"
            + "\\begin{tabular}{c|c}\n"
            + "Symbol & First\\\\\\hline\n"
            + &terminals
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_first_follow_output<'a>(
        &'a self,
        first: &FirstSets,
        follow: &FollowSets,
    ) -> FirstFollowOutput<'a> {
        let empty = HashSet::new();

        let non_terminals = self
            .non_terminal_iter()
            .map(|nt| NonTerminalOutput {
                name: nt.name.as_str(),
                nullable: first.is_nullable(nt.index),
                first: self.set_to_vec_str(first.get(nt.index).unwrap_or(&empty)),
                follow: self.set_to_vec_str(follow.get(nt.index).unwrap_or(&empty)),
            })
            .collect();

        let terminals = self
            .terminal_iter()
            .map(|(idx, name)| TerminalOutput {
                name,
                first: self.set_to_vec_str(first.get(idx).unwrap_or(&empty)),
            })
            .collect();

        FirstFollowOutput {
            non_terminals,
            terminals,
            epsilon: self.epsilon(),
        }
    }
}
