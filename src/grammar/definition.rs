use serde::{Deserialize, Serialize};

use super::{Grammar, InvalidGrammarError, EPSILON};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub lhs: String,
    pub rhs: Vec<Vec<String>>,
}

/// Structured grammar input, e.g.
///
/// ```json
/// {"rules": [{"lhs": "S", "rhs": [["A", "B"]]},
///            {"lhs": "A", "rhs": [["a"], ["ε"]]}]}
/// ```
///
/// Rules keep their order; the first left-hand side is the start symbol
/// unless `start` says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarDefinition {
    pub rules: Vec<RuleDefinition>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default = "default_epsilon")]
    pub epsilon: String,
}

fn default_epsilon() -> String {
    EPSILON.to_string()
}

impl Default for GrammarDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarDefinition {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            start: None,
            epsilon: default_epsilon(),
        }
    }

    pub fn from_json(definition: &str) -> Result<Self, InvalidGrammarError> {
        Ok(serde_json::from_str(definition)?)
    }

    pub fn rule(mut self, lhs: &str, rhs: &[&[&str]]) -> Self {
        self.rules.push(RuleDefinition {
            lhs: lhs.to_string(),
            rhs: rhs
                .iter()
                .map(|right| right.iter().map(|s| s.to_string()).collect())
                .collect(),
        });
        self
    }

    pub fn start(mut self, start: &str) -> Self {
        self.start = Some(start.to_string());
        self
    }

    pub fn epsilon(mut self, epsilon: &str) -> Self {
        self.epsilon = epsilon.to_string();
        self
    }

    pub fn start_symbol(&self) -> Option<&str> {
        self.start
            .as_deref()
            .or_else(|| self.rules.first().map(|r| r.lhs.as_str()))
    }

    pub fn build(&self) -> Result<Grammar, InvalidGrammarError> {
        let start = self.start_symbol().ok_or(InvalidGrammarError::NoRules)?;
        Grammar::build_with_epsilon(&self.rules, start, &self.epsilon)
    }
}
