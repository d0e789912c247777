//! Rule configuration: state registry, transition table, switching table
//!
//! A `CellConfig` is built once through its setters and handed to a board by
//! value; there is no incremental rule editing afterwards. Every setter
//! validates its whole input before applying any of it, so a failed call
//! always leaves the previously accepted configuration active.

pub mod parser;

use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::{LatticaError, Result};
use crate::core::types::State;

/// One deterministic transition rule for a fixed initial state
///
/// "With exactly one of `counts` neighbors in `neighbor`, become `result`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRule {
    pub neighbor: State,
    pub counts: BTreeSet<u8>,
    pub result: State,
}

/// Parsed transition rules, keyed by initial state
///
/// Per initial state the rules form an ordered list in clause order. That
/// order is the documented tie-break: the update pass walks it front to
/// back and the last matching rule wins. Re-defining an
/// `(initial, neighbor)` pair replaces the old entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    entries: BTreeMap<State, Vec<TransitionRule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, initial: State, rule: TransitionRule) {
        let rules = self.entries.entry(initial).or_default();
        match rules.iter_mut().find(|r| r.neighbor == rule.neighbor) {
            Some(existing) => *existing = rule,
            None => rules.push(rule),
        }
    }

    /// Rules for a given initial state, in evaluation order
    pub fn rules_for(&self, initial: State) -> Option<&[TransitionRule]> {
        self.entries.get(&initial).map(|rules| rules.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of `(initial, neighbor)` entries across all initial states
    pub fn len(&self) -> usize {
        self.entries.values().map(|rules| rules.len()).sum()
    }

    /// Re-serialize into the clause grammar
    ///
    /// Parsing the output reconstructs an equivalent table.
    pub fn to_rule_string(&self) -> String {
        let clauses: Vec<String> = self
            .entries
            .iter()
            .flat_map(|(initial, rules)| {
                rules.iter().map(move |rule| {
                    let counts: String = rule.counts.iter().map(|c| c.to_string()).collect();
                    format!("{}:{}({}){}", initial, rule.neighbor, counts, rule.result)
                })
            })
            .collect();
        clauses.join(",")
    }
}

/// One stochastic switching rule: flip to `result` with `probability`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchRule {
    pub result: State,
    pub probability: f64,
}

/// Parsed switching rules, at most one per initial state
///
/// A later clause for the same initial state silently replaces the earlier
/// one; that is the documented precedence, not a conflict.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwitchTable {
    entries: BTreeMap<State, SwitchRule>,
}

impl SwitchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, initial: State, rule: SwitchRule) {
        self.entries.insert(initial, rule);
    }

    pub fn get(&self, initial: State) -> Option<&SwitchRule> {
        self.entries.get(&initial)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Re-serialize into the clause grammar
    pub fn to_rule_string(&self) -> String {
        let clauses: Vec<String> = self
            .entries
            .iter()
            .map(|(initial, rule)| {
                format!("{}:{}({})", initial, rule.result, format_probability(rule.probability))
            })
            .collect();
        clauses.join(",")
    }
}

/// Format a probability so that it matches the `digit "." digit+` grammar.
pub(crate) fn format_probability(p: f64) -> String {
    let formatted = format!("{:?}", p);
    if formatted.contains('.') && !formatted.contains('e') && !formatted.contains('E') {
        return formatted;
    }
    // Scientific notation or integral shorthand; spell the decimal out
    let mut fixed = format!("{:.12}", p);
    while fixed.ends_with('0') && !fixed.ends_with(".0") {
        fixed.pop();
    }
    fixed
}

/// The complete rule configuration for a board
///
/// Holds the state registry plus both rule tables. The state domain is
/// fixed once validated; replacing it does not re-check already parsed
/// rules, which mirrors how rules are only ever validated at parse time.
#[derive(Debug, Clone, Default)]
pub struct CellConfig {
    states: BTreeMap<State, String>,
    rules: RuleTable,
    switching: SwitchTable,
}

impl CellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the state domain
    ///
    /// Labels must be single digits (0-9) and names non-empty. Failure is
    /// soft: a warning is logged, the error returned, and the previous
    /// domain stays active. Duplicate labels keep the last pair.
    pub fn set_states(&mut self, states: &[(u8, &str)]) -> Result<()> {
        match Self::validate_states(states) {
            Ok(validated) => {
                self.states = validated;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("invalid state domain rejected, configuration unchanged: {}", err);
                Err(err)
            }
        }
    }

    fn validate_states(states: &[(u8, &str)]) -> Result<BTreeMap<State, String>> {
        if states.is_empty() {
            return Err(LatticaError::InvalidStates("state set must not be empty".into()));
        }
        let mut validated = BTreeMap::new();
        for &(label, name) in states {
            if label > State::MAX_LABEL {
                return Err(LatticaError::InvalidStates(format!(
                    "label {} exceeds the single-digit limit {}",
                    label,
                    State::MAX_LABEL
                )));
            }
            if name.is_empty() {
                return Err(LatticaError::InvalidStates(format!("state {} has an empty name", label)));
            }
            validated.insert(State(label), name.to_string());
        }
        Ok(validated)
    }

    /// Parse and install a transition rule string
    ///
    /// The whole string is validated first; any bad clause is a hard error
    /// and the previous table remains in effect.
    pub fn set_transition_rules(&mut self, rules: &str) -> Result<()> {
        if self.states.is_empty() {
            return Err(LatticaError::EmptyDomain);
        }
        let table = parser::parse_transition_rules(rules, &self.states)?;
        tracing::debug!("installed {} transition rule entries", table.len());
        self.rules = table;
        Ok(())
    }

    /// Parse and install a switching rule string
    ///
    /// Same contract as [`set_transition_rules`](Self::set_transition_rules).
    pub fn set_switching_rules(&mut self, rules: &str) -> Result<()> {
        if self.states.is_empty() {
            return Err(LatticaError::EmptyDomain);
        }
        let table = parser::parse_switching_rules(rules, &self.states)?;
        tracing::debug!("installed {} switching rule entries", table.len());
        self.switching = table;
        Ok(())
    }

    /// Ordered iteration over the state domain, lowest label first
    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.states.keys().copied()
    }

    pub fn state_name(&self, state: State) -> Option<&str> {
        self.states.get(&state).map(|name| name.as_str())
    }

    pub fn contains(&self, state: State) -> bool {
        self.states.contains_key(&state)
    }

    /// The state new cells start in: the lowest configured label
    pub fn default_state(&self) -> Option<State> {
        self.states.keys().next().copied()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn switching_rules(&self) -> &SwitchTable {
        &self.switching
    }

    pub(crate) fn states_map(&self) -> &BTreeMap<State, String> {
        &self.states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn life_config() -> CellConfig {
        let mut config = CellConfig::new();
        config.set_states(&[(0, "Dead"), (1, "Alive")]).unwrap();
        config
    }

    #[test]
    fn test_set_states_accepts_valid_domain() {
        let config = life_config();
        assert_eq!(config.state_count(), 2);
        assert_eq!(config.state_name(State(1)), Some("Alive"));
        assert_eq!(config.default_state(), Some(State(0)));
    }

    #[test]
    fn test_set_states_rejects_bad_input_and_keeps_prior_domain() {
        let mut config = life_config();
        assert!(config.set_states(&[]).is_err());
        assert!(config.set_states(&[(10, "TooBig")]).is_err());
        assert!(config.set_states(&[(2, "")]).is_err());
        // Prior domain still active after each rejection
        assert_eq!(config.state_count(), 2);
        assert_eq!(config.state_name(State(0)), Some("Dead"));
    }

    #[test]
    fn test_set_states_duplicate_label_keeps_last() {
        let mut config = CellConfig::new();
        config.set_states(&[(0, "First"), (0, "Second")]).unwrap();
        assert_eq!(config.state_count(), 1);
        assert_eq!(config.state_name(State(0)), Some("Second"));
    }

    #[test]
    fn test_rules_require_a_state_domain() {
        let mut config = CellConfig::new();
        assert!(matches!(
            config.set_transition_rules("0:1(3)1"),
            Err(LatticaError::EmptyDomain)
        ));
        assert!(matches!(
            config.set_switching_rules("0:1(0.5)"),
            Err(LatticaError::EmptyDomain)
        ));
    }

    #[test]
    fn test_failed_rule_string_leaves_previous_table_active() {
        let mut config = life_config();
        config.set_transition_rules("0:1(3)1").unwrap();
        assert!(config.set_transition_rules("0:1(9)1").is_err());
        assert_eq!(config.rules().len(), 1);
        assert!(config.rules().rules_for(State(0)).is_some());
    }

    #[test]
    fn test_failed_switching_string_leaves_previous_table_active() {
        let mut config = life_config();
        config.set_switching_rules("0:1(0.25)").unwrap();
        assert!(config.set_switching_rules("0:1(1.5)").is_err());
        let rule = config.switching_rules().get(State(0)).unwrap();
        assert!((rule.probability - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_transition_rule_string_round_trip() {
        let mut config = life_config();
        config.set_transition_rules("0:1(3)1,1:1(45678)0,1:0(78)0").unwrap();
        let serialized = config.rules().to_rule_string();
        let reparsed = parser::parse_transition_rules(&serialized, config.states_map()).unwrap();
        assert_eq!(reparsed, *config.rules());
    }

    #[test]
    fn test_switching_rule_string_round_trip() {
        let mut config = CellConfig::new();
        config.set_states(&[(0, "Empty"), (1, "Tree"), (2, "Burning")]).unwrap();
        config.set_switching_rules("0:1(0.01),1:2(0.0001),2:0(1.0)").unwrap();
        let serialized = config.switching_rules().to_rule_string();
        let reparsed = parser::parse_switching_rules(&serialized, config.states_map()).unwrap();
        assert_eq!(reparsed, *config.switching_rules());
    }

    #[test]
    fn test_format_probability_matches_grammar() {
        for p in [0.0, 0.5, 1.0, 0.01, 0.0001] {
            let formatted = format_probability(p);
            let dot = formatted.find('.').expect("needs a decimal point");
            assert_eq!(dot, 1, "single leading digit in {:?}", formatted);
            assert!(formatted[dot + 1..].chars().all(|c| c.is_ascii_digit()));
            assert!((formatted.parse::<f64>().unwrap() - p).abs() < 1e-12);
        }
    }
}
