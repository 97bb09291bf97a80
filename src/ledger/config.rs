/// How strictly a transaction's outputs must match its inputs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConservationRule {
    /// Outputs may total less than inputs; the difference is burned
    #[default]
    AllowBurn,
    /// Outputs must total exactly the inputs
    Exact,
}

/// Configuration for a ledger
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Conservation check applied during validation
    pub conservation: ConservationRule,
}

impl LedgerConfig {
    /// Create a new config with builder pattern
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the conservation rule
    pub fn with_conservation(mut self, rule: ConservationRule) -> Self {
        self.conservation = rule;
        self
    }

    /// Shorthand for `ConservationRule::Exact`
    pub fn strict() -> Self {
        Self::new().with_conservation(ConservationRule::Exact)
    }
}
