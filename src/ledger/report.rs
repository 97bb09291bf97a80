use crate::identity::NameResolver;
use crate::ledger::Ledger;
use std::fmt;

/// Printable balance listing, one line per account in insertion order:
/// `The balance for <name> is <amount>`
pub struct BalanceReport<'a> {
    ledger: &'a Ledger,
    names: &'a dyn NameResolver,
}

impl<'a> BalanceReport<'a> {
    pub fn new(ledger: &'a Ledger, names: &'a dyn NameResolver) -> Self {
        Self { ledger, names }
    }

    pub fn lines(&self) -> Vec<String> {
        self.ledger
            .iter()
            .map(|(key, amount)| {
                format!("The balance for {} is {}", self.names.display_name(key), amount)
            })
            .collect()
    }
}

impl fmt::Display for BalanceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl Ledger {
    /// Balance listing rendered with `names`
    pub fn report<'a>(&'a self, names: &'a dyn NameResolver) -> BalanceReport<'a> {
        BalanceReport::new(self, names)
    }
}
