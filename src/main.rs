//! Walk-through of the ledger: seeds balances for a handful of named keys,
//! then builds, validates and applies two signed transactions, printing the
//! balances after every step.

use clap::Parser;
use keyledger::identity::{KeyDirectory, PublicKey, Wallet};
use keyledger::ledger::{ConservationRule, Ledger, LedgerConfig};
use keyledger::tx::{InputList, OutputList, Transaction, TransactionBuilder, UnsignedInput};
use std::error::Error;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keyledger demo
#[derive(Parser, Debug)]
#[command(name = "keyledger-demo", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Require outputs to total exactly the inputs (no burn)
    #[arg(long)]
    strict: bool,
}

fn key(directory: &KeyDirectory, name: &str) -> Result<PublicKey, Box<dyn Error>> {
    directory
        .public_key(name)
        .cloned()
        .ok_or_else(|| format!("unknown key {name}").into())
}

fn print_balances(ledger: &Ledger, directory: &KeyDirectory, title: &str) {
    println!("\n{title}");
    print!("{}", ledger.report(directory));
}

/// Open every account at 0, then seed A1, B1 and C1
fn seed(ledger: &mut Ledger, directory: &KeyDirectory) -> Result<(), Box<dyn Error>> {
    for name in ["A1", "A2", "B1", "B2", "C1", "C2", "C3", "D1"] {
        ledger.add_account(&key(directory, name)?, 0);
    }
    print_balances(ledger, directory, "Accounts opened at 0");

    let (a1, b1, c1) = (key(directory, "A1")?, key(directory, "B1")?, key(directory, "C1")?);
    ledger.set_balance(&a1, 20);
    ledger.increment(&b1, 15);
    ledger.decrement(&b1, 5);
    ledger.set_balance(&c1, 10);
    print_balances(ledger, directory, "After seeding A1=20, B1=+15-5, C1=10");
    Ok(())
}

/// Raw deductibility checks, raw apply and signature checks
fn check_raw_operations(
    ledger: &mut Ledger,
    directory: &KeyDirectory,
    alice: &Wallet,
) -> Result<(), Box<dyn Error>> {
    let (a1, b1) = (key(directory, "A1")?, key(directory, "B1")?);

    // Deductibility checks only look at amounts; signatures are placeholders.
    let placeholder = vec![0u8; 64];
    let both = InputList::new()
        .with(a1.clone(), 15, placeholder.clone())
        .with(b1, 5, placeholder.clone());
    println!("\nCan A1:15 + B1:5 be deducted? {}", ledger.can_deduct_inputs(&both));

    let twice = InputList::new()
        .with(a1.clone(), 15, placeholder.clone())
        .with(a1.clone(), 15, placeholder.clone());
    println!("Can A1:15 + A1:15 be deducted? {}", ledger.can_deduct_inputs(&twice));

    ledger.apply_inputs(&both);
    print_balances(ledger, directory, "After deducting A1:15 + B1:5");

    ledger.apply_outputs(&OutputList::new().with(a1.clone(), 15).with(a1.clone(), 15));
    print_balances(ledger, directory, "After crediting A1 twice with 15");

    let outputs = OutputList::new()
        .with(key(directory, "B2")?, 10)
        .with(key(directory, "C1")?, 20);
    let signed = UnsignedInput::new(a1.clone(), 30).sign(alice, "A1", &outputs)?;
    println!("\nA1:30 signed over [B2:10, C1:20] valid? {}", signed.verify(&outputs));
    let forged = UnsignedInput::new(a1, 30).with_signature(placeholder);
    println!("A1:30 with a placeholder signature valid? {}", forged.verify(&outputs));
    Ok(())
}

fn settle(ledger: &mut Ledger, directory: &KeyDirectory, label: &str, tx: &Transaction) {
    println!("\n{label} ({})", tx.id());
    for line in tx.describe(directory) {
        println!("  {line}");
    }
    match ledger.try_apply(tx) {
        Ok(_) => print_balances(ledger, directory, &format!("{label} applied")),
        Err(e) => warn!(error = %e, "{label} rejected"),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = if cli.strict {
        LedgerConfig::new().with_conservation(ConservationRule::Exact)
    } else {
        LedgerConfig::default()
    };
    info!(conservation = ?config.conservation, "starting ledger demo");

    let alice = Wallet::generate(&["A1", "A2"])?;
    let bob = Wallet::generate(&["B1", "B2"])?;
    let carol = Wallet::generate(&["C1", "C2", "C3"])?;
    let david = Wallet::generate(&["D1"])?;

    let mut directory = KeyDirectory::new();
    for wallet in [&alice, &bob, &carol, &david] {
        directory.merge(&KeyDirectory::from_wallet(wallet));
    }

    let mut ledger = Ledger::with_config(config);
    seed(&mut ledger, &directory)?;
    check_raw_operations(&mut ledger, &directory, &alice)?;

    let tx1 = TransactionBuilder::new()
        .input(key(&directory, "A1")?, 35, "A1")
        .output(key(&directory, "B2")?, 10)
        .output(key(&directory, "C2")?, 10)
        .output(key(&directory, "A2")?, 15)
        .build(&alice)?;
    settle(&mut ledger, &directory, "Transaction 1", &tx1);

    // Two signers contribute inputs over one shared output list.
    let outputs = OutputList::new()
        .with(key(&directory, "D1")?, 15)
        .with(key(&directory, "C3")?, 5);
    let mut inputs = InputList::new();
    inputs.push(UnsignedInput::new(key(&directory, "B2")?, 10).sign(&bob, "B2", &outputs)?);
    inputs.push(UnsignedInput::new(key(&directory, "C2")?, 10).sign(&carol, "C2", &outputs)?);
    settle(&mut ledger, &directory, "Transaction 2", &Transaction::new(inputs, outputs));

    info!(supply = %ledger.total_supply(), "demo finished");
    Ok(())
}
