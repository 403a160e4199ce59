//! End-to-end checks of the balance-mutation engine: reversal is a true
//! inverse, transfers are zero-sum, and edits behave exactly like
//! delete-then-readd.

use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;
use wallet_core::domain::{BillingCycle, Subscription, Transaction, TransactionKind, Wallet, WalletKind};
use wallet_core::{Ledger, PayError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn balances(ledger: &Ledger) -> HashMap<Uuid, i64> {
    ledger
        .store()
        .wallets()
        .iter()
        .map(|w| (w.id, w.balance_minor))
        .collect()
}

/// Oracle: wallet balances recomputed from initial values plus the full
/// transaction history, independent of the incremental engine.
fn recomputed_balances(
    initial: &HashMap<Uuid, i64>,
    transactions: &[Transaction],
) -> HashMap<Uuid, i64> {
    let mut balances = initial.clone();
    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => *balances.entry(txn.wallet_id).or_default() += txn.amount_minor,
            TransactionKind::Expense => *balances.entry(txn.wallet_id).or_default() -= txn.amount_minor,
            TransactionKind::Transfer => {
                *balances.entry(txn.wallet_id).or_default() -= txn.amount_minor;
                if let Some(target) = txn.wallet_target_id {
                    *balances.entry(target).or_default() += txn.amount_minor;
                }
            }
        }
    }
    balances
}

#[test]
fn scenario_expense_then_reverse_restores_balance() {
    let mut ledger = Ledger::new();
    let a = ledger.add_wallet(Wallet::new("A", WalletKind::Bank, 1_000_000));

    let id = ledger
        .add_transaction(Transaction::new(
            TransactionKind::Expense,
            300_000,
            "food",
            a,
            date(2024, 5, 3),
        ))
        .expect("valid expense");
    assert_eq!(ledger.wallet_by_id(a).unwrap().balance_minor, 700_000);

    assert!(ledger.delete_transaction(id));
    assert_eq!(ledger.wallet_by_id(a).unwrap().balance_minor, 1_000_000);
}

#[test]
fn scenario_transfer_update_rebalances_both_wallets() {
    let mut ledger = Ledger::new();
    let a = ledger.add_wallet(Wallet::new("A", WalletKind::Bank, 1_000_000));
    let b = ledger.add_wallet(Wallet::new("B", WalletKind::Savings, 0));

    let id = ledger
        .add_transaction(Transaction::transfer(400_000, a, b, date(2024, 5, 4)))
        .expect("valid transfer");
    assert_eq!(ledger.wallet_by_id(a).unwrap().balance_minor, 600_000);
    assert_eq!(ledger.wallet_by_id(b).unwrap().balance_minor, 400_000);

    ledger
        .update_transaction(id, |t| t.amount_minor = 100_000)
        .expect("valid update");
    assert_eq!(ledger.wallet_by_id(a).unwrap().balance_minor, 900_000);
    assert_eq!(ledger.wallet_by_id(b).unwrap().balance_minor, 100_000);
}

#[test]
fn scenario_subscription_payment_blocked_without_funds() {
    let mut ledger = Ledger::new();
    let c = ledger.add_wallet(Wallet::new("C", WalletKind::Ewallet, 300_000));
    let sub = ledger.add_subscription(Subscription::new(
        "Music",
        500_000,
        BillingCycle::Monthly,
        date(2024, 5, 10),
        c,
    ));

    let err = ledger
        .pay_subscription_on(sub, date(2024, 5, 10))
        .expect_err("must signal insufficient balance");
    assert_eq!(
        err,
        PayError::InsufficientBalance {
            wallet_name: "C".into()
        }
    );
    assert_eq!(ledger.wallet_by_id(c).unwrap().balance_minor, 300_000);
    assert_eq!(
        ledger.store().subscription(sub).unwrap().next_due,
        date(2024, 5, 10)
    );
}

#[test]
fn scenario_subscription_payment_debits_and_advances() {
    let mut ledger = Ledger::new();
    let c = ledger.add_wallet(Wallet::new("C", WalletKind::Ewallet, 600_000));
    let sub = ledger.add_subscription(Subscription::new(
        "Music",
        500_000,
        BillingCycle::Monthly,
        date(2024, 5, 10),
        c,
    ));

    let receipt = ledger
        .pay_subscription_on(sub, date(2024, 5, 10))
        .expect("payment succeeds");
    assert_eq!(ledger.wallet_by_id(c).unwrap().balance_minor, 100_000);
    assert_eq!(receipt.next_due, date(2024, 6, 10));
    assert_eq!(
        ledger.store().subscription(sub).unwrap().next_due,
        date(2024, 6, 10)
    );
    let txn = ledger.store().transaction(receipt.transaction_id).unwrap();
    assert_eq!(txn.amount_minor, 500_000);
    assert_eq!(txn.category, "bills");
}

#[test]
fn applying_then_reversing_in_shuffled_order_conserves_balances() {
    let mut ledger = Ledger::new();
    let a = ledger.add_wallet(Wallet::new("A", WalletKind::Bank, 1_000_000));
    let b = ledger.add_wallet(Wallet::new("B", WalletKind::Cash, 250_000));
    let c = ledger.add_wallet(Wallet::new("C", WalletKind::Savings, 0));
    let initial = balances(&ledger);

    let mut ids = vec![
        ledger
            .add_transaction(Transaction::new(
                TransactionKind::Income,
                750_000,
                "salary",
                a,
                date(2024, 5, 1),
            ))
            .unwrap(),
        ledger
            .add_transaction(Transaction::transfer(400_000, a, c, date(2024, 5, 2)))
            .unwrap(),
        ledger
            .add_transaction(Transaction::new(
                TransactionKind::Expense,
                120_000,
                "food",
                b,
                date(2024, 5, 3),
            ))
            .unwrap(),
        ledger
            .add_transaction(Transaction::transfer(50_000, c, b, date(2024, 5, 4)))
            .unwrap(),
        ledger
            .add_transaction(Transaction::new(
                TransactionKind::Expense,
                90_000,
                "transport",
                a,
                date(2024, 5, 5),
            ))
            .unwrap(),
    ];

    // Engine state must agree with a from-scratch recomputation before
    // any reversal.
    assert_eq!(
        balances(&ledger),
        recomputed_balances(&initial, ledger.store().transactions())
    );

    // Reverse in an order unrelated to insertion.
    ids.swap(0, 3);
    ids.swap(1, 4);
    for id in ids {
        assert!(ledger.delete_transaction(id));
    }
    assert_eq!(balances(&ledger), initial);
}

#[test]
fn transfers_are_zero_sum() {
    let mut ledger = Ledger::new();
    let a = ledger.add_wallet(Wallet::new("A", WalletKind::Bank, 900_000));
    let b = ledger.add_wallet(Wallet::new("B", WalletKind::Ewallet, 100_000));
    let before = balances(&ledger);

    ledger
        .add_transaction(Transaction::transfer(333_333, a, b, date(2024, 5, 6)))
        .unwrap();
    let after = balances(&ledger);

    let delta_a = after[&a] - before[&a];
    let delta_b = after[&b] - before[&b];
    assert_eq!(delta_a + delta_b, 0);
    assert_eq!(
        before.values().sum::<i64>(),
        after.values().sum::<i64>()
    );
}

#[test]
fn update_equals_delete_then_readd() {
    // Two ledgers with identical state, cloned through the snapshot
    // boundary so wallet and transaction ids match.
    let mut updated = Ledger::new();
    let a = updated.add_wallet(Wallet::new("A", WalletKind::Bank, 1_000_000));
    let b = updated.add_wallet(Wallet::new("B", WalletKind::Savings, 200_000));
    let id = updated
        .add_transaction(Transaction::new(
            TransactionKind::Expense,
            150_000,
            "food",
            a,
            date(2024, 5, 7),
        ))
        .unwrap();

    let mut readded = Ledger::new();
    readded
        .import_snapshot(&updated.export_snapshot_json().unwrap())
        .expect("clone via snapshot");

    updated
        .update_transaction(id, |t| {
            t.kind = TransactionKind::Income;
            t.amount_minor = 275_000;
            t.wallet_id = b;
            t.category = "salary".into();
        })
        .expect("valid update");

    let old = readded.store().transaction(id).unwrap().clone();
    let mut merged = old;
    merged.kind = TransactionKind::Income;
    merged.amount_minor = 275_000;
    merged.wallet_id = b;
    merged.category = "salary".into();
    assert!(readded.delete_transaction(id));
    readded.add_transaction(merged).expect("re-add merged");

    assert_eq!(balances(&updated), balances(&readded));
    assert_eq!(
        updated.store().transaction(id).unwrap(),
        readded.store().transaction(id).unwrap()
    );
}

#[test]
fn recent_transactions_orders_newest_first() {
    let mut ledger = Ledger::new();
    let a = ledger.add_wallet(Wallet::new("A", WalletKind::Bank, 0));
    for (day, amount) in [(1, 10), (15, 20), (8, 30)] {
        ledger
            .add_transaction(Transaction::new(
                TransactionKind::Income,
                amount,
                "salary",
                a,
                date(2024, 5, day),
            ))
            .unwrap();
    }

    let recent = ledger.recent_transactions(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].date, date(2024, 5, 15));
    assert_eq!(recent[1].date, date(2024, 5, 8));
}
