//! The balance-mutation engine.
//!
//! Every write to entity state goes through [`Ledger`]. Transaction adds,
//! edits, and deletes keep wallet balances consistent with the stored
//! history: an edit reverses the old record's effect and applies the
//! merged record in one synchronous pass, so no reader ever observes a
//! half-applied transfer.

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    Asset, Budget, Debt, DebtStatus, Goal, Settings, Subscription, Transaction, TransactionKind,
    Wallet,
};
use crate::errors::LedgerError;
use crate::snapshot::Snapshot;
use crate::store::Store;

/// Category stamped on transactions synthesized by subscription payments.
pub const SUBSCRIPTION_CATEGORY: &str = "bills";

/// Outcome of a successful subscription payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub wallet_id: Uuid,
    pub next_due: NaiveDate,
}

/// Expected subscription-payment failures, returned rather than raised so
/// callers can render a specific message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayError {
    #[error("subscription not found")]
    NotFound,
    #[error("insufficient balance in wallet `{wallet_name}`")]
    InsufficientBalance { wallet_name: String },
}

/// The single owner of entity state. Construct one and pass it by
/// reference to whichever layer needs it; there is no global instance.
#[derive(Debug, Default)]
pub struct Ledger {
    store: Store,
    revision: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Monotonic mutation counter; bumps after every successful write.
    /// Sync schedulers watch this as their dirty signal.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    // Transactions

    /// Validates and records a transaction, adjusting wallet balances.
    /// Overdraft is allowed here; the balance floor is only enforced for
    /// automatic subscription debits.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<Uuid, LedgerError> {
        validate(&transaction)?;
        self.apply_effect(&transaction);
        let id = self.store.add_transaction(transaction);
        tracing::debug!(%id, "transaction recorded");
        self.bump();
        Ok(id)
    }

    /// Edits the stored transaction via `mutate`, reversing the old
    /// balance effect and applying the merged record. Handles changes to
    /// kind, amount, or either wallet reference in one pass. Returns
    /// `Ok(false)` without mutating anything if the id is unknown, and
    /// leaves state untouched when the merged record fails validation.
    pub fn update_transaction<F>(&mut self, id: Uuid, mutate: F) -> Result<bool, LedgerError>
    where
        F: FnOnce(&mut Transaction),
    {
        let Some(old) = self.store.transaction(id).cloned() else {
            return Ok(false);
        };
        let mut merged = old.clone();
        mutate(&mut merged);
        merged.id = old.id;
        merged.created_at = old.created_at;
        validate(&merged)?;

        self.reverse_effect(&old);
        self.apply_effect(&merged);
        self.store.replace_transaction(merged);
        tracing::debug!(%id, "transaction updated");
        self.bump();
        Ok(true)
    }

    /// Reverses the transaction's balance effect and removes it. Returns
    /// `false` if the id is unknown.
    pub fn delete_transaction(&mut self, id: Uuid) -> bool {
        let Some(removed) = self.store.remove_transaction(id) else {
            return false;
        };
        self.reverse_effect(&removed);
        tracing::debug!(%id, "transaction deleted");
        self.bump();
        true
    }

    /// Newest transactions first, ordered by date then recording time.
    pub fn recent_transactions(&self, limit: usize) -> Vec<&Transaction> {
        let mut recent: Vec<&Transaction> = self.store.transactions().iter().collect();
        recent.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        recent.truncate(limit);
        recent
    }

    fn apply_effect(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => {
                self.adjust_balance(transaction.wallet_id, transaction.amount_minor);
            }
            TransactionKind::Expense => {
                self.adjust_balance(transaction.wallet_id, -transaction.amount_minor);
            }
            TransactionKind::Transfer => {
                self.adjust_balance(transaction.wallet_id, -transaction.amount_minor);
                if let Some(target) = transaction.wallet_target_id {
                    self.adjust_balance(target, transaction.amount_minor);
                }
            }
        }
    }

    /// Exact inverse of [`Self::apply_effect`] for the stored record.
    fn reverse_effect(&mut self, transaction: &Transaction) {
        match transaction.kind {
            TransactionKind::Income => {
                self.adjust_balance(transaction.wallet_id, -transaction.amount_minor);
            }
            TransactionKind::Expense => {
                self.adjust_balance(transaction.wallet_id, transaction.amount_minor);
            }
            TransactionKind::Transfer => {
                self.adjust_balance(transaction.wallet_id, transaction.amount_minor);
                if let Some(target) = transaction.wallet_target_id {
                    self.adjust_balance(target, -transaction.amount_minor);
                }
            }
        }
    }

    fn adjust_balance(&mut self, wallet_id: Uuid, delta_minor: i64) {
        match self.store.wallet_mut(wallet_id) {
            Some(wallet) => wallet.balance_minor += delta_minor,
            None => {
                tracing::warn!(%wallet_id, delta_minor, "balance effect on unknown wallet skipped")
            }
        }
    }

    // Subscriptions

    /// Pays a subscription dated today. See [`Self::pay_subscription_on`].
    pub fn pay_subscription(&mut self, id: Uuid) -> Result<PaymentReceipt, PayError> {
        self.pay_subscription_on(id, Utc::now().date_naive())
    }

    /// Debits the linked wallet for one cycle of the subscription.
    ///
    /// Unlike manual expenses, this enforces a hard balance floor: a
    /// wallet holding less than the subscription amount fails with
    /// [`PayError::InsufficientBalance`] and nothing is mutated. On
    /// success an expense dated `today` in the `bills` category is
    /// recorded and `next_due` advances by exactly one cycle from its
    /// stored value.
    pub fn pay_subscription_on(
        &mut self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<PaymentReceipt, PayError> {
        let Some(subscription) = self.store.subscription(id).cloned() else {
            return Err(PayError::NotFound);
        };
        let Some(wallet) = self.store.wallet(subscription.wallet_id) else {
            tracing::warn!(%id, wallet_id = %subscription.wallet_id, "subscription wallet missing");
            return Err(PayError::NotFound);
        };
        if wallet.balance_minor < subscription.amount_minor {
            return Err(PayError::InsufficientBalance {
                wallet_name: wallet.name.clone(),
            });
        }

        let expense = Transaction::new(
            TransactionKind::Expense,
            subscription.amount_minor,
            SUBSCRIPTION_CATEGORY,
            subscription.wallet_id,
            today,
        )
        .with_description(format!("{} subscription", subscription.name));
        let transaction_id = expense.id;
        self.apply_effect(&expense);
        self.store.add_transaction(expense);

        let next_due = subscription.cycle.advance(subscription.next_due);
        self.store.update_subscription(id, |s| s.next_due = next_due);
        tracing::debug!(%id, %next_due, "subscription paid");
        self.bump();
        Ok(PaymentReceipt {
            transaction_id,
            wallet_id: subscription.wallet_id,
            next_due,
        })
    }

    pub fn add_subscription(&mut self, subscription: Subscription) -> Uuid {
        let id = self.store.add_subscription(subscription);
        self.bump();
        id
    }

    pub fn update_subscription<F: FnOnce(&mut Subscription)>(&mut self, id: Uuid, f: F) -> bool {
        let touched = self.store.update_subscription(id, f);
        if touched {
            self.bump();
        }
        touched
    }

    pub fn delete_subscription(&mut self, id: Uuid) -> bool {
        let removed = self.store.remove_subscription(id);
        if removed {
            self.bump();
        }
        removed
    }

    /// Active subscriptions due within `days` of `today` (overdue ones
    /// included), soonest first.
    pub fn upcoming_subscriptions_from(&self, today: NaiveDate, days: i64) -> Vec<&Subscription> {
        let horizon = today + chrono::Duration::days(days);
        let mut due: Vec<&Subscription> = self
            .store
            .subscriptions()
            .iter()
            .filter(|s| s.is_active() && s.next_due <= horizon)
            .collect();
        due.sort_by_key(|s| s.next_due);
        due
    }

    pub fn upcoming_subscriptions(&self, days: i64) -> Vec<&Subscription> {
        self.upcoming_subscriptions_from(Utc::now().date_naive(), days)
    }

    // Wallets

    pub fn add_wallet(&mut self, wallet: Wallet) -> Uuid {
        let id = self.store.add_wallet(wallet);
        self.bump();
        id
    }

    /// Explicit wallet edit; the only balance write outside transaction
    /// effects (initial-balance corrections).
    pub fn update_wallet<F: FnOnce(&mut Wallet)>(&mut self, id: Uuid, f: F) -> bool {
        let touched = self.store.update_wallet(id, f);
        if touched {
            self.bump();
        }
        touched
    }

    pub fn delete_wallet(&mut self, id: Uuid) -> bool {
        let removed = self.store.remove_wallet(id);
        if removed {
            self.bump();
        }
        removed
    }

    pub fn wallet_by_id(&self, id: Uuid) -> Option<&Wallet> {
        self.store.wallet(id)
    }

    // Assets

    pub fn add_asset(&mut self, asset: Asset) -> Uuid {
        let id = self.store.add_asset(asset);
        self.bump();
        id
    }

    pub fn update_asset<F: FnOnce(&mut Asset)>(&mut self, id: Uuid, f: F) -> bool {
        let touched = self.store.update_asset(id, f);
        if touched {
            self.bump();
        }
        touched
    }

    pub fn delete_asset(&mut self, id: Uuid) -> bool {
        let removed = self.store.remove_asset(id);
        if removed {
            self.bump();
        }
        removed
    }

    // Budgets

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = self.store.add_budget(budget);
        self.bump();
        id
    }

    pub fn update_budget<F: FnOnce(&mut Budget)>(&mut self, id: Uuid, f: F) -> bool {
        let touched = self.store.update_budget(id, f);
        if touched {
            self.bump();
        }
        touched
    }

    pub fn delete_budget(&mut self, id: Uuid) -> bool {
        let removed = self.store.remove_budget(id);
        if removed {
            self.bump();
        }
        removed
    }

    // Goals

    pub fn add_goal(&mut self, goal: Goal) -> Uuid {
        let id = self.store.add_goal(goal);
        self.bump();
        id
    }

    pub fn update_goal<F: FnOnce(&mut Goal)>(&mut self, id: Uuid, f: F) -> bool {
        let touched = self.store.update_goal(id, f);
        if touched {
            self.bump();
        }
        touched
    }

    pub fn delete_goal(&mut self, id: Uuid) -> bool {
        let removed = self.store.remove_goal(id);
        if removed {
            self.bump();
        }
        removed
    }

    /// Grows a goal's saved amount. Contributions are manual tracking and
    /// draw from no wallet. Non-positive amounts are rejected; an unknown
    /// id is an `Ok(false)` no-op.
    pub fn add_goal_contribution(&mut self, id: Uuid, amount_minor: i64) -> Result<bool, LedgerError> {
        if amount_minor <= 0 {
            return Err(LedgerError::InvalidAmount(amount_minor));
        }
        let touched = self
            .store
            .update_goal(id, |goal| goal.current_minor += amount_minor);
        if touched {
            self.bump();
        }
        Ok(touched)
    }

    // Debts

    pub fn add_debt(&mut self, debt: Debt) -> Uuid {
        let id = self.store.add_debt(debt);
        self.bump();
        id
    }

    pub fn update_debt<F: FnOnce(&mut Debt)>(&mut self, id: Uuid, f: F) -> bool {
        let touched = self.store.update_debt(id, f);
        if touched {
            self.bump();
        }
        touched
    }

    pub fn delete_debt(&mut self, id: Uuid) -> bool {
        let removed = self.store.remove_debt(id);
        if removed {
            self.bump();
        }
        removed
    }

    /// Marks a debt settled. Informational only: no transaction is
    /// generated and no wallet balance moves.
    pub fn mark_debt_paid(&mut self, id: Uuid) -> bool {
        let touched = self.store.update_debt(id, |debt| {
            debt.status = DebtStatus::Paid;
            debt.paid_at = Some(Utc::now());
        });
        if touched {
            self.bump();
        }
        touched
    }

    // Settings

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    pub fn update_settings<F: FnOnce(&mut Settings)>(&mut self, f: F) {
        f(self.store.settings_mut());
        self.bump();
    }

    // Snapshot boundary

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of_store(&self.store)
    }

    pub fn export_snapshot_json(&self) -> Result<String, LedgerError> {
        self.snapshot().to_json_pretty()
    }

    /// Replaces the synced collections wholesale from a snapshot. Parsing
    /// happens before any mutation, so malformed input leaves existing
    /// state untouched. Debts are outside the snapshot and survive.
    pub fn import_snapshot(&mut self, json: &str) -> Result<(), LedgerError> {
        let snapshot = Snapshot::from_json(json)?;
        self.store.replace_collections(
            snapshot.wallets,
            snapshot.assets,
            snapshot.transactions,
            snapshot.budgets,
            snapshot.goals,
            snapshot.subscriptions,
            snapshot.settings,
        );
        tracing::debug!("snapshot imported");
        self.bump();
        Ok(())
    }
}

fn validate(transaction: &Transaction) -> Result<(), LedgerError> {
    if transaction.amount_minor <= 0 {
        return Err(LedgerError::InvalidAmount(transaction.amount_minor));
    }
    match transaction.kind {
        TransactionKind::Transfer => match transaction.wallet_target_id {
            None => Err(LedgerError::InvalidTransaction(
                "transfer requires a target wallet".into(),
            )),
            Some(target) if target == transaction.wallet_id => Err(
                LedgerError::InvalidTransaction("transfer cannot target its own wallet".into()),
            ),
            Some(_) => Ok(()),
        },
        _ if transaction.wallet_target_id.is_some() => Err(LedgerError::InvalidTransaction(
            "only transfers carry a target wallet".into(),
        )),
        _ => Ok(()),
    }
}
