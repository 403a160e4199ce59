//! In-memory entity collections with identifier-keyed CRUD.
//!
//! The store owns every collection exclusively; mutation is `pub(crate)`
//! so all writes funnel through the [`crate::ledger::Ledger`] surface.
//! Updates and deletes on an id that does not exist are silent no-ops
//! returning `false` — callers confirm existence through reads first.

use uuid::Uuid;

use crate::domain::{
    Asset, Budget, Debt, Goal, Settings, Subscription, Transaction, Wallet,
};

#[derive(Debug, Clone, Default)]
pub struct Store {
    wallets: Vec<Wallet>,
    assets: Vec<Asset>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    goals: Vec<Goal>,
    subscriptions: Vec<Subscription>,
    debts: Vec<Debt>,
    settings: Settings,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Wallets

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn wallet(&self, id: Uuid) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    pub(crate) fn wallet_mut(&mut self, id: Uuid) -> Option<&mut Wallet> {
        self.wallets.iter_mut().find(|w| w.id == id)
    }

    pub(crate) fn add_wallet(&mut self, wallet: Wallet) -> Uuid {
        let id = wallet.id;
        self.wallets.push(wallet);
        id
    }

    pub(crate) fn update_wallet<F: FnOnce(&mut Wallet)>(&mut self, id: Uuid, mutate: F) -> bool {
        match self.wallet_mut(id) {
            Some(wallet) => {
                mutate(wallet);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_wallet(&mut self, id: Uuid) -> bool {
        let before = self.wallets.len();
        self.wallets.retain(|w| w.id != id);
        self.wallets.len() != before
    }

    // Assets

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn asset(&self, id: Uuid) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub(crate) fn add_asset(&mut self, asset: Asset) -> Uuid {
        let id = asset.id;
        self.assets.push(asset);
        id
    }

    pub(crate) fn update_asset<F: FnOnce(&mut Asset)>(&mut self, id: Uuid, mutate: F) -> bool {
        match self.assets.iter_mut().find(|a| a.id == id) {
            Some(asset) => {
                mutate(asset);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_asset(&mut self, id: Uuid) -> bool {
        let before = self.assets.len();
        self.assets.retain(|a| a.id != id);
        self.assets.len() != before
    }

    // Transactions

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    /// Overwrites the stored transaction carrying the same id, preserving
    /// its position in the collection.
    pub(crate) fn replace_transaction(&mut self, transaction: Transaction) -> bool {
        match self.transactions.iter_mut().find(|t| t.id == transaction.id) {
            Some(slot) => {
                *slot = transaction;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        Some(self.transactions.remove(index))
    }

    // Budgets

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    pub(crate) fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        id
    }

    pub(crate) fn update_budget<F: FnOnce(&mut Budget)>(&mut self, id: Uuid, mutate: F) -> bool {
        match self.budgets.iter_mut().find(|b| b.id == id) {
            Some(budget) => {
                mutate(budget);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_budget(&mut self, id: Uuid) -> bool {
        let before = self.budgets.len();
        self.budgets.retain(|b| b.id != id);
        self.budgets.len() != before
    }

    // Goals

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub(crate) fn goal_mut(&mut self, id: Uuid) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    pub(crate) fn add_goal(&mut self, goal: Goal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        id
    }

    pub(crate) fn update_goal<F: FnOnce(&mut Goal)>(&mut self, id: Uuid, mutate: F) -> bool {
        match self.goal_mut(id) {
            Some(goal) => {
                mutate(goal);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_goal(&mut self, id: Uuid) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.goals.len() != before
    }

    // Subscriptions

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn subscription(&self, id: Uuid) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.id == id)
    }

    pub(crate) fn subscription_mut(&mut self, id: Uuid) -> Option<&mut Subscription> {
        self.subscriptions.iter_mut().find(|s| s.id == id)
    }

    pub(crate) fn add_subscription(&mut self, subscription: Subscription) -> Uuid {
        let id = subscription.id;
        self.subscriptions.push(subscription);
        id
    }

    pub(crate) fn update_subscription<F: FnOnce(&mut Subscription)>(
        &mut self,
        id: Uuid,
        mutate: F,
    ) -> bool {
        match self.subscription_mut(id) {
            Some(subscription) => {
                mutate(subscription);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_subscription(&mut self, id: Uuid) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    // Debts

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn debt(&self, id: Uuid) -> Option<&Debt> {
        self.debts.iter().find(|d| d.id == id)
    }

    pub(crate) fn add_debt(&mut self, debt: Debt) -> Uuid {
        let id = debt.id;
        self.debts.push(debt);
        id
    }

    pub(crate) fn update_debt<F: FnOnce(&mut Debt)>(&mut self, id: Uuid, mutate: F) -> bool {
        match self.debts.iter_mut().find(|d| d.id == id) {
            Some(debt) => {
                mutate(debt);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_debt(&mut self, id: Uuid) -> bool {
        let before = self.debts.len();
        self.debts.retain(|d| d.id != id);
        self.debts.len() != before
    }

    // Settings

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Replaces the synced collections wholesale (snapshot import). Debts
    /// are not part of the snapshot contract and are left untouched.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn replace_collections(
        &mut self,
        wallets: Vec<Wallet>,
        assets: Vec<Asset>,
        transactions: Vec<Transaction>,
        budgets: Vec<Budget>,
        goals: Vec<Goal>,
        subscriptions: Vec<Subscription>,
        settings: Settings,
    ) {
        self.wallets = wallets;
        self.assets = assets;
        self.transactions = transactions;
        self.budgets = budgets;
        self.goals = goals;
        self.subscriptions = subscriptions;
        self.settings = settings;
    }
}
