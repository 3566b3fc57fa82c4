// token-core/src/ledger.rs

use crate::{Address, Amount, CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Account state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Account balance
    pub balance: Amount,
    /// Whether this address carries code (contract account)
    pub is_contract: bool,
}

impl Account {
    /// Create a new empty account
    pub fn new() -> Self {
        Self {
            balance: Amount::zero(),
            is_contract: false,
        }
    }

    /// Add to balance
    pub fn add_balance(&mut self, amount: &Amount) -> CoreResult<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| CoreError::Overflow("Balance overflow".into()))?;
        Ok(())
    }

    /// Subtract from balance
    pub fn sub_balance(&mut self, amount: &Amount) -> CoreResult<()> {
        self.balance = self.balance.checked_sub(amount).ok_or_else(|| {
            CoreError::InsufficientBalance {
                required: amount.clone(),
                available: self.balance.clone(),
            }
        })?;
        Ok(())
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

/// The fungible-token ledger: exclusive owner of the balance mapping,
/// allowance mapping and the total-supply counter.
///
/// The ledger enforces the standard conservation invariants (transfers
/// move value, mint/burn are the only supply mutations, balances never
/// go negative) and rejects zero-address parties and self-transfers.
/// All policy decisions (taxes, guards, triggers) live above it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    accounts: HashMap<Address, Account>,
    allowances: HashMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of an address (zero for unknown accounts)
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.accounts
            .get(address)
            .map(|a| a.balance.clone())
            .unwrap_or_else(Amount::zero)
    }

    /// Current total supply
    pub fn total_supply(&self) -> &Amount {
        &self.total_supply
    }

    /// Flag an address as a contract account
    pub fn mark_contract(&mut self, address: Address) {
        self.accounts.entry(address).or_default().is_contract = true;
    }

    /// Whether an address carries code
    pub fn is_contract(&self, address: &Address) -> bool {
        self.accounts
            .get(address)
            .map(|a| a.is_contract)
            .unwrap_or(false)
    }

    /// Mint new tokens to an address, growing total supply
    pub fn mint(&mut self, to: Address, amount: &Amount) -> CoreResult<()> {
        if to.is_zero() {
            return Err(CoreError::ZeroAddress);
        }
        self.accounts.entry(to).or_default().add_balance(amount)?;
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| CoreError::Overflow("Total supply overflow".into()))?;
        Ok(())
    }

    /// Burn tokens from an address, shrinking total supply
    pub fn burn(&mut self, from: Address, amount: &Amount) -> CoreResult<()> {
        let account = self
            .accounts
            .get_mut(&from)
            .ok_or_else(|| CoreError::InsufficientBalance {
                required: amount.clone(),
                available: Amount::zero(),
            })?;
        account.sub_balance(amount)?;
        self.total_supply =
            self.total_supply
                .checked_sub(amount)
                .ok_or_else(|| CoreError::SupplyUnderflow {
                    amount: amount.clone(),
                    supply: self.total_supply.clone(),
                })?;
        Ok(())
    }

    /// Move value between accounts. Zero-amount transfers are accepted
    /// as no-ops; zero-address parties and self-transfers are rejected.
    pub fn transfer(&mut self, from: Address, to: Address, amount: &Amount) -> CoreResult<()> {
        if from.is_zero() || to.is_zero() {
            return Err(CoreError::ZeroAddress);
        }
        if from == to {
            return Err(CoreError::SelfTransfer);
        }
        if amount.is_zero() {
            return Ok(());
        }

        self.accounts
            .get_mut(&from)
            .ok_or_else(|| CoreError::InsufficientBalance {
                required: amount.clone(),
                available: Amount::zero(),
            })?
            .sub_balance(amount)?;
        self.accounts.entry(to).or_default().add_balance(amount)?;
        Ok(())
    }

    /// Set a spending allowance
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) -> CoreResult<()> {
        if owner.is_zero() || spender.is_zero() {
            return Err(CoreError::ZeroAddress);
        }
        self.allowances.insert((owner, spender), amount);
        Ok(())
    }

    /// Remaining allowance from `owner` to `spender`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .cloned()
            .unwrap_or_else(Amount::zero)
    }

    /// Consume part of an allowance; fails without mutating on shortfall
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: &Amount,
    ) -> CoreResult<()> {
        let current = self.allowance(&owner, &spender);
        let remaining =
            current
                .checked_sub(amount)
                .ok_or_else(|| CoreError::InsufficientAllowance {
                    required: amount.clone(),
                    available: current.clone(),
                })?;
        self.allowances.insert((owner, spender), remaining);
        Ok(())
    }

    /// Sum of all account balances (reconciliation helper)
    pub fn balance_sum(&self) -> Amount {
        self.accounts
            .values()
            .fold(Amount::zero(), |acc, a| acc + a.balance.clone())
    }
}
