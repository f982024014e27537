//! Account tree helpers.
//!
//! Parent links are caller data, so every walk here is cycle-checked
//! instead of trusting the stored `parent_id` values.

use std::collections::{HashSet, VecDeque};

use uuid::Uuid;

use crate::account::Account;
use crate::error::{DomainError, DomainResult};

/// Collect the ancestor chain of `start`, nearest parent first.
///
/// `parent_of` returns `None` when an id does not resolve to an account and
/// `Some(None)` for a root.
pub fn ancestors<F>(start: Uuid, parent_of: F) -> DomainResult<Vec<Uuid>>
where
    F: Fn(Uuid) -> Option<Option<Uuid>>,
{
    let mut chain = Vec::new();
    let mut seen = HashSet::from([start]);
    let mut current =
        parent_of(start).ok_or_else(|| DomainError::not_found(format!("account {}", start)))?;

    while let Some(parent) = current {
        if !seen.insert(parent) {
            return Err(DomainError::invariant(format!(
                "account tree contains a cycle through {}",
                parent
            )));
        }
        chain.push(parent);
        current = parent_of(parent)
            .ok_or_else(|| DomainError::not_found(format!("parent account {}", parent)))?;
    }

    Ok(chain)
}

/// Would setting `account_id`'s parent to `proposed_parent` close a loop?
pub fn would_create_cycle<F>(account_id: Uuid, proposed_parent: Uuid, parent_of: F) -> DomainResult<bool>
where
    F: Fn(Uuid) -> Option<Option<Uuid>>,
{
    if account_id == proposed_parent {
        return Ok(true);
    }
    let chain = ancestors(proposed_parent, parent_of)?;
    Ok(chain.contains(&account_id))
}

/// Direct children of `parent_id`, in storage order.
pub fn children_of(accounts: &[Account], parent_id: Uuid) -> Vec<Account> {
    accounts
        .iter()
        .filter(|a| a.parent_id == Some(parent_id))
        .cloned()
        .collect()
}

/// All transitive descendants of `root`, breadth first.
pub fn descendants_of(accounts: &[Account], root: Uuid) -> Vec<Account> {
    let mut result = Vec::new();
    let mut seen = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(parent) = queue.pop_front() {
        for child in accounts.iter().filter(|a| a.parent_id == Some(parent)) {
            if seen.insert(child.id) {
                queue.push_back(child.id);
                result.push(child.clone());
            }
        }
    }

    result
}
