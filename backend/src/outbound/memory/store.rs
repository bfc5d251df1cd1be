//! Shared in-memory employee table.
//!
//! Rows are keyed by identifier and carry a version counter that is bumped
//! on every write. A unique index on the lower-cased email is enforced when
//! staged changes are applied. All access goes through a single
//! `tokio::sync::Mutex`, which also acts as the writer lock held by open
//! transactions.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::ports::{CONCURRENCY_CONFLICT_MESSAGE, EmployeePersistenceError};
use crate::domain::{Employee, EmployeeId};

/// Handle to the shared employee table. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeStore {
    pub(super) state: Arc<Mutex<StoreState>>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed rows.
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[derive(Debug, Clone)]
pub(super) struct StoredEmployee {
    pub(super) employee: Employee,
    pub(super) version: u64,
}

/// A write staged by a repository, waiting for `save_changes`.
#[derive(Debug, Clone)]
pub(super) enum PendingChange {
    Insert(Employee),
    Update {
        employee: Employee,
        expected_version: u64,
    },
    Delete {
        id: EmployeeId,
        expected_version: u64,
    },
}

impl PendingChange {
    /// The row as this unit of work sees it, or `None` once deleted.
    pub(super) fn visible(&self) -> Option<&Employee> {
        match self {
            Self::Insert(employee) | Self::Update { employee, .. } => Some(employee),
            Self::Delete { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct StoreState {
    rows: BTreeMap<EmployeeId, StoredEmployee>,
    last_id: i32,
}

impl StoreState {
    pub(super) fn row(&self, id: EmployeeId) -> Option<&StoredEmployee> {
        self.rows.get(&id)
    }

    pub(super) fn rows(&self) -> impl Iterator<Item = &StoredEmployee> {
        self.rows.values()
    }

    /// Reserve the next identifier. Reserved identifiers are not reused even
    /// if the insert is never saved, unless a surrounding transaction rolls
    /// back.
    pub(super) fn allocate_id(&mut self) -> Result<EmployeeId, EmployeePersistenceError> {
        let next = self.last_id.checked_add(1).ok_or_else(|| {
            EmployeePersistenceError::persistence_failure("identifier space exhausted")
        })?;
        let id = EmployeeId::new(next)
            .map_err(|err| EmployeePersistenceError::persistence_failure(err.to_string()))?;
        self.last_id = next;
        Ok(id)
    }

    /// Apply staged changes atomically and return the number of rows
    /// affected. On error the table is left untouched.
    pub(super) fn apply(
        &mut self,
        changes: Vec<PendingChange>,
    ) -> Result<usize, EmployeePersistenceError> {
        let mut working = self.rows.clone();
        let mut affected = 0;
        for change in changes {
            apply_one(&mut working, change)?;
            affected += 1;
        }
        check_unique_emails(&working)?;
        self.rows = working;
        Ok(affected)
    }
}

fn apply_one(
    rows: &mut BTreeMap<EmployeeId, StoredEmployee>,
    change: PendingChange,
) -> Result<(), EmployeePersistenceError> {
    match change {
        PendingChange::Insert(employee) => {
            let id = employee.id().ok_or_else(|| {
                EmployeePersistenceError::persistence_failure("cannot insert a row without an id")
            })?;
            if rows.contains_key(&id) {
                return Err(EmployeePersistenceError::persistence_failure(format!(
                    "primary key violation for id {id}"
                )));
            }
            rows.insert(
                id,
                StoredEmployee {
                    employee,
                    version: 1,
                },
            );
        }
        PendingChange::Update {
            mut employee,
            expected_version,
        } => {
            let id = employee.id().ok_or_else(|| {
                EmployeePersistenceError::persistence_failure("cannot update a row without an id")
            })?;
            let row = current_row(rows, id, expected_version)?;
            employee.keep_created_at(row.employee.created_at());
            row.employee = employee;
            row.version += 1;
        }
        PendingChange::Delete {
            id,
            expected_version,
        } => {
            current_row(rows, id, expected_version)?;
            rows.remove(&id);
        }
    }
    Ok(())
}

/// The row to overwrite, provided nobody else wrote it since it was read.
fn current_row(
    rows: &mut BTreeMap<EmployeeId, StoredEmployee>,
    id: EmployeeId,
    expected_version: u64,
) -> Result<&mut StoredEmployee, EmployeePersistenceError> {
    match rows.get_mut(&id) {
        Some(row) if row.version == expected_version => Ok(row),
        _ => Err(EmployeePersistenceError::concurrency_conflict(
            CONCURRENCY_CONFLICT_MESSAGE,
        )),
    }
}

fn check_unique_emails(
    rows: &BTreeMap<EmployeeId, StoredEmployee>,
) -> Result<(), EmployeePersistenceError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows.values() {
        let email = row.employee.email().to_lowercase();
        if !seen.insert(email) {
            return Err(EmployeePersistenceError::persistence_failure(format!(
                "unique index violation on email {}",
                row.employee.email()
            )));
        }
    }
    Ok(())
}
