//! In-memory `EmployeeRepository` implementation.
//!
//! Writes are staged per identifier and handed to the unit of work on
//! `save_changes`. Reads merge the committed rows with the staged writes so
//! a unit of work always sees its own changes. The first version observed
//! for each row is remembered and attached to staged updates and deletes for
//! the store's optimistic concurrency check.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{EmployeePersistenceError, EmployeeRepository};
use crate::domain::{Employee, EmployeeId};

use super::connection::StoreConnection;
use super::store::{PendingChange, StoredEmployee};

pub struct InMemoryEmployeeRepository {
    connection: Arc<Mutex<StoreConnection>>,
    pending: BTreeMap<EmployeeId, PendingChange>,
    versions: HashMap<EmployeeId, u64>,
}

impl InMemoryEmployeeRepository {
    pub(super) fn new(connection: Arc<Mutex<StoreConnection>>) -> Self {
        Self {
            connection,
            pending: BTreeMap::new(),
            versions: HashMap::new(),
        }
    }

    /// Hand staged writes to the caller, leaving the repository clean.
    pub(super) fn take_pending(&mut self) -> Vec<PendingChange> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Drop remembered versions so later reads observe fresh ones.
    pub(super) fn forget_versions(&mut self) {
        self.versions.clear();
    }

    fn observe(&mut self, row: &StoredEmployee) -> u64 {
        let Some(id) = row.employee.id() else {
            return row.version;
        };
        *self.versions.entry(id).or_insert(row.version)
    }

    async fn committed_row(&mut self, id: EmployeeId) -> Option<(Employee, u64)> {
        let row = {
            let mut connection = self.connection.lock().await;
            connection.with_state(|state| state.row(id).cloned()).await
        }?;
        let version = self.observe(&row);
        Some((row.employee, version))
    }

    /// Every row this unit of work can see, ordered by identifier.
    async fn visible(&mut self) -> Vec<Employee> {
        let rows: Vec<StoredEmployee> = {
            let mut connection = self.connection.lock().await;
            connection
                .with_state(|state| state.rows().cloned().collect())
                .await
        };
        let mut merged = BTreeMap::new();
        for row in rows {
            self.observe(&row);
            if let Some(id) = row.employee.id() {
                merged.insert(id, row.employee);
            }
        }
        for (id, change) in &self.pending {
            match change.visible() {
                Some(employee) => merged.insert(*id, employee.clone()),
                None => merged.remove(id),
            };
        }
        merged.into_values().collect()
    }

    async fn visible_by_id(&mut self, id: EmployeeId) -> Option<Employee> {
        if let Some(change) = self.pending.get(&id) {
            return change.visible().cloned();
        }
        self.committed_row(id).await.map(|(employee, _)| employee)
    }
}

/// Order by last name, then first name, ignoring case. Ties keep id order.
fn sort_by_name(employees: &mut [Employee]) {
    employees.sort_by_cached_key(|employee| {
        (
            employee.last_name().to_lowercase(),
            employee.first_name().to_lowercase(),
        )
    });
}

fn missing_id(operation: &str) -> EmployeePersistenceError {
    EmployeePersistenceError::persistence_failure(format!(
        "cannot {operation} an employee without an identifier"
    ))
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn get_all(&mut self) -> Result<Vec<Employee>, EmployeePersistenceError> {
        let mut employees = self.visible().await;
        sort_by_name(&mut employees);
        Ok(employees)
    }

    async fn get_by_id(
        &mut self,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeePersistenceError> {
        Ok(self.visible_by_id(id).await)
    }

    async fn get_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<Employee>, EmployeePersistenceError> {
        Ok(self
            .visible()
            .await
            .into_iter()
            .find(|employee| employee.has_email(email)))
    }

    async fn get_by_department(
        &mut self,
        department: &str,
    ) -> Result<Vec<Employee>, EmployeePersistenceError> {
        let department = department.to_lowercase();
        let mut employees: Vec<Employee> = self
            .visible()
            .await
            .into_iter()
            .filter(|employee| employee.department().to_lowercase() == department)
            .collect();
        sort_by_name(&mut employees);
        Ok(employees)
    }

    async fn get_active(&mut self) -> Result<Vec<Employee>, EmployeePersistenceError> {
        let mut employees: Vec<Employee> = self
            .visible()
            .await
            .into_iter()
            .filter(Employee::is_active)
            .collect();
        sort_by_name(&mut employees);
        Ok(employees)
    }

    async fn add(&mut self, mut employee: Employee) -> Result<Employee, EmployeePersistenceError> {
        if employee.id().is_some() {
            return Err(EmployeePersistenceError::persistence_failure(
                "cannot add an employee that already has an identifier",
            ));
        }
        let id = {
            let mut connection = self.connection.lock().await;
            connection.with_state(|state| state.allocate_id()).await?
        };
        employee.assign_id(id);
        self.pending.insert(id, PendingChange::Insert(employee.clone()));
        Ok(employee)
    }

    async fn update(
        &mut self,
        mut employee: Employee,
    ) -> Result<Employee, EmployeePersistenceError> {
        let id = employee.id().ok_or_else(|| missing_id("update"))?;
        let change = match self.pending.get(&id) {
            Some(PendingChange::Insert(staged)) => {
                employee.keep_created_at(staged.created_at());
                PendingChange::Insert(employee.clone())
            }
            Some(PendingChange::Update {
                employee: staged,
                expected_version,
            }) => {
                employee.keep_created_at(staged.created_at());
                PendingChange::Update {
                    employee: employee.clone(),
                    expected_version: *expected_version,
                }
            }
            Some(PendingChange::Delete { .. }) => {
                return Err(EmployeePersistenceError::not_found(id.get()));
            }
            None => {
                let (current, expected_version) = self
                    .committed_row(id)
                    .await
                    .ok_or_else(|| EmployeePersistenceError::not_found(id.get()))?;
                employee.keep_created_at(current.created_at());
                PendingChange::Update {
                    employee: employee.clone(),
                    expected_version,
                }
            }
        };
        self.pending.insert(id, change);
        Ok(employee)
    }

    async fn delete(&mut self, id: EmployeeId) -> Result<bool, EmployeePersistenceError> {
        match self.pending.get(&id) {
            Some(PendingChange::Insert(_)) => {
                self.pending.remove(&id);
                Ok(true)
            }
            Some(PendingChange::Update {
                expected_version, ..
            }) => {
                let expected_version = *expected_version;
                self.pending.insert(
                    id,
                    PendingChange::Delete {
                        id,
                        expected_version,
                    },
                );
                Ok(true)
            }
            Some(PendingChange::Delete { .. }) => Ok(false),
            None => {
                let Some((_, expected_version)) = self.committed_row(id).await else {
                    return Ok(false);
                };
                self.pending.insert(
                    id,
                    PendingChange::Delete {
                        id,
                        expected_version,
                    },
                );
                Ok(true)
            }
        }
    }

    async fn exists(&mut self, id: EmployeeId) -> Result<bool, EmployeePersistenceError> {
        Ok(self.visible_by_id(id).await.is_some())
    }

    async fn email_exists(
        &mut self,
        email: &str,
        exclude_id: Option<EmployeeId>,
    ) -> Result<bool, EmployeePersistenceError> {
        Ok(self.visible().await.iter().any(|employee| {
            employee.has_email(email) && (exclude_id.is_none() || employee.id() != exclude_id)
        }))
    }
}
