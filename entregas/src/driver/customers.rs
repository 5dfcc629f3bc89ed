// Entregas
// Copyright 2025 The Entregas Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Operations on customers.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::model::*;
use entregas_core::db::{BareTx, Db, DbError};
use entregas_core::driver::{DriverError, DriverResult};

/// Returns the error to report when the customer `id` does not exist.
fn not_found(id: CustomerId) -> DriverError {
    DriverError::NotFound(format!("Customer {} not found", id))
}

/// Checks that no customer other than `id` owns the unique properties in `details`.
async fn ensure_unique<T: EntregasTx>(
    tx: &mut T,
    details: &CustomerDetails,
    id: Option<CustomerId>,
) -> DriverResult<()> {
    match tx.find_customer_by_tax_id(details.tax_id()).await? {
        Some(other) if Some(*other.id()) != id => {
            return Err(DriverError::AlreadyExists(format!(
                "Tax id {} is already registered",
                details.tax_id().as_str()
            )));
        }
        _ => (),
    }
    match tx.find_customer_by_email(details.email()).await? {
        Some(other) if Some(*other.id()) != id => {
            return Err(DriverError::AlreadyExists(format!(
                "Email {} is already registered",
                details.email().as_str()
            )));
        }
        _ => (),
    }
    Ok(())
}

/// Maps a uniqueness violation detected by the database after `ensure_unique` passed.
fn map_unique_violation(e: DbError) -> DriverError {
    match e {
        DbError::AlreadyExists => {
            DriverError::AlreadyExists("Tax id or email is already registered".to_owned())
        }
        e => e.into(),
    }
}

impl<D> Driver<D>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    /// Gets all customers.
    pub(crate) async fn get_customers(self) -> DriverResult<Vec<Customer>> {
        let mut tx = self.db.begin().await?;
        let customers = tx.get_customers().await?;
        tx.commit().await?;
        Ok(customers)
    }

    /// Gets the customer identified by `id`.
    pub(crate) async fn get_customer(self, id: CustomerId) -> DriverResult<Customer> {
        let mut tx = self.db.begin().await?;
        let customer = tx.find_customer_by_id(id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;
        Ok(customer)
    }

    /// Registers a new customer with `fields`.
    pub(crate) async fn create_customer(self, fields: CustomerFields) -> DriverResult<Customer> {
        let details = CustomerDetails::try_from(fields)?;

        let mut tx = self.db.begin().await?;
        ensure_unique(&mut tx, &details, None).await?;
        let customer = tx.create_customer(&details).await.map_err(map_unique_violation)?;
        tx.commit().await?;
        Ok(customer)
    }

    /// Updates the customer identified by `id` with the fields set in `fields`.
    pub(crate) async fn update_customer(
        self,
        id: CustomerId,
        fields: CustomerFields,
    ) -> DriverResult<Customer> {
        let mut tx = self.db.begin().await?;
        let current = tx.find_customer_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let details = CustomerDetails::try_from(fields.merge(current.details()))?;
        ensure_unique(&mut tx, &details, Some(id)).await?;
        tx.update_customer(id, &details).await.map_err(map_unique_violation)?;
        tx.commit().await?;
        Ok(Customer::new(id, details))
    }

    /// Deletes the customer identified by `id`, which must not have any orders.
    pub(crate) async fn delete_customer(self, id: CustomerId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        if tx.find_customer_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }
        let orders = tx.find_orders_by_customer_id(id).await?;
        if !orders.is_empty() {
            return Err(DriverError::RelationshipConflict(format!(
                "Customer {} has {} order(s) and cannot be deleted",
                id,
                orders.len()
            )));
        }
        tx.delete_customer(id).await?;
        tx.commit().await?;
        Ok(())
    }
}
