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

//! Operations on orders.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::driver::pricing::quote;
use crate::model::*;
use entregas_core::db::{BareTx, Db};
use entregas_core::driver::{DriverError, DriverResult};
use log::info;

/// Returns the error to report when the order `id` does not exist.
fn not_found(id: OrderId) -> DriverError {
    DriverError::NotFound(format!("Order {} not found", id))
}

/// Checks that the customer `id` referenced by an order exists.
async fn ensure_customer_exists<T: EntregasTx>(tx: &mut T, id: CustomerId) -> DriverResult<()> {
    match tx.find_customer_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(DriverError::NotFound(format!("Customer {} does not exist", id))),
    }
}

impl<D> Driver<D>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    /// Gets all orders.
    pub(crate) async fn get_orders(self) -> DriverResult<Vec<Order>> {
        let mut tx = self.db.begin().await?;
        let orders = tx.get_orders().await?;
        tx.commit().await?;
        Ok(orders)
    }

    /// Gets the order identified by `id`.
    pub(crate) async fn get_order(self, id: OrderId) -> DriverResult<Order> {
        let mut tx = self.db.begin().await?;
        let order = tx.find_order_by_id(id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;
        Ok(order)
    }

    /// Places a new order with `fields` and returns it along with its price.
    pub(crate) async fn create_order(self, fields: OrderFields) -> DriverResult<QuotedOrder> {
        let details = OrderDetails::try_from(fields)?;

        let price = quote(&details.pricing_inputs())?;

        let mut tx = self.db.begin().await?;
        ensure_customer_exists(&mut tx, *details.customer_id()).await?;
        let order = tx.create_order(&details).await?;
        tx.commit().await?;

        Ok(QuotedOrder::new(order, price))
    }

    /// Updates the order identified by `id` with the fields set in `fields` and returns it along
    /// with its new price.
    ///
    /// If the order already has a delivery, the delivery is repriced to match.
    pub(crate) async fn update_order(
        self,
        id: OrderId,
        fields: OrderFields,
    ) -> DriverResult<QuotedOrder> {
        let mut tx = self.db.begin().await?;
        let current = tx.find_order_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let details = OrderDetails::try_from(fields.merge(current.details()))?;
        if details.customer_id() != current.details().customer_id() {
            ensure_customer_exists(&mut tx, *details.customer_id()).await?;
        }
        let price = quote(&details.pricing_inputs())?;
        tx.update_order(id, &details).await?;

        if let Some(delivery) = tx.find_delivery_by_order_id(id).await? {
            if *delivery.details().price() != price {
                info!("Repricing delivery {} after update of order {}", delivery.id(), id);
                tx.update_delivery(*delivery.id(), &delivery.details().repriced(price)).await?;
            }
        }
        tx.commit().await?;

        Ok(QuotedOrder::new(Order::new(id, details), price))
    }

    /// Deletes the order identified by `id` along with its delivery, if any.
    pub(crate) async fn delete_order(self, id: OrderId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        if tx.find_order_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }
        if let Some(delivery) = tx.find_delivery_by_order_id(id).await? {
            tx.delete_delivery(*delivery.id()).await?;
        }
        tx.delete_order(id).await?;
        tx.commit().await?;
        Ok(())
    }
}
