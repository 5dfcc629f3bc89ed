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

//! Operations on deliveries.

use crate::db::EntregasTx;
use crate::driver::Driver;
use crate::driver::pricing::quote;
use crate::model::*;
use entregas_core::db::{BareTx, Db, DbError};
use entregas_core::driver::{DriverError, DriverResult};

/// Returns the error to report when the delivery `id` does not exist.
fn not_found(id: DeliveryId) -> DriverError {
    DriverError::NotFound(format!("Delivery {} not found", id))
}

/// Returns the error to report when the order `id` already has a delivery.
fn already_delivered(id: OrderId) -> DriverError {
    DriverError::AlreadyExists(format!("Order {} already has a delivery", id))
}

/// Computes the details of the delivery described by `request`, pricing it from its order.
async fn price_request<T: EntregasTx>(
    tx: &mut T,
    request: DeliveryRequest,
) -> DriverResult<DeliveryDetails> {
    let order_id = *request.order_id();
    match tx.find_order_pricing_inputs(order_id).await? {
        Some(inputs) => Ok(DeliveryDetails::priced(request, quote(&inputs)?)),
        None => Err(DriverError::NotFound(format!("Order {} does not exist", order_id))),
    }
}

impl<D> Driver<D>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    /// Gets all deliveries.
    pub(crate) async fn get_deliveries(self) -> DriverResult<Vec<Delivery>> {
        let mut tx = self.db.begin().await?;
        let deliveries = tx.get_deliveries().await?;
        tx.commit().await?;
        Ok(deliveries)
    }

    /// Gets the delivery identified by `id`.
    pub(crate) async fn get_delivery(self, id: DeliveryId) -> DriverResult<Delivery> {
        let mut tx = self.db.begin().await?;
        let delivery = tx.find_delivery_by_id(id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;
        Ok(delivery)
    }

    /// Creates the delivery of an order as described by `fields`, pricing it from the order.
    pub(crate) async fn create_delivery(self, fields: DeliveryFields) -> DriverResult<Delivery> {
        let request = DeliveryRequest::try_from(fields)?;
        let order_id = *request.order_id();

        let mut tx = self.db.begin().await?;
        let details = price_request(&mut tx, request).await?;
        if tx.find_delivery_by_order_id(order_id).await?.is_some() {
            return Err(already_delivered(order_id));
        }
        let delivery = match tx.create_delivery(&details).await {
            Ok(delivery) => delivery,
            Err(DbError::AlreadyExists) => return Err(already_delivered(order_id)),
            Err(e) => return Err(e.into()),
        };
        tx.commit().await?;
        Ok(delivery)
    }

    /// Updates the delivery identified by `id` with the fields set in `fields`.
    ///
    /// The price is always recomputed from the order the delivery ends up pointing to.
    pub(crate) async fn update_delivery(
        self,
        id: DeliveryId,
        fields: DeliveryFields,
    ) -> DriverResult<Delivery> {
        let mut tx = self.db.begin().await?;
        let current = tx.find_delivery_by_id(id).await?.ok_or_else(|| not_found(id))?;
        let request = DeliveryRequest::try_from(fields.merge(current.details()))?;
        let order_id = *request.order_id();
        let details = price_request(&mut tx, request).await?;
        match tx.find_delivery_by_order_id(order_id).await? {
            Some(other) if *other.id() != id => return Err(already_delivered(order_id)),
            _ => (),
        }
        match tx.update_delivery(id, &details).await {
            Ok(()) => (),
            Err(DbError::AlreadyExists) => return Err(already_delivered(order_id)),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        Ok(Delivery::new(id, details))
    }

    /// Deletes the delivery identified by `id`.
    pub(crate) async fn delete_delivery(self, id: DeliveryId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        match tx.delete_delivery(id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => return Err(not_found(id)),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        Ok(())
    }
}
