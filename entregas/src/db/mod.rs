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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use entregas_core::db::{BareTx, DbResult};

pub(crate) mod postgres;
#[cfg(test)]
pub(crate) mod sqlite;

/// A transaction with high-level operations that deal with our types.
///
/// Lookups that may legitimately find nothing return `None`.  Updates and deletions of entries
/// that do not exist fail with `DbError::NotFound`.
#[async_trait::async_trait]
pub(crate) trait EntregasTx: BareTx {
    /// Gets all customers sorted by identifier.
    async fn get_customers(&mut self) -> DbResult<Vec<Customer>>;

    /// Gets the customer identified by `id`.
    async fn find_customer_by_id(&mut self, id: CustomerId) -> DbResult<Option<Customer>>;

    /// Gets the customer that owns `tax_id`.
    async fn find_customer_by_tax_id(&mut self, tax_id: &TaxId) -> DbResult<Option<Customer>>;

    /// Gets the customer that owns `email`.
    async fn find_customer_by_email(
        &mut self,
        email: &EmailAddress,
    ) -> DbResult<Option<Customer>>;

    /// Creates a new customer with `details` and a fresh identifier.
    async fn create_customer(&mut self, details: &CustomerDetails) -> DbResult<Customer>;

    /// Replaces the details of the customer identified by `id`.
    async fn update_customer(&mut self, id: CustomerId, details: &CustomerDetails)
    -> DbResult<()>;

    /// Deletes the customer identified by `id`.
    async fn delete_customer(&mut self, id: CustomerId) -> DbResult<()>;

    /// Gets all orders sorted by identifier.
    async fn get_orders(&mut self) -> DbResult<Vec<Order>>;

    /// Gets the order identified by `id`.
    async fn find_order_by_id(&mut self, id: OrderId) -> DbResult<Option<Order>>;

    /// Gets the properties of the order identified by `id` that determine its price.
    async fn find_order_pricing_inputs(&mut self, id: OrderId) -> DbResult<Option<PricingInputs>>;

    /// Gets all orders placed by the customer identified by `id`, sorted by identifier.
    async fn find_orders_by_customer_id(&mut self, id: CustomerId) -> DbResult<Vec<Order>>;

    /// Creates a new order with `details` and a fresh identifier.
    async fn create_order(&mut self, details: &OrderDetails) -> DbResult<Order>;

    /// Replaces the details of the order identified by `id`.
    async fn update_order(&mut self, id: OrderId, details: &OrderDetails) -> DbResult<()>;

    /// Deletes the order identified by `id`.
    async fn delete_order(&mut self, id: OrderId) -> DbResult<()>;

    /// Gets all deliveries sorted by identifier.
    async fn get_deliveries(&mut self) -> DbResult<Vec<Delivery>>;

    /// Gets the delivery identified by `id`.
    async fn find_delivery_by_id(&mut self, id: DeliveryId) -> DbResult<Option<Delivery>>;

    /// Gets the delivery of the order identified by `id`.
    async fn find_delivery_by_order_id(&mut self, id: OrderId) -> DbResult<Option<Delivery>>;

    /// Creates a new delivery with `details` and a fresh identifier.
    async fn create_delivery(&mut self, details: &DeliveryDetails) -> DbResult<Delivery>;

    /// Replaces the details of the delivery identified by `id`.
    async fn update_delivery(&mut self, id: DeliveryId, details: &DeliveryDetails)
    -> DbResult<()>;

    /// Deletes the delivery identified by `id`.
    async fn delete_delivery(&mut self, id: DeliveryId) -> DbResult<()>;
}
