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

//! Implementation of the database abstraction using PostgreSQL.

use crate::db::EntregasTx;
use crate::model::*;
use entregas_core::db::postgres::{map_sqlx_error, run_schema};
use entregas_core::db::{BareTx, DbResult, ensure_one_row};
use futures::TryStreamExt;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use time::Date;

/// Schema to use to initialize the production database.
const SCHEMA: &str = include_str!("postgres.sql");

/// Columns to fetch when loading a whole customer.
const CUSTOMER_COLUMNS: &str = "id, name, surname, tax_id, phone, email, street, number, \
    neighborhood, state, postal_code, city";

/// Columns to fetch when loading a whole order.
const ORDER_COLUMNS: &str =
    "id, order_date, urgent, distance, weight, rate_per_km, rate_per_kg, customer_id, status";

/// Columns to fetch when loading a whole delivery.
const DELIVERY_COLUMNS: &str = "id, order_id, status, distance_cost, weight_cost, surcharge, \
    discount, heavy_fee, final_price";

/// A transaction backed by a PostgreSQL database.
pub(crate) struct PostgresEntregasTx {
    /// Inner transaction type to obtain access to the raw sqlx transaction.
    tx: Transaction<'static, Postgres>,
}

impl From<Transaction<'static, Postgres>> for PostgresEntregasTx {
    fn from(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }
}

/// Converts a row with the `CUSTOMER_COLUMNS` into a customer.
fn customer_from_row(row: PgRow) -> DbResult<Customer> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let get = |name: &str| -> DbResult<Option<String>> {
        row.try_get::<String, _>(name).map(Some).map_err(map_sqlx_error)
    };
    let fields = CustomerFields {
        name: get("name")?,
        surname: get("surname")?,
        tax_id: get("tax_id")?,
        phone: get("phone")?,
        email: get("email")?,
        street: get("street")?,
        number: get("number")?,
        neighborhood: get("neighborhood")?,
        state: get("state")?,
        postal_code: get("postal_code")?,
        city: get("city")?,
    };
    Ok(Customer::new(CustomerId::new(id), CustomerDetails::try_from(fields)?))
}

/// Converts a row with the pricing columns of an order into pricing inputs.
fn pricing_inputs_from_row(row: &PgRow) -> DbResult<PricingInputs> {
    let distance: f64 = row.try_get("distance").map_err(map_sqlx_error)?;
    let weight: f64 = row.try_get("weight").map_err(map_sqlx_error)?;
    let rate_per_km: f64 = row.try_get("rate_per_km").map_err(map_sqlx_error)?;
    let rate_per_kg: f64 = row.try_get("rate_per_kg").map_err(map_sqlx_error)?;
    let urgent: bool = row.try_get("urgent").map_err(map_sqlx_error)?;
    Ok(PricingInputs::new(
        Distance::new(distance)?,
        Weight::new(weight)?,
        Rate::new(rate_per_km)?,
        Rate::new(rate_per_kg)?,
        urgent,
    ))
}

/// Converts a row with the `ORDER_COLUMNS` into an order.
fn order_from_row(row: PgRow) -> DbResult<Order> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let date: Date = row.try_get("order_date").map_err(map_sqlx_error)?;
    let customer_id: i64 = row.try_get("customer_id").map_err(map_sqlx_error)?;
    let status: String = row.try_get("status").map_err(map_sqlx_error)?;
    let details = OrderDetails::from_parts(
        OrderDate::from(date),
        pricing_inputs_from_row(&row)?,
        CustomerId::new(customer_id),
        DeliveryStatus::parse(&status)?,
    );
    Ok(Order::new(OrderId::new(id), details))
}

/// Converts a row with the `DELIVERY_COLUMNS` into a delivery.
fn delivery_from_row(row: PgRow) -> DbResult<Delivery> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let order_id: i64 = row.try_get("order_id").map_err(map_sqlx_error)?;
    let status: String = row.try_get("status").map_err(map_sqlx_error)?;
    let distance_cost: f64 = row.try_get("distance_cost").map_err(map_sqlx_error)?;
    let weight_cost: f64 = row.try_get("weight_cost").map_err(map_sqlx_error)?;
    let surcharge: f64 = row.try_get("surcharge").map_err(map_sqlx_error)?;
    let discount: f64 = row.try_get("discount").map_err(map_sqlx_error)?;
    let heavy_fee: bool = row.try_get("heavy_fee").map_err(map_sqlx_error)?;
    let final_price: f64 = row.try_get("final_price").map_err(map_sqlx_error)?;
    let price =
        PriceBreakdown::new(distance_cost, weight_cost, surcharge, discount, heavy_fee, final_price);
    let details =
        DeliveryDetails::new(OrderId::new(order_id), DeliveryStatus::parse(&status)?, price);
    Ok(Delivery::new(DeliveryId::new(id), details))
}

#[async_trait::async_trait]
impl BareTx for PostgresEntregasTx {
    async fn commit(mut self) -> DbResult<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn migrate(&mut self) -> DbResult<()> {
        run_schema(&mut self.tx, SCHEMA).await
    }
}

#[async_trait::async_trait]
impl EntregasTx for PostgresEntregasTx {
    async fn get_customers(&mut self) -> DbResult<Vec<Customer>> {
        let query_str = format!("SELECT {} FROM customers ORDER BY id", CUSTOMER_COLUMNS);
        let mut rows = sqlx::query(&query_str).fetch(&mut *self.tx);

        let mut customers = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            customers.push(customer_from_row(row)?);
        }
        Ok(customers)
    }

    async fn find_customer_by_id(&mut self, id: CustomerId) -> DbResult<Option<Customer>> {
        let query_str = format!("SELECT {} FROM customers WHERE id = $1", CUSTOMER_COLUMNS);
        let maybe_row = sqlx::query(&query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(customer_from_row).transpose()
    }

    async fn find_customer_by_tax_id(&mut self, tax_id: &TaxId) -> DbResult<Option<Customer>> {
        let query_str = format!("SELECT {} FROM customers WHERE tax_id = $1", CUSTOMER_COLUMNS);
        let maybe_row = sqlx::query(&query_str)
            .bind(tax_id.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(customer_from_row).transpose()
    }

    async fn find_customer_by_email(
        &mut self,
        email: &EmailAddress,
    ) -> DbResult<Option<Customer>> {
        let query_str = format!("SELECT {} FROM customers WHERE email = $1", CUSTOMER_COLUMNS);
        let maybe_row = sqlx::query(&query_str)
            .bind(email.as_str())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(customer_from_row).transpose()
    }

    async fn create_customer(&mut self, details: &CustomerDetails) -> DbResult<Customer> {
        let query_str = "
            INSERT INTO customers
                (name, surname, tax_id, phone, email, street, number, neighborhood, state,
                postal_code, city)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(details.name())
            .bind(details.surname())
            .bind(details.tax_id().as_str())
            .bind(details.phone().as_str())
            .bind(details.email().as_str())
            .bind(details.street())
            .bind(details.number())
            .bind(details.neighborhood())
            .bind(details.state())
            .bind(details.postal_code().as_str())
            .bind(details.city())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(Customer::new(CustomerId::new(id), details.clone()))
    }

    async fn update_customer(
        &mut self,
        id: CustomerId,
        details: &CustomerDetails,
    ) -> DbResult<()> {
        let query_str = "
            UPDATE customers
            SET name = $1, surname = $2, tax_id = $3, phone = $4, email = $5, street = $6,
                number = $7, neighborhood = $8, state = $9, postal_code = $10, city = $11
            WHERE id = $12
        ";
        let done = sqlx::query(query_str)
            .bind(details.name())
            .bind(details.surname())
            .bind(details.tax_id().as_str())
            .bind(details.phone().as_str())
            .bind(details.email().as_str())
            .bind(details.street())
            .bind(details.number())
            .bind(details.neighborhood())
            .bind(details.state())
            .bind(details.postal_code().as_str())
            .bind(details.city())
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        ensure_one_row("Customer update", done.rows_affected())
    }

    async fn delete_customer(&mut self, id: CustomerId) -> DbResult<()> {
        let query_str = "DELETE FROM customers WHERE id = $1";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        ensure_one_row("Customer deletion", done.rows_affected())
    }

    async fn get_orders(&mut self) -> DbResult<Vec<Order>> {
        let query_str = format!("SELECT {} FROM orders ORDER BY id", ORDER_COLUMNS);
        let mut rows = sqlx::query(&query_str).fetch(&mut *self.tx);

        let mut orders = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            orders.push(order_from_row(row)?);
        }
        Ok(orders)
    }

    async fn find_order_by_id(&mut self, id: OrderId) -> DbResult<Option<Order>> {
        let query_str = format!("SELECT {} FROM orders WHERE id = $1", ORDER_COLUMNS);
        let maybe_row = sqlx::query(&query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(order_from_row).transpose()
    }

    async fn find_order_pricing_inputs(&mut self, id: OrderId) -> DbResult<Option<PricingInputs>> {
        let query_str =
            "SELECT distance, weight, rate_per_km, rate_per_kg, urgent FROM orders WHERE id = $1";
        let maybe_row = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.as_ref().map(pricing_inputs_from_row).transpose()
    }

    async fn find_orders_by_customer_id(&mut self, id: CustomerId) -> DbResult<Vec<Order>> {
        let query_str =
            format!("SELECT {} FROM orders WHERE customer_id = $1 ORDER BY id", ORDER_COLUMNS);
        let mut rows = sqlx::query(&query_str).bind(id.as_i64()).fetch(&mut *self.tx);

        let mut orders = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            orders.push(order_from_row(row)?);
        }
        Ok(orders)
    }

    async fn create_order(&mut self, details: &OrderDetails) -> DbResult<Order> {
        let query_str = "
            INSERT INTO orders
                (order_date, urgent, distance, weight, rate_per_km, rate_per_kg, customer_id,
                status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(details.date().as_date())
            .bind(*details.urgent())
            .bind(details.distance().as_f64())
            .bind(details.weight().as_f64())
            .bind(details.rate_per_km().as_f64())
            .bind(details.rate_per_kg().as_f64())
            .bind(details.customer_id().as_i64())
            .bind(details.status().as_str())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(Order::new(OrderId::new(id), details.clone()))
    }

    async fn update_order(&mut self, id: OrderId, details: &OrderDetails) -> DbResult<()> {
        let query_str = "
            UPDATE orders
            SET order_date = $1, urgent = $2, distance = $3, weight = $4, rate_per_km = $5,
                rate_per_kg = $6, customer_id = $7, status = $8
            WHERE id = $9
        ";
        let done = sqlx::query(query_str)
            .bind(details.date().as_date())
            .bind(*details.urgent())
            .bind(details.distance().as_f64())
            .bind(details.weight().as_f64())
            .bind(details.rate_per_km().as_f64())
            .bind(details.rate_per_kg().as_f64())
            .bind(details.customer_id().as_i64())
            .bind(details.status().as_str())
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        ensure_one_row("Order update", done.rows_affected())
    }

    async fn delete_order(&mut self, id: OrderId) -> DbResult<()> {
        let query_str = "DELETE FROM orders WHERE id = $1";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        ensure_one_row("Order deletion", done.rows_affected())
    }

    async fn get_deliveries(&mut self) -> DbResult<Vec<Delivery>> {
        let query_str = format!("SELECT {} FROM deliveries ORDER BY id", DELIVERY_COLUMNS);
        let mut rows = sqlx::query(&query_str).fetch(&mut *self.tx);

        let mut deliveries = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            deliveries.push(delivery_from_row(row)?);
        }
        Ok(deliveries)
    }

    async fn find_delivery_by_id(&mut self, id: DeliveryId) -> DbResult<Option<Delivery>> {
        let query_str = format!("SELECT {} FROM deliveries WHERE id = $1", DELIVERY_COLUMNS);
        let maybe_row = sqlx::query(&query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(delivery_from_row).transpose()
    }

    async fn find_delivery_by_order_id(&mut self, id: OrderId) -> DbResult<Option<Delivery>> {
        let query_str =
            format!("SELECT {} FROM deliveries WHERE order_id = $1", DELIVERY_COLUMNS);
        let maybe_row = sqlx::query(&query_str)
            .bind(id.as_i64())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        maybe_row.map(delivery_from_row).transpose()
    }

    async fn create_delivery(&mut self, details: &DeliveryDetails) -> DbResult<Delivery> {
        let price = details.price();
        let query_str = "
            INSERT INTO deliveries
                (order_id, status, distance_cost, weight_cost, surcharge, discount, heavy_fee,
                final_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(details.order_id().as_i64())
            .bind(details.status().as_str())
            .bind(*price.distance_cost())
            .bind(*price.weight_cost())
            .bind(*price.surcharge())
            .bind(*price.discount())
            .bind(*price.heavy_fee())
            .bind(*price.final_price())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(Delivery::new(DeliveryId::new(id), *details))
    }

    async fn update_delivery(
        &mut self,
        id: DeliveryId,
        details: &DeliveryDetails,
    ) -> DbResult<()> {
        let price = details.price();
        let query_str = "
            UPDATE deliveries
            SET order_id = $1, status = $2, distance_cost = $3, weight_cost = $4, surcharge = $5,
                discount = $6, heavy_fee = $7, final_price = $8
            WHERE id = $9
        ";
        let done = sqlx::query(query_str)
            .bind(details.order_id().as_i64())
            .bind(details.status().as_str())
            .bind(*price.distance_cost())
            .bind(*price.weight_cost())
            .bind(*price.surcharge())
            .bind(*price.discount())
            .bind(*price.heavy_fee())
            .bind(*price.final_price())
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        ensure_one_row("Delivery update", done.rows_affected())
    }

    async fn delete_delivery(&mut self, id: DeliveryId) -> DbResult<()> {
        let query_str = "DELETE FROM deliveries WHERE id = $1";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;
        ensure_one_row("Delivery deletion", done.rows_affected())
    }
}
