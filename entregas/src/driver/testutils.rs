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

//! Test utilities for the business layer.

use crate::db::EntregasTx;
use crate::db::sqlite::SqliteEntregasTx;
use crate::driver::Driver;
use crate::driver::pricing::quote;
use crate::model::*;
use entregas_core::db::sqlite::{SqliteDb, testutils::setup};
use entregas_core::db::{BareTx, Db, init_schema};

/// State of a running test.
pub(crate) struct TestContext {
    /// The database used by the driver, for direct access.
    db: SqliteDb<SqliteEntregasTx>,

    /// The driver under test.
    driver: Driver<SqliteDb<SqliteEntregasTx>>,
}

impl TestContext {
    /// Initializes a driver backed by an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = setup::<SqliteEntregasTx>().await;
        init_schema(&db).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Returns a new transaction against the database.
    ///
    /// The database only has one connection, so the transaction must be dropped before calling
    /// into the driver.
    pub(crate) async fn tx(&self) -> SqliteEntregasTx {
        self.db.begin().await.unwrap()
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver<SqliteDb<SqliteEntregasTx>> {
        self.driver.clone()
    }

    /// Stores a valid customer derived from `seed`.
    pub(crate) async fn create_customer(&self, seed: u8) -> Customer {
        let mut tx = self.tx().await;
        let customer = tx.create_customer(&CustomerDetails::valid(seed)).await.unwrap();
        tx.commit().await.unwrap();
        customer
    }

    /// Stores an order with `details`.
    pub(crate) async fn create_order(&self, details: OrderDetails) -> Order {
        let mut tx = self.tx().await;
        let order = tx.create_order(&details).await.unwrap();
        tx.commit().await.unwrap();
        order
    }

    /// Stores a correctly-priced delivery for `order` in the `status` state.
    pub(crate) async fn create_delivery(&self, order: &Order, status: DeliveryStatus) -> Delivery {
        let price = quote(&order.details().pricing_inputs()).unwrap();
        let details = DeliveryDetails::new(*order.id(), status, price);
        let mut tx = self.tx().await;
        let delivery = tx.create_delivery(&details).await.unwrap();
        tx.commit().await.unwrap();
        delivery
    }
}
