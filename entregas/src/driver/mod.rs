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

//! Business logic for the service.

use crate::db::EntregasTx;
use derivative::Derivative;
use entregas_core::db::Db;
use std::sync::Arc;

mod customers;
mod deliveries;
mod orders;
pub(crate) mod pricing;
#[cfg(test)]
pub(crate) mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Derivative)]
#[derivative(Clone(bound = ""))]
pub(crate) struct Driver<D>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    /// The database that the driver uses for persistence.
    db: Arc<D>,
}

impl<D> Driver<D>
where
    D: Db + 'static,
    D::Tx: EntregasTx,
{
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: D) -> Self {
        Self { db: Arc::from(db) }
    }
}
