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

//! Deliveries and their price breakdown.

use super::{DeliveryStatus, OrderId, required};
use derive_getters::Getters;
use derive_more::{Constructor, Display};
use entregas_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Identifier of a delivery, assigned by the database on creation.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub(crate) struct DeliveryId(i64);

impl DeliveryId {
    /// Returns the raw value of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// Itemized price of a delivery.
#[derive(Clone, Constructor, Copy, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct PriceBreakdown {
    /// Cost due to the distance to cover.
    distance_cost: f64,

    /// Cost due to the weight of the cargo.
    weight_cost: f64,

    /// Extra charge for urgent deliveries.
    surcharge: f64,

    /// Reduction granted to expensive deliveries.
    discount: f64,

    /// Whether the flat fee for heavy cargo was applied.
    heavy_fee: bool,

    /// Price to pay.
    final_price: f64,
}

/// Raw properties of a delivery as received in a write request.
///
/// Fields have the same meaning as in `DeliveryRequest`.
#[allow(clippy::missing_docs_in_private_items)]
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Clone, Debug, Serialize))]
pub(crate) struct DeliveryFields {
    pub(crate) order_id: Option<OrderId>,
    pub(crate) status: Option<String>,
}

impl DeliveryFields {
    /// Fills any unset field with the value it has in `current`.
    pub(crate) fn merge(self, current: &DeliveryDetails) -> Self {
        Self {
            order_id: self.order_id.or(Some(current.order_id)),
            status: self.status.or_else(|| Some(current.status.as_str().to_owned())),
        }
    }
}

/// Validated user-provided properties of a delivery.  The price is never user-provided.
#[derive(Clone, Copy, Debug, Getters, PartialEq)]
pub(crate) struct DeliveryRequest {
    /// Order to deliver.
    order_id: OrderId,

    /// State of the delivery.
    status: DeliveryStatus,
}

impl TryFrom<DeliveryFields> for DeliveryRequest {
    type Error = ModelError;

    /// Validates a set of delivery fields.  `status` defaults to calculated.
    fn try_from(fields: DeliveryFields) -> ModelResult<Self> {
        let status = match fields.status {
            Some(status) => DeliveryStatus::parse(&status)?,
            None => DeliveryStatus::default(),
        };
        Ok(Self { order_id: required("order_id", fields.order_id)?, status })
    }
}

/// Properties of a delivery, including its computed price.
#[derive(Clone, Constructor, Copy, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct DeliveryDetails {
    /// Order to deliver.  At most one delivery exists per order.
    order_id: OrderId,

    /// State of the delivery.
    status: DeliveryStatus,

    /// Price of the delivery, derived from its order.
    #[serde(flatten)]
    price: PriceBreakdown,
}

impl DeliveryDetails {
    /// Combines a validated `request` with the `price` computed for it.
    pub(crate) fn priced(request: DeliveryRequest, price: PriceBreakdown) -> Self {
        Self { order_id: request.order_id, status: request.status, price }
    }

    /// Returns a copy of these details with a new `price` but otherwise unchanged.
    pub(crate) fn repriced(self, price: PriceBreakdown) -> Self {
        Self { price, ..self }
    }
}

/// A delivery of an order.
#[derive(Clone, Constructor, Copy, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Delivery {
    /// Identifier of the delivery.
    id: DeliveryId,

    /// Properties of the delivery.
    #[serde(flatten)]
    details: DeliveryDetails,
}
