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

//! Orders and the inputs they provide to the pricing of their delivery.

use super::{CustomerId, PriceBreakdown, positive_number, required};
use derive_getters::Getters;
use derive_more::{Constructor, Display};
use entregas_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Textual format of order dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Identifier of an order, assigned by the database on creation.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub(crate) struct OrderId(i64);

impl OrderId {
    /// Returns the raw value of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// The date in which an order was placed, represented as `YYYY-MM-DD` on the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OrderDate(Date);

impl OrderDate {
    /// Parses an order date from an untrusted string `s`.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        Date::parse(s, DATE_FORMAT)
            .map(Self)
            .map_err(|e| ModelError(format!("Invalid order date '{}': {}", s, e)))
    }

    /// Returns the date as a calendar date.
    pub(crate) fn as_date(&self) -> Date {
        self.0
    }
}

impl From<Date> for OrderDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl Serialize for OrderDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        OrderDate::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Generates a newtype for a physical quantity or rate that must be strictly positive.
macro_rules! positive_quantity [
    ( $(#[$meta:meta])* $name:ident, $label:expr ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
        #[cfg_attr(test, derive(Deserialize))]
        #[serde(transparent)]
        pub(crate) struct $name(f64);

        impl $name {
            /// Creates a new value from an untrusted number, making sure it is valid.
            pub(crate) fn new(value: f64) -> ModelResult<Self> {
                positive_number($label, value).map(Self)
            }

            /// Returns the raw value.
            pub(crate) fn as_f64(self) -> f64 {
                self.0
            }
        }
    }
];

positive_quantity!(
    /// Distance to cover by a delivery, in kilometers.
    Distance,
    "Distance"
);
positive_quantity!(
    /// Weight of the cargo of a delivery, in kilograms.
    Weight,
    "Weight"
);
positive_quantity!(
    /// Monetary rate applied per unit of distance or weight.
    Rate,
    "Rate"
);

/// Lifecycle states of a delivery.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum DeliveryStatus {
    /// The price has been computed but the delivery has not started.
    #[default]
    Calculated,

    /// The cargo has reached its destination.
    Delivered,

    /// The cargo is on its way.
    InTransit,

    /// The delivery will not happen.
    Cancelled,
}

impl DeliveryStatus {
    /// Parses a status from its textual representation.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        match s {
            "calculated" => Ok(DeliveryStatus::Calculated),
            "delivered" => Ok(DeliveryStatus::Delivered),
            "in-transit" => Ok(DeliveryStatus::InTransit),
            "cancelled" => Ok(DeliveryStatus::Cancelled),
            _ => Err(ModelError(format!(
                "Invalid status '{}'; must be one of calculated, delivered, in-transit or \
                cancelled",
                s
            ))),
        }
    }

    /// Returns the textual representation of the status.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Calculated => "calculated",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::InTransit => "in-transit",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }
}

/// Raw properties of an order as received in a write request.
///
/// Fields have the same meaning as in `OrderDetails`.
#[allow(clippy::missing_docs_in_private_items)]
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Clone, Debug, Serialize))]
pub(crate) struct OrderFields {
    pub(crate) date: Option<String>,
    pub(crate) urgent: Option<bool>,
    pub(crate) distance: Option<f64>,
    pub(crate) weight: Option<f64>,
    pub(crate) rate_per_km: Option<f64>,
    pub(crate) rate_per_kg: Option<f64>,
    pub(crate) customer_id: Option<CustomerId>,
    pub(crate) status: Option<String>,
}

impl OrderFields {
    /// Fills any unset field with the value it has in `current`.
    pub(crate) fn merge(self, current: &OrderDetails) -> Self {
        Self {
            date: self.date.or_else(|| Some(current.date.to_string())),
            urgent: self.urgent.or(Some(current.urgent)),
            distance: self.distance.or(Some(current.distance.as_f64())),
            weight: self.weight.or(Some(current.weight.as_f64())),
            rate_per_km: self.rate_per_km.or(Some(current.rate_per_km.as_f64())),
            rate_per_kg: self.rate_per_kg.or(Some(current.rate_per_kg.as_f64())),
            customer_id: self.customer_id.or(Some(current.customer_id)),
            status: self.status.or_else(|| Some(current.status.as_str().to_owned())),
        }
    }
}

/// Validated properties of an order.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct OrderDetails {
    /// Date in which the order was placed.
    date: OrderDate,

    /// Whether the delivery is urgent, which makes it more expensive.
    urgent: bool,

    /// Distance to cover.
    distance: Distance,

    /// Weight of the cargo.
    weight: Weight,

    /// Price per kilometer.
    rate_per_km: Rate,

    /// Price per kilogram.
    rate_per_kg: Rate,

    /// Customer that placed the order.
    customer_id: CustomerId,

    /// Current state of the delivery of this order.
    status: DeliveryStatus,
}

impl OrderDetails {
    /// Assembles order details from already-validated parts.
    pub(crate) fn from_parts(
        date: OrderDate,
        inputs: PricingInputs,
        customer_id: CustomerId,
        status: DeliveryStatus,
    ) -> Self {
        Self {
            date,
            urgent: inputs.urgent,
            distance: inputs.distance,
            weight: inputs.weight,
            rate_per_km: inputs.rate_per_km,
            rate_per_kg: inputs.rate_per_kg,
            customer_id,
            status,
        }
    }

    /// Extracts the subset of the order's properties that determine the price of its delivery.
    pub(crate) fn pricing_inputs(&self) -> PricingInputs {
        PricingInputs {
            distance: self.distance,
            weight: self.weight,
            rate_per_km: self.rate_per_km,
            rate_per_kg: self.rate_per_kg,
            urgent: self.urgent,
        }
    }
}

impl TryFrom<OrderFields> for OrderDetails {
    type Error = ModelError;

    /// Validates a set of order fields.  `urgent` defaults to false and `status` defaults to
    /// calculated; everything else is required.
    fn try_from(fields: OrderFields) -> ModelResult<Self> {
        let status = match fields.status {
            Some(status) => DeliveryStatus::parse(&status)?,
            None => DeliveryStatus::default(),
        };
        Ok(Self {
            date: OrderDate::parse(&required("date", fields.date)?)?,
            urgent: fields.urgent.unwrap_or(false),
            distance: Distance::new(required("distance", fields.distance)?)?,
            weight: Weight::new(required("weight", fields.weight)?)?,
            rate_per_km: Rate::new(required("rate_per_km", fields.rate_per_km)?)?,
            rate_per_kg: Rate::new(required("rate_per_kg", fields.rate_per_kg)?)?,
            customer_id: required("customer_id", fields.customer_id)?,
            status,
        })
    }
}

/// An order placed by a customer.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Order {
    /// Identifier of the order.
    id: OrderId,

    /// Properties of the order.
    #[serde(flatten)]
    details: OrderDetails,
}

/// An order along with the price its delivery has given the order's current properties.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct QuotedOrder {
    /// The order.
    order: Order,

    /// The price of delivering the order.
    quote: PriceBreakdown,
}

/// Inputs to the pricing of a delivery.
#[derive(Clone, Constructor, Copy, Debug, Getters, PartialEq)]
pub(crate) struct PricingInputs {
    /// Distance to cover.
    distance: Distance,

    /// Weight of the cargo.
    weight: Weight,

    /// Price per kilometer.
    rate_per_km: Rate,

    /// Price per kilogram.
    rate_per_kg: Rate,

    /// Whether the delivery is urgent.
    urgent: bool,
}

#[cfg(test)]
impl OrderFields {
    /// Returns a complete and valid set of fields for an order of `customer_id`.
    pub(crate) fn valid(customer_id: CustomerId) -> Self {
        Self {
            date: Some("2025-03-14".to_owned()),
            urgent: Some(false),
            distance: Some(10.0),
            weight: Some(10.0),
            rate_per_km: Some(5.0),
            rate_per_kg: Some(2.0),
            customer_id: Some(customer_id),
            status: Some("calculated".to_owned()),
        }
    }
}

#[cfg(test)]
impl OrderDetails {
    /// Returns a valid set of details for an order of `customer_id`.
    pub(crate) fn valid(customer_id: CustomerId) -> Self {
        Self::try_from(OrderFields::valid(customer_id)).unwrap()
    }
}
