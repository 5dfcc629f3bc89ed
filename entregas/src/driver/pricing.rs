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

//! Computation of delivery prices.

use crate::model::{PriceBreakdown, PricingInputs};
use entregas_core::model::{ModelError, ModelResult};

/// Fraction of the base price charged on top of it for urgent deliveries.
pub(crate) const URGENT_SURCHARGE_RATE: f64 = 0.20;

/// Subtotal above which deliveries get a discount.
pub(crate) const DISCOUNT_THRESHOLD: f64 = 500.0;

/// Fraction of the subtotal discounted from deliveries above `DISCOUNT_THRESHOLD`.
pub(crate) const DISCOUNT_RATE: f64 = 0.10;

/// Weight, in kilograms, above which cargo is considered heavy.
pub(crate) const HEAVY_WEIGHT_THRESHOLD: f64 = 50.0;

/// Flat fee added to the price of heavy cargo.
pub(crate) const HEAVY_FEE: f64 = 15.0;

/// Computes the itemized price of a delivery.
///
/// The surcharge applies to the base price, the discount applies to the base price plus the
/// surcharge, and the heavy cargo fee is added last so it is never discounted.
///
/// Inputs are individually valid but their products can still overflow, in which case the
/// price cannot be represented and the inputs are rejected.
pub(crate) fn quote(inputs: &PricingInputs) -> ModelResult<PriceBreakdown> {
    let distance_cost = inputs.distance().as_f64() * inputs.rate_per_km().as_f64();
    let weight_cost = inputs.weight().as_f64() * inputs.rate_per_kg().as_f64();
    let base = distance_cost + weight_cost;

    let heavy_fee = inputs.weight().as_f64() > HEAVY_WEIGHT_THRESHOLD;

    let surcharge = if *inputs.urgent() { base * URGENT_SURCHARGE_RATE } else { 0.0 };
    let subtotal = base + surcharge;

    let discount = if subtotal > DISCOUNT_THRESHOLD { subtotal * DISCOUNT_RATE } else { 0.0 };

    let mut final_price = subtotal - discount;
    if heavy_fee {
        final_price += HEAVY_FEE;
    }

    if [distance_cost, weight_cost, surcharge, discount, final_price].iter().any(|v| !v.is_finite())
    {
        return Err(ModelError(
            "Distance, weight and rates are too large to compute a price".to_owned(),
        ));
    }

    Ok(PriceBreakdown::new(distance_cost, weight_cost, surcharge, discount, heavy_fee, final_price))
}
