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

//! High-level data types.
//!
//! Write requests arrive as "fields" types in which every property is optional.  These are merged
//! with the stored state when applicable and then converted into "details" types, which can only
//! be constructed from valid data.

use entregas_core::model::{ModelError, ModelResult};

mod customer;
pub(crate) use customer::*;
mod delivery;
pub(crate) use delivery::*;
mod order;
pub(crate) use order::*;

/// Extracts the value of a required field called `name`.
fn required<T>(name: &str, value: Option<T>) -> ModelResult<T> {
    value.ok_or_else(|| ModelError(format!("Missing required field {}", name)))
}

/// Validates that the text field `name` has between `min` and `max` characters.
///
/// Surrounding whitespace does not count towards the length and is stripped from the result.
fn bounded_text(name: &str, value: String, min: usize, max: usize) -> ModelResult<String> {
    let value = value.trim();
    let length = value.chars().count();
    if length < min || length > max {
        return Err(ModelError(format!(
            "{} must have between {} and {} characters",
            name, min, max
        )));
    }
    Ok(value.to_owned())
}

/// Validates that the text field `name` is not blank.
fn non_blank(name: &str, value: String) -> ModelResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ModelError(format!("{} cannot be empty", name)));
    }
    Ok(value.to_owned())
}

/// Validates that `value` consists of exactly `length` ASCII digits.
fn exact_digits(name: &str, value: String, length: usize) -> ModelResult<String> {
    if value.len() != length || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError(format!("{} must have exactly {} digits", name, length)));
    }
    Ok(value)
}

/// Validates that the quantity `name` is a finite number strictly greater than zero.
fn positive_number(name: &str, value: f64) -> ModelResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError(format!("{} must be a positive number", name)));
    }
    Ok(value)
}
