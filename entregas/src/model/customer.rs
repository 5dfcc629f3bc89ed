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

//! Customers and their contact details.

use super::{bounded_text, exact_digits, non_blank, required};
use derive_getters::Getters;
use derive_more::{Constructor, Display};
use entregas_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Minimum length of a customer's name.
const MIN_NAME_LENGTH: usize = 3;

/// Maximum length of a customer's name.
const MAX_NAME_LENGTH: usize = 50;

/// Minimum length of a customer's surname.
const MIN_SURNAME_LENGTH: usize = 3;

/// Maximum length of a customer's surname.
const MAX_SURNAME_LENGTH: usize = 255;

/// Number of digits in a national tax id.
const TAX_ID_DIGITS: usize = 11;

/// Number of digits in a postal code.
const POSTAL_CODE_DIGITS: usize = 8;

/// Minimum length of a phone number.
const MIN_PHONE_LENGTH: usize = 8;

/// Minimum length of an email address.
const MIN_EMAIL_LENGTH: usize = 5;

/// Identifier of a customer, assigned by the database on creation.
#[derive(
    Clone, Constructor, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize,
)]
#[serde(transparent)]
pub(crate) struct CustomerId(i64);

impl CustomerId {
    /// Returns the raw value of the identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

/// A national tax id, made of exactly 11 ASCII digits.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct TaxId(String);

impl TaxId {
    /// Creates a new tax id from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        exact_digits("Tax id", s.into(), TAX_ID_DIGITS).map(Self)
    }

    /// Returns a string view of the tax id.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// A postal code, made of exactly 8 ASCII digits.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct PostalCode(String);

impl PostalCode {
    /// Creates a new postal code from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        exact_digits("Postal code", s.into(), POSTAL_CODE_DIGITS).map(Self)
    }

    /// Returns a string view of the postal code.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// A phone number.  The format is free-form but it must be long enough to be plausible.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct Phone(String);

impl Phone {
    /// Creates a new phone number from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        let s = s.trim();
        if s.chars().count() < MIN_PHONE_LENGTH {
            return Err(ModelError(format!(
                "Phone must have at least {} characters",
                MIN_PHONE_LENGTH
            )));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns a string view of the phone number.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Represents a plausibly-formatted email address.
///
/// Email addresses can have many formats and attempting to validate them is futile, so this only
/// performs minimal checks to catch obvious mistakes.  Addresses are case sensitive.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct EmailAddress(String);

impl EmailAddress {
    /// Creates a new email address from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        let s = s.trim();
        if s.chars().count() < MIN_EMAIL_LENGTH || !s.contains('@') {
            return Err(ModelError(format!("Email does not look like a valid address '{}'", s)));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns a string view of the email address.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Raw properties of a customer as received in a write request.
///
/// Fields have the same meaning as in `CustomerDetails`.
#[allow(clippy::missing_docs_in_private_items)]
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Clone, Debug, Serialize))]
pub(crate) struct CustomerFields {
    pub(crate) name: Option<String>,
    pub(crate) surname: Option<String>,
    pub(crate) tax_id: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) street: Option<String>,
    pub(crate) number: Option<String>,
    pub(crate) neighborhood: Option<String>,
    pub(crate) state: Option<String>,
    pub(crate) postal_code: Option<String>,
    pub(crate) city: Option<String>,
}

impl CustomerFields {
    /// Fills any unset field with the value it has in `current`.
    pub(crate) fn merge(self, current: &CustomerDetails) -> Self {
        Self {
            name: self.name.or_else(|| Some(current.name.clone())),
            surname: self.surname.or_else(|| Some(current.surname.clone())),
            tax_id: self.tax_id.or_else(|| Some(current.tax_id.0.clone())),
            phone: self.phone.or_else(|| Some(current.phone.0.clone())),
            email: self.email.or_else(|| Some(current.email.0.clone())),
            street: self.street.or_else(|| Some(current.street.clone())),
            number: self.number.or_else(|| Some(current.number.clone())),
            neighborhood: self.neighborhood.or_else(|| Some(current.neighborhood.clone())),
            state: self.state.or_else(|| Some(current.state.clone())),
            postal_code: self.postal_code.or_else(|| Some(current.postal_code.0.clone())),
            city: self.city.or_else(|| Some(current.city.clone())),
        }
    }
}

/// Validated properties of a customer.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct CustomerDetails {
    /// Given name.
    name: String,

    /// Family name.
    surname: String,

    /// National tax id.  Unique across customers.
    tax_id: TaxId,

    /// Contact phone number.
    phone: Phone,

    /// Contact email address.  Unique across customers.
    email: EmailAddress,

    /// Street of the postal address.
    street: String,

    /// Building number within the street.
    number: String,

    /// Neighborhood of the postal address.
    neighborhood: String,

    /// State of the postal address.
    state: String,

    /// Postal code of the postal address.
    postal_code: PostalCode,

    /// City of the postal address.
    city: String,
}

impl TryFrom<CustomerFields> for CustomerDetails {
    type Error = ModelError;

    fn try_from(fields: CustomerFields) -> ModelResult<Self> {
        Ok(Self {
            name: bounded_text(
                "Name",
                required("name", fields.name)?,
                MIN_NAME_LENGTH,
                MAX_NAME_LENGTH,
            )?,
            surname: bounded_text(
                "Surname",
                required("surname", fields.surname)?,
                MIN_SURNAME_LENGTH,
                MAX_SURNAME_LENGTH,
            )?,
            tax_id: TaxId::new(required("tax_id", fields.tax_id)?)?,
            phone: Phone::new(required("phone", fields.phone)?)?,
            email: EmailAddress::new(required("email", fields.email)?)?,
            street: non_blank("Street", required("street", fields.street)?)?,
            number: non_blank("Number", required("number", fields.number)?)?,
            neighborhood: non_blank(
                "Neighborhood",
                required("neighborhood", fields.neighborhood)?,
            )?,
            state: non_blank("State", required("state", fields.state)?)?,
            postal_code: PostalCode::new(required("postal_code", fields.postal_code)?)?,
            city: non_blank("City", required("city", fields.city)?)?,
        })
    }
}

/// A registered customer.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Customer {
    /// Identifier of the customer.
    id: CustomerId,

    /// Properties of the customer.
    #[serde(flatten)]
    details: CustomerDetails,
}

#[cfg(test)]
impl CustomerFields {
    /// Returns a complete and valid set of fields.  Customers created from different `seed`s do
    /// not collide on any unique property.
    pub(crate) fn valid(seed: u8) -> Self {
        Self {
            name: Some(format!("Name {}", seed)),
            surname: Some(format!("Surname {}", seed)),
            tax_id: Some(format!("{:011}", 10_000_000_000u64 + u64::from(seed))),
            phone: Some("+55 11 5555-0000".to_owned()),
            email: Some(format!("customer{}@example.com", seed)),
            street: Some("Avenida Paulista".to_owned()),
            number: Some("1000".to_owned()),
            neighborhood: Some("Bela Vista".to_owned()),
            state: Some("SP".to_owned()),
            postal_code: Some("01310100".to_owned()),
            city: Some("Sao Paulo".to_owned()),
        }
    }
}

#[cfg(test)]
impl CustomerDetails {
    /// Returns a valid set of details.  See `CustomerFields::valid` for the meaning of `seed`.
    pub(crate) fn valid(seed: u8) -> Self {
        Self::try_from(CustomerFields::valid(seed)).unwrap()
    }
}
