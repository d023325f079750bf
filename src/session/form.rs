//! Transfer form draft state.
//!
//! The form is a mutable draft overwritten field-by-field by UI input
//! events. No validation happens here; malformed amounts and addresses are
//! rejected at submission time by the conversion layer, the wallet
//! provider, or the contract.

use serde::{Deserialize, Serialize};

/// Names the four draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

/// The transfer draft as typed by the user. All fields are raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferForm {
    /// Destination address, as typed.
    pub address_to: String,
    /// Decimal amount string (display units, scaled by 10^18 at submit).
    pub amount: String,
    /// Keyword tag for the transfer.
    pub keyword: String,
    /// Free-form message.
    pub message: String,
}

impl TransferForm {
    /// Merge a single field into the draft, leaving the others untouched.
    /// Repeated writes to the same field are last-write-wins.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::AddressTo => self.address_to = value,
            FormField::Amount => self.amount = value,
            FormField::Keyword => self.keyword = value,
            FormField::Message => self.message = value,
        }
    }
}
