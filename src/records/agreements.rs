//! Signature slots on externally owned agreement records.
//!
//! Agreements are otherwise opaque: only `id`, `number` and the two signature
//! fields are read or written, and every other field round-trips untouched.

use serde_json::Value;

use super::error::{RecordError, RecordResult};
use super::store::RecordStore;
use crate::constants::AGREEMENTS_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureSlot {
    #[default]
    Company,
    Client,
}

impl SignatureSlot {
    pub const ALL: [SignatureSlot; 2] = [SignatureSlot::Company, SignatureSlot::Client];

    /// Field on the agreement record holding this slot's raster.
    pub fn field_name(&self) -> &'static str {
        match self {
            SignatureSlot::Company => "companySignature",
            SignatureSlot::Client => "clientSignature",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignatureSlot::Company => "Company",
            SignatureSlot::Client => "Client",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgreementSummary {
    pub id: String,
    pub number: Option<String>,
    pub company_signed: bool,
    pub client_signed: bool,
}

/// Record ids may be stored as strings or numbers.
fn record_id(record: &Value) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn has_signature(record: &Value, slot: SignatureSlot) -> bool {
    record
        .get(slot.field_name())
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

pub fn list_agreements(store: &dyn RecordStore) -> RecordResult<Vec<AgreementSummary>> {
    Ok(store
        .load(AGREEMENTS_KEY)?
        .iter()
        .filter_map(|record| {
            let id = record_id(record)?;
            let number = record.get("number").map(|n| match n {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });
            Some(AgreementSummary {
                id,
                number,
                company_signed: has_signature(record, SignatureSlot::Company),
                client_signed: has_signature(record, SignatureSlot::Client),
            })
        })
        .collect())
}

/// Write a signature raster into one slot of the agreement with `agreement_id`.
pub fn attach_signature(
    store: &mut dyn RecordStore,
    agreement_id: &str,
    slot: SignatureSlot,
    data_uri: &str,
) -> RecordResult<()> {
    let mut records = store.load(AGREEMENTS_KEY)?;
    let record = records
        .iter_mut()
        .find(|r| record_id(r).as_deref() == Some(agreement_id))
        .ok_or_else(|| RecordError::not_found("agreement", agreement_id))?;

    let Value::Object(fields) = record else {
        return Err(RecordError::Malformed {
            key: AGREEMENTS_KEY.to_string(),
            reason: format!("agreement {} is not an object", agreement_id),
        });
    };
    fields.insert(
        slot.field_name().to_string(),
        Value::String(data_uri.to_string()),
    );

    store.save(AGREEMENTS_KEY, &records)?;
    tracing::info!("Saved {} signature for agreement {}", slot.label(), agreement_id);
    Ok(())
}
