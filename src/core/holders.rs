//! Holder Normalizer
//!
//! Moralis returns holder lists in two shapes: camelCase from the Solana
//! gateway, snake_case from the EVM API. Both collapse into [`HolderEntry`].

use serde_json::Value;

use crate::models::types::HolderEntry;
use crate::utils::constants::CHAIN_SOLANA;

/// Field naming used by a chain's holder endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderSchema {
    Solana,
    Evm,
}

impl HolderSchema {
    pub fn for_chain(chain_id: &str) -> Self {
        if chain_id == CHAIN_SOLANA {
            Self::Solana
        } else {
            Self::Evm
        }
    }

    pub fn address_field(&self) -> &'static str {
        match self {
            Self::Solana => "ownerAddress",
            Self::Evm => "owner_address",
        }
    }

    pub fn percent_field(&self) -> &'static str {
        match self {
            Self::Solana => "percentageRelativeToTotalSupply",
            Self::Evm => "percentage_relative_to_total_supply",
        }
    }
}

/// Holder record after field mapping; either side may be missing
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHolder {
    pub address: Option<String>,
    pub percent: Option<f64>,
}

impl NormalizedHolder {
    /// Keep only records with a non-empty address and a percent
    pub fn into_entry(self) -> Option<HolderEntry> {
        match (self.address, self.percent) {
            (Some(address), Some(percent)) if !address.is_empty() => {
                Some(HolderEntry { address, percent })
            }
            _ => None,
        }
    }
}

/// Map one raw holder record using the chain's field names
pub fn normalize_holder_entry(raw: &Value, chain_id: &str) -> NormalizedHolder {
    let schema = HolderSchema::for_chain(chain_id);

    let address = raw
        .get(schema.address_field())
        .and_then(Value::as_str)
        .map(str::to_string);

    // Numbers usually, but some responses quote them
    let percent = raw.get(schema.percent_field()).and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });

    NormalizedHolder { address, percent }
}

/// Normalize a provider list, preserving order and dropping incomplete entries
pub fn normalize_holders(raws: &[Value], chain_id: &str) -> Vec<HolderEntry> {
    raws.iter()
        .filter_map(|raw| normalize_holder_entry(raw, chain_id).into_entry())
        .collect()
}
