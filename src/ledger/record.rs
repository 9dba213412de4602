use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};

/// Metals tracked by the chain. Input is case-insensitive; the stored and
/// serialized form is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Silver,
    Gold,
    Platinum,
}

impl<'de> Deserialize<'de> for Metal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_lowercase().as_str() {
            "silver" => Ok(Metal::Silver),
            "gold" => Ok(Metal::Gold),
            "platinum" => Ok(Metal::Platinum),
            other => Err(D::Error::unknown_variant(
                other,
                &["silver", "gold", "platinum"],
            )),
        }
    }
}

/// Gold purity grades. Only gold entries carry a purity. Input is
/// case-insensitive; the stored and serialized form is uppercase-K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Purity {
    #[serde(rename = "18K")]
    K18,
    #[serde(rename = "22K")]
    K22,
    #[serde(rename = "24K")]
    K24,
}

impl<'de> Deserialize<'de> for Purity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_uppercase().as_str() {
            "18K" => Ok(Purity::K18),
            "22K" => Ok(Purity::K22),
            "24K" => Ok(Purity::K24),
            other => Err(D::Error::unknown_variant(other, &["18K", "22K", "24K"])),
        }
    }
}

/// Mass unit a quoted price refers to. Input is case-insensitive; the
/// stored and serialized form is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "1g")]
    OneGram,
    #[serde(rename = "10g")]
    TenGrams,
    #[serde(rename = "1kg")]
    OneKilogram,
}

impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_ascii_lowercase().as_str() {
            "1g" => Ok(Unit::OneGram),
            "10g" => Ok(Unit::TenGrams),
            "1kg" => Ok(Unit::OneKilogram),
            other => Err(D::Error::unknown_variant(other, &["1g", "10g", "1kg"])),
        }
    }
}

impl Unit {
    pub fn grams(self) -> f64 {
        match self {
            Unit::OneGram => 1.0,
            Unit::TenGrams => 10.0,
            Unit::OneKilogram => 1000.0,
        }
    }
}

/// A normalized price observation as committed to the chain.
/// `price` is the quoted amount for `unit`; `price_per_gram` is the
/// per-gram normalization computed at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: String,
    pub metal: Metal,
    pub purity: Option<Purity>,
    pub unit: Unit,
    pub price: f64,
    pub price_per_gram: f64,
}

/// Payload of a block: either the genesis marker or a price record.
/// Serialized form is internally tagged (`{"event": "genesis"}` /
/// `{"event": "price", ...}`) and is part of the hash preimage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum BlockData {
    Genesis,
    Price(PriceRecord),
}

impl BlockData {
    pub fn is_price(&self) -> bool {
        matches!(self, BlockData::Price(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metal_parses_any_case() {
        for input in ["\"gold\"", "\"GOLD\"", "\"Gold\""] {
            assert_eq!(serde_json::from_str::<Metal>(input).unwrap(), Metal::Gold);
        }
        assert!(serde_json::from_str::<Metal>("\"copper\"").is_err());
    }

    #[test]
    fn purity_and_unit_parse_any_case() {
        assert_eq!(
            serde_json::from_str::<Purity>("\"22k\"").unwrap(),
            Purity::K22
        );
        assert_eq!(
            serde_json::from_str::<Unit>("\"1KG\"").unwrap(),
            Unit::OneKilogram
        );
        assert!(serde_json::from_str::<Purity>("\"20K\"").is_err());
        assert!(serde_json::from_str::<Unit>("\"5g\"").is_err());
    }

    #[test]
    fn serialized_form_is_normalized() {
        assert_eq!(serde_json::to_string(&Metal::Gold).unwrap(), "\"gold\"");
        assert_eq!(serde_json::to_string(&Purity::K22).unwrap(), "\"22K\"");
        assert_eq!(serde_json::to_string(&Unit::TenGrams).unwrap(), "\"10g\"");
    }
}
