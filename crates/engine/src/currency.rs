use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

mod table;

/// Code rendered for a `Currency` that is not in the table.
const UNRECOGNIZED_CODE: &str = "XXX";

/// ISO 4217 currency of a fund.
///
/// A `Currency` is an index into a fixed table of ISO 4217 codes (`AED` up to
/// `ZWL`). Every row has a constant, e.g. [`Currency::CAD`].
///
/// The index is not checked on construction: a value read from storage may
/// point past the end of the table (a corrupt row, or a row written by a newer
/// build). Such a value is kept as is and renders as `XXX`, so displaying a
/// currency never fails.
///
/// # Examples
///
/// ```rust
/// use engine::Currency;
///
/// assert_eq!("cad".parse::<Currency>().unwrap(), Currency::CAD);
/// assert_eq!(Currency::CAD.code(), "CAD");
/// assert_eq!(Currency::from_index(u16::MAX).code(), "XXX");
/// assert!("UUU".parse::<Currency>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Currency(u16);

/// Metadata of one row of the currency table.
#[derive(Debug, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// Three uppercase ASCII letters, unique in the table.
    pub code: &'static str,
    pub name: &'static str,
    pub numeric_code: u16,
    /// Decimal subdivisions, `None` where ISO 4217 defines none (metals,
    /// bond units, `XTS`, `XXX`).
    pub minor_units: Option<u8>,
}

/// Errors returned when parsing a currency code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Not exactly three ASCII letters.
    #[error("malformed currency code \"{0}\": expected 3 letters")]
    Malformed(String),
    /// Well formed but not an ISO 4217 code.
    #[error("unknown currency code \"{0}\"")]
    Unknown(String),
}

static BY_CODE: LazyLock<HashMap<&'static str, Currency>> = LazyLock::new(|| {
    table::TABLE
        .iter()
        .enumerate()
        .map(|(index, info)| (info.code, Currency(index as u16)))
        .collect()
});

impl Currency {
    /// Wraps a raw table index. Out-of-range indexes are accepted.
    #[must_use]
    pub const fn from_index(index: u16) -> Self {
        Self(index)
    }

    /// Raw table index.
    #[must_use]
    pub const fn index(self) -> u16 {
        self.0
    }

    /// Table row for this currency, `None` if the index is out of range.
    #[must_use]
    pub fn info(self) -> Option<&'static CurrencyInfo> {
        table::TABLE.get(usize::from(self.0))
    }

    /// Returns `true` if the currency is in the table.
    #[must_use]
    pub fn is_known(self) -> bool {
        self.info().is_some()
    }

    /// Canonical uppercase code, `XXX` for an unrecognized currency.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.info().map_or(UNRECOGNIZED_CODE, |info| info.code)
    }

    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        self.info().map(|info| info.name)
    }

    #[must_use]
    pub fn numeric_code(self) -> Option<u16> {
        self.info().map(|info| info.numeric_code)
    }

    #[must_use]
    pub fn minor_units(self) -> Option<u8> {
        self.info().and_then(|info| info.minor_units)
    }

    /// Returns `true` if `code` parses to a currency.
    #[must_use]
    pub fn is_valid_code(code: &str) -> bool {
        code.parse::<Currency>().is_ok()
    }

    /// Every known currency, in table order.
    pub fn all() -> impl Iterator<Item = Currency> {
        (0..table::TABLE.len()).map(|index| Currency(index as u16))
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::XXX
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses a code, ignoring ASCII case.
    ///
    /// The input is not trimmed: `" CAD"` is malformed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CurrencyError::Malformed(s.to_string());

        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(malformed());
        }

        let mut upper = [0u8; 3];
        upper.copy_from_slice(bytes);
        upper.make_ascii_uppercase();
        let code = std::str::from_utf8(&upper).map_err(|_| malformed())?;

        BY_CODE
            .get(code)
            .copied()
            .ok_or_else(|| CurrencyError::Unknown(s.to_string()))
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(CurrencyVisitor)
    }
}

struct CurrencyVisitor;

impl de::Visitor<'_> for CurrencyVisitor {
    type Value = Currency;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a three letter ISO 4217 currency code")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(rename = "C")]
        c: Currency,
    }

    #[test]
    fn table_codes_are_unique_sorted_uppercase() {
        let mut seen = HashSet::new();
        for info in table::TABLE {
            assert_eq!(info.code.len(), 3, "{}", info.code);
            assert!(info.code.bytes().all(|b| b.is_ascii_uppercase()), "{}", info.code);
            assert!(seen.insert(info.code), "duplicate {}", info.code);
        }
        assert!(table::TABLE.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn table_positions_are_stable() {
        assert_eq!(Currency::AED.index(), 0);
        assert_eq!(Currency::CAD.index(), 26);
        assert_eq!(
            usize::from(Currency::ZWL.index()),
            table::TABLE.len() - 1
        );
    }

    #[test]
    fn code_gives_expected_codes() {
        let expected = [
            (Currency::CAD, "CAD"),
            (Currency::USD, "USD"),
            (Currency::EUR, "EUR"),
            (Currency::GBP, "GBP"),
            (Currency::XXX, "XXX"),
            (Currency::XTS, "XTS"),
            (Currency::ZWL, "ZWL"),
            (Currency::from_index(Currency::ZWL.index() + 1), "XXX"),
            (Currency::from_index(Currency::ZWL.index() + 2), "XXX"),
            (Currency::from_index(u16::MAX), "XXX"),
        ];

        for (currency, code) in expected {
            assert_eq!(currency.code(), code);
            assert_eq!(currency.to_string(), code);
        }
    }

    #[test]
    fn code_is_three_uppercase_letters_for_any_index() {
        for index in (0..=u16::MAX).step_by(97).chain([u16::MAX]) {
            let code = Currency::from_index(index).code();
            assert_eq!(code.len(), 3);
            assert!(code.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn parse_round_trips_every_currency() {
        for currency in Currency::all() {
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }
        assert_eq!(Currency::all().count(), table::TABLE.len());
    }

    #[test]
    fn parse_ignores_case() {
        for currency in Currency::all() {
            let code = currency.code();
            let lower = code.to_ascii_lowercase();
            let mixed: String = code
                .chars()
                .enumerate()
                .map(|(i, c)| if i == 1 { c.to_ascii_lowercase() } else { c })
                .collect();
            assert_eq!(lower.parse::<Currency>(), Ok(currency));
            assert_eq!(mixed.parse::<Currency>(), Ok(currency));
        }
        assert_eq!("CaD".parse::<Currency>(), "cad".parse::<Currency>());
        assert_eq!(
            "XyZ".parse::<Currency>().ok(),
            "xyz".parse::<Currency>().ok()
        );
    }

    #[test]
    fn parse_rejects_wrong_length() {
        for input in ["", "a", "A", "AA", "abcd", "ABCD", " CAD", "CAD "] {
            assert_eq!(
                input.parse::<Currency>(),
                Err(CurrencyError::Malformed(input.to_string())),
                "{input:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_non_letters() {
        for input in ["#$%", "123", "C4D", "ÇAD"] {
            assert_eq!(
                input.parse::<Currency>(),
                Err(CurrencyError::Malformed(input.to_string())),
                "{input:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        // Update if ISO ever assigns UUU.
        assert_eq!(
            "UUU".parse::<Currency>(),
            Err(CurrencyError::Unknown("UUU".to_string()))
        );
        assert_eq!(
            "abc".parse::<Currency>(),
            Err(CurrencyError::Unknown("abc".to_string()))
        );
    }

    #[test]
    fn sentinel_codes_parse() {
        assert_eq!("XXX".parse::<Currency>(), Ok(Currency::XXX));
        assert_eq!("XTS".parse::<Currency>(), Ok(Currency::XTS));
        assert!(Currency::XXX.is_known());
        assert!(!Currency::from_index(u16::MAX).is_known());
    }

    #[test]
    fn is_valid_code_agrees_with_parse() {
        for input in ["CAD", "cad", "XXX", "XTS", "", "AA", "ABCD", "UUU", "#$%", "123"] {
            assert_eq!(
                Currency::is_valid_code(input),
                input.parse::<Currency>().is_ok(),
                "{input:?}"
            );
        }
    }

    #[test]
    fn metadata_is_exposed() {
        assert_eq!(Currency::CAD.name(), Some("Canadian Dollar"));
        assert_eq!(Currency::CAD.numeric_code(), Some(124));
        assert_eq!(Currency::CAD.minor_units(), Some(2));
        assert_eq!(Currency::JPY.minor_units(), Some(0));
        assert_eq!(Currency::XAU.minor_units(), None);
        assert_eq!(Currency::from_index(u16::MAX).name(), None);
        assert_eq!(Currency::default(), Currency::XXX);
    }

    #[test]
    fn serializes_to_code() {
        for (currency, json) in [
            (Currency::CAD, r#""CAD""#),
            (Currency::USD, r#""USD""#),
            (Currency::EUR, r#""EUR""#),
            (Currency::from_index(u16::MAX), r#""XXX""#),
        ] {
            assert_eq!(serde_json::to_string(&currency).unwrap(), json);
        }
    }

    #[test]
    fn deserializes_any_case() {
        for (json, currency) in [
            (r#""CAD""#, Currency::CAD),
            (r#""cad""#, Currency::CAD),
            (r#""CaD""#, Currency::CAD),
            (r#""USd""#, Currency::USD),
            (r#""EUR""#, Currency::EUR),
        ] {
            assert_eq!(serde_json::from_str::<Currency>(json).unwrap(), currency);
        }
    }

    #[test]
    fn struct_field_round_trips() {
        let json = serde_json::to_string(&Wrapper { c: Currency::CAD }).unwrap();
        assert_eq!(json, r#"{"C":"CAD"}"#);

        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Wrapper { c: Currency::CAD });
    }

    #[test]
    fn struct_field_reports_parse_errors() {
        let err = serde_json::from_str::<Wrapper>(r#"{"C":"UUU"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown currency code"), "{err}");

        let err = serde_json::from_str::<Wrapper>(r#"{"C":"BADDD"}"#).unwrap_err();
        assert!(err.to_string().contains("malformed currency code"), "{err}");

        assert!(serde_json::from_str::<Wrapper>(r#"{"C":26}"#).is_err());
    }
}
