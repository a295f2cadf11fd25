use crate::models::Coordinate;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when resolving a postal code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostalError {
    #[error("Invalid postal code: {0:?}")]
    Invalid(String),

    #[error("Postal code not found: {0}")]
    NotFound(String),
}

/// Resolves a postal code to the coordinate used as a search origin
pub trait PostalCodeLookup: Send + Sync {
    fn resolve(&self, code: &str) -> Result<Coordinate, PostalError>;
}

/// Normalize user input to a 5-digit ZIP code
///
/// Surrounding whitespace is ignored and a ZIP+4 (`84045-1234`) is reduced to
/// its 5-digit prefix.
pub fn normalize_postal_code(raw: &str) -> Result<String, PostalError> {
    let trimmed = raw.trim();
    let base = match trimmed.split_once('-') {
        Some((base, plus4)) if plus4.len() == 4 && plus4.bytes().all(|b| b.is_ascii_digit()) => base,
        Some(_) => return Err(PostalError::Invalid(raw.to_string())),
        None => trimmed,
    };

    if base.len() == 5 && base.bytes().all(|b| b.is_ascii_digit()) {
        Ok(base.to_string())
    } else {
        Err(PostalError::Invalid(raw.to_string()))
    }
}

/// Fixed postal-code table
#[derive(Debug, Clone)]
pub struct StaticPostalCodes {
    codes: HashMap<String, Coordinate>,
}

impl StaticPostalCodes {
    pub fn new(codes: HashMap<String, Coordinate>) -> Self {
        Self { codes }
    }

    /// Built-in table covering the marketplace's launch area
    pub fn builtin() -> Self {
        let codes = [
            ("84045", 40.3469, -111.9047), // Saratoga Springs
            ("84043", 40.3916, -111.8508), // Lehi
            ("84003", 40.3769, -111.7958), // American Fork
            ("84005", 40.3141, -112.0069), // Eagle Mountain
            ("84062", 40.3641, -111.7385), // Pleasant Grove
            ("84057", 40.2969, -111.6946), // Orem
            ("84097", 40.3030, -111.6630), // Orem (north-east)
            ("84601", 40.2338, -111.6585), // Provo
            ("84020", 40.5247, -111.8638), // Draper
            ("84065", 40.5216, -111.9391), // Riverton
            ("84111", 40.7608, -111.8910), // Salt Lake City
        ]
        .into_iter()
        .map(|(code, lat, lon)| (code.to_string(), Coordinate::new(lat, lon)))
        .collect();

        Self { codes }
    }

    /// Add or replace entries, e.g. from configuration
    pub fn with_overrides<I>(mut self, extra: I) -> Result<Self, PostalError>
    where
        I: IntoIterator<Item = (String, Coordinate)>,
    {
        for (code, coordinate) in extra {
            let code = normalize_postal_code(&code)?;
            self.codes.insert(code, coordinate);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl PostalCodeLookup for StaticPostalCodes {
    fn resolve(&self, code: &str) -> Result<Coordinate, PostalError> {
        let code = normalize_postal_code(code)?;
        self.codes
            .get(&code)
            .copied()
            .ok_or(PostalError::NotFound(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_code() {
        let lookup = StaticPostalCodes::builtin();
        assert_eq!(lookup.resolve("84045"), Ok(Coordinate::new(40.3469, -111.9047)));
    }

    #[test]
    fn test_resolve_zip_plus_four_and_whitespace() {
        let lookup = StaticPostalCodes::builtin();
        assert_eq!(lookup.resolve(" 84043-1234 "), Ok(Coordinate::new(40.3916, -111.8508)));
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let lookup = StaticPostalCodes::builtin();
        assert_eq!(lookup.resolve("90210"), Err(PostalError::NotFound("90210".to_string())));
    }

    #[test]
    fn test_malformed_codes_are_invalid() {
        let lookup = StaticPostalCodes::builtin();
        for raw in ["", "8404", "840455", "84O45", "84045-12", "84045-abcd"] {
            assert!(
                matches!(lookup.resolve(raw), Err(PostalError::Invalid(_))),
                "{:?} should be invalid",
                raw
            );
        }
    }

    #[test]
    fn test_overrides() {
        let lookup = StaticPostalCodes::builtin()
            .with_overrides(vec![("90210".to_string(), Coordinate::new(34.0901, -118.4065))])
            .unwrap();
        assert!(lookup.resolve("90210").is_ok());

        let bad = StaticPostalCodes::builtin().with_overrides(vec![("nope".to_string(), Coordinate::new(0.0, 0.0))]);
        assert!(bad.is_err());
    }
}
