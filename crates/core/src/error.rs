//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type StockResult<T> = Result<T, StockError>;

/// Deterministic validation failure of a stock mutation.
///
/// Every variant is a rejected, no-op outcome: the engine never partially
/// applies a mutation. Variants carry the offending location code where one
/// exists so callers can point at the exact row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// The SKU does not resolve to a product.
    #[error("product not found")]
    ProductNotFound,

    /// A transfer was requested with an empty source list.
    #[error("no transfer sources given")]
    NoSources,

    /// A source entry has an empty code or a zero quantity.
    #[error("invalid source entry")]
    InvalidSourceInput,

    /// A source code does not match any location on the product.
    #[error("source location '{code}' not found")]
    SourceNotFound { code: String },

    /// A requested draw or deduction exceeds the location's quantity.
    #[error("insufficient quantity at location '{code}'")]
    InsufficientQuantity { code: String },

    /// No usable destination: empty code, or an `Existing` code that is not
    /// on the product.
    #[error("no destination selected")]
    DestinationNotSelected,

    /// The destination coincides with one of the transfer sources.
    #[error("destination equals a transfer source")]
    DestinationEqualsSource,

    /// A `New` transfer destination collides with an existing location.
    #[error("destination location '{code}' already exists")]
    DestinationAlreadyExists { code: String },

    /// An adjustment delta of zero.
    #[error("invalid quantity delta")]
    InvalidQuantity,

    /// The location named in a primary-designation request does not exist.
    #[error("location '{code}' not found")]
    LocationNotFound { code: String },
}

impl StockError {
    pub fn source_not_found(code: impl Into<String>) -> Self {
        Self::SourceNotFound { code: code.into() }
    }

    pub fn insufficient(code: impl Into<String>) -> Self {
        Self::InsufficientQuantity { code: code.into() }
    }

    pub fn destination_exists(code: impl Into<String>) -> Self {
        Self::DestinationAlreadyExists { code: code.into() }
    }

    pub fn location_not_found(code: impl Into<String>) -> Self {
        Self::LocationNotFound { code: code.into() }
    }

    /// Stable wire identifier for this failure cause.
    ///
    /// Callers localize/display off these; they are part of the external
    /// contract and must never change for an existing variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::NoSources => "NO_SOURCES",
            Self::InvalidSourceInput => "INVALID_SOURCE_INPUT",
            Self::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            Self::InsufficientQuantity { .. } => "INSUFFICIENT_QUANTITY",
            Self::DestinationNotSelected => "DESTINATION_NOT_SELECTED",
            Self::DestinationEqualsSource => "DESTINATION_EQUALS_SOURCE",
            Self::DestinationAlreadyExists { .. } => "DESTINATION_ALREADY_EXISTS",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::LocationNotFound { .. } => "LOCATION_NOT_FOUND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(StockError::ProductNotFound.code(), "PRODUCT_NOT_FOUND");
        assert_eq!(
            StockError::source_not_found("EB-001-A").code(),
            "SOURCE_NOT_FOUND"
        );
        assert_eq!(
            StockError::insufficient("EB-001-A").code(),
            "INSUFFICIENT_QUANTITY"
        );
        assert_eq!(
            StockError::DestinationEqualsSource.code(),
            "DESTINATION_EQUALS_SOURCE"
        );
    }

    #[test]
    fn display_names_the_offending_location() {
        let err = StockError::insufficient("RACK-12");
        assert_eq!(err.to_string(), "insufficient quantity at location 'RACK-12'");
    }
}
