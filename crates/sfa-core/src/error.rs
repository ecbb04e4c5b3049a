/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or parsing core records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An attribute name did not match any of the five attributes.
    #[error("unknown attribute: \"{0}\"")]
    UnknownAttribute(String),

    /// A species name did not match any playable species.
    #[error("unknown species: \"{0}\"")]
    UnknownSpecies(String),

    /// A division name did not match any academy division.
    #[error("unknown division: \"{0}\"")]
    UnknownDivision(String),

    /// An equipment slot name was not recognized.
    #[error("unknown equipment slot: \"{0}\"")]
    UnknownSlot(String),

    /// Two records in a catalog share the same identifier.
    #[error("duplicate id: \"{0}\"")]
    DuplicateId(String),

    /// The save has no cadet to attach a record to.
    #[error("no cadet in this save")]
    NoCadet,

    /// An allocation string could not be parsed.
    #[error("invalid allocation \"{input}\": {reason}")]
    InvalidAllocation {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}
