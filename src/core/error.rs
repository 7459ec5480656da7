use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error(
        "compound frequency {compound}/year is less frequent than deposit frequency {deposit}/year"
    )]
    UnsupportedFrequencyPair { deposit: u32, compound: u32 },
}
