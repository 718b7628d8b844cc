use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use ballistics_core::{GridSnapshot, MAX_GRID_SIZE};
use thiserror::Error;

const SNAPSHOT_DOMAIN: &str = "ballistics";
const SNAPSHOT_VERSION: &str = "v1";

/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Grid contents plus dimension, shareable as a single line of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayoutSnapshot {
    /// Number of cells along each edge of the grid.
    pub(crate) size: u32,
    /// Occupancy lists captured from the grid.
    pub(crate) grid: GridSnapshot,
}

impl LayoutSnapshot {
    /// Encodes the snapshot into a single-line string suitable for clipboard transfer.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let json = serde_json::to_vec(&self.grid).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{SNAPSHOT_DOMAIN}{FIELD_DELIMITER}{SNAPSHOT_VERSION}{FIELD_DELIMITER}\
             {size}x{size}{FIELD_DELIMITER}{encoded}",
            size = self.size
        ))
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let size = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let grid: GridSnapshot =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self { size, grid })
    }
}

/// Errors that can occur while encoding or decoding layout transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("layout string was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    #[error("layout string is missing the prefix")]
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    #[error("layout string is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed or describe a non-square grid.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    #[error("could not process layout payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<u32, LayoutTransferError> {
    let invalid = || LayoutTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;

    if columns == 0 || columns > MAX_GRID_SIZE || columns != rows {
        return Err(invalid());
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballistics_core::CellCoord;

    #[test]
    fn encoded_layout_starts_with_the_decoded_prefix() {
        let encoded = LayoutSnapshot {
            size: 3,
            grid: GridSnapshot::default(),
        }
        .encode()
        .expect("snapshot encodes");

        let mut parts = encoded.split(FIELD_DELIMITER);
        assert_eq!(parts.next(), Some(SNAPSHOT_DOMAIN));
        assert_eq!(parts.next(), Some(SNAPSHOT_VERSION));
        assert_eq!(parts.next(), Some("3x3"));
    }

    #[test]
    fn round_trip_empty_layout() {
        let snapshot = LayoutSnapshot {
            size: 12,
            grid: GridSnapshot::default(),
        };

        let encoded = snapshot.encode().expect("snapshot encodes");
        assert!(encoded.starts_with("ballistics:v1:12x12:"));

        let decoded = LayoutSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn round_trip_populated_layout() {
        let snapshot = LayoutSnapshot {
            size: 20,
            grid: GridSnapshot {
                players: vec![CellCoord::new(5, 7)],
                enemies: vec![CellCoord::new(12, 4), CellCoord::new(19, 19)],
                obstacles: vec![CellCoord::new(8, 6)],
                walls: vec![CellCoord::new(0, 3)],
            },
        };

        let encoded = snapshot.encode().expect("snapshot encodes");
        let decoded = LayoutSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn rejects_foreign_prefix_and_non_square_grids() {
        assert!(matches!(
            LayoutSnapshot::decode("grid:v1:4x4:e30"),
            Err(LayoutTransferError::InvalidPrefix(prefix)) if prefix == "grid"
        ));
        assert!(matches!(
            LayoutSnapshot::decode("ballistics:v1:4x5:e30"),
            Err(LayoutTransferError::InvalidDimensions(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("ballistics:v1:100000x100000:e30"),
            Err(LayoutTransferError::InvalidDimensions(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("ballistics:v2:4x4:e30"),
            Err(LayoutTransferError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("   "),
            Err(LayoutTransferError::EmptyPayload)
        ));
    }
}
