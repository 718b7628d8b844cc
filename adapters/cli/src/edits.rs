use ballistics_core::{CellCoord, Occupant};
use thiserror::Error;

/// Occupant and cell parsed from a `kind@x,y` argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Placement {
    /// Category of the token.
    pub(crate) occupant: Occupant,
    /// Target cell.
    pub(crate) cell: CellCoord,
}

/// Errors reported while parsing edit arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum EditParseError {
    /// The placement argument lacked the `@` separator.
    #[error("expected <kind>@<x>,<y>, got '{0}'")]
    MissingSeparator(String),
    /// The occupant kind was not recognised.
    #[error("unknown occupant '{0}', expected player, enemy, obstacle or wall")]
    UnknownOccupant(String),
    /// The cell coordinates could not be parsed.
    #[error("expected <x>,<y> with non-negative integers, got '{0}'")]
    InvalidCell(String),
}

/// Parses `kind@x,y` into a [`Placement`].
pub(crate) fn parse_placement(value: &str) -> Result<Placement, EditParseError> {
    let (kind, cell) = value
        .split_once('@')
        .ok_or_else(|| EditParseError::MissingSeparator(value.to_owned()))?;
    let kind = kind.trim().to_ascii_lowercase();
    let occupant = Occupant::ALL
        .into_iter()
        .find(|occupant| occupant.label() == kind)
        .ok_or(EditParseError::UnknownOccupant(kind))?;

    Ok(Placement {
        occupant,
        cell: parse_cell(cell)?,
    })
}

/// Parses `x,y` into a cell coordinate.
pub(crate) fn parse_cell(value: &str) -> Result<CellCoord, EditParseError> {
    let invalid = || EditParseError::InvalidCell(value.to_owned());
    let (column, row) = value.split_once(',').ok_or_else(invalid)?;
    let column = column.trim().parse::<u32>().map_err(|_| invalid())?;
    let row = row.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(CellCoord::new(column, row))
}
