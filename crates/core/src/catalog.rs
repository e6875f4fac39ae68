//! Catalog module - tetromino shapes and wall-kick tables
//!
//! The catalog is built once at startup and then only read. Local cell
//! offsets use the piece frame with `y` up; rotation state 0 is the spawn
//! orientation. Wall-kick rows are ordered by transition:
//!
//! | Row | Transition |
//! |-----|------------|
//! | 0 | 0 → 1 |
//! | 1 | 1 → 0 |
//! | 2 | 1 → 2 |
//! | 3 | 2 → 1 |
//! | 4 | 2 → 3 |
//! | 5 | 3 → 2 |
//! | 6 | 3 → 0 |
//! | 7 | 0 → 3 |
//!
//! Reference: https://tetris.wiki/SRS

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::{Coord, TetrominoKind, CELLS_PER_PIECE, MAX_KICKS};

/// Candidate translations tried, in order, after a rotation
pub type KickRow = ArrayVec<Coord, MAX_KICKS>;

/// Point the cell offsets are rotated about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pivot {
    /// Center of the origin cell; rotated offsets round to nearest.
    #[default]
    Cell,
    /// Corner shared with cell (1, 1), i.e. offset (0.5, 0.5); rotated
    /// offsets round toward positive infinity. Used by I and O.
    Corner,
}

/// Immutable shape data for one tetromino kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDefinition {
    pub kind: TetrominoKind,
    /// Offsets at rotation state 0
    pub cells: [Coord; CELLS_PER_PIECE],
    #[serde(default)]
    pub pivot: Pivot,
    pub wall_kicks: Vec<KickRow>,
}

impl ShapeDefinition {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.wall_kicks.is_empty() {
            return Err(CatalogError::EmptyKickTable(self.kind));
        }
        if let Some(row) = self.wall_kicks.iter().position(|r| r.is_empty()) {
            return Err(CatalogError::EmptyKickRow {
                kind: self.kind,
                row,
            });
        }
        Ok(())
    }
}

/// Shape data for every tetromino kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Indexed by [`TetrominoKind::index`]
    shapes: Vec<ShapeDefinition>,
}

impl Catalog {
    /// The standard seven pieces with SRS wall kicks
    pub fn standard() -> Self {
        let shapes = TetrominoKind::ALL.iter().map(|&k| standard_shape(k)).collect();
        Self { shapes }
    }

    /// Build a catalog from custom data
    ///
    /// Every kind must be defined exactly once with a usable wall-kick table.
    pub fn from_definitions(
        defs: impl IntoIterator<Item = ShapeDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut slots: [Option<ShapeDefinition>; 7] = Default::default();

        for def in defs {
            def.validate()?;
            let slot = &mut slots[def.kind.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateKind(def.kind));
            }
            *slot = Some(def);
        }

        let mut shapes = Vec::with_capacity(slots.len());
        for (kind, slot) in TetrominoKind::ALL.into_iter().zip(slots) {
            shapes.push(slot.ok_or(CatalogError::MissingKind(kind))?);
        }
        Ok(Self { shapes })
    }

    /// Parse a JSON list of [`ShapeDefinition`]s
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        let defs: Vec<ShapeDefinition> = serde_json::from_str(s)?;
        Self::from_definitions(defs)
    }

    pub fn shape_for(&self, kind: TetrominoKind) -> &ShapeDefinition {
        &self.shapes[kind.index()]
    }

    pub fn kinds(&self) -> impl Iterator<Item = TetrominoKind> + '_ {
        self.shapes.iter().map(|s| s.kind)
    }

    pub fn shapes(&self) -> &[ShapeDefinition] {
        &self.shapes
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

type KickTable = [[(i32, i32); MAX_KICKS]; 8];

/// J, L, O, S, T and Z share one table
const JLOSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

fn standard_cells(kind: TetrominoKind) -> [(i32, i32); CELLS_PER_PIECE] {
    match kind {
        // IIII
        TetrominoKind::I => [(-1, 1), (0, 1), (1, 1), (2, 1)],
        // OO
        // OO
        TetrominoKind::O => [(0, 1), (1, 1), (0, 0), (1, 0)],
        // .T.
        // TTT
        TetrominoKind::T => [(0, 1), (-1, 0), (0, 0), (1, 0)],
        // J..
        // JJJ
        TetrominoKind::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        // ..L
        // LLL
        TetrominoKind::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
        // .SS
        // SS.
        TetrominoKind::S => [(0, 1), (1, 1), (-1, 0), (0, 0)],
        // ZZ.
        // .ZZ
        TetrominoKind::Z => [(-1, 1), (0, 1), (0, 0), (1, 0)],
    }
}

fn standard_shape(kind: TetrominoKind) -> ShapeDefinition {
    let (pivot, table) = match kind {
        TetrominoKind::I => (Pivot::Corner, &I_KICKS),
        TetrominoKind::O => (Pivot::Corner, &JLOSTZ_KICKS),
        _ => (Pivot::Cell, &JLOSTZ_KICKS),
    };

    ShapeDefinition {
        kind,
        cells: standard_cells(kind).map(Coord::from),
        pivot,
        wall_kicks: table
            .iter()
            .map(|row| row.iter().map(|&k| Coord::from(k)).collect())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_complete() {
        let catalog = Catalog::standard();
        let kinds: Vec<_> = catalog.kinds().collect();
        assert_eq!(kinds, TetrominoKind::ALL.to_vec());

        for kind in TetrominoKind::ALL {
            let shape = catalog.shape_for(kind);
            assert_eq!(shape.kind, kind);
            assert_eq!(shape.wall_kicks.len(), 8);
            assert!(shape.wall_kicks.iter().all(|row| row.len() == 5));
            assert!(shape.validate().is_ok());
        }
    }

    #[test]
    fn test_pivots() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.shape_for(TetrominoKind::I).pivot, Pivot::Corner);
        assert_eq!(catalog.shape_for(TetrominoKind::O).pivot, Pivot::Corner);
        for kind in [
            TetrominoKind::T,
            TetrominoKind::J,
            TetrominoKind::L,
            TetrominoKind::S,
            TetrominoKind::Z,
        ] {
            assert_eq!(catalog.shape_for(kind).pivot, Pivot::Cell, "{kind}");
        }
    }

    #[test]
    fn test_i_uses_its_own_kicks() {
        let catalog = Catalog::standard();
        let i = catalog.shape_for(TetrominoKind::I);
        let t = catalog.shape_for(TetrominoKind::T);
        assert_eq!(i.wall_kicks[0][1], Coord::new(-2, 0));
        assert_eq!(t.wall_kicks[0][1], Coord::new(-1, 0));
        assert_eq!(
            catalog.shape_for(TetrominoKind::O).wall_kicks,
            t.wall_kicks
        );
    }

    #[test]
    fn test_every_kick_row_starts_in_place() {
        let catalog = Catalog::standard();
        for shape in catalog.shapes() {
            for row in &shape.wall_kicks {
                assert_eq!(row[0], Coord::ZERO);
            }
        }
    }

    #[test]
    fn test_missing_kind_is_rejected() {
        let defs = Catalog::standard()
            .shapes()
            .iter()
            .filter(|s| s.kind != TetrominoKind::S)
            .cloned()
            .collect::<Vec<_>>();
        let err = Catalog::from_definitions(defs).unwrap_err();
        assert!(matches!(err, CatalogError::MissingKind(TetrominoKind::S)));
    }

    #[test]
    fn test_duplicate_kind_is_rejected() {
        let mut defs = Catalog::standard().shapes().to_vec();
        defs.push(defs[2].clone());
        let err = Catalog::from_definitions(defs).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKind(TetrominoKind::T)));
    }

    #[test]
    fn test_empty_kick_data_is_rejected() {
        let mut defs = Catalog::standard().shapes().to_vec();
        defs[3].wall_kicks.clear();
        let err = Catalog::from_definitions(defs.clone()).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyKickTable(TetrominoKind::J)));

        let mut defs = Catalog::standard().shapes().to_vec();
        defs[4].wall_kicks[5].clear();
        let err = Catalog::from_definitions(defs).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyKickRow {
                kind: TetrominoKind::L,
                row: 5
            }
        ));
    }

    #[test]
    fn test_json_catalog() {
        let json = serde_json::to_string(Catalog::standard().shapes()).unwrap();
        let catalog = Catalog::from_json_str(&json).unwrap();
        assert_eq!(catalog, Catalog::standard());

        let err = Catalog::from_json_str("[]").unwrap_err();
        assert!(matches!(err, CatalogError::MissingKind(TetrominoKind::I)));
    }

    #[test]
    fn test_json_rejects_oversized_kick_row() {
        let mut value = serde_json::to_value(Catalog::standard().shapes()).unwrap();
        let row = value[0]["wall_kicks"][0].as_array_mut().unwrap();
        row.push(serde_json::json!({"x": 3, "y": 3}));
        let err = Catalog::from_json_str(&value.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}
