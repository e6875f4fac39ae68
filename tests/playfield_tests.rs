//! Playfield tests - bounds, collision and row clearing

use stackfall::core::Playfield;
use stackfall::types::{Coord, TetrominoKind};

fn fill_row(field: &mut Playfield, row: i32) {
    let b = field.bounds();
    let cells: Vec<Coord> = (b.x_min()..b.x_max()).map(|x| Coord::new(x, row)).collect();
    field.set_cells(&cells, TetrominoKind::J);
}

#[test]
fn test_default_bounds_are_centered() {
    let field = Playfield::default();
    let b = field.bounds();
    assert_eq!((b.x_min(), b.x_max()), (-5, 5));
    assert_eq!((b.y_min(), b.y_max()), (-10, 10));
    assert!(field.is_empty());
}

#[test]
fn test_odd_size_bounds() {
    let field = Playfield::new(7, 5);
    let b = field.bounds();
    assert_eq!((b.x_min(), b.x_max()), (-3, 4));
    assert_eq!((b.y_min(), b.y_max()), (-2, 3));
}

#[test]
fn test_valid_position_rules() {
    let mut field = Playfield::default();
    let inside = [Coord::new(-5, -10), Coord::new(4, 9)];
    assert!(field.is_valid_position(&inside));

    for outside in [
        Coord::new(-6, 0),
        Coord::new(5, 0),
        Coord::new(0, -11),
        Coord::new(0, 10),
    ] {
        assert!(!field.is_valid_position(&[Coord::new(0, 0), outside]), "{outside:?}");
    }

    field.set_cells(&[Coord::new(0, 0)], TetrominoKind::S);
    assert!(!field.is_valid_position(&[Coord::new(1, 0), Coord::new(0, 0)]));
    assert!(field.is_valid_position(&[Coord::new(1, 0)]));
    assert!(field.is_valid_position(&[]));
}

#[test]
fn test_set_and_clear_cells() {
    let mut field = Playfield::default();
    let cells = [Coord::new(-1, 3), Coord::new(0, 3)];
    field.set_cells(&cells, TetrominoKind::Z);
    assert_eq!(field.tile(Coord::new(-1, 3)), Some(TetrominoKind::Z));
    assert!(field.is_occupied(Coord::new(0, 3)));

    field.clear_cells(&cells);
    assert!(field.is_empty());
}

#[test]
fn test_out_of_bounds_reads_are_empty() {
    let field = Playfield::default();
    assert_eq!(field.tile(Coord::new(100, 100)), None);
    assert!(!field.is_occupied(Coord::new(-6, -11)));
    assert!(!field.is_row_full(10));
    assert!(field.row(-11).is_none());
}

#[test]
fn test_row_full_detection() {
    let mut field = Playfield::default();
    fill_row(&mut field, -10);
    assert!(field.is_row_full(-10));

    field.clear_cells(&[Coord::new(4, -10)]);
    assert!(!field.is_row_full(-10));
}

#[test]
fn test_clear_single_row() {
    let mut field = Playfield::default();
    fill_row(&mut field, -10);
    field.set_cells(&[Coord::new(0, -9)], TetrominoKind::T);

    assert_eq!(field.clear_full_rows().as_slice(), &[-10]);
    assert_eq!(field.tile(Coord::new(0, -10)), Some(TetrominoKind::T));
    assert_eq!(field.occupied_cells().count(), 1);
}

#[test]
fn test_clear_two_adjacent_rows_shifts_by_two() {
    let mut field = Playfield::default();
    fill_row(&mut field, -10);
    fill_row(&mut field, -9);
    field.set_cells(&[Coord::new(2, -8)], TetrominoKind::L);
    field.set_cells(&[Coord::new(-3, 0)], TetrominoKind::O);

    // The same index is removed twice.
    assert_eq!(field.clear_full_rows().as_slice(), &[-10, -10]);
    assert_eq!(field.tile(Coord::new(2, -10)), Some(TetrominoKind::L));
    assert_eq!(field.tile(Coord::new(-3, -2)), Some(TetrominoKind::O));
    assert_eq!(field.occupied_cells().count(), 2);
}

#[test]
fn test_clear_separated_rows() {
    let mut field = Playfield::default();
    fill_row(&mut field, -10);
    field.set_cells(&[Coord::new(1, -9)], TetrominoKind::I);
    fill_row(&mut field, -8);
    field.set_cells(&[Coord::new(3, -7)], TetrominoKind::S);

    assert_eq!(field.clear_full_rows().as_slice(), &[-10, -9]);
    assert_eq!(field.tile(Coord::new(1, -10)), Some(TetrominoKind::I));
    assert_eq!(field.tile(Coord::new(3, -9)), Some(TetrominoKind::S));
    assert_eq!(field.occupied_cells().count(), 2);
}

#[test]
fn test_clear_top_row() {
    let mut field = Playfield::default();
    fill_row(&mut field, 9);
    assert_eq!(field.clear_full_rows().as_slice(), &[9]);
    assert!(field.is_empty());
}

#[test]
fn test_no_full_rows_is_noop() {
    let mut field = Playfield::default();
    field.set_cells(&[Coord::new(0, -10)], TetrominoKind::T);
    let before = field.clone();

    assert!(field.clear_full_rows().is_empty());
    assert_eq!(field, before);
}

#[test]
fn test_whole_field_full_clears_everything() {
    let mut field = Playfield::new(4, 4);
    for row in -2..2 {
        fill_row(&mut field, row);
    }
    assert_eq!(field.clear_full_rows().as_slice(), &[-2, -2, -2, -2]);
    assert!(field.is_empty());
}
