use geo::{Geometry, LineString, MultiPolygon, Point, coord, polygon};
use gridcache::{CellRect, RasterGrid};

fn square(min_x: f64, min_y: f64, size: f64) -> geo::Polygon<f64> {
    polygon![
        (x: min_x, y: min_y),
        (x: min_x + size, y: min_y),
        (x: min_x + size, y: min_y + size),
        (x: min_x, y: min_y + size),
    ]
}

#[test]
fn test_multipolygon_writes_both_regions() {
    // Parts kept strictly inside their cells so the joint candidate box
    // does not pick up edge-touching neighbors.
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    let shape = Geometry::MultiPolygon(MultiPolygon(vec![
        square(1.0, 1.0, 8.0),
        square(41.0, 41.0, 8.0),
    ]));

    grid.set(shape.clone(), 6).unwrap();
    assert_eq!(grid.bounds(), CellRect::new(0, 0, 5, 5));

    let values = grid.get(shape).unwrap();
    assert_eq!(values, vec![6, 6]);

    // The span between the two parts stays untouched.
    let values = grid.get(square(20.0, 20.0, 10.0)).unwrap();
    assert_eq!(values, vec![0]);
}

#[test]
fn test_touching_cell_counts_as_covered() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    grid.fit_bounds(CellRect::new(0, 0, 3, 1));

    // The square occupies cell (1, 0) exactly; with a widened candidate
    // box its neighbors share only an edge, which still intersects.
    let shape = Geometry::Polygon(square(10.0, 0.0, 10.0));
    let mask = grid.geometry_cells(&shape, Some(CellRect::new(0, 0, 3, 1)));
    assert_eq!(mask, vec![true, true, true]);

    // With the default (tight) candidate box only the occupied cell is
    // considered at all.
    let mask = grid.geometry_cells(&shape, None);
    assert_eq!(mask, vec![false, true, false]);
}

#[test]
fn test_linestring_covers_crossed_cells() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    let line = LineString::from(vec![(0.0, 5.0), (30.0, 5.0)]);

    grid.set(line.clone(), 8).unwrap();
    assert_eq!(grid.bounds(), CellRect::new(0, 0, 3, 1));
    assert_eq!(grid.get(line).unwrap(), vec![8, 8, 8]);
}

#[test]
fn test_point_on_cell_corner_writes_nothing() {
    // floor == ceil on both axes makes the candidate box empty.
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    grid.set(Point::new(10.0, 10.0), 3).unwrap();

    assert!(grid.is_empty());
    assert!(grid.get(Point::new(10.0, 10.0)).unwrap().is_empty());
}

#[test]
fn test_point_inside_cell_writes_one_cell() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    grid.set(Point::new(15.0, 25.0), 3).unwrap();

    assert_eq!(grid.bounds(), CellRect::new(1, 2, 2, 3));
    assert_eq!(grid.data(), &[3]);
}

#[test]
fn test_get_never_grows_the_grid() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    grid.set(square(0.0, 0.0, 20.0), 1).unwrap();
    let bounds = grid.bounds();

    let values = grid.get(square(500.0, 500.0, 100.0)).unwrap();
    assert!(values.is_empty());
    assert_eq!(grid.bounds(), bounds);

    let values = grid.get((300.0..400.0, 300.0..400.0)).unwrap();
    assert!(values.is_empty());
    assert_eq!(grid.bounds(), bounds);
}

#[test]
fn test_geometry_straddling_coverage_reads_covered_part_only() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    grid.set(square(0.0, 0.0, 20.0), 4).unwrap();

    // Half inside coverage, half outside: only the two covered cells answer.
    let straddling = polygon![
        (x: 10.0, y: 0.0),
        (x: 40.0, y: 0.0),
        (x: 40.0, y: 10.0),
        (x: 10.0, y: 10.0),
    ];
    let values = grid.get(straddling).unwrap();
    assert_eq!(values, vec![4]);
}

#[test]
fn test_overwrite_changes_only_masked_cells() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    grid.set(square(0.0, 0.0, 30.0), 2).unwrap();
    grid.set(square(10.0, 10.0, 10.0), 9).unwrap();

    let mut values = grid.get(square(0.0, 0.0, 30.0)).unwrap();
    values.sort_unstable();
    assert_eq!(values, vec![2, 2, 2, 2, 2, 2, 2, 2, 9]);
}

#[test]
fn test_range_boundaries_are_half_open() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    grid.set(square(0.0, 0.0, 40.0), 1).unwrap();

    // Exactly one cell: [0, 10) on both axes.
    assert_eq!(grid.get((0.0..10.0, 0.0..10.0)).unwrap().len(), 1);

    // Nudging the stop across a cell edge pulls in the next column.
    assert_eq!(grid.get((0.0..10.5, 0.0..10.0)).unwrap().len(), 2);

    // Fractional starts floor down to the containing cell.
    assert_eq!(grid.get((9.5..10.5, 0.0..10.0)).unwrap().len(), 2);
}

#[test]
fn test_save_into_missing_directory_fails() {
    let grid: RasterGrid = RasterGrid::with_resolution(10);
    let err = grid.save_to("/nonexistent/dir/grid.cache").unwrap_err();
    assert!(matches!(err, gridcache::GridError::Io(_)));
}

#[test]
fn test_rect_key_behaves_like_polygon() {
    let mut grid: RasterGrid = RasterGrid::with_resolution(10);
    let rect = geo::Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 25.0, y: 15.0 });

    grid.set(rect, 5).unwrap();
    assert_eq!(grid.bounds(), CellRect::new(0, 0, 3, 2));
    assert_eq!(grid.get(rect).unwrap(), vec![5; 6]);
}
