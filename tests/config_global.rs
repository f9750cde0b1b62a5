use gridcache::{Config, RasterGrid};

// Runs in its own test binary: the process-wide configuration is
// write-once and must not leak into other suites.
#[test]
fn test_installed_config_supplies_default_resolution() {
    Config::default().with_default_resolution(7).install().unwrap();

    let grid: RasterGrid = RasterGrid::new();
    assert_eq!(grid.resolution(), 7);
    assert_eq!(Config::global().default_resolution, 7);

    // A second install is rejected.
    let err = Config::default().with_default_resolution(9).install();
    assert!(err.is_err());
    assert_eq!(Config::global().default_resolution, 7);
}
