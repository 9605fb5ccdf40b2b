use viskit::grid::{Grid, GridSize};
use viskit::imgproc::integral::integral_sq;
use viskit::imgproc::patch::extract_patch;
use viskit::imgproc::pyramid::pyrdown;

#[test]
fn pipeline_pyrdown_integral_patch() {
    // a smooth gradient frame
    let size = GridSize {
        width: 32,
        height: 24,
    };
    let data: Vec<u8> = (0..size.width)
        .flat_map(|c| (0..size.height).map(move |r| ((r * 3 + c * 5) % 256) as u8))
        .collect();
    let frame = Grid::<u8>::new(size, data).unwrap();

    // two pyramid levels
    let mut half = Grid::<u8>::from_size_val(
        GridSize {
            width: 16,
            height: 12,
        },
        0,
    );
    pyrdown(&frame, &mut half);

    let mut quarter = Grid::<u8>::from_size_val(
        GridSize {
            width: 8,
            height: 6,
        },
        0,
    );
    pyrdown(&half, &mut quarter);

    // integral statistics over the coarsest level
    let mut sums = Grid::<i64>::from_size_val(quarter.size(), 0);
    let mut sq_sums = Grid::<f64>::from_size_val(quarter.size(), 0.0);
    integral_sq(&quarter, &mut sums, &mut sq_sums);

    let total: i64 = quarter.as_slice().iter().map(|&v| v as i64).sum();
    assert_eq!(sums[(quarter.rows() - 1, quarter.cols() - 1)], total);

    // track a patch around the middle of the half-resolution level
    let patch = extract_patch(
        &half,
        GridSize {
            width: 5,
            height: 5,
        },
        (8.0, 6.0),
    );
    assert_eq!(patch.cols(), 5);
    assert_eq!(patch.rows(), 5);
    for c in 0..5 {
        for r in 0..5 {
            assert_eq!(patch[(r, c)], half[(r + 4, c + 6)]);
        }
    }
}
