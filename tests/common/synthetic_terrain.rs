use dem_segmenter::Dem;
use nalgebra::Vector2;

/// Builds an `nx` x `ny` DEM over `[0, nx] x [0, ny]` at unit resolution,
/// sampling each cell center once with `height(ix, iy)`.
pub fn dem_from_fn(nx: usize, ny: usize, height: impl Fn(usize, usize) -> f64) -> Dem<2> {
    let mut dem = Dem::<2>::new(
        Vector2::new(0.0, 0.0),
        Vector2::new(nx as f64, ny as f64),
        Vector2::new(1.0, 1.0),
    )
    .expect("valid bounds");
    for iy in 0..ny {
        for ix in 0..nx {
            dem.add_sample(
                &Vector2::new(ix as f64 + 0.5, iy as f64 + 0.5),
                height(ix, iy),
            )
            .expect("cell centers are in range");
        }
    }
    dem
}

/// Uniform terrain: every cell sampled with the same height.
pub fn uniform_dem(n: usize, height: f64) -> Dem<2> {
    dem_from_fn(n, n, |_, _| height)
}

/// Flat plain at 0 with a raised plateau covering
/// `[px0, px1) x [py0, py1)` in cell indices.
pub fn plateau_dem(n: usize, plateau: (usize, usize, usize, usize), height: f64) -> Dem<2> {
    let (px0, px1, py0, py1) = plateau;
    dem_from_fn(n, n, |ix, iy| {
        if (px0..px1).contains(&ix) && (py0..py1).contains(&iy) {
            height
        } else {
            0.0
        }
    })
}
