//! Hough parameter-space accumulators.
//!
//! Each edge pixel casts its votes independently of every other pixel, so the
//! accumulator is a sum of per-pixel contributions. The sequential path folds
//! them into one buffer; with the `parallel` feature, rayon workers fold into
//! private buffers that are summed at the end. Integer addition commutes, so
//! both paths produce identical grids.

pub mod circles;
pub mod lines;

pub use circles::{CircleSpace, build_circle_space};
pub use lines::{LineSpace, build_line_space};

#[cfg(feature = "parallel")]
pub use circles::build_circle_space_parallel;
#[cfg(feature = "parallel")]
pub use lines::build_line_space_parallel;

/// A discretised parameter space that an edge pixel votes into.
pub trait VoteCaster: Sync {
    /// Number of cells in the flattened accumulator.
    fn cells(&self) -> usize;

    /// Add this pixel's votes to `acc`. Out-of-range parameters cast no vote.
    fn cast(&self, x: usize, y: usize, acc: &mut [u32]);
}

pub(crate) fn accumulate<C: VoteCaster>(caster: &C, points: &[(usize, usize)]) -> Vec<u32> {
    let mut acc = vec![0u32; caster.cells()];
    for &(x, y) in points {
        caster.cast(x, y, &mut acc);
    }
    acc
}

#[cfg(feature = "parallel")]
pub(crate) fn accumulate_parallel<C: VoteCaster>(caster: &C, points: &[(usize, usize)]) -> Vec<u32> {
    use rayon::prelude::*;

    let cells = caster.cells();
    points
        .par_iter()
        .fold(
            || vec![0u32; cells],
            |mut acc, &(x, y)| {
                caster.cast(x, y, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![0u32; cells],
            |mut total, partial| {
                for (t, p) in total.iter_mut().zip(partial) {
                    *t += p;
                }
                total
            },
        )
}
