//! Greedy top-k peak extraction with single-cell suppression.
//!
//! Each round takes the global maximum (first cell in row-major order on ties),
//! stops once it drops below `min_votes` or reaches zero, and zeroes only that
//! cell before the next round. Cells next to a strong peak are not suppressed
//! and may surface as separate peaks.

use crate::grid::AccumulatorGrid;

/// One accumulator cell selected as a peak. `row`/`col` index the grid;
/// for lines that is (rho, theta), for circles (b, a).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peak {
    pub row: usize,
    pub col: usize,
    pub votes: u32,
}

/// Up to `k` peaks in non-increasing vote order, all with `votes >= min_votes`.
///
/// Extraction also stops at the first zero-vote maximum, so `min_votes = 0`
/// never reports an empty or already-extracted cell. Works on a private copy;
/// `acc` is left untouched.
pub fn extract_peaks(acc: &AccumulatorGrid, k: usize, min_votes: u32) -> Vec<Peak> {
    let mut work = acc.clone();
    let peaks = extract_peaks_in_place(&mut work, k, min_votes);
    log::debug!(
        "extract_peaks: {} of k={k} (min_votes={min_votes})",
        peaks.len()
    );
    peaks
}

/// Greedy extraction directly on a working grid, zeroing every extracted cell.
pub fn extract_peaks_in_place(work: &mut AccumulatorGrid, k: usize, min_votes: u32) -> Vec<Peak> {
    let mut peaks = Vec::with_capacity(k.min(work.len()));
    for _ in 0..k {
        let Some((idx, votes)) = argmax(work.data()) else {
            break;
        };
        // An extracted cell reads as zero, so zero-vote cells are never peaks.
        if votes == 0 || votes < min_votes {
            break;
        }
        let (col, row) = work.coords(idx);
        peaks.push(Peak { row, col, votes });
        work.data_mut()[idx] = 0;
    }
    peaks
}

/// Index and value of the first maximum.
fn argmax(data: &[u32]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &v) in data.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn grid(width: usize, height: usize, data: &[u32]) -> AccumulatorGrid {
        Grid::from_vec(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn returns_descending_peaks_and_leaves_input_intact() {
        let acc = grid(3, 2, &[5, 90, 3, 70, 1, 80]);
        let peaks = extract_peaks(&acc, 5, 50);
        assert_eq!(
            peaks,
            vec![
                Peak { row: 0, col: 1, votes: 90 },
                Peak { row: 1, col: 2, votes: 80 },
                Peak { row: 1, col: 0, votes: 70 },
            ]
        );
        assert_eq!(acc.data(), &[5, 90, 3, 70, 1, 80]);
    }

    #[test]
    fn ties_go_to_the_first_cell_in_row_major_order() {
        let acc = grid(2, 2, &[4, 9, 9, 9]);
        let peaks = extract_peaks(&acc, 3, 0);
        let cells: Vec<(usize, usize)> = peaks.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(cells, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn respects_k_and_min_votes() {
        let acc = grid(4, 1, &[10, 20, 30, 40]);
        assert_eq!(extract_peaks(&acc, 2, 0).len(), 2);
        assert_eq!(extract_peaks(&acc, 0, 0).len(), 0);
        let floor = extract_peaks(&acc, 10, 25);
        assert_eq!(floor.len(), 2);
        assert!(floor.iter().all(|p| p.votes >= 25));
        assert!(extract_peaks(&acc, 3, 41).is_empty());
    }

    #[test]
    fn suppression_is_single_cell() {
        // A plateau next to the true peak survives as its own peak.
        let acc = grid(3, 1, &[99, 100, 99]);
        let peaks = extract_peaks(&acc, 3, 1);
        assert_eq!(peaks.len(), 3);
        assert_eq!(peaks[0].col, 1);
        assert_eq!(peaks[1].col, 0);
        assert_eq!(peaks[2].col, 2);
    }

    #[test]
    fn extracted_cells_are_zeroed_in_the_working_copy() {
        let mut work = grid(3, 3, &[1, 2, 3, 4, 50, 6, 7, 8, 9]);
        let first = extract_peaks_in_place(&mut work, 1, 0);
        assert_eq!(first[0], Peak { row: 1, col: 1, votes: 50 });
        assert_eq!(work.get(1, 1), 0);
        let rest = extract_peaks_in_place(&mut work, 9, 1);
        assert!(rest.iter().all(|p| (p.row, p.col) != (1, 1)));
        assert_eq!(rest.len(), 8);
    }

    #[test]
    fn zero_floor_never_repeats_a_cell() {
        assert!(extract_peaks(&grid(2, 1, &[0, 0]), 3, 0).is_empty());
        let peaks = extract_peaks(&grid(3, 1, &[0, 7, 0]), 3, 0);
        assert_eq!(peaks, vec![Peak { row: 0, col: 1, votes: 7 }]);
    }
}
