//! Sparse row combination: eliminating the pivot column from one row.
//!
//! The pivot row's head has been rotated to the frontier column by the
//! pivot search; here a target row below the frontier gets its frontier
//! entry cancelled by `T <- T - T[k] * inverse(P[k]) * P` under the
//! current modulus. The combination is a two-pointer merge of two
//! column-sorted rows into a reusable scratch buffer, with the column
//! density counters updated on every cancellation and fill-in.

use locsmith_rings::PowerRing;

use crate::density::ColumnDensity;
use crate::sparse_matrix::SparseRow;

/// Reusable merge buffer, owned by the caller and grown amortized so
/// repeated elimination steps do not allocate.
#[derive(Debug, Default)]
pub struct Scratch {
    buf: SparseRow,
}

impl Scratch {
    /// Creates an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Eliminates the frontier column of `target` using `pivot_row`.
///
/// `frontier` is the working pivot column k; `pivot_col` is the original
/// label of the column the pivot was found in. When they differ, the
/// pending column swap is first applied to the target row: an entry at
/// `pivot_col` is aligned to the frontier (inserting an implicit zero
/// where the target lacks one side of the swap), and a target without an
/// entry at `pivot_col` only has its frontier entry relabeled.
///
/// The output row stays strictly column-sorted with no duplicate or zero
/// entries.
///
/// # Panics
///
/// Panics if the pivot row's head is not a unit; the pivot search
/// guarantees it is.
pub fn eliminate_row(
    ring: &PowerRing,
    target: &mut SparseRow,
    pivot_row: &SparseRow,
    frontier: usize,
    pivot_col: usize,
    density: &mut ColumnDensity,
    scratch: &mut Scratch,
) {
    let nj = target.len();
    if nj == 0 {
        return;
    }

    let j_head = target
        .iter()
        .position(|&(col, _)| col >= pivot_col)
        .unwrap_or(nj);

    if j_head < nj && target[j_head].0 == pivot_col {
        if pivot_col != frontier {
            if target[0].0 == frontier {
                // Both swapped columns present: exchange values.
                let head_val = target[0].1;
                target[0].1 = target[j_head].1;
                target[j_head].1 = head_val;
            } else {
                // Implicit zero at the frontier: the pivot-column entry
                // moves to the head and takes the frontier label.
                density.decrement(pivot_col);
                density.increment(frontier);
                let val = target[j_head].1;
                target[0..=j_head].rotate_right(1);
                target[0] = (frontier, val);
            }
        }
        debug_assert_eq!(
            target[0].0, frontier,
            "live rows must have no entries below the frontier"
        );

        // T[k] <- -T[k] / P[k], the multiplier applied to the pivot tail.
        let inv = ring
            .inverse(pivot_row[0].1)
            .expect("pivot head must be a unit");
        let head = ring.mul(ring.neg(target[0].1), inv);
        density.decrement(frontier);

        let buf = &mut scratch.buf;
        buf.clear();
        buf.reserve(nj + pivot_row.len());

        let start = pivot_row
            .iter()
            .position(|&(col, _)| col > frontier)
            .unwrap_or(pivot_row.len());

        let mut m = 1; // target index; the head entry is consumed
        for &(j_piv, piv_val) in &pivot_row[start..] {
            while m < nj && target[m].0 < j_piv {
                buf.push(target[m]);
                m += 1;
            }
            if m < nj && target[m].0 == j_piv {
                let v = ring.add(target[m].1, ring.mul(head, piv_val));
                if v == 0 {
                    density.decrement(j_piv);
                } else {
                    buf.push((j_piv, v));
                }
                m += 1;
            } else {
                let v = ring.mul(head, piv_val);
                if v != 0 {
                    density.increment(j_piv);
                    buf.push((j_piv, v));
                }
            }
        }
        while m < nj {
            buf.push(target[m]);
            m += 1;
        }

        target.clear();
        target.extend_from_slice(buf);
    } else if pivot_col != frontier {
        // No entry at the swapped pivot column: a frontier entry, if
        // present, takes the pivot column's label and slides into place.
        let l = target
            .iter()
            .position(|&(col, _)| col >= frontier)
            .unwrap_or(nj);
        if l < nj && target[l].0 == frontier {
            density.decrement(frontier);
            density.increment(pivot_col);
            let val = target[l].1;
            target[l..j_head].rotate_left(1);
            target[j_head - 1] = (pivot_col, val);
        }
    }
}
