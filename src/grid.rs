//! Deterministic triangulation of structured point grids.

/// Emits the triangle list covering a row-major rows×cols point grid.
///
/// Every grid cell contributes two triangles that share the cell's diagonal
/// from its (row, col+1) corner to its (row+1, col+1) corner, with a
/// consistent winding across the whole grid. The first triangle of every
/// cell is emitted before any second triangle, so the output is
/// deterministic for a given grid shape. Degenerate grids (fewer than two
/// rows or columns) produce an empty list.
///
/// The triangle count is always `2 * (rows - 1) * (cols - 1)`.
///
/// # Example
///
/// ```
/// use peltast::grid_triangles;
///
/// assert_eq!(grid_triangles(2, 2), vec![[1, 0, 3], [0, 2, 3]]);
/// assert_eq!(grid_triangles(1, 5), Vec::<[i32; 3]>::new());
/// ```
pub fn grid_triangles(rows: usize, cols: usize) -> Vec<[i32; 3]> {
    if rows < 2 || cols < 2 {
        return Vec::new();
    }
    let at = |i: usize, j: usize| (i * cols + j) as i32;
    let mut triangles = Vec::with_capacity(2 * (rows - 1) * (cols - 1));
    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            triangles.push([at(i, j + 1), at(i, j), at(i + 1, j + 1)]);
        }
    }
    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            triangles.push([at(i, j), at(i + 1, j), at(i + 1, j + 1)]);
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_count_and_index_bounds() {
        for (rows, cols) in [(2, 2), (2, 5), (7, 3), (30, 30)] {
            let tris = grid_triangles(rows, cols);
            assert_eq!(tris.len(), 2 * (rows - 1) * (cols - 1));
            let limit = (rows * cols) as i32;
            for tri in &tris {
                for &idx in tri {
                    assert!(idx >= 0 && idx < limit);
                }
            }
        }
    }

    #[test]
    fn two_by_two_grid() {
        assert_eq!(grid_triangles(2, 2), vec![[1, 0, 3], [0, 2, 3]]);
    }

    #[test]
    fn degenerate_grids_are_empty() {
        assert!(grid_triangles(0, 0).is_empty());
        assert!(grid_triangles(1, 10).is_empty());
        assert!(grid_triangles(10, 1).is_empty());
    }

    #[test]
    fn every_cell_is_covered() {
        // Each interior cell corner index must appear in the output.
        let tris = grid_triangles(3, 4);
        let used: std::collections::HashSet<i32> =
            tris.iter().flatten().copied().collect();
        assert_eq!(used.len(), 12);
    }
}
