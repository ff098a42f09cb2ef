/// Square grid in the XY plane, centered on the origin, facing +Z.
///
/// Row 0 is at +Y and columns run toward +X. Triangles wind counter-clockwise
/// when seen from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneGrid {
    size: f32,
    segments: u32,
}

impl PlaneGrid {
    pub fn new(size: f32, segments: u32) -> Self {
        Self {
            size,
            segments: segments.max(1),
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Vertices per row or column.
    fn stride(&self) -> u32 {
        self.segments + 1
    }

    pub fn vertex_count(&self) -> usize {
        let n = self.stride() as usize;
        n * n
    }

    pub fn triangle_index_count(&self) -> usize {
        let s = self.segments as usize;
        s * s * 6
    }

    /// Unique edges: rows, columns, and one diagonal per quad.
    pub fn edge_index_count(&self) -> usize {
        let s = self.segments as usize;
        (2 * s * (s + 1) + s * s) * 2
    }

    pub fn positions(&self) -> Vec<[f32; 3]> {
        let half = self.size * 0.5;
        let step = self.size / self.segments as f32;
        let n = self.stride();
        let mut out = Vec::with_capacity(self.vertex_count());
        for row in 0..n {
            let y = half - row as f32 * step;
            for col in 0..n {
                let x = col as f32 * step - half;
                out.push([x, y, 0.0]);
            }
        }
        out
    }

    pub fn triangle_indices(&self) -> Vec<u32> {
        let n = self.stride();
        let mut out = Vec::with_capacity(self.triangle_index_count());
        for row in 0..self.segments {
            for col in 0..self.segments {
                let a = row * n + col;
                let b = (row + 1) * n + col;
                let c = (row + 1) * n + col + 1;
                let d = row * n + col + 1;
                out.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        out
    }

    /// Line-list indices covering every triangle edge exactly once.
    pub fn edge_indices(&self) -> Vec<u32> {
        let n = self.stride();
        let mut out = Vec::with_capacity(self.edge_index_count());
        for row in 0..n {
            for col in 0..n {
                let i = row * n + col;
                if col < self.segments {
                    out.extend_from_slice(&[i, i + 1]);
                }
                if row < self.segments {
                    out.extend_from_slice(&[i, i + n]);
                }
                if col < self.segments && row < self.segments {
                    // Shared edge b-d of the quad's two triangles.
                    out.extend_from_slice(&[i + n, i + 1]);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn counts_match_formulas() {
        let grid = PlaneGrid::new(30.0, 7);
        assert_eq!(grid.positions().len(), 64);
        assert_eq!(grid.triangle_indices().len(), 7 * 7 * 6);
        assert_eq!(grid.edge_indices().len(), grid.edge_index_count());
        assert_eq!(grid.edge_index_count(), (2 * 7 * 8 + 49) * 2);
    }

    #[test]
    fn spans_size_centered_on_origin() {
        let grid = PlaneGrid::new(30.0, 10);
        let pos = grid.positions();
        assert_eq!(pos[0], [-15.0, 15.0, 0.0]);
        assert_eq!(*pos.last().unwrap(), [15.0, -15.0, 0.0]);
        assert!(pos.iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn triangles_face_positive_z() {
        let grid = PlaneGrid::new(2.0, 3);
        let pos = grid.positions();
        for tri in grid.triangle_indices().chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| glam::Vec3::from(pos[i as usize]));
            assert!((b - a).cross(c - a).z > 0.0);
        }
    }

    #[test]
    fn edges_are_unique_and_cover_triangles() {
        let grid = PlaneGrid::new(1.0, 4);
        let edges: BTreeSet<(u32, u32)> = grid
            .edge_indices()
            .chunks(2)
            .map(|e| (e[0].min(e[1]), e[0].max(e[1])))
            .collect();
        assert_eq!(edges.len() * 2, grid.edge_index_count());

        for tri in grid.triangle_indices().chunks(3) {
            for (p, q) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                assert!(edges.contains(&(p.min(q), p.max(q))));
            }
        }
    }

    #[test]
    fn zero_segments_is_promoted_to_one() {
        let grid = PlaneGrid::new(1.0, 0);
        assert_eq!(grid.segments(), 1);
        assert_eq!(grid.vertex_count(), 4);
    }
}
