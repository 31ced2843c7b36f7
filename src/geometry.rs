//! Partial-sphere mesh generation.
//!
//! Both the background field and every bacterium are drawn from the same
//! generator: a UV-style grid whose latitude sweep covers only a fraction
//! ("portion") of a full revolution. Portion 0 collapses to a point at the
//! +Y pole, portion 1 closes the sphere, and everything in between is a
//! polar cap, which is how a bacterium's growth level becomes visible.

use glam::{Quat, Vec3};

/// A flat-shaded triangle mesh.
///
/// Positions and colors are parallel arrays (one color per vertex); indices
/// reference positions in triangle triples. Meshes are immutable once built:
/// when growth or portion changes, callers regenerate rather than mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Derive a copy of this mesh with every position rotated.
    ///
    /// Used to apply a bacterium's fixed spawn orientation; colors and
    /// indices are shared unchanged.
    pub fn rotated(&self, rotation: Quat) -> Mesh {
        Mesh {
            positions: self
                .positions
                .iter()
                .map(|p| (rotation * Vec3::from_array(*p)).to_array())
                .collect(),
            colors: self.colors.clone(),
            indices: self.indices.clone(),
        }
    }
}

/// Generate a partial sphere of radius `size`, sweeping `portion` of a full
/// latitude revolution, with a single flat `color` on every vertex.
///
/// The grid has `(detail + 1)` rings of `(detail + 1)` samples. Latitude of
/// ring `j` is `2π · portion · j / detail`, so portion 1 wraps the full
/// revolution (covering the sphere twice; harmless for flat shading, and it
/// keeps the vertex count independent of portion). Deterministic: identical
/// inputs produce identical meshes.
pub fn generate_sphere(size: f32, portion: f32, detail: u32, color: Vec3) -> Mesh {
    let d = detail as usize;
    let ring = d + 1;
    let mut positions = Vec::with_capacity(ring * ring);
    let mut colors = Vec::with_capacity(ring * ring);
    let mut indices = Vec::with_capacity(d * d * 6);

    let color = color.to_array();
    for j in 0..=d {
        let aj = 2.0 * std::f32::consts::PI * portion * j as f32 / detail as f32;
        let (sj, cj) = aj.sin_cos();
        for i in 0..=d {
            let ai = 2.0 * std::f32::consts::PI * i as f32 / detail as f32;
            let (si, ci) = ai.sin_cos();
            positions.push([size * si * sj, size * cj, size * ci * sj]);
            colors.push(color);
        }
    }

    // Two triangles per grid quad, consistent winding.
    for j in 0..d {
        for i in 0..d {
            let p1 = (j * ring + i) as u32;
            let p2 = p1 + ring as u32;
            indices.extend_from_slice(&[p1, p2, p1 + 1, p1 + 1, p2, p2 + 1]);
        }
    }

    Mesh {
        positions,
        colors,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: u32 = 30;

    #[test]
    fn vertex_and_index_counts_match_grid() {
        let mesh = generate_sphere(1.0, 0.4, DETAIL, Vec3::ONE);
        let expected = ((DETAIL + 1) * (DETAIL + 1)) as usize;
        assert_eq!(mesh.positions.len(), expected);
        assert_eq!(mesh.colors.len(), expected);
        assert_eq!(mesh.indices.len(), (DETAIL * DETAIL * 6) as usize);
    }

    #[test]
    fn indices_stay_in_range() {
        for portion in [0.0, 0.25, 0.5, 1.0] {
            let mesh = generate_sphere(2.0, portion, DETAIL, Vec3::ONE);
            let count = mesh.vertex_count() as u32;
            assert!(mesh.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn zero_portion_collapses_to_pole() {
        let mesh = generate_sphere(1.5, 0.0, DETAIL, Vec3::ONE);
        for p in &mesh.positions {
            assert!((p[0]).abs() < 1e-6);
            assert!((p[1] - 1.5).abs() < 1e-6);
            assert!((p[2]).abs() < 1e-6);
        }
    }

    #[test]
    fn full_portion_closes_the_sphere() {
        let mesh = generate_sphere(1.0, 1.0, DETAIL, Vec3::ONE);
        // Every vertex sits on the unit sphere, and the last ring returns to
        // the starting pole.
        for p in &mesh.positions {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
        let last = mesh.positions[mesh.positions.len() - 1];
        assert!((last[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_sphere(1.005, 0.37, DETAIL, Vec3::new(0.2, 0.4, 0.6));
        let b = generate_sphere(1.005, 0.37, DETAIL, Vec3::new(0.2, 0.4, 0.6));
        assert_eq!(a, b);
    }

    #[test]
    fn rotation_preserves_radius_and_topology() {
        let mesh = generate_sphere(1.0, 0.5, DETAIL, Vec3::ONE);
        let rotated = mesh.rotated(Quat::from_rotation_z(1.2));
        assert_eq!(rotated.indices, mesh.indices);
        assert_eq!(rotated.colors, mesh.colors);
        for (a, b) in mesh.positions.iter().zip(&rotated.positions) {
            let la = Vec3::from_array(*a).length();
            let lb = Vec3::from_array(*b).length();
            assert!((la - lb).abs() < 1e-5);
        }
    }
}
