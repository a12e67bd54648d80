use serde::{Deserialize, Serialize};

use crate::{error::GeometryError, linalg, point::Point2};

/// Tolerance of `|det|` relative to the product of the column norms.
const SINGULAR_EPS: f64 = 1e-12;

/// Relative tolerance for the triangle area spanned by three correspondences.
const COLLINEAR_EPS: f64 = 1e-9;

/// Relative tolerance separating the null space of the DLT system from the rest.
const RANK_EPS: f64 = 1e-12;

/// A planar projective transform, defined up to a nonzero scale.
///
/// The matrix is stored row-major and maps homogeneous points `p' ~ H * p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Homography {
    m: [[f64; 3]; 3],
}

impl Default for Homography {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Homography {
    /// The identity transform.
    pub const IDENTITY: Homography = Homography {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Wrap a row-major 3x3 matrix.
    pub const fn from_matrix(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// The row-major 3x3 matrix.
    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.m
    }

    /// The determinant of the matrix.
    pub fn determinant(&self) -> f64 {
        linalg::det_mat33(&self.m)
    }

    /// Whether the matrix is numerically rank deficient.
    ///
    /// The determinant is compared against the product of the column norms, which
    /// bounds it from above. The test does not depend on the scale of the matrix.
    pub fn is_singular(&self) -> bool {
        let det = self.determinant();
        let bound = linalg::column_norms_product_mat33(&self.m);
        !det.is_finite() || det.abs() <= SINGULAR_EPS * bound
    }

    /// Invert the homography with the closed form adjugate / determinant.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SingularHomography`] when the determinant is numerically zero.
    pub fn inverse(&self) -> Result<Homography, GeometryError> {
        let det = self.determinant();
        if self.is_singular() {
            return Err(GeometryError::SingularHomography(det));
        }

        let mut inv = linalg::adjugate_mat33(&self.m);
        let inv_det = 1.0 / det;
        inv.iter_mut().flatten().for_each(|v| *v *= inv_det);

        Ok(Homography { m: inv })
    }

    /// Compose two transforms, `self * other`: `other` is applied first.
    pub fn compose(&self, other: &Homography) -> Homography {
        Homography {
            m: linalg::mat33_mul_mat33(&self.m, &other.m),
        }
    }

    /// Rescale so that `H[2][2] == 1`, or to unit norm when `H[2][2]` vanishes.
    pub fn normalized(&self) -> Homography {
        let mut m = self.m;
        let norm = linalg::frobenius_norm_mat33(&m);
        let h22 = m[2][2];
        if h22.abs() > SINGULAR_EPS * norm {
            m.iter_mut().flatten().for_each(|v| *v /= h22);
        } else {
            linalg::normalize_mat33_inplace(&mut m);
        }
        Homography { m }
    }

    /// Map a point through the transform with the perspective divide.
    ///
    /// Returns `None` when the point maps to infinity.
    pub fn transform_point(&self, p: Point2) -> Option<Point2> {
        let mut out = [0.0; 3];
        linalg::mat33_mul_vec3(&self.m, &p.to_homogeneous(), &mut out);
        if out[2] == 0.0 {
            return None;
        }
        let q = Point2::new(out[0] / out[2], out[1] / out[2]);
        q.is_finite().then_some(q)
    }
}

/// The corners of the canonical output rectangle.
///
/// Ordered top-left, top-right, bottom-right, bottom-left:
/// `(0, 0), (W, 0), (W, H), (0, H)`.
pub fn canonical_rectangle(width: f64, height: f64) -> [Point2; 4] {
    [
        Point2::new(0.0, 0.0),
        Point2::new(width, 0.0),
        Point2::new(width, height),
        Point2::new(0.0, height),
    ]
}

/// Similarity moving the centroid of a point set to the origin and its mean
/// distance from the centroid to `sqrt(2)`.
#[derive(Debug, Clone, Copy)]
struct Normalization {
    cx: f64,
    cy: f64,
    scale: f64,
}

impl Normalization {
    /// PRECONDITION: the points are finite and not all coincident.
    fn from_points(points: &[Point2; 4]) -> Self {
        let n = points.len() as f64;
        let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
        let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
        let mean_dist = points
            .iter()
            .map(|p| (p.x - cx).hypot(p.y - cy))
            .sum::<f64>()
            / n;
        Self {
            cx,
            cy,
            scale: std::f64::consts::SQRT_2 / mean_dist,
        }
    }

    fn apply(&self, p: &Point2) -> Point2 {
        Point2::new(self.scale * (p.x - self.cx), self.scale * (p.y - self.cy))
    }

    fn matrix(&self) -> Homography {
        let s = self.scale;
        Homography::from_matrix([
            [s, 0.0, -s * self.cx],
            [0.0, s, -s * self.cy],
            [0.0, 0.0, 1.0],
        ])
    }

    fn inverse_matrix(&self) -> Homography {
        let s = 1.0 / self.scale;
        Homography::from_matrix([[s, 0.0, self.cx], [0.0, s, self.cy], [0.0, 0.0, 1.0]])
    }
}

/// Reject point sets where three points are collinear or points coincide.
fn check_general_position(points: &[Point2; 4], which: &str) -> Result<(), GeometryError> {
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(GeometryError::InvalidCorrespondence(format!(
            "{which} point {p} is not finite"
        )));
    }

    let mut extent: f64 = 0.0;
    for (i, a) in points.iter().enumerate() {
        for b in points.iter().skip(i + 1) {
            extent = extent.max((a.x - b.x).powi(2) + (a.y - b.y).powi(2));
        }
    }

    if extent == 0.0 {
        return Err(GeometryError::InvalidCorrespondence(format!(
            "{which} points are coincident"
        )));
    }

    const TRIPLETS: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    for [i, j, k] in TRIPLETS {
        let (a, b, c) = (points[i], points[j], points[k]);
        let area2 = ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs();
        if area2 <= COLLINEAR_EPS * extent {
            return Err(GeometryError::InvalidCorrespondence(format!(
                "{which} points {i}, {j}, {k} are collinear"
            )));
        }
    }

    Ok(())
}

/// Compute the homography matrix from four 2d point correspondences.
///
/// Direct Linear Transform: the homography is the right singular vector of the
/// smallest singular value of the 8x9 design matrix built from the
/// correspondences. Both point sets are first normalized to zero mean and a mean
/// distance of `sqrt(2)` from the origin, so the result does not depend on where
/// the points lie in the image. `src[i]` maps to `dst[i]` for every `i`; the enumeration
/// order itself is free.
///
/// * `src` - The source 2d points.
/// * `dst` - The destination 2d points.
///
/// # Returns
///
/// The homography from `src` to `dst`, scaled so that `H[2][2] == 1` when possible.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidCorrespondence`] when either point set is
/// degenerate (collinear or coincident points) or the system has no unique
/// solution.
///
/// # Example
///
/// ```
/// use docwarp_geometry::{homography_4pt2d, Point2};
///
/// let src = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let dst = src.map(|p| Point2::new(2.0 * p.x, 2.0 * p.y));
///
/// let h = homography_4pt2d(&src, &dst).unwrap();
/// let q = h.transform_point(Point2::new(0.5, 0.5)).unwrap();
/// assert!((q.x - 1.0).abs() < 1e-9 && (q.y - 1.0).abs() < 1e-9);
/// ```
pub fn homography_4pt2d(
    src: &[Point2; 4],
    dst: &[Point2; 4],
) -> Result<Homography, GeometryError> {
    check_general_position(src, "source")?;
    check_general_position(dst, "destination")?;

    let norm_src = Normalization::from_points(src);
    let norm_dst = Normalization::from_points(dst);

    // construct matrix A on the normalized points
    let mut mat_a = faer::Mat::<f64>::zeros(8, 9);
    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let (s, d) = (norm_src.apply(s), norm_dst.apply(d));
        let (sx, sy, dx, dy) = (s.x, s.y, d.x, d.y);

        mat_a.write(2 * i, 0, -sx);
        mat_a.write(2 * i, 1, -sy);
        mat_a.write(2 * i, 2, -1.0);
        mat_a.write(2 * i, 6, sx * dx);
        mat_a.write(2 * i, 7, sy * dx);
        mat_a.write(2 * i, 8, dx);

        mat_a.write(2 * i + 1, 3, -sx);
        mat_a.write(2 * i + 1, 4, -sy);
        mat_a.write(2 * i + 1, 5, -1.0);
        mat_a.write(2 * i + 1, 6, sx * dy);
        mat_a.write(2 * i + 1, 7, sy * dy);
        mat_a.write(2 * i + 1, 8, dy);
    }

    // the null space is the right singular vector of the smallest singular value
    let svd = mat_a.svd();
    let s = svd.s_diagonal();
    let (s_max, s_min) = (s.read(0), s.read(7));
    log::debug!("dlt singular values: max {s_max:e}, 8th {s_min:e}");

    if s_min.is_nan() || s_min <= RANK_EPS * s_max {
        return Err(GeometryError::InvalidCorrespondence(format!(
            "design matrix is rank deficient (sigma_8 = {s_min:e}, sigma_1 = {s_max:e})"
        )));
    }

    let h = svd.v().col(8);
    let homo_norm = Homography::from_matrix([
        [h.read(0), h.read(1), h.read(2)],
        [h.read(3), h.read(4), h.read(5)],
        [h.read(6), h.read(7), h.read(8)],
    ]);

    // undo the normalization: T_dst^-1 * H * T_src
    let homo = norm_dst
        .inverse_matrix()
        .compose(&homo_norm)
        .compose(&norm_src.matrix());

    if homo.is_singular() {
        return Err(GeometryError::InvalidCorrespondence(format!(
            "estimated homography is singular (det = {:e})",
            homo.determinant()
        )));
    }

    let homo = homo.normalized();
    log::debug!("estimated homography: {:?}", homo.matrix());

    Ok(homo)
}
