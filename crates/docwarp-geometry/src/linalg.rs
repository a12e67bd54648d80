/// Compute the determinant of a 3x3 matrix.
#[rustfmt::skip]
pub fn det_mat33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) -
    m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]) +
    m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Compute the adjugate (transposed cofactor matrix) of a 3x3 matrix.
#[rustfmt::skip]
pub fn adjugate_mat33(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [
            m[1][1] * m[2][2] - m[1][2] * m[2][1],  // [0, 0]
            m[0][2] * m[2][1] - m[0][1] * m[2][2],  // [0, 1]
            m[0][1] * m[1][2] - m[0][2] * m[1][1],  // [0, 2]
        ],
        [
            m[1][2] * m[2][0] - m[1][0] * m[2][2],  // [1, 0]
            m[0][0] * m[2][2] - m[0][2] * m[2][0],  // [1, 1]
            m[0][2] * m[1][0] - m[0][0] * m[1][2],  // [1, 2]
        ],
        [
            m[1][0] * m[2][1] - m[1][1] * m[2][0],  // [2, 0]
            m[0][1] * m[2][0] - m[0][0] * m[2][1],  // [2, 1]
            m[0][0] * m[1][1] - m[0][1] * m[1][0],  // [2, 2]
        ],
    ]
}

/// Compute the Frobenius norm of a 3x3 matrix.
pub fn frobenius_norm_mat33(m: &[[f64; 3]; 3]) -> f64 {
    m.iter().flatten().map(|v| v * v).sum::<f64>().sqrt()
}

/// Product of the Euclidean norms of the columns of a 3x3 matrix.
///
/// Bounds `|det(m)|` from above (Hadamard's inequality) and scales like the
/// determinant, so the ratio of the two is invariant to the matrix scale.
pub fn column_norms_product_mat33(m: &[[f64; 3]; 3]) -> f64 {
    (0..3)
        .map(|j| (m[0][j] * m[0][j] + m[1][j] * m[1][j] + m[2][j] * m[2][j]).sqrt())
        .product()
}

/// Multiply a 3x3 matrix by a 3d column vector.
///
/// # Arguments
///
/// * `m` - The 3x3 matrix.
/// * `v` - The 3d vector.
/// * `out` - The output vector `m * v`.
pub fn mat33_mul_vec3(m: &[[f64; 3]; 3], v: &[f64; 3], out: &mut [f64; 3]) {
    for (out_i, row) in out.iter_mut().zip(m.iter()) {
        *out_i = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
    }
}

/// Multiply two 3x3 matrices.
pub fn mat33_mul_mat33(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

/// Scale a 3x3 matrix in place so that its Frobenius norm is one.
///
/// The matrix is left untouched when its norm is zero.
pub fn normalize_mat33_inplace(m: &mut [[f64; 3]; 3]) {
    let norm = frobenius_norm_mat33(m);
    if norm == 0.0 {
        return;
    }
    m.iter_mut().flatten().for_each(|v| *v /= norm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_det_mat33() {
        let m = [[4.0, 7.0, 2.0], [3.0, 6.0, 1.0], [2.0, 5.0, 3.0]];
        assert_relative_eq!(det_mat33(&m), 9.0, epsilon = 1e-12);
        assert_eq!(det_mat33(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]), 0.0);
    }

    #[test]
    fn test_adjugate_is_scaled_inverse() {
        let m = [[4.0, 7.0, 2.0], [3.0, 6.0, 1.0], [2.0, 5.0, 3.0]];
        let det = det_mat33(&m);
        let adj = adjugate_mat33(&m);
        let prod = mat33_mul_mat33(&m, &adj);
        for (i, row) in prod.iter().enumerate() {
            for (j, val) in row.iter().enumerate() {
                let expected = if i == j { det } else { 0.0 };
                assert_relative_eq!(*val, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_column_norms_product() {
        let m = [[3.0, 0.0, 0.0], [4.0, 2.0, 0.0], [0.0, 0.0, -1.0]];
        assert_relative_eq!(column_norms_product_mat33(&m), 10.0, epsilon = 1e-12);
        assert!(det_mat33(&m).abs() <= column_norms_product_mat33(&m));
    }

    #[test]
    fn test_mat33_mul_vec3() {
        let m = [[1.0, 0.0, -1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]];
        let mut out = [0.0; 3];
        mat33_mul_vec3(&m, &[1.0, 1.0, 1.0], &mut out);
        assert_eq!(out, [0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_normalize_mat33() {
        let mut m = [[2.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 2.0]];
        normalize_mat33_inplace(&mut m);
        assert_relative_eq!(frobenius_norm_mat33(&m), 1.0, epsilon = 1e-12);

        let mut zero = [[0.0; 3]; 3];
        normalize_mat33_inplace(&mut zero);
        assert_eq!(zero, [[0.0; 3]; 3]);
    }
}
