use nalgebra::{Point3, Vector3};

/// Coordinate of an absent atom.
#[inline]
pub fn nan_point() -> Point3<f64> {
    Point3::new(f64::NAN, f64::NAN, f64::NAN)
}

#[inline]
pub fn is_finite_point(p: &Point3<f64>) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

/// Signed dihedral angle in radians, in `(-pi, pi]`.
pub fn dihedral_angle(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> f64 {
    let b1 = p1 - p0;
    let b2 = p2 - p1;
    let b3 = p3 - p2;
    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let y = b2.norm() * b1.dot(&n2);
    let x = n1.dot(&n2);
    y.atan2(x)
}

/// Gradient of [`dihedral_angle`] with respect to each of the four points.
///
/// Returns zeros when three consecutive points are collinear, where the angle
/// is undefined.
pub fn dihedral_angle_gradient(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> [Vector3<f64>; 4] {
    let f = p0 - p1;
    let g = p1 - p2;
    let h = p3 - p2;
    let a = f.cross(&g);
    let b = h.cross(&g);
    let a2 = a.norm_squared();
    let b2 = b.norm_squared();
    let g_norm = g.norm();
    if a2 < 1e-12 || b2 < 1e-12 || g_norm < 1e-6 {
        return [Vector3::zeros(); 4];
    }

    let fg = f.dot(&g);
    let hg = h.dot(&g);
    let d0 = -a * (g_norm / a2);
    let d3 = b * (g_norm / b2);
    let s_a = a * (fg / (a2 * g_norm));
    let s_b = b * (hg / (b2 * g_norm));
    let d1 = -d0 + s_a - s_b;
    let d2 = -d3 - s_a + s_b;
    [d0, d1, d2, d3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "{a} != {b}");
    }

    #[test]
    fn nan_point_is_not_finite() {
        assert!(!is_finite_point(&nan_point()));
        assert!(is_finite_point(&Point3::new(1.0, -2.0, 0.0)));
        assert!(!is_finite_point(&Point3::new(1.0, f64::INFINITY, 0.0)));
    }

    #[test]
    fn dihedral_angle_of_cis_and_trans_configurations() {
        let p0 = Point3::new(0.0, 1.0, 0.0);
        let p1 = Point3::new(0.0, 0.0, 0.0);
        let p2 = Point3::new(1.0, 0.0, 0.0);
        assert_close(dihedral_angle(&p0, &p1, &p2, &Point3::new(1.0, 1.0, 0.0)), 0.0, 1e-12);
        assert_close(
            dihedral_angle(&p0, &p1, &p2, &Point3::new(1.0, -1.0, 0.0)).abs(),
            PI,
            1e-12,
        );
        assert_close(
            dihedral_angle(&p0, &p1, &p2, &Point3::new(1.0, 0.0, 1.0)).abs(),
            PI / 2.0,
            1e-12,
        );
    }

    #[test]
    fn dihedral_gradient_matches_finite_differences() {
        let mut points = [
            Point3::new(0.3, 1.2, -0.1),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.4, 0.1, 0.2),
            Point3::new(1.9, 0.8, 1.1),
        ];
        let analytic = dihedral_angle_gradient(&points[0], &points[1], &points[2], &points[3]);
        let h = 1e-6;
        for atom in 0..4 {
            for dim in 0..3 {
                let original = points[atom][dim];
                points[atom][dim] = original + h;
                let plus = dihedral_angle(&points[0], &points[1], &points[2], &points[3]);
                points[atom][dim] = original - h;
                let minus = dihedral_angle(&points[0], &points[1], &points[2], &points[3]);
                points[atom][dim] = original;
                assert_close(analytic[atom][dim], (plus - minus) / (2.0 * h), 1e-6);
            }
        }
    }

    #[test]
    fn dihedral_gradient_sums_to_zero() {
        let grad = dihedral_angle_gradient(
            &Point3::new(0.3, 1.2, -0.1),
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.4, 0.1, 0.2),
            &Point3::new(1.9, 0.8, 1.1),
        );
        let total: Vector3<f64> = grad.iter().sum();
        assert!(total.norm() < 1e-12);
    }

    #[test]
    fn dihedral_gradient_is_zero_for_collinear_points() {
        let grad = dihedral_angle_gradient(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
            &Point3::new(3.0, 1.0, 0.0),
        );
        assert!(grad.iter().all(|g| g.norm() == 0.0));
    }
}
