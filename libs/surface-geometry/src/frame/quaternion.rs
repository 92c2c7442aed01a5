//! Rotation matrix to quaternion conversion.

use glam::{DMat3, DQuat};

/// Converts a rotation matrix to a unit quaternion.
///
/// Uses the four-case extraction: the largest of the trace and the three
/// diagonal entries selects which quaternion component is computed from a
/// square root, so the divisor is never close to zero. The result is
/// normalized and its sign chosen so that `w >= 0`.
pub fn quaternion_from_matrix(m: &DMat3) -> DQuat {
    // mRC = row R, column C
    let (m00, m10, m20) = (m.x_axis.x, m.x_axis.y, m.x_axis.z);
    let (m01, m11, m21) = (m.y_axis.x, m.y_axis.y, m.y_axis.z);
    let (m02, m12, m22) = (m.z_axis.x, m.z_axis.y, m.z_axis.z);
    let trace = m00 + m11 + m22;

    let q = if trace >= m00 && trace >= m11 && trace >= m22 {
        let s = (trace + 1.0).sqrt() * 2.0;
        DQuat::from_xyzw((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
    } else if m00 >= m11 && m00 >= m22 {
        let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
        DQuat::from_xyzw(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
    } else if m11 >= m22 {
        let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
        DQuat::from_xyzw((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
    } else {
        let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
        DQuat::from_xyzw((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
    };

    let q = q.normalize();
    if q.w < 0.0 {
        -q
    } else {
        q
    }
}
