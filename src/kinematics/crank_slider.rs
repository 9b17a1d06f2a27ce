//! Slider-crank relation for a centered crank train.

/// Returns the piston distance from the top-dead-center.
/// Input `crank_angle` must be in `CA deg` after TDC, `stroke` and `conrod` in meters.
/// Output is in meters.
///
/// The caller must guarantee `conrod > stroke / 2`, otherwise the conrod
/// angle leaves the `asin` domain and the result is not a number.
pub fn piston_displacement(crank_angle: f64, stroke: f64, conrod: f64) -> f64 {
    let crank = 0.5 * stroke;
    let conrod_angle = (crank * crank_angle.to_radians().sin() / conrod).asin();
    conrod + crank - conrod * conrod_angle.cos() - crank * crank_angle.to_radians().cos()
}
