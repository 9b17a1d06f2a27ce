use crate::engine::engine::Engine;
use std::f64::consts::PI;

/// Static split of the combustion chamber between squish band and bowl.
/// Derived once per run from the engine parameter set and never mutated.
/// Areas in `m²`, volumes in `m³`, lengths in `m`.
#[derive(Debug, Clone)]
pub struct ChamberGeometry {
    pub clearance_volume: f64,
    pub squish_perpendicular_area: f64,
    pub bowl_area: f64,
    pub bowl_diameter: f64,
    pub squish_radial_width: f64,
    pub squish_cone_height: f64,
    pub squish_cone_volume: f64,
    pub squish_band_volume: f64,
    pub squish_bowl_volume: f64,
    pub bowl_volume: f64,
}

impl ChamberGeometry {
    /// Derives the chamber split. The trapped swept volume is referenced to
    /// the piston position at exhaust-port opening, so the clearance volume
    /// follows from the trapped compression ratio.
    pub fn new(engine: &Engine) -> ChamberGeometry {
        let piston_area = engine.piston_area();
        let height_exh_open = engine.piston_position(engine.exhaust_timing());
        let trapped_swept_volume = piston_area * height_exh_open;
        let clearance_volume = trapped_swept_volume / (engine.compression_ratio() - 1.0);

        let squish_perpendicular_area = engine.squish_area_ratio() * piston_area;
        let bowl_area = piston_area - squish_perpendicular_area;
        let bowl_diameter = (4.0 * bowl_area / PI).sqrt();
        let squish_radial_width = 0.5 * (engine.bore() - bowl_diameter);

        let (squish_cone_height, squish_cone_volume) = if engine.squish_angle() > 0.0 {
            let height = engine.squish_angle().to_radians().tan() * squish_radial_width;
            let volume = PI * squish_radial_width * squish_radial_width * height / 3.0;
            (height, volume)
        } else {
            (0.0, 0.0)
        };

        let squish_bowl_volume = engine.squish_clearance() * bowl_area;
        let mut squish_band_volume = engine.squish_clearance() * squish_perpendicular_area;
        if engine.squish_angle() > 0.0 {
            squish_band_volume += squish_cone_volume;
        }

        // Not guarded: an inconsistent bowl/clearance combination can push
        // this negative, which the marching loop will surface as
        // non-physical pressures.
        let bowl_volume = clearance_volume - squish_band_volume - squish_bowl_volume;

        ChamberGeometry {
            clearance_volume,
            squish_perpendicular_area,
            bowl_area,
            bowl_diameter,
            squish_radial_width,
            squish_cone_height,
            squish_cone_volume,
            squish_band_volume,
            squish_bowl_volume,
            bowl_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::engine::{EngineGeometry, OperatingPoint};
    use approx::assert_relative_eq;

    fn engine_with(squish_area_ratio: f64, squish_angle: f64) -> Engine {
        Engine::new(
            EngineGeometry {
                bore: 54.0,
                stroke: 54.5,
                conrod: 100.0,
                compression_ratio: 10.0,
                squish_area_ratio,
                squish_angle,
                squish_clearance: 1.0,
            },
            OperatingPoint {
                speed: 10000.0,
                exhaust_timing: 100.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn flat_squish_band_has_no_cone() {
        let chamber = ChamberGeometry::new(&engine_with(0.5, 0.0));
        assert_eq!(chamber.squish_cone_height, 0.0);
        assert_eq!(chamber.squish_cone_volume, 0.0);
    }

    #[test]
    fn bowl_diameter_and_area_round_trip() {
        let chamber = ChamberGeometry::new(&engine_with(0.5, 0.0));
        assert_relative_eq!(
            0.25 * PI * chamber.bowl_diameter * chamber.bowl_diameter,
            chamber.bowl_area,
            max_relative = 1e-12
        );
    }

    #[test]
    fn angled_band_is_larger_than_flat_band() {
        let flat = ChamberGeometry::new(&engine_with(0.5, 0.0));
        let angled = ChamberGeometry::new(&engine_with(0.5, 10.0));
        assert!(angled.squish_band_volume > flat.squish_band_volume);
        assert!(angled.squish_cone_volume > 0.0);
    }

    #[test]
    fn zero_area_ratio_leaves_the_whole_piston_to_the_bowl() {
        let engine = engine_with(0.0, 0.0);
        let chamber = ChamberGeometry::new(&engine);
        assert_eq!(chamber.squish_perpendicular_area, 0.0);
        assert_relative_eq!(chamber.bowl_area, engine.piston_area(), max_relative = 1e-12);
        assert_relative_eq!(chamber.bowl_diameter, engine.bore(), max_relative = 1e-12);
    }

    #[test]
    fn clearance_volume_follows_the_trapped_compression_ratio() {
        let engine = engine_with(0.5, 0.0);
        let chamber = ChamberGeometry::new(&engine);
        let trapped_swept =
            engine.piston_area() * engine.piston_position(engine.exhaust_timing());
        assert_relative_eq!(
            chamber.clearance_volume,
            trapped_swept / 9.0,
            max_relative = 1e-12
        );
    }
}
