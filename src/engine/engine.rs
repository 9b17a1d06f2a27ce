use crate::kinematics::crank_slider;
use ansi_term::Style;
use std::f64::consts::PI;

/// Combustion chamber and crank-train geometry, as entered by the user.
/// Lengths in `mm`, angles in `deg`; `squish_area_ratio` is a 0-1 fraction
/// of the piston area.
#[derive(Debug, Clone)]
pub struct EngineGeometry {
    pub bore: f64,              // [mm]
    pub stroke: f64,            // [mm]
    pub conrod: f64,            // [mm]
    pub compression_ratio: f64, // [-] - trapped, referenced to exhaust closing
    pub squish_area_ratio: f64, // [-]
    pub squish_angle: f64,      // [deg]
    pub squish_clearance: f64,  // [mm]
}

/// Operating condition the squish model is evaluated at.
#[derive(Debug, Clone)]
pub struct OperatingPoint {
    pub speed: f64,          // [RPM]
    pub exhaust_timing: f64, // [CA deg ATDC]
}

/// Validated engine parameter set in SI units. Every simulation input passes
/// through `Engine::new`, so the downstream model never sees a geometry the
/// slider-crank relation is undefined for.
#[derive(Debug, Clone)]
pub struct Engine {
    bore: f64,              // [m]
    stroke: f64,            // [m]
    conrod: f64,            // [m]
    compression_ratio: f64, // [-]
    squish_area_ratio: f64, // [-]
    squish_angle: f64,      // [deg]
    squish_clearance: f64,  // [m]
    speed: f64,             // [RPM]
    exhaust_timing: f64,    // [CA deg ATDC]
    piston_area: f64,       // [m²]
    swept_volume: f64,      // [m³]
    sec_per_deg: f64,       // [s/CA deg]
}

impl Engine {
    /// Creates an `Engine` object. Input units must be: `mm`, `RPM` and `CA deg`.
    /// `squish_area_ratio` must already be normalized from percent to a 0-1 fraction.
    pub fn new(geometry: EngineGeometry, operating: OperatingPoint) -> Result<Engine, String> {
        if geometry.bore <= 0.0 {
            return Err(format!("bore must be greater than zero"));
        } else if geometry.stroke <= 0.0 {
            return Err(format!("stroke must be greater than zero"));
        } else if geometry.conrod <= 0.5 * geometry.stroke {
            return Err(format!(
                "conrod length must be greater than half-stroke: conrod = {}, stroke = {}",
                geometry.conrod, geometry.stroke
            ));
        } else if geometry.compression_ratio <= 1.0 {
            return Err(format!("compression ratio must be greater than one"));
        } else if geometry.squish_area_ratio < 0.0 || geometry.squish_area_ratio > 1.0 {
            return Err(format!(
                "squish area ratio must be a fraction between 0 and 1: {}",
                geometry.squish_area_ratio
            ));
        } else if geometry.squish_angle < 0.0 || geometry.squish_angle >= 90.0 {
            return Err(format!(
                "squish angle must be between 0 and 90 degrees: {}",
                geometry.squish_angle
            ));
        } else if geometry.squish_clearance <= 0.0 {
            return Err(format!("squish clearance must be greater than zero"));
        } else if operating.speed <= 0.0 {
            return Err(format!("engine speed must be greater than zero"));
        } else if operating.exhaust_timing <= 0.0 || operating.exhaust_timing >= 360.0 {
            return Err(format!(
                "exhaust timing must be between 0 and 360 degrees: {}",
                operating.exhaust_timing
            ));
        }

        // In SI units
        let bore = geometry.bore * 1e-3; // [m]
        let stroke = geometry.stroke * 1e-3; // [m]
        let conrod = geometry.conrod * 1e-3; // [m]
        let squish_clearance = geometry.squish_clearance * 1e-3; // [m]
        let piston_area = 0.25 * PI * bore * bore;

        Ok(Engine {
            bore,
            stroke,
            conrod,
            compression_ratio: geometry.compression_ratio,
            squish_area_ratio: geometry.squish_area_ratio,
            squish_angle: geometry.squish_angle,
            squish_clearance,
            speed: operating.speed,
            exhaust_timing: operating.exhaust_timing,
            piston_area,
            swept_volume: piston_area * stroke,
            sec_per_deg: 1.0 / (6.0 * operating.speed),
        })
    }

    /// Piston distance from TDC at `crank_angle` in `CA deg` ATDC, in meters.
    pub fn piston_position(&self, crank_angle: f64) -> f64 {
        crank_slider::piston_displacement(crank_angle, self.stroke, self.conrod)
    }

    pub fn bore(&self) -> f64 {
        self.bore
    }

    pub fn stroke(&self) -> f64 {
        self.stroke
    }

    pub fn conrod(&self) -> f64 {
        self.conrod
    }

    pub fn compression_ratio(&self) -> f64 {
        self.compression_ratio
    }

    pub fn squish_area_ratio(&self) -> f64 {
        self.squish_area_ratio
    }

    pub fn squish_angle(&self) -> f64 {
        self.squish_angle
    }

    pub fn squish_clearance(&self) -> f64 {
        self.squish_clearance
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn exhaust_timing(&self) -> f64 {
        self.exhaust_timing
    }

    pub fn piston_area(&self) -> f64 {
        self.piston_area
    }

    pub fn swept_volume(&self) -> f64 {
        self.swept_volume
    }

    /// Wall-clock seconds per crank degree at the configured speed.
    pub fn sec_per_deg(&self) -> f64 {
        self.sec_per_deg
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:
        speed: {:.0} [RPM]
        exhaust timing: {:.1} [CA deg ATDC]
        {} \t\t\t {}
        bore: {:.1} [mm] \t\t\t area ratio: {:.1} [%]
        stroke: {:.1} [mm] \t\t\t angle: {:.1} [deg]
        conrod: {:.1} [mm] \t\t\t clearance: {:.2} [mm]
        swept volume: {:.1} [cm³]
        compression ratio: {:.1}",
            Style::new().bold().paint("engine"),
            self.speed,
            self.exhaust_timing,
            Style::new().underline().paint("     Geometry     "),
            Style::new().underline().paint("   Squish band    "),
            self.bore * 1e3,
            self.squish_area_ratio * 1e2,
            self.stroke * 1e3,
            self.squish_angle,
            self.conrod * 1e3,
            self.squish_clearance * 1e3,
            self.swept_volume * 1e6,
            self.compression_ratio,
        )
    }
}
