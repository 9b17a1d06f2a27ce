use crate::engine::engine::Engine;
use crate::zero_dim::chamber::ChamberGeometry;
use ansi_term::Style;
use ndarray::prelude::*;
use std::f64::consts::PI;
use std::io::Write;

/// Specific gas constant of dry air [J/(kg.K)].
pub const GAS_R: f64 = 287.058;
/// Ratio of specific heats of air [-].
pub const GAMMA: f64 = 1.401;

// Trapped-charge reference state at exhaust-port opening. Fixed by the
// method, not user-configurable.
const TRAPPED_PRESSURE: f64 = 101325.0; // [Pa]
const TRAPPED_TEMPERATURE: f64 = 293.0; // [K]

// Crank-angle increment of the marching loop.
const DEGREE_STEP: f64 = 1.0; // [CA deg]

/// Gas state of the two coupled control volumes at one crank angle. Two of
/// these roll through the marching loop; nothing is retained beyond the
/// previous step.
#[derive(Debug, Clone)]
struct GasState {
    height: f64,          // [m] - piston distance from TDC
    vol_squish: f64,      // [m³]
    vol_bowl: f64,        // [m³]
    vol_cyl: f64,         // [m³]
    pressure_squish: f64, // [Pa]
    pressure_bowl: f64,   // [Pa]
    mass_squish: f64,     // [kg]
}

/// Two-volume adiabatic squish model following Blair's closed-form method.
/// Consumes a validated `Engine`, derives the static chamber split once and
/// marches crank angle from exhaust-port opening to TDC.
pub struct SquishModel<'a> {
    engine: &'a Engine,
    chamber: ChamberGeometry,
}

impl<'a> SquishModel<'a> {
    pub fn new(engine: &'a Engine) -> SquishModel<'a> {
        SquishModel {
            engine,
            chamber: ChamberGeometry::new(engine),
        }
    }

    pub fn chamber(&self) -> &ChamberGeometry {
        &self.chamber
    }

    /// Runs the marching loop over the closed part of the compression
    /// stroke, in fixed 1-degree increments, and returns the full trace.
    ///
    /// Each step treats the whole cylinder as one adiabatic volume holding
    /// the trapped mass, re-apportions the squish mass by volume fraction
    /// and converts the transferred mass into a quasi-steady jet velocity
    /// through the band exit area.
    pub fn run(&self) -> SquishResult {
        let engine = self.engine;
        let chamber = &self.chamber;
        let dt = DEGREE_STEP * engine.sec_per_deg(); // [s]

        // Trapped charge at exhaust-port opening, squish mass apportioned
        // by volume fraction.
        let height = engine.piston_position(engine.exhaust_timing());
        let vol_squish = height * chamber.squish_perpendicular_area + chamber.squish_band_volume;
        let vol_bowl =
            height * chamber.bowl_area + chamber.bowl_volume + chamber.squish_bowl_volume;
        let vol_cyl = height * engine.piston_area() + chamber.clearance_volume;
        let trapped_mass = TRAPPED_PRESSURE * vol_cyl / (GAS_R * TRAPPED_TEMPERATURE);

        let mut state1 = GasState {
            height,
            vol_squish,
            vol_bowl,
            vol_cyl,
            pressure_squish: TRAPPED_PRESSURE,
            pressure_bowl: TRAPPED_PRESSURE,
            mass_squish: trapped_mass * vol_squish / vol_cyl,
        };

        let mut crank_angle: Vec<f64> = Vec::new();
        let mut velocity: Vec<f64> = Vec::new();
        let mut kinetic_energy: Vec<f64> = Vec::new();
        let mut max_velocity = 0.0;
        let mut max_velocity_angle = 0.0;
        let mut max_pressure_ratio = 0.0;
        let mut total_kinetic_energy = 0.0;

        let mut angle = 360.0 - engine.exhaust_timing();
        while angle <= 360.0 {
            let height = engine.piston_position(angle);
            let dh = state1.height - height;

            let vol_squish =
                height * chamber.squish_perpendicular_area + chamber.squish_band_volume;
            let vol_bowl =
                height * chamber.bowl_area + chamber.squish_bowl_volume + chamber.bowl_volume;
            let vol_cyl = height * engine.piston_area() + chamber.clearance_volume;

            // Blair's tabulated form keeps the trapped pressure, not the
            // volume ratio, in the exponent base.
            let pressure_cyl = TRAPPED_PRESSURE * (TRAPPED_PRESSURE / vol_cyl).powf(GAMMA);
            let temp_cyl = pressure_cyl * vol_cyl / (trapped_mass * GAS_R);
            let rho_cyl = pressure_cyl / (GAS_R * temp_cyl);

            // An empty squish band (zero area ratio) has no state of its
            // own; its pressure stays at the rolled cylinder value.
            let pressure_squish = if vol_squish > 0.0 {
                state1.pressure_squish * (state1.vol_squish / vol_squish).powf(GAMMA)
            } else {
                state1.pressure_squish
            };
            let pressure_bowl = state1.pressure_bowl * (state1.vol_bowl / vol_bowl).powf(GAMMA);

            let mass_squish = trapped_mass * vol_squish / vol_cyl;
            let transferred_mass = state1.mass_squish - mass_squish;

            // Effective band height at mid-step, band exit area along the
            // bowl perimeter.
            let mut squish_height = state1.height + engine.squish_clearance() - 0.5 * dh;
            if engine.squish_angle() >= 0.0 {
                squish_height += chamber.squish_cone_height;
            }
            let flow_area = squish_height * PI * chamber.bowl_diameter;

            // No mass crosses a zero-area boundary.
            let squish_velocity = if flow_area > 0.0 {
                transferred_mass / (rho_cyl * flow_area * dt)
            } else {
                0.0
            };

            crank_angle.push(360.0 - angle);
            velocity.push(squish_velocity);
            if squish_velocity > max_velocity {
                max_velocity = squish_velocity;
                max_velocity_angle = 360.0 - angle;
            }

            let pressure_ratio = pressure_squish / pressure_bowl;
            if pressure_ratio > max_pressure_ratio {
                max_pressure_ratio = pressure_ratio;
            }

            let step_energy = 0.5 * transferred_mass * squish_velocity * squish_velocity;
            total_kinetic_energy += step_energy;
            kinetic_energy.push(step_energy);

            // Roll forward. The sub-volumes restart every step from the
            // common cylinder pressure.
            state1 = GasState {
                height,
                vol_squish,
                vol_bowl,
                vol_cyl,
                pressure_squish: pressure_cyl,
                pressure_bowl: pressure_cyl,
                mass_squish,
            };

            angle += DEGREE_STEP;
        }

        SquishResult {
            crank_angle: Array1::from(crank_angle),
            velocity: Array1::from(velocity),
            kinetic_energy: Array1::from(kinetic_energy),
            max_velocity,
            max_velocity_angle,
            max_pressure_ratio,
            total_kinetic_energy,
        }
    }
}

/// Trace and summary of one simulation run. The three sequences are aligned
/// by index, one entry per crank degree from exhaust-port opening to TDC.
#[derive(Debug, Clone)]
pub struct SquishResult {
    pub crank_angle: Array1<f64>,    // [CA deg BTDC]
    pub velocity: Array1<f64>,       // [m/s]
    pub kinetic_energy: Array1<f64>, // [J]
    pub max_velocity: f64,           // [m/s]
    pub max_velocity_angle: f64,     // [CA deg BTDC]
    pub max_pressure_ratio: f64,     // [-]
    pub total_kinetic_energy: f64,   // [J]
}

impl SquishResult {
    pub fn len(&self) -> usize {
        self.crank_angle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crank_angle.is_empty()
    }

    pub fn get_headers(&self) -> String {
        "crank-angle [deg BTDC]\tsquish velocity [m/s]\tkinetic energy [J]".to_string()
    }

    /// Writes the trace as a tab-separated table.
    pub fn write_to_file(&self, file_name: &str) {
        let mut result: Vec<String> = Vec::new();
        result.push(format!("{}\n", self.get_headers()));
        for ((angle, vel), energy) in self
            .crank_angle
            .iter()
            .zip(self.velocity.iter())
            .zip(self.kinetic_energy.iter())
        {
            result.push(format!("{:.2}\t{}\t{}\n", angle, vel, energy));
        }
        let mut file = std::fs::File::create(file_name).expect("Error opening writing file");
        write!(file, "{}", result.join("")).expect("Unable to write data");
    }
}

impl std::fmt::Display for SquishResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:
        max squish velocity: {:.2} [m/s] @ {:.2} [deg BTDC]
        max squish pressure ratio: {:.4}
        total kinetic energy squished: {:.2} [mJ]",
            Style::new().bold().paint("squish velocity"),
            self.max_velocity,
            self.max_velocity_angle,
            self.max_pressure_ratio,
            self.total_kinetic_energy * 1e3,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::engine::{EngineGeometry, OperatingPoint};
    use approx::assert_relative_eq;

    fn engine(speed: f64, squish_area_ratio: f64) -> Engine {
        Engine::new(
            EngineGeometry {
                bore: 54.0,
                stroke: 54.5,
                conrod: 100.0,
                compression_ratio: 10.0,
                squish_area_ratio,
                squish_angle: 0.0,
                squish_clearance: 1.0,
            },
            OperatingPoint {
                speed,
                exhaust_timing: 100.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn reference_engine_produces_a_full_trace() {
        let engine = engine(10000.0, 0.5);
        let result = SquishModel::new(&engine).run();
        // one entry per degree from exhaust opening to TDC, inclusive
        assert_eq!(result.len(), 101);
        assert!(result.max_velocity > 0.0 && result.max_velocity.is_finite());
        assert!(result.total_kinetic_energy > 0.0 && result.total_kinetic_energy.is_finite());
        assert!(result.max_pressure_ratio.is_finite());
    }

    #[test]
    fn crank_angle_runs_from_exhaust_opening_to_tdc() {
        let engine = engine(10000.0, 0.5);
        let result = SquishModel::new(&engine).run();
        assert_eq!(result.crank_angle[0], 100.0);
        assert_eq!(result.crank_angle[result.len() - 1], 0.0);
        for pair in result.crank_angle.windows(2) {
            assert_eq!(pair[0] - pair[1], 1.0);
        }
    }

    #[test]
    fn total_energy_matches_the_per_step_sequence() {
        let engine = engine(10000.0, 0.5);
        let result = SquishModel::new(&engine).run();
        let sum: f64 = result.kinetic_energy.iter().sum();
        assert_eq!(sum, result.total_kinetic_energy);
    }

    #[test]
    fn reported_maximum_is_the_maximum_of_the_trace() {
        let engine = engine(10000.0, 0.5);
        let result = SquishModel::new(&engine).run();
        let (index, largest) = result
            .velocity
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(i_max, v_max), (i, &v)| {
                if v > v_max {
                    (i, v)
                } else {
                    (i_max, v_max)
                }
            });
        assert_eq!(result.max_velocity, largest);
        assert_eq!(result.max_velocity_angle, result.crank_angle[index]);
    }

    #[test]
    fn zero_squish_area_yields_a_zero_trace_without_faulting() {
        let engine = engine(10000.0, 0.0);
        let result = SquishModel::new(&engine).run();
        assert_eq!(result.len(), 101);
        for &v in result.velocity.iter() {
            assert_eq!(v, 0.0);
        }
        assert_eq!(result.max_velocity, 0.0);
        assert_eq!(result.total_kinetic_energy, 0.0);
        assert!(result.max_pressure_ratio.is_finite());
    }

    #[test]
    fn speed_scales_the_velocity_but_not_the_shape() {
        let slow = SquishModel::new(&engine(10000.0, 0.5)).run();
        let fast = SquishModel::new(&engine(20000.0, 0.5)).run();
        assert_eq!(slow.len(), fast.len());
        // dt halves, the transferred mass per degree is unchanged, so every
        // velocity entry doubles
        for (v_slow, v_fast) in slow.velocity.iter().zip(fast.velocity.iter()) {
            if *v_slow != 0.0 {
                assert_relative_eq!(*v_fast, 2.0 * *v_slow, max_relative = 1e-12);
            }
        }
        assert_eq!(slow.crank_angle, fast.crank_angle);
    }

    #[test]
    fn angled_band_raises_the_band_volume_but_keeps_the_trace_finite() {
        let flat_engine = engine(10000.0, 0.5);
        let angled_engine = Engine::new(
            EngineGeometry {
                bore: 54.0,
                stroke: 54.5,
                conrod: 100.0,
                compression_ratio: 10.0,
                squish_area_ratio: 0.5,
                squish_angle: 15.0,
                squish_clearance: 1.0,
            },
            OperatingPoint {
                speed: 10000.0,
                exhaust_timing: 100.0,
            },
        )
        .unwrap();
        let flat = SquishModel::new(&flat_engine);
        let angled = SquishModel::new(&angled_engine);
        assert!(angled.chamber().squish_band_volume > flat.chamber().squish_band_volume);
        let result = angled.run();
        assert!(result.max_velocity.is_finite());
        assert!(result.total_kinetic_energy.is_finite());
    }
}
