//! Persistence of the last-used inputs as a flat semicolon-delimited record.

use crate::engine::engine::{Engine, EngineGeometry, OperatingPoint};
use crate::engine::json_reader::JsonEngine;
use std::io::Write;

/// Record field order:
/// `bore;stroke;conrod;rpm;exhaustTiming;compressionRatio;squishAreaRatioPercent;squishAngle;squishClearance`
const RECORD_FIELDS: usize = 9;

/// Last-used inputs, kept in the units the user enters them: lengths in
/// `mm`, squish area ratio in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredInputs {
    pub bore: f64,              // [mm]
    pub stroke: f64,            // [mm]
    pub conrod: f64,            // [mm]
    pub speed: f64,             // [RPM]
    pub exhaust_timing: f64,    // [CA deg ATDC]
    pub compression_ratio: f64, // [-]
    pub squish_area_ratio: f64, // [%]
    pub squish_angle: f64,      // [deg]
    pub squish_clearance: f64,  // [mm]
}

impl StoredInputs {
    pub fn to_record(&self) -> String {
        format!(
            "{};{};{};{};{};{};{};{};{}",
            self.bore,
            self.stroke,
            self.conrod,
            self.speed,
            self.exhaust_timing,
            self.compression_ratio,
            self.squish_area_ratio,
            self.squish_angle,
            self.squish_clearance,
        )
    }

    pub fn from_record(record: &str) -> Result<StoredInputs, String> {
        let fields: Vec<&str> = record.trim().split(';').collect();
        if fields.len() != RECORD_FIELDS {
            let msg = format!(
                "Error at StoredInputs::from_record \n expected {} fields, found {}",
                RECORD_FIELDS,
                fields.len()
            );
            return Err(msg);
        }
        let mut values = [0.0f64; RECORD_FIELDS];
        for (value, field) in values.iter_mut().zip(fields.iter()) {
            *value = match field.trim().parse() {
                Ok(v) => v,
                Err(err) => {
                    let msg = format!(
                        "Error at StoredInputs::from_record \n unable to parse `{}` \n{}",
                        field, err
                    );
                    return Err(msg);
                }
            };
        }
        Ok(StoredInputs {
            bore: values[0],
            stroke: values[1],
            conrod: values[2],
            speed: values[3],
            exhaust_timing: values[4],
            compression_ratio: values[5],
            squish_area_ratio: values[6],
            squish_angle: values[7],
            squish_clearance: values[8],
        })
    }

    pub fn load(file_name: &str) -> Result<StoredInputs, String> {
        let record = match std::fs::read_to_string(file_name) {
            Ok(r) => r,
            Err(err) => {
                let msg = format!(
                    "Error at StoredInputs::load \n unable to read {} \n{}",
                    file_name, err
                );
                return Err(msg);
            }
        };
        StoredInputs::from_record(&record)
    }

    pub fn save(&self, file_name: &str) -> Result<(), String> {
        let mut file = match std::fs::File::create(file_name) {
            Ok(f) => f,
            Err(err) => {
                let msg = format!(
                    "Error at StoredInputs::save \n unable to create {} \n{}",
                    file_name, err
                );
                return Err(msg);
            }
        };
        if let Err(err) = write!(file, "{}", self.to_record()) {
            let msg = format!(
                "Error at StoredInputs::save \n unable to write {} \n{}",
                file_name, err
            );
            return Err(msg);
        }
        Ok(())
    }

    /// Builds the validated engine parameter set; the percent squish area
    /// ratio is normalized to a 0-1 fraction here.
    pub fn to_engine(&self) -> Result<Engine, String> {
        Engine::new(
            EngineGeometry {
                bore: self.bore,
                stroke: self.stroke,
                conrod: self.conrod,
                compression_ratio: self.compression_ratio,
                squish_area_ratio: self.squish_area_ratio / 100.0,
                squish_angle: self.squish_angle,
                squish_clearance: self.squish_clearance,
            },
            OperatingPoint {
                speed: self.speed,
                exhaust_timing: self.exhaust_timing,
            },
        )
    }
}

impl From<JsonEngine> for StoredInputs {
    fn from(json: JsonEngine) -> StoredInputs {
        StoredInputs {
            bore: json.bore,
            stroke: json.stroke,
            conrod: json.conrod,
            speed: json.speed,
            exhaust_timing: json.exhaust_timing,
            compression_ratio: json.compression_ratio,
            squish_area_ratio: json.squish_area_ratio,
            squish_angle: json.squish_angle,
            squish_clearance: json.squish_clearance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> StoredInputs {
        StoredInputs {
            bore: 54.0,
            stroke: 54.5,
            conrod: 100.0,
            speed: 10000.0,
            exhaust_timing: 100.0,
            compression_ratio: 10.0,
            squish_area_ratio: 50.0,
            squish_angle: 0.0,
            squish_clearance: 1.0,
        }
    }

    #[test]
    fn record_round_trips() {
        let restored = StoredInputs::from_record(&inputs().to_record()).unwrap();
        assert_eq!(restored, inputs());
    }

    #[test]
    fn parses_the_reference_record() {
        let restored =
            StoredInputs::from_record("54;54.5;100;10000;100;10;50;0;1\n").unwrap();
        assert_eq!(restored.bore, 54.0);
        assert_eq!(restored.squish_area_ratio, 50.0);
        assert_eq!(restored.squish_clearance, 1.0);
    }

    #[test]
    fn rejects_a_short_record() {
        assert!(StoredInputs::from_record("54;54.5;100").is_err());
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(StoredInputs::from_record("54;54.5;conrod;10000;100;10;50;0;1").is_err());
    }

    #[test]
    fn to_engine_normalizes_the_percent_ratio() {
        let engine = inputs().to_engine().unwrap();
        assert_relative_eq!(engine.squish_area_ratio(), 0.5, epsilon = 1e-12);
    }
}
