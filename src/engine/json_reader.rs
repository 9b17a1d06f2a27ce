use serde::{Deserialize, Serialize};

/// Engine definition as stored in a `.json` file. Same units the user
/// enters: `mm`, `RPM`, `CA deg` and percent of piston area.
#[derive(Serialize, Deserialize, Debug)]
pub struct JsonEngine {
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

pub fn read_json(file_name: &str) -> serde_json::Result<JsonEngine> {
    let json_file = std::fs::read_to_string(file_name).expect("Unable to read file");
    let data: JsonEngine = serde_json::from_str(&json_file)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_engine_definition() {
        let definition = r#"{
            "bore": 54.0,
            "stroke": 54.5,
            "conrod": 100.0,
            "speed": 10000.0,
            "exhaust_timing": 100.0,
            "compression_ratio": 10.0,
            "squish_area_ratio": 50.0,
            "squish_angle": 0.0,
            "squish_clearance": 1.0
        }"#;
        let engine: JsonEngine = serde_json::from_str(definition).unwrap();
        assert_eq!(engine.bore, 54.0);
        assert_eq!(engine.squish_area_ratio, 50.0);
        assert_eq!(engine.exhaust_timing, 100.0);
    }

    #[test]
    fn rejects_a_definition_with_missing_fields() {
        let definition = r#"{ "bore": 54.0, "stroke": 54.5 }"#;
        assert!(serde_json::from_str::<JsonEngine>(definition).is_err());
    }
}
