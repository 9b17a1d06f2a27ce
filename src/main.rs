use squish_velocity_simulator as svs;
use svs::{SquishModel, StoredInputs};

const DATA_FILE: &str = "data.txt";
const RESULT_FILE: &str = "result.txt";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let show_plot = !args.iter().any(|arg| arg == "--no-plot");
    let json_file = args.iter().find(|arg| !arg.starts_with("--"));

    // An engine .json file on the command line wins; otherwise rerun the
    // last-used inputs from data.txt.
    let inputs = match json_file {
        Some(file_name) => match svs::read_json(file_name) {
            Ok(json_engine) => StoredInputs::from(json_engine),
            Err(err) => {
                println!("Error at 'main':\n unable to parse {} file \n{}", file_name, err);
                std::process::exit(1)
            }
        },
        None => match StoredInputs::load(DATA_FILE) {
            Ok(stored) => stored,
            Err(err) => {
                println!("Error at 'main':\n {}", err);
                println!(" pass an engine .json file or provide a {} record", DATA_FILE);
                std::process::exit(1)
            }
        },
    };

    let engine = match inputs.to_engine() {
        Ok(eng) => eng,
        Err(err) => {
            println!("Error at 'main':\n {}", err);
            std::process::exit(1)
        }
    };
    println!("{}", engine);

    let model = SquishModel::new(&engine);
    let result = model.run();
    println!("{}", result);

    result.write_to_file(RESULT_FILE);
    if let Err(err) = inputs.save(DATA_FILE) {
        println!("Error at 'main':\n {}", err);
        std::process::exit(1)
    }

    if show_plot {
        svs::plot::plot_velocity(&result);
    }
}
