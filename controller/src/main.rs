use std::{error::Error, fs::File, io::BufWriter, path::Path};

use aqmap_controller::{
    backend::read_params,
    readings::{flight_path_filename, readings_filename, write_flight_path, write_readings},
    FileServer, Mission, Outcome, SurveyDate,
};
use aqmap_structs::{DroneParams, Point};

const USAGE: &str = "usage: aqmap DD MM YYYY LATITUDE LONGITUDE SEED DATA_DIR [PARAMS_JSON]";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if !(7..=8).contains(&args.len()) {
        return Err(USAGE.into());
    }
    let date = SurveyDate::parse(&args[0], &args[1], &args[2])?;
    let lat: f64 = args[3].parse()?;
    let lng: f64 = args[4].parse()?;
    // args[5] is a random seed, but the flight is deterministic.
    let source = FileServer::new(&args[6]);
    let params = match args.get(7) {
        Some(path) => read_params(Path::new(path))?,
        None => DroneParams::default(),
    };

    let mission = Mission::load(&source, date, Point::new(lng, lat), params)?;
    println!("Planning the order to visit {} sensors...", mission.sensors().len());
    println!("Flying the survey of {} from {}", date, mission.start());
    let report = mission.fly();

    match &report.outcome {
        Outcome::Completed => println!("The drone is finished!"),
        Outcome::ReturnFailed(e) => println!("Every sensor was read, but the drone did not get back: {}", e),
        Outcome::Aborted { error, unvisited } => {
            println!("The drone did not complete the plan ({} sensors unvisited): {}", unvisited, error)
        }
    }

    println!("Writing output files...");
    write_readings(BufWriter::new(File::create(readings_filename(date))?), &report)?;
    write_flight_path(BufWriter::new(File::create(flight_path_filename(date))?), &report.moves)?;

    println!("Number of moves = {}", report.moves_used);
    Ok(())
}
