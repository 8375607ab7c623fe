use std::{error::Error, io::Write, path::Path};

use aqmap_controller::{backend::read_params, FileServer, Mission};
use aqmap_structs::{DroneParams, Point};

const USAGE: &str = "usage: aqmap_performance DATA_DIR [PARAMS_JSON]";

struct Run {
    date: String,
    start: &'static str,
    moves: u32,
    completed: bool,
    outcome: String,
}

/// The centre of the area and its four corners, nudged just inside.
fn start_positions(params: &DroneParams) -> Vec<(&'static str, Point)> {
    let area = params.area;
    let centre = area.centre();
    let inset = 1e-6;
    let names = ["top left", "top right", "bottom left", "bottom right"];
    let mut starts = vec![("centre", centre)];
    for (name, corner) in names.into_iter().zip(area.corners()) {
        starts.push((
            name,
            Point::new(
                corner.lng + inset * (centre.lng - corner.lng).signum(),
                corner.lat + inset * (centre.lat - corner.lat).signum(),
            ),
        ));
    }
    starts
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if !(1..=2).contains(&args.len()) {
        return Err(USAGE.into());
    }
    let source = FileServer::new(&args[0]);
    let params = match args.get(1) {
        Some(path) => read_params(Path::new(path))?,
        None => DroneParams::default(),
    };

    let dates = source.dates()?;
    println!("# RUNNING {} DATES FROM {}", dates.len(), source.root().display());

    let mut runs = Vec::new();
    for date in dates {
        println!(" * {}", date);
        for (name, start) in start_positions(&params) {
            let report = Mission::load(&source, date, start, params.clone())?.fly();
            runs.push(Run {
                date: date.to_string(),
                start: name,
                moves: report.moves_used,
                completed: report.outcome.is_completed(),
                outcome: match report.outcome.error() {
                    None => "ok".to_string(),
                    Some(e) => e.to_string(),
                },
            });
        }
    }

    println!();
    println!("# RESULTS");
    let mut tablewriter = tabwriter::TabWriter::new(Vec::new());
    writeln!(&mut tablewriter, "date\tstart\tmoves\toutcome")?;
    writeln!(&mut tablewriter, "---\t---\t---\t---")?;
    for run in runs.iter() {
        writeln!(&mut tablewriter, "{}\t{}\t{}\t{}", run.date, run.start, run.moves, run.outcome)?;
    }
    let written = tablewriter
        .into_inner()
        .map_err(|_| "could not format the results table")?;
    println!("{}", String::from_utf8_lossy(&written));

    let failures = runs.iter().filter(|r| !r.completed).count();
    let average = if runs.is_empty() {
        0.0
    } else {
        runs.iter().map(|r| r.moves as f64).sum::<f64>() / runs.len() as f64
    };
    println!("Runs: {}", runs.len());
    println!("Average moves: {:.2}", average);
    println!("Failures: {}", failures);
    Ok(())
}
