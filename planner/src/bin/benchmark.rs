#[cfg(not(feature = "prof"))]
pub fn main() {
    println!("benchmarks not supported -- enable 'prof' crate feature")
}

#[cfg(feature = "prof")]
struct Row {
    name: String,
    points: usize,
    nn_length: f64,
    length: f64,
    time: f32,
}

#[cfg(feature = "prof")]
fn read_instance(filename: &std::path::Path) -> Result<(aqmap_structs::Point, Vec<aqmap_structs::Point>), String> {
    let text = std::fs::read_to_string(filename).map_err(|e| format!("{}: {}", filename.display(), e))?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| format!("{}: {}", filename.display(), e))?;
    let point = |v: &serde_json::Value| -> Option<aqmap_structs::Point> {
        Some(aqmap_structs::Point::new(v.get(0)?.as_f64()?, v.get(1)?.as_f64()?))
    };
    let start = point(&value["start"]).ok_or_else(|| format!("{}: bad start", filename.display()))?;
    let points = value["points"]
        .as_array()
        .ok_or_else(|| format!("{}: missing points", filename.display()))?
        .iter()
        .map(|v| point(v).ok_or_else(|| format!("{}: bad point {}", filename.display(), v)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((start, points))
}

#[cfg(feature = "prof")]
pub fn main() {
    use aqmap_planner::{greedy::nearest_neighbor, tour_length, two_opt::two_opt};
    use std::io::Write;
    use std::time::Instant;

    env_logger::init();

    println!("-------------------------");
    println!("aqmap planner benchmarking");
    println!("-------------------------");
    println!();

    let dir = std::env::args().nth(1).unwrap_or_else(|| "bench".to_string());
    let mut filenames = match std::fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|e| e.as_os_str().to_string_lossy().ends_with(".json"))
            .collect::<Vec<_>>(),
        Err(e) => {
            println!("cannot read {}: {}", dir, e);
            return;
        }
    };
    filenames.sort();

    println!("# RUNNING {} INSTANCES", filenames.len());
    let mut rows = Vec::new();
    for filename in filenames.iter() {
        let _p = hprof::enter("instance");
        let (start, points) = {
            let _p = hprof::enter("read");
            match read_instance(filename) {
                Ok(x) => x,
                Err(e) => {
                    println!("WARNING: skipping {}", e);
                    continue;
                }
            }
        };
        println!(" * instance {} with {} points", filename.display(), points.len());

        let t0 = Instant::now();
        let nn = {
            let _p = hprof::enter("nearest_neighbor");
            nearest_neighbor(start, points)
        };
        let nn_length = tour_length(start, &nn);
        let tour = two_opt(start, nn);
        let time = t0.elapsed().as_secs_f32();

        rows.push(Row {
            name: filename.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default(),
            points: tour.len(),
            nn_length,
            length: tour_length(start, &tour),
            time,
        });
    }
    println!();
    println!("# PROFILER");
    hprof::profiler().print_timing();
    println!();

    println!("# RESULTS");
    let mut tablewriter = tabwriter::TabWriter::new(Vec::new());
    writeln!(&mut tablewriter, "instance\tpoints\tnn\t2-opt\tgain\ttime").unwrap();
    writeln!(&mut tablewriter, "---\t---\t---\t---\t---\t---").unwrap();
    for row in rows.iter() {
        writeln!(
            &mut tablewriter,
            "{}\t{}\t{:.6}\t{:.6}\t{:.1}%\t{:.4}",
            row.name,
            row.points,
            row.nn_length,
            row.length,
            100.0 * (row.nn_length - row.length) / row.nn_length,
            row.time
        )
        .unwrap();
    }

    let written = String::from_utf8(tablewriter.into_inner().unwrap()).unwrap();
    println!("{}", written);
}
