use aqmap_structs::{Located, Point};

pub mod greedy;
pub mod two_opt;

/// Length of the closed tour from `start` through every item in order and
/// back to `start`.
pub fn tour_length<T: Located>(start: Point, tour: &[T]) -> f64 {
    let mut length = 0.0;
    let mut prev = start;
    for item in tour {
        length += prev.dist(&item.loc());
        prev = item.loc();
    }
    length + prev.dist(&start)
}

/// Order the items into a short closed tour from `start`: nearest-neighbor
/// construction refined by 2-opt.
pub fn plan_tour<T: Located>(start: Point, items: Vec<T>) -> Vec<T> {
    #[cfg(feature = "prof")]
    let _p = hprof::enter("plan_tour");
    let tour = greedy::nearest_neighbor(start, items);
    two_opt::two_opt(start, tour)
}
