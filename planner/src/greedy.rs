use aqmap_structs::{Located, Point};
use log::debug;
use ordered_float::OrderedFloat;

/// Greedy tour: from `start`, keep flying to the closest item not yet
/// visited. Ties go to the item that comes first in `items`.
pub fn nearest_neighbor<T: Located>(start: Point, mut items: Vec<T>) -> Vec<T> {
    let mut tour = Vec::with_capacity(items.len());
    let mut current = start;

    loop {
        let nearest = items
            .iter()
            .enumerate()
            .min_by_key(|(_, item)| OrderedFloat(current.dist(&item.loc())))
            .map(|(idx, _)| idx);
        let Some(idx) = nearest else { break };
        let item = items.remove(idx);
        current = item.loc();
        tour.push(item);
    }

    debug!("nearest neighbor tour of {} items", tour.len());
    tour
}
