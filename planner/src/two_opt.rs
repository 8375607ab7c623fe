use aqmap_structs::{Located, Point};
use log::{debug, trace};

use crate::tour_length;

/// Improve a closed tour from `start` by reversing stretches of it for as
/// long as some reversal makes it strictly shorter. Every item, including
/// the first and the last, can move; `start` stays fixed at both ends.
///
/// Each pass tries every stretch against the best length found so far, and
/// passes are repeated until one makes no improvement.
pub fn two_opt<T: Located>(start: Point, mut tour: Vec<T>) -> Vec<T> {
    #[cfg(feature = "prof")]
    let _p = hprof::enter("two_opt");

    let initial = tour_length(start, &tour);
    let mut best = initial;
    let mut passes = 0;
    let mut improved = true;

    while improved {
        improved = false;
        passes += 1;
        for i in 0..tour.len() {
            for k in (i + 1)..tour.len() {
                // Reversing everything only changes the direction of travel.
                if i == 0 && k + 1 == tour.len() {
                    continue;
                }
                let before = if i == 0 { start } else { tour[i - 1].loc() };
                let after = if k + 1 == tour.len() { start } else { tour[k + 1].loc() };
                let (first, last) = (tour[i].loc(), tour[k].loc());

                // Only the two edges at the ends of the stretch change.
                let gain = before.dist(&first) + last.dist(&after) - before.dist(&last) - first.dist(&after);
                if gain <= 0.0 {
                    continue;
                }

                tour[i..=k].reverse();
                let length = tour_length(start, &tour);
                if length < best {
                    trace!("reversed {}..={}, length {} -> {}", i, k, best, length);
                    best = length;
                    improved = true;
                } else {
                    tour[i..=k].reverse();
                }
            }
        }
    }

    debug!(
        "2-opt: {} passes, length {:.6} -> {:.6}",
        passes, initial, best
    );
    tour
}
