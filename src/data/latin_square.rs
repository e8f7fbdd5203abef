//! Balanced Latin square (Williams design) for counterbalancing condition order.
//!
//! Participant `p` gets row `p mod n`. For an even number of conditions each
//! condition appears once per position across `n` participants and every
//! condition directly follows every other exactly once. For an odd number of
//! conditions odd participants get the reversed row, which balances carry-over
//! effects across pairs of participants.

/// Condition indices in the order participant `participant` should see them.
pub fn balanced_row(participant: usize, n: usize) -> Vec<usize> {
    let mut row = Vec::with_capacity(n);
    let (mut j, mut h) = (0, 0);
    for i in 0..n {
        let val = if i < 2 || i % 2 != 0 {
            j += 1;
            j - 1
        } else {
            h += 1;
            n - h
        };
        row.push((val + participant) % n);
    }
    if n % 2 != 0 && participant % 2 != 0 {
        row.reverse();
    }
    row
}

/// Reorder `items` for `participant`.
pub fn balanced_order<T: Clone>(items: &[T], participant: usize) -> Vec<T> {
    balanced_row(participant, items.len())
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

/// The first `n` rows, one per participant.
pub fn balanced_square(n: usize) -> Vec<Vec<usize>> {
    (0..n).map(|p| balanced_row(p, n)).collect()
}
