// Exhaustive permutation search with a running-best reducer.
//
// Candidates are streamed out of a backtracking walk over an index-usage
// array and compared one at a time against the single best seen so far.
// Nothing is materialized beyond the current path.
//
// The tie-break chain is a total order over permutations, so the best
// candidate is unique and the same however the walk is split up.

use std::cmp::Ordering;

use tracing::trace;

use super::TIE_EPSILON;
use crate::scoring::PlayerScores;

/// Lineup positions whose normalized OBR feeds the second tie-break.
const TOP_OF_ORDER: usize = 5;

/// 0-indexed cleanup spot, whose normalized PWR feeds the third tie-break.
const CLEANUP_POSITION: usize = 3;

// ---------------------------------------------------------------------------
// Tie-break chain
// ---------------------------------------------------------------------------

/// Borrowed tie-break snapshot of one permutation.
#[derive(Debug, Clone, Copy)]
struct TieKey<'o> {
    order: &'o [usize],
    total: f64,
    top_obr: f64,
    cleanup_pwr: f64,
}

impl<'o> TieKey<'o> {
    fn of(order: &'o [usize], total: f64, pool: &[PlayerScores<'_>]) -> Self {
        TieKey {
            order,
            total,
            top_obr: top_obr(order, pool),
            cleanup_pwr: cleanup_pwr(order, pool),
        }
    }

    /// Objective, top-of-order OBR, cleanup PWR, then the lexicographically
    /// greater id string. `by_ids` is only called once the first three agree.
    /// Permutations with equal id strings (duplicate ids) fall back to the
    /// smaller index sequence.
    fn rank(&self, other: &TieKey<'_>, by_ids: impl FnOnce() -> Ordering) -> Ordering {
        cmp_grid(self.total, other.total)
            .then_with(|| cmp_grid(self.top_obr, other.top_obr))
            .then_with(|| cmp_grid(self.cleanup_pwr, other.cleanup_pwr))
            .then_with(by_ids)
            .then_with(|| other.order.cmp(self.order))
    }
}

/// A winning permutation, owned.
#[derive(Debug, Clone)]
pub(super) struct Candidate {
    pub order: Vec<usize>,
    pub total: f64,
    top_obr: f64,
    cleanup_pwr: f64,
    ids: String,
}

impl Candidate {
    fn new(order: &[usize], total: f64, pool: &[PlayerScores<'_>]) -> Self {
        let key = TieKey::of(order, total, pool);
        let mut ids = String::new();
        write_id_key(&mut ids, order, pool);
        Candidate {
            order: order.to_vec(),
            total,
            top_obr: key.top_obr,
            cleanup_pwr: key.cleanup_pwr,
            ids,
        }
    }

    fn key(&self) -> TieKey<'_> {
        TieKey {
            order: &self.order,
            total: self.total,
            top_obr: self.top_obr,
            cleanup_pwr: self.cleanup_pwr,
        }
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn compare(&self, other: &Candidate) -> Ordering {
        self.key()
            .rank(&other.key(), || self.ids.as_str().cmp(other.ids.as_str()))
    }
}

fn top_obr(order: &[usize], pool: &[PlayerScores<'_>]) -> f64 {
    order
        .iter()
        .take(TOP_OF_ORDER)
        .map(|&i| pool[i].normalized.obr)
        .sum()
}

/// Normalized PWR of the cleanup hitter, or 0 for lineups too short to have one.
fn cleanup_pwr(order: &[usize], pool: &[PlayerScores<'_>]) -> f64 {
    order
        .get(CLEANUP_POSITION)
        .map(|&i| pool[i].normalized.pwr)
        .unwrap_or(0.0)
}

/// Player ids along `order`, joined with commas, written into `buf`.
fn write_id_key(buf: &mut String, order: &[usize], pool: &[PlayerScores<'_>]) {
    use std::fmt::Write;

    buf.clear();
    for (n, &i) in order.iter().enumerate() {
        if n > 0 {
            buf.push(',');
        }
        // Writing into a String cannot fail.
        let _ = write!(buf, "{}", pool[i].player.id);
    }
}

/// Compare on a grid of `TIE_EPSILON` steps: values rounding to the same
/// step are tied. Unlike a sliding `|a - b| < eps` window this is transitive.
fn cmp_grid(a: f64, b: f64) -> Ordering {
    (a / TIE_EPSILON)
        .round()
        .total_cmp(&(b / TIE_EPSILON).round())
}

/// Keep whichever of `best` and `candidate` ranks higher.
#[cfg(feature = "parallel")]
fn keep_better(best: Option<Candidate>, candidate: Candidate) -> Option<Candidate> {
    match best {
        Some(current) if candidate.compare(&current) != Ordering::Greater => Some(current),
        _ => Some(candidate),
    }
}

// ---------------------------------------------------------------------------
// Backtracking walk
// ---------------------------------------------------------------------------

struct Walk<'p, 'a> {
    pool: &'p [PlayerScores<'a>],
    k: usize,
    used: Vec<bool>,
    path: Vec<usize>,
    best: Option<Candidate>,
    key_buf: String,
}

impl<'p, 'a> Walk<'p, 'a> {
    fn new(pool: &'p [PlayerScores<'a>], k: usize) -> Self {
        Walk {
            pool,
            k,
            used: vec![false; pool.len()],
            path: Vec::with_capacity(k),
            best: None,
            key_buf: String::new(),
        }
    }

    fn push(&mut self, i: usize) {
        self.used[i] = true;
        self.path.push(i);
    }

    fn pop(&mut self) {
        if let Some(i) = self.path.pop() {
            self.used[i] = false;
        }
    }

    fn descend(&mut self, partial: f64) {
        if self.path.len() == self.k {
            self.consider(partial);
            return;
        }
        let position = self.path.len();
        for i in 0..self.pool.len() {
            if self.used[i] {
                continue;
            }
            let score = self.pool[i].slots.for_position(position);
            self.push(i);
            self.descend(partial + score);
            self.pop();
        }
    }

    /// Rank the current path against the running best. The id key is only
    /// written when the numeric levels tie, and a snapshot is only built
    /// when the path takes over.
    fn consider(&mut self, total: f64) {
        let pool = self.pool;
        let current = TieKey::of(&self.path, total, pool);
        let key_buf = &mut self.key_buf;

        let ordering = match &self.best {
            None => Ordering::Greater,
            Some(best) => current.rank(&best.key(), || {
                write_id_key(key_buf, current.order, pool);
                key_buf.as_str().cmp(best.ids.as_str())
            }),
        };

        if ordering == Ordering::Greater {
            let candidate = Candidate::new(&self.path, total, pool);
            trace!(total, order = ?candidate.order, "new best lineup");
            self.best = Some(candidate);
        }
    }
}

/// Best permutation of `k` players drawn from `pool` starting from `prefix`.
fn walk_from(pool: &[PlayerScores<'_>], k: usize, prefix: Option<usize>) -> Option<Candidate> {
    let mut walk = Walk::new(pool, k);
    let partial = match prefix {
        Some(first) => {
            walk.push(first);
            pool[first].slots.for_position(0)
        }
        None => 0.0,
    };
    walk.descend(partial);
    walk.best
}

fn search_sequential(pool: &[PlayerScores<'_>], k: usize) -> Option<Candidate> {
    walk_from(pool, k, None)
}

/// One partition per lead-off candidate. Each partition yields its maximum
/// under the tie-break order, and the maximum of those is the global one.
#[cfg(feature = "parallel")]
fn search_parallel(pool: &[PlayerScores<'_>], k: usize) -> Option<Candidate> {
    use rayon::prelude::*;

    if k == 0 {
        return search_sequential(pool, k);
    }
    (0..pool.len())
        .into_par_iter()
        .map(|first| walk_from(pool, k, Some(first)))
        .reduce(|| None, |a, b| match (a, b) {
            (Some(a), Some(b)) => keep_better(Some(a), b),
            (a, None) => a,
            (None, b) => b,
        })
}

#[cfg(not(feature = "parallel"))]
fn search_parallel(pool: &[PlayerScores<'_>], k: usize) -> Option<Candidate> {
    search_sequential(pool, k)
}

/// Enumerate every ordered `k`-subset of `pool` and return the winning order
/// (as pool indices) and its objective.
pub(super) fn search(pool: &[PlayerScores<'_>], k: usize, parallel: bool) -> (Vec<usize>, f64) {
    let best = if parallel {
        search_parallel(pool, k)
    } else {
        search_sequential(pool, k)
    };
    match best {
        Some(c) => (c.order, c.total),
        None => (Vec::new(), 0.0),
    }
}
