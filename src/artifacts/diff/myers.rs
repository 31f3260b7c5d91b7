use derive_new::new;

/// Lines added and removed between two versions of a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub insertions: u64,
    pub deletions: u64,
}

/// Edit count beyond which a search gives up on an optimal script
const MIN_COST_BOUND: usize = 256;

/// Myers' O((N+M)D) shortest edit search over two sequences.
///
/// Only the length of the shortest edit script is tracked, which is all a
/// line count needs: with `D` edits between `n` old and `m` new elements,
/// `(D + m - n) / 2` are insertions and `(D - m + n) / 2` are deletions.
///
/// Like xdiff, the search is bounded: once `D` exceeds roughly `sqrt(n + m)`
/// (never less than 256) it settles for the furthest point reached so far and
/// resumes from there. Counts stay exact below the bound and the running time
/// stays near-linear on wholesale rewrites.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

/// Outcome of one bounded search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Search {
    /// The whole of both sequences is covered by this many edits
    Complete(usize),
    /// `edits` edits lead from the start to `(x, y)`; the rest is undecided
    Partial { edits: usize, x: usize, y: usize },
}

impl<T: Eq> MyersDiff<'_, T> {
    pub fn line_stats(&self) -> LineStats {
        let bound = (self.a.len() + self.b.len()).isqrt().max(MIN_COST_BOUND);
        self.bounded_line_stats(bound)
    }

    fn bounded_line_stats(&self, bound: usize) -> LineStats {
        // a zero bound would never move past the first difference
        let bound = bound.max(1);
        let (mut a, mut b) = (self.a, self.b);
        let mut stats = LineStats::default();

        loop {
            let (old, new) = trim_common(a, b);
            match Self::shortest_edit(old, new, bound) {
                Search::Complete(edits) => {
                    stats.count_edits(edits, old.len(), new.len());
                    return stats;
                }
                Search::Partial { edits, x, y } => {
                    tracing::trace!(edits, x, y, "edit search hit its cost bound");
                    stats.count_edits(edits, x, y);
                    (a, b) = (&old[x..], &new[y..]);
                }
            }
        }
    }

    fn shortest_edit(a: &[T], b: &[T], bound: usize) -> Search {
        let (n, m) = (a.len() as isize, b.len() as isize);
        if n == 0 || m == 0 {
            return Search::Complete((n + m) as usize);
        }

        let bound = bound as isize;
        // furthest x per diagonal k = x - y, -1 where no path of this
        // length ends on the diagonal
        let offset = bound + 1;
        let mut v = vec![-1isize; (2 * bound + 3) as usize];
        let at = |k: isize| (k + offset) as usize;

        for d in 0..=bound {
            let (low, high) = (-d.min(m), d.min(n));
            let (prev_low, prev_high) = (-(d - 1).min(m), (d - 1).min(n));

            let mut k = low + (d - low) % 2;
            while k <= high {
                let x = if d == 0 {
                    0
                } else {
                    // insertion from diagonal k+1 keeps x
                    let above = (k < prev_high)
                        .then(|| v[at(k + 1)])
                        .filter(|&x| x >= 0 && x - (k + 1) < m);
                    // deletion from diagonal k-1 advances x
                    let left = (k > prev_low)
                        .then(|| v[at(k - 1)])
                        .filter(|&x| x >= 0 && x < n)
                        .map(|x| x + 1);

                    match above.max(left) {
                        Some(x) => x,
                        None => {
                            v[at(k)] = -1;
                            k += 2;
                            continue;
                        }
                    }
                };

                let mut x = x;
                let mut y = x - k;
                while x < n && y < m && a[x as usize] == b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[at(k)] = x;

                if x >= n && y >= m {
                    return Search::Complete(d as usize);
                }
                k += 2;
            }
        }

        // furthest point along the diagonals, nearest the middle on ties
        let furthest = (-bound.min(m)..=bound.min(n))
            .filter(|k| (bound - k) % 2 == 0)
            .filter_map(|k| {
                let x = v[at(k)];
                (x >= 0).then_some((x, x - k))
            })
            .max_by_key(|&(x, y)| (x + y, -(x - y).abs()));

        match furthest {
            Some((x, y)) => Search::Partial {
                edits: bound as usize,
                x: x as usize,
                y: y as usize,
            },
            None => Search::Complete((n + m) as usize),
        }
    }
}

impl LineStats {
    /// Account for `edits` edits turning `old` elements into `new` ones
    fn count_edits(&mut self, edits: usize, old: usize, new: usize) {
        let (edits, old, new) = (edits as u64, old as u64, new as u64);
        self.insertions += (edits + new - old) / 2;
        self.deletions += (edits + old - new) / 2;
    }
}

/// Strip the shared prefix and suffix, which never contribute edits
fn trim_common<'d, T: Eq>(a: &'d [T], b: &'d [T]) -> (&'d [T], &'d [T]) {
    let prefix = a.iter().zip(b).take_while(|(old, new)| old == new).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(old, new)| old == new)
        .count();

    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}
