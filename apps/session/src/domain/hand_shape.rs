//! Hand shape analysis over kind histograms.
//!
//! A complete hand is 14 tiles forming four melds plus a pair, seven distinct
//! pairs, or the thirteen orphans. Tenpai means one more tile completes it.

use crate::domain::rules::{COPIES_PER_KIND, HAND_SIZE, KIND_COUNT};
use crate::domain::tiles_logic::kind_counts;
use crate::domain::tiles_types::TileKind;

pub type Counts = [u8; KIND_COUNT];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Meld {
    /// Three of the kind at this index.
    Triplet(usize),
    /// Run starting at this index.
    Sequence(usize),
}

impl Meld {
    fn kinds(self) -> [usize; 3] {
        match self {
            Meld::Triplet(i) => [i, i, i],
            Meld::Sequence(i) => [i, i + 1, i + 2],
        }
    }

    pub fn contains(self, idx: usize) -> bool {
        self.kinds().contains(&idx)
    }
}

/// One way of reading a complete standard hand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Decomposition {
    pub pair: usize,
    pub melds: Vec<Meld>,
}

const TERMINALS_AND_HONORS: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// Sequences may only start at ranks 1..=7 of a number suit.
fn can_start_sequence(idx: usize) -> bool {
    idx < 27 && idx % 9 <= 6
}

fn total(counts: &Counts) -> usize {
    counts.iter().map(|&c| usize::from(c)).sum()
}

/// All readings of `counts` as four melds plus a pair.
pub fn standard_decompositions(counts: &Counts) -> Vec<Decomposition> {
    let mut out = Vec::new();
    if total(counts) != HAND_SIZE + 1 {
        return out;
    }
    let mut work = *counts;
    for pair in 0..KIND_COUNT {
        if work[pair] < 2 {
            continue;
        }
        work[pair] -= 2;
        let mut melds = Vec::with_capacity(4);
        split_melds(&mut work, &mut melds, pair, &mut out);
        work[pair] += 2;
    }
    out
}

// Consume the lowest remaining kind first so each reading is found once.
fn split_melds(work: &mut Counts, melds: &mut Vec<Meld>, pair: usize, out: &mut Vec<Decomposition>) {
    let Some(i) = work.iter().position(|&c| c > 0) else {
        out.push(Decomposition {
            pair,
            melds: melds.clone(),
        });
        return;
    };
    if work[i] >= 3 {
        work[i] -= 3;
        melds.push(Meld::Triplet(i));
        split_melds(work, melds, pair, out);
        melds.pop();
        work[i] += 3;
    }
    if can_start_sequence(i) && work[i + 1] > 0 && work[i + 2] > 0 {
        work[i] -= 1;
        work[i + 1] -= 1;
        work[i + 2] -= 1;
        melds.push(Meld::Sequence(i));
        split_melds(work, melds, pair, out);
        melds.pop();
        work[i] += 1;
        work[i + 1] += 1;
        work[i + 2] += 1;
    }
}

pub fn is_seven_pairs(counts: &Counts) -> bool {
    total(counts) == HAND_SIZE + 1 && counts.iter().filter(|&&c| c == 2).count() == 7
}

pub fn is_thirteen_orphans(counts: &Counts) -> bool {
    total(counts) == HAND_SIZE + 1
        && TERMINALS_AND_HONORS.iter().all(|&i| counts[i] >= 1)
        && TERMINALS_AND_HONORS.iter().any(|&i| counts[i] == 2)
}

pub fn is_complete(counts: &Counts) -> bool {
    is_thirteen_orphans(counts)
        || is_seven_pairs(counts)
        || !standard_decompositions(counts).is_empty()
}

/// Kinds that complete a 13-tile hand. A kind the hand already holds four of
/// cannot be waited on.
pub fn winning_kinds(hand: &[TileKind]) -> Vec<TileKind> {
    if hand.len() != HAND_SIZE {
        return Vec::new();
    }
    let counts = kind_counts(hand.iter().copied());
    (0..KIND_COUNT)
        .filter(|&i| usize::from(counts[i]) < COPIES_PER_KIND)
        .filter(|&i| {
            let mut with = counts;
            with[i] += 1;
            is_complete(&with)
        })
        .filter_map(TileKind::from_index)
        .collect()
}

pub fn is_tenpai(hand: &[TileKind]) -> bool {
    !winning_kinds(hand).is_empty()
}

/// Node cap for the subset search; pools with no tenpai subset stop here.
const SEARCH_BUDGET: usize = 200_000;

/// Up to `limit` distinct 13-tile tenpai subsets of `pool`, each sorted by
/// kind. Only four-melds-plus-pair shapes are searched.
pub fn tenpai_subsets(pool: &[TileKind], limit: usize) -> Vec<Vec<TileKind>> {
    let pool_counts = kind_counts(pool.iter().copied());
    let mut found: Vec<Counts> = Vec::new();
    let mut budget = SEARCH_BUDGET;

    for wait in 0..KIND_COUNT {
        if found.len() >= limit || budget == 0 {
            break;
        }
        if usize::from(pool_counts[wait]) >= COPIES_PER_KIND {
            continue;
        }
        let mut avail = pool_counts;
        avail[wait] += 1;
        let mut search = SubsetSearch {
            avail,
            chosen: [0; KIND_COUNT],
            wait,
            budget: &mut budget,
            found: &mut found,
            limit,
        };
        search.pick_pair();
    }

    found
        .into_iter()
        .map(|counts| {
            counts
                .iter()
                .enumerate()
                .flat_map(|(i, &c)| {
                    TileKind::from_index(i)
                        .into_iter()
                        .flat_map(move |k| std::iter::repeat(k).take(usize::from(c)))
                })
                .collect()
        })
        .collect()
}

struct SubsetSearch<'a> {
    avail: Counts,
    chosen: Counts,
    wait: usize,
    budget: &'a mut usize,
    found: &'a mut Vec<Counts>,
    limit: usize,
}

impl SubsetSearch<'_> {
    fn done(&self) -> bool {
        self.found.len() >= self.limit || *self.budget == 0
    }

    fn pick_pair(&mut self) {
        for pair in 0..KIND_COUNT {
            if self.done() {
                return;
            }
            if self.avail[pair] < 2 {
                continue;
            }
            self.take(pair, 2);
            self.pick_melds(0, 4);
            self.give(pair, 2);
        }
    }

    fn pick_melds(&mut self, start: usize, remaining: usize) {
        *self.budget = self.budget.saturating_sub(1);
        if remaining == 0 {
            self.record();
            return;
        }
        for i in start..KIND_COUNT {
            if self.done() {
                return;
            }
            // Melds are chosen in non-decreasing order: triplet before run at the same index.
            if self.avail[i] >= 3 {
                self.take(i, 3);
                self.pick_melds(i, remaining - 1);
                self.give(i, 3);
            }
            if can_start_sequence(i) && self.avail[i] > 0 && self.avail[i + 1] > 0 && self.avail[i + 2] > 0 {
                for k in i..i + 3 {
                    self.take(k, 1);
                }
                self.pick_melds(i, remaining - 1);
                for k in i..i + 3 {
                    self.give(k, 1);
                }
            }
        }
    }

    fn take(&mut self, i: usize, n: u8) {
        self.avail[i] -= n;
        self.chosen[i] += n;
    }

    fn give(&mut self, i: usize, n: u8) {
        self.avail[i] += n;
        self.chosen[i] -= n;
    }

    fn record(&mut self) {
        if self.chosen[self.wait] == 0 {
            return;
        }
        let mut hand = self.chosen;
        hand[self.wait] -= 1;
        if !self.found.contains(&hand) {
            self.found.push(hand);
        }
    }
}
