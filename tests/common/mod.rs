use proptest::prelude::*;

// O(n^2) reference: pairs i < j with vs[i] > vs[j]
#[allow(dead_code)]
pub(super) fn brute_force(vs: &[i32]) -> u64 {
    let mut cnt = 0;
    for i in 0..vs.len() {
        for j in i + 1..vs.len() {
            cnt += (vs[i] > vs[j]) as u64;
        }
    }
    cnt
}

#[allow(dead_code)]
pub(super) fn choose2(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

pub(super) type Priorities = Vec<i32>;

// narrow range: plenty of ties
#[allow(dead_code)]
pub(super) fn small_priorities() -> impl Strategy<Value = Priorities> {
    prop::collection::vec(0i32..32, 0..500)
}

#[allow(dead_code)]
pub(super) fn any_priorities() -> impl Strategy<Value = Priorities> {
    prop::collection::vec(any::<i32>(), 0..500)
}

// all-distinct sequences, for the reversal identity
#[allow(dead_code)]
pub(super) fn distinct_priorities() -> impl Strategy<Value = Priorities> {
    prop::collection::hash_set(any::<i32>(), 0..500)
        .prop_map(|s| s.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

// four distinct keys: long runs of ties get rotated around
#[allow(dead_code)]
pub(super) fn tie_heavy_priorities() -> impl Strategy<Value = Priorities> {
    prop::collection::vec(0i32..4, 0..500)
}
