//! 区間代入・区間和の性質を素朴な実装と比較して検証する。

use assign_segtree::AssignSumTree;
use proptest::prelude::*;

fn data_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000_000i64..=1_000_000, 1..200)
}

/// データと、その範囲に収まる閉区間`[l, r]`。
fn data_and_range() -> impl Strategy<Value = (Vec<i64>, usize, usize)> {
    data_strategy().prop_flat_map(|data| {
        let n = data.len();
        (Just(data), 0..n).prop_flat_map(move |(data, l)| (Just(data), Just(l), l..n))
    })
}

#[derive(Clone, Debug)]
enum Op {
    Update(usize, usize, i64),
    Add(usize, i64),
    Query(usize, usize),
}

fn ops_strategy(n: usize) -> impl Strategy<Value = Vec<Op>> {
    let range = (0..n, 0..n).prop_map(|(a, b)| (a.min(b), a.max(b)));
    let op = prop_oneof![
        (range.clone(), -1000i64..=1000).prop_map(|((l, r), v)| Op::Update(l, r, v)),
        (0..n, -1000i64..=1000).prop_map(|(i, d)| Op::Add(i, d)),
        range.prop_map(|(l, r)| Op::Query(l, r)),
    ];
    prop::collection::vec(op, 0..100)
}

proptest! {
    #[test]
    fn build_sums_everything(data in data_strategy()) {
        let mut segtree = AssignSumTree::new(&data).unwrap();
        let n = data.len();
        prop_assert_eq!(segtree.query(0..=n - 1).unwrap(), data.iter().sum::<i64>());
        prop_assert_eq!(segtree.total(), data.iter().sum::<i64>());
    }

    #[test]
    fn repeated_update_is_idempotent((data, l, r) in data_and_range(), v in -1000i64..=1000) {
        let mut once = AssignSumTree::new(&data).unwrap();
        let mut twice = once.clone();
        once.update(l..=r, v).unwrap();
        twice.update(l..=r, v).unwrap();
        twice.update(l..=r, v).unwrap();
        prop_assert_eq!(once.to_vec(), twice.to_vec());
        prop_assert_eq!(once.query(..).unwrap(), twice.query(..).unwrap());
    }

    #[test]
    fn last_write_wins(
        (data, l, r) in data_and_range(),
        v1 in -1000i64..=1000,
        v2 in -1000i64..=1000,
    ) {
        let mut segtree = AssignSumTree::new(&data).unwrap();
        segtree.update(l..=r, v1).unwrap();
        segtree.update(l..=r, v2).unwrap();
        for i in l..=r {
            prop_assert_eq!(segtree.query(i..=i).unwrap(), v2);
        }
    }

    #[test]
    fn update_is_local((data, l, r) in data_and_range(), v in -1000i64..=1000) {
        let mut segtree = AssignSumTree::new(&data).unwrap();
        segtree.update(l..=r, v).unwrap();
        for (i, &x) in data.iter().enumerate() {
            if i < l || r < i {
                prop_assert_eq!(segtree.query(i..=i).unwrap(), x);
            }
        }
    }

    #[test]
    fn partition_sums_add_up(
        (data, l, r) in data_and_range(),
        v in -1000i64..=1000,
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let n = data.len();
        let mut segtree = AssignSumTree::new(&data).unwrap();
        segtree.update(l..=r, v).unwrap();
        let mut bounds = cuts.iter().map(|c| c.index(n)).filter(|&c| c > 0).collect::<Vec<_>>();
        bounds.push(0);
        bounds.push(n);
        bounds.sort_unstable();
        bounds.dedup();
        let pieces = bounds
            .windows(2)
            .map(|w| segtree.query(w[0]..w[1]).unwrap())
            .sum::<i64>();
        prop_assert_eq!(pieces, segtree.query(0..=n - 1).unwrap());
    }

    #[test]
    fn matches_naive_model(
        (data, ops) in data_strategy().prop_flat_map(|data| {
            let n = data.len();
            (Just(data), ops_strategy(n))
        })
    ) {
        let mut naive = data.clone();
        let mut segtree = AssignSumTree::new(&data).unwrap();
        for op in ops {
            match op {
                Op::Update(l, r, v) => {
                    segtree.update(l..=r, v).unwrap();
                    naive[l..=r].fill(v);
                }
                Op::Add(i, d) => {
                    segtree.add(i, d).unwrap();
                    naive[i] += d;
                }
                Op::Query(l, r) => {
                    prop_assert_eq!(
                        segtree.query(l..=r).unwrap(),
                        naive[l..=r].iter().sum::<i64>()
                    );
                }
            }
        }
        prop_assert_eq!(segtree.to_vec(), naive);
    }
}
