//! 区間代入・区間和の遅延伝播セグメント木。
//!
//! 木は二分木を配列で表現し、再帰を使わずに葉から根へ向かって走査する。
//! 要素を直接書き込めるのは[`UnbuiltTree`]の間だけで、[`UnbuiltTree::build`]で
//! [`AssignSumTree`]に変換した後の変更はすべて遅延伝播を経由する。

pub mod error;
pub mod timer;
pub mod value;

use std::{
    iter,
    ops::{Bound, Index, IndexMut, RangeBounds},
};

use log::{debug, trace};

pub use error::{Error, RangeError, Result};
pub use value::SumValue;

/// 区間を閉区間`[l, r]`に変換する。
///
/// 戻り値を`(l, r)`とすると以下が保証される。
///
/// * `l <= r < len`
fn get_lr(len: usize, range: impl RangeBounds<usize>) -> Result<(usize, usize), RangeError> {
    let l = match range.start_bound() {
        Bound::Excluded(s) => s.checked_add(1).ok_or(RangeError::Overflow)?,
        Bound::Included(s) => *s,
        Bound::Unbounded => 0,
    };
    let r = match range.end_bound() {
        Bound::Excluded(e) => *e,
        Bound::Included(&e) => {
            if l > e {
                return Err(RangeError::StartAfterEnd { start: l, end: e });
            }
            e.checked_add(1).ok_or(RangeError::Overflow)?
        }
        Bound::Unbounded => len,
    };
    if l > r {
        Err(RangeError::StartAfterEnd { start: l, end: r })
    } else if r > len {
        Err(RangeError::EndOutOfBounds { end: r, len })
    } else if l == r {
        Err(RangeError::Empty { at: l })
    } else {
        Ok((l, r - 1))
    }
}

fn check_index(len: usize, index: usize) -> Result<usize, RangeError> {
    if index < len {
        Ok(index)
    } else {
        Err(RangeError::IndexOutOfBounds { index, len })
    }
}

/// 構築前の木。葉への直接の読み書きができる。
#[derive(Clone, Debug)]
pub struct UnbuiltTree<T> {
    len: usize,
    tree: Box<[T]>,
}

impl<T: SumValue> UnbuiltTree<T> {
    /// すべての要素が0の木を作る。
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            debug!("rejected tree construction with zero elements");
            return Err(Error::InvalidSize);
        }
        let half_len = len.next_power_of_two();
        let tree = iter::repeat(T::ZERO).take(2 * half_len).collect();
        Ok(Self { len, tree })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn leaf(&self, index: usize) -> Result<usize, RangeError> {
        check_index(self.len, index).map(|i| i + self.tree.len() / 2)
    }

    pub fn get(&self, index: usize) -> Result<T> {
        Ok(self.tree[self.leaf(index)?])
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let leaf = self.leaf(index)?;
        self.tree[leaf] = value;
        Ok(())
    }

    /// 内部ノードを葉から順に計算し、クエリ可能な木に変換する。
    pub fn build(self) -> AssignSumTree<T> {
        let Self { len, mut tree } = self;
        let half_len = tree.len() / 2;
        for i in (1..half_len).rev() {
            tree[i] = tree[i * 2] + tree[i * 2 + 1];
        }
        let lazy = iter::repeat(None).take(half_len).collect();
        let height = half_len.trailing_zeros();
        debug!("built tree: len={len}, capacity={half_len}, height={height}");
        AssignSumTree {
            len,
            height,
            tree,
            lazy,
        }
    }
}

impl<T> Index<usize> for UnbuiltTree<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        if index >= self.len {
            panic!("index {index} out of range for tree of length {}", self.len);
        }
        &self.tree[self.tree.len() / 2 + index]
    }
}

impl<T> IndexMut<usize> for UnbuiltTree<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        if index >= self.len {
            panic!("index {index} out of range for tree of length {}", self.len);
        }
        let half_len = self.tree.len() / 2;
        &mut self.tree[half_len + index]
    }
}

/// 区間代入と区間和を`O(log(n))`で処理するセグメント木。
///
/// `lazy[i]`が`Some(v)`のとき、ノード`i`の子孫はすべて`v`であるが、子孫自身の値はまだ更新されていない。
/// ノードとその祖先が同時に`Some`を持つことはない。
#[derive(Clone, Debug)]
pub struct AssignSumTree<T> {
    len: usize,
    height: u32,
    tree: Box<[T]>,
    lazy: Box<[Option<T>]>,
}

impl<T: SumValue> AssignSumTree<T> {
    /// 要素数`len`の構築前の木を作る。`len == 0`のときは`Error::InvalidSize`を返す。
    pub fn with_len(len: usize) -> Result<UnbuiltTree<T>> {
        UnbuiltTree::new(len)
    }

    /// データのスライスからセグメント木を構築する。
    pub fn new(data: &[T]) -> Result<Self> {
        let mut unbuilt = UnbuiltTree::new(data.len())?;
        let half_len = unbuilt.tree.len() / 2;
        unbuilt.tree[half_len..half_len + data.len()].copy_from_slice(data);
        Ok(unbuilt.build())
    }

    pub fn from_iter_values<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let data = iter.into_iter().collect::<Vec<_>>();
        Self::new(&data)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 葉の数。`len()`以上の最小の2冪。
    pub fn capacity(&self) -> usize {
        self.lazy.len()
    }

    /// 根から葉までの段数。
    pub fn height(&self) -> u32 {
        self.height
    }

    /// 全要素の和。根の値は常に最新なので伝播は不要。
    pub fn total(&self) -> T {
        self.tree[1]
    }

    fn lr(&self, range: impl RangeBounds<usize>) -> Result<(usize, usize)> {
        get_lr(self.len, range).map_err(|e| {
            debug!("rejected range: {e}");
            e.into()
        })
    }

    fn checked_index(&self, index: usize) -> Result<usize> {
        check_index(self.len, index).map_err(|e| {
            debug!("rejected index: {e}");
            e.into()
        })
    }

    /// ノード全体を`value`で埋める。`width`はノードが受け持つ葉の数。
    fn assign(&mut self, node: usize, width: usize, value: T) {
        self.tree[node] = value.times(width);
        if let Some(lazy) = self.lazy.get_mut(node) {
            *lazy = Some(value);
        }
    }

    /// 葉`index`の祖先が持つ遅延値を根から順に子へ押し出す。
    fn propagate(&mut self, index: usize) {
        let leaf = index + self.capacity();
        for h in (1..=self.height).rev() {
            let node = leaf >> h;
            if let Some(value) = self.lazy[node].take() {
                let width = 1 << (h - 1);
                self.assign(node * 2, width, value);
                self.assign(node * 2 + 1, width, value);
            }
        }
    }

    /// 葉`index`の祖先を根まで再計算する。
    ///
    /// 遅延値を持つ祖先は直前の代入で埋められたノードであり、値はすでに正しい。
    fn pull(&mut self, index: usize) {
        let mut node = (index + self.capacity()) >> 1;
        while node >= 1 {
            if self.lazy[node].is_none() {
                self.tree[node] = self.tree[node * 2] + self.tree[node * 2 + 1];
            }
            node >>= 1;
        }
    }

    /// 指定区間の要素をすべて`value`にする。
    pub fn update(&mut self, range: impl RangeBounds<usize>, value: T) -> Result<()> {
        let (l_orig, r_orig) = self.lr(range)?;
        trace!("update [{l_orig}, {r_orig}]");
        self.propagate(l_orig);
        self.propagate(r_orig);

        let mut l = l_orig + self.capacity();
        let mut r = r_orig + self.capacity();
        let mut width = 1usize;
        while l <= r {
            if l & 1 == 1 {
                self.assign(l, width, value);
                l += 1;
            }
            if r & 1 == 0 {
                self.assign(r, width, value);
                r -= 1;
            }
            l >>= 1;
            r >>= 1;
            width <<= 1;
        }

        self.pull(l_orig);
        self.pull(r_orig);
        Ok(())
    }

    /// 指定区間の和を`O(log(n))`で求める。
    pub fn query(&mut self, range: impl RangeBounds<usize>) -> Result<T> {
        let (l_orig, r_orig) = self.lr(range)?;
        trace!("query [{l_orig}, {r_orig}]");
        self.propagate(l_orig);
        self.propagate(r_orig);

        let mut l = l_orig + self.capacity();
        let mut r = r_orig + self.capacity();
        let mut sum = T::ZERO;
        while l <= r {
            if l & 1 == 1 {
                sum = sum + self.tree[l];
                l += 1;
            }
            if r & 1 == 0 {
                sum = sum + self.tree[r];
                r -= 1;
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(sum)
    }

    pub fn get(&mut self, index: usize) -> Result<T> {
        let index = self.checked_index(index)?;
        self.propagate(index);
        Ok(self.tree[index + self.capacity()])
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        self.update(index..=index, value)
    }

    /// 指定位置の要素に`delta`を加える。
    pub fn add(&mut self, index: usize, delta: T) -> Result<()> {
        let index = self.checked_index(index)?;
        trace!("add at {index}");
        self.propagate(index);
        let leaf = index + self.capacity();
        self.tree[leaf] = self.tree[leaf] + delta;
        self.pull(index);
        Ok(())
    }

    /// すべての遅延値を葉まで押し出し、要素を列として返す。
    pub fn to_vec(&mut self) -> Vec<T> {
        let half_len = self.capacity();
        for node in 1..half_len {
            if let Some(value) = self.lazy[node].take() {
                let width = half_len >> (node.ilog2() + 1);
                self.assign(node * 2, width, value);
                self.assign(node * 2 + 1, width, value);
            }
        }
        self.tree[half_len..half_len + self.len].to_vec()
    }
}
