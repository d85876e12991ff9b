use std::ops::Add;

/// 区間和と区間代入で扱える要素型。
///
/// `times(n)`は`self`を`n`個足し合わせた値であり、`n`要素の区間を一つの値で埋めたときの和となる。
/// 真の和が型に収まる限りオーバーフローしてはならない。
pub trait SumValue: Copy + Add<Output = Self> {
    const ZERO: Self;

    fn times(self, n: usize) -> Self;
}

/// 二倍を繰り返して`x`を`n`個足し合わせる。
///
/// 途中の値はすべて`x * k` (`k <= n`)なので、真の和が収まればオーバーフローしない。
fn times_by_doubling<T: SumValue>(x: T, mut n: usize) -> T {
    let mut acc = T::ZERO;
    let mut base = x;
    loop {
        if n & 1 == 1 {
            acc = acc + base;
        }
        n >>= 1;
        if n == 0 {
            return acc;
        }
        base = base + base;
    }
}

macro_rules! sum_value_int_impl {
    ($($t:ty),* $(,)?) => {
        $(impl SumValue for $t {
            const ZERO: Self = 0;
            fn times(self, n: usize) -> Self {
                match <$t>::try_from(n) {
                    Ok(n) => self * n,
                    Err(_) => times_by_doubling(self, n),
                }
            }
        })*
    };
}

macro_rules! sum_value_float_impl {
    ($($t:ty),* $(,)?) => {
        $(impl SumValue for $t {
            const ZERO: Self = 0.0;
            fn times(self, n: usize) -> Self {
                self * n as $t
            }
        })*
    };
}

sum_value_int_impl!(u8, u16, u32, u64, u128, usize);
sum_value_int_impl!(i8, i16, i32, i64, i128, isize);
sum_value_float_impl!(f32, f64);
