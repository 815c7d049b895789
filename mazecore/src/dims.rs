use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use paste::paste;

/// Position of a cell on the board, `x` is the column and `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    /// Every position in `[from.0, to.0) x [from.1, to.1)`, rows first.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> + Clone {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    pub fn euclid_dist(self, other: Dims) -> f64 {
        let Dims(dx, dy) = other - self;
        f64::from(dx).hypot(f64::from(dy))
    }

    pub fn is_orthogonal_to(self, other: Dims) -> bool {
        (other - self).abs_sum() == 1
    }

    pub fn is_diagonal_to(self, other: Dims) -> bool {
        let Dims(dx, dy) = other - self;
        dx.abs() == 1 && dy.abs() == 1
    }
}

macro_rules! impl_op {
    ($trait:ident + Assign, $op:ident, $rhs:ty, |$a:ident, $b:ident| $body:expr) => {
        impl $trait<$rhs> for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: $rhs) -> Dims {
                let ($a, $b) = (self, other);
                $body
            }
        }

        paste! {
            impl [<$trait Assign>]<$rhs> for Dims {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: $rhs) {
                    *self = self.$op(other);
                }
            }
        }
    };
}

impl_op!(Add + Assign, add, Dims, |a, b| Dims(a.0 + b.0, a.1 + b.1));
impl_op!(Sub + Assign, sub, Dims, |a, b| Dims(a.0 - b.0, a.1 - b.1));
impl_op!(Mul + Assign, mul, i32, |a, k| Dims(a.0 * k, a.1 * k));

impl From<(i32, i32)> for Dims {
    fn from((x, y): (i32, i32)) -> Self {
        Dims(x, y)
    }
}

impl From<Dims> for (i32, i32) {
    fn from(dims: Dims) -> Self {
        (dims.0, dims.1)
    }
}

#[cfg(test)]
mod tests {
    use super::Dims;

    #[test]
    fn iter_fill_is_row_major() {
        let cells: Vec<_> = Dims::iter_fill(Dims::ZERO, Dims(3, 2)).collect();
        assert_eq!(
            cells,
            vec![
                Dims(0, 0),
                Dims(1, 0),
                Dims(2, 0),
                Dims(0, 1),
                Dims(1, 1),
                Dims(2, 1)
            ]
        );
    }

    #[test]
    fn operators() {
        let mut a = Dims(2, 3);
        assert_eq!(a + Dims(1, -1), Dims(3, 2));
        assert_eq!(a - Dims(2, 2), Dims(0, 1));
        assert_eq!(a * 2, Dims(4, 6));

        a += Dims(1, 1);
        a *= 3;
        assert_eq!(a, Dims(9, 12));
    }

    #[test]
    fn distances() {
        assert_eq!(Dims(1, 1).euclid_dist(Dims(4, 5)), 5.0);
        assert!(Dims(1, 1).is_orthogonal_to(Dims(1, 2)));
        assert!(!Dims(1, 1).is_orthogonal_to(Dims(2, 2)));
        assert!(Dims(1, 1).is_diagonal_to(Dims(2, 2)));
        assert!(!Dims(1, 1).is_diagonal_to(Dims(1, 3)));
    }
}
