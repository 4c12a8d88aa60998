//! `|` `&` `-` `^` 演算子による集合演算
//!
//! 左辺が [`Interval`] の場合も集合表現に揃えてから [`IntervalSet`] の演算に委ねる。

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Sub, SubAssign};

use super::{IntervalSet, Intervals};
use crate::Interval;

macro_rules! impl_set_operator {
    ($Op:ident, $op:ident, $method:ident) => {
        impl<T: Intervals> $Op<&T> for &IntervalSet {
            type Output = IntervalSet;

            fn $op(self, rhs: &T) -> IntervalSet {
                self.$method(rhs)
            }
        }

        impl<T: Intervals> $Op<&T> for &Interval {
            type Output = IntervalSet;

            fn $op(self, rhs: &T) -> IntervalSet {
                IntervalSet::from(*self).$method(rhs)
            }
        }
    };
}

impl_set_operator!(BitOr, bitor, union);
impl_set_operator!(BitAnd, bitand, intersection);
impl_set_operator!(Sub, sub, difference);
impl_set_operator!(BitXor, bitxor, symmetric_difference);

macro_rules! impl_set_assign {
    ($Op:ident, $op:ident, $method:ident) => {
        impl<T: Intervals> $Op<&T> for IntervalSet {
            fn $op(&mut self, rhs: &T) {
                *self = self.$method(rhs);
            }
        }
    };
}

impl_set_assign!(BitOrAssign, bitor_assign, union);
impl_set_assign!(BitAndAssign, bitand_assign, intersection);
impl_set_assign!(SubAssign, sub_assign, difference);
