//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used for storing
//! cell candidates, as well as the recursive combination generator shared by
//! the subset techniques.

use std::fmt::{self, Debug, Formatter};
use std::ops::{
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Sub,
    SubAssign
};

/// The lowest digit that can appear in a Sudoku cell.
pub const MIN_DIGIT: usize = 1;

/// The highest digit that can appear in a Sudoku cell.
pub const MAX_DIGIT: usize = 9;

const DIGIT_MASK: u16 = 0b11_1111_1110;

/// A set of the digits 1 to 9, implemented as a bit mask over a single `u16`.
/// Each digit is represented by one bit, which gives constant-time set
/// operations and makes the set trivially copyable. This is the
/// representation used for the candidates of a cell.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct DigitSet {
    bits: u16
}

/// An iterator over the digits contained in a [DigitSet], in ascending order.
pub struct DigitSetIter {
    bits: u16
}

impl Iterator for DigitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            None
        }
        else {
            let digit = self.bits.trailing_zeros() as usize;
            self.bits &= self.bits - 1;
            Some(digit)
        }
    }
}

impl DigitSet {

    /// Creates a new, empty digit set.
    pub fn empty() -> DigitSet {
        DigitSet {
            bits: 0
        }
    }

    /// Creates a new digit set that contains all digits from 1 to 9.
    pub fn full() -> DigitSet {
        DigitSet {
            bits: DIGIT_MASK
        }
    }

    /// Creates a new digit set that contains only the given digit, which must
    /// be in the range 1 to 9.
    pub fn singleton(digit: usize) -> DigitSet {
        let mut set = DigitSet::empty();
        set.insert(digit);
        set
    }

    /// Indicates whether this set contains the given digit. Inputs outside
    /// the range 1 to 9 yield `false`.
    pub fn contains(self, digit: usize) -> bool {
        digit >= MIN_DIGIT && digit <= MAX_DIGIT &&
            self.bits & (1 << digit) != 0
    }

    /// Inserts the given digit into this set, such that [DigitSet::contains]
    /// returns `true` for it afterwards. The digit must be in the range 1 to
    /// 9.
    ///
    /// This method returns `true` if the set has changed, that is, the digit
    /// was not present before, and `false` otherwise.
    pub fn insert(&mut self, digit: usize) -> bool {
        debug_assert!(digit >= MIN_DIGIT && digit <= MAX_DIGIT);

        let mask = 1u16 << digit;
        let changed = self.bits & mask == 0;
        self.bits |= mask;
        changed
    }

    /// Removes the given digit from this set, such that [DigitSet::contains]
    /// returns `false` for it afterwards.
    ///
    /// This method returns `true` if the set has changed, that is, the digit
    /// was present before, and `false` otherwise.
    pub fn remove(&mut self, digit: usize) -> bool {
        debug_assert!(digit >= MIN_DIGIT && digit <= MAX_DIGIT);

        let mask = 1u16 << digit;
        let changed = self.bits & mask != 0;
        self.bits &= !mask;
        changed
    }

    /// Removes all digits from this set, leaving it empty.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Indicates whether this set is empty, i.e. contains no digits.
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the number of digits contained in this set.
    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns an iterator over the digits contained in this set in ascending
    /// order.
    pub fn iter(self) -> DigitSetIter {
        DigitSetIter {
            bits: self.bits
        }
    }

    /// Removes all digits in `other` from this set. Returns `true` if and
    /// only if this set changed as a result of the operation.
    ///
    /// `DigitSet` implements [SubAssign] as syntactic sugar for this
    /// operation.
    pub fn difference_assign(&mut self, other: DigitSet) -> bool {
        let before = self.bits;
        self.bits &= !other.bits;
        before != self.bits
    }

    /// Retains only the digits also contained in `other`. Returns `true` if
    /// and only if this set changed as a result of the operation.
    ///
    /// `DigitSet` implements [BitAndAssign] as syntactic sugar for this
    /// operation.
    pub fn intersect_assign(&mut self, other: DigitSet) -> bool {
        let before = self.bits;
        self.bits &= other.bits;
        before != self.bits
    }

    /// Inserts all digits contained in `other` into this set. Returns `true`
    /// if and only if this set changed as a result of the operation.
    ///
    /// `DigitSet` implements [BitOrAssign] as syntactic sugar for this
    /// operation.
    pub fn union_assign(&mut self, other: DigitSet) -> bool {
        let before = self.bits;
        self.bits |= other.bits;
        before != self.bits
    }
}

impl Debug for DigitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl BitOr for DigitSet {
    type Output = DigitSet;

    fn bitor(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            bits: self.bits | rhs.bits
        }
    }
}

impl BitAnd for DigitSet {
    type Output = DigitSet;

    fn bitand(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            bits: self.bits & rhs.bits
        }
    }
}

impl Sub for DigitSet {
    type Output = DigitSet;

    fn sub(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            bits: self.bits & !rhs.bits
        }
    }
}

impl BitXor for DigitSet {
    type Output = DigitSet;

    fn bitxor(self, rhs: DigitSet) -> DigitSet {
        DigitSet {
            bits: (self.bits ^ rhs.bits) & DIGIT_MASK
        }
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, rhs: DigitSet) {
        self.union_assign(rhs);
    }
}

impl BitAndAssign for DigitSet {
    fn bitand_assign(&mut self, rhs: DigitSet) {
        self.intersect_assign(rhs);
    }
}

impl SubAssign for DigitSet {
    fn sub_assign(&mut self, rhs: DigitSet) {
        self.difference_assign(rhs);
    }
}

impl BitXorAssign for DigitSet {
    fn bitxor_assign(&mut self, rhs: DigitSet) {
        self.bits = (self.bits ^ rhs.bits) & DIGIT_MASK;
    }
}

/// Creates a new [DigitSet] that contains the specified digits, which is a
/// comma-separated list of values in the range 1 to 9.
///
/// An example usage of this macro looks as follows:
///
/// ```
/// use sudoku_grader::digit_set;
/// use sudoku_grader::util::DigitSet;
///
/// let set = digit_set!(2, 4);
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// assert_eq!(2, set.len());
/// ```
#[macro_export]
macro_rules! digit_set {
    ($($digit:expr),+) => {
        {
            let mut set = DigitSet::empty();
            $(set.insert($digit);)+
            set
        }
    };
}

fn combinations_rec<T: Copy>(items: &[T], k: usize, current: &mut Vec<T>,
        accumulator: &mut Vec<Vec<T>>) {
    if k == 0 {
        accumulator.push(current.clone());
        return;
    }

    if items.len() < k {
        return;
    }

    current.push(items[0]);
    combinations_rec(&items[1..], k - 1, current, accumulator);
    current.pop();
    combinations_rec(&items[1..], k, current, accumulator);
}

/// Enumerates all subsets of length `k` of the given items, preserving the
/// input order within each subset. Subsets that contain earlier items are
/// generated first, which makes the scan order of the techniques that rely on
/// this function deterministic.
pub(crate) fn combinations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    let mut accumulator = Vec::new();
    combinations_rec(items, k, &mut Vec::new(), &mut accumulator);
    accumulator
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn empty_set_contains_nothing() {
        let set = DigitSet::empty();

        assert!(set.is_empty());
        assert_eq!(0, set.len());

        for digit in MIN_DIGIT..=MAX_DIGIT {
            assert!(!set.contains(digit));
        }
    }

    #[test]
    fn full_set_contains_all_digits() {
        let set = DigitSet::full();

        assert!(!set.is_empty());
        assert_eq!(9, set.len());

        for digit in MIN_DIGIT..=MAX_DIGIT {
            assert!(set.contains(digit));
        }
    }

    #[test]
    fn singleton_contains_only_given_digit() {
        let set = DigitSet::singleton(5);

        assert_eq!(1, set.len());
        assert!(set.contains(5));
        assert!(!set.contains(4));
        assert!(!set.contains(6));
    }

    #[test]
    fn manipulation() {
        let mut set = DigitSet::empty();

        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(!set.insert(3));
        assert_eq!(2, set.len());

        assert!(set.remove(3));
        assert!(!set.remove(3));
        assert!(!set.contains(3));
        assert!(set.contains(7));

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn iteration_is_ascending() {
        let set = digit_set!(9, 1, 4);
        let digits: Vec<usize> = set.iter().collect();
        assert_eq!(vec![1, 4, 9], digits);
    }

    #[test]
    fn set_operations() {
        let lhs = digit_set!(2, 4);
        let rhs = digit_set!(3, 4);

        assert_eq!(digit_set!(2, 3, 4), lhs | rhs);
        assert_eq!(DigitSet::singleton(4), lhs & rhs);
        assert_eq!(DigitSet::singleton(2), lhs - rhs);
        assert_eq!(digit_set!(2, 3), lhs ^ rhs);
    }

    #[test]
    fn assign_operations_report_change() {
        let mut set = digit_set!(2, 4);

        assert!(set.union_assign(DigitSet::singleton(3)));
        assert!(!set.union_assign(DigitSet::singleton(3)));
        assert!(set.difference_assign(digit_set!(2, 9)));
        assert!(!set.difference_assign(DigitSet::singleton(2)));
        assert_eq!(digit_set!(3, 4), set);
    }

    #[test]
    fn combinations_of_pairs() {
        let items = [1, 2, 3];
        let combos = combinations(&items, 2);
        assert_eq!(vec![vec![1, 2], vec![1, 3], vec![2, 3]], combos);
    }

    #[test]
    fn combinations_of_too_few_items_are_empty() {
        let items = [1, 2];
        assert!(combinations(&items, 3).is_empty());
    }

    #[test]
    fn combinations_of_zero_length() {
        let items = [1, 2];
        assert_eq!(vec![Vec::<i32>::new()], combinations(&items, 0));
    }
}
