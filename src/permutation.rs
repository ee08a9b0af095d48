//! # Permutations
//!
//! This module provides a `Permutation` struct for representing permutations of
//! `0..n`, together with the factorial-number-system indexer used to pick a
//! deterministic shuffle from a seed.
//!
//! ## Key Features:
//!
//! - **Representation**: A `Permutation` is stored by its direct mapping (`map[i]` is
//!   the image of `i`) and its inverse mapping, so both directions are O(1).
//! - **Construction**:
//!   - Identity permutation: `Permutation::id(n)`.
//!   - From a mapping vector: `Permutation::from_map(vec![...])` or the checked
//!     `Permutation::try_from_map`.
//!   - From disjoint cycles: `Permutation::from_disjoint_cycles(&[vec![...]])`.
//!   - From a rank: `Permutation::nth(n, rank)`.
//! - **Operations**: `p.transposed(i, j)` exchanges two images, `p.is_identity()`.
//! - **Cycle Utilities**: `p.find_cycles()`.
//! - **Indexing**: [`nth_permutation`] and [`factorial`].

use std::fmt;

use bitvec::vec::BitVec;
use thiserror::Error;

/// A permutation of `0..n`.
///
/// # Examples
///
/// ```
/// use orbitswap::permutation::Permutation;
///
/// // 0->2, 1->0, 2->1, 3->3
/// let p = Permutation::from_map(vec![2, 0, 1, 3]);
/// assert_eq!(p.image(0), 2);
/// assert_eq!(p.preimage(2), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation {
    map: Vec<usize>,
    inv: Vec<usize>,
}

impl Permutation {
    /// Creates the identity permutation of length `n`.
    pub fn id(n: usize) -> Self {
        Permutation {
            map: (0..n).collect(),
            inv: (0..n).collect(),
        }
    }

    /// Creates a permutation from a mapping vector.
    /// The `map` vector states where index `i` is sent: `map[i]` is the image of `i`.
    ///
    /// The vector is trusted to be a bijection of `0..map.len()`; use
    /// [`Permutation::try_from_map`] for untrusted input.
    pub fn from_map(map: Vec<usize>) -> Self {
        let mut inv = vec![0; map.len()];
        for (i, &j) in map.iter().enumerate() {
            inv[j] = i;
        }
        Permutation { map, inv }
    }

    /// Same as [`Permutation::from_map`] but rejects anything that is not a
    /// bijection of `0..map.len()`.
    ///
    /// ```
    /// # use orbitswap::permutation::Permutation;
    /// assert!(Permutation::try_from_map(vec![1, 0, 2]).is_ok());
    /// assert!(Permutation::try_from_map(vec![1, 1, 2]).is_err());
    /// assert!(Permutation::try_from_map(vec![0, 3]).is_err());
    /// ```
    pub fn try_from_map(map: Vec<usize>) -> Result<Self, PermutationError> {
        let len = map.len();
        let mut seen: BitVec = BitVec::repeat(false, len);
        for &j in &map {
            if j >= len || seen[j] {
                return Err(PermutationError::NotABijection { len });
            }
            seen.set(j, true);
        }
        Ok(Self::from_map(map))
    }

    /// The permutation at position `rank` of the factorial-number-system ordering
    /// of `0..n`. See [`nth_permutation`].
    ///
    /// ```
    /// # use orbitswap::permutation::Permutation;
    /// assert!(Permutation::nth(5, 0).is_identity());
    /// assert_eq!(Permutation::nth(3, 5).map(), &[2, 1, 0]);
    /// ```
    pub fn nth(n: usize, rank: u128) -> Self {
        let seq: Vec<usize> = (0..n).collect();
        Permutation::from_map(nth_permutation(&seq, rank))
    }

    pub fn map(&self) -> &[usize] {
        &self.map
    }

    pub fn inv(&self) -> &[usize] {
        &self.inv
    }

    /// Image of `i`.
    #[inline]
    pub fn image(&self, i: usize) -> usize {
        self.map[i]
    }

    /// The unique `i` with `self.image(i) == j`.
    #[inline]
    pub fn preimage(&self, j: usize) -> usize {
        self.inv[j]
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a copy of `self` where the images of `i` and `j` are exchanged,
    /// keeping the inverse consistent. `transposed(i, i)` is a plain copy.
    ///
    /// ```
    /// # use orbitswap::permutation::Permutation;
    /// let p = Permutation::id(3).transposed(0, 2);
    /// assert_eq!(p.map(), &[2, 1, 0]);
    /// assert_eq!(p.inv(), &[2, 1, 0]);
    /// ```
    pub fn transposed(&self, i: usize, j: usize) -> Self {
        let mut out = self.clone();
        if i != j {
            out.map.swap(i, j);
            out.inv[out.map[i]] = i;
            out.inv[out.map[j]] = j;
        }
        out
    }

    /// Finds the disjoint cycles of the permutation.
    ///
    /// Cycles are discovered by scanning `0..n` in ascending order, each cycle
    /// starting at its smallest unvisited element and following `map`.
    /// Fixed points are returned as cycles of length one.
    ///
    /// ```
    /// # use orbitswap::permutation::Permutation;
    /// let p = Permutation::from_map(vec![2, 0, 1, 3]);
    /// assert_eq!(p.find_cycles(), vec![vec![0, 2, 1], vec![3]]);
    /// ```
    pub fn find_cycles(&self) -> Vec<Vec<usize>> {
        let mut visited: BitVec = BitVec::repeat(false, self.map.len());
        let mut cycles = Vec::new();
        for i in 0..self.map.len() {
            if visited[i] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut j = i;
            while !visited[j] {
                visited.set(j, true);
                cycle.push(j);
                j = self.map[j];
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Creates a permutation from a set of disjoint cycles, sending every
    /// element to its successor in its cycle.
    ///
    /// ```
    /// # use orbitswap::permutation::Permutation;
    /// let p = Permutation::from_disjoint_cycles(&[vec![0, 1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(p.map(), &[1, 2, 0, 4, 3]);
    ///
    /// assert!(Permutation::from_disjoint_cycles(&[vec![0, 1], vec![1, 2]]).is_err());
    /// ```
    pub fn from_disjoint_cycles(cycles: &[Vec<usize>]) -> Result<Self, PermutationError> {
        let n = cycles
            .iter()
            .flat_map(|cycle| cycle.iter())
            .max()
            .map(|&max| max + 1)
            .unwrap_or(0);

        let mut seen: BitVec = BitVec::repeat(false, n);
        for &idx in cycles.iter().flatten() {
            if seen[idx] {
                return Err(PermutationError::NotDisjoint(idx));
            }
            seen.set(idx, true);
        }

        let mut map = (0..n).collect::<Vec<_>>();
        for cycle in cycles {
            for (k, &from) in cycle.iter().enumerate() {
                map[from] = cycle[(k + 1) % cycle.len()];
            }
        }

        Ok(Permutation::from_map(map))
    }

    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, &m)| i == m)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Cycle notation first, skipping fixed points
        let mut first = true;
        for cycle in self.find_cycles().into_iter().filter(|c| c.len() > 1) {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "(")?;
            for (i, x) in cycle.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{x}")?;
            }
            write!(f, ")")?;
            first = false;
        }
        if first {
            write!(f, "()")?;
        }

        // Then one-line notation
        write!(f, " [")?;
        for (i, x) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("Cycles are not disjoint: {0} appears more than once")]
    NotDisjoint(usize),

    #[error("Mapping is not a bijection of 0..{len}")]
    NotABijection { len: usize },
}

/// `n!` as a `u128`. Exact for every `n <= 34`.
pub fn factorial(n: usize) -> u128 {
    (1..=n as u128).product()
}

/// Returns the permutation of `seq` at position `n` of the factorial number
/// system ordering, without generating the other permutations.
///
/// Items are taken from the back of `seq`; the `k`-th item taken (counting from
/// the second) is inserted at slot `n mod (k + 1)` of the partial result and
/// `n` is divided by `k + 1`. `n = 0` returns `seq` unchanged, and every
/// `n < seq.len()!` gives a distinct arrangement. Larger `n` wrap around, so
/// callers that need a strict range check it themselves.
///
/// ```
/// # use orbitswap::permutation::nth_permutation;
/// assert_eq!(nth_permutation(&[1, 2, 3, 4], 0), vec![1, 2, 3, 4]);
/// assert_eq!(nth_permutation(&[1, 2, 3, 4], 1), vec![1, 2, 4, 3]);
/// assert_eq!(nth_permutation(&[1, 2, 3, 4], 23), vec![4, 3, 2, 1]);
/// ```
pub fn nth_permutation<T: Clone>(seq: &[T], mut n: u128) -> Vec<T> {
    let mut pool = seq.to_vec();
    let Some(last) = pool.pop() else {
        return Vec::new();
    };
    let mut result = Vec::with_capacity(seq.len());
    result.push(last);

    let mut divisor: u128 = 2;
    while let Some(item) = pool.pop() {
        // slot < divisor == result.len() + 1
        let slot = (n % divisor) as usize;
        n /= divisor;
        result.insert(slot, item);
        divisor += 1;
    }
    result
}
