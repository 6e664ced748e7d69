use std::convert::TryFrom as _;

/// Element index is outside of the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Element {index} is out of range for {len} elements")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Disjoint sets over elements `0..len`.
///
/// Uses union by size and path compression.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parents: Vec<u32>,
    sizes: Vec<u32>,
    sets: usize,
}

impl UnionFind {
    /// Creates `len` singleton sets.
    ///
    /// # Panics
    ///
    /// Panics if `len` does not fit into `u32`.
    pub fn new(len: usize) -> Self {
        let count = u32::try_from(len).expect("Too many elements");
        UnionFind {
            parents: (0..count).collect(),
            sizes: vec![1; len],
            sets: len,
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Returns representative of the set containing `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is out of range.
    /// That means topology fed into segmentation is broken.
    pub fn find(&mut self, x: usize) -> usize {
        match self.try_find(x) {
            Ok(root) => root,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_find(&mut self, x: usize) -> Result<usize, OutOfRange> {
        self.check(x)?;

        let mut root = x;
        while self.parents[root] as usize != root {
            root = self.parents[root] as usize;
        }

        let mut node = x;
        while node != root {
            let next = self.parents[node] as usize;
            self.parents[node] = root as u32;
            node = next;
        }

        Ok(root)
    }

    /// Merges sets containing `x` and `y`.
    /// Returns `false` if they were already joined.
    ///
    /// # Panics
    ///
    /// Panics if either element is out of range.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let x = self.find(x);
        let y = self.find(y);
        if x == y {
            return false;
        }

        let (big, small) = if self.sizes[x] < self.sizes[y] {
            (y, x)
        } else {
            (x, y)
        };

        self.parents[small] = big as u32;
        self.sizes[big] += self.sizes[small];
        self.sets -= 1;
        true
    }

    pub fn same(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of elements in the set containing `x`.
    pub fn set_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.sizes[root] as usize
    }

    /// Representative of every element, in element order.
    pub fn representatives(&mut self) -> Vec<usize> {
        (0..self.len()).map(|x| self.find(x)).collect()
    }

    fn check(&self, x: usize) -> Result<(), OutOfRange> {
        if x < self.parents.len() {
            Ok(())
        } else {
            Err(OutOfRange {
                index: x,
                len: self.parents.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, rand::Rng as _, rand::SeedableRng as _};

    /// Connected components by flood fill, labelled with the smallest
    /// member.
    fn flood_fill_components(len: usize, edges: &[(usize, usize)]) -> Vec<usize> {
        let mut labels: Vec<Option<usize>> = vec![None; len];
        for start in 0..len {
            if labels[start].is_some() {
                continue;
            }
            let mut stack = vec![start];
            labels[start] = Some(start);
            while let Some(v) = stack.pop() {
                for &(a, b) in edges {
                    let other = if a == v {
                        b
                    } else if b == v {
                        a
                    } else {
                        continue;
                    };
                    if labels[other].is_none() {
                        labels[other] = Some(start);
                        stack.push(other);
                    }
                }
            }
        }
        labels.into_iter().map(|l| l.unwrap()).collect()
    }

    #[test]
    fn singletons() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.set_count(), 4);
        for i in 0..4 {
            assert_eq!(uf.find(i), i);
            assert_eq!(uf.set_size(i), 1);
        }
    }

    #[test]
    fn union_merges_and_reports() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 1));
        assert!(uf.union(3, 4));
        assert!(!uf.union(1, 0));
        assert!(uf.union(1, 4));

        assert_eq!(uf.set_count(), 2);
        assert!(uf.same(0, 3));
        assert!(!uf.same(2, 0));
        assert_eq!(uf.set_size(4), 4);
        assert_eq!(uf.set_size(2), 1);
    }

    #[test]
    fn representative_is_one_of_inputs() {
        let mut uf = UnionFind::new(6);
        uf.union(0, 1);
        uf.union(2, 3);
        let (a, b) = (uf.find(0), uf.find(2));
        uf.union(1, 3);
        let merged = uf.find(3);
        assert!(merged == a || merged == b);
    }

    #[test]
    fn out_of_range_is_reported() {
        let mut uf = UnionFind::new(3);
        assert_eq!(uf.try_find(3), Err(OutOfRange { index: 3, len: 3 }));
        assert_eq!(uf.try_find(2), Ok(2));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn find_out_of_range_panics() {
        let mut uf = UnionFind::new(3);
        uf.find(7);
    }

    #[test]
    fn matches_reachability() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let len = rng.gen_range(1..24);
            let edges: Vec<_> = (0..rng.gen_range(0..len * 2))
                .map(|_| (rng.gen_range(0..len), rng.gen_range(0..len)))
                .collect();

            let mut uf = UnionFind::new(len);
            for &(a, b) in &edges {
                uf.union(a, b);
            }

            let expected = flood_fill_components(len, &edges);
            for x in 0..len {
                for y in 0..len {
                    assert_eq!(
                        uf.same(x, y),
                        expected[x] == expected[y],
                        "{} and {} with edges {:?}",
                        x,
                        y,
                        edges
                    );
                }
            }

            let mut labels = expected.clone();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(uf.set_count(), labels.len());
        }
    }

    #[test]
    fn finds_do_not_change_partition() {
        let mut uf = UnionFind::new(10);
        for &(a, b) in &[(0, 1), (1, 2), (2, 3), (5, 6), (7, 5), (9, 8)] {
            uf.union(a, b);
        }

        let classes = |uf: &mut UnionFind| {
            let reps = uf.representatives();
            (0..10)
                .map(|x| (0..10).filter(|&y| reps[x] == reps[y]).collect())
                .collect::<Vec<Vec<usize>>>()
        };

        let before = classes(&mut uf);
        for round in 0..5 {
            for x in (0..10).rev() {
                uf.find((x + round) % 10);
            }
        }
        assert_eq!(classes(&mut uf), before);
        assert_eq!(uf.set_count(), 4);
    }
}
