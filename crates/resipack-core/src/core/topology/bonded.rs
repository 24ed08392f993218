use nalgebra::DMatrix;
use std::collections::VecDeque;
use tracing::warn;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds sorted, deduplicated neighbor lists from undirected bond pairs.
/// Bonds with an endpoint outside `system_size` and self-bonds are skipped.
pub fn bonded_neighbors(bonds: &[[usize; 2]], system_size: usize) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::new(); system_size];
    for &[i, j] in bonds {
        if i >= system_size || j >= system_size {
            warn!(i, j, system_size, "Ignoring bond outside the system.");
            continue;
        }
        if i == j {
            continue;
        }
        neighbors[i].push(j);
        neighbors[j].push(i);
    }
    for list in &mut neighbors {
        list.sort_unstable();
        list.dedup();
    }
    neighbors
}

fn path_lengths_from(neighbors: &[Vec<usize>], source: usize) -> Vec<f32> {
    let mut distance = vec![f32::INFINITY; neighbors.len()];
    let mut queue = VecDeque::new();
    distance[source] = 0.0;
    queue.push_back(source);
    while let Some(current) = queue.pop_front() {
        let next = distance[current] + 1.0;
        for &neighbor in &neighbors[current] {
            if distance[neighbor].is_infinite() {
                distance[neighbor] = next;
                queue.push_back(neighbor);
            }
        }
    }
    distance
}

/// All-pairs shortest path length over the undirected, unweighted bond graph.
///
/// Disconnected pairs are `+inf`; the diagonal is zero.
pub fn bonded_path_length(bonds: &[[usize; 2]], system_size: usize) -> DMatrix<f32> {
    let neighbors = bonded_neighbors(bonds, system_size);

    #[cfg(not(feature = "parallel"))]
    let iterator = 0..system_size;

    #[cfg(feature = "parallel")]
    let iterator = (0..system_size).into_par_iter();

    let rows: Vec<Vec<f32>> = iterator
        .map(|source| path_lengths_from(&neighbors, source))
        .collect();

    DMatrix::from_fn(system_size, system_size, |i, j| rows[i][j])
}

/// `true` where an atom type is present; padding and dropped atoms are `false`.
pub fn real_atoms_mask(atom_types: &[Option<String>]) -> Vec<bool> {
    atom_types.iter().map(Option::is_some).collect()
}

/// Bond graph of one scoring session with its derived path-length matrix.
#[derive(Debug, Clone)]
pub struct BondedAtomTopology {
    pub system_size: usize,
    pub atom_types: Vec<Option<String>>,
    pub bonds: Vec<[usize; 2]>,
    pub path_length: DMatrix<f32>,
}

impl BondedAtomTopology {
    pub fn new(atom_types: Vec<Option<String>>, bonds: Vec<[usize; 2]>) -> Self {
        let system_size = atom_types.len();
        let path_length = bonded_path_length(&bonds, system_size);
        Self {
            system_size,
            atom_types,
            bonds,
            path_length,
        }
    }

    pub fn real_atoms(&self) -> Vec<bool> {
        real_atoms_mask(&self.atom_types)
    }

    pub fn atom_type(&self, index: usize) -> Option<&str> {
        self.atom_types.get(index)?.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_path_length_properties(d: &DMatrix<f32>, bonds: &[[usize; 2]]) {
        let n = d.nrows();
        let mut component: Vec<usize> = (0..n).collect();
        fn find(c: &mut Vec<usize>, i: usize) -> usize {
            if c[i] != i {
                let root = find(c, c[i]);
                c[i] = root;
            }
            c[i]
        }
        for &[i, j] in bonds {
            let (ri, rj) = (find(&mut component, i), find(&mut component, j));
            component[ri] = rj;
        }

        for i in 0..n {
            assert_eq!(d[(i, i)], 0.0);
            for j in 0..n {
                assert_eq!(d[(i, j)], d[(j, i)]);
                let connected = find(&mut component, i) == find(&mut component, j);
                assert_eq!(d[(i, j)].is_finite(), connected, "({i}, {j})");
                for k in 0..n {
                    if d[(i, k)].is_finite() && d[(k, j)].is_finite() {
                        assert!(d[(i, j)] <= d[(i, k)] + d[(k, j)]);
                    }
                }
            }
        }
    }

    #[test]
    fn linear_chain_has_hop_count_distances() {
        let bonds = [[0, 1], [1, 2], [2, 3]];
        let d = bonded_path_length(&bonds, 4);
        assert_eq!(d[(0, 3)], 3.0);
        assert_eq!(d[(1, 3)], 2.0);
        assert_eq!(d[(2, 1)], 1.0);
        assert_path_length_properties(&d, &bonds);
    }

    #[test]
    fn ring_takes_the_shorter_way_round() {
        let bonds = [[0, 1], [1, 2], [2, 3], [3, 4], [4, 5], [5, 0]];
        let d = bonded_path_length(&bonds, 6);
        assert_eq!(d[(0, 3)], 3.0);
        assert_eq!(d[(0, 4)], 2.0);
        assert_eq!(d[(1, 5)], 2.0);
        assert_path_length_properties(&d, &bonds);
    }

    #[test]
    fn disconnected_components_are_infinitely_far_apart() {
        let bonds = [[0, 1], [2, 3], [3, 4]];
        let d = bonded_path_length(&bonds, 7);
        assert!(d[(0, 2)].is_infinite());
        assert!(d[(5, 6)].is_infinite());
        assert_eq!(d[(5, 5)], 0.0);
        assert_eq!(d[(2, 4)], 2.0);
        assert_path_length_properties(&d, &bonds);
    }

    #[test]
    fn atoms_without_bonds_are_tolerated() {
        let d = bonded_path_length(&[], 3);
        assert_eq!(d.nrows(), 3);
        assert_eq!(d[(1, 1)], 0.0);
        assert!(d[(0, 1)].is_infinite());

        let empty = bonded_path_length(&[], 0);
        assert_eq!(empty.nrows(), 0);
    }

    #[test]
    fn duplicate_reversed_and_out_of_range_bonds_are_harmless() {
        let bonds = [[0, 1], [1, 0], [0, 1], [1, 2], [2, 9], [2, 2]];
        let d = bonded_path_length(&bonds, 3);
        assert_eq!(d[(0, 2)], 2.0);
        assert_eq!(bonded_neighbors(&bonds, 3)[1], vec![0, 2]);
    }

    #[test]
    fn real_atoms_mask_marks_typed_slots() {
        let types = vec![Some("Nbb".to_string()), None, Some("CAbb".to_string()), None];
        assert_eq!(real_atoms_mask(&types), vec![true, false, true, false]);
    }

    #[test]
    fn topology_bundles_types_bonds_and_path_lengths() {
        let topology = BondedAtomTopology::new(
            vec![Some("A".into()), Some("B".into()), None],
            vec![[0, 1]],
        );
        assert_eq!(topology.system_size, 3);
        assert_eq!(topology.path_length[(0, 1)], 1.0);
        assert!(topology.path_length[(0, 2)].is_infinite());
        assert_eq!(topology.real_atoms(), vec![true, true, false]);
        assert_eq!(topology.atom_type(1), Some("B"));
        assert_eq!(topology.atom_type(2), None);
        assert_eq!(topology.atom_type(5), None);
    }
}
