//! Connected components of the undirected projection

use crate::graph::UndirectedGraph;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];

        if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += rank_y;
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += rank_x;
        }
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.rank[root as usize]
    }
}

/// Label every node with its connected component.
///
/// Labels are dense and assigned in order of each component's smallest
/// node index. Returns the labels and the number of components.
pub fn connected_components(graph: &UndirectedGraph) -> (Vec<usize>, usize) {
    let node_count = graph.node_count();
    let mut sets = DisjointSets::new(node_count);

    for src in 0..node_count {
        for (dst, _) in graph.neighbors(src) {
            if src < dst {
                sets.union(src as u32, dst as u32);
            }
        }
    }

    let mut root_labels: Vec<Option<usize>> = vec![None; node_count];
    let mut labels = Vec::with_capacity(node_count);
    let mut count = 0;

    for node in 0..node_count {
        let root = sets.find(node as u32) as usize;
        let label = *root_labels[root].get_or_insert_with(|| {
            count += 1;
            count - 1
        });
        labels.push(label);
    }

    (labels, count)
}
