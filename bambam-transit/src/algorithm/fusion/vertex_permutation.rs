use crate::model::network::VertexId;

/// the composition of the vertex swaps reported while a graph store
/// reorders its vertices. once the reordering completes, [`VertexPermutation::permute`]
/// maps any vertex id from before the reordering to its id afterward.
#[derive(Debug, Clone, Default)]
pub struct VertexPermutation {
    /// new_of_old[old] = current slot of the vertex that started at `old`
    new_of_old: Vec<u32>,
    /// old_at[slot] = starting slot of the vertex currently at `slot`
    old_at: Vec<u32>,
    swaps: usize,
}

impl VertexPermutation {
    pub fn identity(size: usize) -> VertexPermutation {
        let ids = (0..size as u32).collect::<Vec<_>>();
        VertexPermutation {
            new_of_old: ids.clone(),
            old_at: ids,
            swaps: 0,
        }
    }

    /// follows one transposition of slots `v1` and `v2`.
    pub fn record_swap(&mut self, v1: VertexId, v2: VertexId) {
        if v1 == v2 || v1.is_placeholder() || v2.is_placeholder() {
            return;
        }
        self.grow(v1.as_usize().max(v2.as_usize()) + 1);
        let (a, b) = (v1.as_usize(), v2.as_usize());
        let old_a = self.old_at[a] as usize;
        let old_b = self.old_at[b] as usize;
        self.old_at.swap(a, b);
        self.new_of_old[old_a] = v2.0;
        self.new_of_old[old_b] = v1.0;
        self.swaps += 1;
    }

    /// the id of the vertex that had id `old` before the swaps. the
    /// placeholder vertex maps to itself.
    pub fn permute(&self, old: VertexId) -> VertexId {
        match self.new_of_old.get(old.as_usize()) {
            Some(new) if !old.is_placeholder() => VertexId(*new),
            _ => old,
        }
    }

    pub fn swap_count(&self) -> usize {
        self.swaps
    }

    pub fn is_identity(&self) -> bool {
        self.new_of_old
            .iter()
            .enumerate()
            .all(|(old, new)| old == *new as usize)
    }

    fn grow(&mut self, size: usize) {
        for idx in self.new_of_old.len()..size {
            self.new_of_old.push(idx as u32);
            self.old_at.push(idx as u32);
        }
    }
}
