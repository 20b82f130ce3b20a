// Snapshot management for external step-back

use num_bigint::BigInt;

use crate::grid::direction::Direction;
use crate::grid::point::PointAxial;
use crate::interpreter::errors::Termination;
use crate::memory::Memory;

/// Deep copy of engine execution state, taken before a step so the step
/// can be undone. The source grid and input text are excluded: they only
/// change through explicit caller mutation, never through stepping.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub ips: [PointAxial; 6],
    pub ip_dirs: [Direction; 6],
    pub active_ip: usize,
    pub ticks: u64,
    pub memory: Memory,
    pub output: Vec<u8>,
    pub input_position: usize,
    pub termination: Option<Termination>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes.
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: a map slot plus a typical small BigInt per edge.
        let memory_size = self.memory.edge_count() * (std::mem::size_of::<BigInt>() + 32);
        memory_size + self.output.len() + std::mem::size_of::<Snapshot>()
    }
}

/// Bounded history of snapshots for reverse execution.
#[derive(Debug, Default)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history.
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        let snapshot = self.snapshots.pop()?;
        self.current_memory -= snapshot.estimated_size();
        Some(snapshot)
    }

    /// Discard history past `len` snapshots, e.g. the redo tail after
    /// stepping forward from a rewound position.
    pub fn truncate(&mut self, len: usize) {
        while self.snapshots.len() > len {
            self.pop();
        }
    }

    /// Get a snapshot by index.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Current estimated memory usage.
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Memory limit.
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::source::SourceCode;
    use crate::interpreter::engine::Interpreter;

    #[test]
    fn manager_accounts_for_memory() {
        let engine = Interpreter::new(SourceCode::from_string("abc"), "");
        let mut manager = SnapshotManager::new(1024 * 1024);
        manager.push(engine.snapshot()).unwrap();
        manager.push(engine.snapshot()).unwrap();
        assert_eq!(manager.len(), 2);
        assert!(manager.memory_usage() > 0);
        manager.truncate(1);
        assert_eq!(manager.len(), 1);
        manager.pop().unwrap();
        assert!(manager.is_empty());
        assert_eq!(manager.memory_usage(), 0);
    }

    #[test]
    fn tiny_limit_rejects_pushes() {
        let engine = Interpreter::new(SourceCode::from_string("abc"), "");
        let mut manager = SnapshotManager::new(1);
        assert!(manager.push(engine.snapshot()).is_err());
        assert_eq!(manager.len(), 0);
    }
}
