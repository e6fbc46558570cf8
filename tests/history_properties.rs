//! Randomised checks of the two-stack history invariants
//!
//! Sequences are generated from a seeded RNG so failures are reproducible.

use filecmd::{
    CommandManager, CreateFileCommand, DeleteFileCommand, FileStore, MemoryStore,
    RenameFileCommand, UndoableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use uuid::Uuid;

const PATHS: [&str; 4] = ["a.txt", "b.txt", "c.txt", "d.txt"];

fn random_command(rng: &mut StdRng) -> Box<dyn UndoableCommand> {
    let path = PATHS[rng.gen_range(0..PATHS.len())];
    match rng.gen_range(0..3) {
        0 => Box::new(CreateFileCommand::new(path, format!("v{}", rng.gen_range(0..100)))),
        1 => Box::new(DeleteFileCommand::new(path)),
        _ => {
            let target = PATHS[rng.gen_range(0..PATHS.len())];
            Box::new(RenameFileCommand::new(path, target))
        }
    }
}

fn all_ids(manager: &CommandManager) -> Vec<Uuid> {
    manager
        .undo_history()
        .chain(manager.redo_history())
        .map(|e| e.id())
        .collect()
}

#[test]
fn test_execute_sequence_fills_undo_stack_in_order() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();
        let mut expected = Vec::new();

        for _ in 0..rng.gen_range(1..20) {
            let command = random_command(&mut rng);
            expected.push(command.description());
            // Reported failures are fine, the command is recorded anyway
            let _ = manager.execute_command(command, &mut store);
        }

        let recorded: Vec<String> = manager.undo_history().map(|e| e.description()).collect();
        assert_eq!(recorded, expected);
        assert_eq!(manager.redo_count(), 0);
        assert_eq!(manager.undo_description().as_ref(), expected.last());
    }
}

#[test]
fn test_commands_are_never_lost_or_duplicated() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut manager = CommandManager::new();
    let mut store = MemoryStore::new();
    let mut created = 0usize;

    for _ in 0..2_000 {
        match rng.gen_range(0..4) {
            0 | 1 => {
                let redo_before = manager.redo_count();
                let _ = manager.execute_command(random_command(&mut rng), &mut store);
                created += 1;
                assert_eq!(manager.redo_count(), 0);
                // Truncated redo entries are the only ones that disappear
                created -= redo_before;
            }
            2 => {
                let (undo, redo) = (manager.undo_count(), manager.redo_count());
                let result = manager.undo(&mut store);
                if undo == 0 {
                    assert!(result.is_err());
                    assert_eq!((manager.undo_count(), manager.redo_count()), (0, redo));
                } else {
                    assert_eq!((manager.undo_count(), manager.redo_count()), (undo - 1, redo + 1));
                }
            }
            _ => {
                let (undo, redo) = (manager.undo_count(), manager.redo_count());
                let result = manager.redo(&mut store);
                if redo == 0 {
                    assert!(result.is_err());
                    assert_eq!((manager.undo_count(), manager.redo_count()), (undo, 0));
                } else {
                    assert_eq!((manager.undo_count(), manager.redo_count()), (undo + 1, redo - 1));
                }
            }
        }

        let ids = all_ids(&manager);
        let unique: HashSet<Uuid> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "an entry is held by both stacks");
        assert_eq!(ids.len(), created);
    }
}

#[test]
fn test_undo_all_then_redo_all_reproduces_store() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..30 {
        let mut manager = CommandManager::new();
        let mut store = MemoryStore::new();
        store.create("a.txt", "seed a").unwrap();
        store.create("b.txt", "seed b").unwrap();

        // Only successful creates and renames, whose inverses are exact
        for _ in 0..10 {
            let command: Box<dyn UndoableCommand> = if rng.gen_bool(0.5) {
                let path = PATHS[rng.gen_range(0..PATHS.len())];
                if store.exists(path) {
                    continue;
                }
                Box::new(CreateFileCommand::new(path, "new"))
            } else {
                let existing = store.paths().unwrap();
                let free: Vec<&str> = PATHS
                    .iter()
                    .copied()
                    .filter(|p| !store.exists(p))
                    .collect();
                if existing.is_empty() || free.is_empty() {
                    continue;
                }
                let from = existing[rng.gen_range(0..existing.len())].clone();
                let to = free[rng.gen_range(0..free.len())];
                Box::new(RenameFileCommand::new(from, to))
            };
            manager.execute_command(command, &mut store).unwrap();
        }

        let final_state = store.clone();
        let count = manager.undo_count();

        for _ in 0..count {
            manager.undo(&mut store).unwrap();
        }
        assert_eq!(manager.redo_count(), count);

        for _ in 0..count {
            manager.redo(&mut store).unwrap();
        }
        assert_eq!(store, final_state);
        assert_eq!(manager.undo_count(), count);
    }
}
