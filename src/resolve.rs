//! Collision resolution: make every rendered name in the batch unique.
//!
//! Descriptors are stable-sorted by base name. Within each run of identical
//! base names, the first keeps the bare name and the rest get `_1`, `_2`, ...
//! in sorted order. A generated name that would clash with a real base name
//! (a method literally called `Log_1`) or with an earlier generated name is
//! bumped to the next free suffix.

use crate::model::{FunctionDescriptor, Record};
use std::collections::HashSet;

/// Assign suffixes so that all rendered names are pairwise distinct.
///
/// The returned order is the emission order.
pub fn resolve(functions: Vec<FunctionDescriptor>) -> Vec<FunctionDescriptor> {
    let mut keyed: Vec<(String, FunctionDescriptor)> = functions
        .into_iter()
        .map(|f| (f.base_name(), f))
        .collect();
    // stable: equal names keep file-processing order
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut taken: HashSet<String> = keyed.iter().map(|(base, _)| base.clone()).collect();
    let mut resolved = Vec::with_capacity(keyed.len());
    let mut run_base: Option<String> = None;
    let mut last_suffix = 0u32;

    for (base, mut func) in keyed {
        if run_base.as_deref() == Some(base.as_str()) {
            let mut suffix = last_suffix + 1;
            let mut candidate = suffixed(&base, suffix);
            while taken.contains(&candidate) {
                suffix += 1;
                candidate = suffixed(&base, suffix);
            }
            taken.insert(candidate);
            func.suffix = suffix;
            last_suffix = suffix;
        } else {
            func.suffix = 0;
            last_suffix = 0;
            run_base = Some(base);
        }
        resolved.push(func);
    }

    resolved
}

fn suffixed(base: &str, suffix: u32) -> String {
    format!("{}_{}", base, suffix)
}

/// Flatten resolved descriptors into `(address, name)` records.
pub fn to_records(functions: &[FunctionDescriptor]) -> Vec<Record> {
    functions.iter().map(FunctionDescriptor::to_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Accessor, DEFAULT_SEPARATOR};

    fn func(type_name: &str, name: &str, address: u64) -> FunctionDescriptor {
        let mut f = FunctionDescriptor::new(type_name, DEFAULT_SEPARATOR);
        f.push_segment(name);
        f.set_address(address);
        f.complete = true;
        f
    }

    fn names(functions: &[FunctionDescriptor]) -> Vec<String> {
        functions.iter().map(|f| f.name()).collect()
    }

    fn assert_unique(functions: &[FunctionDescriptor]) {
        let mut seen = HashSet::new();
        for name in names(functions) {
            assert!(seen.insert(name.clone()), "duplicate name {name}");
        }
    }

    #[test]
    fn distinct_names_are_sorted_without_suffix() {
        let resolved = resolve(vec![
            func("Player", "Update", 0x20),
            func("Enemy", "Awake", 0x30),
            func("Player", "Awake", 0x10),
        ]);
        assert_eq!(names(&resolved), vec!["Enemy.Awake", "Player.Awake", "Player.Update"]);
        assert!(resolved.iter().all(|f| f.suffix == 0));
    }

    #[test]
    fn duplicate_across_files() {
        let resolved = resolve(vec![func("Utils", "Log", 0x100), func("Utils", "Log", 0x200)]);
        assert_eq!(names(&resolved), vec!["Utils.Log", "Utils.Log_1"]);
        // stable: first encountered keeps the bare name
        assert_eq!(resolved[0].address, 0x100);
        assert_eq!(resolved[1].address, 0x200);
    }

    #[test]
    fn run_suffixes_increase() {
        let resolved = resolve(vec![
            func("A", "f", 1),
            func("A", "f", 2),
            func("A", "f", 3),
            func("A", "g", 4),
        ]);
        assert_eq!(names(&resolved), vec!["A.f", "A.f_1", "A.f_2", "A.g"]);
    }

    #[test]
    fn long_runs_stay_unique() {
        let input: Vec<_> = (1..=12).map(|i| func("Utils", "Log", i)).collect();
        let resolved = resolve(input);
        let suffixes: Vec<u32> = resolved.iter().map(|f| f.suffix).collect();
        assert_eq!(suffixes, (0..12).collect::<Vec<u32>>());
        assert_unique(&resolved);
    }

    #[test]
    fn generated_name_skips_real_method_name() {
        let resolved = resolve(vec![
            func("A", "f", 1),
            func("A", "f", 2),
            func("A", "f_1", 3),
        ]);
        assert_unique(&resolved);
        let by_address = |addr: u64| resolved.iter().find(|f| f.address == addr).unwrap().name();
        assert_eq!(by_address(1), "A.f");
        assert_eq!(by_address(2), "A.f_2");
        assert_eq!(by_address(3), "A.f_1");
    }

    #[test]
    fn interleaved_accessor_names_do_not_collide() {
        // "A.f.get" sorts between "A.f" and "A.f_1"
        let mut getter = func("A", "f", 3);
        getter.set_accessor(Accessor::Get);
        let resolved = resolve(vec![
            func("A", "f", 1),
            func("A", "f", 2),
            getter,
            func("A", "f_1", 4),
        ]);
        assert_unique(&resolved);
        assert_eq!(resolved.len(), 4);
    }

    #[test]
    fn accessor_pairs_are_distinct() {
        let mut get = func("Player", "Health", 0x200);
        get.set_accessor(Accessor::Get);
        let mut set = func("Player", "Health", 0x200);
        set.set_accessor(Accessor::Set);
        let resolved = resolve(vec![set, get]);
        assert_eq!(names(&resolved), vec!["Player.Health.get", "Player.Health.set"]);
    }

    #[test]
    fn stale_suffix_is_reset() {
        let mut f = func("A", "f", 1);
        f.suffix = 7;
        let resolved = resolve(vec![f]);
        assert_eq!(names(&resolved), vec!["A.f"]);
    }

    #[test]
    fn records_follow_resolved_order() {
        let resolved = resolve(vec![func("B", "x", 2), func("A", "x", 1)]);
        let records = to_records(&resolved);
        assert_eq!(
            records,
            vec![
                Record { address: 1, name: "A.x".to_string() },
                Record { address: 2, name: "B.x".to_string() },
            ]
        );
    }

    #[test]
    fn empty_batch() {
        assert!(resolve(Vec::new()).is_empty());
    }
}
