use super::*;
use crate::HierarchyBuilder;
use pretty_assertions::assert_eq;

fn idx(h: &TypeHierarchy, name: &str) -> TypeIdx {
    h.lookup(name).expect("declared type")
}

/// Error ── IoError ── TimeoutError ── ConnectionRefusedError
/// TimeoutError implements Retryable; Retryable extends Transient.
/// Unrelated is a separate root.
fn io_hierarchy() -> TypeHierarchy {
    let mut b = HierarchyBuilder::new();
    b.class("Error", None, &[]).expect("Error");
    b.interface("Transient", &[]).expect("Transient");
    b.interface("Retryable", &["Transient"]).expect("Retryable");
    b.class("IoError", Some("Error"), &[]).expect("IoError");
    b.class("TimeoutError", Some("IoError"), &["Retryable"])
        .expect("TimeoutError");
    b.class("ConnectionRefusedError", Some("TimeoutError"), &[])
        .expect("ConnectionRefusedError");
    b.class("Unrelated", None, &[]).expect("Unrelated");
    b.build()
}

/// A linear superclass chain `C0 <- C1 <- ... <- C{len-1}`.
fn chain(len: usize) -> TypeHierarchy {
    let mut b = HierarchyBuilder::new();
    b.class("C0", None, &[]).expect("root");
    for i in 1..len {
        let parent = format!("C{}", i - 1);
        b.class(&format!("C{i}"), Some(parent.as_str()), &[])
            .expect("chain link");
    }
    b.build()
}

#[test]
fn same_type_is_zero() {
    let h = io_hierarchy();
    let eval = GraphDistance::default();
    let io = idx(&h, "IoError");
    assert_eq!(eval.distance_default(&h, io, io), Distance::ZERO);
    // Even a zero budget finds the type itself.
    assert_eq!(eval.distance(&h, io, io, 0), Distance::ZERO);
}

#[test]
fn counts_superclass_edges() {
    let h = io_hierarchy();
    let eval = GraphDistance::default();
    let refused = idx(&h, "ConnectionRefusedError");
    assert_eq!(
        eval.distance_default(&h, refused, idx(&h, "TimeoutError")),
        Distance::Edges(1)
    );
    assert_eq!(
        eval.distance_default(&h, refused, idx(&h, "IoError")),
        Distance::Edges(2)
    );
    assert_eq!(
        eval.distance_default(&h, refused, idx(&h, "Error")),
        Distance::Edges(3)
    );
}

#[test]
fn counts_interface_edges() {
    let h = io_hierarchy();
    let eval = GraphDistance::default();
    let refused = idx(&h, "ConnectionRefusedError");
    assert_eq!(
        eval.distance_default(&h, refused, idx(&h, "Retryable")),
        Distance::Edges(2)
    );
    assert_eq!(
        eval.distance_default(&h, refused, idx(&h, "Transient")),
        Distance::Edges(3)
    );
}

#[test]
fn unrelated_types_are_unreachable() {
    let h = io_hierarchy();
    let eval = GraphDistance::default();
    assert_eq!(
        eval.distance_default(&h, idx(&h, "IoError"), idx(&h, "Unrelated")),
        Distance::Unreachable
    );
    // Supertype to subtype is not a subtype relation.
    assert_eq!(
        eval.distance_default(&h, idx(&h, "Error"), idx(&h, "IoError")),
        Distance::Unreachable
    );
}

#[test]
fn superclass_only_mode_skips_interfaces() {
    let h = io_hierarchy();
    let eval = GraphDistance::new(TraversalMode::SUPERCLASS);
    let timeout = idx(&h, "TimeoutError");
    let retryable = idx(&h, "Retryable");

    assert!(h.is_assignable(timeout, retryable));
    assert_eq!(eval.distance_default(&h, timeout, retryable), Distance::Unreachable);
    assert_eq!(
        eval.distance_default(&h, timeout, idx(&h, "Error")),
        Distance::Edges(2)
    );
}

#[test]
fn interfaces_only_mode_skips_superclasses() {
    let h = io_hierarchy();
    let eval = GraphDistance::new(TraversalMode::INTERFACES);
    let refused = idx(&h, "ConnectionRefusedError");

    assert_eq!(
        eval.distance_default(&h, refused, idx(&h, "TimeoutError")),
        Distance::Unreachable
    );
    // Directly declared interfaces are still reachable.
    assert_eq!(
        eval.distance_default(&h, idx(&h, "TimeoutError"), idx(&h, "Transient")),
        Distance::Edges(2)
    );
}

#[test]
fn empty_mode_follows_everything() {
    let eval = GraphDistance::new(TraversalMode::empty());
    assert_eq!(eval.mode(), TraversalMode::all());
}

#[test]
fn depth_budget_bounds_the_search() {
    let h = chain(6);
    let eval = GraphDistance::default();
    let leaf = idx(&h, "C5");
    let root = idx(&h, "C0");

    assert_eq!(eval.distance(&h, leaf, root, 5), Distance::Edges(5));
    assert_eq!(eval.distance(&h, leaf, root, 4), Distance::Unreachable);
    assert_eq!(eval.distance(&h, leaf, root, 0), Distance::Unreachable);

    let shallow = GraphDistance::default().with_max_depth(3);
    assert_eq!(shallow.default_max_depth(), 3);
    assert_eq!(shallow.distance_default(&h, leaf, root), Distance::Unreachable);
    assert_eq!(
        shallow.distance_default(&h, leaf, idx(&h, "C2")),
        Distance::Edges(3)
    );
}

#[test]
fn picks_the_shortest_of_several_paths() {
    // Leaf reaches Top directly through Top and indirectly through Mid.
    let mut b = HierarchyBuilder::new();
    b.interface("Top", &[]).expect("Top");
    b.interface("Mid", &["Top"]).expect("Mid");
    b.class("Base", None, &["Mid"]).expect("Base");
    b.class("Leaf", Some("Base"), &["Top"]).expect("Leaf");
    let h = b.build();

    let eval = GraphDistance::default();
    assert_eq!(
        eval.distance_default(&h, idx(&h, "Leaf"), idx(&h, "Top")),
        Distance::Edges(1)
    );
    let superclass_only = GraphDistance::new(TraversalMode::SUPERCLASS);
    assert_eq!(
        superclass_only.distance_default(&h, idx(&h, "Leaf"), idx(&h, "Top")),
        Distance::Unreachable
    );
}

#[test]
fn memoized_search_matches_plain_search_on_diamonds() {
    // A stack of diamonds: every level doubles the number of paths.
    let mut b = HierarchyBuilder::new();
    b.interface("D0", &[]).expect("D0");
    for level in 1..=12 {
        let below = format!("D{}", level - 1);
        let left = format!("L{level}");
        let right = format!("R{level}");
        b.interface(&left, &[below.as_str()]).expect("left");
        b.interface(&right, &[below.as_str()]).expect("right");
        b.interface(&format!("D{level}"), &[left.as_str(), right.as_str()])
            .expect("join");
    }
    b.class("Leaf", None, &["D12"]).expect("Leaf");
    let h = b.build();

    let plain = GraphDistance::default();
    let memo = GraphDistance::default().with_memoization(true);
    assert!(memo.is_memoized());

    let leaf = idx(&h, "Leaf");
    for (base, _) in h.iter() {
        for depth in [0, 5, 24, 25, DEFAULT_MAX_DEPTH] {
            assert_eq!(
                plain.distance(&h, leaf, base, depth),
                memo.distance(&h, leaf, base, depth),
                "base {base:?} depth {depth}"
            );
        }
    }
    assert_eq!(
        memo.distance_default(&h, leaf, idx(&h, "D0")),
        Distance::Edges(25)
    );
}

#[test]
fn distance_ordering_and_display() {
    assert!(Distance::Edges(u32::MAX) < Distance::Unreachable);
    assert!(Distance::Edges(1) < Distance::Edges(2));
    assert_eq!(Distance::Edges(3).edges(), Some(3));
    assert_eq!(Distance::Unreachable.edges(), None);
    assert!(!Distance::Unreachable.is_reachable());
    assert_eq!(Distance::Edges(4).to_string(), "4");
    assert_eq!(Distance::Unreachable.to_string(), "unreachable");
}
