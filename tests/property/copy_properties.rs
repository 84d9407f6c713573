// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Deep Copy
//!
//! Random aggregates are copied and the result compared against structure
//! snapshots taken before and after:
//! - the original never changes
//! - copy and original share no identity
//! - every copied entity points back at an entity of the original
//! - slot locations, member counts and member order survive

use cim_domain_model::{
    copy, Entity, EntityId, OrderedEntities, SlotValue, StructureSnapshot,
};
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

use crate::fixtures::{Approval, Order, OrderLine, Part, Shipment, Tag};

// ============================================================================
// Aggregate Generation
// ============================================================================

/// Shape of a generated order
#[derive(Debug, Clone)]
struct OrderShape {
    parts_per_line: Vec<usize>,
    tags: usize,
    approvals: usize,
    shipped: bool,
    backorders: Option<usize>,
}

fn order_shape() -> impl Strategy<Value = OrderShape> {
    (
        prop::collection::vec(0usize..4, 0..5),
        0usize..4,
        0usize..3,
        any::<bool>(),
        prop::option::of(0usize..3),
    )
        .prop_map(
            |(parts_per_line, tags, approvals, shipped, backorders)| OrderShape {
                parts_per_line,
                tags,
                approvals,
                shipped,
                backorders,
            },
        )
}

fn line_with_parts(parts: usize) -> OrderLine {
    OrderLine::new(EntityId::new(), 1)
        .with_parts((0..parts).map(|n| Part::new(EntityId::new(), &format!("SKU-{}", n))))
}

fn build_order(shape: &OrderShape) -> Order {
    let mut order = Order::new(EntityId::new(), "generated");

    for parts in &shape.parts_per_line {
        order
            .lines
            .add(line_with_parts(*parts))
            .expect("Generated line ids are unique");
    }
    for n in 0..shape.tags {
        order
            .tags
            .add(Tag::new(EntityId::new(), &format!("tag-{}", n)))
            .expect("Generated tag ids are unique");
    }
    for n in 0..shape.approvals {
        order
            .audit
            .approvals
            .add(Approval::new(EntityId::new(), &format!("approver-{}", n)))
            .expect("Generated approval ids are unique");
    }
    if shape.shipped {
        order.shipment = Some(Shipment::new(EntityId::new(), "UPS"));
    }
    if let Some(count) = shape.backorders {
        let backorders = OrderedEntities::from_members((0..count).map(|_| line_with_parts(1)))
            .expect("Generated backorder ids are unique");
        order.backorders = Some(backorders);
    }
    order
}

fn identity_set(snapshot: &StructureSnapshot) -> HashSet<Uuid> {
    snapshot.identities().into_iter().collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Copying never modifies the original
    #[test]
    fn prop_original_unchanged(shape in order_shape()) {
        let original = build_order(&shape);
        let before = StructureSnapshot::capture(&original);

        let _copy = copy(&original).unwrap();

        prop_assert_eq!(StructureSnapshot::capture(&original), before);
    }

    /// Copy and original share no identity
    #[test]
    fn prop_identities_disjoint(shape in order_shape()) {
        let original = build_order(&shape);
        let copy = copy(&original).unwrap();

        let before = identity_set(&StructureSnapshot::capture(&original));
        let after = identity_set(&StructureSnapshot::capture(&copy));

        prop_assert_eq!(before.len(), after.len());
        prop_assert!(before.is_disjoint(&after));
    }

    /// Every copied entity is flagged and points back into the original
    #[test]
    fn prop_origins_recorded(shape in order_shape()) {
        let original = build_order(&shape);
        let copy = copy(&original).unwrap();

        let before = identity_set(&StructureSnapshot::capture(&original));
        let after = StructureSnapshot::capture(&copy);

        let mut origins = HashSet::new();
        for (_, value) in after.iter() {
            if let SlotValue::Entity(mark) = value {
                prop_assert!(mark.copied);
                let origin = mark.original_id.unwrap();
                prop_assert!(before.contains(&origin));
                origins.insert(origin);
            }
        }
        prop_assert_eq!(origins, before);
    }

    /// Locations, counts and order of ordered collections survive
    #[test]
    fn prop_shape_preserved(shape in order_shape()) {
        let original = build_order(&shape);
        let copy = copy(&original).unwrap();

        let before = StructureSnapshot::capture(&original);
        let after = StructureSnapshot::capture(&copy);
        prop_assert_eq!(
            after.locations().collect::<Vec<_>>(),
            before.locations().collect::<Vec<_>>()
        );

        let origins: Vec<Uuid> = copy
            .lines
            .iter()
            .filter_map(|line| line.original_id().map(|id| id.as_uuid()))
            .collect();
        let ids: Vec<Uuid> = original.lines.iter().map(|line| line.id().as_uuid()).collect();
        prop_assert_eq!(origins, ids);

        let part_counts: Vec<usize> = copy.lines.iter().map(|line| line.parts.len()).collect();
        prop_assert_eq!(part_counts, shape.parts_per_line.clone());
        prop_assert_eq!(copy.tags.len(), shape.tags);
        prop_assert_eq!(copy.shipment.is_some(), shape.shipped);
        prop_assert_eq!(copy.backorders.as_ref().map(|b| b.len()), shape.backorders);
    }
}
