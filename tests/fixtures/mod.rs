// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-domain-model
//!
//! A small order-management domain model covering every slot kind the copy
//! engine knows, plus entities built to make the engine fail on purpose.
//!
//! # Design Principles
//! - All identities are fixed constants unless a test asks for fresh ones
//! - The reference date for date checks is fixed, never `Utc::now()`
//! - Fixtures are the only place that declares entity structures

#![allow(dead_code)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use uuid::Uuid;

use cim_domain_model::validation::{checks, constraint};
use cim_domain_model::{
    entity_structure, impl_entity_equality, AggregateRoot, DomainEvent, DomainEventCollector,
    DomainResult, Entities, Entity, EntityCollection, EntityHeader, EntityId, EntityIds,
    ErrorCode, EventSource, Identity, OrderedEntities, Parameter, Validation, ValueObject,
    ValueObjects,
};

// Fixed test UUIDs
pub const ORDER_ID_1: &str = "01934f4a-1000-7000-8000-000000001000";
pub const LINE_ID_1: &str = "01934f4a-2001-7000-8000-000000002001";
pub const LINE_ID_2: &str = "01934f4a-2002-7000-8000-000000002002";
pub const PART_ID_1: &str = "01934f4a-3001-7000-8000-000000003001";
pub const PART_ID_2: &str = "01934f4a-3002-7000-8000-000000003002";
pub const PART_ID_3: &str = "01934f4a-3003-7000-8000-000000003003";
pub const SHIPMENT_ID_1: &str = "01934f4a-4001-7000-8000-000000004001";
pub const TAG_ID_1: &str = "01934f4a-5001-7000-8000-000000005001";
pub const TAG_ID_2: &str = "01934f4a-5002-7000-8000-000000005002";
pub const APPROVAL_ID_1: &str = "01934f4a-6001-7000-8000-000000006001";
pub const CUSTOMER_ID_1: &str = "01934f4a-c001-7000-8000-00000000c001";
pub const CUSTOMER_ID_2: &str = "01934f4a-c002-7000-8000-00000000c002";
pub const BATCH_ID_1: &str = "01934f4a-b001-7000-8000-00000000b001";
pub const LEGACY_ID_1: &str = "01934f4a-e001-7000-8000-00000000e001";

// Fixed reference date (2026-01-19)
pub const REFERENCE_DATE: &str = "2026-01-19";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

pub fn id<K>(s: &str) -> EntityId<K> {
    EntityId::from_uuid(parse_uuid(s))
}

pub fn reference_date() -> NaiveDate {
    REFERENCE_DATE
        .parse()
        .expect("Invalid date in test fixture")
}

/// Identity factory handing out `00000000-0000-0000-0000-00000000000n`
/// for n = 1, 2, ... in call order
pub fn sequential_factory() -> impl Fn() -> Uuid {
    let next = Cell::new(0u128);
    move || {
        next.set(next.get() + 1);
        Uuid::from_u128(next.get())
    }
}

macro_rules! impl_entity {
    ($($ty:ident => $id:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                type Id = $id;

                fn header(&self) -> &EntityHeader<$id> {
                    &self.header
                }

                fn header_mut(&mut self) -> &mut EntityHeader<$id> {
                    &mut self.header
                }
            }

            impl_entity_equality!($ty);
        )+
    };
}

// ============================================================================
// Order domain model
// ============================================================================

pub type OrderId = EntityId<Order>;
pub type LineId = EntityId<OrderLine>;
pub type PartId = EntityId<Part>;
pub type ShipmentId = EntityId<Shipment>;
pub type TagId = EntityId<Tag>;
pub type ApprovalId = EntityId<Approval>;

pub struct Customer;
pub type CustomerId = EntityId<Customer>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    header: EntityHeader<PartId>,
    pub sku: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    header: EntityHeader<LineId>,
    pub quantity: u32,
    pub parts: OrderedEntities<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    header: EntityHeader<ShipmentId>,
    pub carrier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    header: EntityHeader<TagId>,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approval {
    header: EntityHeader<ApprovalId>,
    pub approver: String,
}

/// Embedded, non-entity part of an order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditTrail {
    pub approvals: OrderedEntities<Approval>,
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub cents: i64,
    pub currency: String,
}

impl ValueObject for Money {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEventType {
    LinePlaced,
    Shipped,
}

pub type OrderEvent = DomainEvent<OrderEventType, String>;

#[derive(Debug, Clone)]
pub struct Order {
    header: EntityHeader<OrderId>,
    version: u64,
    pub note: String,
    pub lines: OrderedEntities<OrderLine>,
    pub featured: Option<Part>,
    pub shipment: Option<Shipment>,
    pub tags: Entities<Tag>,
    pub backorders: Option<OrderedEntities<OrderLine>>,
    pub audit: AuditTrail,
    pub customers: EntityIds<CustomerId>,
    pub charges: ValueObjects<Money>,
    events: DomainEventCollector<OrderEvent>,
}

impl_entity! {
    Part => PartId,
    OrderLine => LineId,
    Shipment => ShipmentId,
    Tag => TagId,
    Approval => ApprovalId,
    Order => OrderId,
}

entity_structure!(Part {});
entity_structure!(OrderLine { collection parts });
entity_structure!(Shipment {});
entity_structure!(Tag {});
entity_structure!(Approval {});
entity_structure!(AuditTrail { collection approvals });
entity_structure!(Order {
    collection lines,
    optional_entity featured,
    optional_entity shipment,
    collection tags,
    optional_collection backorders,
    embedded audit,
    transient events,
});

impl AggregateRoot for Order {
    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl EventSource for Order {
    type Message = OrderEvent;

    fn collector(&self) -> &DomainEventCollector<OrderEvent> {
        &self.events
    }

    fn collector_mut(&mut self) -> &mut DomainEventCollector<OrderEvent> {
        &mut self.events
    }
}

impl Part {
    pub fn new(id: PartId, sku: &str) -> Self {
        Self {
            header: EntityHeader::new(id),
            sku: sku.to_string(),
        }
    }
}

impl OrderLine {
    pub fn new(id: LineId, quantity: u32) -> Self {
        Self {
            header: EntityHeader::new(id),
            quantity,
            parts: OrderedEntities::new(),
        }
    }

    pub fn with_parts(mut self, parts: impl IntoIterator<Item = Part>) -> Self {
        self.parts
            .add_all(parts)
            .expect("Duplicate part in test fixture");
        self
    }
}

impl Shipment {
    pub fn new(id: ShipmentId, carrier: &str) -> Self {
        Self {
            header: EntityHeader::new(id),
            carrier: carrier.to_string(),
        }
    }
}

impl Tag {
    pub fn new(id: TagId, label: &str) -> Self {
        Self {
            header: EntityHeader::new(id),
            label: label.to_string(),
        }
    }
}

impl Approval {
    pub fn new(id: ApprovalId, approver: &str) -> Self {
        Self {
            header: EntityHeader::new(id),
            approver: approver.to_string(),
        }
    }
}

impl Order {
    pub fn new(id: OrderId, note: &str) -> Self {
        Self {
            header: EntityHeader::new(id),
            version: 0,
            note: note.to_string(),
            lines: OrderedEntities::new(),
            featured: None,
            shipment: None,
            tags: Entities::new(),
            backorders: None,
            audit: AuditTrail::default(),
            customers: EntityIds::new(),
            charges: ValueObjects::new(),
            events: DomainEventCollector::new(),
        }
    }

    /// Place a line, recording a `LinePlaced` event
    pub fn place_line(&mut self, line: OrderLine) -> DomainResult<()> {
        Validation::for_type::<Order>()
            .check(constraint("quantity", &line.quantity, checks::positive()))
            .check(constraint("note", &self.note, checks::not_blank()))
            .raise()?;

        let message = line.id().to_string();
        self.lines.add(line)?;
        self.add_domain_event(DomainEvent::new(OrderEventType::LinePlaced, message));
        self.increment_version();
        Ok(())
    }

    /// Ship the order on `date`, which must not lie before `today`
    pub fn ship(&mut self, shipment: Shipment, date: NaiveDate, today: NaiveDate) -> DomainResult<()> {
        let current = self.shipment.as_ref().map(|s| *s.id());
        Validation::for_type::<Order>()
            .check(constraint("shipment", shipment.id(), checks::assignable_once(current)))
            .check(constraint("lines", self.lines.as_slice(), |lines: &[OrderLine]| {
                lines.is_empty().then(|| ErrorCode::IsEmpty.error())
            }))
            .check(constraint("date", &date, checks::today_or_future(today)))
            .raise()?;

        let message = shipment.carrier.clone();
        self.shipment = Some(shipment);
        self.add_domain_event(DomainEvent::new(OrderEventType::Shipped, message));
        self.increment_version();
        Ok(())
    }
}

/// Order with lines c1 and c2 and the featured part d1
pub fn scenario_a_order() -> Order {
    let mut order = Order::new(id(ORDER_ID_1), "scenario A");
    order
        .lines
        .add_all([OrderLine::new(id(LINE_ID_1), 2), OrderLine::new(id(LINE_ID_2), 1)])
        .expect("Duplicate line in test fixture");
    order.featured = Some(Part::new(id(PART_ID_1), "D-1"));
    order
}

/// Order with every slot populated and one pending event
pub fn full_order() -> Order {
    let mut order = scenario_a_order();
    order.note = "rush delivery".to_string();
    order.set_version(7);

    order.lines = OrderedEntities::from_members([
        OrderLine::new(id(LINE_ID_1), 2).with_parts([
            Part::new(id(PART_ID_1), "D-1"),
            Part::new(id(PART_ID_2), "D-2"),
        ]),
        OrderLine::new(id(LINE_ID_2), 1),
    ])
    .expect("Duplicate line in test fixture");
    order.featured = Some(Part::new(id(PART_ID_3), "D-3"));
    order.shipment = Some(Shipment::new(id(SHIPMENT_ID_1), "DHL"));
    order.tags = Entities::from_members([
        Tag::new(id(TAG_ID_1), "priority"),
        Tag::new(id(TAG_ID_2), "fragile"),
    ])
    .expect("Duplicate tag in test fixture");
    order.backorders = Some(OrderedEntities::new());
    order
        .audit
        .approvals
        .add(Approval::new(id(APPROVAL_ID_1), "alice"))
        .expect("Duplicate approval in test fixture");
    order.audit.remark = "checked".to_string();
    order
        .customers
        .add_all([id(CUSTOMER_ID_1), id(CUSTOMER_ID_2)])
        .expect("Duplicate customer in test fixture");
    order
        .charges
        .add(Money {
            cents: 1250,
            currency: "EUR".to_string(),
        })
        .expect("Duplicate charge in test fixture");
    order.add_domain_event(DomainEvent::new(OrderEventType::LinePlaced, LINE_ID_1.to_string()));
    order
}

/// Order whose identity is the nil UUID
pub fn order_without_identity() -> Order {
    Order::new(EntityId::from_uuid(Uuid::nil()), "orphan")
}

// ============================================================================
// Failure fixtures
// ============================================================================

/// Collection that refuses every insertion, used to break a copy half way
#[derive(Debug, Clone)]
pub struct FaultyEntities<E> {
    members: Vec<E>,
}

impl<E: Entity> FaultyEntities<E> {
    pub fn new(members: impl IntoIterator<Item = E>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }
}

impl<E: cim_domain_model::CopyableEntity> EntityCollection for FaultyEntities<E> {
    type Member = E;

    fn empty_like(&self) -> Self {
        Self {
            members: Vec::new(),
        }
    }

    fn members(&self) -> impl Iterator<Item = &E> + '_ {
        self.members.iter()
    }

    fn take_members(&mut self) -> Vec<E> {
        std::mem::take(&mut self.members)
    }

    fn insert_member(&mut self, member: E) -> DomainResult<()> {
        Err(ErrorCode::RelationNotSet.with([
            Parameter::of("from", "FaultyEntities"),
            Parameter::of("to", member.id().to_string()),
        ]))
    }

    fn member_count(&self) -> usize {
        self.members.len()
    }
}

pub type BatchId = EntityId<Batch>;

/// Entity whose second collection cannot be rebuilt
#[derive(Debug, Clone)]
pub struct Batch {
    header: EntityHeader<BatchId>,
    pub lines: OrderedEntities<OrderLine>,
    pub quarantine: FaultyEntities<Part>,
}

impl_entity! {
    Batch => BatchId,
}

entity_structure!(Batch {
    collection lines,
    collection quarantine,
});

pub fn faulty_batch() -> Batch {
    Batch {
        header: EntityHeader::new(id(BATCH_ID_1)),
        lines: OrderedEntities::from_members([
            OrderLine::new(id(LINE_ID_1), 3).with_parts([Part::new(id(PART_ID_1), "D-1")]),
        ])
        .expect("Duplicate line in test fixture"),
        quarantine: FaultyEntities::new([Part::new(id(PART_ID_2), "D-2")]),
    }
}

/// Identity kind that cannot be constructed from a raw UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LegacyId(Uuid);

impl fmt::Display for LegacyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "legacy:{}", self.0)
    }
}

impl Identity for LegacyId {
    fn as_uuid(&self) -> Uuid {
        self.0
    }

    fn try_from_uuid(_uuid: Uuid) -> DomainResult<Self> {
        Err(ErrorCode::InstanceNotCreated.with([Parameter::of("class", "LegacyId")]))
    }
}

#[derive(Debug, Clone)]
pub struct LegacyRecord {
    header: EntityHeader<LegacyId>,
    pub payload: String,
}

impl_entity! {
    LegacyRecord => LegacyId,
}

entity_structure!(LegacyRecord {});

pub fn legacy_record() -> LegacyRecord {
    LegacyRecord {
        header: EntityHeader::new(LegacyId(parse_uuid(LEGACY_ID_1))),
        payload: "imported".to_string(),
    }
}
