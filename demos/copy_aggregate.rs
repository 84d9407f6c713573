// Copyright (c) 2025 - Cowboy AI, Inc.
//! Copy Aggregate Example
//!
//! Builds a small project plan, copies it as a template for a new project
//! and shows that every entity in the copy carries a fresh identity.
//!
//! ```text
//! Project (p1)                     Project (p1')  original: p1
//! ├── tasks                        ├── tasks
//! │   ├── Task (t1)       copy     │   ├── Task (t1')  original: t1
//! │   └── Task (t2)      ─────>    │   └── Task (t2')  original: t2
//! └── milestone                    └── milestone
//!     └── Milestone (m1)               └── Milestone (m1')  original: m1
//! ```
//!
//! Run with `RUST_LOG=debug` to see the copy engine at work.

use anyhow::Result;
use tracing::info;

use cim_domain_model::validation::{checks, constraint};
use cim_domain_model::{
    entity_structure, impl_entity_equality, AggregateRoot, CopyConfig, CopyableEntity,
    DomainResult, Entity, EntityCopier, EntityHeader, EntityId, IdStrategy, OrderedEntities,
    StructureSnapshot, Validation,
};

type ProjectId = EntityId<Project>;
type TaskId = EntityId<Task>;
type MilestoneId = EntityId<Milestone>;

#[derive(Debug, Clone)]
struct Task {
    header: EntityHeader<TaskId>,
    title: String,
    estimate_hours: u32,
}

#[derive(Debug, Clone)]
struct Milestone {
    header: EntityHeader<MilestoneId>,
    name: String,
}

#[derive(Debug, Clone)]
struct Project {
    header: EntityHeader<ProjectId>,
    version: u64,
    name: String,
    tasks: OrderedEntities<Task>,
    milestone: Option<Milestone>,
}

impl Entity for Task {
    type Id = TaskId;

    fn header(&self) -> &EntityHeader<TaskId> {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader<TaskId> {
        &mut self.header
    }
}

impl Entity for Milestone {
    type Id = MilestoneId;

    fn header(&self) -> &EntityHeader<MilestoneId> {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader<MilestoneId> {
        &mut self.header
    }
}

impl Entity for Project {
    type Id = ProjectId;

    fn header(&self) -> &EntityHeader<ProjectId> {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader<ProjectId> {
        &mut self.header
    }
}

impl AggregateRoot for Project {
    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl_entity_equality!(Task, Milestone, Project);

entity_structure!(Task {});
entity_structure!(Milestone {});
entity_structure!(Project {
    collection tasks,
    optional_entity milestone,
});

impl Task {
    fn new(title: &str, estimate_hours: u32) -> Self {
        Self {
            header: EntityHeader::new(TaskId::new()),
            title: title.to_string(),
            estimate_hours,
        }
    }
}

impl Project {
    fn new(name: &str) -> Self {
        Self {
            header: EntityHeader::new(ProjectId::new()),
            version: 0,
            name: name.to_string(),
            tasks: OrderedEntities::new(),
            milestone: None,
        }
    }

    fn plan(&mut self, task: Task) -> DomainResult<()> {
        Validation::for_type::<Project>()
            .check(constraint("title", &task.title, checks::not_blank()))
            .check(constraint("estimate_hours", &task.estimate_hours, checks::positive()))
            .raise()?;

        self.tasks.add(task)?;
        self.increment_version();
        Ok(())
    }
}

fn print_project(label: &str, project: &Project) {
    info!("{} {} '{}' (copy of {:?})", label, project.id(), project.name, project.original_id());
    for task in project.tasks.iter() {
        info!(
            "  task {} '{}' {}h (copy of {:?})",
            task.id(),
            task.title,
            task.estimate_hours,
            task.original_id()
        );
    }
    if let Some(milestone) = &project.milestone {
        info!(
            "  milestone {} '{}' (copy of {:?})",
            milestone.id(),
            milestone.name,
            milestone.original_id()
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("=== Copy Aggregate Example ===");

    let mut template = Project::new("Website relaunch");
    template.plan(Task::new("Collect requirements", 8))?;
    template.plan(Task::new("Design mockups", 16))?;
    template.milestone = Some(Milestone {
        header: EntityHeader::new(MilestoneId::new()),
        name: "Go live".to_string(),
    });

    // Rejected commands leave the aggregate untouched
    if let Err(error) = template.plan(Task::new(" ", 0)) {
        info!("Rejected task: {} ({} violations)", error, error.details().len());
    }

    print_project("Template", &template);

    let before = StructureSnapshot::capture(&template);
    let mut project = template.copied()?;
    project.name = "Shop relaunch".to_string();
    print_project("Copy", &project);

    let shared = StructureSnapshot::capture(&project)
        .identities()
        .into_iter()
        .filter(|uuid| before.identities().contains(uuid))
        .count();
    info!("Identities shared between template and copy: {}", shared);
    info!(
        "Template unchanged: {}",
        StructureSnapshot::capture(&template) == before
    );

    // Time-ordered identities for copies that should sort by creation
    let config = CopyConfig::new().with_id_strategy(IdStrategy::TimeOrdered);
    let sortable = EntityCopier::new(&config).copy(&template)?;
    info!(
        "Time-ordered copy {} (version {})",
        sortable.id(),
        sortable.id().as_uuid().get_version_num()
    );

    Ok(())
}
