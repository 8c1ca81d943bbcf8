//! Command handlers for the `pm-tracker` binary.

use crate::{
    CollectionArg, FormatArg, ProjectCommand, ResourceCommand, SubTaskCommand,
    TaskCommand,
};
use anyhow::{anyhow, bail, Context, Result};
use base64::Engine;
use pm_tracker::config::{write_config, TrackerConfig};
use pm_tracker::export::{export_to_file, Collection, ExportFormat};
use pm_tracker::framework::ActorClient;
use pm_tracker::lifecycle::TrackerSystem;
use pm_tracker::model::{
    Attachment, Project, ProjectCreate, ProjectUpdate, Resource, ResourceCreate, ResourceUpdate,
    SubTaskCreate, SubTaskUpdate, Task, TaskCreate, TaskUpdate,
};
use pm_tracker::views::{
    departments, sponsors, DashboardSummary, ProjectFilter, Snapshot, StatusBoard, TaskFilter,
};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub struct Output {
    pub json: bool,
}

impl Output {
    /// Prints `value` as JSON when requested, otherwise runs `human`.
    fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }
}

pub fn init_config(path: &Path, config: &TrackerConfig, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, config)?;
    println!("Wrote {}", path.display());
    Ok(())
}

// =============================================================================
// Resources
// =============================================================================

pub async fn resource(system: &TrackerSystem, out: &Output, cmd: ResourceCommand) -> Result<()> {
    let ledger = &system.ledger_client;
    match cmd {
        ResourceCommand::Add {
            name,
            total,
            skillset,
        } => {
            let id = ledger
                .create_resource(ResourceCreate {
                    name,
                    total,
                    skillset,
                })
                .await?;
            println!("{id}");
        }
        ResourceCommand::List => {
            let snapshot = system.snapshot().await?;
            out.emit(&snapshot.resources, || {
                if snapshot.resources.is_empty() {
                    println!("No resources.");
                }
                for r in &snapshot.resources {
                    print_resource(r, &snapshot);
                }
            })?;
        }
        ResourceCommand::Edit {
            id,
            name,
            total,
            skillset,
            clear_skillset,
        } => {
            let skillset = if clear_skillset {
                Some(None)
            } else {
                skillset.map(Some)
            };
            let updated = ledger
                .update_resource(
                    id,
                    ResourceUpdate {
                        name,
                        total,
                        skillset,
                    },
                )
                .await?;
            let snapshot = system.snapshot().await?;
            print_resource(&updated, &snapshot);
        }
        ResourceCommand::Delete { id } => {
            ledger.delete_resource(id).await?;
            println!("Deleted resource {id}");
        }
        ResourceCommand::Allocate {
            id,
            project,
            amount,
        } => {
            let held = ledger.allocate(id, project, amount).await?;
            let available = ledger.available_units(id).await?;
            println!("{project} now holds {held} (available: {available})");
        }
        ResourceCommand::Deallocate {
            id,
            project,
            amount,
        } => {
            let held = ledger.deallocate(id, project, amount).await?;
            let available = ledger.available_units(id).await?;
            println!("{project} now holds {held} (available: {available})");
        }
        ResourceCommand::Available { id } => {
            println!("{}", ledger.available_units(id).await?);
        }
    }
    Ok(())
}

fn print_resource(r: &Resource, snapshot: &Snapshot) {
    let skillset = r.skillset.as_deref().unwrap_or("-");
    println!(
        "{}  {}  [{}]  total {}  available {}",
        r.id,
        r.name,
        skillset,
        r.total,
        r.available_units()
    );
    for (consumer, units) in &r.allocated {
        println!("    {}: {units}", snapshot.consumer_name(consumer));
    }
}

// =============================================================================
// Projects
// =============================================================================

pub async fn project(system: &TrackerSystem, out: &Output, cmd: ProjectCommand) -> Result<()> {
    let projects = &system.project_client;
    match cmd {
        ProjectCommand::Add {
            name,
            department,
            fields,
            attachments,
        } => {
            let attachments = attachments
                .iter()
                .map(|path| read_attachment(path))
                .collect::<Result<Vec<_>>>()?;
            let id = projects
                .create_project(ProjectCreate {
                    name,
                    department,
                    description: fields.description.unwrap_or_default(),
                    sponsor: fields.sponsor,
                    duration_start: fields.start,
                    duration_end: fields.end,
                    skillset: fields.skillset,
                    attachments,
                })
                .await?;
            println!("{id}");
        }
        ProjectCommand::List {
            department,
            sponsor,
            status,
        } => {
            let snapshot = system.snapshot().await?;
            let filter = ProjectFilter {
                department,
                sponsor,
                status,
            };
            let matching = filter.apply(&snapshot.projects);
            out.emit(&matching, || {
                if matching.is_empty() {
                    println!("No projects found with current filters.");
                }
                for p in &matching {
                    print_project_line(p);
                }
                let depts = departments(&snapshot.projects);
                let sps = sponsors(&snapshot.projects);
                if !depts.is_empty() {
                    println!("\nDepartments: {}", depts.join(", "));
                }
                if !sps.is_empty() {
                    println!("Sponsors: {}", sps.join(", "));
                }
            })?;
        }
        ProjectCommand::Show { id } => {
            let snapshot = system.snapshot().await?;
            let project = snapshot
                .project(&id)
                .ok_or_else(|| anyhow!("Project not found: {id}"))?;
            out.emit(project, || print_project(project, &snapshot))?;
        }
        ProjectCommand::Edit {
            id,
            name,
            department,
            fields,
        } => {
            let update = ProjectUpdate {
                name,
                department,
                description: fields.description,
                sponsor: fields.sponsor.map(clearable),
                duration_start: fields.start.map(Some),
                duration_end: fields.end.map(Some),
                skillset: fields.skillset.map(clearable),
                status: None,
            };
            let updated = projects.update_project(id, update).await?;
            print_project_line(&updated);
        }
        ProjectCommand::Status { id, status } => {
            let previous = projects.set_status(id, status).await?;
            println!("{previous} -> {status}");
        }
        ProjectCommand::Attach { id, path } => {
            let count = projects.add_attachment(id, read_attachment(&path)?).await?;
            println!("{count} attachment(s)");
        }
        ProjectCommand::Detach { id, index } => {
            let removed = projects.remove_attachment(id, index).await?;
            println!("Removed {}", removed.name);
        }
        ProjectCommand::Delete { id } => {
            projects.delete_project(id).await?;
            println!("Deleted project {id}");
        }
    }
    Ok(())
}

/// An empty string on the command line clears the field.
fn clearable(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

fn print_project_line(p: &Project) {
    println!("{}  {}  [{}]  {}", p.id, p.name, p.status, p.department);
}

fn print_project(p: &Project, snapshot: &Snapshot) {
    print_project_line(p);
    if !p.description.is_empty() {
        println!("  {}", p.description);
    }
    if let Some(sponsor) = &p.sponsor {
        println!("  Sponsor: {sponsor}");
    }
    match (p.duration_start, p.duration_end) {
        (None, None) => {}
        (start, end) => println!(
            "  Duration: {} to {}",
            start.map_or_else(|| "?".to_string(), |d| d.to_string()),
            end.map_or_else(|| "?".to_string(), |d| d.to_string())
        ),
    }
    if let Some(skillset) = &p.skillset {
        println!("  Skillset: {skillset}");
    }
    for (index, a) in p.attachments.iter().enumerate() {
        println!("  [{index}] {} ({})", a.name, a.mime_type);
    }
    for r in &snapshot.resources {
        let units = r.allocated_to(&p.id);
        if units > 0 {
            println!("  {}: {units} unit(s)", r.name);
        }
    }
    let tasks = TaskFilter {
        project: Some(p.id),
        ..TaskFilter::default()
    };
    for t in tasks.apply(&snapshot.tasks) {
        println!("  - {} [{}]", t.title, t.status);
    }
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("attachment path has no file name: {}", path.display()))?
        .to_string();
    let mime_type = mime_type(path).to_string();
    let data = format!(
        "data:{mime_type};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    );
    Ok(Attachment {
        name,
        mime_type,
        data,
    })
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Tasks
// =============================================================================

pub async fn task(system: &TrackerSystem, out: &Output, cmd: TaskCommand) -> Result<()> {
    let tasks = &system.task_client;
    match cmd {
        TaskCommand::Add {
            project,
            title,
            description,
            estimated,
            actual,
            status,
        } => {
            let id = tasks
                .create_task(TaskCreate {
                    project_id: project,
                    title,
                    description,
                    estimated_hours: estimated,
                    actual_hours: actual,
                    status,
                })
                .await?;
            println!("{id}");
        }
        TaskCommand::List {
            project,
            status,
            search,
        } => {
            let snapshot = system.snapshot().await?;
            let filter = TaskFilter {
                project,
                status,
                search,
            };
            let matching = filter.apply(&snapshot.tasks);
            out.emit(&matching, || {
                if matching.is_empty() {
                    println!("No tasks.");
                }
                for t in &matching {
                    print_task(t, &snapshot);
                }
            })?;
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            estimated,
            actual,
        } => {
            let update = TaskUpdate {
                title,
                description,
                estimated_hours: estimated,
                actual_hours: actual,
                status: None,
            };
            let updated = tasks.update_task(id, update).await?;
            let snapshot = system.snapshot().await?;
            print_task(&updated, &snapshot);
        }
        TaskCommand::Status { id, status } => {
            let previous = tasks.set_status(id, status).await?;
            println!("{previous} -> {status}");
        }
        TaskCommand::Delete { id } => {
            tasks.delete(id).await?;
            println!("Deleted task {id}");
        }
        TaskCommand::Sub(cmd) => sub_task(system, cmd).await?,
    }
    Ok(())
}

async fn sub_task(system: &TrackerSystem, cmd: SubTaskCommand) -> Result<()> {
    let tasks = &system.task_client;
    match cmd {
        SubTaskCommand::Add {
            task,
            title,
            estimated,
            actual,
        } => {
            let id = tasks
                .add_sub_task(
                    task,
                    SubTaskCreate {
                        title,
                        estimated_hours: estimated,
                        actual_hours: actual,
                    },
                )
                .await?;
            println!("{id}");
        }
        SubTaskCommand::Edit {
            task,
            id,
            title,
            estimated,
            actual,
        } => {
            let update = SubTaskUpdate {
                title,
                estimated_hours: estimated,
                actual_hours: actual,
            };
            let updated = tasks.update_sub_task(task, id, update).await?;
            println!(
                "{}  {}  est {}h  act {}h",
                updated.id, updated.title, updated.estimated_hours, updated.actual_hours
            );
        }
        SubTaskCommand::Remove { task, id } => {
            let removed = tasks.remove_sub_task(task, id).await?;
            println!("Removed {}", removed.title);
        }
    }
    Ok(())
}

fn print_task(t: &Task, snapshot: &Snapshot) {
    println!(
        "{}  {}  [{}]  {}  est {}h  act {}h",
        t.id,
        t.title,
        t.status,
        snapshot.consumer_name(&t.project_id),
        t.estimated_hours,
        t.actual_hours
    );
    for st in &t.sub_tasks {
        println!(
            "    {}  {}  est {}h  act {}h",
            st.id, st.title, st.estimated_hours, st.actual_hours
        );
    }
}

// =============================================================================
// Views, export, data management
// =============================================================================

pub async fn board(system: &TrackerSystem, out: &Output) -> Result<()> {
    let snapshot = system.snapshot().await?;
    let board = StatusBoard::build(&snapshot.projects);
    out.emit(&board, || {
        for column in &board.columns {
            println!("{} ({})", column.status, column.projects.len());
            for p in &column.projects {
                println!("    {}  {}", p.id, p.name);
            }
        }
    })
}

pub async fn dashboard(system: &TrackerSystem, out: &Output) -> Result<()> {
    let snapshot = system.snapshot().await?;
    let summary = DashboardSummary::build(&snapshot);
    out.emit(&summary, || {
        println!(
            "Projects: {}  Tasks: {}  Resources: {}",
            summary.project_count, summary.task_count, summary.resource_count
        );
        println!("\nTasks by status");
        for (status, count) in &summary.tasks_by_status {
            println!("    {status}: {count}");
        }
        println!("\nProjects by department");
        for (department, count) in &summary.projects_by_department {
            println!("    {department}: {count}");
        }
        println!(
            "\nHours: {} estimated, {} actual",
            summary.estimated_hours, summary.actual_hours
        );
        println!("\nResource utilisation");
        for u in &summary.utilisation {
            println!(
                "    {}: {}/{} allocated, {} available",
                u.name, u.allocated, u.total, u.available
            );
        }
    })
}

pub async fn export(
    system: &TrackerSystem,
    collection: CollectionArg,
    path: &Path,
    format: Option<FormatArg>,
) -> Result<()> {
    let collection = match collection {
        CollectionArg::Projects => Collection::Projects,
        CollectionArg::Tasks => Collection::Tasks,
        CollectionArg::Resources => Collection::Resources,
    };
    let format = match format {
        Some(FormatArg::Csv) => ExportFormat::Csv,
        Some(FormatArg::Xlsx) => ExportFormat::Xlsx,
        None => ExportFormat::from_path(path)
            .ok_or_else(|| anyhow!("cannot tell the format of {}; pass --format", path.display()))?,
    };
    let snapshot = system.snapshot().await?;
    let bytes = export_to_file(&snapshot, collection, format, path)?;
    println!("Wrote {} ({bytes} bytes)", path.display());
    Ok(())
}

pub async fn clear(system: &TrackerSystem, yes: bool) -> Result<()> {
    if !yes {
        bail!("this deletes ALL project, task and resource data; pass --yes to confirm");
    }
    let cleared = system.clear_all_data().await?;
    println!(
        "Cleared {} project(s), {} task(s), {} resource(s)",
        cleared.projects, cleared.tasks, cleared.resources
    );
    Ok(())
}
