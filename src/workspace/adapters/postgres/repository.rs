//! `PostgreSQL` repository implementation for workspace persistence.

use super::{
    models::{DeliverableRow, PhaseRow, ProjectRow, TaskLinkRow, TaskRow, rank_to_column},
    schema::{deliverables, phases, projects, task_deliverables, tasks},
};
use crate::planning::TaskUpdate;
use crate::workspace::{
    domain::{
        Deliverable, DeliverableId, OwnerId, Phase, Project, ProjectId, Task, TaskId, TaskLink,
        WorkspaceSeed,
    },
    ports::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by workspace adapters.
pub type WorkspacePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workspace repository.
///
/// Batch writes run inside a single database transaction.
#[derive(Debug, Clone)]
pub struct PostgresWorkspaceRepository {
    pool: WorkspacePgPool,
}

/// Placement prepared for an `UPDATE` inside a transaction.
struct PlacementRow {
    id: uuid::Uuid,
    status_column: String,
    column_order: i32,
}

/// Transaction error that carries either a repository rejection or a Diesel
/// failure, so rejections can roll the transaction back.
enum TxError {
    Rejected(WorkspaceRepositoryError),
    Diesel(DieselError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        Self::Diesel(err)
    }
}

impl From<TxError> for WorkspaceRepositoryError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Rejected(rejection) => rejection,
            TxError::Diesel(diesel_err) => Self::persistence(diesel_err),
        }
    }
}

impl PostgresWorkspaceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkspacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkspaceRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkspaceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkspaceRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkspaceRepositoryError::persistence)?
    }
}

fn to_placement_rows(
    updates: &[TaskUpdate<TaskId>],
) -> WorkspaceRepositoryResult<Vec<PlacementRow>> {
    updates
        .iter()
        .map(|update| {
            Ok(PlacementRow {
                id: update.id.into_inner(),
                status_column: update.status_column.as_str().to_owned(),
                column_order: rank_to_column(update.column_order)?,
            })
        })
        .collect()
}

fn apply_placements(
    connection: &mut PgConnection,
    project_id: uuid::Uuid,
    placements: &[PlacementRow],
) -> Result<(), TxError> {
    for placement in placements {
        let updated = diesel::update(
            tasks::table
                .filter(tasks::id.eq(placement.id))
                .filter(tasks::project_id.eq(project_id)),
        )
        .set((
            tasks::status_column.eq(&placement.status_column),
            tasks::column_order.eq(placement.column_order),
        ))
        .execute(connection)?;
        if updated == 0 {
            return Err(TxError::Rejected(WorkspaceRepositoryError::TaskNotFound(
                TaskId::from_uuid(placement.id),
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn find_project_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> WorkspaceRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::owner_id.eq(owner_id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?;
            Ok(row.map(Project::from))
        })
        .await
    }

    async fn insert_workspace(&self, seed: &WorkspaceSeed) -> WorkspaceRepositoryResult<()> {
        let owner_id = seed.project.owner_id();
        let project_row = ProjectRow::from(&seed.project);
        let phase_rows = seed
            .phases
            .iter()
            .map(PhaseRow::from_domain)
            .collect::<WorkspaceRepositoryResult<Vec<_>>>()?;
        let deliverable_rows = seed
            .deliverables
            .iter()
            .map(DeliverableRow::from_domain)
            .collect::<WorkspaceRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(projects::table)
                        .values(&project_row)
                        .execute(tx)?;
                    diesel::insert_into(phases::table)
                        .values(&phase_rows)
                        .execute(tx)?;
                    diesel::insert_into(deliverables::table)
                        .values(&deliverable_rows)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_owner_unique_violation(info.as_ref()) =>
                    {
                        WorkspaceRepositoryError::DuplicateOwner(owner_id)
                    }
                    _ => WorkspaceRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> WorkspaceRepositoryResult<()> {
        let project_id = project.id();
        let title = project.title().to_owned();
        let description = project.description().map(str::to_owned);

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(projects::table.filter(projects::id.eq(project_id.into_inner())))
                    .set((
                        projects::title.eq(&title),
                        projects::description.eq(&description),
                    ))
                    .execute(connection)
                    .map_err(WorkspaceRepositoryError::persistence)?;
            if updated == 0 {
                return Err(WorkspaceRepositoryError::ProjectNotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn list_phases(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<Phase>> {
        self.run_blocking(move |connection| {
            let rows = phases::table
                .filter(phases::project_id.eq(project_id.into_inner()))
                .order(phases::order_index.asc())
                .select(PhaseRow::as_select())
                .load::<PhaseRow>(connection)
                .map_err(WorkspaceRepositoryError::persistence)?;
            rows.into_iter().map(PhaseRow::into_domain).collect()
        })
        .await
    }

    async fn replace_phase_schedule(
        &self,
        project: &Project,
        schedule: &[Phase],
    ) -> WorkspaceRepositoryResult<()> {
        let project_id = project.id();
        let project_row = ProjectRow::from(project);
        let phase_rows = schedule
            .iter()
            .map(PhaseRow::from_domain)
            .collect::<WorkspaceRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    let updated = diesel::update(
                        projects::table.filter(projects::id.eq(project_row.id)),
                    )
                    .set((
                        projects::start_date.eq(project_row.start_date),
                        projects::end_date.eq(project_row.end_date),
                    ))
                    .execute(tx)?;
                    if updated == 0 {
                        return Err(TxError::Rejected(
                            WorkspaceRepositoryError::ProjectNotFound(project_id),
                        ));
                    }
                    for phase in &phase_rows {
                        diesel::update(
                            phases::table
                                .filter(phases::id.eq(phase.id))
                                .filter(phases::project_id.eq(project_row.id)),
                        )
                        .set((
                            phases::name.eq(&phase.name),
                            phases::start_date.eq(phase.start_date),
                            phases::end_date.eq(phase.end_date),
                        ))
                        .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(WorkspaceRepositoryError::from)
        })
        .await
    }

    async fn list_tasks(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(WorkspaceRepositoryError::persistence)?;
            rows.into_iter().map(TaskRow::into_domain).collect()
        })
        .await
    }

    async fn find_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> WorkspaceRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?;
            row.map(TaskRow::into_domain).transpose()
        })
        .await
    }

    async fn insert_task(
        &self,
        task: &Task,
        deliverable_ids: &[DeliverableId],
    ) -> WorkspaceRepositoryResult<()> {
        let task_row = TaskRow::from_domain(task)?;
        let link_rows: Vec<TaskLinkRow> = deliverable_ids
            .iter()
            .map(|deliverable_id| TaskLinkRow::from(TaskLink::new(task.id(), *deliverable_id)))
            .collect();

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    diesel::insert_into(tasks::table)
                        .values(&task_row)
                        .execute(tx)?;
                    if link_rows.is_empty() {
                        return Ok(());
                    }
                    let wanted: Vec<uuid::Uuid> =
                        link_rows.iter().map(|row| row.deliverable_id).collect();
                    let known: Vec<uuid::Uuid> = deliverables::table
                        .filter(deliverables::project_id.eq(task_row.project_id))
                        .filter(deliverables::id.eq_any(&wanted))
                        .select(deliverables::id)
                        .load(tx)?;
                    if let Some(missing) = wanted.iter().find(|id| !known.contains(id)) {
                        return Err(TxError::Rejected(
                            WorkspaceRepositoryError::DeliverableNotFound(
                                DeliverableId::from_uuid(*missing),
                            ),
                        ));
                    }
                    diesel::insert_into(task_deliverables::table)
                        .values(&link_rows)
                        .on_conflict_do_nothing()
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(WorkspaceRepositoryError::from)
        })
        .await
    }

    async fn save_task(
        &self,
        task: &Task,
        placements: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()> {
        let task_id = task.id();
        let row = TaskRow::from_domain(task)?;
        let placement_rows = to_placement_rows(placements)?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    let updated = diesel::update(
                        tasks::table
                            .filter(tasks::id.eq(row.id))
                            .filter(tasks::project_id.eq(row.project_id)),
                    )
                    .set((
                        tasks::phase_id.eq(row.phase_id),
                        tasks::title.eq(&row.title),
                        tasks::description.eq(&row.description),
                        tasks::status_column.eq(&row.status_column),
                        tasks::priority.eq(&row.priority),
                        tasks::start_at.eq(row.start_at),
                        tasks::end_at.eq(row.end_at),
                        tasks::column_order.eq(row.column_order),
                        tasks::updated_at.eq(row.updated_at),
                    ))
                    .execute(tx)?;
                    if updated == 0 {
                        return Err(TxError::Rejected(WorkspaceRepositoryError::TaskNotFound(
                            task_id,
                        )));
                    }
                    apply_placements(tx, row.project_id, &placement_rows)
                })
                .map_err(WorkspaceRepositoryError::from)
        })
        .await
    }

    async fn apply_task_updates(
        &self,
        project_id: ProjectId,
        updates: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()> {
        let placement_rows = to_placement_rows(updates)?;
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    apply_placements(tx, project_id.into_inner(), &placement_rows)
                })
                .map_err(WorkspaceRepositoryError::from)
        })
        .await
    }

    async fn delete_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        placements: &[TaskUpdate<TaskId>],
    ) -> WorkspaceRepositoryResult<()> {
        let remaining: Vec<TaskUpdate<TaskId>> = placements
            .iter()
            .filter(|update| update.id != task_id)
            .cloned()
            .collect();
        let placement_rows = to_placement_rows(&remaining)?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    diesel::delete(
                        task_deliverables::table
                            .filter(task_deliverables::task_id.eq(task_id.into_inner())),
                    )
                    .execute(tx)?;
                    let deleted = diesel::delete(
                        tasks::table
                            .filter(tasks::id.eq(task_id.into_inner()))
                            .filter(tasks::project_id.eq(project_id.into_inner())),
                    )
                    .execute(tx)?;
                    if deleted == 0 {
                        return Err(TxError::Rejected(WorkspaceRepositoryError::TaskNotFound(
                            task_id,
                        )));
                    }
                    apply_placements(tx, project_id.into_inner(), &placement_rows)
                })
                .map_err(WorkspaceRepositoryError::from)
        })
        .await
    }

    async fn list_deliverables(
        &self,
        project_id: ProjectId,
    ) -> WorkspaceRepositoryResult<Vec<Deliverable>> {
        self.run_blocking(move |connection| {
            let rows = deliverables::table
                .filter(deliverables::project_id.eq(project_id.into_inner()))
                .select(DeliverableRow::as_select())
                .load::<DeliverableRow>(connection)
                .map_err(WorkspaceRepositoryError::persistence)?;
            rows.into_iter().map(DeliverableRow::into_domain).collect()
        })
        .await
    }

    async fn find_deliverable(
        &self,
        project_id: ProjectId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceRepositoryResult<Option<Deliverable>> {
        self.run_blocking(move |connection| {
            let row = deliverables::table
                .filter(deliverables::id.eq(deliverable_id.into_inner()))
                .filter(deliverables::project_id.eq(project_id.into_inner()))
                .select(DeliverableRow::as_select())
                .first::<DeliverableRow>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?;
            row.map(DeliverableRow::into_domain).transpose()
        })
        .await
    }

    async fn insert_deliverable(&self, deliverable: &Deliverable) -> WorkspaceRepositoryResult<()> {
        let row = DeliverableRow::from_domain(deliverable)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(deliverables::table)
                .values(&row)
                .execute(connection)
                .map_err(WorkspaceRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update_deliverable(&self, deliverable: &Deliverable) -> WorkspaceRepositoryResult<()> {
        let deliverable_id = deliverable.id();
        let row = DeliverableRow::from_domain(deliverable)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                deliverables::table
                    .filter(deliverables::id.eq(row.id))
                    .filter(deliverables::project_id.eq(row.project_id)),
            )
            .set((
                deliverables::phase_id.eq(row.phase_id),
                deliverables::title.eq(&row.title),
                deliverables::description.eq(&row.description),
                deliverables::due_date.eq(row.due_date),
                deliverables::status.eq(&row.status),
                deliverables::resource_links.eq(&row.resource_links),
            ))
            .execute(connection)
            .map_err(WorkspaceRepositoryError::persistence)?;
            if updated == 0 {
                return Err(WorkspaceRepositoryError::DeliverableNotFound(
                    deliverable_id,
                ));
            }
            Ok(())
        })
        .await
    }

    async fn delete_deliverable(
        &self,
        project_id: ProjectId,
        deliverable_id: DeliverableId,
    ) -> WorkspaceRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    diesel::delete(
                        task_deliverables::table.filter(
                            task_deliverables::deliverable_id.eq(deliverable_id.into_inner()),
                        ),
                    )
                    .execute(tx)?;
                    let deleted = diesel::delete(
                        deliverables::table
                            .filter(deliverables::id.eq(deliverable_id.into_inner()))
                            .filter(deliverables::project_id.eq(project_id.into_inner())),
                    )
                    .execute(tx)?;
                    if deleted == 0 {
                        return Err(TxError::Rejected(
                            WorkspaceRepositoryError::DeliverableNotFound(deliverable_id),
                        ));
                    }
                    Ok(())
                })
                .map_err(WorkspaceRepositoryError::from)
        })
        .await
    }

    async fn list_links(&self, project_id: ProjectId) -> WorkspaceRepositoryResult<Vec<TaskLink>> {
        self.run_blocking(move |connection| {
            let rows = task_deliverables::table
                .inner_join(tasks::table)
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .select(TaskLinkRow::as_select())
                .load::<TaskLinkRow>(connection)
                .map_err(WorkspaceRepositoryError::persistence)?;
            Ok(rows.into_iter().map(TaskLink::from).collect())
        })
        .await
    }

    async fn link(&self, link: TaskLink) -> WorkspaceRepositoryResult<()> {
        let row = TaskLinkRow::from(link);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_deliverables::table)
                .values(&row)
                .on_conflict_do_nothing()
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info)
                        if info
                            .constraint_name()
                            .is_some_and(|name| name == "task_deliverables_task_id_fkey") =>
                    {
                        WorkspaceRepositoryError::TaskNotFound(link.task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        WorkspaceRepositoryError::DeliverableNotFound(link.deliverable_id)
                    }
                    _ => WorkspaceRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn unlink(&self, link: TaskLink) -> WorkspaceRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                task_deliverables::table
                    .filter(task_deliverables::task_id.eq(link.task_id.into_inner()))
                    .filter(
                        task_deliverables::deliverable_id.eq(link.deliverable_id.into_inner()),
                    ),
            )
            .execute(connection)
            .map_err(WorkspaceRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn is_owner_unique_violation(info: &dyn diesel::result::DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_projects_owner_id")
}
