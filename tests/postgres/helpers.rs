//! Shared helpers for `PostgreSQL` workspace repository tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use phaseboard::{
    planning::{DateWindow, StatusColumn},
    workspace::{
        adapters::postgres::{PostgresWorkspaceRepository, WorkspacePgPool},
        domain::{OwnerId, Phase, Priority, Task, TaskDraft, WorkspaceSeed},
        ports::WorkspaceRepository,
    },
};
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL that creates the workspace tables.
pub const CREATE_WORKSPACE_SQL: &str =
    include_str!("../../migrations/2026-02-01-000000_create_workspace/up.sql");

/// SQL that drops the workspace tables.
pub const DROP_WORKSPACE_SQL: &str =
    include_str!("../../migrations/2026-02-01-000000_create_workspace/down.sql");

/// Template database name for pre-migrated schema.
pub const TEMPLATE_DB: &str = "phaseboard_test_template";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_WORKSPACE_SQL)
                .map_err(|e| eyre::eyre!("SQL error: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Creates a test database from the template and returns a repository.
pub fn setup_repository(
    cluster: &TestCluster,
    db_name: &str,
) -> Result<PostgresWorkspaceRepository, BoxError> {
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool: WorkspacePgPool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(PostgresWorkspaceRepository::new(pool))
}

/// Opens a direct connection for raw SQL checks.
pub fn connect(cluster: &TestCluster, db_name: &str) -> PgConnection {
    let url = cluster.connection().database_url(db_name);
    PgConnection::establish(&url).expect("direct connection")
}

/// Returns a unique database name for one test.
pub fn database_name(label: &str) -> String {
    format!("test_{label}_{}", uuid::Uuid::new_v4().simple())
}

/// Guard that ensures test database cleanup runs even if a test panics.
///
/// Declare it before the repository so the pool closes first.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!(
                "Warning: failed to drop test database {}: {e}",
                self.db_name
            );
        }
    }
}

/// Builds the default thesis workspace for a fresh owner.
pub fn seed() -> WorkspaceSeed {
    WorkspaceSeed::thesis_template(OwnerId::new(), &DefaultClock).expect("seed builds")
}

/// Inserts a fresh seed and returns it.
pub fn seeded(rt: &Runtime, repository: &PostgresWorkspaceRepository) -> WorkspaceSeed {
    let workspace = seed();
    rt.block_on(repository.insert_workspace(&workspace))
        .expect("workspace insert");
    workspace
}

/// Returns the seeded phase at `index`.
pub fn phase(workspace: &WorkspaceSeed, index: usize) -> &Phase {
    workspace.phases.get(index).expect("seeded phase exists")
}

/// Builds a task in the first phase of `workspace`.
pub fn task(
    workspace: &WorkspaceSeed,
    title: &str,
    status_column: StatusColumn,
    column_order: u32,
) -> Task {
    Task::new(
        TaskDraft {
            project_id: workspace.project.id(),
            phase_id: phase(workspace, 0).id(),
            title: title.to_owned(),
            description: Some(format!("{title} notes")),
            status_column,
            priority: Priority::High,
            schedule: DateWindow::parse("2026-02-02", "2026-02-06").expect("valid window"),
            column_order,
        },
        &DefaultClock,
    )
}

/// Returns `(title, column, rank)` for every task, in board order.
pub fn board(
    rt: &Runtime,
    repository: &PostgresWorkspaceRepository,
    workspace: &WorkspaceSeed,
) -> Vec<(String, StatusColumn, u32)> {
    let mut tasks = rt
        .block_on(repository.list_tasks(workspace.project.id()))
        .expect("tasks load");
    tasks.sort_by_key(|task| (task.status_column(), task.column_order()));
    tasks
        .into_iter()
        .map(|task| {
            (
                task.title().to_owned(),
                task.status_column(),
                task.column_order(),
            )
        })
        .collect()
}
