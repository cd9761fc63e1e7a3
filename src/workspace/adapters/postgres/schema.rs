//! Diesel schema for workspace persistence.

diesel::table! {
    /// One project per owner.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Owning user; unique.
        owner_id -> Uuid,
        /// Project title.
        #[max_length = 1000]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// First day of the project window.
        start_date -> Date,
        /// Last day of the project window.
        end_date -> Date,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered, non-overlapping project phases.
    phases (id) {
        /// Phase identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Display name.
        #[max_length = 500]
        name -> Varchar,
        /// Position in the project sequence.
        order_index -> Int4,
        /// First day of the phase.
        start_date -> Date,
        /// Last day of the phase.
        end_date -> Date,
        /// Timeline colour token.
        #[max_length = 64]
        color_token -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Kanban board tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Phase the task belongs to.
        phase_id -> Uuid,
        /// Task title.
        #[max_length = 1000]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Board column in snake case.
        #[max_length = 32]
        status_column -> Varchar,
        /// Priority in snake case.
        #[max_length = 16]
        priority -> Varchar,
        /// First scheduled day.
        start_at -> Date,
        /// Last scheduled day.
        end_at -> Date,
        /// Dense zero-based rank within the column.
        column_order -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project deliverables.
    deliverables (id) {
        /// Deliverable identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Optional phase.
        phase_id -> Nullable<Uuid>,
        /// Deliverable title.
        #[max_length = 1000]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Status in snake case.
        #[max_length = 16]
        status -> Varchar,
        /// Resource URLs as a JSONB array of strings.
        resource_links -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Many-to-many links between tasks and deliverables.
    task_deliverables (task_id, deliverable_id) {
        /// Linked task.
        task_id -> Uuid,
        /// Linked deliverable.
        deliverable_id -> Uuid,
    }
}

diesel::joinable!(phases -> projects (project_id));
diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(deliverables -> projects (project_id));
diesel::joinable!(task_deliverables -> tasks (task_id));
diesel::joinable!(task_deliverables -> deliverables (deliverable_id));

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    phases,
    tasks,
    deliverables,
    task_deliverables,
);
