use chrono::NaiveDate;
use worktrack_core::db::{open_db_in_memory, DbError};
use worktrack_core::{
    ClientService, ProjectService, RepoError, RepoResult, SqliteClientRepository,
    SqliteProjectRepository, SqliteTaskRepository, Task, TaskRepository, TaskService, TaskStatus,
    ValidationError,
};

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seeds one client and returns its id.
fn seed_client(conn: &rusqlite::Connection) -> i64 {
    let clients = ClientService::new(SqliteClientRepository::new(conn));
    clients
        .create("Acme Corp", "sales@acme.example")
        .unwrap()
        .id()
        .unwrap()
}

#[test]
fn project_requires_existing_client() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));

    let err = projects
        .create("Redesign", 77, date(2024, 1, 1), date(2024, 6, 1))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { table: "clients", id: 77 }));
}

#[test]
fn project_dates_round_trip_through_the_store() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));

    let project = projects
        .create("Redesign", client_id, date(2024, 1, 1), date(2024, 6, 1))
        .unwrap();

    let loaded = projects.get(project.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded.start_date(), date(2024, 1, 1));
    assert_eq!(loaded.end_date(), date(2024, 6, 1));
    assert_eq!(loaded.client_id(), client_id);

    let for_client = projects.list_by_client(client_id).unwrap();
    assert_eq!(for_client.len(), 1);
}

#[test]
fn project_update_revalidates_date_ordering() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));

    let project = projects
        .create("Redesign", client_id, date(2024, 1, 1), date(2024, 6, 1))
        .unwrap();
    let id = project.id().unwrap();

    let err = projects
        .update(id, "Redesign", date(2024, 6, 1), date(2024, 6, 1))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidDate { field: "end date", .. })
    ));
    // Rejected update leaves the stored dates unchanged.
    let loaded = projects.get(id).unwrap().unwrap();
    assert_eq!(loaded.end_date(), date(2024, 6, 1));
    assert_eq!(loaded.start_date(), date(2024, 1, 1));

    projects
        .update(id, "Redesign v2", date(2024, 2, 1), date(2024, 7, 1))
        .unwrap();
    let loaded = projects.get(id).unwrap().unwrap();
    assert_eq!(loaded.name(), "Redesign v2");
    assert_eq!(loaded.end_date(), date(2024, 7, 1));
}

#[test]
fn saving_an_already_persisted_project_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));

    let mut project =
        worktrack_core::Project::new("Redesign", client_id, date(2024, 1, 1), date(2024, 6, 1))
            .unwrap();
    projects.save(&mut project).unwrap();
    let id = project.id().unwrap();

    let err = projects.save(&mut project).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AlreadyPersisted { table: "project", id: got } if got == id
    ));
    assert_eq!(projects.list().unwrap().len(), 1);
}

#[test]
fn task_due_date_is_bounded_by_project_end() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let tasks = TaskService::with_today_source(SqliteTaskRepository::new(&conn), fixed_today);

    let project = projects
        .create("Release push", client_id, date(2024, 1, 1), date(2024, 3, 1))
        .unwrap();
    let project_id = project.id().unwrap();

    let err = tasks
        .create("Ship release", project_id, date(2024, 3, 15), None)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidDate { field: "due date", .. })
    ));
    assert!(tasks.list_by_project(project_id).unwrap().is_empty());

    let task = tasks
        .create("Ship release", project_id, date(2024, 2, 20), None)
        .unwrap();
    assert_eq!(task.due_date(), date(2024, 2, 20));
    assert_eq!(task.status(), TaskStatus::InProgress);
}

#[test]
fn task_due_date_must_not_precede_today() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let tasks = TaskService::with_today_source(SqliteTaskRepository::new(&conn), fixed_today);

    let project = projects
        .create("Release push", client_id, date(2024, 1, 1), date(2024, 3, 1))
        .unwrap();
    let project_id = project.id().unwrap();

    let err = tasks
        .create("Fix login bug", project_id, date(2024, 1, 14), None)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::InvalidDate { field: "due date", .. })
    ));

    // Due today is allowed.
    tasks
        .create("Fix login bug", project_id, fixed_today(), None)
        .unwrap();
}

#[test]
fn task_requires_existing_project_and_employee() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let tasks = TaskService::with_today_source(SqliteTaskRepository::new(&conn), fixed_today);

    let err = tasks
        .create("Orphan task", 99, date(2024, 2, 1), None)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { table: "project", id: 99 }));

    let project = projects
        .create("Release push", client_id, date(2024, 1, 1), date(2024, 3, 1))
        .unwrap();
    let err = tasks
        .create("Assigned task", project.id().unwrap(), date(2024, 2, 1), Some(5))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { table: "employee", id: 5 }));
}

#[test]
fn status_updates_and_search() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let tasks = TaskService::with_today_source(SqliteTaskRepository::new(&conn), fixed_today);

    let project = projects
        .create("Release push", client_id, date(2024, 1, 1), date(2024, 3, 1))
        .unwrap();
    let project_id = project.id().unwrap();

    let task = tasks
        .create("Write release notes", project_id, date(2024, 2, 1), None)
        .unwrap();
    let task_id = task.id().unwrap();

    tasks.set_status(task_id, TaskStatus::Completed).unwrap();
    let loaded = tasks.get(task_id).unwrap().unwrap();
    assert_eq!(loaded.status(), TaskStatus::Completed);

    let hits = tasks.search("release notes").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), Some(task_id));

    // Status text is searchable too.
    let by_status = tasks.search("completed").unwrap();
    assert_eq!(by_status.len(), 1);
}

/// Repository double whose project-end lookup always fails while inserts
/// still work, mimicking a store that errors on that one read.
struct FailingEndDateLookupRepo;

impl TaskRepository for FailingEndDateLookupRepo {
    fn insert(&self, _task: &Task) -> RepoResult<i64> {
        Ok(7)
    }

    fn set_status(&self, _id: i64, _status: TaskStatus) -> RepoResult<()> {
        unreachable!("not exercised")
    }

    fn set_assignee(&self, _id: i64, _employee_id: Option<i64>) -> RepoResult<()> {
        unreachable!("not exercised")
    }

    fn get(&self, _id: i64) -> RepoResult<Option<Task>> {
        unreachable!("not exercised")
    }

    fn list_by_project(&self, _project_id: i64) -> RepoResult<Vec<Task>> {
        unreachable!("not exercised")
    }

    fn list_by_employee(&self, _employee_id: i64) -> RepoResult<Vec<Task>> {
        unreachable!("not exercised")
    }

    fn search(&self, _text: &str) -> RepoResult<Vec<Task>> {
        unreachable!("not exercised")
    }

    fn delete(&self, _id: i64) -> RepoResult<()> {
        unreachable!("not exercised")
    }

    fn project_end_date(&self, _project_id: i64) -> RepoResult<Option<NaiveDate>> {
        Err(RepoError::Db(DbError::Sqlite(
            rusqlite::Error::InvalidQuery,
        )))
    }
}

#[test]
fn failed_end_date_lookup_skips_the_constraint() {
    // A failing lookup downgrades to "no end-date constraint": creation
    // proceeds instead of propagating the store error.
    let tasks = TaskService::with_today_source(FailingEndDateLookupRepo, fixed_today);

    let task = tasks
        .create("Ship release", 1, date(2030, 6, 1), None)
        .unwrap();
    assert_eq!(task.id(), Some(7));
    assert_eq!(task.due_date(), date(2030, 6, 1));
}

#[test]
fn unknown_status_in_store_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let client_id = seed_client(&conn);
    let projects = ProjectService::new(SqliteProjectRepository::new(&conn));
    let tasks = TaskService::with_today_source(SqliteTaskRepository::new(&conn), fixed_today);

    let project = projects
        .create("Release push", client_id, date(2024, 1, 1), date(2024, 3, 1))
        .unwrap();
    conn.execute(
        "INSERT INTO task (description, project_id, due_date, status)
         VALUES ('Broken row here', ?1, '2024-02-01', 'done');",
        [project.id().unwrap()],
    )
    .unwrap();

    let err = tasks.list_by_project(project.id().unwrap()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
