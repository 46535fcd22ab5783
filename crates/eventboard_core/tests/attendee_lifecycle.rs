use eventboard_core::db::open_db_in_memory;
use eventboard_core::{
    AssignmentMaintainer, AttendeeDraft, AttendeeService, AttendeeServiceError,
    SqliteAssignmentRepository, SqliteAttendeeRepository, SqliteTaskRepository, TaskDraft,
    TaskService, ValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

fn attendee_service(
    conn: &Connection,
) -> AttendeeService<SqliteAttendeeRepository<'_>, SqliteAssignmentRepository<'_>> {
    AttendeeService::new(
        SqliteAttendeeRepository::new(conn),
        AssignmentMaintainer::new(SqliteAssignmentRepository::new(conn)),
    )
}

fn task_service(
    conn: &Connection,
) -> TaskService<SqliteTaskRepository<'_>, SqliteAssignmentRepository<'_>> {
    TaskService::new(
        SqliteTaskRepository::new(conn),
        AssignmentMaintainer::new(SqliteAssignmentRepository::new(conn)),
    )
}

fn draft(name: &str, email: &str) -> AttendeeDraft {
    AttendeeDraft {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn create_starts_with_empty_task_list() {
    let conn = open_db_in_memory().unwrap();
    let service = attendee_service(&conn);

    let created = service.create(&draft("Ana", "ana@x.com")).unwrap();
    assert_eq!(created.name, "Ana");
    assert_eq!(created.email, "ana@x.com");
    assert!(created.assigned_tasks.is_empty());
}

#[test]
fn duplicate_email_is_a_conflict_and_leaves_original_intact() {
    let conn = open_db_in_memory().unwrap();
    let service = attendee_service(&conn);
    let original = service.create(&draft("Ana", "ana@x.com")).unwrap();

    let err = service.create(&draft("Impostor", "ANA@x.com")).unwrap_err();
    assert!(matches!(err, AttendeeServiceError::DuplicateEmail(_)));

    let listed = service.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, original.id);
    assert_eq!(listed[0].name, "Ana");
}

#[test]
fn create_rejects_missing_fields_and_bad_email() {
    let conn = open_db_in_memory().unwrap();
    let service = attendee_service(&conn);

    let err = service.create(&draft("", "ana@x.com")).unwrap_err();
    assert!(matches!(
        err,
        AttendeeServiceError::Invalid(ValidationError::MissingField("name"))
    ));

    let err = service.create(&draft("Ana", "not-an-email")).unwrap_err();
    assert!(matches!(
        err,
        AttendeeServiceError::Invalid(ValidationError::InvalidEmail(_))
    ));
}

#[test]
fn delete_unknown_attendee_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = attendee_service(&conn);
    let missing = Uuid::new_v4();

    let err = service.delete(missing).unwrap_err();
    assert!(matches!(err, AttendeeServiceError::AttendeeNotFound(id) if id == missing));
}

#[test]
fn deleting_an_attendee_unassigns_it_from_every_task() {
    let conn = open_db_in_memory().unwrap();
    let attendees = attendee_service(&conn);
    let tasks = task_service(&conn);

    let ana = attendees.create(&draft("Ana", "ana@x.com")).unwrap();
    let bo = attendees.create(&draft("Bo", "bo@x.com")).unwrap();

    let shared = tasks
        .create(&TaskDraft {
            name: "Setup booth".into(),
            deadline: Some("2024-05-01".parse().unwrap()),
            assigned_attendees: vec![ana.id, bo.id],
            status: None,
            event_id: None,
        })
        .unwrap();
    let solo = tasks
        .create(&TaskDraft {
            name: "Print badges".into(),
            deadline: Some("2024-05-02".parse().unwrap()),
            assigned_attendees: vec![ana.id],
            status: None,
            event_id: None,
        })
        .unwrap();

    attendees.delete(ana.id).unwrap();
    assert!(attendees.get(ana.id).unwrap().is_none());

    let shared = tasks.get(shared.id).unwrap().unwrap();
    assert_eq!(shared.assigned_attendees, vec![bo.id]);

    let solo = tasks.get(solo.id).unwrap().unwrap();
    assert!(solo.assigned_attendees.is_empty());

    // Bo's own references are untouched.
    let bo = attendees.get(bo.id).unwrap().unwrap();
    assert_eq!(bo.assigned_tasks, vec![shared.id]);
}

#[test]
fn freed_email_can_be_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = attendee_service(&conn);

    let first = service.create(&draft("Ana", "ana@x.com")).unwrap();
    service.delete(first.id).unwrap();

    let second = service.create(&draft("Ana Again", "ana@x.com")).unwrap();
    assert_ne!(second.id, first.id);
}
