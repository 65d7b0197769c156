use chrono::NaiveDate;
use orsched_core::db::open_db_in_memory;
use orsched_core::repo::assignment_repo::SqliteAssignmentRepository;
use orsched_core::repo::nurse_repo::SqliteNurseRepository;
use orsched_core::repo::surgery_repo::SqliteSurgeryRepository;
use orsched_core::service::nurse_service::NurseService;
use orsched_core::service::schedule_service::ScheduleService;
use orsched_core::service::surgery_service::SurgeryService;
use orsched_core::{
    ClockTime, NewNurse, NewSurgery, NurseRole, ProtocolLength, ScheduleError, ShiftType,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use std::collections::HashSet;

type SqliteScheduleService<'conn> = ScheduleService<
    SqliteNurseRepository<'conn>,
    SqliteSurgeryRepository<'conn>,
    SqliteAssignmentRepository<'conn>,
>;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn at(text: &str) -> ClockTime {
    ClockTime::parse(text).unwrap()
}

fn schedule(conn: &Connection) -> SqliteScheduleService<'_> {
    ScheduleService::new(
        SqliteNurseRepository::new(conn),
        SqliteSurgeryRepository::new(conn),
        SqliteAssignmentRepository::new(conn),
    )
}

fn seed_nurses(conn: &Connection, names: &[&str]) -> HashSet<uuid::Uuid> {
    let nurses = NurseService::new(SqliteNurseRepository::new(conn));
    names
        .iter()
        .map(|name| {
            nurses
                .add_nurse(
                    NewNurse::new(*name, NurseRole::Rn, ShiftType::Early, at("07:00"), at("19:00"))
                        .on_date(day(4)),
                )
                .unwrap()
                .id
        })
        .collect()
}

fn seed_surgery(conn: &Connection, or_number: &str, start: &str, date: NaiveDate) {
    SurgeryService::new(SqliteSurgeryRepository::new(conn))
        .add_surgery(NewSurgery::new(or_number, ProtocolLength::Short, at(start)).on_date(date))
        .unwrap();
}

#[test]
fn generation_covers_every_surgery_in_order_with_roster_nurses() {
    let conn = open_db_in_memory().unwrap();
    let roster = seed_nurses(&conn, &["Ana", "Bo", "Cy"]);
    seed_surgery(&conn, "1", "08:00", day(4));
    seed_surgery(&conn, "3-2", "23:30", day(4));
    seed_surgery(&conn, "5", "10:15", day(9));

    let draft = schedule(&conn)
        .generate(&mut StdRng::seed_from_u64(11), 2)
        .unwrap();

    assert_eq!(draft.len(), 3);
    let or_numbers: Vec<_> = draft
        .assignments()
        .iter()
        .map(|assignment| assignment.or_number.as_str())
        .collect();
    assert_eq!(or_numbers, vec!["1", "3-2", "5"]);
    assert!(draft
        .assignments()
        .iter()
        .all(|assignment| roster.contains(&assignment.nurse_id)));

    assert_eq!(draft.assignments()[0].end_time, at("10:00"));
    assert_eq!(draft.assignments()[1].end_time, at("01:30"));
    assert_eq!(draft.assignments()[2].end_time, at("12:15"));
}

#[test]
fn generation_publishes_to_the_shared_list() {
    let conn = open_db_in_memory().unwrap();
    seed_nurses(&conn, &["Ana", "Bo"]);
    seed_surgery(&conn, "1", "08:00", day(4));
    seed_surgery(&conn, "2", "09:00", day(4));

    let service = schedule(&conn);
    let draft = service.generate(&mut StdRng::seed_from_u64(3), 2).unwrap();
    assert_eq!(service.assignments().unwrap(), draft.assignments());
}

#[test]
fn same_seed_yields_same_draft() {
    let conn = open_db_in_memory().unwrap();
    seed_nurses(&conn, &["Ana", "Bo", "Cy", "Dee", "Ed"]);
    for hour in 6..14 {
        seed_surgery(&conn, &hour.to_string(), &format!("{hour:02}:00"), day(4));
    }

    let service = schedule(&conn);
    let first = service.generate(&mut StdRng::seed_from_u64(42), 2).unwrap();
    let second = service.generate(&mut StdRng::seed_from_u64(42), 2).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_slot_length_is_applied() {
    let conn = open_db_in_memory().unwrap();
    seed_nurses(&conn, &["Ana"]);
    seed_surgery(&conn, "1", "22:00", day(4));

    let draft = schedule(&conn)
        .generate(&mut StdRng::seed_from_u64(1), 3)
        .unwrap();
    assert_eq!(draft.assignments()[0].end_time, at("01:00"));
}

#[test]
fn empty_surgery_list_yields_empty_draft_even_without_nurses() {
    let conn = open_db_in_memory().unwrap();
    let draft = schedule(&conn)
        .generate(&mut StdRng::seed_from_u64(1), 2)
        .unwrap();
    assert!(draft.is_empty());
}

#[test]
fn missing_nurses_fail_without_touching_the_shared_list() {
    let conn = open_db_in_memory().unwrap();
    let service = schedule(&conn);
    let nurse_ids = seed_nurses(&conn, &["Ana"]);
    seed_surgery(&conn, "1", "08:00", day(4));
    let published = service.generate(&mut StdRng::seed_from_u64(5), 2).unwrap();

    let nurse_id = *nurse_ids.iter().next().unwrap();
    NurseService::new(SqliteNurseRepository::new(&conn))
        .delete_nurse(nurse_id)
        .unwrap();
    seed_surgery(&conn, "2", "09:00", day(4));

    let err = service
        .generate(&mut StdRng::seed_from_u64(5), 2)
        .unwrap_err();
    assert!(matches!(err, ScheduleError::NoNursesAvailable { surgeries: 2 }));
    assert_eq!(service.assignments().unwrap(), published.assignments());
}

#[test]
fn finalize_saves_reassigned_draft() {
    let conn = open_db_in_memory().unwrap();
    let nurse_ids = seed_nurses(&conn, &["Ana", "Bo"]);
    seed_surgery(&conn, "1", "08:00", day(4));
    seed_surgery(&conn, "1", "10:00", day(4));

    let service = schedule(&conn);
    let mut draft = service.generate(&mut StdRng::seed_from_u64(8), 2).unwrap();
    let published = service.assignments().unwrap();

    let target = *nurse_ids
        .iter()
        .find(|id| Some(**id) != draft.nurse_for("1", at("08:00")))
        .unwrap();
    assert_eq!(draft.reassign_nurse("1", at("08:00"), target), 1);
    assert_eq!(service.assignments().unwrap(), published);

    assert_eq!(service.finalize(&draft).unwrap(), 2);
    let saved = service.assignments().unwrap();
    assert_eq!(saved, draft.assignments());
    assert_eq!(saved[0].nurse_id, target);
    assert_eq!(saved[1].nurse_id, published[1].nurse_id);
}

#[test]
fn set_assignments_replaces_the_list_wholesale() {
    let conn = open_db_in_memory().unwrap();
    seed_nurses(&conn, &["Ana"]);
    seed_surgery(&conn, "1", "08:00", day(4));
    seed_surgery(&conn, "2", "08:00", day(4));

    let service = schedule(&conn);
    let draft = service.generate(&mut StdRng::seed_from_u64(2), 2).unwrap();
    service.set_assignments(&draft.assignments()[1..]).unwrap();
    assert_eq!(service.assignments().unwrap(), &draft.assignments()[1..]);

    service.set_assignments(&[]).unwrap();
    assert!(service.assignments().unwrap().is_empty());
}
