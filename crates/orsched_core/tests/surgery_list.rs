use chrono::NaiveDate;
use orsched_core::db::open_db_in_memory;
use orsched_core::repo::surgery_repo::{SqliteSurgeryRepository, SurgeryListQuery, SurgeryRepository};
use orsched_core::service::surgery_service::SurgeryService;
use orsched_core::{ClockTime, NewSurgery, ProtocolLength, RepoError, SurgeryPatch};
use rusqlite::Connection;
use uuid::Uuid;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn at(text: &str) -> ClockTime {
    ClockTime::parse(text).unwrap()
}

fn service(conn: &Connection) -> SurgeryService<SqliteSurgeryRepository<'_>> {
    SurgeryService::new(SqliteSurgeryRepository::new(conn))
}

#[test]
fn add_accepts_unknown_or_numbers_and_defaults_text_fields() {
    let conn = open_db_in_memory().unwrap();
    let surgeries = service(&conn);

    let added = surgeries
        .add_surgery(NewSurgery::new("99", ProtocolLength::Short, at("08:30")).on_date(day(4)))
        .unwrap();
    let loaded = surgeries.get_surgery(added.id).unwrap().unwrap();
    assert_eq!(loaded, added);
    assert_eq!(loaded.description, "");
    assert_eq!(loaded.specialty, "");
    assert_eq!(loaded.start_time, at("08:30"));
}

#[test]
fn by_date_view_and_marker_lookup() {
    let conn = open_db_in_memory().unwrap();
    let surgeries = service(&conn);

    surgeries
        .add_surgery(
            NewSurgery::new("3-1", ProtocolLength::Long, at("13:00"))
                .on_date(day(4))
                .with_description("CABG")
                .with_specialty("Cardiac"),
        )
        .unwrap();
    surgeries
        .add_surgery(NewSurgery::new("2", ProtocolLength::Short, at("09:00")).on_date(day(5)))
        .unwrap();
    surgeries
        .add_surgery(NewSurgery::new("1", ProtocolLength::Short, at("07:15")).on_date(day(4)))
        .unwrap();

    let on_day: Vec<_> = surgeries
        .get_surgeries_by_date(day(4))
        .unwrap()
        .into_iter()
        .map(|surgery| surgery.or_number)
        .collect();
    assert_eq!(on_day, vec!["3-1", "1"]);

    assert!(surgeries.has_surgeries_on(day(5)).unwrap());
    assert!(!surgeries.has_surgeries_on(day(6)).unwrap());

    let in_or = SqliteSurgeryRepository::new(&conn)
        .list_surgeries(&SurgeryListQuery {
            or_number: Some("2".to_string()),
            ..SurgeryListQuery::default()
        })
        .unwrap();
    assert_eq!(in_or.len(), 1);
    assert_eq!(in_or[0].date, day(5));
}

#[test]
fn update_merges_patch_and_remove_deletes() {
    let conn = open_db_in_memory().unwrap();
    let surgeries = service(&conn);
    let surgery = surgeries
        .add_surgery(NewSurgery::new("4", ProtocolLength::Short, at("10:00")).on_date(day(4)))
        .unwrap();

    let updated = surgeries
        .update_surgery(
            surgery.id,
            &SurgeryPatch {
                start_time: Some(at("11:45")),
                protocol_length: Some(ProtocolLength::Long),
                ..SurgeryPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.start_time, at("11:45"));
    assert_eq!(updated.protocol_length, ProtocolLength::Long);
    assert_eq!(updated.or_number, "4");

    surgeries.remove_surgery(surgery.id).unwrap();
    assert!(surgeries.list_surgeries().unwrap().is_empty());
}

#[test]
fn unknown_ids_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let surgeries = service(&conn);
    let missing = Uuid::new_v4();

    assert!(matches!(
        surgeries
            .update_surgery(missing, &SurgeryPatch::default())
            .unwrap_err(),
        RepoError::NotFound { id, .. } if id == missing
    ));
    assert!(matches!(
        surgeries.remove_surgery(missing).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn malformed_stored_start_time_surfaces_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO surgeries (id, or_number, protocol_length, start_time, date)
         VALUES (?1, '1', 'short', '8am', '2025-03-04');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    let err = service(&conn).list_surgeries().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
