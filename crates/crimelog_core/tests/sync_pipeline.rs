use crimelog_core::{
    encode_events, ArchiveError, ArchiveRepository, ArchiveService, Event, EventSource,
    FetchError, FetchResult, InMemoryArchive, JsonFileArchive, Location, SortKey,
    SubcategoryKind, SyncError,
};
use std::cell::Cell;
use std::fs;

const ORIGIN: &str = "https://polisen.se/";

struct StubSource {
    payload: Option<Vec<u8>>,
    calls: Cell<usize>,
}

impl StubSource {
    fn events(events: &[Event]) -> Self {
        Self::raw(encode_events(events).unwrap())
    }

    fn raw(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: Some(payload.into()),
            calls: Cell::new(0),
        }
    }

    fn unavailable() -> Self {
        Self {
            payload: None,
            calls: Cell::new(0),
        }
    }
}

impl EventSource for StubSource {
    fn fetch_raw(&self) -> FetchResult<Vec<u8>> {
        self.calls.set(self.calls.get() + 1);
        self.payload.clone().ok_or_else(|| FetchError::Status {
            url: "https://polisen.se/api/events".to_string(),
            status: 503,
        })
    }
}

fn event(id: i64, datetime: &str, kind: &str, location: &str) -> Event {
    Event {
        id,
        datetime: datetime.to_string(),
        name: format!("{kind}, {location}"),
        summary: String::new(),
        url: format!("/aktuellt/handelser/2023/april/{id}/"),
        kind: kind.to_string(),
        location: Location {
            name: location.to_string(),
            gps: String::new(),
        },
    }
}

fn ids(events: &[Event]) -> Vec<i64> {
    events.iter().map(|event| event.id).collect()
}

fn archived_events() -> Vec<Event> {
    vec![
        event(1, "2023-04-24 12:00:00 +02:00", "Inbrott", "Lund"),
        event(2, "2023-04-25 12:00:00 +02:00", "Brand", "Kalmar"),
        event(3, "2023-04-26 12:00:00 +02:00", "Inbrott", "Kalmar"),
    ]
}

fn fetched_events() -> Vec<Event> {
    vec![
        event(3, "2023-04-26 12:00:00 +02:00", "Inbrott", "Kalmar"),
        event(4, "2023-04-23 09:30:00 +02:00", "Rån", "Lund"),
    ]
}

fn seeded_archive() -> InMemoryArchive {
    let archive = InMemoryArchive::new();
    archive.save(&archived_events()).unwrap();
    archive
}

#[test]
fn sync_merges_fetch_into_archive_and_persists_chronologically() {
    let archive = seeded_archive();
    let service = ArchiveService::new(StubSource::events(&fetched_events()), &archive, ORIGIN);

    let report = service.sync().unwrap();

    assert_eq!(report.fetched, 2);
    assert_eq!(report.archived, 3);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.total, 4);
    assert_eq!(report.added(), 1);

    let stored = archive.load().unwrap();
    assert_eq!(ids(&stored), vec![4, 1, 2, 3]);
    assert_eq!(
        ids(&service.events_sorted_by(SortKey::Id).unwrap()),
        vec![1, 2, 3, 4]
    );
}

#[test]
fn repeated_sync_is_idempotent() {
    let archive = seeded_archive();
    let service = ArchiveService::new(StubSource::events(&fetched_events()), &archive, ORIGIN);

    service.sync().unwrap();
    let first = archive.document();
    let report = service.sync().unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.added(), 0);
    assert_eq!(report.duplicates, 2);
    assert_eq!(archive.document(), first);
}

#[test]
fn missing_archive_file_persists_exactly_the_fetched_set() {
    let dir = tempfile::tempdir().unwrap();
    let archive = JsonFileArchive::new(dir.path().join("archive").join("archive.json"));
    let mut fetched = fetched_events();
    fetched.push(event(4, "2023-04-23 09:30:00 +02:00", "Rån", "Lund"));
    let service = ArchiveService::new(StubSource::events(&fetched), &archive, ORIGIN);

    let report = service.sync().unwrap();

    assert_eq!(report.archived, 0);
    assert_eq!(report.duplicates, 1);
    assert_eq!(ids(&archive.load().unwrap()), vec![4, 3]);
}

#[test]
fn corrupt_archive_aborts_without_saving() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.json");
    fs::write(&path, br#"[{"id": 1, "datetime": "2023-04-24 12:00"#).unwrap();
    let archive = JsonFileArchive::new(&path);
    let service = ArchiveService::new(StubSource::events(&fetched_events()), &archive, ORIGIN);

    let err = service.sync().unwrap_err();

    assert!(matches!(err, SyncError::Archive(ArchiveError::Decode(_))));
    assert_eq!(
        fs::read(&path).unwrap(),
        br#"[{"id": 1, "datetime": "2023-04-24 12:00"#.to_vec()
    );
}

#[test]
fn fetch_failure_leaves_archive_untouched() {
    let archive = seeded_archive();
    let before = archive.document();
    let source = StubSource::unavailable();
    let service = ArchiveService::new(&source, &archive, ORIGIN);

    let err = service.sync().unwrap_err();

    assert!(matches!(err, SyncError::Fetch(FetchError::Status { status: 503, .. })));
    assert_eq!(source.calls.get(), 1);
    assert_eq!(archive.document(), before);
}

#[test]
fn malformed_feed_is_rejected_before_merge() {
    let archive = seeded_archive();
    let before = archive.document();
    let service = ArchiveService::new(StubSource::raw(&b"<html>503</html>"[..]), &archive, ORIGIN);

    let err = service.sync().unwrap_err();

    assert!(matches!(err, SyncError::Decode(_)));
    assert_eq!(archive.document(), before);
}

#[test]
fn unparsable_timestamp_aborts_before_saving() {
    let archive = seeded_archive();
    let before = archive.document();
    let bad = vec![event(9, "igår kväll", "Brand", "Lund")];
    let service = ArchiveService::new(StubSource::events(&bad), &archive, ORIGIN);

    let err = service.sync().unwrap_err();

    assert!(matches!(err, SyncError::TimeParse(ref parse) if parse.event_id == 9));
    assert_eq!(archive.document(), before);
}

#[test]
fn queries_read_the_archive_in_chronological_order() {
    let archive = seeded_archive();
    let service = ArchiveService::new(StubSource::unavailable(), &archive, ORIGIN);

    assert_eq!(ids(&service.all_events().unwrap()), vec![1, 2, 3]);
    assert_eq!(ids(&service.subcategory_by_type("inbrott").unwrap()), vec![1, 3]);
    assert_eq!(ids(&service.subcategory_by_location("KALMAR").unwrap()), vec![2, 3]);
    assert!(service.subcategory_by_type("Bombhot").unwrap().is_empty());

    let groups = service.subcategories(SubcategoryKind::Type).unwrap();
    let keys: Vec<_> = groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["Brand", "Inbrott"]);
}

#[test]
fn find_event_and_detail_url() {
    let archive = seeded_archive();
    let service = ArchiveService::new(StubSource::unavailable(), &archive, ORIGIN);

    let found = service.find_event(2).unwrap().expect("event 2 is archived");
    assert_eq!(found.location.name, "Kalmar");
    assert_eq!(
        service.detail_url(&found),
        "https://polisen.se/aktuellt/handelser/2023/april/2/"
    );
    assert!(service.find_event(42).unwrap().is_none());
}

#[test]
fn persist_rejects_duplicate_ids_and_replaces_corpus_otherwise() {
    let archive = seeded_archive();
    let before = archive.document();
    let service = ArchiveService::new(StubSource::unavailable(), &archive, ORIGIN);

    let mut duplicated = archived_events();
    duplicated.push(event(2, "2023-04-27 12:00:00 +02:00", "Brand", "Kalmar"));
    let err = service.persist(&duplicated).unwrap_err();
    assert!(matches!(err, SyncError::DuplicateId(2)));
    assert_eq!(archive.document(), before);

    let replacement = vec![event(10, "2023-04-28 12:00:00 +02:00", "Stöld", "Visby")];
    service.persist(&replacement).unwrap();
    assert_eq!(archive.load().unwrap(), replacement);
}

#[test]
fn persist_rejects_unparsable_timestamp_without_writing() {
    let archive = seeded_archive();
    let before = archive.document();
    let service = ArchiveService::new(StubSource::unavailable(), &archive, ORIGIN);

    let corpus = vec![
        event(1, "2023-04-26 10:00:00 +02:00", "Brand", "Lund"),
        event(2, "igår", "Brand", "Lund"),
    ];
    let err = service.persist(&corpus).unwrap_err();

    assert!(matches!(err, SyncError::TimeParse(ref parse) if parse.event_id == 2));
    assert_eq!(archive.document(), before);
    assert_eq!(ids(&service.all_events().unwrap()), vec![1, 2, 3]);
}

#[test]
fn persist_stores_corpus_in_chronological_order() {
    let archive = seeded_archive();
    let service = ArchiveService::new(StubSource::unavailable(), &archive, ORIGIN);

    let corpus = vec![
        event(5, "2023-04-27 08:00:00 +02:00", "Stöld", "Visby"),
        event(4, "2023-04-20 08:00:00 +02:00", "Stöld", "Visby"),
    ];
    service.persist(&corpus).unwrap();

    assert_eq!(ids(&archive.load().unwrap()), vec![4, 5]);
}
