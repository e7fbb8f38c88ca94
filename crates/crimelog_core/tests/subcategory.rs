use crimelog_core::{
    filter_by_location, filter_by_type, partition, subcategory_keys, Event, Location,
    SubcategoryKind,
};

fn event(id: i64, kind: &str, location: &str) -> Event {
    Event {
        id,
        datetime: "2023-04-26 10:29:50 +02:00".to_string(),
        name: format!("{kind}, {location}"),
        summary: String::new(),
        url: format!("/aktuellt/handelser/{id}/"),
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

fn corpus() -> Vec<Event> {
    vec![
        event(5, "Inbrott", "Uppsala"),
        event(2, "Brand", "Örebro"),
        event(8, "Inbrott", "Örebro"),
        event(1, "Inbrott, försök", "Uppsala"),
        event(3, "inbrott", "ÖREBRO"),
    ]
}

#[test]
fn type_filter_returns_matching_subsequence_in_order() {
    let matches = filter_by_type(&corpus(), "Inbrott");
    assert_eq!(ids(&matches), vec![5, 8, 3]);
}

#[test]
fn filters_ignore_case_including_non_ascii() {
    assert_eq!(ids(&filter_by_type(&corpus(), "INBROTT")), vec![5, 8, 3]);
    assert_eq!(ids(&filter_by_location(&corpus(), "örebro")), vec![2, 8, 3]);
    assert_eq!(ids(&filter_by_location(&corpus(), " Uppsala ")), vec![5, 1]);
}

#[test]
fn unknown_key_yields_empty_sequence() {
    assert!(filter_by_type(&corpus(), "Sjölagen").is_empty());
    assert!(filter_by_location(&corpus(), "Kiruna").is_empty());
    assert!(filter_by_type(&[], "Inbrott").is_empty());
}

#[test]
fn partition_groups_by_normalized_key_and_keeps_first_spelling() {
    let groups = partition(&corpus(), SubcategoryKind::Location);

    let keys: Vec<_> = groups.iter().map(|group| group.key.as_str()).collect();
    assert_eq!(keys, vec!["Uppsala", "Örebro"]);
    assert_eq!(ids(&groups[1].events), vec![2, 8, 3]);

    let total: usize = groups.iter().map(|group| group.events.len()).sum();
    assert_eq!(total, corpus().len());
}

#[test]
fn subcategory_keys_lists_distinct_types() {
    let keys = subcategory_keys(&corpus(), SubcategoryKind::Type);
    assert_eq!(keys, vec!["Brand", "Inbrott", "Inbrott, försök"]);
}

#[test]
fn filter_and_partition_agree_on_padded_field_values() {
    let corpus = vec![event(1, "Brand", "Kalmar"), event(2, "Brand ", "Kalmar ")];

    let groups = partition(&corpus, SubcategoryKind::Location);
    assert_eq!(groups.len(), 1);
    assert_eq!(ids(&groups[0].events), vec![1, 2]);

    assert_eq!(ids(&filter_by_location(&corpus, "Kalmar")), vec![1, 2]);
    assert_eq!(ids(&filter_by_type(&corpus, "brand")), vec![1, 2]);
}
