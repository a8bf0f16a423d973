use hostel_finder::models::Room;
use hostel_finder::search::QuickFilters;
use hostel_finder::{compute, FilterState, Listing, QuickFilter, SelectionSetController, SortStrategy, ToggleOutcome};
use proptest::prelude::*;

fn alpha_beta() -> Vec<Listing> {
    vec![
        Listing {
            id: "alpha".into(),
            name: "Alpha".into(),
            verified: true,
            available_rooms: 5,
            price_range_min: 300.0,
            ..Default::default()
        },
        Listing {
            id: "beta".into(),
            name: "Beta".into(),
            verified: false,
            available_rooms: 10,
            price_range_min: 200.0,
            ..Default::default()
        },
    ]
}

fn names(listings: &[&Listing]) -> Vec<String> {
    listings.iter().map(|l| l.name.clone()).collect()
}

#[test]
fn default_sort_puts_verified_first() {
    let listings = alpha_beta();
    let out = compute(&listings, "", &FilterState::default(), &QuickFilters::new());
    assert_eq!(names(&out), vec!["Alpha", "Beta"]);
}

#[test]
fn lowest_price_sort() {
    let listings = alpha_beta();
    let filters = FilterState {
        sort_by: SortStrategy::LowestPrice,
        ..Default::default()
    };
    let out = compute(&listings, "", &filters, &QuickFilters::new());
    assert_eq!(names(&out), vec!["Beta", "Alpha"]);
}

#[test]
fn verified_quick_filter() {
    let listings = alpha_beta();
    let quick: QuickFilters = [QuickFilter::Verified].into();
    let out = compute(&listings, "", &FilterState::default(), &quick);
    assert_eq!(names(&out), vec!["Alpha"]);
}

#[test]
fn sheet_amenities_only_feed_the_badge() {
    let listings = vec![Listing {
        id: "plain".into(),
        name: "Plain Lodge".into(),
        available_rooms: 3,
        price_range_min: 400.0,
        ..Default::default()
    }];
    let filters = FilterState {
        amenities: ["WiFi".to_string()].into(),
        ..Default::default()
    };

    let out = compute(&listings, "", &filters, &QuickFilters::new());
    assert_eq!(out.len(), 1);
    assert_eq!(filters.active_count(), 1);

    let quick: QuickFilters = [QuickFilter::Wifi].into();
    assert!(compute(&listings, "", &filters, &quick).is_empty());
}

#[test]
fn trailing_space_in_query_is_significant() {
    let listings = vec![Listing {
        id: "q".into(),
        name: "Alpha".into(),
        address: "1 Ring Road".into(),
        distance_from_campus: "5 min walk".into(),
        description: Some("Quiet".into()),
        available_rooms: 2,
        ..Default::default()
    }];
    let filters = FilterState::default();
    let quick = QuickFilters::new();

    // the description ends the searchable text
    assert_eq!(compute(&listings, "quiet", &filters, &quick).len(), 1);
    assert!(compute(&listings, "quiet ", &filters, &quick).is_empty());
    assert_eq!(compute(&listings, "  ", &filters, &quick).len(), 1);
}

#[test]
fn compare_selection_walkthrough() {
    let mut controller = SelectionSetController::new();
    controller.toggle_compare_mode();

    for id in ["a", "b", "c"] {
        assert_eq!(controller.toggle_select(id), ToggleOutcome::Added);
    }
    assert_eq!(controller.selected(), ["a", "b", "c"]);

    let outcome = controller.toggle_select("d");
    assert_eq!(outcome, ToggleOutcome::LimitReached);
    assert!(outcome.notice().is_some());
    assert_eq!(controller.selected(), ["a", "b", "c"]);

    controller.toggle_select("a");
    assert_eq!(controller.selected(), ["b", "c"]);
    assert_eq!(controller.compare_param().as_deref(), Some("b,c"));
}

#[test]
fn malformed_listings_degrade_instead_of_failing() {
    let listings: Vec<Listing> = serde_json::from_str(
        r#"[
            {"id": "bare"},
            {"id": "nulls", "rooms": null, "amenities": null, "images": null, "available_rooms": null},
            {"id": "ok", "name": "Fine", "available_rooms": 2, "price_range_min": 100}
        ]"#,
    )
    .unwrap();

    let out = compute(&listings, "", &FilterState::default(), &QuickFilters::new());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "ok");

    let quick: QuickFilters = QuickFilter::ALL.into_iter().collect();
    let filters = FilterState {
        show_sold_out: true,
        room_types: ["Single Room".to_string()].into(),
        ..Default::default()
    };
    assert!(compute(&listings, "", &filters, &quick).is_empty());
}

fn arb_listing() -> impl Strategy<Value = Listing> {
    (
        "[a-z]{1,6}",
        any::<bool>(),
        -2i64..20,
        0u32..6000,
        prop::collection::vec(prop::sample::select(vec!["Single Room", "Shared Room", "Apartment"]), 0..3),
        prop::collection::vec(
            prop::sample::select(vec!["WiFi", "24/7 Security", "Water Tank", "Generator"]),
            0..4,
        ),
    )
        .prop_map(|(name, verified, rooms, price, room_types, amenities)| Listing {
            id: name.clone(),
            name,
            verified,
            available_rooms: rooms,
            price_range_min: price as f64,
            price_range_max: price as f64 + 500.0,
            rooms: room_types
                .into_iter()
                .map(|room_type| Room {
                    room_type: room_type.to_string(),
                    ..Default::default()
                })
                .collect(),
            amenities: amenities.into_iter().map(Into::into).collect(),
            ..Default::default()
        })
}

fn arb_filters() -> impl Strategy<Value = FilterState> {
    (
        any::<bool>(),
        any::<bool>(),
        prop::sample::select(vec![
            SortStrategy::VerifiedFirst,
            SortStrategy::LowestPrice,
            SortStrategy::MostBeds,
            SortStrategy::Closest,
        ]),
        prop::collection::btree_set(prop::sample::select(vec!["Single Room", "Apartment"]), 0..2),
    )
        .prop_map(|(verified_only, show_sold_out, sort_by, room_types)| FilterState {
            verified_only,
            show_sold_out,
            sort_by,
            room_types: room_types.into_iter().map(String::from).collect(),
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn verified_only_output_is_verified(listings in prop::collection::vec(arb_listing(), 0..30), mut filters in arb_filters()) {
        filters.verified_only = true;
        let out = compute(&listings, "", &filters, &QuickFilters::new());
        prop_assert!(out.iter().all(|l| l.verified));
    }

    #[test]
    fn room_type_output_has_matching_room(listings in prop::collection::vec(arb_listing(), 0..30), filters in arb_filters()) {
        prop_assume!(!filters.room_types.is_empty());
        let out = compute(&listings, "", &filters, &QuickFilters::new());
        for listing in out {
            prop_assert!(listing.rooms.iter().any(|r| filters.room_types.contains(&r.room_type)));
        }
    }

    #[test]
    fn lowest_price_is_non_decreasing(listings in prop::collection::vec(arb_listing(), 0..30), mut filters in arb_filters()) {
        filters.sort_by = SortStrategy::LowestPrice;
        let out = compute(&listings, "", &filters, &QuickFilters::new());
        prop_assert!(out.windows(2).all(|w| w[0].price_range_min <= w[1].price_range_min));
    }

    #[test]
    fn most_beds_is_non_increasing(listings in prop::collection::vec(arb_listing(), 0..30), mut filters in arb_filters()) {
        filters.sort_by = SortStrategy::MostBeds;
        let out = compute(&listings, "", &filters, &QuickFilters::new());
        prop_assert!(out.windows(2).all(|w| w[0].available_rooms.max(0) >= w[1].available_rooms.max(0)));
    }

    #[test]
    fn pipeline_is_idempotent(
        listings in prop::collection::vec(arb_listing(), 0..30),
        filters in arb_filters(),
        query in "[a-z]{0,2}",
    ) {
        let quick: QuickFilters = [QuickFilter::Wifi].into();
        let first: Vec<String> = compute(&listings, &query, &filters, &quick).iter().map(|l| l.id.clone()).collect();
        let second: Vec<String> = compute(&listings, &query, &filters, &quick).iter().map(|l| l.id.clone()).collect();
        prop_assert_eq!(first, second);
    }
}
