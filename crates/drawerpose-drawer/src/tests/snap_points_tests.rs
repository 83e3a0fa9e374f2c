use super::*;

fn fractions(values: &[f32]) -> Vec<SnapPointSpec> {
    values.iter().map(|v| SnapPointSpec::Fraction(*v)).collect()
}

#[test]
fn fractions_resolve_from_the_open_position() {
    for size in [0.0, 100.0, 400.0, 733.5] {
        for fraction in [0.0, 0.25, 0.5, 1.0] {
            let offset = resolve_point(SnapPointSpec::Fraction(fraction), size);
            assert_eq!(offset, size - fraction * size);
        }
    }
}

#[test]
fn pixel_strings_resolve_against_size() {
    assert_eq!(resolve_point_str("120px", 400.0), Ok(280.0));
    assert_eq!(resolve_point_str(" 0px ", 400.0), Ok(400.0));
    assert_eq!(resolve_point_str("0.25", 400.0), Ok(300.0));
}

#[test]
fn malformed_strings_fail_fast() {
    for input in ["", "px", "12em", "abc", "50%", "--1px"] {
        match input.parse::<SnapPointSpec>() {
            Err(PointError::Malformed { input: echoed }) => assert_eq!(echoed, input),
            other => panic!("{input:?} parsed as {other:?}"),
        }
    }
    assert_eq!(
        "1.5".parse::<SnapPointSpec>(),
        Err(PointError::FractionOutOfRange { value: 1.5 })
    );
    assert_eq!(
        "-4px".parse::<SnapPointSpec>(),
        Err(PointError::InvalidPixels { value: -4.0 })
    );
    assert!(SnapPointSpec::try_from(f32::NAN).is_err());
}

#[test]
fn display_round_trips_through_parse() {
    let pixels = SnapPointSpec::Pixels(96.0);
    assert_eq!(pixels.to_string(), "96px");
    assert_eq!(pixels.to_string().parse::<SnapPointSpec>(), Ok(pixels));
    assert_eq!("0.5".parse::<SnapPointSpec>(), Ok(SnapPointSpec::Fraction(0.5)));
    assert_eq!("midpoint".parse::<BreakPointSpec>(), Ok(BreakPointSpec::Midpoint));
    assert_eq!(
        "200px".parse::<BreakPointSpec>(),
        Ok(BreakPointSpec::At(SnapPointSpec::Pixels(200.0)))
    );
}

#[test]
fn single_point_without_breaks_has_none_attached() {
    let resolved = resolve_snap_point(SnapPointSpec::Fraction(0.5), 400.0);
    assert_eq!(resolved.offset, 200.0);
    assert_eq!(resolved.lower_break_point, None);
    assert_eq!(resolved.upper_break_point, None);
}

#[test]
fn break_points_attach_on_both_sides() {
    let breaks = [Some(350.0), None, Some(50.0)];
    let first = resolve_snap_point_at(SnapPointSpec::Fraction(0.0), 400.0, 0, &breaks);
    let second = resolve_snap_point_at(SnapPointSpec::Fraction(0.25), 400.0, 1, &breaks);
    let third = resolve_snap_point_at(SnapPointSpec::Fraction(0.75), 400.0, 2, &breaks);
    let last = resolve_snap_point_at(SnapPointSpec::Fraction(1.0), 400.0, 3, &breaks);

    assert_eq!((first.upper_break_point, first.lower_break_point), (None, Some(350.0)));
    assert_eq!((second.upper_break_point, second.lower_break_point), (Some(350.0), None));
    assert_eq!((third.upper_break_point, third.lower_break_point), (None, Some(50.0)));
    assert_eq!((last.upper_break_point, last.lower_break_point), (Some(50.0), None));
}

#[test]
fn degenerate_configurations_become_closed_and_open() {
    let none = resolve_snap_points(&[], None, 400.0).expect("resolves");
    assert_eq!(none.iter().map(|p| p.offset).collect::<Vec<_>>(), vec![400.0, 0.0]);

    let single = resolve_snap_points(&[SnapPointSpec::Pixels(300.0)], None, 400.0).expect("resolves");
    assert_eq!(single.iter().map(|p| p.offset).collect::<Vec<_>>(), vec![400.0, 100.0]);

    let closed_only = resolve_snap_points(&[SnapPointSpec::CLOSED], None, 400.0).expect("resolves");
    assert_eq!(closed_only[1].value, SnapPointSpec::OPEN);
}

#[test]
fn break_point_count_must_match() {
    let snaps = fractions(&[0.0, 0.5, 1.0]);
    let breaks = [BreakPointSpec::Midpoint];
    assert_eq!(
        resolve_snap_points(&snaps, Some(&breaks), 400.0),
        Err(DrawerError::BreakPointCount {
            snap_points: 3,
            break_points: 1
        })
    );
}

#[test]
fn unsorted_points_are_rejected() {
    let snaps = fractions(&[0.0, 0.75, 0.5]);
    match resolve_snap_points(&snaps, None, 400.0) {
        Err(DrawerError::UnsortedSnapPoints { index, .. }) => assert_eq!(index, 2),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn pixel_points_taller_than_the_drawer_are_rejected() {
    let snaps = [SnapPointSpec::CLOSED, SnapPointSpec::Pixels(500.0)];
    assert_eq!(
        resolve_snap_points(&snaps, None, 400.0),
        Err(DrawerError::SnapPointOutOfRange {
            index: 1,
            offset: -100.0,
            size: 400.0,
        })
    );

    let exact = [SnapPointSpec::CLOSED, SnapPointSpec::Pixels(400.0)];
    let resolved = resolve_snap_points(&exact, None, 400.0).expect("fits exactly");
    assert_eq!(resolved[1].offset, 0.0);
}

#[test]
fn midpoint_breaks_sit_between_neighbours() {
    let snaps = fractions(&[0.0, 0.5, 1.0]);
    let breaks = [BreakPointSpec::Midpoint, BreakPointSpec::At(SnapPointSpec::Fraction(0.9))];
    let resolved = resolve_snap_points(&snaps, Some(&breaks), 400.0).expect("resolves");

    assert_eq!(resolved[0].lower_break_point, Some(300.0));
    assert_eq!(resolved[1].upper_break_point, Some(300.0));
    let upper_break = resolved[1].lower_break_point.expect("explicit break");
    assert!((upper_break - 40.0).abs() < 1e-3);
}

#[test]
fn resting_on_a_point_returns_it() {
    let resolved = resolve_snap_points(&fractions(&[0.0, 0.3, 0.6, 1.0]), None, 500.0).expect("resolves");
    for point in &resolved {
        for skipping in [false, true] {
            let found = find_closest_snap_point(&resolved, point.offset, point.offset, skipping)
                .expect("non-empty");
            assert_eq!(found.index, point.index);
        }
    }
}

#[test]
fn nearest_distance_without_break_points() {
    let resolved = resolve_snap_points(&fractions(&[0.0, 0.2, 0.5, 0.9, 1.0]), None, 400.0).expect("resolves");
    let mut search = -50.0;
    while search <= 450.0 {
        let found = find_closest_snap_point(&resolved, search, search, true).expect("non-empty");
        let best = resolved
            .iter()
            .map(|p| (p.offset - search).abs())
            .fold(f32::INFINITY, f32::min);
        assert!(
            ((found.offset - search).abs() - best).abs() < 1e-4,
            "search {search} picked {} but best distance is {best}",
            found.offset
        );
        search += 7.5;
    }
}

#[test]
fn distance_ties_prefer_the_more_open_point() {
    let resolved = resolve_snap_points(&fractions(&[0.0, 1.0]), None, 400.0).expect("resolves");
    let found = find_closest_snap_point(&resolved, 200.0, 200.0, false).expect("non-empty");
    assert_eq!(found.offset, 0.0);
}

#[test]
fn slow_release_near_half_snaps_to_half() {
    let resolved = resolve_snap_points(&fractions(&[0.0, 0.5, 1.0]), None, 400.0).expect("resolves");
    // 37.5% open.
    let found = find_closest_snap_point(&resolved, 250.0, 251.0, false).expect("non-empty");
    assert_eq!(found.value, SnapPointSpec::Fraction(0.5));
}

#[test]
fn fast_flick_skips_an_intermediate_point() {
    let resolved = resolve_snap_points(&fractions(&[0.0, 0.5, 1.0]), None, 400.0).expect("resolves");
    let skipped = find_closest_snap_point(&resolved, 330.0, -120.0, true).expect("non-empty");
    assert_eq!(skipped.value, SnapPointSpec::Fraction(1.0));

    // Without skipping the candidates bracket the plain offset.
    let bounded = find_closest_snap_point(&resolved, 330.0, -120.0, false).expect("non-empty");
    assert_eq!(bounded.value, SnapPointSpec::Fraction(0.5));
}

#[test]
fn break_points_are_hard_thresholds() {
    let snaps = fractions(&[0.0, 1.0]);
    // Must be dragged to 80% open before it snaps open.
    let breaks = [BreakPointSpec::At(SnapPointSpec::Fraction(0.8))];
    let resolved = resolve_snap_points(&snaps, Some(&breaks), 400.0).expect("resolves");

    let near_open = find_closest_snap_point(&resolved, 100.0, 100.0, false).expect("non-empty");
    assert_eq!(near_open.offset, 400.0, "nearest would pick open, the threshold does not");

    let past_threshold = find_closest_snap_point(&resolved, 79.0, 79.0, false).expect("non-empty");
    assert_eq!(past_threshold.offset, 0.0);

    let exactly = find_closest_snap_point(&resolved, 80.0, 80.0, false).expect("non-empty");
    assert_eq!(exactly.offset, 400.0);
}

#[test]
fn outside_the_range_returns_the_single_side() {
    let resolved = resolve_snap_points(&fractions(&[0.0, 0.5, 1.0]), None, 400.0).expect("resolves");
    let past_open = find_closest_snap_point(&resolved, -90.0, -90.0, true).expect("non-empty");
    assert_eq!(past_open.offset, 0.0);
    let past_closed = find_closest_snap_point(&resolved, 500.0, 520.0, true).expect("non-empty");
    assert_eq!(past_closed.offset, 400.0);
    assert!(find_closest_snap_point(&[], 0.0, 0.0, true).is_none());
}
