use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;

use crate::{
    signal::TaskSignal,
    zone::{
        AMBIGUOUS_TAG, GOAL_ZONE_TAG, MarkerTag, REWARDED_TAGS, UNREWARDED_TAGS, ZoneKind,
        markers, zone_tag, zones,
    },
};

#[test]
fn rewarded_tags() {
    let zones = zones(TaskSignal::new(true, false));

    assert_eq!(zones[0].tag, REWARDED_TAGS[0]);
    assert_eq!(zones[1].tag, REWARDED_TAGS[1]);
    assert_eq!(zones[2].tag, GOAL_ZONE_TAG);
}

#[test]
fn unrewarded_tags() {
    let zones = zones(TaskSignal::new(false, false));

    assert_eq!(zones[0].tag, UNREWARDED_TAGS[0]);
    assert_eq!(zones[1].tag, UNREWARDED_TAGS[1]);
    assert_eq!(zones[2].tag, GOAL_ZONE_TAG);
}

#[test]
fn ambiguous_first_zone_ignores_reward() {
    for is_rewarded in [true, false] {
        let signal = TaskSignal::new(is_rewarded, true);

        assert_eq!(zone_tag(ZoneKind::FirstSignal, signal), AMBIGUOUS_TAG);
        assert_eq!(
            zone_tag(ZoneKind::SecondSignal, signal),
            zone_tag(ZoneKind::SecondSignal, TaskSignal::new(is_rewarded, false))
        );
    }
}

#[test]
fn zones_are_ordered_and_disjoint() {
    let zones = zones(TaskSignal::default());

    for zone in &zones {
        assert!(zone.start < zone.end);
    }
    for pair in zones.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
}

#[test]
fn marker_placement() {
    let markers = markers(400.0, 1.0, TaskSignal::new(true, false));

    assert_eq!(markers.len(), 6);

    let first = &markers[0];
    assert_eq!(first.kind, ZoneKind::FirstSignal);
    assert_eq!(first.tag, MarkerTag::ColorC);
    assert_relative_eq!(first.width, 70.0, epsilon = 1e-4);
    assert_relative_eq!(first.center.x, 115.0, epsilon = 1e-4);
    assert_eq!(first.center.y, 1.0);
    assert_eq!(first.heading, FRAC_PI_2);

    let mirror = &markers[1];
    assert_eq!(mirror.center.x, first.center.x);
    assert_eq!(mirror.center.y, -1.0);
    assert_eq!(mirror.heading, -FRAC_PI_2);
    assert_eq!(mirror.tag, first.tag);

    let goal = &markers[4];
    assert_eq!(goal.tag, MarkerTag::ColorF);
    assert_relative_eq!(goal.width, 20.0, epsilon = 1e-4);
    assert_relative_eq!(goal.center.x, 360.0, epsilon = 1e-4);
}

#[test]
fn markers_scale_with_tiny_corridors() {
    let markers = markers(0.5, 1.0, TaskSignal::default());

    for marker in &markers {
        assert!(marker.width > 0.0);
        assert!(marker.center.x > 0.0 && marker.center.x < 0.5);
    }
}
