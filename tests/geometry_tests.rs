use serde_json::json;
use zonekit::geometry::{
    Axis, Coordinate, Error, GeoJsonPolygon, Ring, polygons_equal, validate_polygon,
};

fn ring(points: &[[f64; 2]]) -> Ring {
    points.iter().copied().map(Coordinate::from).collect()
}

fn polygon(points: &[[f64; 2]]) -> GeoJsonPolygon {
    GeoJsonPolygon::new(ring(points))
}

const SQUARE: [[f64; 2]; 5] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

#[test]
fn out_of_range_coordinates_fail() {
    for (lng, lat, axis) in [
        (180.5, 0.0, Axis::Longitude),
        (-200.0, 10.0, Axis::Longitude),
        (10.0, 90.000_1, Axis::Latitude),
        (10.0, -91.0, Axis::Latitude),
    ] {
        let mut points = SQUARE;
        points[2] = [lng, lat];
        let err = validate_polygon(&polygon(&points)).unwrap_err();
        assert_eq!(
            err,
            Error::CoordinateRange {
                index: 2,
                axis,
                value: if axis == Axis::Longitude { lng } else { lat },
            }
        );
        assert_eq!(err.code(), "COORDINATE_OUT_OF_RANGE");
    }
}

#[test]
fn in_range_coordinates_pass_range_check() {
    for lng in [-180.0, -90.5, 0.0, 45.25, 180.0] {
        for lat in [-90.0, -0.1, 0.0, 89.999, 90.0] {
            assert!(Coordinate::new(lng, lat).validate(0).is_ok());
        }
    }
}

#[test]
fn normalize_is_idempotent() {
    let once = ring(&SQUARE).normalize().unwrap();
    let twice = once.normalize().unwrap();
    assert_eq!(once, twice);
    assert_eq!(once, ring(&SQUARE));
}

#[test]
fn consecutive_duplicate_is_removed() {
    let boundary =
        validate_polygon(&polygon(&[[0.0, 0.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]))
            .unwrap();
    assert_eq!(
        boundary.ring(),
        &ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]])
    );
}

#[test]
fn bow_tie_is_rejected() {
    let err = validate_polygon(&polygon(&[
        [0.0, 0.0],
        [1.0, 1.0],
        [1.0, 0.0],
        [0.0, 1.0],
        [0.0, 0.0],
    ]))
    .unwrap_err();
    assert_eq!(err, Error::SelfIntersection { first: 0, second: 2 });
    assert_eq!(err.to_string(), "Polygon cannot self-intersect (edges 0 and 2 cross)");
}

#[test]
fn simple_square_is_accepted() {
    let boundary = validate_polygon(&polygon(&SQUARE)).unwrap();
    assert_eq!(boundary.ring().len(), 5);
}

#[test]
fn first_crossing_is_reported() {
    // Crosses at edges (1, 3), (1, 4) and (3, 5); scanning stops at the first.
    let r = ring(&[
        [0.0, 0.0],
        [2.0, 0.0],
        [3.0, 4.0],
        [0.0, 1.0],
        [4.0, 3.0],
        [2.0, 3.0],
        [0.0, 0.0],
    ]);
    assert_eq!(r.find_self_intersection(), Some((1, 3)));
}

#[test]
fn collinear_overlap_is_not_flagged() {
    // Edge 2 ends on edge 0 and the last edge runs back along it.
    let r = ring(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
    assert_eq!(r.find_self_intersection(), None);
}

#[test]
fn open_ring_is_rejected() {
    let err = validate_polygon(&polygon(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]))
        .unwrap_err();
    assert_eq!(err, Error::NotClosed);
    assert_eq!(err.to_string(), "Polygon must be closed");
}

#[test]
fn closure_uses_epsilon() {
    let boundary = validate_polygon(&polygon(&[
        [0.0, 0.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [1.0, 0.0],
        [0.000_000_5, 0.0],
    ]));
    assert!(boundary.is_ok());
}

#[test]
fn three_points_are_too_short() {
    let err = validate_polygon(&polygon(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]])).unwrap_err();
    assert_eq!(err, Error::RingTooShort { len: 3 });
}

#[test]
fn dedupe_can_make_a_ring_too_short() {
    let err = validate_polygon(&polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0]]))
        .unwrap_err();
    assert_eq!(err, Error::RingTooShort { len: 3 });
}

#[test]
fn range_is_checked_before_closure() {
    let err = validate_polygon(&polygon(&[[0.0, 0.0], [0.0, 1.0], [1.0, 95.0], [1.0, 0.0]]))
        .unwrap_err();
    assert_eq!(err.code(), "COORDINATE_OUT_OF_RANGE");
}

#[test]
fn holes_are_unsupported() {
    let mut value = polygon(&SQUARE);
    value.coordinates.push(ring(&SQUARE));
    assert_eq!(
        validate_polygon(&value),
        Err(Error::MultiRingUnsupported { count: 2 })
    );
    value.coordinates.clear();
    assert_eq!(validate_polygon(&value), Err(Error::MissingRing));
}

#[test]
fn type_must_be_polygon() {
    let value: GeoJsonPolygon = serde_json::from_value(json!({
        "type": "MultiPolygon",
        "coordinates": [SQUARE]
    }))
    .unwrap();
    assert_eq!(
        validate_polygon(&value),
        Err(Error::UnsupportedType("MultiPolygon".into()))
    );
}

#[test]
fn geojson_round_trip_keeps_lng_lat_order() {
    let value: GeoJsonPolygon = serde_json::from_value(json!({
        "type": "Polygon",
        "coordinates": [[[77.0, 28.5], [77.0, 28.6], [77.1, 28.6], [77.0, 28.5]]]
    }))
    .unwrap();
    let first = value.coordinates[0].points()[0];
    assert_eq!(first.longitude, 77.0);
    assert_eq!(first.latitude, 28.5);

    let boundary = validate_polygon(&value).unwrap();
    assert_eq!(
        serde_json::to_value(&boundary).unwrap(),
        json!({
            "type": "Polygon",
            "coordinates": [[[77.0, 28.5], [77.0, 28.6], [77.1, 28.6], [77.0, 28.5]]]
        })
    );
}

#[test]
fn reversed_winding_is_equal() {
    let a = polygon(&SQUARE);
    let b = polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]);
    assert!(polygons_equal(&a, &b));
    assert!(polygons_equal(&b, &a));
}

#[test]
fn rotated_start_is_not_equal() {
    let a = polygon(&SQUARE);
    let rotated = polygon(&[[1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    assert!(!polygons_equal(&a, &rotated));
}

#[test]
fn equality_is_exact() {
    let a = polygon(&SQUARE);
    let mut drifted = SQUARE;
    drifted[1] = [0.0, 1.000_000_000_1];
    assert!(!polygons_equal(&a, &polygon(&drifted)));
}

#[test]
fn equality_needs_single_rings() {
    let a = polygon(&SQUARE);
    let mut b = polygon(&SQUARE);
    b.coordinates.push(ring(&SQUARE));
    assert!(!polygons_equal(&a, &b));
}

#[test]
fn overlap_test() {
    let a = validate_polygon(&polygon(&SQUARE)).unwrap();
    let shifted = validate_polygon(&polygon(&[
        [0.5, 0.5],
        [0.5, 1.5],
        [1.5, 1.5],
        [1.5, 0.5],
        [0.5, 0.5],
    ]))
    .unwrap();
    let inner = validate_polygon(&polygon(&[
        [0.2, 0.2],
        [0.2, 0.4],
        [0.4, 0.4],
        [0.4, 0.2],
        [0.2, 0.2],
    ]))
    .unwrap();
    let apart = validate_polygon(&polygon(&[
        [3.0, 3.0],
        [3.0, 4.0],
        [4.0, 4.0],
        [4.0, 3.0],
        [3.0, 3.0],
    ]))
    .unwrap();
    assert!(a.overlaps(&shifted));
    assert!(a.overlaps(&inner));
    assert!(inner.overlaps(&a));
    assert!(!a.overlaps(&apart));
}

fn unit_square(x: f64, y: f64) -> [[f64; 2]; 5] {
    [[x, y], [x, y + 1.0], [x + 1.0, y + 1.0], [x + 1.0, y], [x, y]]
}

#[test]
fn neighbours_sharing_a_border_do_not_overlap() {
    let a = validate_polygon(&polygon(&SQUARE)).unwrap();
    for (x, y) in [(-1.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, -1.0), (1.0, 1.0), (1.0, 0.5)] {
        let neighbour = validate_polygon(&polygon(&unit_square(x, y))).unwrap();
        assert!(!a.overlaps(&neighbour), "neighbour at ({x}, {y})");
        assert!(!neighbour.overlaps(&a), "neighbour at ({x}, {y})");
    }
}

#[test]
fn identical_rings_overlap() {
    let a = validate_polygon(&polygon(&SQUARE)).unwrap();
    let same = validate_polygon(&polygon(&SQUARE)).unwrap();
    let mut reversed = SQUARE;
    reversed.reverse();
    let reversed = validate_polygon(&polygon(&reversed)).unwrap();
    assert!(a.overlaps(&same));
    assert!(a.overlaps(&reversed));
}

#[test]
fn overlap_along_shared_edge_lines() {
    // No edges cross and every vertex sits on the other ring's boundary.
    let wide = validate_polygon(&polygon(&[
        [0.0, 0.0],
        [0.0, 1.0],
        [2.0, 1.0],
        [2.0, 0.0],
        [0.0, 0.0],
    ]))
    .unwrap();
    let offset = validate_polygon(&polygon(&[
        [1.0, 0.0],
        [1.0, 1.0],
        [3.0, 1.0],
        [3.0, 0.0],
        [1.0, 0.0],
    ]))
    .unwrap();
    let corner = validate_polygon(&polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]))
        .unwrap();
    assert!(wide.overlaps(&offset));
    assert!(offset.overlaps(&wide));
    assert!(corner.overlaps(&validate_polygon(&polygon(&SQUARE)).unwrap()));
}

#[test]
fn back_and_forth_ring_is_too_short() {
    let err = validate_polygon(&polygon(&[
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, 0.0],
    ]))
    .unwrap_err();
    assert_eq!(err, Error::RingTooShort { len: 3 });
    assert_eq!(err.code(), "RING_TOO_SHORT");
}

#[test]
fn collinear_ring_has_no_area() {
    let err = validate_polygon(&polygon(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [0.0, 0.0]]))
        .unwrap_err();
    assert_eq!(err, Error::ZeroArea);
    assert_eq!(err.code(), "DEGENERATE_RING");
    assert_eq!(err.to_string(), "Polygon must enclose an area");
}
