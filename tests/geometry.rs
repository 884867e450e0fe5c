//! Validates socket matching and the merge/splice algorithm end to end

use splicetile::geometry::shape::Shape;
use splicetile::geometry::socket::ConnectionResult;
use splicetile::math::vec2::Vec2;

fn unit_square() -> Shape {
    Shape::from_polygon(
        &[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
        &[0, 0, 0, 0],
    )
}

fn assert_ring_matches(shape: &Shape, expected: &[(f64, f64)]) {
    assert_eq!(shape.len(), expected.len());
    for &(x, y) in expected {
        let point = Vec2::new(x, y);
        assert!(
            shape
                .vertices()
                .iter()
                .any(|vertex| vertex.distance(point) < 1e-9),
            "ring is missing vertex ({x}, {y})"
        );
    }
}

#[test]
fn test_square_sockets_attach_in_isolation() {
    let square = unit_square();
    let sockets = square.sockets();
    let first = sockets.first();
    assert!(first.is_some());
    if let Some(socket) = first {
        assert_eq!(socket.can_connect(socket), ConnectionResult::Yes);
    }
}

#[test]
fn test_merge_into_empty_is_identity() {
    let square = unit_square();
    let merged = Shape::empty().merge(0, &square, 0);
    assert!(merged.is_ok());
    if let Ok((shape, result)) = merged {
        assert_eq!(shape.vertices(), square.vertices());
        assert_eq!(result.growth, 4);
        assert_eq!(result.consumed, 0);
        assert_eq!(result.index_offset, 0);
    }
}

// Assembles a 2x2 block of unit squares through four merges, checking the
// boundary ring and the splice bookkeeping after every step. The fourth
// square seats into a three-sided notch, so its matched run spans two
// boundary sockets and the ring does not grow.
#[test]
fn test_four_squares_assemble_into_a_block() {
    let square = unit_square();

    let seeded = Shape::empty().merge(0, &square, 0);
    assert!(seeded.is_ok());
    let Ok((boundary, _)) = seeded else { return };

    let second = boundary.merge(0, &square, 0);
    assert!(second.is_ok());
    let Ok((boundary, result)) = second else { return };
    assert_eq!(result.consumed, 1);
    assert_eq!(result.growth, 2);
    assert_ring_matches(
        &boundary,
        &[
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
            (0.0, -1.0),
            (1.0, -1.0),
        ],
    );

    let third = boundary.merge(0, &square, 0);
    assert!(third.is_ok());
    let Ok((boundary, result)) = third else { return };
    assert_eq!(result.consumed, 1);
    assert_eq!(result.growth, 2);
    assert_eq!(boundary.len(), 8);

    let fourth = boundary.merge(4, &square, 0);
    assert!(fourth.is_ok());
    let Ok((boundary, result)) = fourth else { return };
    assert_eq!(result.consumed, 2);
    assert_eq!(result.growth, 0);
    assert_ring_matches(
        &boundary,
        &[
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
            (0.0, -1.0),
            (1.0, -1.0),
            (2.0, -1.0),
        ],
    );
}

#[test]
fn test_growth_accounts_for_ring_sizes() {
    let square = unit_square();
    let seeded = Shape::empty().merge(0, &square, 0);
    assert!(seeded.is_ok());
    let Ok((boundary, _)) = seeded else { return };

    for socket in 0..boundary.len() {
        for orientation in 0..square.len() {
            if let Ok((merged, result)) = boundary.merge(socket, &square, orientation) {
                assert_eq!(merged.len() as i32, boundary.len() as i32 + result.growth);
            }
        }
    }
}

#[test]
fn test_keyed_edges_only_join_their_own_class() {
    // A wedge whose hypotenuse carries its own connection class: it can
    // seat against another wedge's hypotenuse but not against a square
    // edge of the same length.
    let wedge = Shape::from_polygon(
        &[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ],
        &[0, 1, 0],
    );
    let seeded = Shape::empty().merge(0, &wedge, 0);
    assert!(seeded.is_ok());
    let Ok((boundary, _)) = seeded else { return };

    // Socket 1 is the hypotenuse; only another hypotenuse attaches there.
    let paired = boundary.merge(1, &wedge, 1);
    assert!(paired.is_ok());
    if let Ok((merged, result)) = paired {
        assert_eq!(result.consumed, 1);
        assert_eq!(merged.len(), 4);
        assert_ring_matches(
            &merged,
            &[(1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)],
        );
    }

    let mismatched = boundary.merge(1, &wedge, 0);
    assert!(mismatched.is_err());
}
