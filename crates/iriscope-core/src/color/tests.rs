//! Tests for color conversion functions

use super::*;

#[test]
fn test_rgb_hsl_roundtrip() {
    let test_cases = [
        (1.0, 0.0, 0.0), // Red
        (0.0, 1.0, 0.0), // Green
        (0.0, 0.0, 1.0), // Blue
        (1.0, 1.0, 1.0), // White
        (0.0, 0.0, 0.0), // Black
        (0.5, 0.5, 0.5), // Gray
        (1.0, 0.5, 0.0), // Orange
        (0.5, 0.0, 0.5), // Purple
    ];

    for (r, g, b) in test_cases {
        let hsl = rgb_to_hsl(r, g, b);
        let (r2, g2, b2) = hsl_to_rgb(hsl);

        assert!(
            (r - r2).abs() < 1e-5,
            "R mismatch for ({}, {}, {}): {} vs {}",
            r,
            g,
            b,
            r,
            r2
        );
        assert!(
            (g - g2).abs() < 1e-5,
            "G mismatch for ({}, {}, {}): {} vs {}",
            r,
            g,
            b,
            g,
            g2
        );
        assert!(
            (b - b2).abs() < 1e-5,
            "B mismatch for ({}, {}, {}): {} vs {}",
            r,
            g,
            b,
            b,
            b2
        );
    }
}

#[test]
fn test_byte_roundtrip_within_one() {
    // Spot-check a grid of byte triples rather than the full 256^3 cube
    for r in (0u16..=255).step_by(17) {
        for g in (0u16..=255).step_by(17) {
            for b in (0u16..=255).step_by(17) {
                let hsl = hsl_from_rgb8(r as u8, g as u8, b as u8);
                let (r2, g2, b2) = hsl_to_rgb8(hsl);

                assert!(
                    (r as i16 - r2 as i16).abs() <= 1,
                    "R drift for ({}, {}, {}): got {}",
                    r,
                    g,
                    b,
                    r2
                );
                assert!(
                    (g as i16 - g2 as i16).abs() <= 1,
                    "G drift for ({}, {}, {}): got {}",
                    r,
                    g,
                    b,
                    g2
                );
                assert!(
                    (b as i16 - b2 as i16).abs() <= 1,
                    "B drift for ({}, {}, {}): got {}",
                    r,
                    g,
                    b,
                    b2
                );
            }
        }
    }
}

#[test]
fn test_achromatic_short_circuit() {
    for v in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
        let hsl = rgb_to_hsl(v, v, v);
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
        assert!((hsl.l - v).abs() < 1e-6);
    }
}

#[test]
fn test_known_hues() {
    let red = rgb_to_hsl(1.0, 0.0, 0.0);
    assert!((red.h - 0.0).abs() < 0.01, "red hue {}", red.h);

    let green = rgb_to_hsl(0.0, 1.0, 0.0);
    assert!((green.h - 120.0).abs() < 0.01, "green hue {}", green.h);

    let blue = rgb_to_hsl(0.0, 0.0, 1.0);
    assert!((blue.h - 240.0).abs() < 0.01, "blue hue {}", blue.h);
}

#[test]
fn test_negative_hue_wraps() {
    // An additive hue rotation can push H outside 0-360; conversion must wrap
    let hsl = Hsl {
        h: -60.0,
        s: 1.0,
        l: 0.5,
    };
    let wrapped = Hsl {
        h: 300.0,
        s: 1.0,
        l: 0.5,
    };

    assert_eq!(hsl_to_rgb(hsl), hsl_to_rgb(wrapped));
}

#[test]
fn test_multi_turn_rotation_normalizes() {
    // Stacked rotations can push hue several turns out; the conversion must
    // land on the same wheel position as the single-turn value
    let base = Hsl {
        h: 100.0,
        s: 1.0,
        l: 0.5,
    };
    let spun = Hsl {
        h: 100.0 + 4.0 * 360.0,
        s: 1.0,
        l: 0.5,
    };

    assert_eq!(hsl_to_rgb(base), hsl_to_rgb(spun));
}
