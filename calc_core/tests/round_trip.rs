//! Property-based tests for the relation solver using proptest
//!
//! Round-trip law: solve one unknown, feed the result back with a different
//! field left empty, and recover the original value within rounding.

use calc_core::parsing::{parse_value, quick_convert, Encoding};
use calc_core::relations::{
    current_limit, divider, motor_rpm, ohms_law, phase_converter, pole_angle, traction,
};
use calc_core::solver::{solve, SolveRequest};
use calc_core::ALL_RELATIONS;
use proptest::prelude::*;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

fn solved(relation: &calc_core::Relation, request: &SolveRequest, name: &str) -> f64 {
    let result = solve(relation, request).expect("snapshot should solve");
    result.get(name).expect("target should be solved").value
}

#[test]
fn test_every_relation_rejects_all_filled_and_empty() {
    for id in ALL_RELATIONS {
        let relation = id.relation();
        let mut full = SolveRequest::new();
        for var in relation.variables {
            full.set(var.name, "2");
        }
        assert!(solve(relation, &full).is_none(), "{} solved with every field filled", id);
        assert!(solve(relation, &SolveRequest::new()).is_none(), "{} solved from nothing", id);
    }
}

proptest! {
    #[test]
    fn test_current_limit_round_trip(motor in 0.1f64..500.0, inverter in 0.1f64..500.0) {
        let forward = SolveRequest::new()
            .with(current_limit::MOTOR_CURRENT, motor.to_string())
            .with(current_limit::INVERTER_CURRENT, inverter.to_string());
        let limit = solved(&current_limit::RELATION, &forward, current_limit::CURRENT_LIMIT);

        let back = SolveRequest::new()
            .with(current_limit::CURRENT_LIMIT, limit.to_string())
            .with(current_limit::INVERTER_CURRENT, inverter.to_string());
        let recovered = solved(&current_limit::RELATION, &back, current_limit::MOTOR_CURRENT);
        prop_assert!(close(recovered, motor), "{} vs {}", recovered, motor);
    }

    #[test]
    fn test_traction_round_trip(
        rpm in 100.0f64..3000.0,
        diameter in 100.0f64..1000.0,
        gear in 1.0f64..60.0,
        roping in 1u32..5,
    ) {
        let roping_text = format!("{}:1", roping);
        let forward = SolveRequest::new()
            .with(traction::RPM, rpm.to_string())
            .with(traction::WHEEL_DIAMETER, diameter.to_string())
            .with(traction::GEAR_RATIO, gear.to_string())
            .with(traction::ROPING_RATIO, roping_text.clone());
        let speed = solved(&traction::RELATION, &forward, traction::SPEED);

        let known = [
            (traction::RPM, rpm.to_string(), rpm),
            (traction::WHEEL_DIAMETER, diameter.to_string(), diameter),
            (traction::GEAR_RATIO, gear.to_string(), gear),
            (traction::ROPING_RATIO, roping_text, f64::from(roping)),
        ];
        for (unknown, _, expected) in &known {
            let mut back = SolveRequest::new().with(traction::SPEED, speed.to_string());
            for (name, raw, _) in known.iter().filter(|(name, _, _)| name != unknown) {
                back.set(*name, raw.as_str());
            }
            let recovered = solved(&traction::RELATION, &back, unknown);
            prop_assert!(close(recovered, *expected), "{}: {} vs {}", unknown, recovered, expected);
        }
    }

    #[test]
    fn test_motor_rpm_round_trip(frequency in 1.0f64..120.0, pole_pairs in 1u32..6) {
        let poles = (pole_pairs * 2).to_string();
        let forward = SolveRequest::new()
            .with(motor_rpm::FREQUENCY, frequency.to_string())
            .with(motor_rpm::POLES, poles.clone());
        let rpm = solved(&motor_rpm::RELATION, &forward, motor_rpm::RPM);

        let back = SolveRequest::new()
            .with(motor_rpm::RPM, rpm.to_string())
            .with(motor_rpm::POLES, poles);
        let recovered = solved(&motor_rpm::RELATION, &back, motor_rpm::FREQUENCY);
        prop_assert!(close(recovered, frequency), "{} vs {}", recovered, frequency);
    }

    #[test]
    fn test_phase_converter_round_trip(kilowatts in 0.1f64..1000.0) {
        let forward = SolveRequest::new().with(phase_converter::KILOWATTS, kilowatts.to_string());
        let spec = solved(&phase_converter::RELATION, &forward, phase_converter::CONVERTER_SPEC);

        let back = SolveRequest::new().with(phase_converter::CONVERTER_SPEC, spec.to_string());
        let recovered = solved(&phase_converter::RELATION, &back, phase_converter::KILOWATTS);
        prop_assert!(close(recovered, kilowatts), "{} vs {}", recovered, kilowatts);
    }

    #[test]
    fn test_ohms_law_round_trip(voltage in 0.1f64..1000.0, current in 0.1f64..100.0) {
        let forward = SolveRequest::new()
            .with(ohms_law::VOLTAGE, voltage.to_string())
            .with(ohms_law::CURRENT, current.to_string());
        let result = solve(&ohms_law::RELATION, &forward).expect("pair should solve");
        let resistance = result.get(ohms_law::RESISTANCE).map(|s| s.value).unwrap_or(f64::NAN);
        let power = result.get(ohms_law::POWER).map(|s| s.value).unwrap_or(f64::NAN);

        let back = SolveRequest::new()
            .with(ohms_law::RESISTANCE, resistance.to_string())
            .with(ohms_law::POWER, power.to_string());
        prop_assert!(close(solved(&ohms_law::RELATION, &back, ohms_law::VOLTAGE), voltage));
        prop_assert!(close(solved(&ohms_law::RELATION, &back, ohms_law::CURRENT), current));
    }

    #[test]
    fn test_pole_angle_round_trip(tenths in 0u32..3600) {
        let angle = f64::from(tenths) / 10.0;
        let forward = SolveRequest::new().with(pole_angle::ANGLE, angle.to_string());
        let offset = solved(&pole_angle::RELATION, &forward, pole_angle::OFFSET);
        prop_assert!((0.0..360.0).contains(&offset));

        let back = SolveRequest::new().with(pole_angle::OFFSET, offset.to_string());
        let recovered = solved(&pole_angle::RELATION, &back, pole_angle::ANGLE);
        prop_assert!((recovered - angle).abs() < 1e-6, "{} vs {}", recovered, angle);
    }

    #[test]
    fn test_divider_round_trip(
        speed in 60.0f64..240.0,
        rpm in 500.0f64..3000.0,
        ppr_exp in 9u32..14,
        delta_vl in any::<bool>(),
    ) {
        let ppr = f64::from(1u32 << ppr_exp);
        let forward = SolveRequest::new()
            .with(divider::RATED_SPEED, speed.to_string())
            .with(divider::RPM, rpm.to_string())
            .with(divider::ENCODER_PPR, ppr.to_string())
            .with_delta_vl(delta_vl);
        let result = solve(&divider::RELATION, &forward).expect("divider should solve");
        let hex = result.formatted().to_string();
        prop_assert_eq!(hex.len(), 4);

        // Divider as written to the device, before and after rounding
        let scale = if delta_vl { 10.0 } else { 1.0 };
        let exact = 4096.0 * speed * 1000.0 / (rpm * ppr * 0.75) / scale;
        let rounded = f64::from(u16::from_str_radix(&hex, 16).expect("hex divider"));
        prop_assert!((rounded - exact).abs() <= 0.5);
        // Each recovered value is off by at most the half-count rounding share
        let tolerance = 0.5 / exact.min(rounded);

        let known = [
            (divider::RATED_SPEED, speed),
            (divider::RPM, rpm),
            (divider::ENCODER_PPR, ppr),
        ];
        for (unknown, expected) in known {
            let mut back = SolveRequest::new()
                .with(divider::DIVIDER, hex.clone())
                .with_delta_vl(delta_vl);
            for (name, value) in known.iter().filter(|(name, _)| *name != unknown) {
                back.set(*name, value.to_string());
            }
            let recovered = solved(&divider::RELATION, &back, unknown);
            prop_assert!(
                (recovered - expected).abs() <= expected * tolerance + 1e-9,
                "{} (delta_vl={}): {} vs {}",
                unknown,
                delta_vl,
                recovered,
                expected
            );
        }
    }

    #[test]
    fn test_parsers_never_panic(raw in ".{0,24}") {
        for encoding in [Encoding::Decimal, Encoding::Hexadecimal, Encoding::Ratio] {
            if let Some(value) = parse_value(&raw, encoding) {
                prop_assert!(value.is_finite());
            }
        }
        let _ = quick_convert(&raw);
    }

    #[test]
    fn test_solver_never_panics(
        a in ".{0,12}",
        b in ".{0,12}",
        c in ".{0,12}",
        delta in any::<bool>(),
    ) {
        for id in ALL_RELATIONS {
            let relation = id.relation();
            let mut request = SolveRequest::new().with_delta_vl(delta);
            for (var, raw) in relation.variables.iter().zip([&a, &b, &c]) {
                request.set(var.name, raw.as_str());
            }
            if let Some(result) = solve(relation, &request) {
                prop_assert!(result.solved.iter().all(|s| s.value.is_finite()));
            }
        }
    }
}
