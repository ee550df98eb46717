// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::f64::consts::PI;
use gcode_layers::{parse, parse_with, Command, Filament};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn area() -> f64 {
    PI * 0.875 * 0.875
}

fn flat(src: &str) -> Vec<Command> {
    parse(src).layers().iter().flat_map(|l| l.commands.clone()).collect()
}

#[test]
fn test_extrusion_move() {
    let cmds = flat("G1 X10 Y0 E1 F600\nG1 X10 Y10 E2 F600\n");
    assert_eq!(cmds.len(), 2);

    let cmd = &cmds[1];
    assert_eq!(cmd.last_seen_feed_rate_mm_per_s, 10.);
    let m = cmd.metrics.expect("metrics");
    assert!(close(m.distance_mm, 10.));
    assert!(close(m.extruded_volume_mm3, area()));
    assert!((m.extruded_volume_mm3 - 2.405).abs() < 1e-3);
    assert!(close(m.weight_g, area() * 0.00124));
    assert!(close(m.volume_per_distance, area() / 10.));
    assert!(close(m.velocity_mm_per_s.unwrap(), 1.));
    assert!(close(m.flow_mm3_per_s.unwrap(), area() / 10.));

    // the first move starts from the origin
    assert!(close(cmds[0].distance_mm().unwrap(), 10.));
    assert!(close(cmds[0].extruded_volume_mm3().unwrap(), area()));
}

#[test]
fn test_missing_axis_uses_last_position() {
    let cmds = flat("G1 X5 Y5 E1\nG1 Y8 E2\nG1 X1 E3\n");
    assert!(close(cmds[1].distance_mm().unwrap(), 3.));
    assert!(close(cmds[2].distance_mm().unwrap(), 4.));
}

#[test]
fn test_position_only_advances_on_extrusion() {
    // travel moves and pure extrusions leave the position alone
    let cmds = flat("G1 X5 Y5\nG1 E5\nG1 X3 Y4 E6\n");
    assert_eq!(cmds[0].metrics, None);
    assert_eq!(cmds[1].metrics, None);
    assert!(close(cmds[2].distance_mm().unwrap(), 5.));
    assert!(close(cmds[2].extruded_volume_mm3().unwrap(), 6. * area()));
}

#[test]
fn test_retraction_and_zero_extrusion() {
    let cmds = flat("G1 X1 Y0 E2\nG1 X2 Y0 E1.5\nG1 X3 Y0 E1.5\n");
    let retract = cmds[1].extruded_volume_mm3().unwrap();
    assert!(retract < 0.);
    assert!(close(retract, -0.5 * area()));
    assert!(cmds[1].weight_g().unwrap() < 0.);
    assert_eq!(cmds[2].extruded_volume_mm3(), Some(0.));
    assert_eq!(cmds[2].volume_per_distance(), Some(0.));
}

#[test]
fn test_zero_distance() {
    let cmds = flat("G1 X0 Y0 E1\nG1 X0 Y0 E1\n");
    assert_eq!(cmds[0].distance_mm(), Some(0.));
    assert_eq!(cmds[0].volume_per_distance(), Some(f64::INFINITY));
    assert!(cmds[1].volume_per_distance().unwrap().is_nan());
}

#[test]
fn test_rates_need_feed() {
    let cmds = flat("G1 X1 Y0 E1\nG0 F3000\nG1 X4 Y4 E2\nG1 F0\nG1 X5 Y4 E3\n");
    // no feed rate known yet: the other metrics are still there
    assert!(cmds[0].distance_mm().is_some());
    assert_eq!(cmds[0].velocity_mm_per_s(), None);
    assert_eq!(cmds[0].flow_mm3_per_s(), None);

    assert!(close(cmds[2].velocity_mm_per_s().unwrap(), 5. / 50.));
    assert!(close(cmds[2].flow_mm3_per_s().unwrap(), area() / 50.));

    assert_eq!(cmds[4].last_seen_feed_rate_mm_per_s, 0.);
    assert_eq!(cmds[4].velocity_mm_per_s(), None);

    let cmds = flat("G1 Fabc\nG1 X1 Y1 E1\n");
    assert!(cmds[1].last_seen_feed_rate_mm_per_s.is_nan());
    assert_eq!(cmds[1].velocity_mm_per_s(), None);
    assert!(cmds[1].distance_mm().is_some());
}

#[test]
fn test_metrics_come_together() {
    let src = "; start\nG28\nG1 Z0.2 F1800\nG1 X1 Y1\nG1 X2 Y2 E0.5\nG1 Y3 E0.7\n\
               G1 E0.2\nG1 X4 E1\nM107\nG1 X5 Y5 E1.2 ; fill\n";
    for cmd in flat(src) {
        let wanted = (cmd.x.is_some() || cmd.y.is_some()) && cmd.e.is_some();
        assert_eq!(cmd.metrics.is_some(), wanted, "{}", cmd.line);
        if let Some(m) = cmd.metrics {
            assert!(m.distance_mm >= 0.);
            assert_eq!(m.velocity_mm_per_s.is_some(), m.flow_mm3_per_s.is_some());
            assert!(m.velocity_mm_per_s.is_some());
        }
    }
}

#[test]
fn test_distance_symmetric() {
    let there = flat("G1 X1 Y2 E1\nG1 X4 Y6 E2\n");
    let back = flat("G1 X4 Y6 E1\nG1 X1 Y2 E2\n");
    assert_eq!(there[1].distance_mm(), back[1].distance_mm());
    assert!(close(there[1].distance_mm().unwrap(), 5.));
}

#[test]
fn test_filament() {
    let default = Filament::default();
    assert_eq!(default.diameter_mm, 1.75);
    assert!(close(default.radius_mm(), 0.875));
    assert!(close(default.cross_section_mm2(), area()));
    assert!(close(Filament::new(1.75, 1.24).density_g_per_mm3, default.density_g_per_mm3));

    let thick = Filament::new(2.85, 1.27);
    let prog = parse_with("G1 X10 Y0 E2\n", thick);
    assert_eq!(prog.filament(), &thick);
    let m = prog.command(0, 0).unwrap().metrics.unwrap();
    let volume = PI * 1.425 * 1.425 * 2.;
    assert!(close(m.extruded_volume_mm3, volume));
    assert!(close(m.weight_g, volume * 0.00127));
}

#[test]
fn test_totals() {
    let prog = parse("G1 X10 Y0 E1\nG1 X10 Y10 E2\nG0 Z0.2\nG1 X10 Y20 E3\nG1 X10 Y20 E3\n");
    let first = prog.layers()[0].totals();
    assert_eq!(first.moves, 2);
    assert!(close(first.distance_mm, 20.));
    assert!(close(first.extruded_volume_mm3, 2. * area()));

    // the zero-length move still counts as a move
    let second = prog.layers()[1].totals();
    assert_eq!(second.moves, 2);
    assert!(close(second.distance_mm, 10.));

    let all = prog.totals();
    assert_eq!(all.moves, 4);
    assert!(close(all.distance_mm, 30.));
    assert!(close(all.extruded_volume_mm3, 3. * area()));
    assert!(close(all.weight_g, 3. * area() * 0.00124));
}
