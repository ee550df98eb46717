// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Physical quantities derived from extruding moves.

use std::f64::consts::PI;
use serde::Serialize;

use crate::model::Command;

/// Properties of the filament fed into the extruder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Filament {
    pub diameter_mm: f64,
    pub density_g_per_mm3: f64,
}

impl Default for Filament {
    /// 1.75 mm PLA: 1.24 g/cm³.
    fn default() -> Self {
        Filament { diameter_mm: 1.75, density_g_per_mm3: 0.00124 }
    }
}

impl Filament {
    pub fn new(diameter_mm: f64, density_g_per_cm3: f64) -> Self {
        Filament { diameter_mm, density_g_per_mm3: density_g_per_cm3 / 1000. }
    }

    pub fn radius_mm(&self) -> f64 {
        self.diameter_mm / 2.
    }

    pub fn cross_section_mm2(&self) -> f64 {
        PI * self.radius_mm() * self.radius_mm()
    }
}

/// Quantities computed for a command that moves in the XY plane and
/// extrudes at the same time.
///
/// None of the values are guarded against division by zero or NaN inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Planar travel distance from the previous extruding position.
    pub distance_mm: f64,
    /// Filament volume pushed by this move; negative for retractions.
    pub extruded_volume_mm3: f64,
    pub weight_g: f64,
    pub volume_per_distance: f64,
    /// Distance divided by the current feed rate.  Both rates are only set
    /// if a non-zero feed rate is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_mm_per_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_mm3_per_s: Option<f64>,
}

/// Extruder head position as of the last extruding move.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Head {
    x: f64,
    y: f64,
    e: f64,
}

impl Head {
    /// Compute metrics for `cmd` against the current position, and advance
    /// the position if the command moved and extruded.
    ///
    /// `cmd.last_seen_feed_rate_mm_per_s` must already be filled in.
    pub(crate) fn advance(&mut self, cmd: &Command, filament: &Filament) -> Option<Metrics> {
        if cmd.x.is_none() && cmd.y.is_none() {
            return None;
        }
        let e = cmd.e?;
        let x = cmd.x.unwrap_or(self.x);
        let y = cmd.y.unwrap_or(self.y);

        let distance_mm = (x - self.x).hypot(y - self.y);
        let volume = filament.cross_section_mm2() * (e - self.e);

        let feed = cmd.last_seen_feed_rate_mm_per_s;
        let has_feed = feed != 0. && !feed.is_nan();

        let metrics = Metrics {
            distance_mm,
            extruded_volume_mm3: volume,
            weight_g: volume * filament.density_g_per_mm3,
            volume_per_distance: volume / distance_mm,
            velocity_mm_per_s: if has_feed { Some(distance_mm / feed) } else { None },
            flow_mm3_per_s: if has_feed { Some(volume / feed) } else { None },
        };

        self.x = x;
        self.y = y;
        self.e = e;
        Some(metrics)
    }
}

/// Sums over the metrics of several commands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// Number of commands that carried metrics.
    pub moves: usize,
    pub distance_mm: f64,
    pub extruded_volume_mm3: f64,
    pub weight_g: f64,
}

impl Totals {
    /// Add one command's metrics.  Non-finite values are counted as a move
    /// but do not contribute to the sums.
    pub fn add(&mut self, metrics: &Metrics) {
        self.moves += 1;
        if metrics.distance_mm.is_finite() {
            self.distance_mm += metrics.distance_mm;
        }
        if metrics.extruded_volume_mm3.is_finite() {
            self.extruded_volume_mm3 += metrics.extruded_volume_mm3;
        }
        if metrics.weight_g.is_finite() {
            self.weight_g += metrics.weight_g;
        }
    }

    pub fn merge(&mut self, other: &Totals) {
        self.moves += other.moves;
        self.distance_mm += other.distance_mm;
        self.extruded_volume_mm3 += other.extruded_volume_mm3;
        self.weight_g += other.weight_g;
    }
}
