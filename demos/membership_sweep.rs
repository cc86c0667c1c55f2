//! Sweeps the driver's default input fuzzy sets and prints each label's
//! degree of membership as CSV, ready for plotting.
// Copyright © 2026 The fuzzy_drive authors
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use fuzzy_drive::fuzz::{FuzzyLabel, FuzzySet, FuzzyValueSet};
use fuzzy_drive::vehicle::{
    DriveConfig, FuzzyDriver, LanePosition, TravelDirection, VehicleSpeed,
};

const SAMPLES: usize = 160;

fn sweep<L: FuzzyLabel>(
    title: &str,
    set: &FuzzySet<L, f64>,
    labels: &[(&str, L)],
    from: f64,
    to: f64,
) {
    print!("{title}");
    for (name, _) in labels {
        print!(",{name}");
    }
    println!();

    for i in 0..=SAMPLES {
        let x = from + (to - from) * i as f64 / SAMPLES as f64;
        let mut values = FuzzyValueSet::new();
        set.evaluate(x, &mut values);

        print!("{x}");
        for (_, label) in labels {
            print!(",{}", values.degree(*label));
        }
        println!();
    }
    println!();
}

fn main() {
    let driver = FuzzyDriver::new(DriveConfig::default());
    let top_speed = driver.config().top_speed();
    let window = driver.config().heading_window();

    sweep(
        "speed",
        driver.speed_set(),
        &[
            ("slow", VehicleSpeed::Slow),
            ("medium", VehicleSpeed::Medium),
            ("fast", VehicleSpeed::Fast),
        ],
        0.0,
        top_speed,
    );

    sweep(
        "lane_position",
        driver.position_set(),
        &[
            ("left", LanePosition::Left),
            ("centered", LanePosition::Centered),
            ("right", LanePosition::Right),
        ],
        -1.0,
        1.0,
    );

    sweep(
        "heading_error",
        driver.direction_set(),
        &[
            ("veering_left", TravelDirection::VeeringLeft),
            ("on_course", TravelDirection::OnCourse),
            ("veering_right", TravelDirection::VeeringRight),
        ],
        -window,
        window,
    );
}
