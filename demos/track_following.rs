//! Closed-loop fuzzy driving around a circular circuit.
//! This example requires the `--features simulation` flag to be enabled.
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

#[cfg(feature = "simulation")]
mod simulation {
    use fuzzy_drive::sim::{self, CircuitPath, TrackVehicle};
    use fuzzy_drive::vehicle::{DriveCommand, DriveConfigBuilder, FuzzyDriver};
    use nalgebra as na;

    use std::fs::{create_dir_all, File};
    use std::io::Write;
    use std::path::Path;

    const STEP_SIZE: f64 = 0.01;
    const MAX_NUM_STEPS: usize = 12000;

    pub fn make_scenario() -> (FuzzyDriver<f64>, CircuitPath, TrackVehicle) {
        let config = DriveConfigBuilder::default()
            .top_speed(40.0)
            .lane_half_width(5.0)
            .build()
            .expect("Incorrect constant in example: drive config. Notify developer.");

        let path = CircuitPath {
            center: na::Vector2::zeros(),
            radius: 60.0,
        };

        let plant = TrackVehicle {
            max_accel: 6.0,
            max_yaw_rate: 2.5,
            drag: 0.05,
        };

        (FuzzyDriver::new(config), path, plant)
    }

    pub struct SimOut {
        tout: Vec<f64>,
        states: Vec<na::Vector4<f64>>,
        commands: Vec<DriveCommand<f64>>,
        offsets: Vec<f64>,
    }

    pub fn run_simulation(
        driver: FuzzyDriver<f64>,
        path: CircuitPath,
        plant: TrackVehicle,
    ) -> SimOut {
        // Start a few units outside the circuit, heading along the tangent
        let mut state = na::vector![63.0, 0.0, std::f64::consts::FRAC_PI_2, 5.0];

        let mut out = SimOut {
            tout: Vec::new(),
            states: Vec::new(),
            commands: Vec::new(),
            offsets: Vec::new(),
        };

        for step in 0..MAX_NUM_STEPS {
            let reading = sim::sense(&path, state);
            let command = driver.compute(&reading);

            let u = na::vector![command.throttle, command.steering];
            state = sim::rk4_step(|x| plant.f(x, u), state, STEP_SIZE);

            let offset = na::Vector2::new(state[0], state[1]).norm() - path.radius;

            out.tout.push(step as f64 * STEP_SIZE);
            out.states.push(state);
            out.commands.push(command);
            out.offsets.push(offset);
        }
        out
    }

    pub fn write_results(simulation_hist: SimOut) {
        let output_filename = Path::new("output/track_following.csv");
        println!("Writing results to {}", output_filename.display());
        if let Some(parent) = output_filename.parent() {
            create_dir_all(parent)
                .expect("Incorrect directory structure in example. Notify developer.");
        }
        let mut file = File::create(output_filename).expect("Failed to create file");
        writeln!(file, "time,x,y,heading,speed,throttle,steering,offset")
            .expect("Failed to write header");

        simulation_hist
            .tout
            .iter()
            .zip(simulation_hist.states.iter())
            .zip(simulation_hist.commands.iter())
            .zip(simulation_hist.offsets.iter())
            .for_each(|(((t, state), command), offset)| {
                writeln!(
                    file,
                    "{},{},{},{},{},{},{},{}",
                    t,
                    state[0],
                    state[1],
                    state[2],
                    state[3],
                    command.throttle,
                    command.steering,
                    offset
                )
                .expect("Failed to write to file");
            });
    }
}

#[cfg(feature = "simulation")]
pub fn main() {
    let (driver, path, plant) = simulation::make_scenario();

    let simulation_hist = simulation::run_simulation(driver, path, plant);

    simulation::write_results(simulation_hist);
}

#[cfg(not(feature = "simulation"))]
fn main() {
    eprintln!("This example requires `--features simulation` to run.");
}
