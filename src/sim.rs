use crate::vehicle::PathReading;
use nalgebra as na;

/// Classic fixed-step fourth-order Runge-Kutta integration of `x' = f(x)`.
pub fn rk4_step<const N: usize, F>(f: F, x: na::SVector<f64, N>, dt: f64) -> na::SVector<f64, N>
where
    F: Fn(na::SVector<f64, N>) -> na::SVector<f64, N>,
{
    let k1 = f(x);
    let k2 = f(x + k1 * (dt / 2.0));
    let k3 = f(x + k2 * (dt / 2.0));
    let k4 = f(x + k3 * dt);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// A circular reference path traversed counterclockwise, standing in for the
/// host's path tracker.
pub struct CircuitPath {
    pub center: na::Vector2<f64>,
    pub radius: f64,
}

impl CircuitPath {
    /// The closest point on the circle to `position`. A query at the exact
    /// center snaps to the point at angle zero.
    pub fn closest_point(&self, position: na::Vector2<f64>) -> na::Vector2<f64> {
        let rel = position - self.center;
        let norm = rel.norm();
        if norm <= f64::EPSILON {
            return self.center + na::Vector2::new(self.radius, 0.0);
        }
        self.center + rel * (self.radius / norm)
    }

    /// The counterclockwise unit tangent at the closest point to `position`.
    pub fn direction_at(&self, position: na::Vector2<f64>) -> na::Vector2<f64> {
        let rel = position - self.center;
        let norm = rel.norm();
        if norm <= f64::EPSILON {
            return na::Vector2::new(0.0, 1.0);
        }
        na::Vector2::new(-rel.y, rel.x) / norm
    }
}

/// Kinematic vehicle plant with state `[x, y, ψ, v]`:
///
/// ┌    ┐   ┌               ┐
/// │ x' │   │ v cos ψ       │       ┌          ┐
/// │ y' │ = │ v sin ψ       │,  u = │ throttle │
/// │ ψ' │   │ -u₁ ωₘₐₓ      │       │ steering │
/// │ v' │   │ u₀ aₘₐₓ - c v │       └          ┘
/// └    ┘   └               ┘
///
/// Positive steering turns clockwise (rightward), hence the sign on ψ'.
pub struct TrackVehicle {
    pub max_accel: f64,
    pub max_yaw_rate: f64,
    pub drag: f64,
}

impl TrackVehicle {
    /// The state derivative under input `u = [throttle, steering]`. A
    /// braking command saturates at standstill; it never pushes the vehicle
    /// backwards.
    pub fn f(&self, x: na::Vector4<f64>, u: na::Vector2<f64>) -> na::Vector4<f64> {
        let psi = x[2];
        let v = x[3];
        let mut accel = u[0] * self.max_accel - self.drag * v;
        if v <= 0.0 && accel < 0.0 {
            accel = 0.0;
        }
        na::vector![v * psi.cos(), v * psi.sin(), -u[1] * self.max_yaw_rate, accel]
    }
}

/// Assembles the controller-facing sensor snapshot for a plant state
/// relative to a circuit.
pub fn sense(path: &CircuitPath, x: na::Vector4<f64>) -> PathReading<f64> {
    let position = na::Vector2::new(x[0], x[1]);
    let closest = path.closest_point(position);
    let direction = path.direction_at(position);
    PathReading {
        position: [x[0], x[1]],
        heading: [x[2].cos(), x[2].sin()],
        speed: x[3].max(0.0),
        path_point: [closest.x, closest.y],
        path_direction: [direction.x, direction.y],
    }
}
