/*
  Copyright 2024 the linkwalk developers

  Licensed under the Apache License, Version 2.0 (the "License");
  you may not use this file except in compliance with the License.
  You may obtain a copy of the License at

      http://www.apache.org/licenses/LICENSE-2.0

  Unless required by applicable law or agreed to in writing, software
  distributed under the License is distributed on an "AS IS" BASIS,
  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
  See the License for the specific language governing permissions and
  limitations under the License.
*/
//! Forward kinematics propagation over a [`Traversal`]
use crate::joint::JointType;
use crate::node::LinkNode;
use crate::traversal::Traversal;
use na::{RealField, UnitQuaternion};
use nalgebra as na;

impl<T> Traversal<T>
where
    T: RealField + Copy,
{
    /// Propagate world poses only
    ///
    /// Same as [`update_kinematics`](Traversal::update_kinematics) with
    /// both flags off.
    pub fn update_transforms(&self) {
        self.update_kinematics(false, false);
    }

    /// Propagate the world state along the traversal
    ///
    /// The reference link (index 0) is the boundary condition: its current
    /// world state is read but never recomputed. Entries in the upward
    /// region are solved from their topological predecessor in the
    /// sequence, which in the mechanism's own sense is their *child*, using
    /// the inverse transform of that child's joint. Entries after the
    /// upward region are solved from their structural parent with the
    /// direct transform.
    ///
    /// Velocities (`w`, `v`) are written only if `calc_velocity` is set;
    /// accelerations (`dw`, `dv`) only if `calc_velocity` and
    /// `calc_acceleration` are both set. Fields that are not requested
    /// keep whatever value they had before.
    ///
    /// The traversal is trusted: every non-reference entry is assumed to
    /// have an up-to-date predecessor. A corrupt traversal yields stale
    /// numbers, never a panic.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwalk::*;
    ///
    /// let root = LinkBuilder::<f64>::new().name("root").into_node();
    /// let slider = LinkBuilder::new()
    ///     .name("slider")
    ///     .joint_type(JointType::Prismatic { axis: Vector3::x_axis() })
    ///     .translation(Translation3::new(0.0, 0.0, 1.0))
    ///     .into_node();
    /// connect![root => slider];
    /// slider.set_joint_position(0.5).unwrap();
    ///
    /// let traversal = Traversal::from_reference(&root, true, true);
    /// traversal.update_kinematics(false, false);
    ///
    /// let p = slider.link().translation;
    /// assert!((p.x - 0.5).abs() < 1e-9);
    /// assert!((p.z - 1.0).abs() < 1e-9);
    /// ```
    pub fn update_kinematics(&self, calc_velocity: bool, calc_acceleration: bool) {
        let n = self.len();
        if n == 0 {
            return;
        }
        let upward_end = self.num_upward_connections().min(n - 1);
        for i in 1..=upward_end {
            solve_upward(&self[i], &self[i - 1], calc_velocity, calc_acceleration);
        }
        for i in (upward_end + 1)..n {
            // the structural parent is the predecessor here; a traversal
            // that got out of sync with the tree is skipped silently
            let Some(parent) = self[i].parent() else {
                continue;
            };
            solve_downward(&self[i], &parent, calc_velocity, calc_acceleration);
        }
    }
}

/// Solve `link` from its known child, inverting the child's joint transform.
fn solve_upward<T: RealField + Copy>(
    link: &LinkNode<T>,
    child: &LinkNode<T>,
    calc_velocity: bool,
    calc_acceleration: bool,
) {
    let c = child.link().clone();
    let mut l = link.link_mut();

    match c.joint_type {
        JointType::Revolute { axis } => {
            let rotation = c.rotation
                * UnitQuaternion::from_axis_angle(&axis, c.position).inverse()
                * c.local_rotation.inverse();
            let arm = rotation * c.offset;
            l.rotation = rotation;
            l.translation = c.translation - arm;

            if calc_velocity {
                let s = rotation * (c.local_rotation * axis.into_inner());
                let w = c.angular_velocity - s * c.velocity;
                l.angular_velocity = w;
                l.linear_velocity = c.linear_velocity - w.cross(&arm);

                if calc_acceleration {
                    let dw =
                        c.angular_acceleration - w.cross(&s) * c.velocity - s * c.acceleration;
                    l.angular_acceleration = dw;
                    l.linear_acceleration =
                        c.linear_acceleration - w.cross(&w.cross(&arm)) - dw.cross(&arm);
                }
            }
        }
        JointType::Prismatic { axis } => {
            let rotation = c.rotation * c.local_rotation.inverse();
            let arm = rotation * (c.offset + c.local_rotation * (axis.into_inner() * c.position));
            l.rotation = rotation;
            l.translation = c.translation - arm;

            if calc_velocity {
                let s = rotation * (c.local_rotation * axis.into_inner());
                l.angular_velocity = c.angular_velocity;
                l.linear_velocity = c.linear_velocity - s * c.velocity;

                if calc_acceleration {
                    let two: T = na::convert(2.0);
                    l.angular_acceleration = c.angular_acceleration;
                    l.linear_acceleration = c.linear_acceleration
                        - c.angular_velocity.cross(&c.angular_velocity.cross(&arm))
                        - c.angular_acceleration.cross(&arm)
                        - c.angular_velocity.cross(&s) * (c.velocity * two)
                        - s * c.acceleration;
                }
            }
        }
        JointType::Fixed => {
            let rotation = c.rotation * c.local_rotation.inverse();
            let arm = rotation * c.offset;
            l.rotation = rotation;
            l.translation = c.translation - arm;

            if calc_velocity {
                let w = c.angular_velocity;
                l.angular_velocity = w;
                l.linear_velocity = c.linear_velocity - w.cross(&arm);

                if calc_acceleration {
                    l.angular_acceleration = c.angular_acceleration;
                    l.linear_acceleration = c.linear_acceleration
                        - c.angular_velocity.cross(&c.angular_velocity.cross(&arm))
                        - c.angular_acceleration.cross(&arm);
                }
            }
        }
    }
}

/// Solve `link` from its known structural parent with the direct transform.
fn solve_downward<T: RealField + Copy>(
    link: &LinkNode<T>,
    parent: &LinkNode<T>,
    calc_velocity: bool,
    calc_acceleration: bool,
) {
    let p = parent.link().clone();
    let mut l = link.link_mut();

    match l.joint_type {
        JointType::Revolute { axis } => {
            let rotation =
                p.rotation * l.local_rotation * UnitQuaternion::from_axis_angle(&axis, l.position);
            let arm = p.rotation * l.offset;
            l.rotation = rotation;
            l.translation = p.translation + arm;

            if calc_velocity {
                let s = p.rotation * (l.local_rotation * axis.into_inner());
                l.angular_velocity = p.angular_velocity + s * l.velocity;
                l.linear_velocity = p.linear_velocity + p.angular_velocity.cross(&arm);

                if calc_acceleration {
                    l.angular_acceleration = p.angular_acceleration
                        + p.angular_velocity.cross(&s) * l.velocity
                        + s * l.acceleration;
                    l.linear_acceleration = p.linear_acceleration
                        + p.angular_velocity.cross(&p.angular_velocity.cross(&arm))
                        + p.angular_acceleration.cross(&arm);
                }
            }
        }
        JointType::Prismatic { axis } => {
            let rotation = p.rotation * l.local_rotation;
            let arm = p.rotation * (l.offset + l.local_rotation * (axis.into_inner() * l.position));
            l.rotation = rotation;
            l.translation = p.translation + arm;

            if calc_velocity {
                let s = p.rotation * (l.local_rotation * axis.into_inner());
                l.angular_velocity = p.angular_velocity;
                l.linear_velocity = p.linear_velocity + s * l.velocity;

                if calc_acceleration {
                    let two: T = na::convert(2.0);
                    l.angular_acceleration = p.angular_acceleration;
                    l.linear_acceleration = p.linear_acceleration
                        + p.angular_velocity.cross(&p.angular_velocity.cross(&arm))
                        + p.angular_acceleration.cross(&arm)
                        + p.angular_velocity.cross(&s) * (l.velocity * two)
                        + s * l.acceleration;
                }
            }
        }
        JointType::Fixed => {
            let rotation = p.rotation * l.local_rotation;
            let arm = p.rotation * l.offset;
            l.rotation = rotation;
            l.translation = p.translation + arm;

            if calc_velocity {
                l.angular_velocity = p.angular_velocity;
                l.linear_velocity = p.linear_velocity + p.angular_velocity.cross(&arm);

                if calc_acceleration {
                    l.angular_acceleration = p.angular_acceleration;
                    l.linear_acceleration = p.linear_acceleration
                        + p.angular_velocity.cross(&p.angular_velocity.cross(&arm))
                        + p.angular_acceleration.cross(&arm);
                }
            }
        }
    }
}
