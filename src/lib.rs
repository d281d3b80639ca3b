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
//! # Link-tree traversal and forward kinematics using [nalgebra](https://nalgebra.org).
//!
//! `linkwalk` propagates pose (and optionally velocity and acceleration)
//! through a tree of rigid links connected by revolute, prismatic or fixed
//! joints. A [`Traversal`] is an ordered view over the links of a
//! [`Mechanism`], anchored at an arbitrary reference link; it can walk
//! both toward the root and toward the leaves, so kinematics can be
//! propagated outward from any link whose world state is known.
//!
//! # Examples
//!
//! ```
//! use linkwalk::*;
//!
//! let root = LinkBuilder::<f64>::new().name("root").into_node();
//! let arm = LinkBuilder::new()
//!     .name("arm")
//!     .joint_type(JointType::Revolute {
//!         axis: Vector3::z_axis(),
//!     })
//!     .translation(Translation3::new(1.0, 0.0, 0.0))
//!     .into_node();
//! arm.set_parent(&root);
//!
//! let mechanism = Mechanism::from_root(root);
//! mechanism
//!     .find("arm")
//!     .unwrap()
//!     .set_joint_position(std::f64::consts::FRAC_PI_2)
//!     .unwrap();
//!
//! let traversal = mechanism.traversal();
//! traversal.update_transforms();
//!
//! let arm = mechanism.find("arm").unwrap();
//! let p = arm.link().translation;
//! assert!((p.x - 1.0).abs() < 1e-9);
//! assert!((arm.link().rotation.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
//! ```
use nalgebra as na;

mod errors;
mod fk;
mod link;
mod mechanism;
mod traversal;

pub mod iterator;
pub mod joint;
pub mod node;

pub use self::errors::Error;
pub use self::joint::{JointType, Range};
pub use self::link::{Link, LinkBuilder};
pub use self::mechanism::{Mechanism, MechanismId};
pub use self::node::LinkNode;
pub use self::traversal::Traversal;

// re-export the nalgebra types appearing in the public API
pub use na::{Isometry3, RealField, Translation3, Unit, UnitQuaternion, Vector3};
pub use simba::scalar::{SubsetOf, SupersetOf};
