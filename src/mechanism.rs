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
use crate::errors::Error;
use crate::joint::Range;
use crate::node::LinkNode;
use crate::traversal::Traversal;
use nalgebra::RealField;
use simba::scalar::SubsetOf;
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_MECHANISM_ID: AtomicUsize = AtomicUsize::new(0);

/// Identity of one articulated mechanism ("body")
///
/// Links stamped with different ids are never connected by the upward walk
/// of [`Traversal::find`], even when a parent/child edge exists between
/// them (such edges cut kinematic loops between attached mechanisms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MechanismId(usize);

impl MechanismId {
    pub(crate) fn fresh() -> Self {
        MechanismId(NEXT_MECHANISM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The set of links forming one articulated tree
///
/// # Examples
///
/// ```
/// use linkwalk::*;
///
/// let l0 = LinkBuilder::new()
///     .name("shoulder")
///     .translation(Translation3::new(0.0, 0.0, 0.1))
///     .joint_type(JointType::Revolute { axis: Vector3::y_axis() })
///     .into_node();
/// let l1 = LinkBuilder::new()
///     .name("elbow")
///     .translation(Translation3::new(0.0, 0.0, 0.5))
///     .joint_type(JointType::Revolute { axis: Vector3::y_axis() })
///     .into_node();
/// let l2 = LinkBuilder::new()
///     .name("hand")
///     .translation(Translation3::new(0.0, 0.0, 0.5))
///     .joint_type(JointType::Fixed)
///     .into_node();
/// connect![l0 => l1 => l2];
///
/// let mechanism = Mechanism::from_root(l0);
/// assert_eq!(mechanism.dof(), 2);
///
/// mechanism.set_joint_positions(&[1.0, 2.0]).unwrap();
/// let positions = mechanism.joint_positions();
/// assert_eq!(positions[0], 1.0);
/// assert_eq!(positions[1], 2.0);
///
/// let traversal = mechanism.traversal();
/// traversal.update_transforms();
/// let hand_z: f64 = mechanism.find("hand").unwrap().link().translation.z;
/// assert!(hand_z < 1.1);
/// ```
#[derive(Debug)]
pub struct Mechanism<T: RealField> {
    links: Vec<LinkNode<T>>,
    dof: usize,
    id: MechanismId,
}

impl<T> Mechanism<T>
where
    T: RealField + SubsetOf<f64> + Copy,
{
    /// Create a Mechanism from its root link
    ///
    /// Every link reachable through child edges is collected and stamped
    /// with a fresh [`MechanismId`].
    pub fn from_root(root: LinkNode<T>) -> Self {
        let links = root.iter_descendants().collect::<Vec<_>>();
        let id = MechanismId::fresh();
        for link in &links {
            link.set_mechanism_id(Some(id));
        }
        let dof = links.iter().filter(|link| link.is_movable()).count();
        Mechanism { links, dof, id }
    }

    #[inline]
    pub fn id(&self) -> MechanismId {
        self.id
    }

    /// Iterate over all contained links
    ///
    /// The order is parent before children.
    pub fn iter(&self) -> impl Iterator<Item = &LinkNode<T>> {
        self.links.iter()
    }

    /// The root link of this mechanism
    pub fn root(&self) -> &LinkNode<T> {
        &self.links[0]
    }

    /// The number of movable joints
    pub fn dof(&self) -> usize {
        self.dof
    }

    /// Find a link by name
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwalk::*;
    ///
    /// let l0 = LinkBuilder::<f64>::new().name("base").into_node();
    /// let l1 = LinkBuilder::new()
    ///     .name("pitch1")
    ///     .joint_type(JointType::Revolute { axis: Vector3::y_axis() })
    ///     .into_node();
    /// connect![l0 => l1];
    /// let mechanism = Mechanism::from_root(l0);
    /// let j = mechanism.find("pitch1").unwrap();
    /// j.set_joint_position(0.5).unwrap();
    /// assert_eq!(j.joint_position().unwrap(), 0.5);
    /// ```
    pub fn find(&self, name: &str) -> Option<&LinkNode<T>> {
        self.iter().find(|link| link.link().name == name)
    }

    /// Get the positions of the movable joints
    ///
    /// Fixed joints are skipped; the length equals `dof()`.
    pub fn joint_positions(&self) -> Vec<T> {
        self.iter().filter_map(|link| link.joint_position()).collect()
    }

    /// Set the positions of the movable joints
    ///
    /// Fixed joints are skipped; the input length must equal `dof()`.
    pub fn set_joint_positions(&self, positions: &[T]) -> Result<(), Error> {
        if positions.len() != self.dof {
            return Err(Error::SizeMismatchError {
                input: positions.len(),
                required: self.dof,
            });
        }
        for (link, position) in self
            .iter()
            .filter(|link| link.is_movable())
            .zip(positions.iter())
        {
            link.set_joint_position(*position)?;
        }
        Ok(())
    }

    /// Fast, but without limit checks
    #[inline]
    pub fn set_joint_positions_unchecked(&self, positions: &[T]) {
        for (link, position) in self
            .iter()
            .filter(|link| link.is_movable())
            .zip(positions.iter())
        {
            link.set_joint_position_unchecked(*position);
        }
    }

    /// Get the velocities of the movable joints
    pub fn joint_velocities(&self) -> Vec<T> {
        self.iter().filter_map(|link| link.joint_velocity()).collect()
    }

    /// Set the velocities of the movable joints
    pub fn set_joint_velocities(&self, velocities: &[T]) -> Result<(), Error> {
        if velocities.len() != self.dof {
            return Err(Error::SizeMismatchError {
                input: velocities.len(),
                required: self.dof,
            });
        }
        for (link, velocity) in self
            .iter()
            .filter(|link| link.is_movable())
            .zip(velocities.iter())
        {
            link.set_joint_velocity(*velocity)?;
        }
        Ok(())
    }

    /// Get the accelerations of the movable joints
    pub fn joint_accelerations(&self) -> Vec<T> {
        self.iter()
            .filter_map(|link| link.joint_acceleration())
            .collect()
    }

    /// Set the accelerations of the movable joints
    pub fn set_joint_accelerations(&self, accelerations: &[T]) -> Result<(), Error> {
        if accelerations.len() != self.dof {
            return Err(Error::SizeMismatchError {
                input: accelerations.len(),
                required: self.dof,
            });
        }
        for (link, acceleration) in self
            .iter()
            .filter(|link| link.is_movable())
            .zip(accelerations.iter())
        {
            link.set_joint_acceleration(*acceleration)?;
        }
        Ok(())
    }

    /// The limits of the movable joints
    pub fn limits(&self) -> Vec<Option<Range<T>>> {
        self.iter()
            .filter(|link| link.is_movable())
            .map(|link| link.link().limits)
            .collect()
    }

    /// The names of the movable joints
    pub fn names(&self) -> Vec<String> {
        self.iter()
            .filter(|link| link.is_movable())
            .map(|link| link.link().name.clone())
            .collect()
    }

    /// Build a full traversal of this mechanism from its root
    pub fn traversal(&self) -> Traversal<T> {
        Traversal::from_reference(self.root(), true, true)
    }
}

impl<T: RealField> Mechanism<T> {
    fn fmt_with_indent_level(
        &self,
        node: &LinkNode<T>,
        level: usize,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.links.iter().any(|link| link == node) {
            writeln!(f, "{}{}", "    ".repeat(level), node)?;
        }
        let children = node.children().to_vec();
        for child in &children {
            self.fmt_with_indent_level(child, level + 1, f)?;
        }
        Ok(())
    }
}

impl<T: RealField> Display for Mechanism<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_indent_level(&self.links[0], 0, f)
    }
}
