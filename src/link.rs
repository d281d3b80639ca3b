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
use crate::joint::{JointType, Range};
use crate::node::LinkNode;
use na::{Isometry3, RealField, Translation3, UnitQuaternion, Vector3};
use nalgebra as na;
use simba::scalar::SubsetOf;
use std::fmt::{self, Display};

/// A rigid link together with the joint that connects it to its parent.
///
/// The static geometry (`local_rotation`, `offset`) and the joint-space
/// state (`q`, `dq`, `ddq`) are inputs; the world state (`rotation`,
/// `translation` and the velocity/acceleration vectors) is written by
/// [`Traversal::update_kinematics`](crate::Traversal::update_kinematics).
#[derive(Debug, Clone)]
pub struct Link<T: RealField> {
    /// Name of this link
    pub name: String,
    /// Type of the joint connecting this link to its parent
    pub joint_type: JointType<T>,
    /// Limits of the joint position
    pub limits: Option<Range<T>>,
    /// `b`: offset from the parent attachment point, in the parent frame
    pub(crate) offset: Vector3<T>,
    /// `Rb`: orientation of the joint axis frame relative to the parent frame
    pub(crate) local_rotation: UnitQuaternion<T>,
    /// `q`: joint position (angle or displacement)
    pub(crate) position: T,
    /// `dq`: joint velocity
    pub(crate) velocity: T,
    /// `ddq`: joint acceleration
    pub(crate) acceleration: T,
    /// `R`: world rotation, written by the kinematics pass
    pub rotation: UnitQuaternion<T>,
    /// `p`: world position, written by the kinematics pass
    pub translation: Vector3<T>,
    /// `w`: world angular velocity
    pub angular_velocity: Vector3<T>,
    /// `v`: world linear velocity
    pub linear_velocity: Vector3<T>,
    /// `dw`: world angular acceleration
    pub angular_acceleration: Vector3<T>,
    /// `dv`: world linear acceleration
    pub linear_acceleration: Vector3<T>,
}

impl<T> Link<T>
where
    T: RealField + SubsetOf<f64> + Copy,
{
    /// Create new Link with name and joint type
    ///
    /// # Examples
    ///
    /// ```
    /// extern crate nalgebra as na;
    ///
    /// // create a link behind a fixed joint
    /// let fixed = linkwalk::Link::<f32>::new("f0", linkwalk::JointType::Fixed);
    /// assert!(fixed.joint_position().is_none());
    ///
    /// // create a link behind a revolute joint around the Y-axis
    /// let rot = linkwalk::Link::<f64>::new(
    ///     "r0",
    ///     linkwalk::JointType::Revolute { axis: na::Vector3::y_axis() },
    /// );
    /// assert_eq!(rot.joint_position().unwrap(), 0.0);
    /// ```
    pub fn new(name: &str, joint_type: JointType<T>) -> Link<T> {
        Link {
            name: name.to_string(),
            joint_type,
            limits: None,
            offset: Vector3::zeros(),
            local_rotation: UnitQuaternion::identity(),
            position: T::zero(),
            velocity: T::zero(),
            acceleration: T::zero(),
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            linear_velocity: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
            linear_acceleration: Vector3::zeros(),
        }
    }
    /// Set the position of the joint
    ///
    /// It returns Err if it is out of the limits, or this is a fixed joint.
    ///
    /// # Examples
    ///
    /// ```
    /// extern crate nalgebra as na;
    ///
    /// let mut fixed = linkwalk::Link::<f32>::new("f0", linkwalk::JointType::Fixed);
    /// assert!(fixed.set_joint_position(1.0).is_err());
    ///
    /// let mut rot = linkwalk::Link::<f64>::new(
    ///     "r0",
    ///     linkwalk::JointType::Revolute { axis: na::Vector3::y_axis() },
    /// );
    /// // If it has no limits, set_joint_position always succeeds.
    /// rot.set_joint_position(0.2).unwrap();
    /// assert_eq!(rot.joint_position().unwrap(), 0.2);
    /// ```
    pub fn set_joint_position(&mut self, position: T) -> Result<(), Error> {
        if !self.is_movable() {
            return Err(Error::SetToFixedError {
                joint_name: self.name.clone(),
            });
        }
        if let Some(range) = self.limits {
            if !range.is_valid(position) {
                return Err(Error::OutOfLimitError {
                    joint_name: self.name.clone(),
                    position: na::convert(position),
                    min_limit: na::convert(range.min),
                    max_limit: na::convert(range.max),
                });
            }
        }
        self.position = position;
        Ok(())
    }
    /// Set the clamped position of the joint
    ///
    /// It refers to the joint limits and clamps the argument. This function
    /// does nothing if this is a fixed joint.
    ///
    /// # Examples
    ///
    /// ```
    /// extern crate nalgebra as na;
    ///
    /// let mut rot = linkwalk::Link::<f64>::new(
    ///     "r0",
    ///     linkwalk::JointType::Revolute { axis: na::Vector3::y_axis() },
    /// );
    /// rot.limits = Some(linkwalk::Range::new(-1.0, 1.0));
    /// rot.set_joint_position_clamped(2.0);
    /// assert_eq!(rot.joint_position().unwrap(), 1.0);
    /// rot.set_joint_position_clamped(-2.0);
    /// assert_eq!(rot.joint_position().unwrap(), -1.0);
    /// ```
    pub fn set_joint_position_clamped(&mut self, position: T) {
        if !self.is_movable() {
            return;
        }
        let clamped = match self.limits {
            Some(range) => range.clamp(position),
            None => position,
        };
        self.position = clamped;
    }
    /// Set the position without checking the limits and the joint type
    pub fn set_joint_position_unchecked(&mut self, position: T) {
        self.position = position;
    }
    /// Returns the position (angle or displacement), `None` for fixed joints
    #[inline]
    pub fn joint_position(&self) -> Option<T> {
        match self.joint_type {
            JointType::Fixed => None,
            _ => Some(self.position),
        }
    }
    /// Set the joint velocity, `Err` for fixed joints
    pub fn set_joint_velocity(&mut self, velocity: T) -> Result<(), Error> {
        if !self.is_movable() {
            return Err(Error::SetToFixedError {
                joint_name: self.name.clone(),
            });
        }
        self.velocity = velocity;
        Ok(())
    }
    /// Returns the joint velocity, `None` for fixed joints
    #[inline]
    pub fn joint_velocity(&self) -> Option<T> {
        match self.joint_type {
            JointType::Fixed => None,
            _ => Some(self.velocity),
        }
    }
    /// Set the joint acceleration, `Err` for fixed joints
    pub fn set_joint_acceleration(&mut self, acceleration: T) -> Result<(), Error> {
        if !self.is_movable() {
            return Err(Error::SetToFixedError {
                joint_name: self.name.clone(),
            });
        }
        self.acceleration = acceleration;
        Ok(())
    }
    /// Returns the joint acceleration, `None` for fixed joints
    #[inline]
    pub fn joint_acceleration(&self) -> Option<T> {
        match self.joint_type {
            JointType::Fixed => None,
            _ => Some(self.acceleration),
        }
    }

    /// `b`: offset from the parent attachment point, in the parent frame
    #[inline]
    pub fn offset(&self) -> &Vector3<T> {
        &self.offset
    }
    #[inline]
    pub fn set_offset(&mut self, offset: Vector3<T>) {
        self.offset = offset;
    }
    /// `Rb`: orientation of the joint axis frame relative to the parent frame
    #[inline]
    pub fn local_rotation(&self) -> &UnitQuaternion<T> {
        &self.local_rotation
    }
    #[inline]
    pub fn set_local_rotation(&mut self, local_rotation: UnitQuaternion<T>) {
        self.local_rotation = local_rotation;
    }
    /// The static frame (`Rb`, `b`) as a single isometry
    pub fn origin(&self) -> Isometry3<T> {
        Isometry3::from_parts(Translation3::from(self.offset), self.local_rotation)
    }
    pub fn set_origin(&mut self, origin: Isometry3<T>) {
        self.offset = origin.translation.vector;
        self.local_rotation = origin.rotation;
    }
    /// The world state (`R`, `p`) as a single isometry
    ///
    /// The value is updated by [`Traversal::update_kinematics`](crate::Traversal::update_kinematics).
    pub fn world_transform(&self) -> Isometry3<T> {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }

    #[inline]
    pub fn is_movable(&self) -> bool {
        !matches!(self.joint_type, JointType::Fixed)
    }
}

impl<T: RealField> Display for Link<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.joint_type)
    }
}

/// Build a `Link<T>`
///
/// # Examples
///
/// ```
/// use linkwalk::*;
/// let l0 = LinkBuilder::new()
///     .name("link_pitch")
///     .translation(Translation3::new(0.0, 0.1, 0.0))
///     .joint_type(JointType::Revolute { axis: Vector3::y_axis() })
///     .finalize();
/// println!("{:?}", l0);
/// ```
#[derive(Debug, Clone)]
pub struct LinkBuilder<T: RealField> {
    name: String,
    joint_type: JointType<T>,
    limits: Option<Range<T>>,
    origin: Isometry3<T>,
}

impl<T> Default for LinkBuilder<T>
where
    T: RealField + SubsetOf<f64> + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkBuilder<T>
where
    T: RealField + SubsetOf<f64> + Copy,
{
    pub fn new() -> LinkBuilder<T> {
        LinkBuilder {
            name: "".to_string(),
            joint_type: JointType::Fixed,
            limits: None,
            origin: Isometry3::identity(),
        }
    }
    /// Set the name of the `Link`
    pub fn name(mut self, name: &str) -> LinkBuilder<T> {
        self.name = name.to_string();
        self
    }
    /// Set the type of the joint which connects this link to its parent
    pub fn joint_type(mut self, joint_type: JointType<T>) -> LinkBuilder<T> {
        self.joint_type = joint_type;
        self
    }
    /// Set joint limits
    pub fn limits(mut self, limits: Option<Range<T>>) -> LinkBuilder<T> {
        self.limits = limits;
        self
    }
    /// Set the static frame (`Rb`, `b`) of this link
    pub fn origin(mut self, origin: Isometry3<T>) -> LinkBuilder<T> {
        self.origin = origin;
        self
    }
    /// Set the translation (`b`) of the static frame of this link
    pub fn translation(mut self, translation: Translation3<T>) -> LinkBuilder<T> {
        self.origin.translation = translation;
        self
    }
    /// Set the rotation (`Rb`) of the static frame of this link
    pub fn rotation(mut self, rotation: UnitQuaternion<T>) -> LinkBuilder<T> {
        self.origin.rotation = rotation;
        self
    }
    /// Create `Link` instance
    pub fn finalize(self) -> Link<T> {
        let mut link = Link::new(&self.name, self.joint_type);
        link.set_origin(self.origin);
        link.limits = self.limits;
        link
    }
    /// Create `LinkNode` instead of `Link` as output
    pub fn into_node(self) -> LinkNode<T> {
        self.finalize().into()
    }
}
