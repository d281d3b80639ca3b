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
//! graph structure for the link tree
use crate::errors::Error;
use crate::iterator::{Ancestors, Descendants};
use crate::link::Link;
use crate::mechanism::MechanismId;
use na::{Isometry3, RealField};
use nalgebra as na;
use simba::scalar::SubsetOf;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt::{self, Display};
use std::ops::{Deref, DerefMut};
use std::rc::{Rc, Weak};

type WeakLink<T> = Weak<RefCell<LinkImpl<T>>>;

#[derive(Debug)]
/// Inner repr of a node of the link tree
pub struct LinkImpl<T: RealField> {
    pub parent: Option<WeakLink<T>>,
    pub children: Vec<LinkNode<T>>,
    pub link: Link<T>,
    pub mechanism: Option<MechanismId>,
}

/// Shared, non-owning handle to a link in the tree
///
/// Cloning the handle clones the reference, not the link. Equality is
/// identity of the referenced link.
#[derive(Debug)]
pub struct LinkNode<T: RealField>(pub(crate) Rc<RefCell<LinkImpl<T>>>);

impl<T> LinkNode<T>
where
    T: RealField,
{
    pub(crate) fn from_rc(rc: Rc<RefCell<LinkImpl<T>>>) -> Self {
        LinkNode(rc)
    }

    pub fn new(link: Link<T>) -> Self {
        LinkNode(Rc::new(RefCell::new(LinkImpl {
            parent: None,
            children: Vec::new(),
            link,
            mechanism: None,
        })))
    }

    /// Borrow the contained `Link`
    pub fn link(&self) -> LinkRefGuard<'_, T> {
        LinkRefGuard {
            guard: self.0.borrow(),
        }
    }

    /// Mutably borrow the contained `Link`
    ///
    /// Useful to seed the world state of a reference link before
    /// propagating kinematics from it.
    pub fn link_mut(&self) -> LinkRefGuardMut<'_, T> {
        LinkRefGuardMut {
            guard: self.0.borrow_mut(),
        }
    }

    pub fn parent(&self) -> Option<LinkNode<T>> {
        match self.0.borrow().parent {
            Some(ref weak) => weak.upgrade().map(LinkNode::from_rc),
            None => None,
        }
    }

    pub fn children(&self) -> ChildrenRefGuard<'_, T> {
        ChildrenRefGuard {
            guard: self.0.borrow(),
        }
    }

    /// iter from this link to the root, it contains this link itself
    #[inline]
    pub fn iter_ancestors(&self) -> Ancestors<T> {
        Ancestors::new(Some(self.clone()))
    }
    /// iter toward the leaves, it contains this link itself
    #[inline]
    pub fn iter_descendants(&self) -> Descendants<T> {
        Descendants::new(vec![self.clone()])
    }

    /// Set parent and child relations at same time
    pub fn set_parent(&self, parent: &LinkNode<T>) {
        self.0.borrow_mut().parent = Some(Rc::downgrade(&parent.0));
        parent.0.borrow_mut().children.push(self.clone());
    }

    /// # Examples
    ///
    /// ```
    /// let l0 = linkwalk::LinkBuilder::<f32>::new().into_node();
    /// let l1 = linkwalk::LinkBuilder::new().into_node();
    /// l1.set_parent(&l0);
    /// assert!(l0.is_root());
    /// assert!(!l1.is_root());
    /// ```
    pub fn is_root(&self) -> bool {
        self.0.borrow().parent.is_none()
    }

    /// # Examples
    ///
    /// ```
    /// let l0 = linkwalk::LinkBuilder::<f64>::new().into_node();
    /// let l1 = linkwalk::LinkBuilder::new().into_node();
    /// l1.set_parent(&l0);
    /// assert!(!l0.is_end());
    /// assert!(l1.is_end());
    /// ```
    pub fn is_end(&self) -> bool {
        self.0.borrow().children.is_empty()
    }

    /// Identity of the mechanism this link belongs to
    ///
    /// Stamped by [`Mechanism::from_root`](crate::Mechanism::from_root).
    /// Parent/child edges between links of different mechanisms are never
    /// followed upward by [`Traversal::find`](crate::Traversal::find).
    #[inline]
    pub fn mechanism_id(&self) -> Option<MechanismId> {
        self.0.borrow().mechanism
    }

    pub(crate) fn set_mechanism_id(&self, id: Option<MechanismId>) {
        self.0.borrow_mut().mechanism = id;
    }

    /// The world state (`R`, `p`) of this link as a single isometry
    #[inline]
    pub fn world_transform(&self) -> Isometry3<T>
    where
        T: SubsetOf<f64> + Copy,
    {
        self.0.borrow().link.world_transform()
    }
}

impl<T> LinkNode<T>
where
    T: RealField + SubsetOf<f64> + Copy,
{
    /// Set the position (angle or displacement) of the joint
    ///
    /// If the position is out of the limits, it returns Err.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwalk::*;
    /// let l0 = LinkBuilder::new()
    ///     .joint_type(JointType::Prismatic { axis: Vector3::z_axis() })
    ///     .limits(Some((0.0..=2.0).into()))
    ///     .into_node();
    /// assert!(l0.set_joint_position(1.0).is_ok());
    /// assert!(l0.set_joint_position(-1.0).is_err());
    /// ```
    ///
    /// Setting a position for a fixed joint is an error.
    ///
    /// ```
    /// use linkwalk::*;
    /// let l0 = LinkBuilder::<f64>::new()
    ///     .joint_type(JointType::Fixed)
    ///     .into_node();
    /// assert!(l0.set_joint_position(0.0).is_err());
    /// ```
    pub fn set_joint_position(&self, position: T) -> Result<(), Error> {
        self.0.borrow_mut().link.set_joint_position(position)
    }
    #[inline]
    pub fn set_joint_position_unchecked(&self, position: T) {
        self.0.borrow_mut().link.set_joint_position_unchecked(position);
    }
    #[inline]
    pub fn set_joint_position_clamped(&self, position: T) {
        self.0.borrow_mut().link.set_joint_position_clamped(position);
    }
    #[inline]
    pub fn joint_position(&self) -> Option<T> {
        self.0.borrow().link.joint_position()
    }
    pub fn set_joint_velocity(&self, velocity: T) -> Result<(), Error> {
        self.0.borrow_mut().link.set_joint_velocity(velocity)
    }
    #[inline]
    pub fn joint_velocity(&self) -> Option<T> {
        self.0.borrow().link.joint_velocity()
    }
    pub fn set_joint_acceleration(&self, acceleration: T) -> Result<(), Error> {
        self.0.borrow_mut().link.set_joint_acceleration(acceleration)
    }
    #[inline]
    pub fn joint_acceleration(&self) -> Option<T> {
        self.0.borrow().link.joint_acceleration()
    }
    #[inline]
    pub fn is_movable(&self) -> bool {
        self.0.borrow().link.is_movable()
    }
}

impl<T: RealField> Clone for LinkNode<T> {
    fn clone(&self) -> Self {
        LinkNode(self.0.clone())
    }
}

impl<T: RealField> PartialEq for LinkNode<T> {
    fn eq(&self, other: &LinkNode<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: RealField> Eq for LinkNode<T> {}

impl<T: RealField> Display for LinkNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.borrow().link.fmt(f)
    }
}

impl<T> From<Link<T>> for LinkNode<T>
where
    T: RealField,
{
    fn from(link: Link<T>) -> Self {
        Self::new(link)
    }
}

macro_rules! def_ref_guard {
    ($guard_struct:ident, $target:ty, $member:ident) => {
        pub struct $guard_struct<'a, T>
        where
            T: RealField,
        {
            guard: Ref<'a, LinkImpl<T>>,
        }

        impl<'a, T> Deref for $guard_struct<'a, T>
        where
            T: RealField,
        {
            type Target = $target;
            fn deref(&self) -> &Self::Target {
                &self.guard.$member
            }
        }
    };
}

def_ref_guard!(LinkRefGuard, Link<T>, link);
def_ref_guard!(ChildrenRefGuard, Vec<LinkNode<T>>, children);

pub struct LinkRefGuardMut<'a, T>
where
    T: RealField,
{
    guard: RefMut<'a, LinkImpl<T>>,
}

impl<'a, T> Deref for LinkRefGuardMut<'a, T>
where
    T: RealField,
{
    type Target = Link<T>;
    fn deref(&self) -> &Self::Target {
        &self.guard.link
    }
}

impl<'a, T> DerefMut for LinkRefGuardMut<'a, T>
where
    T: RealField,
{
    fn deref_mut(&mut self) -> &mut Link<T> {
        &mut self.guard.link
    }
}

/// set parents easily
///
/// ```
/// let l0 = linkwalk::LinkBuilder::<f64>::new().into_node();
/// let l1 = linkwalk::LinkBuilder::new().into_node();
/// let l2 = linkwalk::LinkBuilder::new().into_node();
///
/// // This is the same as below
/// // l1.set_parent(&l0);
/// // l2.set_parent(&l1);
/// linkwalk::connect![l0 => l1 => l2];
///
/// assert!(l0.is_root());
/// assert!(!l1.is_root());
/// assert!(!l1.is_end());
/// assert!(l2.is_end());
/// ```
#[macro_export]
macro_rules! connect {
    ($x:expr => $y:expr) => {
        $y.set_parent(&$x);
    };
    ($x:expr => $y:expr => $($rest:tt)+) => {
        $y.set_parent(&$x);
        $crate::connect!($y => $($rest)*);
    };
}
