// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle faces and the policy for folding faces into a parent.
//!
//! A [`Face`] carries an out-of-band normal, which is never indexed, and a
//! member collection whose first three slots are the A, B and C vertices.
//! The same type serves as a parent: a mesh is a face whose members are the
//! child faces (or, under an indexing policy, their deduplicated vertices).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collection::SpatialCollection;
use crate::error::{Error, Result};
use crate::point::{Ordinates, Point, Spatial};

/// Number of vertex roles in a face.
pub const VERTEX_COUNT: usize = 3;

/// Fixed vertex slot within a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    A = 0,
    B = 1,
    C = 2,
}

impl Role {
    pub const ALL: [Role; VERTEX_COUNT] = [Role::A, Role::B, Role::C];

    /// Slot index in the member collection.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Role> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::A => "A",
            Role::B => "B",
            Role::C => "C",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How [`Face::attach`] folds a child face into its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachPolicy {
    /// Index the child's centroid. Not implemented; always fails.
    Centroid,
    /// Dedup-insert the child's A vertex.
    RoleA,
    /// Dedup-insert the child's B vertex.
    RoleB,
    /// Dedup-insert the child's C vertex.
    RoleC,
    /// Dedup-insert the child's A, B and C vertices, in that order.
    AllRoles,
    /// Append the whole child face without indexing it.
    #[default]
    AppendOnly,
}

impl AttachPolicy {
    pub const ALL: [AttachPolicy; 6] = [
        AttachPolicy::Centroid,
        AttachPolicy::RoleA,
        AttachPolicy::RoleB,
        AttachPolicy::RoleC,
        AttachPolicy::AllRoles,
        AttachPolicy::AppendOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttachPolicy::Centroid => "centroid",
            AttachPolicy::RoleA => "a",
            AttachPolicy::RoleB => "b",
            AttachPolicy::RoleC => "c",
            AttachPolicy::AllRoles => "abc",
            AttachPolicy::AppendOnly => "list",
        }
    }

    /// Stable numeric code, in declaration order.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a numeric policy code.
    ///
    /// Codes outside the closed set mean the configuration is corrupt.
    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| Error::Inconsistent(format!("attach policy code {code}")))
    }
}

impl fmt::Display for AttachPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| Error::Inconsistent(format!("unknown attach policy '{s}'")))
    }
}

/// A member of a face: a vertex point or a nested face.
#[derive(Debug, Clone)]
pub enum Element {
    Point(Point),
    Face(Face),
}

impl Element {
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Element::Point(p) => Some(p),
            Element::Face(_) => None,
        }
    }

    pub fn as_face(&self) -> Option<&Face> {
        match self {
            Element::Face(f) => Some(f),
            Element::Point(_) => None,
        }
    }

    pub fn into_point(self) -> Option<Point> {
        match self {
            Element::Point(p) => Some(p),
            Element::Face(_) => None,
        }
    }

    pub fn into_face(self) -> Option<Face> {
        match self {
            Element::Face(f) => Some(f),
            Element::Point(_) => None,
        }
    }
}

impl Spatial for Element {
    fn ordinates(&self) -> Ordinates {
        match self {
            Element::Point(p) => p.ordinates(),
            Element::Face(f) => f.ordinates(),
        }
    }
}

impl From<Point> for Element {
    fn from(p: Point) -> Self {
        Element::Point(p)
    }
}

impl From<Face> for Element {
    fn from(f: Face) -> Self {
        Element::Face(f)
    }
}

/// A normal plus three role-addressed vertices, or a parent of other faces.
///
/// # Example
///
/// ```
/// use spacetime::{Face, Point, Role};
///
/// let mut face = Face::new();
/// face.set_normal(Point::new(0.0, 0.0, 1.0));
/// face.set_vertex(Point::new(0.0, 0.0, 0.0)).unwrap();
/// face.set_vertex(Point::new(1.0, 0.0, 0.0)).unwrap();
/// face.set_vertex(Point::new(0.0, 1.0, 0.0)).unwrap();
///
/// assert!(face.set_vertex(Point::new(9.0, 9.0, 9.0)).is_err());
/// assert_eq!(face.vertex(Role::B).map(Point::coords), Some([1.0, 0.0, 0.0]));
/// ```
#[derive(Debug, Clone)]
pub struct Face {
    ordinates: Ordinates,
    normal: Option<Point>,
    members: SpatialCollection<Element>,
    policy: AttachPolicy,
}

impl Face {
    /// An empty face using [`AttachPolicy::AppendOnly`] at resolution 1.
    pub fn new() -> Self {
        Self::with_policy(AttachPolicy::default())
    }

    pub fn with_policy(policy: AttachPolicy) -> Self {
        Self {
            ordinates: Ordinates::UNSET,
            normal: None,
            members: SpatialCollection::with_capacity(1.0, VERTEX_COUNT),
            policy,
        }
    }

    /// Sets the resolution members are quantized at. Existing members keep
    /// their slots.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.members.set_resolution(resolution);
        self
    }

    /// Places the face itself at `ordinates`.
    pub fn with_ordinates(mut self, ordinates: Ordinates) -> Self {
        self.ordinates = ordinates;
        self
    }

    pub fn policy(&self) -> AttachPolicy {
        self.policy
    }

    pub fn resolution(&self) -> f64 {
        self.members.resolution()
    }

    pub fn members(&self) -> &SpatialCollection<Element> {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut SpatialCollection<Element> {
        &mut self.members
    }

    pub fn normal(&self) -> Option<&Point> {
        self.normal.as_ref()
    }

    /// Replaces the out-of-band normal.
    pub fn set_normal(&mut self, normal: Point) {
        self.normal = Some(normal);
    }

    /// Attaches `point` as vertex `role`, overwriting any vertex already
    /// there.
    pub fn set_vertex_role(&mut self, role: Role, point: Point) {
        self.members.put_role(role.index(), Element::Point(point));
    }

    pub fn set_vertex_a(&mut self, point: Point) {
        self.set_vertex_role(Role::A, point);
    }

    pub fn set_vertex_b(&mut self, point: Point) {
        self.set_vertex_role(Role::B, point);
    }

    pub fn set_vertex_c(&mut self, point: Point) {
        self.set_vertex_role(Role::C, point);
    }

    /// Attaches `point` to the slot after the last one in use.
    ///
    /// Fails once three slots exist, even if some are empty (after
    /// [`Face::set_vertex_c`] or [`Face::take_vertex`]); use the role setters
    /// to fill or overwrite them.
    pub fn set_vertex(&mut self, point: Point) -> Result<Role> {
        let role = Role::from_index(self.members.len()).ok_or_else(|| {
            Error::unsupported("face already has three vertices")
        })?;
        self.set_vertex_role(role, point);
        Ok(role)
    }

    pub fn vertex(&self, role: Role) -> Option<&Point> {
        self.members.slot(role.index()).and_then(Element::as_point)
    }

    pub fn vertex_a(&self) -> Option<&Point> {
        self.vertex(Role::A)
    }

    pub fn vertex_b(&self) -> Option<&Point> {
        self.vertex(Role::B)
    }

    pub fn vertex_c(&self) -> Option<&Point> {
        self.vertex(Role::C)
    }

    /// The A, B and C vertices; unset roles are `None`.
    pub fn vertices(&self) -> [Option<&Point>; VERTEX_COUNT] {
        Role::ALL.map(|role| self.vertex(role))
    }

    /// Removes and returns vertex `role`, leaving the slot empty.
    pub fn take_vertex(&mut self, role: Role) -> Option<Point> {
        self.vertex(role)?;
        self.members.take_slot(role.index()).and_then(Element::into_point)
    }

    /// Folds `child` into this face according to [`Face::policy`].
    pub fn attach(&mut self, mut child: Face) -> Result<()> {
        match self.policy {
            AttachPolicy::Centroid => Err(Error::unsupported(
                "centroid attachment is not implemented",
            )),
            AttachPolicy::RoleA => self.attach_role(&mut child, Role::A),
            AttachPolicy::RoleB => self.attach_role(&mut child, Role::B),
            AttachPolicy::RoleC => self.attach_role(&mut child, Role::C),
            AttachPolicy::AllRoles => {
                for role in Role::ALL {
                    if let Some(vertex) = child.take_vertex(role) {
                        self.members.put(Element::Point(vertex));
                    }
                }
                Ok(())
            }
            AttachPolicy::AppendOnly => {
                self.members.push(Element::Face(child));
                Ok(())
            }
        }
    }

    fn attach_role(&mut self, child: &mut Face, role: Role) -> Result<()> {
        let vertex = child.take_vertex(role).ok_or(Error::MissingVertex(role))?;
        self.members.put(Element::Point(vertex));
        Ok(())
    }

    /// Child faces in slot order.
    pub fn faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.members.iter().filter_map(Element::as_face)
    }

    /// Member points in slot order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.members.iter().filter_map(Element::as_point)
    }

    pub fn face_count(&self) -> usize {
        self.faces().count()
    }

    /// Number of member slots, including empty ones.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Drops the normal and every member.
    pub fn clear(&mut self) {
        self.normal = None;
        self.members.clear();
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::new()
    }
}

impl Spatial for Face {
    fn ordinates(&self) -> Ordinates {
        self.ordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Face {
        let mut face = Face::new();
        face.set_normal(Point::new(0.0, 0.0, 1.0));
        face.set_vertex(a.into()).unwrap();
        face.set_vertex(b.into()).unwrap();
        face.set_vertex(c.into()).unwrap();
        face
    }

    #[test]
    fn role_names_and_indices() {
        assert_eq!(Role::A.index(), 0);
        assert_eq!(Role::C.index(), 2);
        assert_eq!(Role::from_index(1), Some(Role::B));
        assert_eq!(Role::from_index(3), None);
        assert_eq!(Role::B.to_string(), "B");
    }

    #[test]
    fn default_policy_is_append_only() {
        assert_eq!(AttachPolicy::default(), AttachPolicy::AppendOnly);
        assert_eq!(Face::new().policy(), AttachPolicy::AppendOnly);
    }

    #[test]
    fn policy_codes_round_trip() {
        for policy in AttachPolicy::ALL {
            assert_eq!(AttachPolicy::from_code(policy.code()).unwrap(), policy);
            assert_eq!(policy.as_str().parse::<AttachPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn unknown_policy_is_inconsistent() {
        assert!(matches!(
            AttachPolicy::from_code(6),
            Err(Error::Inconsistent(_))
        ));
        assert!(matches!(
            "sideways".parse::<AttachPolicy>(),
            Err(Error::Inconsistent(_))
        ));
        assert_eq!(" ABC ".parse::<AttachPolicy>().unwrap(), AttachPolicy::AllRoles);
    }

    #[test]
    fn set_vertex_fills_roles_in_order() {
        let mut face = Face::new();
        assert_eq!(face.set_vertex(Point::new(1.0, 0.0, 0.0)).unwrap(), Role::A);
        assert_eq!(face.set_vertex(Point::new(2.0, 0.0, 0.0)).unwrap(), Role::B);
        assert_eq!(face.set_vertex(Point::new(3.0, 0.0, 0.0)).unwrap(), Role::C);
        assert_eq!(face.vertex_c().and_then(Point::x), Some(3.0));
    }

    #[test]
    fn coincident_vertices_still_take_separate_roles() {
        let face = triangle([1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 1.0]);
        assert_eq!(face.len(), 3);
        assert!(face.vertices().iter().all(Option::is_some));
    }

    #[test]
    fn fourth_vertex_is_unsupported() {
        let mut face = triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert!(matches!(
            face.set_vertex(Point::new(5.0, 5.0, 5.0)),
            Err(Error::Unsupported(_))
        ));
        assert_eq!(face.len(), 3);
    }

    #[test]
    fn role_setters_overwrite_when_full() {
        let mut face = triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        face.set_vertex_b(Point::new(7.0, 7.0, 7.0));
        assert_eq!(face.len(), 3);
        assert_eq!(face.vertex_b().map(Point::coords), Some([7.0, 7.0, 7.0]));
        assert_eq!(face.vertex_a().map(Point::coords), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn role_setter_on_empty_face_appends() {
        let mut face = Face::new();
        face.set_vertex_a(Point::new(1.0, 2.0, 3.0));
        face.set_vertex_a(Point::new(4.0, 5.0, 6.0));
        assert_eq!(face.len(), 1);
        assert_eq!(face.vertex_a().map(Point::coords), Some([4.0, 5.0, 6.0]));
    }

    #[test]
    fn setting_c_first_leaves_a_and_b_unset() {
        let mut face = Face::new();
        face.set_vertex_c(Point::new(1.0, 1.0, 1.0));
        assert_eq!(face.len(), 3);
        assert!(face.vertex_a().is_none());
        assert!(face.vertex_b().is_none());
        assert!(face.vertex_c().is_some());
        assert!(face.set_vertex(Point::new(0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn normal_is_out_of_band() {
        let mut face = Face::new();
        face.set_normal(Point::new(0.0, 0.0, 1.0));
        face.set_normal(Point::new(0.0, 1.0, 0.0));
        assert_eq!(face.len(), 0);
        assert_eq!(face.normal().map(Point::coords), Some([0.0, 1.0, 0.0]));
    }

    #[test]
    fn append_only_keeps_faces_in_order() {
        let mut mesh = Face::new();
        mesh.attach(triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])).unwrap();
        mesh.attach(triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])).unwrap();
        mesh.attach(triangle([5.0; 3], [6.0, 0.0, 0.0], [0.0, 6.0, 0.0])).unwrap();

        assert_eq!(mesh.face_count(), 3);
        assert_eq!(mesh.members().indexed_len(), 0);
        let firsts: Vec<_> = mesh
            .faces()
            .map(|f| f.vertex_a().map(Point::coords))
            .collect();
        assert_eq!(
            firsts,
            vec![Some([0.0; 3]), Some([0.0; 3]), Some([5.0; 3])]
        );
    }

    #[test]
    fn all_roles_dedups_shared_vertices() {
        let mut cloud = Face::with_policy(AttachPolicy::AllRoles);
        cloud.attach(triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])).unwrap();
        cloud.attach(triangle([1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0])).unwrap();

        assert_eq!(cloud.points().count(), 4);
        assert_eq!(cloud.face_count(), 0);
        assert!(cloud.members().get_at(1.0, 1.0, 0.0, None).is_ok());
    }

    #[test]
    fn role_policy_takes_single_vertex() {
        let mut parent = Face::with_policy(AttachPolicy::RoleB);
        parent.attach(triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])).unwrap();
        parent.attach(triangle([2.0; 3], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0])).unwrap();

        let points: Vec<_> = parent.points().map(Point::coords).collect();
        assert_eq!(points, vec![[1.0, 0.0, 0.0]]);
    }

    #[test]
    fn role_policy_without_vertex_fails() {
        let mut parent = Face::with_policy(AttachPolicy::RoleC);
        let mut child = Face::new();
        child.set_vertex_a(Point::new(0.0, 0.0, 0.0));

        match parent.attach(child) {
            Err(Error::MissingVertex(role)) => assert_eq!(role, Role::C),
            other => panic!("expected MissingVertex, got {other:?}"),
        }
    }

    #[test]
    fn centroid_policy_is_unsupported() {
        let mut parent = Face::with_policy(AttachPolicy::Centroid);
        let result = parent.attach(triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
        assert!(matches!(result, Err(Error::Unsupported(_))));
        assert!(parent.is_empty());
    }

    #[test]
    fn take_vertex_leaves_hole() {
        let mut face = triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = face.take_vertex(Role::B).unwrap();
        assert_eq!(b.coords(), [1.0, 0.0, 0.0]);
        assert!(face.vertex_b().is_none());
        assert!(face.take_vertex(Role::B).is_none());
        assert_eq!(face.len(), 3);
        assert!(face.set_vertex(Point::new(5.0, 5.0, 5.0)).is_err());
    }

    #[test]
    fn with_resolution_requantizes_members() {
        let mut face = Face::new().with_resolution(10.0);
        face.set_vertex(Point::new(0.11, 0.0, 0.0)).unwrap();
        assert_eq!(face.resolution(), 10.0);

        let rescaled = face.with_resolution(-2.0);
        assert_eq!(rescaled.resolution(), 2.0);
        assert_eq!(rescaled.vertex_a().and_then(Point::x), Some(0.11));
    }

    #[test]
    fn clone_is_independent() {
        let original = triangle([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let mut copy = original.clone();
        copy.set_vertex_a(Point::new(9.0, 9.0, 9.0));
        assert_eq!(original.vertex_a().map(Point::coords), Some([0.0; 3]));
    }
}
