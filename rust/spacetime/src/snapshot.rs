// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for face trees.
//!
//! A snapshot records everything needed to rebuild a [`Face`] with the same
//! slot layout: policy, resolution, normal, every member slot (empty ones
//! included) and which slots are reachable by spatial key. Arbitrary-key
//! mappings are owned by the caller and are not persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::face::{AttachPolicy, Element, Face};
use crate::point::{Ordinates, Point, Spatial};

/// Serializable representation of a face and its members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceSnapshot {
    pub policy: AttachPolicy,
    pub resolution: f64,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub ordinates: Ordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Point>,
    pub members: Vec<Option<ElementSnapshot>>,
    /// Member slots registered under their spatial key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexed: Vec<usize>,
}

/// Serializable member slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementSnapshot {
    Point(Point),
    Face(FaceSnapshot),
}

fn is_unset(ordinates: &Ordinates) -> bool {
    *ordinates == Ordinates::UNSET
}

impl Face {
    /// Serializes the face tree to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the face tree.
    pub fn to_snapshot(&self) -> FaceSnapshot {
        let members = self
            .members()
            .slots()
            .map(|slot| {
                slot.map(|element| match element {
                    Element::Point(p) => ElementSnapshot::Point(p.clone()),
                    Element::Face(f) => ElementSnapshot::Face(f.to_snapshot()),
                })
            })
            .collect();

        FaceSnapshot {
            policy: self.policy(),
            resolution: self.resolution(),
            ordinates: self.ordinates(),
            normal: self.normal().cloned(),
            members,
            indexed: self.members().indexed_slots(),
        }
    }

    /// Deserializes a face tree from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: FaceSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Reconstructs a face tree from a snapshot.
    pub fn from_snapshot(snap: FaceSnapshot) -> Result<Self> {
        let mut face = Face::with_policy(snap.policy)
            .with_resolution(snap.resolution)
            .with_ordinates(snap.ordinates);
        if let Some(normal) = snap.normal {
            face.set_normal(normal);
        }

        let slot_count = snap.members.len();
        for (slot, member) in snap.members.into_iter().enumerate() {
            let Some(member) = member else {
                continue;
            };
            let element = match member {
                ElementSnapshot::Point(p) => Element::Point(p),
                ElementSnapshot::Face(f) => Element::Face(Face::from_snapshot(f)?),
            };
            face.members_mut().put_role(slot, element);
        }

        for slot in snap.indexed {
            if slot >= slot_count || !face.members_mut().index_slot(slot) {
                return Err(Error::Serialization(format!(
                    "indexed slot {slot} does not hold a member"
                )));
            }
        }

        Ok(face)
    }
}
