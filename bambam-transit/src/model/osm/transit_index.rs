use super::{
    MemberLookup, OsmGeoKey, OsmRelationId, TransitElement, TransitNode, TransitRelation,
    TransitWay,
};
use crate::model::TransitError;
use osmpbf::{Element, ElementReader};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

/// optional restriction on which route relations are imported.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RouteFilter {
    #[default]
    AllRoutes,
    RouteTypes {
        route_types: HashSet<String>,
    },
}

impl RouteFilter {
    pub fn accept(&self, route_type: &str) -> bool {
        match self {
            RouteFilter::AllRoutes => true,
            RouteFilter::RouteTypes { route_types } => route_types.contains(route_type),
        }
    }
}

/// the route relations of a transit dataset along with the node and way
/// records they reference.
///
/// relations are accepted when tagged `type=route`, carry a `route` tag
/// accepted by the [`RouteFilter`] and list at least one member. a member
/// that never shows up in the source stays registered without a record and
/// is reported as absent by [`MemberLookup::get_member`].
#[derive(Default, Debug, Clone)]
pub struct TransitIndex {
    relations: Vec<TransitRelation>,
    relation_positions: HashMap<OsmRelationId, usize>,
    members: HashMap<OsmGeoKey, Option<TransitElement>>,
}

impl TransitIndex {
    /// builds an index from an in-memory collection of elements.
    pub fn from_elements<I>(elements: I, filter: &RouteFilter) -> TransitIndex
    where
        I: IntoIterator<Item = TransitElement>,
    {
        let (relations, others): (Vec<_>, Vec<_>) = elements
            .into_iter()
            .partition(|e| matches!(e, TransitElement::Relation(_)));

        let mut index = TransitIndex::default();
        for element in relations {
            if let TransitElement::Relation(relation) = element {
                index.add_relation(relation, filter);
            }
        }
        for element in others {
            index.add_member(element);
        }
        log::info!(
            "indexed {} transit relations with {} of {} members found",
            index.relations.len(),
            index.members_found(),
            index.members.len()
        );
        index
    }

    /// reads route relations and their members from a .pbf file. relations
    /// are stored after nodes and ways in .pbf files, so this takes one pass
    /// to collect relations and a second pass to collect their members.
    pub fn from_pbf(filepath: &Path, filter: &RouteFilter) -> Result<TransitIndex, TransitError> {
        let mut index = TransitIndex::default();

        log::info!("reading transit relations from {}", filepath.display());
        let reader = ElementReader::from_path(filepath)
            .map_err(|e| TransitError::PbfLibError { source: e })?;
        reader
            .for_each(|e| {
                if let Element::Relation(relation) = e {
                    index.add_relation(TransitRelation::from(&relation), filter);
                }
            })
            .map_err(|e| TransitError::PbfLibError { source: e })?;
        if index.relations.is_empty() {
            return Err(TransitError::NoRoutesFound);
        }

        log::info!(
            "reading {} relation members from {}",
            index.members.len(),
            filepath.display()
        );
        let reader = ElementReader::from_path(filepath)
            .map_err(|e| TransitError::PbfLibError { source: e })?;
        reader
            .for_each(|e| match e {
                Element::Node(node) => index.add_member(TransitElement::Node(TransitNode::from(&node))),
                Element::DenseNode(dense) => {
                    index.add_member(TransitElement::Node(TransitNode::from(&dense)))
                }
                Element::Way(way) => index.add_member(TransitElement::Way(TransitWay::from(&way))),
                Element::Relation(_) => {}
            })
            .map_err(|e| TransitError::PbfLibError { source: e })?;

        log::info!(
            "indexed {} transit relations with {} of {} members found",
            index.relations.len(),
            index.members_found(),
            index.members.len()
        );
        Ok(index)
    }

    pub fn relations(&self) -> &[TransitRelation] {
        &self.relations
    }

    /// number of referenced members for which a record was found.
    pub fn members_found(&self) -> usize {
        self.members.values().filter(|m| m.is_some()).count()
    }

    fn add_relation(&mut self, relation: TransitRelation, filter: &RouteFilter) {
        let Some(relation_id) = relation.id else {
            return;
        };
        let accepted = match relation.route_type() {
            Some(route_type) => filter.accept(route_type) && !relation.members.is_empty(),
            None => false,
        };
        if !accepted {
            return;
        }

        for member in relation.members.iter() {
            self.members.entry(member.key()).or_insert(None);
        }
        match self.relation_positions.get(&relation_id) {
            Some(position) => {
                log::warn!("relation with OSMID {relation_id} occurs more than once");
                self.relations[*position] = relation;
            }
            None => {
                self.relation_positions
                    .insert(relation_id, self.relations.len());
                self.relations.push(relation);
            }
        }
    }

    /// stores the record if some accepted relation references it.
    fn add_member(&mut self, element: TransitElement) {
        let Some(key) = element.key() else {
            return;
        };
        if let Some(slot) = self.members.get_mut(&key) {
            *slot = Some(element);
        }
    }
}

impl MemberLookup for TransitIndex {
    fn get_member(&self, key: &OsmGeoKey) -> Option<&TransitElement> {
        self.members.get(key).and_then(|m| m.as_ref())
    }
}
