use fishbowl_common::xml::element::{child_elements, child_int, child_text};
use fishbowl_common::Result;
use serde::{Deserialize, Serialize};
use xmltree::Element;

use super::child_bool;

/// An inventory tag: a quantity of one part at one location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub tag_id: Option<u32>,
    pub num: Option<String>,
    pub part_num: Option<String>,
    pub location: Option<Location>,
    pub quantity: Option<String>,
    pub quantity_committed: Option<String>,
    pub wo_num: Option<String>,
    pub date_created: Option<String>,
    pub tracking: Vec<TrackingItem>,
    pub type_id: Option<u32>,
    pub account_id: Option<u32>,
}

impl Tag {
    pub const ELEMENT: &'static str = "Tag";

    pub fn from_xml(element: &Element) -> Result<Self> {
        let location = element
            .get_child(Location::ELEMENT)
            .map(Location::from_xml)
            .transpose()?;

        let tracking = match element.get_child("Tracking") {
            Some(tracking) => child_elements(tracking)
                .filter(|child| child.name == TrackingItem::ELEMENT)
                .map(TrackingItem::from_xml)
                .collect(),
            None => Vec::new(),
        };

        Ok(Self {
            tag_id: child_int(element, "TagID")?,
            num: child_text(element, "Num"),
            part_num: child_text(element, "PartNum"),
            location,
            quantity: child_text(element, "Quantity"),
            quantity_committed: child_text(element, "QuantityCommitted"),
            wo_num: child_text(element, "WONum"),
            date_created: child_text(element, "DateCreated"),
            tracking,
            type_id: child_int(element, "TypeID")?,
            account_id: child_int(element, "AccountID")?,
        })
    }
}

/// A stock location, nested inside tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub location_id: Option<u32>,
    pub type_id: Option<u32>,
    pub parent_id: Option<u32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location_group_id: Option<u32>,
    pub location_group_name: Option<String>,
    pub active: Option<bool>,
    pub pickable: Option<bool>,
    pub receivable: Option<bool>,
}

impl Location {
    pub const ELEMENT: &'static str = "Location";

    pub fn from_xml(element: &Element) -> Result<Self> {
        Ok(Self {
            location_id: child_int(element, "LocationID")?,
            type_id: child_int(element, "TypeID")?,
            parent_id: child_int(element, "ParentID")?,
            name: child_text(element, "Name"),
            description: child_text(element, "Description"),
            location_group_id: child_int(element, "LocationGroupID")?,
            location_group_name: child_text(element, "LocationGroupName"),
            active: child_bool(element, "Active")?,
            pickable: child_bool(element, "Pickable")?,
            receivable: child_bool(element, "Receivable")?,
        })
    }
}

/// One tracking value (lot, serial, expiry...) attached to a tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingItem {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub value: Option<String>,
}

impl TrackingItem {
    pub const ELEMENT: &'static str = "TrackingItem";

    pub fn from_xml(element: &Element) -> Self {
        let part_tracking = element.get_child("PartTracking");
        Self {
            name: part_tracking.and_then(|pt| child_text(pt, "Name")),
            abbreviation: part_tracking.and_then(|pt| child_text(pt, "Abbr")),
            value: child_text(element, "TrackingValue"),
        }
    }
}
