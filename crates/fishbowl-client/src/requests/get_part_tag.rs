use fishbowl_common::xml::element::{element_with, text_element};
use fishbowl_common::{Envelope, Request, Result};
use serde::{Deserialize, Serialize};

use super::required;
use crate::objects::Tag;

/// `PartQueryRq`: the inventory tag of a part within a location group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetPartTag {
    pub part_num: Option<String>,
    pub location_group: Option<String>,
}

impl GetPartTag {
    pub const NAME: &'static str = "get_part_tag";

    pub fn new(part_num: impl Into<String>) -> Self {
        Self {
            part_num: Some(part_num.into()),
            location_group: None,
        }
    }

    pub fn in_location_group(mut self, location_group: impl Into<String>) -> Self {
        self.location_group = Some(location_group.into());
        self
    }
}

impl Request for GetPartTag {
    type Output = Option<Tag>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn compose(&self) -> Result<Envelope> {
        let part_num = required("part_num", self.part_num.as_deref())?;

        let mut children = vec![text_element("PartNum", part_num)];
        if let Some(group) = self.location_group.as_deref() {
            children.push(text_element("LocationGroup", group));
        }
        Ok(Envelope::request(element_with("PartQueryRq", children)))
    }

    /// Maps the first `<Tag>` of the reply; no tag means no stock record.
    fn distill(&self, response: &Envelope) -> Result<Self::Output> {
        response.find(Tag::ELEMENT).map(Tag::from_xml).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::fixtures::reply;
    use fishbowl_common::xml::element::child_text;
    use fishbowl_common::FishbowlError;

    #[test]
    fn test_compose() {
        let envelope = GetPartTag::new("B201")
            .in_location_group("Main")
            .compose()
            .unwrap();
        let message = envelope.message().unwrap();
        assert_eq!(message.name, "PartQueryRq");
        assert_eq!(child_text(message, "PartNum").as_deref(), Some("B201"));
        assert_eq!(child_text(message, "LocationGroup").as_deref(), Some("Main"));
    }

    #[test]
    fn test_compose_without_group() {
        let envelope = GetPartTag::new("B201").compose().unwrap();
        assert!(envelope.message().unwrap().get_child("LocationGroup").is_none());
    }

    #[test]
    fn test_compose_requires_part() {
        assert!(matches!(
            GetPartTag::default().compose(),
            Err(FishbowlError::ValidationError(_))
        ));
    }

    #[test]
    fn test_distill_tag() {
        let response = reply(
            "<PartQueryRs statusCode=\"1000\"><Rows><Tag><TagID>9</TagID><PartNum>B201</PartNum></Tag><Tag><TagID>10</TagID></Tag></Rows></PartQueryRs>",
        );
        let tag = GetPartTag::new("B201").distill(&response).unwrap().unwrap();
        assert_eq!(tag.tag_id, Some(9));
        assert_eq!(tag.part_num.as_deref(), Some("B201"));
    }

    #[test]
    fn test_distill_no_tag() {
        let response = reply("<PartQueryRs statusCode=\"1000\"/>");
        assert_eq!(GetPartTag::new("B201").distill(&response).unwrap(), None);
    }
}
