//! Small helpers over `xmltree::Element` shared by the envelope, the
//! request builders and the domain object mappers.

use xmltree::{Element, XMLNode};

use crate::protocol::error::{FishbowlError, Result};

/// Builds `<name>text</name>`.
pub fn text_element(name: &str, text: impl Into<String>) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text.into()));
    element
}

/// Builds `<name>` with the given element children, in order.
pub fn element_with(name: &str, children: impl IntoIterator<Item = Element>) -> Element {
    let mut element = Element::new(name);
    element
        .children
        .extend(children.into_iter().map(XMLNode::Element));
    element
}

/// Depth-first search for the first element named `name`, including `root` itself.
pub fn find_descendant<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    if root.name == name {
        return Some(root);
    }
    root.children
        .iter()
        .filter_map(XMLNode::as_element)
        .find_map(|child| find_descendant(child, name))
}

/// Iterates the element children of `element`, skipping text and comments.
pub fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(XMLNode::as_element)
}

/// Trimmed text of the direct child `name`, `None` when missing or blank.
pub fn child_text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Like [`child_text`], parsed as an integer.
///
/// A present but non-numeric value is a protocol error: the server sent
/// something that does not match the documented shape.
pub fn child_int<T>(element: &Element, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match child_text(element, name) {
        Some(text) => text.parse::<T>().map(Some).map_err(|e| {
            FishbowlError::ProtocolError(format!(
                "<{}> in <{}> is not a valid integer ({:?}): {}",
                name, element.name, text, e
            ))
        }),
        None => Ok(None),
    }
}

/// True when the element carries neither child nodes nor non-blank text.
pub fn is_blank(element: &Element) -> bool {
    element.children.iter().all(|node| match node {
        XMLNode::Text(text) | XMLNode::CData(text) => text.trim().is_empty(),
        XMLNode::Comment(_) | XMLNode::ProcessingInstruction(..) => true,
        XMLNode::Element(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::parse(
            &b"<Root><A><B><Customer><Name> Acme </Name><Id>42</Id><Bad>x</Bad></Customer></B></A></Root>"[..],
        )
        .unwrap()
    }

    #[test]
    fn test_find_descendant_nested() {
        let root = sample();
        let customer = find_descendant(&root, "Customer").unwrap();
        assert_eq!(customer.name, "Customer");
        assert!(find_descendant(&root, "Missing").is_none());
    }

    #[test]
    fn test_find_descendant_matches_root() {
        let root = sample();
        assert_eq!(find_descendant(&root, "Root").unwrap().name, "Root");
    }

    #[test]
    fn test_child_text_trims() {
        let root = sample();
        let customer = find_descendant(&root, "Customer").unwrap();
        assert_eq!(child_text(customer, "Name"), Some("Acme".to_string()));
        assert_eq!(child_text(customer, "Nope"), None);
    }

    #[test]
    fn test_child_int() {
        let root = sample();
        let customer = find_descendant(&root, "Customer").unwrap();
        assert_eq!(child_int::<u32>(customer, "Id").unwrap(), Some(42));
        assert_eq!(child_int::<u32>(customer, "Nope").unwrap(), None);
        assert!(matches!(
            child_int::<u32>(customer, "Bad"),
            Err(FishbowlError::ProtocolError(_))
        ));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Element::new("Ticket")));
        assert!(is_blank(&text_element("Ticket", "   ")));
        assert!(!is_blank(&text_element("Ticket", "T1")));
        assert!(!is_blank(&element_with("Ticket", [text_element("Key", "k")])));
    }
}
