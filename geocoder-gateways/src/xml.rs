//! A minimal, read-only XML document model.
//!
//! Only what the service adapters need is kept: the qualified
//! name and the text content of every element, in document order.

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use std::str;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("The document has no root element")]
    NoRootElement,
    #[error("The document has more than one root element")]
    MultipleRootElements,
    #[error("Unexpected content outside of the root element")]
    ContentOutsideRoot,
    #[error("Element <{0}> is not closed")]
    UnclosedElement(String),
    #[error("Malformed XML: {0}")]
    Malformed(String),
}

fn malformed(err: impl ToString) -> XmlError {
    XmlError::Malformed(err.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: String,
}

impl Element {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated text of all descendant text and CDATA nodes.
    pub fn text_content(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Parses a complete, well-formed document.
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().check_end_names = true;

        let mut elements: Vec<Element> = vec![];
        // Indexes of the currently open elements
        let mut open: Vec<usize> = vec![];
        let mut has_root = false;

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(start) => {
                    let element = new_element(&start, open.is_empty(), &mut has_root)?;
                    open.push(elements.len());
                    elements.push(element);
                }
                Event::Empty(start) => {
                    let element = new_element(&start, open.is_empty(), &mut has_root)?;
                    elements.push(element);
                }
                Event::End(_) => {
                    if open.pop().is_none() {
                        return Err(XmlError::ContentOutsideRoot);
                    }
                }
                Event::Text(text) => {
                    if open.is_empty() {
                        if text.iter().all(u8::is_ascii_whitespace) {
                            continue;
                        }
                        return Err(XmlError::ContentOutsideRoot);
                    }
                    let text = text.unescape().map_err(malformed)?;
                    append_text(&mut elements, &open, &text);
                }
                Event::CData(cdata) => {
                    if open.is_empty() {
                        return Err(XmlError::ContentOutsideRoot);
                    }
                    let text = str::from_utf8(&cdata).map_err(malformed)?;
                    append_text(&mut elements, &open, text);
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes
                _ => {}
            }
        }

        if let Some(idx) = open.last() {
            return Err(XmlError::UnclosedElement(elements[*idx].name.clone()));
        }
        if !has_root {
            return Err(XmlError::NoRootElement);
        }
        Ok(Self { elements })
    }

    /// All elements with the given qualified name in document order.
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<&Element> {
        self.elements.iter().filter(|e| e.name == name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }

    /// Text content of the first element with the given name.
    pub fn first_text(&self, name: &str) -> Option<String> {
        node_value(&self.elements_by_tag_name(name))
    }
}

/// Text content of the first element of the list, if any.
pub fn node_value(elements: &[&Element]) -> Option<String> {
    elements.first().map(|e| e.text_content().to_owned())
}

fn new_element(
    start: &BytesStart<'_>,
    is_top_level: bool,
    has_root: &mut bool,
) -> Result<Element, XmlError> {
    if is_top_level {
        if *has_root {
            return Err(XmlError::MultipleRootElements);
        }
        *has_root = true;
    }
    for attr in start.attributes() {
        attr.map_err(malformed)?;
    }
    let name = str::from_utf8(start.name().as_ref())
        .map_err(malformed)?
        .to_owned();
    Ok(Element {
        name,
        text: String::new(),
    })
}

fn append_text(elements: &mut [Element], open: &[usize], text: &str) {
    for idx in open {
        elements[*idx].text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_document() {
        let doc = Document::parse("<xml><latt>45.4</latt><longt>-75.7</longt></xml>").unwrap();
        assert_eq!(doc.first_text("latt").as_deref(), Some("45.4"));
        assert_eq!(doc.first_text("longt").as_deref(), Some("-75.7"));
        assert_eq!(doc.first_text("city"), None);
        assert!(doc.contains("xml"));
        assert!(!doc.contains("error"));
    }

    #[test]
    fn first_of_several_elements_wins() {
        let doc = Document::parse(
            "<geodata><city>Ottawa</city><alt><city>Gatineau</city></alt></geodata>",
        )
        .unwrap();
        let cities = doc.elements_by_tag_name("city");
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1].text_content(), "Gatineau");
        assert_eq!(node_value(&cities).as_deref(), Some("Ottawa"));
        assert_eq!(node_value(&[]), None);
    }

    #[test]
    fn text_content_includes_descendants() {
        let doc = Document::parse(
            "<geodata><error><code>008</code><description>No match</description></error></geodata>",
        )
        .unwrap();
        assert_eq!(doc.first_text("error").as_deref(), Some("008No match"));
        assert_eq!(
            doc.first_text("geodata").as_deref(),
            Some("008No match")
        );
    }

    #[test]
    fn unescape_entities_and_cdata() {
        let doc = Document::parse(
            "<a><b>Rue Saint-Jean &amp; Côte</b><c><![CDATA[<raw> & text]]></c></a>",
        )
        .unwrap();
        assert_eq!(doc.first_text("b").as_deref(), Some("Rue Saint-Jean & Côte"));
        assert_eq!(doc.first_text("c").as_deref(), Some("<raw> & text"));
    }

    #[test]
    fn whitespace_is_preserved_inside_elements() {
        let doc = Document::parse("<a><b> 45.4\n</b></a>").unwrap();
        assert_eq!(doc.first_text("b").as_deref(), Some(" 45.4\n"));
    }

    #[test]
    fn empty_elements() {
        let doc = Document::parse("<a><b/><c></c></a>").unwrap();
        assert_eq!(doc.first_text("b").as_deref(), Some(""));
        assert_eq!(doc.first_text("c").as_deref(), Some(""));
    }

    #[test]
    fn prolog_and_comments_are_ignored() {
        let doc = Document::parse(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- geocoder -->\n<geodata><latt>1</latt></geodata>\n",
        )
        .unwrap();
        assert_eq!(doc.first_text("latt").as_deref(), Some("1"));
    }

    #[test]
    fn reject_plain_text() {
        assert_eq!(
            Document::parse("not xml"),
            Err(XmlError::ContentOutsideRoot)
        );
    }

    #[test]
    fn reject_empty_input() {
        assert_eq!(Document::parse(""), Err(XmlError::NoRootElement));
        assert_eq!(Document::parse("  \n"), Err(XmlError::NoRootElement));
    }

    #[test]
    fn reject_multiple_roots() {
        assert_eq!(
            Document::parse("<a></a><b></b>"),
            Err(XmlError::MultipleRootElements)
        );
    }

    #[test]
    fn reject_unclosed_element() {
        assert_eq!(
            Document::parse("<a><b>1</b>"),
            Err(XmlError::UnclosedElement("a".into()))
        );
    }

    #[test]
    fn reject_mismatched_end_tag() {
        assert!(matches!(
            Document::parse("<a><b>1</c></a>"),
            Err(XmlError::Malformed(_))
        ));
    }

    #[test]
    fn reject_unknown_entity() {
        assert!(matches!(
            Document::parse("<a>&nbsp;</a>"),
            Err(XmlError::Malformed(_))
        ));
    }

    #[test]
    fn reject_trailing_text() {
        assert_eq!(
            Document::parse("<a>1</a>trailing"),
            Err(XmlError::ContentOutsideRoot)
        );
    }
}
