//! Minimal element tree built from quick-xml events.
//!
//! Only element structure and attributes survive. Comments, processing
//! instructions and whitespace are dropped; any other character data is an
//! error since preferences documents have element-only content.
//!
//! Elements live in one flat arena and refer to their children by index, so
//! nesting depth is bounded by memory rather than by the call stack.

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::doctype::DocType;
use crate::error::FormatError;

pub(crate) type ElementId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<ElementId>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, FormatError> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| FormatError::Attribute {
                element: name.clone(),
                message: e.to_string(),
            })?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let raw = normalize_attribute_value(std::str::from_utf8(&attr.value)?);
            let value = unescape(&raw)
                .map_err(|e| FormatError::Attribute {
                    element: name.clone(),
                    message: format!("{}: {}", key, e),
                })?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Replace literal line breaks and tabs in a raw attribute value with spaces.
///
/// `\r\n` counts as one line break. Runs before entity expansion, so
/// character references such as `&#10;` still yield real newlines.
fn normalize_attribute_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\t' | '\n' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

/// A parsed document: element 0 is the document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Dom {
    elements: Vec<Element>,
}

impl Dom {
    pub fn root(&self) -> &Element {
        &self.elements[0]
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id]
    }

    pub fn children<'a>(
        &'a self,
        element: &'a Element,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        element.children.iter().map(move |&id| &self.elements[id])
    }
}

/// Parse a complete document, checking its type declaration on the way.
pub(crate) fn parse(input: &[u8]) -> Result<Dom, FormatError> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut doctype: Option<DocType> = None;
    let mut dom = Dom {
        elements: Vec::new(),
    };
    let mut stack: Vec<ElementId> = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| FormatError::Syntax {
                position: reader.error_position() as u64,
                source,
            })?;

        match event {
            Event::DocType(text) => {
                if doctype.is_some() || !dom.elements.is_empty() {
                    return Err(FormatError::DocType {
                        message: "declaration must appear once, before the document element"
                            .to_string(),
                    });
                }
                let parsed = DocType::parse(std::str::from_utf8(&text)?)?;
                parsed.check()?;
                doctype = Some(parsed);
            }
            Event::Start(start) => {
                let id = open_element(&start, doctype.as_ref(), &mut dom, &stack)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                open_element(&start, doctype.as_ref(), &mut dom, &stack)?;
            }
            Event::End(_) => {
                // quick-xml has already matched the end tag name.
                stack
                    .pop()
                    .ok_or_else(|| FormatError::structure("unmatched end tag"))?;
            }
            Event::Text(text) => check_whitespace(&text, &dom, &stack)?,
            Event::CData(data) => check_whitespace(&data, &dom, &stack)?,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) => {}
            Event::Eof => break,
            #[allow(unreachable_patterns)]
            _ => {
                return Err(FormatError::structure(format!(
                    "unexpected content {}",
                    location(&dom, &stack)
                )))
            }
        }
        buf.clear();
    }

    if let Some(&open) = stack.last() {
        return Err(FormatError::UnexpectedEof(dom.elements[open].name.clone()));
    }
    if dom.elements.is_empty() {
        return Err(FormatError::NoRootElement);
    }
    Ok(dom)
}

fn open_element(
    start: &BytesStart<'_>,
    doctype: Option<&DocType>,
    dom: &mut Dom,
    stack: &[ElementId],
) -> Result<ElementId, FormatError> {
    let declared = doctype.ok_or(FormatError::MissingDocType)?;
    let parent = stack.last().copied();
    if parent.is_none() && !dom.elements.is_empty() {
        return Err(FormatError::structure("content after the document element"));
    }

    let element = Element::from_start(start)?;
    if parent.is_none() && declared.root != element.name {
        return Err(FormatError::structure(format!(
            "document element <{}> does not match declared <{}>",
            element.name, declared.root
        )));
    }

    let id = dom.elements.len();
    dom.elements.push(element);
    if let Some(parent) = parent {
        dom.elements[parent].children.push(id);
    }
    Ok(id)
}

fn check_whitespace(content: &[u8], dom: &Dom, stack: &[ElementId]) -> Result<(), FormatError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        Ok(())
    } else {
        Err(FormatError::structure(format!(
            "unexpected character data {}",
            location(dom, stack)
        )))
    }
}

fn location(dom: &Dom, stack: &[ElementId]) -> String {
    match stack.last() {
        Some(&id) => format!("in <{}>", dom.elements[id].name),
        None => "outside the document element".to_string(),
    }
}
