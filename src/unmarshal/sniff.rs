//! Root element inspection ahead of typed deserialization.

use crate::error::AttemptError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Local name and resolved namespace of a document's root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RootElement {
    pub local_name: String,
    pub namespace: Option<String>,
}

/// Scan past the prolog (declaration, comments, doctype) to the root element.
pub(crate) fn root_element(text: &str) -> Result<RootElement, AttemptError> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => return describe(&e),
            Ok(Event::Eof) => return Err(AttemptError::NoRootElement),
            Ok(_) => continue,
            Err(e) => return Err(AttemptError::Malformed(e.to_string())),
        }
    }
}

fn describe(element: &BytesStart<'_>) -> Result<RootElement, AttemptError> {
    let name = element.name();
    let local_name = String::from_utf8_lossy(name.local_name().as_ref()).into_owned();

    // `<ejb-jar xmlns="...">` binds the default namespace, `<x:ejb-jar xmlns:x="...">` a prefix
    let binding: Vec<u8> = match name.prefix() {
        Some(prefix) => [b"xmlns:".as_slice(), prefix.as_ref()].concat(),
        None => b"xmlns".to_vec(),
    };

    let mut namespace = None;
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| AttemptError::Malformed(e.to_string()))?;
        if attribute.key.as_ref() == binding.as_slice() {
            let value = attribute
                .unescape_value()
                .map_err(|e| AttemptError::Malformed(e.to_string()))?;
            if !value.is_empty() {
                namespace = Some(value.into_owned());
            }
        }
    }

    Ok(RootElement {
        local_name,
        namespace,
    })
}
