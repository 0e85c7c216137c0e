//! XML response schema
//!
//! Title search (`summary=true&title=...`):
//!
//! ```xml
//! <classify>
//!   <response code="4"/>
//!   <works>
//!     <work author="Tolkien, J. R. R." hyr="2012" owi="1151" title="The Hobbit"/>
//!   </works>
//! </classify>
//! ```
//!
//! Identifier lookup (`summary=true&owi=...`):
//!
//! ```xml
//! <classify>
//!   <response code="0"/>
//!   <work author="Herbert, Frank" owi="12345" title="Dune">123</work>
//!   <recommendations>
//!     <ddc><mostPopular holdings="9" sfa="813.54"/></ddc>
//!   </recommendations>
//! </classify>
//! ```
//!
//! Attributes missing from a `work` element decode as empty strings.

use super::{ClassificationLookup, LookupError, SearchResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

const ROOT_ELEMENT: &[u8] = b"classify";

#[derive(Debug, Deserialize)]
struct ResponseStatus {
    #[serde(rename = "@code", default)]
    code: String,
}

#[derive(Debug, Deserialize)]
struct WorkElement {
    #[serde(rename = "@title", default)]
    title: String,
    #[serde(rename = "@author", default)]
    author: String,
    #[serde(rename = "@hyr", default)]
    year: String,
    #[serde(rename = "@owi", default)]
    owi: String,
}

#[derive(Debug, Deserialize)]
struct WorksElement {
    #[serde(rename = "work", default)]
    works: Vec<WorkElement>,
}

#[derive(Debug, Deserialize)]
struct SearchDocument {
    #[serde(default)]
    works: Option<WorksElement>,
}

#[derive(Debug, Deserialize)]
struct MostPopular {
    #[serde(rename = "@sfa", default)]
    sfa: String,
}

#[derive(Debug, Deserialize)]
struct DdcElement {
    #[serde(rename = "mostPopular", default)]
    most_popular: Vec<MostPopular>,
}

#[derive(Debug, Deserialize)]
struct Recommendations {
    #[serde(default)]
    ddc: Option<DdcElement>,
}

#[derive(Debug, Deserialize)]
struct FindDocument {
    #[serde(default)]
    response: Option<ResponseStatus>,
    #[serde(default)]
    work: Option<WorkElement>,
    #[serde(default)]
    recommendations: Option<Recommendations>,
}

fn response_code(status: &Option<ResponseStatus>) -> &str {
    status.as_ref().map(|s| s.code.as_str()).unwrap_or("none")
}

/// Check that the document element is `<classify>`
///
/// The serde deserializer accepts any root, so an HTML error page would
/// otherwise decode as an empty result.
fn check_root(body: &str) -> Result<(), LookupError> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return if e.local_name().as_ref() == ROOT_ELEMENT {
                    Ok(())
                } else {
                    Err(LookupError::DecodeFailure(format!(
                        "unexpected root element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )))
                };
            }
            Ok(Event::Eof) => {
                return Err(LookupError::DecodeFailure("document has no root element".to_string()))
            }
            Ok(_) => {}
            Err(e) => return Err(LookupError::DecodeFailure(e.to_string())),
        }
    }
}

/// Decode a title search body
pub fn decode_search(body: &str) -> Result<Vec<SearchResult>, LookupError> {
    check_root(body)?;
    let document: SearchDocument =
        quick_xml::de::from_str(body).map_err(|e| LookupError::DecodeFailure(e.to_string()))?;

    let works = document.works.map(|w| w.works).unwrap_or_default();

    Ok(works
        .into_iter()
        .map(|work| SearchResult {
            title: work.title,
            author: work.author,
            year: work.year,
            id: work.owi,
        })
        .collect())
}

/// Decode an identifier lookup body
///
/// A lookup is only useful if it names a work and recommends a
/// classification; a body lacking either is a decode failure. When the
/// service lists several most popular entries the first one wins.
pub fn decode_find(body: &str) -> Result<ClassificationLookup, LookupError> {
    check_root(body)?;
    let document: FindDocument =
        quick_xml::de::from_str(body).map_err(|e| LookupError::DecodeFailure(e.to_string()))?;

    let work = document.work.ok_or_else(|| {
        LookupError::DecodeFailure(format!(
            "response contains no work record (response code {})",
            response_code(&document.response)
        ))
    })?;

    let most_popular = document
        .recommendations
        .and_then(|r| r.ddc)
        .and_then(|ddc| ddc.most_popular.into_iter().map(|m| m.sfa).find(|sfa| !sfa.is_empty()))
        .ok_or_else(|| {
            LookupError::DecodeFailure(format!(
                "work {} has no most popular classification",
                work.owi
            ))
        })?;

    Ok(ClassificationLookup {
        title: work.title,
        author: work.author,
        id: work.owi,
        most_popular,
    })
}
