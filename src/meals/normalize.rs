//! Turns the NEIS XML payload into a [`NormalizedResponse`].
//!
//! The document is read into a small element tree first so lookups can follow
//! descendant order, the same way the API's consumers traverse it.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::dto::{ApiResult, MealRow, NormalizedResponse};
use crate::error::MealError;

const STATUS_TAG: &str = "RESULT";
const CONTAINER_TAG: &str = "mealServiceDietInfo";
const ROW_TAG: &str = "row";

/// NEIS payloads are four levels deep; anything past this is rejected so the
/// recursive tree walks stay bounded.
const MAX_DEPTH: usize = 256;

#[derive(Debug)]
struct Element {
    name: String,
    children: Vec<Node>,
}

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    /// Builds the element for a start tag, rejecting malformed attributes.
    fn open(tag: &BytesStart) -> Result<Self, MealError> {
        for attr in tag.attributes().with_checks(true) {
            attr.map_err(|e| MealError::Parse(format!("attribute: {e}")))?;
        }
        let name = std::str::from_utf8(tag.name().as_ref())
            .map_err(|e| MealError::Parse(format!("element name: {e}")))?
            .to_string();
        Ok(Self { name, children: Vec::new() })
    }

    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// First descendant named `name`, in document order.
    fn first(&self, name: &str) -> Option<&Element> {
        for el in self.child_elements() {
            if el.name == name {
                return Some(el);
            }
            if let Some(found) = el.first(name) {
                return Some(found);
            }
        }
        None
    }

    fn descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for el in self.child_elements() {
            if el.name == name {
                out.push(el);
            }
            el.descendants(name, out);
        }
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Text of the first descendant named `name`; empty when absent.
    fn field(&self, name: &str) -> String {
        self.first(name).map(Element::text).unwrap_or_default()
    }
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, el: Element) -> Result<(), MealError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None if root.is_none() => *root = Some(el),
        None => return Err(MealError::Parse("multiple root elements".into())),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: String) -> Result<(), MealError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Text(text)),
        // only whitespace may sit outside the root element
        None if text.trim().is_empty() => {}
        None => return Err(MealError::Parse("content outside root element".into())),
    }
    Ok(())
}

fn parse_document(xml: &str) -> Result<Element, MealError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(MealError::Parse("multiple root elements".into()));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(MealError::Parse("nesting too deep".into()));
                }
                stack.push(Element::open(&e)?);
            }
            Event::Empty(e) => {
                let el = Element::open(&e)?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::End(e) => {
                let el = stack.pop().ok_or_else(|| {
                    MealError::Parse(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(t) => push_text(&mut stack, t.unescape()?.into_owned())?,
            Event::CData(c) => {
                let text = String::from_utf8(c.into_inner().into_owned())
                    .map_err(|e| MealError::Parse(format!("cdata: {e}")))?;
                push_text(&mut stack, text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(MealError::Parse(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| MealError::Parse("no root element".into()))
}

/// A status block is a `RESULT` at the top of the document. The `RESULT`
/// nested in the data container's head is a success marker and is skipped.
fn status_block(root: &Element) -> Option<&Element> {
    if root.name == STATUS_TAG {
        return Some(root);
    }
    root.child_elements().find(|el| el.name == STATUS_TAG)
}

fn to_row(row: &Element) -> MealRow {
    MealRow {
        meal_type_code: row.field("MMEAL_SC_CODE"),
        meal_type_name: row.field("MMEAL_SC_NM"),
        date: row.field("MLSV_YMD"),
        dish_field: row.field("DDISH_NM"),
        calorie_info: row.field("CAL_INFO"),
        nutrition_info: row.field("NTR_INFO"),
    }
}

pub fn normalize(xml: &str) -> Result<NormalizedResponse, MealError> {
    let root = parse_document(xml)?;

    if let Some(status) = status_block(&root) {
        let result = ApiResult {
            code: status.field("CODE"),
            message: status.field("MESSAGE"),
        };
        debug!(code = %result.code, message = %result.message, "status block in response");
        return Ok(NormalizedResponse { result: Some(result), rows: Vec::new() });
    }

    let container = if root.name == CONTAINER_TAG {
        Some(&root)
    } else {
        root.first(CONTAINER_TAG)
    };

    let mut found = Vec::new();
    if let Some(container) = container {
        container.descendants(ROW_TAG, &mut found);
    }
    let rows: Vec<MealRow> = found.into_iter().map(to_row).collect();

    debug!(rows = rows.len(), "normalized meal response");
    Ok(NormalizedResponse { result: None, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::fixtures;

    #[test]
    fn status_block_returns_result_without_rows() {
        let out = normalize(&fixtures::status_xml("INFO-200", "no data")).unwrap();
        assert_eq!(
            out.result,
            Some(ApiResult { code: "INFO-200".into(), message: "no data".into() })
        );
        assert!(out.rows.is_empty());
    }

    #[test]
    fn status_block_may_sit_under_the_root() {
        let xml = "<response><RESULT><CODE>ERROR-300</CODE><MESSAGE>missing param</MESSAGE></RESULT></response>";
        let out = normalize(xml).unwrap();
        assert_eq!(out.result.unwrap().code, "ERROR-300");
        assert!(out.rows.is_empty());
    }

    #[test]
    fn rows_keep_source_text_and_order() {
        let out = normalize(&fixtures::rows_xml(&[
            fixtures::row("1", "조식", "20240101", "토스트<br/>우유", "500.1 Kcal", "탄수화물(g) : 60.1"),
            fixtures::row("2", "중식", "20240101", "쌀밥<br/>김치찌개 (9.13.)", "812.5 Kcal", "단백질(g) : 30.2"),
        ]))
        .unwrap();

        assert!(out.result.is_none());
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].meal_type_code, "1");
        assert_eq!(out.rows[0].meal_type_name, "조식");
        assert_eq!(out.rows[1].meal_type_code, "2");
        assert_eq!(out.rows[1].date, "20240101");
        assert_eq!(out.rows[1].dish_field, "쌀밥<br/>김치찌개 (9.13.)");
        assert_eq!(out.rows[1].calorie_info, "812.5 Kcal");
        assert_eq!(out.rows[1].nutrition_info, "단백질(g) : 30.2");
    }

    #[test]
    fn head_result_does_not_hide_rows() {
        let out = normalize(&fixtures::rows_xml(&[fixtures::row(
            "2", "중식", "20240101", "쌀밥", "700 Kcal", "",
        )]))
        .unwrap();
        assert!(out.result.is_none());
        assert_eq!(out.rows.len(), 1);
    }

    #[test]
    fn escaped_markup_is_read_as_text() {
        let xml = "<mealServiceDietInfo><row><MMEAL_SC_CODE>2</MMEAL_SC_CODE>\
                   <DDISH_NM>밥&lt;br/&gt;국</DDISH_NM></row></mealServiceDietInfo>";
        let out = normalize(xml).unwrap();
        assert_eq!(out.rows[0].dish_field, "밥<br/>국");
    }

    #[test]
    fn missing_fields_become_empty() {
        let xml = "<mealServiceDietInfo><row><MMEAL_SC_CODE>2</MMEAL_SC_CODE></row></mealServiceDietInfo>";
        let out = normalize(xml).unwrap();
        assert_eq!(
            out.rows[0],
            MealRow { meal_type_code: "2".into(), ..MealRow::default() }
        );
    }

    #[test]
    fn empty_container_means_no_rows() {
        let out = normalize("<?xml version=\"1.0\"?><mealServiceDietInfo/>").unwrap();
        assert_eq!(out, NormalizedResponse::default());

        let out = normalize("<something><else/></something>").unwrap();
        assert_eq!(out, NormalizedResponse::default());
    }

    #[test]
    fn malformed_documents_fail() {
        for xml in [
            "",
            "   ",
            "<mealServiceDietInfo><row>",
            "<a><b></a></b>",
            "<a></a><b></b>",
            "</a>",
            "<RESULT><CODE>INFO-200</CODE><MESSAGE>no data</MESSAGE></RESULT>trailing junk",
            "junk before<mealServiceDietInfo/>",
            "<![CDATA[x]]><mealServiceDietInfo/>",
            "<mealServiceDietInfo><row a></row></mealServiceDietInfo>",
            "<mealServiceDietInfo><row a=\"1\" a=\"2\"/></mealServiceDietInfo>",
        ] {
            assert!(
                matches!(normalize(xml), Err(MealError::Parse(_))),
                "expected parse error for {xml:?}"
            );
        }
    }

    #[test]
    fn whitespace_around_root_is_allowed() {
        let out = normalize("\n  <mealServiceDietInfo/>\n\t").unwrap();
        assert_eq!(out, NormalizedResponse::default());
    }

    #[test]
    fn well_formed_attributes_are_accepted() {
        let xml = "<mealServiceDietInfo><row id=\"1\"><MMEAL_SC_CODE>2</MMEAL_SC_CODE></row></mealServiceDietInfo>";
        assert_eq!(normalize(xml).unwrap().rows.len(), 1);
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let deep = format!("{}{}", "<a>".repeat(20_000), "</a>".repeat(20_000));
        assert!(matches!(normalize(&deep), Err(MealError::Parse(msg)) if msg.contains("nesting too deep")));

        let at_limit = format!("{}{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
        assert_eq!(normalize(&at_limit).unwrap(), NormalizedResponse::default());
    }
}
