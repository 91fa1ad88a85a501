use crate::error::DownloaderError;
use crate::types::CandidateItem;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use roxmltree::{Document, Node};

const INGESTION_DATE: &str = "ingestiondate";

/// The parts of a feed entry the parser cares about.
#[derive(Debug, PartialEq)]
enum EntryField<'a> {
    Title(&'a str),
    Date { name: &'a str, value: &'a str },
    Link { rel: Option<&'a str>, href: &'a str },
    Other,
}

impl<'a> EntryField<'a> {
    fn decode<'input: 'a>(node: Node<'a, 'input>) -> Self {
        match node.tag_name().name() {
            "title" => node.text().map(str::trim).map_or(EntryField::Other, EntryField::Title),
            "date" => match (node.attribute("name"), node.text()) {
                (Some(name), Some(value)) => EntryField::Date {
                    name,
                    value: value.trim(),
                },
                _ => EntryField::Other,
            },
            "link" => match node.attribute("href") {
                Some(href) => EntryField::Link {
                    rel: node.attribute("rel"),
                    href,
                },
                None => EntryField::Other,
            },
            _ => EntryField::Other,
        }
    }
}

/// Parses a catalog search response into download candidates sorted by
/// `(ingestion date, title)`.
///
/// A feed without entries yields an empty list. Any entry lacking a title,
/// an `ingestiondate` date or a link without `rel` fails the whole parse,
/// reporting the first such entry (1-based, in document order).
pub fn parse_feed(xml: &str) -> Result<Vec<CandidateItem>, DownloaderError> {
    let doc = Document::parse(xml).map_err(|e| DownloaderError::MalformedResponse(e.to_string()))?;

    let feed = doc.root_element();
    if !feed.has_tag_name("feed") {
        return Err(DownloaderError::MalformedResponse(format!(
            "expected a feed, found <{}>",
            feed.tag_name().name()
        )));
    }

    let mut items = feed
        .children()
        .filter(|n| n.has_tag_name("entry"))
        .enumerate()
        .map(|(i, entry)| parse_entry(i + 1, entry))
        .collect::<Result<Vec<_>, _>>()?;

    items.sort_by(|a, b| {
        a.ingestion_date
            .cmp(&b.ingestion_date)
            .then_with(|| a.title.cmp(&b.title))
    });
    Ok(items)
}

fn parse_entry(index: usize, entry: Node) -> Result<CandidateItem, DownloaderError> {
    let fields: Vec<EntryField> = entry
        .children()
        .filter(|n| n.is_element())
        .map(EntryField::decode)
        .collect();

    let title = fields
        .iter()
        .find_map(|f| match f {
            EntryField::Title(t) if !t.is_empty() => Some(*t),
            _ => None,
        })
        .ok_or(DownloaderError::MalformedEntry {
            index,
            field: "title",
        })?;

    let date = fields
        .iter()
        .find_map(|f| match f {
            EntryField::Date { name, value } if *name == INGESTION_DATE => Some(*value),
            _ => None,
        })
        .ok_or(DownloaderError::MalformedEntry {
            index,
            field: "ingestion date",
        })?;

    let link = fields
        .iter()
        .find_map(|f| match f {
            EntryField::Link { rel: None, href } => Some(*href),
            _ => None,
        })
        .ok_or(DownloaderError::MalformedEntry {
            index,
            field: "download link",
        })?;

    let ingestion_date = parse_date(date).ok_or_else(|| DownloaderError::InvalidDate {
        index,
        value: date.to_string(),
    })?;

    let item = CandidateItem {
        title: title.to_string(),
        ingestion_date,
        download_link: link.to_string(),
    };
    debug!("Parsed entry: {:?}", item);
    Ok(item)
}

// The hub writes `2021-03-01T13:07:27.563Z`; tolerate a missing zone.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|d| d.and_utc())
        })
}
