//! Codec for the shareable filter token carried in the URL.
//!
//! The token is a `!`-separated list of tagged fields, for example
//! `S2020-07-01!E2020-07-31!c5,9!d3`. Tags `S` and `E` carry the period
//! dates; `c`, `p`, `l`, `t`, `d`, `f` carry comma-joined id lists for
//! consumers, producers, logical addresses, contracts, domains, and platform
//! chains. The decoder is deliberately forgiving: it finds the token anywhere
//! in an href, drops malformed pieces one by one, and still accepts the old
//! separator-free run format such as `c5c9`.

use serde::Serialize;

use crate::dates;
use crate::model::HippoState;

const FILTER_TOKEN: &str = "filter=";

/// The fields a bookmark can carry. `None` means the field was absent, which
/// readers interpret as "keep the current value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookmarkInformation {
    /// Period start date.
    pub date_effective: Option<String>,
    /// Period end date.
    pub date_end: Option<String>,
    /// Consumer ids.
    pub consumers: Option<Vec<i32>>,
    /// Producer ids.
    pub producers: Option<Vec<i32>>,
    /// Logical address ids.
    pub logical_addresses: Option<Vec<i32>>,
    /// Contract ids.
    pub contracts: Option<Vec<i32>>,
    /// Domain ids.
    pub domains: Option<Vec<i32>>,
    /// Platform chain ids.
    pub platform_chains: Option<Vec<i32>>,
}

impl BookmarkInformation {
    /// Whether every field is absent.
    pub fn is_empty(&self) -> bool {
        self == &BookmarkInformation::default()
    }
}

/// Encodes the shareable part of `state` into a filter token. Returns an
/// empty string when nothing is worth sharing.
///
/// The encoded dates follow the active view: statistics views always write
/// their period, the integration view writes its dates only once they are
/// known.
pub fn create_bookmark_string(state: &HippoState) -> String {
    let mut fields: Vec<String> = Vec::new();
    let (date_effective, date_end) = if state.view.is_statistics() {
        (
            Some(state.stat_date_effective.clone()),
            Some(state.stat_date_end.clone()),
        )
    } else {
        (state.date_effective.clone(), state.date_end.clone())
    };
    if let Some(date) = date_effective {
        fields.push(format!("S{date}"));
    }
    if let Some(date) = date_end {
        fields.push(format!("E{date}"));
    }
    push_id_field(&mut fields, 'c', &state.selected_consumers);
    push_id_field(&mut fields, 'p', &state.selected_producers);
    push_id_field(&mut fields, 'l', &state.selected_logical_addresses);
    push_id_field(&mut fields, 't', &state.selected_contracts);
    push_id_field(&mut fields, 'd', &state.selected_domains);
    push_id_field(&mut fields, 'f', &state.selected_platform_chains);
    fields.join("!")
}

fn push_id_field(fields: &mut Vec<String>, tag: char, ids: &[i32]) {
    if ids.is_empty() {
        return;
    }
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    fields.push(format!("{tag}{joined}"));
}

/// Decodes the filter token found in `raw`, which may be a bare token, a
/// `filter=...` segment, or a full href. Absent or unusable input decodes to
/// the empty bookmark.
pub fn parse_bookmark_string(raw: &str) -> BookmarkInformation {
    let mut bookmark = BookmarkInformation::default();
    let body = match raw.find(FILTER_TOKEN) {
        Some(found) => &raw[found + FILTER_TOKEN.len()..],
        // A bare token has no marker; the span clamp below keeps anything
        // that is not a token from decoding into fields.
        None => raw,
    };
    let body = token_span(body);

    let bytes = body.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'!' {
            index += 1;
            continue;
        }
        let tag = bytes[index];
        index += 1;
        let payload_start = index;
        while index < bytes.len() && is_payload_byte(bytes[index]) {
            index += 1;
        }
        apply_field(&mut bookmark, tag, &body[payload_start..index]);
    }
    bookmark
}

/// The leading run of characters that can belong to a filter token. Anything
/// else, a `&` or `/` for example, ends the token.
fn token_span(body: &str) -> &str {
    let end = body
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || matches!(ch, ',' | '-' | '!')))
        .unwrap_or(body.len());
    &body[..end]
}

fn is_payload_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || byte == b',' || byte == b'-'
}

fn apply_field(bookmark: &mut BookmarkInformation, tag: u8, payload: &str) {
    match tag {
        b'S' => {
            if let Some(date) = valid_date(payload) {
                bookmark.date_effective = Some(date);
            }
        }
        b'E' => {
            if let Some(date) = valid_date(payload) {
                bookmark.date_end = Some(date);
            }
        }
        b'c' => append_ids(&mut bookmark.consumers, payload),
        b'p' => append_ids(&mut bookmark.producers, payload),
        b'l' => append_ids(&mut bookmark.logical_addresses, payload),
        b't' => append_ids(&mut bookmark.contracts, payload),
        b'd' => append_ids(&mut bookmark.domains, payload),
        b'f' => append_ids(&mut bookmark.platform_chains, payload),
        // Unknown tag, skip the run.
        _ => {}
    }
}

fn valid_date(payload: &str) -> Option<String> {
    dates::parse_swedish_date(payload).map(|_| payload.to_string())
}

/// Parses the ids of one payload into `slot`, appending to ids from earlier
/// runs of the same tag. Malformed ids are dropped one by one; duplicates
/// keep their first position.
fn append_ids(slot: &mut Option<Vec<i32>>, payload: &str) {
    let mut ids = slot.take().unwrap_or_default();
    for part in payload.split(',') {
        if let Ok(id) = part.parse::<i32>() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    *slot = if ids.is_empty() { None } else { Some(ids) };
}
