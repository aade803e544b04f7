use crate::{error::QueryError, sampler::SampleRequest};
use percent_encoding::percent_decode_str;

impl SampleRequest {
    /// Parses `offset` and `limit` out of a raw query string; other keys are ignored.
    pub fn from_query(query: &str, default_limit: usize) -> Result<Self, QueryError> {
        let mut offset = None;
        let mut limit = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "offset" => offset = Some(value.into_owned()),
                "limit" => limit = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            offset: parse_count("offset", offset)?.unwrap_or(0),
            limit: parse_count("limit", limit)?.unwrap_or(default_limit),
        })
    }
}

fn parse_count(name: &'static str, value: Option<String>) -> Result<Option<usize>, QueryError> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.trim().parse::<usize>() {
        Ok(count) => Ok(Some(count)),
        Err(_) => Err(QueryError::Malformed { name, value }),
    }
}

/// Decodes `%XX` escapes in a path segment. `+` stays literal.
pub fn percent_decode(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}
