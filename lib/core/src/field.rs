use serde::{Deserialize, Serialize};
use std::fmt;

/// The five scored attributes of a candidate.
///
/// The first four are static: they depend only on the candidate's history
/// and are normalized once per population. [`Field::Distance`] depends on the
/// query location and is normalized per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Age,
    AcceptedOffers,
    CanceledOffers,
    AverageReplyTime,
    Distance,
}

impl Field {
    /// Behavioral fields, in the order they are normalized.
    pub const STATIC: [Field; 4] = [
        Field::Age,
        Field::AcceptedOffers,
        Field::CanceledOffers,
        Field::AverageReplyTime,
    ];

    pub const ALL: [Field; 5] = [
        Field::Age,
        Field::AcceptedOffers,
        Field::CanceledOffers,
        Field::AverageReplyTime,
        Field::Distance,
    ];

    /// Name of the field as it appears in raw records and API output.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::AcceptedOffers => "acceptedOffers",
            Field::CanceledOffers => "canceledOffers",
            Field::AverageReplyTime => "averageReplyTime",
            Field::Distance => "distance",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_static(&self) -> bool {
        !matches!(self, Field::Distance)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_fields_exclude_distance() {
        assert!(Field::STATIC.iter().all(Field::is_static));
        assert!(!Field::Distance.is_static());
    }

    #[test]
    fn test_serde_names_match_record_keys() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
    }
}
