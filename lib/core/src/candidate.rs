use crate::coordinate::Coordinate;
use crate::error::{LocationError, ValidationError};
use crate::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque, stable candidate identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(s: &str) -> Self {
        CandidateId(s.to_string())
    }
}

impl From<String> for CandidateId {
    fn from(s: String) -> Self {
        CandidateId(s)
    }
}

/// A record as it arrives from the data file or the API, before validation.
///
/// Every attribute is kept as raw JSON so coercion errors can be reported
/// per field instead of failing the whole batch at parse time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub location: Option<Value>,
    pub age: Option<Value>,
    pub accepted_offers: Option<Value>,
    pub canceled_offers: Option<Value>,
    pub average_reply_time: Option<Value>,
}

impl RawRecord {
    /// Interpret an arbitrary JSON value as a record.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::NotAnObject);
        }
        serde_json::from_value(value).map_err(|_| ValidationError::NotAnObject)
    }

    fn field(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Age => self.age.as_ref(),
            Field::AcceptedOffers => self.accepted_offers.as_ref(),
            Field::CanceledOffers => self.canceled_offers.as_ref(),
            Field::AverageReplyTime => self.average_reply_time.as_ref(),
            Field::Distance => None,
        }
    }
}

/// A validated waitlist candidate.
///
/// Holds only what the record says. Scores derived from the population or
/// from a query live outside the candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub location: Option<Coordinate>,
    pub age: Option<u64>,
    pub accepted_offers: Option<u64>,
    pub canceled_offers: Option<u64>,
    pub average_reply_time: Option<u64>,
}

impl Candidate {
    /// Candidate with an id and nothing else.
    #[must_use]
    pub fn new(id: impl Into<CandidateId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location: None,
            age: None,
            accepted_offers: None,
            canceled_offers: None,
            average_reply_time: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_behavior(
        mut self,
        age: Option<u64>,
        accepted_offers: Option<u64>,
        canceled_offers: Option<u64>,
        average_reply_time: Option<u64>,
    ) -> Self {
        self.age = age;
        self.accepted_offers = accepted_offers;
        self.canceled_offers = canceled_offers;
        self.average_reply_time = average_reply_time;
        self
    }

    /// Validate and coerce a raw record.
    pub fn from_raw(raw: &RawRecord) -> Result<Self, ValidationError> {
        let id = match &raw.id {
            None | Some(Value::Null) => return Err(ValidationError::MissingId),
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(_) => return Err(ValidationError::EmptyId),
        };

        let name = raw
            .name
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let location = coerce_location(raw.location.as_ref()).map_err(|source| {
            ValidationError::InvalidLocation {
                id: id.clone(),
                source,
            }
        })?;

        let count = |field: Field| coerce_count(&id, field, raw.field(field));

        Ok(Self {
            age: count(Field::Age)?,
            accepted_offers: count(Field::AcceptedOffers)?,
            canceled_offers: count(Field::CanceledOffers)?,
            average_reply_time: count(Field::AverageReplyTime)?,
            id: CandidateId(id),
            name,
            location,
        })
    }

    /// Raw value of a static field, if present. Distance is never stored on
    /// the candidate and always yields `None`.
    #[must_use]
    pub fn static_value(&self, field: Field) -> Option<u64> {
        match field {
            Field::Age => self.age,
            Field::AcceptedOffers => self.accepted_offers,
            Field::CanceledOffers => self.canceled_offers,
            Field::AverageReplyTime => self.average_reply_time,
            Field::Distance => None,
        }
    }

    /// True if at least one behavioral field is present.
    #[must_use]
    pub fn has_behavior_data(&self) -> bool {
        Field::STATIC
            .iter()
            .any(|field| self.static_value(*field).is_some())
    }
}

fn coerce_count(id: &str, field: Field, value: Option<&Value>) -> Result<Option<u64>, ValidationError> {
    let invalid = |value: &Value| ValidationError::InvalidField {
        id: id.to_string(),
        field,
        value: value.to_string(),
    };

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v @ Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(u), _) => Ok(Some(u)),
            (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                Ok(Some(f as u64))
            }
            _ => Err(invalid(v)),
        },
        Some(v @ Value::String(s)) => s.trim().parse::<u64>().map(Some).map_err(|_| invalid(v)),
        Some(v) => Err(invalid(v)),
    }
}

fn coerce_location(value: Option<&Value>) -> Result<Option<Coordinate>, LocationError> {
    let object = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(object)) => object,
        Some(other) => return Err(LocationError::Malformed(other.to_string())),
    };

    let degrees = |key: &str| -> Result<f64, LocationError> {
        let malformed = || LocationError::Malformed(Value::Object(object.clone()).to_string());
        match object.get(key) {
            Some(Value::Number(n)) => n.as_f64().ok_or_else(malformed),
            Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| malformed()),
            _ => Err(malformed()),
        }
    };

    Coordinate::new(degrees("latitude")?, degrees("longitude")?).map(Some)
}
