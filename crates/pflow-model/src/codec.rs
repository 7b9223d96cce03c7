//! JSON wire schemas for [`Model`].
//!
//! Two historical shapes decode into the same model:
//!
//! - the import schema: `modelType`, scalar token fields, `inhibit`;
//! - the export schema: JSON-LD style `@context`/`@type`/`token` metadata,
//!   array token fields, `inhibitTransition`, zero values omitted.
//!
//! Encoding always produces the export schema.

use serde_json::{Map, Value};

use crate::errors::CodecError;
use crate::model::{Arrow, Model, Place, Transition, DEFAULT_MODEL_TYPE};
use crate::token::Token;

/// `@context` written into every export document.
pub const CONTEXT: &str = "https://pflow.xyz/schema";

/// Token vocabulary written into every export document.
pub const TOKEN_VOCABULARY: &str = "https://pflow.xyz/tokens/black";

/// How field shape mismatches are handled while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Mismatched fields are logged, recorded and replaced by their default.
    #[default]
    Permissive,
    /// The first mismatched field fails the decode.
    Strict,
}

/// A field that was present with the wrong shape and fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Location of the field, e.g. `places.p0.offset`.
    pub path: String,
    /// Shape the field should have had.
    pub expected: &'static str,
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Normalized model.
    pub model: Model,
    /// Recovered mismatches (always empty in [`DecodeMode::Strict`]).
    pub issues: Vec<FieldIssue>,
}

/// Decoder for both wire schemas.
///
/// # Example
///
/// ```rust
/// use pflow_model::{DecodeMode, ModelDecoder};
///
/// let decoded = ModelDecoder::new(DecodeMode::Permissive)
///     .decode(br#"{"places": {"p0": {"offset": "zero"}}}"#)?;
/// assert_eq!(decoded.model.places["p0"].offset, 0);
/// assert_eq!(decoded.issues[0].path, "places.p0.offset");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelDecoder {
    mode: DecodeMode,
}

impl ModelDecoder {
    /// Creates a decoder with the given mismatch policy.
    pub fn new(mode: DecodeMode) -> Self {
        Self { mode }
    }

    /// Decodes wire bytes in either schema.
    pub fn decode(&self, bytes: &[u8]) -> Result<Decoded, CodecError> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.decode_value(&value)
    }

    /// Decodes an already parsed JSON value in either schema.
    pub fn decode_value(&self, value: &Value) -> Result<Decoded, CodecError> {
        let root = value
            .as_object()
            .ok_or_else(|| CodecError::NotAnObject(kind_of(value)))?;

        let mut reader = Reader {
            mode: self.mode,
            issues: Vec::new(),
        };
        let model = reader.model(root)?;

        tracing::debug!(
            places = model.places.len(),
            transitions = model.transitions.len(),
            arrows = model.arrows.len(),
            issues = reader.issues.len(),
            "decoded model"
        );
        Ok(Decoded {
            model,
            issues: reader.issues,
        })
    }
}

/// Walks a parsed document, applying defaults and collecting issues.
struct Reader {
    mode: DecodeMode,
    issues: Vec<FieldIssue>,
}

impl Reader {
    fn mismatch(&mut self, path: String, expected: &'static str) -> Result<(), CodecError> {
        match self.mode {
            DecodeMode::Strict => Err(CodecError::FieldShape { path, expected }),
            DecodeMode::Permissive => {
                tracing::warn!(%path, expected, "field has wrong shape, using default");
                self.issues.push(FieldIssue { path, expected });
                Ok(())
            }
        }
    }

    fn model(&mut self, root: &Map<String, Value>) -> Result<Model, CodecError> {
        let mut model = Model::with_type(self.model_type(root)?);

        if let Some(places) = self.object(root.get("places"), "places")? {
            for (label, entry) in places {
                let path = format!("places.{}", label);
                if let Some(fields) = self.object(Some(entry), &path)? {
                    let place = self.place(fields, &path)?;
                    model.places.insert(label.clone(), place);
                }
            }
        }

        if let Some(transitions) = self.object(root.get("transitions"), "transitions")? {
            for (label, entry) in transitions {
                let path = format!("transitions.{}", label);
                if let Some(fields) = self.object(Some(entry), &path)? {
                    let transition = Transition {
                        x: self.int(fields, "x", &path)?,
                        y: self.int(fields, "y", &path)?,
                    };
                    model.transitions.insert(label.clone(), transition);
                }
            }
        }

        match root.get("arcs") {
            None | Some(Value::Null) => {}
            Some(Value::Array(arcs)) => {
                for (idx, entry) in arcs.iter().enumerate() {
                    let path = format!("arcs[{}]", idx);
                    if let Some(fields) = self.object(Some(entry), &path)? {
                        let arrow = self.arrow(fields, &path)?;
                        model.arrows.push(arrow);
                    }
                }
            }
            Some(_) => self.mismatch("arcs".to_string(), "array")?,
        }

        Ok(model)
    }

    fn model_type(&mut self, root: &Map<String, Value>) -> Result<String, CodecError> {
        for key in ["modelType", "@type"] {
            match root.get(key) {
                None | Some(Value::Null) => continue,
                Some(Value::String(s)) => return Ok(s.clone()),
                Some(_) => self.mismatch(key.to_string(), "string")?,
            }
        }
        Ok(String::new())
    }

    fn place(&mut self, fields: &Map<String, Value>, path: &str) -> Result<Place, CodecError> {
        Ok(Place {
            offset: self.int(fields, "offset", path)?,
            initial: self.token(fields, "initial", path)?,
            capacity: self.token(fields, "capacity", path)?,
            x: self.int(fields, "x", path)?,
            y: self.int(fields, "y", path)?,
        })
    }

    fn arrow(&mut self, fields: &Map<String, Value>, path: &str) -> Result<Arrow, CodecError> {
        let export_flag = matches!(fields.get("inhibitTransition"), Some(v) if !v.is_null());
        let inhibit_key = if export_flag {
            "inhibitTransition"
        } else {
            "inhibit"
        };
        Ok(Arrow {
            source: self.string(fields, "source", path)?,
            target: self.string(fields, "target", path)?,
            weight: self.token(fields, "weight", path)?,
            inhibit: self.flag(fields, inhibit_key, path)?,
        })
    }

    fn object<'v>(
        &mut self,
        value: Option<&'v Value>,
        path: &str,
    ) -> Result<Option<&'v Map<String, Value>>, CodecError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => {
                self.mismatch(path.to_string(), "object")?;
                Ok(None)
            }
        }
    }

    fn int(
        &mut self,
        fields: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Result<i64, CodecError> {
        match fields.get(key) {
            None | Some(Value::Null) => Ok(0),
            Some(value) => match value.as_i64() {
                Some(n) => Ok(n),
                None => {
                    self.mismatch(format!("{}.{}", path, key), "integer")?;
                    Ok(0)
                }
            },
        }
    }

    /// Accepts a scalar integer (import schema) or an integer array (export schema).
    fn token(
        &mut self,
        fields: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Result<Token, CodecError> {
        let parsed = match fields.get(key) {
            None | Some(Value::Null) => return Ok(Token::zero()),
            Some(Value::Number(n)) => n.as_i64().map(Token::from),
            Some(Value::Array(items)) => items
                .iter()
                .map(Value::as_i64)
                .collect::<Option<Vec<i64>>>()
                .map(Token::new),
            Some(_) => None,
        };
        match parsed {
            Some(token) => Ok(token),
            None => {
                self.mismatch(format!("{}.{}", path, key), "integer or integer array")?;
                Ok(Token::zero())
            }
        }
    }

    fn string(
        &mut self,
        fields: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Result<String, CodecError> {
        match fields.get(key) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => {
                self.mismatch(format!("{}.{}", path, key), "string")?;
                Ok(String::new())
            }
        }
    }

    fn flag(
        &mut self,
        fields: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Result<bool, CodecError> {
        match fields.get(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => {
                self.mismatch(format!("{}.{}", path, key), "boolean")?;
                Ok(false)
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn non_zero(token: &Token) -> Option<Value> {
    if token.is_zero() {
        None
    } else {
        Some(Value::from(token.values().to_vec()))
    }
}

impl Model {
    /// Decodes either wire schema, logging and defaulting mismatched fields.
    pub fn from_json(bytes: &[u8]) -> Result<Model, CodecError> {
        ModelDecoder::default().decode(bytes).map(|decoded| decoded.model)
    }

    /// Export document for this model.
    ///
    /// Zero tokens and false inhibit flags are omitted; `modelType` is
    /// written only when it differs from `@type`.
    pub fn to_wire_value(&self) -> Value {
        let mut root = Map::new();
        root.insert("@context".into(), Value::from(CONTEXT));
        root.insert("@type".into(), Value::from(DEFAULT_MODEL_TYPE));
        if self.model_type != DEFAULT_MODEL_TYPE {
            root.insert("modelType".into(), Value::from(self.model_type.as_str()));
        }
        root.insert("token".into(), Value::from(vec![TOKEN_VOCABULARY]));

        let places: Map<String, Value> = self
            .places
            .iter()
            .map(|(label, place)| {
                let mut entry = Map::new();
                entry.insert("@type".into(), Value::from("Place"));
                entry.insert("offset".into(), Value::from(place.offset));
                if let Some(initial) = non_zero(&place.initial) {
                    entry.insert("initial".into(), initial);
                }
                if let Some(capacity) = non_zero(&place.capacity) {
                    entry.insert("capacity".into(), capacity);
                }
                entry.insert("x".into(), Value::from(place.x));
                entry.insert("y".into(), Value::from(place.y));
                (label.clone(), Value::Object(entry))
            })
            .collect();
        root.insert("places".into(), Value::Object(places));

        let transitions: Map<String, Value> = self
            .transitions
            .iter()
            .map(|(label, transition)| {
                let mut entry = Map::new();
                entry.insert("@type".into(), Value::from("Transition"));
                entry.insert("x".into(), Value::from(transition.x));
                entry.insert("y".into(), Value::from(transition.y));
                (label.clone(), Value::Object(entry))
            })
            .collect();
        root.insert("transitions".into(), Value::Object(transitions));

        let arcs: Vec<Value> = self
            .arrows
            .iter()
            .map(|arrow| {
                let mut entry = Map::new();
                entry.insert("@type".into(), Value::from("Arrow"));
                entry.insert("source".into(), Value::from(arrow.source.as_str()));
                entry.insert("target".into(), Value::from(arrow.target.as_str()));
                if let Some(weight) = non_zero(&arrow.weight) {
                    entry.insert("weight".into(), weight);
                }
                if arrow.inhibit {
                    entry.insert("inhibitTransition".into(), Value::Bool(true));
                }
                Value::Object(entry)
            })
            .collect();
        root.insert("arcs".into(), Value::Array(arcs));

        Value::Object(root)
    }

    /// Encodes the export document as compact JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(&self.to_wire_value())
            .map_err(|err| CodecError::Serialization(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn export_document_shape() {
        let model = Model::new()
            .with_place("p0", Place::new(0).initial(1).at(10, 20))
            .with_transition("t0", Transition::at(30, 40))
            .with_arrow(Arrow::new("p0", "t0").weight(2))
            .with_arrow(Arrow::new("p0", "t0").inhibit());

        assert_eq!(
            model.to_wire_value(),
            json!({
                "@context": CONTEXT,
                "@type": "PetriNet",
                "token": [TOKEN_VOCABULARY],
                "places": {
                    "p0": {"@type": "Place", "offset": 0, "initial": [1], "x": 10, "y": 20}
                },
                "transitions": {
                    "t0": {"@type": "Transition", "x": 30, "y": 40}
                },
                "arcs": [
                    {"@type": "Arrow", "source": "p0", "target": "t0", "weight": [2]},
                    {"@type": "Arrow", "source": "p0", "target": "t0", "inhibitTransition": true}
                ]
            })
        );
    }

    #[test]
    fn custom_model_type_is_carried() {
        let model = Model::with_type("workflow");
        let value = model.to_wire_value();
        assert_eq!(value["@type"], "PetriNet");
        assert_eq!(value["modelType"], "workflow");
        assert_eq!(Model::from_json(&model.to_json().unwrap()).unwrap(), model);
    }

    #[test]
    fn empty_model_type_survives_round_trip() {
        let model = Model::with_type("");
        assert_eq!(Model::from_json(&model.to_json().unwrap()).unwrap(), model);
    }

    #[test]
    fn scalar_and_array_tokens_are_equivalent() {
        let scalar = Model::from_json(br#"{"places": {"p": {"initial": 3}}}"#).unwrap();
        let array = Model::from_json(br#"{"places": {"p": {"initial": [3]}}}"#).unwrap();
        assert_eq!(scalar.places["p"], array.places["p"]);
    }

    #[test]
    fn null_fields_count_as_absent() {
        let decoded = ModelDecoder::new(DecodeMode::Strict)
            .decode(br#"{"places": {"p": {"offset": null, "capacity": null}}, "arcs": null}"#)
            .unwrap();
        assert_eq!(decoded.model.places["p"], Place::default());
        assert!(decoded.model.arrows.is_empty());
    }

    #[test]
    fn top_level_kind_is_reported() {
        let err = Model::from_json(b"[1, 2]").unwrap_err();
        assert!(matches!(err, CodecError::NotAnObject("array")));
    }
}
