use mongodb::bson::{self, Document, oid::ObjectId, serde_helpers::serialize_object_id_as_hex_string};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Agenda event as stored in the `agendaEventos` collection.
///
/// Fields missing from older documents read back as their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Store-assigned identifier, sent to clients as a 24-char hex string
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: ObjectId,
    /// 8-digit registration number
    #[serde(default, deserialize_with = "text_from_any")]
    #[schema(example = "12345678")]
    pub n_registro: String,
    #[serde(default, deserialize_with = "text_from_any")]
    #[schema(example = "Feira de Tecnologia")]
    pub titulo: String,
    #[serde(default, deserialize_with = "number_from_any")]
    #[schema(example = 250.0)]
    pub custo: f64,
    /// Date text; the last four characters are the year
    #[serde(default, deserialize_with = "text_from_any")]
    #[schema(example = "15/06/2023")]
    pub data: String,
}

/// Documents written by older clients may hold numbers, nulls or other
/// BSON types in text fields. Numbers keep their digits; anything else
/// reads as empty.
fn text_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Text(String),
        Int(i64),
        Float(f64),
        Null,
        Other(serde::de::IgnoredAny),
    }

    Ok(match Text::deserialize(deserializer)? {
        Text::Text(s) => s,
        Text::Int(n) => n.to_string(),
        Text::Float(f) => f.to_string(),
        Text::Null | Text::Other(_) => String::new(),
    })
}

/// `custo` stored as numeric text reads as its number; unparseable text,
/// null and other BSON types read as `0`.
fn number_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Num(f64),
        Text(String),
        Null,
        Other(serde::de::IgnoredAny),
    }

    Ok(match Number::deserialize(deserializer)? {
        Number::Num(n) => n,
        Number::Text(s) => s.trim().parse().unwrap_or(0.0),
        Number::Null | Number::Other(_) => 0.0,
    })
}

/// Raw write body, read from JSON or from an urlencoded form.
///
/// Every field is kept as untyped JSON so validation can echo exactly what
/// the client sent. JSON `null` is treated the same as an absent field.
/// Form fields always arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct EventPayload {
    /// Required on update, ignored on create
    #[serde(rename = "_id", default)]
    #[schema(value_type = Option<String>)]
    pub id: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "12345678")]
    pub n_registro: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Feira de Tecnologia")]
    pub titulo: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 250.0)]
    pub custo: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "15/06/2023")]
    pub data: Option<Value>,
}

/// Validated create payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub n_registro: String,
    pub titulo: String,
    pub custo: f64,
    pub data: String,
}

/// Validated partial update.
///
/// Has no identifier field, so a `$set` built from it can never rewrite `_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventPatch {
    pub n_registro: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl EventPatch {
    /// Fields to put under `$set`.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub inserted_id: String,
}

impl From<mongodb::results::InsertOneResult> for InsertResult {
    fn from(result: mongodb::results::InsertOneResult) -> Self {
        let inserted_id = match result.inserted_id {
            bson::Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<mongodb::results::UpdateResult> for UpdateResult {
    fn from(result: mongodb::results::UpdateResult) -> Self {
        Self {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl From<mongodb::results::DeleteResult> for DeleteResult {
    fn from(result: mongodb::results::DeleteResult) -> Self {
        Self {
            acknowledged: true,
            deleted_count: result.deleted_count,
        }
    }
}
