//! Field rules for agenda event write payloads.
//!
//! Each field has a table of rules. Every rule in a table is evaluated and
//! each failure adds one [`FieldError`], so callers see all violations of a
//! payload at once. Errors are ordered `_id`, `n_registro`, `titulo`,
//! `custo`, `data`.

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display};
use validator::{ValidateLength, ValidateRange};

use crate::models::{EventPatch, EventPayload, NewEvent};

/// Length of a valid `n_registro`.
pub const REGISTRO_LENGTH: u64 = 8;

/// Shortest `data` that still carries a four-digit year.
pub const DATA_MIN_LENGTH: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
pub enum FieldErrorKind {
    MissingField,
    InvalidFormat,
    InvalidLength,
    InvalidType,
    OutOfRange,
    InvalidIdentifier,
}

/// One violated rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// What the client submitted (`n_registro` is echoed trimmed)
    pub value: Value,
    pub msg: String,
    pub param: &'static str,
    pub kind: FieldErrorKind,
}

struct Rule<T: ?Sized + 'static> {
    kind: FieldErrorKind,
    msg: &'static str,
    passes: fn(&T) -> bool,
}

const N_REGISTRO_RULES: &[Rule<str>] = &[
    Rule {
        kind: FieldErrorKind::MissingField,
        msg: "O número de registro é obrigatório",
        passes: is_filled,
    },
    Rule {
        kind: FieldErrorKind::InvalidFormat,
        msg: "O número de registro deve conter apenas números",
        passes: is_numeric,
    },
    Rule {
        kind: FieldErrorKind::InvalidLength,
        msg: "O número de registro deve conter exatamente 8 dígitos",
        passes: has_registro_length,
    },
];

const TITULO_MISSING: &str = "O título do evento é obrigatório";
const TITULO_RULES: &[Rule<Value>] = &[Rule {
    kind: FieldErrorKind::InvalidType,
    msg: "O título do evento deve ser um texto",
    passes: Value::is_string,
}];

const CUSTO_MISSING: &str = "O custo do evento é obrigatório";
const CUSTO_RULES: &[Rule<Value>] = &[
    Rule {
        kind: FieldErrorKind::InvalidType,
        msg: "O custo do evento deve ser um número",
        passes: is_number,
    },
    Rule {
        kind: FieldErrorKind::OutOfRange,
        msg: "O custo do evento não pode ser negativo",
        passes: is_non_negative,
    },
];

const DATA_MISSING: &str = "A data do evento é obrigatória";
const DATA_RULES: &[Rule<Value>] = &[
    Rule {
        kind: FieldErrorKind::InvalidType,
        msg: "A data do evento deve ser um texto",
        passes: Value::is_string,
    },
    Rule {
        kind: FieldErrorKind::InvalidLength,
        msg: "A data do evento deve terminar com o ano (mínimo de 4 caracteres)",
        passes: has_year_room,
    },
];

const ID_MISSING: &str = "O campo _id é obrigatório para atualizar um evento";
const ID_INVALID: &str = "O campo _id deve ser um ObjectId válido (24 caracteres hexadecimais)";

fn is_filled(s: &str) -> bool {
    !s.is_empty()
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn has_registro_length(s: &str) -> bool {
    s.validate_length(None, None, Some(REGISTRO_LENGTH))
}

/// Numeric value of `custo`. Form bodies carry it as text, so numeric
/// strings count as numbers.
fn custo_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        other => other.as_f64(),
    }
}

fn is_number(value: &Value) -> bool {
    custo_number(value).is_some()
}

fn is_non_negative(value: &Value) -> bool {
    custo_number(value).is_none_or(|n| n.validate_range(Some(0.0), None, None, None))
}

fn has_year_room(value: &Value) -> bool {
    value
        .as_str()
        .is_none_or(|s| s.trim().validate_length(Some(DATA_MIN_LENGTH), None, None))
}

/// Text form of `n_registro`: strings are trimmed, numbers rendered in decimal.
fn registro_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

fn apply<T: ?Sized>(
    rules: &[Rule<T>],
    subject: &T,
    echo: &Value,
    param: &'static str,
    errors: &mut Vec<FieldError>,
) -> bool {
    let mut ok = true;
    for rule in rules {
        if !(rule.passes)(subject) {
            ok = false;
            errors.push(FieldError {
                value: echo.clone(),
                msg: rule.msg.to_string(),
                param,
                kind: rule.kind,
            });
        }
    }
    ok
}

fn check_registro(payload: &EventPayload, errors: &mut Vec<FieldError>) -> Option<String> {
    let text = registro_text(payload.n_registro.as_ref());
    let echo = Value::String(text.clone());
    apply(N_REGISTRO_RULES, text.as_str(), &echo, "n_registro", errors).then_some(text)
}

/// Runs `rules` on a present value. A blank value is always reported as
/// missing; an absent one only when the field is `required`.
fn check_field<'a>(
    value: Option<&'a Value>,
    param: &'static str,
    missing: &'static str,
    required: bool,
    rules: &[Rule<Value>],
    errors: &mut Vec<FieldError>,
) -> Option<&'a Value> {
    match value {
        Some(v) if !is_blank(v) => apply(rules, v, v, param, errors).then_some(v),
        None if !required => None,
        _ => {
            errors.push(FieldError {
                value: value.cloned().unwrap_or(Value::Null),
                msg: missing.to_string(),
                param,
                kind: FieldErrorKind::MissingField,
            });
            None
        }
    }
}

fn check_id(value: Option<&Value>, errors: &mut Vec<FieldError>) -> Option<ObjectId> {
    let Some(raw) = value.filter(|v| !is_blank(v)) else {
        errors.push(FieldError {
            value: value.cloned().unwrap_or(Value::Null),
            msg: ID_MISSING.to_string(),
            param: "_id",
            kind: FieldErrorKind::MissingField,
        });
        return None;
    };

    match raw.as_str().map(|s| ObjectId::parse_str(s.trim())) {
        Some(Ok(id)) => Some(id),
        _ => {
            errors.push(FieldError {
                value: raw.clone(),
                msg: ID_INVALID.to_string(),
                param: "_id",
                kind: FieldErrorKind::InvalidIdentifier,
            });
            None
        }
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(|s| s.trim().to_string())
}

/// Validate a create body. All four fields are required.
pub fn validate_new_event(payload: &EventPayload) -> Result<NewEvent, Vec<FieldError>> {
    let mut errors = Vec::new();

    let n_registro = check_registro(payload, &mut errors);
    let titulo = check_field(
        payload.titulo.as_ref(),
        "titulo",
        TITULO_MISSING,
        true,
        TITULO_RULES,
        &mut errors,
    );
    let custo = check_field(
        payload.custo.as_ref(),
        "custo",
        CUSTO_MISSING,
        true,
        CUSTO_RULES,
        &mut errors,
    );
    let data = check_field(
        payload.data.as_ref(),
        "data",
        DATA_MISSING,
        true,
        DATA_RULES,
        &mut errors,
    );

    match (n_registro, text(titulo), custo.and_then(custo_number), text(data)) {
        (Some(n_registro), Some(titulo), Some(custo), Some(data)) if errors.is_empty() => {
            Ok(NewEvent {
                n_registro,
                titulo,
                custo,
                data,
            })
        }
        _ => Err(errors),
    }
}

/// Validate an update body: `_id` and `n_registro` are required, the other
/// fields are checked only when present. A present but blank field is an
/// error rather than a silent no-op.
pub fn validate_event_patch(
    payload: &EventPayload,
) -> Result<(ObjectId, EventPatch), Vec<FieldError>> {
    let mut errors = Vec::new();

    let id = check_id(payload.id.as_ref(), &mut errors);
    let n_registro = check_registro(payload, &mut errors);
    let titulo = check_field(
        payload.titulo.as_ref(),
        "titulo",
        TITULO_MISSING,
        false,
        TITULO_RULES,
        &mut errors,
    );
    let custo = check_field(
        payload.custo.as_ref(),
        "custo",
        CUSTO_MISSING,
        false,
        CUSTO_RULES,
        &mut errors,
    );
    let data = check_field(
        payload.data.as_ref(),
        "data",
        DATA_MISSING,
        false,
        DATA_RULES,
        &mut errors,
    );

    match (id, n_registro) {
        (Some(id), Some(n_registro)) if errors.is_empty() => Ok((
            id,
            EventPatch {
                n_registro,
                titulo: text(titulo),
                custo: custo.and_then(custo_number),
                data: text(data),
            },
        )),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> EventPayload {
        serde_json::from_value(value).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "n_registro": "12345678",
            "titulo": "Feira de Tecnologia",
            "custo": 250,
            "data": "15/06/2023"
        })
    }

    fn kinds_for(errors: &[FieldError], param: &str) -> Vec<FieldErrorKind> {
        errors
            .iter()
            .filter(|e| e.param == param)
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_create_passes_with_zero_errors() {
        let event = validate_new_event(&payload(valid_body())).unwrap();
        assert_eq!(event.n_registro, "12345678");
        assert_eq!(event.titulo, "Feira de Tecnologia");
        assert_eq!(event.custo, 250.0);
        assert_eq!(event.data, "15/06/2023");
    }

    #[test]
    fn test_missing_registro_reports_every_rule() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("n_registro");

        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert_eq!(
            kinds_for(&errors, "n_registro"),
            vec![
                FieldErrorKind::MissingField,
                FieldErrorKind::InvalidFormat,
                FieldErrorKind::InvalidLength
            ]
        );
        let missing = errors
            .iter()
            .filter(|e| e.kind == FieldErrorKind::MissingField)
            .count();
        assert_eq!(missing, 1);
    }

    #[test]
    fn test_whitespace_registro_counts_as_missing() {
        let mut body = valid_body();
        body["n_registro"] = json!("   ");

        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert!(kinds_for(&errors, "n_registro").contains(&FieldErrorKind::MissingField));
        assert_eq!(errors[0].value, json!(""));
    }

    #[test]
    fn test_non_digit_registro_is_invalid_format_at_any_length() {
        for bad in ["1234567a", "12ab", "1234-5678", "１２３４５６７８", "12345678x9"] {
            let mut body = valid_body();
            body["n_registro"] = json!(bad);

            let errors = validate_new_event(&payload(body)).unwrap_err();
            assert!(
                kinds_for(&errors, "n_registro").contains(&FieldErrorKind::InvalidFormat),
                "{bad} should be rejected as non-numeric"
            );
        }
    }

    #[test]
    fn test_numeric_registro_of_wrong_length_is_invalid_length() {
        for bad in ["1", "1234567", "123456789"] {
            let mut body = valid_body();
            body["n_registro"] = json!(bad);

            let errors = validate_new_event(&payload(body)).unwrap_err();
            assert_eq!(
                kinds_for(&errors, "n_registro"),
                vec![FieldErrorKind::InvalidLength],
                "{bad}"
            );
        }
    }

    #[test]
    fn test_registro_is_trimmed_and_numbers_are_accepted() {
        let mut body = valid_body();
        body["n_registro"] = json!("  87654321 ");
        assert_eq!(
            validate_new_event(&payload(body)).unwrap().n_registro,
            "87654321"
        );

        let mut body = valid_body();
        body["n_registro"] = json!(12345678);
        assert_eq!(
            validate_new_event(&payload(body)).unwrap().n_registro,
            "12345678"
        );
    }

    #[test]
    fn test_create_requires_every_field() {
        let errors = validate_new_event(&payload(json!({}))).unwrap_err();
        let params: Vec<_> = errors.iter().map(|e| e.param).collect();
        assert_eq!(
            params,
            vec!["n_registro", "n_registro", "n_registro", "titulo", "custo", "data"]
        );
    }

    #[test]
    fn test_custo_type_and_range() {
        let mut body = valid_body();
        body["custo"] = json!("caro");
        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert_eq!(kinds_for(&errors, "custo"), vec![FieldErrorKind::InvalidType]);

        let mut body = valid_body();
        body["custo"] = json!(-1);
        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert_eq!(kinds_for(&errors, "custo"), vec![FieldErrorKind::OutOfRange]);
        assert_eq!(errors[0].value, json!(-1));

        let mut body = valid_body();
        body["custo"] = json!(0);
        assert!(validate_new_event(&payload(body)).is_ok());
    }

    #[test]
    fn test_numeric_text_custo_is_accepted() {
        let mut body = valid_body();
        body["custo"] = json!(" 250.5 ");
        assert_eq!(validate_new_event(&payload(body)).unwrap().custo, 250.5);

        let mut body = valid_body();
        body["custo"] = json!("-3");
        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert_eq!(kinds_for(&errors, "custo"), vec![FieldErrorKind::OutOfRange]);
        assert_eq!(errors[0].value, json!("-3"));

        let mut body = valid_body();
        body["custo"] = json!("NaN");
        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert_eq!(kinds_for(&errors, "custo"), vec![FieldErrorKind::InvalidType]);
    }

    #[test]
    fn test_data_needs_room_for_year() {
        let mut body = valid_body();
        body["data"] = json!("23");
        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert_eq!(kinds_for(&errors, "data"), vec![FieldErrorKind::InvalidLength]);

        let mut body = valid_body();
        body["data"] = json!(2023);
        let errors = validate_new_event(&payload(body)).unwrap_err();
        assert_eq!(kinds_for(&errors, "data"), vec![FieldErrorKind::InvalidType]);
    }

    #[test]
    fn test_patch_requires_id_and_registro() {
        let errors = validate_event_patch(&payload(json!({ "titulo": "Novo" }))).unwrap_err();
        assert_eq!(errors[0].param, "_id");
        assert_eq!(errors[0].kind, FieldErrorKind::MissingField);
        assert_eq!(
            kinds_for(&errors, "n_registro"),
            vec![
                FieldErrorKind::MissingField,
                FieldErrorKind::InvalidFormat,
                FieldErrorKind::InvalidLength
            ]
        );
    }

    #[test]
    fn test_patch_rejects_malformed_id() {
        let errors = validate_event_patch(&payload(json!({
            "_id": "not-an-objectid",
            "n_registro": "12345678"
        })))
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, FieldErrorKind::InvalidIdentifier);
        assert_eq!(errors[0].value, json!("not-an-objectid"));
    }

    #[test]
    fn test_patch_keeps_only_present_fields() {
        let (id, patch) = validate_event_patch(&payload(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "n_registro": "12345678",
            "titulo": "Novo"
        })))
        .unwrap();

        assert_eq!(id.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(patch.titulo.as_deref(), Some("Novo"));
        assert_eq!(patch.custo, None);
        assert_eq!(patch.data, None);
    }

    #[test]
    fn test_patch_still_checks_present_fields() {
        let errors = validate_event_patch(&payload(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "n_registro": "12345678",
            "custo": -10
        })))
        .unwrap_err();

        assert_eq!(kinds_for(&errors, "custo"), vec![FieldErrorKind::OutOfRange]);
    }

    #[test]
    fn test_patch_rejects_blank_present_fields() {
        let errors = validate_event_patch(&payload(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "n_registro": "12345678",
            "titulo": "   ",
            "data": ""
        })))
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].param, "titulo");
        assert_eq!(errors[0].kind, FieldErrorKind::MissingField);
        assert_eq!(errors[0].value, json!("   "));
        assert_eq!(errors[0].msg, TITULO_MISSING);
        assert_eq!(errors[1].param, "data");
        assert_eq!(errors[1].kind, FieldErrorKind::MissingField);
    }

    #[test]
    fn test_patch_accepts_form_encoded_custo() {
        let (_, patch) = validate_event_patch(&payload(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "n_registro": "12345678",
            "custo": "300"
        })))
        .unwrap();

        assert_eq!(patch.custo, Some(300.0));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldErrorKind::MissingField.to_string(), "MissingField");
        assert_eq!(FieldErrorKind::InvalidLength.as_ref(), "InvalidLength");
    }
}
