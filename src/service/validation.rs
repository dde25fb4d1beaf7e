//! Field rules for incoming camp and talk models.

use crate::error::AppError;
use crate::model::{CampModel, TalkModel};

/// Per-field constraints. Unset limits are not checked.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl ValidationRule {
    const fn text(min: Option<usize>, max: usize) -> Self {
        ValidationRule {
            required: true,
            min_length: min,
            max_length: Some(max),
            minimum: None,
            maximum: None,
        }
    }

    const fn range(min: i64, max: i64) -> Self {
        ValidationRule {
            required: false,
            min_length: None,
            max_length: None,
            minimum: Some(min),
            maximum: Some(max),
        }
    }
}

const CAMP_NAME: ValidationRule = ValidationRule::text(None, 100);
const CAMP_MONIKER: ValidationRule = ValidationRule::text(None, 100);
const CAMP_LENGTH: ValidationRule = ValidationRule::range(1, 100);
const TALK_TITLE: ValidationRule = ValidationRule::text(None, 100);
const TALK_ABSTRACT: ValidationRule = ValidationRule::text(Some(20), 4000);
const TALK_LEVEL: ValidationRule = ValidationRule::range(100, 300);

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate_camp(model: &CampModel) -> Result<(), AppError> {
        validate_text("name", &model.name, &CAMP_NAME)?;
        validate_text("moniker", &model.moniker, &CAMP_MONIKER)?;
        if model.event_date.is_none() {
            return Err(AppError::Validation("eventDate is required".into()));
        }
        validate_number("length", model.length.into(), &CAMP_LENGTH)
    }

    pub fn validate_talk(model: &TalkModel) -> Result<(), AppError> {
        validate_text("title", &model.title, &TALK_TITLE)?;
        validate_text("abstract", &model.abstract_, &TALK_ABSTRACT)?;
        validate_number("level", model.level.into(), &TALK_LEVEL)
    }
}

fn validate_text(col: &str, v: &str, rule: &ValidationRule) -> Result<(), AppError> {
    if rule.required && v.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    let len = v.chars().count();
    if let Some(max) = rule.max_length {
        if len > max {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                col, max
            )));
        }
    }
    if let Some(min) = rule.min_length {
        if len < min {
            return Err(AppError::Validation(format!(
                "{} must be at least {} characters",
                col, min
            )));
        }
    }
    Ok(())
}

fn validate_number(col: &str, n: i64, rule: &ValidationRule) -> Result<(), AppError> {
    if let Some(min) = rule.minimum {
        if n < min {
            return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
        }
    }
    if let Some(max) = rule.maximum {
        if n > max {
            return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn camp() -> CampModel {
        CampModel {
            name: "Atlanta Code Camp".into(),
            moniker: "ATL2018".into(),
            event_date: NaiveDate::from_ymd_opt(2018, 10, 18),
            length: 1,
            ..CampModel::default()
        }
    }

    fn talk() -> TalkModel {
        TalkModel {
            title: "Entity Framework From Scratch".into(),
            abstract_: "Working with Entity Framework from the ground up".into(),
            level: 100,
            ..TalkModel::default()
        }
    }

    #[test]
    fn accepts_complete_models() {
        assert!(RequestValidator::validate_camp(&camp()).is_ok());
        assert!(RequestValidator::validate_talk(&talk()).is_ok());
    }

    #[test]
    fn blank_moniker_is_required() {
        let model = CampModel { moniker: "  ".into(), ..camp() };
        let err = RequestValidator::validate_camp(&model).unwrap_err();
        assert_eq!(err.to_string(), "moniker is required");
    }

    #[test]
    fn camp_length_is_bounded() {
        let model = CampModel { length: 0, ..camp() };
        assert!(RequestValidator::validate_camp(&model).is_err());
        let model = CampModel { length: 101, ..camp() };
        assert!(RequestValidator::validate_camp(&model).is_err());
    }

    #[test]
    fn missing_event_date_is_rejected() {
        let model = CampModel { event_date: None, ..camp() };
        assert!(matches!(RequestValidator::validate_camp(&model), Err(AppError::Validation(_))));
    }

    #[test]
    fn short_abstract_is_rejected() {
        let model = TalkModel { abstract_: "too short".into(), ..talk() };
        let err = RequestValidator::validate_talk(&model).unwrap_err();
        assert_eq!(err.to_string(), "abstract must be at least 20 characters");
    }

    #[test]
    fn talk_level_is_bounded() {
        let model = TalkModel { level: 50, ..talk() };
        assert!(RequestValidator::validate_talk(&model).is_err());
        let model = TalkModel { level: 301, ..talk() };
        assert!(RequestValidator::validate_talk(&model).is_err());
    }
}
