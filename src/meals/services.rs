use time::Date;
use tracing::{error, info, instrument, warn};

use super::date::{display_date, to_iso, to_ymd};
use super::dto::{Lunch, MealOutcome, MealRow, NormalizedResponse};
use super::menu::{split_lines, tokenize};
use super::normalize::normalize;
use crate::error::MealError;
use crate::state::AppState;

/// Fetch, normalize and prepare one day's meals.
#[instrument(skip(state))]
pub async fn get_meal_info(state: &AppState, date: Date) -> Result<MealOutcome, MealError> {
    let ymd = to_ymd(date);

    let xml = state.meals.fetch_xml(&ymd).await.map_err(|e| {
        error!(error = %e, %ymd, "fetching meal data failed");
        e
    })?;

    let normalized = normalize(&xml).map_err(|e| {
        error!(error = %e, %ymd, "meal response is not valid xml");
        e
    })?;

    let outcome = build_outcome(date, normalized);
    match &outcome {
        MealOutcome::Served { rows, lunch, .. } => {
            info!(%ymd, rows = rows.len(), has_lunch = lunch.is_some(), "meal data served")
        }
        MealOutcome::NoData { result: Some(r), .. } => {
            warn!(%ymd, code = %r.code, message = %r.message, "api returned a status instead of rows")
        }
        MealOutcome::NoData { result: None, .. } => info!(%ymd, "no meal rows for date"),
    }
    Ok(outcome)
}

/// A status block and an empty row list both end up as `NoData`; the status
/// code travels along so callers can tell them apart if they need to.
pub fn build_outcome(date: Date, normalized: NormalizedResponse) -> MealOutcome {
    let NormalizedResponse { result, rows } = normalized;
    let iso = to_iso(date);
    let shown = display_date(date);

    if result.is_some() || rows.is_empty() {
        return MealOutcome::NoData { date: iso, display_date: shown, result };
    }

    MealOutcome::Served {
        date: iso,
        display_date: shown,
        lunch: select_lunch(&rows),
        rows,
    }
}

/// First lunch row with a non-empty dish field.
pub fn select_lunch(rows: &[MealRow]) -> Option<Lunch> {
    let row = rows.iter().find(|r| r.is_lunch())?;
    if row.dish_field.is_empty() {
        return None;
    }
    Some(Lunch {
        dishes: tokenize(&row.dish_field),
        calories: row.calorie_info.clone(),
        nutrition: split_lines(&row.nutrition_info),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::dto::ApiResult;
    use crate::meals::fixtures;
    use time::macros::date;

    #[tokio::test]
    async fn serves_lunch_from_rows() {
        let state = AppState::fake(&fixtures::lunch_day_xml());
        let outcome = get_meal_info(&state, date!(2024 - 01 - 01)).await.unwrap();

        let MealOutcome::Served { date, display_date, lunch, rows } = outcome else {
            panic!("expected served outcome");
        };
        assert_eq!(date, "2024-01-01");
        assert_eq!(display_date, "2024년 1월 1일 (월)");
        assert_eq!(rows.len(), 2);
        let lunch = lunch.expect("lunch present");
        assert_eq!(lunch.dishes, vec!["쌀밥", "쇠고기미역국", "배추김치"]);
        assert_eq!(lunch.calories, "812.5 Kcal");
        assert_eq!(lunch.nutrition.len(), 3);
    }

    #[tokio::test]
    async fn status_block_is_no_data_with_code() {
        let state = AppState::fake(&fixtures::status_xml("INFO-200", "해당하는 데이터가 없습니다."));
        let outcome = get_meal_info(&state, date!(2024 - 01 - 06)).await.unwrap();
        assert_eq!(
            outcome,
            MealOutcome::NoData {
                date: "2024-01-06".into(),
                display_date: "2024년 1월 6일 (토)".into(),
                result: Some(ApiResult {
                    code: "INFO-200".into(),
                    message: "해당하는 데이터가 없습니다.".into(),
                }),
            }
        );
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let state = AppState::fake_offline();
        let err = get_meal_info(&state, date!(2024 - 01 - 01)).await.unwrap_err();
        assert!(matches!(err, MealError::Transport(_)));
    }

    #[tokio::test]
    async fn broken_xml_is_a_parse_error() {
        let state = AppState::fake("<mealServiceDietInfo><row>");
        let err = get_meal_info(&state, date!(2024 - 01 - 01)).await.unwrap_err();
        assert!(matches!(err, MealError::Parse(_)));
    }

    #[test]
    fn zero_rows_is_no_data() {
        let outcome = build_outcome(date!(2024 - 01 - 01), NormalizedResponse::default());
        assert!(matches!(outcome, MealOutcome::NoData { result: None, .. }));
    }

    #[test]
    fn rows_without_lunch_are_served_without_lunch() {
        let rows = vec![MealRow {
            meal_type_code: "3".into(),
            dish_field: "카레".into(),
            ..MealRow::default()
        }];
        let outcome = build_outcome(date!(2024 - 01 - 01), NormalizedResponse { result: None, rows });
        assert!(matches!(outcome, MealOutcome::Served { lunch: None, .. }));
    }

    #[test]
    fn lunch_with_empty_dish_field_is_absent() {
        let rows = vec![MealRow { meal_type_code: "2".into(), ..MealRow::default() }];
        assert!(select_lunch(&rows).is_none());
    }
}
